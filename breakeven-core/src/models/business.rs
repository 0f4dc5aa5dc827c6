use crate::ValidationError;
use crate::error::check_amount;

/// A client's validated cost structure.
///
/// All three amounts are present, finite and non-negative. Instances are
/// obtained from a [`BusinessParametersDto`] (either directly or by
/// deserialization), which guarantees these invariants before any formula
/// sees the values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BusinessParametersDto", into = "BusinessParametersDto")
)]
pub struct BusinessParameters {
    fixed_costs: f64,
    variable_cost_per_unit: f64,
    unit_price: f64,
}

impl BusinessParameters {
    /// Creates validated business parameters
    pub fn new(
        fixed_costs: f64,
        variable_cost_per_unit: f64,
        unit_price: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            fixed_costs: check_amount("fixedCosts", fixed_costs)?,
            variable_cost_per_unit: check_amount("variableCostPerUnit", variable_cost_per_unit)?,
            unit_price: check_amount("unitPrice", unit_price)?,
        })
    }

    /// Costs incurred regardless of volume
    pub fn fixed_costs(&self) -> f64 {
        self.fixed_costs
    }

    /// Costs incurred per unit sold
    pub fn variable_cost_per_unit(&self) -> f64 {
        self.variable_cost_per_unit
    }

    /// Revenue per unit sold
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Unit price less variable cost per unit
    pub fn marginal_profit(&self) -> f64 {
        self.unit_price - self.variable_cost_per_unit
    }
}

/// The possibly-incomplete cost structure as stored against a client and as
/// accepted from the API.
///
/// Each field is optional: a client that has not finished setup simply has
/// gaps, which is distinct from having entered zero.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BusinessParametersDto {
    /// Costs incurred regardless of volume
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_costs: Option<f64>,
    /// Costs incurred per unit sold
    #[cfg_attr(feature = "serde", serde(default))]
    pub variable_cost_per_unit: Option<f64>,
    /// Revenue per unit sold
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit_price: Option<f64>,
}

impl BusinessParametersDto {
    /// Returns `true` if every field has been set
    pub fn is_complete(&self) -> bool {
        self.fixed_costs.is_some() && self.variable_cost_per_unit.is_some() && self.unit_price.is_some()
    }
}

impl From<BusinessParameters> for BusinessParametersDto {
    fn from(value: BusinessParameters) -> Self {
        Self {
            fixed_costs: Some(value.fixed_costs),
            variable_cost_per_unit: Some(value.variable_cost_per_unit),
            unit_price: Some(value.unit_price),
        }
    }
}

impl TryFrom<BusinessParametersDto> for BusinessParameters {
    type Error = ValidationError;

    fn try_from(value: BusinessParametersDto) -> Result<Self, Self::Error> {
        // Every field is checked for presence before any is checked for sign,
        // so an incomplete setup is always reported as such.
        let fixed_costs = value.fixed_costs.ok_or(ValidationError::MissingBusinessData {
            field: "fixedCosts",
        })?;
        let variable_cost_per_unit =
            value
                .variable_cost_per_unit
                .ok_or(ValidationError::MissingBusinessData {
                    field: "variableCostPerUnit",
                })?;
        let unit_price = value.unit_price.ok_or(ValidationError::MissingBusinessData {
            field: "unitPrice",
        })?;

        Self::new(fixed_costs, variable_cost_per_unit, unit_price)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for BusinessParameters {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "BusinessParameters".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "object",
            "properties": {
                "fixedCosts": { "type": "number", "minimum": 0 },
                "variableCostPerUnit": { "type": "number", "minimum": 0 },
                "unitPrice": { "type": "number", "minimum": 0 },
            },
            "required": ["fixedCosts", "variableCostPerUnit", "unitPrice"],
        })
    }
}
