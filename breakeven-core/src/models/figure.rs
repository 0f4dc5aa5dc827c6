use std::fmt::Display;

/// The marker used on the wire for an unbounded figure.
///
/// JSON has no infinity literal, so an unbounded break-even point or an
/// efficiency ratio over zero spend is transmitted as this string.
pub const INFINITY_MARKER: &str = "Infinity";

/// A derived metric that is either a finite number or positive infinity.
///
/// Break-even points are unbounded when every unit sold loses money, and
/// spend-based ratios are unbounded when revenue was earned with no spend.
/// Keeping the two cases apart in the type means an infinite result can never
/// be silently coerced into a large number, `NaN` or `null`.
///
/// Finite figures are rounded to two decimal places when serialized.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FigureDto", into = "FigureDto")
)]
pub enum Figure {
    /// A finite value
    Finite(f64),
    /// Positive infinity
    Infinite,
}

impl Figure {
    /// Returns `true` if the figure is unbounded
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// The figure as a float, with `Infinite` mapping to `f64::INFINITY`
    pub fn value(&self) -> f64 {
        match self {
            Self::Finite(value) => *value,
            Self::Infinite => f64::INFINITY,
        }
    }

    /// The figure rounded to two decimal places, as surfaced to callers
    pub fn rounded(&self) -> Self {
        match self {
            Self::Finite(value) => {
                let scaled = value * 100.0;
                // values this large have no fractional digits
                if scaled.is_finite() {
                    Self::Finite(scaled.round() / 100.0)
                } else {
                    Self::Finite(*value)
                }
            }
            Self::Infinite => Self::Infinite,
        }
    }
}

impl From<f64> for Figure {
    fn from(value: f64) -> Self {
        if value == f64::INFINITY {
            Self::Infinite
        } else {
            Self::Finite(value)
        }
    }
}

impl Display for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.rounded() {
            Self::Finite(value) => value.fmt(f),
            Self::Infinite => f.write_str(INFINITY_MARKER),
        }
    }
}

/// The wire representation: a plain number, or the infinity marker.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum FigureDto {
    Number(f64),
    Marker(String),
}

#[cfg(feature = "serde")]
impl From<Figure> for FigureDto {
    fn from(value: Figure) -> Self {
        match value.rounded() {
            Figure::Finite(value) => Self::Number(value),
            Figure::Infinite => Self::Marker(INFINITY_MARKER.to_owned()),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<FigureDto> for Figure {
    type Error = String;

    fn try_from(value: FigureDto) -> Result<Self, Self::Error> {
        match value {
            FigureDto::Number(number) => Ok(Self::from(number)),
            FigureDto::Marker(marker) if marker == INFINITY_MARKER => Ok(Self::Infinite),
            FigureDto::Marker(marker) => Err(format!(
                "expected a number or \"{INFINITY_MARKER}\", got \"{marker}\""
            )),
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Figure {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Figure".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "oneOf": [
                { "type": "number" },
                { "type": "string", "const": INFINITY_MARKER },
            ],
        })
    }
}
