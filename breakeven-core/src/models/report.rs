use crate::models::{BusinessParameters, CampaignRecord, Figure};
use time::OffsetDateTime;

/// The sales volume and revenue at which cumulative profit reaches zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakEven {
    /// Units to sell; infinite when no unit is sold at a profit
    pub units: Figure,
    /// Revenue at that volume; infinite whenever `units` is
    pub revenue: Figure,
}

/// The administrative view of a break-even point.
///
/// Unlike [`BreakEven`], an unreachable break-even is reported as
/// unavailable (both fields `null`) rather than as infinity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakEvenEstimate {
    /// Units to sell, if computable
    pub units: Option<Figure>,
    /// Revenue at that volume, if computable
    pub revenue: Option<Figure>,
}

impl BreakEvenEstimate {
    /// Returns `true` if a break-even point was computed
    pub fn is_available(&self) -> bool {
        self.units.is_some() && self.revenue.is_some()
    }
}

impl From<Option<BreakEven>> for BreakEvenEstimate {
    fn from(value: Option<BreakEven>) -> Self {
        match value {
            Some(BreakEven { units, revenue }) => Self {
                units: Some(units),
                revenue: Some(revenue),
            },
            None => Self {
                units: None,
                revenue: None,
            },
        }
    }
}

/// A campaign annotated with its efficiency metrics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignReport<ClientId, CampaignId> {
    /// The campaign as stored
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub campaign: CampaignRecord<ClientId, CampaignId>,
    /// Return on ad spend, as a percentage
    pub roas: Figure,
    /// Return on investment, as a percentage
    pub roi: Figure,
}

/// A client's analytics report.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Report<ClientId, CampaignId> {
    /// The break-even point of the client's cost structure
    pub break_even: BreakEven,
    /// The cost structure the report was computed from
    pub business: BusinessParameters,
    /// Every campaign of the client, most recent first
    pub campaigns: Vec<CampaignReport<ClientId, CampaignId>>,
}

/// Identifying details and campaign totals of one client, for administrators.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ClientOverview<ClientId> {
    /// The client's identifier
    pub id: ClientId,
    /// The client's login email
    pub email: String,
    /// The most recent successful login, if any
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "time::serde::rfc3339::option")
    )]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    pub last_seen: Option<OffsetDateTime>,
    /// When the client registered
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub created_at: OffsetDateTime,
    /// Number of campaigns the client owns
    pub campaign_count: usize,
    /// Sum of ad spend over those campaigns
    pub total_ad_spend: f64,
}

/// The administrative detail report for a single client.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ClientDetail<ClientId, CampaignId> {
    /// Who the client is and how much they have spent
    pub client: ClientOverview<ClientId>,
    /// The break-even point, when the cost structure admits one
    pub break_even: BreakEvenEstimate,
    /// The client's campaigns with their metrics
    pub campaigns: Vec<CampaignReport<ClientId, CampaignId>>,
}

/// One row of the administrative export.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ClientSummary {
    /// The client's login email
    pub email: String,
    /// When the client registered
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub registration_date: OffsetDateTime,
    /// The most recent successful login, if any
    #[cfg_attr(
        feature = "serde",
        serde(default, with = "time::serde::rfc3339::option")
    )]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::optional_datetime_schema")
    )]
    pub last_seen: Option<OffsetDateTime>,
    /// Number of campaigns the client owns
    pub campaign_count: usize,
    /// Sum of ad spend over those campaigns
    pub total_ad_spend: f64,
    /// Sum of gross revenue over those campaigns
    pub total_gross_revenue: f64,
    /// Fixed costs, or 0 if not set
    pub fixed_costs: f64,
    /// Variable cost per unit, or 0 if not set
    pub variable_cost_per_unit: f64,
    /// Unit price, or 0 if not set
    pub unit_price: f64,
}

