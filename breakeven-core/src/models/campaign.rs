use crate::ValidationError;
use crate::error::check_amount;
use time::OffsetDateTime;

/// A stored advertising campaign.
///
/// Campaigns belong to exactly one client and are immutable once created;
/// they are only ever removed, either individually or together with their
/// owner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CampaignRecord<ClientId, CampaignId> {
    /// The campaign's unique identifier
    pub id: CampaignId,
    /// The owning client. Nothing guarantees this still resolves to a client.
    pub client_id: ClientId,
    /// A non-empty, human-readable label
    pub name: String,
    /// Money spent on advertising
    pub ad_spend: f64,
    /// Revenue attributed to the campaign
    pub gross_revenue: f64,
    /// When the campaign was recorded
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    #[cfg_attr(
        feature = "schemars",
        schemars(schema_with = "crate::models::datetime_schema")
    )]
    pub created_at: OffsetDateTime,
}

/// The validated, client-supplied part of a campaign.
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignData {
    name: String,
    ad_spend: f64,
    gross_revenue: f64,
}

impl CampaignData {
    /// Creates validated campaign data. The name is trimmed.
    pub fn new(name: &str, ad_spend: f64, gross_revenue: f64) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            ad_spend: check_amount("adSpend", ad_spend)?,
            gross_revenue: check_amount("grossRevenue", gross_revenue)?,
        })
    }

    /// The campaign's label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Money spent on advertising
    pub fn ad_spend(&self) -> f64 {
        self.ad_spend
    }

    /// Revenue attributed to the campaign
    pub fn gross_revenue(&self) -> f64 {
        self.gross_revenue
    }

    /// Attach storage-assigned fields to produce a full record
    pub fn into_record<ClientId, CampaignId>(
        self,
        id: CampaignId,
        client_id: ClientId,
        created_at: OffsetDateTime,
    ) -> CampaignRecord<ClientId, CampaignId> {
        CampaignRecord {
            id,
            client_id,
            name: self.name,
            ad_spend: self.ad_spend,
            gross_revenue: self.gross_revenue,
            created_at,
        }
    }
}

/// A DTO to ensure that we always validate campaign input from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, Default)]
pub struct CampaignDataDto {
    /// A human-readable label for the campaign
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Money spent on advertising
    #[cfg_attr(feature = "serde", serde(default))]
    pub ad_spend: Option<f64>,
    /// Revenue attributed to the campaign
    #[cfg_attr(feature = "serde", serde(default))]
    pub gross_revenue: Option<f64>,
}

impl TryFrom<CampaignDataDto> for CampaignData {
    type Error = ValidationError;

    fn try_from(value: CampaignDataDto) -> Result<Self, Self::Error> {
        let name = value
            .name
            .ok_or(ValidationError::MissingField { field: "name" })?;
        let ad_spend = value
            .ad_spend
            .ok_or(ValidationError::MissingField { field: "adSpend" })?;
        let gross_revenue = value
            .gross_revenue
            .ok_or(ValidationError::MissingField {
                field: "grossRevenue",
            })?;
        Self::new(&name, ad_spend, gross_revenue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let data = CampaignData::new("  Spring sale ", 10.0, 20.0).unwrap();
        assert_eq!(data.name(), "Spring sale");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            CampaignData::new("   ", 10.0, 20.0).unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn test_missing_fields() {
        let dto = CampaignDataDto {
            name: Some("Launch".into()),
            ad_spend: None,
            gross_revenue: Some(1.0),
        };
        assert_eq!(
            CampaignData::try_from(dto).unwrap_err(),
            ValidationError::MissingField { field: "adSpend" }
        );
    }

    #[test]
    fn test_negative_spend_rejected() {
        assert!(matches!(
            CampaignData::new("Launch", -0.5, 1.0),
            Err(ValidationError::InvalidNumericInput {
                field: "adSpend",
                ..
            })
        ));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let created_at = time::macros::datetime!(2024-03-01 12:00 UTC);
        let record = CampaignData::new("Launch", 100.0, 300.0)
            .unwrap()
            .into_record(7u32, 1u32, created_at);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["clientId"], serde_json::json!(1));
        assert_eq!(json["adSpend"], serde_json::json!(100.0));
        assert_eq!(json["createdAt"], serde_json::json!("2024-03-01T12:00:00Z"));
    }
}
