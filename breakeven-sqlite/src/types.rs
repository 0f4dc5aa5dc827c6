//! Type definitions for the SQLite implementation.
//!
//! The public types are the identifiers handed out by this backend. The
//! row types mirror the tables and are converted into the domain records of
//! `breakeven-core` on the way out.

use breakeven_core::models::{BusinessParametersDto, CampaignRecord, ClientRecord, Role};
use time::OffsetDateTime;

mod ids;
pub use ids::{CampaignId, ClientId};

/// The columns selected whenever a client is read back.
pub(crate) const CLIENT_COLUMNS: &str = "id, email, role, is_blocked, last_seen, created_at, \
     fixed_costs, variable_cost_per_unit, unit_price";

/// The columns selected whenever a campaign is read back.
pub(crate) const CAMPAIGN_COLUMNS: &str = "id, client_id, name, ad_spend, gross_revenue, created_at";

#[derive(sqlx::FromRow)]
pub(crate) struct ClientRow {
    pub id: ClientId,
    pub email: String,
    pub role: String,
    pub is_blocked: bool,
    pub last_seen: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub fixed_costs: Option<f64>,
    pub variable_cost_per_unit: Option<f64>,
    pub unit_price: Option<f64>,
}

impl TryFrom<ClientRow> for ClientRecord<ClientId> {
    type Error = sqlx::Error;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(ClientRecord {
            id: row.id,
            email: row.email,
            role,
            is_blocked: row.is_blocked,
            last_seen: row.last_seen,
            created_at: row.created_at,
            business: BusinessParametersDto {
                fixed_costs: row.fixed_costs,
                variable_cost_per_unit: row.variable_cost_per_unit,
                unit_price: row.unit_price,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CredentialsRow {
    #[sqlx(flatten)]
    pub client: ClientRow,
    pub password_hash: String,
}

#[derive(sqlx::FromRow)]
pub(crate) struct CampaignRow {
    pub id: CampaignId,
    pub client_id: ClientId,
    pub name: String,
    pub ad_spend: f64,
    pub gross_revenue: f64,
    pub created_at: OffsetDateTime,
}

impl From<CampaignRow> for CampaignRecord<ClientId, CampaignId> {
    fn from(row: CampaignRow) -> Self {
        CampaignRecord {
            id: row.id,
            client_id: row.client_id,
            name: row.name,
            ad_spend: row.ad_spend,
            gross_revenue: row.gross_revenue,
            created_at: row.created_at,
        }
    }
}
