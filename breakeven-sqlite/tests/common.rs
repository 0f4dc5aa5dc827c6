#![allow(dead_code)]

use breakeven_core::{
    models::{BusinessParameters, CampaignData, ClientRecord, Role},
    ports::ClientRepository as _,
};
use breakeven_sqlite::{
    Db,
    config::SqliteConfig,
    types::{CampaignId, ClientId},
};
use time::OffsetDateTime;

pub async fn open() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

pub fn client_id() -> ClientId {
    ClientId(uuid::Uuid::new_v4())
}

pub fn campaign_id() -> CampaignId {
    CampaignId(uuid::Uuid::new_v4())
}

pub fn business(fixed: f64, variable: f64, price: f64) -> BusinessParameters {
    BusinessParameters::new(fixed, variable, price).unwrap()
}

pub fn campaign(name: &str, ad_spend: f64, gross_revenue: f64) -> CampaignData {
    CampaignData::new(name, ad_spend, gross_revenue).unwrap()
}

pub async fn register(
    db: &Db,
    email: &str,
    as_of: OffsetDateTime,
) -> anyhow::Result<ClientRecord<ClientId>> {
    db.create_client(
        client_id(),
        email.to_owned(),
        "not-a-real-hash".to_owned(),
        Role::Client,
        as_of,
    )
    .await?
    .ok_or_else(|| anyhow::anyhow!("{email} already registered"))
}
