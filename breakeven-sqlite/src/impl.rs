//! Repository trait implementations for the SQLite database.

use crate::{
    Db,
    types::{CampaignId, ClientId},
};
use breakeven_core::ports::Repository;

mod campaign;
mod client;

impl Repository for Db {
    type Error = sqlx::Error;
    type ClientId = ClientId;
    type CampaignId = CampaignId;
}
