mod application;
mod campaign;
mod client;

pub use application::{Application, CredentialError};
pub use campaign::CampaignRepository;
pub use client::ClientRepository;

/// The base trait every repository builds on.
///
/// It fixes the error type and the identifier types, so that an application
/// can be written once against any storage backend.
pub trait Repository {
    /// The error type for underlying implementation failures
    type Error: std::error::Error;

    /// Uniquely identifies a client account
    type ClientId: Eq + std::hash::Hash + Clone;

    /// Uniquely identifies a campaign
    type CampaignId: Clone;
}
