use crate::models::{CampaignData, CampaignRecord};
use time::OffsetDateTime;

/// Repository interface for advertising campaigns.
pub trait CampaignRepository: super::Repository {
    /// Record a new campaign for a client.
    fn create_campaign(
        &self,
        campaign_id: Self::CampaignId,
        client_id: Self::ClientId,
        data: CampaignData,
        as_of: OffsetDateTime,
    ) -> impl Future<
        Output = Result<CampaignRecord<Self::ClientId, Self::CampaignId>, Self::Error>,
    > + Send;

    /// All campaigns of a client, most recent first.
    fn query_campaigns(
        &self,
        client_id: Self::ClientId,
    ) -> impl Future<
        Output = Result<Vec<CampaignRecord<Self::ClientId, Self::CampaignId>>, Self::Error>,
    > + Send;

    /// Every campaign of every client, in no particular order.
    fn all_campaigns(
        &self,
    ) -> impl Future<
        Output = Result<Vec<CampaignRecord<Self::ClientId, Self::CampaignId>>, Self::Error>,
    > + Send;

    /// Remove all campaigns of a client, returning how many were removed.
    fn delete_campaigns(
        &self,
        client_id: Self::ClientId,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;
}
