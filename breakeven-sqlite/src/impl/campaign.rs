use crate::Db;
use crate::types::{CAMPAIGN_COLUMNS, CampaignRow};
use breakeven_core::{
    models::{CampaignData, CampaignRecord},
    ports::CampaignRepository,
};
use time::OffsetDateTime;

impl CampaignRepository for Db {
    async fn create_campaign(
        &self,
        campaign_id: Self::CampaignId,
        client_id: Self::ClientId,
        data: CampaignData,
        as_of: OffsetDateTime,
    ) -> Result<CampaignRecord<Self::ClientId, Self::CampaignId>, Self::Error> {
        sqlx::query(
            r#"
            insert into
                campaign (id, client_id, name, ad_spend, gross_revenue, created_at)
            values
                ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(campaign_id)
        .bind(client_id)
        .bind(data.name())
        .bind(data.ad_spend())
        .bind(data.gross_revenue())
        .bind(as_of)
        .execute(&self.writer)
        .await?;

        Ok(data.into_record(campaign_id, client_id, as_of))
    }

    async fn query_campaigns(
        &self,
        client_id: Self::ClientId,
    ) -> Result<Vec<CampaignRecord<Self::ClientId, Self::CampaignId>>, Self::Error> {
        let query = format!("select {CAMPAIGN_COLUMNS} from campaign where client_id = $1");
        let mut rows = sqlx::query_as::<_, CampaignRow>(&query)
            .bind(client_id)
            .fetch_all(&self.reader)
            .await?;
        // timestamps are stored as RFC 3339 text, which does not sort
        // chronologically once fractional seconds vary in width
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn all_campaigns(
        &self,
    ) -> Result<Vec<CampaignRecord<Self::ClientId, Self::CampaignId>>, Self::Error> {
        let query = format!("select {CAMPAIGN_COLUMNS} from campaign");
        let rows = sqlx::query_as::<_, CampaignRow>(&query)
            .fetch_all(&self.reader)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_campaigns(&self, client_id: Self::ClientId) -> Result<u64, Self::Error> {
        let result = sqlx::query("delete from campaign where client_id = $1")
            .bind(client_id)
            .execute(&self.writer)
            .await?;
        Ok(result.rows_affected())
    }
}
