mod common;

use breakeven_core::ports::{CampaignRepository as _, ClientRepository as _};
use common::{campaign, campaign_id, open, register};
use std::time::Duration;

#[tokio::test]
async fn test_campaigns_newest_first() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();
    let owner = register(&db, "owner@example.com", now).await?;

    let older = db
        .create_campaign(campaign_id(), owner.id, campaign("Winter", 100.0, 300.0), now)
        .await?;
    let newer = db
        .create_campaign(
            campaign_id(),
            owner.id,
            campaign("  Spring  ", 50.0, 0.0),
            now + Duration::from_secs(5),
        )
        .await?;
    assert_eq!(newer.name, "Spring");

    let campaigns = db.query_campaigns(owner.id).await?;
    let ids: Vec<_> = campaigns.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(campaigns[1].ad_spend, 100.0);
    assert_eq!(campaigns[1].gross_revenue, 300.0);
    assert_eq!(campaigns[1].client_id, owner.id);
    Ok(())
}

#[tokio::test]
async fn test_campaigns_are_per_client() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();
    let first = register(&db, "first@example.com", now).await?;
    let second = register(&db, "second@example.com", now).await?;

    db.create_campaign(campaign_id(), first.id, campaign("A", 1.0, 2.0), now)
        .await?;
    db.create_campaign(campaign_id(), first.id, campaign("B", 3.0, 4.0), now)
        .await?;
    db.create_campaign(campaign_id(), second.id, campaign("C", 5.0, 6.0), now)
        .await?;

    assert_eq!(db.query_campaigns(first.id).await?.len(), 2);
    assert_eq!(db.query_campaigns(second.id).await?.len(), 1);
    assert_eq!(db.all_campaigns().await?.len(), 3);

    assert_eq!(db.delete_campaigns(first.id).await?, 2);
    assert_eq!(db.delete_campaigns(first.id).await?, 0);
    assert_eq!(db.all_campaigns().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_deleting_client_removes_campaigns() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();
    let owner = register(&db, "owner@example.com", now).await?;
    let other = register(&db, "other@example.com", now).await?;

    db.create_campaign(campaign_id(), owner.id, campaign("A", 1.0, 2.0), now)
        .await?;
    db.create_campaign(campaign_id(), other.id, campaign("B", 1.0, 2.0), now)
        .await?;

    assert!(db.delete_client(owner.id).await?);
    assert!(!db.delete_client(owner.id).await?);
    assert!(db.get_client(owner.id).await?.is_none());

    let remaining = db.all_campaigns().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].client_id, other.id);
    Ok(())
}

#[tokio::test]
async fn test_campaign_requires_existing_client() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();

    let result = db
        .create_campaign(campaign_id(), common::client_id(), campaign("A", 1.0, 2.0), now)
        .await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_campaign_order_with_fractional_seconds() -> anyhow::Result<()> {
    let db = open().await?;
    // a whole second, so the stored text has no fractional part
    let noon = time::OffsetDateTime::from_unix_timestamp(1_704_110_400)?;
    let owner = register(&db, "owner@example.com", noon).await?;

    let older = db
        .create_campaign(campaign_id(), owner.id, campaign("older", 1.0, 1.0), noon)
        .await?;
    let newer = db
        .create_campaign(
            campaign_id(),
            owner.id,
            campaign("newer", 1.0, 1.0),
            noon + time::Duration::milliseconds(500),
        )
        .await?;

    let names: Vec<_> = db
        .query_campaigns(owner.id)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec![newer.name, older.name]);
    Ok(())
}
