mod common;

use breakeven_core::{models::Role, ports::ClientRepository as _};
use common::{business, client_id, open, register};
use std::time::Duration;

#[tokio::test]
async fn test_create_and_read_client() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();

    let created = register(&db, "owner@example.com", now).await?;
    assert_eq!(created.email, "owner@example.com");
    assert_eq!(created.role, Role::Client);
    assert!(!created.is_blocked);
    assert_eq!(created.last_seen, None);
    assert!(!created.business.is_complete());

    let read = db.get_client(created.id).await?.unwrap();
    assert_eq!(read.id, created.id);
    assert_eq!(read.email, created.email);

    assert!(db.get_client(client_id()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();

    register(&db, "owner@example.com", now).await?;
    let duplicate = db
        .create_client(
            client_id(),
            "owner@example.com".into(),
            "other-hash".into(),
            Role::Client,
            now,
        )
        .await?;
    assert!(duplicate.is_none());
    Ok(())
}

#[tokio::test]
async fn test_credentials() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();

    let created = register(&db, "owner@example.com", now).await?;
    let credentials = db.get_credentials("owner@example.com").await?.unwrap();
    assert_eq!(credentials.client.id, created.id);
    assert_eq!(credentials.password_hash, "not-a-real-hash");

    assert!(db.update_password(created.id, "new-hash".into()).await?);
    let credentials = db.get_credentials("owner@example.com").await?.unwrap();
    assert_eq!(credentials.password_hash, "new-hash");

    assert!(db.get_credentials("nobody@example.com").await?.is_none());
    assert!(!db.update_password(client_id(), "x".into()).await?);
    Ok(())
}

#[tokio::test]
async fn test_business_update() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();
    let created = register(&db, "owner@example.com", now).await?;

    let updated = db
        .update_business(created.id, business(1000.0, 30.0, 50.0))
        .await?
        .unwrap();
    assert!(updated.business.is_complete());
    assert_eq!(updated.business.fixed_costs, Some(1000.0));
    assert_eq!(updated.business.variable_cost_per_unit, Some(30.0));
    assert_eq!(updated.business.unit_price, Some(50.0));

    assert!(
        db.update_business(client_id(), business(0.0, 0.0, 0.0))
            .await?
            .is_none()
    );
    Ok(())
}

#[tokio::test]
async fn test_block_and_login() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();
    let created = register(&db, "owner@example.com", now).await?;

    assert!(db.set_blocked(created.id, true).await?);
    assert!(db.get_client(created.id).await?.unwrap().is_blocked);
    assert!(db.set_blocked(created.id, false).await?);
    assert!(!db.get_client(created.id).await?.unwrap().is_blocked);

    let later = now + Duration::from_secs(60);
    assert!(db.record_login(created.id, later).await?);
    let seen = db.get_client(created.id).await?.unwrap().last_seen.unwrap();
    assert_eq!(seen.unix_timestamp(), later.unix_timestamp());

    assert!(!db.set_blocked(client_id(), true).await?);
    assert!(!db.record_login(client_id(), later).await?);
    Ok(())
}

#[tokio::test]
async fn test_query_by_role() -> anyhow::Result<()> {
    let db = open().await?;
    let now = time::OffsetDateTime::now_utc();

    let first = register(&db, "first@example.com", now).await?;
    let second = register(&db, "second@example.com", now + Duration::from_secs(1)).await?;
    db.create_client(
        client_id(),
        "admin@example.com".into(),
        "hash".into(),
        Role::Admin,
        now,
    )
    .await?
    .unwrap();

    let clients = db.query_clients(Role::Client).await?;
    let ids: Vec<_> = clients.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let admins = db.query_clients(Role::Admin).await?;
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].role, Role::Admin);
    Ok(())
}

#[tokio::test]
async fn test_client_order_with_fractional_seconds() -> anyhow::Result<()> {
    let db = open().await?;
    let noon = time::OffsetDateTime::from_unix_timestamp(1_704_110_400)?;

    // inserted first, half a second after the other two
    let later = register(&db, "a@example.com", noon + time::Duration::milliseconds(500)).await?;
    let earlier = register(&db, "b@example.com", noon).await?;
    let tied = register(&db, "c@example.com", noon).await?;

    let ids: Vec<_> = db
        .query_clients(Role::Client)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![earlier.id, tied.id, later.id]);
    Ok(())
}
