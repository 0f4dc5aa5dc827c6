use crate::Db;
use crate::types::{CLIENT_COLUMNS, ClientRow, CredentialsRow};
use breakeven_core::{
    models::{BusinessParameters, ClientRecord, Credentials, Role},
    ports::ClientRepository,
};
use time::OffsetDateTime;

impl ClientRepository for Db {
    async fn create_client(
        &self,
        client_id: Self::ClientId,
        email: String,
        password_hash: String,
        role: Role,
        as_of: OffsetDateTime,
    ) -> Result<Option<ClientRecord<Self::ClientId>>, Self::Error> {
        // a duplicate email inserts nothing, and so returns nothing
        let query = format!(
            r#"
            insert into
                client (id, email, password_hash, role, created_at)
            values
                ($1, $2, $3, $4, $5)
            on conflict (email)
                do nothing
            returning
                {CLIENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(client_id)
            .bind(email)
            .bind(password_hash)
            .bind(role.as_str())
            .bind(as_of)
            .fetch_optional(&self.writer)
            .await?
            .map(ClientRecord::try_from)
            .transpose()
    }

    async fn get_client(
        &self,
        client_id: Self::ClientId,
    ) -> Result<Option<ClientRecord<Self::ClientId>>, Self::Error> {
        let query = format!("select {CLIENT_COLUMNS} from client where id = $1");
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(client_id)
            .fetch_optional(&self.reader)
            .await?
            .map(ClientRecord::try_from)
            .transpose()
    }

    async fn get_credentials(
        &self,
        email: &str,
    ) -> Result<Option<Credentials<Self::ClientId>>, Self::Error> {
        let query = format!("select {CLIENT_COLUMNS}, password_hash from client where email = $1");
        let row = sqlx::query_as::<_, CredentialsRow>(&query)
            .bind(email)
            .fetch_optional(&self.reader)
            .await?;

        match row {
            Some(row) => Ok(Some(Credentials {
                client: ClientRecord::try_from(row.client)?,
                password_hash: row.password_hash,
            })),
            None => Ok(None),
        }
    }

    async fn query_clients(
        &self,
        role: Role,
    ) -> Result<Vec<ClientRecord<Self::ClientId>>, Self::Error> {
        let query = format!("select {CLIENT_COLUMNS} from client where role = $1");
        let mut rows = sqlx::query_as::<_, ClientRow>(&query)
            .bind(role.as_str())
            .fetch_all(&self.reader)
            .await?;
        // see `query_campaigns` for why this is not an `order by`
        rows.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.email.cmp(&b.email))
        });
        rows.into_iter().map(ClientRecord::try_from).collect()
    }

    async fn update_business(
        &self,
        client_id: Self::ClientId,
        business: BusinessParameters,
    ) -> Result<Option<ClientRecord<Self::ClientId>>, Self::Error> {
        let query = format!(
            r#"
            update
                client
            set
                fixed_costs = $1,
                variable_cost_per_unit = $2,
                unit_price = $3
            where
                id = $4
            returning
                {CLIENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(business.fixed_costs())
            .bind(business.variable_cost_per_unit())
            .bind(business.unit_price())
            .bind(client_id)
            .fetch_optional(&self.writer)
            .await?
            .map(ClientRecord::try_from)
            .transpose()
    }

    async fn update_password(
        &self,
        client_id: Self::ClientId,
        password_hash: String,
    ) -> Result<bool, Self::Error> {
        let result = sqlx::query("update client set password_hash = $1 where id = $2")
            .bind(password_hash)
            .bind(client_id)
            .execute(&self.writer)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_blocked(&self, client_id: Self::ClientId, blocked: bool) -> Result<bool, Self::Error> {
        let result = sqlx::query("update client set is_blocked = $1 where id = $2")
            .bind(blocked)
            .bind(client_id)
            .execute(&self.writer)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn record_login(
        &self,
        client_id: Self::ClientId,
        as_of: OffsetDateTime,
    ) -> Result<bool, Self::Error> {
        let result = sqlx::query("update client set last_seen = $1 where id = $2")
            .bind(as_of)
            .bind(client_id)
            .execute(&self.writer)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_client(&self, client_id: Self::ClientId) -> Result<bool, Self::Error> {
        // campaigns go with it via `on delete cascade`
        let result = sqlx::query("delete from client where id = $1")
            .bind(client_id)
            .execute(&self.writer)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
