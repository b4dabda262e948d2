use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::identity::models::Identifier;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::CredentialStore;
use crate::identity::errors::StoreError;

const IDENTIFIER_UNIQUE_CONSTRAINT: &str = "identities_identifier_key";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn identity_from_row(row: PgRow) -> Result<Identity, StoreError> {
    let corrupt = |e: sqlx::Error| StoreError::Corrupt(e.to_string());

    let id: Uuid = row.try_get("id").map_err(corrupt)?;
    let identifier: String = row.try_get("identifier").map_err(corrupt)?;
    let secret_hash: String = row.try_get("secret_hash").map_err(corrupt)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(corrupt)?;

    Ok(Identity {
        id: IdentityId(id),
        identifier: Identifier::new(identifier)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?,
        secret_hash,
        created_at,
    })
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn get(&self, identifier: &Identifier) -> Result<Option<Identity>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, identifier, secret_hash, created_at
            FROM identities
            WHERE identifier = $1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        row.map(identity_from_row).transpose()
    }

    async fn insert_unique(&self, identity: Identity) -> Result<Identity, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO identities (id, identifier, secret_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.identifier.as_str())
        .bind(identity.secret_hash.as_str())
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(IDENTIFIER_UNIQUE_CONSTRAINT)
                {
                    return StoreError::Conflict(identity.identifier.to_string());
                }
            }
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(identity)
    }
}
