//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{PrincipalId, SessionId};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{principal::Principal, session::Session};
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::domain::value_object::{person_name::PersonName, username::Username};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Principal Repository Implementation
// ============================================================================

impl PrincipalRepository for PgAuthRepository {
    async fn insert_if_absent(&self, principal: &Principal) -> AuthResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO principals (
                principal_id,
                username,
                first_name,
                last_name,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(principal.principal_id.as_uuid())
        .bind(principal.username.as_str())
        .bind(principal.first_name.as_str())
        .bind(principal.last_name.as_str())
        .bind(principal.password.as_phc_string())
        .bind(principal.created_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT
                principal_id,
                username,
                first_name,
                last_name,
                password_hash,
                created_at
            FROM principals
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_principal()).transpose()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn insert(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                principal_id,
                username,
                first_name,
                last_name,
                created_at,
                expires_at_ms
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.principal_id.as_uuid())
        .bind(session.username.as_str())
        .bind(session.first_name.as_str())
        .bind(session.last_name.as_str())
        .bind(session.created_at)
        .bind(session.expires_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                principal_id,
                username,
                first_name,
                last_name,
                created_at,
                expires_at_ms
            FROM auth_sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn compare_and_swap(
        &self,
        current: &Session,
        new: Option<&Session>,
    ) -> AuthResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Sessions are immutable apart from their expiry, so expiry is the version.
        let removed = sqlx::query(
            "DELETE FROM auth_sessions WHERE session_id = $1 AND expires_at_ms = $2",
        )
        .bind(current.session_id.as_uuid())
        .bind(current.expires_at_ms)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if removed == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(new) = new {
            sqlx::query(
                r#"
                INSERT INTO auth_sessions (
                    session_id,
                    principal_id,
                    username,
                    first_name,
                    last_name,
                    created_at,
                    expires_at_ms
                ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(new.session_id.as_uuid())
            .bind(new.principal_id.as_uuid())
            .bind(new.username.as_str())
            .bind(new.first_name.as_str())
            .bind(new.last_name.as_str())
            .bind(new.created_at)
            .bind(new.expires_at_ms)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, session_id: SessionId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PrincipalRow {
    principal_id: Uuid,
    username: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl PrincipalRow {
    fn into_principal(self) -> AuthResult<Principal> {
        Ok(Principal {
            principal_id: PrincipalId::from_uuid(self.principal_id),
            username: Username::new(self.username)
                .map_err(|e| AuthError::Internal(format!("Invalid username: {e}")))?,
            first_name: person_name(&self.first_name)?,
            last_name: person_name(&self.last_name)?,
            password: HashedPassword::from_phc_string(self.password_hash)
                .map_err(|e| AuthError::Internal(format!("Invalid password hash: {e}")))?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    principal_id: Uuid,
    username: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    expires_at_ms: i64,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<Session> {
        Ok(Session {
            session_id: SessionId::from_uuid(self.session_id),
            principal_id: PrincipalId::from_uuid(self.principal_id),
            username: Username::new(self.username)
                .map_err(|e| AuthError::Internal(format!("Invalid username: {e}")))?,
            first_name: person_name(&self.first_name)?,
            last_name: person_name(&self.last_name)?,
            created_at: self.created_at,
            expires_at_ms: self.expires_at_ms,
        })
    }
}

fn person_name(raw: &str) -> AuthResult<PersonName> {
    PersonName::new(raw).map_err(|e| AuthError::Internal(format!("Invalid stored name: {e}")))
}
