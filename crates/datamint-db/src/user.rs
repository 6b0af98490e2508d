use datamint_core::{models::User, AppError};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Repository for managing users
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user; the email must be unique
    #[tracing::instrument(skip(self, password_hash), fields(db.table = "users", db.operation = "insert"))]
    pub async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let user = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Full names keyed by user id, for attaching seller names to listings
    #[tracing::instrument(skip(self, ids), fields(db.table = "users", db.operation = "select"))]
    pub async fn get_names(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, String)>, AppError> {
        let rows = sqlx::query_as::<Postgres, (Uuid, String, String)>(
            "SELECT id, first_name, last_name FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, first, last)| (id, format!("{} {}", first, last)))
            .collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    pub async fn touch_last_login(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Atomic counters updated when one of the user's datasets is minted
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    pub async fn increment_datasets_minted(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET datasets_minted = datasets_minted + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Earnings credit applied inside the caller's purchase transaction
    #[tracing::instrument(skip(self, tx), fields(db.table = "users", db.operation = "update", db.record_id = %id))]
    pub async fn credit_earnings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        amount: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET total_earnings = total_earnings + $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
