use chrono::{DateTime, Utc};
use datamint_core::{models::Purchase, AppError};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Fields supplied when recording a completed purchase
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub listing_id: Uuid,
    pub token_id: i64,
    pub title: String,
    pub price: Decimal,
    pub currency: String,
    pub transaction_hash: String,
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Repository for managing purchases
#[derive(Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the purchase row inside the caller's transaction.
    ///
    /// The `UNIQUE (buyer_id, listing_id)` constraint rejects concurrent
    /// duplicates; callers can classify that with
    /// [`AppError::is_unique_violation`].
    #[tracing::instrument(skip(self, tx, purchase), fields(db.table = "purchases", db.operation = "insert"))]
    pub async fn create_purchase(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        purchase: NewPurchase,
    ) -> Result<Purchase, AppError> {
        let created = sqlx::query_as::<Postgres, Purchase>(
            r#"
            INSERT INTO purchases (
                buyer_id, seller_id, listing_id, token_id, title, price,
                currency, transaction_hash, status, download_url, expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'completed', $9, $10)
            RETURNING *
            "#,
        )
        .bind(purchase.buyer_id)
        .bind(purchase.seller_id)
        .bind(purchase.listing_id)
        .bind(purchase.token_id)
        .bind(&purchase.title)
        .bind(purchase.price)
        .bind(&purchase.currency)
        .bind(&purchase.transaction_hash)
        .bind(&purchase.download_url)
        .bind(purchase.expires_at)
        .fetch_one(&mut **tx)
        .await?;

        Ok(created)
    }

    /// Whether the buyer already holds this listing
    #[tracing::instrument(skip(self), fields(db.table = "purchases", db.operation = "select"))]
    pub async fn has_purchased(&self, buyer_id: Uuid, listing_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM purchases WHERE buyer_id = $1 AND listing_id = $2)",
        )
        .bind(buyer_id)
        .bind(listing_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// All purchases made by one user, newest first
    #[tracing::instrument(skip(self), fields(db.table = "purchases", db.operation = "select"))]
    pub async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<Purchase>, AppError> {
        let purchases = sqlx::query_as::<Postgres, Purchase>(
            "SELECT * FROM purchases WHERE buyer_id = $1 ORDER BY purchased_at DESC",
        )
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    /// Seller-side sales totals: (sale count, gross earnings)
    #[tracing::instrument(skip(self), fields(db.table = "purchases", db.operation = "select"))]
    pub async fn seller_totals(&self, seller_id: Uuid) -> Result<(i64, Decimal), AppError> {
        let row = sqlx::query_as::<Postgres, (i64, Option<Decimal>)>(
            "SELECT COUNT(*), SUM(price) FROM purchases WHERE seller_id = $1",
        )
        .bind(seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((row.0, row.1.unwrap_or_default()))
    }
}
