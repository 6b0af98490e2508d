use datamint_core::{
    models::{Listing, ListingStatus},
    AppError,
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Fields supplied when a listing is created at mint time
#[derive(Debug, Clone)]
pub struct NewListing {
    pub owner_id: Uuid,
    pub token_id: i64,
    pub title: String,
    pub description: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub categories: Vec<String>,
    pub price: Decimal,
    pub currency: String,
    pub access_duration_days: i32,
    pub allow_revocation: bool,
    pub analysis: serde_json::Value,
    pub ipfs_hash: String,
    pub metadata_hash: String,
    pub contract_address: String,
    pub transaction_hash: String,
    pub block_number: i64,
}

/// Repository for managing dataset listings
#[derive(Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

impl ListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, listing), fields(db.table = "listings", db.operation = "insert"))]
    pub async fn create_listing(&self, listing: NewListing) -> Result<Listing, AppError> {
        let created = sqlx::query_as::<Postgres, Listing>(
            r#"
            INSERT INTO listings (
                owner_id, token_id, title, description, file_name, file_size,
                file_type, categories, price, currency, access_duration_days,
                allow_revocation, analysis, status, ipfs_hash, metadata_hash,
                contract_address, transaction_hash, block_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    'active', $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(listing.owner_id)
        .bind(listing.token_id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(&listing.file_name)
        .bind(listing.file_size)
        .bind(&listing.file_type)
        .bind(&listing.categories)
        .bind(listing.price)
        .bind(&listing.currency)
        .bind(listing.access_duration_days)
        .bind(listing.allow_revocation)
        .bind(&listing.analysis)
        .bind(&listing.ipfs_hash)
        .bind(&listing.metadata_hash)
        .bind(&listing.contract_address)
        .bind(&listing.transaction_hash)
        .bind(listing.block_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "select"))]
    pub async fn get_by_token_id(&self, token_id: i64) -> Result<Option<Listing>, AppError> {
        let listing =
            sqlx::query_as::<Postgres, Listing>("SELECT * FROM listings WHERE token_id = $1")
                .bind(token_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(listing)
    }

    /// Active marketplace listings, newest first
    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "select"))]
    pub async fn list_active(&self) -> Result<Vec<Listing>, AppError> {
        let listings = sqlx::query_as::<Postgres, Listing>(
            "SELECT * FROM listings WHERE status = 'active' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    /// All listings owned by one user, newest first
    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "select"))]
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Listing>, AppError> {
        let listings = sqlx::query_as::<Postgres, Listing>(
            "SELECT * FROM listings WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    /// Owner-scoped metadata update; returns None when the listing does not
    /// exist or belongs to someone else
    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "update"))]
    pub async fn update_listing(
        &self,
        token_id: i64,
        owner_id: Uuid,
        title: Option<String>,
        description: Option<String>,
        price: Option<Decimal>,
        categories: Option<Vec<String>>,
        status: Option<ListingStatus>,
    ) -> Result<Option<Listing>, AppError> {
        let listing = sqlx::query_as::<Postgres, Listing>(
            r#"
            UPDATE listings
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                categories = COALESCE($6, categories),
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE token_id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(token_id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(categories)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(listing)
    }

    /// Owner-scoped delete; returns whether a row was removed
    #[tracing::instrument(skip(self), fields(db.table = "listings", db.operation = "delete"))]
    pub async fn delete_listing(&self, token_id: i64, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM listings WHERE token_id = $1 AND owner_id = $2")
            .bind(token_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sale counters, bumped inside the caller's purchase transaction
    #[tracing::instrument(skip(self, tx), fields(db.table = "listings", db.operation = "update"))]
    pub async fn record_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_id: i64,
        price: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE listings
            SET total_sales = total_sales + 1,
                earnings = earnings + $2,
                views = views + 1,
                updated_at = NOW()
            WHERE token_id = $1
            "#,
        )
        .bind(token_id)
        .bind(price)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
