//! Transaction helper for multi-statement writes.

use std::future::Future;
use std::pin::Pin;

use datamint_core::AppError;
use sqlx::{PgPool, Postgres, Transaction};

/// Runs `f` inside a database transaction.
///
/// Commits when the closure returns `Ok`, rolls back when it returns `Err`.
/// A commit failure surfaces as `AppError::Database`; a rollback failure is
/// logged and the original error is returned.
pub async fn with_transaction<T, F>(pool: &PgPool, f: F) -> Result<T, AppError>
where
    F: for<'a> FnOnce(
        &'a mut Transaction<'_, Postgres>,
    ) -> Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'a>>,
{
    let mut tx = pool.begin().await?;

    match f(&mut tx).await {
        Ok(value) => {
            tx.commit().await.map_err(|err| {
                tracing::error!(error = %err, "transaction commit failed");
                AppError::Database(err)
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}
