//! Write strategy implementations using enum dispatch.

use std::future::Future;

use crate::error::Result;

/// Write strategy enum - determines cache/db write pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Write to DB only, then invalidate cache
    #[default]
    WriteAround,
    /// Write to DB only, no cache interaction
    DbOnly,
}

impl WriteStrategy {
    /// Execute a write operation according to the strategy.
    ///
    /// - `db_fn`: Async function to write to database
    /// - `invalidate_fn`: Async function to invalidate cache, run only once
    ///   the DB write has been acknowledged
    ///
    /// # Errors
    ///
    /// Returns the DB error without invalidating, or the invalidation error
    /// after a committed DB write. The DB write is never rolled back.
    pub async fn write<T, DbFut, InvalidateFut>(
        &self,
        db_fn: impl FnOnce() -> DbFut,
        invalidate_fn: impl FnOnce() -> InvalidateFut,
    ) -> Result<T>
    where
        DbFut: Future<Output = Result<T>>,
        InvalidateFut: Future<Output = Result<()>>,
    {
        match self {
            Self::WriteAround => {
                // Write to DB first
                let written = db_fn().await?;

                // Invalidate cache
                if let Err(e) = invalidate_fn().await {
                    tracing::error!(error = %e, "Failed to invalidate cache after committed write");
                    return Err(e);
                }

                Ok(written)
            }

            Self::DbOnly => db_fn().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_write_around() {
        let strategy = WriteStrategy::WriteAround;
        let invalidated = Arc::new(AtomicBool::new(false));
        let db_called = Arc::new(AtomicBool::new(false));

        let invalidate_flag = invalidated.clone();
        let db_flag = db_called.clone();

        let written = strategy
            .write(
                || {
                    db_flag.store(true, Ordering::SeqCst);
                    async { Ok(42) }
                },
                || {
                    invalidate_flag.store(true, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await
            .unwrap();

        assert_eq!(written, 42);
        assert!(db_called.load(Ordering::SeqCst));
        assert!(invalidated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failed_write_does_not_invalidate() {
        let strategy = WriteStrategy::WriteAround;
        let invalidated = Arc::new(AtomicBool::new(false));
        let invalidate_flag = invalidated.clone();

        let result = strategy
            .write(
                || async { Err::<(), _>(PersistenceError::Store("rejected".to_string())) },
                || {
                    invalidate_flag.store(true, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await;

        assert!(matches!(result, Err(PersistenceError::Store(_))));
        assert!(!invalidated.load(Ordering::SeqCst)); // Cache NOT touched
    }

    #[tokio::test]
    async fn test_invalidation_failure_is_reported() {
        let strategy = WriteStrategy::WriteAround;

        let result = strategy
            .write(
                || async { Ok(()) },
                || async { Err(PersistenceError::CacheUnavailable("down".to_string())) },
            )
            .await;

        assert!(matches!(result, Err(PersistenceError::CacheUnavailable(_))));
    }

    #[tokio::test]
    async fn test_db_only() {
        let strategy = WriteStrategy::DbOnly;
        let invalidated = Arc::new(AtomicBool::new(false));
        let invalidate_flag = invalidated.clone();

        strategy
            .write(
                || async { Ok(()) },
                || {
                    invalidate_flag.store(true, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await
            .unwrap();

        assert!(!invalidated.load(Ordering::SeqCst)); // Cache NOT called
    }
}
