//! Read strategy implementations using enum dispatch.

use std::future::Future;

use crate::error::Result;

/// Read strategy enum - determines cache/db access pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadStrategy {
    /// Check cache first, fall back to DB on a clean miss only.
    /// Cache failures are returned to the caller.
    #[default]
    CacheFirst,
    /// Like `CacheFirst`, but a failing cache is bypassed: the DB result is
    /// returned and the cache is left alone.
    CacheFirstBypass,
    /// Only read from database, skip cache
    DbOnly,
}

/// Where a read was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSource {
    Cache,
    Database,
}

/// Value returned by [`ReadStrategy::read`] together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub value: T,
    pub source: ReadSource,
}

impl ReadStrategy {
    /// Execute a read operation according to the strategy.
    ///
    /// - `cache_fn`: reads from cache, `Ok(None)` meaning a clean miss
    /// - `db_fn`: reads from database
    /// - `populate_fn`: writes the DB result back to cache after a miss
    ///
    /// A failed cache write after a successful DB read is logged and does not
    /// fail the read.
    ///
    /// # Errors
    ///
    /// Propagates DB errors under every strategy, and cache errors under
    /// `CacheFirst`.
    pub async fn read<T, CacheFut, DbFut, PopulateFut>(
        &self,
        cache_fn: impl FnOnce() -> CacheFut,
        db_fn: impl FnOnce() -> DbFut,
        populate_fn: impl FnOnce(&T) -> PopulateFut,
    ) -> Result<Fetched<T>>
    where
        CacheFut: Future<Output = Result<Option<T>>>,
        DbFut: Future<Output = Result<T>>,
        PopulateFut: Future<Output = Result<()>>,
    {
        match self {
            Self::CacheFirst => {
                if let Some(value) = cache_fn().await? {
                    tracing::debug!("Cache hit");
                    return Ok(Fetched {
                        value,
                        source: ReadSource::Cache,
                    });
                }
                tracing::debug!("Cache miss, falling back to DB");

                let value = db_fn().await?;
                if let Err(e) = populate_fn(&value).await {
                    tracing::warn!(error = %e, "Failed to populate cache");
                }

                Ok(Fetched {
                    value,
                    source: ReadSource::Database,
                })
            }

            Self::CacheFirstBypass => match cache_fn().await {
                Ok(Some(value)) => {
                    tracing::debug!("Cache hit");
                    Ok(Fetched {
                        value,
                        source: ReadSource::Cache,
                    })
                }
                Ok(None) => {
                    tracing::debug!("Cache miss, falling back to DB");
                    let value = db_fn().await?;
                    if let Err(e) = populate_fn(&value).await {
                        tracing::warn!(error = %e, "Failed to populate cache");
                    }
                    Ok(Fetched {
                        value,
                        source: ReadSource::Database,
                    })
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Cache error, bypassing to DB");
                    let value = db_fn().await?;
                    Ok(Fetched {
                        value,
                        source: ReadSource::Database,
                    })
                }
            },

            Self::DbOnly => Ok(Fetched {
                value: db_fn().await?,
                source: ReadSource::Database,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn unavailable() -> PersistenceError {
        PersistenceError::CacheUnavailable("down".to_string())
    }

    #[tokio::test]
    async fn test_cache_first_hit() {
        let strategy = ReadStrategy::CacheFirst;

        let result = strategy
            .read(
                || async { Ok(Some(42)) },
                || async { Ok(99) },
                |_: &i32| async { Ok(()) },
            )
            .await
            .unwrap();

        assert_eq!(result.value, 42); // Should return cache value
        assert_eq!(result.source, ReadSource::Cache);
    }

    #[tokio::test]
    async fn test_cache_first_miss_populates_once() {
        let strategy = ReadStrategy::CacheFirst;
        let populated = Arc::new(AtomicUsize::new(0));
        let counter = populated.clone();

        let result = strategy
            .read(
                || async { Ok(None) },
                || async { Ok(99) },
                |value: &i32| {
                    assert_eq!(*value, 99);
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await
            .unwrap();

        assert_eq!(result.value, 99); // Should return DB value
        assert_eq!(result.source, ReadSource::Database);
        assert_eq!(populated.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_first_surfaces_cache_error() {
        let strategy = ReadStrategy::CacheFirst;
        let db_calls = Arc::new(AtomicUsize::new(0));
        let counter = db_calls.clone();

        let result = strategy
            .read(
                || async { Err::<Option<i32>, _>(unavailable()) },
                || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Ok(99) }
                },
                |_: &i32| async { Ok(()) },
            )
            .await;

        assert!(matches!(result, Err(PersistenceError::CacheUnavailable(_))));
        assert_eq!(db_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_db_error_skips_populate() {
        let strategy = ReadStrategy::CacheFirst;
        let populated = Arc::new(AtomicUsize::new(0));
        let counter = populated.clone();

        let result = strategy
            .read(
                || async { Ok(None) },
                || async { Err::<i32, _>(PersistenceError::Store("gone".to_string())) },
                |_: &i32| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await;

        assert!(matches!(result, Err(PersistenceError::Store(_))));
        assert_eq!(populated.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_populate_failure_still_returns_value() {
        let strategy = ReadStrategy::CacheFirst;

        let result = strategy
            .read(
                || async { Ok(None) },
                || async { Ok(7) },
                |_: &i32| async { Err(unavailable()) },
            )
            .await
            .unwrap();

        assert_eq!(result.value, 7);
    }

    #[tokio::test]
    async fn test_bypass_on_cache_error() {
        let strategy = ReadStrategy::CacheFirstBypass;
        let populated = Arc::new(AtomicUsize::new(0));
        let counter = populated.clone();

        let result = strategy
            .read(
                || async { Err(unavailable()) },
                || async { Ok(99) },
                |_: &i32| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Ok(()) }
                },
            )
            .await
            .unwrap();

        assert_eq!(result.value, 99);
        assert_eq!(populated.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_db_only() {
        let strategy = ReadStrategy::DbOnly;

        let result = strategy
            .read(
                || async { Ok(Some(42)) },
                || async { Ok(99) },
                |_: &i32| async { Ok(()) },
            )
            .await
            .unwrap();

        assert_eq!(result.value, 99); // Should skip cache
    }
}
