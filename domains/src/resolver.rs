use crate::cache::TtlCache;
use crate::directory::{DirectoryClient, DirectoryError};
use crate::metrics_defs::{DIRECTORY_CACHE_HIT, DIRECTORY_CACHE_MISS, DIRECTORY_FETCH_ROWS};
use crate::region;
use crate::types::{Directory, RegionInfo, ServiceEndpoint};
use shared::{counter, histogram};
use std::sync::Arc;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// The directory loaded but no row, resolved or derived, matches the
    /// requested service name.
    #[error("no domain found for account '{account}' and service '{service}'")]
    NotFound { account: String, service: String },

    #[error("directory resolution failed: {0}")]
    Directory(#[from] DirectoryError),
}

struct ResolverInner {
    directory_client: DirectoryClient,
    directory_cache: TtlCache<Arc<Directory>>,
    region_cache: TtlCache<RegionInfo>,
}

/// Maps (account, service name) to the host currently serving it, behind a
/// per-account TTL cache. Cheap to clone; all clones share the caches.
#[derive(Clone)]
pub struct DomainResolver {
    inner: Arc<ResolverInner>,
}

impl DomainResolver {
    pub fn new(directory_client: DirectoryClient, ttl: Duration) -> Self {
        DomainResolver {
            inner: Arc::new(ResolverInner {
                directory_client,
                directory_cache: TtlCache::new(ttl),
                region_cache: TtlCache::new(ttl),
            }),
        }
    }

    /// Resolves one service name to its base URI.
    pub async fn resolve(&self, account: &str, service: &str) -> Result<String, ResolveError> {
        let directory = self.directory(account).await?;

        directory
            .get(service)
            .map(|endpoint| endpoint.base_uri.clone())
            .ok_or_else(|| ResolveError::NotFound {
                account: account.to_string(),
                service: service.to_string(),
            })
    }

    /// The full directory for an account, from cache or a fresh upstream
    /// call. Lookup misses for individual names are never cached negatively;
    /// the directory itself is the only cached value.
    ///
    /// Concurrent first-time resolutions for one account may each issue the
    /// upstream call; the cache is last-write-wins and the results are
    /// identical, so the race is tolerated rather than de-duplicated.
    pub async fn directory(&self, account: &str) -> Result<Arc<Directory>, ResolveError> {
        if let Some(directory) = self.inner.directory_cache.get(account) {
            counter!(DIRECTORY_CACHE_HIT).increment(1);
            return Ok(directory);
        }
        counter!(DIRECTORY_CACHE_MISS).increment(1);

        let rows = self.inner.directory_client.fetch(account).await?;
        histogram!(DIRECTORY_FETCH_ROWS).record(rows.len() as f64);
        tracing::debug!(account, rows = rows.len(), "resolved service directory");

        let (directory, region_info) = assemble(account, rows);
        let directory = Arc::new(directory);

        self.inner.directory_cache.insert(account, directory.clone());
        if let Some(info) = region_info {
            self.inner.region_cache.insert(account, info);
        }

        Ok(directory)
    }

    /// Region coordinates for an account, when its directory carries the
    /// region-bearing service.
    pub async fn region_info(&self, account: &str) -> Result<Option<RegionInfo>, ResolveError> {
        if let Some(info) = self.inner.region_cache.get(account) {
            return Ok(Some(info));
        }

        self.directory(account).await?;
        Ok(self.inner.region_cache.get(account))
    }

    /// Drops the cached directory and region info for an account.
    /// Idempotent; the next resolution reloads from upstream.
    pub fn invalidate(&self, account: &str) {
        self.inner.directory_cache.invalidate(account);
        self.inner.region_cache.invalidate(account);
    }
}

/// Builds the directory from the directly-resolved rows, then appends the
/// derived entries when the region-bearing endpoint is present. Derived
/// entries never override resolved names.
fn assemble(account: &str, rows: Vec<ServiceEndpoint>) -> (Directory, Option<RegionInfo>) {
    let mut directory = Directory::default();
    for row in rows {
        directory.insert_resolved(row);
    }

    let region_info = directory
        .get(region::REGION_BEARING_SERVICE)
        .and_then(|endpoint| region::region_info_from_host(&endpoint.base_uri));

    match region_info {
        Some(ref info) => {
            for endpoint in region::derived_endpoints(account, info) {
                directory.insert_derived(endpoint);
            }
        }
        // Without a region-bearing endpoint the directory is still usable
        // for directly-resolved names.
        None => tracing::debug!(account, "no region-bearing endpoint, skipping derivation"),
    }

    (directory, region_info)
}
