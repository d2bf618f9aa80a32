use indexmap::IndexMap;
use serde::Deserialize;

/// Opaque identifier of one customer account on the platform. All resolution
/// and caching is partitioned by it.
pub type AccountId = String;

/// One row of the service directory: a logical service name mapped to the
/// host currently serving it for one account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ServiceEndpoint {
    pub service: String,
    pub account: AccountId,
    #[serde(rename = "baseURI")]
    pub base_uri: String,
}

impl ServiceEndpoint {
    pub fn new<S, A, B>(service: S, account: A, base_uri: B) -> Self
    where
        S: Into<String>,
        A: Into<AccountId>,
        B: Into<String>,
    {
        ServiceEndpoint {
            service: service.into(),
            account: account.into(),
            base_uri: base_uri.into(),
        }
    }
}

/// The full endpoint set for one account: the rows returned by directory
/// resolution plus the derived auxiliary entries. Holds at most one entry
/// per service name; directly-resolved rows always win over derived ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Directory {
    entries: IndexMap<String, ServiceEndpoint>,
}

impl Directory {
    pub fn insert_resolved(&mut self, endpoint: ServiceEndpoint) {
        self.entries.insert(endpoint.service.clone(), endpoint);
    }

    /// Adds a derived entry unless the name was already resolved directly.
    pub fn insert_derived(&mut self, endpoint: ServiceEndpoint) {
        self.entries.entry(endpoint.service.clone()).or_insert(endpoint);
    }

    pub fn get(&self, service: &str) -> Option<&ServiceEndpoint> {
        self.entries.get(service)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceEndpoint> {
        self.entries.values()
    }
}

/// Region coordinates extracted from the region-bearing endpoint's host.
/// Exists only to drive endpoint derivation; `zone` and `geo` are `None`
/// when the fixed tables carry no mapping for the region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionInfo {
    pub region: String,
    pub zone: Option<String>,
    pub geo: Option<String>,
}
