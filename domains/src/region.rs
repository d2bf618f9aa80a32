//! Derivation of auxiliary-subsystem endpoints from an account's region.
//!
//! A fixed set of services (the AI, bot, knowledge-base and proactive
//! messaging families) is never returned by directory resolution. Their
//! hosts follow per-subsystem naming conventions keyed off the account's
//! region, zone or geo, all of which are read off the region-bearing
//! endpoint's host name. The tables below enumerate the upstream
//! conventions literally; they are lookup data, not a pattern to
//! extrapolate from.

use crate::types::{RegionInfo, ServiceEndpoint};

/// The directly-resolved service whose host carries the account's region
/// prefix.
pub const REGION_BEARING_SERVICE: &str = "admin-area";

const REGION_TO_ZONE: &[(&str, &str)] = &[("va", "z1"), ("lo", "z2"), ("sy", "z3")];

const ZONE_TO_GEO: &[(&str, &str)] = &[("z1", "us"), ("z2", "emea"), ("z3", "apac")];

#[derive(Clone, Copy, Debug)]
enum HostKey {
    Region,
    Zone,
    Geo,
}

struct DerivedHost {
    service: &'static str,
    key: HostKey,
    // Host template; `{}` is replaced with the key value.
    host: &'static str,
}

const DERIVED_HOSTS: &[DerivedHost] = &[
    DerivedHost {
        service: "conversation-ai",
        key: HostKey::Region,
        host: "{}.ai.engagecloud.net",
    },
    DerivedHost {
        service: "bot-platform",
        key: HostKey::Region,
        host: "{}.bot-platform.engagecloud.net",
    },
    DerivedHost {
        service: "bot-analytics",
        key: HostKey::Zone,
        host: "bot-analytics.{}.engagecloud.net",
    },
    DerivedHost {
        service: "knowledge-base",
        key: HostKey::Geo,
        host: "knowledge-base.{}.engagecloud.net",
    },
    DerivedHost {
        service: "knowledge-base-search",
        key: HostKey::Geo,
        host: "kb-search.{}.engagecloud.net",
    },
    DerivedHost {
        service: "proactive-messaging",
        key: HostKey::Zone,
        host: "proactive.{}.engagecloud.net",
    },
    DerivedHost {
        service: "proactive-reporting",
        key: HostKey::Zone,
        host: "proactive-reporting.{}.engagecloud.net",
    },
];

fn table_get(table: &[(&str, &str)], key: &str) -> Option<String> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| (*value).to_string())
}

/// Extracts the region token from a host name: the leading alphabetic run
/// of the first label ("va7.engagecloud.net" -> "va").
pub fn region_from_host(host: &str) -> Option<String> {
    let label = host.split('.').next()?;
    let token: String = label
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    if token.is_empty() { None } else { Some(token) }
}

/// Region, zone and geo for a region-bearing host. Zone and geo are absent
/// when the tables carry no mapping; the caller skips what it cannot key.
pub fn region_info_from_host(host: &str) -> Option<RegionInfo> {
    let region = region_from_host(host)?;
    let zone = table_get(REGION_TO_ZONE, &region);
    let geo = zone.as_deref().and_then(|zone| table_get(ZONE_TO_GEO, zone));

    Some(RegionInfo { region, zone, geo })
}

/// Synthesizes the derived endpoint rows for one account. Rows whose key
/// component is unknown for this region are skipped.
pub fn derived_endpoints(account: &str, info: &RegionInfo) -> Vec<ServiceEndpoint> {
    DERIVED_HOSTS
        .iter()
        .filter_map(|derived| {
            let value = match derived.key {
                HostKey::Region => Some(info.region.as_str()),
                HostKey::Zone => info.zone.as_deref(),
                HostKey::Geo => info.geo.as_deref(),
            }?;

            Some(ServiceEndpoint::new(
                derived.service,
                account,
                derived.host.replacen("{}", value, 1),
            ))
        })
        .collect()
}
