//! The routing table.
//!
//! One row per (verb scope, path, handler kind). A path with a single
//! segment resolves on the resource group alone and passes any further
//! segments through to the handler.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{HandlerKind, Verb};

/// Which verbs a route answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerbScope {
    /// Checked before verb dispatch, for every verb.
    Any,
    Get,
    Post,
    Put,
}

impl VerbScope {
    /// The verb-specific scope for a request verb, if it has one.
    pub fn for_verb(verb: &Verb) -> Option<Self> {
        match verb {
            Verb::Get => Some(VerbScope::Get),
            Verb::Post => Some(VerbScope::Post),
            Verb::Put => Some(VerbScope::Put),
            Verb::Other(method) => match method.to_ascii_uppercase().as_str() {
                "GET" => Some(VerbScope::Get),
                "POST" => Some(VerbScope::Post),
                "PUT" => Some(VerbScope::Put),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for VerbScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerbScope::Any => write!(f, "ANY"),
            VerbScope::Get => write!(f, "GET"),
            VerbScope::Post => write!(f, "POST"),
            VerbScope::Put => write!(f, "PUT"),
        }
    }
}

/// A single routing table row.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub scope: VerbScope,
    pub path: &'static [&'static str],
    pub handler: HandlerKind,
}

const fn route(
    scope: VerbScope,
    path: &'static [&'static str],
    handler: HandlerKind,
) -> RouteEntry {
    RouteEntry {
        scope,
        path,
        handler,
    }
}

use HandlerKind::*;
use VerbScope::{Any, Get, Post, Put};

/// Every route the service answers.
pub const ROUTES: &[RouteEntry] = &[
    // Jobs are reachable whatever the verb.
    route(Any, &["job", "geo"], JobGeo),
    // GET statistics
    route(Get, &["statistics", "attributes"], GetAttributeValue),
    route(Get, &["statistics", "attribute-date"], GetAttributeValueDate),
    route(Get, &["statistics", "channels"], GetAllChannels),
    route(Get, &["statistics", "cities"], GetAllCities),
    route(Get, &["statistics", "countries"], GetAllCountries),
    route(Get, &["statistics", "regions"], GetAllRegions),
    route(Get, &["statistics", "browserversions"], GetAllBrowserVersions),
    route(Get, &["statistics", "browsers"], GetAllBrowsers),
    route(Get, &["statistics", "metrics"], GetMetricsAll),
    route(Get, &["statistics", "visitors"], GetAllVisitors),
    route(Get, &["statistics", "devices"], GetAllDevices),
    route(Get, &["statistics", "pages"], GetAllPages),
    route(Get, &["statistics", "referrers"], GetAllReferrers),
    route(Get, &["statistics", "events-name-type"], GetAllEventNameType),
    route(Get, &["statistics", "attribute"], GetAllAttribute),
    route(Get, &["statistics", "visits"], GetAllEvents),
    route(Get, &["statistics", "outlinks"], GetAllOutlinks),
    route(Get, &["statistics", "events"], GetListEvents),
    route(Get, &["statistics", "languages"], GetAllLanguages),
    // ISPs have no handler of their own and are served from the language breakdown.
    route(Get, &["statistics", "isps"], GetAllLanguages),
    // GET events and flows
    route(Get, &["get", "events"], GetAllEventsName),
    route(Get, &["get", "flow"], GetAllFlows),
    route(Get, &["get", "flows"], GetAllFlows),
    route(Get, &["get", "flows-date"], GetAllFlowsDate),
    route(Get, &["get", "visitor"], GetVisitorConsentList),
    // GET consent statistics
    route(Get, &["list-consent-statistics", "all"], GetAllConsents),
    route(
        Get,
        &["list-consent-statistics", "total-consents-by-date"],
        GetTotalConsentPerDay,
    ),
    route(
        Get,
        &["list-consent-statistics", "total-tiers-by-date"],
        GetTotalConsentTier,
    ),
    route(
        Get,
        &["list-consent-statistics", "total-consent-category"],
        GetTotalConsentCategory,
    ),
    route(
        Get,
        &["list-consent-statistics", "total-consent-category-by-date"],
        GetTotalConsentCategoryPerDay,
    ),
    route(
        Get,
        &["list-consent-statistics", "total-consent-region"],
        GetTotalConsentRegion,
    ),
    route(
        Get,
        &["list-consent-statistics", "total-consent-override-language"],
        GetTotalConsentOverrideLanguage,
    ),
    // GET conversion
    route(Get, &["conversion", "products"], GetConversionProduct),
    route(Get, &["conversion", "products-chart"], GetConversionProductChart),
    route(Get, &["conversion", "statistics"], GetConversionStatistic),
    route(Get, &["conversion", "statistics-chart"], GetConversionStatisticChart),
    // GET live visitors
    route(Get, &["live-visitors", "list"], GetLiveVisitorsList),
    route(Get, &["live-visitors", "total"], GetLiveVisitorsTotal),
    route(Get, &["live-visitors", "device"], GetLiveVisitorsDevice),
    route(Get, &["datastream"], GetDatastreamTemplate),
    // POST visitor tracking
    route(Post, &["visitor", "start", "v2"], StartFingerprint),
    route(Post, &["visitor", "end", "v1"], CloseVisitorEvent),
    route(Post, &["wallet"], GetNonce),
    route(Post, &["conversion", "replace"], ConversionReplace),
    // POST consent
    route(Post, &["consent", "level1"], AddConsentLevel1),
    route(Post, &["consent", "level2"], AddConsentLevel2),
    route(Post, &["consent", "level3"], AddConsentLevel3or4),
    route(Post, &["consent", "level4"], AddConsentLevel3or4),
    route(Post, &["consent", "level5"], AddConsentLevel5),
    route(Post, &["consent", "level6"], AddConsentLevel6),
    route(Post, &["datastream"], StoreDatastreamTemplate),
    route(Post, &["disabled-block-domains"], StoreDisabledBlockDomains),
    route(Post, &["openai-assistant"], OpenaiAssistant),
    // PUT revocation
    route(Put, &["revoke", "level1"], RevokeConsentLevel1),
    route(Put, &["revoke", "level2"], RevokeConsentLevel2),
    route(Put, &["revoke", "level3"], RevokeConsentLevel3or4),
    route(Put, &["revoke", "level4"], RevokeConsentLevel3or4),
    route(Put, &["revoke", "level5"], RevokeConsentLevel5),
    route(Put, &["revoke", "level6"], RevokeConsentLevel6),
];
