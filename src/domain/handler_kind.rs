//! Handler kinds - the tags the routing table resolves to.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! handler_kinds {
    ($($(#[$meta:meta])* $variant:ident),+ $(,)?) => {
        /// Tag naming one handler variant.
        ///
        /// The routing table maps commands to kinds; the handler registry
        /// maps kinds to handler objects.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum HandlerKind {
            $($(#[$meta])* $variant,)+
        }

        impl HandlerKind {
            /// Every known kind, in declaration order.
            pub const ALL: &'static [HandlerKind] = &[$(HandlerKind::$variant,)+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(HandlerKind::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

handler_kinds! {
    /// Fallback for a known resource group with an unknown operation.
    NotFound,

    // Jobs
    JobGeo,

    // Statistics
    GetAttributeValue,
    GetAttributeValueDate,
    GetAllChannels,
    GetAllCities,
    GetAllCountries,
    GetAllRegions,
    GetAllBrowserVersions,
    GetAllBrowsers,
    GetMetricsAll,
    GetAllVisitors,
    GetAllDevices,
    GetAllPages,
    GetAllReferrers,
    GetAllEventNameType,
    GetAllAttribute,
    GetAllEvents,
    GetAllOutlinks,
    GetListEvents,
    GetAllLanguages,

    // Events and flows
    GetAllEventsName,
    GetAllFlows,
    GetAllFlowsDate,
    GetVisitorConsentList,

    // Consent statistics
    GetAllConsents,
    GetTotalConsentPerDay,
    GetTotalConsentTier,
    GetTotalConsentCategory,
    GetTotalConsentCategoryPerDay,
    GetTotalConsentRegion,
    GetTotalConsentOverrideLanguage,

    // Conversion
    GetConversionProduct,
    GetConversionProductChart,
    GetConversionStatistic,
    GetConversionStatisticChart,
    ConversionReplace,

    // Live visitors
    GetLiveVisitorsList,
    GetLiveVisitorsTotal,
    GetLiveVisitorsDevice,

    // Datastream and settings
    GetDatastreamTemplate,
    StoreDatastreamTemplate,
    StoreDisabledBlockDomains,
    OpenaiAssistant,

    // Visitor tracking
    StartFingerprint,
    CloseVisitorEvent,
    GetNonce,

    // Consent
    AddConsentLevel1,
    AddConsentLevel2,
    /// Levels 3 and 4 share one handler.
    AddConsentLevel3or4,
    AddConsentLevel5,
    AddConsentLevel6,

    // Revocation
    RevokeConsentLevel1,
    RevokeConsentLevel2,
    /// Levels 3 and 4 share one handler.
    RevokeConsentLevel3or4,
    RevokeConsentLevel5,
    RevokeConsentLevel6,
}

impl std::fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for HandlerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HandlerKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("Unknown handler kind: {}", s))
    }
}
