//! Route resolution.
//!
//! The table rows are compiled once into a segment trie per verb scope.
//! Resolution is a pure function of (verb, command).

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::domain::{Command, HandlerKind, Verb};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::routing::table::{RouteEntry, VerbScope, ROUTES};

#[derive(Debug)]
enum RouteNode {
    Leaf(HandlerKind),
    Branch(HashMap<&'static str, RouteNode>),
}

/// Compiled routing table.
#[derive(Debug)]
pub struct RouteTable {
    groups: HashMap<VerbScope, HashMap<&'static str, RouteNode>>,
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Compile the standard routing table.
    pub fn standard() -> AnalyticsResult<Self> {
        Self::build(ROUTES)
    }

    /// Compile a table from rows. Fails on empty or conflicting paths.
    pub fn build(entries: &[RouteEntry]) -> AnalyticsResult<Self> {
        let mut groups: HashMap<VerbScope, HashMap<&'static str, RouteNode>> = HashMap::new();

        for entry in entries {
            let group = groups.entry(entry.scope).or_default();
            insert(group, entry.path, entry.handler).map_err(|reason| {
                AnalyticsError::Config(format!(
                    "Invalid route {} {}: {}",
                    entry.scope,
                    entry.path.join("/"),
                    reason
                ))
            })?;
        }

        Ok(Self {
            groups,
            entries: entries.to_vec(),
        })
    }

    /// The rows this table was built from.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Resolve a command to a handler kind.
    ///
    /// Verb-independent groups are consulted first, then the verb's own
    /// groups. A matching group with no matching operation resolves to
    /// [`HandlerKind::NotFound`]; no matching group is an error.
    pub fn resolve(&self, verb: &Verb, command: &Command) -> AnalyticsResult<HandlerKind> {
        let resource = command.resource();

        let root = self
            .group(VerbScope::Any, resource)
            .or_else(|| VerbScope::for_verb(verb).and_then(|scope| self.group(scope, resource)))
            .ok_or_else(|| AnalyticsError::UnknownRoute {
                verb: verb.clone(),
                command: command.clone(),
            })?;

        let mut node = root;
        let mut depth = 1;
        loop {
            match node {
                RouteNode::Leaf(kind) => return Ok(*kind),
                RouteNode::Branch(children) => {
                    match command.get(depth).and_then(|segment| children.get(segment)) {
                        Some(next) => {
                            node = next;
                            depth += 1;
                        }
                        None => return Ok(HandlerKind::NotFound),
                    }
                }
            }
        }
    }

    fn group(&self, scope: VerbScope, resource: &str) -> Option<&RouteNode> {
        self.groups.get(&scope).and_then(|group| group.get(resource))
    }
}

fn insert(
    children: &mut HashMap<&'static str, RouteNode>,
    path: &'static [&'static str],
    handler: HandlerKind,
) -> Result<(), String> {
    let (head, rest) = path
        .split_first()
        .ok_or_else(|| "path must contain at least one segment".to_string())?;

    if rest.is_empty() {
        return match children.entry(*head) {
            Entry::Vacant(slot) => {
                slot.insert(RouteNode::Leaf(handler));
                Ok(())
            }
            Entry::Occupied(_) => Err(format!("'{}' is already routed", head)),
        };
    }

    match children
        .entry(*head)
        .or_insert_with(|| RouteNode::Branch(HashMap::new()))
    {
        RouteNode::Branch(grandchildren) => insert(grandchildren, rest, handler),
        RouteNode::Leaf(_) => Err(format!("'{}' already resolves to a handler", head)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn table() -> RouteTable {
        RouteTable::standard().unwrap()
    }

    fn resolve(verb: Verb, path: &str) -> AnalyticsResult<HandlerKind> {
        table().resolve(&verb, &Command::from_path(path).unwrap())
    }

    fn other(method: &str) -> Verb {
        Verb::Other(method.to_string())
    }

    #[test]
    fn test_standard_table_compiles() {
        let table = assert_ok!(RouteTable::standard());
        assert_eq!(table.entries().len(), ROUTES.len());
    }

    #[test]
    fn test_every_row_resolves_to_its_handler() {
        let table = table();
        for entry in ROUTES {
            let command = Command::from_segments(entry.path.iter().copied()).unwrap();
            let verbs = match entry.scope {
                VerbScope::Any => vec![Verb::Get, Verb::Post, Verb::Put, other("DELETE")],
                VerbScope::Get => vec![Verb::Get],
                VerbScope::Post => vec![Verb::Post],
                VerbScope::Put => vec![Verb::Put],
            };
            for verb in verbs {
                assert_eq!(
                    table.resolve(&verb, &command).unwrap(),
                    entry.handler,
                    "{} {}",
                    verb,
                    command
                );
            }
        }
    }

    #[test]
    fn test_job_routes_ignore_verb() {
        for verb in [Verb::Get, Verb::Post, Verb::Put, other("DELETE"), other("PATCH")] {
            assert_eq!(resolve(verb.clone(), "job/geo").unwrap(), HandlerKind::JobGeo);
            assert_eq!(
                resolve(verb, "job/unknown").unwrap(),
                HandlerKind::NotFound
            );
        }
    }

    #[test]
    fn test_statistics_attributes() {
        assert_eq!(
            resolve(Verb::Get, "statistics/attributes").unwrap(),
            HandlerKind::GetAttributeValue
        );
    }

    #[test]
    fn test_unknown_operation_is_not_found() {
        assert_eq!(
            resolve(Verb::Get, "statistics/nonexistent").unwrap(),
            HandlerKind::NotFound
        );
        // Missing operation segment
        assert_eq!(
            resolve(Verb::Get, "statistics").unwrap(),
            HandlerKind::NotFound
        );
    }

    #[test]
    fn test_consent_levels_three_and_four_share_handler() {
        let level3 = resolve(Verb::Post, "consent/level3").unwrap();
        let level4 = resolve(Verb::Post, "consent/level4").unwrap();
        assert_eq!(level3, level4);
        assert_eq!(level3, HandlerKind::AddConsentLevel3or4);

        let revoke3 = resolve(Verb::Put, "revoke/level3").unwrap();
        let revoke4 = resolve(Verb::Put, "revoke/level4").unwrap();
        assert_eq!(revoke3, revoke4);
        assert_eq!(revoke3, HandlerKind::RevokeConsentLevel3or4);
    }

    #[test]
    fn test_revoke_level1() {
        assert_eq!(
            resolve(Verb::Put, "revoke/level1").unwrap(),
            HandlerKind::RevokeConsentLevel1
        );
    }

    #[test]
    fn test_unsupported_verb_is_unknown_route() {
        let err = assert_err!(resolve(other("DELETE"), "consent/level1"));
        assert!(matches!(err, AnalyticsError::UnknownRoute { .. }));
    }

    #[test]
    fn test_group_is_verb_specific() {
        // revoke only exists under PUT
        let err = assert_err!(resolve(Verb::Get, "revoke/level1"));
        assert!(matches!(err, AnalyticsError::UnknownRoute { .. }));
        // consent only exists under POST
        assert_err!(resolve(Verb::Put, "consent/level1"));
        assert_err!(resolve(Verb::Get, "nothing-here"));
    }

    #[test]
    fn test_nested_visitor_routes() {
        assert_eq!(
            resolve(Verb::Post, "visitor/start/v2").unwrap(),
            HandlerKind::StartFingerprint
        );
        assert_eq!(
            resolve(Verb::Post, "visitor/end/v1").unwrap(),
            HandlerKind::CloseVisitorEvent
        );
        assert_eq!(
            resolve(Verb::Post, "visitor/start/v1").unwrap(),
            HandlerKind::NotFound
        );
        assert_eq!(
            resolve(Verb::Post, "visitor/pause/v1").unwrap(),
            HandlerKind::NotFound
        );
        assert_eq!(
            resolve(Verb::Post, "visitor/start").unwrap(),
            HandlerKind::NotFound
        );
    }

    #[test]
    fn test_whole_group_routes_accept_any_suffix() {
        assert_eq!(
            resolve(Verb::Get, "datastream/template/42").unwrap(),
            HandlerKind::GetDatastreamTemplate
        );
        assert_eq!(
            resolve(Verb::Post, "datastream").unwrap(),
            HandlerKind::StoreDatastreamTemplate
        );
        assert_eq!(
            resolve(Verb::Post, "wallet/metamask/0xabc/nonce").unwrap(),
            HandlerKind::GetNonce
        );
    }

    #[test]
    fn test_same_group_name_differs_by_verb() {
        assert_eq!(
            resolve(Verb::Get, "conversion/products").unwrap(),
            HandlerKind::GetConversionProduct
        );
        assert_eq!(
            resolve(Verb::Post, "conversion/products").unwrap(),
            HandlerKind::NotFound
        );
        assert_eq!(
            resolve(Verb::Post, "conversion/replace").unwrap(),
            HandlerKind::ConversionReplace
        );
    }

    #[test]
    fn test_hand_built_verb_resolves_like_parsed_verb() {
        assert_eq!(
            assert_ok!(resolve(other("GET"), "statistics/attributes")),
            HandlerKind::GetAttributeValue
        );
        assert_eq!(
            assert_ok!(resolve(other("put"), "revoke/level1")),
            HandlerKind::RevokeConsentLevel1
        );
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let table = table();
        let command = Command::from_path("get/flows").unwrap();
        let first = table.resolve(&Verb::Get, &command).unwrap();
        for _ in 0..10 {
            assert_eq!(table.resolve(&Verb::Get, &command).unwrap(), first);
        }
    }

    #[test]
    fn test_conflicting_routes_rejected() {
        const LEAF_THEN_BRANCH: &[RouteEntry] = &[
            RouteEntry {
                scope: VerbScope::Get,
                path: &["datastream"],
                handler: HandlerKind::GetDatastreamTemplate,
            },
            RouteEntry {
                scope: VerbScope::Get,
                path: &["datastream", "template"],
                handler: HandlerKind::GetDatastreamTemplate,
            },
        ];
        let err = assert_err!(RouteTable::build(LEAF_THEN_BRANCH));
        assert!(matches!(err, AnalyticsError::Config(_)));

        const DUPLICATE: &[RouteEntry] = &[
            RouteEntry {
                scope: VerbScope::Put,
                path: &["revoke", "level1"],
                handler: HandlerKind::RevokeConsentLevel1,
            },
            RouteEntry {
                scope: VerbScope::Put,
                path: &["revoke", "level1"],
                handler: HandlerKind::RevokeConsentLevel2,
            },
        ];
        assert_err!(RouteTable::build(DUPLICATE));

        const EMPTY: &[RouteEntry] = &[RouteEntry {
            scope: VerbScope::Any,
            path: &[],
            handler: HandlerKind::JobGeo,
        }];
        assert_err!(RouteTable::build(EMPTY));
    }
}
