//! Alias records, the normalized alias collection and its table projection

use super::payloads::{AliasIdentity, AliasUpdate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key of an alias inside a normalized collection
pub type AliasId = String;

/// A mail alias as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasRecord {
    pub name: String,
    pub namespace: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub disabled: bool,
    pub fwd_addresses: Vec<String>,
    pub description: String,
}

impl AliasRecord {
    pub fn identity(&self) -> AliasIdentity {
        AliasIdentity {
            namespace_name: self.namespace.clone(),
            domain: self.domain.clone(),
            address: self.name.clone(),
        }
    }

    /// Whether `identity` names this record
    pub fn matches(&self, identity: &AliasIdentity) -> bool {
        self.namespace == identity.namespace_name
            && self.domain == identity.domain
            && self.name == identity.address
    }

    /// Overwrite the mutable attributes from a full-record update
    pub fn apply_update(&mut self, update: &AliasUpdate) {
        self.disabled = update.disabled;
        self.fwd_addresses.clone_from(&update.fwd_addresses);
        self.description.clone_from(&update.description);
    }
}

/// Normalized alias collection: ordered ids plus id -> record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasCollection {
    pub all_ids: Vec<AliasId>,
    pub by_id: HashMap<AliasId, AliasRecord>,
}

impl AliasCollection {
    /// Append a record under `id`
    pub fn insert(&mut self, id: AliasId, record: AliasRecord) {
        if !self.by_id.contains_key(&id) {
            self.all_ids.push(id.clone());
        }
        self.by_id.insert(id, record);
    }

    /// Find the id of the record named by `identity`
    pub fn find(&self, identity: &AliasIdentity) -> Option<&AliasId> {
        self.all_ids
            .iter()
            .find(|id| self.by_id.get(*id).is_some_and(|r| r.matches(identity)))
    }

    pub fn find_mut(&mut self, identity: &AliasIdentity) -> Option<&mut AliasRecord> {
        let id = self.find(identity)?.clone();
        self.by_id.get_mut(&id)
    }

    /// Remove the record named by `identity`, returning it
    pub fn remove(&mut self, identity: &AliasIdentity) -> Option<AliasRecord> {
        let id = self.find(identity)?.clone();
        self.all_ids.retain(|existing| existing != &id);
        self.by_id.remove(&id)
    }
}

/// Fields a row needs that are not stored on the record itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorContext {
    pub namespace_name: String,
    pub domain: String,
}

/// One flattened table row.
///
/// `id` is the row's position in the collection's id order at projection
/// time. It is not an identity: any insert or delete shifts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasViewRow {
    pub id: usize,
    pub alias: String,
    pub ns: String,
    pub domain: String,
    pub created_date: DateTime<Utc>,
    pub disabled: bool,
    pub fwd_addresses: Vec<String>,
    pub description: String,
}

impl AliasViewRow {
    /// `ns#alias@domain`
    pub fn address(&self) -> String {
        format!("{}#{}@{}", self.ns, self.alias, self.domain)
    }

    pub fn identity(&self) -> AliasIdentity {
        AliasIdentity {
            namespace_name: self.ns.clone(),
            domain: self.domain.clone(),
            address: self.alias.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.disabled
    }
}

/// Flatten `collection` into table rows, in `all_ids` order.
///
/// Ids without a record are skipped; the remaining rows keep their position
/// in `all_ids` as their index.
pub fn project(collection: &AliasCollection, ancestor: &AncestorContext) -> Vec<AliasViewRow> {
    collection
        .all_ids
        .iter()
        .enumerate()
        .filter_map(|(index, id)| {
            collection.by_id.get(id).map(|record| AliasViewRow {
                id: index,
                alias: record.name.clone(),
                ns: ancestor.namespace_name.clone(),
                domain: ancestor.domain.clone(),
                created_date: record.created_at,
                disabled: record.disabled,
                fwd_addresses: record.fwd_addresses.clone(),
                description: record.description.clone(),
            })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    mod projection {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_two_aliases_in_order() {
            let aliases = collection(&[("a1", record("x", false)), ("a2", record("y", true))]);
            let rows = project(&aliases, &ancestor());

            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].alias, "x");
            assert!(!rows[0].disabled);
            assert_eq!(rows[1].alias, "y");
            assert!(rows[1].disabled);
            for row in &rows {
                assert_eq!(row.ns, "ns1");
                assert_eq!(row.domain, "d.com");
            }
        }

        #[test]
        fn test_empty_collection() {
            let rows = project(&AliasCollection::default(), &ancestor());
            assert!(rows.is_empty());
        }

        #[test]
        fn test_order_follows_all_ids_not_map() {
            let mut aliases = collection(&[
                ("a1", record("first", false)),
                ("a2", record("second", false)),
                ("a3", record("third", false)),
            ]);
            aliases.all_ids.reverse();
            let names: Vec<_> = project(&aliases, &ancestor())
                .into_iter()
                .map(|r| r.alias)
                .collect();
            assert_eq!(names, vec!["third", "second", "first"]);
        }

        #[test]
        fn test_row_index_is_positional() {
            let aliases = collection(&[("b", record("x", false)), ("a", record("y", false))]);
            let rows = project(&aliases, &ancestor());
            assert_eq!(rows[0].id, 0);
            assert_eq!(rows[1].id, 1);
        }

        #[test]
        fn test_reprojection_after_delete_shifts_indices() {
            let mut aliases = collection(&[("a1", record("x", false)), ("a2", record("y", false))]);
            let before = project(&aliases, &ancestor());
            aliases.remove(&before[0].identity());
            let after = project(&aliases, &ancestor());
            assert_eq!(after.len(), 1);
            assert_eq!(after[0].alias, "y");
            assert_eq!(after[0].id, 0);
        }

        #[test]
        fn test_input_not_mutated() {
            let aliases = collection(&[("a1", record("x", false)), ("a2", record("y", true))]);
            let snapshot = aliases.clone();
            let _ = project(&aliases, &ancestor());
            assert_eq!(aliases, snapshot);
        }

        #[test]
        fn test_same_input_same_output() {
            let aliases = collection(&[("a1", record("x", false))]);
            assert_eq!(
                project(&aliases, &ancestor()),
                project(&aliases, &ancestor())
            );
        }

        #[test]
        fn test_dangling_id_is_skipped() {
            let mut aliases = collection(&[("a1", record("x", false)), ("a2", record("y", false))]);
            aliases.all_ids.insert(1, "ghost".to_string());
            let rows = project(&aliases, &ancestor());
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[1].alias, "y");
            assert_eq!(rows[1].id, 2);
        }

        #[test]
        fn test_row_copies_record_attributes() {
            let aliases = collection(&[("a1", record("x", true))]);
            let row = &project(&aliases, &ancestor())[0];
            assert_eq!(row.fwd_addresses, vec!["x@forward.test".to_string()]);
            assert_eq!(row.description, "x alias");
            assert_eq!(row.created_date, record("x", true).created_at);
            assert!(!row.is_active());
        }
    }

    mod rows {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_address_format() {
            let rows = project(&collection(&[("a1", record("x", false))]), &ancestor());
            assert_eq!(rows[0].address(), "ns1#x@d.com");
        }

        #[test]
        fn test_identity_matches_record() {
            let rec = record("x", false);
            let rows = project(&collection(&[("a1", rec.clone())]), &ancestor());
            assert_eq!(rows[0].identity(), rec.identity());
        }
    }

    mod collection_ops {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_insert_existing_id_keeps_order() {
            let mut aliases = collection(&[("a1", record("x", false)), ("a2", record("y", false))]);
            aliases.insert("a1".to_string(), record("x", true));
            assert_eq!(aliases.all_ids, vec!["a1".to_string(), "a2".to_string()]);
            assert!(aliases.by_id["a1"].disabled);
        }

        #[test]
        fn test_remove_unknown_is_none() {
            let mut aliases = collection(&[("a1", record("x", false))]);
            assert!(aliases.remove(&record("zzz", false).identity()).is_none());
            assert_eq!(aliases.all_ids.len(), 1);
        }

        #[test]
        fn test_apply_update_keeps_identity() {
            let mut rec = record("x", false);
            rec.apply_update(&AliasUpdate {
                namespace_name: "ns1".to_string(),
                domain: "d.com".to_string(),
                address: "x".to_string(),
                description: "changed".to_string(),
                fwd_addresses: vec![],
                disabled: true,
            });
            assert_eq!(rec.name, "x");
            assert_eq!(rec.description, "changed");
            assert!(rec.disabled);
            assert!(rec.fwd_addresses.is_empty());
        }

        #[test]
        fn test_serde_uses_camel_case() {
            let json = serde_json::to_string(&collection(&[("a1", record("x", false))])).unwrap();
            assert!(json.contains("allIds"));
            assert!(json.contains("fwdAddresses"));
            assert!(json.contains("createdAt"));
        }
    }
}
