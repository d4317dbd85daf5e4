use foldhash::fast::RandomState;
use schemars::schema::RootSchema;
use serde::Serialize;
use std::collections::HashMap;

use crate::method::{MethodSpec, MethodType};

/// One method of a [`Contract`]: a [`MethodSpec`] tagged with its own key.
///
/// The `method` field is set exactly once, by [`Contract::build`], to the
/// key the spec was authored under. `contract.get(k).unwrap().method == k`
/// holds for every key `k`.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractEntry {
    pub method: String,
    pub method_type: MethodType,
    pub input: RootSchema,
    pub output: RootSchema,
}

/// An immutable mapping from method name to [`ContractEntry`], partitioned
/// by method type.
///
/// The contract is the single shared root of the system: servers and
/// clients are independent projections of it. It is built once and never
/// mutated; the query/mutation partition is materialized at construction
/// rather than re-derived on every access.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Contract {
    entries: HashMap<String, ContractEntry, RandomState>,
    #[serde(skip)]
    queries: Vec<String>,
    #[serde(skip)]
    mutations: Vec<String>,
}

impl Contract {
    /// Builds a contract from authored method specifications.
    ///
    /// Total and pure: any well-typed mapping succeeds, including an empty
    /// one (an empty contract yields an empty server and an empty client).
    /// Key iteration order does not affect the result; the partition lists
    /// are sorted for stable enumeration.
    #[must_use]
    pub fn build<K, I>(specs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, MethodSpec)>,
    {
        let mut entries: HashMap<String, ContractEntry, RandomState> = HashMap::default();
        for (key, spec) in specs {
            let method = key.into();
            entries.insert(
                method.clone(),
                ContractEntry {
                    method,
                    method_type: spec.method_type,
                    input: spec.input,
                    output: spec.output,
                },
            );
        }

        // partition from the settled entry map, so a re-authored key lands
        // in exactly one list
        let mut queries = vec![];
        let mut mutations = vec![];
        for entry in entries.values() {
            match entry.method_type {
                MethodType::Query => queries.push(entry.method.clone()),
                MethodType::Mutation => mutations.push(entry.method.clone()),
            }
        }
        queries.sort_unstable();
        mutations.sort_unstable();
        tracing::debug!(
            methods = entries.len(),
            queries = queries.len(),
            mutations = mutations.len(),
            "contract built"
        );

        Self {
            entries,
            queries,
            mutations,
        }
    }

    #[must_use]
    pub fn get(&self, method: &str) -> Option<&ContractEntry> {
        self.entries.get(method)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn methods(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ContractEntry> {
        self.entries.values()
    }

    /// The query partition, in sorted method-name order.
    pub fn queries(&self) -> impl Iterator<Item = &ContractEntry> {
        self.queries.iter().map(|m| &self.entries[m])
    }

    /// The mutation partition, in sorted method-name order.
    pub fn mutations(&self) -> impl Iterator<Item = &ContractEntry> {
        self.mutations.iter().map(|m| &self.entries[m])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_tagged_with_key() {
        let contract = Contract::build([
            ("ping", MethodSpec::query::<(), String>()),
            ("reset", MethodSpec::mutation::<(), bool>()),
        ]);
        assert_eq!(contract.len(), 2);
        assert_eq!(contract.get("ping").unwrap().method, "ping");
        assert_eq!(contract.get("reset").unwrap().method, "reset");
        assert!(contract.get("missing").is_none());
    }

    #[test]
    fn test_empty_contract() {
        let contract = Contract::build(Vec::<(String, MethodSpec)>::new());
        assert!(contract.is_empty());
        assert_eq!(contract.queries().count(), 0);
        assert_eq!(contract.mutations().count(), 0);
    }
}
