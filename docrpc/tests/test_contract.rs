#![forbid(unsafe_code)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use docrpc::{Contract, MethodSpec, MethodType};

#[derive(Serialize, Deserialize, JsonSchema)]
struct Page {
    offset: u64,
    limit: u64,
}

#[derive(Serialize, Deserialize, JsonSchema)]
struct Names(Vec<String>);

fn mixed_contract() -> Contract {
    Contract::build([
        ("listNames", MethodSpec::query::<Page, Names>()),
        ("countNames", MethodSpec::query::<(), u64>()),
        ("addName", MethodSpec::mutation::<String, bool>()),
        ("clear", MethodSpec::mutation::<(), ()>()),
    ])
}

#[test]
fn test_build_preserves_keys_and_tags_methods() {
    let contract = mixed_contract();
    assert_eq!(contract.len(), 4);
    for name in ["listNames", "countNames", "addName", "clear"] {
        let entry = contract.get(name).unwrap();
        assert_eq!(entry.method, name);
    }
}

#[test]
fn test_partition_is_total_and_disjoint() {
    let contract = mixed_contract();

    let queries: HashSet<&str> = contract.queries().map(|e| e.method.as_str()).collect();
    let mutations: HashSet<&str> = contract.mutations().map(|e| e.method.as_str()).collect();
    let all: HashSet<&str> = contract.methods().map(String::as_str).collect();

    assert!(queries.is_disjoint(&mutations));
    let union: HashSet<&str> = queries.union(&mutations).copied().collect();
    assert_eq!(union, all);

    for entry in contract.queries() {
        assert_eq!(entry.method_type, MethodType::Query);
    }
    for entry in contract.mutations() {
        assert_eq!(entry.method_type, MethodType::Mutation);
    }
}

#[test]
fn test_partition_enumeration_is_sorted() {
    let contract = mixed_contract();
    let queries: Vec<&str> = contract.queries().map(|e| e.method.as_str()).collect();
    let mutations: Vec<&str> = contract.mutations().map(|e| e.method.as_str()).collect();
    assert_eq!(queries, ["countNames", "listNames"]);
    assert_eq!(mutations, ["addName", "clear"]);
}

#[test]
fn test_reauthored_key_lands_in_one_partition() {
    // last spec wins, and the partition follows the surviving entry
    let contract = Contract::build([
        ("rotate", MethodSpec::query::<(), u64>()),
        ("rotate", MethodSpec::mutation::<(), u64>()),
    ]);

    assert_eq!(contract.len(), 1);
    let entry = contract.get("rotate").unwrap();
    assert_eq!(entry.method_type, MethodType::Mutation);
    assert_eq!(entry.input, schemars::schema_for!(()));

    let queries: Vec<&str> = contract.queries().map(|e| e.method.as_str()).collect();
    let mutations: Vec<&str> = contract.mutations().map(|e| e.method.as_str()).collect();
    assert!(queries.is_empty());
    assert_eq!(mutations, ["rotate"]);
}

#[test]
fn test_build_schemas_survive_unchanged() {
    let contract = mixed_contract();
    let entry = contract.get("listNames").unwrap();
    assert_eq!(entry.input, schemars::schema_for!(Page));
    assert_eq!(entry.output, schemars::schema_for!(Names));
}
