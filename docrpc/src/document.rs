use serde::{Deserialize, Serialize};

use crate::{contract::ContractEntry, method::MethodType};

/// The wire envelope for one invocation: `{method, methodType, input}`.
///
/// A document is the only data a client sends toward a server. It is built
/// fresh per call and never reused; the `input` value is attached exactly
/// as the caller supplied it, unvalidated. Validation against the entry's
/// input schema is the transport/server boundary's responsibility.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub method: String,
    pub method_type: MethodType,
    pub input: serde_json::Value,
}

impl Document {
    /// Builds the envelope for one call against `entry`.
    #[must_use]
    pub fn build(entry: &ContractEntry, input: serde_json::Value) -> Self {
        Self {
            method: entry.method.clone(),
            method_type: entry.method_type,
            input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contract::Contract, method::MethodSpec};
    use serde_json::json;

    #[test]
    fn test_document_copies_identity() {
        let contract = Contract::build([("echo", MethodSpec::mutation::<String, String>())]);
        let doc = Document::build(contract.get("echo").unwrap(), json!({"v": 1}));
        assert_eq!(doc.method, "echo");
        assert_eq!(doc.method_type, MethodType::Mutation);
        assert_eq!(doc.input, json!({"v": 1}));
    }

    #[test]
    fn test_document_wire_shape() {
        let contract = Contract::build([("ping", MethodSpec::query::<(), ()>())]);
        let doc = Document::build(contract.get("ping").unwrap(), serde_json::Value::Null);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!({"method": "ping", "methodType": "query", "input": null})
        );
    }
}
