use schemars::{JsonSchema, schema::RootSchema, schema_for};
use serde::{Deserialize, Serialize};

/// Whether a method reads or writes.
///
/// The method type drives the query/mutation partition everywhere a
/// contract is projected: it selects the client namespace a method is
/// callable from, and the wire verb a transport registers it under.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MethodType {
    Query,
    Mutation,
}

impl std::fmt::Display for MethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MethodType::Query => write!(f, "query"),
            MethodType::Mutation => write!(f, "mutation"),
        }
    }
}

/// The authored description of one remote operation: its method type and
/// the schemas of its input and output values. No behavior, no identity.
///
/// The schemas are opaque handles: the core carries them from contract to
/// server procedure and route descriptor but never evaluates them. Payload
/// validation belongs to the transport collaborator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MethodSpec {
    pub method_type: MethodType,
    pub input: RootSchema,
    pub output: RootSchema,
}

impl MethodSpec {
    /// Declares a read-only method with input `I` and output `O`.
    #[must_use]
    pub fn query<I: JsonSchema, O: JsonSchema>() -> Self {
        Self::new::<I, O>(MethodType::Query)
    }

    /// Declares a writing method with input `I` and output `O`.
    #[must_use]
    pub fn mutation<I: JsonSchema, O: JsonSchema>() -> Self {
        Self::new::<I, O>(MethodType::Mutation)
    }

    fn new<I: JsonSchema, O: JsonSchema>(method_type: MethodType) -> Self {
        Self {
            method_type,
            input: schema_for!(I),
            output: schema_for!(O),
        }
    }
}
