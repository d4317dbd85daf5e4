use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    method::MethodType,
    server::{Procedure, Server},
};

/// Wire verb a transport collaborator should register a method under:
/// queries read (payload in the querystring), mutations write (payload in
/// the body).
#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteVerb {
    Get,
    Post,
}

impl From<MethodType> for RouteVerb {
    fn from(method_type: MethodType) -> Self {
        match method_type {
            MethodType::Query => RouteVerb::Get,
            MethodType::Mutation => RouteVerb::Post,
        }
    }
}

/// Normalizes a method name into a route path with exactly one leading `/`.
#[must_use]
pub fn normalize_route(method: &str) -> String {
    if method.starts_with('/') {
        method.to_string()
    } else {
        format!("/{method}")
    }
}

/// One registration a transport should perform: the normalized path, the
/// verb chosen by the method type, and the procedure carrying schemas,
/// resolver, and extension options.
pub struct Route<'a, C, X = ()> {
    pub path: String,
    pub verb: RouteVerb,
    pub procedure: &'a Procedure<C, X>,
}

/// Enumerates a server's registrations, sorted by path.
#[must_use]
pub fn routes<C, X>(server: &Server<C, X>) -> Vec<Route<'_, C, X>> {
    let mut routes: Vec<Route<'_, C, X>> = server
        .procedures()
        .map(|procedure| Route {
            path: normalize_route(&procedure.method),
            verb: procedure.method_type.into(),
            procedure,
        })
        .collect();
    routes.sort_unstable_by(|a, b| a.path.cmp(&b.path));
    routes
}
