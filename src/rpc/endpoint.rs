//! RPC endpoint descriptors
//!
//! Maps a declared call (API group + call name) to its wire method and
//! carries the statically declared parameter and result types. The
//! descriptor table in `api.rs` is the single source of truth per call;
//! name derivation is pure and deterministic, with no runtime
//! reflection involved.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Declared remote call with typed parameters and result
///
/// `P` is the parameter payload, `R` the expected result type. Result
/// types containing assets decode both wire amount notations, so one
/// descriptor serves every negotiated protocol version.
#[derive(Debug)]
pub struct Endpoint<P, R> {
    /// API group in its declared camel-case form, e.g. `DatabaseApi`
    pub api: &'static str,

    /// Call name in its declared camel-case form, e.g. `getConfig`
    pub method: &'static str,

    _marker: PhantomData<fn(P) -> R>,
}

impl<P: Serialize, R: DeserializeOwned> Endpoint<P, R> {
    pub const fn new(api: &'static str, method: &'static str) -> Self {
        Self {
            api,
            method,
            _marker: PhantomData,
        }
    }

    /// Fully qualified wire method, e.g.
    /// `database_api.get_dynamic_global_properties`
    pub fn wire_method(&self) -> String {
        endpoint_name(self.api, self.method)
    }
}

/// Derive the wire method name from camel-case API group and call names
///
/// `endpoint_name("DatabaseApi", "getDynamicGlobalProperties")` yields
/// `"database_api.get_dynamic_global_properties"`.
pub fn endpoint_name(api: &str, method: &str) -> String {
    format!("{}.{}", to_snake_case(api), to_snake_case(method))
}

fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, c) in input.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
