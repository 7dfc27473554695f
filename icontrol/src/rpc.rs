//! Helpers shared by the module adapters

use icsoap::soap::Rpc;
use tracing::debug;

/// Builds an RPC taking one sequence of names under `tag`
pub(crate) fn with_names<S: AsRef<str>>(rpc: &str, tag: &str, names: &[S]) -> Rpc {
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    Rpc::new(rpc).param(tag, &names)
}

/// First answer of a single-name query, or `fallback` when the device
/// returned an empty sequence.
pub(crate) fn first_or<T>(rpc: &str, name: &str, values: Vec<T>, fallback: T) -> T {
    match values.into_iter().next() {
        Some(value) => value,
        None => {
            debug!(rpc, name, "empty answer, using fallback value");
            fallback
        }
    }
}
