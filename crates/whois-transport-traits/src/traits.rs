//! Core query handler trait.

use crate::config::ConnectionParams;
use crate::error::QueryResult;

/// Performs one whois query exchange.
///
/// A handler sends `query` to the endpoint described by `params` and returns
/// everything the server sent back before closing the connection. Handlers
/// hold no per-call state, so one instance may serve any number of callers.
pub trait QueryHandler: Send + Sync + std::fmt::Debug {
    /// Sends `query` and returns the full response text.
    fn execute(&self, query: &str, params: &ConnectionParams) -> QueryResult<String>;
}
