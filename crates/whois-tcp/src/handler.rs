//! Socket query handler.

use tracing::debug;

use whois_transport_traits::{ConnectionParams, QueryError, QueryHandler, QueryResult};

use crate::connection::Connection;

/// Blocking TCP implementation of [`QueryHandler`].
///
/// Each call opens its own connection, writes the query followed by `\r\n`,
/// reads until the server closes, and closes the socket before returning.
/// The handler carries no state, so a single value can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SocketHandler;

impl SocketHandler {
    /// Create a new socket handler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl QueryHandler for SocketHandler {
    fn execute(&self, query: &str, params: &ConnectionParams) -> QueryResult<String> {
        debug!(endpoint = %params.endpoint(), "executing whois query");

        let result = exchange(query, params);
        match &result {
            Ok(response) => {
                debug!(endpoint = %params.endpoint(), bytes = response.len(), "whois query complete");
            }
            Err(QueryError::Connection(err)) => {
                debug!(
                    endpoint = %params.endpoint(),
                    category = %err.category(),
                    state = %err.state(),
                    opened = err.state().holds_connection(),
                    "whois query failed: {err}"
                );
            }
            Err(err) => {
                debug!(endpoint = %params.endpoint(), "whois query failed with unexpected error: {err}");
            }
        }
        result
    }
}

fn exchange(query: &str, params: &ConnectionParams) -> QueryResult<String> {
    let mut conn = Connection::open(params)?;
    conn.send(query)?;
    let response = conn.receive(params.read_timeout)?;
    drop(conn);

    Ok(String::from_utf8(response)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}
