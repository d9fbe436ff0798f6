//! Scoped TCP connection for a single query exchange.

use std::io::{self, Read, Write};
use std::net::{Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::{debug, trace};

use whois_transport_traits::{
    ConnectionError, ConnectionParams, ErrorCategory, ExchangeState, QueryError, QueryResult,
};

/// Line terminator appended to every query before it goes on the wire.
pub const QUERY_TERMINATOR: &str = "\r\n";

/// Frames `query` for transmission.
pub(crate) fn frame_query(query: &str) -> String {
    let mut payload = String::with_capacity(query.len() + QUERY_TERMINATOR.len());
    payload.push_str(query);
    payload.push_str(QUERY_TERMINATOR);
    payload
}

/// An open connection owned by one exchange.
///
/// Only [`Connection::open`] creates one, so a value exists only after a
/// successful connect. Dropping it closes the socket.
#[derive(Debug)]
pub(crate) struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    state: ExchangeState,
}

impl Connection {
    /// Resolve `params` and connect to the first candidate that accepts.
    ///
    /// Candidates are tried in order; if none accepts, the last failure is
    /// reported.
    pub(crate) fn open(params: &ConnectionParams) -> QueryResult<Self> {
        trace!(endpoint = %params.endpoint(), "state: {}", ExchangeState::Connecting);

        let Candidates { earlier, last } = resolve(&params.host, params.port)?;
        let locals = local_sources(params)?;

        for remote in earlier {
            match Self::connect_to(remote, locals.as_deref(), params) {
                Ok(conn) => return Ok(conn),
                Err(e) => trace!(peer = %remote, error = %e, "connect attempt failed"),
            }
        }
        Self::connect_to(last, locals.as_deref(), params)
            .map_err(|e| QueryError::from_io(e, ExchangeState::Connecting))
    }

    fn connect_to(
        remote: SocketAddr,
        locals: Option<&[SocketAddr]>,
        params: &ConnectionParams,
    ) -> io::Result<Self> {
        let local = match_family(locals, remote)?;
        let stream = dial(remote, local, params.connect_timeout)?;
        debug!(peer = %remote, "connected");
        Ok(Self {
            stream,
            peer: remote,
            state: ExchangeState::Connected,
        })
    }

    /// Send the framed query in one write.
    pub(crate) fn send(&mut self, query: &str) -> QueryResult<()> {
        self.transition(ExchangeState::Writing);
        let payload = frame_query(query);
        self.stream
            .write_all(payload.as_bytes())
            .map_err(|e| QueryError::from_io(e, ExchangeState::Writing))?;
        trace!(peer = %self.peer, bytes = payload.len(), "query sent");
        Ok(())
    }

    /// Read until the peer closes the connection.
    ///
    /// A failure part way through discards whatever had arrived.
    pub(crate) fn receive(&mut self, read_timeout: Option<Duration>) -> QueryResult<Vec<u8>> {
        self.transition(ExchangeState::Reading);
        if read_timeout.is_some() {
            self.stream
                .set_read_timeout(read_timeout)
                .map_err(|e| QueryError::from_io(e, ExchangeState::Reading))?;
        }
        let mut response = Vec::new();
        self.stream
            .read_to_end(&mut response)
            .map_err(|e| QueryError::from_io(e, ExchangeState::Reading))?;
        trace!(peer = %self.peer, bytes = response.len(), "response received");
        Ok(response)
    }

    fn transition(&mut self, next: ExchangeState) {
        trace!(peer = %self.peer, "state: {} -> {}", self.state, next);
        self.state = next;
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // The peer may already have torn the socket down; the descriptor is
        // released when `stream` drops either way.
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            trace!(peer = %self.peer, error = %e, "shutdown on close failed");
        }
        self.transition(ExchangeState::Closed);
    }
}

fn resolution_error(message: impl Into<String>) -> QueryError {
    ConnectionError::new(
        ErrorCategory::AddressResolution,
        message,
        ExchangeState::Connecting,
    )
    .into()
}

/// Resolved socket addresses; never empty.
#[derive(Debug, PartialEq, Eq)]
struct Candidates {
    earlier: Vec<SocketAddr>,
    last: SocketAddr,
}

impl Candidates {
    fn into_vec(self) -> Vec<SocketAddr> {
        let mut addrs = self.earlier;
        addrs.push(self.last);
        addrs
    }
}

fn resolve(host: &str, port: u16) -> QueryResult<Candidates> {
    let mut addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| match e.kind() {
            // Malformed input such as an interior NUL never reached the resolver.
            io::ErrorKind::InvalidInput => QueryError::Unexpected(e),
            _ => resolution_error(e.to_string()),
        })?
        .collect();
    let Some(last) = addrs.pop() else {
        return Err(resolution_error("could not resolve to any addresses"));
    };
    Ok(Candidates {
        earlier: addrs,
        last,
    })
}

/// Candidate bind addresses, or `None` when no bind source was requested.
fn local_sources(params: &ConnectionParams) -> QueryResult<Option<Vec<SocketAddr>>> {
    if !params.binds_locally() {
        return Ok(None);
    }
    let port = params.local_port.unwrap_or(0);
    match params.local_host.as_deref() {
        Some(host) => resolve(host, port).map(|c| Some(c.into_vec())),
        None => Ok(Some(vec![
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, port)),
        ])),
    }
}

fn match_family(locals: Option<&[SocketAddr]>, remote: SocketAddr) -> io::Result<Option<SocketAddr>> {
    let Some(locals) = locals else {
        return Ok(None);
    };
    locals
        .iter()
        .copied()
        .find(|local| local.is_ipv4() == remote.is_ipv4())
        .map(Some)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("no local address in the same family as {remote}"),
            )
        })
}

fn dial(
    remote: SocketAddr,
    local: Option<SocketAddr>,
    timeout: Option<Duration>,
) -> io::Result<TcpStream> {
    let socket = Socket::new(Domain::for_address(remote), Type::STREAM, Some(Protocol::TCP))?;
    if let Some(local) = local {
        socket.bind(&SockAddr::from(local))?;
    }
    let remote = SockAddr::from(remote);
    match timeout {
        Some(timeout) => socket.connect_timeout(&remote, timeout)?,
        None => socket.connect(&remote)?,
    }
    Ok(socket.into())
}
