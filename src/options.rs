//! Connection configuration (spec §6 "Connection configuration"),
//! modeled as a builder struct the way the teacher's
//! `mysql/options/mod.rs` models `MySqlConnectOptions`.
//!
//! URL parsing, pool sizing, and every other out-of-crate-scope knob
//! the teacher's full options type carries are left out; this crate
//! only owns what the connection state machine and pipeline read.

use std::time::Duration;

/// Desired security state of the connection (spec §6 "ssl mode").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    /// Never attempt TLS.
    Disable,
    /// Use TLS if offered, accepting any server certificate.
    Trust,
    /// Require TLS and validate the server certificate against a CA.
    VerifyCa,
    /// Require TLS, validate the CA, and verify host identity.
    VerifyFull,
    /// Tunnel the whole connection through an externally-terminated
    /// TLS stream (e.g. a reverse-proxy sidecar); this crate never
    /// negotiates `SslRequest` itself in this mode.
    Tunnel,
}

impl Default for SslMode {
    fn default() -> Self {
        SslMode::Trust
    }
}

/// Where to dial. Host/port and unix socket are mutually exclusive
/// (spec §6: "socket... mutually exclusive with host").
#[derive(Debug, Clone)]
pub enum Endpoint {
    Tcp { host: String, port: u16 },
    Socket(String),
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Tcp { host: "localhost".to_owned(), port: 3306 }
    }
}

/// Builder for everything the connection state machine and pipeline
/// need to know before and during `establish` (spec §6).
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub(crate) endpoint: Endpoint,
    pub(crate) username: String,
    pub(crate) password: Option<String>,
    pub(crate) database: Option<String>,
    pub(crate) ssl_mode: SslMode,
    pub(crate) allow_local_infile: bool,
    pub(crate) prepare_cache_capacity: usize,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) socket_timeout: Option<Duration>,
    pub(crate) statement_timeout: Option<Duration>,
    pub(crate) collation: u8,
    pub(crate) session_variables: Vec<(String, String)>,
    pub(crate) autocommit: Option<bool>,
    pub(crate) tcp_keepalive: Option<Duration>,
    pub(crate) tcp_abortive_close: bool,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectOptions {
    /// A conservative default: TCP to `localhost:3306`, a 250-entry
    /// prepare cache, no timeouts, `utf8mb4_general_ci` collation (45).
    pub fn new() -> Self {
        ConnectOptions {
            endpoint: Endpoint::default(),
            username: String::from("root"),
            password: None,
            database: None,
            ssl_mode: SslMode::default(),
            allow_local_infile: false,
            prepare_cache_capacity: 250,
            connect_timeout: None,
            socket_timeout: None,
            statement_timeout: None,
            collation: 45,
            session_variables: Vec::new(),
            autocommit: None,
            tcp_keepalive: None,
            tcp_abortive_close: false,
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        let port = self.port_value();
        self.endpoint = Endpoint::Tcp { host: host.into(), port };
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        match &mut self.endpoint {
            Endpoint::Tcp { port: p, .. } => *p = port,
            Endpoint::Socket(_) => {
                self.endpoint = Endpoint::Tcp { host: "localhost".to_owned(), port }
            }
        }
        self
    }

    fn port_value(&self) -> u16 {
        match &self.endpoint {
            Endpoint::Tcp { port, .. } => *port,
            Endpoint::Socket(_) => 3306,
        }
    }

    /// Switches to a unix domain socket path, clearing any configured
    /// host/port.
    pub fn socket(mut self, path: impl Into<String>) -> Self {
        self.endpoint = Endpoint::Socket(path.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn ssl_mode(mut self, mode: SslMode) -> Self {
        self.ssl_mode = mode;
        self
    }

    pub fn allow_local_infile(mut self, allow: bool) -> Self {
        self.allow_local_infile = allow;
        self
    }

    /// Sets the prepared-statement LRU capacity; `0` disables the
    /// cache entirely (spec §6 "prepareCacheSize").
    pub fn prepare_cache_capacity(mut self, capacity: usize) -> Self {
        self.prepare_cache_capacity = capacity;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = Some(timeout);
        self
    }

    pub fn statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }

    pub fn collation(mut self, collation: u8) -> Self {
        self.collation = collation;
        self
    }

    pub fn session_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.session_variables.push((name.into(), value.into()));
        self
    }

    pub fn autocommit(mut self, autocommit: bool) -> Self {
        self.autocommit = Some(autocommit);
        self
    }

    pub fn tcp_keepalive(mut self, interval: Duration) -> Self {
        self.tcp_keepalive = Some(interval);
        self
    }

    pub fn tcp_abortive_close(mut self, abortive: bool) -> Self {
        self.tcp_abortive_close = abortive;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_localhost_tcp() {
        let options = ConnectOptions::new();
        match options.endpoint() {
            Endpoint::Tcp { host, port } => {
                assert_eq!(host, "localhost");
                assert_eq!(*port, 3306);
            }
            Endpoint::Socket(_) => panic!("expected tcp endpoint"),
        }
        assert_eq!(options.prepare_cache_capacity, 250);
    }

    #[test]
    fn socket_overrides_tcp_endpoint() {
        let options = ConnectOptions::new().host("db.internal").socket("/tmp/mysql.sock");
        match options.endpoint() {
            Endpoint::Socket(path) => assert_eq!(path, "/tmp/mysql.sock"),
            Endpoint::Tcp { .. } => panic!("expected socket endpoint"),
        }
    }

    #[test]
    fn builder_methods_accumulate_session_variables() {
        let options = ConnectOptions::new()
            .session_variable("time_zone", "'+00:00'")
            .session_variable("sql_mode", "''");
        assert_eq!(options.session_variables.len(), 2);
    }
}
