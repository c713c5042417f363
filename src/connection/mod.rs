//! Connection State Machine (spec §4.5): orchestrates handshake,
//! capability selection, plugin negotiation, and post-login command
//! exchange.
//!
//! Grounded on `sqlx-core/src/mysql/connection/mod.rs`'s
//! `MySqlConnection::establish`, trimmed to the core crate's scope: no
//! connection pool, no URL parsing, TLS treated as an already-upgraded
//! opaque duplex stream the caller hands in (spec §1 "Out of scope").

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::auth::{self, AuthStep};
use crate::capabilities::Capabilities;
use crate::frame::{self, Sequencer};
use crate::options::{ConnectOptions, Endpoint, SslMode};
use crate::prepare_cache::PrepareCache;
use crate::protocol::com::{ComQuit, ComResetConnection};
use crate::protocol::{AuthSwitchRequest, Encode, ErrPacket, Handshake, HandshakeResponse, OkPacket, SslRequest};
use crate::server_version::ServerVersion;
use crate::status::Status;

/// Per-connection state visible to codecs and message builders (spec
/// §3 "Context"). Created once per connection, mutated only by the
/// state machine between command boundaries.
#[derive(Debug, Clone)]
pub struct Context {
    pub server_version: ServerVersion,
    pub capabilities: Capabilities,
    pub client_collation: u8,
    pub status: Status,
    pub thread_id: u32,
    pub sequencer: Sequencer,
    pub(crate) socket_timeout: Option<Duration>,
    pub(crate) statement_timeout: Option<Duration>,
}

impl Context {
    pub fn supports_returning(&self) -> bool {
        self.server_version.supports_returning()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Connecting,
    HandshakeReceived,
    Authenticating,
    AuthSwitch,
    Ready,
    CommandInFlight,
    Closed,
}

/// A boxed async TLS upgrade hook: given the plaintext stream right
/// after the `SslRequest` packet is flushed, returns the encrypted
/// duplex stream the rest of the handshake continues over. TLS's own
/// handshake internals are out of scope for this crate.
pub type TlsUpgrade<S> = Box<dyn FnOnce(S) -> Pin<Box<dyn Future<Output = crate::Result<S>> + Send>> + Send>;

pub struct Connection<S> {
    stream: S,
    pub context: Context,
    state: State,
    pub(crate) prepare_cache: PrepareCache,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Runs the full transition sequence of spec §4.5: reads the
    /// initial handshake, optionally upgrades to TLS, sends the
    /// handshake response, drives the authentication loop to OK/ERR,
    /// and issues the post-login setup commands.
    pub async fn establish(
        stream: S,
        options: &ConnectOptions,
        tls_upgrade: Option<TlsUpgrade<S>>,
    ) -> crate::Result<Connection<S>> {
        frame::with_timeout(options.connect_timeout, Self::establish_inner(stream, options, tls_upgrade)).await
    }

    async fn establish_inner(
        mut stream: S,
        options: &ConnectOptions,
        tls_upgrade: Option<TlsUpgrade<S>>,
    ) -> crate::Result<Connection<S>> {
        let mut seq = Sequencer::default();

        let handshake_bytes = frame::receive(&mut stream, &mut seq).await?;
        let handshake = Handshake::read(&handshake_bytes)?;

        let mut client_capabilities = Capabilities::client_base();
        if options.allow_local_infile {
            client_capabilities |= Capabilities::LOCAL_FILES;
        }
        if options.database.is_some() {
            client_capabilities |= Capabilities::CONNECT_WITH_DB;
        }

        let wants_tls = !matches!(options.ssl_mode, SslMode::Disable);
        if wants_tls && handshake.server_capabilities.contains(Capabilities::SSL) {
            client_capabilities |= Capabilities::SSL;
        }

        let negotiated = client_capabilities & handshake.server_capabilities;

        let mut stream = stream;
        if negotiated.contains(Capabilities::SSL) {
            let ssl_request = SslRequest {
                max_packet_size: frame::MAX_PACKET_SIZE as u32,
                client_collation: options.collation,
            };

            let mut payload = Vec::new();
            ssl_request.encode(&mut payload, negotiated);
            frame::send(&mut stream, &mut seq, &payload).await?;

            let upgrade = tls_upgrade
                .ok_or_else(|| crate::Error::Configuration("TLS requested but no upgrade hook supplied".into()))?;
            stream = upgrade(stream).await?;
        }

        let plugin_name = handshake.auth_plugin_name.as_deref().unwrap_or("mysql_native_password");
        tracing::debug!(
            target: "mariadb::connection",
            server_version = %handshake.server_version,
            plugin_name,
            "selected auth plugin from handshake"
        );
        let mut plugin = auth::resolve(plugin_name)?;
        let mut seed = handshake.auth_plugin_data.to_vec();

        let auth_response = plugin.initial_response(&seed, options.password.as_deref().unwrap_or(""))?;

        let handshake_response = HandshakeResponse {
            max_packet_size: frame::MAX_PACKET_SIZE as u32,
            client_collation: options.collation,
            username: &options.username,
            database: options.database.as_deref(),
            auth_plugin_name: plugin.name(),
            auth_response: &auth_response,
        };

        let mut payload = Vec::new();
        handshake_response.encode(&mut payload, negotiated);
        frame::send(&mut stream, &mut seq, &payload).await?;

        let secure_channel =
            negotiated.contains(Capabilities::SSL) || matches!(options.endpoint, Endpoint::Socket(_));

        let ok = loop {
            let message = frame::receive(&mut stream, &mut seq).await?;
            match message.first().copied() {
                Some(0x00) => break OkPacket::read(&message)?,
                Some(0xFF) => return Err(ErrPacket::read(&message)?.into_protocol_error()),
                Some(0xFE) if message.len() > 1 => {
                    let switch = AuthSwitchRequest::read(&message)?;
                    tracing::debug!(
                        target: "mariadb::connection",
                        plugin_name = %switch.plugin_name,
                        "server requested auth plugin switch"
                    );
                    plugin = auth::resolve(&switch.plugin_name)?;
                    seed = switch.seed.to_vec();

                    let response = plugin.initial_response(&seed, options.password.as_deref().unwrap_or(""))?;
                    frame::send(&mut stream, &mut seq, &response).await?;
                }
                Some(0x01) => {
                    let more_data = &message[1..];
                    match plugin.handle_more_data(
                        more_data,
                        &seed,
                        options.password.as_deref().unwrap_or(""),
                        secure_channel,
                    )? {
                        AuthStep::Respond(bytes) => frame::send(&mut stream, &mut seq, &bytes).await?,
                        AuthStep::AwaitServer => {}
                    }
                }
                other => {
                    return Err(protocol_err!("unexpected message during authentication: {:?}", other))
                }
            }
        };

        let server_version = ServerVersion::parse(&handshake.server_version);
        let context = Context {
            server_version,
            capabilities: negotiated,
            client_collation: options.collation,
            status: ok.status,
            thread_id: handshake.thread_id,
            sequencer: seq,
            socket_timeout: options.socket_timeout,
            statement_timeout: options.statement_timeout,
        };

        let mut connection = Connection {
            stream,
            context,
            state: State::Ready,
            prepare_cache: PrepareCache::new(options.prepare_cache_capacity),
        };
        connection.run_post_login_setup(options).await?;

        Ok(connection)
    }

    async fn run_post_login_setup(&mut self, options: &ConnectOptions) -> crate::Result<()> {
        let mut statements = Vec::new();

        statements.push(format!("SET NAMES utf8mb4"));

        // `CONNECT_WITH_DB` only selects the database if the server
        // advertised the capability; issuing `USE` here covers servers
        // that didn't, and is a no-op otherwise since it's already
        // selected.
        if let Some(database) = &options.database {
            statements.push(format!("USE {database}"));
        }

        for (name, value) in &options.session_variables {
            statements.push(format!("SET {name} = {value}"));
        }

        if let Some(autocommit) = options.autocommit {
            statements.push(format!("SET autocommit = {}", if autocommit { 1 } else { 0 }));
        }

        for statement in statements {
            self.run_setup_command(&statement).await?;
        }

        Ok(())
    }

    async fn run_setup_command(&mut self, sql: &str) -> crate::Result<()> {
        use crate::protocol::com::ComQuery;

        let command = ComQuery { sql };
        let mut payload = Vec::new();
        command.encode(&mut payload, self.context.capabilities);
        self.send_raw(&payload).await?;

        let response = self.receive_raw().await?;
        match response.first().copied() {
            Some(0x00) => Ok(()),
            Some(0xFF) => Err(ErrPacket::read(&response)?.into_protocol_error()),
            other => Err(protocol_err!("unexpected reply to setup command: {:?}", other)),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: State) {
        self.state = state;
    }

    /// Sends one client message as a fresh command, resetting the
    /// sequencer to 0 first (spec §4.6: "a fresh sequence id starting
    /// at 0").
    pub(crate) async fn send_raw(&mut self, payload: &[u8]) -> crate::Result<()> {
        self.context.sequencer.reset();
        let timeout = self.context.socket_timeout;
        frame::with_timeout(timeout, frame::send(&mut self.stream, &mut self.context.sequencer, payload)).await
    }

    pub(crate) async fn receive_raw(&mut self) -> crate::Result<bytes::BytesMut> {
        let timeout = self.context.socket_timeout;
        frame::with_timeout(timeout, frame::receive(&mut self.stream, &mut self.context.sequencer)).await
    }

    /// Tears down the session cleanly with `COM_QUIT`; the server closes
    /// the connection without replying.
    pub async fn quit(mut self) -> crate::Result<()> {
        let mut payload = Vec::new();
        ComQuit.encode(&mut payload, self.context.capabilities);
        self.send_raw(&payload).await?;
        self.state = State::Closed;
        Ok(())
    }

    /// Resets session state server-side (`COM_RESET_CONNECTION`)
    /// without a full reconnect.
    pub async fn reset(&mut self) -> crate::Result<()> {
        let mut payload = Vec::new();
        ComResetConnection.encode(&mut payload, self.context.capabilities);
        self.send_raw(&payload).await?;

        let response = self.receive_raw().await?;
        match response.first().copied() {
            Some(0x00) => Ok(()),
            Some(0xFF) => Err(ErrPacket::read(&response)?.into_protocol_error()),
            other => Err(protocol_err!("unexpected reply to COM_RESET_CONNECTION: {:?}", other)),
        }
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }
}

impl ErrPacket {
    /// Lifts a server `ERR_Packet` into the crate error type, classifying
    /// it through [`crate::error::classify`] (spec §7).
    pub fn into_protocol_error(self) -> crate::Error {
        crate::Error::Database(Box::new(ServerErrorPacket(self)))
    }
}

/// Wraps [`ErrPacket`] to implement [`crate::DatabaseError`] without
/// that trait living in the `protocol` module.
#[derive(Debug)]
struct ServerErrorPacket(ErrPacket);

impl std::fmt::Display for ServerErrorPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.0.error_code, self.0.sql_state, self.0.error_message)
    }
}

impl crate::DatabaseError for ServerErrorPacket {
    fn message(&self) -> &str {
        &self.0.error_message
    }

    fn code(&self) -> u16 {
        self.0.error_code
    }

    fn sql_state(&self) -> &str {
        &self.0.sql_state
    }
}
