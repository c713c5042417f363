//! Non-blocking MariaDB/MySQL wire protocol core.
//!
//! This crate implements the hard, coupled middle of a streaming database
//! client: byte-level packet framing, the handshake/authentication state
//! machine, a pluggable value codec registry, and a demand-driven result
//! pipeline. It does not expose a connection pool, URL parser, or SQL
//! builder — those are external collaborators that consume the three
//! seams this crate exposes: [`pipeline::CommandSink`],
//! [`pipeline::ResultSource`], and [`metadata::ConnectionMetadata`].

#[macro_use]
mod error;

pub mod auth;
pub mod binding;
pub mod capabilities;
pub mod codec;
pub mod connection;
pub mod frame;
pub mod io;
pub mod metadata;
pub mod options;
pub mod pipeline;
pub mod prepare_cache;
pub mod protocol;
pub mod server_version;
pub mod status;

pub use error::{DatabaseError, Error, ErrorKind, Result};
pub use server_version::ServerVersion;
