//! Crate-wide error type and the SQLSTATE-class classifier from spec §7.

use std::fmt;

/// Builds a lazily-formatted [`Error::Protocol`] so the macro can be used
/// directly in `.ok_or_else()`/`?` position without an intermediate String.
macro_rules! protocol_err {
    ($($args:tt)*) => {
        $crate::error::Error::Protocol(format!($($args)*))
    };
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced anywhere in the wire-protocol core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying duplex byte stream (TCP, or the opaque TLS stream
    /// supplied by an external collaborator) failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A frame or message violated the wire format: bad sequence id,
    /// impossible length, short read, or a message the current connection
    /// phase does not expect. Always fatal to the connection (spec §7).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The server returned an `ERR_Packet`. Whether the connection remains
    /// usable depends on [`classify`].
    #[error("server error: {0}")]
    Database(#[source] Box<dyn DatabaseError>),

    /// TLS setup failed. TLS itself is an opaque stream to this crate
    /// (spec §1 Out of scope); this variant only reports the outer duplex
    /// stream wrapper rejecting the switch.
    #[error("tls error: {0}")]
    Tls(String),

    /// A client-visible configuration problem (e.g. unknown auth plugin,
    /// SSL required but not negotiated).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Protocol(format!("invalid utf-8: {err}"))
    }
}

impl<T> From<ServerError<T>> for Error
where
    T: DatabaseError + 'static,
{
    fn from(err: ServerError<T>) -> Self {
        Error::Database(Box::new(err.0))
    }
}

/// Newtype so a concrete `DatabaseError` impl can be converted into
/// `Error::Database` via `?` without conflicting with the blanket
/// `From<std::io::Error>` etc. impls above.
pub struct ServerError<T>(pub T);

/// An error reported by the server itself: an `ERR_Packet`, carrying the
/// native error code, SQLSTATE, message, and (when available) the SQL
/// text that produced it.
pub trait DatabaseError: fmt::Debug + fmt::Display + Send + Sync {
    fn message(&self) -> &str;
    fn code(&self) -> u16;
    fn sql_state(&self) -> &str;
    /// The statement text that produced this error, for diagnostics
    /// (spec §7: "every statement-bound error carries the offending SQL
    /// text").
    fn statement(&self) -> Option<&str> {
        None
    }
    fn kind(&self) -> ErrorKind {
        classify(self.sql_state())
    }
}

/// The taxonomy from spec §7, used by the pipeline to decide whether an
/// error closes the connection or leaves it usable for the next command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed wire bytes or illegal values — transient-conn, closes
    /// the connection.
    Parsing,
    /// Unexpected message for the current phase — fatal to the connection.
    ProtocolState,
    /// Server-signalled SQLSTATE class `42` (syntax/access) other than
    /// the permission-denied carve-out below.
    BadGrammar,
    /// Classes `23` (integrity constraint) and `22` (data exception).
    DataIntegrity,
    /// Classes `28` (invalid authorization) and literal `42000` used for
    /// permission-denied server messages — connection remains usable.
    PermissionDenied,
    /// Class `40` — rollback/serialization failure, connection remains
    /// usable.
    RollbackSerialization,
    /// Timeouts, `max_connections`, broken pipe — connection typically
    /// closed.
    TransientResource,
    /// Unknown auth plugin, SSL required but unsupported — non-transient,
    /// does not necessarily imply a wire-level desync.
    NonTransientResource,
    /// Unmapped SQLSTATE: a generic server-side exception.
    Other,
}

/// Maps a SQLSTATE string to the spec §7 error taxonomy by class prefix.
pub fn classify(sql_state: &str) -> ErrorKind {
    if sql_state == "42000" {
        return ErrorKind::PermissionDenied;
    }

    match sql_state.get(0..2) {
        Some("42") => ErrorKind::BadGrammar,
        Some("23") | Some("22") => ErrorKind::DataIntegrity,
        Some("28") => ErrorKind::PermissionDenied,
        Some("40") => ErrorKind::RollbackSerialization,
        Some("08") => ErrorKind::TransientResource,
        _ => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_syntax_errors() {
        assert_eq!(classify("42S02"), ErrorKind::BadGrammar);
    }

    #[test]
    fn classifies_integrity_and_data_exceptions() {
        assert_eq!(classify("23000"), ErrorKind::DataIntegrity);
        assert_eq!(classify("22007"), ErrorKind::DataIntegrity);
    }

    #[test]
    fn classifies_permission_denied_both_ways() {
        assert_eq!(classify("28000"), ErrorKind::PermissionDenied);
        assert_eq!(classify("42000"), ErrorKind::PermissionDenied);
    }

    #[test]
    fn classifies_rollback_serialization() {
        assert_eq!(classify("40001"), ErrorKind::RollbackSerialization);
    }

    #[test]
    fn falls_back_to_other_for_unmapped_states() {
        assert_eq!(classify("HY000"), ErrorKind::Other);
    }
}
