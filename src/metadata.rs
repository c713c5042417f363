//! Read-only connection metadata view (spec §1 "metadata view"),
//! grounded on the accessor methods `sqlx-core`'s `MySqlConnection`
//! exposes to external callers (server version, collation) without
//! handing out the mutable state machine itself.

use crate::capabilities::Capabilities;
use crate::connection::Context;
use crate::server_version::ServerVersion;

/// A snapshot of the pieces of [`Context`] an external collaborator is
/// allowed to read: never mutated in place, taken fresh whenever asked.
#[derive(Debug, Clone)]
pub struct ConnectionMetadata {
    server_version: ServerVersion,
    capabilities: Capabilities,
    thread_id: u32,
    collation: u8,
}

impl ConnectionMetadata {
    pub fn from_context(context: &Context) -> ConnectionMetadata {
        ConnectionMetadata {
            server_version: context.server_version.clone(),
            capabilities: context.capabilities,
            thread_id: context.thread_id,
            collation: context.client_collation,
        }
    }

    pub fn server_version(&self) -> &ServerVersion {
        &self.server_version
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    pub fn collation(&self) -> u8 {
        self.collation
    }

    pub fn supports_returning(&self) -> bool {
        self.server_version.supports_returning()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Sequencer;
    use crate::status::Status;

    fn sample_context() -> Context {
        Context {
            server_version: ServerVersion::parse("5.5.5-10.6.0-MariaDB"),
            capabilities: Capabilities::client_base(),
            client_collation: 45,
            status: Status::SERVER_STATUS_AUTOCOMMIT,
            thread_id: 42,
            sequencer: Sequencer::default(),
            socket_timeout: None,
            statement_timeout: None,
        }
    }

    #[test]
    fn snapshots_the_pieces_external_callers_may_read() {
        let context = sample_context();
        let metadata = ConnectionMetadata::from_context(&context);

        assert_eq!(metadata.thread_id(), 42);
        assert_eq!(metadata.collation(), 45);
        assert!(metadata.supports_returning());
    }
}
