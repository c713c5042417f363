//! Server Message Parser and Client Message Builder (spec §4.3, §4.4):
//! one module per wire message, mirroring the teacher's
//! `sqlx-core/src/mysql/protocol` layout.

mod auth_more_data;
mod auth_switch;
mod column_count;
mod column_def;
mod eof;
mod err;
mod field_flags;
mod handshake;
mod handshake_response;
mod ok;
mod row;
mod ssl_request;
mod type_id;

pub mod com;

pub use auth_more_data::{AuthMoreData, FAST_AUTH_SUCCESS, FULL_AUTH_REQUIRED};
pub use auth_switch::AuthSwitchRequest;
pub use column_count::ColumnCount;
pub use column_def::ColumnDefinition;
pub use eof::EofPacket;
pub use err::ErrPacket;
pub use field_flags::FieldFlags;
pub use handshake::Handshake;
pub use handshake_response::HandshakeResponse;
pub use ok::OkPacket;
pub use row::Row;
pub use ssl_request::SslRequest;
pub use type_id::ColumnType;

/// Encodes a client message into the outbound buffer, given the
/// negotiated capabilities (needed because several message layouts
/// branch on `PROTOCOL_41`/`PLUGIN_AUTH_LENENC_DATA`/etc).
pub trait Encode {
    fn encode(&self, buf: &mut Vec<u8>, capabilities: crate::capabilities::Capabilities);
}

/// The first byte of a server message payload during the command phase,
/// used to dispatch to the right parser (spec §4.3).
pub enum ServerMessageTag {
    Ok,
    Err,
    Eof,
    LocalInfile,
    ColumnCountOrRow,
}

/// Classifies the leading byte of a command-phase server message. `len`
/// is the full payload length, needed to distinguish a genuine `EOF`
/// (< 9 bytes) from a binary/text row that merely starts with `0xFE`.
pub fn classify_server_message(first_byte: u8, len: usize) -> ServerMessageTag {
    match first_byte {
        0x00 => ServerMessageTag::Ok,
        0xFF => ServerMessageTag::Err,
        0xFE if len < 9 => ServerMessageTag::Eof,
        0xFB => ServerMessageTag::LocalInfile,
        _ => ServerMessageTag::ColumnCountOrRow,
    }
}
