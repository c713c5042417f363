//! Client Message Builder (spec §4, component 5; §6 "Command set").
//!
//! One module per command, mirroring the teacher's per-message files
//! (`com_query.rs`, `com_stmt_prepare.rs`, ...); the handful of commands
//! `spec.md` §6 names that the teacher's captured file set does not
//! include (`COM_INIT_DB`, `COM_STMT_CLOSE`, `COM_STMT_RESET`,
//! `COM_STMT_FETCH`, `COM_RESET_CONNECTION`, `COM_CHANGE_USER`) are added
//! here in the same one-`Encode`-impl-per-struct style.

mod change_user;
mod init_db;
mod ping;
mod query;
mod quit;
mod reset_connection;
mod stmt_close;
mod stmt_execute;
mod stmt_fetch;
mod stmt_prepare;
mod stmt_prepare_ok;
mod stmt_reset;

pub use change_user::ComChangeUser;
pub use init_db::ComInitDb;
pub use ping::ComPing;
pub use query::ComQuery;
pub use quit::ComQuit;
pub use reset_connection::ComResetConnection;
pub use stmt_close::ComStmtClose;
pub use stmt_execute::{ComStmtExecute, Cursor};
pub use stmt_fetch::ComStmtFetch;
pub use stmt_prepare::ComStmtPrepare;
pub use stmt_prepare_ok::ComStmtPrepareOk;
pub use stmt_reset::ComStmtReset;

pub const COM_QUIT: u8 = 0x01;
pub const COM_INIT_DB: u8 = 0x02;
pub const COM_QUERY: u8 = 0x03;
pub const COM_PING: u8 = 0x0e;
pub const COM_CHANGE_USER: u8 = 0x11;
pub const COM_STMT_PREPARE: u8 = 0x16;
pub const COM_STMT_EXECUTE: u8 = 0x17;
pub const COM_STMT_CLOSE: u8 = 0x19;
pub const COM_STMT_RESET: u8 = 0x1a;
pub const COM_STMT_FETCH: u8 = 0x1c;
pub const COM_RESET_CONNECTION: u8 = 0x1f;
