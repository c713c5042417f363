//! Negotiated capability bitmask (spec §3 "Capability bitmask"): 64 bits,
//! the high 32 populated only when the server negotiates without the
//! MySQL-only flag.

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u64 {
        const LONG_PASSWORD                  = 0x0000_0001;
        const FOUND_ROWS                     = 0x0000_0002;
        const LONG_FLAG                      = 0x0000_0004;
        const CONNECT_WITH_DB                = 0x0000_0008;
        const NO_SCHEMA                      = 0x0000_0010;
        const COMPRESS                       = 0x0000_0020;
        const ODBC                           = 0x0000_0040;
        const LOCAL_FILES                    = 0x0000_0080;
        const IGNORE_SPACE                   = 0x0000_0100;
        const PROTOCOL_41                    = 0x0000_0200;
        const INTERACTIVE                    = 0x0000_0400;
        const SSL                            = 0x0000_0800;
        const IGNORE_SIGPIPE                 = 0x0000_1000;
        const TRANSACTIONS                   = 0x0000_2000;
        const RESERVED                       = 0x0000_4000;
        const SECURE_CONNECTION              = 0x0000_8000;
        const MULTI_STATEMENTS               = 0x0001_0000;
        const MULTI_RESULTS                  = 0x0002_0000;
        const PS_MULTI_RESULTS               = 0x0004_0000;
        const PLUGIN_AUTH                    = 0x0008_0000;
        const CONNECT_ATTRS                  = 0x0010_0000;
        const PLUGIN_AUTH_LENENC_DATA        = 0x0020_0000;
        const CAN_HANDLE_EXPIRED_PASSWORDS   = 0x0040_0000;
        const SESSION_TRACK                  = 0x0080_0000;
        const DEPRECATE_EOF                  = 0x0100_0000;
        const OPTIONAL_RESULTSET_METADATA    = 0x0200_0000;
        const ZSTD_COMPRESSION_ALGORITHM     = 0x0400_0000;
        const REMEMBER_OPTIONS               = 0x8000_0000;

        /// Set by the server on the *low* 32 bits when it speaks the
        /// original MySQL protocol rather than MariaDB's extended
        /// capability field (spec §3: "the high 32 come from a
        /// server-supplied extended field...otherwise only the low 32
        /// apply").
        const MYSQL                          = 0x0000_0001_0000_0000;
    }
}

impl Capabilities {
    /// The capability set the client always requests, before adding
    /// options that depend on configuration (spec §4.5, transition 1).
    pub fn client_base() -> Capabilities {
        Capabilities::PROTOCOL_41
            | Capabilities::SECURE_CONNECTION
            | Capabilities::PLUGIN_AUTH
            | Capabilities::LONG_PASSWORD
            | Capabilities::TRANSACTIONS
            | Capabilities::MULTI_RESULTS
            | Capabilities::PS_MULTI_RESULTS
            | Capabilities::PLUGIN_AUTH_LENENC_DATA
    }
}
