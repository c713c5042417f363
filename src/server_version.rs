//! Server version parsing (spec §3 "Server Version", §8 scenarios 1-2).

/// A parsed `M.m.p` server version, with MariaDB detection and the
/// derived `RETURNING`-support flag spec §3 defines:
/// `supportReturning = MariaDB ≥ 10.5.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub is_mariadb: bool,
    pub raw: Box<str>,
}

impl ServerVersion {
    /// Parses the ASCII version string the server sends in its initial
    /// handshake packet. The MariaDB replication-compatibility prefix
    /// `5.5.5-` is stripped and implies MariaDB; absent that prefix,
    /// MariaDB is detected by the substring `MariaDB` appearing anywhere
    /// in the raw string.
    pub fn parse(raw: &str) -> ServerVersion {
        const MARIADB_PREFIX: &str = "5.5.5-";

        let (version_part, prefix_implies_mariadb) = match raw.strip_prefix(MARIADB_PREFIX) {
            Some(rest) => (rest, true),
            None => (raw, false),
        };

        let is_mariadb = prefix_implies_mariadb || version_part.contains("MariaDB");

        let (major, minor, patch) = parse_triplet(version_part);

        ServerVersion {
            major,
            minor,
            patch,
            is_mariadb,
            raw: raw.into(),
        }
    }

    /// `true` iff this is MariaDB at version ≥ 10.5.1, per spec §3's
    /// `supportReturning` derivation.
    pub fn supports_returning(&self) -> bool {
        self.is_mariadb && (self.major, self.minor, self.patch) >= (10, 5, 1)
    }
}

fn parse_triplet(version: &str) -> (u32, u32, u32) {
    let mut parts = version
        .split(|c: char| c == '.' || c == '-')
        .map(|p| p.parse::<u32>().unwrap_or(0));

    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);

    (major, minor, patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_mariadb_via_replication_prefix() {
        let v = ServerVersion::parse("5.5.5-10.5.1-MariaDB");
        assert!(v.is_mariadb);
        assert_eq!((v.major, v.minor, v.patch), (10, 5, 1));
        assert!(v.supports_returning());
    }

    #[test]
    fn detects_non_mariadb() {
        let v = ServerVersion::parse("8.0.33");
        assert!(!v.is_mariadb);
        assert_eq!((v.major, v.minor, v.patch), (8, 0, 33));
        assert!(!v.supports_returning());
    }

    #[test]
    fn detects_mariadb_via_substring_without_prefix() {
        let v = ServerVersion::parse("10.4.7-MariaDB-1:10.4.7+maria~bionic");
        assert!(v.is_mariadb);
        assert_eq!((v.major, v.minor, v.patch), (10, 4, 7));
    }

    #[test]
    fn returning_unsupported_below_10_5_1() {
        let v = ServerVersion::parse("5.5.5-10.4.99-MariaDB");
        assert!(v.is_mariadb);
        assert!(!v.supports_returning());
    }
}
