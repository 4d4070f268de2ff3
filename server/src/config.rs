//! Configuration for the municipal records HTTP server.
//!
//! Every value has a compile-time default that the command line can
//! override:
//! 1. `--db` / `--bind` flags
//! 2. the defaults below

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default address the HTTP listener binds to.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Get the default database path shared with the CLI.
pub fn get_db_path() -> PathBuf {
    PathBuf::from(records::DEFAULT_DB_PATH)
}

/// Get the default bind address.
pub fn get_bind_addr() -> SocketAddr {
    DEFAULT_BIND_ADDR
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8000)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_db_path() {
        assert_eq!(get_db_path(), PathBuf::from("data/municipal.db"));
    }

    #[test]
    fn test_get_bind_addr() {
        let addr = get_bind_addr();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8000);
    }
}
