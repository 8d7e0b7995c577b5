//! Credential protection and connect-string handling.
//!
//! - `credentials`: username/password container with automatic memory zeroing
//! - `connection`: Easy Connect parsing into a loggable [`ConnectionInfo`]

mod connection;
mod credentials;

pub use connection::{ConnectionInfo, parse_connect_string};
pub use credentials::Credentials;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_string_never_contains_credentials() {
        let creds = Credentials::new("scott".to_string(), "tiger".to_string());
        let info = parse_connect_string("127.0.0.1:1521/orcl").unwrap();

        let safe = info.to_safe_string();
        assert!(!safe.contains(creds.username()));
        assert!(!safe.contains(creds.password()));
    }
}
