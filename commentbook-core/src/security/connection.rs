//! Oracle Easy Connect string parsing.
//!
//! The connect string given on the command line (`host:port/service`) carries
//! no credentials, but it is still only logged through [`ConnectionInfo`] so
//! that nothing else from the invocation leaks into logs.

use crate::error::CommentBookError;

/// Parsed Easy Connect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Database host address
    pub host: String,
    /// Optional listener port
    pub port: Option<u16>,
    /// Optional service name
    pub service_name: Option<String>,
}

impl ConnectionInfo {
    /// Renders the target back in `host[:port][/service]` form.
    ///
    /// # Example
    /// ```rust
    /// use commentbook_core::security::ConnectionInfo;
    ///
    /// let info = ConnectionInfo {
    ///     host: "127.0.0.1".to_string(),
    ///     port: Some(1521),
    ///     service_name: Some("orcl".to_string()),
    /// };
    /// assert_eq!(info.to_safe_string(), "127.0.0.1:1521/orcl");
    /// ```
    pub fn to_safe_string(&self) -> String {
        let mut target = self.host.clone();

        if let Some(port) = self.port {
            target.push_str(&format!(":{}", port));
        }

        if let Some(service) = &self.service_name {
            target.push_str(&format!("/{}", service));
        }

        target
    }
}

impl std::fmt::Display for ConnectionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_safe_string())
    }
}

/// Parses an Easy Connect string of the form `[//]host[:port][/service]`.
///
/// # Errors
/// Returns a configuration error if the string is empty, has no host, or
/// carries a port that is not a number in `1..=65535`.
///
/// # Example
/// ```rust
/// use commentbook_core::security::parse_connect_string;
///
/// let info = parse_connect_string("127.0.0.1:1521/orcl")?;
/// assert_eq!(info.host, "127.0.0.1");
/// assert_eq!(info.port, Some(1521));
/// assert_eq!(info.service_name.as_deref(), Some("orcl"));
/// # Ok::<(), commentbook_core::CommentBookError>(())
/// ```
pub fn parse_connect_string(connect_string: &str) -> crate::Result<ConnectionInfo> {
    let trimmed = connect_string.trim();
    let trimmed = trimmed.strip_prefix("//").unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Err(CommentBookError::configuration(
            "Connect string must not be empty",
        ));
    }

    let (address, service_name) = match trimmed.split_once('/') {
        Some((address, service)) if !service.is_empty() => (address, Some(service.to_string())),
        Some((address, _)) => (address, None),
        None => (trimmed, None),
    };

    let (host, port) = match address.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| {
                    CommentBookError::configuration(format!(
                        "Invalid port '{}' in connect string",
                        port
                    ))
                })?;
            (host, Some(port))
        }
        None => (address, None),
    };

    if host.is_empty() {
        return Err(CommentBookError::configuration(
            "Missing host in connect string",
        ));
    }

    Ok(ConnectionInfo {
        host: host.to_string(),
        port,
        service_name,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_connect_string() {
        let info = parse_connect_string("127.0.0.1:1521/orcl").unwrap();
        assert_eq!(
            info,
            ConnectionInfo {
                host: "127.0.0.1".to_string(),
                port: Some(1521),
                service_name: Some("orcl".to_string()),
            }
        );
        assert_eq!(info.to_string(), "127.0.0.1:1521/orcl");
    }

    #[test]
    fn test_parse_with_leading_slashes() {
        let info = parse_connect_string("//db.example.com/XEPDB1").unwrap();
        assert_eq!(info.host, "db.example.com");
        assert_eq!(info.port, None);
        assert_eq!(info.service_name.as_deref(), Some("XEPDB1"));
    }

    #[test]
    fn test_parse_host_only() {
        let info = parse_connect_string("dbhost").unwrap();
        assert_eq!(info.host, "dbhost");
        assert_eq!(info.port, None);
        assert_eq!(info.service_name, None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_connect_string("").is_err());
        assert!(parse_connect_string("   ").is_err());
        assert!(parse_connect_string(":1521/orcl").is_err());
        assert!(parse_connect_string("host:abc/orcl").is_err());
        assert!(parse_connect_string("host:0/orcl").is_err());
        assert!(parse_connect_string("host:70000/orcl").is_err());
    }
}
