//! Target parsing and expansion
//!
//! Turns one raw input token into zero or more concrete host identifiers:
//!
//! - Individual addresses or hostnames (e.g., `192.168.1.1`) pass through as
//!   a singleton
//! - CIDR ranges (e.g., `192.168.1.0/24`) expand to every address, ascending
//! - Last-octet ranges (e.g., `192.168.1.1-254`) expand ascending
//!
//! Malformed range notation is an error; callers report it as a non-fatal
//! warning and continue with the remaining inputs.
//!
//! # Example
//!
//! ```
//! use idbwatch_core::targets::TargetExpander;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let expander = TargetExpander::new();
//! let hosts = expander.expand("192.168.1.0/30")?;
//! assert_eq!(hosts.len(), 4);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use cidr::IpCidr;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Expands raw input tokens into concrete host identifiers
#[derive(Debug)]
pub struct TargetExpander {
    /// Maximum number of hosts to expand from one token (safety limit)
    max_targets: usize,
}

impl Default for TargetExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetExpander {
    /// Creates an expander with the default expansion limit
    pub fn new() -> Self {
        Self { max_targets: 65536 }
    }

    /// Creates an expander with a custom expansion limit
    pub fn with_limit(max_targets: usize) -> Self {
        Self { max_targets }
    }

    /// Expands one input token into host identifiers
    ///
    /// Single-host tokens (addresses or hostnames) come back as a singleton;
    /// CIDR and dash ranges expand in ascending address order.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed CIDR or range notation, or when a
    /// range exceeds the expansion limit.
    pub fn expand(&self, token: &str) -> Result<Vec<String>> {
        let token = token.trim();

        if token.contains('/') {
            let cidr = IpCidr::from_str(token)
                .map_err(|_| Error::CidrParse(token.to_string()))?;
            return self.expand_cidr(cidr);
        }

        // Dash ranges only make sense for dotted-quad starts; anything else
        // with a '-' may be a hostname and passes through untouched.
        if let Some((start, rest)) = token.split_once('-') {
            if let Ok(start_ip) = Ipv4Addr::from_str(start.trim()) {
                return self.expand_octet_range(token, start_ip, rest.trim());
            }
        }

        Ok(vec![token.to_string()])
    }

    fn expand_cidr(&self, cidr: IpCidr) -> Result<Vec<String>> {
        let hosts: Vec<String> = cidr
            .iter()
            .take(self.max_targets + 1)
            .map(|ip| ip.address().to_string())
            .collect();

        if hosts.len() > self.max_targets {
            return Err(Error::InvalidTarget(format!(
                "range expands past the {} host limit",
                self.max_targets
            )));
        }

        Ok(hosts)
    }

    /// Expands `a.b.c.x-y` into `a.b.c.x` through `a.b.c.y`
    fn expand_octet_range(&self, token: &str, start: Ipv4Addr, end: &str) -> Result<Vec<String>> {
        let end_octet: u8 = end
            .parse()
            .map_err(|_| Error::InvalidTarget(token.to_string()))?;
        let octets = start.octets();

        if end_octet < octets[3] {
            return Err(Error::InvalidTarget(format!(
                "descending range: {}",
                token
            )));
        }

        let count = (end_octet - octets[3] + 1) as usize;
        if count > self.max_targets {
            return Err(Error::InvalidTarget(format!(
                "range expands past the {} host limit",
                self.max_targets
            )));
        }

        Ok((octets[3]..=end_octet)
            .map(|o| Ipv4Addr::new(octets[0], octets[1], octets[2], o).to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_ip_passthrough() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("192.168.1.1").unwrap();
        assert_eq!(hosts, vec!["192.168.1.1"]);
    }

    #[test]
    fn test_hostname_passthrough() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("example.com").unwrap();
        assert_eq!(hosts, vec!["example.com"]);
    }

    #[test]
    fn test_hyphenated_hostname_passthrough() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("my-host.example.com").unwrap();
        assert_eq!(hosts, vec!["my-host.example.com"]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("  10.0.0.1  ").unwrap();
        assert_eq!(hosts, vec!["10.0.0.1"]);
    }

    #[test]
    fn test_cidr_expansion_ascending() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("192.168.1.0/30").unwrap();
        assert_eq!(
            hosts,
            vec!["192.168.1.0", "192.168.1.1", "192.168.1.2", "192.168.1.3"]
        );
    }

    #[test]
    fn test_cidr_slash_32() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("192.168.1.1/32").unwrap();
        assert_eq!(hosts, vec!["192.168.1.1"]);
    }

    #[test]
    fn test_cidr_slash_24() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("10.0.0.0/24").unwrap();
        assert_eq!(hosts.len(), 256);
        assert_eq!(hosts[0], "10.0.0.0");
        assert_eq!(hosts[255], "10.0.0.255");
    }

    #[test]
    fn test_malformed_cidr_is_error() {
        let expander = TargetExpander::new();
        assert!(expander.expand("10.0.0.0/33").is_err());
        assert!(expander.expand("not-a-cidr/24").is_err());
    }

    #[test]
    fn test_cidr_over_limit() {
        let expander = TargetExpander::with_limit(8);
        assert!(expander.expand("192.168.0.0/24").is_err());
    }

    #[test]
    fn test_last_octet_range() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("192.168.1.1-5").unwrap();
        assert_eq!(hosts.len(), 5);
        assert_eq!(hosts[0], "192.168.1.1");
        assert_eq!(hosts[4], "192.168.1.5");
    }

    #[test]
    fn test_range_single_host() {
        let expander = TargetExpander::new();
        let hosts = expander.expand("192.168.1.5-5").unwrap();
        assert_eq!(hosts, vec!["192.168.1.5"]);
    }

    #[test]
    fn test_descending_range_is_error() {
        let expander = TargetExpander::new();
        assert!(expander.expand("192.168.1.254-1").is_err());
    }

    #[test]
    fn test_malformed_range_end_is_error() {
        let expander = TargetExpander::new();
        assert!(expander.expand("192.168.1.1-banana").is_err());
        assert!(expander.expand("192.168.1.1-999").is_err());
    }
}
