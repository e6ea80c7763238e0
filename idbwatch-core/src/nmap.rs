//! External nmap service-detection runner
//!
//! Thin glue around the `nmap` binary: runs service detection against a
//! host's already-known ports and parses the grepable output (`-oG -`) into
//! display lines. The port scanner itself is an external collaborator; this
//! module only builds its invocation and reads its answer.

use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Runs nmap service detection against known-open ports
#[derive(Debug, Default)]
pub struct NmapRunner;

impl NmapRunner {
    pub fn new() -> Self {
        Self
    }

    /// Scans one host's ports with `nmap -sV -Pn`, returning one line per
    /// detected port service.
    ///
    /// # Errors
    ///
    /// Returns an error if the nmap binary cannot be spawned or exits
    /// unsuccessfully.
    pub async fn scan(&self, host: &str, ports: &[u16]) -> Result<Vec<String>> {
        if ports.is_empty() {
            return Ok(Vec::new());
        }

        let port_spec = ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",");

        debug!(host, ports = %port_spec, "running nmap service detection");

        let output = Command::new("nmap")
            .args(["-sV", "-Pn", "-p", &port_spec, "-oG", "-", host])
            .output()
            .await
            .map_err(|e| Error::Scanner(format!("unable to run nmap: {}", e)))?;

        if !output.status.success() {
            return Err(Error::Scanner(format!(
                "nmap exited with status {}",
                output.status
            )));
        }

        Ok(parse_grepable(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parses nmap grepable output into `ip:port/proto state service version`
/// lines.
///
/// Grepable port entries look like
/// `22/open/tcp//ssh//OpenSSH 8.2p1 Ubuntu/`; fields are slash-separated.
pub fn parse_grepable(output: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for line in output.lines() {
        let Some(rest) = line.strip_prefix("Host: ") else {
            continue;
        };
        let Some(ip) = rest.split_whitespace().next() else {
            continue;
        };
        let Some((_, ports)) = line.split_once("Ports: ") else {
            continue;
        };

        for entry in ports.split(',') {
            let fields: Vec<&str> = entry.trim().split('/').collect();
            if fields.len() < 7 {
                continue;
            }
            let (port, state, proto, service, version) =
                (fields[0], fields[1], fields[2], fields[4], fields[6]);

            let mut rendered = format!("{}:{}/{} {} {}", ip, port, proto, state, service);
            if !version.is_empty() {
                rendered.push(' ');
                rendered.push_str(version);
            }
            lines.push(rendered.trim_end().to_string());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Nmap 7.94 scan initiated
Host: 192.0.2.10 (server.example.com)\tPorts: 22/open/tcp//ssh//OpenSSH 8.2p1 Ubuntu/, 80/open/tcp//http//Apache httpd 2.4.41/
# Nmap done at ...
";

    #[test]
    fn test_parse_grepable() {
        let lines = parse_grepable(SAMPLE);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "192.0.2.10:22/tcp open ssh OpenSSH 8.2p1 Ubuntu");
        assert_eq!(lines[1], "192.0.2.10:80/tcp open http Apache httpd 2.4.41");
    }

    #[test]
    fn test_parse_grepable_no_version() {
        let output = "Host: 10.0.0.1 ()\tPorts: 443/open/tcp//https///";
        let lines = parse_grepable(output);
        assert_eq!(lines, vec!["10.0.0.1:443/tcp open https"]);
    }

    #[test]
    fn test_parse_grepable_ignores_status_lines() {
        let output = "Host: 10.0.0.1 ()\tStatus: Up\n";
        assert!(parse_grepable(output).is_empty());
    }

    #[test]
    fn test_parse_grepable_empty() {
        assert!(parse_grepable("").is_empty());
    }

    #[tokio::test]
    async fn test_scan_no_ports_is_noop() {
        let runner = NmapRunner::new();
        let lines = runner.scan("10.0.0.1", &[]).await.unwrap();
        assert!(lines.is_empty());
    }
}
