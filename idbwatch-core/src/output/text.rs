//! Free-text and pair renderers for records and diff reports

use crate::diff::DiffReport;
use crate::output::common::OutputWriter;
use crate::types::HostRecord;
use colored::{Color, Colorize};
use std::io;

/// User-chosen display options, threaded through every render call
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    /// Show CPE identifiers
    pub show_cpes: bool,
    /// Show hostnames
    pub show_hostnames: bool,
    /// Show tags
    pub show_tags: bool,
    /// Show vulnerability identifiers
    pub show_vulns: bool,
    /// Colorize field values
    pub color: bool,
    /// Render as `ip:port` pairs instead of field blocks
    pub pairs: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_cpes: true,
            show_hostnames: true,
            show_tags: true,
            show_vulns: true,
            color: true,
            pairs: false,
        }
    }
}

/// Text formatter for host records and diff reports
///
/// # Examples
///
/// ```no_run
/// use idbwatch_core::output::{DisplayOptions, TextFormatter};
/// use idbwatch_core::types::HostRecord;
///
/// let mut formatter = TextFormatter::new(DisplayOptions::default());
/// let record = HostRecord {
///     ip: "1.2.3.4".to_string(),
///     ports: vec![80, 443],
///     ..Default::default()
/// };
/// formatter.write_record(&record).unwrap();
/// ```
pub struct TextFormatter {
    writer: OutputWriter,
    opts: DisplayOptions,
}

impl TextFormatter {
    /// Create a formatter writing to stdout
    pub fn new(opts: DisplayOptions) -> Self {
        Self {
            writer: OutputWriter::stdout(),
            opts,
        }
    }

    /// Create a formatter writing to a file
    pub fn new_with_file(opts: DisplayOptions, path: &str) -> io::Result<Self> {
        Ok(Self {
            writer: OutputWriter::file(path)?,
            opts,
        })
    }

    /// Render one host record
    ///
    /// Sentinel records render nothing. In pair mode a record without ports
    /// also renders nothing; in block mode the identifier line is followed by
    /// one line per populated, non-hidden field.
    pub fn write_record(&mut self, record: &HostRecord) -> io::Result<()> {
        if !record.is_present() {
            return Ok(());
        }

        if self.opts.pairs {
            if record.ports.is_empty() {
                return Ok(());
            }
            for port in &record.ports {
                self.writer.write(&format!("{}:{}\n", record.ip, port))?;
            }
            return Ok(());
        }

        let mut block = format!("{}\n", record.ip);
        block.push_str(&format!(
            "Ports: {}\n",
            self.paint(&join_ports(&record.ports), Color::Green)
        ));

        if self.opts.show_cpes && !record.cpes.is_empty() {
            block.push_str(&format!(
                "CPEs: {}\n",
                self.paint(&record.cpes.join(", "), Color::Yellow)
            ));
        }
        if self.opts.show_vulns && !record.vulns.is_empty() {
            block.push_str(&format!(
                "Vulnerabilities: {}\n",
                self.paint(&record.vulns.join(", "), Color::Red)
            ));
        }
        if self.opts.show_hostnames && !record.hostnames.is_empty() {
            block.push_str(&format!(
                "Hostnames: {}\n",
                self.paint(&record.hostnames.join(", "), Color::Blue)
            ));
        }
        if self.opts.show_tags && !record.tags.is_empty() {
            block.push_str(&format!(
                "Tags: {}\n",
                self.paint(&record.tags.join(", "), Color::Magenta)
            ));
        }

        block.push('\n');
        self.writer.write(&block)
    }

    /// Render a diff report
    ///
    /// First-seen hosts are reported wholesale; changed hosts show only the
    /// newly observed ports and vulnerabilities. Pair mode emits `ip:value`
    /// lines, block mode emits grouped identifier/value blocks.
    pub fn write_report(&mut self, report: &DiffReport) -> io::Result<()> {
        for record in report.first_seen.values() {
            if self.opts.pairs {
                for port in &record.ports {
                    self.writer.write(&format!("{}:{}\n", record.ip, port))?;
                }
            } else {
                self.writer.write(&format!(
                    "{}\n{}\n\n",
                    record.ip,
                    join_ports(&record.ports)
                ))?;
            }
        }

        for (ip, host_diff) in &report.changed {
            if self.opts.pairs {
                for port in &host_diff.new_ports {
                    self.writer.write(&format!("{}:{}\n", ip, port))?;
                }
                for vuln in &host_diff.new_vulns {
                    self.writer.write(&format!("{}:{}\n", ip, vuln))?;
                }
            } else {
                let mut block = format!("{}\n", ip);
                if !host_diff.new_ports.is_empty() {
                    let ports: Vec<u16> = host_diff.new_ports.iter().copied().collect();
                    block.push_str(&format!("{}\n", join_ports(&ports)));
                }
                if !host_diff.new_vulns.is_empty() {
                    let vulns: Vec<String> = host_diff.new_vulns.iter().cloned().collect();
                    block.push_str(&format!("{}\n", vulns.join(", ")));
                }
                block.push('\n');
                self.writer.write(&block)?;
            }
        }

        Ok(())
    }

    fn paint(&self, s: &str, color: Color) -> String {
        if self.opts.color {
            s.color(color).to_string()
        } else {
            s.to_string()
        }
    }
}

fn join_ports(ports: &[u16]) -> String {
    ports
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff;
    use crate::types::Snapshot;
    use tempfile::tempdir;

    fn plain_opts() -> DisplayOptions {
        DisplayOptions {
            color: false,
            ..Default::default()
        }
    }

    fn record(ip: &str, ports: &[u16]) -> HostRecord {
        HostRecord {
            ip: ip.to_string(),
            ports: ports.to_vec(),
            ..Default::default()
        }
    }

    fn render_record(opts: DisplayOptions, r: &HostRecord) -> String {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut formatter =
            TextFormatter::new_with_file(opts, path.to_str().unwrap()).unwrap();
        formatter.write_record(r).unwrap();
        drop(formatter);
        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn test_join_ports() {
        assert_eq!(join_ports(&[22, 80, 443]), "22, 80, 443");
        assert_eq!(join_ports(&[]), "");
    }

    #[test]
    fn test_sentinel_renders_nothing() {
        let out = render_record(plain_opts(), &HostRecord::empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_block_rendering() {
        let mut r = record("1.2.3.4", &[22, 80]);
        r.hostnames = vec!["example.com".to_string()];
        r.tags = vec!["cloud".to_string()];

        let out = render_record(plain_opts(), &r);
        assert_eq!(
            out,
            "1.2.3.4\nPorts: 22, 80\nHostnames: example.com\nTags: cloud\n\n"
        );
    }

    #[test]
    fn test_hidden_fields_are_skipped() {
        let mut r = record("1.2.3.4", &[80]);
        r.vulns = vec!["CVE-2021-1".to_string()];
        r.tags = vec!["cloud".to_string()];

        let opts = DisplayOptions {
            show_vulns: false,
            show_tags: false,
            ..plain_opts()
        };
        let out = render_record(opts, &r);
        assert_eq!(out, "1.2.3.4\nPorts: 80\n\n");
    }

    #[test]
    fn test_pair_rendering() {
        let opts = DisplayOptions {
            pairs: true,
            ..plain_opts()
        };
        let out = render_record(opts, &record("1.2.3.4", &[22, 80]));
        assert_eq!(out, "1.2.3.4:22\n1.2.3.4:80\n");
    }

    #[test]
    fn test_pair_rendering_skips_portless_record() {
        let opts = DisplayOptions {
            pairs: true,
            ..plain_opts()
        };
        let out = render_record(opts, &record("1.2.3.4", &[]));
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_rendering() {
        let old = crate::types::to_snapshot(&[record("10.0.0.1", &[22])]);
        let new = vec![record("10.0.0.1", &[22, 80]), record("10.0.0.2", &[443])];
        let report = diff::diff(&old, &new);

        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let mut formatter =
            TextFormatter::new_with_file(plain_opts(), path.to_str().unwrap()).unwrap();
        formatter.write_report(&report).unwrap();
        drop(formatter);

        let out = std::fs::read_to_string(&path).unwrap();
        // First-seen hosts come first, wholesale; changed hosts show deltas
        assert_eq!(out, "10.0.0.2\n443\n\n10.0.0.1\n80\n\n");
    }

    #[test]
    fn test_report_pair_rendering() {
        let old = Snapshot::new();
        let new = vec![record("10.0.0.1", &[22, 80])];
        let report = diff::diff(&old, &new);

        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let opts = DisplayOptions {
            pairs: true,
            ..plain_opts()
        };
        let mut formatter =
            TextFormatter::new_with_file(opts, path.to_str().unwrap()).unwrap();
        formatter.write_report(&report).unwrap();
        drop(formatter);

        let out = std::fs::read_to_string(&path).unwrap();
        assert_eq!(out, "10.0.0.1:22\n10.0.0.1:80\n");
    }
}
