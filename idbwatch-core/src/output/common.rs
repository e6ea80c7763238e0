//! Common utilities for output formatting

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Output writer that can write to stdout or a file
pub struct OutputWriter {
    file: Option<File>,
    destination: String,
}

impl OutputWriter {
    /// Create a new OutputWriter for stdout
    pub fn stdout() -> Self {
        Self {
            file: None,
            destination: "-".to_string(),
        }
    }

    /// Create a new OutputWriter for a file
    pub fn file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let file = File::create(&path)?;

        Ok(Self {
            file: Some(file),
            destination: path_str,
        })
    }

    /// Write a string to the output
    pub fn write(&mut self, s: &str) -> io::Result<()> {
        if let Some(ref mut f) = self.file {
            f.write_all(s.as_bytes())
        } else {
            print!("{}", s);
            Ok(())
        }
    }

    /// Get the destination (file path or "-" for stdout)
    pub fn destination(&self) -> &str {
        &self.destination
    }
}
