//! Access trace reader.
//!
//! Parses the plain-text trace format: one access per line, an operation
//! letter (`R` or `W`, either case) followed by a hexadecimal address with an
//! optional `0x` prefix. Blank lines and `#` comments are skipped; fields
//! after the address (block sizes, timestamps from other tools) are ignored.

use std::fs;
use std::path::Path;

use cachetrace_core::AccessType;
use thiserror::Error;

/// A trace file that could not be read or parsed.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The file could not be read at all.
    #[error("failed to read trace file: {0}")]
    Io(#[from] std::io::Error),

    /// A line had an operation letter other than `R`/`W`.
    #[error("line {line}: unrecognized operation {op:?} (expected R or W)")]
    BadOp {
        /// 1-based line number.
        line: usize,
        /// The rejected field.
        op: String,
    },

    /// A line had an address that is not hexadecimal.
    #[error("line {line}: invalid address {addr:?}")]
    BadAddr {
        /// 1-based line number.
        line: usize,
        /// The rejected field.
        addr: String,
    },

    /// A line had fewer than two fields.
    #[error("line {line}: expected `<op> <address>`")]
    Malformed {
        /// 1-based line number.
        line: usize,
    },
}

/// One parsed access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// Read or write.
    pub op: AccessType,
    /// Physical address.
    pub addr: u64,
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns a [`TraceError`] on IO failure or the first malformed line.
pub fn read_trace(path: &Path) -> Result<Vec<TraceEntry>, TraceError> {
    let text = fs::read_to_string(path)?;
    parse_trace(&text)
}

/// Parses trace text into access entries.
///
/// # Errors
///
/// Returns a [`TraceError`] for the first malformed line.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEntry>, TraceError> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(op_str), Some(addr_str)) = (fields.next(), fields.next()) else {
            return Err(TraceError::Malformed { line });
        };

        let op = match op_str {
            "R" | "r" => AccessType::Read,
            "W" | "w" => AccessType::Write,
            other => {
                return Err(TraceError::BadOp {
                    line,
                    op: other.to_string(),
                });
            }
        };

        let digits = addr_str
            .strip_prefix("0x")
            .or_else(|| addr_str.strip_prefix("0X"))
            .unwrap_or(addr_str);
        let addr = u64::from_str_radix(digits, 16).map_err(|_| TraceError::BadAddr {
            line,
            addr: addr_str.to_string(),
        })?;

        entries.push(TraceEntry { op, addr });
    }
    Ok(entries)
}
