//! Memory access trace sources.
//!
//! This module produces the `(address, is_write)` stream replayed against the
//! cache. It provides:
//! 1. **Synthetic traffic:** A seeded xorshift generator of line-aligned
//!    random reads and writes, used when no trace file is given.
//! 2. **Text traces:** A plain list of `R <addr>` / `W <addr>` lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Number of accesses generated when no count is given.
pub const DEFAULT_SYNTHETIC_ACCESSES: u64 = 100_000;

/// Seed used when none is given (any non-zero value works for xorshift).
pub const DEFAULT_SEED: u64 = 123_456_789;

/// A single memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemAccess {
    /// Byte address.
    pub addr: u64,
    /// `true` for a store, `false` for a load.
    pub is_write: bool,
}

impl MemAccess {
    /// A load from `addr`.
    pub const fn read(addr: u64) -> Self {
        Self {
            addr,
            is_write: false,
        }
    }

    /// A store to `addr`.
    pub const fn write(addr: u64) -> Self {
        Self {
            addr,
            is_write: true,
        }
    }
}

/// Errors produced while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace could not be opened or read.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A line could not be parsed into an access.
    #[error("trace line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Random line-aligned accesses over `[1, span_bytes - 1]`.
///
/// Deterministic for a given seed. Half of the accesses (on average) are writes.
#[derive(Clone, Debug)]
pub struct SyntheticTrace {
    state: u64,
    remaining: u64,
    span_bytes: u64,
    line_bytes: u64,
}

impl SyntheticTrace {
    /// Creates a generator of `count` accesses.
    ///
    /// # Arguments
    ///
    /// * `span_bytes` - Size of the address range (normally the cache size).
    /// * `line_bytes` - Alignment of generated addresses; must be a power of two.
    /// * `count` - Number of accesses to produce.
    /// * `seed` - Generator seed; `0` is replaced by [`DEFAULT_SEED`].
    pub const fn new(span_bytes: u64, line_bytes: u64, count: u64, seed: u64) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
            remaining: count,
            span_bytes,
            line_bytes,
        }
    }

    const fn next_random(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Iterator for SyntheticTrace {
    type Item = MemAccess;

    fn next(&mut self) -> Option<MemAccess> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let upper = self.span_bytes.saturating_sub(1);
        let raw = if upper == 0 {
            0
        } else {
            self.next_random() % upper + 1
        };
        let align_mask = !(self.line_bytes.max(1) - 1);
        let is_write = self.next_random() & 1 == 0;

        Some(MemAccess {
            addr: raw & align_mask,
            is_write,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, usize::try_from(self.remaining).ok())
    }
}

/// Parses a numeric address: `0x`-prefixed hex, otherwise decimal.
fn parse_addr(text: &str) -> Result<u64, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid address {text:?}: {e}"))
}

/// Parses one trace line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns a description of the problem for malformed lines.
pub fn parse_line(text: &str) -> Result<Option<MemAccess>, String> {
    let content = text.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }

    let mut fields = content.split_whitespace();
    let (Some(kind), Some(addr), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format!("expected `<R|W> <address>`, got {content:?}"));
    };

    let is_write = match kind {
        "R" | "r" => false,
        "W" | "w" => true,
        other => return Err(format!("unknown access kind {other:?}")),
    };

    Ok(Some(MemAccess {
        addr: parse_addr(addr)?,
        is_write,
    }))
}

/// Reader over a plain-text trace, one access per line.
#[derive(Debug)]
pub struct TextTrace<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> TextTrace<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl TextTrace<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Io`] if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for TextTrace<R> {
    type Item = Result<MemAccess, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(TraceError::Io(e))),
            }
            self.line_no += 1;

            match parse_line(&self.buf) {
                Ok(Some(access)) => return Some(Ok(access)),
                Ok(None) => {}
                Err(reason) => {
                    return Some(Err(TraceError::Parse {
                        line: self.line_no,
                        reason,
                    }));
                }
            }
        }
    }
}
