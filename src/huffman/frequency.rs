//! Counting how often each byte occurs in a text.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::lines;

if_tracing! {
    use tracing::{debug, warn};
}

/// Occurrence count of every distinct byte of a text.
///
/// Line terminators are never counted, everything else (including spaces and `'\r'`) is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyMap {
    pub const fn new() -> Self {
        Self { counts: BTreeMap::new() }
    }

    /// Counts the bytes of `text` line by line. No particular encoding is assumed.
    pub fn from_text(text: &[u8]) -> Self {
        let mut frequencies = Self::new();
        for line in lines(text) {
            frequencies.count_line(line);
        }
        if_tracing! {{
            debug!(distinct = frequencies.len(), total = frequencies.total(), "symbols counted");
        }}
        frequencies
    }

    pub fn count_line(&mut self, line: &[u8]) {
        for &symbol in line {
            *self.counts.entry(symbol).or_insert(0) += 1;
        }
    }

    #[cfg(test)]
    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct bytes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total number of counted bytes.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    /// Entries in non-decreasing order of frequency.
    ///
    /// Equal frequencies are ordered by byte value. This decides which of two equally
    /// frequent bytes enters the tree first, and therefore which code each one gets.
    pub fn sorted_by_frequency(&self) -> Vec<(u8, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(symbol, count)| (count, symbol));
        entries
    }
}

impl FromIterator<(u8, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Reads the whole text to be counted from `path`.
///
/// A file that cannot be opened reads as an empty text, so its frequency map is empty,
/// which callers treat as "nothing to do".
///
/// # Errors
///
/// Fails if the file was opened but reading it failed.
pub fn read_source(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_err) => {
            if_tracing! {{
                warn!(path = %path.display(), error = %_err, "cannot open input, counting no symbols");
            }}
            return Ok(Vec::new());
        }
    };

    let mut text = Vec::new();
    file.read_to_end(&mut text)?;
    Ok(text)
}
