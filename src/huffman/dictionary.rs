//! Plain-text persistence of a [`CodeTable`].
//!
//! one entry per line, `<symbol><space><code>`, in byte order, with no header. the symbol is
//! written as the raw byte and is always the first byte of its line, which lets even a space
//! be stored. a line terminator cannot be stored, but it never needs a code either.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::codec::CodingError;

use super::{CodeTable, LINE_SEPARATOR, lines};

if_tracing! {
    use tracing::debug;
}

pub const SEPARATOR: u8 = b' ';

/// Writes every entry of `table` as its own line.
pub fn save<W: Write>(table: &CodeTable, writer: &mut W) -> io::Result<()> {
    for (symbol, code) in table.iter() {
        writer.write_all(&[symbol, SEPARATOR])?;
        writer.write_all(code.as_bytes())?;
        writer.write_all(&[LINE_SEPARATOR])?;
    }
    Ok(())
}

pub fn save_path(table: &CodeTable, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    save(table, &mut writer)?;
    writer.flush()?;

    if_tracing! {{
        debug!(path = %path.display(), entries = table.len(), "dictionary saved");
    }}
    Ok(())
}

/// Parses a dictionary previously written by [`save`].
///
/// # Errors
///
/// Returns [`CodingError::CorruptDictionary`] for a line that has no separator after its
/// symbol, has an empty code or one with symbols other than `'0'`/`'1'`, or repeats a
/// symbol of an earlier line.
pub fn parse(data: &[u8]) -> Result<CodeTable, CodingError> {
    let mut table = CodeTable::new();
    for (index, line) in lines(data).enumerate() {
        let corrupt = |reason: String| CodingError::CorruptDictionary { line: index + 1, reason };

        let (symbol, code) = parse_entry(line).map_err(corrupt)?;
        if table.insert(symbol, code).is_some() {
            return Err(corrupt(format!("'{}' already has a code", symbol.escape_ascii())));
        }
    }
    Ok(table)
}

pub fn load_path(path: &Path) -> Result<CodeTable, CodingError> {
    let table = parse(&fs::read(path)?)?;

    if_tracing! {{
        debug!(path = %path.display(), entries = table.len(), "dictionary loaded");
    }}
    Ok(table)
}

fn parse_entry(line: &[u8]) -> Result<(u8, String), String> {
    let (&symbol, rest) = line.split_first().ok_or("line is empty")?;
    let shown = symbol.escape_ascii();
    let code = match rest.split_first() {
        Some((&SEPARATOR, code)) => code,
        Some((other, _)) => {
            return Err(format!("expected a space after '{shown}', found '{}'", other.escape_ascii()));
        }
        None => return Err(format!("'{shown}' has no code")),
    };

    if code.is_empty() {
        return Err(format!("'{shown}' has an empty code"));
    }
    if let Some(bad) = code.iter().find(|&&b| b != b'0' && b != b'1') {
        return Err(format!("code of '{shown}' contains '{}'", bad.escape_ascii()));
    }
    Ok((symbol, code.iter().copied().map(char::from).collect()))
}
