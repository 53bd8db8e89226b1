//! Huffman prefix coding of line-oriented text.
//!
//! encoding runs `text -> FrequencyMap -> PrefixNode tree -> CodeTable`, and the table drives a
//! [`Transcoder`] that substitutes every byte with its code. lines are transcoded
//! independently: the encoded text has exactly as many lines as the source, each one a string
//! of `'0'`/`'1'` symbols. the table is persisted next to the encoded text by [`dictionary`].
//!
//! no text encoding is assumed, a symbol is a single byte.

use crate::codec::CodingError;

pub mod code_table;
pub mod dictionary;
pub mod frequency;
pub mod transcoder;
pub mod tree;

pub use code_table::CodeTable;
pub use frequency::FrequencyMap;
pub use transcoder::Transcoder;
pub use tree::PrefixNode;

if_tracing! {
    use tracing::trace;
}

pub const LINE_SEPARATOR: u8 = b'\n';

/// Splits `text` into lines the way line-by-line reading does.
///
/// Only `'\n'` terminates a line. A terminator at the very end does not start another line,
/// so `"a\nb\n"` and `"a\nb"` both yield `["a", "b"]`, and `""` yields nothing.
pub fn lines(text: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = (!text.is_empty()).then(move || text.strip_suffix(&[LINE_SEPARATOR]).unwrap_or(text));
    body.into_iter().flat_map(|body| body.split(|&b| b == LINE_SEPARATOR))
}

/// Builds the prefix tree for `frequencies` and extracts its code table.
///
/// The tree only lives for the duration of this call.
///
/// # Errors
///
/// Returns [`CodingError::EmptyInput`] if `frequencies` has no entries.
pub fn code_table_for(frequencies: &FrequencyMap) -> Result<CodeTable, CodingError> {
    let root = tree::build_tree(frequencies)?;
    if_tracing! {{
        trace!(tree = %crate::diagnostics::render_tree(&root), "prefix tree");
    }}
    Ok(CodeTable::from_tree(&root))
}

/// Builds a [`Transcoder`] whose table was derived from `text` itself.
#[cfg(test)]
pub fn transcoder_for(text: &[u8]) -> Result<Transcoder, CodingError> {
    let table = code_table_for(&FrequencyMap::from_text(text))?;
    Transcoder::new(table)
}
