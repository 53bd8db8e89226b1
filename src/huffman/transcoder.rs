use std::collections::HashMap;

use crate::codec::{Codec, CodingError};

use super::{CodeTable, LINE_SEPARATOR, lines};

if_tracing! {
    use tracing::{debug, debug_span, warn};
}

/// Substitutes bytes with their codes and back, one line at a time.
///
/// Lines are joined with a single separator in both directions, never after the last one.
#[derive(Debug, Clone)]
pub struct Transcoder {
    table: CodeTable,
    inverse: HashMap<String, u8>,
    longest_code: usize,
}

impl Transcoder {
    /// # Errors
    ///
    /// Returns [`CodingError::AmbiguousCode`] if the table is not prefix-free, as decoding
    /// with it would be ambiguous.
    pub fn new(table: CodeTable) -> Result<Self, CodingError> {
        if let Some((first, second)) = table.find_prefix_conflict() {
            return Err(CodingError::AmbiguousCode { first, second });
        }

        let inverse = table.iter().map(|(symbol, code)| (code.to_string(), symbol)).collect();
        let longest_code = table.longest_code();
        Ok(Self {
            table,
            inverse,
            longest_code,
        })
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    fn encode_lines(&self, data: &[u8], buf: &mut Vec<u8>) -> Result<(), CodingError> {
        for (index, line) in lines(data).enumerate() {
            if index > 0 {
                buf.push(LINE_SEPARATOR);
            }
            for &symbol in line {
                let code = self
                    .table
                    .get(symbol)
                    .ok_or(CodingError::MissingCode { symbol, line: index + 1 })?;
                buf.extend_from_slice(code.as_bytes());
            }
        }
        Ok(())
    }

    fn decode_lines(&self, data: &[u8], buf: &mut Vec<u8>) -> Result<(), CodingError> {
        let mut pending = String::with_capacity(self.longest_code);

        for (index, line) in lines(data).enumerate() {
            let corrupt = |reason: String| CodingError::CorruptData { line: index + 1, reason };

            if index > 0 {
                buf.push(LINE_SEPARATOR);
            }
            for &bit in line {
                if bit != b'0' && bit != b'1' {
                    return Err(corrupt(format!("unexpected symbol '{}'", bit.escape_ascii())));
                }
                pending.push(char::from(bit));

                if let Some(&symbol) = self.inverse.get(&pending) {
                    buf.push(symbol);
                    pending.clear();
                } else if pending.len() >= self.longest_code {
                    return Err(corrupt(format!("{pending:?} does not start any code")));
                }
            }
            if !pending.is_empty() {
                return Err(corrupt(format!("line ends inside a code, {pending:?} is left over")));
            }
        }
        Ok(())
    }
}

impl Codec for Transcoder {
    fn encode_into(&self, data: &[u8], buf: &mut Vec<u8>) -> Result<(), CodingError> {
        buf.clear();
        if_tracing! {
            let result = debug_span!("encode", codes = self.table.len()).in_scope(|| self.encode_lines(data, buf));
        }
        if_not_tracing! {
            let result = self.encode_lines(data, buf);
        }
        if result.is_err() {
            buf.clear();
        }

        if_tracing! {{
            match &result {
                Ok(()) => debug!(input_len = data.len(), output_len = buf.len(), "encode complete"),
                Err(err) => warn!(error = %err, "encode failed"),
            }
        }}
        result
    }

    fn decode_into(&self, data: &[u8], buf: &mut Vec<u8>) -> Result<(), CodingError> {
        buf.clear();
        if_tracing! {
            let result = debug_span!("decode", codes = self.table.len()).in_scope(|| self.decode_lines(data, buf));
        }
        if_not_tracing! {
            let result = self.decode_lines(data, buf);
        }
        if result.is_err() {
            buf.clear();
        }

        if_tracing! {{
            match &result {
                Ok(()) => debug!(input_len = data.len(), output_len = buf.len(), "decode complete"),
                Err(err) => warn!(error = %err, "decode failed"),
            }
        }}
        result
    }
}
