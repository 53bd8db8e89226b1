use std::io;

use thiserror::Error;

/// Represents an error emitted while building a code or transcoding text with it.
#[derive(Debug, Error)]
pub enum CodingError {
    /// The frequency map had no entries, so there is nothing to build a code from.
    #[error("input contains no symbols, there is nothing to encode")]
    EmptyInput,

    /// The text contains a byte the code table has no entry for.
    ///
    /// The table was built from a different text than the one being encoded.
    #[error("symbol '{}' on line {} has no code in the table", .symbol.escape_ascii(), .line)]
    MissingCode { symbol: u8, line: usize },

    /// The encoded text could not be mapped back onto the code table.
    #[error("encoded data is corrupt on line {line}: {reason}")]
    CorruptData { line: usize, reason: String },

    /// A dictionary line does not follow the `<symbol><space><code>` layout.
    #[error("dictionary is corrupt on line {line}: {reason}")]
    CorruptDictionary { line: usize, reason: String },

    /// Two codes of the table are equal or one is a prefix of the other.
    #[error("codes of '{}' and '{}' are not prefix-free", .first.escape_ascii(), .second.escape_ascii())]
    AmbiguousCode { first: u8, second: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Shared behavior of text codecs.
///
/// Both directions write into a caller-provided buffer, which is cleared first. When an
/// operation fails the buffer is left empty, so no partially transcoded text escapes.
pub trait Codec {
    /// Encodes `data` into `buf`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` contains a symbol the codec cannot represent.
    fn encode_into(&self, data: &[u8], buf: &mut Vec<u8>) -> Result<(), CodingError>;

    /// Decodes `data` into `buf`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is truncated or was not produced by this codec.
    fn decode_into(&self, data: &[u8], buf: &mut Vec<u8>) -> Result<(), CodingError>;

    fn encode(&self, data: &[u8]) -> Result<Vec<u8>, CodingError> {
        let mut buf = Vec::new();
        self.encode_into(data, &mut buf)?;
        Ok(buf)
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, CodingError> {
        let mut buf = Vec::new();
        self.decode_into(data, &mut buf)?;
        Ok(buf)
    }

    /// Performs a round-trip test on the codec.
    ///
    /// Use for sanity checking the encoder and decoder.
    #[cfg(test)]
    fn test_roundtrip<'orig>(&self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>, CodingError> {
        let encoded = self.encode(data)?;
        let decoded = self.decode(&encoded)?;
        let equal = data == decoded.as_slice();

        Ok(RoundTripTestResult {
            equal,
            original: data,
            encoded,
            decoded,
        })
    }
}

/// Represents the result of a round-trip test.
#[cfg(test)]
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) encoded: Vec<u8>,
    pub(crate) decoded: Vec<u8>,
}

#[cfg(test)]
impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the original and decoded text were equal.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    pub fn get_encoded(&self) -> &[u8] {
        self.encoded.as_slice()
    }

    pub fn get_decoded(&self) -> &[u8] {
        self.decoded.as_slice()
    }

    /// Number of code symbols in the encoded text, line separators excluded.
    pub fn encoded_bits(&self) -> usize {
        self.encoded.iter().filter(|&&b| b == b'0' || b == b'1').count()
    }
}
