use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::codec::{Codec, CodingError};
use crate::huffman::{FrequencyMap, Transcoder, code_table_for, dictionary, frequency};

if_tracing! {
    use crate::diagnostics::{self, CodeReport};
    use tracing::{debug, info, trace, warn};
}

/// Compresses `input` into `output` and saves the code it used to `dictionary_path`.
///
/// The input is read once. Files are only written once the whole input has been encoded.
pub fn compress(input: &Path, output: &Path, dictionary_path: &Path) -> Result<()> {
    let text = frequency::read_source(input).with_context(|| format!("failed to read {}", input.display()))?;
    let frequencies = FrequencyMap::from_text(&text);

    let table = match code_table_for(&frequencies) {
        Ok(table) => table,
        Err(CodingError::EmptyInput) => {
            if_tracing! {{
                warn!(input = %input.display(), "no symbols to compress");
            }}
            eprintln!("{} contains no characters, nothing to compress", input.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if_tracing! {{
        trace!(frequencies = %diagnostics::render_frequencies(&frequencies), "symbol frequencies");
        trace!(codes = %diagnostics::render_code_table(&table), "code table");
        if let Ok(report) = CodeReport::new(&frequencies, &table).to_json() {
            debug!(%report, "code report");
        }
    }}

    let transcoder = Transcoder::new(table)?;
    let encoded = transcoder
        .encode(&text)
        .with_context(|| format!("failed to encode {}", input.display()))?;

    dictionary::save_path(transcoder.table(), dictionary_path)
        .with_context(|| format!("failed to write dictionary {}", dictionary_path.display()))?;
    fs::write(output, &encoded).with_context(|| format!("failed to write {}", output.display()))?;

    if_tracing! {{
        info!(
            event = "compress_complete",
            input = %input.display(),
            output = %output.display(),
            input_len = text.len(),
            encoded_len = encoded.len(),
            distinct = transcoder.table().len(),
            "compress finished"
        );
    }}
    Ok(())
}
