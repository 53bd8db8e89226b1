use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::codec::Codec;
use crate::huffman::{Transcoder, dictionary};

if_tracing! {
    use tracing::info;
}

/// Decompresses `input` into `output` with the code saved at `dictionary_path`.
pub fn decompress(input: &Path, output: &Path, dictionary_path: &Path) -> Result<()> {
    let table = dictionary::load_path(dictionary_path)
        .with_context(|| format!("failed to load dictionary {}", dictionary_path.display()))?;
    let transcoder = Transcoder::new(table)
        .with_context(|| format!("dictionary {} is not a usable prefix code", dictionary_path.display()))?;

    let encoded = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let text = transcoder
        .decode(&encoded)
        .with_context(|| format!("failed to decode {}", input.display()))?;
    fs::write(output, &text).with_context(|| format!("failed to write {}", output.display()))?;

    if_tracing! {{
        info!(
            event = "decompress_complete",
            input = %input.display(),
            output = %output.display(),
            encoded_len = encoded.len(),
            output_len = text.len(),
            "decompress finished"
        );
    }}
    Ok(())
}
