//! cli component of the huffcod project.
//!
//! the command line consists of four switches, each followed by exactly one value, in any order:
//!
//! > `$exename -t <k|d> -i <input path> -o <output path> -s <dictionary path>`
//!
//! `-t k` compresses: the byte frequencies of the input are counted, a Huffman code is built
//! from them and saved to the dictionary file, and every line of the input is written to the
//! output as the concatenated codes of its bytes. the input may be in any encoding.
//!
//! `-t d` decompresses: the dictionary file is read back and every line of the input, a string of
//! `0`s and `1`s, is translated back into the bytes it encodes.
//!
//! the number of command line tokens (program name included) must be odd and at most nine,
//! otherwise nothing is done. the process exits with
//!     0 - wrong number of arguments
//!     -1 - a switch is missing, repeated, unknown, or has an invalid value
//!     1 - the command ran (compressing an input without characters is a successful no-op)
//!     2 - the command failed, e.g. a file could not be read or the data is corrupt
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use thiserror::Error;

pub mod compress;
pub mod decompress;

if_tracing! {
    use tracing::error;
}

pub const EXIT_ARGUMENT_COUNT: i32 = 0;
pub const EXIT_INVALID_ARGUMENTS: i32 = -1;
pub const EXIT_DONE: i32 = 1;
pub const EXIT_FAILED: i32 = 2;

/// Program name plus four switch/value pairs.
const MAX_ARGUMENTS: usize = 9;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Inappropriate number of arguments used ({0}). Aborted.")]
    ArgumentCount(usize),

    #[error("{0}")]
    InvalidArguments(#[from] clap::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ArgumentCount(_) => EXIT_ARGUMENT_COUNT,
            CliError::InvalidArguments(_) => EXIT_INVALID_ARGUMENTS,
        }
    }
}

/// CLI arguments for the huffcod application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Operation: `k` compresses the input, `d` decompresses it
    #[arg(short = 't', value_enum)]
    pub mode: Mode,

    /// Path to the input file
    #[arg(short = 'i', value_parser = non_empty_path)]
    pub input: PathBuf,

    /// Path for the output file
    #[arg(short = 'o', value_parser = non_empty_path)]
    pub output: PathBuf,

    /// Path of the dictionary file, written when compressing and read when decompressing
    #[arg(short = 's', value_parser = non_empty_path)]
    pub dictionary: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Compress the input
    #[value(name = "k")]
    Compress,

    /// Decompress the input
    #[value(name = "d")]
    Decompress,
}

fn non_empty_path(value: &str) -> Result<PathBuf, String> {
    if value.is_empty() {
        Err("the path must not be empty".to_string())
    } else {
        Ok(PathBuf::from(value))
    }
}

pub fn check_argument_count(count: usize) -> Result<(), CliError> {
    if count % 2 == 0 || count > MAX_ARGUMENTS {
        Err(CliError::ArgumentCount(count))
    } else {
        Ok(())
    }
}

/// Validates the raw command line, program name included.
pub fn parse_args<I, T>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    check_argument_count(args.len())?;
    Ok(Cli::try_parse_from(args)?)
}

pub fn execute(cli: &Cli) -> Result<()> {
    match cli.mode {
        Mode::Compress => compress::compress(&cli.input, &cli.output, &cli.dictionary),
        Mode::Decompress => decompress::decompress(&cli.input, &cli.output, &cli.dictionary),
    }
}

/// Runs the whole command line and returns the process exit code.
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cli = match parse_args(args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            return e.exit_code();
        }
    };

    match execute(&cli) {
        Ok(()) => EXIT_DONE,
        Err(e) => {
            if_tracing! {{
                error!(mode = ?cli.mode, input = %cli.input.display(), error = %e, "command failed");
            }}
            eprintln!("error: {e:#}");
            EXIT_FAILED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::{env, fs, process};

    fn scratch(name: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("huffcod-{}-{}", process::id(), name));
        let _ = fs::remove_file(&path);
        path
    }

    fn args(mode: &str, input: &Path, output: &Path, dictionary: &Path) -> Vec<String> {
        vec![
            "huffcod".to_string(),
            "-t".to_string(),
            mode.to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
            "-s".to_string(),
            dictionary.display().to_string(),
        ]
    }

    #[test]
    fn argument_count_must_be_odd_and_at_most_nine() {
        assert!(check_argument_count(9).is_ok());
        assert!(check_argument_count(7).is_ok());
        assert!(matches!(check_argument_count(8), Err(CliError::ArgumentCount(8))));
        assert!(matches!(check_argument_count(11), Err(CliError::ArgumentCount(11))));
        assert_eq!(run(["huffcod", "-t", "k", "-i"]), EXIT_ARGUMENT_COUNT);
    }

    #[test]
    fn switches_in_any_order() {
        let cli = parse_args(["huffcod", "-s", "dict", "-o", "out", "-t", "d", "-i", "in"]).unwrap();
        assert_eq!(cli.mode, Mode::Decompress);
        assert_eq!(cli.input, PathBuf::from("in"));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert_eq!(cli.dictionary, PathBuf::from("dict"));
    }

    #[test]
    fn invalid_switches() {
        for line in [
            vec!["huffcod", "-t", "x", "-i", "in", "-o", "out", "-s", "dict"],
            vec!["huffcod", "-t", "k", "-i", "", "-o", "out", "-s", "dict"],
            vec!["huffcod", "-t", "k", "-i", "in", "-o", "out"],
            vec!["huffcod", "-t", "k", "-i", "in", "-o", "out", "-q", "dict"],
            vec!["huffcod", "-t", "k", "-t", "d", "-o", "out", "-s", "dict"],
        ] {
            let err = parse_args(line.clone()).unwrap_err();
            assert_eq!(err.exit_code(), EXIT_INVALID_ARGUMENTS, "{line:?}");
            assert_eq!(run(line), EXIT_INVALID_ARGUMENTS);
        }
    }

    #[test]
    fn compress_then_decompress_files() {
        let input = scratch("roundtrip.txt");
        let encoded = scratch("roundtrip.huff");
        let dictionary = scratch("roundtrip.dict");
        let decoded = scratch("roundtrip.out");
        fs::write(&input, "aab\nba").unwrap();

        assert_eq!(run(args("k", &input, &encoded, &dictionary)), EXIT_DONE);
        assert_eq!(fs::read_to_string(&encoded).unwrap(), "110\n01");
        assert_eq!(fs::read_to_string(&dictionary).unwrap(), "a 1\nb 0\n");

        assert_eq!(run(args("d", &encoded, &decoded, &dictionary)), EXIT_DONE);
        assert_eq!(fs::read_to_string(&decoded).unwrap(), "aab\nba");

        for path in [input, encoded, dictionary, decoded] {
            let _ = fs::remove_file(path);
        }
    }

    #[test]
    fn latin1_input_roundtrips() {
        let input = scratch("latin1.txt");
        let encoded = scratch("latin1.huff");
        let dictionary = scratch("latin1.dict");
        let decoded = scratch("latin1.out");
        // "café\nab" in latin-1, not valid utf-8
        fs::write(&input, b"caf\xe9\nab").unwrap();

        assert_eq!(run(args("k", &input, &encoded, &dictionary)), EXIT_DONE);
        assert!(encoded.exists());
        assert!(fs::read(&dictionary).unwrap().contains(&0xe9));

        assert_eq!(run(args("d", &encoded, &decoded, &dictionary)), EXIT_DONE);
        assert_eq!(fs::read(&decoded).unwrap(), b"caf\xe9\nab");

        for path in [input, encoded, dictionary, decoded] {
            let _ = fs::remove_file(path);
        }
    }

    #[test]
    fn compressing_nothing_writes_nothing() {
        let input = scratch("empty.txt");
        let encoded = scratch("empty.huff");
        let dictionary = scratch("empty.dict");
        fs::write(&input, "\n\n").unwrap();

        assert_eq!(run(args("k", &input, &encoded, &dictionary)), EXIT_DONE);
        assert!(!encoded.exists());
        assert!(!dictionary.exists());

        let missing = scratch("missing.txt");
        assert_eq!(run(args("k", &missing, &encoded, &dictionary)), EXIT_DONE);
        assert!(!encoded.exists());

        let _ = fs::remove_file(input);
    }

    #[test]
    fn corrupt_inputs_fail_without_output() {
        let encoded = scratch("corrupt.huff");
        let dictionary = scratch("corrupt.dict");
        let decoded = scratch("corrupt.out");

        fs::write(&dictionary, "a 00\nb 1\n").unwrap();
        fs::write(&encoded, "001\n0").unwrap();
        assert_eq!(run(args("d", &encoded, &decoded, &dictionary)), EXIT_FAILED);
        assert!(!decoded.exists());

        fs::write(&dictionary, "a 00\nb1\n").unwrap();
        fs::write(&encoded, "001").unwrap();
        assert_eq!(run(args("d", &encoded, &decoded, &dictionary)), EXIT_FAILED);
        assert!(!decoded.exists());

        let missing = scratch("missing.dict");
        assert_eq!(run(args("d", &encoded, &decoded, &missing)), EXIT_FAILED);

        for path in [encoded, dictionary] {
            let _ = fs::remove_file(path);
        }
    }
}
