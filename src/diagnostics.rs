//! Dumps of the intermediate coding state, for debugging only.
//!
//! nothing here takes part in encoding or decoding. the compress command emits these through
//! debug and trace log events.
#![cfg_attr(not(feature = "tracing"), allow(dead_code))]

use std::fmt::Write;

use serde::Serialize;

use crate::huffman::{CodeTable, FrequencyMap, PrefixNode};

/// Summary of a code table applied to the text it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeReport {
    pub symbols: Vec<SymbolReport>,
    /// Number of bytes in the text, line terminators excluded.
    pub input_symbols: u64,
    /// Number of `'0'`/`'1'` symbols the encoded text consists of.
    pub encoded_bits: u64,
    pub average_code_length: f64,
    /// Shannon entropy of the byte distribution, in bits per byte.
    pub entropy: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolReport {
    /// The byte, ASCII-escaped.
    pub symbol: String,
    pub frequency: u64,
    pub code: Option<String>,
}

impl CodeReport {
    pub fn new(frequencies: &FrequencyMap, table: &CodeTable) -> Self {
        let symbols: Vec<SymbolReport> = frequencies
            .iter()
            .map(|(symbol, frequency)| SymbolReport {
                symbol: symbol.escape_ascii().to_string(),
                frequency,
                code: table.get(symbol).map(str::to_string),
            })
            .collect();

        let input_symbols = frequencies.total();
        let encoded_bits = symbols
            .iter()
            .map(|s| s.frequency * s.code.as_ref().map_or(0, String::len) as u64)
            .sum();

        let (average_code_length, entropy) = if input_symbols == 0 {
            (0.0, 0.0)
        } else {
            let total = input_symbols as f64;
            let entropy = -symbols
                .iter()
                .filter(|s| s.frequency > 0)
                .map(|s| {
                    let p = s.frequency as f64 / total;
                    p * p.log2()
                })
                .sum::<f64>();
            (encoded_bits as f64 / total, entropy)
        };

        Self {
            symbols,
            input_symbols,
            encoded_bits,
            average_code_length,
            entropy,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn render_frequencies(frequencies: &FrequencyMap) -> String {
    let mut out = String::new();
    for (symbol, count) in frequencies.iter() {
        let _ = writeln!(out, "{:>8} | {count}", quoted(symbol));
    }
    out
}

pub fn render_code_table(table: &CodeTable) -> String {
    let mut out = String::new();
    for (symbol, code) in table.iter() {
        let _ = writeln!(out, "{:>8} | {code}", quoted(symbol));
    }
    out
}

fn quoted(symbol: u8) -> String {
    format!("'{}'", symbol.escape_ascii())
}

/// Draws the tree one node per line, children indented below their parent.
pub fn render_tree(root: &PrefixNode) -> String {
    let mut out = String::new();
    render_node(root, 0, "root", &mut out);
    out
}

fn render_node(node: &PrefixNode, depth: usize, label: &str, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        PrefixNode::Leaf { symbol, weight } => {
            let _ = writeln!(out, "{indent}{label} -> {} [weight: {weight}]", quoted(*symbol));
        }
        PrefixNode::Internal { weight, left, right } => {
            let _ = writeln!(out, "{indent}{label} -> internal [weight: {weight}]");
            render_node(left, depth + 1, "0", out);
            render_node(right, depth + 1, "1", out);
        }
    }
}
