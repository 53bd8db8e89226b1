use std::collections::BTreeMap;

use super::PrefixNode;

/// Code of the only symbol of a single-symbol text. The root is a leaf then, and its
/// empty path could not be told apart from "no symbol" while decoding.
pub const SINGLE_SYMBOL_CODE: &str = "0";

/// Maps every byte to its prefix code, a string of `'0'`/`'1'` symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, String>,
}

impl CodeTable {
    pub const fn new() -> Self {
        Self { codes: BTreeMap::new() }
    }

    /// Reads the code of every leaf off the tree: `'0'` for each step to a left child,
    /// `'1'` for each step to a right child.
    pub fn from_tree(root: &PrefixNode) -> Self {
        let mut table = Self::new();
        match root {
            PrefixNode::Leaf { symbol, .. } => {
                table.insert(*symbol, SINGLE_SYMBOL_CODE.to_string());
            }
            PrefixNode::Internal { .. } => collect_codes(root, &mut String::new(), &mut table.codes),
        }
        table
    }

    /// Inserts a code, returning the code previously stored for `symbol`.
    pub fn insert(&mut self, symbol: u8, code: String) -> Option<String> {
        self.codes.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Entries in byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_str()))
    }

    pub fn longest_code(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// Finds two symbols whose codes are equal or where one is a prefix of the other.
    ///
    /// Sorting the codes puts every code right before the codes it is a prefix of, so only
    /// neighbours have to be compared.
    pub fn find_prefix_conflict(&self) -> Option<(u8, u8)> {
        let mut by_code: Vec<(&str, u8)> = self.codes.iter().map(|(&symbol, code)| (code.as_str(), symbol)).collect();
        by_code.sort_unstable();
        by_code
            .windows(2)
            .find(|pair| pair[1].0.starts_with(pair[0].0))
            .map(|pair| (pair[0].1, pair[1].1))
    }
}

impl FromIterator<(u8, String)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, String)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

fn collect_codes(node: &PrefixNode, path: &mut String, codes: &mut BTreeMap<u8, String>) {
    match node {
        PrefixNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, path.clone());
        }
        PrefixNode::Internal { left, right, .. } => {
            path.push('0');
            collect_codes(left, path, codes);
            path.pop();

            path.push('1');
            collect_codes(right, path, codes);
            path.pop();
        }
    }
}
