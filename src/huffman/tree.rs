use std::collections::VecDeque;

use crate::codec::CodingError;

use super::FrequencyMap;

if_tracing! {
    use tracing::debug;
}

/// Element of a Huffman prefix tree.
///
/// Children are owned by their parent, so dropping the root frees the whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        /// The node popped first, i.e. the lesser one.
        left: Box<PrefixNode>,
        right: Box<PrefixNode>,
    },
}

impl PrefixNode {
    pub const fn leaf(symbol: u8, weight: u64) -> Self {
        PrefixNode::Leaf { symbol, weight }
    }

    pub fn merge(left: Self, right: Self) -> Self {
        PrefixNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub const fn weight(&self) -> u64 {
        match self {
            PrefixNode::Leaf { weight, .. } | PrefixNode::Internal { weight, .. } => *weight,
        }
    }

    #[cfg_attr(not(any(test, feature = "tracing")), allow(dead_code))]
    pub fn leaf_count(&self) -> usize {
        match self {
            PrefixNode::Leaf { .. } => 1,
            PrefixNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// The two FIFO queues of the linear-time Huffman construction.
///
/// `leaves` is filled once, in non-decreasing order of weight. `merged` receives every new
/// internal node at its tail, and since merged weights never decrease it stays sorted too.
struct MergeQueues {
    leaves: VecDeque<PrefixNode>,
    merged: VecDeque<PrefixNode>,
}

impl MergeQueues {
    fn new(sorted: Vec<(u8, u64)>) -> Self {
        Self {
            leaves: sorted.into_iter().map(|(symbol, weight)| PrefixNode::leaf(symbol, weight)).collect(),
            merged: VecDeque::new(),
        }
    }

    /// Pops the node of lowest weight across both queues.
    ///
    /// A leaf is only taken when it is strictly lighter than the front of `merged`; on equal
    /// weights the merged node wins. Changing this changes the codes that get assigned.
    fn pop_lowest(&mut self) -> Option<PrefixNode> {
        let leaf = self.leaves.front().map(PrefixNode::weight);
        let merged = self.merged.front().map(PrefixNode::weight);
        match (leaf, merged) {
            (Some(leaf), Some(merged)) if leaf < merged => self.leaves.pop_front(),
            (_, Some(_)) => self.merged.pop_front(),
            (Some(_), None) => self.leaves.pop_front(),
            (None, None) => None,
        }
    }
}

/// Builds the prefix tree whose leaves are exactly the symbols of `frequencies`.
///
/// The two lowest nodes are merged until a single node remains; the first one popped becomes
/// the left child. A map with one entry yields that lone leaf as the root.
///
/// # Errors
///
/// Returns [`CodingError::EmptyInput`] if `frequencies` has no entries.
pub fn build_tree(frequencies: &FrequencyMap) -> Result<PrefixNode, CodingError> {
    if_tracing! {{
        debug!(distinct = frequencies.len(), "building prefix tree");
    }}
    let mut queues = MergeQueues::new(frequencies.sorted_by_frequency());

    while let Some(left) = queues.pop_lowest() {
        match queues.pop_lowest() {
            Some(right) => queues.merged.push_back(PrefixNode::merge(left, right)),
            None => {
                if_tracing! {{
                    debug!(weight = left.weight(), leaves = left.leaf_count(), "prefix tree built");
                }}
                return Ok(left);
            }
        }
    }

    Err(CodingError::EmptyInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8, weight: u64) -> PrefixNode {
        PrefixNode::leaf(symbol, weight)
    }

    #[test]
    fn empty_map_is_an_error() {
        assert!(matches!(build_tree(&FrequencyMap::new()), Err(CodingError::EmptyInput)));
    }

    #[test]
    fn single_entry_is_the_root() {
        let frequencies: FrequencyMap = [(b'a', 5)].into_iter().collect();
        assert_eq!(build_tree(&frequencies).unwrap(), leaf(b'a', 5));
    }

    #[test]
    fn two_leaves_merge_in_pop_order() {
        let frequencies: FrequencyMap = [(b'a', 2), (b'b', 1)].into_iter().collect();
        assert_eq!(build_tree(&frequencies).unwrap(), PrefixNode::merge(leaf(b'b', 1), leaf(b'a', 2)));
    }

    #[test]
    fn merged_node_wins_weight_ties() {
        // after merging a and b, the internal node (2) and the leaf c (2) tie
        let frequencies: FrequencyMap = [(b'a', 1), (b'b', 1), (b'c', 2)].into_iter().collect();
        let expected = PrefixNode::merge(PrefixNode::merge(leaf(b'a', 1), leaf(b'b', 1)), leaf(b'c', 2));
        assert_eq!(build_tree(&frequencies).unwrap(), expected);
    }

    #[test]
    fn lighter_leaf_beats_merged_node() {
        let frequencies: FrequencyMap = [(b'a', 2), (b'b', 2), (b'c', 3)].into_iter().collect();
        // a+b = 4, c (3) is strictly lighter and is popped first
        let expected = PrefixNode::merge(leaf(b'c', 3), PrefixNode::merge(leaf(b'a', 2), leaf(b'b', 2)));
        assert_eq!(build_tree(&frequencies).unwrap(), expected);
    }

    #[test]
    fn internal_weights_are_sums() {
        fn check(node: &PrefixNode) {
            if let PrefixNode::Internal { weight, left, right } = node {
                assert_eq!(*weight, left.weight() + right.weight());
                check(left);
                check(right);
            }
        }

        let frequencies = FrequencyMap::from_text(b"the quick brown fox jumps over the lazy dog");
        let root = build_tree(&frequencies).unwrap();
        check(&root);
        assert_eq!(root.weight(), frequencies.total());
        assert_eq!(root.leaf_count(), frequencies.len());
    }
}
