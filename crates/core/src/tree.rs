//! Huffman tree stored as an arena of nodes.
//!
//! Children are referenced by index into the arena instead of by pointer, so
//! every traversal in the crate is an explicit loop and a badly skewed tree
//! (depth up to 256 for an adversarial header) cannot exhaust the call stack.
//!
//! # Construction
//!
//! 1. Push one leaf per symbol with a non-zero count, in ascending symbol order
//! 2. If only one leaf exists, pad with a zero-weight leaf for the lowest
//!    absent symbol so that every real symbol gets a code of at least one bit
//! 3. Repeatedly pop the two lightest nodes `a`, `b` and push `(a, b)`
//!
//! The shape depends only on the frequency table, so compress and decompress
//! rebuild the same tree independently.

use crate::error::HuffmanError;
use crate::frequency::{FrequencyTable, Symbol, SYMBOL_COUNT};
use crate::heap::{MinHeap, Weighted};

/// Index of a node inside [`HuffmanTree`].
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        left: NodeId,
        right: NodeId,
        weight: u64,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
}

/// Heap entry pointing at an arena slot.
#[derive(Debug, Clone, Copy)]
struct Pending {
    weight: u64,
    id: NodeId,
}

impl Weighted for Pending {
    fn weight(&self) -> u64 {
        self.weight
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if no symbol has a non-zero count.
    pub fn build(table: &FrequencyTable) -> Result<Self, HuffmanError> {
        // n leaves make n - 1 internal nodes
        let mut nodes = Vec::with_capacity(2 * SYMBOL_COUNT);
        let mut heap = MinHeap::with_capacity(SYMBOL_COUNT);

        for symbol in table.present_symbols() {
            push(&mut nodes, &mut heap, Node::Leaf {
                symbol,
                weight: table.count(symbol),
            });
        }

        if heap.is_empty() {
            return Err(HuffmanError::EmptyFrequencyTable);
        }

        if heap.len() == 1 {
            let filler = (0..SYMBOL_COUNT as Symbol)
                .find(|&s| table.count(s) == 0)
                .ok_or(HuffmanError::EmptyFrequencyTable)?;
            push(&mut nodes, &mut heap, Node::Leaf {
                symbol: filler,
                weight: 0,
            });
        }

        while heap.len() > 1 {
            let (Some(a), Some(b)) = (heap.extract_min(), heap.extract_min()) else {
                break;
            };
            push(&mut nodes, &mut heap, Node::Internal {
                left: a.id,
                right: b.id,
                weight: a.weight.saturating_add(b.weight),
            });
        }

        let root = heap
            .extract_min()
            .ok_or(HuffmanError::EmptyFrequencyTable)?
            .id;

        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.nodes[id], Node::Leaf { .. })
    }

    /// Symbol carried by a leaf; `None` for internal nodes.
    pub fn symbol(&self, id: NodeId) -> Option<Symbol> {
        match self.nodes[id] {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn weight(&self, id: NodeId) -> u64 {
        self.nodes[id].weight()
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    ///
    /// Returns `None` when `id` is a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
            Node::Leaf { .. } => None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }
}

fn push(nodes: &mut Vec<Node>, heap: &mut MinHeap<Pending>, node: Node) {
    let id = nodes.len();
    heap.insert(Pending {
        weight: node.weight(),
        id,
    });
    nodes.push(node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::SENTINEL;

    fn leaves(tree: &HuffmanTree) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = (0..tree.nodes.len())
            .filter_map(|id| tree.symbol(id))
            .collect();
        symbols.sort_unstable();
        symbols
    }

    #[test]
    fn test_empty_input_pads_sentinel() {
        let tree = HuffmanTree::build(&FrequencyTable::build(&[])).unwrap();

        assert_eq!(tree.leaf_count(), 2);
        assert!(!tree.is_leaf(tree.root()));
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.weight(tree.root()), 1);

        // zero-weight filler sorts first and lands on the left
        let left = tree.child(tree.root(), false).unwrap();
        let right = tree.child(tree.root(), true).unwrap();
        assert_eq!(tree.symbol(left), Some(0));
        assert_eq!(tree.symbol(right), Some(SENTINEL));
    }

    #[test]
    fn test_single_byte_value() {
        let tree = HuffmanTree::build(&FrequencyTable::build(b"AAA")).unwrap();

        assert_eq!(leaves(&tree), vec![b'A' as Symbol, SENTINEL]);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.weight(tree.root()), 4);
    }

    #[test]
    fn test_root_weight_is_total() {
        let table = FrequencyTable::build(b"the quick brown fox jumps over the lazy dog");
        let tree = HuffmanTree::build(&table).unwrap();

        assert_eq!(tree.weight(tree.root()), table.total());
        assert_eq!(tree.leaf_count(), table.distinct_symbols());
    }

    #[test]
    fn test_internal_weight_is_sum_of_children() {
        let table = FrequencyTable::build(b"mississippi river banks");
        let tree = HuffmanTree::build(&table).unwrap();

        for id in 0..tree.nodes.len() {
            if let Node::Internal { left, right, weight } = *tree.node(id) {
                assert_eq!(weight, tree.weight(left) + tree.weight(right));
            }
        }
        assert!(tree.child(tree.root(), true).is_some());
    }

    #[test]
    fn test_skewed_counts_make_deep_tree() {
        // powers of two give a maximally unbalanced tree
        let mut counts = [0u32; SYMBOL_COUNT];
        for (i, slot) in counts.iter_mut().take(20).enumerate() {
            *slot = 1 << i;
        }
        counts[SENTINEL as usize] = 1;

        let tree = HuffmanTree::build(&FrequencyTable::from_counts(counts)).unwrap();
        assert_eq!(tree.leaf_count(), 21);
        assert_eq!(tree.depth(), 20);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let table = FrequencyTable::build(b"aabbccddeeffgghh");
        let a = HuffmanTree::build(&table).unwrap();
        let b = HuffmanTree::build(&table.clone()).unwrap();
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.root, b.root);
    }

    #[test]
    fn test_all_zero_table() {
        let table = FrequencyTable::from_counts([0u32; SYMBOL_COUNT]);
        assert_eq!(
            HuffmanTree::build(&table).unwrap_err(),
            HuffmanError::EmptyFrequencyTable
        );
    }
}
