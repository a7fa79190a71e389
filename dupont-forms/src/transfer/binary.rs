//! An arena of the planar binary trees of a given arity.
//!
//! The trees over each block `[lo, hi)` of consecutive inputs are built once and shared by every
//! larger tree containing them, so the arena stores one node per distinct subtree. Nodes are
//! stored children first, and the trees over the full block `[0, k)` are the roots.

use crate::dupont::DupontForm;
use super::Tree;

/// The shape of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// The input at the given position.
    Leaf(usize),

    /// A node with the given children in the arena.
    Branch(usize, usize),
}

/// A node in the arena: a planar binary tree over a block of consecutive inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) shape: Shape,

    /// The number of leaves of the tree.
    pub(crate) leaves: usize,

    /// The sign of the tree in the A∞ product: `1` for a leaf, and
    /// `ε([t1, t2]) = -ε(t1) ε(t2) (-1)^{leaves(t1)}`.
    pub(crate) sign: i8,
}

/// The planar binary trees of arity `k`.
#[derive(Debug, Clone)]
pub(crate) struct BinaryTrees {
    nodes: Vec<Node>,
    roots: Vec<usize>,
}

impl BinaryTrees {
    /// Enumerates the planar binary trees with `arity` leaves. There are `C_{arity - 1}` of them,
    /// where `C_m` is the `m`-th Catalan number.
    pub(crate) fn new(arity: usize) -> Self {
        let mut nodes = Vec::new();

        // by_block[lo][len - 1] holds the trees over the inputs lo, ..., lo + len - 1
        let mut by_block: Vec<Vec<Vec<usize>>> = vec![Vec::new(); arity];
        for len in 1..=arity {
            for lo in 0..=arity - len {
                let mut trees = Vec::new();
                if len == 1 {
                    trees.push(nodes.len());
                    nodes.push(Node { shape: Shape::Leaf(lo), leaves: 1, sign: 1 });
                } else {
                    for left_len in 1..len {
                        let left = by_block[lo][left_len - 1].clone();
                        let right = by_block[lo + left_len][len - left_len - 1].clone();
                        for &l in &left {
                            for &r in &right {
                                let parity = if left_len % 2 == 0 { -1 } else { 1 };
                                let sign = parity * nodes[l].sign * nodes[r].sign;
                                trees.push(nodes.len());
                                nodes.push(Node { shape: Shape::Branch(l, r), leaves: len, sign });
                            }
                        }
                    }
                }
                by_block[lo].push(trees);
            }
        }

        let roots = by_block.first()
            .and_then(|blocks| blocks.last())
            .cloned()
            .unwrap_or_default();
        Self { nodes, roots }
    }

    /// The arena indices of the trees over all inputs.
    pub(crate) fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub(crate) fn node(&self, id: usize) -> Node {
        self.nodes[id]
    }

    /// The number of distinct subtrees stored in the arena.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Builds the tree with the given arena index, with `args` at its leaves.
    pub(crate) fn to_tree(&self, id: usize, args: &[DupontForm]) -> Tree {
        match self.nodes[id].shape {
            Shape::Leaf(position) => Tree::Leaf(args[position].clone()),
            Shape::Branch(l, r) => Tree::Node(vec![self.to_tree(l, args), self.to_tree(r, args)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn catalan_numbers() {
        let counts = (1..=7)
            .map(|k| BinaryTrees::new(k).roots().len())
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 1, 2, 5, 14, 42, 132]);
    }

    #[test]
    fn subtrees_are_shared() {
        // 3 leaves, 2 pairs and 2 triples
        assert_eq!(BinaryTrees::new(3).len(), 7);
    }

    #[test]
    fn signs_of_arity_three() {
        let trees = BinaryTrees::new(3);
        let signs = trees.roots()
            .iter()
            .map(|&id| {
                let node = trees.node(id);
                let Shape::Branch(l, _) = node.shape else {
                    panic!("root is a leaf");
                };
                (trees.node(l).leaves, node.sign)
            })
            .collect::<Vec<_>>();

        // [a, [b, c]] and [[a, b], c]
        assert_eq!(signs, vec![(1, 1), (2, -1)]);
    }

    #[test]
    fn build_tree() {
        let args = (0..3)
            .map(|v| DupontForm::vertex(2, v).unwrap())
            .collect::<Vec<_>>();
        let trees = BinaryTrees::new(3);
        let tree = trees.to_tree(trees.roots()[0], &args);
        assert_eq!(tree, Tree::node([
            Tree::Leaf(args[0].clone()),
            Tree::node([args[1].clone(), args[2].clone()]),
        ]));
    }
}
