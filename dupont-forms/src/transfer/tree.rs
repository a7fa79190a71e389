use crate::{
    dupont::DupontForm,
    error::{DimensionMismatch, TooFewChildren},
};
use dupont_error::Error;
use log::{debug, trace};
use std::{fmt::Write, ops::Range};
use super::{step_collector::StepCollector, Evaluator, Partial, Signs, Step, TransferOptions};

/// A planar tree whose leaves are Dupont forms.
///
/// The children of a node are ordered, and every node must have at least two children to be
/// evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// An input of the tree.
    Leaf(DupontForm),

    /// An internal node, with its children from left to right.
    Node(Vec<Tree>),
}

impl Tree {
    /// Creates a node with the given children.
    pub fn node(children: impl IntoIterator<Item = impl Into<Tree>>) -> Self {
        Tree::Node(children.into_iter().map(Into::into).collect())
    }

    /// Returns an iterator that traverses the tree in left-to-right post-order, so that every
    /// node comes after all of its children.
    pub fn post_order_iter(&self) -> TreeIter<'_> {
        TreeIter::new(self)
    }

    /// Iterates over the leaves of the tree, from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &DupontForm> {
        self.post_order_iter().filter_map(|tree| match tree {
            Tree::Leaf(form) => Some(form),
            Tree::Node(_) => None,
        })
    }

    /// The number of leaves of the tree.
    pub fn arity(&self) -> usize {
        self.leaves().count()
    }

    /// Renders the shape of the tree, such as `[C(2), [C(2), C(2)]]`, where `C(n)` is a leaf on
    /// the `n`-simplex.
    ///
    /// Returns the rendering and the span of every node in it, in post-order.
    fn render(&self) -> (String, Vec<Range<usize>>) {
        let mut out = String::new();
        let mut spans = Vec::new();
        self.render_into(&mut out, &mut spans);
        (out, spans)
    }

    fn render_into(&self, out: &mut String, spans: &mut Vec<Range<usize>>) {
        let start = out.len();
        match self {
            Tree::Leaf(form) => {
                let _ = write!(out, "C({})", form.dim());
            },
            Tree::Node(children) => {
                out.push('[');
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    child.render_into(out, spans);
                }
                out.push(']');
            },
        }
        spans.push(start..out.len());
    }

    /// Checks that every node has at least two children and every leaf lives on the same simplex,
    /// returning the dimension of that simplex.
    fn validate(&self) -> Result<usize, Error> {
        let mut first_leaf: Option<(usize, usize)> = None;

        for (position, tree) in self.post_order_iter().enumerate() {
            match tree {
                Tree::Leaf(form) => match first_leaf {
                    None => first_leaf = Some((position, form.dim())),
                    Some((first, n)) if n != form.dim() => {
                        let (source, spans) = self.render();
                        return Err(Error::new(
                            source,
                            vec![spans[first].clone(), spans[position].clone()],
                            DimensionMismatch { op: "combine", lhs: n, rhs: form.dim() },
                        ));
                    },
                    Some(_) => {},
                },
                Tree::Node(children) if children.len() < 2 => {
                    let (source, spans) = self.render();
                    return Err(Error::new(
                        source,
                        vec![spans[position].clone()],
                        TooFewChildren { children: children.len() },
                    ));
                },
                Tree::Node(_) => {},
            }
        }

        match first_leaf {
            Some((_, n)) => Ok(n),
            None => {
                let (source, spans) = self.render();
                Err(Error::new(source, spans, TooFewChildren { children: 0 }))
            },
        }
    }
}

impl From<DupontForm> for Tree {
    fn from(form: DupontForm) -> Self {
        Tree::Leaf(form)
    }
}

/// An iterator that iteratively traverses a [`Tree`] in left-to-right post-order (i.e.
/// depth-first).
///
/// This iterator is created by [`Tree::post_order_iter`].
pub struct TreeIter<'a> {
    stack: Vec<&'a Tree>,
    last_visited: Option<&'a Tree>,
}

impl<'a> TreeIter<'a> {
    /// Creates a new iterator that traverses the tree in left-to-right post-order.
    pub fn new(tree: &'a Tree) -> Self {
        Self {
            stack: vec![tree],
            last_visited: None,
        }
    }

    /// Pops the current node in the stack and marks it as the last visited node.
    fn visit(&mut self) -> Option<&'a Tree> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given node is the last visited node.
    fn is_last_visited(&self, tree: &'a Tree) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, tree),
            None => false,
        }
    }
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = &'a Tree;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let tree = *self.stack.last()?;
            match tree {
                Tree::Leaf(_) => return self.visit(),
                Tree::Node(children) => {
                    match children.last() {
                        Some(last) if !self.is_last_visited(last) => {
                            for child in children.iter().rev() {
                                self.stack.push(child);
                            }
                        },
                        _ => return self.visit(),
                    }
                },
            }
        }
    }
}

impl DupontForm {
    /// Evaluates the transferred product indexed by a planar tree.
    ///
    /// Every leaf is lifted with the inclusion `i`. Every internal node takes the wedge product of
    /// the values of its children from left to right, and then applies the homotopy `h`, except
    /// the root, which applies the projection `p`. No other signs are involved. A tree that is
    /// a single leaf evaluates to that leaf.
    ///
    /// Returns [`TooFewChildren`] if a node has fewer than two children, and
    /// [`DimensionMismatch`] if the leaves do not all live on the same simplex.
    ///
    /// ```
    /// use dupont_forms::{DupontForm, Tree};
    ///
    /// let a = DupontForm::vertex(2, 0).unwrap();
    /// let b = DupontForm::basis_element(2, "0|1").unwrap();
    /// let product = DupontForm::tree_product(&Tree::node([a.clone(), b.clone()])).unwrap();
    /// assert_eq!(product, a.i().try_mul(&b.i()).unwrap().p());
    /// ```
    pub fn tree_product(tree: &Tree) -> Result<DupontForm, Error> {
        Self::tree_product_with(tree, TransferOptions::default())
    }

    /// Evaluates the transferred product indexed by a planar tree, with the given options. See
    /// [`DupontForm::tree_product`].
    pub fn tree_product_with(tree: &Tree, options: TransferOptions) -> Result<DupontForm, Error> {
        Self::tree_product_with_steps(tree, options, &mut ())
    }

    /// Evaluates the transferred product indexed by a planar tree, with the given options,
    /// collecting the steps taken into `steps`. See [`DupontForm::tree_product`].
    pub fn tree_product_with_steps(
        tree: &Tree,
        options: TransferOptions,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<DupontForm, Error> {
        let n = tree.validate()?;
        if let Tree::Leaf(form) = tree {
            return Ok(form.clone());
        }

        debug!("evaluating a tree with {} leaves on the {}-simplex", tree.arity(), n);
        let mut evaluator = Evaluator::new(n, options, Signs::Plain, steps);
        Ok(evaluate(tree, &mut evaluator))
    }
}

/// Evaluates a validated tree whose root is a node.
pub(super) fn evaluate(tree: &Tree, evaluator: &mut Evaluator) -> DupontForm {
    let mut stack: Vec<Partial> = Vec::new();

    for node in tree.post_order_iter() {
        match node {
            Tree::Leaf(form) => stack.push(evaluator.lift(form)),
            Tree::Node(children) => {
                let values = stack.split_off(stack.len() - children.len());
                let product = evaluator.multiply(&values);
                if std::ptr::eq(node, tree) {
                    stack.push(product);
                } else {
                    trace!("applying the homotopy to a node with {} children", children.len());
                    stack.push(evaluator.homotopy(product));
                }
            },
        }
    }

    // the root is visited last
    match stack.pop() {
        Some((value, _)) => evaluator.project(&value),
        None => DupontForm::zero(evaluator.dim()),
    }
}
