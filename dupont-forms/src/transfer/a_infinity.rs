use crate::{
    dupont::DupontForm,
    error::{DimensionMismatch, NoArguments},
    sullivan::SullivanForm,
};
use dupont_error::Error;
use log::{debug, trace};
use rug::Rational;
use std::ops::Range;
use super::{binary::BinaryTrees, step_collector::StepCollector, Evaluator, Partial, Signs, Step, TransferOptions};

impl DupontForm {
    /// The transferred A∞ product `m_k` of the given forms, where `k` is the number of forms.
    ///
    /// It is a signed sum over all planar binary trees with `k` leaves, where a tree `[t1, t2]`
    /// whose left subtree has `n1` leaves carries the sign `-ε(t1) ε(t2) (-1)^{n1}`, and a leaf
    /// has sign `1`. Each tree is evaluated like a [tree product](DupontForm::tree_product), except
    /// that the wedge products carry Koszul signs for the degree `-1` homotopies of their factors.
    /// In particular `m_2(a, b)` is `p(i(a) i(b))`, and `m_1` is the identity.
    ///
    /// Returns [`NoArguments`] if no form is given, and [`DimensionMismatch`] if the forms do not
    /// all live on the same simplex.
    ///
    /// ```
    /// use dupont_forms::{DupontForm, Rational};
    ///
    /// let w01 = DupontForm::basis_element(2, "0|1").unwrap();
    /// let w1 = DupontForm::vertex(2, 1).unwrap();
    /// let m3 = DupontForm::a_infinity_product(&[w01.clone(), w01.clone(), w1]).unwrap();
    /// assert_eq!(m3, w01.scale(&Rational::from((-1, 12))));
    /// ```
    pub fn a_infinity_product(args: &[DupontForm]) -> Result<DupontForm, Error> {
        Self::a_infinity_product_with(args, TransferOptions::default())
    }

    /// The transferred A∞ product of the given forms, with the given options. See
    /// [`DupontForm::a_infinity_product`].
    pub fn a_infinity_product_with(args: &[DupontForm], options: TransferOptions) -> Result<DupontForm, Error> {
        Self::a_infinity_product_with_steps(args, options, &mut ())
    }

    /// The transferred A∞ product of the given forms, with the given options, collecting the
    /// steps taken into `steps`. See [`DupontForm::a_infinity_product`].
    pub fn a_infinity_product_with_steps(
        args: &[DupontForm],
        options: TransferOptions,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<DupontForm, Error> {
        let n = check_args(args)?;
        if args.len() == 1 {
            return Ok(args[0].clone());
        }

        let mut evaluator = Evaluator::new(n, options, Signs::Koszul, steps);
        if options.memoize {
            debug!("A∞ product of arity {} on the {}-simplex, by blocks of inputs", args.len(), n);
            Ok(by_blocks(args, &mut evaluator))
        } else {
            Ok(by_trees(args, &mut evaluator))
        }
    }
}

/// Checks that there is at least one argument and that all arguments live on the same simplex,
/// returning the dimension of that simplex.
fn check_args(args: &[DupontForm]) -> Result<usize, Error> {
    const NAME: &str = "a_infinity_product";

    let Some(first) = args.first() else {
        return Err(Error::new(format!("{}()", NAME), vec![NAME.len()..NAME.len() + 2], NoArguments));
    };

    let Some(position) = args.iter().position(|arg| arg.dim() != first.dim()) else {
        return Ok(first.dim());
    };

    // a_infinity_product(C(2), C(2), C(3))
    let mut source = format!("{}(", NAME);
    let mut spans: Vec<Range<usize>> = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            source.push_str(", ");
        }
        let start = source.len();
        source.push_str(&format!("C({})", arg.dim()));
        spans.push(start..source.len());
    }
    source.push(')');

    Err(Error::new(
        source,
        vec![spans[0].clone(), spans[position].clone()],
        DimensionMismatch { op: "multiply", lhs: first.dim(), rhs: args[position].dim() },
    ))
}

/// Evaluates every planar binary tree separately, and sums them with their signs.
fn by_trees(args: &[DupontForm], evaluator: &mut Evaluator) -> DupontForm {
    let trees = BinaryTrees::new(args.len());
    debug!(
        "A∞ product of arity {} on the {}-simplex, over {} binary trees ({} distinct subtrees)",
        args.len(),
        evaluator.dim(),
        trees.roots().len(),
        trees.len(),
    );

    let mut result = DupontForm::zero(evaluator.dim());
    for &root in trees.roots() {
        let node = trees.node(root);
        trace!("evaluating a tree with {} leaves and sign {}", node.leaves, node.sign);

        let tree = trees.to_tree(root, args);
        let value = super::tree::evaluate(&tree, evaluator);
        result.accumulate(&value.scale(&Rational::from(node.sign)));
    }
    result
}

/// Evaluates the signed sum of all binary trees over each block of consecutive inputs once.
///
/// The trees over a block share their number of homotopies, so the sign of a child in
/// [`Evaluator::multiply`] only depends on its block. Since every step is linear, the signed sum
/// over the trees of a block can stand in for each of them.
fn by_blocks(args: &[DupontForm], evaluator: &mut Evaluator) -> DupontForm {
    let k = args.len();

    // blocks[lo][len - 1] is the signed sum over the trees on the inputs lo, ..., lo + len - 1
    let mut blocks: Vec<Vec<Partial>> = args.iter()
        .map(|arg| vec![evaluator.lift(arg)])
        .collect();

    for len in 2..k {
        for lo in 0..=k - len {
            let sum = split_sum(&blocks, lo, len, evaluator);
            trace!("applying the homotopy to the block of {} inputs at {}", len, lo);
            let value = evaluator.homotopy((sum, len - 2));
            blocks[lo].push(value);
        }
    }

    let root = split_sum(&blocks, 0, k, evaluator);
    evaluator.project(&root)
}

/// Computes `Σ_split -(-1)^{left} left · right` over the ways to split the block of `len` inputs
/// at `lo` into two nonempty blocks.
fn split_sum(blocks: &[Vec<Partial>], lo: usize, len: usize, evaluator: &mut Evaluator) -> SullivanForm {
    let mut sum = SullivanForm::zero(evaluator.dim());
    for left_len in 1..len {
        let left = &blocks[lo][left_len - 1];
        let right = &blocks[lo + left_len][len - left_len - 1];
        let (product, _) = evaluator.multiply([left, right]);
        if left_len % 2 == 0 {
            sum.accumulate(&-product);
        } else {
            sum.accumulate(&product);
        }
    }
    sum
}
