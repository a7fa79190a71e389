//! Homotopy transfer of the wedge product from Sullivan forms to Dupont forms.
//!
//! The contraction `(i, p, h)` transfers the product of Sullivan forms to a family of operations
//! on Dupont forms, indexed by planar trees. To evaluate a tree, every leaf is lifted with `i`,
//! every internal node multiplies the values of its children, non-root nodes apply the homotopy
//! `h`, and the root applies `p`. See [`DupontForm::tree_product`].
//!
//! Summing the binary trees of a given arity with suitable signs yields the transferred A∞
//! product `m_k`, see [`DupontForm::a_infinity_product`]. Because the wedge product is graded
//! commutative, these products form a C∞ structure: they vanish on signed shuffles.
//!
//! # Signs
//!
//! [`DupontForm::tree_product`] is the plain composite of `i`, the wedge product, `h` and `p`,
//! with no signs of its own. The A∞ product evaluates the same trees, but the homotopy has degree
//! `-1`: a child value that went through `q` homotopies passes them past the inputs to its left
//! when it is multiplied in. There the partial product is multiplied by
//! `(-1)^{q · |inputs to the left|}`, which is computed as the parity involution of the partial
//! product, negated if the number of homotopies already in it is odd.
//!
//! [`DupontForm::tree_product`]: crate::DupontForm::tree_product
//! [`DupontForm::a_infinity_product`]: crate::DupontForm::a_infinity_product

mod a_infinity;
mod binary;
pub mod step_collector;
mod tree;

pub use tree::{Tree, TreeIter};

use crate::{dupont::DupontForm, sullivan::SullivanForm};
use log::trace;
use step_collector::StepCollector;

/// Options that control how transferred products are evaluated.
///
/// Neither option changes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Whether to reduce every intermediate Sullivan form at the last vertex `n`.
    ///
    /// This keeps intermediate forms small. It is enabled by default.
    pub reduce: bool,

    /// Whether the A∞ product evaluates the subtrees over each block of consecutive inputs once,
    /// rather than once per binary tree they appear in.
    ///
    /// This is enabled by default.
    pub memoize: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self { reduce: true, memoize: true }
    }
}

impl TransferOptions {
    /// Wraps the given [`TransferOptions`] into a builder for further customization.
    pub fn into_builder(self) -> TransferOptionsBuilder {
        TransferOptionsBuilder(self)
    }
}

/// A builder for [`TransferOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptionsBuilder(TransferOptions);

impl TransferOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to reduce intermediate forms. See [`TransferOptions::reduce`].
    pub fn reduce(mut self, reduce: bool) -> Self {
        self.0.reduce = reduce;
        self
    }

    /// Sets whether to memoize blocks of inputs. See [`TransferOptions::memoize`].
    pub fn memoize(mut self, memoize: bool) -> Self {
        self.0.memoize = memoize;
        self
    }

    /// Builds the [`TransferOptions`].
    pub fn build(self) -> TransferOptions {
        self.0
    }
}

/// A step taken while evaluating a transferred product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A Dupont form was lifted to a Sullivan form with `i`.
    Lift,

    /// The values of the given number of children were multiplied.
    Multiply { factors: usize },

    /// The homotopy `h` was applied.
    Homotopy,

    /// The projection `p` was applied to the final product.
    Project,

    /// An intermediate form was reduced at the given vertex.
    Reduce { eliminate: usize },
}

/// A value in the middle of an evaluation: a Sullivan form, and the number of homotopies it went
/// through.
pub(crate) type Partial = (SullivanForm, usize);

/// Whether products of partial values carry Koszul signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signs {
    /// Plain wedge products, as in [`DupontForm::tree_product`].
    Plain,

    /// Koszul signs for the homotopies carried by each factor, as in the A∞ product.
    Koszul,
}

/// Applies the contraction maps for one evaluation, recording each step.
pub(crate) struct Evaluator<'a> {
    n: usize,
    options: TransferOptions,
    signs: Signs,
    steps: &'a mut dyn StepCollector<Step>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        n: usize,
        options: TransferOptions,
        signs: Signs,
        steps: &'a mut dyn StepCollector<Step>,
    ) -> Self {
        Self { n, options, signs, steps }
    }

    pub(crate) fn dim(&self) -> usize {
        self.n
    }

    pub(crate) fn lift(&mut self, form: &DupontForm) -> Partial {
        self.steps.push(Step::Lift);
        (self.reduce(form.i()), 0)
    }

    /// Multiplies the given values from left to right. With [`Signs::Koszul`], each value that
    /// carries an odd number of homotopies picks up the sign of passing them past the values
    /// before it.
    pub(crate) fn multiply<'b>(&mut self, values: impl IntoIterator<Item = &'b Partial>) -> Partial {
        let mut product = SullivanForm::one(self.n);
        let mut homotopies = 0;
        let mut factors = 0;

        for (value, count) in values {
            if self.signs == Signs::Koszul && count % 2 == 1 {
                product = product.parity();
                if homotopies % 2 == 1 {
                    product = -product;
                }
            }
            product = product.product(value);
            homotopies += count;
            factors += 1;
        }

        self.steps.push(Step::Multiply { factors });
        (self.reduce(product), homotopies)
    }

    pub(crate) fn homotopy(&mut self, (value, count): Partial) -> Partial {
        self.steps.push(Step::Homotopy);
        (self.reduce(value.h()), count + 1)
    }

    pub(crate) fn project(&mut self, value: &SullivanForm) -> DupontForm {
        self.steps.push(Step::Project);
        value.p()
    }

    fn reduce(&mut self, form: SullivanForm) -> SullivanForm {
        if !self.options.reduce {
            return form;
        }

        trace!("reducing a form with {} wedge terms", form.terms().count());
        self.steps.push(Step::Reduce { eliminate: self.n });
        form.reduce_unchecked(self.n)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn builder() {
        let options = TransferOptionsBuilder::new()
            .memoize(false)
            .build();
        assert_eq!(options, TransferOptions { reduce: true, memoize: false });

        let options = options.into_builder().reduce(false).build();
        assert!(!options.reduce);
        assert_eq!(TransferOptions::default(), TransferOptions { reduce: true, memoize: true });
    }

    #[test]
    fn multiply_without_homotopies() {
        let mut steps: Vec<Step> = Vec::new();
        let mut evaluator = Evaluator::new(1, TransferOptions::default(), Signs::Koszul, &mut steps);
        let a = evaluator.lift(&DupontForm::vertex(1, 0).unwrap());
        let b = evaluator.lift(&DupontForm::basis_element(1, "0|1").unwrap());
        let (product, homotopies) = evaluator.multiply([&a, &b]);

        assert_eq!(homotopies, 0);
        assert_eq!(product, a.0.product(&b.0).reduce(1).unwrap());
        assert_eq!(steps, vec![
            Step::Lift,
            Step::Reduce { eliminate: 1 },
            Step::Lift,
            Step::Reduce { eliminate: 1 },
            Step::Multiply { factors: 2 },
            Step::Reduce { eliminate: 1 },
        ]);
    }

    #[test]
    fn odd_homotopies_pick_up_sign() {
        let mut steps = ();
        let mut evaluator = Evaluator::new(1, TransferOptions::default(), Signs::Koszul, &mut steps);
        let one_form = (SullivanForm::dt(1, 0).unwrap(), 0);
        let shifted = (SullivanForm::t(1, 1).unwrap(), 1);

        // the homotopy carried by t1 passes dt0, which is odd
        let (product, homotopies) = evaluator.multiply([&one_form, &shifted]);
        let expected = SullivanForm::new(1, [("0", vec![("0|1", -1)])]).unwrap();
        assert_eq!(homotopies, 1);
        assert_eq!(product, expected.reduce(1).unwrap());
    }

    #[test]
    fn plain_products_have_no_sign() {
        let mut steps = ();
        let mut evaluator = Evaluator::new(1, TransferOptions::default(), Signs::Plain, &mut steps);
        let one_form = (SullivanForm::dt(1, 0).unwrap(), 0);
        let shifted = (SullivanForm::t(1, 1).unwrap(), 1);

        let (product, homotopies) = evaluator.multiply([&one_form, &shifted]);
        let expected = SullivanForm::new(1, [("0", vec![("0|1", 1)])]).unwrap();
        assert_eq!(homotopies, 1);
        assert_eq!(product, expected.reduce(1).unwrap());
    }
}
