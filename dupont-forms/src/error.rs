//! Error kinds raised by forms and the operations on them.
//!
//! Each kind is a plain struct deriving [`ErrorKind`]; fallible functions return a
//! [`dupont_error::Error`] wrapping one of them. Use [`Error::is`] or [`Error::downcast_ref`] to
//! find out which kind occurred.

use ariadne::Fmt;
use dupont_attrs::ErrorKind;
use dupont_error::{Error, EXPR};
use std::ops::Range;

/// An entry of a key could not be read as a vertex index.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a vertex index", self.text),
    labels = ["this entry"],
    help = format!("keys are vertex indices separated by `|`, such as {}", "0|2|3".fg(EXPR)),
)]
pub struct InvalidIndex {
    /// The text of the entry.
    pub text: String,
}

/// A vertex index is larger than the simplicial dimension allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("vertex `{}` is out of range", self.index),
    labels = [format!("this vertex is not one of 0, ..., {}", self.n)],
    help = format!("forms of simplicial dimension {} only have the vertices 0 through {}", self.n, self.n),
)]
pub struct IndexOutOfRange {
    /// The index that was given.
    pub index: usize,

    /// The simplicial dimension of the form.
    pub n: usize,
}

/// The indices of a key are not listed in strictly increasing order.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "vertex indices must be strictly increasing",
    labels = [
        format!("this index is {}", self.previous),
        format!("so this index must be greater than {}", self.previous),
    ],
    help = "list the indices of a key in increasing order, without repetitions",
)]
pub struct NotIncreasing {
    /// The index that came first.
    pub previous: usize,

    /// The index that followed it.
    pub found: usize,
}

/// An exponent vector has the wrong number of entries.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {} exponents, found {}", self.expected, self.found),
    labels = ["this monomial"],
    help = format!(
        "a monomial on the {}-simplex has one exponent for each of its {} vertices",
        self.expected - 1,
        self.expected,
    ),
)]
pub struct ExponentLength {
    /// The number of exponents expected, `n + 1`.
    pub expected: usize,

    /// The number of exponents found.
    pub found: usize,
}

/// An entry of an exponent vector is not a nonnegative integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a nonnegative exponent", self.text),
    labels = ["this exponent"],
)]
pub struct InvalidExponent {
    /// The text of the entry.
    pub text: String,
}

/// A coefficient could not be read as a rational number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a rational number", self.text),
    labels = ["this coefficient"],
    help = format!("write coefficients as {} or {}, with integers `p` and `q`", "p".fg(EXPR), "p/q".fg(EXPR)),
)]
pub struct InvalidCoefficient {
    /// The text of the coefficient.
    pub text: String,
}

/// A coefficient has a zero denominator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this denominator is zero"],
)]
pub struct DivisionByZero;

/// The operands of an operation live on simplices of different dimensions.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot {} forms of different simplicial dimensions", self.op),
    labels = [
        format!("this form has dimension {}", self.lhs),
        format!("this form has dimension {}", self.rhs),
    ],
    help = "both operands must be forms on the same simplex",
)]
pub struct DimensionMismatch {
    /// What was being done, e.g. `add` or `multiply`.
    pub op: &'static str,

    /// The dimension of the first operand.
    pub lhs: usize,

    /// The dimension of the offending operand.
    pub rhs: usize,
}

/// The vertex to eliminate in a reduction does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot eliminate vertex {}", self.index),
    labels = [format!("this must be between 0 and {}", self.n)],
)]
pub struct EliminateOutOfRange {
    /// The vertex that was given.
    pub index: usize,

    /// The simplicial dimension of the form.
    pub n: usize,
}

/// A node of a planar tree has fewer than two children.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a tree node needs at least two children",
    labels = [format!(
        "this node has {} {}",
        self.children,
        if self.children == 1 { "child" } else { "children" },
    )],
    help = "use the child directly instead of wrapping it in a node",
)]
pub struct TooFewChildren {
    /// The number of children the node has.
    pub children: usize,
}

/// The A∞ product was called without arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the A∞ product needs at least one argument",
    labels = ["no arguments were given here"],
)]
pub struct NoArguments;

/// Builds the text `lhs symbol rhs`, along with the spans of `lhs` and `rhs` in it.
fn binary_source(lhs: &str, symbol: &str, rhs: &str) -> (String, Vec<Range<usize>>) {
    let source = format!("{} {} {}", lhs, symbol, rhs);
    let end = source.len();
    let rhs_start = end - rhs.len();
    (source, vec![0..lhs.len(), rhs_start..end])
}

/// Returns a [`DimensionMismatch`] error if `lhs` and `rhs` differ.
///
/// `space` is the symbol used for the kind of form, such as `Ω` or `C`, and `symbol` the operator
/// shown between both operands.
pub(crate) fn ensure_same_dim(
    op: &'static str,
    space: &str,
    symbol: &str,
    lhs: usize,
    rhs: usize,
) -> Result<(), Error> {
    if lhs == rhs {
        return Ok(());
    }

    let (source, spans) = binary_source(
        &format!("{}({})", space, lhs),
        symbol,
        &format!("{}({})", space, rhs),
    );
    Err(Error::new(source, spans, DimensionMismatch { op, lhs, rhs }))
}

/// Returns an [`IndexOutOfRange`] error if `index` is not a vertex of the `n`-simplex.
///
/// The error points at `index` inside the text `name(index)`.
pub(crate) fn ensure_vertex(name: &str, index: usize, n: usize) -> Result<(), Error> {
    if index <= n {
        return Ok(());
    }

    let source = format!("{}({})", name, index);
    let start = name.len() + 1;
    Err(Error::new(
        source.clone(),
        vec![start..source.len() - 1],
        IndexOutOfRange { index, n },
    ))
}
