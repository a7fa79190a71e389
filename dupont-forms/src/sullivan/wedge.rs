use crate::index::sort_with_sign;
use std::fmt::{Display, Formatter};

/// A wedge product of differentials `dt_{j_1} ∧ ... ∧ dt_{j_r}`, stored as a strictly increasing
/// list of indices. The empty wedge is the constant `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wedge(Vec<usize>);

impl Wedge {
    /// Creates a wedge from indices that are already strictly increasing.
    pub(crate) fn new_unchecked(indices: Vec<usize>) -> Self {
        debug_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        Self(indices)
    }

    /// The empty wedge.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The indices of the differentials in this wedge, in increasing order.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// The number of differentials in this wedge, which is its form degree.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if this is the empty wedge.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `dt_index` is a factor of this wedge.
    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    /// Computes `self ∧ other`.
    ///
    /// Returns the resulting wedge and whether the product picks up a minus sign, or [`None`] if
    /// both wedges share a differential, in which case the product is zero.
    pub fn wedge(&self, other: &Wedge) -> Option<(Wedge, bool)> {
        let mut indices = Vec::with_capacity(self.len() + other.len());
        indices.extend_from_slice(&self.0);
        indices.extend_from_slice(&other.0);
        let odd = sort_with_sign(&mut indices)?;
        Some((Wedge(indices), odd))
    }

    /// Computes `dt_index ∧ self`, with the same return convention as [`Wedge::wedge`].
    pub fn prepend(&self, index: usize) -> Option<(Wedge, bool)> {
        match self.0.binary_search(&index) {
            Ok(_) => None,
            Err(position) => {
                let mut indices = self.0.clone();
                indices.insert(position, index);
                Some((Wedge(indices), position % 2 == 1))
            },
        }
    }

    /// Removes the differential at the given position.
    pub fn remove(&self, position: usize) -> Wedge {
        let mut indices = self.0.clone();
        indices.remove(position);
        Wedge(indices)
    }
}

impl Display for Wedge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "1");
        }

        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "∧")?;
            }
            write!(f, "dt{}", index)?;
        }
        Ok(())
    }
}
