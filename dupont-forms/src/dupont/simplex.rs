use std::fmt::{Display, Formatter};

/// A face `[i_0, ..., i_k]` of the standard simplex, given by its strictly increasing, non-empty
/// list of vertices. It indexes the elementary cochain `ω_{i_0...i_k}` of degree `k`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Simplex(Vec<usize>);

impl Simplex {
    /// Creates a face from vertices that are already strictly increasing and non-empty.
    pub(crate) fn new_unchecked(vertices: Vec<usize>) -> Self {
        debug_assert!(!vertices.is_empty());
        debug_assert!(vertices.windows(2).all(|pair| pair[0] < pair[1]));
        Self(vertices)
    }

    pub fn vertices(&self) -> &[usize] {
        &self.0
    }

    /// The dimension `k` of this face, which is the degree of its cochain.
    pub fn dim(&self) -> usize {
        self.0.len() - 1
    }

    /// Iterates over every face of the `n`-simplex, in increasing order of dimension.
    pub fn all(n: usize) -> impl Iterator<Item = Simplex> {
        (0..=n).flat_map(move |k| Combinations::new(n + 1, k + 1)).map(Simplex)
    }
}

impl Display for Simplex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ω")?;
        for vertex in &self.0 {
            write!(f, "{}", vertex)?;
        }
        Ok(())
    }
}

/// Iterates over the `k`-element subsets of `{0, ..., m - 1}` in lexicographic order.
struct Combinations {
    m: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    fn new(m: usize, k: usize) -> Self {
        let current = (k <= m).then(|| (0..k).collect());
        Self { m, current }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let k = current.len();

        // advance the rightmost entry that can still move
        let mut next = current.clone();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if next[i] < self.m - k + i {
                next[i] += 1;
                for j in i + 1..k {
                    next[j] = next[j - 1] + 1;
                }
                self.current = Some(next);
                break;
            }
        }

        Some(current)
    }
}
