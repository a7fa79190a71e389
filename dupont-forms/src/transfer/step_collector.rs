/// A sink for the steps taken while evaluating a transferred product.
///
/// Three collectors are provided: the unit type `()` discards every step, [`Vec`] records them in
/// order, and [`StepCount`] only counts them.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

/// Counts the steps pushed into it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepCount(pub usize);

impl<S> StepCollector<S> for StepCount {
    #[inline]
    fn push(&mut self, _: S) {
        self.0 += 1;
    }
}
