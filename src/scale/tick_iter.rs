use super::{Tick, linear, log};
use num_traits::Float;

/// Iterator over the ticks of one axis, whatever produced them.
pub struct TickIter<D> {
    inner: Box<dyn Iterator<Item = Tick<D>> + 'static>,
}

impl<D: 'static> TickIter<D> {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Tick<D>> + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// Creates a `TickIter` from a vector of ticks.
    ///
    /// # Examples
    ///
    /// ```
    /// use grafaksel::scale::{Tick, TickIter};
    ///
    /// let ticks = vec![Tick::major(0.0), Tick::sub(0.5), Tick::major(1.0)];
    ///
    /// let iter = TickIter::from_vec(ticks);
    /// assert_eq!(iter.count(), 3);
    /// ```
    pub fn from_vec(vec: Vec<Tick<D>>) -> Self {
        Self::new(vec.into_iter())
    }

    /// Creates an empty `TickIter` that produces no ticks.
    ///
    /// # Examples
    ///
    /// ```
    /// use grafaksel::scale::TickIter;
    ///
    /// let iter = TickIter::<f64>::empty();
    /// assert_eq!(iter.count(), 0);
    /// ```
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Just the tick positions, dropping their levels.
    pub fn values(self) -> impl Iterator<Item = D> {
        self.map(|tick| tick.value)
    }
}

impl<D: Float + 'static> From<linear::LinearTickIter<D>> for TickIter<D> {
    fn from(iter: linear::LinearTickIter<D>) -> Self {
        Self::new(iter)
    }
}

impl<D: Float + 'static> From<log::NormalSubsubtickIter<D>> for TickIter<D> {
    fn from(iter: log::NormalSubsubtickIter<D>) -> Self {
        Self::new(iter)
    }
}

impl<D: Float + 'static> From<log::UserSubsubtickIter<D>> for TickIter<D> {
    fn from(iter: log::UserSubsubtickIter<D>) -> Self {
        Self::new(iter)
    }
}

impl<D> Iterator for TickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
