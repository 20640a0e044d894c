//! A pair of values, one for each coordinate axis.

use serde::{Deserialize, Serialize};

/// One `T` for the x axis and one for the y axis.
///
/// Settings that apply to each axis independently live in a `PerAxis`
/// rather than being packed into shared flags, so that transposing a graph
/// is a plain [`swap`](Self::swap).
///
/// # Examples
///
/// ```
/// use grafaksel::PerAxis;
///
/// let mut reverse = PerAxis::new(true, false);
/// reverse.swap();
/// assert_eq!(reverse, PerAxis::new(false, true));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerAxis<T> {
    pub x: T,
    pub y: T,
}

/// Names one of the two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisId {
    X,
    Y,
}

impl AxisId {
    /// The perpendicular axis.
    pub fn other(self) -> Self {
        match self {
            AxisId::X => AxisId::Y,
            AxisId::Y => AxisId::X,
        }
    }

    pub fn letter(self) -> char {
        match self {
            AxisId::X => 'x',
            AxisId::Y => 'y',
        }
    }
}

impl<T> PerAxis<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Exchange the x and y values in place.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.x, &mut self.y);
    }

    pub fn get(&self, id: AxisId) -> &T {
        match id {
            AxisId::X => &self.x,
            AxisId::Y => &self.y,
        }
    }

    pub fn get_mut(&mut self, id: AxisId) -> &mut T {
        match id {
            AxisId::X => &mut self.x,
            AxisId::Y => &mut self.y,
        }
    }

    pub fn each_ref(&self) -> PerAxis<&T> {
        PerAxis {
            x: &self.x,
            y: &self.y,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerAxis<U> {
        PerAxis {
            x: f(self.x),
            y: f(self.y),
        }
    }

    /// Apply `f` to each value together with the axis letter (`'x'` or `'y'`).
    pub fn try_map_named<U, E>(self, mut f: impl FnMut(char, T) -> Result<U, E>) -> Result<PerAxis<U>, E> {
        Ok(PerAxis {
            x: f('x', self.x)?,
            y: f('y', self.y)?,
        })
    }

    pub fn zip<U>(self, other: PerAxis<U>) -> PerAxis<(T, U)> {
        PerAxis {
            x: (self.x, other.x),
            y: (self.y, other.y),
        }
    }
}

impl<A, B> PerAxis<(A, B)> {
    pub fn unzip(self) -> (PerAxis<A>, PerAxis<B>) {
        (PerAxis::new(self.x.0, self.y.0), PerAxis::new(self.x.1, self.y.1))
    }
}

impl<T: Clone> PerAxis<T> {
    /// The same value on both axes.
    pub fn splat(value: T) -> Self {
        Self {
            x: value.clone(),
            y: value,
        }
    }
}
