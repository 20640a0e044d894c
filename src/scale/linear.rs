use super::{MAX_NUM_SUBTICKS, SpacingKind, Tick, util};
use crate::error::GraphResult;
use num_traits::Float;

/// An inclusive range of integer tick counts.
///
/// Tick `i` sits at `i * spacing`. When `min_count > max_count` the range
/// is empty, which is legitimate for an unrounded axis too narrow to hold a
/// multiple of its spacing.
///
/// # Examples
///
/// ```
/// use grafaksel::scale::TickRange;
///
/// // Ticks every 0.5 on [0.2, 1.9]: 0.5, 1.0, 1.5
/// let range = TickRange::inclusive(0.2, 1.9, 0.5).unwrap();
/// assert_eq!((range.min_count, range.max_count), (1, 3));
/// assert_eq!(range.len(), 3);
///
/// // Rounding outward instead: 0.0 ..= 2.0
/// let range = TickRange::rounded(0.2, 1.9, 0.5).unwrap();
/// assert_eq!((range.min_count, range.max_count), (0, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickRange {
    pub min_count: i64,
    pub max_count: i64,
}

impl TickRange {
    pub const EMPTY: Self = Self {
        min_count: 0,
        max_count: -1,
    };

    /// The multiples of `spacing` lying inside `[min, max]`, widened by the fuzz.
    pub fn inclusive<D: Float>(min: D, max: D, spacing: D) -> GraphResult<Self> {
        let f = util::fuzz(max - min);
        Ok(Self {
            min_count: util::to_count(((min - f) / spacing).ceil())?,
            max_count: util::to_count(((max + f) / spacing).floor())?,
        })
    }

    /// The smallest run of multiples of `spacing` that covers `[min, max]`.
    ///
    /// The fuzz is applied inward so that an endpoint already sitting on a
    /// multiple is not pushed out by another whole tick.
    pub fn rounded<D: Float>(min: D, max: D, spacing: D) -> GraphResult<Self> {
        let f = util::fuzz(max - min);
        Ok(Self {
            min_count: util::to_count(((min + f) / spacing).floor())?,
            max_count: util::to_count(((max - f) / spacing).ceil())?,
        })
    }

    /// Difference between the two counts; negative when empty.
    pub fn span(&self) -> i64 {
        self.max_count - self.min_count
    }

    pub fn len(&self) -> usize {
        usize::try_from(self.span() + 1).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.max_count < self.min_count
    }

    /// Positions of the ticks in this range.
    pub fn values<D: Float>(&self, spacing: D) -> impl Iterator<Item = D> + use<D> {
        (self.min_count..=self.max_count).map(move |i| util::from_count::<D>(i) * spacing)
    }
}

/// Pick the spacing of unlabelled ticks between two labelled ones.
///
/// `min`/`max` are the final axis limits. Spacing kinds split as 5 → fifths,
/// 2 → halves and 1 → tenths, falling back to fifths and then halves while
/// tenths would exceed [`MAX_NUM_SUBTICKS`]. An unknown kind yields the tick
/// spacing itself. On a log axis the result never drops below one decade.
pub fn subtick_spacing<D: Float>(
    kind: SpacingKind,
    tick_spacing: D,
    min: D,
    max: D,
    log_axis: bool,
) -> GraphResult<D> {
    let spacing = match kind {
        SpacingKind::Five | SpacingKind::TwoFive => tick_spacing / util::lit(5.0),
        SpacingKind::Two => tick_spacing / util::lit(2.0),
        SpacingKind::One => {
            let mut chosen = tick_spacing;
            for divisor in [10.0, 5.0] {
                chosen = tick_spacing / util::lit(divisor);
                if TickRange::inclusive(min, max, chosen)?.span() <= MAX_NUM_SUBTICKS {
                    break;
                }
                chosen = tick_spacing / util::lit(2.0);
            }
            chosen
        }
        SpacingKind::Unknown => tick_spacing,
    };

    if log_axis && spacing <= D::one() {
        Ok(D::one())
    } else {
        Ok(spacing)
    }
}

/// Iterator over the ticks of a [`TickRange`] that fall inside the axis.
///
/// Tick positions are computed from their count, never accumulated, so the
/// values are as exact as `count * spacing` allows. Positions beyond
/// `[lo, hi]` by more than the axis fuzz are skipped.
pub struct LinearTickIter<D: Float> {
    state: LinearTickState<D>,
}

enum LinearTickState<D: Float> {
    Sweep(LinearSweepState<D>),
    Done,
}

struct LinearSweepState<D: Float> {
    next_count: i64,
    max_count: i64,
    spacing: D,
    lo: D,
    hi: D,
    level: u8,
}

impl<D: Float> LinearTickIter<D> {
    /// Walk `range` at `spacing`, keeping positions within `[lo, hi]` ± fuzz.
    pub fn new(range: TickRange, spacing: D, lo: D, hi: D, level: u8) -> Self {
        if range.is_empty() {
            return Self {
                state: LinearTickState::Done,
            };
        }
        let f = util::fuzz(hi - lo);
        Self {
            state: LinearTickState::Sweep(LinearSweepState {
                next_count: range.min_count,
                max_count: range.max_count,
                spacing,
                lo: lo - f,
                hi: hi + f,
                level,
            }),
        }
    }
}

impl<D: Float> Iterator for LinearTickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let LinearTickState::Sweep(state) = &mut self.state else {
            return None;
        };

        while state.next_count <= state.max_count {
            let value = util::from_count::<D>(state.next_count) * state.spacing;
            state.next_count += 1;

            if value < state.lo || value > state.hi {
                continue;
            }
            return Some(Tick {
                value,
                level: state.level,
            });
        }

        self.state = LinearTickState::Done;
        None
    }
}
