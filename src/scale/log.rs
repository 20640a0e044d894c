use super::{MAX_DECADES_WITH_LOG_SUBSUBTICKS, Tick, util};
use crate::error::GraphResult;
use num_traits::Float;

/// Whether a log axis over `[min, max]` (in decades) is short enough for
/// 1..9 subsubticks in every decade.
///
/// # Examples
///
/// ```
/// use grafaksel::scale::log::has_normal_subsubticks;
///
/// assert!(has_normal_subsubticks(0.0, 3.0));
/// assert!(has_normal_subsubticks(-1.0, 4.0));
/// assert!(!has_normal_subsubticks(0.0, 6.0));
/// ```
pub fn has_normal_subsubticks<D: Float>(min: D, max: D) -> bool {
    max - min <= util::lit::<D>(MAX_DECADES_WITH_LOG_SUBSUBTICKS) + util::lit(util::FUZZ)
}

/// Round a log axis outward to multiples of a user subsubtick spacing.
///
/// The limits are in decades but the rounding happens in true space, so the
/// results are `log10(k * spacing)` for integer `k`. The lower limit is left
/// alone when rounding it would reach zero, which has no logarithm.
///
/// # Examples
///
/// ```
/// use grafaksel::scale::log::round_to_subsubticks;
///
/// // [3, 870] with a spacing of 100 becomes [3, 900]
/// let (lo, hi) = round_to_subsubticks(3f64.log10(), 870f64.log10(), 100.0).unwrap();
/// assert!((lo - 3f64.log10()).abs() < 1e-12);
/// assert!((hi - 900f64.log10()).abs() < 1e-12);
/// ```
pub fn round_to_subsubticks<D: Float>(min: D, max: D, spacing: D) -> GraphResult<(D, D)> {
    let ten = util::lit::<D>(10.0);
    let true_min = ten.powf(min);
    let true_max = ten.powf(max);
    let f = util::fuzz(true_max - true_min);

    let min_count = util::to_count(((true_min + f) / spacing).floor())?;
    let max_count = util::to_count(((true_max - f) / spacing).ceil())?;

    let lo = if min_count > 0 {
        (util::from_count::<D>(min_count) * spacing).log10()
    } else {
        min
    };
    let hi = (util::from_count::<D>(max_count) * spacing).log10();
    Ok((lo, hi))
}

/// The `i + log10(m)` subsubticks, `m = 1..=9`, of each decade of a log axis.
///
/// Decades are enumerated over the fuzz-widened axis, so the `m = 1` entry
/// of each decade duplicates a labelled tick position, including the one at
/// an integral upper limit. Values outside the axis by more than the fuzz
/// are skipped.
///
/// # Examples
///
/// ```
/// use grafaksel::scale::NormalSubsubtickIter;
///
/// // 1, 2, .., 9 and then 10 itself
/// let ticks: Vec<_> = NormalSubsubtickIter::new(0.0, 1.0).collect();
/// assert_eq!(ticks.len(), 10);
/// assert!((ticks[1].value - 2f64.log10()).abs() < 1e-12);
/// ```
pub struct NormalSubsubtickIter<D: Float> {
    state: NormalState<D>,
}

enum NormalState<D: Float> {
    Decades {
        decade: i64,
        end_decade: i64,
        multiple: u8,
        lo: D,
        hi: D,
    },
    Done,
}

impl<D: Float> NormalSubsubtickIter<D> {
    pub fn new(min: D, max: D) -> Self {
        let f = util::fuzz(max - min);
        let lo = min - f;
        let hi = max + f;
        match (lo.floor().to_i64(), hi.ceil().to_i64()) {
            (Some(decade), Some(end_decade)) if decade < end_decade => Self {
                state: NormalState::Decades {
                    decade,
                    end_decade,
                    multiple: 1,
                    lo,
                    hi,
                },
            },
            _ => Self {
                state: NormalState::Done,
            },
        }
    }
}

impl<D: Float> Iterator for NormalSubsubtickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let NormalState::Decades {
                decade,
                end_decade,
                multiple,
                lo,
                hi,
            } = &mut self.state
            else {
                return None;
            };

            if *decade >= *end_decade {
                self.state = NormalState::Done;
                return None;
            }

            let value = util::from_count::<D>(*decade) + util::lit::<D>(f64::from(*multiple)).log10();
            if *multiple == 9 {
                *multiple = 1;
                *decade += 1;
            } else {
                *multiple += 1;
            }

            if value >= *lo && value <= *hi {
                return Some(Tick::subsub(value));
            }
        }
    }
}

/// Subsubticks at every multiple of a user spacing, placed on a log axis.
///
/// Counts run from `floor(10^min / spacing)` to `ceil(10^max / spacing)`
/// inclusive, and yield `log10(k * spacing)` for each one that lands on the
/// axis. A zero count has no logarithm and is skipped.
pub struct UserSubsubtickIter<D: Float> {
    counts: std::ops::RangeInclusive<i64>,
    spacing: D,
    lo: D,
    hi: D,
}

impl<D: Float> UserSubsubtickIter<D> {
    pub fn new(min: D, max: D, spacing: D) -> GraphResult<Self> {
        let ten = util::lit::<D>(10.0);
        let f = util::fuzz(max - min);
        let first = util::to_count((ten.powf(min - f) / spacing).floor())?;
        let last = util::to_count((ten.powf(max + f) / spacing).ceil())?;
        Ok(Self {
            counts: first..=last,
            spacing,
            lo: min - f,
            hi: max + f,
        })
    }
}

impl<D: Float> Iterator for UserSubsubtickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        for count in self.counts.by_ref() {
            if count <= 0 {
                continue;
            }
            let value = (util::from_count::<D>(count) * self.spacing).log10();
            if value >= self.lo && value <= self.hi {
                return Some(Tick::subsub(value));
            }
        }
        None
    }
}
