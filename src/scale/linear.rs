use serde::Serialize;

/// Tick count targeted when rounding a domain outward.
const NICE_TICKS: usize = 10;

/// Maps a numeric domain linearly onto a pixel range.
///
/// Ranges may be reversed (e.g. `[height, 0]` for a y axis). A degenerate
/// domain maps every value to `range_min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(
        domain_min: f64,
        domain_max: f64,
        range_min: f64,
        range_max: f64,
        nice: bool,
    ) -> Self {
        let domain = if nice {
            nice_domain(domain_min, domain_max, NICE_TICKS)
        } else {
            (domain_min, domain_max)
        };

        LinearScale {
            domain,
            range: (range_min, range_max),
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return r0;
        }
        let t = (value - d0) / (d1 - d0);
        // Written as a blend so that t = 0 and t = 1 land exactly on the range ends.
        r0 * (1.0 - t) + r1 * t
    }

    /// Inverse of [`map`](Self::map). A degenerate range inverts to `domain_min`.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return d0;
        }
        let t = (pixel - r0) / (r1 - r0);
        d0 * (1.0 - t) + d1 * t
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Minimum and maximum of `values`, or `None` if there are none.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Rounds a domain outward to multiples of 1, 2 or 5 × 10^k so that about
/// `count` ticks cover it. Iterates until the tick step stops changing.
///
/// Degenerate or non-finite domains are returned unchanged. If the step has
/// not settled after ten rounds, the last rounded bounds are returned rather
/// than the original domain; they still contain it.
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || start == stop {
        return (start, stop);
    }

    let reversed = stop < start;
    let (mut lo, mut hi) = if reversed { (stop, start) } else { (start, stop) };
    let mut previous: Option<f64> = None;

    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if previous == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous = Some(step);
    }

    if reversed { (hi, lo) } else { (lo, hi) }
}

// Positive results are the step itself; negative results encode 1/step for
// sub-unit steps so that rounding stays exact in floating point.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);

    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power < 0.0 {
        -(10f64.powf(-power) / factor)
    } else {
        10f64.powf(power) * factor
    }
}
