use serde::Serialize;

/// A single band's pixel interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub start: f64,
    pub width: f64,
}

impl Band {
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    pub fn center(&self) -> f64 {
        self.start + self.width / 2.0
    }
}

/// Splits a pixel range into equal bands, one per domain value.
///
/// Layout follows the usual band-scale rule: the range holds
/// `n − padding_inner + 2·padding_outer` steps, each band is
/// `step·(1 − padding_inner)` wide, and leftover space is split evenly
/// between both ends. Bands follow domain order from `range_min` toward
/// `range_max`; duplicate domain values keep their first position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandScale<T> {
    domain: Vec<T>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    step: f64,
    bandwidth: f64,
    starts: Vec<f64>,
}

impl<T: PartialEq> BandScale<T> {
    pub fn new(
        domain: Vec<T>,
        range_min: f64,
        range_max: f64,
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let mut unique: Vec<T> = Vec::with_capacity(domain.len());
        for value in domain {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }

        let padding_inner = padding_inner.clamp(0.0, 1.0);
        let padding_outer = padding_outer.max(0.0);

        let n = unique.len() as f64;
        let reversed = range_max < range_min;
        let (lo, hi) = if reversed {
            (range_max, range_min)
        } else {
            (range_min, range_max)
        };

        let step = (hi - lo) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let offset = lo + (hi - lo - step * (n - padding_inner)) * 0.5;
        let bandwidth = step * (1.0 - padding_inner);

        let mut starts: Vec<f64> = (0..unique.len())
            .map(|i| offset + step * i as f64)
            .collect();
        if reversed {
            starts.reverse();
        }

        BandScale {
            domain: unique,
            range: (range_min, range_max),
            padding_inner,
            padding_outer,
            step,
            bandwidth,
            starts,
        }
    }

    /// Same inner and outer padding.
    pub fn with_padding(domain: Vec<T>, range_min: f64, range_max: f64, padding: f64) -> Self {
        Self::new(domain, range_min, range_max, padding, padding)
    }

    /// Start of the band for `value`, or `None` if it is not in the domain.
    pub fn position(&self, value: &T) -> Option<f64> {
        let i = self.domain.iter().position(|v| v == value)?;
        Some(self.starts[i])
    }

    pub fn band(&self, value: &T) -> Option<Band> {
        self.position(value).map(|start| Band {
            start,
            width: self.bandwidth,
        })
    }

    /// Every domain value with its band, in domain order.
    pub fn bands(&self) -> impl Iterator<Item = (&T, Band)> {
        self.domain.iter().zip(&self.starts).map(|(value, &start)| {
            (
                value,
                Band {
                    start,
                    width: self.bandwidth,
                },
            )
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn padding(&self) -> (f64, f64) {
        (self.padding_inner, self.padding_outer)
    }
}
