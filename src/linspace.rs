/// Evenly spaced sample points, `start + step * i` for `i in 0..len`.
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    /// Splits `[min, max]` into `intervals` equal intervals and yields the
    /// left edge of each one. `max` itself is not sampled.
    pub fn half_open(min: f64, max: f64, intervals: usize) -> Self {
        let step = if intervals > 0 {
            (max - min) / intervals as f64
        } else {
            0.
        };

        Linspace {
            start: min,
            step,
            index: 0,
            len: intervals,
        }
    }

    /// Same spacing as `half_open` but also yields `max`, so `intervals + 1`
    /// points in total.
    pub fn closed(min: f64, max: f64, intervals: usize) -> Self {
        let mut this = Self::half_open(min, max, intervals);

        if intervals > 0 {
            this.len += 1;
        }

        this
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_half_open_excludes_max() {
    let points: Vec<_> = Linspace::half_open(0., 10., 4).collect();

    assert_eq!(points, vec![0., 2.5, 5., 7.5]);
}

#[test]
fn test_closed_includes_max() {
    let points: Vec<_> = Linspace::closed(0., 10., 4).collect();

    assert_eq!(points, vec![0., 2.5, 5., 7.5, 10.]);
    assert_eq!(Linspace::closed(0., 10., 4).len(), 5);
}

#[test]
fn test_zero_intervals_is_empty() {
    assert_eq!(Linspace::half_open(0., 1., 0).count(), 0);
    assert_eq!(Linspace::closed(0., 1., 0).count(), 0);
}
