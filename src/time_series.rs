use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}

/// Place the k-th sample at `k * interval` seconds; the opening zero sits at
/// t = 0.
pub fn from_samples(samples: &[f64], interval: Duration) -> Vec<TimeSeriesPoint> {
    let step = interval.as_secs_f64();
    samples
        .iter()
        .enumerate()
        .map(|(k, &wpm)| TimeSeriesPoint::new(k as f64 * step, wpm))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples() {
        let points = from_samples(&[0.0, 12.0, 24.0], Duration::from_millis(500));
        assert_eq!(
            points,
            vec![
                TimeSeriesPoint::new(0.0, 0.0),
                TimeSeriesPoint::new(0.5, 12.0),
                TimeSeriesPoint::new(1.0, 24.0),
            ]
        );
        let tuple: (f64, f64) = points[1].into();
        assert_eq!(tuple, (0.5, 12.0));
    }
}
