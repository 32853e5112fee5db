/// Average of a WPM series, leaving out the leading zero every series opens
/// with. A series holding nothing but that zero averages to 0.
pub fn average_wpm(samples: &[f64]) -> f64 {
    match samples.split_first() {
        Some((_, rest)) if !rest.is_empty() => samples.iter().sum::<f64>() / rest.len() as f64,
        _ => 0.0,
    }
}

pub fn peak_wpm(samples: &[f64]) -> f64 {
    samples.iter().copied().fold(0.0, f64::max)
}
