use crate::time_series::TimeSeriesPoint;

/// Compute X (seconds) and Y (WPM) bounds for the stats chart
pub fn compute_chart_params(points: &[TimeSeriesPoint]) -> (f64, f64) {
    let mut highest_wpm = 0.0;
    for p in points {
        if p.wpm > highest_wpm {
            highest_wpm = p.wpm;
        }
    }

    let mut overall_duration = points.last().map_or(1.0, |p| p.t);
    if overall_duration < 1.0 {
        overall_duration = 1.0;
    }

    let mut top = highest_wpm.ceil();
    if top < 1.0 {
        top = 1.0;
    }

    (overall_duration, top)
}

/// Axis labels are drawn at integer precision
pub fn format_label(val: f64) -> String {
    format!("{}", val.round() as i64)
}
