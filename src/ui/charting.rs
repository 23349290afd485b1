use itertools::{Itertools, MinMaxResult};

/// Points for the rep-time chart: x is the rep number, y its duration
pub fn rep_time_points(rep_times: &[f64]) -> Vec<(f64, f64)> {
    rep_times
        .iter()
        .enumerate()
        .map(|(idx, secs)| ((idx + 1) as f64, *secs))
        .collect()
}

/// Compute X (rep number) and Y (seconds) upper bounds for the rep chart
pub fn compute_chart_params(rep_times: &[f64]) -> (f64, f64) {
    let last_rep = (rep_times.len() as f64).max(1.0);

    let slowest = match rep_times.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => 0.0,
        MinMaxResult::OneElement(x) => x,
        MinMaxResult::MinMax(_, max) => max,
    };

    (last_rep, slowest.ceil().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_chart_params_empty() {
        assert_eq!(compute_chart_params(&[]), (1.0, 1.0));
    }

    #[test]
    fn test_compute_chart_params_uses_slowest_rep() {
        assert_eq!(compute_chart_params(&[2.0, 4.2, 1.1]), (3.0, 5.0));
        assert_eq!(compute_chart_params(&[0.3]), (1.0, 1.0));
    }

    #[test]
    fn test_rep_time_points() {
        assert_eq!(
            rep_time_points(&[2.0, 3.5]),
            vec![(1.0, 2.0), (2.0, 3.5)]
        );
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
