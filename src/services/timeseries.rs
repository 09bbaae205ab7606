//! Utilities over numeric sequences: smoothing, gap filling, seasonal
//! factor extraction and outlier detection. All functions are pure and never
//! fail; degenerate inputs yield neutral results.

/// Centered moving average. The window shrinks at the sequence boundaries to
/// the available points (no zero padding), so the result has the same length
/// as the input.
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    if series.is_empty() || window == 0 {
        return series.to_vec();
    }
    let half = window / 2;
    let mut out = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(series.len());
        let slice = &series[start..end];
        out.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }
    out
}

/// Fill missing points by linear interpolation between the surrounding known
/// values. A trailing gap propagates the last known value forward; a leading
/// gap back-fills from the first known value. An all-missing series yields
/// zeros.
pub fn interpolate_gaps(series: &[Option<f64>]) -> Vec<f64> {
    let mut out = vec![0.0; series.len()];
    let mut last_known: Option<(usize, f64)> = None;

    for i in 0..series.len() {
        if let Some(v) = series[i] {
            out[i] = v;
            // Back-fill or interpolate everything since the last anchor
            if let Some((j, prev)) = last_known {
                let span = (i - j) as f64;
                for k in (j + 1)..i {
                    let t = (k - j) as f64 / span;
                    out[k] = prev + (v - prev) * t;
                }
            } else {
                for k in 0..i {
                    out[k] = v;
                }
            }
            last_known = Some((i, v));
        }
    }

    // Trailing gap: flat extrapolation of the last known value
    if let Some((j, v)) = last_known {
        for k in (j + 1)..series.len() {
            out[k] = v;
        }
    }
    out
}

/// Divide twelve monthly values by their arithmetic mean. Anything but
/// exactly 12 values (or a zero mean) returns a neutral vector of 1.0s.
pub fn seasonal_factors(monthly_values: &[f64]) -> Vec<f64> {
    if monthly_values.len() != 12 {
        return vec![1.0; 12];
    }
    let mean = monthly_values.iter().sum::<f64>() / 12.0;
    if mean == 0.0 {
        return vec![1.0; 12];
    }
    monthly_values.iter().map(|v| v / mean).collect()
}

/// IQR outlier detection. Quartiles are taken at the floor indices n/4 and
/// 3n/4 of the sorted copy (no rank interpolation); values outside
/// [Q1 − 1.5·IQR, Q3 + 1.5·IQR] are flagged by original index. Needs more
/// than 4 points, otherwise nothing is flagged.
pub fn detect_outliers(series: &[f64]) -> Vec<usize> {
    let n = series.len();
    if n <= 4 {
        return Vec::new();
    }
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q1 = sorted[n / 4];
    let q3 = sorted[3 * n / 4];
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;

    series
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v < lower || v > upper)
        .map(|(i, _)| i)
        .collect()
}
