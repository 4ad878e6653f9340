//! Cubic spline smoothing for timing curves.

/// Number of samples the timing charts draw per curve.
pub const DEFAULT_SAMPLES: usize = 300;

/// Cubic spline through `points` with not-a-knot ends, sampled at `samples` evenly spaced
/// x values from the first to the last point.
///
/// `points` must be sorted by x. Repeated x values keep their first point.
/// With fewer than three distinct x values there is nothing to fit and the
/// points are returned as given.
pub fn smooth_curve(points: &[(f64, f64)], samples: usize) -> Vec<(f64, f64)> {
    let mut xs: Vec<f64> = Vec::with_capacity(points.len());
    let mut ys: Vec<f64> = Vec::with_capacity(points.len());
    for &(x, y) in points {
        if xs.last().is_some_and(|last| x <= *last) {
            continue;
        }
        xs.push(x);
        ys.push(y);
    }
    if xs.len() < 3 || samples < 2 {
        return xs.into_iter().zip(ys).collect();
    }

    let m = second_derivatives(&xs, &ys);
    let (x0, x1) = (xs[0], xs[xs.len() - 1]);
    let step = (x1 - x0) / (samples - 1) as f64;

    let mut seg = 0usize;
    (0..samples)
        .map(|i| {
            let t = if i == samples - 1 { x1 } else { x0 + step * i as f64 };
            while seg + 2 < xs.len() && t > xs[seg + 1] {
                seg += 1;
            }
            (t, eval_segment(&xs, &ys, &m, seg, t))
        })
        .collect()
}

/// Second derivatives of the not-a-knot spline: the third derivative is
/// continuous across the second and the second-to-last knot.
///
/// The end values are eliminated through those two conditions, which leaves a
/// tridiagonal system in the interior unknowns.
fn second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let slope = |i: usize| (ys[i + 1] - ys[i]) / h[i];

    if n == 3 {
        // Both conditions collapse onto one interval: the parabola through all three.
        let m = 2.0 * (slope(1) - slope(0)) / (h[0] + h[1]);
        return vec![m; 3];
    }

    // Interior unknowns are M[1..n-1].
    let k = n - 2;
    let mut lower = vec![0.0; k];
    let mut diag = vec![0.0; k];
    let mut upper = vec![0.0; k];
    let mut rhs = vec![0.0; k];
    for j in 0..k {
        let i = j + 1;
        lower[j] = h[i - 1];
        diag[j] = 2.0 * (h[i - 1] + h[i]);
        upper[j] = h[i];
        rhs[j] = 6.0 * (slope(i) - slope(i - 1));
    }
    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    upper[0] = (h1 * h1 - h0 * h0) / h1;
    let (a, b) = (h[n - 3], h[n - 2]);
    lower[k - 1] = (a * a - b * b) / a;
    diag[k - 1] = (a + b) * (2.0 * a + b) / a;

    // Thomas algorithm.
    for j in 1..k {
        let w = lower[j] / diag[j - 1];
        diag[j] -= w * upper[j - 1];
        rhs[j] -= w * rhs[j - 1];
    }
    let mut m = vec![0.0; n];
    for j in (0..k).rev() {
        let next = if j + 1 < k { m[j + 2] } else { 0.0 };
        m[j + 1] = (rhs[j] - upper[j] * next) / diag[j];
    }
    m[0] = ((h0 + h1) * m[1] - h0 * m[2]) / h1;
    m[n - 1] = ((a + b) * m[n - 2] - b * m[n - 3]) / a;
    m
}

fn eval_segment(xs: &[f64], ys: &[f64], m: &[f64], i: usize, t: f64) -> f64 {
    let h = xs[i + 1] - xs[i];
    let a = xs[i + 1] - t;
    let b = t - xs[i];
    m[i] * a.powi(3) / (6.0 * h)
        + m[i + 1] * b.powi(3) / (6.0 * h)
        + (ys[i] / h - m[i] * h / 6.0) * a
        + (ys[i + 1] / h - m[i + 1] * h / 6.0) * b
}
