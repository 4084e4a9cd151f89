//! Interpolation curves: natural cubic spline and least-squares line

/// Number of samples on every generated curve
pub const CURVE_SAMPLES: usize = 500;

/// `CURVE_SAMPLES` evenly spaced points from `start` to `end` inclusive
pub(crate) fn sample_grid(start: f64, end: f64) -> Vec<f64> {
    let step = (end - start) / (CURVE_SAMPLES - 1) as f64;
    let mut grid: Vec<f64> = (0..CURVE_SAMPLES).map(|i| start + i as f64 * step).collect();
    grid[CURVE_SAMPLES - 1] = end;
    grid
}

/// Natural cubic spline (zero second derivative at both ends)
pub(crate) struct CubicSpline<'a> {
    x: &'a [f64],
    y: &'a [f64],
    second: Vec<f64>,
}

impl<'a> CubicSpline<'a> {
    /// Fit through strictly increasing `x`; callers guarantee `x.len() >= 3`
    pub(crate) fn fit(x: &'a [f64], y: &'a [f64]) -> Self {
        let n = x.len();
        let mut second = vec![0.0; n];
        if n < 3 {
            return Self { x, y, second };
        }

        // Thomas algorithm over the interior knots
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let mut diag = vec![0.0; n];
        let mut rhs = vec![0.0; n];
        for i in 1..n - 1 {
            diag[i] = 2.0 * (h[i - 1] + h[i]);
            rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
        }
        for i in 2..n - 1 {
            let factor = h[i - 1] / diag[i - 1];
            diag[i] -= factor * h[i - 1];
            rhs[i] -= factor * rhs[i - 1];
        }
        for i in (1..n - 1).rev() {
            second[i] = (rhs[i] - h[i] * second[i + 1]) / diag[i];
        }

        Self { x, y, second }
    }

    pub(crate) fn evaluate(&self, t: f64) -> f64 {
        let n = self.x.len();
        // Segment whose left knot is the last one <= t, clamped to the ends
        let i = self
            .x
            .partition_point(|&knot| knot <= t)
            .saturating_sub(1)
            .min(n - 2);
        let h = self.x[i + 1] - self.x[i];
        let a = (self.x[i + 1] - t) / h;
        let b = (t - self.x[i]) / h;
        a * self.y[i]
            + b * self.y[i + 1]
            + ((a * a * a - a) * self.second[i] + (b * b * b - b) * self.second[i + 1]) * h * h
                / 6.0
    }
}

/// Spline sampled on the uniform grid spanning `x`
pub(crate) fn cubic_curve(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let spline = CubicSpline::fit(x, y);
    let grid = sample_grid(x[0], x[x.len() - 1]);
    let values = grid.iter().map(|&t| spline.evaluate(t)).collect();
    (grid, values)
}

/// Ordinary least-squares `(slope, intercept)`
pub(crate) fn least_squares(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let (covariance, variance) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(cov, var), (&xi, &yi)| {
            let dx = xi - mean_x;
            (cov + dx * (yi - mean_y), var + dx * dx)
        });
    let slope = if variance > 0.0 {
        covariance / variance
    } else {
        0.0
    };
    (slope, mean_y - slope * mean_x)
}

/// Regression line sampled on the uniform grid spanning `x`
pub(crate) fn linreg_curve(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let (slope, intercept) = least_squares(x, y);
    let grid = sample_grid(x[0], x[x.len() - 1]);
    let values = grid.iter().map(|&t| slope * t + intercept).collect();
    (grid, values)
}
