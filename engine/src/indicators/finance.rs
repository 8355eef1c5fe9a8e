// Discounted cash-flow math on a per-period series. Period 0 is undiscounted.

/// Net present value of `flows` at `rate`: sum of flows[t] / (1 + rate)^t.
pub fn npv(rate: f64, flows: &[f64]) -> f64 {
    let factor = 1.0 + rate;
    flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / factor.powi(t as i32))
        .sum()
}

// Search range for x = 1 / (1 + r): 1e-6..1e4, i.e. r from -0.9999 up to 1e6.
const GRID_LOG10_MIN: f64 = -6.0;
const GRID_LOG10_MAX: f64 = 4.0;
const GRID_STEPS: usize = 5000;
const BISECTION_STEPS: usize = 200;

/// Internal rate of return: the rate at which the npv of `flows` is zero.
///
/// Returns `None` when the series never changes sign or when the cash-flow
/// polynomial has no real root in the searched range. If several rates qualify,
/// the one closest to zero is returned.
pub fn irr(flows: &[f64]) -> Option<f64> {
    let has_inflow = flows.iter().any(|cf| *cf > 0.0);
    let has_outflow = flows.iter().any(|cf| *cf < 0.0);
    if !(has_inflow && has_outflow) {
        return None;
    }

    // npv(r) = P(x) with x = 1 / (1 + r) and P(x) = sum flows[t] * x^t.
    let poly = |x: f64| flows.iter().rev().fold(0.0_f64, |acc, cf| acc * x + *cf);

    let mut roots = Vec::new();
    let step = (GRID_LOG10_MAX - GRID_LOG10_MIN) / GRID_STEPS as f64;
    let mut prev_x = 10f64.powf(GRID_LOG10_MIN);
    let mut prev_p = poly(prev_x);
    if prev_p == 0.0 {
        roots.push(prev_x);
    }
    for i in 1..=GRID_STEPS {
        let x = 10f64.powf(GRID_LOG10_MIN + step * i as f64);
        let p = poly(x);
        if !p.is_finite() {
            break;
        }
        if p == 0.0 {
            roots.push(x);
        } else if prev_p != 0.0 && (prev_p < 0.0) != (p < 0.0) {
            roots.push(bisect(&poly, prev_x, x, prev_p));
        }
        prev_x = x;
        prev_p = p;
    }

    roots
        .into_iter()
        .map(|x| 1.0 / x - 1.0)
        .filter(|r| r.is_finite())
        .min_by(|a, b| a.abs().total_cmp(&b.abs()))
}

fn bisect(f: &impl Fn(f64) -> f64, mut lo: f64, mut hi: f64, mut f_lo: f64) -> f64 {
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return mid;
        }
        if (f_mid < 0.0) == (f_lo < 0.0) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Number of periods with a negative net flow. This is the tool's capital recovery
/// period: it counts deficit periods, it does not locate the cumulative break-even.
pub fn negative_periods(flows: &[f64]) -> usize {
    flows.iter().filter(|cf| **cf < 0.0).count()
}
