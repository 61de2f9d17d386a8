//! Automatic-differentiation recurrences on truncated power series.
//!
//! Every helper works on order `n` given accessors into lower (and, where the
//! recurrence allows, equal) orders of the operand series.

/// Order-`n` coefficient of the product `a · b` (Cauchy product).
#[inline]
pub fn cauchy(n: usize, a: impl Fn(usize) -> f64, b: impl Fn(usize) -> f64) -> f64 {
    (0..=n).map(|j| a(j) * b(n - j)).sum()
}

/// Order-`n` coefficient of `base^gamma` for real `gamma`.
///
/// `pow` is only evaluated below order `n`, so the result can be written back
/// into the same table it reads from. Requires `base(0) != 0`.
pub fn power(
    n: usize,
    gamma: f64,
    base: impl Fn(usize) -> f64,
    pow: impl Fn(usize) -> f64,
) -> f64 {
    let b0 = base(0);
    if n == 0 {
        return b0.powf(gamma);
    }
    let nf = n as f64;
    let sum: f64 = (0..n)
        .map(|j| {
            let jf = j as f64;
            (gamma * nf - jf * (gamma + 1.0)) * base(n - j) * pow(j)
        })
        .sum();
    sum / (nf * b0)
}

/// Order-`n` coefficient of a constant.
#[inline]
pub fn constant(n: usize, value: f64) -> f64 {
    if n == 0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(
        coeffs: &[f64],
        gamma: f64,
        order: usize,
    ) -> Vec<f64> {
        let mut out: Vec<f64> = Vec::with_capacity(order + 1);
        for n in 0..=order {
            let value = power(
                n,
                gamma,
                |j| coeffs.get(j).copied().unwrap_or(0.0),
                |j| out[j],
            );
            out.push(value);
        }
        out
    }

    #[test]
    fn cauchy_squares_a_polynomial() {
        // (1 + 2t)^2 = 1 + 4t + 4t^2
        let a = [1.0, 2.0, 0.0];
        let sq: Vec<f64> = (0..3).map(|n| cauchy(n, |j| a[j], |j| a[j])).collect();
        assert_eq!(sq, vec![1.0, 4.0, 4.0]);
    }

    #[test]
    fn power_rule_matches_geometric_series() {
        // 1 / (1 - t) = 1 + t + t^2 + ...
        let out = series_of(&[1.0, -1.0], -1.0, 6);
        for c in out {
            assert!((c - 1.0).abs() < 1e-14);
        }
    }

    #[test]
    fn power_rule_matches_binomial_expansion() {
        // (4 + t)^(-3/2) = 1/8 - 3/64 t + 15/1024 t^2 - ...
        let out = series_of(&[4.0, 1.0], -1.5, 2);
        assert!((out[0] - 0.125).abs() < 1e-15);
        assert!((out[1] + 3.0 / 64.0).abs() < 1e-15);
        assert!((out[2] - 15.0 / 1024.0).abs() < 1e-15);
    }

    #[test]
    fn constants_vanish_above_order_zero() {
        assert_eq!(constant(0, 3.0), 3.0);
        assert_eq!(constant(4, 3.0), 0.0);
    }
}
