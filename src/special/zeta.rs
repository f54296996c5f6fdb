use std::f64::consts::{LN_2, PI};

use num_complex::Complex64;

use crate::special::gamma::gamma_complex;

/// Terms of Borwein's acceleration of the Dirichlet eta series.
const BORWEIN_TERMS: usize = 50;

/// Shift applied to Re(s) = 1 off the real axis, where η(s)/(1 − 2^(1−s))
/// evaluates as 0/0.
const POLE_NUDGE: f64 = 1e-16;

/// ζ at the negative odd integers, where the functional equation loses
/// the exact rational value to rounding.
const NEGATIVE_ODD_VALUES: [(i32, f64); 7] = [
    (-1, -1.0 / 12.0),
    (-3, 1.0 / 120.0),
    (-5, -1.0 / 252.0),
    (-7, 1.0 / 240.0),
    (-9, -1.0 / 132.0),
    (-11, 691.0 / 32760.0),
    (-13, -1.0 / 12.0),
];

/// d_k = n Σ_{i=0}^{k} (n+i−1)! 4^i / ((n−i)! (2i)!), k = 0..=n.
fn borwein_coefficients() -> [f64; BORWEIN_TERMS + 1] {
    let n = BORWEIN_TERMS as f64;
    let mut d = [0.0; BORWEIN_TERMS + 1];
    let mut term = 1.0;
    let mut partial = 1.0;
    d[0] = partial;
    for i in 1..=BORWEIN_TERMS {
        let i_f = i as f64;
        term *= 4.0 * (n + i_f - 1.0) * (n - i_f + 1.0) / ((2.0 * i_f) * (2.0 * i_f - 1.0));
        partial += term;
        d[i] = partial;
    }
    d
}

/// η(s) = Σ (−1)^(k) / (k+1)^s, accelerated.
fn dirichlet_eta(s: Complex64) -> Complex64 {
    let d = borwein_coefficients();
    let d_n = d[BORWEIN_TERMS];
    let mut sum = Complex64::new(0.0, 0.0);
    for (k, &d_k) in d[..BORWEIN_TERMS].iter().enumerate() {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        // (k+1)^(−s)
        let power = (-s * ((k + 1) as f64).ln()).exp();
        sum += power * (sign * (d_k - d_n));
    }
    -sum / d_n
}

/// Riemann ζ(s) for complex s.
///
/// Re(s) ≥ 0 goes through η(s)/(1 − 2^(1−s)); Re(s) < 0 through the
/// functional equation ζ(s) = 2^s π^(s−1) sin(πs/2) Γ(1−s) ζ(1−s).
/// ζ(1) is +∞.
pub fn zeta(s: Complex64) -> Complex64 {
    if s.im == 0.0 {
        if s.re == 1.0 {
            return Complex64::new(f64::INFINITY, 0.0);
        }
        if let Some(exact) = negative_integer_value(s.re) {
            return Complex64::new(exact, 0.0);
        }
    }

    let s = if s.re == 1.0 { Complex64::new(s.re - POLE_NUDGE, s.im) } else { s };

    if s.re < 0.0 {
        let one = Complex64::new(1.0, 0.0);
        let two_s = (s * LN_2).exp();
        let pi_s = ((s - one) * PI.ln()).exp();
        let sine = (s * (PI / 2.0)).sin();
        return two_s * pi_s * sine * gamma_complex(one - s) * zeta(one - s);
    }

    let denominator = Complex64::new(1.0, 0.0) - ((Complex64::new(1.0, 0.0) - s) * LN_2).exp();
    dirichlet_eta(s) / denominator
}

/// ζ on the real line.
pub fn zeta_real(s: f64) -> f64 {
    zeta(Complex64::new(s, 0.0)).re
}

/// Exact ζ at negative integers: 0 at the trivial zeros, the tabulated
/// rational values at −1, −3, …, −13.
fn negative_integer_value(s: f64) -> Option<f64> {
    if s >= 0.0 || s.fract() != 0.0 {
        return None;
    }
    if s % 2.0 == 0.0 {
        return Some(0.0);
    }
    NEGATIVE_ODD_VALUES
        .iter()
        .find(|(n, _)| *n as f64 == s)
        .map(|(_, value)| *value)
}
