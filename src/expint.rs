// Exponential integrals

use std::f64::consts::LN_2;

/// Euler-Mascheroni constant
const EULER: f64 = 0.577_215_664_901_532_9;
/// Smallest representable magnitude used to seed the continued fraction.
const FPMIN: f64 = f64::MIN_POSITIVE / f64::EPSILON;
const EPS: f64 = f64::EPSILON;
const MAX_ITER: usize = 200;

/// Exponential integral Ei
///
/// $$\begin{equation}
/// \mathrm{Ei}(x) = -\int_{-x}^{\infty} \frac{e^{-t}}{t}\, dt
/// \end{equation}$$
///
/// taken as the Cauchy principal value for positive `x`. Follows the usual
/// numerical-library conventions at the edges of the domain:
/// `Ei(0) = -inf`, `Ei(-inf) = 0`, `Ei(inf) = inf`, `Ei(NaN) = NaN`.
///
/// For negative arguments, $\mathrm{Ei}(x) = -E_1(-x)$.
pub fn expi(x: f64) -> f64 {
    if x.is_nan() {
        f64::NAN
    } else if x == 0.0 {
        f64::NEG_INFINITY
    } else if x < 0.0 {
        -exp1(-x)
    } else {
        ei_positive(x)
    }
}

/// Exponential integral E1
///
/// $$\begin{equation}
/// E_1(x) = \int_{1}^{\infty} \frac{e^{-xt}}{t}\, dt
/// \end{equation}$$
///
/// Defined for `x >= 0`: `E1(0) = inf`, `E1(inf) = 0`. Negative or NaN
/// arguments return NaN.
pub fn exp1(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        f64::NAN
    } else if x == 0.0 {
        f64::INFINITY
    } else if x.is_infinite() {
        0.0
    } else if x <= 1.0 {
        e1_series(x)
    } else {
        e1_continued_fraction(x)
    }
}

fn e1_series(x: f64) -> f64 {
    let mut total = -x.ln() - EULER;
    let mut fact = 1.0;
    for i in 1..=MAX_ITER {
        fact *= -x / i as f64;
        let del = -fact / i as f64;
        total += del;
        if del.abs() < total.abs() * EPS {
            break;
        }
    }
    total
}

/// Modified Lentz evaluation of the continued fraction for E1, valid for `x > 1`.
fn e1_continued_fraction(x: f64) -> f64 {
    let mut b = x + 1.0;
    let mut c = 1.0 / FPMIN;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=MAX_ITER {
        let a = -((i * i) as f64);
        b += 2.0;
        d = 1.0 / (a * d + b);
        c = b + a / c;
        let del = c * d;
        h *= del;
        if (del - 1.0).abs() < EPS {
            break;
        }
    }
    h * (-x).exp()
}

fn ei_positive(x: f64) -> f64 {
    if x.is_infinite() {
        return f64::INFINITY;
    }
    if x < FPMIN {
        return x.ln() + EULER;
    }
    // -ln(EPS): beyond this the asymptotic series converges faster than the power series
    if x <= 52.0 * LN_2 {
        let mut sum = 0.0;
        let mut fact = 1.0;
        for k in 1..=MAX_ITER {
            fact *= x / k as f64;
            let term = fact / k as f64;
            sum += term;
            if term < EPS * sum {
                break;
            }
        }
        return sum + x.ln() + EULER;
    }
    let mut sum = 0.0;
    let mut term = 1.0;
    for k in 1..=MAX_ITER {
        let prev = term;
        term *= k as f64 / x;
        if term < EPS {
            break;
        }
        if term < prev {
            sum += term;
        } else {
            sum -= prev;
            break;
        }
    }
    // split e^x so Ei stays finite up to its own overflow near x = 716.9
    let half = (x / 2.0).exp();
    half * (half * (1.0 + sum) / x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn expi_negative_matches_reference_values() {
        let cases = [
            (-0.01, -4.037_929_576_538_114),
            (-0.5, -0.559_773_594_776_160_8),
            (-1.0, -0.219_383_934_395_520_27),
            (-2.0, -0.048_900_510_708_061_12),
            (-10.0, -4.156_968_929_685_324e-6),
        ];
        for (x, expected) in cases {
            assert_relative_eq!(expi(x), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn expi_positive_matches_reference_values() {
        assert_relative_eq!(expi(1.0), 1.895_117_816_355_936_8, max_relative = 1e-12);
        assert_relative_eq!(expi(2.0), 4.954_234_356_001_890, max_relative = 1e-12);
        assert_relative_eq!(expi(50.0), 1.058_563_689_713_169e20, max_relative = 1e-10);
    }

    #[test]
    fn expi_stays_finite_close_to_overflow() {
        assert_relative_eq!(expi(700.0), 1.450_978_736_052_560_9e301, max_relative = 1e-12);
        assert_relative_eq!(expi(710.0), 3.150_915_688_206_201e305, max_relative = 1e-12);
        assert_relative_eq!(expi(715.0), 4.643_625_670_370_571e307, max_relative = 1e-12);
        assert_eq!(expi(717.0), f64::INFINITY);
    }

    #[test]
    fn branches_agree_at_the_switch_point() {
        let below = exp1(1.0);
        let above = e1_continued_fraction(1.0 + 1e-12);
        assert_relative_eq!(below, above, max_relative = 1e-10);
    }

    #[test]
    fn edge_values() {
        assert_eq!(expi(0.0), f64::NEG_INFINITY);
        assert_eq!(expi(f64::NEG_INFINITY), 0.0);
        assert_eq!(expi(f64::INFINITY), f64::INFINITY);
        assert!(expi(f64::NAN).is_nan());

        assert_eq!(exp1(0.0), f64::INFINITY);
        assert_eq!(exp1(f64::INFINITY), 0.0);
        assert!(exp1(-1.0).is_nan());
    }

    #[test]
    fn large_negative_argument_underflows_to_zero() {
        let value = expi(-800.0);
        assert!(value <= 0.0);
        assert!(value.abs() < 1e-300);
    }
}
