use alloc::vec;
use alloc::vec::Vec;

use da_bn254::{Field, Fr};
use serde::{Deserialize, Serialize};

use crate::params::KzgError;

/// Dense univariate polynomial over the scalar field.
///
/// `coeffs[i]` is the coefficient of `xⁱ`; the empty coefficient vector is
/// the zero polynomial.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poly {
    pub coeffs: Vec<Fr>,
}

impl Poly {
    pub fn new(coeffs: Vec<Fr>) -> Self {
        Self { coeffs }
    }

    /// Convenience constructor from small integer coefficients.
    pub fn from_u64(coeffs: &[u64]) -> Self {
        Self {
            coeffs: coeffs.iter().map(|&c| Fr::from(c)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// True if every coefficient is zero (the empty polynomial included).
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| bool::from(c.is_zero()))
    }

    /// Evaluate at `x` by Horner's rule. The zero polynomial evaluates to 0.
    pub fn eval(&self, x: Fr) -> Fr {
        self.coeffs
            .iter()
            .rev()
            .fold(Fr::ZERO, |acc, &c| acc * x + c)
    }

    /// Quotient of dense long division by `divisor`; the remainder is
    /// discarded.
    ///
    /// The commitment engine divides by the monic zeroing polynomials
    /// `x − x₀` and `xⁿ − x₀ⁿ`, whose remainder is exactly the interpolation
    /// polynomial through the opened points and is reconstructed on the
    /// verifier side, so it is never materialised here.
    ///
    /// Fails with [`KzgError::ZeroDivisor`] when `divisor` is empty or the
    /// zero polynomial. When the dividend has fewer coefficients than the
    /// divisor the quotient is the zero polynomial; otherwise it has
    /// `self.len() - divisor.len() + 1` coefficients.
    pub fn long_div(&self, divisor: &Poly) -> Result<Poly, KzgError> {
        // Trailing zero coefficients carry no degree; the division runs
        // against the true leading coefficient.
        let b_pos = divisor
            .coeffs
            .iter()
            .rposition(|c| !bool::from(c.is_zero()))
            .ok_or(KzgError::ZeroDivisor)?;

        if self.len() < b_pos + 1 {
            return Ok(Poly::default());
        }

        let leading_inv: Fr =
            Option::from(divisor.coeffs[b_pos].invert()).ok_or(KzgError::ZeroDivisor)?;

        let mut a = self.coeffs.clone();
        let mut a_pos = self.len() - 1;
        let mut diff = a_pos - b_pos;
        let mut out = vec![Fr::ZERO; diff + 1];

        loop {
            out[diff] = a[a_pos] * leading_inv;
            for i in 0..=b_pos {
                a[diff + i] -= out[diff] * divisor.coeffs[i];
            }
            if diff == 0 {
                break;
            }
            diff -= 1;
            a_pos -= 1;
        }

        Ok(Poly::new(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_known_values() {
        // p(x) = 1 + 2x + 3x²
        let p = Poly::from_u64(&[1, 2, 3]);
        assert_eq!(p.eval(Fr::ZERO), Fr::ONE);
        assert_eq!(p.eval(Fr::ONE), Fr::from(6));
        // p(5) = 1 + 10 + 75
        assert_eq!(p.eval(Fr::from(5)), Fr::from(86));
    }

    #[test]
    fn eval_zero_poly_is_zero() {
        let p = Poly::default();
        assert!(p.is_zero());
        assert_eq!(p.eval(Fr::from(123)), Fr::ZERO);
    }

    #[test]
    fn long_div_by_linear_factor() {
        // (x - 5)(x² + 3x + 7) = x³ - 2x² - 8x - 35
        let product = Poly::new(vec![
            -Fr::from(35),
            -Fr::from(8),
            -Fr::from(2),
            Fr::ONE,
        ]);
        let divisor = Poly::new(vec![-Fr::from(5), Fr::ONE]);

        let q = product.long_div(&divisor).unwrap();
        assert_eq!(q, Poly::from_u64(&[7, 3, 1]));
    }

    #[test]
    fn long_div_short_dividend_gives_zero() {
        let p = Poly::from_u64(&[1, 2]);
        let divisor = Poly::from_u64(&[1, 0, 0, 1]);
        let q = p.long_div(&divisor).unwrap();
        assert!(q.is_zero());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn long_div_by_zero_poly_fails() {
        let p = Poly::from_u64(&[1, 2, 3]);
        assert_eq!(
            p.long_div(&Poly::default()).unwrap_err(),
            KzgError::ZeroDivisor
        );
        assert_eq!(
            p.long_div(&Poly::from_u64(&[0, 0])).unwrap_err(),
            KzgError::ZeroDivisor
        );
    }

    #[test]
    fn long_div_quotient_length() {
        let p = Poly::from_u64(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let divisor = Poly::from_u64(&[9, 0, 0, 1]);
        let q = p.long_div(&divisor).unwrap();
        assert_eq!(q.len(), p.len() - divisor.len() + 1);
    }

    #[test]
    fn long_div_recombines() {
        // q·d + r = p, with deg r < deg d; spot-check q against a hand
        // recomputation of the leading terms.
        let p = Poly::from_u64(&[3, 1, 4, 1, 5, 9, 2, 6]);
        let d = Poly::from_u64(&[2, 7, 1]);
        let q = p.long_div(&d).unwrap();

        // Leading coefficient of q equals leading coefficient of p.
        assert_eq!(q.coeffs[q.len() - 1], Fr::from(6));
        // p - q·d has degree < deg d.
        let mut qd = vec![Fr::ZERO; q.len() + d.len() - 1];
        for (i, qc) in q.coeffs.iter().enumerate() {
            for (j, dc) in d.coeffs.iter().enumerate() {
                qd[i + j] += *qc * *dc;
            }
        }
        for k in d.len() - 1..p.len() {
            assert_eq!(qd[k], p.coeffs[k]);
        }
    }
}
