//! Commitment, opening and verification operations on [`KzgSettings`].
//!
//! See the paper [Constant-Size Commitments to Polynomials and Their
//! Applications](https://www.iacr.org/archive/asiacrypt2010/6477178/6477178.pdf)
//! for the theoretical background.

use alloc::vec::Vec;

use da_bn254::{pairings_verify, Field, Fr, G1, G2};

use crate::params::{KzgError, KzgSettings};
use crate::poly::Poly;

impl KzgSettings {
    /// Commit to a polynomial: `C = Σ pᵢ · [sⁱ]₁`, via multi-scalar
    /// multiplication.
    ///
    /// The zero polynomial commits to the G1 identity. Fails when the
    /// polynomial has more coefficients than the setup covers.
    pub fn commit_to_poly(&self, p: &Poly) -> Result<G1, KzgError> {
        if p.len() > self.length() {
            return Err(KzgError::PolyTooLong {
                length: p.len(),
                max: self.length(),
            });
        }
        Ok(G1::multi_exp(&self.secret_g1[..p.len()], &p.coeffs))
    }

    /// Opening proof for `p` at the single point `x0`: the commitment to
    /// `p(x) / (x - x0)`.
    ///
    /// The special case of [`Self::compute_proof_multi`] with a one-element
    /// "coset".
    pub fn compute_proof_single(&self, p: &Poly, x0: Fr) -> Result<G1, KzgError> {
        self.compute_proof_multi(p, x0, 1)
    }

    /// Verify the claim `p(x) = y` against a commitment and an opening proof:
    ///
    /// `e(C − [y]₁, G₂) = e(π, [s]₂ − [x]₂)`
    pub fn check_proof_single(
        &self,
        commitment: &G1,
        proof: &G1,
        x: Fr,
        y: Fr,
    ) -> Result<bool, KzgError> {
        if self.length() < 2 {
            return Err(KzgError::SetupTooShort {
                length: self.length(),
                required: 2,
            });
        }

        let s_minus_x = self.secret_g2[1] - G2::generator().mul_scalar(x);
        let commitment_minus_y = *commitment - G1::generator().mul_scalar(y);

        Ok(pairings_verify(
            commitment_minus_y,
            G2::generator(),
            *proof,
            s_minus_x,
        ))
    }

    /// Combined opening proof for `p` at the `n` points `x0·ωⁱ`, `ω` the
    /// `n`-th root of unity: the commitment to `p(x) / (xⁿ − x0ⁿ)`.
    ///
    /// One such proof covers a whole data-availability sample. `n` must be a
    /// power of two.
    pub fn compute_proof_multi(&self, p: &Poly, x0: Fr, n: usize) -> Result<G1, KzgError> {
        if !n.is_power_of_two() {
            return Err(KzgError::NotPowerOfTwo(n));
        }

        // Divisor: xⁿ - x0ⁿ = (x - x0·ω⁰)(x - x0·ω¹)...(x - x0·ωⁿ⁻¹)
        let mut divisor = Vec::with_capacity(n + 1);
        divisor.push(-x0.pow_vartime([n as u64]));
        for _ in 1..n {
            divisor.push(Fr::ZERO);
        }
        divisor.push(Fr::ONE);

        let q = p.long_div(&Poly::new(divisor))?;
        self.commit_to_poly(&q)
    }

    /// Verify the claims `p(x0·ωⁱ) = ys[i]` for `i < ys.len()` against a
    /// commitment and a combined opening proof.
    ///
    /// Interpolates the claimed values over the coset and checks
    ///
    /// `e(C − [I(s)]₁, G₂) = e(π, [sⁿ]₂ − [x0ⁿ]₂)`
    ///
    /// `ys.len()` must be a power of two no larger than the FFT domain, and
    /// the setup must reach `[sⁿ]₂`.
    pub fn check_proof_multi(
        &self,
        commitment: &G1,
        proof: &G1,
        x0: Fr,
        ys: &[Fr],
    ) -> Result<bool, KzgError> {
        let n = ys.len();
        if !n.is_power_of_two() {
            return Err(KzgError::NotPowerOfTwo(n));
        }
        if n >= self.length() {
            return Err(KzgError::SetupTooShort {
                length: self.length(),
                required: n + 1,
            });
        }

        // Interpolation over the subgroup of order n...
        let mut interp = Poly::new(self.fft.fft_fr(ys, true)?);

        // ...rescaled onto the coset: the evaluation points are x0·ωⁱ, so
        // coefficient i picks up a factor x0⁻ⁱ.
        let inv_x: Fr = Option::from(x0.invert()).ok_or(KzgError::ZeroCosetGenerator)?;
        let mut inv_x_pow = inv_x;
        for i in 1..n {
            interp.coeffs[i] *= inv_x_pow;
            inv_x_pow *= inv_x;
        }

        // [x0ⁿ]₂ and [sⁿ - x0ⁿ]₂
        let x_pow_n = x0.pow_vartime([n as u64]);
        let xn2 = G2::generator().mul_scalar(x_pow_n);
        let xn_minus_yn = self.secret_g2[n] - xn2;

        // [C - I(s)]₁
        let interp_commitment = self.commit_to_poly(&interp)?;
        let commit_minus_interp = *commitment - interp_commitment;

        Ok(pairings_verify(
            commit_minus_interp,
            G2::generator(),
            *proof,
            xn_minus_yn,
        ))
    }
}
