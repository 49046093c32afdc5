//! FK20 batched opening proofs.
//!
//! The Feist–Khovratovich technique computes every opening proof of a
//! polynomial over a power-of-two evaluation domain in `O(n log n)` group
//! operations. The quotient coefficients behind the proofs form
//! Toeplitz-matrix-times-setup-vector products; each Toeplitz matrix embeds
//! into a circulant of twice the size, and a circulant product diagonalises
//! under the FFT:
//!
//! `T·v = first half of IFFT( FFT(t) ∘ FFT(v ‖ 0) )`
//!
//! The setup-side transforms (`FFT(v ‖ 0)`, over G1) only depend on the
//! trusted setup and are precomputed once in the settings constructors; each
//! batch invocation pays one scalar FFT per Toeplitz column plus two G1
//! transforms.
//!
//! [`Fk20SingleSettings`] produces the `2n` single-point proofs of a length-n
//! polynomial; [`Fk20MultiSettings`] produces one combined proof per disjoint
//! coset of size `chunk_len`.

use alloc::vec;
use alloc::vec::Vec;

use da_bn254::{Field, Fr, G1};

use crate::fft::{reverse_bit_order, FftSettings};
use crate::params::{KzgError, KzgSettings};
use crate::poly::Poly;

/// Output ordering of a batch of proofs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProofOrder {
    /// Proof `j` opens the `j`-th root of unity (or, for the multi engine,
    /// the coset generated by it).
    Natural,
    /// The natural sequence permuted into reverse-bit order, the layout used
    /// by data-availability sampling.
    BitReversed,
}

/// Precomputed artefacts for batched single-point proofs over a domain of
/// width `n2 = 2n`.
#[derive(Clone, Debug)]
pub struct Fk20SingleSettings {
    pub ks: KzgSettings,
    /// Domain width; the number of proofs produced per batch.
    pub n2: usize,
    /// `FFT_g1` of the extended setup vector, length `n2`.
    pub x_ext_fft: Vec<G1>,
}

impl Fk20SingleSettings {
    /// `n2` must be a power of two, at least 2 and no wider than the FFT
    /// domain of `ks`.
    pub fn new(n2: usize, ks: KzgSettings) -> Result<Self, KzgError> {
        if !n2.is_power_of_two() {
            return Err(KzgError::NotPowerOfTwo(n2));
        }
        if n2 < 2 {
            return Err(KzgError::DomainTooSmall(n2));
        }
        if n2 > ks.fft.max_width {
            return Err(KzgError::WidthExceeded {
                length: n2,
                max_width: ks.fft.max_width,
            });
        }

        let n = n2 / 2;

        // The setup column of the Toeplitz product: descending powers
        // [s^(n-2)]₁ ... [s⁰]₁, closed with the identity.
        let mut x = Vec::with_capacity(n);
        for i in 0..n - 1 {
            x.push(ks.secret_g1[n - 2 - i]);
        }
        x.push(G1::identity());

        let x_ext_fft = toeplitz_part_1(&x, &ks.fft)?;

        Ok(Self { ks, n2, x_ext_fft })
    }

    /// All `2n` single-point opening proofs for `p`, where `n = p.len()`:
    /// proof `j` opens `p` at the `j`-th `2n`-th root of unity (before the
    /// optional reordering).
    ///
    /// `p.len()` must be a power of two equal to `n2 / 2`: the precomputed
    /// setup transform is taken over the width-`n2` domain, so a polynomial
    /// of any other length cannot be served by it.
    pub fn data_availability(&self, p: &Poly, order: ProofOrder) -> Result<Vec<G1>, KzgError> {
        let n = p.len();
        let n2 = n * 2;

        if !n.is_power_of_two() {
            return Err(KzgError::NotPowerOfTwo(n));
        }
        if n2 != self.n2 {
            return Err(KzgError::LengthMismatch {
                length: n,
                expected: self.n2 / 2,
            });
        }

        let toeplitz_coeffs = toeplitz_coeffs_stride(p, 0, 1);
        let h_ext_fft = toeplitz_part_2(&toeplitz_coeffs, &self.x_ext_fft, &self.ks.fft)?;
        let h = toeplitz_part_3(&h_ext_fft, &self.ks.fft)?;

        let mut out = self.ks.fft.fft_g1(&h, false)?;
        if order == ProofOrder::BitReversed {
            reverse_bit_order(&mut out)?;
        }
        Ok(out)
    }
}

/// Precomputed artefacts for batched coset proofs: one combined proof per
/// disjoint coset of `chunk_len` points, `n2 / (2·chunk_len)` cosets per
/// half-domain.
#[derive(Clone, Debug)]
pub struct Fk20MultiSettings {
    pub ks: KzgSettings,
    /// Domain width (twice the polynomial length the settings serve).
    pub n2: usize,
    /// Coset size.
    pub chunk_len: usize,
    /// One extended-setup FFT per Toeplitz column offset, each of length
    /// `2·chunk_count`.
    pub x_ext_fft_files: Vec<Vec<G1>>,
}

impl Fk20MultiSettings {
    /// `n2` and `chunk_len` must be powers of two with
    /// `chunk_len ≤ n2/2 ≤ fft.max_width/2`.
    pub fn new(n2: usize, chunk_len: usize, ks: KzgSettings) -> Result<Self, KzgError> {
        if !n2.is_power_of_two() {
            return Err(KzgError::NotPowerOfTwo(n2));
        }
        if n2 < 2 {
            return Err(KzgError::DomainTooSmall(n2));
        }
        if n2 > ks.fft.max_width {
            return Err(KzgError::WidthExceeded {
                length: n2,
                max_width: ks.fft.max_width,
            });
        }
        if !chunk_len.is_power_of_two() {
            return Err(KzgError::NotPowerOfTwo(chunk_len));
        }
        if chunk_len > n2 / 2 {
            return Err(KzgError::BadChunkLength { chunk_len, n2 });
        }

        let n = n2 / 2;
        let k = n / chunk_len;

        // One setup column per offset into the chunk. Column `offset` reads
        // the setup backwards at stride `chunk_len`, starting from
        // [s^(n - chunk_len - 1 - offset)]₁, and closes with the identity.
        let mut x_ext_fft_files = Vec::with_capacity(chunk_len);
        for offset in 0..chunk_len {
            let mut x = Vec::with_capacity(k);
            for i in 0..k - 1 {
                x.push(ks.secret_g1[n - chunk_len - 1 - offset - i * chunk_len]);
            }
            x.push(G1::identity());
            x_ext_fft_files.push(toeplitz_part_1(&x, &ks.fft)?);
        }

        Ok(Self {
            ks,
            n2,
            chunk_len,
            x_ext_fft_files,
        })
    }

    /// Number of cosets per half-domain; the batch produces twice this many
    /// proofs.
    pub fn chunk_count(&self) -> usize {
        self.n2 / (2 * self.chunk_len)
    }

    /// The `2·chunk_count` combined coset proofs for `p`: proof `c` opens the
    /// size-`chunk_len` coset generated by the `c`-th `2n`-th root of unity
    /// (before the optional reordering).
    ///
    /// `p.len()` must be the polynomial length the settings were built for,
    /// `n2 / 2`.
    pub fn data_availability(&self, p: &Poly, order: ProofOrder) -> Result<Vec<G1>, KzgError> {
        let n = p.len();

        if !n.is_power_of_two() {
            return Err(KzgError::NotPowerOfTwo(n));
        }
        if n * 2 != self.n2 {
            return Err(KzgError::LengthMismatch {
                length: n,
                expected: self.n2 / 2,
            });
        }

        let k = n / self.chunk_len;
        let k2 = k * 2;

        // Accumulate the circulant products of all chunk_len columns in the
        // frequency domain; one inverse transform then serves them all.
        let mut h_ext_fft = vec![G1::identity(); k2];
        for offset in 0..self.chunk_len {
            let toeplitz_coeffs = toeplitz_coeffs_stride(p, offset, self.chunk_len);
            let h_ext_fft_file = toeplitz_part_2(
                &toeplitz_coeffs,
                &self.x_ext_fft_files[offset],
                &self.ks.fft,
            )?;
            for (acc, term) in h_ext_fft.iter_mut().zip(&h_ext_fft_file) {
                *acc += *term;
            }
        }

        let h = toeplitz_part_3(&h_ext_fft, &self.ks.fft)?;

        let mut out = self.ks.fft.fft_g1(&h, false)?;
        if order == ProofOrder::BitReversed {
            reverse_bit_order(&mut out)?;
        }
        Ok(out)
    }
}

/// Setup-side half of the circulant product: extend the column with
/// identities to twice its length and transform. Run once per settings
/// constructor.
fn toeplitz_part_1(x: &[G1], fft: &FftSettings) -> Result<Vec<G1>, KzgError> {
    let n2 = x.len() * 2;
    let mut x_ext = Vec::with_capacity(n2);
    x_ext.extend_from_slice(x);
    x_ext.resize(n2, G1::identity());
    fft.fft_g1(&x_ext, false)
}

/// Polynomial-side half: transform the Toeplitz coefficients and multiply
/// pointwise into the precomputed setup transform.
fn toeplitz_part_2(
    coeffs: &Poly,
    x_ext_fft: &[G1],
    fft: &FftSettings,
) -> Result<Vec<G1>, KzgError> {
    let coeffs_fft = fft.fft_fr(&coeffs.coeffs, false)?;
    Ok(coeffs_fft
        .iter()
        .zip(x_ext_fft)
        .map(|(c, x)| x.mul_scalar(*c))
        .collect())
}

/// Back to the time domain. Only the lower half of the circulant product is
/// the Toeplitz product; the upper half is re-padded with the identity so the
/// result can feed the final proof transform directly.
fn toeplitz_part_3(h_ext_fft: &[G1], fft: &FftSettings) -> Result<Vec<G1>, KzgError> {
    let n = h_ext_fft.len() / 2;
    let mut h = fft.fft_g1(h_ext_fft, true)?;
    for p in h.iter_mut().skip(n) {
        *p = G1::identity();
    }
    Ok(h)
}

/// The length-`2k` coefficient vector of the Toeplitz column of `p` at
/// `offset`, read at the given stride (`k = p.len() / stride`): the column's
/// leading coefficient, a zero block, then the strided tail.
fn toeplitz_coeffs_stride(p: &Poly, offset: usize, stride: usize) -> Poly {
    let n = p.len();
    let k = n / stride;
    let k2 = k * 2;

    let mut out = vec![Fr::ZERO; k2];
    out[0] = p.coeffs[n - 1 - offset];
    let mut j = 2 * stride - offset - 1;
    for i in (k + 2)..k2 {
        out[i] = p.coeffs[j];
        j += stride;
    }
    Poly::new(out)
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::params::generate_trusted_setup;

    fn test_kzg_settings(scale: u32, secrets_len: usize) -> KzgSettings {
        let (s1, s2) = generate_trusted_setup(Fr::from(8927347823478352432u64), secrets_len);
        let fs = FftSettings::new(scale).unwrap();
        KzgSettings::new(&s1, &s2, fs).unwrap()
    }

    fn random_poly(len: usize, rng: &mut SmallRng) -> Poly {
        Poly::new((0..len).map(|_| Fr::from(rng.random::<u64>())).collect())
    }

    #[test]
    fn toeplitz_coeffs_layout() {
        // p = [1..8], stride 1: [p7, 0 x 9, p1..p6]
        let p = Poly::from_u64(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let t = toeplitz_coeffs_stride(&p, 0, 1);

        assert_eq!(t.len(), 16);
        assert_eq!(t.coeffs[0], Fr::from(8));
        for i in 1..=9 {
            assert_eq!(t.coeffs[i], Fr::ZERO);
        }
        for i in 10..16 {
            assert_eq!(t.coeffs[i], Fr::from(i as u64 - 8));
        }

        // stride 4, offset 1: k = 2, so only the leading entry survives
        let t = toeplitz_coeffs_stride(&p, 1, 4);
        assert_eq!(t.len(), 4);
        assert_eq!(t.coeffs[0], Fr::from(7));
        assert_eq!(t.coeffs[1], Fr::ZERO);
        assert_eq!(t.coeffs[2], Fr::ZERO);
        assert_eq!(t.coeffs[3], Fr::ZERO);
    }

    #[test]
    fn circulant_product_matches_naive() {
        // The FFT pipeline (part 1 + part 2 + inverse transform) computes a
        // circulant-matrix-times-vector product over G1. Check it against the
        // O(n²) definition: out[i] = Σ_j t[(i - j) mod m] · v[j].
        let fs = FftSettings::new(3).unwrap();
        let g = G1::generator();
        let mut rng = SmallRng::seed_from_u64(11);

        let t: Vec<Fr> = (0..8).map(|_| Fr::from(rng.random::<u64>())).collect();
        let v: Vec<G1> = (0..4)
            .map(|_| g.mul_scalar(Fr::from(rng.random::<u64>())))
            .collect();

        let x_ext_fft = toeplitz_part_1(&v, &fs).unwrap();
        let h_ext_fft = toeplitz_part_2(&Poly::new(t.clone()), &x_ext_fft, &fs).unwrap();
        let h_ext = fs.fft_g1(&h_ext_fft, true).unwrap();

        let m = 8;
        for i in 0..m {
            let mut naive = G1::identity();
            for (j, point) in v.iter().enumerate() {
                naive += point.mul_scalar(t[(m + i - j) % m]);
            }
            assert_eq!(h_ext[i], naive, "row {i}");
        }
    }

    #[test]
    fn fk20_single_matches_pointwise_proofs() {
        // Scale 5: 16 coefficients, 32 proofs, one per 32nd root of unity.
        let poly_len = 16;
        let n2 = 2 * poly_len;
        let ks = test_kzg_settings(5, n2 + 1);
        let fk = Fk20SingleSettings::new(n2, ks.clone()).unwrap();

        let mut rng = SmallRng::seed_from_u64(13);
        let p = random_poly(poly_len, &mut rng);
        let commitment = ks.commit_to_poly(&p).unwrap();

        let proofs = fk.data_availability(&p, ProofOrder::Natural).unwrap();
        assert_eq!(proofs.len(), n2);

        for (j, proof) in proofs.iter().enumerate() {
            let x = ks.fft.expanded_roots_of_unity[j];
            assert_eq!(
                *proof,
                ks.compute_proof_single(&p, x).unwrap(),
                "proof {j}"
            );
            let y = p.eval(x);
            assert!(ks.check_proof_single(&commitment, proof, x, y).unwrap());
        }
    }

    #[test]
    fn fk20_single_orderings_are_permutations() {
        let poly_len = 8;
        let n2 = 2 * poly_len;
        let ks = test_kzg_settings(4, n2 + 1);
        let fk = Fk20SingleSettings::new(n2, ks).unwrap();

        let mut rng = SmallRng::seed_from_u64(17);
        let p = random_poly(poly_len, &mut rng);

        let natural = fk.data_availability(&p, ProofOrder::Natural).unwrap();
        let mut expected = natural.clone();
        reverse_bit_order(&mut expected).unwrap();
        let reversed = fk.data_availability(&p, ProofOrder::BitReversed).unwrap();
        assert_eq!(reversed, expected);
    }

    #[test]
    fn fk20_single_rejects_bad_sizes() {
        let ks = test_kzg_settings(4, 17);
        assert_eq!(
            Fk20SingleSettings::new(12, ks.clone()).unwrap_err(),
            KzgError::NotPowerOfTwo(12)
        );
        assert_eq!(
            Fk20SingleSettings::new(32, ks.clone()).unwrap_err(),
            KzgError::WidthExceeded {
                length: 32,
                max_width: 16
            }
        );

        let fk = Fk20SingleSettings::new(16, ks).unwrap();
        let p = Poly::from_u64(&[1, 2, 3]);
        assert_eq!(
            fk.data_availability(&p, ProofOrder::Natural).unwrap_err(),
            KzgError::NotPowerOfTwo(3)
        );
        // A shorter polynomial is rejected too: its coefficient transform
        // would live on a narrower domain than the precomputed setup FFT.
        let p = Poly::from_u64(&[1, 2, 3, 4]);
        assert_eq!(
            fk.data_availability(&p, ProofOrder::Natural).unwrap_err(),
            KzgError::LengthMismatch {
                length: 4,
                expected: 8
            }
        );
        let p = Poly::from_u64(&[1; 16]);
        assert_eq!(
            fk.data_availability(&p, ProofOrder::Natural).unwrap_err(),
            KzgError::LengthMismatch {
                length: 16,
                expected: 8
            }
        );
    }

    #[test]
    fn fk20_multi_degenerate_single_chunk() {
        // Scale 5, chunk_len 16: one chunk, two cosets, two proofs. With the
        // polynomial no longer than a chunk both quotients vanish, so the
        // engine and the pointwise baseline must agree on identity proofs
        // that still verify.
        let poly_len = 16;
        let n2 = 2 * poly_len;
        let chunk_len = 16;
        let ks = test_kzg_settings(5, n2 + 1);
        let fk = Fk20MultiSettings::new(n2, chunk_len, ks.clone()).unwrap();
        assert_eq!(fk.chunk_count(), 1);

        let mut rng = SmallRng::seed_from_u64(19);
        let p = random_poly(poly_len, &mut rng);
        let commitment = ks.commit_to_poly(&p).unwrap();

        let proofs = fk.data_availability(&p, ProofOrder::Natural).unwrap();
        assert_eq!(proofs.len(), 2);

        let omega_coset = ks.fft.expanded_roots_of_unity[ks.fft.max_width / chunk_len];
        for (c, proof) in proofs.iter().enumerate() {
            let x0 = ks.fft.expanded_roots_of_unity[c * ks.fft.max_width / n2];
            assert_eq!(
                *proof,
                ks.compute_proof_multi(&p, x0, chunk_len).unwrap(),
                "coset {c}"
            );

            let ys: Vec<Fr> = (0..chunk_len)
                .map(|i| p.eval(x0 * omega_coset.pow_vartime([i as u64])))
                .collect();
            assert!(ks.check_proof_multi(&commitment, proof, x0, &ys).unwrap());
        }
    }

    #[test]
    fn fk20_multi_matches_pointwise_proofs() {
        // Scale 5, chunk_len 4: 8 cosets of 4 points each covering the 32
        // evaluation points.
        let poly_len = 16;
        let n2 = 2 * poly_len;
        let chunk_len = 4;
        let ks = test_kzg_settings(5, n2 + 1);
        let fk = Fk20MultiSettings::new(n2, chunk_len, ks.clone()).unwrap();
        assert_eq!(fk.chunk_count(), 4);

        let mut rng = SmallRng::seed_from_u64(23);
        let p = random_poly(poly_len, &mut rng);
        let commitment = ks.commit_to_poly(&p).unwrap();

        let proofs = fk.data_availability(&p, ProofOrder::Natural).unwrap();
        assert_eq!(proofs.len(), 8);

        // ω for the coset members: the (chunk_len)-th root within the width-32
        // domain.
        let omega_coset = ks.fft.expanded_roots_of_unity[ks.fft.max_width / chunk_len];
        for (c, proof) in proofs.iter().enumerate() {
            let x0 = ks.fft.expanded_roots_of_unity[c * ks.fft.max_width / n2];
            assert_eq!(
                *proof,
                ks.compute_proof_multi(&p, x0, chunk_len).unwrap(),
                "coset {c}"
            );

            let ys: Vec<Fr> = (0..chunk_len)
                .map(|i| p.eval(x0 * omega_coset.pow_vartime([i as u64])))
                .collect();
            assert!(ks.check_proof_multi(&commitment, proof, x0, &ys).unwrap());
        }
    }

    #[test]
    fn fk20_multi_orderings_are_permutations() {
        let poly_len = 16;
        let n2 = 2 * poly_len;
        let ks = test_kzg_settings(5, n2 + 1);
        let fk = Fk20MultiSettings::new(n2, 4, ks).unwrap();

        let mut rng = SmallRng::seed_from_u64(29);
        let p = random_poly(poly_len, &mut rng);

        let natural = fk.data_availability(&p, ProofOrder::Natural).unwrap();
        let mut expected = natural.clone();
        reverse_bit_order(&mut expected).unwrap();
        let reversed = fk.data_availability(&p, ProofOrder::BitReversed).unwrap();
        assert_eq!(reversed, expected);
    }

    #[test]
    fn fk20_multi_rejects_bad_sizes() {
        let ks = test_kzg_settings(5, 33);
        assert_eq!(
            Fk20MultiSettings::new(32, 3, ks.clone()).unwrap_err(),
            KzgError::NotPowerOfTwo(3)
        );
        assert_eq!(
            Fk20MultiSettings::new(32, 32, ks.clone()).unwrap_err(),
            KzgError::BadChunkLength {
                chunk_len: 32,
                n2: 32
            }
        );
        assert_eq!(
            Fk20MultiSettings::new(64, 4, ks.clone()).unwrap_err(),
            KzgError::WidthExceeded {
                length: 64,
                max_width: 32
            }
        );

        let fk = Fk20MultiSettings::new(32, 4, ks).unwrap();
        let p = Poly::from_u64(&[1; 8]);
        assert_eq!(
            fk.data_availability(&p, ProofOrder::Natural).unwrap_err(),
            KzgError::LengthMismatch {
                length: 8,
                expected: 16
            }
        );
    }
}
