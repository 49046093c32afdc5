use alloc::vec;
use alloc::vec::Vec;

use da_bn254::{Field, Fr, PrimeField, G1};
use serde::{Deserialize, Serialize};

use crate::params::KzgError;

/// Precomputed FFT domain of width `2^scale`.
///
/// The same tables drive the transforms over the scalar field and over G1:
/// a transform of length `n ≤ max_width` walks the tables at stride
/// `max_width / n`, so one settings value serves every power-of-two size up
/// to its width.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FftSettings {
    /// Domain width, `2^scale`.
    pub max_width: usize,
    /// `ωⁱ` for `i = 0..=max_width`; periodic, closes with `ω^max_width = 1`.
    pub expanded_roots_of_unity: Vec<Fr>,
    /// The same powers in reverse order, i.e. powers of `ω⁻¹`; drives the
    /// inverse transforms.
    pub reverse_roots_of_unity: Vec<Fr>,
    /// The first `max_width` powers in bit-reversed order.
    pub roots_of_unity: Vec<Fr>,
}

impl FftSettings {
    /// Build the tables for a domain of width `2^scale`.
    ///
    /// The primitive root is derived from the field's `2^28` root of unity,
    /// so `scale` may not exceed 28.
    pub fn new(scale: u32) -> Result<Self, KzgError> {
        if scale > Fr::S {
            return Err(KzgError::ScaleTooLarge { scale, max: Fr::S });
        }
        let max_width = 1usize << scale;

        let mut root = Fr::ROOT_OF_UNITY;
        for _ in scale..Fr::S {
            root = root.square();
        }

        let mut expanded_roots_of_unity = Vec::with_capacity(max_width + 1);
        expanded_roots_of_unity.push(Fr::ONE);
        for i in 1..=max_width {
            expanded_roots_of_unity.push(expanded_roots_of_unity[i - 1] * root);
        }
        if expanded_roots_of_unity[max_width] != Fr::ONE {
            return Err(KzgError::InconsistentDomain);
        }

        let reverse_roots_of_unity: Vec<Fr> =
            expanded_roots_of_unity.iter().rev().copied().collect();

        let mut roots_of_unity = expanded_roots_of_unity[..max_width].to_vec();
        reverse_bit_order(&mut roots_of_unity)?;

        Ok(Self {
            max_width,
            expanded_roots_of_unity,
            reverse_roots_of_unity,
            roots_of_unity,
        })
    }

    /// Table stride for a transform of length `n`.
    fn stride_for(&self, n: usize) -> Result<usize, KzgError> {
        if !n.is_power_of_two() {
            return Err(KzgError::NotPowerOfTwo(n));
        }
        if n > self.max_width {
            return Err(KzgError::WidthExceeded {
                length: n,
                max_width: self.max_width,
            });
        }
        Ok(self.max_width / n)
    }

    /// Radix-2 FFT (or inverse FFT) over the scalar field.
    ///
    /// `input.len()` must be a power of two no larger than `max_width`. The
    /// output has the same length, and the transforms are mutually inverse.
    pub fn fft_fr(&self, input: &[Fr], inverse: bool) -> Result<Vec<Fr>, KzgError> {
        let n = input.len();
        let stride = self.stride_for(n)?;

        let mut out = vec![Fr::ZERO; n];
        if inverse {
            fft_fr_fast(&mut out, input, 1, &self.reverse_roots_of_unity, stride);
            let inv_len: Fr =
                Option::from(Fr::from(n as u64).invert()).ok_or(KzgError::InconsistentDomain)?;
            for x in &mut out {
                *x *= inv_len;
            }
        } else {
            fft_fr_fast(&mut out, input, 1, &self.expanded_roots_of_unity, stride);
        }
        Ok(out)
    }

    /// Radix-2 FFT (or inverse FFT) over G1: the same butterfly network with
    /// scalar multiplication in place of field multiplication.
    pub fn fft_g1(&self, input: &[G1], inverse: bool) -> Result<Vec<G1>, KzgError> {
        let n = input.len();
        let stride = self.stride_for(n)?;

        let mut out = vec![G1::identity(); n];
        if inverse {
            fft_g1_fast(&mut out, input, 1, &self.reverse_roots_of_unity, stride);
            let inv_len: Fr =
                Option::from(Fr::from(n as u64).invert()).ok_or(KzgError::InconsistentDomain)?;
            for p in &mut out {
                *p = p.mul_scalar(inv_len);
            }
        } else {
            fft_g1_fast(&mut out, input, 1, &self.expanded_roots_of_unity, stride);
        }
        Ok(out)
    }
}

/// Decimation-in-time butterfly over the scalar field. `out` and the strided
/// view of `input` have the same logical length; each level halves the output
/// and doubles both strides.
fn fft_fr_fast(out: &mut [Fr], input: &[Fr], stride: usize, roots: &[Fr], roots_stride: usize) {
    let half = out.len() / 2;
    if half == 0 {
        out[0] = input[0];
        return;
    }

    let (lo, hi) = out.split_at_mut(half);
    fft_fr_fast(lo, input, stride * 2, roots, roots_stride * 2);
    fft_fr_fast(hi, &input[stride..], stride * 2, roots, roots_stride * 2);
    for i in 0..half {
        let y_times_root = hi[i] * roots[i * roots_stride];
        hi[i] = lo[i] - y_times_root;
        lo[i] += y_times_root;
    }
}

fn fft_g1_fast(out: &mut [G1], input: &[G1], stride: usize, roots: &[Fr], roots_stride: usize) {
    let half = out.len() / 2;
    if half == 0 {
        out[0] = input[0];
        return;
    }

    let (lo, hi) = out.split_at_mut(half);
    fft_g1_fast(lo, input, stride * 2, roots, roots_stride * 2);
    fft_g1_fast(hi, &input[stride..], stride * 2, roots, roots_stride * 2);
    for i in 0..half {
        let y_times_root = hi[i].mul_scalar(roots[i * roots_stride]);
        hi[i] = lo[i] - y_times_root;
        lo[i] += y_times_root;
    }
}

/// Permute a power-of-two-length slice into reverse-bit order, in place.
pub fn reverse_bit_order<T: Copy>(values: &mut [T]) -> Result<(), KzgError> {
    let n = values.len();
    if !n.is_power_of_two() {
        return Err(KzgError::NotPowerOfTwo(n));
    }
    if n < 2 {
        return Ok(());
    }

    let shift = usize::BITS - n.trailing_zeros();
    for i in 0..n {
        let r = i.reverse_bits() >> shift;
        if r > i {
            values.swap(i, r);
        }
    }
    Ok(())
}
