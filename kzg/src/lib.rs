//! KZG polynomial commitments with FK20 batched proofs.
//!
//! The crate is organised around three settings objects, each immutable once
//! constructed and shareable across threads by reference:
//!
//! - [`FftSettings`] precomputes the roots-of-unity tables for a power-of-two
//!   evaluation domain and provides radix-2 FFTs over the scalar field and
//!   over G1.
//! - [`KzgSettings`] holds a copy of the trusted setup (`[sⁱ]₁`, `[sⁱ]₂`) on
//!   top of an FFT domain, and implements commitment, single-point and coset
//!   opening proofs, and their pairing-based verification.
//! - [`Fk20SingleSettings`] / [`Fk20MultiSettings`] precompute the extended
//!   setup FFTs that let the Feist–Khovratovich algorithm produce every
//!   opening proof of a polynomial in `O(n log n)` group operations instead
//!   of `O(n²)`.
#![no_std]

extern crate alloc;

pub mod fft;
pub mod fk20;
pub mod params;
pub mod poly;
mod proofs;

pub use fft::{reverse_bit_order, FftSettings};
pub use fk20::{Fk20MultiSettings, Fk20SingleSettings, ProofOrder};
pub use params::{generate_trusted_setup, KzgError, KzgSettings};
pub use poly::Poly;
