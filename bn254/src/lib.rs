//! BN254 primitive layer for the KZG data-availability engine
//!
//! This crate provides:
//! - `Fr`: the scalar field of the BN254 curve (re-exported from `halo2curves`,
//!   together with the `ff` traits needed to work with it)
//! - `G1`: points on the base curve E(Fq)
//! - `G2`: points on the twisted curve E'(Fq2)
//! - `Gt`: elements in the target group (Fq12)
//! - Pairing operations, including the two-sided pairing equality check used
//!   by KZG proof verification
//! - Multi-scalar multiplication over G1
#![no_std]

extern crate alloc;

mod curve;

pub use curve::{G1, G2, Gt, multi_pairing, pairing, pairings_verify};
pub use halo2curves::bn256::Fr;
pub use halo2curves::ff::{Field, PrimeField};
