//! BN254 group operations, pairings and multi-scalar multiplication
//!
//! Thin wrappers around the battle-tested `halo2curves` implementation. The
//! wrappers fix the scalar type to `Fr`, expose the handful of operations the
//! commitment engine consumes (identity, generator, scalar multiplication,
//! MSM, pairings) and provide a compact serde encoding (compressed affine
//! bytes) for the points that end up inside commitments and proofs.
//!
//! The pairing satisfies the bilinearity property:
//! - e(aP, bQ) = e(P, Q)^(ab) for scalars a, b
//! - e(P₁ + P₂, Q) = e(P₁, Q) · e(P₂, Q)
//!
//! [`pairings_verify`] packs the two sides of an `e(a1, a2) = e(b1, b2)`
//! check into a single multi-Miller loop with one final exponentiation,
//! which is how every KZG verification in the engine is phrased.

extern crate alloc;
use alloc::vec::Vec;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use halo2curves::bn256::{
    Bn256, Fr, G1Affine, G2Affine, G1 as InnerG1, G2 as InnerG2, Gt as InnerGt,
};
use halo2curves::group::{Curve, Group, GroupEncoding};
use halo2curves::msm::msm_best;
use halo2curves::pairing::{MillerLoopResult, MultiMillerLoop};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A point on the BN254 G1 curve (base curve over Fq)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct G1(pub(crate) InnerG1);

/// A point on the BN254 G2 curve (twisted curve over Fq2)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct G2(pub(crate) InnerG2);

/// An element in the BN254 Gt group (target group of the pairing, in Fq12)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Gt(pub(crate) InnerGt);

impl Serialize for G1 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0.to_affine().to_bytes().as_ref())
    }
}

impl<'de> Deserialize<'de> for G1 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        let repr: <G1Affine as GroupEncoding>::Repr = bytes.as_slice().into();
        let affine = Option::<G1Affine>::from(G1Affine::from_bytes(&repr))
            .ok_or_else(|| DeError::custom("invalid G1 point"))?;
        Ok(Self(InnerG1::from(affine)))
    }
}

impl Serialize for G2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0.to_affine().to_bytes().as_ref())
    }
}

impl<'de> Deserialize<'de> for G2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        let repr: <G2Affine as GroupEncoding>::Repr = bytes.as_slice().into();
        let affine = Option::<G2Affine>::from(G2Affine::from_bytes(&repr))
            .ok_or_else(|| DeError::custom("invalid G2 point"))?;
        Ok(Self(InnerG2::from(affine)))
    }
}

// ================================
// G1
// ================================

impl G1 {
    /// Returns the identity element (point at infinity)
    pub fn identity() -> Self {
        Self(InnerG1::identity())
    }

    /// Returns the generator point of G1
    pub fn generator() -> Self {
        Self(InnerG1::generator())
    }

    /// Checks if this point is the identity
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }

    /// Scalar multiplication
    pub fn mul_scalar(&self, scalar: Fr) -> Self {
        Self(self.0 * scalar)
    }

    /// Double this point
    pub fn double(&self) -> Self {
        Self(self.0.double())
    }

    /// Multi-scalar multiplication: computes `sum(scalars[i] * points[i])`
    /// with a Pippenger-class algorithm.
    ///
    /// # Panics
    /// Panics if `points` and `scalars` have different lengths
    pub fn multi_exp(points: &[Self], scalars: &[Fr]) -> Self {
        assert_eq!(
            points.len(),
            scalars.len(),
            "points and scalars must have the same length"
        );

        if points.is_empty() {
            return Self::identity();
        }

        let affine_points: Vec<G1Affine> = points.iter().map(|p| p.0.to_affine()).collect();
        Self(msm_best(scalars, &affine_points))
    }
}

impl Add for G1 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for G1 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for G1 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for G1 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for G1 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Fr> for G1 {
    type Output = Self;

    fn mul(self, rhs: Fr) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

impl MulAssign<Fr> for G1 {
    fn mul_assign(&mut self, rhs: Fr) {
        *self = self.mul_scalar(rhs);
    }
}

// ================================
// G2
// ================================

impl G2 {
    /// Returns the identity element (point at infinity)
    pub fn identity() -> Self {
        Self(InnerG2::identity())
    }

    /// Returns the generator point of G2
    pub fn generator() -> Self {
        Self(InnerG2::generator())
    }

    /// Checks if this point is the identity
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }

    /// Scalar multiplication
    pub fn mul_scalar(&self, scalar: Fr) -> Self {
        Self(self.0 * scalar)
    }
}

impl Add for G2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for G2 {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for G2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for G2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for G2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Mul<Fr> for G2 {
    type Output = Self;

    fn mul(self, rhs: Fr) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

impl MulAssign<Fr> for G2 {
    fn mul_assign(&mut self, rhs: Fr) {
        *self = self.mul_scalar(rhs);
    }
}

// ================================
// Gt
// ================================

impl Gt {
    /// Returns the identity element
    pub fn identity() -> Self {
        Self(InnerGt::identity())
    }

    /// Checks if this element is the identity
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }
}

impl Mul for Gt {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, rhs: Self) -> Self::Output {
        // Gt is written multiplicatively; the underlying Fq12 representation
        // composes additively.
        Self(self.0 + rhs.0)
    }
}

impl MulAssign for Gt {
    #[allow(clippy::suspicious_op_assign_impl)]
    fn mul_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

// ================================
// Pairings
// ================================

/// Compute the pairing e(P, Q) where P ∈ G1 and Q ∈ G2
pub fn pairing(p: G1, q: G2) -> Gt {
    let p_affine = p.0.to_affine();
    let q_affine = q.0.to_affine();
    let miller_loop = Bn256::multi_miller_loop(&[(&p_affine, &q_affine)]);
    Gt(miller_loop.final_exponentiation())
}

/// Compute a product of pairings: e(P1, Q1) * e(P2, Q2) * ... * e(Pn, Qn)
pub fn multi_pairing(pairs: &[(G1, G2)]) -> Gt {
    let affine_pairs: Vec<_> = pairs
        .iter()
        .map(|(p, q)| (p.0.to_affine(), q.0.to_affine()))
        .collect();
    let refs: Vec<_> = affine_pairs.iter().map(|(p, q)| (p, q)).collect();
    let miller_loop = Bn256::multi_miller_loop(&refs[..]);
    Gt(miller_loop.final_exponentiation())
}

/// Check `e(a1, a2) == e(b1, b2)`.
///
/// Evaluates `e(-a1, a2) * e(b1, b2)` with a single Miller loop and one
/// final exponentiation, and compares against the Gt identity.
pub fn pairings_verify(a1: G1, a2: G2, b1: G1, b2: G2) -> bool {
    let a1_neg = (-a1).0.to_affine();
    let a2_affine = a2.0.to_affine();
    let b1_affine = b1.0.to_affine();
    let b2_affine = b2.0.to_affine();
    let miller_loop = Bn256::multi_miller_loop(&[(&a1_neg, &a2_affine), (&b1_affine, &b2_affine)]);
    bool::from(miller_loop.final_exponentiation().is_identity())
}

#[cfg(test)]
impl Gt {
    /// Exponentiation in the multiplicative group
    fn pow_scalar(&self, scalar: Fr) -> Self {
        Self(self.0 * scalar)
    }
}

// ================================
// Tests
// ================================
