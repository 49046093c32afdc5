use alloc::vec::Vec;

use da_bn254::{Field, Fr, G1, G2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fft::FftSettings;

/// Trusted setup for KZG commitments, bound to an FFT domain.
///
/// The KZG commitment scheme requires a one-time setup that generates public
/// parameters encoding powers of a secret value `s`. This secret must be
/// discarded after setup to ensure security - if an adversary learns `s`,
/// they can create fraudulent proofs.
///
/// # Structure
///
/// - **secret_g1**: `[sⁱ]₁ = sⁱ·G₁` for `i = 0, 1, ..., length-1`. Used by
///   the prover: a commitment is the multi-scalar product of the polynomial
///   coefficients with this table. The table length bounds the number of
///   coefficients that can be committed.
/// - **secret_g2**: `[sⁱ]₂ = sⁱ·G₂` for the same range. Used by verifiers in
///   pairing checks; coset verification of width `n` reads `[sⁿ]₂`, which is
///   why the whole table is kept rather than just `[s]₂`.
/// - **fft**: the [`FftSettings`] the proofs are computed over. The setup
///   must cover the full domain (`length ≥ fft.max_width`).
///
/// # Production vs testing
///
/// - **Testing**: [`generate_trusted_setup`] derives both tables from a known
///   secret.
/// - **Production**: load the tables from a multi-party ceremony (e.g.
///   Ethereum's KZG ceremony) where no single party learns `s`.
///
/// The settings are immutable after construction; every operation takes them
/// by shared reference, so one value can serve any number of caller threads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KzgSettings {
    /// Powers of the secret in G1: `[s⁰]₁, [s¹]₁, ...`
    pub secret_g1: Vec<G1>,
    /// Powers of the secret in G2: `[s⁰]₂, [s¹]₂, ...`
    pub secret_g2: Vec<G2>,
    /// The FFT domain the proofs are computed over.
    pub fft: FftSettings,
}

impl KzgSettings {
    /// Build settings from copies of the trusted-setup tables.
    ///
    /// Both tables must have the same length, and that length must be at
    /// least `fft.max_width` so that every polynomial the domain can hold is
    /// committable.
    pub fn new(secret_g1: &[G1], secret_g2: &[G2], fft: FftSettings) -> Result<Self, KzgError> {
        if secret_g1.len() != secret_g2.len() {
            return Err(KzgError::SetupMismatch {
                g1: secret_g1.len(),
                g2: secret_g2.len(),
            });
        }
        if secret_g1.len() < fft.max_width {
            return Err(KzgError::SetupTooShort {
                length: secret_g1.len(),
                required: fft.max_width,
            });
        }

        Ok(Self {
            secret_g1: secret_g1.to_vec(),
            secret_g2: secret_g2.to_vec(),
            fft,
        })
    }

    /// Number of setup points, i.e. the maximum committable polynomial length.
    pub fn length(&self) -> usize {
        self.secret_g1.len()
    }
}

/// Generate a trusted setup from a known secret.
///
/// **WARNING**: for tests and benchmarks only! Whoever knows the secret can
/// forge arbitrary proofs, so a setup generated this way must never back a
/// real deployment - use the output of a multi-party ceremony instead. The
/// library never samples the secret itself; it is always supplied by the
/// caller.
///
/// Returns `length` powers of `secret` in each group:
/// `([s⁰]₁, ..., [sˡ⁻¹]₁)` and `([s⁰]₂, ..., [sˡ⁻¹]₂)`.
pub fn generate_trusted_setup(secret: Fr, length: usize) -> (Vec<G1>, Vec<G2>) {
    let g1 = G1::generator();
    let g2 = G2::generator();

    let mut s1 = Vec::with_capacity(length);
    let mut s2 = Vec::with_capacity(length);
    let mut power = Fr::ONE;
    for _ in 0..length {
        s1.push(g1.mul_scalar(power));
        s2.push(g2.mul_scalar(power));
        power *= secret;
    }

    (s1, s2)
}

/// Errors surfaced by the commitment engine.
///
/// Every variant except [`KzgError::InconsistentDomain`] reports a
/// caller-violated precondition; `InconsistentDomain` flags an internal
/// algebraic inconsistency and indicates a bug in the library or a corrupted
/// settings value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KzgError {
    /// The requested FFT domain exceeds the two-adicity of the scalar field.
    #[error("scale {scale} exceeds the two-adicity of the scalar field ({max})")]
    ScaleTooLarge { scale: u32, max: u32 },

    /// A transform or batch size that must be a power of two is not.
    #[error("length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// An input is wider than the precomputed FFT domain.
    #[error("length {length} exceeds the domain width {max_width}")]
    WidthExceeded { length: usize, max_width: usize },

    /// A polynomial has more coefficients than the trusted setup covers.
    #[error("polynomial has {length} coefficients, but the setup only supports {max}")]
    PolyTooLong { length: usize, max: usize },

    /// A polynomial does not match the length the settings were built for.
    #[error("polynomial length {length} does not match the precomputed domain ({expected})")]
    LengthMismatch { length: usize, expected: usize },

    /// The domain is too narrow for the requested operation.
    #[error("domain width {0} is too small")]
    DomainTooSmall(usize),

    /// The trusted setup does not reach the index an operation needs.
    #[error("trusted setup of length {length} is too short, need at least {required}")]
    SetupTooShort { length: usize, required: usize },

    /// The two trusted-setup tables disagree in length.
    #[error("trusted setup tables have mismatched lengths ({g1} in G1, {g2} in G2)")]
    SetupMismatch { g1: usize, g2: usize },

    /// Division by the zero polynomial.
    #[error("division by the zero polynomial")]
    ZeroDivisor,

    /// A coset cannot be generated from zero.
    #[error("the coset generator must be nonzero")]
    ZeroCosetGenerator,

    /// The chunk length is incompatible with the domain.
    #[error("chunk length {chunk_len} does not fit a domain of width {n2}")]
    BadChunkLength { chunk_len: usize, n2: usize },

    /// The roots-of-unity table failed its closure check.
    #[error("roots of unity failed to close back to one")]
    InconsistentDomain,
}
