//! The PLONK proof system implementation.

/// Module for help functions.
pub(crate) mod helpers;

/// Module for the constraint system.
pub mod constraint_system;

/// Module for the evaluation domains.
pub mod domain;

/// Module for basis-tagged polynomials.
pub mod polynomial;

/// Module for the indexer.
pub mod indexer;

/// Module for the prover.
pub mod prover;

/// Module for the transcript.
pub mod transcript;
