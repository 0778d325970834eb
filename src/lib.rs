#![allow(clippy::upper_case_acronyms)]

//! A PLONK proving backend over pairing-friendly curves: setup turns a
//! sparse rank-1 constraint system into committed selector and
//! permutation polynomials, and the prover runs the wire / grand-product
//! / quotient / opening pipeline against a KZG polynomial commitment
//! scheme.

/// Module for errors.
pub mod errors;

/// Module for the PLONK proof system.
pub mod plonk;

/// Module for polynomial commitments.
pub mod poly_commit;
