use crate::errors::{PlonkError, Result};
use ark_ff::PrimeField;
use ark_poly::{EvaluationDomain, Radix2EvaluationDomain};

/// The pair of evaluation domains used by the proof system. The small
/// domain interpolates the trace columns; the large domain, shifted onto
/// the coset u * <g_m>, carries the quotient computation so that the
/// vanishing polynomial of the small domain stays invertible at every
/// sample point.
#[derive(Clone, Copy, Debug)]
pub struct EvalDomains<F: PrimeField> {
    /// Domain of size n, the next power of two of gates + public inputs.
    pub small: Radix2EvaluationDomain<F>,
    /// Coset domain of size 4n (8n when n < 6), shifted by the
    /// multiplicative generator of the field.
    pub large: Radix2EvaluationDomain<F>,
}

impl<F: PrimeField> EvalDomains<F> {
    /// Build the domain pair for a system of `size_system` rows
    /// (gate count plus public-input count).
    pub fn new(size_system: usize) -> Result<Self> {
        let n = size_system.next_power_of_two();
        // The quotient polynomial has degree at most 3n+5, so 4n sample
        // points are enough in all cases except when n < 6.
        let m = if n < 6 { 8 * n } else { 4 * n };
        let small =
            Radix2EvaluationDomain::new(n).ok_or(PlonkError::GroupNotFound(n))?;
        let large = Radix2EvaluationDomain::new(m)
            .and_then(|domain| domain.get_coset(F::GENERATOR))
            .ok_or(PlonkError::GroupNotFound(m))?;
        Ok(Self { small, large })
    }

    /// Cardinality of the small domain.
    pub fn n(&self) -> usize {
        self.small.size()
    }

    /// Cardinality of the large domain.
    pub fn m(&self) -> usize {
        self.large.size()
    }

    /// The coset shift u, an element outside every power-of-two subgroup.
    pub fn coset_shift(&self) -> F {
        F::GENERATOR
    }
}
