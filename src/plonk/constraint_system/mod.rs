use crate::errors::Result;
use ark_ff::PrimeField;

pub mod sparse;

pub use sparse::SparseConstraintSystem;

/// Variable index.
pub type VarIndex = usize;

/// Index into the shared coefficient table.
pub type CoeffIndex = usize;

/// A single gate of the constraint system:
/// q_l * w[a] + q_r * w[b] + q_m * w[a] * w[b] + q_o * w[c] + q_c = 0.
/// The five selector entries index the shared coefficient table.
#[derive(Clone, Copy, Debug)]
pub struct SparseGate {
    /// Coefficient of the left wire.
    pub q_l: CoeffIndex,
    /// Coefficient of the right wire.
    pub q_r: CoeffIndex,
    /// Coefficient of the product of the left and right wires.
    pub q_m: CoeffIndex,
    /// Coefficient of the output wire.
    pub q_o: CoeffIndex,
    /// Constant coefficient.
    pub q_c: CoeffIndex,
    /// Left wire.
    pub a: VarIndex,
    /// Right wire.
    pub b: VarIndex,
    /// Output wire.
    pub c: VarIndex,
}

/// Wires committed ahead of proving; setup reserves one commitment
/// selector column per entry.
#[derive(Clone, Debug, Default)]
pub struct CommitmentInfo {
    /// Gate rows covered by the pre-commitment.
    pub committed: Vec<usize>,
}

/// Trait for PLONK constraint systems.
pub trait ConstraintSystem {
    /// The scalar field the system is expressed over.
    type Field: PrimeField;

    /// Number of public input variables.
    fn num_public(&self) -> usize;

    /// Number of secret input variables.
    fn num_secret(&self) -> usize;

    /// Number of internal variables derived by the solver.
    fn num_internal(&self) -> usize;

    /// Total number of variables, laid out [public | secret | internal].
    fn num_vars(&self) -> usize {
        self.num_public() + self.num_secret() + self.num_internal()
    }

    /// Borrow the gate list.
    fn gates(&self) -> &[SparseGate];

    /// Number of trace rows: the gates plus one placeholder row per
    /// public input.
    fn size_system(&self) -> usize {
        self.gates().len() + self.num_public()
    }

    /// Borrow the shared coefficient table.
    fn coefficients(&self) -> &[Self::Field];

    /// Pre-committed wire information.
    fn commitment_info(&self) -> &[CommitmentInfo];

    /// Solve the witness: derive the internal variables and check every
    /// gate. `witness` carries the public then the secret assignments;
    /// the returned solution is laid out [public | secret | internal].
    fn solve(&self, witness: &[Self::Field]) -> Result<Vec<Self::Field>>;
}
