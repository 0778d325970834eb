use crate::errors::{PlonkError, Result};
use crate::plonk::constraint_system::{
    CoeffIndex, CommitmentInfo, ConstraintSystem, SparseGate, VarIndex,
};
use ark_ff::PrimeField;

/// A sparse rank-1 constraint system with addition and multiplication
/// gates over a shared coefficient table. Variables are allocated in
/// [public | secret | internal] order; the solver derives internal
/// variables gate by gate.
#[derive(Clone, Debug, Default)]
pub struct SparseConstraintSystem<F: PrimeField> {
    coefficients: Vec<F>,
    gates: Vec<SparseGate>,
    num_public: usize,
    num_secret: usize,
    num_internal: usize,
    commitment_info: Vec<CommitmentInfo>,
}

impl<F: PrimeField> SparseConstraintSystem<F> {
    /// Create an empty constraint system.
    pub fn new() -> Self {
        Self {
            coefficients: vec![F::zero(), F::one(), -F::one()],
            gates: vec![],
            num_public: 0,
            num_secret: 0,
            num_internal: 0,
            commitment_info: vec![],
        }
    }

    /// Intern a coefficient in the shared table.
    pub fn coefficient(&mut self, value: F) -> CoeffIndex {
        if let Some(index) = self.coefficients.iter().position(|coef| coef == &value) {
            return index;
        }
        self.coefficients.push(value);
        self.coefficients.len() - 1
    }

    /// The interned zero coefficient.
    pub fn coeff_zero(&self) -> CoeffIndex {
        0
    }

    /// The interned one coefficient.
    pub fn coeff_one(&self) -> CoeffIndex {
        1
    }

    /// The interned minus-one coefficient.
    pub fn coeff_minus_one(&self) -> CoeffIndex {
        2
    }

    /// Allocate a public input variable. Public variables must be
    /// allocated before any secret or internal variable.
    pub fn new_public_variable(&mut self) -> VarIndex {
        assert_eq!(
            self.num_secret + self.num_internal,
            0,
            "public variables must be allocated first"
        );
        self.num_public += 1;
        self.num_public - 1
    }

    /// Allocate a secret input variable.
    pub fn new_secret_variable(&mut self) -> VarIndex {
        assert_eq!(self.num_internal, 0, "secret variables precede internal ones");
        self.num_secret += 1;
        self.num_public + self.num_secret - 1
    }

    /// Allocate an internal variable, to be derived by the solver.
    pub fn new_internal_variable(&mut self) -> VarIndex {
        self.num_internal += 1;
        self.num_public + self.num_secret + self.num_internal - 1
    }

    /// Insert a gate with explicit coefficient indices.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_gate(
        &mut self,
        q_l: CoeffIndex,
        q_r: CoeffIndex,
        q_m: CoeffIndex,
        q_o: CoeffIndex,
        q_c: CoeffIndex,
        a: VarIndex,
        b: VarIndex,
        c: VarIndex,
    ) {
        self.gates.push(SparseGate {
            q_l,
            q_r,
            q_m,
            q_o,
            q_c,
            a,
            b,
            c,
        });
    }

    /// Insert a gate enforcing w[a] + w[b] = w[c].
    pub fn insert_add_gate(&mut self, a: VarIndex, b: VarIndex, c: VarIndex) {
        let (zero, one, minus_one) = (self.coeff_zero(), self.coeff_one(), self.coeff_minus_one());
        self.insert_gate(one, one, zero, minus_one, zero, a, b, c);
    }

    /// Insert a gate enforcing w[a] * w[b] = w[c].
    pub fn insert_mul_gate(&mut self, a: VarIndex, b: VarIndex, c: VarIndex) {
        let (zero, one, minus_one) = (self.coeff_zero(), self.coeff_one(), self.coeff_minus_one());
        self.insert_gate(zero, zero, one, minus_one, zero, a, b, c);
    }

    /// Register a set of pre-committed gate rows. One commitment selector
    /// column is reserved per call.
    pub fn insert_commitment_info(&mut self, committed: Vec<usize>) {
        self.commitment_info.push(CommitmentInfo { committed });
    }

    fn gate_wire_values(&self, gate: &SparseGate, solution: &[F]) -> (F, F, F) {
        (solution[gate.a], solution[gate.b], solution[gate.c])
    }

    fn gate_residual(&self, gate: &SparseGate, solution: &[F]) -> F {
        let (a, b, c) = self.gate_wire_values(gate, solution);
        self.coefficients[gate.q_l] * a
            + self.coefficients[gate.q_r] * b
            + self.coefficients[gate.q_m] * a * b
            + self.coefficients[gate.q_o] * c
            + self.coefficients[gate.q_c]
    }
}

impl<F: PrimeField> ConstraintSystem for SparseConstraintSystem<F> {
    type Field = F;

    fn num_public(&self) -> usize {
        self.num_public
    }

    fn num_secret(&self) -> usize {
        self.num_secret
    }

    fn num_internal(&self) -> usize {
        self.num_internal
    }

    fn gates(&self) -> &[SparseGate] {
        &self.gates
    }

    fn coefficients(&self) -> &[F] {
        &self.coefficients
    }

    fn commitment_info(&self) -> &[CommitmentInfo] {
        &self.commitment_info
    }

    fn solve(&self, witness: &[F]) -> Result<Vec<F>> {
        if witness.len() != self.num_public + self.num_secret {
            return Err(PlonkError::FuncParamsError);
        }
        let mut solution = witness.to_vec();
        solution.resize(self.num_vars(), F::zero());
        let mut assigned = vec![false; self.num_vars()];
        for known in assigned.iter_mut().take(witness.len()) {
            *known = true;
        }

        // Forward pass: each gate may derive its output wire.
        for gate in self.gates.iter() {
            if !assigned[gate.a] || !assigned[gate.b] {
                return Err(PlonkError::WitnessUnsolved);
            }
            if !assigned[gate.c] {
                let q_o = self.coefficients[gate.q_o];
                if q_o.is_zero() {
                    return Err(PlonkError::WitnessUnsolved);
                }
                let (a, b, _) = self.gate_wire_values(gate, &solution);
                let partial = self.coefficients[gate.q_l] * a
                    + self.coefficients[gate.q_r] * b
                    + self.coefficients[gate.q_m] * a * b
                    + self.coefficients[gate.q_c];
                solution[gate.c] = -partial * q_o.inverse().unwrap(); // safe unwrap
                assigned[gate.c] = true;
            }
        }

        if assigned.iter().any(|known| !known) {
            return Err(PlonkError::WitnessUnsolved);
        }
        for gate in self.gates.iter() {
            if !self.gate_residual(gate, &solution).is_zero() {
                return Err(PlonkError::WitnessUnsolved);
            }
        }
        Ok(solution)
    }
}
