use std::{error, fmt};

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, PlonkError>;

/// Errors surfaced by the setup and proving pipelines.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlonkError {
    /// The field has no multiplicative subgroup of the requested order.
    GroupNotFound(usize),
    /// The SRS has fewer G1 elements than the evaluation domain requires.
    SrsTooSmall(usize),
    /// The degree of the polynomial is higher than the maximum degree supported by the SRS.
    DegreeError,
    /// Polynomial commitment error.
    CommitmentError,
    /// The witness does not satisfy the constraint system.
    WitnessUnsolved,
    /// Division by zero while accumulating the permutation product.
    DivisionByZero,
    /// The evaluation domain cannot hold the public inputs.
    DomainTooSmall,
    /// Challenge inserted or read out of order.
    ChallengeError,
    /// Cannot compute the opening proof as the quotient division fails.
    PCSProveEvalError,
    /// Function params error.
    FuncParamsError,
}

impl fmt::Display for PlonkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PlonkError::*;
        match self {
            GroupNotFound(n) => write!(f, "no multiplicative subgroup of order {}", n),
            SrsTooSmall(n) => write!(f, "kzg srs is too small for domain size {}", n),
            DegreeError => f.write_str(
                "the degree of the polynomial is higher than the maximum degree supported",
            ),
            CommitmentError => f.write_str("commitment error"),
            WitnessUnsolved => f.write_str("witness does not satisfy the constraint system"),
            DivisionByZero => f.write_str("division by zero"),
            DomainTooSmall => f.write_str("evaluation domain cannot hold the public inputs"),
            ChallengeError => f.write_str("challenge error"),
            PCSProveEvalError => f.write_str("cannot compute the opening proof"),
            FuncParamsError => f.write_str("function params error"),
        }
    }
}

impl error::Error for PlonkError {}
