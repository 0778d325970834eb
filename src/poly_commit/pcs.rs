use crate::errors::{PlonkError, Result};
use crate::poly_commit::field_polynomial::FpPolynomial;
use ark_ff::{One, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use std::fmt::Debug;

/// The trait for serialization to bytes.
pub trait ToBytes {
    /// Convert to bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// The trait for homomorphic polynomial commitments.
pub trait HomomorphicPolyComElem: ToBytes + Clone + Sync + Send {
    /// This is the scalar field of the polynomial.
    type Scalar;

    /// Get identity of the group.
    fn get_identity() -> Self;

    /// Add the underlying polynomials.
    fn add(&self, other: &Self) -> Self;

    /// Add assign the underlying polynomials.
    fn add_assign(&mut self, other: &Self);

    /// Multiply underlying polynomial by `scalar`.
    fn mul(&self, scalar: &Self::Scalar) -> Self;
}

/// Trait for polynomial commitment schemes.
pub trait PolyComScheme: Sized {
    /// Type of prime field.
    type Field: PrimeField;

    /// Type of commitment produced, needs to implement `HomomorphicPolyComElem`.
    type Commitment: HomomorphicPolyComElem<Scalar = Self::Field>
        + Debug
        + PartialEq
        + Eq
        + Clone
        + CanonicalSerialize
        + CanonicalDeserialize
        + Sync
        + Send;

    /// Return maximal supported degree.
    fn max_degree(&self) -> usize;

    /// Commit to the polynomial, commitment is binding.
    fn commit(&self, polynomial: &FpPolynomial<Self::Field>) -> Result<Self::Commitment>;

    /// Evaluate the polynomial at `point`.
    fn eval(&self, polynomial: &FpPolynomial<Self::Field>, point: &Self::Field) -> Self::Field {
        polynomial.eval(point)
    }

    /// Produce an opening witness for the evaluation of the polynomial at `point`.
    fn open(
        &self,
        polynomial: &FpPolynomial<Self::Field>,
        point: &Self::Field,
    ) -> Result<Self::Commitment>;

    /// Verify an evaluation proof that the polynomial inside `commitment`
    /// evaluates to `value` on input `point`.
    fn verify(
        &self,
        commitment: &Self::Commitment,
        point: &Self::Field,
        value: &Self::Field,
        proof: &Self::Commitment,
    ) -> Result<()>;

    /// Produce a single opening witness for a batch of polynomials at `point`,
    /// linearly combined by the powers of `separator`.
    fn batch_open(
        &self,
        polynomials: &[&FpPolynomial<Self::Field>],
        point: &Self::Field,
        separator: &Self::Field,
    ) -> Result<Self::Commitment> {
        if polynomials.is_empty() {
            return Err(PlonkError::FuncParamsError);
        }
        let mut combined = FpPolynomial::<Self::Field>::zero();
        let mut multiplier = Self::Field::one();
        for polynomial in polynomials.iter() {
            let eval_value = self.eval(polynomial, point);
            let mut poly = (*polynomial).clone();
            poly.sub_assign(&FpPolynomial::from_coefs(vec![eval_value]));
            poly.mul_scalar_assign(&multiplier);
            combined.add_assign(&poly);
            multiplier *= separator;
        }
        self.open(&combined, point)
    }

    /// Verify a batched opening witness against the claimed values.
    fn batch_verify(
        &self,
        commitments: &[&Self::Commitment],
        point: &Self::Field,
        values: &[Self::Field],
        separator: &Self::Field,
        proof: &Self::Commitment,
    ) -> Result<()> {
        if commitments.len() != values.len() || commitments.is_empty() {
            return Err(PlonkError::FuncParamsError);
        }
        let mut multiplier = Self::Field::one();
        let mut cm_combined = Self::Commitment::get_identity();
        let mut eval_combined = Self::Field::zero();
        for (value, cm) in values.iter().zip(commitments.iter()) {
            cm_combined.add_assign(&cm.mul(&multiplier));
            eval_combined += *value * multiplier;
            multiplier *= separator;
        }
        self.verify(&cm_combined, point, &eval_combined, proof)
    }

    /// Shrink this to only for verifier use.
    fn shrink_to_verifier_only(&self) -> Self;
}
