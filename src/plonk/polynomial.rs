use crate::plonk::domain::EvalDomains;
use crate::poly_commit::field_polynomial::FpPolynomial;
use ark_ff::PrimeField;
use ark_poly::EvaluationDomain;

/// The basis a column polynomial's values are expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Basis {
    /// Evaluations over the small domain.
    Lagrange,
    /// Coefficient form.
    Canonical,
    /// Evaluations over the large coset domain.
    LagrangeCoset,
}

/// A vector of field elements tagged with the basis it lives in.
/// Conversions assert the tag, so values can never be consumed in a
/// basis they are not expressed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial<F: PrimeField> {
    values: Vec<F>,
    basis: Basis,
}

impl<F: PrimeField> Polynomial<F> {
    /// Wrap evaluations over the small domain.
    pub fn lagrange(values: Vec<F>) -> Self {
        Self {
            values,
            basis: Basis::Lagrange,
        }
    }

    /// Wrap coefficients.
    pub fn canonical(values: Vec<F>) -> Self {
        Self {
            values,
            basis: Basis::Canonical,
        }
    }

    /// Wrap evaluations over the large coset domain.
    pub fn lagrange_coset(values: Vec<F>) -> Self {
        Self {
            values,
            basis: Basis::LagrangeCoset,
        }
    }

    /// Return the basis tag.
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the value vector is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the evaluations over the small domain.
    pub fn lagrange_values(&self) -> &[F] {
        assert_eq!(self.basis, Basis::Lagrange, "polynomial is not in Lagrange basis");
        &self.values
    }

    /// Mutably borrow the evaluations over the small domain.
    pub fn lagrange_values_mut(&mut self) -> &mut [F] {
        assert_eq!(self.basis, Basis::Lagrange, "polynomial is not in Lagrange basis");
        &mut self.values
    }

    /// Borrow the evaluations over the large coset domain.
    pub fn coset_values(&self) -> &[F] {
        assert_eq!(
            self.basis,
            Basis::LagrangeCoset,
            "polynomial is not in Lagrange coset basis"
        );
        &self.values
    }

    /// Borrow the coefficients.
    pub fn coefficients(&self) -> &[F] {
        assert_eq!(self.basis, Basis::Canonical, "polynomial is not in canonical basis");
        &self.values
    }

    /// Clone the coefficients into an `FpPolynomial` for the commitment layer.
    pub fn fp(&self) -> FpPolynomial<F> {
        FpPolynomial::from_coefs(self.coefficients().to_vec())
    }

    /// Convert to coefficient form, from either evaluation basis.
    /// Idempotent on canonical values.
    pub fn to_canonical(&mut self, domains: &EvalDomains<F>) {
        match self.basis {
            Basis::Lagrange => self.values = domains.small.ifft(&self.values),
            Basis::LagrangeCoset => self.values = domains.large.ifft(&self.values),
            Basis::Canonical => {}
        }
        self.basis = Basis::Canonical;
    }

    /// Convert coefficients to evaluations over the small domain.
    pub fn to_lagrange(&mut self, domains: &EvalDomains<F>) {
        if self.basis == Basis::Lagrange {
            return;
        }
        assert_eq!(self.basis, Basis::Canonical, "convert to canonical first");
        self.values = domains.small.fft(&self.values);
        self.basis = Basis::Lagrange;
    }

    /// Convert coefficients to evaluations over the large coset domain.
    pub fn to_lagrange_coset(&mut self, domains: &EvalDomains<F>) {
        if self.basis == Basis::LagrangeCoset {
            return;
        }
        assert_eq!(self.basis, Basis::Canonical, "convert to canonical first");
        self.values = domains.large.fft(&self.values);
        self.basis = Basis::LagrangeCoset;
    }

    /// The polynomial X -> p(g X), obtained by cyclically rotating the
    /// Lagrange values left by one slot.
    pub fn shifted(&self) -> Self {
        let mut values = self.lagrange_values().to_vec();
        values.rotate_left(1);
        Self::lagrange(values)
    }
}
