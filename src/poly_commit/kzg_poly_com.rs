use crate::errors::{PlonkError, Result as PResult};
use crate::poly_commit::{
    field_polynomial::FpPolynomial,
    pcs::{HomomorphicPolyComElem, PolyComScheme, ToBytes},
};
use ark_bls12_381::Bls12_381;
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, Group, VariableBaseMSM};
use ark_ff::{One, PrimeField, UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;

/// KZG commitment, a single group element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct KZGCommitment<G: AffineRepr>(pub G);

impl<G: AffineRepr> ToBytes for KZGCommitment<G> {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![];
        self.0.serialize_compressed(&mut bytes).unwrap(); // safe unwrap
        bytes
    }
}

impl<G: AffineRepr> HomomorphicPolyComElem for KZGCommitment<G> {
    type Scalar = G::ScalarField;

    fn get_identity() -> Self {
        KZGCommitment(G::zero())
    }

    fn add(&self, other: &Self) -> Self {
        KZGCommitment((self.0.into_group() + other.0.into_group()).into_affine())
    }

    fn add_assign(&mut self, other: &Self) {
        *self = self.add(other);
    }

    fn mul(&self, scalar: &G::ScalarField) -> Self {
        KZGCommitment(self.0.mul_bigint(scalar.into_bigint()).into_affine())
    }
}

/// KZG commitment scheme over a pairing engine. The G1 side holds the
/// powers of the secret needed by the prover, the G2 side the two
/// elements needed by the pairing check.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct KZGCommitmentScheme<P: Pairing> {
    /// public parameter about G1.
    pub public_parameter_group_1: Vec<P::G1Affine>,
    /// public parameter about G2.
    pub public_parameter_group_2: Vec<P::G2Affine>,
}

impl<P: Pairing> KZGCommitmentScheme<P> {
    /// Create a new instance of a KZG polynomial commitment scheme.
    /// `max_degree` - max degree of the polynomial,
    /// `prng` - pseudo-random generator.
    pub fn new<R: RngCore>(max_degree: usize, prng: &mut R) -> KZGCommitmentScheme<P> {
        let s = P::ScalarField::rand(prng);

        let mut powers = Vec::with_capacity(max_degree + 1);
        let mut elem_g1 = P::G1::generator();
        for _ in 0..=max_degree {
            powers.push(elem_g1);
            elem_g1 = elem_g1 * s;
        }
        let public_parameter_group_1 = P::G1::normalize_batch(&powers);

        let elem_g2 = P::G2::generator();
        let public_parameter_group_2 = vec![elem_g2.into_affine(), (elem_g2 * s).into_affine()];

        KZGCommitmentScheme {
            public_parameter_group_1,
            public_parameter_group_2,
        }
    }
}

impl<P: Pairing> PolyComScheme for KZGCommitmentScheme<P> {
    type Field = P::ScalarField;
    type Commitment = KZGCommitment<P::G1Affine>;

    fn max_degree(&self) -> usize {
        self.public_parameter_group_1.len() - 1
    }

    fn commit(&self, polynomial: &FpPolynomial<Self::Field>) -> PResult<Self::Commitment> {
        let coefs = polynomial.get_coefs_ref();
        if coefs.len() > self.public_parameter_group_1.len() {
            return Err(PlonkError::DegreeError);
        }
        let commitment_value = <P::G1 as VariableBaseMSM>::msm_unchecked(
            &self.public_parameter_group_1[..coefs.len()],
            coefs,
        );
        Ok(KZGCommitment(commitment_value.into_affine()))
    }

    fn open(
        &self,
        polynomial: &FpPolynomial<Self::Field>,
        point: &Self::Field,
    ) -> PResult<Self::Commitment> {
        let eval = polynomial.eval(point);

        // f(X) - f(x)
        let nominator = polynomial.sub(&FpPolynomial::from_coefs(vec![eval]));
        // X - x
        let vanishing_poly = FpPolynomial::from_coefs(vec![-*point, Self::Field::one()]);
        let (q_poly, r_poly) = nominator.div_rem(&vanishing_poly);
        if !r_poly.is_zero() {
            return Err(PlonkError::PCSProveEvalError);
        }
        self.commit(&q_poly)
    }

    fn verify(
        &self,
        commitment: &Self::Commitment,
        point: &Self::Field,
        value: &Self::Field,
        proof: &Self::Commitment,
    ) -> PResult<()> {
        let g1_0 = self.public_parameter_group_1[0];
        let g2_0 = self.public_parameter_group_2[0];
        let g2_1 = self.public_parameter_group_2[1];

        // [s - x] in G2
        let x_minus_point_group_element_group_2 =
            g2_1.into_group() - g2_0.mul_bigint(point.into_bigint());

        let left_pairing_eval = if value.is_zero() {
            P::pairing(commitment.0, g2_0)
        } else {
            P::pairing(
                commitment.0.into_group() - g1_0.mul_bigint(value.into_bigint()),
                g2_0,
            )
        };
        let right_pairing_eval = P::pairing(proof.0, x_minus_point_group_element_group_2);

        if left_pairing_eval == right_pairing_eval {
            Ok(())
        } else {
            Err(PlonkError::PCSProveEvalError)
        }
    }

    fn shrink_to_verifier_only(&self) -> Self {
        Self {
            public_parameter_group_1: vec![self.public_parameter_group_1[0]],
            public_parameter_group_2: vec![
                self.public_parameter_group_2[0],
                self.public_parameter_group_2[1],
            ],
        }
    }
}

/// KZG commitment scheme over the BLS12-381 curve.
pub type KZGCommitmentSchemeBLS = KZGCommitmentScheme<Bls12_381>;

#[cfg(test)]
mod test {
    use super::{KZGCommitmentScheme, KZGCommitmentSchemeBLS};
    use crate::poly_commit::{
        field_polynomial::FpPolynomial,
        pcs::{HomomorphicPolyComElem, PolyComScheme},
    };
    use ark_bls12_381::{Bls12_381, Fr};
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::{One, PrimeField, UniformRand, Zero};
    use ark_std::test_rng;

    #[test]
    fn test_generation_of_crs() {
        let n = 1 << 5;
        let mut prng = test_rng();
        let kzg_scheme = KZGCommitmentScheme::<Bls12_381>::new(n, &mut prng);
        assert_eq!(kzg_scheme.public_parameter_group_1.len(), n + 1);
        assert_eq!(kzg_scheme.public_parameter_group_2.len(), 2);
    }

    #[test]
    fn test_commit() {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBLS::new(10, &mut prng);
        let one = Fr::one();
        let two = one + one;
        let three = two + one;
        let six = three + three;

        let poly = FpPolynomial::from_coefs(vec![two, three, six]);
        let commitment = pcs.commit(&poly).unwrap();

        // Doing the multiexp by hand
        let mut expected = ark_bls12_381::G1Projective::zero();
        for (i, coef) in poly.get_coefs_ref().iter().enumerate() {
            expected += pcs.public_parameter_group_1[i].mul_bigint(coef.into_bigint());
        }
        assert_eq!(expected.into_affine(), commitment.0);
    }

    #[test]
    fn test_homomorphic_poly_com_elem() {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBLS::new(20, &mut prng);
        let poly1 = FpPolynomial::from_coefs((0..8).map(|_| Fr::rand(&mut prng)).collect());
        let poly2 = FpPolynomial::from_coefs((0..8).map(|_| Fr::rand(&mut prng)).collect());
        let commitment1 = pcs.commit(&poly1).unwrap();
        let commitment2 = pcs.commit(&poly2).unwrap();

        let mut poly_sum = poly1.clone();
        poly_sum.add_assign(&poly2);
        let commitment_sum = pcs.commit(&poly_sum).unwrap();
        assert_eq!(commitment_sum, commitment1.add(&commitment2));

        let exponent = Fr::rand(&mut prng);
        let poly_scaled = poly1.mul_scalar(&exponent);
        let commitment_scaled = pcs.commit(&poly_scaled).unwrap();
        assert_eq!(commitment_scaled, commitment1.mul(&exponent));
    }

    #[test]
    fn test_eval() {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBLS::new(10, &mut prng);
        let poly = FpPolynomial::from_coefs((0..6).map(|_| Fr::rand(&mut prng)).collect());
        let point = Fr::rand(&mut prng);
        let eval = pcs.eval(&poly, &point);

        let commitment = pcs.commit(&poly).unwrap();
        let proof = pcs.open(&poly, &point).unwrap();
        pcs.verify(&commitment, &point, &eval, &proof).unwrap();

        let verifier_pcs = pcs.shrink_to_verifier_only();
        verifier_pcs
            .verify(&commitment, &point, &eval, &proof)
            .unwrap();

        let wrong_eval = eval + Fr::one();
        assert!(pcs.verify(&commitment, &point, &wrong_eval, &proof).is_err());
    }

    #[test]
    fn test_batch_open() {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBLS::new(16, &mut prng);
        let polys: Vec<FpPolynomial<Fr>> = (0..4)
            .map(|_| FpPolynomial::from_coefs((0..10).map(|_| Fr::rand(&mut prng)).collect()))
            .collect();
        let poly_refs: Vec<&FpPolynomial<Fr>> = polys.iter().collect();
        let point = Fr::rand(&mut prng);
        let separator = Fr::rand(&mut prng);

        let commitments: Vec<_> = polys.iter().map(|p| pcs.commit(p).unwrap()).collect();
        let commitment_refs: Vec<_> = commitments.iter().collect();
        let evals: Vec<Fr> = polys.iter().map(|p| p.eval(&point)).collect();

        let proof = pcs.batch_open(&poly_refs, &point, &separator).unwrap();
        pcs.batch_verify(&commitment_refs, &point, &evals, &separator, &proof)
            .unwrap();

        let mut wrong_evals = evals;
        wrong_evals[2] += Fr::one();
        assert!(pcs
            .batch_verify(&commitment_refs, &point, &wrong_evals, &separator, &proof)
            .is_err());
    }
}
