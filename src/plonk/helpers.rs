use crate::errors::{PlonkError, Result};
use crate::plonk::constraint_system::ConstraintSystem;
use crate::plonk::indexer::{permutation_support, PlonkPK};
use crate::plonk::polynomial::Polynomial;
use crate::poly_commit::{field_polynomial::FpPolynomial, pcs::PolyComScheme};
use ark_ff::{Field, One, PrimeField, Zero};

/// The challenge state of a proof run, filled in the fixed order
/// gamma, alpha, zeta, v.
#[derive(Default)]
pub(super) struct PlonkChallenges<F> {
    challenges: Vec<F>,
}

impl<F: PrimeField> PlonkChallenges<F> {
    /// Create a challenges container with capacity 4.
    pub(super) fn new() -> PlonkChallenges<F> {
        PlonkChallenges {
            challenges: Vec::with_capacity(4),
        }
    }

    /// Insert gamma.
    pub(super) fn insert_gamma(&mut self, gamma: F) -> Result<()> {
        if self.challenges.is_empty() {
            self.challenges.push(gamma);
            Ok(())
        } else {
            Err(PlonkError::ChallengeError)
        }
    }

    /// Insert alpha.
    pub(super) fn insert_alpha(&mut self, alpha: F) -> Result<()> {
        if self.challenges.len() == 1 {
            self.challenges.push(alpha);
            Ok(())
        } else {
            Err(PlonkError::ChallengeError)
        }
    }

    /// Insert zeta.
    pub(super) fn insert_zeta(&mut self, zeta: F) -> Result<()> {
        if self.challenges.len() == 2 {
            self.challenges.push(zeta);
            Ok(())
        } else {
            Err(PlonkError::ChallengeError)
        }
    }

    /// Insert v.
    pub(super) fn insert_v(&mut self, v: F) -> Result<()> {
        if self.challenges.len() == 3 {
            self.challenges.push(v);
            Ok(())
        } else {
            Err(PlonkError::ChallengeError)
        }
    }

    /// Return gamma.
    pub(super) fn get_gamma(&self) -> Result<&F> {
        self.challenges.first().ok_or(PlonkError::ChallengeError)
    }

    /// Return alpha.
    pub(super) fn get_alpha(&self) -> Result<&F> {
        self.challenges.get(1).ok_or(PlonkError::ChallengeError)
    }

    /// Return zeta.
    pub(super) fn get_zeta(&self) -> Result<&F> {
        self.challenges.get(2).ok_or(PlonkError::ChallengeError)
    }

    /// Return v.
    pub(super) fn get_v(&self) -> Result<&F> {
        self.challenges.get(3).ok_or(PlonkError::ChallengeError)
    }
}

/// Extract the wire columns a, b, c from the solved witness, in Lagrange
/// basis. The placeholder rows only constrain the "a" column, and the
/// padding rows have all-zero selectors, so both fall back to
/// solution[0] rather than leaving wires unconstrained.
pub(super) fn wire_polynomials<CS: ConstraintSystem>(
    cs: &CS,
    solution: &[CS::Field],
    n: usize,
) -> [Polynomial<CS::Field>; 3] {
    let filler = solution.first().copied().unwrap_or_else(CS::Field::zero);
    let mut a = Vec::with_capacity(n);
    let mut b = Vec::with_capacity(n);
    let mut c = Vec::with_capacity(n);

    for i in 0..cs.num_public() {
        a.push(solution[i]);
        b.push(filler);
        c.push(filler);
    }
    for gate in cs.gates().iter() {
        a.push(solution[gate.a]);
        b.push(solution[gate.b]);
        c.push(solution[gate.c]);
    }
    for _ in cs.size_system()..n {
        a.push(filler);
        b.push(filler);
        c.push(filler);
    }

    [
        Polynomial::lagrange(a),
        Polynomial::lagrange(b),
        Polynomial::lagrange(c),
    ]
}

/// Build the permutation accumulator Z in Lagrange basis, where
/// Z(1) = 1 and for i > 0:
///
/// Z(g^i) = prod_{k<i} (a_k + g^k + gamma)(b_k + u g^k + gamma)(c_k + u^2 g^k + gamma)
///        / ((a_k + S1_k + gamma)(b_k + S2_k + gamma)(c_k + S3_k + gamma))
pub(super) fn z_poly<PCS: PolyComScheme>(
    params: &PlonkPK<PCS>,
    wires: &[Polynomial<PCS::Field>; 3],
    challenges: &PlonkChallenges<PCS::Field>,
) -> Result<Polynomial<PCS::Field>> {
    let n = params.domains.n();
    let gamma = challenges.get_gamma()?;
    let g = params.domains.small.group_gen;
    let u = params.domains.coset_shift();
    let support = permutation_support(&params.domains);
    let s = &params.trace.s;
    let a = wires[0].lagrange_values();
    let b = wires[1].lagrange_values();
    let c = wires[2].lagrange_values();

    let mut z_evals = Vec::with_capacity(n);
    let mut prev = PCS::Field::one();
    z_evals.push(prev);

    let mut x = PCS::Field::one();
    for i in 0..n - 1 {
        let numerator =
            (a[i] + x + gamma) * (b[i] + u * x + gamma) * (c[i] + u * u * x + gamma);
        let denominator = (a[i] + support[s[i].0] + gamma)
            * (b[i] + support[s[n + i].0] + gamma)
            * (c[i] + support[s[2 * n + i].0] + gamma);
        let denominator_inv = denominator.inverse().ok_or(PlonkError::DivisionByZero)?;
        prev *= numerator * denominator_inv;
        z_evals.push(prev);
        x *= g;
    }

    Ok(Polynomial::lagrange(z_evals))
}

/// Compute the quotient polynomial H in canonical basis, where
///
/// q_l a + q_r b + q_m a b + q_o c + q_k
///   + alpha (Z(gX) g1 g2 g3 - Z(X) f1 f2 f3)
///   + alpha^2 L1(X) (Z(X) - 1)  =  H(X) (X^n - 1)
///
/// with f_k = wire_k + u^{k-1} X + gamma and g_k = wire_k + S_k + gamma.
/// The left-hand side is evaluated over the large coset, where X^n - 1
/// is invertible, multiplied point-wise by the cached inverses, and
/// interpolated back to coefficients.
pub(super) fn quotient_polynomial<PCS: PolyComScheme>(
    params: &PlonkPK<PCS>,
    wires_coset: &[Polynomial<PCS::Field>; 3],
    z_coset: &Polynomial<PCS::Field>,
    z_shift_coset: &Polynomial<PCS::Field>,
    q_k_coset: &Polynomial<PCS::Field>,
    challenges: &PlonkChallenges<PCS::Field>,
) -> Result<FpPolynomial<PCS::Field>> {
    let m = params.domains.m();
    let gamma = *challenges.get_gamma()?;
    let alpha = *challenges.get_alpha()?;
    let u = params.domains.coset_shift();
    let one = PCS::Field::one();

    let a = wires_coset[0].coset_values();
    let b = wires_coset[1].coset_values();
    let c = wires_coset[2].coset_values();
    let z = z_coset.coset_values();
    let z_shift = z_shift_coset.coset_values();
    let q_l = params.lc_q_l.coset_values();
    let q_r = params.lc_q_r.coset_values();
    let q_m = params.lc_q_m.coset_values();
    let q_o = params.lc_q_o.coset_values();
    let q_k = q_k_coset.coset_values();
    let s1 = params.lc_s1.coset_values();
    let s2 = params.lc_s2.coset_values();
    let s3 = params.lc_s3.coset_values();
    let id = params.lc_id.coset_values();
    let l1 = params.lc_l1.coset_values();

    let mut t_evals = Vec::with_capacity(m);
    for i in 0..m {
        let gate = q_l[i] * a[i] + q_r[i] * b[i] + q_m[i] * a[i] * b[i] + q_o[i] * c[i] + q_k[i];

        let f = (a[i] + id[i] + gamma) * (b[i] + u * id[i] + gamma)
            * (c[i] + u * u * id[i] + gamma);
        let g = (a[i] + s1[i] + gamma) * (b[i] + s2[i] + gamma) * (c[i] + s3[i] + gamma);
        let ordering = g * z_shift[i] - f * z[i];

        let boundary = l1[i] * (z[i] - one);

        let t = (boundary * alpha + ordering) * alpha + gate;
        t_evals.push(t * params.z_h_inv_coset_evals[i]);
    }

    let mut h = Polynomial::lagrange_coset(t_evals);
    h.to_canonical(&params.domains);
    Ok(h.fp())
}

#[cfg(test)]
mod test {
    use super::{wire_polynomials, z_poly, PlonkChallenges};
    use crate::plonk::constraint_system::{ConstraintSystem, SparseConstraintSystem};
    use crate::plonk::indexer::{indexer, permutation_support};
    use crate::poly_commit::kzg_poly_com::KZGCommitmentSchemeBLS;
    use ark_bls12_381::Fr;
    use ark_ff::{Field, One, UniformRand};
    use ark_std::test_rng;

    // a chain of additions with shared wires, solved from two secrets
    fn chain_circuit() -> (SparseConstraintSystem<Fr>, Vec<Fr>) {
        let mut cs = SparseConstraintSystem::new();
        let x = cs.new_secret_variable();
        let y = cs.new_secret_variable();
        let t1 = cs.new_internal_variable();
        let t2 = cs.new_internal_variable();
        let t3 = cs.new_internal_variable();
        cs.insert_add_gate(x, y, t1);
        cs.insert_add_gate(x, t1, t2);
        cs.insert_mul_gate(t1, t2, t3);
        let witness = vec![Fr::from(3u64), Fr::from(4u64)];
        (cs, witness)
    }

    #[test]
    fn test_z_polynomial_starts_at_one_and_closes() {
        let (cs, witness) = chain_circuit();
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBLS::new(64, &mut prng);
        let params = indexer(&cs, pcs).unwrap();
        let n = params.domains.n();

        let solution = cs.solve(&witness).unwrap();
        let wires = wire_polynomials(&cs, &solution, n);

        let mut challenges = PlonkChallenges::new();
        challenges.insert_gamma(Fr::rand(&mut prng)).unwrap();
        let z = z_poly::<KZGCommitmentSchemeBLS>(&params, &wires, &challenges).unwrap();

        let z_evals = z.lagrange_values();
        assert_eq!(z_evals[0], Fr::one());

        // closure: the full grand product over all n rows is 1
        let gamma = *challenges.get_gamma().unwrap();
        let u = params.domains.coset_shift();
        let g = params.domains.small.group_gen;
        let support = permutation_support(&params.domains);
        let s = &params.trace.s;
        let a = wires[0].lagrange_values();
        let b = wires[1].lagrange_values();
        let c = wires[2].lagrange_values();
        let i = n - 1;
        let x = g.pow([i as u64]);
        let numerator =
            (a[i] + x + gamma) * (b[i] + u * x + gamma) * (c[i] + u * u * x + gamma);
        let denominator = (a[i] + support[s[i].0] + gamma)
            * (b[i] + support[s[n + i].0] + gamma)
            * (c[i] + support[s[2 * n + i].0] + gamma);
        assert_eq!(
            z_evals[n - 1] * numerator * denominator.inverse().unwrap(),
            Fr::one()
        );
    }

    #[test]
    fn test_challenges_enforce_order() {
        let mut challenges = PlonkChallenges::<Fr>::new();
        assert!(challenges.get_gamma().is_err());
        assert!(challenges.insert_alpha(Fr::one()).is_err());
        challenges.insert_gamma(Fr::one()).unwrap();
        challenges.insert_alpha(Fr::one()).unwrap();
        challenges.insert_zeta(Fr::one()).unwrap();
        challenges.insert_v(Fr::one()).unwrap();
        assert!(challenges.insert_v(Fr::one()).is_err());
        assert!(challenges.get_zeta().is_ok());
        assert!(challenges.get_v().is_ok());
    }
}
