use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::ConstraintSystem,
    helpers::{quotient_polynomial, wire_polynomials, z_poly, PlonkChallenges},
    indexer::{PlonkPK, PlonkPf, PlonkProof},
    transcript::{
        transcript_get_plonk_challenge_alpha, transcript_get_plonk_challenge_gamma,
        transcript_get_plonk_challenge_v, transcript_get_plonk_challenge_zeta,
        transcript_init_plonk,
    },
};
use crate::poly_commit::{
    field_polynomial::FpPolynomial, pcs::PolyComScheme, transcript::PolyComTranscript,
};
use merlin::Transcript;

/// PLONK prover: produces a proof that `witness` satisfies the constraint
/// system `cs`. The verifier must replay a transcript with the same state
/// and matching public parameters.
///
/// Returns `WitnessUnsolved` when the witness does not satisfy the
/// constraint system, `DivisionByZero` when a permutation denominator
/// degenerates, and the underlying commitment error when the SRS cannot
/// hold one of the committed polynomials.
/// # Example
/// ```
/// use plonk_backend::plonk::{
///     constraint_system::SparseConstraintSystem,
///     indexer::indexer,
///     prover::prover,
/// };
/// use plonk_backend::poly_commit::kzg_poly_com::KZGCommitmentSchemeBLS;
/// use ark_bls12_381::Fr;
/// use ark_std::rand::SeedableRng;
/// use merlin::Transcript;
/// use rand_chacha::ChaChaRng;
///
/// // circuit: x * y = z, with z public
/// let mut cs = SparseConstraintSystem::new();
/// let z = cs.new_public_variable();
/// let x = cs.new_secret_variable();
/// let y = cs.new_secret_variable();
/// cs.insert_mul_gate(x, y, z);
///
/// let mut prng = ChaChaRng::from_seed([0u8; 32]);
/// let pcs = KZGCommitmentSchemeBLS::new(64, &mut prng);
/// let params = indexer(&cs, pcs).unwrap();
///
/// let witness = [Fr::from(12u64), Fr::from(3u64), Fr::from(4u64)];
/// let mut transcript = Transcript::new(b"Test");
/// let proof = prover(&mut transcript, &cs, &params, &witness).unwrap();
/// ```
pub fn prover<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    transcript: &mut Transcript,
    cs: &CS,
    params: &PlonkPK<PCS>,
    witness: &[PCS::Field],
) -> Result<PlonkPf<PCS>> {
    // 0. solve the witness; an unsatisfied gate aborts the proof run.
    let solution = cs.solve(witness)?;
    let online_values: Vec<PCS::Field> = solution[..cs.num_public()].to_vec();

    let n = params.domains.n();
    transcript_init_plonk(transcript, &params.verifier_params, &online_values);
    let mut challenges = PlonkChallenges::new();

    // 1. build the wire polynomials a, b, c, commit, and absorb.
    let wires = wire_polynomials(cs, &solution, n);
    let mut wires_canonical = wires.clone();
    for wire in wires_canonical.iter_mut() {
        wire.to_canonical(&params.domains);
    }
    let wire_fps: Vec<FpPolynomial<PCS::Field>> =
        wires_canonical.iter().map(|wire| wire.fp()).collect();
    let mut c_wire_polys = Vec::with_capacity(wire_fps.len());
    for wire_fp in wire_fps.iter() {
        let c_wire = params
            .kzg
            .commit(wire_fp)
            .map_err(|_| PlonkError::CommitmentError)?;
        transcript.append_commitment(&c_wire);
        c_wire_polys.push(c_wire);
    }

    // 2. challenge gamma.
    let gamma = transcript_get_plonk_challenge_gamma(transcript, n);
    challenges.insert_gamma(gamma)?;

    // 3. build the permutation accumulator Z, commit, and absorb.
    let z = z_poly::<PCS>(params, &wires, &challenges)?;
    let z_shift = z.shifted();
    let mut z_canonical = z;
    z_canonical.to_canonical(&params.domains);
    let z_fp = z_canonical.fp();
    let c_z = params
        .kzg
        .commit(&z_fp)
        .map_err(|_| PlonkError::CommitmentError)?;
    transcript.append_commitment(&c_z);

    // 4. challenge alpha.
    let alpha = transcript_get_plonk_challenge_alpha(transcript, n);
    challenges.insert_alpha(alpha)?;

    // 5. complete q_k with the public inputs; the placeholder rows now
    // read -w_i + public_i = 0.
    let mut q_k = params.l_q_k.clone();
    for (value, pi_value) in q_k
        .lagrange_values_mut()
        .iter_mut()
        .zip(online_values.iter())
    {
        *value = *pi_value;
    }
    q_k.to_canonical(&params.domains);
    q_k.to_lagrange_coset(&params.domains);

    // 6. evaluate the per-proof polynomials on the large coset.
    let mut wires_coset = wires_canonical;
    for wire in wires_coset.iter_mut() {
        wire.to_lagrange_coset(&params.domains);
    }
    let mut z_coset = z_canonical.clone();
    z_coset.to_lagrange_coset(&params.domains);
    let mut z_shift_coset = z_shift;
    z_shift_coset.to_canonical(&params.domains);
    z_shift_coset.to_lagrange_coset(&params.domains);

    // 7. compute the quotient H, commit, and absorb.
    let h = quotient_polynomial::<PCS>(
        params,
        &wires_coset,
        &z_coset,
        &z_shift_coset,
        &q_k,
        &challenges,
    )?;
    let c_h = params
        .kzg
        .commit(&h)
        .map_err(|_| PlonkError::CommitmentError)?;
    transcript.append_commitment(&c_h);

    // 8. challenge zeta; evaluate a, b, c, H, Z at zeta and Z at g * zeta.
    let zeta = transcript_get_plonk_challenge_zeta(transcript, n);
    challenges.insert_zeta(zeta)?;

    let wire_polys_eval_zeta: Vec<PCS::Field> =
        wire_fps.iter().map(|wire_fp| wire_fp.eval(&zeta)).collect();
    let h_eval_zeta = h.eval(&zeta);
    let z_eval_zeta = z_fp.eval(&zeta);
    let g_zeta = params.verifier_params.root * zeta;
    let z_eval_g_zeta = z_fp.eval(&g_zeta);

    for eval_zeta in wire_polys_eval_zeta.iter() {
        transcript.append_field_elem(eval_zeta);
    }
    transcript.append_field_elem(&h_eval_zeta);
    transcript.append_field_elem(&z_eval_zeta);
    transcript.append_field_elem(&z_eval_g_zeta);

    // 9. challenge v; batched opening at zeta, single opening at g * zeta.
    let v = transcript_get_plonk_challenge_v(transcript, n);
    challenges.insert_v(v)?;

    let batch: Vec<&FpPolynomial<PCS::Field>> =
        vec![&wire_fps[0], &wire_fps[1], &wire_fps[2], &h, &z_fp];
    let batch_eval_proof = params.kzg.batch_open(&batch, &zeta, &v)?;
    let shifted_eval_proof = params.kzg.open(&z_fp, &g_zeta)?;

    Ok(PlonkProof {
        c_wire_polys,
        c_z,
        c_h,
        wire_polys_eval_zeta,
        h_eval_zeta,
        z_eval_zeta,
        z_eval_g_zeta,
        batch_eval_proof,
        shifted_eval_proof,
    })
}

#[cfg(test)]
mod test {
    use super::prover;
    use crate::errors::PlonkError;
    use crate::plonk::constraint_system::{ConstraintSystem, SparseConstraintSystem};
    use crate::plonk::helpers::{
        quotient_polynomial, wire_polynomials, z_poly, PlonkChallenges,
    };
    use crate::plonk::indexer::{indexer, PlonkPK};
    use crate::plonk::polynomial::Polynomial;
    use crate::plonk::transcript::{
        transcript_get_plonk_challenge_alpha, transcript_get_plonk_challenge_gamma,
        transcript_get_plonk_challenge_v, transcript_get_plonk_challenge_zeta,
        transcript_init_plonk,
    };
    use crate::poly_commit::kzg_poly_com::KZGCommitmentSchemeBLS;
    use crate::poly_commit::pcs::PolyComScheme;
    use crate::poly_commit::transcript::PolyComTranscript;
    use ark_bls12_381::Fr;
    use ark_ff::{Field, One, UniformRand, Zero};
    use ark_std::test_rng;
    use merlin::Transcript;

    type PCS = KZGCommitmentSchemeBLS;

    // circuit: x * y = z, with z public
    fn mul_circuit() -> (SparseConstraintSystem<Fr>, Vec<Fr>) {
        let mut cs = SparseConstraintSystem::new();
        let z = cs.new_public_variable();
        let x = cs.new_secret_variable();
        let y = cs.new_secret_variable();
        cs.insert_mul_gate(x, y, z);
        (cs, vec![Fr::from(12u64), Fr::from(3u64), Fr::from(4u64)])
    }

    fn setup(cs: &SparseConstraintSystem<Fr>) -> PlonkPK<PCS> {
        let mut prng = test_rng();
        let pcs = KZGCommitmentSchemeBLS::new(256, &mut prng);
        indexer(cs, pcs).unwrap()
    }

    // completed q_k in canonical form
    fn completed_q_k(params: &PlonkPK<PCS>, online_values: &[Fr]) -> Polynomial<Fr> {
        let mut q_k = params.l_q_k.clone();
        for (value, pi_value) in q_k.lagrange_values_mut().iter_mut().zip(online_values) {
            *value = *pi_value;
        }
        q_k.to_canonical(&params.domains);
        q_k
    }

    #[test]
    fn test_prover_produces_a_proof() {
        let (cs, witness) = mul_circuit();
        let params = setup(&cs);
        let mut transcript = Transcript::new(b"Test");
        let proof = prover(&mut transcript, &cs, &params, &witness).unwrap();
        assert_eq!(proof.c_wire_polys.len(), 3);
        assert_eq!(proof.wire_polys_eval_zeta.len(), 3);
    }

    #[test]
    fn test_quotient_identity_off_domain() {
        let (cs, witness) = mul_circuit();
        let params = setup(&cs);
        let n = params.domains.n();
        let mut prng = test_rng();

        let solution = cs.solve(&witness).unwrap();
        let online_values = &solution[..cs.num_public()];
        let wires = wire_polynomials(&cs, &solution, n);

        let mut challenges = PlonkChallenges::new();
        challenges.insert_gamma(Fr::rand(&mut prng)).unwrap();
        challenges.insert_alpha(Fr::rand(&mut prng)).unwrap();
        let gamma = *challenges.get_gamma().unwrap();
        let alpha = *challenges.get_alpha().unwrap();

        let z = z_poly::<PCS>(&params, &wires, &challenges).unwrap();
        let z_shift = z.shifted();

        let mut wires_canonical = wires.clone();
        for wire in wires_canonical.iter_mut() {
            wire.to_canonical(&params.domains);
        }
        let mut z_canonical = z;
        z_canonical.to_canonical(&params.domains);
        let mut z_shift_canonical = z_shift;
        z_shift_canonical.to_canonical(&params.domains);

        let mut wires_coset = wires_canonical.clone();
        for wire in wires_coset.iter_mut() {
            wire.to_lagrange_coset(&params.domains);
        }
        let mut z_coset = z_canonical.clone();
        z_coset.to_lagrange_coset(&params.domains);
        let mut z_shift_coset = z_shift_canonical.clone();
        z_shift_coset.to_lagrange_coset(&params.domains);

        let q_k_canonical = completed_q_k(&params, online_values);
        let mut q_k_coset = q_k_canonical.clone();
        q_k_coset.to_lagrange_coset(&params.domains);

        let h = quotient_polynomial::<PCS>(
            &params,
            &wires_coset,
            &z_coset,
            &z_shift_coset,
            &q_k_coset,
            &challenges,
        )
        .unwrap();

        // check h * (X^n - 1) == gate + alpha * ordering + alpha^2 * boundary
        // at an off-domain point
        let tau = Fr::rand(&mut prng);
        assert!(!(tau.pow([n as u64]) - Fr::one()).is_zero());

        let u = params.domains.coset_shift();
        let g = params.verifier_params.root;
        let a = wires_canonical[0].fp().eval(&tau);
        let b = wires_canonical[1].fp().eval(&tau);
        let c = wires_canonical[2].fp().eval(&tau);
        let z_tau = z_canonical.fp().eval(&tau);
        let z_g_tau = z_canonical.fp().eval(&(g * tau));

        let gate = params.trace.q_l.fp().eval(&tau) * a
            + params.trace.q_r.fp().eval(&tau) * b
            + params.trace.q_m.fp().eval(&tau) * a * b
            + params.trace.q_o.fp().eval(&tau) * c
            + q_k_canonical.fp().eval(&tau);

        let f = (a + tau + gamma) * (b + u * tau + gamma) * (c + u * u * tau + gamma);
        let gg = (a + params.trace.s1.fp().eval(&tau) + gamma)
            * (b + params.trace.s2.fp().eval(&tau) + gamma)
            * (c + params.trace.s3.fp().eval(&tau) + gamma);
        let ordering = gg * z_g_tau - f * z_tau;

        let mut l1_evals = vec![Fr::zero(); n];
        l1_evals[0] = Fr::one();
        let mut l1 = Polynomial::lagrange(l1_evals);
        l1.to_canonical(&params.domains);
        let boundary = l1.fp().eval(&tau) * (z_tau - Fr::one());

        let lhs = (boundary * alpha + ordering) * alpha + gate;
        let rhs = h.eval(&tau) * (tau.pow([n as u64]) - Fr::one());
        assert_eq!(lhs, rhs);

        // the shifted accumulator really is Z(g X)
        assert_eq!(z_shift_canonical.fp().eval(&tau), z_g_tau);
    }

    #[test]
    fn test_proof_openings_verify() {
        let (cs, witness) = mul_circuit();
        let params = setup(&cs);
        let n = params.domains.n();
        let mut transcript = Transcript::new(b"Test");
        let proof = prover(&mut transcript, &cs, &params, &witness).unwrap();

        // replay the transcript the way a verifier would
        let solution = cs.solve(&witness).unwrap();
        let online_values = solution[..cs.num_public()].to_vec();
        let mut replay = Transcript::new(b"Test");
        transcript_init_plonk(&mut replay, params.get_verifier_params_ref(), &online_values);
        for c_wire in proof.c_wire_polys.iter() {
            replay.append_commitment(c_wire);
        }
        let _gamma: Fr = transcript_get_plonk_challenge_gamma(&mut replay, n);
        replay.append_commitment(&proof.c_z);
        let _alpha: Fr = transcript_get_plonk_challenge_alpha(&mut replay, n);
        replay.append_commitment(&proof.c_h);
        let zeta: Fr = transcript_get_plonk_challenge_zeta(&mut replay, n);
        for eval_zeta in proof.wire_polys_eval_zeta.iter() {
            replay.append_field_elem(eval_zeta);
        }
        replay.append_field_elem(&proof.h_eval_zeta);
        replay.append_field_elem(&proof.z_eval_zeta);
        replay.append_field_elem(&proof.z_eval_g_zeta);
        let v: Fr = transcript_get_plonk_challenge_v(&mut replay, n);

        let commitments = [
            &proof.c_wire_polys[0],
            &proof.c_wire_polys[1],
            &proof.c_wire_polys[2],
            &proof.c_h,
            &proof.c_z,
        ];
        let mut values = proof.wire_polys_eval_zeta.clone();
        values.push(proof.h_eval_zeta);
        values.push(proof.z_eval_zeta);
        // the shrunk verifier-side parameters are enough to check openings
        let verifier_kzg = &params.get_verifier_params_ref().kzg;
        verifier_kzg
            .batch_verify(&commitments, &zeta, &values, &v, &proof.batch_eval_proof)
            .unwrap();

        let g_zeta = params.verifier_params.root * zeta;
        verifier_kzg
            .verify(
                &proof.c_z,
                &g_zeta,
                &proof.z_eval_g_zeta,
                &proof.shifted_eval_proof,
            )
            .unwrap();
    }

    #[test]
    fn test_prover_is_deterministic() {
        let (cs, witness) = mul_circuit();
        let params = setup(&cs);
        let mut transcript1 = Transcript::new(b"Test");
        let proof1 = prover(&mut transcript1, &cs, &params, &witness).unwrap();
        let mut transcript2 = Transcript::new(b"Test");
        let proof2 = prover(&mut transcript2, &cs, &params, &witness).unwrap();
        assert_eq!(proof1, proof2);
    }

    #[test]
    fn test_prover_rejects_bad_witness() {
        let (cs, _) = mul_circuit();
        let params = setup(&cs);
        let mut transcript = Transcript::new(b"Test");
        let witness = [Fr::from(13u64), Fr::from(3u64), Fr::from(4u64)];
        assert_eq!(
            prover(&mut transcript, &cs, &params, &witness).err(),
            Some(PlonkError::WitnessUnsolved)
        );
    }

    #[test]
    fn test_public_inputs_only_circuit() {
        // no gates: the trace is nothing but placeholder rows
        let mut cs = SparseConstraintSystem::<Fr>::new();
        cs.new_public_variable();
        cs.new_public_variable();
        let witness = vec![Fr::from(7u64), Fr::from(11u64)];
        let params = setup(&cs);
        let n = params.domains.n();
        assert_eq!(n, cs.num_public());

        // with the completed q_k, the gate identity vanishes identically
        // on the coset
        let solution = cs.solve(&witness).unwrap();
        let wires = wire_polynomials(&cs, &solution, n);
        let mut wires_coset = wires.clone();
        for wire in wires_coset.iter_mut() {
            wire.to_canonical(&params.domains);
            wire.to_lagrange_coset(&params.domains);
        }
        let mut q_k_coset = completed_q_k(&params, &solution);
        q_k_coset.to_lagrange_coset(&params.domains);

        let a = wires_coset[0].coset_values();
        let b = wires_coset[1].coset_values();
        let c = wires_coset[2].coset_values();
        let q_k = q_k_coset.coset_values();
        for i in 0..params.domains.m() {
            let gate = params.lc_q_l.coset_values()[i] * a[i]
                + params.lc_q_r.coset_values()[i] * b[i]
                + params.lc_q_m.coset_values()[i] * a[i] * b[i]
                + params.lc_q_o.coset_values()[i] * c[i]
                + q_k[i];
            assert!(gate.is_zero());
        }

        let mut transcript = Transcript::new(b"Test");
        prover(&mut transcript, &cs, &params, &witness).unwrap();
    }
}
