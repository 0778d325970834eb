use crate::errors::{PlonkError, Result as PResult};
use crate::plonk::constraint_system::ConstraintSystem;
use crate::plonk::domain::EvalDomains;
use crate::plonk::polynomial::Polynomial;
use crate::poly_commit::pcs::PolyComScheme;
use ark_ff::{batch_inversion, Field, One, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use std::fmt::Debug;

/// Index into the 3n-slot table the copy-constraint permutation acts on.
/// Slots [0, n) are the "a" column, [n, 2n) the "b" column, [2n, 3n) the
/// "c" column. Kept distinct from `VarIndex` on purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotIndex(pub usize);

/// A PlonkProof is generic over the polynomial commitment scheme: PCS is
/// generic in the commitment group C and the field elements F.
#[derive(CanonicalSerialize, CanonicalDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlonkProof<
    C: CanonicalSerialize + CanonicalDeserialize + Clone + Debug + PartialEq + Eq + Send + Sync,
    F: CanonicalSerialize + CanonicalDeserialize + Clone + Debug + PartialEq + Eq + Send + Sync,
> {
    /// the wire polynomial commitments.
    pub(crate) c_wire_polys: Vec<C>,
    /// the permutation-accumulator polynomial commitment.
    pub(crate) c_z: C,
    /// the quotient polynomial commitment.
    pub(crate) c_h: C,
    /// the openings of the wire polynomials at zeta.
    pub(crate) wire_polys_eval_zeta: Vec<F>,
    /// the opening of H(X) at zeta.
    pub(crate) h_eval_zeta: F,
    /// the opening of Z(X) at zeta.
    pub(crate) z_eval_zeta: F,
    /// the opening of Z(X) at g * zeta.
    pub(crate) z_eval_g_zeta: F,
    /// the batched opening witness at zeta.
    pub(crate) batch_eval_proof: C,
    /// the opening witness for the shifted evaluation.
    pub(crate) shifted_eval_proof: C,
}

/// Define the PLONK proof by given `PolyComScheme`.
pub type PlonkPf<PCS> =
    PlonkProof<<PCS as PolyComScheme>::Commitment, <PCS as PolyComScheme>::Field>;

/// The fixed columns of a circuit: the selectors, the split permutation
/// polynomials S1, S2, S3, and the raw permutation they interpolate.
///
/// The permutation acts on the set (<g>, u <g>, u^2 <g>) of size 3n,
/// where u shifts <g> off itself. S1, S2, S3 are the interpolations of
/// the three n-slot chunks of the permuted set.
#[derive(Clone, Debug)]
pub struct PlonkTrace<F: PrimeField> {
    /// Selector of the left wire. Rows [0, num_public) hold -1: the
    /// placeholder constraints -w_i + public_i = 0 whose constant part
    /// the prover fills in.
    pub(crate) q_l: Polynomial<F>,
    /// Selector of the right wire.
    pub(crate) q_r: Polynomial<F>,
    /// Selector of the product of the left and right wires.
    pub(crate) q_m: Polynomial<F>,
    /// Selector of the output wire.
    pub(crate) q_o: Polynomial<F>,
    /// Constant selector, incomplete until the prover adds the public inputs.
    pub(crate) q_k: Polynomial<F>,
    /// Commitment selectors, one per pre-committed wire set.
    pub(crate) q_cp: Vec<Polynomial<F>>,
    /// Interpolation of the permuted "a" column.
    pub(crate) s1: Polynomial<F>,
    /// Interpolation of the permuted "b" column.
    pub(crate) s2: Polynomial<F>,
    /// Interpolation of the permuted "c" column.
    pub(crate) s3: Polynomial<F>,
    /// The full permutation, slot i -> s[i].
    pub(crate) s: Vec<SlotIndex>,
}

/// PLONK prover parameters. Owns the trace in canonical basis (used by
/// the opening proofs), the Lagrange-coset caches consumed by the
/// quotient evaluation, and the verifier parameters.
#[derive(Clone, Debug)]
pub struct PlonkProverParams<PCS: PolyComScheme> {
    pub(crate) trace: PlonkTrace<PCS::Field>,
    /// the full KZG public parameters.
    pub(crate) kzg: PCS,
    pub(crate) verifier_params: PlonkVerifierParams<PCS>,
    pub(crate) domains: EvalDomains<PCS::Field>,
    /// q_l, q_r, q_m, q_o on the large coset.
    pub(crate) lc_q_l: Polynomial<PCS::Field>,
    pub(crate) lc_q_r: Polynomial<PCS::Field>,
    pub(crate) lc_q_m: Polynomial<PCS::Field>,
    pub(crate) lc_q_o: Polynomial<PCS::Field>,
    /// commitment selectors on the large coset.
    pub(crate) lc_q_cp: Vec<Polynomial<PCS::Field>>,
    /// q_k in Lagrange basis, completed with the public inputs by the
    /// prover on each proof run.
    pub(crate) l_q_k: Polynomial<PCS::Field>,
    /// S1, S2, S3 on the large coset.
    pub(crate) lc_s1: Polynomial<PCS::Field>,
    pub(crate) lc_s2: Polynomial<PCS::Field>,
    pub(crate) lc_s3: Polynomial<PCS::Field>,
    /// the identity polynomial X on the large coset.
    pub(crate) lc_id: Polynomial<PCS::Field>,
    /// the first Lagrange basis polynomial on the large coset.
    pub(crate) lc_l1: Polynomial<PCS::Field>,
    /// inverses of X^n - 1 at the sample points of the large coset.
    pub(crate) z_h_inv_coset_evals: Vec<PCS::Field>,
}

/// Define the PLONK prover params by given `PolyComScheme`.
pub type PlonkPK<PCS> = PlonkProverParams<PCS>;

impl<PCS: PolyComScheme> PlonkProverParams<PCS> {
    /// Return the verifier parameters.
    pub fn get_verifier_params(self) -> PlonkVerifierParams<PCS> {
        self.verifier_params
    }

    /// Return a reference to the verifier parameters.
    pub fn get_verifier_params_ref(&self) -> &PlonkVerifierParams<PCS> {
        &self.verifier_params
    }
}

/// PLONK verifier parameters.
#[derive(Clone, Debug)]
pub struct PlonkVerifierParams<PCS: PolyComScheme> {
    /// the commitments of q_l, q_r, q_m, q_o.
    pub(crate) cm_q_l: PCS::Commitment,
    pub(crate) cm_q_r: PCS::Commitment,
    pub(crate) cm_q_m: PCS::Commitment,
    pub(crate) cm_q_o: PCS::Commitment,
    /// the commitment of the incomplete constant selector.
    pub(crate) cm_q_k: PCS::Commitment,
    /// the commitments of the commitment selectors.
    pub(crate) cm_q_cp: Vec<PCS::Commitment>,
    /// the commitments of S1, S2, S3.
    pub(crate) cm_s: [PCS::Commitment; 3],
    /// the verifier-side KZG parameters.
    pub(crate) kzg: PCS,
    /// the size of the evaluation domain.
    pub(crate) cs_size: usize,
    /// the inverse of the domain size.
    pub(crate) size_inv: PCS::Field,
    /// a primitive n-th root of unity.
    pub(crate) root: PCS::Field,
    /// the coset shift u.
    pub(crate) coset_shift: PCS::Field,
    /// the number of public inputs.
    pub(crate) num_public: usize,
    /// the rows covered by each pre-commitment.
    pub(crate) commitment_indexes: Vec<Vec<usize>>,
}

/// Define the PLONK verifier params by given `PolyComScheme`.
pub type PlonkVK<PCS> = PlonkVerifierParams<PCS>;

/// Fill the selector columns from the constraint system. The first
/// `num_public` rows are the placeholder constraints; gate j lands on
/// row `num_public + j`; the remaining rows stay zero.
fn build_trace_selectors<CS: ConstraintSystem>(
    cs: &CS,
    n: usize,
) -> (
    Polynomial<CS::Field>,
    Polynomial<CS::Field>,
    Polynomial<CS::Field>,
    Polynomial<CS::Field>,
    Polynomial<CS::Field>,
    Vec<Polynomial<CS::Field>>,
) {
    let coefficients = cs.coefficients();
    let mut q_l = vec![CS::Field::zero(); n];
    let mut q_r = vec![CS::Field::zero(); n];
    let mut q_m = vec![CS::Field::zero(); n];
    let mut q_o = vec![CS::Field::zero(); n];
    let mut q_k = vec![CS::Field::zero(); n];

    for row in q_l.iter_mut().take(cs.num_public()) {
        // placeholder -w_i + public_i = 0; the constant is the prover's
        *row = -CS::Field::one();
    }
    let offset = cs.num_public();
    for (j, gate) in cs.gates().iter().enumerate() {
        q_l[offset + j] = coefficients[gate.q_l];
        q_r[offset + j] = coefficients[gate.q_r];
        q_m[offset + j] = coefficients[gate.q_m];
        q_o[offset + j] = coefficients[gate.q_o];
        q_k[offset + j] = coefficients[gate.q_c];
    }

    let mut q_cp = Vec::with_capacity(cs.commitment_info().len());
    for info in cs.commitment_info().iter() {
        let mut column = vec![CS::Field::zero(); n];
        for committed in info.committed.iter() {
            column[offset + committed] = CS::Field::one();
        }
        q_cp.push(Polynomial::lagrange(column));
    }

    (
        Polynomial::lagrange(q_l),
        Polynomial::lagrange(q_r),
        Polynomial::lagrange(q_m),
        Polynomial::lagrange(q_o),
        Polynomial::lagrange(q_k),
        q_cp,
    )
}

/// Build the copy-constraint permutation: every set of slots holding the
/// same variable becomes one cycle. The first pass links each slot to the
/// previous occurrence of its variable; the second pass closes each cycle
/// by sending the first occurrence to the last.
fn build_permutation<CS: ConstraintSystem>(cs: &CS, n: usize) -> Vec<SlotIndex> {
    let size_permutation = 3 * n;

    // slot -> the variable it holds. Only the "a" column is meaningful
    // for the placeholder rows; padding rows reference variable 0, the
    // same variable the wire values are padded with.
    let mut wire_at = vec![0usize; size_permutation];
    for (i, slot) in wire_at.iter_mut().enumerate().take(cs.num_public()) {
        *slot = i;
    }
    let offset = cs.num_public();
    for (j, gate) in cs.gates().iter().enumerate() {
        wire_at[offset + j] = gate.a;
        wire_at[n + offset + j] = gate.b;
        wire_at[2 * n + offset + j] = gate.c;
    }

    let mut last_seen: Vec<Option<SlotIndex>> = vec![None; cs.num_vars().max(1)];
    let mut permutation: Vec<Option<SlotIndex>> = vec![None; size_permutation];
    for (i, var) in wire_at.iter().enumerate() {
        if let Some(previous) = last_seen[*var] {
            permutation[i] = Some(previous);
        }
        last_seen[*var] = Some(SlotIndex(i));
    }

    permutation
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            // still-open slots are the last occurrence of their variable
            slot.unwrap_or_else(|| last_seen[wire_at[i]].unwrap()) // safe unwrap
        })
        .collect()
}

/// The support the permutation acts on: <g> || u <g> || u^2 <g>.
pub(super) fn permutation_support<F: PrimeField>(domains: &EvalDomains<F>) -> Vec<F> {
    let n = domains.n();
    let u = domains.coset_shift();
    let g = domains.small.group_gen;
    let mut support = Vec::with_capacity(3 * n);
    for shift in [F::one(), u, u * u] {
        let mut cur = shift;
        for _ in 0..n {
            support.push(cur);
            cur *= g;
        }
    }
    support
}

/// Interpolate the permutation into S1, S2, S3 over the support
/// <g> || u <g> || u^2 <g>.
fn permutation_polynomials<F: PrimeField>(
    s: &[SlotIndex],
    domains: &EvalDomains<F>,
) -> [Polynomial<F>; 3] {
    let n = domains.n();
    let support = permutation_support(domains);

    let mut s1 = Vec::with_capacity(n);
    let mut s2 = Vec::with_capacity(n);
    let mut s3 = Vec::with_capacity(n);
    for i in 0..n {
        s1.push(support[s[i].0]);
        s2.push(support[s[n + i].0]);
        s3.push(support[s[2 * n + i].0]);
    }
    [
        Polynomial::lagrange(s1),
        Polynomial::lagrange(s2),
        Polynomial::lagrange(s3),
    ]
}

/// Precompute the prover parameters: build and commit the trace, then
/// cache the Lagrange-coset forms the quotient evaluation consumes.
pub fn indexer<PCS: PolyComScheme, CS: ConstraintSystem<Field = PCS::Field>>(
    cs: &CS,
    pcs: PCS,
) -> PResult<PlonkPK<PCS>> {
    let domains = EvalDomains::new(cs.size_system())?;
    let n = domains.n();
    let m = domains.m();
    if cs.num_public() > n {
        return Err(PlonkError::DomainTooSmall);
    }
    if pcs.max_degree() + 1 < n {
        return Err(PlonkError::SrsTooSmall(n));
    }

    // Step 1: selectors and the permutation, in Lagrange basis.
    let (q_l, q_r, q_m, q_o, q_k, q_cp) = build_trace_selectors(cs, n);
    let s = build_permutation(cs, n);
    let [s1, s2, s3] = permutation_polynomials(&s, &domains);
    let mut trace = PlonkTrace {
        q_l,
        q_r,
        q_m,
        q_o,
        q_k,
        q_cp,
        s1,
        s2,
        s3,
        s,
    };

    // Step 2: save q_k in Lagrange form; the prover completes it with the
    // public inputs and evaluates it on the coset on each proof run.
    let l_q_k = trace.q_k.clone();

    // Step 3: express the trace in canonical basis and commit to it.
    trace.q_l.to_canonical(&domains);
    trace.q_r.to_canonical(&domains);
    trace.q_m.to_canonical(&domains);
    trace.q_o.to_canonical(&domains);
    trace.q_k.to_canonical(&domains); // q_k is not complete
    trace.s1.to_canonical(&domains);
    trace.s2.to_canonical(&domains);
    trace.s3.to_canonical(&domains);
    for q_cp_i in trace.q_cp.iter_mut() {
        q_cp_i.to_canonical(&domains);
    }

    let cm_q_l = pcs.commit(&trace.q_l.fp())?;
    let cm_q_r = pcs.commit(&trace.q_r.fp())?;
    let cm_q_m = pcs.commit(&trace.q_m.fp())?;
    let cm_q_o = pcs.commit(&trace.q_o.fp())?;
    let cm_q_k = pcs.commit(&trace.q_k.fp())?;
    let mut cm_q_cp = Vec::with_capacity(trace.q_cp.len());
    for q_cp_i in trace.q_cp.iter() {
        cm_q_cp.push(pcs.commit(&q_cp_i.fp())?);
    }
    let cm_s = [
        pcs.commit(&trace.s1.fp())?,
        pcs.commit(&trace.s2.fp())?,
        pcs.commit(&trace.s3.fp())?,
    ];

    // Step 4: Lagrange-coset caches. The canonical versions stay in the
    // trace for the opening proofs.
    let mut lc_q_l = trace.q_l.clone();
    let mut lc_q_r = trace.q_r.clone();
    let mut lc_q_m = trace.q_m.clone();
    let mut lc_q_o = trace.q_o.clone();
    let mut lc_s1 = trace.s1.clone();
    let mut lc_s2 = trace.s2.clone();
    let mut lc_s3 = trace.s3.clone();
    lc_q_l.to_lagrange_coset(&domains);
    lc_q_r.to_lagrange_coset(&domains);
    lc_q_m.to_lagrange_coset(&domains);
    lc_q_o.to_lagrange_coset(&domains);
    lc_s1.to_lagrange_coset(&domains);
    lc_s2.to_lagrange_coset(&domains);
    lc_s3.to_lagrange_coset(&domains);
    let mut lc_q_cp = Vec::with_capacity(trace.q_cp.len());
    for q_cp_i in trace.q_cp.iter() {
        let mut lc = q_cp_i.clone();
        lc.to_lagrange_coset(&domains);
        lc_q_cp.push(lc);
    }

    // The identity polynomial X, read off directly on the coset points
    // u * g_m^i.
    let u = domains.coset_shift();
    let g_m = domains.large.group_gen;
    let mut id_evals = Vec::with_capacity(m);
    let mut cur = u;
    for _ in 0..m {
        id_evals.push(cur);
        cur *= g_m;
    }
    let lc_id = Polynomial::lagrange_coset(id_evals);

    // L_1, the Lagrange basis polynomial of index 0.
    let mut l1_evals = vec![PCS::Field::zero(); n];
    l1_evals[0] = PCS::Field::one();
    let mut lc_l1 = Polynomial::lagrange(l1_evals);
    lc_l1.to_canonical(&domains);
    lc_l1.to_lagrange_coset(&domains);

    // (X^n - 1)^{-1} at the coset points: (u g_m^i)^n - 1 cycles with
    // period m / n.
    let u_pow_n = u.pow([n as u64]);
    let g_m_pow_n = g_m.pow([n as u64]);
    let mut z_h_inv_coset_evals = Vec::with_capacity(m);
    let mut cur = u_pow_n;
    for _ in 0..m {
        z_h_inv_coset_evals.push(cur - PCS::Field::one());
        cur *= g_m_pow_n;
    }
    batch_inversion(&mut z_h_inv_coset_evals);

    let verifier_params = PlonkVerifierParams {
        cm_q_l,
        cm_q_r,
        cm_q_m,
        cm_q_o,
        cm_q_k,
        cm_q_cp,
        cm_s,
        kzg: pcs.shrink_to_verifier_only(),
        cs_size: n,
        size_inv: PCS::Field::from(n as u64).inverse().unwrap(), // safe unwrap
        root: domains.small.group_gen,
        coset_shift: u,
        num_public: cs.num_public(),
        commitment_indexes: cs
            .commitment_info()
            .iter()
            .map(|info| info.committed.clone())
            .collect(),
    };

    Ok(PlonkProverParams {
        trace,
        kzg: pcs,
        verifier_params,
        domains,
        lc_q_l,
        lc_q_r,
        lc_q_m,
        lc_q_o,
        lc_q_cp,
        l_q_k,
        lc_s1,
        lc_s2,
        lc_s3,
        lc_id,
        lc_l1,
        z_h_inv_coset_evals,
    })
}
