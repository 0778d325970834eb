use crate::plonk::indexer::PlonkVerifierParams;
use crate::poly_commit::{pcs::PolyComScheme, transcript::PolyComTranscript};
use ark_ff::{BigInteger, PrimeField};
use ark_std::rand::SeedableRng;
use merlin::Transcript;
use rand_chacha::ChaChaRng;

/// Initialize the transcript of a PLONK proof: absorb the circuit
/// digests and the public inputs before any challenge is squeezed.
pub(crate) fn transcript_init_plonk<PCS: PolyComScheme>(
    transcript: &mut Transcript,
    params: &PlonkVerifierParams<PCS>,
    pi_values: &[PCS::Field],
) {
    transcript.append_message(b"New Domain", b"PLONK");

    transcript.append_u64(b"CS size", params.cs_size as u64);
    transcript.append_message(b"field size", &PCS::Field::MODULUS.to_bytes_le());
    for q in [
        &params.cm_q_l,
        &params.cm_q_r,
        &params.cm_q_m,
        &params.cm_q_o,
        &params.cm_q_k,
    ] {
        transcript.append_commitment(q);
    }
    for q in params.cm_q_cp.iter() {
        transcript.append_commitment(q);
    }
    for s in params.cm_s.iter() {
        transcript.append_commitment(s);
    }
    transcript.append_field_elem(&params.root);
    transcript.append_field_elem(&params.coset_shift);
    for pi_value in pi_values.iter() {
        transcript.append_field_elem(pi_value);
    }
}

/// Derive a challenge scalar, re-sampling until it falls outside the
/// roots of unity of the evaluation domain.
pub(crate) fn transcript_get_challenge_field_elem<F: PrimeField>(
    transcript: &mut Transcript,
    group_order: usize,
    label: &'static [u8],
) -> F {
    let mut buff = [0u8; 32];
    transcript.challenge_bytes(label, &mut buff);
    let mut prng = ChaChaRng::from_seed(buff);
    loop {
        let elem = F::rand(&mut prng);
        if elem.pow([group_order as u64]) != F::one() {
            return elem;
        }
    }
}

/// Return the challenge by label: "gamma".
pub(crate) fn transcript_get_plonk_challenge_gamma<F: PrimeField>(
    transcript: &mut Transcript,
    group_order: usize,
) -> F {
    transcript_get_challenge_field_elem(transcript, group_order, b"gamma")
}

/// Return the challenge by label: "alpha".
pub(crate) fn transcript_get_plonk_challenge_alpha<F: PrimeField>(
    transcript: &mut Transcript,
    group_order: usize,
) -> F {
    transcript_get_challenge_field_elem(transcript, group_order, b"alpha")
}

/// Return the challenge by label: "zeta".
pub(crate) fn transcript_get_plonk_challenge_zeta<F: PrimeField>(
    transcript: &mut Transcript,
    group_order: usize,
) -> F {
    transcript_get_challenge_field_elem(transcript, group_order, b"zeta")
}

/// Return the challenge by label: "v".
pub(crate) fn transcript_get_plonk_challenge_v<F: PrimeField>(
    transcript: &mut Transcript,
    group_order: usize,
) -> F {
    transcript_get_challenge_field_elem(transcript, group_order, b"v")
}
