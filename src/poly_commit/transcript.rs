use crate::poly_commit::pcs::ToBytes;
use ark_ff::{BigInteger, PrimeField};
use ark_std::rand::SeedableRng;
use merlin::Transcript;
use rand_chacha::ChaChaRng;

/// The trait for the polynomial commitment transcript.
pub trait PolyComTranscript {
    /// Append the commitment to the transcript.
    fn append_commitment<C: ToBytes>(&mut self, commitment: &C);

    /// Append the field element to the transcript.
    fn append_field_elem<F: PrimeField>(&mut self, elem: &F);

    /// Get a challenge field element.
    fn get_challenge_field_elem<F: PrimeField>(&mut self, label: &'static [u8]) -> F;
}

impl PolyComTranscript for Transcript {
    fn append_commitment<C: ToBytes>(&mut self, commitment: &C) {
        self.append_message(b"append commitment", &commitment.to_bytes());
    }

    fn append_field_elem<F: PrimeField>(&mut self, elem: &F) {
        self.append_message(b"append field point", &elem.into_bigint().to_bytes_le());
    }

    fn get_challenge_field_elem<F: PrimeField>(&mut self, label: &'static [u8]) -> F {
        let mut buff = [0u8; 32];
        self.challenge_bytes(label, &mut buff);
        F::rand(&mut ChaChaRng::from_seed(buff))
    }
}
