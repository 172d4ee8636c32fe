//! # Header Signature Verifier
//!
//! Checks the three signatures a header carries:
//!
//! 1. The rand seed is the leader's signature over the previous rand seed.
//! 2. The leader signature covers the header with that field blanked.
//! 3. The aggregated committee signature covers the hash of the header
//!    with every signature field and the bitmap blanked, signed by at
//!    least two thirds plus one of the consensus group.
//!
//! The consensus group is recomputed from the previous rand seed, the round,
//! the shard and the epoch, so a header cannot pick its own committee.

use std::sync::Arc;

use shared_crypto::{Hasher, KeyGenerator, MultiSigVerifier, SingleSigner, Suite};
use shared_types::{HeaderHandler, Marshaller, SigningScope};
use sc_01_sharding::NodesCoordinator;
use tracing::trace;

use crate::domain::ProcessError;
use crate::ports::HeaderSigVerifier;

/// Minimum number of signers for a group of `size`.
pub fn min_consensus_size(size: usize) -> usize {
    size * 2 / 3 + 1
}

/// True when bit `index` of `bitmap` is set.
fn is_bit_set(bitmap: &[u8], index: usize) -> bool {
    bitmap
        .get(index / 8)
        .is_some_and(|byte| byte & (1 << (index % 8)) != 0)
}

/// Header signature verifier backed by the nodes coordinator.
pub struct BlockSigVerifier {
    marshaller: Marshaller,
    hasher: Arc<dyn Hasher>,
    nodes_coordinator: Arc<dyn NodesCoordinator>,
    multi_sig_verifier: Arc<dyn MultiSigVerifier>,
    single_signer: Arc<dyn SingleSigner>,
    key_gen: Arc<dyn KeyGenerator>,
}

impl BlockSigVerifier {
    /// All three signing collaborators must be BLS.
    pub fn new(
        marshaller: Marshaller,
        hasher: Arc<dyn Hasher>,
        nodes_coordinator: Arc<dyn NodesCoordinator>,
        multi_sig_verifier: Arc<dyn MultiSigVerifier>,
        single_signer: Arc<dyn SingleSigner>,
        key_gen: Arc<dyn KeyGenerator>,
    ) -> Result<Self, ProcessError> {
        if single_signer.suite() != Suite::Bls12381 || key_gen.suite() != Suite::Bls12381 {
            return Err(ProcessError::SuiteMismatch("header sig verifier"));
        }
        if multi_sig_verifier.suite() != Suite::Bls12381 {
            return Err(ProcessError::SuiteMismatch("header multisig verifier"));
        }
        Ok(Self {
            marshaller,
            hasher,
            nodes_coordinator,
            multi_sig_verifier,
            single_signer,
            key_gen,
        })
    }

    fn consensus_public_keys(&self, header: &dyn HeaderHandler) -> Result<Vec<Vec<u8>>, ProcessError> {
        Ok(self.nodes_coordinator.consensus_validators_public_keys(
            header.prev_rand_seed(),
            header.round(),
            header.shard_id(),
            header.epoch(),
        )?)
    }

    fn leader_public_key(&self, header: &dyn HeaderHandler) -> Result<Vec<u8>, ProcessError> {
        self.consensus_public_keys(header)?
            .into_iter()
            .next()
            .ok_or(ProcessError::MissingField("consensus group"))
    }
}

impl HeaderSigVerifier for BlockSigVerifier {
    fn verify_rand_seed_and_leader_signature(
        &self,
        header: &dyn HeaderHandler,
    ) -> Result<(), ProcessError> {
        let leader = self.leader_public_key(header)?;
        self.key_gen.check_public_key(&leader)?;

        self.single_signer
            .verify(&leader, header.prev_rand_seed(), header.rand_seed())?;

        let message = header.signing_bytes(&self.marshaller, SigningScope::Leader)?;
        self.single_signer
            .verify(&leader, &message, header.leader_signature())?;
        Ok(())
    }

    fn verify_signature(&self, header: &dyn HeaderHandler) -> Result<(), ProcessError> {
        let bitmap = header.pub_keys_bitmap();
        if bitmap.is_empty() {
            return Err(ProcessError::MissingField("pub_keys_bitmap"));
        }

        let group = self.consensus_public_keys(header)?;
        let expected = group.len().div_ceil(8);
        if bitmap.len() != expected {
            return Err(ProcessError::WrongSizeBitmap {
                expected,
                actual: bitmap.len(),
            });
        }
        if !is_bit_set(bitmap, 0) {
            return Err(ProcessError::ProposerSignatureMissing);
        }

        let signers: Vec<Vec<u8>> = group
            .into_iter()
            .enumerate()
            .filter(|(i, _)| is_bit_set(bitmap, *i))
            .map(|(_, pk)| pk)
            .collect();
        let group_size = self.nodes_coordinator.consensus_group_size(header.shard_id());
        let required = min_consensus_size(group_size);
        if signers.len() < required {
            return Err(ProcessError::NotEnoughSignatures {
                signed: signers.len(),
                required,
            });
        }

        let message = header.signing_bytes(&self.marshaller, SigningScope::Committee)?;
        let digest = self.hasher.compute(&message);
        self.multi_sig_verifier.verify_aggregated_sig(
            Suite::Bls12381,
            &signers,
            header.signature(),
            &digest,
        )?;
        trace!(
            shard = header.shard_id(),
            round = header.round(),
            signers = signers.len(),
            "[sc-03] committee signature verified"
        );
        Ok(())
    }
}
