//! # Factory Arguments
//!
//! One read-only bundle of collaborators shared by every intercepted-data
//! factory. Built once at startup; a missing collaborator is a
//! configuration error, never a per-message one.

use std::sync::Arc;

use shared_crypto::{Hasher, KeyGenerator, MultiSigVerifier, SingleSigner};
use shared_types::{AddressCodec, Marshaller};
use sc_01_sharding::{EpochStartTrigger, NodesCoordinator, ShardCoordinator};

use crate::domain::ProcessError;
use crate::ports::{FeeHandler, HeaderSigVerifier, ValidityAttester};

/// Collaborators needed to decode and check any intercepted object.
pub struct ArgInterceptedDataFactory {
    /// Wire codec.
    pub marshaller: Marshaller,
    /// Hashes received bytes.
    pub hasher: Arc<dyn Hasher>,
    /// Maps addresses and ids to shards.
    pub shard_coordinator: Arc<dyn ShardCoordinator>,
    /// Selects the consensus group of a round.
    pub nodes_coordinator: Arc<dyn NodesCoordinator>,
    /// Verifies aggregated committee signatures.
    pub multi_sig_verifier: Arc<dyn MultiSigVerifier>,
    /// Block signer (BLS).
    pub block_single_signer: Arc<dyn SingleSigner>,
    /// Parses BLS public keys.
    pub block_key_gen: Arc<dyn KeyGenerator>,
    /// Transaction signer (Ed25519).
    pub tx_single_signer: Arc<dyn SingleSigner>,
    /// Parses Ed25519 public keys.
    pub tx_key_gen: Arc<dyn KeyGenerator>,
    /// Sender and receiver address lengths.
    pub address_codec: AddressCodec,
    /// Gas price and limit minimums.
    pub fee_handler: Arc<dyn FeeHandler>,
    /// Leader and committee signature checks.
    pub header_sig_verifier: Arc<dyn HeaderSigVerifier>,
    /// Anti-rollback checks.
    pub validity_attester: Arc<dyn ValidityAttester>,
    /// Epoch change state.
    pub epoch_start_trigger: Arc<dyn EpochStartTrigger>,
    /// Expected chain id of every header and transaction.
    pub chain_id: Vec<u8>,
}

impl std::fmt::Debug for ArgInterceptedDataFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgInterceptedDataFactory")
            .field("marshaller", &self.marshaller)
            .field("self_shard", &self.shard_coordinator.self_id())
            .field("chain_id", &String::from_utf8_lossy(&self.chain_id))
            .finish_non_exhaustive()
    }
}

impl ArgInterceptedDataFactory {
    /// Starts a builder.
    pub fn builder() -> ArgInterceptedDataFactoryBuilder {
        ArgInterceptedDataFactoryBuilder::default()
    }
}

/// Builder for [`ArgInterceptedDataFactory`].
#[derive(Default)]
pub struct ArgInterceptedDataFactoryBuilder {
    marshaller: Marshaller,
    address_codec: AddressCodec,
    hasher: Option<Arc<dyn Hasher>>,
    shard_coordinator: Option<Arc<dyn ShardCoordinator>>,
    nodes_coordinator: Option<Arc<dyn NodesCoordinator>>,
    multi_sig_verifier: Option<Arc<dyn MultiSigVerifier>>,
    block_single_signer: Option<Arc<dyn SingleSigner>>,
    block_key_gen: Option<Arc<dyn KeyGenerator>>,
    tx_single_signer: Option<Arc<dyn SingleSigner>>,
    tx_key_gen: Option<Arc<dyn KeyGenerator>>,
    fee_handler: Option<Arc<dyn FeeHandler>>,
    header_sig_verifier: Option<Arc<dyn HeaderSigVerifier>>,
    validity_attester: Option<Arc<dyn ValidityAttester>>,
    epoch_start_trigger: Option<Arc<dyn EpochStartTrigger>>,
    chain_id: Vec<u8>,
}

macro_rules! setter {
    ($name:ident, $ty:ty) => {
        #[doc = concat!("Sets `", stringify!($name), "`.")]
        pub fn $name(mut self, value: $ty) -> Self {
            self.$name = Some(value);
            self
        }
    };
}

impl ArgInterceptedDataFactoryBuilder {
    /// Wire format (bincode by default).
    pub fn marshaller(mut self, marshaller: Marshaller) -> Self {
        self.marshaller = marshaller;
        self
    }

    /// Address length rules.
    pub fn address_codec(mut self, codec: AddressCodec) -> Self {
        self.address_codec = codec;
        self
    }

    /// Chain identifier every signed object must carry.
    pub fn chain_id(mut self, chain_id: impl Into<Vec<u8>>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    setter!(hasher, Arc<dyn Hasher>);
    setter!(shard_coordinator, Arc<dyn ShardCoordinator>);
    setter!(nodes_coordinator, Arc<dyn NodesCoordinator>);
    setter!(multi_sig_verifier, Arc<dyn MultiSigVerifier>);
    setter!(block_single_signer, Arc<dyn SingleSigner>);
    setter!(block_key_gen, Arc<dyn KeyGenerator>);
    setter!(tx_single_signer, Arc<dyn SingleSigner>);
    setter!(tx_key_gen, Arc<dyn KeyGenerator>);
    setter!(fee_handler, Arc<dyn FeeHandler>);
    setter!(header_sig_verifier, Arc<dyn HeaderSigVerifier>);
    setter!(validity_attester, Arc<dyn ValidityAttester>);
    setter!(epoch_start_trigger, Arc<dyn EpochStartTrigger>);

    /// Checks that every collaborator is present.
    pub fn build(self) -> Result<Arc<ArgInterceptedDataFactory>, ProcessError> {
        fn required<T>(value: Option<T>, name: &'static str) -> Result<T, ProcessError> {
            value.ok_or(ProcessError::MissingDependency(name))
        }

        if self.chain_id.is_empty() {
            return Err(ProcessError::InvalidChainId);
        }
        if self.address_codec.is_empty() {
            return Err(ProcessError::InvalidConfig("address length is zero".into()));
        }

        Ok(Arc::new(ArgInterceptedDataFactory {
            marshaller: self.marshaller,
            hasher: required(self.hasher, "hasher")?,
            shard_coordinator: required(self.shard_coordinator, "shard coordinator")?,
            nodes_coordinator: required(self.nodes_coordinator, "nodes coordinator")?,
            multi_sig_verifier: required(self.multi_sig_verifier, "multisig verifier")?,
            block_single_signer: required(self.block_single_signer, "block single signer")?,
            block_key_gen: required(self.block_key_gen, "block key generator")?,
            tx_single_signer: required(self.tx_single_signer, "tx single signer")?,
            tx_key_gen: required(self.tx_key_gen, "tx key generator")?,
            address_codec: self.address_codec,
            fee_handler: required(self.fee_handler, "fee handler")?,
            header_sig_verifier: required(self.header_sig_verifier, "header sig verifier")?,
            validity_attester: required(self.validity_attester, "validity attester")?,
            epoch_start_trigger: required(self.epoch_start_trigger, "epoch start trigger")?,
            chain_id: self.chain_id,
        }))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Argument bundles for unit tests.

    use super::*;
    use crate::ports::outbound::mocks::{MockAttester, MockFeeHandler, MockSigVerifier};
    use sc_01_sharding::{
        IndexHashedNodesCoordinator, MultiShardCoordinator, TrackedEpochStartTrigger,
    };
    use shared_crypto::{
        Blake3Hasher, BlsKeyGenerator, BlsMultiSigner, BlsSingleSigner, Ed25519KeyGenerator,
        Ed25519SingleSigner,
    };
    use shared_types::ShardId;

    pub const CHAIN_ID: &[u8] = b"chain-1";

    /// Fully mocked bundle for a node in `self_id` out of `num_shards`.
    pub fn builder(num_shards: u32, self_id: ShardId) -> ArgInterceptedDataFactoryBuilder {
        let hasher: Arc<dyn Hasher> = Arc::new(Blake3Hasher::default());
        ArgInterceptedDataFactory::builder()
            .chain_id(CHAIN_ID)
            .hasher(hasher.clone())
            .shard_coordinator(Arc::new(
                MultiShardCoordinator::new(num_shards, self_id).unwrap(),
            ))
            .nodes_coordinator(Arc::new(
                IndexHashedNodesCoordinator::new(hasher.clone(), 1, 1).unwrap(),
            ))
            .multi_sig_verifier(Arc::new(
                BlsMultiSigner::new(Arc::new(Blake3Hasher::new(16))).unwrap(),
            ))
            .block_single_signer(Arc::new(BlsSingleSigner))
            .block_key_gen(Arc::new(BlsKeyGenerator))
            .tx_single_signer(Arc::new(Ed25519SingleSigner))
            .tx_key_gen(Arc::new(Ed25519KeyGenerator))
            .fee_handler(Arc::new(MockFeeHandler))
            .header_sig_verifier(Arc::new(MockSigVerifier::default()))
            .validity_attester(Arc::new(MockAttester))
            .epoch_start_trigger(Arc::new(TrackedEpochStartTrigger::default()))
    }

    pub fn args(num_shards: u32, self_id: ShardId) -> Arc<ArgInterceptedDataFactory> {
        builder(num_shards, self_id).build().unwrap()
    }
}
