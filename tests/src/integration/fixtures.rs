//! # Fixtures
//!
//! A [`Committee`] holds real BLS keys for every shard and the metachain;
//! a [`Node`] is a fully wired interceptor container on top of in-memory
//! transport, accounts and pools.

use std::collections::HashMap;
use std::sync::Arc;

use sc_01_sharding::{
    IndexHashedNodesCoordinator, MultiShardCoordinator, NodesCoordinator, ShardCoordinator,
    TrackedEpochStartTrigger, Validator,
};
use sc_02_data_pool::{PoolsConfig, PoolsHolder};
use sc_03_interceptors::{
    ArgInterceptedDataFactory, ArgInterceptorsContainerFactory, BlockSigVerifier,
    EconomicsConfig, EconomicsFeeHandler, FinalHeaderTracker, InMemoryAccounts,
    InMemoryMessenger, InterceptionDebugger, InterceptorsConfig, InterceptorsContainer,
    MetaInterceptorsContainerFactory, NumThreadsThrottler, P2pAntiflood, ProcessError,
    RequestedDataWhiteList, ShardInterceptorsContainerFactory, TimeCache,
};
use shared_crypto::{
    Blake3Hasher, BlsKeyGenerator, BlsMultiSigner, BlsSingleSigner, Ed25519KeyGenerator,
    Ed25519SingleSigner, Hasher, KeyPair, SingleSigner, Suite,
};
use shared_types::{
    AccountState, Batch, Header, HeaderHandler, Marshaller, MetaBlock, MiniBlockHeader, PeerId,
    ShardId, SigningScope, Transaction, U256, METACHAIN_SHARD_ID,
};

pub const CHAIN_ID: &[u8] = b"sc-integration";
pub const NUM_SHARDS: u32 = 4;
pub const GROUP_SIZE: usize = 4;
const ELIGIBLE_PER_SHARD: u8 = 6;

// =============================================================================
// COMMITTEE
// =============================================================================

/// Eligible validators of epoch 0 with their secret keys.
pub struct Committee {
    pub hasher: Arc<dyn Hasher>,
    pub coordinator: Arc<IndexHashedNodesCoordinator>,
    pub multisigner: Arc<BlsMultiSigner>,
    keys: HashMap<Vec<u8>, KeyPair>,
}

/// Headers the committee can sign.
pub trait SignableHeader: HeaderHandler {
    fn set_rand_seed(&mut self, value: Vec<u8>);
    fn set_pub_keys_bitmap(&mut self, value: Vec<u8>);
    fn set_signature(&mut self, value: Vec<u8>);
    fn set_leader_signature(&mut self, value: Vec<u8>);
}

macro_rules! impl_signable {
    ($ty:ty) => {
        impl SignableHeader for $ty {
            fn set_rand_seed(&mut self, value: Vec<u8>) {
                self.rand_seed = value;
            }
            fn set_pub_keys_bitmap(&mut self, value: Vec<u8>) {
                self.pub_keys_bitmap = value;
            }
            fn set_signature(&mut self, value: Vec<u8>) {
                self.signature = value;
            }
            fn set_leader_signature(&mut self, value: Vec<u8>) {
                self.leader_signature = value;
            }
        }
    };
}

impl_signable!(Header);
impl_signable!(MetaBlock);

impl Committee {
    pub fn new(num_shards: u32) -> Self {
        let hasher: Arc<dyn Hasher> = Arc::new(Blake3Hasher::default());
        let coordinator = Arc::new(
            IndexHashedNodesCoordinator::new(hasher.clone(), GROUP_SIZE, GROUP_SIZE).unwrap(),
        );

        let mut keys = HashMap::new();
        let mut eligible = HashMap::new();
        let shards = (0..num_shards).chain(std::iter::once(METACHAIN_SHARD_ID));
        for (shard_index, shard) in shards.enumerate() {
            let mut list = Vec::new();
            for i in 0..ELIGIBLE_PER_SHARD {
                let seed = [shard_index as u8 * ELIGIBLE_PER_SHARD + i + 1; 32];
                let pair = BlsKeyGenerator.pair_from_seed(&seed).unwrap();
                list.push(Validator::new(pair.public.clone(), vec![i; 32]));
                keys.insert(pair.public.clone(), pair);
            }
            eligible.insert(shard, list);
        }
        coordinator.set_nodes_per_shard(0, eligible).unwrap();

        Self {
            hasher,
            coordinator,
            multisigner: Arc::new(BlsMultiSigner::new(Arc::new(Blake3Hasher::new(16))).unwrap()),
            keys,
        }
    }

    /// Signs `header` as its leader, the first `signers` group members co-signing.
    pub fn sign<H: SignableHeader>(&self, header: &mut H, signers: usize) {
        let group = self
            .coordinator
            .consensus_validators_public_keys(
                header.prev_rand_seed(),
                header.round(),
                header.shard_id(),
                header.epoch(),
            )
            .unwrap();
        let leader = &self.keys[&group[0]];
        let rand_seed = BlsSingleSigner
            .sign(&leader.secret, header.prev_rand_seed())
            .unwrap();
        header.set_rand_seed(rand_seed);

        let mut bitmap = vec![0u8; group.len().div_ceil(8)];
        for i in 0..signers {
            bitmap[i / 8] |= 1 << (i % 8);
        }
        header.set_pub_keys_bitmap(bitmap);

        let marshaller = Marshaller::default();
        let digest = self.hasher.compute(
            &header
                .signing_bytes(&marshaller, SigningScope::Committee)
                .unwrap(),
        );
        let selected = group[..signers].to_vec();
        let shares: Vec<Vec<u8>> = selected
            .iter()
            .map(|pk| self.multisigner.sign_share(&self.keys[pk].secret, &digest).unwrap())
            .collect();
        header.set_signature(
            self.multisigner
                .aggregate_signatures(Suite::Bls12381, &shares, &selected)
                .unwrap(),
        );

        let leader_message = header.signing_bytes(&marshaller, SigningScope::Leader).unwrap();
        header.set_leader_signature(BlsSingleSigner.sign(&leader.secret, &leader_message).unwrap());
    }
}

// =============================================================================
// NODE
// =============================================================================

/// A shard or metachain node, wired the way a production node would be.
pub struct Node {
    pub config: InterceptorsConfig,
    pub shard_coordinator: Arc<MultiShardCoordinator>,
    pub messenger: Arc<InMemoryMessenger>,
    pub container: InterceptorsContainer,
    pub pools: PoolsHolder,
    pub accounts: Arc<InMemoryAccounts>,
    pub antiflood: Arc<P2pAntiflood>,
    pub throttler: Arc<NumThreadsThrottler>,
    pub tracker: Arc<FinalHeaderTracker>,
    pub trigger: Arc<TrackedEpochStartTrigger>,
    pub header_blacklist: Arc<TimeCache<Vec<u8>>>,
    pub white_list: Arc<RequestedDataWhiteList>,
    pub debugger: Arc<InterceptionDebugger>,
}

pub fn config(self_id: ShardId) -> InterceptorsConfig {
    InterceptorsConfig {
        chain_id: String::from_utf8_lossy(CHAIN_ID).into_owned(),
        number_of_shards: NUM_SHARDS,
        self_shard_id: self_id,
        consensus_group_size: GROUP_SIZE,
        meta_consensus_group_size: GROUP_SIZE,
        economics: EconomicsConfig {
            min_gas_price: 10,
            min_gas_limit: 10,
            gas_per_data_byte: 1,
        },
        ..Default::default()
    }
}

impl Node {
    pub fn new(committee: &Committee, config: InterceptorsConfig) -> Self {
        Self::try_new(committee, config, Arc::new(InMemoryMessenger::new())).unwrap()
    }

    pub fn try_new(
        committee: &Committee,
        config: InterceptorsConfig,
        messenger: Arc<InMemoryMessenger>,
    ) -> Result<Self, ProcessError> {
        let shard_coordinator = Arc::new(
            MultiShardCoordinator::new(config.number_of_shards, config.self_shard_id)?,
        );
        let tracker = Arc::new(FinalHeaderTracker::new());
        tracker.set_current_round(1_000);
        let trigger = Arc::new(TrackedEpochStartTrigger::default());

        let header_sig_verifier = Arc::new(BlockSigVerifier::new(
            config.marshaller,
            committee.hasher.clone(),
            committee.coordinator.clone(),
            committee.multisigner.clone(),
            Arc::new(BlsSingleSigner),
            Arc::new(BlsKeyGenerator),
        )?);

        let data_args = ArgInterceptedDataFactory::builder()
            .marshaller(config.marshaller)
            .chain_id(config.chain_id.as_bytes())
            .hasher(committee.hasher.clone())
            .shard_coordinator(shard_coordinator.clone())
            .nodes_coordinator(committee.coordinator.clone())
            .multi_sig_verifier(committee.multisigner.clone())
            .block_single_signer(Arc::new(BlsSingleSigner))
            .block_key_gen(Arc::new(BlsKeyGenerator))
            .tx_single_signer(Arc::new(Ed25519SingleSigner))
            .tx_key_gen(Arc::new(Ed25519KeyGenerator))
            .fee_handler(Arc::new(EconomicsFeeHandler::new(&config.economics)))
            .header_sig_verifier(header_sig_verifier)
            .validity_attester(tracker.clone())
            .epoch_start_trigger(trigger.clone())
            .build()?;

        let pools = PoolsHolder::new(&PoolsConfig::default())?;
        let accounts = Arc::new(InMemoryAccounts::new());
        let antiflood = Arc::new(P2pAntiflood::from_config(&config.antiflood)?);
        let throttler = Arc::new(NumThreadsThrottler::new(config.throttler_capacity)?);
        let header_blacklist = Arc::new(TimeCache::<Vec<u8>>::new(config.header_blacklist_duration()));
        let white_list = Arc::new(RequestedDataWhiteList::new(config.white_list_span()));
        let debugger = Arc::new(InterceptionDebugger::new());

        let arg = ArgInterceptorsContainerFactory {
            data_args,
            topic_handler: messenger.clone(),
            pools: pools.clone(),
            accounts: accounts.clone(),
            antiflood: antiflood.clone(),
            throttler: throttler.clone(),
            header_blacklist: header_blacklist.clone(),
            white_list: white_list.clone(),
            debugger: debugger.clone(),
            config: config.clone(),
        };
        let container = if config.self_shard_id == METACHAIN_SHARD_ID {
            MetaInterceptorsContainerFactory::new(arg)?.create()?
        } else {
            ShardInterceptorsContainerFactory::new(arg)?.create()?
        };

        Ok(Self {
            config,
            shard_coordinator,
            messenger,
            container,
            pools,
            accounts,
            antiflood,
            throttler,
            tracker,
            trigger,
            header_blacklist,
            white_list,
            debugger,
        })
    }

    pub fn self_id(&self) -> ShardId {
        self.config.self_shard_id
    }

    /// Topic from this node to `destination`.
    pub fn topic(&self, category: &str, destination: ShardId) -> String {
        format!(
            "{}{}",
            category,
            self.shard_coordinator.communication_identifier(destination)
        )
    }

    pub fn deliver(&self, topic: &str, data: Vec<u8>, from: &PeerId) -> Result<(), ProcessError> {
        self.messenger.deliver(topic, data, from)
    }
}

// =============================================================================
// OBJECTS
// =============================================================================

pub fn peer(id: u8) -> PeerId {
    PeerId::new(vec![id; 8])
}

pub fn batch(items: Vec<Vec<u8>>) -> Vec<u8> {
    Marshaller::default().marshal(&Batch::new(items)).unwrap()
}

pub fn encode_tx(tx: &Transaction) -> Vec<u8> {
    Marshaller::default().marshal(tx).unwrap()
}

pub fn encode_header(header: &Header) -> Vec<u8> {
    Marshaller::default().marshal(header).unwrap()
}

pub fn encode_meta_block(block: &MetaBlock) -> Vec<u8> {
    Marshaller::default().marshal(block).unwrap()
}

/// First Ed25519 seed whose public key lives in `shard`, skipping `skip` matches.
pub fn sender_seed(coordinator: &dyn ShardCoordinator, shard: ShardId, skip: usize) -> u8 {
    (1..=u8::MAX)
        .filter(|seed| {
            let pair = Ed25519KeyGenerator.pair_from_seed([*seed; 32]);
            coordinator.compute_id(&pair.public) == shard
        })
        .nth(skip)
        .unwrap()
}

/// A 32-byte address owned by `shard`.
pub fn address_in_shard(coordinator: &dyn ShardCoordinator, shard: ShardId) -> Vec<u8> {
    (0..=u8::MAX)
        .map(|b| {
            let mut address = vec![0xab; 32];
            address[31] = b;
            address
        })
        .find(|address| coordinator.compute_id(address) == shard)
        .unwrap()
}

pub fn sender_public_key(seed: u8) -> Vec<u8> {
    Ed25519KeyGenerator.pair_from_seed([seed; 32]).public
}

pub fn signed_tx(seed: u8, nonce: u64, rcv_addr: Vec<u8>) -> Transaction {
    let pair = Ed25519KeyGenerator.pair_from_seed([seed; 32]);
    let mut tx = Transaction {
        nonce,
        value: U256::from(1u64),
        rcv_addr,
        snd_addr: pair.public.clone(),
        gas_price: 10,
        gas_limit: 1_000,
        data: b"pay".to_vec(),
        chain_id: CHAIN_ID.to_vec(),
        signature: Vec::new(),
    };
    let message = tx.signing_bytes(&Marshaller::default()).unwrap();
    tx.signature = Ed25519SingleSigner.sign(&pair.secret, &message).unwrap();
    tx
}

/// Funds the sender of `seed` with `nonce`.
pub fn fund(node: &Node, seed: u8, nonce: u64) {
    node.accounts.set_account(
        sender_public_key(seed),
        AccountState::new(nonce, U256::from(1_000_000_000u64)),
    );
}

/// Unsigned shard header of `shard_id` with every mandatory field set.
pub fn shard_header(shard_id: ShardId, nonce: u64, round: u64) -> Header {
    Header {
        nonce,
        round,
        shard_id,
        prev_hash: vec![1; 32],
        prev_rand_seed: vec![nonce as u8; 48],
        root_hash: vec![2; 32],
        chain_id: CHAIN_ID.to_vec(),
        mini_block_headers: vec![MiniBlockHeader {
            hash: vec![3; 32],
            sender_shard_id: shard_id,
            receiver_shard_id: METACHAIN_SHARD_ID,
            tx_count: 1,
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn meta_block(nonce: u64, round: u64) -> MetaBlock {
    MetaBlock {
        nonce,
        round,
        prev_hash: vec![1; 32],
        prev_rand_seed: vec![nonce as u8; 48],
        root_hash: vec![2; 32],
        chain_id: CHAIN_ID.to_vec(),
        ..Default::default()
    }
}
