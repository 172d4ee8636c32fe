//! # Container Factories
//!
//! Build the full interceptor set of a node and register every topic with
//! the transport. The shard and metachain flavors differ only in which
//! topics they wire.
//!
//! Registration is all-or-nothing: if one topic cannot be created or bound,
//! every processor registered so far is unbound again and the build fails.

pub mod meta;
pub mod shard;

use std::sync::Arc;

use sc_01_sharding::topics;
use sc_02_data_pool::PoolsHolder;
use shared_types::ShardId;
use tracing::{info, warn};

use crate::config::InterceptorsConfig;
use crate::domain::{
    ArgInterceptedDataFactory, DataValidator, HdrInterceptorProcessor, HeaderValidator,
    InterceptedDataFactory, InterceptionDebugger, InterceptorProcessor, MetaHeaderDataFactory,
    MiniBlockDataFactory, MiniBlockInterceptorProcessor, NilValidator, PeerShardDataFactory,
    PeerShardInterceptorProcessor, ProcessError, RewardTxDataFactory, ShardHeaderDataFactory,
    TrieNodeDataFactory, TrieNodeInterceptorProcessor, TxDataFactory, TxInterceptorProcessor,
    TxPool, TxValidator, UnsignedTxDataFactory,
};
use crate::interceptors::{ArgInterceptor, MultiDataInterceptor, PenaltyPolicy, SingleDataInterceptor};
use crate::ports::{
    AccountsAdapter, AntifloodHandler, BlackListHandler, Interceptor, InterceptorThrottler,
    TopicHandler, WhiteListHandler,
};
use crate::service::InterceptorsContainer;

pub use meta::MetaInterceptorsContainerFactory;
pub use shard::ShardInterceptorsContainerFactory;

/// Everything a container factory wires into its interceptors.
pub struct ArgInterceptorsContainerFactory {
    /// Shared by every data factory.
    pub data_args: Arc<ArgInterceptedDataFactory>,
    /// Transport the topics are bound on.
    pub topic_handler: Arc<dyn TopicHandler>,
    /// Destination pools.
    pub pools: PoolsHolder,
    /// Account state for the transaction validator.
    pub accounts: Arc<dyn AccountsAdapter>,
    /// Shared by every interceptor of the container.
    pub antiflood: Arc<dyn AntifloodHandler>,
    /// Shared by every interceptor of the container.
    pub throttler: Arc<dyn InterceptorThrottler>,
    /// Hashes of headers known to be bad.
    pub header_blacklist: Arc<dyn BlackListHandler>,
    /// Hashes this node requested from peers.
    pub white_list: Arc<dyn WhiteListHandler>,
    /// Per-topic counters.
    pub debugger: Arc<InterceptionDebugger>,
    /// Topic layout and penalty settings.
    pub config: InterceptorsConfig,
}

type Pairs = Vec<(String, Arc<dyn Interceptor>)>;

/// Helpers shared by both flavors.
pub(crate) struct BaseContainerFactory {
    arg: ArgInterceptorsContainerFactory,
}

impl BaseContainerFactory {
    pub(crate) fn new(arg: ArgInterceptorsContainerFactory) -> Result<Self, ProcessError> {
        arg.config.validate()?;
        let coordinator = &arg.data_args.shard_coordinator;
        if coordinator.number_of_shards() != arg.config.number_of_shards
            || coordinator.self_id() != arg.config.self_shard_id
        {
            return Err(ProcessError::InvalidConfig(format!(
                "shard coordinator ({} shards, self {}) disagrees with config ({} shards, self {})",
                coordinator.number_of_shards(),
                coordinator.self_id(),
                arg.config.number_of_shards,
                arg.config.self_shard_id
            )));
        }
        Ok(Self { arg })
    }

    pub(crate) fn number_of_shards(&self) -> u32 {
        self.arg.config.number_of_shards
    }

    pub(crate) fn self_id(&self) -> ShardId {
        self.arg.config.self_shard_id
    }

    fn topic(&self, category: &str, destination: ShardId) -> String {
        topics::topic_name(
            category,
            &self
                .arg
                .data_args
                .shard_coordinator
                .communication_identifier(destination),
        )
    }

    fn interceptor_arg(
        &self,
        topic: String,
        factory: Arc<dyn InterceptedDataFactory>,
        processor: Arc<dyn InterceptorProcessor>,
    ) -> ArgInterceptor {
        ArgInterceptor {
            topic,
            factory,
            processor,
            antiflood: self.arg.antiflood.clone(),
            throttler: self.arg.throttler.clone(),
            white_list: self.arg.white_list.clone(),
            debugger: self.arg.debugger.clone(),
            policy: PenaltyPolicy {
                blacklist_duration: self.arg.config.blacklist_duration(),
                blacklist_on_decode_failure: self.arg.config.blacklist_on_decode_failure,
            },
        }
    }

    fn single(
        &self,
        topic: String,
        factory: Arc<dyn InterceptedDataFactory>,
        processor: Arc<dyn InterceptorProcessor>,
    ) -> Result<(String, Arc<dyn Interceptor>), ProcessError> {
        let interceptor: Arc<dyn Interceptor> = Arc::new(SingleDataInterceptor::new(
            self.interceptor_arg(topic.clone(), factory, processor),
        )?);
        Ok((topic, interceptor))
    }

    fn multi(
        &self,
        topic: String,
        factory: Arc<dyn InterceptedDataFactory>,
        processor: Arc<dyn InterceptorProcessor>,
    ) -> Result<(String, Arc<dyn Interceptor>), ProcessError> {
        let interceptor: Arc<dyn Interceptor> = Arc::new(MultiDataInterceptor::new(
            self.interceptor_arg(topic.clone(), factory, processor),
            self.arg.data_args.marshaller,
        )?);
        Ok((topic, interceptor))
    }

    /// Every shard plus the metachain.
    fn all_destinations(&self) -> Vec<ShardId> {
        (0..self.number_of_shards())
            .chain(std::iter::once(shared_types::METACHAIN_SHARD_ID))
            .collect()
    }

    pub(crate) fn tx_interceptors(&self) -> Result<Pairs, ProcessError> {
        let factory: Arc<dyn InterceptedDataFactory> =
            Arc::new(TxDataFactory::new(self.arg.data_args.clone())?);
        self.all_destinations()
            .into_iter()
            .map(|destination| {
                let validator = TxValidator::new(
                    self.arg.accounts.clone(),
                    self.arg.data_args.shard_coordinator.clone(),
                    self.arg.config.max_tx_nonce_delta_allowed,
                );
                let processor = Arc::new(TxInterceptorProcessor::new(
                    TxPool::Transactions(self.arg.pools.transactions.clone()),
                    DataValidator::Tx(validator),
                ));
                self.multi(
                    self.topic(topics::TRANSACTIONS, destination),
                    factory.clone(),
                    processor,
                )
            })
            .collect()
    }

    pub(crate) fn unsigned_tx_interceptors(&self) -> Result<Pairs, ProcessError> {
        let factory: Arc<dyn InterceptedDataFactory> =
            Arc::new(UnsignedTxDataFactory::new(self.arg.data_args.clone())?);
        self.all_destinations()
            .into_iter()
            .map(|destination| {
                let processor = Arc::new(TxInterceptorProcessor::new(
                    TxPool::Unsigned(self.arg.pools.unsigned_transactions.clone()),
                    DataValidator::Nil(NilValidator),
                ));
                self.multi(
                    self.topic(topics::UNSIGNED_TRANSACTIONS, destination),
                    factory.clone(),
                    processor,
                )
            })
            .collect()
    }

    /// Rewards are only ever sent from the metachain.
    pub(crate) fn reward_tx_interceptor(&self) -> Result<(String, Arc<dyn Interceptor>), ProcessError> {
        let processor = Arc::new(TxInterceptorProcessor::new(
            TxPool::Rewards(self.arg.pools.reward_transactions.clone()),
            DataValidator::Nil(NilValidator),
        ));
        self.multi(
            self.topic(topics::REWARDS_TRANSACTIONS, shared_types::METACHAIN_SHARD_ID),
            Arc::new(RewardTxDataFactory::new(self.arg.data_args.clone())?),
            processor,
        )
    }

    fn header_processor(&self) -> Arc<dyn InterceptorProcessor> {
        Arc::new(HdrInterceptorProcessor::new(
            self.arg.pools.headers.clone(),
            self.arg.header_blacklist.clone(),
            DataValidator::Header(HeaderValidator::new(
                self.arg.data_args.epoch_start_trigger.clone(),
            )),
        ))
    }

    /// Shard headers travelling between `shard` and the metachain.
    pub(crate) fn shard_header_interceptor(
        &self,
        destination: ShardId,
    ) -> Result<(String, Arc<dyn Interceptor>), ProcessError> {
        self.single(
            self.topic(topics::SHARD_BLOCKS, destination),
            Arc::new(ShardHeaderDataFactory::new(self.arg.data_args.clone())?),
            self.header_processor(),
        )
    }

    pub(crate) fn meta_header_interceptor(&self) -> Result<(String, Arc<dyn Interceptor>), ProcessError> {
        self.single(
            topics::METACHAIN_BLOCKS.to_string(),
            Arc::new(MetaHeaderDataFactory::new(self.arg.data_args.clone())?),
            self.header_processor(),
        )
    }

    /// One per shard, one for the metachain and the broadcast topic.
    pub(crate) fn mini_block_interceptors(&self) -> Result<Pairs, ProcessError> {
        let factory: Arc<dyn InterceptedDataFactory> =
            Arc::new(MiniBlockDataFactory::new(self.arg.data_args.clone())?);
        self.all_destinations()
            .into_iter()
            .chain(std::iter::once(shared_types::ALL_SHARD_ID))
            .map(|destination| {
                let processor = Arc::new(MiniBlockInterceptorProcessor::new(
                    self.arg.pools.mini_blocks.clone(),
                    DataValidator::Nil(NilValidator),
                ));
                self.multi(
                    self.topic(topics::MINI_BLOCKS, destination),
                    factory.clone(),
                    processor,
                )
            })
            .collect()
    }

    /// Account trie on `account_destination`, validator trie on the metachain.
    pub(crate) fn trie_node_interceptors(
        &self,
        account_destination: ShardId,
    ) -> Result<Pairs, ProcessError> {
        let factory: Arc<dyn InterceptedDataFactory> =
            Arc::new(TrieNodeDataFactory::new(self.arg.data_args.clone())?);
        [
            (topics::ACCOUNT_TRIE_NODES, account_destination),
            (topics::VALIDATOR_TRIE_NODES, shared_types::METACHAIN_SHARD_ID),
        ]
        .into_iter()
        .map(|(category, destination)| {
            self.multi(
                self.topic(category, destination),
                factory.clone(),
                Arc::new(TrieNodeInterceptorProcessor::new(
                    self.arg.pools.trie_nodes.clone(),
                )),
            )
        })
        .collect()
    }

    pub(crate) fn peer_shard_interceptor(&self) -> Result<Option<(String, Arc<dyn Interceptor>)>, ProcessError> {
        if !self.arg.config.enable_peer_shard_topic {
            return Ok(None);
        }
        self.single(
            topics::PEER_SHARD.to_string(),
            Arc::new(PeerShardDataFactory::new(self.arg.data_args.clone())?),
            Arc::new(PeerShardInterceptorProcessor::new(
                self.arg.pools.peer_shard_mapper.clone(),
            )),
        )
        .map(Some)
    }

    /// Fills a container and binds every topic, or nothing at all.
    pub(crate) fn register_all(
        &self,
        flavor: &str,
        pairs: Pairs,
    ) -> Result<InterceptorsContainer, ProcessError> {
        let container = InterceptorsContainer::new();
        let (keys, interceptors): (Vec<String>, Vec<Arc<dyn Interceptor>>) =
            pairs.into_iter().unzip();
        container.add_multiple(keys.clone(), interceptors.clone())?;

        let handler = &self.arg.topic_handler;
        let mut registered: Vec<&str> = Vec::with_capacity(keys.len());
        for (topic, interceptor) in keys.iter().zip(interceptors) {
            let result = handler
                .create_topic(topic, true)
                .and_then(|_| handler.register_message_processor(topic, interceptor));
            if let Err(reason) = result {
                warn!(topic = %topic, %reason, "[sc-03] topic registration failed, rolling back");
                for done in registered.iter().rev() {
                    if let Err(err) = handler.unregister_message_processor(done) {
                        warn!(topic = %done, error = %err, "[sc-03] failed to unregister");
                    }
                }
                return Err(ProcessError::TopicRegistration {
                    topic: topic.clone(),
                    reason,
                });
            }
            registered.push(topic);
        }

        info!(
            flavor,
            interceptors = container.len(),
            shards = self.number_of_shards(),
            "[sc-03] interceptors container created"
        );
        Ok(container)
    }
}
