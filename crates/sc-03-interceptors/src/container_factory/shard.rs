//! Interceptor set of a shard node.

use super::{ArgInterceptorsContainerFactory, BaseContainerFactory};
use crate::domain::ProcessError;
use crate::service::InterceptorsContainer;

/// Wires the topics a shard listens on.
///
/// With `n` shards: `n + 1` transaction and unsigned-transaction topics,
/// one reward topic, the own shard-header topic, `n + 2` mini-block topics,
/// the metachain-header topic and two trie-node topics.
pub struct ShardInterceptorsContainerFactory {
    base: BaseContainerFactory,
}

impl ShardInterceptorsContainerFactory {
    /// Fails when `arg` describes the metachain.
    pub fn new(arg: ArgInterceptorsContainerFactory) -> Result<Self, ProcessError> {
        if arg.config.self_shard_id == shared_types::METACHAIN_SHARD_ID {
            return Err(ProcessError::InvalidConfig(
                "shard container requested on a metachain node".into(),
            ));
        }
        Ok(Self {
            base: BaseContainerFactory::new(arg)?,
        })
    }

    /// Builds every interceptor and registers its topic.
    pub fn create(&self) -> Result<InterceptorsContainer, ProcessError> {
        let base = &self.base;
        let mut pairs = base.tx_interceptors()?;
        pairs.extend(base.unsigned_tx_interceptors()?);
        pairs.push(base.reward_tx_interceptor()?);
        pairs.push(base.shard_header_interceptor(shared_types::METACHAIN_SHARD_ID)?);
        pairs.extend(base.mini_block_interceptors()?);
        pairs.push(base.meta_header_interceptor()?);
        pairs.extend(base.trie_node_interceptors(base.self_id())?);
        pairs.extend(base.peer_shard_interceptor()?);

        base.register_all("shard", pairs)
    }
}
