//! Interceptor set of a metachain node.

use super::{ArgInterceptorsContainerFactory, BaseContainerFactory};
use crate::domain::ProcessError;
use crate::service::InterceptorsContainer;

/// Wires the topics the metachain listens on.
///
/// Unlike a shard, the metachain hears the header topic of every shard and
/// has no reward topic, since it is the one emitting rewards.
pub struct MetaInterceptorsContainerFactory {
    base: BaseContainerFactory,
}

impl MetaInterceptorsContainerFactory {
    /// Fails unless `arg` describes a metachain node.
    pub fn new(arg: ArgInterceptorsContainerFactory) -> Result<Self, ProcessError> {
        if arg.config.self_shard_id != shared_types::METACHAIN_SHARD_ID {
            return Err(ProcessError::InvalidConfig(format!(
                "metachain container requested on shard {}",
                arg.config.self_shard_id
            )));
        }
        Ok(Self {
            base: BaseContainerFactory::new(arg)?,
        })
    }

    /// Builds every interceptor and binds its topic.
    pub fn create(&self) -> Result<InterceptorsContainer, ProcessError> {
        let base = &self.base;
        let mut pairs = Vec::new();
        for shard in 0..base.number_of_shards() {
            pairs.push(base.shard_header_interceptor(shard)?);
        }
        pairs.push(base.meta_header_interceptor()?);
        pairs.extend(base.tx_interceptors()?);
        pairs.extend(base.unsigned_tx_interceptors()?);
        pairs.extend(base.mini_block_interceptors()?);
        pairs.extend(base.trie_node_interceptors(base.self_id())?);
        pairs.extend(base.peer_shard_interceptor()?);

        base.register_all("metachain", pairs)
    }
}
