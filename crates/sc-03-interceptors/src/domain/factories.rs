//! # Intercepted Data Factories
//!
//! One factory per variant. A factory is bound to a topic's interceptor and
//! turns raw bytes into an [`InterceptedData`]. Collaborator consistency is
//! checked when the factory is built, so a misconfigured node fails at
//! startup instead of rejecting every message.

use std::sync::Arc;

use shared_crypto::Suite;

use crate::domain::intercepted::{
    InterceptedData, InterceptedHeader, InterceptedMetaHeader, InterceptedMiniBlock,
    InterceptedPeerShard, InterceptedRewardTransaction, InterceptedTransaction,
    InterceptedTrieNode, InterceptedUnsignedTransaction,
};
use crate::domain::{ArgInterceptedDataFactory, ProcessError};

/// Turns raw message bytes into intercepted data.
pub trait InterceptedDataFactory: Send + Sync {
    /// Decodes `buff`. No signature is checked here.
    fn create(&self, buff: &[u8]) -> Result<InterceptedData, ProcessError>;
}

fn check_block_suite(args: &ArgInterceptedDataFactory) -> Result<(), ProcessError> {
    if args.block_key_gen.suite() != args.block_single_signer.suite() {
        return Err(ProcessError::SuiteMismatch("block signer"));
    }
    if args.multi_sig_verifier.suite() != Suite::Bls12381
        || args.block_key_gen.suite() != Suite::Bls12381
    {
        return Err(ProcessError::SuiteMismatch("block multisigner"));
    }
    Ok(())
}

fn check_tx_suite(args: &ArgInterceptedDataFactory) -> Result<(), ProcessError> {
    if args.tx_key_gen.suite() != args.tx_single_signer.suite() {
        return Err(ProcessError::SuiteMismatch("tx signer"));
    }
    Ok(())
}

macro_rules! data_factory {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $inner:ident, $check:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            args: Arc<ArgInterceptedDataFactory>,
        }

        impl $name {
            /// Validates the collaborators this variant needs.
            pub fn new(args: Arc<ArgInterceptedDataFactory>) -> Result<Self, ProcessError> {
                let check: fn(&ArgInterceptedDataFactory) -> Result<(), ProcessError> = $check;
                check(&args)?;
                Ok(Self { args })
            }
        }

        impl InterceptedDataFactory for $name {
            fn create(&self, buff: &[u8]) -> Result<InterceptedData, ProcessError> {
                Ok(InterceptedData::$variant($inner::new(buff, self.args.clone())?))
            }
        }
    };
}

data_factory!(
    /// Shard headers.
    ShardHeaderDataFactory,
    ShardHeader,
    InterceptedHeader,
    check_block_suite
);
data_factory!(
    /// Metachain headers.
    MetaHeaderDataFactory,
    MetaHeader,
    InterceptedMetaHeader,
    check_block_suite
);
data_factory!(
    /// User transactions.
    TxDataFactory,
    Transaction,
    InterceptedTransaction,
    check_tx_suite
);
data_factory!(
    /// Reward transactions.
    RewardTxDataFactory,
    RewardTransaction,
    InterceptedRewardTransaction,
    |_| Ok(())
);
data_factory!(
    /// Smart-contract results.
    UnsignedTxDataFactory,
    UnsignedTransaction,
    InterceptedUnsignedTransaction,
    |_| Ok(())
);
data_factory!(
    /// Mini-blocks.
    MiniBlockDataFactory,
    MiniBlock,
    InterceptedMiniBlock,
    |_| Ok(())
);
data_factory!(
    /// Trie nodes.
    TrieNodeDataFactory,
    TrieNode,
    InterceptedTrieNode,
    |_| Ok(())
);
data_factory!(
    /// Peer shard announcements.
    PeerShardDataFactory,
    PeerShard,
    InterceptedPeerShard,
    |_| Ok(())
);
