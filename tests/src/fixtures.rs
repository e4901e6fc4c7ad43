//! Shared test harness
//!
//! `TestNetwork` wires an observer service and a cross-chain service to one
//! ledger, with recording adapters for every outbound port.

use shared_types::{BlockContext, ChainId, Hash, InMemoryKVStore, Ledger, U256};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;
use xc_01_observer::{
    Chain, ChainParams, Network, ObserverApi, ObserverConfig, ObserverId, ObserverService,
    SigningKey,
};
use xc_02_crosschain::{
    CoinType, CrossChainApi, CrossChainConfig, CrossChainDependencies, CrossChainService,
    CrossChainTx, MockFungibleGateway, MsgVoteInbound, MsgVoteOutbound, ProtocolVersion,
    ReceiveStatus, RecordingEventPublisher, RecordingGasStabilityPool, RevertOptions,
};

pub const ETH: ChainId = ChainId(1);
pub const BTC: ChainId = ChainId(8332);
pub const HOST: ChainId = ChainId(7000);
pub const SIGNING_KEY: &str = "tss-key-1";

static TRACING: Once = Once::new();

/// Installs a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub struct TestNetwork {
    pub observer: ObserverService<InMemoryKVStore>,
    pub crosschain: CrossChainService<InMemoryKVStore>,
    pub fungible: Arc<MockFungibleGateway>,
    pub pool: Arc<RecordingGasStabilityPool>,
    pub events: Arc<RecordingEventPublisher>,
    pub observers: Vec<ObserverId>,
    height: u64,
}

impl TestNetwork {
    /// `observer_count` observers, ETH and BTC registered at `threshold` percent.
    pub fn new(observer_count: usize, threshold: u8) -> Self {
        init_tracing();
        let ledger = Arc::new(Ledger::new(InMemoryKVStore::new()));
        let observer = ObserverService::new(ObserverConfig::default(), ledger.clone())
            .expect("default observer config is valid");

        let observers: Vec<ObserverId> = (0..observer_count)
            .map(|i| ObserverId::new(format!("observer-{i}")))
            .collect();
        observer.set_observer_set(observers.clone()).expect("observer set");
        for (chain, network) in [(ETH, Network::Evm), (BTC, Network::Bitcoin)] {
            observer
                .register_chain(
                    Chain::new(chain, format!("chain-{chain}"), network),
                    ChainParams::new(chain, threshold),
                )
                .expect("register chain");
        }
        observer
            .register_chain(
                Chain::new(HOST, "host", Network::Host),
                ChainParams::new(HOST, threshold),
            )
            .expect("register host");
        observer
            .register_signing_key(SigningKey::new(SIGNING_KEY, 1, 2), true)
            .expect("signing key");

        let fungible = Arc::new(MockFungibleGateway::new());
        let pool = Arc::new(RecordingGasStabilityPool::new());
        let events = Arc::new(RecordingEventPublisher::new());
        let crosschain = CrossChainService::new(
            CrossChainDependencies {
                ledger,
                engine: observer.engine().clone(),
                fungible: fungible.clone(),
                stability_pool: pool.clone(),
                events: Some(events.clone()),
            },
            CrossChainConfig::default().with_host_chain_id(HOST),
        )
        .expect("default crosschain config is valid");

        Self {
            observer,
            crosschain,
            fungible,
            pool,
            events,
            observers,
            height: 100,
        }
    }

    /// Next block.
    pub fn next_block(&mut self) -> BlockContext {
        self.height += 1;
        BlockContext::new(self.height, 1_700_000_000 + self.height * 6)
    }

    pub fn cctx(&self, index: &Hash) -> CrossChainTx {
        self.crosschain
            .get_cctx(index)
            .expect("store readable")
            .expect("cctx exists")
    }

    pub fn pending_nonces(&self, chain_id: ChainId) -> Vec<u64> {
        self.observer
            .pending_nonces(SIGNING_KEY, chain_id)
            .expect("store readable")
            .into_iter()
            .collect()
    }

    /// Every observer in `voters` votes `msg`; returns the CCTX index once created.
    pub fn vote_inbound_by(&mut self, msg: &MsgVoteInbound, voters: &[ObserverId]) -> Option<Hash> {
        let mut created = None;
        for voter in voters {
            let ctx = self.next_block();
            let mut vote = msg.clone();
            vote.creator = voter.clone();
            let receipt = self.crosschain.vote_inbound(ctx, vote).expect("inbound vote");
            created = created.or(receipt.cctx_index);
        }
        created
    }

    pub fn vote_outbound_by(&mut self, msg: &MsgVoteOutbound, voters: &[ObserverId]) {
        for voter in voters {
            let ctx = self.next_block();
            let mut vote = msg.clone();
            vote.creator = voter.clone();
            self.crosschain.vote_outbound(ctx, vote).expect("outbound vote");
        }
    }
}

pub fn inbound_msg(hash: &str, receiver_chain: ChainId, amount: u64) -> MsgVoteInbound {
    MsgVoteInbound {
        creator: ObserverId::new("observer-0"),
        sender: "0x5e4de5".into(),
        sender_chain_id: ETH,
        tx_origin: String::new(),
        receiver: "0x4ece17e4".into(),
        receiver_chain_id: receiver_chain,
        amount: U256::from(amount),
        message: String::new(),
        inbound_hash: hash.into(),
        inbound_block_height: 18_000_000,
        gas_limit: 100_000,
        coin_type: CoinType::Gas,
        asset: String::new(),
        event_index: 0,
        protocol_version: ProtocolVersion::V1,
        revert_options: RevertOptions::default(),
    }
}

/// Outbound report for the current outbound record of `cctx`.
pub fn outbound_msg(cctx: &CrossChainTx, status: ReceiveStatus, value: U256) -> MsgVoteOutbound {
    let current = cctx.current_outbound();
    MsgVoteOutbound {
        creator: ObserverId::new("observer-0"),
        cctx_index: cctx.index,
        observed_outbound_hash: format!("0xout-{}", current.nonce.unwrap_or_default()),
        observed_outbound_block_height: 18_000_100,
        observed_outbound_gas_used: 21_000,
        observed_outbound_effective_gas_price: U256::from(30u64),
        observed_outbound_effective_gas_limit: 50_000,
        value_received: value,
        status,
        outbound_chain_id: current.receiver_chain_id,
        outbound_nonce: current.nonce.unwrap_or_default(),
        coin_type: cctx.inbound.coin_type,
    }
}
