//! Observer Service - governance and query surface over the ledger

use crate::config::ObserverConfig;
use crate::domain::{
    Ballot, BallotIndex, Chain, ChainParams, CrosschainFlags, FundMigrationRecord, ObserverId,
    ObserverSet, SigningKey,
};
use crate::engine::{BallotEngine, CastVote, VoteOutcome};
use crate::error::{ObserverError, ObserverResult};
use crate::ports::inbound::ObserverApi;
use crate::store::{ballots, migrations, nonces, registry};
use shared_types::{BlockContext, ChainId, KeyValueStore, Ledger};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// Observer service
pub struct ObserverService<S: KeyValueStore> {
    config: ObserverConfig,
    engine: BallotEngine,
    ledger: Arc<Ledger<S>>,
}

impl<S: KeyValueStore> ObserverService<S> {
    pub fn new(config: ObserverConfig, ledger: Arc<Ledger<S>>) -> ObserverResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: BallotEngine::new(&config),
            config,
            ledger,
        })
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    pub fn engine(&self) -> &BallotEngine {
        &self.engine
    }

    pub fn ledger(&self) -> &Arc<Ledger<S>> {
        &self.ledger
    }
}

impl<S: KeyValueStore> ObserverApi for ObserverService<S> {
    fn cast_vote(&self, request: CastVote, ctx: BlockContext) -> ObserverResult<VoteOutcome> {
        self.ledger
            .transact(|store| self.engine.cast_vote(store, request, ctx.height))
    }

    fn set_observer_set(&self, observers: Vec<ObserverId>) -> ObserverResult<()> {
        let set = ObserverSet::new(observers);
        self.ledger
            .transact(|store| registry::set_observer_set(store, &set))?;
        info!("[xc-01] observer set replaced ({} members)", set.len());
        Ok(())
    }

    fn add_observer(&self, observer: ObserverId) -> ObserverResult<()> {
        self.ledger.transact(|store| {
            let mut set = registry::get_observer_set(store)?;
            if !set.add(observer.clone()) {
                return Err(ObserverError::ObserverAlreadyExists(observer.clone()));
            }
            registry::set_observer_set(store, &set)
        })?;
        info!("[xc-01] observer {} added", observer);
        Ok(())
    }

    fn replace_observer(&self, old: ObserverId, new: ObserverId) -> ObserverResult<()> {
        self.ledger.transact(|store| {
            let mut set = registry::get_observer_set(store)?;
            if set.contains(&new) {
                return Err(ObserverError::ObserverAlreadyExists(new.clone()));
            }
            if !set.replace(&old, new.clone()) {
                return Err(ObserverError::ObserverNotFound(old.clone()));
            }
            registry::set_observer_set(store, &set)
        })?;
        info!("[xc-01] observer {} replaced by {}", old, new);
        Ok(())
    }

    fn register_chain(&self, chain: Chain, params: ChainParams) -> ObserverResult<()> {
        if params.chain_id != chain.chain_id {
            return Err(ObserverError::InvalidConfig(format!(
                "params for chain {} given for chain {}",
                params.chain_id, chain.chain_id
            )));
        }
        self.ledger.transact(|store| {
            if registry::get_chain(store, chain.chain_id)?.is_some() {
                return Err(ObserverError::ChainAlreadyRegistered(chain.chain_id));
            }
            registry::set_chain(store, &chain)?;
            registry::set_chain_params(store, &params)
        })?;
        info!(
            "[xc-01] chain {} ({}) registered, threshold {}%",
            chain.chain_id, chain.name, params.ballot_threshold_percent
        );
        Ok(())
    }

    fn update_chain_params(&self, params: ChainParams) -> ObserverResult<()> {
        self.ledger.transact(|store| {
            if registry::get_chain(store, params.chain_id)?.is_none() {
                return Err(ObserverError::UnsupportedChain(params.chain_id));
            }
            registry::set_chain_params(store, &params)
        })
    }

    fn set_crosschain_flags(&self, flags: CrosschainFlags) -> ObserverResult<()> {
        self.ledger
            .transact(|store| registry::set_crosschain_flags(store, &flags))?;
        info!(
            "[xc-01] crosschain flags: inbound={} outbound={}",
            flags.is_inbound_enabled, flags.is_outbound_enabled
        );
        Ok(())
    }

    fn register_signing_key(&self, key: SigningKey, make_current: bool) -> ObserverResult<()> {
        self.ledger.transact(|store| {
            registry::append_signing_key_history(store, &key)?;
            if make_current {
                registry::set_current_signing_key(store, &key)?;
            }
            Ok::<_, ObserverError>(())
        })?;
        info!(
            "[xc-01] signing key {} registered (current: {})",
            key.pubkey, make_current
        );
        Ok(())
    }

    fn activate_signing_key(&self, pubkey: &str) -> ObserverResult<()> {
        self.ledger.transact(|store| {
            let key = registry::signing_key_history(store)?
                .into_iter()
                .find(|k| k.pubkey == pubkey)
                .ok_or(ObserverError::SigningKeyNotFound)?;
            registry::set_current_signing_key(store, &key)
        })?;
        info!("[xc-01] signing key {} is now current", pubkey);
        Ok(())
    }

    fn prune_ballots(&self, current_height: u64) -> ObserverResult<usize> {
        let retention = self.config.ballot_retention_blocks;
        if retention == 0 || current_height < retention {
            return Ok(0);
        }
        let max_height = current_height - retention;
        self.ledger
            .transact(|store| ballots::prune_ballots(store, max_height))
    }

    fn get_ballot(&self, index: &BallotIndex) -> ObserverResult<Option<Ballot>> {
        self.ledger.read(|store| ballots::get_ballot(store, index))
    }

    fn observer_set(&self) -> ObserverResult<ObserverSet> {
        self.ledger.read(|store| registry::get_observer_set(store))
    }

    fn chain_params(&self, chain_id: ChainId) -> ObserverResult<Option<ChainParams>> {
        self.ledger
            .read(|store| registry::get_chain_params(store, chain_id))
    }

    fn current_signing_key(&self) -> ObserverResult<Option<SigningKey>> {
        self.ledger
            .read(|store| registry::get_current_signing_key(store))
    }

    fn pending_nonces(&self, signing_key: &str, chain_id: ChainId) -> ObserverResult<BTreeSet<u64>> {
        self.ledger
            .read(|store| nonces::list_pending(store, signing_key, chain_id))
    }

    fn fund_migration(&self, chain_id: ChainId) -> ObserverResult<Option<FundMigrationRecord>> {
        self.ledger
            .read(|store| migrations::get_fund_migration(store, chain_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaleBallotPolicy;
    use crate::domain::{BallotStatus, Network, ObservationType, Vote};
    use shared_types::InMemoryKVStore;

    const ETH: ChainId = ChainId(1);

    fn service(config: ObserverConfig) -> ObserverService<InMemoryKVStore> {
        let ledger = Arc::new(Ledger::new(InMemoryKVStore::new()));
        let svc = ObserverService::new(config, ledger).unwrap();
        svc.set_observer_set(vec!["a".into(), "b".into(), "c".into()])
            .unwrap();
        svc.register_chain(Chain::new(ETH, "eth", Network::Evm), ChainParams::new(ETH, 66))
            .unwrap();
        svc
    }

    fn vote(voter: &str, seed: u8) -> CastVote {
        CastVote {
            ballot_index: [seed; 32],
            observation_type: ObservationType::Outbound,
            chain_id: ETH,
            voter: voter.into(),
            vote: Vote::Yes,
        }
    }

    #[test]
    fn test_add_and_replace_observer() {
        let svc = service(ObserverConfig::default());
        svc.add_observer("d".into()).unwrap();
        assert_eq!(
            svc.add_observer("d".into()),
            Err(ObserverError::ObserverAlreadyExists("d".into()))
        );
        svc.replace_observer("a".into(), "z".into()).unwrap();
        let set = svc.observer_set().unwrap();
        assert!(set.contains(&"z".into()));
        assert!(!set.contains(&"a".into()));
        assert_eq!(
            svc.replace_observer("missing".into(), "y".into()),
            Err(ObserverError::ObserverNotFound("missing".into()))
        );
    }

    #[test]
    fn test_replaced_observer_loses_vote_right() {
        let svc = service(ObserverConfig::default());
        svc.replace_observer("a".into(), "z".into()).unwrap();
        let err = svc.cast_vote(vote("a", 1), BlockContext::new(1, 0)).unwrap_err();
        assert!(matches!(err, ObserverError::NotAuthorizedVoter { .. }));
        assert!(svc.cast_vote(vote("z", 1), BlockContext::new(1, 0)).is_ok());
    }

    #[test]
    fn test_register_chain_twice_rejected() {
        let svc = service(ObserverConfig::default());
        assert_eq!(
            svc.register_chain(Chain::new(ETH, "eth", Network::Evm), ChainParams::new(ETH, 50)),
            Err(ObserverError::ChainAlreadyRegistered(ETH))
        );
        svc.update_chain_params(ChainParams::new(ETH, 100)).unwrap();
        assert_eq!(svc.chain_params(ETH).unwrap().unwrap().ballot_threshold_percent, 100);
    }

    #[test]
    fn test_threshold_change_applies_to_next_vote() {
        let svc = service(ObserverConfig::default());
        svc.cast_vote(vote("a", 2), BlockContext::new(1, 0)).unwrap();
        svc.update_chain_params(ChainParams::new(ETH, 30)).unwrap();
        let out = svc.cast_vote(vote("b", 2), BlockContext::new(2, 0)).unwrap();
        assert!(out.finalized);
        assert_eq!(out.ballot.status, BallotStatus::FinalizedSuccess);
    }

    #[test]
    fn test_signing_key_rotation() {
        let svc = service(ObserverConfig::default());
        assert_eq!(svc.current_signing_key().unwrap(), None);
        svc.register_signing_key(SigningKey::new("k1", 1, 1), true).unwrap();
        svc.register_signing_key(SigningKey::new("k2", 5, 5), false).unwrap();
        assert_eq!(svc.current_signing_key().unwrap().unwrap().pubkey, "k1");
        svc.activate_signing_key("k2").unwrap();
        assert_eq!(svc.current_signing_key().unwrap().unwrap().pubkey, "k2");
        assert_eq!(
            svc.activate_signing_key("nope"),
            Err(ObserverError::SigningKeyNotFound)
        );
    }

    #[test]
    fn test_prune_respects_retention_window() {
        let svc = service(
            ObserverConfig::default()
                .with_ballot_retention_blocks(10)
                .with_stale_ballot_policy(StaleBallotPolicy::KeepPending),
        );
        svc.cast_vote(vote("a", 3), BlockContext::new(5, 0)).unwrap();
        svc.cast_vote(vote("b", 3), BlockContext::new(5, 0)).unwrap();
        assert!(svc.get_ballot(&[3; 32]).unwrap().unwrap().is_finalized());

        assert_eq!(svc.prune_ballots(14).unwrap(), 0);
        assert_eq!(svc.prune_ballots(15).unwrap(), 1);
        assert!(svc.get_ballot(&[3; 32]).unwrap().is_none());
    }
}
