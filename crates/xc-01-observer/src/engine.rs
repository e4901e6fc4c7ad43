//! Ballot Engine
//!
//! Applies one observer vote to a ballot and decides finalization.
//!
//! ## Rules
//!
//! - Only members of the current observer set may vote.
//! - One vote per observer per ballot.
//! - After each vote: Yes ≥ quorum finalizes as success, otherwise No ≥ quorum
//!   finalizes as failure. Quorum is taken from the ballot chain's params.
//! - A finalized ballot never changes. A late vote from an observer who has
//!   not voted is accepted as a no-op and reports `finalized = false`.

use crate::config::{ObserverConfig, StaleBallotPolicy};
use crate::domain::{Ballot, BallotIndex, ObservationType, ObserverId, Vote};
use crate::error::{ObserverError, ObserverResult};
use crate::store::{ballots, registry};
use shared_types::{ChainId, KeyValueStore};
use tracing::{debug, info};

/// One observer vote
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastVote {
    pub ballot_index: BallotIndex,
    pub observation_type: ObservationType,
    pub chain_id: ChainId,
    pub voter: ObserverId,
    pub vote: Vote,
}

/// Result of `BallotEngine::cast_vote`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteOutcome {
    /// True only for the vote that finalized the ballot
    pub finalized: bool,
    /// True if this vote created the ballot
    pub is_new: bool,
    pub ballot: Ballot,
}

#[derive(Clone, Debug, Default)]
pub struct BallotEngine {
    stale_ballot_policy: StaleBallotPolicy,
}

impl BallotEngine {
    pub fn new(config: &ObserverConfig) -> Self {
        Self {
            stale_ballot_policy: config.stale_ballot_policy,
        }
    }

    /// Records `request` and persists the ballot.
    pub fn cast_vote<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        request: CastVote,
        height: u64,
    ) -> ObserverResult<VoteOutcome> {
        let observers = registry::get_observer_set(store)?;
        if !observers.contains(&request.voter) {
            return Err(ObserverError::NotAuthorizedVoter {
                voter: request.voter,
            });
        }
        let (_, params) = registry::supported_chain(store, request.chain_id)?;

        let (mut ballot, is_new) = match ballots::get_ballot(store, &request.ballot_index)? {
            Some(ballot) => (ballot, false),
            None => (
                Ballot::new(
                    request.ballot_index,
                    request.chain_id,
                    request.observation_type,
                    height,
                ),
                true,
            ),
        };

        if ballot.has_voted(&request.voter) {
            return Err(ObserverError::DuplicateVote {
                voter: request.voter,
                ballot: ballot.index_hex(),
            });
        }
        if ballot.is_finalized() {
            debug!(
                "[xc-01] late vote from {} on finalized ballot {}",
                request.voter,
                ballot.index_hex()
            );
            return Ok(VoteOutcome {
                finalized: false,
                is_new: false,
                ballot,
            });
        }

        ballot.record_vote(request.voter.clone(), request.vote)?;

        let quorum = observers.quorum(params.ballot_threshold_percent);
        let voted = ballot
            .voter_votes
            .iter()
            .filter(|v| observers.contains(&v.voter))
            .count();
        let outstanding = observers.len().saturating_sub(voted);
        let finalized = ballot.evaluate(quorum, outstanding, self.stale_ballot_policy, height);

        if is_new {
            ballots::add_ballot_to_height_list(store, height, &ballot.index)?;
        }
        ballots::set_ballot(store, &ballot)?;

        if finalized {
            info!(
                "[xc-01] ballot {} finalized as {:?} ({} votes, quorum {})",
                ballot.index_hex(),
                ballot.status,
                ballot.voter_votes.len(),
                quorum
            );
        } else {
            debug!(
                "[xc-01] vote {} by {} on ballot {} ({}/{})",
                request.vote,
                request.voter,
                ballot.index_hex(),
                ballot.tally().total(),
                quorum
            );
        }

        Ok(VoteOutcome {
            finalized,
            is_new,
            ballot,
        })
    }
}
