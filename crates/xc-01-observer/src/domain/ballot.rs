//! Ballot entity and tally rules
//!
//! A ballot collects observer votes on one external observation. Its status is
//! re-evaluated after every vote from the tally and the current quorum only.

use super::observer::ObserverId;
use crate::config::StaleBallotPolicy;
use crate::error::{ObserverError, ObserverResult};
use serde::{Deserialize, Serialize};
use shared_types::{hash_to_hex, ChainId, Hash};
use std::fmt;

/// Ballot index: digest of the observation it votes on
pub type BallotIndex = Hash;

/// An observer's vote
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    /// Observed as reported (success)
    Yes,
    /// Observed as failed
    No,
    NotYetVoted,
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallotStatus {
    Pending,
    FinalizedSuccess,
    FinalizedFailure,
}

impl BallotStatus {
    pub fn is_finalized(&self) -> bool {
        !matches!(self, BallotStatus::Pending)
    }
}

/// Kind of external event a ballot observes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationType {
    Inbound,
    Outbound,
}

/// One recorded vote
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterVote {
    pub voter: ObserverId,
    pub vote: Vote,
}

/// Yes/No counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub yes: usize,
    pub no: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.yes + self.no
    }
}

/// Ballot entity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub index: BallotIndex,
    pub chain_id: ChainId,
    pub observation_type: ObservationType,
    /// Votes in the order they were cast
    pub voter_votes: Vec<VoterVote>,
    pub status: BallotStatus,
    pub creation_height: u64,
    pub finalized_height: Option<u64>,
}

impl Ballot {
    pub fn new(
        index: BallotIndex,
        chain_id: ChainId,
        observation_type: ObservationType,
        creation_height: u64,
    ) -> Self {
        Self {
            index,
            chain_id,
            observation_type,
            voter_votes: Vec::new(),
            status: BallotStatus::Pending,
            creation_height,
            finalized_height: None,
        }
    }

    pub fn index_hex(&self) -> String {
        hash_to_hex(&self.index)
    }

    pub fn is_finalized(&self) -> bool {
        self.status.is_finalized()
    }

    /// The vote recorded for `voter`, or `NotYetVoted`.
    pub fn vote_of(&self, voter: &ObserverId) -> Vote {
        self.voter_votes
            .iter()
            .find(|v| &v.voter == voter)
            .map(|v| v.vote)
            .unwrap_or(Vote::NotYetVoted)
    }

    pub fn has_voted(&self, voter: &ObserverId) -> bool {
        self.vote_of(voter) != Vote::NotYetVoted
    }

    /// Appends a vote. The caller checks finalization afterwards.
    pub fn record_vote(&mut self, voter: ObserverId, vote: Vote) -> ObserverResult<()> {
        if vote == Vote::NotYetVoted {
            return Err(ObserverError::InvalidVote(vote.to_string()));
        }
        if self.has_voted(&voter) {
            return Err(ObserverError::DuplicateVote {
                voter,
                ballot: self.index_hex(),
            });
        }
        self.voter_votes.push(VoterVote { voter, vote });
        Ok(())
    }

    pub fn tally(&self) -> Tally {
        self.voter_votes
            .iter()
            .fold(Tally::default(), |mut t, v| {
                match v.vote {
                    Vote::Yes => t.yes += 1,
                    Vote::No => t.no += 1,
                    Vote::NotYetVoted => {}
                }
                t
            })
    }

    /// Applies the finalization rule. Returns true if this call finalized
    /// the ballot.
    ///
    /// `outstanding` is how many current observers have not voted yet.
    pub fn evaluate(
        &mut self,
        quorum: usize,
        outstanding: usize,
        policy: StaleBallotPolicy,
        height: u64,
    ) -> bool {
        if self.is_finalized() {
            return false;
        }
        let tally = self.tally();
        let next = if tally.yes >= quorum {
            BallotStatus::FinalizedSuccess
        } else if tally.no >= quorum {
            BallotStatus::FinalizedFailure
        } else if policy == StaleBallotPolicy::FinalizeAsFailure
            && tally.yes + outstanding < quorum
            && tally.no + outstanding < quorum
        {
            BallotStatus::FinalizedFailure
        } else {
            return false;
        };
        self.status = next;
        self.finalized_height = Some(height);
        true
    }
}
