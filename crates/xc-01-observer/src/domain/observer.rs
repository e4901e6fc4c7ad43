//! Observer identities and the authorized observer set

use serde::{Deserialize, Serialize};
use std::fmt;

/// Observer identifier (the observer's host-chain account)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObserverId(pub String);

impl ObserverId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObserverId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Ordered set of authorized voters.
///
/// Order is registration order; membership is unique.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverSet {
    observers: Vec<ObserverId>,
}

impl ObserverSet {
    /// Builds a set, dropping repeated identities (first occurrence wins).
    pub fn new(observers: impl IntoIterator<Item = ObserverId>) -> Self {
        let mut set = Self::default();
        for observer in observers {
            if !set.contains(&observer) {
                set.observers.push(observer);
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn contains(&self, observer: &ObserverId) -> bool {
        self.observers.iter().any(|o| o == observer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObserverId> {
        self.observers.iter()
    }

    /// Appends a member. Returns false if already present.
    pub fn add(&mut self, observer: ObserverId) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Swaps `old` for `new` in place, keeping its position.
    pub fn replace(&mut self, old: &ObserverId, new: ObserverId) -> bool {
        if self.contains(&new) {
            return false;
        }
        match self.observers.iter().position(|o| o == old) {
            Some(pos) => {
                self.observers[pos] = new;
                true
            }
            None => false,
        }
    }

    /// Votes required to finalize: `ceil(threshold_percent * len / 100)`, at least 1.
    pub fn quorum(&self, threshold_percent: u8) -> usize {
        let n = self.observers.len() * threshold_percent as usize;
        n.div_ceil(100).max(1)
    }
}
