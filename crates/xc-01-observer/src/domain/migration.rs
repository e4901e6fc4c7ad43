//! In-flight fund migration marker

use serde::{Deserialize, Serialize};
use shared_types::{ChainId, Hash};

/// Exists for a chain only while its migration CCTX is unsettled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundMigrationRecord {
    pub chain_id: ChainId,
    pub migration_cctx_index: Hash,
    pub created_height: u64,
}
