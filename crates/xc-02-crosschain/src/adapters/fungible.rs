//! Fungible Gateway Adapter
//!
//! Scriptable in-memory `FungibleGateway` for tests.

use crate::domain::DepositError;
use crate::ports::outbound::{DepositReceipt, DepositRequest, FungibleGateway};
use parking_lot::Mutex;
use shared_types::hash_to_hex;
use std::collections::VecDeque;
use tracing::debug;

/// In-memory fungible gateway.
///
/// Scripted results are consumed in order; once the script is empty every
/// deposit succeeds.
#[derive(Default)]
pub struct MockFungibleGateway {
    script: Mutex<VecDeque<Result<DepositReceipt, DepositError>>>,
    requests: Mutex<Vec<DepositRequest>>,
}

impl MockFungibleGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next deposit.
    pub fn push_result(&self, result: Result<DepositReceipt, DepositError>) {
        self.script.lock().push_back(result);
    }

    /// Queue a failure for the next deposit.
    pub fn fail_next(&self, error: DepositError) {
        self.push_result(Err(error));
    }

    /// Every deposit seen so far.
    pub fn requests(&self) -> Vec<DepositRequest> {
        self.requests.lock().clone()
    }
}

impl FungibleGateway for MockFungibleGateway {
    fn deposit_and_call(&self, request: &DepositRequest) -> Result<DepositReceipt, DepositError> {
        self.requests.lock().push(request.clone());
        let scripted = self.script.lock().pop_front();
        let result = scripted.unwrap_or_else(|| {
            Ok(DepositReceipt {
                tx_hash: hash_to_hex(&request.cctx_index),
                contract_call: !request.payload.is_empty(),
            })
        });
        debug!(
            "[xc-02] mock deposit of {} to {}: ok={}",
            request.amount,
            request.receiver,
            result.is_ok()
        );
        result
    }
}
