//! Shared handle - the public surface of an agreement instance
//!
//! Guarded operations take the instance's reentrancy guard before the state
//! lock, so a vault implementation that calls back into the same instance
//! mid-operation fails with `ReentrancyDetected` instead of observing or
//! corrupting a half-finished transition. Execution is one operation at a
//! time; entry never blocks.
//!
//! Read accessors bypass the guard: they are side-effect-free. They still
//! take the state lock briefly and so must not be invoked from within a
//! vault callback.

use std::sync::Arc;

use parking_lot::Mutex;
use tripact_custody::Vault;
use tripact_types::{
    AccountId, AgreementId, Amount, DocumentDigest, EventRecord, LifecycleState, PartyId, Result,
};

use crate::agreement::{Agreement, AgreementConfig};
use crate::guard::ReentrancyGuard;
use crate::roles::Parties;

/// Cloneable handle to a single agreement instance
#[derive(Clone)]
pub struct SharedAgreement {
    inner: Arc<Mutex<Agreement>>,
    guard: Arc<ReentrancyGuard>,
}

impl SharedAgreement {
    /// Create a new agreement over the given vault
    pub fn new(config: AgreementConfig, vault: Arc<dyn Vault>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Agreement::new(config, vault))),
            guard: Arc::new(ReentrancyGuard::new()),
        }
    }

    // ========================================================================
    // Guarded operations
    // ========================================================================

    /// Put the agreement in force (joint authority)
    pub fn execute_agreement(&self, caller: &PartyId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner.lock().execute_agreement(caller)
    }

    /// Change the agreed amount and document digest (joint authority)
    pub fn modify_agreement(
        &self,
        caller: &PartyId,
        new_amount: Amount,
        new_doc_hash: DocumentDigest,
    ) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner
            .lock()
            .modify_agreement(caller, new_amount, new_doc_hash)
    }

    /// Deposit the agreed amount into custody (purchaser)
    pub fn fund(&self, caller: &PartyId, deposit: Amount) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner.lock().fund(caller, deposit)
    }

    /// Release the custodied amount to the supplier (purchaser)
    pub fn release_payment(&self, caller: &PartyId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner.lock().release_payment(caller)
    }

    /// Return the custodied amount to the purchaser (supplier)
    pub fn return_payment(&self, caller: &PartyId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner.lock().return_payment(caller)
    }

    /// Escalate a dispute to the arbitrator (supplier or purchaser)
    pub fn request_arbitration(&self, caller: &PartyId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner.lock().request_arbitration(caller)
    }

    /// Resolve the dispute by paying the supplier (arbitrator)
    pub fn resolve_in_favor_of_supplier(&self, caller: &PartyId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner.lock().resolve_in_favor_of_supplier(caller)
    }

    /// Resolve the dispute by paying the purchaser (arbitrator)
    pub fn resolve_in_favor_of_purchaser(&self, caller: &PartyId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner.lock().resolve_in_favor_of_purchaser(caller)
    }

    /// Step down from the dispute without moving value (arbitrator)
    pub fn cancel_arbitration(&self, caller: &PartyId) -> Result<()> {
        let _entered = self.guard.enter()?;
        self.inner.lock().cancel_arbitration(caller)
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    /// Current amount due (any participant)
    pub fn get_amount(&self, caller: &PartyId) -> Result<Amount> {
        self.inner.lock().get_amount(caller)
    }

    /// Current document digest (any participant)
    pub fn get_doc_hash(&self, caller: &PartyId) -> Result<DocumentDigest> {
        self.inner.lock().get_doc_hash(caller)
    }

    /// Derived lifecycle state
    pub fn lifecycle(&self) -> LifecycleState {
        self.inner.lock().lifecycle()
    }

    /// Snapshot of the event journal, oldest first
    pub fn events(&self) -> Vec<EventRecord> {
        self.inner.lock().events().to_vec()
    }

    pub fn id(&self) -> AgreementId {
        self.inner.lock().id().clone()
    }

    pub fn name(&self) -> String {
        self.inner.lock().name().to_string()
    }

    pub fn parties(&self) -> Parties {
        self.inner.lock().parties().clone()
    }

    /// The vault account holding this agreement's custodied value
    pub fn custody_account(&self) -> AccountId {
        self.inner.lock().custody_account().clone()
    }
}
