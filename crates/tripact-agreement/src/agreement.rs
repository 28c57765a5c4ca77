//! The agreement state machine
//!
//! Every operation runs the same gauntlet, in order: role check, lifecycle
//! check, custody-balance check (for value-moving transitions), state
//! mutation, vault interaction, event append. State is committed before the
//! vault is invoked; a failed transfer restores the prior flags and the
//! operation fails with `TransferFailed`.
//!
//! The agreement is reusable across cycles: completing or cancelling
//! returns it to inactive, from which the joint authority may execute it
//! again.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use tripact_custody::Vault;
use tripact_types::{
    AccountId, AgreementError, AgreementEvent, AgreementId, Amount, DocumentDigest, EventRecord,
    LifecycleState, PartyId, Result, Role,
};

use crate::roles::Parties;

/// Construction-time inputs, immutable after creation except `amount` and
/// `doc_hash` via `modify_agreement`
#[derive(Debug, Clone)]
pub struct AgreementConfig {
    /// Display label, for human context only
    pub name: String,
    pub supplier: PartyId,
    pub supplier_account: AccountId,
    pub purchaser: PartyId,
    pub purchaser_account: AccountId,
    pub arbitrator: PartyId,
    pub joint_authority: PartyId,
    /// Initial amount due under the agreement
    pub amount: Amount,
    /// Digest of the off-system agreement document
    pub doc_hash: DocumentDigest,
}

/// A tri-party custody agreement
///
/// Single instance, created once, mutated in place for its entire life.
/// It never reaches a destroyed state - inactive is re-enterable.
pub struct Agreement {
    id: AgreementId,
    name: String,
    parties: Parties,
    custody_account: AccountId,
    amount: Amount,
    doc_hash: DocumentDigest,
    active: bool,
    in_arbitration: bool,
    funded: bool,
    events: Vec<EventRecord>,
    vault: Arc<dyn Vault>,
}

impl Agreement {
    /// Create a new agreement over the given vault
    pub fn new(config: AgreementConfig, vault: Arc<dyn Vault>) -> Self {
        let id = AgreementId::new();
        info!(
            "Agreement {} ({}) created: amount {}",
            id, config.name, config.amount
        );
        Self {
            id,
            name: config.name,
            parties: Parties {
                supplier: config.supplier,
                purchaser: config.purchaser,
                arbitrator: config.arbitrator,
                joint_authority: config.joint_authority,
                supplier_account: config.supplier_account,
                purchaser_account: config.purchaser_account,
            },
            custody_account: AccountId::new(),
            amount: config.amount,
            doc_hash: config.doc_hash,
            active: false,
            in_arbitration: false,
            funded: false,
            events: Vec::new(),
            vault,
        }
    }

    // ========================================================================
    // Lifecycle operations
    // ========================================================================

    /// Put the agreement in force (joint authority)
    pub fn execute_agreement(&mut self, caller: &PartyId) -> Result<()> {
        self.parties.require(caller, Role::JointAuthority)?;
        if self.active {
            return Err(self.invalid_state("execute_agreement"));
        }

        self.active = true;
        info!("Agreement {} executed", self.id);
        self.append(AgreementEvent::Executed);
        Ok(())
    }

    /// Change the agreed amount and document digest (joint authority)
    ///
    /// If the agreement is funded, the current custodied amount is refunded
    /// to the purchaser before the new terms apply; the agreement returns
    /// to active (unfunded). The operation accepts no inbound value.
    pub fn modify_agreement(
        &mut self,
        caller: &PartyId,
        new_amount: Amount,
        new_doc_hash: DocumentDigest,
    ) -> Result<()> {
        self.parties.require(caller, Role::JointAuthority)?;
        if !self.active {
            return Err(self.invalid_state("modify_agreement"));
        }

        if self.funded {
            self.check_custody_balance()?;
            let refund = self.amount;
            let recipient = self.parties.purchaser_account.clone();
            self.funded = false;
            if let Err(e) = self.vault.transfer(&self.custody_account, &recipient, refund) {
                self.funded = true;
                warn!("Agreement {} refund rolled back: {}", self.id, e);
                return Err(AgreementError::TransferFailed {
                    reason: e.to_string(),
                });
            }
            info!(
                "Agreement {} refunded {} to purchaser before modification",
                self.id, refund
            );
        }

        self.amount = new_amount;
        self.doc_hash = new_doc_hash;
        info!("Agreement {} modified: amount {}", self.id, new_amount);
        self.append(AgreementEvent::Modified {
            amount: new_amount,
            doc_hash: new_doc_hash,
        });
        Ok(())
    }

    /// Deposit the agreed amount into custody (purchaser)
    ///
    /// The deposit must equal the agreed amount exactly; any mismatch fails
    /// before custody is touched.
    pub fn fund(&mut self, caller: &PartyId, deposit: Amount) -> Result<()> {
        self.parties.require(caller, Role::Purchaser)?;
        if !self.active || self.funded {
            return Err(self.invalid_state("fund"));
        }
        if deposit != self.amount {
            return Err(AgreementError::AmountMismatch {
                expected: self.amount,
                actual: deposit,
            });
        }

        self.funded = true;
        if let Err(e) = self.vault.deposit(&self.custody_account, deposit) {
            self.funded = false;
            warn!("Agreement {} funding rolled back: {}", self.id, e);
            return Err(AgreementError::TransferFailed {
                reason: e.to_string(),
            });
        }
        info!("Agreement {} funded with {}", self.id, deposit);
        self.append(AgreementEvent::Funded { amount: deposit });
        Ok(())
    }

    /// Release the custodied amount to the supplier (purchaser)
    pub fn release_payment(&mut self, caller: &PartyId) -> Result<()> {
        self.parties.require(caller, Role::Purchaser)?;
        if !self.active || !self.funded {
            return Err(self.invalid_state("release_payment"));
        }

        let recipient = self.parties.supplier_account.clone();
        self.close_with_payout(&recipient)?;
        let paid_to = self.parties.supplier.clone();
        self.append(AgreementEvent::Completed { paid_to });
        Ok(())
    }

    /// Return the custodied amount to the purchaser (supplier)
    pub fn return_payment(&mut self, caller: &PartyId) -> Result<()> {
        self.parties.require(caller, Role::Supplier)?;
        if !self.active || !self.funded {
            return Err(self.invalid_state("return_payment"));
        }

        let recipient = self.parties.purchaser_account.clone();
        self.close_with_payout(&recipient)?;
        let refunded_to = self.parties.purchaser.clone();
        self.append(AgreementEvent::Cancelled { refunded_to });
        Ok(())
    }

    /// Escalate a dispute to the arbitrator (supplier or purchaser)
    pub fn request_arbitration(&mut self, caller: &PartyId) -> Result<()> {
        self.parties.require(caller, Role::EitherEntity)?;
        if !self.active || !self.funded {
            return Err(self.invalid_state("request_arbitration"));
        }

        self.in_arbitration = true;
        info!("Agreement {} arbitration requested by {}", self.id, caller);
        self.append(AgreementEvent::ArbitrationRequested {
            requestor: caller.clone(),
        });
        Ok(())
    }

    // ========================================================================
    // Arbitration operations
    // ========================================================================

    /// Resolve the dispute by paying the supplier (arbitrator)
    pub fn resolve_in_favor_of_supplier(&mut self, caller: &PartyId) -> Result<()> {
        self.parties.require(caller, Role::Arbitrator)?;
        self.require_disputed("resolve_in_favor_of_supplier")?;

        let recipient = self.parties.supplier_account.clone();
        self.close_with_payout(&recipient)?;
        let paid_to = self.parties.supplier.clone();
        self.append(AgreementEvent::ArbitrationCompleted);
        self.append(AgreementEvent::Completed { paid_to });
        Ok(())
    }

    /// Resolve the dispute by paying the purchaser (arbitrator)
    pub fn resolve_in_favor_of_purchaser(&mut self, caller: &PartyId) -> Result<()> {
        self.parties.require(caller, Role::Arbitrator)?;
        self.require_disputed("resolve_in_favor_of_purchaser")?;

        let recipient = self.parties.purchaser_account.clone();
        self.close_with_payout(&recipient)?;
        let paid_to = self.parties.purchaser.clone();
        self.append(AgreementEvent::ArbitrationCompleted);
        self.append(AgreementEvent::Completed { paid_to });
        Ok(())
    }

    /// Step down from the dispute without moving value (arbitrator)
    ///
    /// Returns the parties to active (funded) so they may retry release or
    /// return, or re-escalate.
    pub fn cancel_arbitration(&mut self, caller: &PartyId) -> Result<()> {
        self.parties.require(caller, Role::Arbitrator)?;
        self.require_disputed("cancel_arbitration")?;

        self.in_arbitration = false;
        info!("Agreement {} arbitration cancelled", self.id);
        self.append(AgreementEvent::ArbitrationCompleted);
        Ok(())
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Current amount due (any participant)
    pub fn get_amount(&self, caller: &PartyId) -> Result<Amount> {
        self.parties.require(caller, Role::AnyParticipant)?;
        Ok(self.amount)
    }

    /// Current document digest (any participant)
    pub fn get_doc_hash(&self, caller: &PartyId) -> Result<DocumentDigest> {
        self.parties.require(caller, Role::AnyParticipant)?;
        Ok(self.doc_hash)
    }

    /// Derived lifecycle state
    pub fn lifecycle(&self) -> LifecycleState {
        LifecycleState::from_flags(self.active, self.funded, self.in_arbitration)
    }

    /// The event journal, oldest first
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn id(&self) -> &AgreementId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parties(&self) -> &Parties {
        &self.parties
    }

    /// The vault account holding this agreement's custodied value
    pub fn custody_account(&self) -> &AccountId {
        &self.custody_account
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn invalid_state(&self, operation: &'static str) -> AgreementError {
        AgreementError::InvalidState {
            operation,
            state: self.lifecycle(),
        }
    }

    fn require_disputed(&self, operation: &'static str) -> Result<()> {
        if !self.active || !self.funded || !self.in_arbitration {
            return Err(self.invalid_state(operation));
        }
        Ok(())
    }

    /// Custodied balance must equal the agreed amount exactly before any
    /// payout - no tolerance for drift, surplus, or shortfall.
    fn check_custody_balance(&self) -> Result<()> {
        let held = self.vault.balance(&self.custody_account);
        if held != self.amount {
            return Err(AgreementError::BalanceInvariantViolation {
                held,
                expected: self.amount,
            });
        }
        Ok(())
    }

    /// Pay the full custodied amount to a recipient and return to inactive
    ///
    /// Flags are flipped before the vault is invoked; a failed transfer
    /// restores them and aborts the operation.
    fn close_with_payout(&mut self, recipient: &AccountId) -> Result<()> {
        self.check_custody_balance()?;

        let snapshot = (self.active, self.in_arbitration, self.funded);
        self.active = false;
        self.in_arbitration = false;
        self.funded = false;

        if let Err(e) = self
            .vault
            .transfer(&self.custody_account, recipient, self.amount)
        {
            (self.active, self.in_arbitration, self.funded) = snapshot;
            warn!("Agreement {} payout rolled back: {}", self.id, e);
            return Err(AgreementError::TransferFailed {
                reason: e.to_string(),
            });
        }

        info!(
            "Agreement {} paid out {} to {}",
            self.id, self.amount, recipient
        );
        Ok(())
    }

    fn append(&mut self, event: AgreementEvent) {
        self.events.push(EventRecord {
            seq: self.events.len() as u64,
            at: Utc::now(),
            event,
        });
    }
}
