//! Authorization - classifying callers against the agreement's fixed roles
//!
//! Authorization always compares the DIRECT caller identity passed to the
//! operation against the stored identities. There is no transitive
//! originator anywhere in the API: if the joint authority is itself a
//! composed caller, only the identity it presents here matters.

use serde::{Deserialize, Serialize};
use tripact_types::{AccountId, AgreementError, PartyId, Result, Role};

/// The fixed identities of an agreement, with their payout accounts
///
/// Immutable after construction. Nothing prevents one identity from holding
/// several roles at once; the roles are positions in the agreement, not
/// distinct people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parties {
    /// The party delivering goods or services
    pub supplier: PartyId,
    /// The party paying for goods or services
    pub purchaser: PartyId,
    /// The neutral third party that resolves disputes
    pub arbitrator: PartyId,
    /// The single caller identity representing agreed action by both
    /// supplier and purchaser
    pub joint_authority: PartyId,
    /// Account credited when the supplier is paid
    pub supplier_account: AccountId,
    /// Account credited when the purchaser is refunded
    pub purchaser_account: AccountId,
}

impl Parties {
    pub fn is_supplier(&self, caller: &PartyId) -> bool {
        caller == &self.supplier
    }

    pub fn is_purchaser(&self, caller: &PartyId) -> bool {
        caller == &self.purchaser
    }

    pub fn is_arbitrator(&self, caller: &PartyId) -> bool {
        caller == &self.arbitrator
    }

    pub fn is_joint_authority(&self, caller: &PartyId) -> bool {
        caller == &self.joint_authority
    }

    /// Supplier or purchaser
    pub fn is_either_entity(&self, caller: &PartyId) -> bool {
        self.is_supplier(caller) || self.is_purchaser(caller)
    }

    /// Arbitrator, supplier, or purchaser
    pub fn is_any_participant(&self, caller: &PartyId) -> bool {
        self.is_arbitrator(caller) || self.is_either_entity(caller)
    }

    /// Check whether the caller holds the given role
    pub fn holds(&self, caller: &PartyId, role: Role) -> bool {
        match role {
            Role::Supplier => self.is_supplier(caller),
            Role::Purchaser => self.is_purchaser(caller),
            Role::Arbitrator => self.is_arbitrator(caller),
            Role::JointAuthority => self.is_joint_authority(caller),
            Role::EitherEntity => self.is_either_entity(caller),
            Role::AnyParticipant => self.is_any_participant(caller),
        }
    }

    /// Allow or reject a caller for an operation's required role
    pub fn require(&self, caller: &PartyId, role: Role) -> Result<()> {
        if self.holds(caller, role) {
            Ok(())
        } else {
            Err(AgreementError::Unauthorized {
                required: role,
                caller: caller.clone(),
            })
        }
    }
}
