//! Lifecycle states of an agreement
//!
//! The agreement tracks three flags (`active`, `funded`, `in_arbitration`);
//! this enum is the derived view of the legal combinations. `Inactive` is
//! re-enterable - completing or cancelling an agreement returns it to
//! `Inactive`, from which the joint authority may execute it again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived lifecycle state of an agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Not in force; may be (re-)executed by the joint authority
    Inactive,
    /// In force, awaiting the purchaser's deposit
    ActiveUnfunded,
    /// In force with the agreed amount in custody
    ActiveFunded,
    /// A dispute is escalated to the arbitrator
    Disputed,
}

impl LifecycleState {
    /// Derive the state from the agreement's flags
    ///
    /// Flag invariants: `in_arbitration` implies `active` and `funded`;
    /// `funded` implies `active`.
    pub fn from_flags(active: bool, funded: bool, in_arbitration: bool) -> Self {
        if !active {
            Self::Inactive
        } else if in_arbitration {
            Self::Disputed
        } else if funded {
            Self::ActiveFunded
        } else {
            Self::ActiveUnfunded
        }
    }

    /// Check if the agreement is in force
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// Check if the agreed amount is in custody
    pub fn is_funded(&self) -> bool {
        matches!(self, Self::ActiveFunded | Self::Disputed)
    }

    /// Check if a dispute is escalated
    pub fn is_disputed(&self) -> bool {
        matches!(self, Self::Disputed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inactive => "inactive",
            Self::ActiveUnfunded => "active (unfunded)",
            Self::ActiveFunded => "active (funded)",
            Self::Disputed => "disputed",
        };
        write!(f, "{}", name)
    }
}
