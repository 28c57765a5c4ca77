//! Role vocabulary for agreement authorization
//!
//! Every state-mutating or value-moving operation declares exactly one
//! required role. The predicates that evaluate a caller against these roles
//! live with the agreement core; this is only the shared vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a caller must hold to invoke an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The party delivering goods or services
    Supplier,
    /// The party paying for goods or services
    Purchaser,
    /// The neutral third party that resolves disputes
    Arbitrator,
    /// The single caller identity representing agreed action by both
    /// supplier and purchaser
    JointAuthority,
    /// Supplier or purchaser
    EitherEntity,
    /// Arbitrator, supplier, or purchaser
    AnyParticipant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Supplier => "supplier",
            Self::Purchaser => "purchaser",
            Self::Arbitrator => "arbitrator",
            Self::JointAuthority => "joint authority",
            Self::EitherEntity => "supplier or purchaser",
            Self::AnyParticipant => "any participant",
        };
        write!(f, "{}", name)
    }
}
