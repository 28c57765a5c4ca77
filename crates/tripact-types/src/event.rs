//! Agreement events
//!
//! Every successful state transition appends an event to the agreement's
//! journal. An event is appended only after the state change and any value
//! movement have fully succeeded; a failed operation appends nothing. The
//! journal is append-only and ordered; how it is consumed off-system is out
//! of scope.

use crate::{Amount, DocumentDigest, PartyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events raised by agreement state transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementEvent {
    /// The joint authority put the agreement in force
    Executed,
    /// The joint authority changed the agreed terms
    Modified {
        amount: Amount,
        doc_hash: DocumentDigest,
    },
    /// The purchaser deposited the agreed amount into custody
    Funded { amount: Amount },
    /// Custodied value was paid out to the supplier
    Completed { paid_to: PartyId },
    /// Custodied value was returned to the purchaser
    Cancelled { refunded_to: PartyId },
    /// A party escalated a dispute to the arbitrator
    ArbitrationRequested { requestor: PartyId },
    /// The arbitrator concluded the dispute sub-flow
    ArbitrationCompleted,
}

impl AgreementEvent {
    /// Short name for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Executed => "executed",
            Self::Modified { .. } => "modified",
            Self::Funded { .. } => "funded",
            Self::Completed { .. } => "completed",
            Self::Cancelled { .. } => "cancelled",
            Self::ArbitrationRequested { .. } => "arbitration_requested",
            Self::ArbitrationCompleted => "arbitration_completed",
        }
    }
}

/// A journaled event with its position and timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the journal, starting at 0
    pub seq: u64,
    /// When the event was appended
    pub at: DateTime<Utc>,
    /// The event itself
    pub event: AgreementEvent,
}
