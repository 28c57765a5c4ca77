//! TriPact Agreement - Tri-party custody agreement state machine
//!
//! A supplier, a purchaser, and a neutral arbitrator coordinate release of
//! a fixed amount held in custody. A joint authority - one caller identity
//! representing agreed action by both supplier and purchaser - controls
//! activation and modification of the agreement's terms.
//!
//! # Architectural Invariants
//!
//! 1. Role check first - an unauthorized caller is rejected before any
//!    other check runs
//! 2. Lifecycle flags gate every transition
//! 3. Custodied balance must equal the agreed amount before any payout
//! 4. State is committed before the vault is invoked; a failed transfer
//!    rolls the state back (no partial effects survive)
//! 5. Nested calls into guarded operations fail closed
//!
//! The public surface is [`SharedAgreement`]; the vault is consumed through
//! the `Vault` trait and never assumed to be any particular implementation.

pub mod agreement;
pub mod guard;
pub mod handle;
pub mod roles;

pub use agreement::*;
pub use guard::*;
pub use handle::*;
pub use roles::*;
