//! TriPact Types - Canonical domain types for tri-party custody agreements
//!
//! This crate is the foundation layer: identity newtypes, the scalar
//! `Amount`, the opaque `DocumentDigest`, the lifecycle and event
//! vocabulary, and the error taxonomy. It depends on no other tripact
//! crate.
//!
//! # Invariants
//!
//! 1. Identities are strongly typed - no bare UUIDs cross an API boundary
//! 2. Amounts use checked arithmetic only
//! 3. Failure is explicit - every error names what was violated

pub mod amount;
pub mod digest;
pub mod error;
pub mod event;
pub mod identity;
pub mod lifecycle;
pub mod role;

pub use amount::*;
pub use digest::*;
pub use error::*;
pub use event::*;
pub use identity::*;
pub use lifecycle::*;
pub use role::*;
