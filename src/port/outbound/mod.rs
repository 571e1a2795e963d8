//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the collaborators the estimation engine depends
//! on but does not own: the marketplace and the reference price table.

pub mod fetcher;
pub mod reference;
