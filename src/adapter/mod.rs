//! Adapters connecting the engine to the outside world.
//!
//! - [`inbound`] - the `fairprice` command line
//! - [`outbound`] - marketplace fetcher and reference price table

pub mod inbound;
pub mod outbound;
