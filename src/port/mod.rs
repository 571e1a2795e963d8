//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!              ┌──────────────────────────┐
//!              │       PriceService       │
//!              │  cache · limiter · math  │
//!              └────────────┬─────────────┘
//!                  ┌────────┴─────────┐
//!                  ▼                  ▼
//!           ┌─────────────┐   ┌───────────────┐
//!           │SampleFetcher│   │ReferencePrices│
//!           └─────────────┘   └───────────────┘
//! ```

pub mod outbound;

pub use outbound::fetcher::SampleFetcher;
pub use outbound::reference::ReferencePrices;
