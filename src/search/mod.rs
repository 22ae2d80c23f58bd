//! Multi-site search race.
//!
//! # Data Flow
//! ```text
//! SearchRequest { addresses, search_text }
//!     → coordinator.rs (one task per address)
//!         → prober.rs
//!             → fetcher.rs (GET, bounded by fetch timeout)
//!             → matcher.rs (substring test)
//!         → ProbeOutcome (Matched / NotMatched / Failed)
//!     → coordinator.rs (first Matched wins, otherwise wait for all)
//!     → RaceResult (Found / NotFound)
//! ```
//!
//! # Design Decisions
//! - No throttling: parallelism equals the number of addresses
//! - Per-site failures are absorbed; callers only ever see Found or NotFound
//! - The timeout is per fetch; the race itself has no deadline

pub mod coordinator;
pub mod fetcher;
pub mod matcher;
pub mod prober;
pub mod types;

pub use coordinator::RaceCoordinator;
pub use fetcher::{FetchError, Fetcher};
pub use prober::{SiteProbe, SiteProber};
pub use types::{ProbeOutcome, RaceResult, SearchRequest};
