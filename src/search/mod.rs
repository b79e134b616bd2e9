//! Class-name search over Maven artifacts
//!
//! Combines a local Tantivy index with an optional remote search endpoint
//! and ranks the merged candidates by match quality and artifact popularity.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Class-name query                          │
//! └────────────────────────────────────────────────────────────────┘
//!                     │                          │
//!                     ▼                          ▼ (local < trigger)
//! ┌──────────────────────────────┐  ┌──────────────────────────────┐
//! │       LocalSearcher          │  │       RemoteSearcher         │
//! │  (Tantivy fuzzy prefix)      │  │  (class + fq-class queries)  │
//! └──────────────────────────────┘  └──────────────────────────────┘
//!                     │                          │
//!                     └──────────┬───────────────┘
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │ ResultAggregator (local wins) │
//!                └───────────────────────────────┘
//!                                │
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │ RankingPolicy + UsageCatalog  │
//!                └───────────────────────────────┘
//!                                │
//!                                ▼
//!                      Ranked ClassMatch list
//! ```

pub mod aggregator;
pub mod index;
pub mod local;
pub mod ranking;
pub mod remote;
pub mod types;
pub mod usage;

// Re-export main types
pub use aggregator::{CandidateSource, ResultAggregator};
pub use index::{ArtifactHit, ArtifactRecord, IndexBuilder, LocalIndex};
pub use local::{LocalSearcher, match_kind};
pub use ranking::RankingPolicy;
pub use remote::RemoteSearcher;
pub use types::{ClassMatch, MatchKind, MatchMap};
pub use usage::{CuratedVendorSet, UsageCatalog};
