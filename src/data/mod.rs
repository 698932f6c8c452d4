//! Snapshot collection and the data derived from it.
//!
//! ## Submodules
//!
//! - [`aggregator`]: polls every probe once per tick ([`Aggregator`])
//! - [`snapshot`]: the immutable per-tick record ([`Snapshot`])
//! - [`duration`]: uptime formatting
//! - [`export`]: one-shot JSON export of a snapshot
//!
//! ## Data Flow
//!
//! ```text
//! Aggregator::collect()
//!        │  (all probes concurrently, each self-bounded)
//!        ▼
//!    Snapshot ──▶ FrameBuilder::build() ──▶ Renderer
//!        │
//!        └──▶ export::export_to_file()  (--export only)
//! ```

pub mod aggregator;
pub mod duration;
pub mod export;
pub mod snapshot;

pub use aggregator::Aggregator;
pub use snapshot::Snapshot;
