//! # corkboard
//!
//! A command-line bulletin board with:
//! - Flat-file persistence (one JSON file per record)
//! - Per-entity auto-incrementing ids, durable across restarts
//! - A deterministic static-site projection of the stored state
//! - An optional timed background rebuild loop
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Interactive Shell                          │
//! │              (session, prompts, dispatch)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Repository                               │
//! │        (queries, guards, consistent snapshots)               │
//! └───────┬─────────────────┬─────────────────┬─────────────────┘
//!         │                 │                 │
//!         ▼                 ▼                 ▼
//!  ┌────────────┐    ┌────────────┐    ┌────────────┐
//!  │ RecordStore│    │ RecordStore│    │ RecordStore│
//!  │  (board)   │    │ (article)  │    │  (member)  │
//!  └────────────┘    └────────────┘    └────────────┘
//!                       │
//!         ┌─────────────┴─────────────┐
//!         ▼                           ▼
//!  ┌─────────────┐             ┌─────────────┐
//!  │ SiteBuilder │ ◄────────── │  Scheduler  │
//!  │ (projection)│             │ (auto loop) │
//!  └─────────────┘             └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod store;
pub mod repository;
pub mod site;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BoardError, Denial, Result};
pub use config::Config;
pub use model::{Article, Board, Member, Record};
pub use repository::{Repository, Snapshot, DEFAULT_BOARD_ID};
pub use site::{BuildSummary, Scheduler, SiteBuilder};
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of corkboard
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
