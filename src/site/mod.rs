//! Site Module
//!
//! Projection of repository state into a static HTML tree.
//!
//! ## Responsibilities
//! - Full, deterministic regeneration of the output tree from one snapshot
//! - Template loading and placeholder substitution (`${LI}`, `${TR}`)
//! - Verbatim copying of static assets
//! - Timed background rebuilds with start/stop
//!
//! ## Generated Tree
//! ```text
//! {site_dir}/
//! ├── home/index.html                  (board links)
//! ├── stat/index.html                  (board links)
//! ├── article/
//! │   ├── {code}-list-1.html           (one list page per board)
//! │   └── {id}.html                    (one detail page per article)
//! └── resource/
//!     ├── common.css
//!     ├── common.js
//!     └── log.html
//! ```

mod builder;
mod scheduler;

pub use builder::{BuildSummary, SiteBuilder};
pub use scheduler::Scheduler;
