//! Store Module
//!
//! Flat-file persistence for one entity type per store.
//!
//! ## Responsibilities
//! - Allocate strictly increasing record ids starting at 1
//! - Keep the last-assigned id durable across restarts
//! - Persist, load, and delete individual record files
//! - Gap-tolerant ascending listings
//!
//! ## On-Disk Layout
//! ```text
//! {db_dir}/
//! ├── board/
//! │   ├── 1.json        (one record per file, named by id)
//! │   ├── 2.json
//! │   └── lastId.txt    (plain text, last-assigned id)
//! ├── article/
//! │   └── ...
//! └── member/
//!     └── ...
//! ```

mod flatfile;

pub use flatfile::RecordStore;
