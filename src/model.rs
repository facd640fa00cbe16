//! Record types persisted by the store
//!
//! Every entity shares the same envelope: a numeric `id` (0 = not yet
//! allocated) and a `regDate` creation timestamp, stamped once when the store
//! first saves the record and never touched by later overwrites. The
//! [`Record`] trait exposes that envelope to [`RecordStore`], which together
//! with the directory name passed at construction is all the store needs -
//! no runtime type inspection.
//!
//! [`RecordStore`]: crate::store::RecordStore

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Access to the common id/regDate envelope of a persisted record
pub trait Record: Serialize + DeserializeOwned {
    /// Assigned id, or 0 if the record has not been saved yet
    fn id(&self) -> u64;

    /// Set the id (called by the store during allocation)
    fn set_id(&mut self, id: u64);

    /// Creation timestamp (`yyyy-MM-dd HH:mm:ss`), empty until first save
    fn reg_date(&self) -> &str;

    /// Set the creation timestamp (called by the store on first save)
    fn set_reg_date(&mut self, reg_date: String);
}

/// Current local time in the `yyyy-MM-dd HH:mm:ss` format used for regDate
pub fn now_date_str() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// =============================================================================
// Entities
// =============================================================================

/// A board groups articles under a human-chosen unique code
///
/// Board id 1 is the designated default board and is protected from deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: u64,
    pub reg_date: String,
    /// Display name
    pub name: String,
    /// External unique key, used in URLs and board switching
    pub code: String,
}

impl Board {
    /// Create an unsaved board (id and regDate assigned by the store)
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: 0,
            reg_date: String::new(),
            name: name.into(),
            code: code.into(),
        }
    }
}

/// A posted article
///
/// `board_id` and `member_id` are plain references; nothing enforces that the
/// pointed-at records still exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub reg_date: String,
    pub board_id: u64,
    pub member_id: u64,
    pub title: String,
    pub body: String,
}

impl Article {
    /// Create an unsaved article (id and regDate assigned by the store)
    pub fn new(
        board_id: u64,
        member_id: u64,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            reg_date: String::new(),
            board_id,
            member_id,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A registered member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u64,
    pub reg_date: String,
    /// Unique login id
    pub login_id: String,
    /// Plain-text password, compared by equality
    pub login_pw: String,
    /// Display name
    pub name: String,
}

impl Member {
    /// Create an unsaved member (id and regDate assigned by the store)
    pub fn new(
        login_id: impl Into<String>,
        login_pw: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            reg_date: String::new(),
            login_id: login_id.into(),
            login_pw: login_pw.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Record impls
// =============================================================================

macro_rules! impl_record {
    ($ty:ty) => {
        impl Record for $ty {
            fn id(&self) -> u64 {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = id;
            }

            fn reg_date(&self) -> &str {
                &self.reg_date
            }

            fn set_reg_date(&mut self, reg_date: String) {
                self.reg_date = reg_date;
            }
        }
    };
}

impl_record!(Board);
impl_record!(Article);
impl_record!(Member);
