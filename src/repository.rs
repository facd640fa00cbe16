//! Repository Module
//!
//! Composes one [`RecordStore`] per entity type and layers the
//! cross-entity queries and lifecycle guards on top.
//!
//! ## Responsibilities
//! - Secondary-key lookups (board by code, member by login id)
//! - Foreign-key queries (articles by board code)
//! - Board lifecycle guards (duplicate codes, protected default board)
//! - Article ownership guards for modify/delete
//! - Consistent multi-store snapshots for the site builder
//!
//! Secondary-key lookups are linear scans over `list()`, first match wins.
//! Acceptable at bulletin-board scale; there is no index to keep in sync.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{BoardError, Denial, Result};
use crate::model::{Article, Board, Member};
use crate::store::RecordStore;

/// Id of the protected default board (created by `seed_defaults`)
pub const DEFAULT_BOARD_ID: u64 = 1;

/// All live records across every store, read under one set of locks
///
/// What the site builder projects from: the snapshot is taken while holding
/// read access to all three stores at once, so a concurrent delete or modify
/// cannot leave the output tree half-old/half-new.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub boards: Vec<Board>,
    pub articles: Vec<Article>,
    pub members: Vec<Member>,
}

/// The record stores plus everything that spans them
pub struct Repository {
    boards: RecordStore<Board>,
    articles: RecordStore<Article>,
    members: RecordStore<Member>,

    /// Where projected article pages land; article deletion removes the
    /// matching page since a full rebuild never deletes stale output
    site_article_dir: PathBuf,
}

impl Repository {
    /// Open or create the stores under `config.db_dir`
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self {
            boards: RecordStore::open(&config.db_dir, "board")?,
            articles: RecordStore::open(&config.db_dir, "article")?,
            members: RecordStore::open(&config.db_dir, "member")?,
            site_article_dir: config.site_dir.join("article"),
        })
    }

    /// Create the admin member and the default boards when absent
    ///
    /// Board "notice" takes id 1 on first run and becomes the protected
    /// default board. Safe to call on every startup.
    pub fn seed_defaults(&self) -> Result<()> {
        if self.member_by_login_id("admin")?.is_none() {
            self.join_member("admin", "admin", "Administrator")?;
        }

        if self.board_by_code("notice")?.is_none() {
            self.make_board("Notice", "notice")?;
        }

        if self.board_by_code("free")?.is_none() {
            self.make_board("Free", "free")?;
        }

        Ok(())
    }

    // =========================================================================
    // Board Operations
    // =========================================================================

    /// All boards, ascending by id
    pub fn boards(&self) -> Result<Vec<Board>> {
        self.boards.list()
    }

    /// Board by id
    pub fn get_board(&self, id: u64) -> Result<Option<Board>> {
        self.boards.get(id)
    }

    /// Board by its unique code
    pub fn board_by_code(&self, code: &str) -> Result<Option<Board>> {
        Ok(self.boards.list()?.into_iter().find(|b| b.code == code))
    }

    /// Create a board, rejecting a code that is already in use
    pub fn make_board(&self, name: &str, code: &str) -> Result<u64> {
        if self.board_by_code(code)?.is_some() {
            return Err(BoardError::Duplicate(code.to_string()));
        }

        let mut board = Board::new(name, code);
        let id = self.boards.save(&mut board)?;
        tracing::info!("created board '{}' (code={}, id={})", name, code, id);

        Ok(id)
    }

    /// Delete a board by code, returning the deleted board's identity
    ///
    /// The default board (id 1) is protected and never deleted.
    pub fn delete_board(&self, code: &str) -> Result<Board> {
        let board = self.board_by_code(code)?.ok_or(BoardError::NotFound)?;

        if board.id == DEFAULT_BOARD_ID {
            return Err(BoardError::InvariantViolation(format!(
                "board {} is the default board and cannot be deleted",
                DEFAULT_BOARD_ID
            )));
        }

        self.boards.delete(board.id)?;
        tracing::info!("deleted board '{}' (code={}, id={})", board.name, board.code, board.id);

        Ok(board)
    }

    /// Validate a board switch: pure lookup, no mutation
    ///
    /// The shell commits the switch into its session only after this
    /// resolves.
    pub fn move_board(&self, code: &str) -> Result<Board> {
        self.board_by_code(code)?.ok_or(BoardError::NotFound)
    }

    // =========================================================================
    // Article Operations
    // =========================================================================

    /// All articles, ascending by id
    pub fn articles(&self) -> Result<Vec<Article>> {
        self.articles.list()
    }

    /// Article by id
    pub fn get_article(&self, id: u64) -> Result<Option<Article>> {
        self.articles.get(id)
    }

    /// Articles belonging to the board with the given code
    pub fn articles_by_board_code(&self, code: &str) -> Result<Vec<Article>> {
        let board = self.board_by_code(code)?.ok_or(BoardError::NotFound)?;

        Ok(self
            .articles
            .list()?
            .into_iter()
            .filter(|a| a.board_id == board.id)
            .collect())
    }

    /// Write a new article into a board
    pub fn write_article(
        &self,
        board_id: u64,
        member_id: u64,
        title: &str,
        body: &str,
    ) -> Result<u64> {
        let mut article = Article::new(board_id, member_id, title, body);
        self.articles.save(&mut article)
    }

    /// Overwrite an article's title and body, keeping id and regDate
    ///
    /// The guards run in a fixed order - missing article, then wrong board,
    /// then wrong owner - so the caller can report the precise reason.
    pub fn modify_article(
        &self,
        board_id: u64,
        member_id: u64,
        id: u64,
        title: &str,
        body: &str,
    ) -> Result<u64> {
        let mut article = self.guard_article(board_id, member_id, id)?;

        article.title = title.to_string();
        article.body = body.to_string();

        self.articles.modify(&mut article, id)
    }

    /// Delete an article, subject to the same ordered guards as modify
    ///
    /// Also removes the projected `article/<id>.html` if a build produced
    /// one: a full rebuild only ever writes pages for live records, so a
    /// stale page would otherwise survive forever.
    pub fn delete_article(&self, board_id: u64, member_id: u64, id: u64) -> Result<u64> {
        self.guard_article(board_id, member_id, id)?;
        self.articles.delete(id)?;

        let page = self.site_article_dir.join(format!("{}.html", id));
        match fs::remove_file(&page) {
            Ok(()) => tracing::debug!("removed projected page {}", page.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(id)
    }

    /// Ordered ownership checks shared by modify and delete
    fn guard_article(&self, board_id: u64, member_id: u64, id: u64) -> Result<Article> {
        let article = self.articles.get(id)?.ok_or(BoardError::NotFound)?;

        if article.board_id != board_id {
            return Err(BoardError::PermissionDenied(Denial::BoardMismatch));
        }

        if article.member_id != member_id {
            return Err(BoardError::PermissionDenied(Denial::OwnerMismatch));
        }

        Ok(article)
    }

    // =========================================================================
    // Member Operations
    // =========================================================================

    /// Member by id
    pub fn get_member(&self, id: u64) -> Result<Option<Member>> {
        self.members.get(id)
    }

    /// Member by unique login id
    pub fn member_by_login_id(&self, login_id: &str) -> Result<Option<Member>> {
        Ok(self
            .members
            .list()?
            .into_iter()
            .find(|m| m.login_id == login_id))
    }

    /// Member by login id and password (plain equality, no hashing)
    pub fn member_by_login(&self, login_id: &str, login_pw: &str) -> Result<Option<Member>> {
        Ok(self
            .members
            .list()?
            .into_iter()
            .find(|m| m.login_id == login_id && m.login_pw == login_pw))
    }

    /// Whether a login id is taken (shell validation loops)
    pub fn is_login_id_used(&self, login_id: &str) -> Result<bool> {
        Ok(self.member_by_login_id(login_id)?.is_some())
    }

    /// Register a member, rejecting a login id that is already in use
    pub fn join_member(&self, login_id: &str, login_pw: &str, name: &str) -> Result<u64> {
        if self.is_login_id_used(login_id)? {
            return Err(BoardError::Duplicate(login_id.to_string()));
        }

        let mut member = Member::new(login_id, login_pw, name);
        let id = self.members.save(&mut member)?;
        tracing::info!("registered member '{}' (id={})", login_id, id);

        Ok(id)
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Materialize every live record under one consistent set of read locks
    ///
    /// Guards are acquired in a fixed order (board, article, member);
    /// mutations only ever hold a single store's lock, so the order cannot
    /// deadlock against them.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let _boards_guard = self.boards.read_guard();
        let _articles_guard = self.articles.read_guard();
        let _members_guard = self.members.read_guard();

        Ok(Snapshot {
            boards: self.boards.scan()?,
            articles: self.articles.scan()?,
            members: self.members.scan()?,
        })
    }
}
