//! Site builder
//!
//! Projects a repository snapshot into the static output tree. The
//! projection is full and deterministic: the same snapshot and templates
//! always produce byte-identical output, and nothing is tracked between
//! builds - every page is rewritten every time.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::model::Member;
use crate::repository::{Repository, Snapshot};

/// Conceptual pagination window for board list pages
///
/// Only page 1 is ever emitted, carrying every row; the window exists so the
/// page count can be computed and logged, not to split the output. A real
/// pagination pass would write one file per window.
const LIST_PAGE_SIZE: usize = 10;

/// Static asset files copied verbatim from the template tree
const ASSETS: [&str; 3] = ["common.css", "common.js", "log.html"];

/// Outcome of one build pass
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildSummary {
    /// Output files written this pass
    pub pages_written: usize,

    /// Output files skipped because their write failed
    pub pages_skipped: usize,
}

/// Every page template, loaded up front
///
/// Loading happens before any output is touched: a missing or unreadable
/// template aborts the whole build, since every downstream page depends on
/// the partials.
struct Templates {
    head: String,
    foot: String,
    list: String,
    home: String,
    stat: String,
}

impl Templates {
    fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            head: fs::read_to_string(dir.join("part/head.html"))?,
            foot: fs::read_to_string(dir.join("part/foot.html"))?,
            list: fs::read_to_string(dir.join("article/list.html"))?,
            home: fs::read_to_string(dir.join("home/index.html"))?,
            stat: fs::read_to_string(dir.join("stat/index.html"))?,
        })
    }
}

/// Projects repository state into the static site tree
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    template_dir: PathBuf,
    site_dir: PathBuf,
}

impl SiteBuilder {
    /// Create a builder over the configured template and output directories
    pub fn new(config: &Config) -> Self {
        Self {
            template_dir: config.template_dir.clone(),
            site_dir: config.site_dir.clone(),
        }
    }

    /// Regenerate the whole site from the repository's current state
    ///
    /// Reads one consistent snapshot, then writes every page. A single
    /// page's write failure is logged and skipped; only a template-side
    /// error aborts the pass.
    pub fn build(&self, repository: &Repository) -> Result<BuildSummary> {
        let snapshot = repository.snapshot()?;
        let templates = Templates::load(&self.template_dir)?;

        for dir in ["home", "stat", "article", "resource"] {
            fs::create_dir_all(self.site_dir.join(dir))?;
        }

        let mut summary = BuildSummary::default();

        self.copy_assets(&mut summary)?;
        self.build_index_pages(&templates, &snapshot, &mut summary);
        self.build_list_pages(&templates, &snapshot, &mut summary);
        self.build_detail_pages(&templates, &snapshot, &mut summary);

        tracing::info!(
            "site build complete: {} pages written, {} skipped",
            summary.pages_written,
            summary.pages_skipped
        );

        Ok(summary)
    }

    // =========================================================================
    // Build Steps
    // =========================================================================

    /// Copy stylesheet, script, and log page verbatim
    fn copy_assets(&self, summary: &mut BuildSummary) -> Result<()> {
        for name in ASSETS {
            // Template side is fatal, output side is skippable
            let contents = fs::read(self.template_dir.join("resource").join(name))?;
            self.write_page(summary, &self.site_dir.join("resource").join(name), &contents);
        }

        Ok(())
    }

    /// Home and stats indexes: every board as a link
    fn build_index_pages(
        &self,
        templates: &Templates,
        snapshot: &Snapshot,
        summary: &mut BuildSummary,
    ) {
        let li = board_links(snapshot, "../article/");

        let home = templates.home.replace("${LI}", &li);
        self.write_page(summary, &self.site_dir.join("home/index.html"), home.as_bytes());

        let stat = templates.stat.replace("${LI}", &li);
        self.write_page(summary, &self.site_dir.join("stat/index.html"), stat.as_bytes());
    }

    /// One list page per board, every owned article as a row
    fn build_list_pages(
        &self,
        templates: &Templates,
        snapshot: &Snapshot,
        summary: &mut BuildSummary,
    ) {
        let head = templates.head.replace("${LI}", &board_links(snapshot, ""));

        for board in &snapshot.boards {
            let articles: Vec<_> = snapshot
                .articles
                .iter()
                .filter(|a| a.board_id == board.id)
                .collect();

            let page_count = articles.len().div_ceil(LIST_PAGE_SIZE).max(1);
            tracing::debug!(
                "board '{}': {} articles over {} conceptual pages, emitting page 1",
                board.code,
                articles.len(),
                page_count
            );

            let mut rows = String::new();
            for (seq, article) in articles.iter().enumerate() {
                rows.push_str("<tr>");
                rows.push_str(&format!("<td>{}</td>", seq + 1));
                rows.push_str(&format!("<td>{}</td>", article.reg_date));
                rows.push_str(&format!(
                    "<td>{}</td>",
                    member_name(&snapshot.members, article.member_id)
                ));
                rows.push_str(&format!(
                    "<td><a href=\"{}.html\">{}</a></td>",
                    article.id, article.title
                ));
                rows.push_str("</tr>");
            }

            let html = format!("{}{}{}", head, templates.list.replace("${TR}", &rows), templates.foot);
            let path = self
                .site_dir
                .join("article")
                .join(format!("{}-list-1.html", board.code));
            self.write_page(summary, &path, html.as_bytes());
        }
    }

    /// One detail page per article, with prev/next navigation
    ///
    /// Neighbors are addressed by raw id arithmetic (id-1, id+1), not by
    /// resolving a record that actually exists; after deletions the links
    /// can point at a missing page. The first and last articles in creation
    /// order get non-navigating `#` links instead.
    fn build_detail_pages(
        &self,
        templates: &Templates,
        snapshot: &Snapshot,
        summary: &mut BuildSummary,
    ) {
        let head = templates.head.replace("${LI}", &board_links(snapshot, ""));

        for (pos, article) in snapshot.articles.iter().enumerate() {
            let prev = if pos == 0 {
                "#".to_string()
            } else {
                format!("{}.html", article.id - 1)
            };
            let next = if pos == snapshot.articles.len() - 1 {
                "#".to_string()
            } else {
                format!("{}.html", article.id + 1)
            };

            let mut body = String::new();
            body.push_str(&format!("<div>Title : {}</div>", article.title));
            body.push_str(&format!("<div>Body : {}</div>", article.body));
            body.push_str(&format!(
                "<div>Author : {}</div>",
                member_name(&snapshot.members, article.member_id)
            ));
            body.push_str(&format!("<div><a href=\"{}\">prev</a></div>", prev));
            body.push_str(&format!("<div><a href=\"{}\">next</a></div>", next));

            let html = format!("{}{}{}", head, body, templates.foot);
            let path = self.site_dir.join("article").join(format!("{}.html", article.id));
            self.write_page(summary, &path, html.as_bytes());
        }
    }

    /// Write one output file, demoting failure to a skip
    fn write_page(&self, summary: &mut BuildSummary, path: &Path, contents: &[u8]) {
        match fs::write(path, contents) {
            Ok(()) => summary.pages_written += 1,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                summary.pages_skipped += 1;
            }
        }
    }
}

// =============================================================================
// Rendering Helpers
// =============================================================================

/// `<li>` links to every board's list page, with a path prefix for pages
/// that live outside the article directory
fn board_links(snapshot: &Snapshot, prefix: &str) -> String {
    let mut li = String::new();
    for board in &snapshot.boards {
        li.push_str(&format!(
            "<li><a href=\"{}{}-list-1.html\">{}</a></li>",
            prefix, board.code, board.code
        ));
    }
    li
}

/// Author display name, tolerating a dangling member reference
fn member_name(members: &[Member], member_id: u64) -> String {
    members
        .iter()
        .find(|m| m.id == member_id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "unknown".to_string())
}
