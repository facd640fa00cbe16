//! Tests for SiteBuilder
//!
//! These tests verify:
//! - The generated file tree has the expected layout
//! - Rebuilding without mutations is byte-identical
//! - Board links, list rows, and detail navigation
//! - Prev/next arithmetic (including dangling links after deletes)
//! - Template errors abort the pass before output is touched
//! - End-to-end delete + rebuild leaves no stale article page

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use corkboard::{Config, Repository, SiteBuilder};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// Minimal template tree with the `${LI}`/`${TR}` placeholders
fn write_templates(dir: &Path) {
    fs::create_dir_all(dir.join("part")).unwrap();
    fs::create_dir_all(dir.join("article")).unwrap();
    fs::create_dir_all(dir.join("home")).unwrap();
    fs::create_dir_all(dir.join("stat")).unwrap();
    fs::create_dir_all(dir.join("resource")).unwrap();

    fs::write(dir.join("part/head.html"), "<body><ul>${LI}</ul>\n").unwrap();
    fs::write(dir.join("part/foot.html"), "</body>\n").unwrap();
    fs::write(dir.join("article/list.html"), "<table>${TR}</table>\n").unwrap();
    fs::write(dir.join("home/index.html"), "<home><ul>${LI}</ul></home>\n").unwrap();
    fs::write(dir.join("stat/index.html"), "<stat><ul>${LI}</ul></stat>\n").unwrap();
    fs::write(dir.join("resource/common.css"), "body {}\n").unwrap();
    fs::write(dir.join("resource/common.js"), "// js\n").unwrap();
    fs::write(dir.join("resource/log.html"), "<html>log</html>\n").unwrap();
}

fn setup_site() -> (TempDir, Repository, SiteBuilder, Config) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .db_dir(temp_dir.path().join("db"))
        .template_dir(temp_dir.path().join("site_template"))
        .site_dir(temp_dir.path().join("site"))
        .build();

    write_templates(&config.template_dir);

    let repository = Repository::open(&config).unwrap();
    repository.seed_defaults().unwrap();

    let builder = SiteBuilder::new(&config);

    (temp_dir, repository, builder, config)
}

/// Every file under `root`, keyed by relative path
fn collect_files(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    collect_into(root, root, &mut files);
    files
}

fn collect_into(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_into(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap().to_path_buf();
            files.insert(relative, fs::read(&path).unwrap());
        }
    }
}

fn read_page(config: &Config, relative: &str) -> String {
    fs::read_to_string(config.site_dir.join(relative)).unwrap()
}

// =============================================================================
// Tree Layout Tests
// =============================================================================

#[test]
fn test_build_creates_expected_tree() {
    let (_temp, repository, builder, config) = setup_site();

    repository.write_article(2, 1, "hi", "x").unwrap();
    builder.build(&repository).unwrap();

    for page in [
        "home/index.html",
        "stat/index.html",
        "resource/common.css",
        "resource/common.js",
        "resource/log.html",
        "article/notice-list-1.html",
        "article/free-list-1.html",
        "article/1.html",
    ] {
        assert!(config.site_dir.join(page).exists(), "missing {}", page);
    }
}

#[test]
fn test_build_summary_counts_pages() {
    let (_temp, repository, builder, _config) = setup_site();

    repository.write_article(2, 1, "hi", "x").unwrap();
    let summary = builder.build(&repository).unwrap();

    // 3 assets + home + stat + 2 list pages + 1 detail page
    assert_eq!(summary.pages_written, 8);
    assert_eq!(summary.pages_skipped, 0);
}

#[test]
fn test_assets_copied_verbatim() {
    let (_temp, repository, builder, config) = setup_site();

    builder.build(&repository).unwrap();

    assert_eq!(read_page(&config, "resource/common.css"), "body {}\n");
    assert_eq!(read_page(&config, "resource/common.js"), "// js\n");
}

// =============================================================================
// Idempotence Tests
// =============================================================================

#[test]
fn test_rebuild_without_mutation_is_byte_identical() {
    let (_temp, repository, builder, config) = setup_site();

    repository.write_article(2, 1, "hi", "x").unwrap();
    repository.write_article(1, 1, "notice", "y").unwrap();

    builder.build(&repository).unwrap();
    let first = collect_files(&config.site_dir);

    builder.build(&repository).unwrap();
    let second = collect_files(&config.site_dir);

    assert_eq!(first, second);
}

// =============================================================================
// Page Content Tests
// =============================================================================

#[test]
fn test_index_pages_link_every_board() {
    let (_temp, repository, builder, config) = setup_site();

    builder.build(&repository).unwrap();

    for page in ["home/index.html", "stat/index.html"] {
        let html = read_page(&config, page);
        assert!(html.contains("<a href=\"../article/notice-list-1.html\">notice</a>"));
        assert!(html.contains("<a href=\"../article/free-list-1.html\">free</a>"));
    }
}

#[test]
fn test_list_page_rows() {
    let (_temp, repository, builder, config) = setup_site();

    repository.write_article(2, 1, "hi", "x").unwrap();
    builder.build(&repository).unwrap();

    let html = read_page(&config, "article/free-list-1.html");

    // Sequence number, author, linked title; board nav links are relative
    assert!(html.contains("<td>1</td>"));
    assert!(html.contains("<td>Administrator</td>"));
    assert!(html.contains("<a href=\"1.html\">hi</a>"));
    assert!(html.contains("<a href=\"free-list-1.html\">free</a>"));
}

#[test]
fn test_list_page_only_owned_articles() {
    let (_temp, repository, builder, config) = setup_site();

    repository.write_article(2, 1, "free post", "x").unwrap();
    repository.write_article(1, 1, "notice post", "y").unwrap();
    builder.build(&repository).unwrap();

    let html = read_page(&config, "article/free-list-1.html");

    assert!(html.contains("free post"));
    assert!(!html.contains("notice post"));
}

#[test]
fn test_detail_page_fields() {
    let (_temp, repository, builder, config) = setup_site();

    repository.write_article(2, 1, "hi", "body text").unwrap();
    builder.build(&repository).unwrap();

    let html = read_page(&config, "article/1.html");

    assert!(html.contains("<div>Title : hi</div>"));
    assert!(html.contains("<div>Body : body text</div>"));
    assert!(html.contains("<div>Author : Administrator</div>"));
}

#[test]
fn test_detail_nav_by_id_arithmetic() {
    let (_temp, repository, builder, config) = setup_site();

    repository.write_article(2, 1, "one", "a").unwrap();
    repository.write_article(2, 1, "two", "b").unwrap();
    repository.write_article(2, 1, "three", "c").unwrap();
    builder.build(&repository).unwrap();

    let first = read_page(&config, "article/1.html");
    assert!(first.contains("<a href=\"#\">prev</a>"));
    assert!(first.contains("<a href=\"2.html\">next</a>"));

    let middle = read_page(&config, "article/2.html");
    assert!(middle.contains("<a href=\"1.html\">prev</a>"));
    assert!(middle.contains("<a href=\"3.html\">next</a>"));

    let last = read_page(&config, "article/3.html");
    assert!(last.contains("<a href=\"2.html\">prev</a>"));
    assert!(last.contains("<a href=\"#\">next</a>"));
}

#[test]
fn test_detail_nav_dangles_after_delete() {
    let (_temp, repository, builder, config) = setup_site();

    repository.write_article(2, 1, "one", "a").unwrap();
    repository.write_article(2, 1, "two", "b").unwrap();
    repository.write_article(2, 1, "three", "c").unwrap();
    repository.delete_article(2, 1, 2).unwrap();

    builder.build(&repository).unwrap();

    // Article 1 still points at the deleted neighbor by arithmetic
    let first = read_page(&config, "article/1.html");
    assert!(first.contains("<a href=\"2.html\">next</a>"));
    assert!(!config.site_dir.join("article/2.html").exists());
}

#[test]
fn test_dangling_member_renders_unknown() {
    let (_temp, repository, builder, config) = setup_site();

    repository.write_article(2, 99, "orphan", "x").unwrap();
    builder.build(&repository).unwrap();

    let html = read_page(&config, "article/1.html");
    assert!(html.contains("<div>Author : unknown</div>"));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_missing_template_aborts_build() {
    let (_temp, repository, builder, config) = setup_site();

    fs::remove_file(config.template_dir.join("article/list.html")).unwrap();

    assert!(builder.build(&repository).is_err());

    // Templates load before any output is touched
    assert!(!config.site_dir.exists());
}

#[test]
fn test_missing_asset_aborts_build() {
    let (_temp, repository, builder, config) = setup_site();

    fs::remove_file(config.template_dir.join("resource/common.css")).unwrap();

    assert!(builder.build(&repository).is_err());
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn test_delete_then_rebuild_leaves_no_stale_page() {
    let (_temp, repository, builder, config) = setup_site();

    // Board "free" (id 2) exists from seeding; write the first article
    let id = repository.write_article(2, 1, "hi", "x").unwrap();
    assert_eq!(id, 1);

    let listed = repository.articles_by_board_code("free").unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "hi");

    builder.build(&repository).unwrap();
    assert!(config.site_dir.join("article/1.html").exists());

    // The owning member deletes it
    repository.delete_article(2, 1, id).unwrap();
    assert!(repository.get_article(id).unwrap().is_none());

    builder.build(&repository).unwrap();
    assert!(!config.site_dir.join("article/1.html").exists());
}
