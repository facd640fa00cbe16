//! corkboard interactive shell
//!
//! Line-oriented front end over the corkboard library. Commands follow the
//! `controller action [args...]` shape, e.g. `article write`, `member login`,
//! `build site`. All state changes go through the Repository; the shell only
//! holds the session (who is logged in, which board is selected).

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use corkboard::{
    BoardError, Config, Denial, Member, Repository, Scheduler, SiteBuilder, DEFAULT_BOARD_ID,
};

/// corkboard shell
#[derive(Parser, Debug)]
#[command(name = "corkboard")]
#[command(about = "Command-line bulletin board with a static site generator")]
#[command(version)]
struct Args {
    /// Database root directory
    #[arg(short, long, default_value = "./db")]
    db_dir: String,

    /// Template directory
    #[arg(short, long, default_value = "./site_template")]
    template_dir: String,

    /// Generated site root
    #[arg(short, long, default_value = "./site")]
    site_dir: String,

    /// Seconds between automatic site rebuilds
    #[arg(short = 'i', long, default_value = "10")]
    rebuild_interval: u64,
}

/// What the current user is doing right now
///
/// Lives only for the duration of the process; nothing here is persisted.
struct Session {
    member: Option<Member>,
    board_id: u64,
    board_name: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,corkboard=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("corkboard v{}", corkboard::VERSION);

    let config = Config::builder()
        .db_dir(&args.db_dir)
        .template_dir(&args.template_dir)
        .site_dir(&args.site_dir)
        .rebuild_interval(Duration::from_secs(args.rebuild_interval))
        .build();

    let repository = match Repository::open(&config) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            tracing::error!("failed to open repository: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = repository.seed_defaults() {
        tracing::error!("failed to seed default data: {}", e);
        std::process::exit(1);
    }

    let builder = SiteBuilder::new(&config);
    let scheduler = Scheduler::new(
        Arc::clone(&repository),
        builder.clone(),
        config.rebuild_interval,
    );

    let default_board = match repository.get_board(DEFAULT_BOARD_ID) {
        Ok(Some(board)) => board,
        _ => {
            tracing::error!("default board missing after seeding");
            std::process::exit(1);
        }
    };

    let mut session = Session {
        member: None,
        board_id: default_board.id,
        board_name: default_board.name,
    };

    // Command loop
    let stdin = io::stdin();
    loop {
        print!("command: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let (controller, action, rest) = match words.as_slice() {
            [] => continue,
            ["exit"] => break,
            [controller] => (*controller, "", &words[1..]),
            [controller, action, rest @ ..] => (*controller, *action, rest),
        };

        match controller {
            "article" => article_action(&repository, &mut session, action, rest),
            "member" => member_action(&repository, &mut session, action),
            "build" => build_action(&repository, &builder, &scheduler, action),
            _ => println!("unknown command '{}'", controller),
        }
    }

    scheduler.stop();
}

// =============================================================================
// Article Actions
// =============================================================================

fn article_action(repository: &Repository, session: &mut Session, action: &str, args: &[&str]) {
    match action {
        "list" => article_list(repository, args),
        "detail" => article_detail(repository, args),
        "write" => article_write(repository, session),
        "modify" => article_modify(repository, session, args),
        "delete" => article_delete(repository, session, args),
        "createBoard" => board_create(repository),
        "deleteBoard" => board_delete(repository, session, args),
        "changeBoard" => board_change(repository, session, args),
        _ => println!("unknown article action '{}'", action),
    }
}

fn article_list(repository: &Repository, args: &[&str]) {
    let articles = match repository.articles() {
        Ok(a) => a,
        Err(e) => return println!("could not list articles: {}", e),
    };

    // With a page argument, show that size-10 window; otherwise everything
    let shown: Vec<_> = match args.first().and_then(|p| p.parse::<usize>().ok()) {
        Some(page) if page > 0 => {
            println!("== page {} ==", page);
            articles.iter().skip((page - 1) * 10).take(10).collect()
        }
        _ => articles.iter().collect(),
    };

    for article in shown {
        println!(
            "[{}] {} | {} | board {} | member {}",
            article.id, article.title, article.reg_date, article.board_id, article.member_id
        );
    }
}

fn article_detail(repository: &Repository, args: &[&str]) {
    let Some(id) = parse_id(args) else {
        return println!("usage: article detail <id>");
    };

    match repository.get_article(id) {
        Ok(Some(article)) => {
            println!("== article {} ==", article.id);
            println!("title  : {}", article.title);
            println!("body   : {}", article.body);
            println!("date   : {}", article.reg_date);
            println!("board  : {}", article.board_id);
            println!("member : {}", article.member_id);
        }
        Ok(None) => println!("no such article"),
        Err(e) => println!("could not load article: {}", e),
    }
}

fn article_write(repository: &Repository, session: &mut Session) {
    let Some(member_id) = session.member.as_ref().map(|m| m.id) else {
        return println!("you are not logged in");
    };

    let title = prompt_non_empty("title");
    let body = prompt_non_empty("body");

    match repository.write_article(session.board_id, member_id, &title, &body) {
        Ok(id) => println!("article {} created", id),
        Err(e) => println!("could not write article: {}", e),
    }
}

fn article_modify(repository: &Repository, session: &mut Session, args: &[&str]) {
    let Some(member_id) = session.member.as_ref().map(|m| m.id) else {
        return println!("you are not logged in");
    };
    let Some(id) = parse_id(args) else {
        return println!("usage: article modify <id>");
    };

    let title = prompt_non_empty("title");
    let body = prompt_non_empty("body");

    match repository.modify_article(session.board_id, member_id, id, &title, &body) {
        Ok(id) => println!("article {} modified", id),
        Err(e) => println!("{}", ownership_message(e)),
    }
}

fn article_delete(repository: &Repository, session: &mut Session, args: &[&str]) {
    let Some(member_id) = session.member.as_ref().map(|m| m.id) else {
        return println!("you are not logged in");
    };
    let Some(id) = parse_id(args) else {
        return println!("usage: article delete <id>");
    };

    match repository.delete_article(session.board_id, member_id, id) {
        Ok(id) => println!("article {} deleted", id),
        Err(e) => println!("{}", ownership_message(e)),
    }
}

// =============================================================================
// Board Actions
// =============================================================================

fn board_create(repository: &Repository) {
    let name = prompt_non_empty("board name");
    let code = prompt_non_empty("board code");

    match repository.make_board(&name, &code) {
        Ok(_) => println!("board '{}' created", name),
        Err(BoardError::Duplicate(code)) => println!("board code '{}' is already in use", code),
        Err(e) => println!("could not create board: {}", e),
    }
}

fn board_delete(repository: &Repository, session: &mut Session, args: &[&str]) {
    let Some(code) = args.first() else {
        return println!("usage: article deleteBoard <code>");
    };

    match repository.delete_board(code) {
        Ok(board) => {
            println!("board '{}' deleted", board.name);

            // Fall back to the default board if the session pointed at it
            if session.board_id == board.id {
                if let Ok(Some(default)) = repository.get_board(DEFAULT_BOARD_ID) {
                    session.board_id = default.id;
                    session.board_name = default.name;
                    println!("moved to board '{}'", session.board_name);
                }
            }
        }
        Err(BoardError::NotFound) => println!("no board with code '{}'", code),
        Err(BoardError::InvariantViolation(_)) => println!("the default board cannot be deleted"),
        Err(e) => println!("could not delete board: {}", e),
    }
}

fn board_change(repository: &Repository, session: &mut Session, args: &[&str]) {
    let Some(code) = args.first() else {
        return println!("usage: article changeBoard <code>");
    };

    match repository.move_board(code) {
        Ok(board) => {
            session.board_id = board.id;
            session.board_name = board.name;
            println!("moved to board '{}'", session.board_name);
        }
        Err(BoardError::NotFound) => println!("no board with code '{}'", code),
        Err(e) => println!("could not change board: {}", e),
    }
}

// =============================================================================
// Member Actions
// =============================================================================

fn member_action(repository: &Repository, session: &mut Session, action: &str) {
    match action {
        "login" => member_login(repository, session),
        "logout" => member_logout(session),
        "whoami" => member_whoami(session),
        "join" => member_join(repository, session),
        _ => println!("unknown member action '{}'", action),
    }
}

fn member_login(repository: &Repository, session: &mut Session) {
    if let Some(member) = session.member.as_ref() {
        return println!("already logged in as {}", member.name);
    }

    let login_id = prompt_non_empty("login id");
    let login_pw = prompt_non_empty("login password");

    match repository.member_by_login(&login_id, &login_pw) {
        Ok(Some(member)) => {
            println!("welcome, {}", member.name);
            session.member = Some(member);
        }
        Ok(None) => println!("no matching member"),
        Err(e) => println!("could not log in: {}", e),
    }
}

fn member_logout(session: &mut Session) {
    if session.member.take().is_some() {
        println!("logged out");
    }
}

fn member_whoami(session: &Session) {
    match session.member.as_ref() {
        Some(member) => println!("{}", member.name),
        None => println!("guest"),
    }
}

fn member_join(repository: &Repository, session: &mut Session) {
    println!("== join ==");

    let name = prompt_with("name", |s| {
        if s.chars().count() < 2 {
            Some("enter at least 2 characters".to_string())
        } else {
            None
        }
    });

    let login_id = prompt_with("login id", |s| {
        if s.chars().count() < 2 {
            return Some("enter at least 2 characters".to_string());
        }
        match repository.is_login_id_used(s) {
            Ok(true) => Some(format!("login id '{}' is already in use", s)),
            Ok(false) => None,
            Err(e) => Some(format!("could not check login id: {}", e)),
        }
    });

    let login_pw = loop {
        let pw = prompt_with("login password", |s| {
            if s.chars().count() < 2 {
                Some("enter at least 2 characters".to_string())
            } else {
                None
            }
        });
        let confirm = prompt_non_empty("confirm password");

        if pw == confirm {
            break pw;
        }
        println!("passwords do not match");
    };

    match repository.join_member(&login_id, &login_pw, &name) {
        Ok(id) => {
            println!("welcome, {}", name);
            // Joining logs the new member in
            if let Ok(Some(member)) = repository.get_member(id) {
                session.member = Some(member);
            }
        }
        Err(BoardError::Duplicate(login_id)) => {
            println!("login id '{}' is already in use", login_id)
        }
        Err(e) => println!("could not join: {}", e),
    }
}

// =============================================================================
// Build Actions
// =============================================================================

fn build_action(
    repository: &Repository,
    builder: &SiteBuilder,
    scheduler: &Scheduler,
    action: &str,
) {
    match action {
        "site" => match builder.build(repository) {
            Ok(summary) => println!(
                "site built: {} pages written, {} skipped",
                summary.pages_written, summary.pages_skipped
            ),
            Err(e) => println!("build failed: {}", e),
        },
        "startAutoSite" => {
            scheduler.start();
            println!("automatic rebuild started");
        }
        "stopAutoSite" => {
            scheduler.stop();
            println!("automatic rebuild stopping");
        }
        _ => println!("unknown build action '{}'", action),
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

fn parse_id(args: &[&str]) -> Option<u64> {
    args.first().and_then(|a| a.parse().ok())
}

/// Prompt until the input is non-empty
fn prompt_non_empty(label: &str) -> String {
    prompt_with(label, |_| None)
}

/// Prompt until the input is non-empty and the validator accepts it
fn prompt_with(label: &str, validate: impl Fn(&str) -> Option<String>) -> String {
    let stdin = io::stdin();

    loop {
        print!("{}: ", label);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            // EOF mid-prompt: nothing more will ever arrive
            Ok(0) => std::process::exit(0),
            Ok(_) => {}
            Err(_) => continue,
        }

        let value = line.trim();
        if value.is_empty() {
            continue;
        }

        match validate(value) {
            Some(message) => println!("{}", message),
            None => return value.to_string(),
        }
    }
}

/// User-facing message for the ordered article guards
fn ownership_message(err: BoardError) -> String {
    match err {
        BoardError::NotFound => "no such article".to_string(),
        BoardError::PermissionDenied(Denial::BoardMismatch) => {
            "switch to the article's board first".to_string()
        }
        BoardError::PermissionDenied(Denial::OwnerMismatch) => "not your article".to_string(),
        e => format!("operation failed: {}", e),
    }
}
