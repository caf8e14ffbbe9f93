//! Command-line surface and the headless (non-interactive) commands.
//!
//! `list` and `show` go through the same loaders, filter and pager as the
//! dashboard and print plain text instead of drawing a terminal UI.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::api::{DirectorySource, User};
use crate::app::config::Overrides;
use crate::error::{Context, Result};
use crate::loader::{Posts, UserDetail, fetch_detail, fetch_directory};
use crate::pager::PageState;
use crate::search::filter_users;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse a remote user directory from the terminal")]
pub struct Cli {
    /// Root of the upstream REST API.
    #[arg(long, env = "USERDECK_BASE_URL")]
    pub base_url: Option<String>,
    /// Users per page.
    #[arg(long, env = "USERDECK_PAGE_SIZE")]
    pub page_size: Option<usize>,
    /// Number of page buttons in the pagination bar.
    #[arg(long)]
    pub page_window: Option<usize>,
    /// Posts shown on a user's detail view.
    #[arg(long)]
    pub post_limit: Option<usize>,
    /// Per-request timeout in seconds.
    #[arg(long, env = "USERDECK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
    /// Settings file (`key = value`). Defaults to `userdeck.conf` in the
    /// working directory or the config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write logs to this file. The dashboard logs nowhere without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print one page of the (optionally filtered) directory.
    List {
        /// Case-insensitive match on name, email or username.
        #[arg(short, long, default_value = "")]
        query: String,
        /// 1-based page number.
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Print one user's profile and first posts.
    Show { id: String },
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            page_window: self.page_window,
            post_limit: self.post_limit,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Fetch the directory and print the requested page.
pub async fn run_list<W: Write>(
    source: &dyn DirectorySource,
    query: &str,
    page: usize,
    page_size: usize,
    out: &mut W,
) -> Result<()> {
    let users = fetch_directory(source).await.context("loading users")?;
    write_list(out, &users, query, page, page_size)
}

/// Filter, paginate and print `users`.
///
/// An out-of-range `page` leaves the pager on page 1 and prints a note.
pub fn write_list<W: Write>(
    out: &mut W,
    users: &[User],
    query: &str,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let filtered = filter_users(users, query);
    let mut pages = PageState::new(page_size);
    pages.set_total_items(filtered.len());
    if !pages.go_to(page) {
        warn!(page, total = pages.total_pages(), "requested page out of range");
        writeln!(
            out,
            "page {page} is out of range (1-{}), showing page {}",
            pages.total_pages(),
            pages.current()
        )?;
    }

    writeln!(out, "{} Users Found", filtered.len())?;
    if filtered.is_empty() {
        writeln!(out, "No users found")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>4}  {:<26} {:<18} {:<28} COMPANY",
        "ID", "NAME", "USERNAME", "EMAIL"
    )?;
    for user in pages.slice(&filtered) {
        writeln!(
            out,
            "{:>4}  {:<26} {:<18} {:<28} {}",
            user.id,
            user.name,
            format!("@{}", user.username),
            user.email,
            user.company.name
        )?;
    }
    if let Some(summary) = pages.summary() {
        writeln!(out, "{summary} (page {} of {})", pages.current(), pages.total_pages())?;
    }
    Ok(())
}

/// Fetch one user with their posts and print them.
pub async fn run_show<W: Write>(
    source: &dyn DirectorySource,
    raw_id: &str,
    post_limit: usize,
    out: &mut W,
) -> Result<()> {
    let detail = fetch_detail(source, raw_id, post_limit)
        .await
        .with_context(|| format!("User not found: {raw_id}"))?;
    write_detail(out, &detail)
}

pub fn write_detail<W: Write>(out: &mut W, detail: &UserDetail) -> Result<()> {
    let u = &detail.user;
    writeln!(out, "{} (@{})", u.name, u.username)?;
    writeln!(out, "  id:       {}", u.id)?;
    writeln!(out, "  email:    {}", u.email)?;
    writeln!(out, "  phone:    {}", u.phone)?;
    writeln!(out, "  website:  {}", u.website)?;
    writeln!(out, "  address:  {}", u.address.one_line())?;
    writeln!(out, "  geo:      {}, {}", u.address.geo.lat, u.address.geo.lng)?;
    writeln!(out, "  company:  {}", u.company.name)?;
    writeln!(out, "            \"{}\"", u.company.catch_phrase)?;
    writeln!(out, "            {}", u.company.bs)?;
    writeln!(out)?;
    writeln!(out, "Recent posts")?;
    match &detail.posts {
        Posts::Ready(posts) if posts.is_empty() => writeln!(out, "  No posts found")?,
        Posts::Ready(posts) => {
            for post in posts {
                writeln!(out, "  - {}", post.title)?;
                for line in post.body.lines() {
                    writeln!(out, "    {line}")?;
                }
            }
        }
        Posts::Unavailable(err) => writeln!(out, "  Posts unavailable: {err}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(n: u64) -> Vec<User> {
        (1..=n)
            .map(|id| User {
                id,
                name: format!("User {id}"),
                username: format!("user{id}"),
                email: format!("user{id}@example.com"),
                ..User::default()
            })
            .collect()
    }

    fn render(users: &[User], query: &str, page: usize) -> String {
        let mut out = Vec::new();
        write_list(&mut out, users, query, page, 6).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn second_page_of_eleven() {
        let text = render(&users(11), "", 2);
        assert!(text.contains("11 Users Found"));
        assert!(text.contains("User 7"));
        assert!(text.contains("User 11"));
        assert!(!text.contains("User 6 "));
        assert!(text.contains("Showing 7 to 11 of 11 users (page 2 of 2)"));
    }

    #[test]
    fn out_of_range_page_falls_back_to_first() {
        let text = render(&users(11), "", 9);
        assert!(text.starts_with("page 9 is out of range (1-2), showing page 1"));
        assert!(text.contains("Showing 1 to 6 of 11 users"));
    }

    #[test]
    fn no_match_prints_empty_state_without_summary() {
        let text = render(&users(11), "green", 1);
        assert!(text.contains("0 Users Found"));
        assert!(text.contains("No users found"));
        assert!(!text.contains("Showing"));
    }

    #[test]
    fn parses_subcommands_and_flags() {
        let cli = Cli::try_parse_from([
            "userdeck",
            "--page-size",
            "4",
            "list",
            "-q",
            "lean",
            "-p",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.page_size, Some(4));
        assert_eq!(
            cli.command,
            Some(Command::List {
                query: "lean".into(),
                page: 2
            })
        );
        let cli = Cli::try_parse_from(["userdeck", "show", "3"]).unwrap();
        assert_eq!(cli.command, Some(Command::Show { id: "3".into() }));
        assert_eq!(cli.overrides().page_size, None);
    }
}
