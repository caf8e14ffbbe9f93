//! Settings: parse/write `userdeck.conf` and merge command-line overrides.
//!
//! Precedence, lowest first: built-in defaults, the settings file, CLI flags
//! (which clap may in turn fill from the environment).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;
use crate::error::{Context, Result};
use crate::loader::DEFAULT_POST_LIMIT;
use crate::pager::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW};

pub const SETTINGS_FILE: &str = "userdeck.conf";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings for one dashboard session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Upstream directory root, e.g. `https://jsonplaceholder.typicode.com`.
    pub base_url: String,
    /// Users per page on the directory screen.
    pub page_size: usize,
    /// Number of page buttons shown before the row slides.
    pub page_window: usize,
    /// Posts kept on the detail screen.
    pub post_limit: usize,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_window: DEFAULT_PAGE_WINDOW,
            post_limit: DEFAULT_POST_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Values supplied on the command line; `None` keeps the file/default value.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
    pub page_window: Option<usize>,
    pub post_limit: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Load from an explicit path, or search the usual locations.
    ///
    /// A file found by the search that cannot be read is skipped and the
    /// defaults are used. Unknown keys and unparsable values are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when `explicit` is given and cannot be read.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings {}", path.display()))?;
            return Ok(Self::parse(&contents));
        }
        let found = config_file_read_path(SETTINGS_FILE).and_then(|p| Self::from_file(&p));
        Ok(found.unwrap_or_default())
    }

    /// Parse a `key = value` settings file.
    ///
    /// # Returns
    ///
    /// `Some(settings)` if the file is readable; `None` otherwise.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            match lhs {
                "base_url" => cfg.base_url = rhs.to_string(),
                "page_size" => cfg.page_size = parse_count(rhs).unwrap_or(cfg.page_size),
                "page_window" => cfg.page_window = parse_count(rhs).unwrap_or(cfg.page_window),
                "post_limit" => cfg.post_limit = rhs.parse().unwrap_or(cfg.post_limit),
                "timeout_secs" => {
                    if let Some(secs) = parse_count(rhs) {
                        cfg.timeout = Duration::from_secs(secs as u64);
                    }
                }
                _ => {}
            }
        }
        cfg
    }

    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(url) = &overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(n) = overrides.page_size.filter(|n| *n > 0) {
            self.page_size = n;
        }
        if let Some(n) = overrides.page_window.filter(|n| *n > 0) {
            self.page_window = n;
        }
        if let Some(n) = overrides.post_limit {
            self.post_limit = n;
        }
        if let Some(secs) = overrides.timeout_secs.filter(|n| *n > 0) {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdeck settings\n");
        buf.push_str("# Command-line flags take precedence over this file.\n\n");
        let _ = writeln!(&mut buf, "base_url = {}", self.base_url);
        let _ = writeln!(&mut buf, "page_size = {}", self.page_size);
        let _ = writeln!(&mut buf, "page_window = {}", self.page_window);
        let _ = writeln!(&mut buf, "post_limit = {}", self.post_limit);
        let _ = writeln!(&mut buf, "timeout_secs = {}", self.timeout.as_secs());
        std::fs::write(path, buf)
    }
}

/// Strictly positive integer.
fn parse_count(s: &str) -> Option<usize> {
    s.parse::<usize>().ok().filter(|n| *n > 0)
}

/// Directory for userdeck config files: `$XDG_CONFIG_HOME/userdeck` or
/// `~/.config/userdeck`.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(xdg).join("userdeck"));
    }
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join("userdeck"))
}

/// First existing `name` in the working directory, then the config dir.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    let local = PathBuf::from(name);
    if local.exists() {
        return Some(local);
    }
    config_dir().map(|d| d.join(name)).filter(|p| p.exists())
}

/// Where a fresh config file should be written: the config dir when it can be
/// created, the working directory otherwise.
pub fn config_file_write_path(name: &str) -> PathBuf {
    if let Some(dir) = config_dir() {
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir.join(name);
        }
    }
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys_and_skips_junk() {
        let cfg = Settings::parse(
            "# comment\nbase_url = http://localhost:3000\npage_size = 9\npage_window=0\n\
             post_limit = 0\ntimeout_secs = abc\nmystery = 1\nno equals sign\n",
        );
        assert_eq!(cfg.base_url, "http://localhost:3000");
        assert_eq!(cfg.page_size, 9);
        assert_eq!(cfg.page_window, DEFAULT_PAGE_WINDOW);
        assert_eq!(cfg.post_limit, 0);
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let cfg = Settings::parse("page_size = 9\ntimeout_secs = 30\n").apply(&Overrides {
            page_size: Some(4),
            timeout_secs: Some(0),
            ..Overrides::default()
        });
        assert_eq!(cfg.page_size, 4);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = Path::new("/definitely/not/here/userdeck.conf");
        let err = Settings::load(Some(path)).unwrap_err();
        assert!(err.to_string().contains("reading settings"));
        assert!(err.to_string().contains("userdeck.conf"));
    }
}
