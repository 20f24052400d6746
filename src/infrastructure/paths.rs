//! Data directory and path helpers.
//!
//! The data directory holds the log and span files. It follows the XDG base
//! directory convention: `$XDG_DATA_HOME/practice-feed`, falling back to
//! `~/.local/share/practice-feed`, and to the system temp dir when no home
//! directory is known.

use std::path::{Path, PathBuf};

/// Directory name under the user data root.
pub const APP_DIR_NAME: &str = "practice-feed";

/// Returns the default data directory for this user.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        home_dir(),
    )
}

fn data_dir_from(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    xdg_data_home
        .filter(|p| p.is_absolute())
        .or_else(|| home.map(|h| h.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` to the home directory. Other paths pass through.
///
/// ```
/// use practice_feed::infrastructure::expand_tilde;
///
/// assert_eq!(
///     expand_tilde("/etc/practice-feed.toml"),
///     std::path::PathBuf::from("/etc/practice-feed.toml")
/// );
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, home_dir().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_data_home_takes_precedence() {
        assert_eq!(
            data_dir_from(Some("/xdg".into()), Some("/home/mia".into())),
            PathBuf::from("/xdg/practice-feed")
        );
        assert_eq!(
            data_dir_from(Some("relative".into()), Some("/home/mia".into())),
            PathBuf::from("/home/mia/.local/share/practice-feed")
        );
    }

    #[test]
    fn falls_back_to_temp_dir() {
        assert_eq!(
            data_dir_from(None, None),
            std::env::temp_dir().join(APP_DIR_NAME)
        );
    }

    #[test]
    fn tilde_expansion() {
        let home = Path::new("/home/mia");
        assert_eq!(expand_tilde_with("~", Some(home)), PathBuf::from("/home/mia"));
        assert_eq!(
            expand_tilde_with("~/themes/dark.toml", Some(home)),
            PathBuf::from("/home/mia/themes/dark.toml")
        );
        assert_eq!(expand_tilde_with("~/x", None), PathBuf::from("~/x"));
        assert_eq!(expand_tilde_with("~mia/x", Some(home)), PathBuf::from("~mia/x"));
    }
}
