//! Built-in and user style books.
//!
//! Built-in books are compiled into the crate. User books live in
//! `<config_dir>/pyliter/styles/<name>.toml` and shadow built-ins of the same
//! name.

use std::path::PathBuf;

use tracing::warn;

const BUILTIN_STYLES: &[(&str, &str)] = &[
    ("default", include_str!("../styles/default.toml")),
    ("monokai", include_str!("../styles/monokai.toml")),
    ("paper", include_str!("../styles/paper.toml")),
];

/// Extension of user style book files.
const STYLE_EXTENSION: &str = "toml";

/// TOML source of a built-in book.
pub fn builtin_style(name: &str) -> Option<&'static str> {
    BUILTIN_STYLES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, content)| *content)
}

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_STYLES.iter().map(|(name, _)| *name)
}

/// Directory searched for user style books.
pub fn user_style_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pyliter").join("styles"))
}

/// Path of the user book called `name`, if that file exists.
pub fn user_style_path(name: &str) -> Option<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return None;
    }
    let path = user_style_dir()?.join(format!("{name}.{STYLE_EXTENSION}"));
    path.is_file().then_some(path)
}

/// Names of user books in `dir`.
fn user_styles_in(dir: &std::path::Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(dir = %dir.display(), "cannot read style directory: {e}");
            return Vec::new();
        }
    };

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == STYLE_EXTENSION))
        .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
        .collect()
}

/// Built-in and user book names, sorted and deduplicated.
pub fn available_styles() -> Vec<String> {
    let mut names: Vec<String> = builtin_names().map(str::to_string).collect();
    if let Some(dir) = user_style_dir() {
        names.extend(user_styles_in(&dir));
    }
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleBook;

    #[test]
    fn test_builtin_books_load() {
        for name in builtin_names() {
            let content = builtin_style(name).unwrap();
            let book = StyleBook::from_toml_str(content)
                .unwrap_or_else(|e| panic!("built-in style {name}: {e}"));
            assert!(book.background_color().is_some(), "{name} has no background");
        }
        assert!(builtin_style("missing").is_none());
    }

    #[test]
    fn test_available_styles_include_builtins() {
        let names = available_styles();
        for name in ["default", "monokai", "paper"] {
            assert!(names.iter().any(|n| n == name));
        }
        assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_user_styles_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mine.toml"), "[DEFAULT]\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        assert_eq!(user_styles_in(dir.path()), vec!["mine".to_string()]);
        assert!(user_styles_in(&dir.path().join("absent")).is_empty());
    }

    #[test]
    fn test_user_style_path_rejects_paths() {
        assert!(user_style_path("../etc/passwd").is_none());
        assert!(user_style_path("").is_none());
    }

    #[test]
    fn test_by_name() {
        let book = StyleBook::by_name("monokai").unwrap();
        assert_eq!(
            book.background_color(),
            Some(pyliter_color::Color::opaque(0x27, 0x28, 0x22))
        );
    }
}
