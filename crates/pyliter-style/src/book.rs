//! Style books: category name to style tables.

use std::collections::BTreeMap;
use std::path::Path;

use pyliter_color::Color;
use pyliter_syntax::{Category, ClassifiedToken};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builtin;
use crate::style::{RawStyle, Style};
use crate::{StyleError, StyleResult};

/// Key of the style every other style is drawn over.
pub const DEFAULT_CATEGORY: &str = "DEFAULT";

/// A token together with the style of its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledToken {
    pub token: ClassifiedToken,
    /// The category style alone; [`StyleBook::default_style`] is not merged in.
    pub style: Style,
}

/// An immutable table of styles keyed by category name.
///
/// Keys are the names from [`Category::name`] and
/// [`pyliter_syntax::OpKind::name`], plus the required `DEFAULT`. A
/// [`Category::alias`] such as `ASSIGNMENT_TARGET` is stored under the short
/// name (`LVAL`). Unknown keys are kept and simply never match a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBook {
    styles: BTreeMap<String, Style>,
}

impl StyleBook {
    // ==================== Loading ====================

    /// Builds a book from undecoded styles.
    ///
    /// # Errors
    ///
    /// [`StyleError::MissingDefault`] when there is no `DEFAULT` entry,
    /// [`StyleError::InvalidColor`] for the first color that fails to decode
    /// and [`StyleError::DuplicateCategory`] when a category appears under
    /// both its name and its alias.
    pub fn from_table(table: BTreeMap<String, RawStyle>) -> StyleResult<Self> {
        let styles = table
            .iter()
            .map(|(category, raw)| Ok((category.clone(), raw.resolve(category)?)))
            .collect::<StyleResult<Vec<_>>>()?;

        let book = Self::from_entries(styles)?;
        debug!(categories = book.len(), "loaded style book");
        Ok(book)
    }

    /// Builds a book from already decoded styles.
    pub fn from_styles(styles: BTreeMap<String, Style>) -> StyleResult<Self> {
        Self::from_entries(styles)
    }

    fn from_entries(entries: impl IntoIterator<Item = (String, Style)>) -> StyleResult<Self> {
        let mut styles = BTreeMap::new();
        for (category, style) in entries {
            let key = canonical_key(&category).to_string();
            if styles.insert(key.clone(), style).is_some() {
                return Err(StyleError::DuplicateCategory(key));
            }
        }

        if !styles.contains_key(DEFAULT_CATEGORY) {
            return Err(StyleError::MissingDefault);
        }
        Ok(Self { styles })
    }

    pub fn from_toml_str(content: &str) -> StyleResult<Self> {
        Self::from_table(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> StyleResult<Self> {
        Self::from_table(serde_json::from_str(content)?)
    }

    /// Loads a book file: JSON for a `.json` extension, TOML otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> StyleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), "reading style book");
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Loads a named book, preferring user styles over built-in ones.
    pub fn by_name(name: &str) -> StyleResult<Self> {
        if let Some(path) = builtin::user_style_path(name) {
            return Self::from_path(path);
        }
        match builtin::builtin_style(name) {
            Some(content) => Self::from_toml_str(content),
            None => Err(StyleError::UnknownStyle(name.to_string())),
        }
    }

    /// Loads a book by name, or from a file when `name_or_path` is not a
    /// known style name.
    pub fn from_any(name_or_path: &str) -> StyleResult<Self> {
        match Self::by_name(name_or_path) {
            Err(StyleError::UnknownStyle(name)) => {
                let path = Path::new(&name);
                if path.is_file() {
                    Self::from_path(path)
                } else {
                    Err(StyleError::UnknownStyle(name))
                }
            }
            result => result,
        }
    }

    /// Names of every loadable book, sorted.
    pub fn available_styles() -> Vec<String> {
        builtin::available_styles()
    }

    // ==================== Lookup ====================

    /// The style for a category name or alias; empty when the book has no
    /// entry.
    pub fn resolve(&self, category: &str) -> Style {
        self.get(category).copied().unwrap_or_default()
    }

    /// The style for a token's category, with the entry for its exact
    /// operator kind (e.g. `LPAR`) layered on top.
    pub fn resolve_token(&self, token: &ClassifiedToken) -> Style {
        let style = self.resolve(token.category.name());
        match token.exact_kind {
            Some(kind) => style.merge(&self.resolve(kind.name())),
            None => style,
        }
    }

    pub fn get(&self, category: &str) -> Option<&Style> {
        self.styles.get(canonical_key(category))
    }

    pub fn default_style(&self) -> Style {
        self.resolve(DEFAULT_CATEGORY)
    }

    /// The `DEFAULT` background color.
    pub fn background_color(&self) -> Option<Color> {
        self.default_style().background_color
    }

    /// Category names in the book, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.styles
            .iter()
            .map(|(category, style)| (category.as_str(), style))
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    // ==================== Transformation ====================

    /// Returns a copy whose background colors all have alpha 0.
    pub fn with_transparent_background(&self) -> Self {
        let styles = self
            .styles
            .iter()
            .map(|(category, style)| (category.clone(), style.transparent()))
            .collect();
        Self { styles }
    }

    /// Returns a copy with `style` stored under `category`.
    pub fn with_style(&self, category: &str, style: Style) -> Self {
        let mut styles = self.styles.clone();
        styles.insert(canonical_key(category).to_string(), style);
        Self { styles }
    }

    /// Pairs every token with its style.
    pub fn apply(&self, tokens: Vec<ClassifiedToken>) -> Vec<StyledToken> {
        tokens
            .into_iter()
            .map(|token| {
                let style = self.resolve_token(&token);
                StyledToken { token, style }
            })
            .collect()
    }

    // ==================== Saving ====================

    /// The book as a TOML table with colors written as hex strings.
    pub fn to_toml_string(&self) -> StyleResult<String> {
        let table: BTreeMap<&str, RawStyle> = self
            .iter()
            .map(|(category, style)| (category, RawStyle::from(*style)))
            .collect();
        Ok(toml::to_string_pretty(&table)?)
    }

    /// Writes the book to `path` as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> StyleResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

/// The short category name for an alias; other keys are returned as is.
fn canonical_key(key: &str) -> &str {
    Category::from_name(key).map_or(key, |category| category.name())
}

impl Default for StyleBook {
    /// White on black with no category styles.
    fn default() -> Self {
        let mut styles = BTreeMap::new();
        styles.insert(
            DEFAULT_CATEGORY.to_string(),
            Style::new()
                .with_color(Color::WHITE)
                .with_background(Color::BLACK),
        );
        Self { styles }
    }
}
