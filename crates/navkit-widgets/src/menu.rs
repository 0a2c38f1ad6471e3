#![forbid(unsafe_code)]

//! Destination shortcuts shown in the menu popup.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque icon reference (emoji, icon name, asset key). Never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Glyph(String);

impl Glyph {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One destination in the popup grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub path: String,
    pub glyph: Glyph,
}

impl MenuItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
        glyph: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
            glyph: Glyph::new(glyph),
        }
    }
}

/// Why a menu catalog was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCatalogError {
    Empty,
    DuplicateId(String),
}

impl fmt::Display for MenuCatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "menu catalog is empty"),
            Self::DuplicateId(id) => write!(f, "duplicate menu item id: {id}"),
        }
    }
}

impl std::error::Error for MenuCatalogError {}

/// Titled, non-empty list of menu items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCatalog {
    title: String,
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(title: impl Into<String>, items: Vec<MenuItem>) -> Result<Self, MenuCatalogError> {
        if items.is_empty() {
            return Err(MenuCatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(MenuCatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self {
            title: title.into(),
            items,
        })
    }

    /// The six-entry browse menu.
    #[must_use]
    pub fn browse() -> Self {
        Self {
            title: "Browse Nexus".into(),
            items: vec![
                MenuItem::new("movies", "Movies", "/movies", "🎬"),
                MenuItem::new("tvshows", "TV Shows", "/tv-shows", "📺"),
                MenuItem::new("anime", "Anime", "/anime", "✨"),
                MenuItem::new("discover", "Discover", "/discover", "🧭"),
                MenuItem::new("favorites", "Favorites", "/favorites", "❤️"),
                MenuItem::new("settings", "Settings", "/settings", "⚙️"),
            ],
        }
    }

    /// The four bar destinations, for hosts that show them in the popup.
    #[must_use]
    pub fn bar_destinations() -> Self {
        Self {
            title: "Navigate".into(),
            items: vec![
                MenuItem::new("home", "Home", "/", "home"),
                MenuItem::new("search", "Search", "/search", "search"),
                MenuItem::new("recent", "Recent", "/recent", "history"),
                MenuItem::new("profile", "Profile", "/profile", "user"),
            ],
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::browse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_catalog() {
        let catalog = MenuCatalog::browse();
        assert_eq!(catalog.len(), 6);
        let paths: Vec<_> = catalog.items().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            ["/movies", "/tv-shows", "/anime", "/discover", "/favorites", "/settings"]
        );
        assert_eq!(catalog.position("discover"), Some(3));
    }

    #[test]
    fn bar_catalog() {
        let catalog = MenuCatalog::bar_destinations();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(0).map(|i| i.path.as_str()), Some("/"));
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        assert_eq!(MenuCatalog::new("t", Vec::new()), Err(MenuCatalogError::Empty));
        let err = MenuCatalog::new(
            "t",
            vec![MenuItem::new("a", "A", "/a", "x"), MenuItem::new("a", "B", "/b", "y")],
        )
        .unwrap_err();
        assert_eq!(err, MenuCatalogError::DuplicateId("a".into()));
    }

    #[test]
    fn single_item_is_valid() {
        let catalog = MenuCatalog::new("Solo", vec![MenuItem::new("x", "X", "/x", "•")]).unwrap();
        assert_eq!(catalog.title(), "Solo");
        assert_eq!(catalog.len(), 1);
    }
}
