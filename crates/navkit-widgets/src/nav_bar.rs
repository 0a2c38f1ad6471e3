#![forbid(unsafe_code)]

//! Bottom navigation bar: destination buttons plus the menu trigger.
//!
//! The bar itself is stateless apart from one flag, "menu active", which is
//! raised when the trigger opens the popup and lowered by the popup's close
//! callback. Active highlighting is derived from the current path on every
//! [`NavigationBar::view`].

use std::cell::Cell;
use std::rc::Rc;

use navkit_style::token::{BUTTONS_ACTIVE, BUTTONS_LIST, GLOW};
use navkit_style::{ColorResolver, ColorToken, Theme};

use crate::config::FallbackColors;
use crate::navigation::{Location, Navigator};
use crate::popup::MenuPopup;

/// Whether a bar button for `path` is highlighted at `current_path`.
///
/// Exact match only: `/search` is not active at `/search/results`.
#[inline]
#[must_use]
pub fn is_active(path: &str, current_path: &str) -> bool {
    path == current_path
}

/// What a bar button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItemKind {
    /// Navigates to the item's path.
    Link,
    /// Opens the menu popup.
    MenuTrigger,
}

/// One bar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub path: String,
    pub kind: NavItemKind,
}

impl NavItem {
    #[must_use]
    pub fn link(id: impl Into<String>, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
            kind: NavItemKind::Link,
        }
    }

    #[must_use]
    pub fn menu_trigger(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: format!("/{id}"),
            id,
            label: label.into(),
            kind: NavItemKind::MenuTrigger,
        }
    }
}

/// Rendered state of one bar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItemView {
    pub id: String,
    pub label: String,
    pub kind: NavItemKind,
    pub active: bool,
    pub color: ColorToken,
    /// Glow behind highlighted buttons.
    pub glow: Option<ColorToken>,
}

/// Rendered bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarView {
    pub items: Vec<NavItemView>,
    pub menu_active: bool,
}

/// Result of [`NavigationBar::press`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    Navigated(String),
    MenuOpened,
    /// Out-of-range index, or the popup was already mounted.
    Ignored,
}

/// The bottom bar. Clones share the menu-active flag.
#[derive(Debug, Clone)]
pub struct NavigationBar {
    items: Vec<NavItem>,
    fallbacks: FallbackColors,
    menu_active: Rc<Cell<bool>>,
}

impl Default for NavigationBar {
    fn default() -> Self {
        Self::new(Self::default_items())
    }
}

impl NavigationBar {
    #[must_use]
    pub fn new(items: Vec<NavItem>) -> Self {
        Self {
            items,
            fallbacks: FallbackColors::default(),
            menu_active: Rc::new(Cell::new(false)),
        }
    }

    /// Home, search, menu, recent, profile.
    #[must_use]
    pub fn default_items() -> Vec<NavItem> {
        vec![
            NavItem::link("home", "Home", "/"),
            NavItem::link("search", "Search", "/search"),
            NavItem::menu_trigger("menu", "Menu"),
            NavItem::link("recent", "Recent", "/recent"),
            NavItem::link("profile", "Profile", "/profile"),
        ]
    }

    #[must_use]
    pub fn fallbacks(mut self, fallbacks: FallbackColors) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    #[must_use]
    pub fn is_menu_active(&self) -> bool {
        self.menu_active.get()
    }

    /// Resolve colors and highlight state for `location`.
    ///
    /// Colors come from the surface tokens, then `theme`, then the built-in
    /// fallbacks. Highlighted buttons alternate between the theme's active
    /// and accent colors by index when the theme has an accent.
    #[must_use]
    pub fn view(
        &self,
        location: &dyn Location,
        resolver: &ColorResolver,
        theme: Option<&Theme>,
    ) -> NavBarView {
        let current = location.current_path();
        let menu_active = self.menu_active.get();
        let list = resolver.resolve_chain(
            BUTTONS_LIST,
            theme.map(|t| &t.buttons.list),
            &self.fallbacks.list,
        );
        let active = resolver.resolve_chain(
            BUTTONS_ACTIVE,
            theme.map(|t| &t.buttons.active),
            &self.fallbacks.active,
        );
        let accent = theme.and_then(|t| t.accent.as_ref()).filter(|a| !a.is_blank());

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let highlighted = match item.kind {
                    NavItemKind::Link => is_active(&item.path, &current),
                    NavItemKind::MenuTrigger => menu_active || is_active(&item.path, &current),
                };
                let color = match accent {
                    Some(accent) if highlighted && index % 2 == 1 => accent.clone(),
                    _ if highlighted => active.clone(),
                    _ => list.clone(),
                };
                let glow = highlighted.then(|| resolver.resolve(GLOW, &color));
                NavItemView {
                    id: item.id.clone(),
                    label: item.label.clone(),
                    kind: item.kind,
                    active: highlighted,
                    color,
                    glow,
                }
            })
            .collect();

        NavBarView { items, menu_active }
    }

    /// Handle a press on the button at `index`.
    pub fn press(
        &self,
        index: usize,
        navigator: &dyn Navigator,
        popup: &mut MenuPopup,
    ) -> PressOutcome {
        let Some(item) = self.items.get(index) else {
            return PressOutcome::Ignored;
        };
        match item.kind {
            NavItemKind::Link => {
                navigator.navigate(&item.path);
                PressOutcome::Navigated(item.path.clone())
            }
            NavItemKind::MenuTrigger => {
                if self.open_menu(popup) {
                    PressOutcome::MenuOpened
                } else {
                    PressOutcome::Ignored
                }
            }
        }
    }

    /// Open `popup` and raise the menu-active flag. Has no other effect on
    /// the bar. Returns `false` if the popup was already mounted.
    pub fn open_menu(&self, popup: &mut MenuPopup) -> bool {
        let opened = popup.open();
        if opened {
            self.menu_active.set(true);
        }
        opened
    }

    /// Lower the menu-active flag. Wired to the popup's close callback.
    pub fn menu_closed(&self) {
        self.menu_active.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuCatalog;
    use crate::navigation::MemoryRouter;
    use navkit_style::{StyleSurface, TokenSurface};

    fn colors(view: &NavBarView) -> Vec<(&str, bool, &str)> {
        view.items
            .iter()
            .map(|i| (i.id.as_str(), i.active, i.color.as_str()))
            .collect()
    }

    #[test]
    fn exact_match_only() {
        assert!(is_active("/search", "/search"));
        assert!(!is_active("/search", "/search/results"));
        assert!(!is_active("/", "/search"));
    }

    #[test]
    fn detached_view_uses_builtin_defaults() {
        let bar = NavigationBar::default();
        let router = MemoryRouter::new("/search");
        let view = bar.view(&router, &ColorResolver::detached(), None);
        assert_eq!(
            colors(&view),
            vec![
                ("home", false, "0 0% 60%"),
                ("search", true, "25 95% 53%"),
                ("menu", false, "0 0% 60%"),
                ("recent", false, "0 0% 60%"),
                ("profile", false, "0 0% 60%"),
            ]
        );
        assert_eq!(view.items[1].glow.as_ref().map(|g| g.as_str()), Some("25 95% 53%"));
        assert_eq!(view.items[0].glow, None);
    }

    #[test]
    fn theme_colors_and_accent_alternation() {
        let catalog = navkit_style::ThemeCatalog::builtin();
        let neon = catalog.find("Neon").unwrap();
        let bar = NavigationBar::default();
        let resolver = ColorResolver::detached();

        // index 1 (search) is odd -> accent
        let view = bar.view(&MemoryRouter::new("/search"), &resolver, Some(neon));
        assert_eq!(view.items[1].color.as_str(), "320 100% 60%");
        assert_eq!(view.items[0].color.as_str(), "180 20% 40%");

        // index 0 (home) is even -> active
        let view = bar.view(&MemoryRouter::new("/"), &resolver, Some(neon));
        assert_eq!(view.items[0].color.as_str(), "175 100% 50%");
    }

    #[test]
    fn surface_tokens_override_theme() {
        let surface = TokenSurface::new();
        surface.set(BUTTONS_ACTIVE, ColorToken::new("1 1% 1%"));
        let resolver = ColorResolver::new(Rc::new(surface));
        let ocean = navkit_style::ThemeCatalog::builtin().find("Ocean").cloned();
        let view = NavigationBar::default().view(
            &MemoryRouter::new("/profile"),
            &resolver,
            ocean.as_ref(),
        );
        assert_eq!(view.items[4].color.as_str(), "1 1% 1%");
        assert_eq!(view.items[3].color.as_str(), "200 15% 50%");
    }

    #[test]
    fn press_link_navigates() {
        let bar = NavigationBar::default();
        let router = MemoryRouter::default();
        let mut popup = MenuPopup::new(MenuCatalog::browse(), Rc::new(router.clone()));
        assert_eq!(
            bar.press(3, &router, &mut popup),
            PressOutcome::Navigated("/recent".into())
        );
        assert_eq!(router.current_path(), "/recent");
        assert_eq!(bar.press(99, &router, &mut popup), PressOutcome::Ignored);
    }

    #[test]
    fn trigger_opens_popup_and_raises_flag() {
        let bar = NavigationBar::default();
        let router = MemoryRouter::default();
        let mut popup = MenuPopup::new(MenuCatalog::browse(), Rc::new(router.clone()));

        assert_eq!(bar.press(2, &router, &mut popup), PressOutcome::MenuOpened);
        assert!(bar.is_menu_active());
        assert!(popup.is_mounted());
        assert_eq!(router.navigation_count(), 0);

        // Second press while mounted does nothing.
        assert_eq!(bar.press(2, &router, &mut popup), PressOutcome::Ignored);

        let view = bar.view(&router, &ColorResolver::detached(), None);
        assert!(view.menu_active);
        assert!(view.items[2].active);

        bar.menu_closed();
        assert!(!bar.is_menu_active());
    }
}
