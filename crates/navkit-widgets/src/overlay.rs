#![forbid(unsafe_code)]

//! Bar and popup wired together.
//!
//! [`NavOverlay`] owns one [`NavigationBar`] and one [`MenuPopup`] and keeps
//! the bar's "menu active" flag in step with the popup: the trigger raises
//! it and the popup's close callback lowers it again.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use navkit_runtime::ThemeStore;
use navkit_style::{ColorResolver, Theme};

use crate::config::OverlayConfig;
use crate::menu::MenuCatalog;
use crate::nav_bar::{NavBarView, NavigationBar, PressOutcome};
use crate::navigation::{Location, Navigator};
use crate::popup::{MenuPopup, PopupView};

type CloseHook = Rc<RefCell<Option<Box<dyn FnMut()>>>>;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub bar: NavBarView,
    /// `None` while the popup is unmounted.
    pub popup: Option<PopupView>,
}

/// Navigation bar plus menu popup.
pub struct NavOverlay {
    bar: NavigationBar,
    popup: MenuPopup,
    resolver: ColorResolver,
    theme: Option<ThemeStore>,
    navigator: Rc<dyn Navigator>,
    location: Rc<dyn Location>,
    close_hook: CloseHook,
}

impl std::fmt::Debug for NavOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavOverlay")
            .field("bar", &self.bar)
            .field("popup", &self.popup)
            .field("resolver", &self.resolver)
            .field("themed", &self.theme.is_some())
            .finish()
    }
}

impl NavOverlay {
    /// Overlay with the default bar and the browse menu.
    #[must_use]
    pub fn new(
        config: &OverlayConfig,
        navigator: Rc<dyn Navigator>,
        location: Rc<dyn Location>,
    ) -> Self {
        Self::with_parts(
            config,
            NavigationBar::default(),
            MenuCatalog::browse(),
            navigator,
            location,
        )
    }

    /// Overlay driven by a single router that both navigates and reports
    /// the current path.
    #[must_use]
    pub fn with_router<R>(config: &OverlayConfig, router: Rc<R>) -> Self
    where
        R: Navigator + Location + 'static,
    {
        let navigator: Rc<dyn Navigator> = router.clone();
        let location: Rc<dyn Location> = router;
        Self::new(config, navigator, location)
    }

    /// Overlay over an explicit bar and menu.
    #[must_use]
    pub fn with_parts(
        config: &OverlayConfig,
        bar: NavigationBar,
        catalog: MenuCatalog,
        navigator: Rc<dyn Navigator>,
        location: Rc<dyn Location>,
    ) -> Self {
        let bar = bar.fallbacks(config.fallbacks.clone());
        let close_hook: CloseHook = Rc::new(RefCell::new(None));
        let mut popup = MenuPopup::from_config(config, catalog, Rc::clone(&navigator));

        let flag = bar.clone();
        let hook = Rc::clone(&close_hook);
        popup.set_on_close(move || {
            flag.menu_closed();
            if let Some(callback) = hook.borrow_mut().as_mut() {
                callback();
            }
        });

        Self {
            bar,
            popup,
            resolver: ColorResolver::detached(),
            theme: None,
            navigator,
            location,
            close_hook,
        }
    }

    /// Read colors through `resolver` (bar on every view, popup at open).
    #[must_use]
    pub fn resolver(mut self, resolver: ColorResolver) -> Self {
        self.resolver = resolver.clone();
        let popup = self.popup;
        self.popup = popup.resolver(resolver);
        self
    }

    /// Follow the active theme of `store`.
    #[must_use]
    pub fn theme_store(mut self, store: ThemeStore) -> Self {
        self.theme = Some(store.clone());
        let popup = self.popup;
        self.popup = popup.theme_store(store);
        self
    }

    /// Called after the bar flag is lowered, once per close cycle.
    #[must_use]
    pub fn on_close(self, callback: impl FnMut() + 'static) -> Self {
        *self.close_hook.borrow_mut() = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn bar(&self) -> &NavigationBar {
        &self.bar
    }

    #[must_use]
    pub fn popup(&self) -> &MenuPopup {
        &self.popup
    }

    /// Active theme, if a store is attached.
    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        self.theme.as_ref().map(ThemeStore::current)
    }

    /// Press the bar button at `index`.
    pub fn press(&mut self, index: usize) -> PressOutcome {
        let outcome = self.bar.press(index, self.navigator.as_ref(), &mut self.popup);
        tracing::trace!(index, ?outcome, "bar press");
        outcome
    }

    /// Open the menu as if the trigger were pressed.
    pub fn open_menu(&mut self) -> bool {
        self.bar.open_menu(&mut self.popup)
    }

    /// Click outside the popup container.
    pub fn backdrop_click(&mut self) -> bool {
        self.popup.request_close()
    }

    /// Click a menu item by index.
    pub fn select_menu_item(&mut self, index: usize) -> bool {
        self.popup.select(index)
    }

    /// Click a menu item by id.
    pub fn select_menu_id(&mut self, id: &str) -> bool {
        self.popup.select_id(id)
    }

    pub fn advance(&mut self, delta: Duration) {
        self.popup.advance(delta);
    }

    #[must_use]
    pub fn view(&self) -> OverlayView {
        let theme = self.theme();
        OverlayView {
            bar: self.bar.view(self.location.as_ref(), &self.resolver, theme.as_ref()),
            popup: self.popup.view(),
        }
    }

    /// Unmount the popup without running its callbacks and lower the flag.
    pub fn teardown(&mut self) {
        self.popup.teardown();
        self.bar.menu_closed();
    }
}
