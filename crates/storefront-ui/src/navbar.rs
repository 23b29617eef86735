//! Navbar chrome: desktop collapse on scroll, the mobile menu, the
//! location dropdown and the back-to-top button.

use std::time::Duration;

use crate::config::StorefrontConfig;
use crate::timing::Timer;

/// Which navbar is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarLayout {
    /// Fixed navbar that collapses while scrolling.
    Desktop,
    /// Static navbar with a toggled menu; never collapses.
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarSettings {
    pub desktop_breakpoint: u32,
    pub collapse_threshold: u32,
    pub quick_scroll_threshold: u32,
    pub back_to_top_threshold: u32,
    pub debounce: Duration,
}

impl NavbarSettings {
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self {
            desktop_breakpoint: config.layout.desktop_breakpoint,
            collapse_threshold: config.navbar.collapse_threshold,
            quick_scroll_threshold: config.navbar.quick_scroll_threshold,
            back_to_top_threshold: config.navbar.back_to_top_threshold,
            debounce: config.layout.debounce(),
        }
    }

    pub fn layout_for(&self, width: u32) -> NavbarLayout {
        if width > self.desktop_breakpoint {
            NavbarLayout::Desktop
        } else {
            NavbarLayout::Mobile
        }
    }
}

impl Default for NavbarSettings {
    fn default() -> Self {
        Self::from_config(&StorefrontConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct Navbar {
    settings: NavbarSettings,
    width: u32,
    layout: NavbarLayout,
    scroll_top: i64,
    last_scroll_top: i64,
    collapsed: bool,
    back_to_top: bool,
    mobile_menu_open: bool,
    location_open: bool,
    scroll_stop: Timer,
    resize: Timer,
}

impl Navbar {
    /// Set up for the current viewport width and scroll offset.
    pub fn new(settings: NavbarSettings, width: u32, scroll_top: i64) -> Self {
        let mut navbar = Self {
            scroll_stop: Timer::new(settings.debounce),
            resize: Timer::new(settings.debounce),
            layout: settings.layout_for(width),
            settings,
            width,
            scroll_top,
            last_scroll_top: 0,
            collapsed: false,
            back_to_top: false,
            mobile_menu_open: false,
            location_open: false,
        };
        navbar.apply_layout();
        navbar.update_back_to_top();
        navbar
    }

    pub fn layout(&self) -> NavbarLayout {
        self.layout
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.back_to_top
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn location_open(&self) -> bool {
        self.location_open
    }

    /// Page scrolled to `scroll_top`.
    pub fn scroll(&mut self, scroll_top: i64) {
        let delta = scroll_top - self.last_scroll_top;
        self.scroll_top = scroll_top;
        self.scroll_stop.cancel();

        if self.is_desktop_width() {
            let collapse = i64::from(self.settings.collapse_threshold);
            let quick = i64::from(self.settings.quick_scroll_threshold);
            if scroll_top == 0 {
                self.set_collapsed(false);
            } else if delta > collapse && !self.collapsed {
                self.set_collapsed(true);
            } else if delta < -quick && self.collapsed {
                self.set_collapsed(false);
            }
            self.scroll_stop.restart();
        } else {
            self.collapsed = false;
        }

        self.last_scroll_top = scroll_top.max(0);
        self.update_back_to_top();
    }

    /// Viewport resized. Scroll handling and the back-to-top button follow
    /// the new width at once; the layout switch waits for the debounce.
    pub fn resize(&mut self, width: u32) {
        self.width = width;
        self.resize.restart();
        self.update_back_to_top();
    }

    /// Let time pass: fires the scroll-stop and resize timers.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.scroll_stop.advance(elapsed) && self.scroll_top > 0 && !self.collapsed {
            self.set_collapsed(true);
        }
        if self.resize.advance(elapsed) {
            self.apply_layout();
        }
    }

    /// Hamburger button clicked.
    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    /// A link inside the mobile menu clicked.
    pub fn click_menu_link(&mut self) {
        self.mobile_menu_open = false;
    }

    /// Click on the location section. Clicks inside the open dropdown keep
    /// it as is.
    pub fn click_location(&mut self, inside_dropdown: bool) {
        if !inside_dropdown {
            self.location_open = !self.location_open;
        }
    }

    /// Click anywhere outside the location section.
    pub fn click_outside(&mut self) {
        self.location_open = false;
    }

    /// Back-to-top clicked: the page returns to the top.
    pub fn click_back_to_top(&mut self) {
        self.scroll(0);
    }

    /// Class list of the navbar element.
    pub fn class_list(&self) -> &'static str {
        if self.collapsed {
            "navbar collapsed"
        } else {
            "navbar"
        }
    }

    fn is_desktop_width(&self) -> bool {
        self.settings.layout_for(self.width) == NavbarLayout::Desktop
    }

    fn apply_layout(&mut self) {
        self.layout = self.settings.layout_for(self.width);
        self.collapsed = self.layout == NavbarLayout::Desktop && self.scroll_top != 0;
    }

    fn set_collapsed(&mut self, collapsed: bool) {
        if self.collapsed != collapsed {
            tracing::trace!(collapsed, scroll_top = self.scroll_top, "navbar");
        }
        self.collapsed = collapsed;
    }

    fn update_back_to_top(&mut self) {
        self.back_to_top = self.width <= self.settings.desktop_breakpoint
            && self.scroll_top > i64::from(self.settings.back_to_top_threshold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn desktop() -> Navbar {
        Navbar::new(NavbarSettings::default(), 1280, 0)
    }

    #[test]
    fn test_layout_by_width() {
        let settings = NavbarSettings::default();
        assert_eq!(settings.layout_for(1025), NavbarLayout::Desktop);
        assert_eq!(settings.layout_for(1024), NavbarLayout::Mobile);
    }

    #[test]
    fn test_starts_collapsed_when_not_at_top() {
        assert!(!desktop().is_collapsed());
        assert!(Navbar::new(NavbarSettings::default(), 1280, 400).is_collapsed());
        assert!(!Navbar::new(NavbarSettings::default(), 800, 400).is_collapsed());
    }

    #[test]
    fn test_fast_scroll_down_collapses() {
        let mut navbar = desktop();
        navbar.scroll(40);
        assert!(!navbar.is_collapsed());
        navbar.scroll(100);
        assert!(navbar.is_collapsed());
        assert_eq!(navbar.class_list(), "navbar collapsed");
    }

    #[test]
    fn test_quick_scroll_up_expands() {
        let mut navbar = desktop();
        navbar.scroll(600);
        assert!(navbar.is_collapsed());

        navbar.scroll(500);
        assert!(navbar.is_collapsed());
        navbar.scroll(340);
        assert!(!navbar.is_collapsed());
    }

    #[test]
    fn test_top_always_expands() {
        let mut navbar = desktop();
        navbar.scroll(600);
        navbar.scroll(0);
        assert!(!navbar.is_collapsed());
    }

    #[test]
    fn test_scroll_stop_collapses_below_top() {
        let mut navbar = desktop();
        navbar.scroll(30);
        navbar.advance(ms(199));
        assert!(!navbar.is_collapsed());
        navbar.scroll(40);
        navbar.advance(ms(199));
        assert!(!navbar.is_collapsed());
        navbar.advance(ms(1));
        assert!(navbar.is_collapsed());
    }

    #[test]
    fn test_mobile_never_collapses() {
        let mut navbar = Navbar::new(NavbarSettings::default(), 800, 0);
        navbar.scroll(500);
        navbar.advance(ms(1000));
        assert!(!navbar.is_collapsed());
        assert_eq!(navbar.layout(), NavbarLayout::Mobile);
    }

    #[test]
    fn test_negative_scroll_clamps() {
        let mut navbar = desktop();
        navbar.scroll(-30);
        // Measured from 0, not -30.
        navbar.scroll(40);
        assert!(!navbar.is_collapsed());
    }

    #[test]
    fn test_back_to_top() {
        let mut navbar = Navbar::new(NavbarSettings::default(), 800, 0);
        navbar.scroll(300);
        assert!(!navbar.back_to_top_visible());
        navbar.scroll(301);
        assert!(navbar.back_to_top_visible());

        navbar.click_back_to_top();
        assert!(!navbar.back_to_top_visible());

        let mut wide = desktop();
        wide.scroll(900);
        assert!(!wide.back_to_top_visible());
    }

    #[test]
    fn test_resize_switches_layout_after_debounce() {
        let mut navbar = Navbar::new(NavbarSettings::default(), 800, 500);
        navbar.resize(1280);
        assert_eq!(navbar.layout(), NavbarLayout::Mobile);
        navbar.advance(ms(200));
        assert_eq!(navbar.layout(), NavbarLayout::Desktop);
        assert!(navbar.is_collapsed());
    }

    #[test]
    fn test_mobile_menu() {
        let mut navbar = Navbar::new(NavbarSettings::default(), 800, 0);
        navbar.click_menu_link();
        assert!(!navbar.mobile_menu_open());
        navbar.toggle_mobile_menu();
        assert!(navbar.mobile_menu_open());
        navbar.click_menu_link();
        assert!(!navbar.mobile_menu_open());
    }

    #[test]
    fn test_location_dropdown() {
        let mut navbar = desktop();
        navbar.click_location(false);
        assert!(navbar.location_open());
        navbar.click_location(true);
        assert!(navbar.location_open());
        navbar.click_outside();
        assert!(!navbar.location_open());
    }
}
