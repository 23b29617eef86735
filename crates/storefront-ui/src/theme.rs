//! Light/dark theme preference and its toggle buttons.

use std::fmt;

use storefront_kv::{Cache, KvStore, StoreError};

/// Body class applied while the dark theme is active.
pub const DARK_THEME_CLASS: &str = "dark-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    /// Stored value. Anything other than `"dark"` reads as light.
    pub fn parse(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three theme toggles in the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleVariant {
    /// Expanded desktop navbar: icon and label.
    DesktopFull,
    /// Collapsed desktop navbar: icon only.
    DesktopCollapsed,
    /// Mobile menu: icon only.
    Mobile,
}

/// Inner HTML of a toggle button. The button offers the other theme.
pub fn render_toggle(theme: Theme, variant: ToggleVariant) -> String {
    let (icon, label) = match theme {
        Theme::Dark => ("fa-sun", "Light Theme"),
        Theme::Light => ("fa-moon", "Dark Theme"),
    };
    match variant {
        ToggleVariant::DesktopFull => format!(
            r#"<i class="fas {}"></i> <span class="btn-text">{}</span>"#,
            icon, label
        ),
        ToggleVariant::DesktopCollapsed | ToggleVariant::Mobile => {
            format!(r#"<i class="fas {}"></i>"#, icon)
        }
    }
}

/// Current theme backed by a storage slot.
pub struct ThemeController<S> {
    cache: Cache<S>,
    key: String,
    theme: Theme,
}

impl<S: KvStore> ThemeController<S> {
    /// Read the saved preference and apply it, writing it back so the slot
    /// always holds a valid value. An unreadable slot falls back to light.
    pub fn load(storage: S, key: impl Into<String>) -> Result<Self, StoreError> {
        let cache = Cache::new(storage);
        let key = key.into();
        let theme = match cache.get_raw(&key) {
            Ok(saved) => saved.as_deref().map(Theme::parse).unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "theme preference unreadable");
                Theme::default()
            }
        };

        let controller = Self { cache, key, theme };
        controller.persist()?;
        Ok(controller)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch to the other theme.
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        self.set(self.theme.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Result<Theme, StoreError> {
        self.theme = theme;
        tracing::debug!(theme = %theme, "theme applied");
        self.persist()?;
        Ok(theme)
    }

    /// Class to put on `<body>`, if any.
    pub fn body_class(&self) -> Option<&'static str> {
        match self.theme {
            Theme::Dark => Some(DARK_THEME_CLASS),
            Theme::Light => None,
        }
    }

    pub fn render_toggle(&self, variant: ToggleVariant) -> String {
        render_toggle(self.theme, variant)
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.cache.set_raw(&self.key, self.theme.as_str())
    }
}
