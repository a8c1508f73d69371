//! Theme for an expo.
//!
//! Sizes and spacing shared by every scene. A theme is usually loaded from a
//! TOML table with kebab-case keys:
//!
//! ```toml
//! font-size = 30
//! menu-inset = 10
//! menuitem-gap-y = 4
//! menu-title-margin-x = 20
//! white-on-black = true
//! ```
//!
//! Missing keys are zero (or false), as if the theme had been cleared first.
//! Spacing values are limited to 65535 pixels; larger ones are rejected when
//! the theme is parsed.

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Theme {
    /// Default font size for all text, 0 for the display's default.
    pub font_size: u32,
    /// Inset on each side of menu items.
    pub menu_inset: u16,
    /// Vertical gap between menu items, in pixels.
    pub menuitem_gap_y: u16,
    /// Gap between the right of a menu title and the left of its labels.
    pub menu_title_margin_x: u16,
    /// Light text on a dark background.
    pub white_on_black: bool,
}

impl Theme {
    /// Parse a theme from TOML.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub(crate) fn inset(&self) -> i32 {
        i32::from(self.menu_inset)
    }

    pub(crate) fn gap_y(&self) -> i32 {
        i32::from(self.menuitem_gap_y)
    }

    pub(crate) fn title_margin_x(&self) -> i32 {
        i32::from(self.menu_title_margin_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpoError;

    #[test]
    fn test_from_toml() {
        let theme = Theme::from_toml(
            "font-size = 30\nmenu-inset = 10\nmenuitem-gap-y = 4\nwhite-on-black = true\n",
        )
        .unwrap();
        assert_eq!(theme.font_size, 30);
        assert_eq!(theme.menu_inset, 10);
        assert_eq!(theme.menuitem_gap_y, 4);
        assert_eq!(theme.menu_title_margin_x, 0);
        assert!(theme.white_on_black);
    }

    #[test]
    fn test_spacing_out_of_range() {
        for key in ["menu-inset", "menuitem-gap-y", "menu-title-margin-x"] {
            let err = Theme::from_toml(&format!("{key} = 3000000000\n")).unwrap_err();
            assert!(matches!(err, ExpoError::Config(_)), "{key}");
            assert!(Theme::from_toml(&format!("{key} = -1\n")).is_err(), "{key}");
        }
        let theme = Theme::from_toml("menu-inset = 65535\n").unwrap();
        assert_eq!(theme.inset(), 65535);
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Theme::from_toml("").unwrap(), Theme::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Theme::from_toml("font-colour = 3\n").unwrap_err();
        assert!(matches!(err, ExpoError::Config(_)));
    }
}
