use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the theme used when nothing else is configured
pub const DEFAULT_THEME: &str = "dark";

/// Errors from theme lookup and palette parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Unknown theme '{name}' (available: {})", available.join(", "))]
    Unknown { name: String, available: Vec<String> },

    #[error("Invalid colour '{value}' for {field} in theme '{theme}'")]
    InvalidColor {
        theme: String,
        field: &'static str,
        value: String,
    },
}

/// Fixed set of colours a dialog is styled with.
///
/// Colours are `#rrggbb` strings so palettes can be written by hand in the
/// themes YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub bg: String,
    pub fg: String,
    pub select_bg: String,
    pub select_fg: String,
    pub button_bg: String,
    pub button_fg: String,
    pub entry_bg: String,
    pub entry_fg: String,
    pub frame_bg: String,
    pub accent: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            bg: "#2b2b2b".into(),
            fg: "#ffffff".into(),
            select_bg: "#404040".into(),
            select_fg: "#ffffff".into(),
            button_bg: "#404040".into(),
            button_fg: "#ffffff".into(),
            entry_bg: "#404040".into(),
            entry_fg: "#ffffff".into(),
            frame_bg: "#2b2b2b".into(),
            accent: "#0078d4".into(),
            success: "#107c10".into(),
            warning: "#ff8c00".into(),
            error: "#d13438".into(),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: "#ffffff".into(),
            fg: "#000000".into(),
            select_bg: "#e1e1e1".into(),
            select_fg: "#000000".into(),
            button_bg: "#e1e1e1".into(),
            button_fg: "#000000".into(),
            entry_bg: "#ffffff".into(),
            entry_fg: "#000000".into(),
            frame_bg: "#f0f0f0".into(),
            accent: "#0078d4".into(),
            success: "#107c10".into(),
            warning: "#ff8c00".into(),
            error: "#d13438".into(),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 13] {
        [
            ("bg", &self.bg),
            ("fg", &self.fg),
            ("select_bg", &self.select_bg),
            ("select_fg", &self.select_fg),
            ("button_bg", &self.button_bg),
            ("button_fg", &self.button_fg),
            ("entry_bg", &self.entry_bg),
            ("entry_fg", &self.entry_fg),
            ("frame_bg", &self.frame_bg),
            ("accent", &self.accent),
            ("success", &self.success),
            ("warning", &self.warning),
            ("error", &self.error),
        ]
    }

    /// Check every colour parses; `theme` is only used in the error
    pub fn validate(&self, theme: &str) -> Result<(), ThemeError> {
        for (field, value) in self.fields() {
            if parse_hex_color(value).is_none() {
                return Err(ThemeError::InvalidColor {
                    theme: theme.to_string(),
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Parse `#rgb` or `#rrggbb` into RGB bytes
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some([digit(0)?, digit(1)?, digit(2)?])
        }
        _ => None,
    }
}

/// Ordered theme name → palette mapping
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeRegistry {
    themes: IndexMap<String, Palette>,
}

impl ThemeRegistry {
    /// Registry with the built-in `dark` and `light` themes
    pub fn builtin() -> Self {
        let mut themes = IndexMap::new();
        themes.insert("dark".to_string(), Palette::dark());
        themes.insert("light".to_string(), Palette::light());
        Self { themes }
    }

    /// Add or replace themes; every palette is validated first
    pub fn extend(&mut self, extra: IndexMap<String, Palette>) -> Result<(), ThemeError> {
        for (name, palette) in &extra {
            palette.validate(name)?;
        }
        self.themes.extend(extra);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.themes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }

    /// Look up a theme or produce the `Unknown` error listing what exists
    pub fn require(&self, name: &str) -> Result<&Palette, ThemeError> {
        self.themes.get(name).ok_or_else(|| ThemeError::Unknown {
            name: name.to_string(),
            available: self.names(),
        })
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_palettes_are_valid() {
        assert!(Palette::dark().validate("dark").is_ok());
        assert!(Palette::light().validate("light").is_ok());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#2b2b2b"), Some([0x2b, 0x2b, 0x2b]));
        assert_eq!(parse_hex_color("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("2b2b2b"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_registry_order_and_lookup() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.names(), vec!["dark", "light"]);
        assert!(registry.contains(DEFAULT_THEME));
        assert_eq!(registry.get("light"), Some(&Palette::light()));
    }

    #[test]
    fn test_require_unknown_lists_available() {
        let registry = ThemeRegistry::builtin();
        let err = registry.require("solarized").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown theme 'solarized' (available: dark, light)"
        );
    }

    #[test]
    fn test_extend_rejects_bad_colour() {
        let mut registry = ThemeRegistry::builtin();
        let mut bad = Palette::dark();
        bad.accent = "blue".into();

        let mut extra = IndexMap::new();
        extra.insert("broken".to_string(), bad);

        let err = registry.extend(extra).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { field: "accent", .. }));
        assert!(!registry.contains("broken"));
    }
}
