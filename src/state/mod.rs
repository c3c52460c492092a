// Theme state module
//
// This module provides the ThemeManager which wraps the process-wide theme
// selection with thread-safe access using Arc<RwLock<T>>.

use crate::models::{DEFAULT_THEME, Palette, ThemeError, ThemeRegistry};
use std::sync::{Arc, PoisonError, RwLock};

/// Current theme plus every theme that can be selected
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeState {
    pub current: String,
    pub registry: ThemeRegistry,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            current: DEFAULT_THEME.to_string(),
            registry: ThemeRegistry::builtin(),
        }
    }
}

/// Result of a successful theme switch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeChange {
    pub previous: String,
    pub current: String,
}

/// Thread-safe owner of the process-wide theme setting.
///
/// The setting is read-mostly: the [`RequestBridge`](crate::bridge::RequestBridge)
/// takes a [`Palette`] snapshot for every new dialog, and only the `set_theme`
/// tool writes. Dialogs that are already open keep the palette they were built
/// with.
pub struct ThemeManager {
    state: Arc<RwLock<ThemeState>>,
}

impl ThemeManager {
    /// Create a ThemeManager with the built-in themes and the default theme
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ThemeState::default())),
        }
    }

    /// Create a ThemeManager over `registry` starting at `initial`
    ///
    /// # Errors
    /// [`ThemeError::Unknown`] if `initial` is not registered
    pub fn with_registry(registry: ThemeRegistry, initial: &str) -> Result<Self, ThemeError> {
        registry.require(initial)?;
        Ok(Self {
            state: Arc::new(RwLock::new(ThemeState {
                current: initial.to_string(),
                registry,
            })),
        })
    }

    /// Get a read-only snapshot of the current state
    pub fn snapshot(&self) -> ThemeState {
        self.read(|s| s.clone())
    }

    /// Execute a function with read access to the state
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ThemeState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Name of the active theme
    pub fn current_name(&self) -> String {
        self.read(|s| s.current.clone())
    }

    /// Palette of the active theme, copied for a dialog about to be built
    pub fn current_palette(&self) -> Palette {
        self.read(|s| {
            s.registry
                .get(&s.current)
                .cloned()
                .unwrap_or_else(Palette::dark)
        })
    }

    pub fn available(&self) -> Vec<String> {
        self.read(|s| s.registry.names())
    }

    /// Switch the active theme.
    ///
    /// Unknown names leave the state untouched.
    pub fn set_theme(&self, name: &str) -> Result<ThemeChange, ThemeError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.registry.require(name)?;

        let previous = std::mem::replace(&mut state.current, name.to_string());
        tracing::info!("Theme changed: {} -> {}", previous, name);

        Ok(ThemeChange {
            previous,
            current: name.to_string(),
        })
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ThemeManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
