//! Integration tests for ThemeManager
//!
//! These tests verify that the theme setting:
//! - Rejects unknown names without changing state
//! - Reports the previous and current theme on success
//! - Stays consistent under concurrent readers and writers

use humanloop::ThemeManager;
use humanloop::models::{Palette, ThemeError, ThemeRegistry};
use indexmap::IndexMap;
use std::sync::Arc;
use std::thread;

#[test]
fn test_default_theme_is_dark() {
    let themes = ThemeManager::new();
    assert_eq!(themes.current_name(), "dark");
    assert_eq!(themes.current_palette(), Palette::dark());
    assert_eq!(themes.available(), vec!["dark", "light"]);
}

#[test]
fn test_set_theme_reports_change() {
    let themes = ThemeManager::new();

    let change = themes.set_theme("light").unwrap();
    assert_eq!(change.previous, "dark");
    assert_eq!(change.current, "light");
    assert_eq!(themes.current_palette(), Palette::light());
}

#[test]
fn test_unknown_theme_leaves_state_unchanged() {
    let themes = ThemeManager::new();
    themes.set_theme("light").unwrap();
    let before = themes.snapshot();

    let err = themes.set_theme("neon").unwrap_err();
    assert_eq!(
        err,
        ThemeError::Unknown {
            name: "neon".into(),
            available: vec!["dark".into(), "light".into()],
        }
    );
    assert_eq!(themes.snapshot(), before);
}

#[test]
fn test_custom_registry_start_theme() {
    let mut extra = IndexMap::new();
    let mut contrast = Palette::dark();
    contrast.accent = "#ffff00".into();
    extra.insert("contrast".to_string(), contrast.clone());

    let mut registry = ThemeRegistry::builtin();
    registry.extend(extra).unwrap();

    let themes = ThemeManager::with_registry(registry.clone(), "contrast").unwrap();
    assert_eq!(themes.current_palette(), contrast);

    assert!(ThemeManager::with_registry(registry, "missing").is_err());
}

#[test]
fn test_concurrent_switching_is_consistent() {
    let themes = Arc::new(ThemeManager::new());

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let themes = themes.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let name = if i % 2 == 0 { "dark" } else { "light" };
                    themes.set_theme(name).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let themes = themes.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    // Name and palette must always belong together
                    let state = themes.snapshot();
                    assert_eq!(
                        state.registry.get(&state.current),
                        Some(&match state.current.as_str() {
                            "dark" => Palette::dark(),
                            _ => Palette::light(),
                        })
                    );
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert!(["dark", "light"].contains(&themes.current_name().as_str()));
}
