// Dialog builders
//
// Everything here runs on the Slint event loop thread. `open` turns one
// DialogTicket into a visible window (or a native picker), wires its callbacks
// to the Completion and registers it so a timeout can dismiss it.

use crate::bridge::{Completion, DialogTicket};
use crate::models::{
    Answer, BridgeError, CancelReason, DialogId, IconType, InputType, NumericBounds, Palette,
    Request, RequestKind, Response, parse_hex_color,
};
use crate::services::{TextStats, attachment_note, input_hint, parse_input};
use crate::ui::picker::{self, PickerOptions};
use crate::ui::registry;
use crate::ui::window::{self, DialogGeometry};
use anyhow::{Context, Result};
use slint::{ComponentHandle, LogicalSize, Model, ModelRc, SharedString, VecModel};
use std::path::PathBuf;
use std::rc::Rc;

// Include the generated Slint code
slint::include_modules!();

/// Inline message when a multi-choice dialog is submitted with nothing ticked
pub const EMPTY_SELECTION: &str = "Select at least one option.";

/// Build and show the dialog for `ticket`. Failures resolve the completion with
/// [`BridgeError::Toolkit`].
pub fn open(ticket: DialogTicket, completion: Completion, geometry: DialogGeometry) {
    let DialogTicket {
        id,
        request,
        palette,
    } = ticket;

    if completion.is_resolved() {
        // Timed out while queued on the event loop
        tracing::debug!("{} already resolved, not opening", id);
        return;
    }

    let size = geometry.logical_size_for(&request.kind);
    let theme = theme_palette(&palette);
    let Request {
        title,
        prompt,
        kind,
        ..
    } = request;

    tracing::debug!("{}: opening {} dialog", id, kind.label());

    let texts = Texts::new(title, prompt);
    let result = match kind {
        RequestKind::Input {
            default_value,
            input_type,
            bounds,
        } => open_input(
            id,
            texts,
            theme,
            size,
            &completion,
            default_value,
            input_type,
            bounds,
        ),
        RequestKind::Multiline {
            default_value,
            allow_files,
        } => open_multiline(id, texts, theme, size, &completion, default_value, allow_files),
        RequestKind::Choice {
            choices,
            allow_multiple,
            allow_files,
        } => open_choice(
            id,
            texts,
            theme,
            size,
            &completion,
            choices,
            allow_multiple,
            allow_files,
        ),
        RequestKind::FileSelection {
            file_types,
            allow_multiple,
            select_folders,
        } => open_file_selection(
            id,
            PickerOptions {
                title: texts.title.to_string(),
                file_types,
                multiple: allow_multiple,
                folders: select_folders,
            },
            &completion,
        ),
        RequestKind::Confirm => open_confirm(id, texts, theme, size, &completion),
        RequestKind::Message { icon } => {
            open_message(id, texts, theme, size, &completion, icon, &palette)
        }
    };

    if let Err(err) = result {
        tracing::error!("{}: failed to open dialog: {:#}", id, err);
        registry::dismiss(id);
        completion.resolve(Response::Failed(BridgeError::Toolkit(format!("{err:#}"))));
    }
}

/// Report the outcome and release the dialog once the current callback returns
fn finish(id: DialogId, completion: &Completion, response: Response) {
    if !completion.resolve(response) {
        tracing::debug!("{}: outcome already reported", id);
    }
    registry::close_later(id);
}

struct Texts {
    title: SharedString,
    prompt: SharedString,
}

impl Texts {
    fn new(title: String, prompt: String) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
        }
    }
}

/// Common tail of every windowed dialog: close button handling, size, show,
/// placement and registration
fn present<C>(
    id: DialogId,
    dialog: &C,
    size: LogicalSize,
    completion: &Completion,
) -> Result<()>
where
    C: ComponentHandle + 'static,
{
    let done = completion.clone();
    dialog.window().on_close_requested(move || {
        finish(id, &done, Response::Cancelled(CancelReason::WindowClosed));
        slint::CloseRequestResponse::HideWindow
    });

    dialog.window().set_size(size);
    dialog.show().context("Failed to show dialog window")?;
    window::raise(dialog.window());

    let handle = dialog.clone_strong();
    registry::register(id, move || {
        if let Err(e) = handle.hide() {
            tracing::warn!("Failed to hide dialog window: {}", e);
        }
    });
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn open_input(
    id: DialogId,
    texts: Texts,
    theme: ThemePalette,
    size: LogicalSize,
    completion: &Completion,
    default_value: String,
    input_type: InputType,
    bounds: NumericBounds,
) -> Result<()> {
    let dialog = InputDialog::new().context("Failed to create input dialog")?;
    dialog.set_theme(theme);
    dialog.set_heading(texts.title);
    dialog.set_prompt(texts.prompt);
    dialog.set_hint(input_hint(input_type, bounds).into());
    dialog.set_value(default_value.into());

    let weak = dialog.as_weak();
    let done = completion.clone();
    dialog.on_submit(move |raw| match parse_input(&raw, input_type, bounds) {
        Ok(answer) => finish(id, &done, Response::Answered(answer)),
        Err(err) => {
            tracing::debug!("{}: rejected input {:?}: {}", id, raw.as_str(), err);
            if let Some(dialog) = weak.upgrade() {
                dialog.set_validation_error(err.to_string().into());
            }
        }
    });

    let done = completion.clone();
    dialog.on_cancel(move || finish(id, &done, Response::Cancelled(CancelReason::UserCancelled)));

    present(id, &dialog, size, completion)
}

fn open_multiline(
    id: DialogId,
    texts: Texts,
    theme: ThemePalette,
    size: LogicalSize,
    completion: &Completion,
    default_value: String,
    allow_files: bool,
) -> Result<()> {
    let dialog = MultilineDialog::new().context("Failed to create multi-line dialog")?;
    dialog.set_theme(theme);
    dialog.set_heading(texts.title);
    dialog.set_prompt(texts.prompt);
    dialog.set_allow_files(allow_files);
    dialog.set_counter(TextStats::of(&default_value).summary().into());
    dialog.set_value(default_value.into());

    let weak = dialog.as_weak();
    dialog.on_edited(move |text| {
        if let Some(dialog) = weak.upgrade() {
            dialog.set_counter(TextStats::of(&text).summary().into());
        }
    });

    let weak = dialog.as_weak();
    dialog.on_attach_files(move || {
        let weak = weak.clone();
        let spawned = picker::spawn_for(
            id,
            PickerOptions::files("Select files to attach", true),
            move |selection| {
                let (Some(paths), Some(dialog)) = (selection, weak.upgrade()) else {
                    return;
                };
                let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                let text = format!("{}{}", dialog.get_value(), attachment_note(&names));
                dialog.set_counter(TextStats::of(&text).summary().into());
                dialog.set_value(text.into());
            },
        );
        if let Err(e) = spawned {
            tracing::warn!("{}: could not open attachment picker: {}", id, e);
        }
    });

    let done = completion.clone();
    dialog.on_submit(move |text| {
        let text = text.trim().to_string();
        finish(id, &done, Response::Answered(Answer::Text(text)));
    });

    let done = completion.clone();
    dialog.on_cancel(move || finish(id, &done, Response::Cancelled(CancelReason::UserCancelled)));

    present(id, &dialog, size, completion)
}

#[allow(clippy::too_many_arguments)]
fn open_choice(
    id: DialogId,
    texts: Texts,
    theme: ThemePalette,
    size: LogicalSize,
    completion: &Completion,
    choices: Vec<String>,
    allow_multiple: bool,
    allow_files: bool,
) -> Result<()> {
    let dialog = ChoiceDialog::new().context("Failed to create choice dialog")?;
    dialog.set_theme(theme);
    dialog.set_heading(texts.title);
    dialog.set_prompt(texts.prompt);
    dialog.set_allow_multiple(allow_multiple);
    dialog.set_allow_files(allow_files);

    let items = Rc::new(VecModel::from(choice_items(&choices)));
    dialog.set_items(ModelRc::from(items.clone()));

    let model = items.clone();
    dialog.on_toggle(move |index| {
        if let Ok(index) = usize::try_from(index) {
            toggle_choice(&model, index, allow_multiple);
        }
    });

    let model = items.clone();
    let weak = dialog.as_weak();
    let done = completion.clone();
    dialog.on_submit(move || {
        let selected = selected_labels(&model);
        if selected.is_empty() {
            if let Some(dialog) = weak.upgrade() {
                dialog.set_validation_error(EMPTY_SELECTION.into());
            }
            return;
        }
        finish(id, &done, Response::Answered(Answer::Choices(selected)));
    });

    for folders in [false, true] {
        let done = completion.clone();
        let browse = move || {
            let options = if folders {
                PickerOptions::folder("Select Folder")
            } else {
                PickerOptions::files("Select Files", allow_multiple)
            };
            let done = done.clone();
            let spawned = picker::spawn_for(id, options, move |selection: Option<Vec<PathBuf>>| {
                // Closing the picker leaves the choice dialog open
                if let Some(paths) = selection {
                    finish(id, &done, Response::Answered(Answer::Files(paths)));
                }
            });
            if let Err(e) = spawned {
                tracing::warn!("{}: could not open picker: {}", id, e);
            }
        };
        if folders {
            dialog.on_browse_folder(browse);
        } else {
            dialog.on_browse_files(browse);
        }
    }

    let done = completion.clone();
    dialog.on_cancel(move || finish(id, &done, Response::Cancelled(CancelReason::UserCancelled)));

    present(id, &dialog, size, completion)
}

fn open_file_selection(
    id: DialogId,
    options: PickerOptions,
    completion: &Completion,
) -> Result<()> {
    let done = completion.clone();
    picker::spawn_for(id, options, move |selection| {
        let response = match selection {
            Some(paths) => Response::Answered(Answer::Files(paths)),
            None => Response::Cancelled(CancelReason::UserCancelled),
        };
        finish(id, &done, response);
    })
    .context("Failed to start the native file picker")
}

fn open_confirm(
    id: DialogId,
    texts: Texts,
    theme: ThemePalette,
    size: LogicalSize,
    completion: &Completion,
) -> Result<()> {
    let dialog = ConfirmDialog::new().context("Failed to create confirmation dialog")?;
    dialog.set_theme(theme);
    dialog.set_heading(texts.title);
    dialog.set_message(texts.prompt);

    let done = completion.clone();
    dialog.on_answer(move |confirmed| {
        finish(id, &done, Response::Answered(Answer::Confirmed(confirmed)));
    });

    present(id, &dialog, size, completion)
}

fn open_message(
    id: DialogId,
    texts: Texts,
    theme: ThemePalette,
    size: LogicalSize,
    completion: &Completion,
    icon: IconType,
    palette: &Palette,
) -> Result<()> {
    let dialog = MessageDialog::new().context("Failed to create message dialog")?;
    dialog.set_theme(theme);
    dialog.set_heading(texts.title);
    dialog.set_message(texts.prompt);
    dialog.set_glyph(icon_glyph(icon).into());
    dialog.set_glyph_color(color(icon_color(icon, palette)));

    let done = completion.clone();
    dialog.on_acknowledge(move || {
        finish(id, &done, Response::Answered(Answer::Acknowledged));
    });

    present(id, &dialog, size, completion)
}

/// Initial rows of a choice dialog; the first option is preselected
fn choice_items(choices: &[String]) -> Vec<ChoiceItem> {
    choices
        .iter()
        .enumerate()
        .map(|(i, label)| ChoiceItem {
            label: label.into(),
            selected: i == 0,
        })
        .collect()
}

/// Radio semantics for single select, checkbox semantics for multi select
fn toggle_choice(model: &VecModel<ChoiceItem>, index: usize, allow_multiple: bool) {
    let Some(mut clicked) = model.row_data(index) else {
        return;
    };

    if allow_multiple {
        clicked.selected = !clicked.selected;
        model.set_row_data(index, clicked);
        return;
    }

    for row in 0..model.row_count() {
        if let Some(mut item) = model.row_data(row) {
            let selected = row == index;
            if item.selected != selected {
                item.selected = selected;
                model.set_row_data(row, item);
            }
        }
    }
}

fn selected_labels(model: &VecModel<ChoiceItem>) -> Vec<String> {
    model
        .iter()
        .filter(|item| item.selected)
        .map(|item| item.label.to_string())
        .collect()
}

/// Glyph drawn next to a message
pub fn icon_glyph(icon: IconType) -> &'static str {
    match icon {
        IconType::Info => "ℹ",
        IconType::Warning => "⚠",
        IconType::Error => "✖",
        IconType::Success => "✔",
    }
}

/// Palette colour used for a message glyph
pub fn icon_color(icon: IconType, palette: &Palette) -> &str {
    match icon {
        IconType::Info => &palette.accent,
        IconType::Warning => &palette.warning,
        IconType::Error => &palette.error,
        IconType::Success => &palette.success,
    }
}

fn color(hex: &str) -> slint::Color {
    let [r, g, b] = parse_hex_color(hex).unwrap_or([0, 0, 0]);
    slint::Color::from_rgb_u8(r, g, b)
}

/// Convert a validated palette into the Slint struct
pub fn theme_palette(palette: &Palette) -> ThemePalette {
    ThemePalette {
        bg: color(&palette.bg),
        fg: color(&palette.fg),
        select_bg: color(&palette.select_bg),
        select_fg: color(&palette.select_fg),
        button_bg: color(&palette.button_bg),
        button_fg: color(&palette.button_fg),
        entry_bg: color(&palette.entry_bg),
        entry_fg: color(&palette.entry_fg),
        frame_bg: color(&palette.frame_bg),
        accent: color(&palette.accent),
        success: color(&palette.success),
        warning: color(&palette.warning),
        error: color(&palette.error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_choice_preselected() {
        let items = choice_items(&labels(&["a", "b", "c"]));
        let selected: Vec<bool> = items.iter().map(|i| i.selected).collect();
        assert_eq!(selected, vec![true, false, false]);
    }

    #[test]
    fn test_single_select_is_exclusive() {
        let model = VecModel::from(choice_items(&labels(&["a", "b", "c"])));
        toggle_choice(&model, 2, false);
        assert_eq!(selected_labels(&model), vec!["c"]);

        // Clicking the selected row keeps it selected
        toggle_choice(&model, 2, false);
        assert_eq!(selected_labels(&model), vec!["c"]);
    }

    #[test]
    fn test_multi_select_toggles() {
        let model = VecModel::from(choice_items(&labels(&["a", "b", "c"])));
        toggle_choice(&model, 1, true);
        toggle_choice(&model, 2, true);
        assert_eq!(selected_labels(&model), vec!["a", "b", "c"]);

        toggle_choice(&model, 0, true);
        assert_eq!(selected_labels(&model), vec!["b", "c"]);

        // Out of range is ignored
        toggle_choice(&model, 10, true);
        assert_eq!(model.row_count(), 3);
    }

    #[test]
    fn test_icon_colours_follow_palette() {
        let palette = Palette::dark();
        assert_eq!(icon_color(IconType::Error, &palette), palette.error);
        assert_eq!(icon_color(IconType::Info, &palette), palette.accent);
        assert_ne!(icon_glyph(IconType::Warning), icon_glyph(IconType::Success));
    }

    #[test]
    fn test_theme_palette_conversion() {
        let theme = theme_palette(&Palette::dark());
        assert_eq!(theme.bg, slint::Color::from_rgb_u8(0x2b, 0x2b, 0x2b));
        assert_eq!(theme.accent, slint::Color::from_rgb_u8(0x00, 0x78, 0xd4));
    }
}
