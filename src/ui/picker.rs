// Native file and folder pickers
//
// Pickers are `rfd` async dialogs driven by `slint::spawn_local`, so the Slint
// event loop keeps running while one is open. Every picker task is registered
// against its dialog id; dismissing the dialog aborts the task and any later
// selection is discarded.

use crate::models::{DialogId, normalize_extension};
use crate::ui::registry;
use rfd::AsyncFileDialog;
use std::path::PathBuf;

/// What to ask the platform picker for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerOptions {
    pub title: String,
    /// Extension filters as given by the caller (".txt", "pdf", "*.png")
    pub file_types: Vec<String>,
    pub multiple: bool,
    pub folders: bool,
}

impl PickerOptions {
    pub fn files(title: impl Into<String>, multiple: bool) -> Self {
        Self {
            title: title.into(),
            multiple,
            ..Self::default()
        }
    }

    pub fn folder(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            folders: true,
            ..Self::default()
        }
    }
}

/// Named filters for the picker: one per extension, then "All files"
pub fn filters(file_types: &[String]) -> Vec<(String, Vec<String>)> {
    let mut filters: Vec<(String, Vec<String>)> = file_types
        .iter()
        .map(|ext| normalize_extension(ext))
        .filter(|ext| !ext.is_empty())
        .map(|ext| (format!("{} files", ext.to_ascii_uppercase()), vec![ext]))
        .collect();

    if !filters.is_empty() {
        filters.push(("All files".to_string(), vec!["*".to_string()]));
    }
    filters
}

/// Show the platform picker; `None` when the human closed it without choosing
pub async fn pick(options: PickerOptions) -> Option<Vec<PathBuf>> {
    let mut dialog = AsyncFileDialog::new().set_title(&options.title);
    for (name, extensions) in filters(&options.file_types) {
        dialog = dialog.add_filter(name, extensions.as_slice());
    }

    let handles = match (options.folders, options.multiple) {
        (true, true) => dialog.pick_folders().await,
        (true, false) => dialog.pick_folder().await.map(|folder| vec![folder]),
        (false, true) => dialog.pick_files().await,
        (false, false) => dialog.pick_file().await.map(|file| vec![file]),
    }?;

    let paths: Vec<PathBuf> = handles
        .iter()
        .map(|handle| handle.path().to_path_buf())
        .collect();

    if paths.is_empty() { None } else { Some(paths) }
}

/// Run `pick` on the UI thread for dialog `id` and hand the result to `on_done`.
///
/// The task is aborted if the dialog is dismissed first; `on_done` then never runs.
pub fn spawn_for<F>(
    id: DialogId,
    options: PickerOptions,
    on_done: F,
) -> Result<(), slint::EventLoopError>
where
    F: FnOnce(Option<Vec<PathBuf>>) + 'static,
{
    tracing::debug!("{}: opening native picker {:?}", id, options.title);

    let task = slint::spawn_local(async move {
        let selection = pick(options).await;
        on_done(selection);
    })?;

    registry::register(id, move || task.abort());
    Ok(())
}
