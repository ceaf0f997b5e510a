use anyhow::{Context, Result};
use linemark_engine::{Cmd, EncodeOptions, Outline, Patch, io, parsing};
use ratatui::widgets::ListState;
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Files,
    Outline,
}

/// An open record file with its undo history.
///
/// The engine keeps no history: every edit returns a new `Outline`, and the
/// previous one is pushed here.
pub struct OpenDocument {
    pub relative_path: RelativePathBuf,
    pub loaded: Outline,
    pub current: Outline,
    pub history: Vec<Outline>,
    pub cursor: ListState,
}

impl OpenDocument {
    fn new(relative_path: RelativePathBuf, outline: Outline) -> Self {
        let mut cursor = ListState::default();
        if !outline.is_empty() {
            cursor.select(Some(0));
        }
        Self {
            relative_path,
            loaded: outline.clone(),
            current: outline,
            history: Vec::new(),
            cursor,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.loaded
    }

    pub fn selected(&self) -> Option<usize> {
        self.cursor.selected()
    }
}

pub struct App {
    pub documents_path: PathBuf,
    pub options: EncodeOptions,
    pub files: Vec<RelativePathBuf>,
    pub file_list_state: ListState,
    pub focus: Pane,
    pub document: Option<OpenDocument>,
    pub status: String,
}

impl App {
    pub fn new(documents_path: PathBuf, options: EncodeOptions) -> Result<Self> {
        let files = io::scan_outline_files(&documents_path)?
            .into_iter()
            .filter_map(|path| {
                let relative = path.strip_prefix(&documents_path).ok()?;
                RelativePathBuf::from_path(relative).ok()
            })
            .collect::<Vec<_>>();

        let mut app = Self {
            documents_path,
            options,
            files,
            file_list_state: ListState::default(),
            focus: Pane::Files,
            document: None,
            status: String::new(),
        };

        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
        }

        Ok(app)
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Files if self.document.is_some() => Pane::Outline,
            _ => Pane::Files,
        };
    }

    pub fn next(&mut self) {
        match self.focus {
            Pane::Files => step(&mut self.file_list_state, self.files.len(), 1),
            Pane::Outline => {
                if let Some(doc) = &mut self.document {
                    let len = doc.current.len();
                    step(&mut doc.cursor, len, 1);
                }
            }
        }
    }

    pub fn previous(&mut self) {
        match self.focus {
            Pane::Files => step(&mut self.file_list_state, self.files.len(), -1),
            Pane::Outline => {
                if let Some(doc) = &mut self.document {
                    let len = doc.current.len();
                    step(&mut doc.cursor, len, -1);
                }
            }
        }
    }

    /// Load the selected file into the outline pane.
    pub fn open_selected(&mut self) {
        let Some(relative_path) = self
            .file_list_state
            .selected()
            .and_then(|i| self.files.get(i))
            .cloned()
        else {
            return;
        };

        match io::load_outline(&relative_path, &self.documents_path, self.options) {
            Ok(outline) => {
                self.status = format!("Opened {relative_path} ({} lines)", outline.len());
                self.document = Some(OpenDocument::new(relative_path, outline));
                self.focus = Pane::Outline;
            }
            Err(e) => {
                log::warn!("failed to open {relative_path}: {e:#}");
                self.status = format!("Error opening {relative_path}: {e:#}");
            }
        }
    }

    /// Run an edit against the selected line, keeping the previous outline for undo.
    pub fn edit(&mut self, make: fn(usize) -> Cmd) {
        let Some(doc) = &mut self.document else {
            return;
        };
        let Some(at) = doc.selected() else {
            return;
        };

        let cmd = make(at);
        match doc.current.apply(cmd) {
            Ok(next) => {
                let patch = Patch::between(doc.current.lines(), next.lines());
                if patch.is_empty() {
                    self.status = format!("{cmd:?}: nothing to do");
                    return;
                }
                self.status = format!("{cmd:?}: {} lines re-encoded", patch.line_count());
                let previous = std::mem::replace(&mut doc.current, next);
                doc.history.push(previous);
            }
            Err(e) => self.status = format!("Error: {e}"),
        }
    }

    pub fn undo(&mut self) {
        let Some(doc) = &mut self.document else {
            return;
        };
        match doc.history.pop() {
            Some(previous) => {
                doc.current = previous;
                self.status = format!("Undone ({} steps left)", doc.history.len());
            }
            None => self.status = "Nothing to undo".to_string(),
        }
    }

    /// Drop every edit since the file was opened or last saved.
    pub fn reset(&mut self) {
        let Some(doc) = &mut self.document else {
            return;
        };
        if doc.is_dirty() {
            let previous = std::mem::replace(&mut doc.current, doc.loaded.clone());
            doc.history.push(previous);
            self.status = "Reset to saved state".to_string();
        }
    }

    pub fn save(&mut self) {
        let Some(doc) = &mut self.document else {
            return;
        };
        match io::save_outline(&doc.relative_path, &self.documents_path, &doc.current) {
            Ok(()) => {
                doc.loaded = doc.current.clone();
                self.status = format!("Saved {}", doc.relative_path);
            }
            Err(e) => self.status = format!("Error saving {}: {e}", doc.relative_path),
        }
    }
}

/// Load a record file outside any documents directory and verify it.
pub fn check_file(path: &Path, options: EncodeOptions) -> Result<Outline> {
    let name = path
        .file_name()
        .with_context(|| format!("not a file: {}", path.display()))?;
    let root = path.parent().unwrap_or(Path::new(""));
    let outline = io::load_outline(&RelativePathBuf::from_path(name)?, root, options)?;
    parsing::check(outline.lines())?;
    Ok(outline)
}

fn step(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    };
    state.select(Some(i));
}
