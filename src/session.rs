//! Edit session orchestration
//!
//! One session at a time: `Invoke` resolves the selection, extracts the
//! fragment and opens the surface; `Commit` splices the edited fragment
//! back and re-indents it; `Cancel` just tears the surface down. Only
//! `Commit` touches the document.
//!
//! ```text
//! Idle ──Invoke──▶ Editing ──Commit──▶ Idle   (document spliced + re-indented)
//!                     │
//!                     └──────Cancel──▶ Idle   (document untouched)
//! ```

use crate::commands::Cmd;
use crate::config::TageditConfig;
use crate::host::{HostDocument, HostEditor};
use crate::messages::SessionMsg;
use crate::model::Range;
use crate::resolve::{resolve_range, Outcome};
use crate::stylesheets::discover_stylesheets;
use crate::surface::{EditingSurface, SurfaceConfig, SurfaceHandle};

/// The live state of one fragment edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Span of the document the fragment replaces on commit
    pub range: Range,
    /// How `range` was resolved from the selection
    pub outcome: Outcome,
    /// Text extracted from `range` when the session started
    pub original_content: String,
    /// `None` when the surface failed to initialize; cancel still works
    pub surface: Option<SurfaceHandle>,
    /// Whether the surface's ready notification has been handled
    pub ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Editing(EditSession),
}

/// Drives edit sessions against a host editor and an editing surface
#[derive(Debug)]
pub struct FragmentEditor<S> {
    surface: S,
    state: SessionState,
    stylesheet_extensions: Vec<String>,
}

impl<S: EditingSurface> FragmentEditor<S> {
    pub fn new(surface: S, config: &TageditConfig) -> Self {
        Self {
            surface,
            state: SessionState::Idle,
            stylesheet_extensions: config.stylesheet_extensions.clone(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            SessionState::Editing(session) => Some(session),
            SessionState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, SessionState::Editing(_))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Main update function - dispatches to the per-message handlers
    pub fn update<H: HostEditor>(&mut self, host: &mut H, msg: SessionMsg) -> Option<Cmd> {
        match msg {
            SessionMsg::Invoke => self.invoke(host),
            SessionMsg::SurfaceReady(handle) => self.surface_ready(handle),
            SessionMsg::Commit => self.commit(host),
            SessionMsg::Cancel => self.cancel(),
        }
    }

    fn invoke<H: HostEditor>(&mut self, host: &H) -> Option<Cmd> {
        if self.is_editing() {
            tracing::warn!("edit session already active, ignoring invoke");
            return None;
        }

        let language = host.language_at_selection();
        if !language.is_html() {
            tracing::debug!(language = language.id(), "selection is not HTML, nothing to edit");
            return None;
        }

        let selection = host.current_selection();
        let resolution = resolve_range(host.structure(), selection);
        let document = host.document();
        let original_content = if resolution.is_expanded() {
            document.text_range(resolution.range.start, resolution.range.end)
        } else {
            String::new()
        };

        let config = SurfaceConfig {
            contents_css: discover_stylesheets(
                &document.text(),
                document.file_path().and_then(|p| p.parent()),
                &self.stylesheet_extensions,
            ),
        };

        let surface = match self.surface.open(&original_content, &config) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("{}; dialog stays open so it can be cancelled", e);
                None
            }
        };

        tracing::info!(
            range = ?resolution.range,
            outcome = ?resolution.outcome,
            chars = original_content.chars().count(),
            "edit session started"
        );

        self.state = SessionState::Editing(EditSession {
            range: resolution.range,
            outcome: resolution.outcome,
            original_content,
            surface,
            ready: false,
        });
        Some(Cmd::ShowDialog)
    }

    fn surface_ready(&mut self, handle: SurfaceHandle) -> Option<Cmd> {
        let SessionState::Editing(session) = &mut self.state else {
            tracing::debug!(?handle, "surface ready with no session, ignoring");
            return None;
        };
        if session.surface != Some(handle) || session.ready {
            tracing::debug!(?handle, "stale or repeated ready notification, ignoring");
            return None;
        }

        session.ready = true;
        if let Err(e) = self.surface.set_content(handle, &session.original_content) {
            tracing::warn!("Failed to load fragment into surface: {}", e);
        }
        self.surface.focus(handle);
        Some(Cmd::Redraw)
    }

    fn commit<H: HostEditor>(&mut self, host: &mut H) -> Option<Cmd> {
        let SessionState::Editing(session) = std::mem::take(&mut self.state) else {
            tracing::debug!("commit with no session, ignoring");
            return None;
        };

        let Some(handle) = session.surface else {
            tracing::warn!("commit without an editing surface, closing without changes");
            return Some(Cmd::CloseDialog);
        };

        if !session.ready {
            tracing::warn!("commit before the surface was ready, closing without changes");
            self.surface.destroy(handle);
            return Some(Cmd::CloseDialog);
        }

        let content = match self.surface.content(handle) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read surface content: {}", e);
                self.surface.destroy(handle);
                return Some(Cmd::CloseDialog);
            }
        };

        let range = session.range;
        let inserted_lines = content.split('\n').count();
        let document = host.document_mut();
        document.replace_range(&content, range.start, range.end);

        let last_line = range.start.line + inserted_lines - 1;
        document.reindent_lines(range.start.line..=last_line);

        tracing::info!(
            ?range,
            lines = inserted_lines,
            "committed fragment"
        );

        self.surface.destroy(handle);
        Some(Cmd::Batch(vec![Cmd::Redraw, Cmd::CloseDialog]))
    }

    fn cancel(&mut self) -> Option<Cmd> {
        let SessionState::Editing(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        if let Some(handle) = session.surface {
            self.surface.destroy(handle);
        }
        tracing::debug!("edit session cancelled");
        Some(Cmd::CloseDialog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, EditorState, Position};
    use crate::surface::BufferSurface;

    fn editor(text: &str, a: (usize, usize), b: (usize, usize)) -> EditorState {
        EditorState::new(Document::with_text(text))
            .with_selection(Position::new(a.0, a.1), Position::new(b.0, b.1))
    }

    fn fragment_editor() -> FragmentEditor<BufferSurface> {
        FragmentEditor::new(BufferSurface::new(), &TageditConfig::default())
    }

    #[test]
    fn test_invoke_enters_editing() {
        let mut host = editor("<div><p>Hi</p></div>", (0, 8), (0, 10));
        let mut fe = fragment_editor();

        let cmd = fe.update(&mut host, SessionMsg::Invoke);

        assert_eq!(cmd, Some(Cmd::ShowDialog));
        let session = fe.session().unwrap();
        assert_eq!(session.original_content, "<p>Hi</p>");
        assert!(session.surface.is_some());
        assert!(!session.ready);
    }

    #[test]
    fn test_second_invoke_is_ignored() {
        let mut host = editor("<p>Hi</p>", (0, 4), (0, 5));
        let mut fe = fragment_editor();
        fe.update(&mut host, SessionMsg::Invoke);
        let first = fe.session().cloned();

        assert_eq!(fe.update(&mut host, SessionMsg::Invoke), None);
        assert_eq!(fe.session().cloned(), first);
        assert_eq!(fe.surface().live_count(), 1);
    }

    #[test]
    fn test_ready_is_one_shot() {
        let mut host = editor("<p>Hi</p>", (0, 4), (0, 5));
        let mut fe = fragment_editor();
        fe.update(&mut host, SessionMsg::Invoke);
        let handle = fe.session().unwrap().surface.unwrap();

        assert_eq!(fe.update(&mut host, SessionMsg::SurfaceReady(handle)), Some(Cmd::Redraw));
        fe.surface_mut().edit(handle, "<p>edited</p>").unwrap();
        assert_eq!(fe.update(&mut host, SessionMsg::SurfaceReady(handle)), None);
        assert_eq!(fe.surface().content(handle).unwrap(), "<p>edited</p>");
    }

    #[test]
    fn test_commit_and_cancel_when_idle_do_nothing() {
        let mut host = editor("<p>Hi</p>", (0, 0), (0, 0));
        let mut fe = fragment_editor();
        assert_eq!(fe.update(&mut host, SessionMsg::Commit), None);
        assert_eq!(fe.update(&mut host, SessionMsg::Cancel), None);
    }
}
