//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use tagedit::commands::Cmd;
use tagedit::messages::SessionMsg;
use tagedit::model::{Document, EditorState, Position};
use tagedit::surface::{BufferSurface, SurfaceHandle};
use tagedit::{FragmentEditor, TageditConfig};

/// Create an editor over `text` with a selection from `anchor` to `head`
pub fn editor_with_selection(
    text: &str,
    anchor: (usize, usize),
    head: (usize, usize),
) -> EditorState {
    EditorState::new(Document::with_text(text)).with_selection(
        Position::new(anchor.0, anchor.1),
        Position::new(head.0, head.1),
    )
}

/// Fragment editor with default config and an in-memory surface
pub fn fragment_editor() -> FragmentEditor<BufferSurface> {
    FragmentEditor::new(BufferSurface::new(), &TageditConfig::default())
}

/// Invoke and deliver the ready notification; returns the surface handle
pub fn start_session(
    fe: &mut FragmentEditor<BufferSurface>,
    host: &mut EditorState,
) -> SurfaceHandle {
    assert_eq!(fe.update(host, SessionMsg::Invoke), Some(Cmd::ShowDialog));
    let handle = fe
        .session()
        .and_then(|s| s.surface)
        .expect("surface should have opened");
    assert_eq!(fe.update(host, SessionMsg::SurfaceReady(handle)), Some(Cmd::Redraw));
    handle
}

/// Run a full session that replaces the resolved fragment with `replacement`
/// (or leaves it as extracted when `None`) and commits
pub fn edit_and_commit(host: &mut EditorState, replacement: Option<&str>) -> Option<Cmd> {
    let mut fe = fragment_editor();
    let handle = start_session(&mut fe, host);
    if let Some(replacement) = replacement {
        fe.surface_mut().edit(handle, replacement).unwrap();
    }
    let cmd = fe.update(host, SessionMsg::Commit);
    assert!(!fe.is_editing());
    assert_eq!(fe.surface().live_count(), 0);
    cmd
}
