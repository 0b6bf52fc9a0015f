//! Message types for the Elm-style architecture
//!
//! All edit-session state changes flow through these message types.

use crate::surface::SurfaceHandle;

/// Edit session messages (user actions and surface notifications)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMsg {
    /// Start a session on the current selection (the registered command)
    Invoke,
    /// The editing surface finished initializing (fires once per surface)
    SurfaceReady(SurfaceHandle),
    /// Write the surface content back over the resolved range
    Commit,
    /// Close the session without touching the document
    Cancel,
}
