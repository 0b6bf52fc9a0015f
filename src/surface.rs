//! Rich-text editing surface contract
//!
//! The surface is whatever the fragment is edited in: a WYSIWYG widget in a
//! GUI host, a buffer fed from a file in the CLI. It starts asynchronously
//! and announces readiness once; content can only be pushed after that.

use std::collections::HashMap;
use std::path::PathBuf;

/// Opaque identifier of one live surface instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Options handed to the surface when it opens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Stylesheets the surface should render the fragment with
    pub contents_css: Vec<PathBuf>,
}

/// Errors reported by an editing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface could not be created
    InitFailed(String),
    /// The handle does not refer to a live surface
    UnknownHandle(SurfaceHandle),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitFailed(msg) => write!(f, "editing surface failed to initialize: {}", msg),
            Self::UnknownHandle(handle) => write!(f, "no editing surface with handle {}", handle.0),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A rich-text editing surface.
///
/// `open` returns immediately; the host later delivers a one-shot ready
/// notification, after which `set_content` and `focus` are valid.
pub trait EditingSurface {
    fn open(
        &mut self,
        initial_content: &str,
        config: &SurfaceConfig,
    ) -> Result<SurfaceHandle, SurfaceError>;

    fn set_content(&mut self, handle: SurfaceHandle, content: &str) -> Result<(), SurfaceError>;

    fn focus(&mut self, handle: SurfaceHandle);

    /// Current (possibly user-edited) content
    fn content(&self, handle: SurfaceHandle) -> Result<String, SurfaceError>;

    fn destroy(&mut self, handle: SurfaceHandle);
}

#[derive(Debug, Clone, Default)]
struct BufferInstance {
    content: String,
    config: SurfaceConfig,
    focused: bool,
}

/// In-memory editing surface.
///
/// Holds each instance's content as a plain string; `edit` stands in for
/// the user typing into the surface.
#[derive(Debug, Default)]
pub struct BufferSurface {
    instances: HashMap<SurfaceHandle, BufferInstance>,
    next_id: u64,
    fail_next_open: Option<String>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `open` fail with `reason`
    pub fn fail_next_open(&mut self, reason: impl Into<String>) {
        self.fail_next_open = Some(reason.into());
    }

    /// Replace an instance's content as if the user had edited it
    pub fn edit(&mut self, handle: SurfaceHandle, content: &str) -> Result<(), SurfaceError> {
        let instance = self
            .instances
            .get_mut(&handle)
            .ok_or(SurfaceError::UnknownHandle(handle))?;
        instance.content = content.to_string();
        Ok(())
    }

    pub fn is_live(&self, handle: SurfaceHandle) -> bool {
        self.instances.contains_key(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.instances.len()
    }

    pub fn is_focused(&self, handle: SurfaceHandle) -> bool {
        self.instances.get(&handle).is_some_and(|i| i.focused)
    }

    pub fn config(&self, handle: SurfaceHandle) -> Option<&SurfaceConfig> {
        self.instances.get(&handle).map(|i| &i.config)
    }
}

impl EditingSurface for BufferSurface {
    fn open(
        &mut self,
        _initial_content: &str,
        config: &SurfaceConfig,
    ) -> Result<SurfaceHandle, SurfaceError> {
        if let Some(reason) = self.fail_next_open.take() {
            return Err(SurfaceError::InitFailed(reason));
        }

        self.next_id += 1;
        let handle = SurfaceHandle(self.next_id);
        // Content arrives with the ready notification, not at open time
        self.instances.insert(
            handle,
            BufferInstance {
                config: config.clone(),
                ..BufferInstance::default()
            },
        );
        Ok(handle)
    }

    fn set_content(&mut self, handle: SurfaceHandle, content: &str) -> Result<(), SurfaceError> {
        self.edit(handle, content)
    }

    fn focus(&mut self, handle: SurfaceHandle) {
        if let Some(instance) = self.instances.get_mut(&handle) {
            instance.focused = true;
        }
    }

    fn content(&self, handle: SurfaceHandle) -> Result<String, SurfaceError> {
        self.instances
            .get(&handle)
            .map(|i| i.content.clone())
            .ok_or(SurfaceError::UnknownHandle(handle))
    }

    fn destroy(&mut self, handle: SurfaceHandle) {
        self.instances.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_starts_empty_until_content_is_set() {
        let mut surface = BufferSurface::new();
        let handle = surface.open("<p>x</p>", &SurfaceConfig::default()).unwrap();
        assert_eq!(surface.content(handle).unwrap(), "");
        surface.set_content(handle, "<p>x</p>").unwrap();
        assert_eq!(surface.content(handle).unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_destroy_removes_instance() {
        let mut surface = BufferSurface::new();
        let handle = surface.open("", &SurfaceConfig::default()).unwrap();
        surface.destroy(handle);
        assert!(!surface.is_live(handle));
        assert_eq!(
            surface.content(handle),
            Err(SurfaceError::UnknownHandle(handle))
        );
    }

    #[test]
    fn test_fail_next_open_is_one_shot() {
        let mut surface = BufferSurface::new();
        surface.fail_next_open("no renderer");
        assert!(matches!(
            surface.open("", &SurfaceConfig::default()),
            Err(SurfaceError::InitFailed(_))
        ));
        assert!(surface.open("", &SurfaceConfig::default()).is_ok());
    }
}
