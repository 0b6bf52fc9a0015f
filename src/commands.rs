//! Command types for the Elm-style architecture
//!
//! `CommandId` is what a menu entry, toolbar button or keybinding triggers;
//! `Cmd` is the side effect an update asks the host to perform afterwards.

use crate::messages::SessionMsg;

// ============================================================================
// Command Registry
// ============================================================================

/// Identifies a command the host can register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// Open the selected HTML fragment in the editing surface
    EditFragment,
}

impl CommandId {
    /// Stable string id used when registering with a host
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandId::EditFragment => "tagedit.edit-fragment",
        }
    }

    pub fn from_str_id(id: &str) -> Option<Self> {
        COMMANDS.iter().map(|c| c.id).find(|c| c.as_str() == id)
    }

    /// The message a command dispatches; commands take no arguments
    pub fn to_msg(&self) -> SessionMsg {
        match self {
            CommandId::EditFragment => SessionMsg::Invoke,
        }
    }
}

/// A command definition for menus and keybinding tables
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub id: CommandId,
    pub label: &'static str,
    pub keybinding: Option<&'static str>,
}

/// Static registry of all available commands
pub static COMMANDS: &[CommandDef] = &[CommandDef {
    id: CommandId::EditFragment,
    label: "Edit HTML Fragment...",
    keybinding: Some("⇧⌘E"),
}];

// ============================================================================
// Side effects
// ============================================================================

/// Side effects requested by `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Show the modal dialog hosting the editing surface
    ShowDialog,
    /// Close the modal dialog
    CloseDialog,
    /// The document changed; redraw it
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_registered_command() {
        assert_eq!(COMMANDS.len(), 1);
        assert_eq!(COMMANDS[0].id, CommandId::EditFragment);
    }

    #[test]
    fn test_command_id_round_trips_through_string() {
        let id = CommandId::EditFragment;
        assert_eq!(CommandId::from_str_id(id.as_str()), Some(id));
        assert_eq!(CommandId::from_str_id("tagedit.unknown"), None);
    }

    #[test]
    fn test_command_dispatches_invoke() {
        assert_eq!(CommandId::EditFragment.to_msg(), SessionMsg::Invoke);
    }
}
