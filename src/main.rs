//! tagedit - command-line front end for the fragment editor
//!
//! Runs the same session the editor integration runs, with an in-memory
//! surface standing in for the rich-text dialog.

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use tagedit::cli::{format_position, CliArgs, CliCommand};
use tagedit::commands::{CommandId, COMMANDS};
use tagedit::host::{HostDocument, HostEditor};
use tagedit::messages::SessionMsg;
use tagedit::model::{Document, EditorState, Selection};
use tagedit::resolve::{resolve_range, Outcome};
use tagedit::stylesheets::discover_stylesheets;
use tagedit::surface::BufferSurface;
use tagedit::{FragmentEditor, TageditConfig};

/// JSON form of a resolution, with 1-indexed positions
#[derive(Debug, Serialize)]
struct ResolveReport {
    start: String,
    end: String,
    outcome: Outcome,
    content: String,
}

fn load_config(path: Option<&Path>) -> TageditConfig {
    match path {
        Some(path) => TageditConfig::load_from(path),
        None => TageditConfig::load(),
    }
}

fn load_editor(file: PathBuf, selection: Selection, config: &TageditConfig) -> Result<EditorState> {
    let document = Document::from_file(file.clone())
        .with_context(|| format!("Failed to read {}", file.display()))?
        .with_indent(config.indent);
    let mut editor = EditorState::new(document);
    editor.set_selection(selection);
    Ok(editor)
}

fn read_fragment(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut fragment = String::new();
        std::io::stdin()
            .read_to_string(&mut fragment)
            .context("Failed to read fragment from stdin")?;
        return Ok(fragment);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn run_resolve(file: PathBuf, selection: Selection, json: bool, config: &TageditConfig) -> Result<()> {
    let editor = load_editor(file, selection, config)?;
    let resolution = resolve_range(editor.structure(), editor.current_selection());
    let content = editor
        .document()
        .text_range(resolution.range.start, resolution.range.end);

    if json {
        let report = ResolveReport {
            start: format_position(resolution.range.start),
            end: format_position(resolution.range.end),
            outcome: resolution.outcome,
            content,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}-{} ({:?})",
            format_position(resolution.range.start),
            format_position(resolution.range.end),
            resolution.outcome
        );
        print!("{}", content);
        if !content.is_empty() && !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn run_edit(
    file: PathBuf,
    selection: Selection,
    fragment: &Path,
    output: Option<PathBuf>,
    in_place: bool,
    config: &TageditConfig,
) -> Result<()> {
    let mut editor = load_editor(file.clone(), selection, config)?;
    let replacement = read_fragment(fragment)?;
    let mut fragment_editor = FragmentEditor::new(BufferSurface::new(), config);

    if fragment_editor
        .update(&mut editor, CommandId::EditFragment.to_msg())
        .is_none()
    {
        bail!(
            "Nothing to edit: the selection in {} is in {} content, not HTML",
            file.display(),
            editor.language_at_selection().display_name()
        );
    }

    let Some(handle) = fragment_editor.session().and_then(|s| s.surface) else {
        fragment_editor.update(&mut editor, SessionMsg::Cancel);
        bail!("The editing surface failed to start");
    };

    fragment_editor.update(&mut editor, SessionMsg::SurfaceReady(handle));
    fragment_editor.surface_mut().edit(handle, &replacement)?;
    fragment_editor.update(&mut editor, SessionMsg::Commit);

    let document = &mut editor.document;
    match (output, in_place) {
        (Some(path), _) => document.save_to(&path)?,
        (None, true) => document.save_to(&file)?,
        (None, false) => print!("{}", document.buffer),
    }
    Ok(())
}

fn run_stylesheets(file: PathBuf, config: &TageditConfig) -> Result<()> {
    let document = Document::from_file(file.clone())
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let sheets = discover_stylesheets(
        &document.text(),
        file.parent(),
        &config.stylesheet_extensions,
    );
    for sheet in sheets {
        println!("{}", sheet.display());
    }
    Ok(())
}

fn run_commands() {
    for command in COMMANDS {
        println!(
            "{:<24} {:<24} {}",
            command.id.as_str(),
            command.label,
            command.keybinding.unwrap_or("")
        );
    }
}

fn main() -> Result<()> {
    tagedit::tracing::init();

    let args = CliArgs::parse();
    let config = load_config(args.config.as_deref());

    match args.command {
        CliCommand::Resolve {
            file,
            selection,
            json,
        } => run_resolve(file, selection, json, &config),
        CliCommand::Edit {
            file,
            selection,
            fragment,
            output,
            in_place,
        } => run_edit(file, selection, &fragment, output, in_place, &config),
        CliCommand::Stylesheets { file } => run_stylesheets(file, &config),
        CliCommand::Commands => {
            run_commands();
            Ok(())
        }
    }
}
