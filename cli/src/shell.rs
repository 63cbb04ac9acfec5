//! Interactive loop over one `TodoScreen`.
//!
//! Items are addressed by their 1-based position on screen. Failed actions
//! are logged and the loop carries on.

use std::io::{BufRead, Write};

use tasklist_core::blocking::{drive, Transport};
use tasklist_core::{ApiError, Direction, Outbound, TodoId, TodoScreen};

use crate::render::render;

const HELP: &str = "\
commands:
  add <title>     add a todo
  edit <n>        start renaming item n
  save [title]    save the rename (optionally replacing the draft)
  cancel          stop renaming
  toggle <n>      flip completion of item n
  rm <n>          delete item n
  up <n>          move item n up (not saved)
  down <n>        move item n down (not saved)
  ls              reload from the server
  help            show this text
  quit            leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Edit(usize),
    Save(Option<String>),
    Cancel,
    Toggle(usize),
    Remove(usize),
    Move(usize, Direction),
    Refresh,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let position = || -> Result<usize, String> {
        match rest.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("{word}: expected an item number, got {rest:?}")),
        }
    };
    let command = match word {
        "add" | "a" => ShellCommand::Add(rest.to_string()),
        "edit" | "e" => ShellCommand::Edit(position()?),
        "save" | "s" => ShellCommand::Save((!rest.is_empty()).then(|| rest.to_string())),
        "cancel" => ShellCommand::Cancel,
        "toggle" | "t" => ShellCommand::Toggle(position()?),
        "rm" | "delete" => ShellCommand::Remove(position()?),
        "up" => ShellCommand::Move(position()?, Direction::Up),
        "down" => ShellCommand::Move(position()?, Direction::Down),
        "ls" | "refresh" => ShellCommand::Refresh,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command {other:?}, try `help`")),
    };
    Ok(Some(command))
}

fn id_at(screen: &TodoScreen, position: usize) -> Result<TodoId, ApiError> {
    screen
        .items()
        .get(position - 1)
        .map(|item| item.id.clone())
        .ok_or(ApiError::NotFound)
}

/// Turn a command into the request it needs, if any.
fn dispatch(screen: &mut TodoScreen, command: ShellCommand) -> Result<Option<Outbound>, ApiError> {
    match command {
        ShellCommand::Add(title) => {
            screen.set_input(title);
            screen.add().map(Some)
        }
        ShellCommand::Edit(n) => {
            let id = id_at(screen, n)?;
            screen.begin_edit(&id);
            Ok(None)
        }
        ShellCommand::Save(title) => {
            if let Some(title) = title {
                screen.set_draft(title);
            }
            screen.submit_edit().map(Some)
        }
        ShellCommand::Cancel => {
            screen.cancel_edit();
            Ok(None)
        }
        ShellCommand::Toggle(n) => {
            let id = id_at(screen, n)?;
            screen.toggle_complete(&id).map(Some)
        }
        ShellCommand::Remove(n) => {
            let id = id_at(screen, n)?;
            Ok(Some(screen.delete(&id)))
        }
        ShellCommand::Move(n, direction) => {
            screen.move_item(n - 1, direction);
            Ok(None)
        }
        ShellCommand::Refresh => Ok(Some(screen.refresh())),
        ShellCommand::Help | ShellCommand::Quit => Ok(None),
    }
}

/// Read commands from `input` until EOF or `quit`, rendering the screen to
/// `out` after each one.
pub fn run<T: Transport + ?Sized>(
    screen: &mut TodoScreen,
    transport: &T,
    input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<()> {
    let outbound = screen.refresh();
    if let Err(e) = drive(screen, transport, outbound) {
        log::debug!("initial load failed: {e}");
    }
    write!(out, "{}> ", render(screen))?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(ShellCommand::Help)) => write!(out, "{HELP}")?,
            Ok(Some(command)) => {
                let result = dispatch(screen, command)
                    .and_then(|outbound| match outbound {
                        Some(outbound) => drive(screen, transport, outbound),
                        None => Ok(()),
                    });
                if let Err(e) = result {
                    log::warn!("{line}: {e}");
                }
            }
            Err(msg) => writeln!(out, "{msg}")?,
        }
        write!(out, "{}> ", render(screen))?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
