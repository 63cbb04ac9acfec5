//! Plain-text rendering of the screen.

use std::fmt::Write;

use tasklist_core::{EditState, TodoScreen};

/// One numbered line per item; the item being edited shows its draft.
pub fn render(screen: &TodoScreen) -> String {
    let mut out = String::new();
    if screen.items().is_empty() {
        out.push_str("(no todos)\n");
        return out;
    }
    for (i, item) in screen.items().iter().enumerate() {
        let mark = if item.completed { 'x' } else { ' ' };
        match screen.editing() {
            EditState::Editing { id, draft } if *id == item.id => {
                let _ = writeln!(out, "{:>3}. [{mark}] {draft}_  (editing {})", i + 1, item.id);
            }
            _ => {
                let _ = writeln!(out, "{:>3}. [{mark}] {}  ({})", i + 1, item.title, item.id);
            }
        }
    }
    out
}
