//! Styled terminal output shared by every command.
//!
//! Status lines start with a colored glyph.  Success, info and tips go
//! to stdout; warnings and errors go to stderr so piped output stays clean.

use comfy_table::{ContentArrangement, Table};
use console::{style, StyledObject};

use crate::crypto::secure_wipe_string;
use crate::vault::Entry;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Mask shown in place of a hidden password.
const PASSWORD_MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

fn status_line(glyph: StyledObject<&str>, msg: &str, to_stderr: bool) {
    if to_stderr {
        eprintln!("{glyph} {msg}");
    } else {
        println!("{glyph} {msg}");
    }
}

pub fn success(msg: &str) {
    status_line(style("\u{2713}").green().bold(), msg, false);
}

pub fn error(msg: &str) {
    status_line(style("\u{2717}").red().bold(), msg, true);
}

pub fn warning(msg: &str) {
    status_line(style("\u{26a0}").yellow().bold(), msg, true);
}

pub fn info(msg: &str) {
    status_line(style("\u{2139}").blue().bold(), msg, false);
}

/// A dimmed hint about what to run next.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries (ID, Title, Username, URL, Updated).
///
/// Passwords are never part of the table.
pub fn print_entries_table(entries: &[Entry]) {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["ID", "Title", "Username", "URL", "Updated"]);

    let rows = entries.iter().map(|e| {
        [
            e.id().to_string(),
            e.title.clone(),
            e.username.clone(),
            e.url.clone(),
            e.updated_at().format(TIME_FORMAT).to_string(),
        ]
    });
    table.add_rows(rows);

    println!("{table}");
}

/// Print every field of one entry; the password is masked unless `reveal`.
pub fn print_entry(entry: &Entry, reveal: bool) {
    let password = if reveal {
        entry.password.clone()
    } else {
        PASSWORD_MASK.to_string()
    };

    let mut rows = [
        ("id", entry.id().to_string()),
        ("title", entry.title.clone()),
        ("username", entry.username.clone()),
        ("password", password),
        ("url", entry.url.clone()),
        ("notes", entry.notes.clone()),
        ("created", entry.created_at().format(TIME_FORMAT).to_string()),
        ("updated", entry.updated_at().format(TIME_FORMAT).to_string()),
    ];

    for (label, value) in &mut rows {
        println!("{} {}", style(format!("{label:>8}:")).cyan(), value);
        secure_wipe_string(value);
    }
}
