//! Terminal styling.
//!
//! Styling is an explicit interface rather than free functions in scope: the
//! render stages receive a `&dyn Styler` and call [`Styler::bold`] or
//! [`Styler::accent`]. Plain mode swaps in [`PlainStyler`], so the
//! `plain_text` bypass is a choice of implementation, not a branch in every
//! stage.

/// Select Graphic Rendition reset.
pub const RESET: &str = "\x1b[0m";
/// SGR bold.
pub const BOLD: &str = "\x1b[1m";
/// SGR red foreground, used as the title accent.
pub const RED: &str = "\x1b[31m";

/// Wraps text in terminal style codes.
pub trait Styler: Send + Sync {
    /// Render `text` in bold.
    fn bold(&self, text: &str) -> String;

    /// Render `text` in the accent colour.
    fn accent(&self, text: &str) -> String;
}

/// ANSI escape styling.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn bold(&self, text: &str) -> String {
        format!("{BOLD}{text}{RESET}")
    }

    fn accent(&self, text: &str) -> String {
        format!("{RED}{text}{RESET}")
    }
}

/// Identity styling for plain mode: no escape codes at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn accent(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Pick the styler matching the `plain_text` flag.
pub fn styler_for(plain_text: bool) -> &'static dyn Styler {
    if plain_text {
        &PlainStyler
    } else {
        &AnsiStyler
    }
}

/// Remove SGR escape sequences (`ESC [ ... m`) from `text`.
///
/// Used to measure visible width and in tests to compare styled output.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
