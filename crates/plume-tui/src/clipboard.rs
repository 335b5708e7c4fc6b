//! Clipboard export via the OSC 52 escape sequence.
//!
//! Works in iTerm2, kitty, WezTerm, Ghostty, and most modern
//! terminals. Copying is best-effort: if the terminal ignores the
//! sequence there is nothing this layer can detect, so failure is
//! limited to a write error on stdout.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub fn copy(text: &str) -> std::io::Result<()> {
    let encoded = STANDARD.encode(text.as_bytes());
    // Write directly to stdout, bypassing the terminal backend buffer.
    let mut stdout = std::io::stdout();
    stdout.write_all(format!("\x1b]52;c;{encoded}\x07").as_bytes())?;
    stdout.flush()
}
