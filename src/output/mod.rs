// Terminal output helpers for the CLI

use is_terminal::IsTerminal;

// Colors for terminal output (when supported)
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[1;33m";
pub const CYAN: &str = "\x1b[0;36m";
pub const BOLD: &str = "\x1b[1m";
pub const NC: &str = "\x1b[0m"; // No Color

/// Check if stdout is a terminal (for color output)
#[inline]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Print info message
pub fn info(msg: &str) {
    let color = if is_terminal() { GREEN } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}[INFO]{} {}", color, reset, msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    let color = if is_terminal() { YELLOW } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[WARN]{} {}", color, reset, msg);
}

/// Print error message
pub fn error(msg: &str) {
    let color = if is_terminal() { RED } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[ERROR]{} {}", color, reset, msg);
}

/// Print section header
pub fn header(msg: &str) {
    let bold = if is_terminal() { BOLD } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}===>{} {}", bold, reset, msg);
}

/// Highlight an inline value in cyan
pub fn accent(msg: &str) -> String {
    if is_terminal() {
        format!("{}{}{}", CYAN, msg, NC)
    } else {
        msg.to_string()
    }
}

/// Exit code for any failed command; clap reports its own usage errors
pub const EXIT_ERROR: i32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_preserves_the_message() {
        assert!(accent("WhileStatement").contains("WhileStatement"));
    }

    #[test]
    fn color_codes_are_ansi_escapes() {
        for code in [RED, GREEN, YELLOW, CYAN, BOLD, NC] {
            assert!(code.starts_with('\x1b'));
        }
    }
}
