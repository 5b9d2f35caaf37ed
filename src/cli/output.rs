//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print aligned key/value line (cyan key)
pub fn field(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    let key = format!("{label}:");
    println!("{} {}", format!("{key:<12}").cyan(), msg);
}

/// Print plain output (no color, for data meant to be piped)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print one tree line: connector glyphs, identifier, preview
pub fn tree_entry(marker: &str, id: &str, preview: &str) {
    if preview.is_empty() {
        println!("{}{}", marker.dimmed(), id.bold());
    } else {
        println!("{}{} {}", marker.dimmed(), id.bold(), preview);
    }
}
