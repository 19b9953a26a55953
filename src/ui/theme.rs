//! Terminal styles
//!
//! Styles are picked once per process: colored when stdout is a terminal,
//! plain otherwise so that piped output carries no escape codes.

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    /// Headers, banners and section titles
    pub title: Style,
    pub ok: Style,
    pub fail: Style,
    pub caution: Style,
    /// Labels in front of a value
    pub label: Style,
    /// Ids and placeholders
    pub faint: Style,
    pub path: Style,
    pub key: Style,
    /// Result of a permission check that passed
    pub granted: Style,
    /// Result of a permission check that failed
    pub denied: Style,
}

impl Theme {
    pub fn for_terminal(is_term: bool) -> Self {
        if is_term { Self::colored() } else { Self::plain() }
    }

    pub fn colored() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            ok: Style::new().green().bold(),
            fail: Style::new().red().bold(),
            caution: Style::new().yellow().bold(),
            label: Style::new().white().dimmed(),
            faint: Style::new().bright_black(),
            path: Style::new().blue().bold(),
            key: Style::new().magenta(),
            granted: Style::new().bright_green().bold(),
            denied: Style::new().bright_red().bold().underline(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new;
        Self {
            title: none(),
            ok: none(),
            fail: none(),
            caution: none(),
            label: none(),
            faint: none(),
            path: none(),
            key: none(),
            granted: none(),
            denied: none(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(|| Theme::for_terminal(console::Term::stdout().is_term()))
}
