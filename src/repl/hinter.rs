//! Hinter for reedline - suggests the rest of a previous entry

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History, SearchQuery};

/// Shows the most recent history entry that extends the typed line
pub struct GroovyHinter {
    style: Style,
    current_hint: String,
}

impl GroovyHinter {
    pub fn new() -> Self {
        Self {
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }

    /// Text after `line` in the newest history entry starting with it
    fn lookup(line: &str, history: &dyn History) -> Option<String> {
        let found = history
            .search(SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()?
            .into_iter()
            .next()?;

        found
            .command_line
            .strip_prefix(line)
            .filter(|rest| !rest.is_empty())
            .map(String::from)
    }
}

impl Default for GroovyHinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Hinter for GroovyHinter {
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        // Hints only make sense at the end of a non-blank line
        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let Some(hint) = Self::lookup(line, history) else {
            return String::new();
        };
        self.current_hint = hint;

        if use_ansi_coloring {
            self.style.paint(&self.current_hint).to_string()
        } else {
            self.current_hint.clone()
        }
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }

    /// The hint up to and including the next word
    fn next_hint_token(&self) -> String {
        let trimmed = self.current_hint.trim_start();
        let leading = self.current_hint.len() - trimmed.len();
        let word_end = trimmed
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(trimmed.len());
        let end = if word_end == 0 {
            trimmed.chars().next().map_or(0, char::len_utf8)
        } else {
            word_end
        };
        self.current_hint[..leading + end].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::{FileBackedHistory, HistoryItem};

    fn history_with(lines: &[&str]) -> FileBackedHistory {
        let mut history = FileBackedHistory::new(100).unwrap();
        for line in lines {
            history
                .save(HistoryItem::from_command_line(*line))
                .unwrap();
        }
        history
    }

    #[test]
    fn test_hint_from_latest_entry() {
        let history = history_with(&["println 'one'", "println 'two'"]);
        let mut hinter = GroovyHinter::new();

        let hint = hinter.handle("println", 7, &history, false, "/tmp");
        assert_eq!(hint, " 'two'");
        assert_eq!(hinter.complete_hint(), " 'two'");
    }

    #[test]
    fn test_no_hint_for_blank_line_or_mid_cursor() {
        let history = history_with(&["def x = 1"]);
        let mut hinter = GroovyHinter::new();

        assert_eq!(hinter.handle("", 0, &history, false, "/tmp"), "");
        assert_eq!(hinter.handle("def", 1, &history, false, "/tmp"), "");
        assert_eq!(hinter.complete_hint(), "");
    }

    #[test]
    fn test_no_hint_for_exact_match() {
        let history = history_with(&["x = 1"]);
        let mut hinter = GroovyHinter::new();
        assert_eq!(hinter.handle("x = 1", 5, &history, false, "/tmp"), "");
    }

    #[test]
    fn test_colored_hint() {
        let history = history_with(&["names.each { println it }"]);
        let mut hinter = GroovyHinter::new();
        let hint = hinter.handle("names.", 6, &history, true, "/tmp");
        assert!(hint.contains("each"));
        assert!(hint.contains('\u{1b}'));
    }

    #[test]
    fn test_next_hint_token() {
        let history = history_with(&["names.each { println it }"]);
        let mut hinter = GroovyHinter::new();
        hinter.handle("names.", 6, &history, false, "/tmp");
        assert_eq!(hinter.next_hint_token(), "each");

        hinter.handle("names.each", 10, &history, false, "/tmp");
        assert_eq!(hinter.next_hint_token(), " {");
    }
}
