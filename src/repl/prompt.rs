//! Custom prompt implementation for groovysh

use std::borrow::Cow;

use nu_ansi_term::Color;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

use super::session::SessionState;

/// Prompt showing how many lines the pending statement has, `groovy:000> `
pub struct GroovyPrompt {
    session: SessionState,
    color: bool,
}

impl GroovyPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `session` - Session whose buffer is counted
    /// * `color` - Paint the prompt with ANSI colors
    pub fn new(session: SessionState, color: bool) -> Self {
        Self { session, color }
    }
}

impl Prompt for GroovyPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let count = format!("{:03}", self.session.buffer_len());
        if self.color {
            format!(
                "{}:{}> ",
                Color::Green.bold().paint("groovy"),
                Color::DarkGray.paint(count)
            )
            .into()
        } else {
            format!("groovy:{}> ", count).into()
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
