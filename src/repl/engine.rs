use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::{debug, info};

use crate::config::{CompletionConfig, HistoryConfig};
use crate::error::Result;
use crate::parser::{BuiltinCommands, CommandRegistry, ShellCommand, ShellCommandParser, ShowTarget};

use super::completer::GroovyCompleter;
use super::completion::BufferedLines;
use super::hinter::GroovyHinter;
use super::prompt::GroovyPrompt;
use super::session::SessionState;
use super::statement::{self, Completeness};

const COMPLETION_MENU: &str = "completion_menu";

/// What the loop should do after a line was processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// Nothing to report
    Nothing,
    /// The line continues an unfinished statement
    Buffered,
    /// A statement was finished and its declarations recorded
    Recorded(String),
    /// Text for the user
    Output(String),
    /// Leave the shell
    Exit,
}

/// REPL engine for interactive input
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    prompt: GroovyPrompt,

    /// State shared with the completer and the prompt
    session: SessionState,

    /// Completion settings, shown by `:show preferences`
    completion: CompletionConfig,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `session` - Session state shared with completion
    /// * `history_config` - History configuration
    /// * `completion` - Enabled completion sources
    /// * `color` - Use ANSI colors in the prompt and hints
    pub fn new(
        session: SessionState,
        history_config: &HistoryConfig,
        completion: CompletionConfig,
        color: bool,
    ) -> Result<Self> {
        let completer = Box::new(GroovyCompleter::from_config(&completion, session.clone()));
        let menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let history = if history_config.persist {
            debug!("Using history file {}", history_config.file_path.display());
            FileBackedHistory::with_file(history_config.max_size, history_config.file_path.clone())?
        } else {
            FileBackedHistory::new(history_config.max_size)?
        };

        let editor = Reedline::create()
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_hinter(Box::new(GroovyHinter::new()))
            .with_history(Box::new(history))
            .with_ansi_colors(color);

        Ok(Self {
            editor,
            prompt: GroovyPrompt::new(session.clone(), color),
            session,
            completion,
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, or None on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC => {
                // Ctrl-C abandons the statement being typed
                self.session.clear_buffer();
                Ok(Some(String::new()))
            }
            Signal::CtrlD => {
                self.running = false;
                Ok(None)
            }
            #[allow(unreachable_patterns)]
            other => {
                debug!(?other, "Ignoring editor signal");
                Ok(Some(String::new()))
            }
        }
    }

    /// Process one line of user input
    pub fn process_input(&mut self, input: &str) -> Result<ReplAction> {
        if self.session.buffer_len() == 0 && input.trim().is_empty() {
            return Ok(ReplAction::Nothing);
        }

        // Inside an unfinished statement only known commands are commands;
        // anything else starting with `:` is Groovy, e.g. a map key.
        if ShellCommandParser::is_shell_command(input)
            && (self.session.buffer_len() == 0 || is_known_command(input))
        {
            let command = ShellCommandParser::parse(input)?;
            return Ok(self.run_command(command));
        }

        let statement = self.session.statement_with(input);
        match statement::check(&statement) {
            Completeness::Incomplete => {
                self.session.push_line(input);
                Ok(ReplAction::Buffered)
            }
            Completeness::Complete => {
                self.session.record_statement(&statement);
                self.session.clear_buffer();
                Ok(ReplAction::Recorded(statement))
            }
        }
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    fn run_command(&mut self, command: ShellCommand) -> ReplAction {
        info!(?command, "Shell command");
        match command {
            ShellCommand::Help(topic) => {
                ReplAction::Output(BuiltinCommands::help_text(topic.as_deref()))
            }
            ShellCommand::Exit => {
                self.running = false;
                ReplAction::Exit
            }
            ShellCommand::Display => ReplAction::Output(self.display_buffer()),
            ShellCommand::Clear => {
                self.session.clear_buffer();
                ReplAction::Output("Buffer cleared".to_string())
            }
            ShellCommand::Show(target) => ReplAction::Output(self.show(target)),
            ShellCommand::Purge(target) => {
                self.session.purge(target);
                ReplAction::Output(format!("Purged {}", target_label(target)))
            }
            ShellCommand::Import(clause) => {
                self.session.add_import(&clause);
                ReplAction::Output(format!("Imported {}", clause))
            }
        }
    }

    fn display_buffer(&self) -> String {
        let lines = self.session.buffered_lines();
        if lines.is_empty() {
            return "Buffer is empty".to_string();
        }
        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| format!("{:03}> {}", idx, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn show(&self, target: ShowTarget) -> String {
        let mut sections = Vec::new();

        if matches!(target, ShowTarget::Variables | ShowTarget::All) {
            let variables = self
                .session
                .variables()
                .into_iter()
                .map(|(name, ty)| match ty {
                    Some(ty) => format!("  {} : {}", name, ty),
                    None => format!("  {}", name),
                })
                .collect();
            sections.push(section("Variables", variables));
        }
        if matches!(target, ShowTarget::Methods | ShowTarget::All) {
            let methods = self
                .session
                .methods()
                .into_iter()
                .map(|m| format!("  {}()", m))
                .collect();
            sections.push(section("Methods", methods));
        }
        if matches!(target, ShowTarget::Classes | ShowTarget::All) {
            let classes = self.session.classes().into_iter().map(|c| format!("  {}", c)).collect();
            sections.push(section("Classes", classes));
        }
        if matches!(target, ShowTarget::Imports | ShowTarget::All) {
            let imports = self
                .session
                .imports()
                .into_iter()
                .map(|i| format!("  import {}", i))
                .collect();
            sections.push(section("Imports", imports));
        }
        if matches!(target, ShowTarget::Preferences | ShowTarget::All) {
            let c = &self.completion;
            let prefs = [
                ("keywords", c.keywords),
                ("variables", c.variables),
                ("imports", c.imports),
                ("custom_classes", c.custom_classes),
                ("members", c.members),
                ("filenames", c.filenames),
                ("show_hidden_files", c.show_hidden_files),
            ]
            .iter()
            .map(|(name, on)| format!("  completion.{} = {}", name, on))
            .collect();
            sections.push(section("Preferences", prefs));
        }

        sections.join("\n")
    }
}

fn is_known_command(input: &str) -> bool {
    let word = input.split_whitespace().next().unwrap_or_default();
    BuiltinCommands::new()
        .commands()
        .iter()
        .any(|command| command.matches(word))
}

fn section(title: &str, lines: Vec<String>) -> String {
    if lines.is_empty() {
        format!("{}: none", title)
    } else {
        format!("{}:\n{}", title, lines.join("\n"))
    }
}

fn target_label(target: ShowTarget) -> &'static str {
    match target {
        ShowTarget::Variables => "variables",
        ShowTarget::Methods => "methods",
        ShowTarget::Classes => "classes",
        ShowTarget::Imports => "imports",
        ShowTarget::Preferences => "preferences",
        ShowTarget::All => "everything",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GroovyshError, ParseError};

    fn create_engine() -> ReplEngine {
        let history = HistoryConfig {
            persist: false,
            ..HistoryConfig::default()
        };
        ReplEngine::new(SessionState::new(), &history, CompletionConfig::default(), false)
            .unwrap()
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let mut engine = create_engine();
        assert_eq!(engine.process_input("   ").unwrap(), ReplAction::Nothing);
        assert_eq!(engine.session().buffer_len(), 0);
    }

    #[test]
    fn test_multi_line_statement() {
        let mut engine = create_engine();

        assert_eq!(engine.process_input("def square(x) {").unwrap(), ReplAction::Buffered);
        assert_eq!(engine.process_input("").unwrap(), ReplAction::Buffered);
        assert_eq!(engine.process_input("  x * x").unwrap(), ReplAction::Buffered);
        assert_eq!(engine.session().buffer_len(), 3);

        let action = engine.process_input("}").unwrap();
        assert_eq!(
            action,
            ReplAction::Recorded("def square(x) {\n\n  x * x\n}".to_string())
        );
        assert_eq!(engine.session().buffer_len(), 0);
        assert_eq!(engine.session().methods(), vec!["square"]);
    }

    #[test]
    fn test_colon_inside_statement_is_groovy() {
        let mut engine = create_engine();
        engine.process_input("def m = [").unwrap();
        assert_eq!(engine.process_input(":a").unwrap(), ReplAction::Buffered);
    }

    #[test]
    fn test_show_and_purge() {
        let mut engine = create_engine();
        engine.process_input("def name = 'x'").unwrap();
        engine.process_input(":import java.time.LocalDate").unwrap();

        let ReplAction::Output(shown) = engine.process_input(":show all").unwrap() else {
            panic!("expected output");
        };
        assert!(shown.contains("name : String"));
        assert!(shown.contains("import java.time.LocalDate"));
        assert!(shown.contains("Methods: none"));
        assert!(shown.contains("completion.members = true"));

        engine.process_input(":purge variables").unwrap();
        assert!(!engine.session().has_variable("name"));
        assert_eq!(engine.session().imports(), vec!["java.time.LocalDate"]);
    }

    #[test]
    fn test_display_and_clear() {
        let mut engine = create_engine();
        let ReplAction::Output(empty) = engine.process_input(":display").unwrap() else {
            panic!("expected output");
        };
        assert_eq!(empty, "Buffer is empty");

        engine.process_input("[1,").unwrap();
        engine.process_input("2,").unwrap();
        assert_eq!(
            engine.process_input(":display").unwrap(),
            ReplAction::Output("000> [1,\n001> 2,".to_string())
        );

        engine.process_input(":c").unwrap();
        assert_eq!(engine.session().buffer_len(), 0);
    }

    #[test]
    fn test_exit() {
        let mut engine = create_engine();
        assert!(engine.is_running());
        assert_eq!(engine.process_input(":q").unwrap(), ReplAction::Exit);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_unknown_command() {
        let mut engine = create_engine();
        let err = engine.process_input(":frobnicate").unwrap_err();
        assert!(matches!(
            err,
            GroovyshError::Parse(ParseError::UnknownCommand(_))
        ));
    }
}
