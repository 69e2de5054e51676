use std::io::{self, BufRead, IsTerminal, Write};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};
use shell_words::split;

use crate::config::ConfigManager;
use crate::core::services::{
    MonthlyBreakdown, ServiceError, TransactionDraft, TransactionService,
};
use crate::core::{load_dashboard, load_resume, Clock, DashboardSnapshot, SummaryState, SystemClock};
use crate::currency::Formatter;
use crate::domain::{Category, Displayable, ViewedPeriod};
use crate::storage::{JsonFileStore, TransactionStore};
use crate::utils::build_info;

use super::commands::{Command, COMMANDS};
use super::output::Output;
use super::{CliError, CliMode, LoopControl};

/// Forces script mode even when stdin is a terminal.
pub const SCRIPT_ENV: &str = "FINANCE_CORE_CLI_SCRIPT";

/// Runs the shell against the configured data directory.
///
/// With arguments, the arguments form a single command. Otherwise a terminal
/// gets an interactive prompt and piped input is read as a script.
pub fn run_cli() -> Result<(), CliError> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let store = JsonFileStore::new(config.store_dir(manager.base_dir()))?;
    let mut context = ShellContext::new(Box::new(store), config.formatter(), Box::new(SystemClock));

    let use_color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let mut output = Output::new(io::stdout(), use_color);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return context.execute(&args, &mut output).map(|_| ());
    }

    let mode = CliMode::detect(std::env::var_os(SCRIPT_ENV).is_some(), io::stdin().is_terminal());
    tracing::debug!(?mode, "starting shell");
    match mode {
        CliMode::Interactive => run_interactive(&mut context, &mut output),
        CliMode::Script => context.run_script(io::stdin().lock(), &mut output),
    }
}

fn run_interactive<W: Write>(
    context: &mut ShellContext,
    output: &mut Output<W>,
) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper));
    output.info("Type `help` to see available commands.")?;

    loop {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if context.handle_line(line, output)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                output.info("Exiting shell.")?;
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// State shared by every command of a shell session.
pub struct ShellContext {
    store: Box<dyn TransactionStore>,
    formatter: Formatter,
    clock: Box<dyn Clock>,
    period: ViewedPeriod,
    dashboard: SummaryState<DashboardSnapshot>,
    resume: SummaryState<MonthlyBreakdown>,
}

impl ShellContext {
    pub fn new(store: Box<dyn TransactionStore>, formatter: Formatter, clock: Box<dyn Clock>) -> Self {
        let period = ViewedPeriod::containing(clock.today());
        Self {
            store,
            formatter,
            clock,
            period,
            dashboard: SummaryState::new(),
            resume: SummaryState::new(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("finance [{}]> ", self.formatter.format_period(self.period))
    }

    /// Executes commands line by line until input ends or `exit` is read.
    pub fn run_script<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut Output<W>,
    ) -> Result<(), CliError> {
        for line in input.lines() {
            if self.handle_line(&line?, output)? == LoopControl::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Runs one input line; command errors are reported and only I/O errors escape.
    pub fn handle_line<W: Write>(
        &mut self,
        line: &str,
        output: &mut Output<W>,
    ) -> Result<LoopControl, CliError> {
        let tokens = match split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output.warning(format!("could not parse `{}`: {err}", line.trim()))?;
                return Ok(LoopControl::Continue);
            }
        };
        match self.execute(&tokens, output) {
            Err(CliError::Io(err)) => Err(CliError::Io(err)),
            Err(err) => {
                output.error(err.to_string())?;
                Ok(LoopControl::Continue)
            }
            control => control,
        }
    }

    pub fn execute<W: Write>(
        &mut self,
        tokens: &[String],
        output: &mut Output<W>,
    ) -> Result<LoopControl, CliError> {
        let Some(command) = Command::parse(tokens)? else {
            return Ok(LoopControl::Continue);
        };
        match command {
            Command::Dashboard => {
                let snapshot = self.refresh_dashboard()?;
                output.dashboard(&snapshot)?;
            }
            Command::List => {
                let snapshot = self.refresh_dashboard()?;
                output.transactions(&snapshot)?;
            }
            Command::Resume => {
                let breakdown = self.refresh_resume()?;
                output.breakdown(&breakdown)?;
            }
            Command::Month(period) => {
                self.period = period;
                output.info(format!("Selected {}", self.formatter.format_period(period)))?;
            }
            Command::Step(step) => {
                self.period = self.period.step(step);
                output.info(format!("Selected {}", self.formatter.format_period(self.period)))?;
            }
            Command::Add {
                name,
                amount,
                kind,
                category,
            } => {
                let draft = TransactionDraft::new(name, amount, kind, category);
                let record = TransactionService::register(self.store.as_ref(), draft, self.clock.as_ref())?;
                output.info(format!(
                    "Registered {} for {}",
                    record.display_label(),
                    self.formatter
                        .format_amount(record.parsed_amount().map_err(ServiceError::from)?)
                ))?;
            }
            Command::Categories => output.categories()?,
            Command::Version => output.line(build_info::current().summary())?,
            Command::Help => {
                output.section("Available commands")?;
                for (name, help) in COMMANDS {
                    output.line(format!("{name:<11} {help}"))?;
                }
            }
            Command::Exit => return Ok(LoopControl::Exit),
        }
        Ok(LoopControl::Continue)
    }

    fn refresh_dashboard(&self) -> Result<DashboardSnapshot, CliError> {
        let store = self.store.as_ref();
        self.dashboard
            .refresh_with(|| load_dashboard(store, &self.formatter))?;
        self.dashboard
            .current()
            .ok_or_else(|| CliError::Input("dashboard refresh was superseded".into()))
    }

    fn refresh_resume(&self) -> Result<MonthlyBreakdown, CliError> {
        let store = self.store.as_ref();
        self.resume
            .refresh_with(|| load_resume(store, self.period, &self.formatter))?;
        self.resume
            .current()
            .ok_or_else(|| CliError::Input("resume refresh was superseded".into()))
    }
}

/// Tab completion for command names and the fixed arguments of `add`.
struct CommandHelper;

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = complete_word(&line[..pos]);
        let candidates = words
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

/// Start of the word under the cursor and the candidates that extend it.
fn complete_word(prefix: &str) -> (usize, Vec<&'static str>) {
    let start = prefix
        .rfind(|c: char| c.is_ascii_whitespace())
        .map(|idx| idx + 1)
        .unwrap_or(0);
    let needle = prefix[start..].to_ascii_lowercase();
    let preceding = split(&prefix[..start]).unwrap_or_default();

    let pool: Vec<&'static str> = match preceding.as_slice() {
        [] => COMMANDS.iter().map(|(name, _)| *name).collect(),
        [command, _, _] if command.eq_ignore_ascii_case("add") => vec!["income", "expense"],
        [command, _, _, _] if command.eq_ignore_ascii_case("add") => Category::keys().collect(),
        _ => Vec::new(),
    };
    let words = pool
        .into_iter()
        .filter(|word| word.starts_with(&needle))
        .collect();
    (start, words)
}
