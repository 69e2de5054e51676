use strsim::levenshtein;

use crate::domain::{Category, PeriodStep, TransactionType, ViewedPeriod};

use super::CliError;

/// Command names with their one-line help.
pub const COMMANDS: &[(&str, &str)] = &[
    ("dashboard", "Show income, expense and total highlights"),
    ("list", "List every transaction"),
    ("resume", "Show the selected month's expenses by category"),
    ("month", "Select the month for `resume` (YYYY-MM)"),
    ("next", "Move the selected month forward"),
    ("prev", "Move the selected month back"),
    ("add", "Register: add <name> <amount> <income|expense> <category>"),
    ("categories", "List the category catalog"),
    ("version", "Show build information"),
    ("help", "Show this overview"),
    ("exit", "Leave the shell"),
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dashboard,
    List,
    Resume,
    Month(ViewedPeriod),
    Step(PeriodStep),
    Add {
        name: String,
        amount: String,
        kind: TransactionType,
        category: String,
    },
    Categories,
    Version,
    Help,
    Exit,
}

impl Command {
    /// Parses already-split tokens; `Ok(None)` means the line was blank.
    pub fn parse(tokens: &[String]) -> Result<Option<Command>, CliError> {
        let Some((raw, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let command = match raw.to_ascii_lowercase().as_str() {
            "dashboard" => Command::Dashboard,
            "list" => Command::List,
            "resume" => Command::Resume,
            "month" => {
                let value = args
                    .first()
                    .ok_or_else(|| CliError::Input("usage: month YYYY-MM".into()))?;
                Command::Month(ViewedPeriod::parse(value)?)
            }
            "next" => Command::Step(PeriodStep::Next),
            "prev" => Command::Step(PeriodStep::Prev),
            "add" => Self::parse_add(args)?,
            "categories" => Command::Categories,
            "version" => Command::Version,
            "help" | "?" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => {
                let hint = suggest(other, COMMANDS.iter().map(|(name, _)| *name))
                    .map(|best| format!(" Did you mean `{best}`?"))
                    .unwrap_or_default();
                return Err(CliError::Input(format!(
                    "Unknown command `{other}`.{hint} Type `help` to see available commands."
                )));
            }
        };
        Ok(Some(command))
    }

    fn parse_add(args: &[String]) -> Result<Command, CliError> {
        let [name, amount, kind, category] = args else {
            return Err(CliError::Input(
                "usage: add <name> <amount> <income|expense> <category>".into(),
            ));
        };
        let kind = TransactionType::parse(kind).ok_or_else(|| {
            CliError::Input(format!("`{kind}` is not a type; use income or expense"))
        })?;
        if Category::from_key(category).is_none() {
            let hint = suggest(category, Category::keys())
                .map(|best| format!(" Did you mean `{best}`?"))
                .unwrap_or_default();
            return Err(CliError::Input(format!("Unknown category `{category}`.{hint}")));
        }
        Ok(Command::Add {
            name: name.clone(),
            amount: amount.clone(),
            kind,
            category: category.clone(),
        })
    }
}

/// Closest candidate within a small edit distance.
pub fn suggest<'a>(input: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .map(|candidate| (levenshtein(candidate, input), candidate))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}
