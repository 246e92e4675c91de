use chrono::{Local, Utc};
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::{ExpenseTracker, Mutation, SummaryOptions},
    currency::{CurrencyCode, SUPPORTED_CURRENCIES},
    errors::BudgetError,
    expense::{parse_timestamp_in, Category, ExpenseDraft, ExpenseId, FieldErrors},
    storage::{FileStore, PersistenceAdapter},
};

use super::{output, render};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Budget(#[from] BudgetError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub const COMMANDS: [(&str, &str); 10] = [
    ("add", "add <description> <amount> <category> [date]"),
    ("edit", "edit <id> <description> <amount> <category> [date]"),
    ("delete", "delete <id>"),
    ("list", "list [search]"),
    ("summary", "summary"),
    ("currency", "currency [USD|EUR|GBP|JPY]"),
    ("categories", "categories"),
    ("config", "config [week_start|recent_limit|default_currency <value>]"),
    ("help", "help"),
    ("exit", "exit"),
];

pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    tracker: ExpenseTracker,
    config: Config,
    config_manager: ConfigManager,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let store = FileStore::new_default()?;
        let persistence =
            PersistenceAdapter::new(store).with_default_currency(config.default_currency.clone());
        Ok(Self {
            mode,
            running: true,
            tracker: ExpenseTracker::open(persistence),
            config,
            config_manager,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    }

    pub fn prompt(&self) -> String {
        format!("budget [{}]> ", self.tracker.currency())
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "add" => self.cmd_add(args),
            "edit" => self.cmd_edit(args),
            "delete" | "remove" => self.cmd_delete(args),
            "list" => self.cmd_list(args),
            "summary" => self.cmd_summary(),
            "currency" => self.cmd_currency(args),
            "categories" => {
                output::section("Categories");
                println!("{}", render::category_legend());
                Ok(LoopControl::Continue)
            }
            "config" => self.cmd_config(args),
            "help" => {
                print_help();
                Ok(LoopControl::Continue)
            }
            "exit" | "quit" => Ok(LoopControl::Exit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help` for usage details.");
            }
            other => output::error(other),
        }
    }

    fn cmd_add(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let [description, amount, category, rest @ ..] = args else {
            return Err(usage("add"));
        };
        let date = match rest {
            [] => Some(Utc::now()),
            [raw] => read_date(raw),
            _ => return Err(usage("add")),
        };
        let category = resolve_category(category)?;
        let draft = ExpenseDraft::new(*description, *amount, category, date);
        match self.tracker.add(draft) {
            Ok(id) => output::success(format!("Expense added (id {id}).")),
            Err(errors) => report_field_errors(&errors),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_edit(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let [id, description, amount, category, rest @ ..] = args else {
            return Err(usage("edit"));
        };
        let id = ExpenseId::from(*id);
        let date = match rest {
            [] => Some(
                self.tracker
                    .get(&id)
                    .map(|expense| expense.date)
                    .unwrap_or_else(Utc::now),
            ),
            [raw] => read_date(raw),
            _ => return Err(usage("edit")),
        };
        let category = resolve_category(category)?;
        let draft = ExpenseDraft::new(*description, *amount, category, date);
        match self.tracker.update(&id, draft) {
            Ok(Mutation::Applied) => output::success("Expense updated."),
            Ok(Mutation::NotFound) => {
                output::warning(format!("No expense with id `{id}`; nothing changed."))
            }
            Err(errors) => report_field_errors(&errors),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_delete(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let [id] = args else {
            return Err(usage("delete"));
        };
        match self.tracker.remove(&ExpenseId::from(*id)) {
            Mutation::Applied => output::success("Expense deleted."),
            Mutation::NotFound => output::warning(format!("No expense with id `{id}`.")),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_list(&self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let term = args.join(" ");
        let rows = self.tracker.list(Some(term.as_str()));
        output::section("Expenses");
        println!(
            "{}",
            render::expense_table(
                &rows,
                self.tracker.is_empty(),
                self.tracker.currency(),
                &Local
            )
        );
        Ok(LoopControl::Continue)
    }

    fn cmd_summary(&self) -> Result<LoopControl, CommandError> {
        let now = Local::now();
        let summary = self
            .tracker
            .summary(&now, SummaryOptions::from(&self.config));
        output::section("Summary");
        println!(
            "{}",
            render::summary_report(&summary, self.tracker.currency(), &Local)
        );
        Ok(LoopControl::Continue)
    }

    fn cmd_currency(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        match args {
            [] => {
                let currency = self.tracker.currency();
                output::info(format!("Currency: {} ({})", currency, currency.symbol()));
            }
            [code] => {
                let currency = CurrencyCode::new(code.to_uppercase());
                if !currency.is_supported() {
                    return Err(CommandError::InvalidArguments(format!(
                        "unsupported currency `{code}`; choose one of {}",
                        SUPPORTED_CURRENCIES.join(", ")
                    )));
                }
                self.tracker.set_currency(currency);
                let currency = self.tracker.currency();
                output::success(format!("Currency set to {} ({}).", currency, currency.symbol()));
            }
            _ => return Err(usage("currency")),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_config(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        match args {
            [] => {
                output::section("Configuration");
                println!("week_start       = {}", self.config.week_start);
                println!("recent_limit     = {}", self.config.recent_limit);
                println!("default_currency = {}", self.config.default_currency);
                println!("file             = {}", self.config_manager.path().display());
            }
            [key, value] => {
                let mut updated = self.config.clone();
                updated.set(key, value)?;
                self.config_manager.save(&updated)?;
                self.config = updated;
                output::success(format!("Setting `{key}` saved."));
            }
            _ => return Err(usage("config")),
        }
        Ok(LoopControl::Continue)
    }
}

fn usage(command: &str) -> CommandError {
    let line = COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, usage)| *usage)
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("usage: {line}"))
}

/// Maps typed input onto a built-in label. Blank input passes through so the
/// field rule can flag it.
fn resolve_category(raw: &str) -> Result<String, CommandError> {
    if raw.trim().is_empty() {
        return Ok(String::new());
    }
    Category::parse_loose(raw)
        .map(|category| category.label().to_string())
        .ok_or_else(|| {
            let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
            CommandError::InvalidArguments(format!(
                "unknown category `{raw}`; choose one of {}",
                labels.join(", ")
            ))
        })
}

/// Dates typed at the prompt are wall-clock values in the local zone, the same
/// zone `list` and `summary` display them in.
fn read_date(raw: &str) -> Option<chrono::DateTime<Utc>> {
    let parsed = parse_timestamp_in(raw, &Local);
    if parsed.is_none() {
        output::warning(format!("could not read date `{raw}`; expected YYYY-MM-DD"));
    }
    parsed
}

fn report_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.messages() {
        output::error(format!("{field}: {message}"));
    }
}

fn print_help() {
    output::section("Commands");
    for (_, usage) in COMMANDS {
        println!("  {usage}");
    }
}
