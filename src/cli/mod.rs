//! Terminal front-end: an interactive shell, or a line-per-command script
//! reader when `VACATION_BUDGET_CLI_SCRIPT` is set.

pub mod context;
pub mod output;
pub mod render;
mod shell;

pub use context::{CliError, CliMode, CommandError, LoopControl, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
