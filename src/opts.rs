use argh::FromArgs;
use log::LevelFilter;

use crate::ops::Operation;

/// Q64.64 fixed-point logarithms, exponentials and powers.
#[derive(FromArgs)]
pub struct Opts {
    /// logging level
    #[argh(option, long = "log", default = "LevelFilter::Warn")]
    pub log_level: LevelFilter,

    #[argh(subcommand)]
    pub command: Command,
}

impl Opts {
    /// Parse options from `env::args`.
    pub fn parse() -> Opts {
        argh::from_env()
    }
}

#[derive(FromArgs)]
#[argh(subcommand)]
pub enum Command {
    Tables(TablesCommand),
    Eval(EvalCommand),
    Sweep(SweepCommand),
}

/// Print the lookup tables, derived at high precision, as a Rust module.
#[derive(FromArgs)]
#[argh(subcommand, name = "tables")]
pub struct TablesCommand {}

/// Evaluate a single operation.
#[derive(FromArgs)]
#[argh(subcommand, name = "eval")]
pub struct EvalCommand {
    /// operation name
    #[argh(positional)]
    pub op: Operation,

    /// operands
    #[argh(positional)]
    pub args: Vec<String>,

    /// read operands and print results as raw 256-bit integers
    #[argh(switch)]
    pub raw: bool,

    /// compare the result against the reference implementation
    #[argh(switch)]
    pub check: bool,
}

/// Compare an operation against the reference implementation over powers of
/// two and their predecessors.
#[derive(FromArgs)]
#[argh(subcommand, name = "sweep")]
pub struct SweepCommand {
    /// operation name
    #[argh(positional)]
    pub op: Operation,
}
