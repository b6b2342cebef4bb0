use std::error::Error;
use std::fmt;
use std::process::ExitCode;

use primitive_types::U256;

use q64_math::opts::{Command, EvalCommand, Opts, SweepCommand};
use q64_math::reference::eval::{operands, points_of_interest};
use q64_math::reference::generator::Tables;
use q64_math::reference::{self, relative_error, Evaluation};
use q64_math::{FixedPoint64, OperationError, ParseFixedPointError};

/// An error resulting from a command-line evaluation.
#[derive(Debug)]
enum EvalError {
    Operand(ParseFixedPointError),
    RawOperand(String),
    Operation(OperationError),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::Operand(err) => write!(f, "invalid operand: {err}"),
            EvalError::RawOperand(arg) => {
                write!(f, "invalid raw operand `{arg}`")
            }
            EvalError::Operation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EvalError {}

impl From<ParseFixedPointError> for EvalError {
    fn from(err: ParseFixedPointError) -> Self {
        EvalError::Operand(err)
    }
}

impl From<OperationError> for EvalError {
    fn from(err: OperationError) -> Self {
        EvalError::Operation(err)
    }
}

fn parse_operand(arg: &str, raw: bool) -> Result<FixedPoint64, EvalError> {
    if raw {
        U256::from_dec_str(arg)
            .map(FixedPoint64::from_raw)
            .map_err(|_| EvalError::RawOperand(arg.to_owned()))
    } else {
        Ok(arg.parse()?)
    }
}

fn format_result(value: FixedPoint64, raw: bool) -> String {
    if raw {
        value.raw().to_string()
    } else {
        value.to_string()
    }
}

fn eval(cmd: &EvalCommand) -> Result<(), EvalError> {
    let args = cmd
        .args
        .iter()
        .map(|arg| parse_operand(arg, cmd.raw))
        .collect::<Result<Vec<_>, _>>()?;

    let result = cmd.op.evaluate(&args);

    match result {
        Ok(value) => println!("{}", format_result(value, cmd.raw)),
        Err(err @ OperationError::Arity { .. }) => return Err(err.into()),
        Err(OperationError::Math(_)) => {}
    }

    if cmd.check {
        match reference::evaluate(cmd.op, &args)? {
            Some(target) => {
                println!("reference: {}", format_result(target, cmd.raw));

                if let Ok(value) = result {
                    let error = relative_error(value, target);
                    println!("relative error: {error:.4e}");
                }
            }
            None => println!("reference: fails"),
        }
    }

    result?;

    Ok(())
}

fn sweep(cmd: &SweepCommand) -> ExitCode {
    let points = points_of_interest();

    log::info!(
        "evaluating `{}` at {} points per operand",
        cmd.op,
        points.len()
    );

    let evaluation = match Evaluation::run(cmd.op, operands(cmd.op, &points)) {
        Ok(evaluation) => evaluation,
        Err(err) => {
            eprintln!("error: {err}");

            return ExitCode::FAILURE;
        }
    };

    println!("{evaluation}");

    if evaluation.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level)
        .init();

    match &opts.command {
        Command::Tables(_) => {
            print!("{}", Tables::generate().render());

            ExitCode::SUCCESS
        }
        Command::Eval(cmd) => match eval(cmd) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");

                ExitCode::FAILURE
            }
        },
        Command::Sweep(cmd) => sweep(cmd),
    }
}
