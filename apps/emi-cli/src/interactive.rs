//! Line-oriented form session.

use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use emi_calculator_sdk::EmiCalculatorClient;
use emi_form::{CurrencyFormatter, FormController};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

pub const HELP: &str = "\
Commands:
  amount <n>   set the loan amount (no value clears it)
  rate <n>     set the yearly interest rate in percent
  term <n>     set the loan term in years
  submit       calculate the EMI
  reset        clear the form
  show         print the form
  help         print this help
  quit         leave";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Amount,
    Rate,
    Term,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Set(Field, Option<f64>),
    Submit,
    Reset,
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
///
/// # Errors
/// Returns a message for unknown commands and unparsable numbers.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("Too many arguments for '{word}'"));
    }

    let field = match word.to_ascii_lowercase().as_str() {
        "amount" => Field::Amount,
        "rate" => Field::Rate,
        "term" => Field::Term,
        "submit" => return Ok(Some(Command::Submit)),
        "reset" => return Ok(Some(Command::Reset)),
        "show" => return Ok(Some(Command::Show)),
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        other => return Err(format!("Unknown command '{other}', type 'help'")),
    };

    let value = arg
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|_| format!("'{raw}' is not a number"))
        })
        .transpose()?;
    Ok(Some(Command::Set(field, value)))
}

/// Run the session until `quit` or end of input.
///
/// # Errors
/// Returns an error if stdin or stdout fail.
pub async fn run<C>(client: Arc<C>, formatter: &CurrencyFormatter) -> Result<()>
where
    C: EmiCalculatorClient + ?Sized,
{
    let mut controller = FormController::new(client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("EMI calculator. Type 'help' for commands.");
    loop {
        print!("emi> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Set(Field::Amount, value) => controller.set_amount(value),
            Command::Set(Field::Rate, value) => controller.set_rate(value),
            Command::Set(Field::Term, value) => controller.set_term(value),
            Command::Submit => {
                let state = controller.submit().await;
                println!("{}", render::outcome(state, formatter));
            }
            Command::Reset => {
                controller.reset();
                println!("Form cleared.");
            }
            Command::Show => println!("{}", render::form(controller.state(), formatter)),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
    Ok(())
}
