//! # Console Shell
//!
//! Numbered-menu loop that reads one line at a time, dispatches to the
//! [`AccountService`] and prints the outcome. Input and output are generic so
//! the shell runs against stdin/stdout in the binary and against in-memory
//! buffers in tests.
//!
//! Any failure inside a menu action is printed as a single `[ERROR]` line and
//! the menu is shown again. Only choice 6 (or end of input) leaves the loop.

pub mod menu;
pub mod render;

use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::backend::domain::{validator, AccountService, BankError};
use menu::{MenuChoice, CHOICE_PROMPT, MENU_HEADER};

pub const WELCOME_BANNER: &str = "  WELCOME TO GLOBAL BANK CONSOLE  ";
pub const FAREWELL: &str = "Thank you for using Global Bank!";

#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error("{0}")]
    InvalidInput(String),
    #[error("input closed")]
    EndOfInput,
    #[error(transparent)]
    Io(#[from] io::Error),
}

enum Flow {
    Continue,
    Exit,
}

/// Everything a menu action needs: the service plus the input/output port
pub struct ShellContext<R, W> {
    service: AccountService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ShellContext<R, W> {
    pub fn new(service: AccountService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Give back the output port, e.g. to inspect what was written
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input ends.
    /// Only I/O failures on the console itself are returned.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", WELCOME_BANNER)?;

        loop {
            self.print_menu()?;
            let raw = match self.read_line()? {
                Some(line) => line,
                None => {
                    debug!("Input closed at main menu");
                    break;
                }
            };

            let choice = match MenuChoice::parse(&raw) {
                Ok(choice) => choice,
                Err(err) => {
                    self.print_line(&render::error_message(&err.to_string()))?;
                    continue;
                }
            };

            debug!("Menu choice {}", choice.number());
            match self.dispatch(choice).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(CommandError::Bank(err)) => {
                    warn!("{} failed: {}", choice.label(), err);
                    self.print_line(&render::bank_error(&err))?;
                }
                Err(CommandError::InvalidInput(message)) => {
                    self.print_line(&render::error_message(&message))?;
                }
                Err(CommandError::EndOfInput) => {
                    debug!("Input closed during {}", choice.label());
                    break;
                }
                Err(CommandError::Io(err)) => return Err(err),
            }
        }

        self.output.flush()
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow, CommandError> {
        match choice {
            MenuChoice::Register => {
                // each field is checked before the next prompt
                let name = self.prompt("Enter full name: ")?;
                validator::validate_name(&name).map_err(BankError::from)?;
                let contact = self.prompt("Enter contact (10 digits): ")?;
                validator::validate_contact(&contact).map_err(BankError::from)?;
                let address = self.prompt("Enter address: ")?;
                validator::validate_address(&address).map_err(BankError::from)?;

                let account_number = self.service.register(&name, &contact, &address).await?;
                self.print_line(&render::registered(account_number))?;
            }
            MenuChoice::Deposit => {
                let account_number = self.prompt_account_number()?;
                let amount = self.prompt_amount("Enter Amount to Deposit: ")?;
                let new_balance = self.service.deposit(account_number, amount).await?;
                self.print_line(&render::deposited(account_number, amount, new_balance))?;
            }
            MenuChoice::Withdraw => {
                let account_number = self.prompt_account_number()?;
                let amount = self.prompt_amount("Enter Amount to Withdraw: ")?;
                let new_balance = self.service.withdraw(account_number, amount).await?;
                self.print_line(&render::withdrawn(new_balance))?;
            }
            MenuChoice::Balance => {
                let account_number = self.prompt_account_number()?;
                let balance = self.service.get_balance(account_number).await?;
                self.print_line(&render::balance(account_number, balance))?;
            }
            MenuChoice::MiniStatement => {
                let account_number = self.prompt_account_number()?;
                let entries = self.service.get_mini_statement(account_number).await?;
                for line in render::mini_statement(&entries) {
                    self.print_line(&line)?;
                }
            }
            MenuChoice::Exit => {
                self.print_line(FAREWELL)?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", MENU_HEADER)?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}", choice)?;
        }
        write!(self.output, "{}", CHOICE_PROMPT)?;
        self.output.flush()
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Next input line without surrounding whitespace, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<String, CommandError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()?.ok_or(CommandError::EndOfInput)
    }

    fn prompt_account_number(&mut self) -> Result<i64, CommandError> {
        let raw = self.prompt("Enter Account Number: ")?;
        raw.parse::<i64>()
            .map_err(|_| CommandError::InvalidInput(format!("Invalid account number: '{}'", raw)))
    }

    fn prompt_amount(&mut self, text: &str) -> Result<f64, CommandError> {
        let raw = self.prompt(text)?;
        match raw.parse::<f64>() {
            Ok(amount) if amount.is_finite() => Ok(amount),
            _ => Err(CommandError::InvalidInput(format!("Invalid amount: '{}'", raw))),
        }
    }
}
