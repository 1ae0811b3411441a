//! # Line Shell
//!
//! Parses one line of shopper input into a [`ShellCommand`] and drives the
//! read-dispatch-print loop.
//!
//! ## Grammar
//! ```text
//! products [filter]              add <id>            remove <line>
//! cart                           clear               help            quit
//! checkout name | email | address | card
//! sell model | brand | condition | price | email
//! ```
//!
//! Command words are case-insensitive. Form fields are separated by `|`
//! and trimmed, so names and addresses may contain spaces.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use forphone_storage::KeyValueStore;
use thiserror::Error;
use tracing::debug;

use crate::commands::checkout::CheckoutForm;
use crate::commands::listing::SellListingForm;
use crate::Storefront;

/// A parsed shopper command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Products { filter: String },
    Add { product_id: u32 },
    Remove { index: usize },
    Cart,
    Clear,
    Checkout(CheckoutForm),
    Sell(SellListingForm),
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("Unknown command '{0}'. Type 'help' for the list.")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{value}' is not a valid {what}")]
    InvalidNumber { what: &'static str, value: String },

    #[error("{command} expects {expected} fields separated by '|', got {found}")]
    FieldCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Parses a line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "products" => ShellCommand::Products {
            filter: rest.to_string(),
        },
        "add" => ShellCommand::Add {
            product_id: number(rest, "product id", "add <product-id>")?,
        },
        "remove" => ShellCommand::Remove {
            index: number(rest, "cart line", "remove <line>")?,
        },
        "cart" => ShellCommand::Cart,
        "clear" => ShellCommand::Clear,
        "checkout" => {
            let [name, email, address, card_number] = fields::<4>("checkout", rest)?;
            ShellCommand::Checkout(CheckoutForm {
                name,
                email,
                address,
                card_number,
            })
        }
        "sell" => {
            let [model, brand, condition, asking_price, contact_email] = fields::<5>("sell", rest)?;
            ShellCommand::Sell(SellListingForm {
                model,
                brand,
                condition,
                asking_price,
                contact_email,
            })
        }
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn number<T: std::str::FromStr>(
    arg: &str,
    what: &'static str,
    usage: &'static str,
) -> Result<T, ShellError> {
    if arg.is_empty() {
        return Err(ShellError::Usage(usage));
    }
    arg.parse().map_err(|_| ShellError::InvalidNumber {
        what,
        value: arg.to_string(),
    })
}

fn fields<const N: usize>(command: &'static str, rest: &str) -> Result<[String; N], ShellError> {
    let parts: Vec<String> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('|').map(|p| p.trim().to_string()).collect()
    };

    let found = parts.len();
    parts.try_into().map_err(|_| ShellError::FieldCount {
        command,
        expected: N,
        found,
    })
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run_shell<S, R, W>(storefront: &mut Storefront<S>, input: R, mut output: W) -> io::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", storefront.banner())?;

    for line in input.lines() {
        let line = line?;
        debug!(line = %line, "shell input");

        match parse(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => {
                let reply = storefront.dispatch(command, Utc::now());
                writeln!(output, "{}", reply.text)?;
                if reply.quit {
                    break;
                }
            }
            Err(e) => writeln!(output, "{e}")?,
        }
    }

    output.flush()
}
