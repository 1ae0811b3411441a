//! # ForPhone Storefront Entry Point
//!
//! ```text
//! $ forphone
//! Welcome to ForPhone! Type 'help' for commands.
//! Cart (0)
//! products apple
//! Phones (apple):
//!    1  iPhone 17 Pro Max              $1199.00  apple
//!    2  iPhone 17                       $999.00  apple
//! add 2
//! Cart (1)
//! * iPhone 17 added to cart!
//! ```
//!
//! Pass `--ephemeral` to keep the cart in memory only.
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    match forphone_storefront_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("forphone: {e}");
            ExitCode::FAILURE
        }
    }
}
