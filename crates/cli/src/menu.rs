use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use owo_colors::OwoColorize;

use portfolio_tracker_core::models::stock::Stock;
use portfolio_tracker_core::models::transaction::TransactionKind;
use portfolio_tracker_core::PortfolioTracker;

use crate::display;

/// Where the three flat files live for this session.
pub struct FilePaths {
    pub portfolio: PathBuf,
    pub transactions: PathBuf,
    pub report: PathBuf,
}

/// The interactive menu loop. Every failure below this point is rendered
/// as a message and returns the user to the menu; only terminal I/O
/// errors (or EOF on stdin) end the loop.
pub async fn run(mut tracker: PortfolioTracker, paths: &FilePaths) -> Result<()> {
    println!("{}", "--- Portfolio Tracker ---".bold());

    loop {
        show_menu();
        let Some(choice) = prompt("Enter your choice: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => start_new_portfolio(&mut tracker)?,
            "2" => open_portfolio(&mut tracker, paths),
            "3" => add_transaction(&mut tracker)?,
            "4" => display::portfolio(&tracker),
            "5" => save_files(&mut tracker, paths).await,
            "6" => {
                if tracker.has_unsaved_changes() {
                    let Some(answer) =
                        prompt("You have unsaved changes. Enter y to exit anyway: ")?
                    else {
                        break;
                    };
                    if answer != "y" {
                        continue;
                    }
                }
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }

    Ok(())
}

fn show_menu() {
    println!("\nMain Menu:");
    println!("1. Start new portfolio");
    println!("2. Open existing portfolio from file");
    println!("3. Add transaction");
    println!("4. Display portfolio");
    println!("5. Save files");
    println!("6. Exit");
}

fn start_new_portfolio(tracker: &mut PortfolioTracker) -> Result<()> {
    if tracker.has_unsaved_changes() {
        let Some(answer) = prompt("Discard unsaved changes and start over? Enter y to confirm: ")?
        else {
            return Ok(());
        };
        if answer != "y" {
            return Ok(());
        }
    }
    tracker.reset();
    println!("Started a new, empty portfolio.");
    Ok(())
}

fn open_portfolio(tracker: &mut PortfolioTracker, paths: &FilePaths) {
    match tracker.load_stocks_from(&paths.portfolio) {
        Ok(count) => println!(
            "Loaded {count} holding(s) from {}.",
            paths.portfolio.display()
        ),
        Err(e) => println!("{}", format!("Could not load portfolio: {e}").red()),
    }
}

fn add_transaction(tracker: &mut PortfolioTracker) -> Result<()> {
    display::portfolio(tracker);

    let Some(symbol) = prompt("Enter the stock symbol: ")? else {
        return Ok(());
    };
    if symbol.is_empty() {
        return Ok(());
    }

    if tracker.holding(&symbol).is_none() {
        println!("--- Stock not currently owned ---");
        let Some(answer) = prompt("Enter y to add it to the portfolio or n to go back: ")?
        else {
            return Ok(());
        };
        if answer != "y" {
            return Ok(());
        }
        tracker.add_stock(Stock::empty(symbol.clone()));
    }

    // An empty line at any prompt cancels and returns to the menu.
    let Some(kind) = prompt_parse::<TransactionKind>("Enter transaction type ('buy' or 'sell'): ")?
    else {
        return Ok(());
    };
    let Some(shares) = prompt_parse::<u32>("Enter the number of shares: ")? else {
        return Ok(());
    };
    let Some(cost_per_share) = prompt_parse::<f64>("Enter cost per share: ")? else {
        return Ok(());
    };

    match tracker.transact(&symbol, kind, shares, cost_per_share) {
        Ok(()) => println!("Transaction completed."),
        Err(e) => println!("{}", format!("Transaction rejected: {e}").red()),
    }

    Ok(())
}

async fn save_files(tracker: &mut PortfolioTracker, paths: &FilePaths) {
    println!("Fetching current prices...");
    match tracker
        .save_all(&paths.portfolio, &paths.transactions, &paths.report)
        .await
    {
        Ok(rows) => {
            display::gain_loss_report(&rows);
            println!("Data saved to csv files.");
        }
        Err(e) => println!(
            "{}",
            format!("Save failed: {e} (files already written are kept as-is)").red()
        ),
    }
}

/// Print `message`, read one trimmed line from stdin.
/// Returns `None` on EOF.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt repeatedly until the input parses as `T`.
/// An empty line cancels (`None`), as does EOF.
fn prompt_parse<T: FromStr>(message: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    loop {
        let Some(line) = prompt(message)? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(None);
        }
        match line.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(e) => println!("{}", format!("Invalid input: {e}").red()),
        }
    }
}
