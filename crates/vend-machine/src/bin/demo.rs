//! # Interactive Vending Machine
//!
//! Drives one machine from stdin, one command per line.
//!
//! ## Usage
//! ```bash
//! # Use the default config location (or VEND_CONFIG)
//! cargo run -p vend-machine --bin vend-demo
//!
//! # Specify a config file
//! cargo run -p vend-machine --bin vend-demo -- --config ./machine.toml
//!
//! # More logging
//! RUST_LOG=debug cargo run -p vend-machine --bin vend-demo
//! ```
//!
//! ## Commands
//! ```text
//! select <PRODUCT>   select COKE
//! insert <COIN>      insert FIFTY_CENTS
//! confirm            buy the selected product
//! refund             return the balance
//! stock              cash and product stock as JSON
//! products           products available right now
//! coins              accepted coins
//! quit
//! ```

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vend_core::{Beverage, Coin, CoreError};
use vend_machine::{
    MachineConfig, MachineError, MachineResult, SupplierOperations, UserOperations,
    VendingMachine,
};

enum Step {
    Continue,
    Quit,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vending Machine Demo");
                println!();
                println!("Usage: vend-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = MachineConfig::load(config_path)?;
    let mut machine = VendingMachine::from_config(&config)?;
    info!(machine = %machine.name(), "Machine ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();

        if let Some(command) = words.next() {
            match execute(&mut machine, command, words.next()) {
                Ok(Step::Quit) => break,
                Ok(Step::Continue) => {}
                Err(e) => println!("{}", serde_json::to_string(&e)?),
            }
        }

        print!("> ");
        stdout.flush()?;
    }

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,vend=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn execute(machine: &mut VendingMachine, command: &str, arg: Option<&str>) -> MachineResult<Step> {
    match command.to_ascii_lowercase().as_str() {
        "select" => {
            let product: Beverage = parse(arg)?;
            let price = machine.select_product(product)?;
            println!("{} selected, price {}", product, price);
        }
        "insert" => {
            let coin: Coin = parse(arg)?;
            let balance = machine.insert_cash(coin)?;
            println!("balance {}", balance);
        }
        "confirm" => {
            let receipt = machine.confirm_purchase()?;
            println!("{}", to_json(&receipt)?);
        }
        "refund" => match machine.refund()? {
            Some(change) => println!("refunded {}", to_json(&change)?),
            None => println!("nothing to refund"),
        },
        "stock" => {
            let status = json!({
                "machine": machine.name(),
                "balance": machine.balance(),
                "selected": machine.selected(),
                "cash": machine.cash_stock_status(),
                "products": machine.product_stock_status(),
            });
            println!("{}", to_json(&status)?);
        }
        "products" => println!("{}", to_json(&machine.available_products())?),
        "coins" => println!("{}", to_json(&machine.allowed_cash_items())?),
        "quit" | "exit" => return Ok(Step::Quit),
        other => println!(
            "unknown command '{}' (select, insert, confirm, refund, stock, products, coins, quit)",
            other
        ),
    }
    Ok(Step::Continue)
}

/// Parses a coin or product name into a machine error on failure.
fn parse<T>(arg: Option<&str>) -> MachineResult<T>
where
    T: std::str::FromStr<Err = vend_core::ValidationError>,
{
    let name = arg.unwrap_or_default();
    name.parse::<T>()
        .map_err(|e| MachineError::from(CoreError::from(e)))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> MachineResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| MachineError::internal(e.to_string()))
}
