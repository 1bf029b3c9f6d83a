use std::env;
use std::error::Error;
use std::io;
use std::process;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        return Err("Usage: cargo run -- ledger.csv".into());
    }
    expense_dashboard::run(&args[1], ".", io::stdout().lock())?;
    Ok(())
}
