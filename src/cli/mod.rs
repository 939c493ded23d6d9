use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::application::BankService;
use crate::domain::Money;
use crate::io::Exporter;

/// FamilyBank - family banking ledger
#[derive(Parser)]
#[command(name = "familybank")]
#[command(about = "An in-memory family banking ledger with overdraft protection")]
#[command(version)]
pub struct Cli {
    /// Seed a few demo accounts at startup
    #[arg(long)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session over a fresh in-memory bank (default)
    Shell,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let mut service = BankService::new();
        if self.demo {
            seed_demo(&mut service)?;
        }

        match self.command {
            None | Some(Commands::Shell) => shell(&mut service),
        }
    }
}

fn seed_demo(service: &mut BankService) -> Result<()> {
    service.open_account("Alice", "A001", Money::ZERO, Money::parse("100.00")?)?;
    service.open_account("Bob", "B002", Money::ZERO, Money::parse("25.00")?)?;
    service.deposit("A001", Money::parse("12.50")?, Some("allowance".to_string()))?;
    Ok(())
}

/// Interactive command loop. Every failure is reported as an `Error:` line
/// and the session keeps going; only `quit` or end of input ends it.
fn shell(service: &mut BankService) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("familybank shell - type 'help' for commands");
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // end of input
        }

        let args: Vec<&str> = line.split_whitespace().collect();
        if args.is_empty() {
            continue;
        }
        if matches!(args[0], "quit" | "exit") {
            break;
        }

        if let Err(err) = dispatch(service, &args) {
            println!("Error: {err}");
        }
    }
    Ok(())
}

fn dispatch(service: &mut BankService, args: &[&str]) -> Result<()> {
    match args {
        ["help"] => print_help(),
        ["open", owner, id, minimum, initial] => {
            let opened = service.open_account(
                owner,
                id,
                Money::parse(minimum)?,
                Money::parse(initial)?,
            )?;
            let account = opened.account.borrow();
            println!("Opened {} for {}: {}", account.id(), account.owner(), account.current());
        }
        ["deposit", id, amount, memo @ ..] => {
            service.deposit(id, Money::parse(amount)?, join_memo(memo))?;
            println!("Balance of {}: {}", id, service.balance(id)?);
        }
        ["withdraw", id, amount, memo @ ..] => {
            service.withdraw(id, Money::parse(amount)?, join_memo(memo))?;
            println!("Balance of {}: {}", id, service.balance(id)?);
        }
        ["transfer", from, to, amount, memo @ ..] => {
            service.transfer(from, to, Money::parse(amount)?, join_memo(memo))?;
            println!(
                "Transferred {} from {} to {}",
                Money::parse(amount)?,
                from,
                to
            );
        }
        ["balance", id] => {
            println!("{}", service.balance(id)?);
        }
        ["accounts"] => {
            for summary in service.list_accounts() {
                println!("{}  {}  {}", summary.id, summary.owner, summary.balance);
            }
        }
        ["history", id] => print_history(service, id, 10)?,
        ["history", id, n] => print_history(service, id, n.parse()?)?,
        ["export", "balances"] => {
            Exporter::new(service).export_balances_csv(io::stdout())?;
        }
        ["export", "statement", id] => {
            Exporter::new(service).export_statement_csv(id, 100, io::stdout())?;
        }
        ["export", "snapshot"] => {
            Exporter::new(service).export_snapshot_json(io::stdout())?;
            println!();
        }
        _ => println!("Unknown command, type 'help' for usage"),
    }
    Ok(())
}

fn print_history(service: &BankService, id: &str, limit: usize) -> Result<()> {
    for record in service.recent_activity(id, limit)? {
        println!(
            "{}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record
        );
    }
    Ok(())
}

fn join_memo(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn print_help() {
    println!("Commands:");
    println!("  open <owner> <id> <minimum> <initial>   Open a new account");
    println!("  deposit <id> <amount> [memo]            Deposit into an account");
    println!("  withdraw <id> <amount> [memo]           Withdraw from an account");
    println!("  transfer <from> <to> <amount> [memo]    Move funds between accounts");
    println!("  balance <id>                            Show an account balance");
    println!("  accounts                                List all accounts");
    println!("  history <id> [n]                        Show recent transactions");
    println!("  export balances|statement <id>|snapshot Export as CSV/JSON");
    println!("  quit                                    Leave the shell");
}
