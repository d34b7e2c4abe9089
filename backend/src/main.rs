use anyhow::Result;

use cinevous::cli::Command;
use cinevous::{handle_init_db, handle_reset_db, handle_seed_films, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::InitDb => handle_init_db(),
        Command::ResetDb => handle_reset_db(),
        Command::SeedFilms => handle_seed_films(),
    }
}
