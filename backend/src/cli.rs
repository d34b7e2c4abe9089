use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "cinevous film diary backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create missing tables and indexes
    InitDb,
    /// Drop every table and recreate the schema
    ResetDb,
    /// Insert the bundled 2025 release catalog
    SeedFilms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults_to_port_3000() {
        let cli = Cli::parse_from(["cinevous", "serve"]);
        assert_eq!(cli.command, Command::Serve { port: 3000 });
    }

    #[test]
    fn test_kebab_case_subcommands() {
        assert_eq!(Cli::parse_from(["cinevous", "seed-films"]).command, Command::SeedFilms);
        assert_eq!(Cli::parse_from(["cinevous", "init-db"]).command, Command::InitDb);
        assert_eq!(Cli::parse_from(["cinevous", "reset-db"]).command, Command::ResetDb);
    }
}
