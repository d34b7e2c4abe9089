pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::catalog::CatalogService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init_db() -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::create_pool(&config.database)?;
    let conn = database::get_connection(&pool)?;
    database::setup::initialize_schema(&conn)
}

pub fn handle_reset_db() -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::create_pool(&config.database)?;
    let conn = database::get_connection(&pool)?;
    database::setup::reset_database(&conn)
}

pub fn handle_seed_films() -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::create_pool(&config.database)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::initialize_schema(&conn)?;
    CatalogService::new().seed(&mut conn)?;
    Ok(())
}
