use clap::{Parser, Subcommand};

mod customer;
mod db;
mod store;
mod token;

#[derive(Debug, Parser)]
#[command(name = "venda-app", about = "Venda administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Store(store::StoreCommand),
    Customer(customer::CustomerCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Store(command) => store::run(command).await,
            Commands::Customer(command) => customer::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}

/// Connection shared by every subcommand.
#[derive(Debug, clap::Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<venda_app::database::Db, String> {
        venda_app::database::connect(&self.database_url)
            .await
            .map(venda_app::database::Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
