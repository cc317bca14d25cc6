use clap::{Args, Subcommand};
use venda_app::domain::stores::{
    PgStoresService, StoresService,
    models::{NewStore, StoreUuid},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct StoreCommand {
    #[command(subcommand)]
    command: StoreSubcommand,
}

#[derive(Debug, Subcommand)]
enum StoreSubcommand {
    Create(CreateStoreArgs),
    List(ListStoresArgs),
    /// Start taking cart items and orders
    Open(StoreArgs),
    /// Stop taking cart items and orders; orders already placed are unaffected
    Close(StoreArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CreateStoreArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Store display name
    #[arg(long)]
    name: String,

    /// Optional store UUID; generated when omitted
    #[arg(long)]
    store_uuid: Option<uuid::Uuid>,
}

#[derive(Debug, Args)]
pub(crate) struct ListStoresArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    store_uuid: uuid::Uuid,
}

pub(crate) async fn run(command: StoreCommand) -> Result<(), String> {
    match command.command {
        StoreSubcommand::Create(args) => create(args).await,
        StoreSubcommand::List(args) => list(args).await,
        StoreSubcommand::Open(args) => set_open(args, true).await,
        StoreSubcommand::Close(args) => set_open(args, false).await,
    }
}

async fn create(args: CreateStoreArgs) -> Result<(), String> {
    let service = PgStoresService::new(args.database.connect().await?);

    let store = service
        .create_store(NewStore {
            uuid: args
                .store_uuid
                .map_or_else(StoreUuid::new, StoreUuid::from_uuid),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create store: {error}"))?;

    println!("store_uuid: {}", store.uuid);
    println!("store_name: {}", store.name);

    Ok(())
}

async fn list(args: ListStoresArgs) -> Result<(), String> {
    let service = PgStoresService::new(args.database.connect().await?);

    let stores = service
        .list_stores()
        .await
        .map_err(|error| format!("failed to list stores: {error}"))?;

    if stores.is_empty() {
        println!("no stores found");
        return Ok(());
    }

    for store in stores {
        let state = if store.is_open { "open" } else { "closed" };

        println!("{}  {state:<6}  {}", store.uuid, store.name);
    }

    Ok(())
}

async fn set_open(args: StoreArgs, is_open: bool) -> Result<(), String> {
    let service = PgStoresService::new(args.database.connect().await?);

    let store = service
        .set_open(StoreUuid::from_uuid(args.store_uuid), is_open)
        .await
        .map_err(|error| format!("failed to update store {}: {error}", args.store_uuid))?;

    println!(
        "store {} is now {}",
        store.uuid,
        if store.is_open { "open" } else { "closed" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use crate::cli::{Cli, Commands};

    use super::*;

    fn parse_store(args: &[&str]) -> Result<StoreSubcommand, Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(
            ["venda-app", "store"]
                .iter()
                .chain(args)
                .chain(&["--database-url", "postgres://localhost/venda"])
                .copied(),
        )?;

        match cli.command {
            Commands::Store(command) => Ok(command.command),
            other => Err(format!("expected a store command, got {other:?}").into()),
        }
    }

    #[test]
    fn open_and_close_name_the_store() -> TestResult {
        let store = uuid::Uuid::now_v7();
        let store_arg = store.to_string();

        let open = parse_store(&["open", "--store-uuid", &store_arg])?;
        let close = parse_store(&["close", "--store-uuid", &store_arg])?;

        assert!(matches!(open, StoreSubcommand::Open(args) if args.store_uuid == store));
        assert!(matches!(close, StoreSubcommand::Close(args) if args.store_uuid == store));

        Ok(())
    }

    #[test]
    fn close_without_a_store_is_rejected() {
        assert!(parse_store(&["close"]).is_err());
    }
}
