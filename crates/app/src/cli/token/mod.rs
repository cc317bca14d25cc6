use clap::{Args, Subcommand};
use uuid::Uuid;
use venda::principal::{CustomerUuid, Principal, StoreUuid};
use venda_app::auth::{ApiTokenMetadata, ApiTokenUuid, PgAuthService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(OwnerArgs),
    List(OwnerArgs),
    Revoke(RevokeTokenArgs),
}

/// Exactly one of `--customer-uuid` or `--store-uuid`.
#[derive(Debug, Args)]
pub(crate) struct OwnerArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Customer the token acts for
    #[arg(long, conflicts_with = "store_uuid", required_unless_present = "store_uuid")]
    customer_uuid: Option<Uuid>,

    /// Store the token acts for
    #[arg(long)]
    store_uuid: Option<Uuid>,
}

impl OwnerArgs {
    fn principal(&self) -> Result<Principal, String> {
        match (self.customer_uuid, self.store_uuid) {
            (Some(customer), None) => Ok(Principal::Customer(CustomerUuid::from_uuid(customer))),
            (None, Some(store)) => Ok(Principal::Store(StoreUuid::from_uuid(store))),
            _ => Err("pass exactly one of --customer-uuid or --store-uuid".to_string()),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create(args).await,
        TokenSubcommand::List(args) => list(args).await,
        TokenSubcommand::Revoke(args) => revoke(args).await,
    }
}

async fn create(args: OwnerArgs) -> Result<(), String> {
    let principal = args.principal()?;
    let service = PgAuthService::new(args.database.connect().await?);

    let issued = service
        .issue_api_token(principal)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    print_metadata(&issued.metadata);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

async fn list(args: OwnerArgs) -> Result<(), String> {
    let principal = args.principal()?;
    let service = PgAuthService::new(args.database.connect().await?);

    let tokens = service
        .list_api_tokens(principal)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found");
        return Ok(());
    }

    for token in tokens {
        print_metadata(&token);
        println!(
            "last_used_at: {}",
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!(
            "revoked_at: {}",
            token
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}

async fn revoke(args: RevokeTokenArgs) -> Result<(), String> {
    let service = PgAuthService::new(args.database.connect().await?);

    let revoked = service
        .revoke_api_token(ApiTokenUuid::from_uuid(args.token_uuid))
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("revoked token {}", args.token_uuid);
    } else {
        println!("token {} was not active", args.token_uuid);
    }

    Ok(())
}

fn print_metadata(token: &ApiTokenMetadata) {
    println!("token_uuid: {}", token.uuid);

    match token.principal {
        Principal::Customer(customer) => println!("customer_uuid: {customer}"),
        Principal::Store(store) => println!("store_uuid: {store}"),
    }

    println!("created_at: {}", token.created_at);
}
