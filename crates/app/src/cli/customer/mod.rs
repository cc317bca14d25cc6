use clap::{Args, Subcommand};
use uuid::Uuid;
use venda_app::domain::customers::{
    CustomersService, PgCustomersService,
    models::{AddressUuid, CustomerUuid, NewAddress, NewCustomer, NewPaymentMethod, PaymentMethodUuid},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CustomerCommand {
    #[command(subcommand)]
    command: CustomerSubcommand,
}

#[derive(Debug, Subcommand)]
enum CustomerSubcommand {
    Create(CreateCustomerArgs),
    AddAddress(AddAddressArgs),
    AddPaymentMethod(AddPaymentMethodArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CreateCustomerArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Customer display name
    #[arg(long)]
    name: String,

    /// Optional customer UUID; generated when omitted
    #[arg(long)]
    customer_uuid: Option<Uuid>,
}

#[derive(Debug, Args)]
pub(crate) struct AddAddressArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    customer_uuid: Uuid,

    #[arg(long)]
    street: String,

    #[arg(long)]
    number: String,

    #[arg(long)]
    district: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    postal_code: String,
}

#[derive(Debug, Args)]
pub(crate) struct AddPaymentMethodArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    customer_uuid: Uuid,

    /// Label shown to the customer, e.g. "Visa"
    #[arg(long)]
    name: String,

    /// Masked details, e.g. "**** 4242"
    #[arg(long, default_value = "")]
    details: String,
}

pub(crate) async fn run(command: CustomerCommand) -> Result<(), String> {
    match command.command {
        CustomerSubcommand::Create(args) => create(args).await,
        CustomerSubcommand::AddAddress(args) => add_address(args).await,
        CustomerSubcommand::AddPaymentMethod(args) => add_payment_method(args).await,
    }
}

async fn create(args: CreateCustomerArgs) -> Result<(), String> {
    let service = PgCustomersService::new(args.database.connect().await?);

    let customer = service
        .create_customer(NewCustomer {
            uuid: args
                .customer_uuid
                .map_or_else(CustomerUuid::new, CustomerUuid::from_uuid),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    println!("customer_uuid: {}", customer.uuid);
    println!("customer_name: {}", customer.name);

    Ok(())
}

async fn add_address(args: AddAddressArgs) -> Result<(), String> {
    let service = PgCustomersService::new(args.database.connect().await?);

    let address = service
        .add_address(
            CustomerUuid::from_uuid(args.customer_uuid),
            NewAddress {
                uuid: AddressUuid::new(),
                street: args.street,
                number: args.number,
                district: args.district,
                city: args.city,
                postal_code: args.postal_code,
            },
        )
        .await
        .map_err(|error| format!("failed to add address: {error}"))?;

    println!("address_uuid: {}", address.uuid);

    Ok(())
}

async fn add_payment_method(args: AddPaymentMethodArgs) -> Result<(), String> {
    let service = PgCustomersService::new(args.database.connect().await?);

    let method = service
        .add_payment_method(
            CustomerUuid::from_uuid(args.customer_uuid),
            NewPaymentMethod {
                uuid: PaymentMethodUuid::new(),
                name: args.name,
                details: args.details,
            },
        )
        .await
        .map_err(|error| format!("failed to add payment method: {error}"))?;

    println!("payment_method_uuid: {}", method.uuid);

    Ok(())
}
