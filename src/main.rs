//! walletpay - Peer-to-Peer Wallet Transfer Backend
//!
//! Wires the transfer engine against the in-memory repositories and the
//! configured authorization/notification services, seeds two demo users,
//! and runs one transfer end to end.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use walletpay::adapter::{
    HttpAuthorizer, HttpNotifier, InMemoryAccountRepository, InMemoryTransferRepository,
    LoggingNotifier, StaticAuthorizer,
};
use walletpay::handlers::{CreateUserCommand, CreateUserHandler, TransferCommand, TransferHandler};
use walletpay::ports::{Authorizer, IdProvider, Notifier, UuidProvider};
use walletpay::presenter::{present_transfer, present_user};
use walletpay::{Config, Currency, Money, OperationContext};

/// Initialize tracing/logging
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "walletpay=debug".into());

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration and initialize tracing
    let config = Config::from_env()?;
    init_tracing(&config);

    tracing::info!(environment = %config.environment, "starting walletpay");

    let accounts = Arc::new(InMemoryAccountRepository::new());
    let transfers = Arc::new(InMemoryTransferRepository::new());
    let ids: Arc<dyn IdProvider> = Arc::new(UuidProvider);
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let authorizer: Arc<dyn Authorizer> = match &config.authorizer_url {
        Some(url) => {
            tracing::info!(%url, "using external authorization service");
            Arc::new(HttpAuthorizer::new(url.clone(), timeout)?)
        }
        None => {
            tracing::info!("AUTHORIZER_URL not set, approving transfers locally");
            Arc::new(StaticAuthorizer::approving())
        }
    };

    let notifier: Arc<dyn Notifier> = match &config.notifier_url {
        Some(url) => {
            tracing::info!(%url, "using notification webhook");
            Arc::new(HttpNotifier::new(url.clone(), timeout)?)
        }
        None => Arc::new(LoggingNotifier),
    };

    // Seed two demo users: a paying customer and a receiving merchant.
    let create_user = CreateUserHandler::new(accounts.clone(), ids.clone());

    let payer = create_user
        .execute(
            CreateUserCommand::new(
                "Gabriel Facina",
                "payer@example.com",
                "passw",
                "CPF",
                "07010965836",
                "COMMON",
            )
            .with_initial_balance(Currency::Brl, 100),
        )
        .await?;

    let payee = create_user
        .execute(
            CreateUserCommand::new(
                "Facina Store",
                "store@example.com",
                "passw",
                "CNPJ",
                "90.691.635/0001-75",
                "MERCHANT",
            )
            .with_initial_balance(Currency::Brl, 100),
        )
        .await?;

    tracing::info!(
        payer = %serde_json::to_string(&present_user(&payer))?,
        payee = %serde_json::to_string(&present_user(&payee))?,
        "demo users registered"
    );

    // Run one transfer end to end.
    let engine = TransferHandler::new(
        accounts.clone(),
        transfers.clone(),
        authorizer,
        notifier,
        ids.clone(),
    )
    .with_max_retries(config.max_transfer_retries);

    let mut context = OperationContext::new().with_request_user(payer.id());
    context.ensure_correlation_id();

    let value = Money::new(Currency::Brl, 100)?;
    let result = engine
        .execute(TransferCommand::new(payer.id(), payee.id(), value), &context)
        .await?;

    tracing::info!(
        transfer = %serde_json::to_string(&present_transfer(&result.transfer))?,
        "transfer finished"
    );
    if let Some(err) = &result.notification_error {
        tracing::warn!(error = %err, "notification pending out-of-band retry");
    }

    Ok(())
}
