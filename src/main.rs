//! gym-ledger server binary.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};

use gym_ledger::adapters::http::{app_router, AppState, RouterConfig};
use gym_ledger::adapters::postgres::{
    PostgresCheckInRepository, PostgresMemberReader, PostgresMemberRepository,
    PostgresPackageRepository, PostgresPaymentMethodRepository, PostgresPeriodLedger,
    PostgresTransactionReader,
};
use gym_ledger::adapters::{InMemoryStore, SharedSecretAuthenticator, SystemClock};
use gym_ledger::config::{AppConfig, StorageBackend};
use gym_ledger::domain::membership::MembershipRules;
use gym_ledger::ports::{AdminAuthenticator, Clock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.logging.init();
    config.validate()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rules = config.membership.rules()?;
    let authenticator: Arc<dyn AdminAuthenticator> = Arc::new(SharedSecretAuthenticator::new(
        config.auth.admin_username.clone(),
        config.auth.admin_password.clone(),
        &config.auth.jwt_secret,
        config.auth.token_ttl(),
        clock.clone(),
    ));

    let state = match config.database.backend() {
        StorageBackend::Postgres { url } => {
            let pool = config.database.pool_options().connect(url).await?;
            info!("Connected to PostgreSQL");
            if config.database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("Migrations applied");
            }
            postgres_state(pool, authenticator, clock, rules)
        }
        StorageBackend::InMemory => {
            warn!("No database URL configured, ledger data will not survive a restart");
            AppState::in_memory(Arc::new(InMemoryStore::new()), authenticator, clock, rules)
        }
    };

    let router = app_router(
        state,
        &RouterConfig {
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "gym-ledger listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn postgres_state(
    pool: PgPool,
    authenticator: Arc<dyn AdminAuthenticator>,
    clock: Arc<dyn Clock>,
    rules: MembershipRules,
) -> AppState {
    let ledger = Arc::new(PostgresPeriodLedger::new(pool.clone()));
    AppState {
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        member_reader: Arc::new(PostgresMemberReader::new(pool.clone())),
        packages: Arc::new(PostgresPackageRepository::new(pool.clone())),
        payment_methods: Arc::new(PostgresPaymentMethodRepository::new(pool.clone())),
        ledger: ledger.clone(),
        writer: ledger,
        check_ins: Arc::new(PostgresCheckInRepository::new(pool.clone())),
        transactions: Arc::new(PostgresTransactionReader::new(pool)),
        authenticator,
        clock,
        rules,
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
