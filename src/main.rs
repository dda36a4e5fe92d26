use std::sync::Arc;

use quote_desk::config::AppConfig;
use quote_desk::intake::IntakeService;
use quote_desk::notify::{LogMailer, Mailer, SmtpMailer};
use quote_desk::server::{self, AppState};
use quote_desk::store::{LeadStore, LibSqlBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install rustls crypto provider")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;
    let addr = config.server.socket_addr()?;

    // The form keeps working without a database; leads are then only emailed.
    let store: Option<Arc<dyn LeadStore>> = match LibSqlBackend::new_local(&config.db_path).await
    {
        Ok(backend) => Some(Arc::new(backend)),
        Err(e) => {
            tracing::error!(
                error = %e,
                path = %config.db_path.display(),
                "Lead database unavailable, continuing without storage"
            );
            None
        }
    };

    let mailer: Arc<dyn Mailer> = match config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "SMTP enabled");
            Arc::new(SmtpMailer::new(smtp))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, emails will only be logged");
            Arc::new(LogMailer::new())
        }
    };

    tracing::info!(
        business = %config.business.business_name,
        owner = %config.business.owner_email,
        "Starting quote desk"
    );

    let intake = IntakeService::new(store.clone(), mailer, config.business);
    let state = AppState {
        intake: Arc::new(intake),
        store,
    };

    server::serve(addr, state).await?;
    Ok(())
}
