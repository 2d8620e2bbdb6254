use anyhow::{Result, anyhow};
use axum::Router;
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use services::{
    aws::{self, DynamoRecordStore, S3ObjectStore, SnsNotifier, TextractDetector},
    extraction_service::ExtractionService,
    record_backend::RecordBackend,
    sqlite_store::SqliteRecordStore,
};

type Service = ExtractionService<S3ObjectStore, TextractDetector, SnsNotifier, RecordBackend>;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;

    // --- Logging setup ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cfg.serve {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        // CloudWatch stamps every line already
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .init();
    }

    tracing::info!("Starting upload-text-extractor with config: {:?}", cfg);

    // --- Handle migration mode ---
    if cfg.migrate {
        let url = cfg
            .record_store_url
            .as_deref()
            .ok_or_else(|| anyhow!("--migrate requires a sqlite record store url"))?;
        SqliteRecordStore::connect(url).await?.migrate().await?;
        tracing::info!("Database migration complete.");
        return Ok(()); // exit after migration
    }

    // --- Initialize clients once per process ---
    let sdk_config = aws::load_sdk_config(cfg.region.as_deref()).await;
    let records = match (&cfg.record_store_url, &cfg.table_name) {
        (Some(url), _) => RecordBackend::Sqlite(SqliteRecordStore::connect(url).await?),
        (None, Some(table)) => RecordBackend::Dynamo(DynamoRecordStore::new(
            aws_sdk_dynamodb::Client::new(&sdk_config),
            table.clone(),
            cfg.record_attributes(),
        )),
        (None, None) => anyhow::bail!("no record store configured"),
    };
    tracing::info!(backend = records.name(), "record store ready");

    let service: Service = ExtractionService::new(
        S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config)),
        TextractDetector::new(aws_sdk_textract::Client::new(&sdk_config)),
        SnsNotifier::new(aws_sdk_sns::Client::new(&sdk_config)),
        records,
        cfg.pipeline(),
    );

    if cfg.serve {
        serve(&cfg, service).await
    } else {
        run_lambda(service).await
    }
}

async fn run_lambda(service: Service) -> Result<()> {
    tracing::trace!("initiating lambda");

    let func = service_fn(move |event: LambdaEvent<Value>| {
        let service = service.clone();
        async move { handlers::lambda_handler::handler(&service, event).await }
    });

    lambda_runtime::run(func)
        .await
        .map_err(|e| anyhow!("{:?}", e))
}

async fn serve(cfg: &config::AppConfig, service: Service) -> Result<()> {
    // --- Build router ---
    let app: Router = routes::routes::routes().with_state(service);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
