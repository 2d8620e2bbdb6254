use crate::services::{aws::dynamodb::RecordAttributes, extraction_service::PipelineConfig};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env;

const DEFAULT_ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];
const DEFAULT_SUBJECT: &str = "Textract Document Text Extraction Results";
const DEFAULT_KEY_ATTRIBUTE: &str = "param1";
const DEFAULT_TEXT_ATTRIBUTE: &str = "extracted_text";

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub topic_arn: String,
    pub table_name: Option<String>,
    pub allowed_content_types: Vec<String>,
    pub subject: String,
    pub key_attribute: String,
    pub text_attribute: String,
    pub record_store_url: Option<String>,
    pub region: Option<String>,
    pub host: String,
    pub port: u16,
    pub serve: bool,
    pub migrate: bool,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Extracts text from uploaded documents")]
pub struct Args {
    /// Topic receiving extraction results (overrides EXTRACTOR_TOPIC_ARN)
    #[arg(long)]
    pub topic_arn: Option<String>,

    /// DynamoDB table for extraction records (overrides EXTRACTOR_TABLE_NAME)
    #[arg(long)]
    pub table_name: Option<String>,

    /// Comma-separated accepted content types (overrides EXTRACTOR_ALLOWED_CONTENT_TYPES)
    #[arg(long)]
    pub allowed_content_types: Option<String>,

    /// Subject of published messages (overrides EXTRACTOR_NOTIFICATION_SUBJECT)
    #[arg(long)]
    pub subject: Option<String>,

    /// Partition key attribute of the record table (overrides EXTRACTOR_KEY_ATTRIBUTE)
    #[arg(long)]
    pub key_attribute: Option<String>,

    /// Attribute holding the extracted text (overrides EXTRACTOR_TEXT_ATTRIBUTE)
    #[arg(long)]
    pub text_attribute: Option<String>,

    /// Use a SQLite record store instead of DynamoDB (overrides EXTRACTOR_RECORD_STORE_URL)
    #[arg(long)]
    pub record_store_url: Option<String>,

    /// AWS region (overrides EXTRACTOR_AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Serve `POST /invoke` over HTTP instead of running under the Lambda runtime
    #[arg(long)]
    pub serve: bool,

    /// Host to bind to in serve mode (overrides EXTRACTOR_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to in serve mode (overrides EXTRACTOR_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Create the SQLite record schema and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::resolve(Args::parse(), |name| env::var(name).ok())
    }

    /// Merge `args` over the values `lookup` finds in the environment.
    pub fn resolve(args: Args, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let record_store_url = args
            .record_store_url
            .or_else(|| lookup("EXTRACTOR_RECORD_STORE_URL"));
        if let Some(url) = &record_store_url {
            if !url.starts_with("sqlite:") {
                bail!("unsupported record store url `{}`; expected sqlite://...", url);
            }
        }
        if args.migrate && record_store_url.is_none() {
            bail!("--migrate requires a sqlite record store url");
        }

        let topic_arn = match args.topic_arn.or_else(|| lookup("EXTRACTOR_TOPIC_ARN")) {
            Some(topic) => topic,
            None if args.migrate => String::new(),
            None => bail!("EXTRACTOR_TOPIC_ARN must be provided"),
        };

        let table_name = args.table_name.or_else(|| lookup("EXTRACTOR_TABLE_NAME"));
        if table_name.is_none() && record_store_url.is_none() {
            bail!("EXTRACTOR_TABLE_NAME must be provided unless a record store url is set");
        }

        let allowed_content_types = match args
            .allowed_content_types
            .or_else(|| lookup("EXTRACTOR_ALLOWED_CONTENT_TYPES"))
        {
            Some(list) => parse_content_types(&list)?,
            None => DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let port = match args.port {
            Some(port) => port,
            None => match lookup("EXTRACTOR_PORT") {
                Some(value) => value
                    .parse::<u16>()
                    .with_context(|| format!("parsing EXTRACTOR_PORT value `{}`", value))?,
                None => 3000,
            },
        };

        Ok(Self {
            topic_arn,
            table_name,
            allowed_content_types,
            subject: args
                .subject
                .or_else(|| lookup("EXTRACTOR_NOTIFICATION_SUBJECT"))
                .unwrap_or_else(|| DEFAULT_SUBJECT.into()),
            key_attribute: args
                .key_attribute
                .or_else(|| lookup("EXTRACTOR_KEY_ATTRIBUTE"))
                .unwrap_or_else(|| DEFAULT_KEY_ATTRIBUTE.into()),
            text_attribute: args
                .text_attribute
                .or_else(|| lookup("EXTRACTOR_TEXT_ATTRIBUTE"))
                .unwrap_or_else(|| DEFAULT_TEXT_ATTRIBUTE.into()),
            record_store_url,
            region: args.region.or_else(|| lookup("EXTRACTOR_AWS_REGION")),
            host: args
                .host
                .or_else(|| lookup("EXTRACTOR_HOST"))
                .unwrap_or_else(|| "0.0.0.0".into()),
            port,
            serve: args.serve,
            migrate: args.migrate,
        })
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            topic_arn: self.topic_arn.clone(),
            subject: self.subject.clone(),
            allowed_content_types: self.allowed_content_types.clone(),
        }
    }

    pub fn record_attributes(&self) -> RecordAttributes {
        RecordAttributes {
            key: self.key_attribute.clone(),
            text: self.text_attribute.clone(),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_content_types(list: &str) -> Result<Vec<String>> {
    let types = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();
    if types.is_empty() {
        bail!("allowed content types must not be empty");
    }
    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("upload-text-extractor").chain(extra.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_from_minimal_env() {
        let cfg = AppConfig::resolve(
            args(&[]),
            env(&[
                ("EXTRACTOR_TOPIC_ARN", "arn:aws:sns:eu-west-1:1:topic"),
                ("EXTRACTOR_TABLE_NAME", "extractions"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.topic_arn, "arn:aws:sns:eu-west-1:1:topic");
        assert_eq!(cfg.table_name.as_deref(), Some("extractions"));
        assert_eq!(
            cfg.allowed_content_types,
            vec!["image/jpeg", "image/png", "application/pdf"]
        );
        assert_eq!(cfg.subject, DEFAULT_SUBJECT);
        assert_eq!(cfg.key_attribute, "param1");
        assert_eq!(cfg.text_attribute, "extracted_text");
        assert_eq!(cfg.addr(), "0.0.0.0:3000");
        assert!(!cfg.serve);
    }

    #[test]
    fn cli_overrides_env() {
        let cfg = AppConfig::resolve(
            args(&["--topic-arn", "cli-topic", "--port", "8080", "--serve"]),
            env(&[
                ("EXTRACTOR_TOPIC_ARN", "env-topic"),
                ("EXTRACTOR_TABLE_NAME", "extractions"),
                ("EXTRACTOR_PORT", "9000"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.topic_arn, "cli-topic");
        assert_eq!(cfg.port, 8080);
        assert!(cfg.serve);
    }

    #[test]
    fn allow_list_is_parsed_and_trimmed() {
        let cfg = AppConfig::resolve(
            args(&["--allowed-content-types", " image/png , image/tiff ,"]),
            env(&[("EXTRACTOR_TOPIC_ARN", "t"), ("EXTRACTOR_TABLE_NAME", "x")]),
        )
        .unwrap();
        assert_eq!(cfg.allowed_content_types, vec!["image/png", "image/tiff"]);
        assert_eq!(cfg.pipeline().allowed_content_types, cfg.allowed_content_types);
    }

    #[test]
    fn rejects_bad_values() {
        let missing_topic = AppConfig::resolve(args(&[]), env(&[("EXTRACTOR_TABLE_NAME", "x")]));
        assert!(missing_topic.is_err());

        let missing_table = AppConfig::resolve(args(&[]), env(&[("EXTRACTOR_TOPIC_ARN", "t")]));
        assert!(missing_table.is_err());

        let bad_port = AppConfig::resolve(
            args(&[]),
            env(&[
                ("EXTRACTOR_TOPIC_ARN", "t"),
                ("EXTRACTOR_TABLE_NAME", "x"),
                ("EXTRACTOR_PORT", "eighty"),
            ]),
        );
        assert!(format!("{:#}", bad_port.unwrap_err()).contains("EXTRACTOR_PORT"));

        let empty_list = AppConfig::resolve(
            args(&["--allowed-content-types", " , "]),
            env(&[("EXTRACTOR_TOPIC_ARN", "t"), ("EXTRACTOR_TABLE_NAME", "x")]),
        );
        assert!(empty_list.is_err());

        let postgres = AppConfig::resolve(
            args(&["--record-store-url", "postgres://db"]),
            env(&[("EXTRACTOR_TOPIC_ARN", "t")]),
        );
        assert!(postgres.is_err());
    }

    #[test]
    fn sqlite_store_replaces_the_table() {
        let cfg = AppConfig::resolve(
            args(&["--record-store-url", "sqlite://./data/extractions.db"]),
            env(&[("EXTRACTOR_TOPIC_ARN", "t")]),
        )
        .unwrap();
        assert_eq!(cfg.table_name, None);
        assert_eq!(
            cfg.record_store_url.as_deref(),
            Some("sqlite://./data/extractions.db")
        );
    }

    #[test]
    fn migrate_needs_only_a_sqlite_url() {
        let cfg = AppConfig::resolve(
            args(&["--migrate", "--record-store-url", "sqlite::memory:"]),
            env(&[]),
        )
        .unwrap();
        assert!(cfg.migrate);

        assert!(AppConfig::resolve(args(&["--migrate"]), env(&[])).is_err());
    }
}
