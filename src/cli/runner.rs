//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::HuntressClient;
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::resources::Resource;
use crate::types::{JsonValue, QueryParams};
use serde_json::json;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        if let Commands::Resources = self.cli.command {
            return self.resources();
        }

        let mut client = HuntressClient::new(self.client_config()?)?;
        let account = client.login().await?;
        debug!(?client, "client ready");

        match &self.cli.command {
            Commands::Account => self.print_one(&account),
            Commands::Actor => self.print_one(&client.actor(QueryParams::new()).await?),
            Commands::List { resource, params } => {
                let resource: Resource = resource.parse()?;
                let params: QueryParams = params.iter().cloned().collect();
                self.print_many(&client.list(resource, params).await?)
            }
            Commands::Get { resource, id } => {
                let resource: Resource = resource.parse()?;
                self.print_one(&client.fetch(resource, id, QueryParams::new()).await?)
            }
            Commands::Remediations { incident_report_id } => self.print_many(
                &client
                    .remediations(incident_report_id, QueryParams::new())
                    .await?,
            ),
            Commands::Remediation {
                incident_report_id,
                id,
            } => self.print_one(
                &client
                    .remediation(incident_report_id, id, QueryParams::new())
                    .await?,
            ),
            Commands::Resources => self.resources(),
        }
    }

    /// Resolve configuration: file, then environment, then flags
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ClientConfig::default(),
        }
        .with_env();

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(page_size) = self.cli.page_size {
            config.page_size = page_size;
        }

        config.validate()?;
        Ok(config)
    }

    fn resources(&self) -> Result<()> {
        let table: Vec<JsonValue> = Resource::ALL
            .into_iter()
            .map(|resource| {
                let spec = resource.spec();
                json!({
                    "name": spec.plural,
                    "singular": spec.singular,
                    "path": format!("/v1/{}", spec.path),
                })
            })
            .collect();
        self.print_many(&table)
    }

    fn print_one(&self, value: &JsonValue) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
            OutputFormat::Json => serde_json::to_string(value)?,
        };
        println!("{rendered}");
        Ok(())
    }

    fn print_many(&self, values: &[JsonValue]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(values)?);
            }
            OutputFormat::Json => {
                for value in values {
                    println!("{}", serde_json::to_string(value)?);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_client_config_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: https://file.example").unwrap();
        writeln!(file, "page_size: 10").unwrap();

        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "huntress",
            "--config",
            path,
            "--endpoint",
            "https://flag.example",
            "--page-size",
            "99",
            "account",
        ])
        .unwrap();

        let config = Runner::new(cli).client_config().unwrap();
        assert_eq!(config.endpoint, "https://flag.example");
        assert_eq!(config.page_size, 99);
    }

    #[test]
    fn test_client_config_rejects_zero_page_size() {
        let cli = Cli::try_parse_from(["huntress", "--page-size", "0", "account"]).unwrap();
        assert!(Runner::new(cli).client_config().is_err());
    }

    #[tokio::test]
    async fn test_account_reuses_login_response() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/account"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"account": {"id": 1, "name": "Acme"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "client_id: key").unwrap();
        writeln!(file, "client_secret: secret").unwrap();

        let path = file.path().to_str().unwrap();
        let endpoint = server.uri();
        let cli = Cli::try_parse_from([
            "huntress",
            "--config",
            path,
            "--endpoint",
            endpoint.as_str(),
            "-f",
            "json",
            "account",
        ])
        .unwrap();

        Runner::new(cli).run().await.unwrap();
        server.verify().await;
    }

    #[test]
    fn test_client_config_names_missing_file() {
        let cli =
            Cli::try_parse_from(["huntress", "--config", "/nonexistent/huntress.yaml", "account"])
                .unwrap();

        let err = Runner::new(cli).client_config().unwrap_err();
        assert!(err
            .to_string()
            .starts_with("loading /nonexistent/huntress.yaml: IO error"));
    }

    #[tokio::test]
    async fn test_resources_runs_offline() {
        let cli = Cli::try_parse_from(["huntress", "resources", "-f", "json"]).unwrap();
        Runner::new(cli).run().await.unwrap();
    }
}
