//! Command-line interface.
//!
//! Flags override environment-derived settings; everything else (webhook
//! URL, service-account credentials) comes from the environment only.

use clap::Parser;

use crate::config::Settings;

/// Relay for driver reports and fleet push notifications
#[derive(Debug, Parser)]
#[command(name = "driver-relay", version, about)]
pub struct Cli {
    /// Host address to bind to (overrides RELAY_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides RELAY_PORT)
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Applies CLI overrides on top of environment-derived settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(ref host) = self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CorsConfig, ServerConfig, ServiceAccountConfig, Settings, WebhookConfig,
    };

    fn base_settings() -> Settings {
        Settings {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            webhook: WebhookConfig {
                url: "https://hooks.example/services/x".to_string(),
            },
            service_account: ServiceAccountConfig {
                account_type: "service_account".to_string(),
                project_id: "demo".to_string(),
                private_key_id: "kid".to_string(),
                private_key: "pem".to_string(),
                client_email: "svc@demo.iam.gserviceaccount.com".to_string(),
                client_id: "123".to_string(),
                auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
                token_uri: "https://oauth2.googleapis.com/token".to_string(),
                auth_provider_cert_url: "https://www.googleapis.com/oauth2/v1/certs".to_string(),
                client_cert_url: "https://example.com/cert".to_string(),
            },
        }
    }

    #[test]
    fn test_cli_overrides_host_and_port() {
        let cli = Cli::parse_from(["driver-relay", "--host", "127.0.0.1", "--port", "8080"]);
        let mut settings = base_settings();
        cli.apply(&mut settings);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_cli_defaults_leave_settings_untouched() {
        let cli = Cli::parse_from(["driver-relay"]);
        let mut settings = base_settings();
        cli.apply(&mut settings);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 5000);
    }
}
