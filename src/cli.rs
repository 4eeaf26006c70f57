use clap::{Parser, Subcommand, ValueEnum};
use openwebui_reconcile::config::{
    ClientConfig, ConfigError, ENDPOINT_VAR, TIMEOUT_VAR, TOKEN_VAR,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "openwebui-reconcile")]
#[command(version)]
#[command(about = "Reconcile Open WebUI models, knowledge, groups and users", long_about = None)]
pub struct Cli {
    /// Base URL of the Open WebUI instance
    #[arg(long, env = ENDPOINT_VAR, global = true)]
    pub endpoint: Option<String>,

    /// API token (Settings > Account > API keys)
    #[arg(long, env = TOKEN_VAR, global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = TIMEOUT_VAR, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate and default a desired-state file without contacting the server
    Plan {
        #[arg(value_enum)]
        kind: Kind,
        file: PathBuf,
    },

    #[command(flatten)]
    Remote(RemoteCommand),
}

/// Commands that talk to the server.
#[derive(Subcommand)]
pub enum RemoteCommand {
    /// Create a resource from a JSON desired-state file
    Create {
        #[arg(value_enum)]
        kind: Kind,
        file: PathBuf,
    },

    /// Read a resource by identity
    Read {
        #[arg(value_enum)]
        kind: Kind,
        id: String,
    },

    /// Apply a JSON desired-state file to an existing resource
    Update {
        #[arg(value_enum)]
        kind: Kind,
        id: String,
        file: PathBuf,
    },

    /// Delete a resource by identity
    Delete {
        #[arg(value_enum)]
        kind: Kind,
        id: String,
    },

    /// List every resource of a kind
    List {
        #[arg(value_enum)]
        kind: Kind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Model,
    Knowledge,
    Group,
    User,
}

impl RemoteCommand {
    pub fn kind(&self) -> Kind {
        match self {
            RemoteCommand::Create { kind, .. }
            | RemoteCommand::Read { kind, .. }
            | RemoteCommand::Update { kind, .. }
            | RemoteCommand::Delete { kind, .. }
            | RemoteCommand::List { kind } => *kind,
        }
    }
}

impl Cli {
    /// Flags win over the environment; clap has already merged the two.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::from_lookup(|key| match key {
            ENDPOINT_VAR => self.endpoint.clone(),
            TOKEN_VAR => self.token.clone(),
            TIMEOUT_VAR => self.timeout_secs.map(|secs| secs.to_string()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_update() {
        let cli = Cli::try_parse_from([
            "openwebui-reconcile",
            "--endpoint",
            "http://localhost:8080",
            "--token",
            "secret",
            "update",
            "model",
            "m-1",
            "model.json",
        ])
        .unwrap();
        let Command::Remote(command) = &cli.command else {
            panic!("expected a remote command");
        };
        assert_eq!(command.kind(), Kind::Model);
        assert!(matches!(command, RemoteCommand::Update { id, .. } if id == "m-1"));
        assert_eq!(cli.client_config().unwrap().token, "secret");
    }

    #[test]
    fn test_timeout_flag_reaches_config() {
        let cli = Cli::try_parse_from([
            "openwebui-reconcile",
            "--endpoint",
            "http://localhost:8080",
            "--token",
            "secret",
            "--timeout-secs",
            "5",
            "read",
            "user",
            "u-1",
        ])
        .unwrap();
        let config = cli.client_config().unwrap();
        assert_eq!(config.timeout, std::time::Duration::from_secs(5));
        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_plan_needs_no_connection_settings() {
        let cli = Cli::try_parse_from(["openwebui-reconcile", "plan", "model", "model.json"])
            .unwrap();
        assert!(matches!(cli.command, Command::Plan { kind: Kind::Model, .. }));
    }

    #[test]
    fn test_missing_token_reported() {
        let cli = Cli::try_parse_from([
            "openwebui-reconcile",
            "--endpoint",
            "http://localhost:8080",
            "--token",
            "",
            "list",
            "group",
        ])
        .unwrap();
        assert_eq!(cli.client_config(), Err(ConfigError::MissingToken));
    }
}
