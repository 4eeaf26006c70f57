mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, Kind, RemoteCommand};
use openwebui_reconcile::lifecycle::HttpProvider;
use openwebui_reconcile::model::{Group, Knowledge, Model, User};
use reconcile_framework::tracing::setup_tracing;
use reconcile_framework::{ManagedResource, Reconciler, ResourceStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let output = match &cli.command {
        Command::Plan { kind, file } => plan(*kind, file)?,
        Command::Remote(command) => {
            let provider = HttpProvider::connect(&cli.client_config()?)?;
            match command.kind() {
                Kind::Model => execute(&provider.models, command).await?,
                Kind::Knowledge => execute(&provider.knowledge, command).await?,
                Kind::Group => execute(&provider.groups, command).await?,
                Kind::User => execute(&provider.users, command).await?,
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Resolves a desired-state file offline.
fn plan(kind: Kind, file: &Path) -> Result<Value> {
    match kind {
        Kind::Model => resolve_file::<Model>(file),
        Kind::Knowledge => resolve_file::<Knowledge>(file),
        Kind::Group => resolve_file::<Group>(file),
        Kind::User => resolve_file::<User>(file),
    }
}

fn resolve_file<R>(file: &Path) -> Result<Value>
where
    R: ManagedResource + Serialize + DeserializeOwned,
{
    let effective = reconcile_framework::plan::<R>(load(file)?)?;
    Ok(serde_json::to_value(effective.get())?)
}

async fn execute<R, S>(reconciler: &Reconciler<R, S>, command: &RemoteCommand) -> Result<Value>
where
    R: ManagedResource + Serialize + DeserializeOwned,
    S: ResourceStore<R>,
{
    let value = match command {
        RemoteCommand::Create { file, .. } => {
            let created = reconciler.create(load(file)?).await?;
            serde_json::to_value(created)?
        }
        RemoteCommand::Read { id, .. } => serde_json::to_value(reconciler.read(id).await?)?,
        RemoteCommand::Update { id, file, .. } => {
            let updated = reconciler.update(id, load(file)?).await?;
            serde_json::to_value(updated)?
        }
        RemoteCommand::Delete { id, .. } => {
            reconciler.delete(id).await?;
            json!({ "deleted": id })
        }
        RemoteCommand::List { .. } => serde_json::to_value(reconciler.list().await?)?,
    };
    Ok(value)
}

fn load<R: DeserializeOwned>(file: &Path) -> Result<R> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", file.display()))
}
