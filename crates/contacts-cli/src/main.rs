//! `contacts` — command-line client for the contacts server.
//!
//! # Usage
//!
//! ```text
//! contacts --url http://localhost:8080 list
//! contacts add --name Ann --email ann@x.com --phone "555 0100"
//! contacts edit 1 --email ann@y.com
//! contacts search ann
//! ```

mod client;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::ApiClient;
use contacts_core::contact::{Contact, ContactId, ContactInput};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "contacts", about = "Command-line client for the contacts server")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the contacts server (default: http://localhost:8080).
  #[arg(long, env = "CONTACTS_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every contact.
  List,
  /// Show one contact in full.
  Show { id: ContactId },
  /// Create a contact.
  Add {
    #[arg(long)]
    name:    String,
    #[arg(long)]
    email:   String,
    #[arg(long)]
    phone:   String,
    #[arg(long)]
    address: Option<String>,
  },
  /// Change some fields of a contact; the rest keep their current values.
  Edit {
    id:      ContactId,
    #[arg(long)]
    name:    Option<String>,
    #[arg(long)]
    email:   Option<String>,
    #[arg(long)]
    phone:   Option<String>,
    /// An empty string clears the address.
    #[arg(long)]
    address: Option<String>,
  },
  /// Delete a contact.
  Rm { id: ContactId },
  /// Case-insensitive search over name, email and phone.
  Search { term: String },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| Some(file_cfg.url).filter(|u| !u.is_empty()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());

  let client = ApiClient::new(base_url)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::List => print_table(&client.list().await?),
    Command::Show { id } => print_detail(&client.get(id).await?),
    Command::Add { name, email, phone, address } => {
      let created = client
        .create(&ContactInput { name, email, phone, address })
        .await?;
      println!("created contact {}", created.id);
      print_detail(&created);
    }
    Command::Edit { id, name, email, phone, address } => {
      let current = client.get(id).await?;
      let input = ContactInput {
        name:    name.unwrap_or(current.name),
        email:   email.unwrap_or(current.email),
        phone:   phone.unwrap_or(current.phone),
        address: address.or(current.address),
      };
      let updated = client.update(id, &input).await?;
      println!("updated contact {id}");
      print_detail(&updated);
    }
    Command::Rm { id } => {
      client.delete(id).await?;
      println!("deleted contact {id}");
    }
    Command::Search { term } => print_table(&client.search(&term).await?),
  }
  Ok(())
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn print_table(contacts: &[Contact]) {
  if contacts.is_empty() {
    println!("no contacts");
    return;
  }
  println!("{:>5}  {:<24} {:<32} PHONE", "ID", "NAME", "EMAIL");
  for c in contacts {
    println!("{:>5}  {:<24} {:<32} {}", c.id, c.name, c.email, c.phone);
  }
}

fn print_detail(c: &Contact) {
  println!("id:       {}", c.id);
  println!("name:     {}", c.name);
  println!("email:    {}", c.email);
  println!("phone:    {}", c.phone);
  println!("address:  {}", c.address.as_deref().unwrap_or("-"));
  println!("created:  {}", c.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
  println!("updated:  {}", c.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn edit_parses_partial_flags() {
    let args = Args::try_parse_from(["contacts", "edit", "4", "--email", "a@b.co"]).unwrap();
    match args.command {
      Command::Edit { id, name, email, .. } => {
        assert_eq!(id, 4);
        assert!(name.is_none());
        assert_eq!(email.as_deref(), Some("a@b.co"));
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn add_requires_phone() {
    let missing = Args::try_parse_from(["contacts", "add", "--name", "Ann", "--email", "ann@x.com"]);
    assert!(missing.is_err());

    let args = Args::try_parse_from([
      "contacts", "add", "--name", "Ann", "--email", "ann@x.com", "--phone", "555 0100",
    ])
    .unwrap();
    match args.command {
      Command::Add { phone, address, .. } => {
        assert_eq!(phone, "555 0100");
        assert!(address.is_none());
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn config_file_url_parses() {
    let cfg: ConfigFile = toml::from_str(r#"url = "http://example:9000""#).unwrap();
    assert_eq!(cfg.url, "http://example:9000");
  }
}
