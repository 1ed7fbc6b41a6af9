//! Catalog CLI
//!
//! Seeds the example catalog from a JSON fixture and pages through it, or
//! registers a user. Results are printed as JSON.

use clap::{Parser, Subcommand};
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{NewUser, Role};
use eyre::Result;
use pagination::PageQuery;
use std::path::PathBuf;
use tracing::info;

mod commands;
mod config;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "catalog")]
#[command(about = "Browse example fixtures and register users against in-memory storage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a fixture and print one page of it
    List {
        /// JSON array of `{ "name": ..., "description": ... }` objects
        #[arg(short, long)]
        fixture: PathBuf,

        /// Case-insensitive substring matched against the name
        #[arg(short, long)]
        search: Option<String>,

        /// Zero-based page index
        #[arg(long, allow_negative_numbers = true)]
        page: Option<i64>,

        /// Page size, clamped to the configured maximum
        #[arg(long, allow_negative_numbers = true)]
        size: Option<i64>,

        /// Sort key as `property[,direction]`; repeatable
        #[arg(long)]
        sort: Vec<String>,
    },

    /// Register a user and print the stored view
    Register {
        #[arg(long)]
        email: String,

        /// Falls back to CATALOG_PASSWORD when omitted
        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, default_value_t = Role::Guest)]
        role: Role,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let cli = Cli::parse();
    info!(app = %config.app_name, "Starting catalog");

    let output = match cli.command {
        Commands::List {
            fixture,
            search,
            page,
            size,
            sort,
        } => {
            let query = PageQuery { page, size, sort };
            let result = commands::list(&config, &fixture, search.as_deref(), query).await?;
            serde_json::to_string_pretty(&result)?
        }
        Commands::Register {
            email,
            password,
            first_name,
            last_name,
            phone,
            role,
        } => {
            let user = NewUser {
                email,
                password: commands::resolve_password(password)?,
                first_name,
                last_name,
                phone_number: phone,
                role,
            };
            let view = commands::register(&config, user).await?;
            serde_json::to_string_pretty(&view)?
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from([
            "catalog",
            "list",
            "--fixture",
            "rooms.json",
            "--page",
            "-1",
            "--sort",
            "name,desc",
            "--sort",
            "id",
        ])
        .unwrap();

        match cli.command {
            Commands::List {
                fixture,
                page,
                size,
                sort,
                search,
            } => {
                assert_eq!(fixture, PathBuf::from("rooms.json"));
                assert_eq!(page, Some(-1));
                assert_eq!(size, None);
                assert_eq!(sort, vec!["name,desc", "id"]);
                assert_eq!(search, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_role() {
        let cli = Cli::try_parse_from([
            "catalog",
            "register",
            "--email",
            "oak@pallet.town",
            "--first-name",
            "Samuel",
            "--last-name",
            "Oak",
            "--role",
            "admin",
        ])
        .unwrap();

        match cli.command {
            Commands::Register { role, password, .. } => {
                assert_eq!(role, Role::Admin);
                assert_eq!(password, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_defaults_to_guest() {
        let cli = Cli::try_parse_from([
            "catalog",
            "register",
            "--email",
            "ash@pallet.town",
            "--first-name",
            "Ash",
            "--last-name",
            "Ketchum",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Register {
                role: Role::Guest,
                ..
            }
        ));
    }
}
