//! CLI for pagelink.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pagelink_core::address::StaticAddresses;
use pagelink_core::config::{self, PagelinkConfig};
use std::path::PathBuf;

use commands::{run_render, run_resolve, run_token, run_url};

/// Top-level CLI for pagelink.
#[derive(Debug, Parser)]
#[command(name = "pagelink")]
#[command(about = "Resolve this server's base URL and fetch rendered pages", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/pagelink/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Addresses given on the command line; when empty, `addresses` from config is used.
#[derive(Debug, Clone, Default, Args)]
pub struct AddressArgs {
    /// Bound server address (repeatable, in preference order).
    #[arg(short = 'a', long = "address", value_name = "URL")]
    pub addresses: Vec<String>,
}

impl AddressArgs {
    pub fn source(&self, cfg: &PagelinkConfig) -> StaticAddresses {
        if self.addresses.is_empty() {
            cfg.address_source()
        } else {
            StaticAddresses(self.addresses.clone())
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the resolved base URL.
    Resolve {
        /// Require an https address (no http fallback).
        #[arg(long)]
        https: bool,
        /// Prefer the first address starting with this prefix.
        #[arg(long, value_name = "PREFIX", conflicts_with = "https")]
        prefer: Option<String>,
        #[command(flatten)]
        addresses: AddressArgs,
    },

    /// Print the absolute URL for a resource path.
    Url {
        /// Resource path, e.g. /emails/welcome.
        path: String,
        /// Prefer the first address starting with this prefix.
        #[arg(long, value_name = "PREFIX")]
        prefer: Option<String>,
        #[command(flatten)]
        addresses: AddressArgs,
    },

    /// Print the email token for a path.
    Token {
        /// Resource path the token is bound to.
        path: String,
        /// Salt to use instead of `hash_salt` from config.
        #[arg(long)]
        salt: Option<String>,
    },

    /// Fetch a rendered page and print its body.
    Render {
        /// Resource path or absolute http(s) URL.
        path: String,
        #[command(flatten)]
        addresses: AddressArgs,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve {
                https,
                prefer,
                addresses,
            } => run_resolve(&addresses.source(&cfg), https, prefer.as_deref())?,
            CliCommand::Url {
                path,
                prefer,
                addresses,
            } => run_url(&addresses.source(&cfg), &path, prefer.as_deref())?,
            CliCommand::Token { path, salt } => run_token(&cfg, &path, salt)?,
            CliCommand::Render { path, addresses } => {
                run_render(&cfg, addresses.source(&cfg), path).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
