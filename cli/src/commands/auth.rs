//! AUTH command - OAuth credential exchange.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use evernote_client::Client;

use super::{HumanReadable, output};

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthAction,
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Request temporary credentials and print the authorization URL
    Request,

    /// Exchange an approved temporary token for an access token
    Exchange {
        /// Temporary token from the request step
        token: String,

        /// Temporary token secret from the request step
        secret: String,

        /// Verifier delivered to the callback after authorization
        #[arg(long)]
        verifier: String,
    },
}

/// Response from the request step.
#[derive(Debug, Serialize)]
pub struct RequestResponse {
    pub token: String,
    pub secret: String,
    pub authorize_url: String,
}

/// Response from the exchange step.
#[derive(Debug, Serialize)]
pub struct ExchangeResponse {
    pub token: String,
    pub secret: String,
}

impl HumanReadable for RequestResponse {
    fn print_human(&self) {
        println!("{}", "Temporary credentials issued!".green().bold());
        println!();
        println!("  {} {}", "Token:".cyan(), self.token);
        println!("  {} {}", "Secret:".cyan(), self.secret);
        println!();
        println!("  {} {}", "Authorize at:".yellow(), self.authorize_url);
    }
}

impl HumanReadable for ExchangeResponse {
    fn print_human(&self) {
        println!("{}", "Access token granted!".green().bold());
        println!();
        println!("  {} {}", "Token:".cyan(), self.token);
        println!("  {} {}", "Secret:".cyan(), self.secret);
        println!();
        println!(
            "  {}",
            "Export EVERNOTE_TOKEN to use it with the other commands".dimmed()
        );
    }
}

/// Execute the auth command.
pub async fn execute(client: &Client, human: bool, args: AuthArgs) -> Result<()> {
    match args.action {
        AuthAction::Request => {
            let credentials = client.request_temporary_credentials().await?;
            let response = RequestResponse {
                token: credentials.token,
                secret: credentials.secret,
                authorize_url: credentials.authorize_url,
            };
            output(&response, human)
        }

        AuthAction::Exchange {
            token,
            secret,
            verifier,
        } => {
            let credentials = client
                .exchange_access_token(&token, &secret, &verifier)
                .await?;
            let response = ExchangeResponse {
                token: credentials.token,
                secret: credentials.secret,
            };
            output(&response, human)
        }
    }
}
