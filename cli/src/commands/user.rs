//! USER command - Show the current account profile.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use evernote_client::Client;
use evernote_core::types::User;

use super::{HumanReadable, output};

/// Arguments for the user command.
#[derive(Args)]
pub struct UserArgs {}

impl HumanReadable for User {
    fn print_human(&self) {
        println!("{}", "Account Profile".green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Username:".cyan(), self.username);
        if let Some(name) = &self.name {
            println!("  {} {}", "Name:".cyan(), name);
        }
        if let Some(email) = &self.email {
            println!("  {} {}", "Email:".cyan(), email);
        }
        println!("  {} {}", "Shard:".cyan(), self.shard_id);
    }
}

/// Execute the user command.
pub async fn execute(client: &Client, token: &str, human: bool, _args: UserArgs) -> Result<()> {
    let user = client.get_user(token).await?;
    output(&user, human)
}
