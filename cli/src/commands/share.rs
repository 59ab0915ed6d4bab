//! SHARE command - Notebook sharing and the shared-notebook handshake.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use evernote_client::Client;
use evernote_core::types::{
    NotebookGuid, SharedNotebook, SharedNotebookAuth, SharedNotebookPrivilege,
};

use super::{HumanReadable, format_timestamp_opt, output};

/// Arguments for the share command.
#[derive(Args)]
pub struct ShareArgs {
    #[command(subcommand)]
    pub action: ShareAction,
}

#[derive(Subcommand)]
pub enum ShareAction {
    /// Share one of the account's notebooks with another user
    Grant {
        /// Notebook to share
        notebook: NotebookGuid,

        /// Invitee email address
        email: String,

        /// Access level (READ_NOTEBOOK, MODIFY_NOTEBOOK_PLUS_ACTIVITY,
        /// READ_NOTEBOOK_PLUS_ACTIVITY, GROUP, FULL_ACCESS,
        /// BUSINESS_FULL_ACCESS; defaults to FULL_ACCESS)
        #[arg(long)]
        access: Option<SharedNotebookPrivilege>,
    },

    /// Authenticate to a notebook shared with this account
    Authenticate {
        /// Notebook the share belongs to
        notebook: NotebookGuid,

        /// Share key from the shared-notebook descriptor
        #[arg(long)]
        share_key: String,

        /// Shard id of the sharing account
        #[arg(long)]
        shard: String,
    },

    /// Fetch the shared-notebook descriptor with a share token
    Get {
        /// Notebook the share belongs to
        notebook: NotebookGuid,

        /// Share token from the authenticate step
        #[arg(long)]
        share_token: String,

        /// Shard id of the sharing account
        #[arg(long)]
        shard: String,
    },
}

/// A share grant returned from grant or get.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ShareResponse(pub SharedNotebook);

/// Result of the authenticate step.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct AuthenticateResponse(pub SharedNotebookAuth);

impl HumanReadable for ShareResponse {
    fn print_human(&self) {
        println!("{}", "Notebook shared!".green().bold());
        println!();
        println!("  {} {}", "Notebook:".cyan(), self.0.notebook_guid);
        println!("  {} {}", "Invitee:".cyan(), self.0.email);
        println!("  {} {}", "Access:".cyan(), self.0.privilege);
        if let Some(share_key) = &self.0.share_key {
            println!("  {} {}", "Share key:".cyan(), share_key);
        }
        if let Some(shard_id) = &self.0.shard_id {
            println!("  {} {}", "Shard:".cyan(), shard_id);
        }
        println!(
            "  {} {}",
            "Granted:".cyan(),
            format_timestamp_opt(&self.0.created)
        );
    }
}

impl HumanReadable for AuthenticateResponse {
    fn print_human(&self) {
        println!("{}", "Authenticated to shared notebook!".green().bold());
        println!();
        println!("  {} {}", "Share token:".cyan(), self.0.auth_token);
        if let Some(expiration) = &self.0.expiration {
            println!("  {} {}", "Expires:".cyan(), super::format_timestamp(expiration));
        }
    }
}

/// Build the descriptor the shared-notebook operations take.
fn descriptor(notebook: NotebookGuid, share_key: Option<String>, shard: String) -> SharedNotebook {
    SharedNotebook {
        id: None,
        notebook_guid: notebook,
        email: String::new(),
        privilege: SharedNotebookPrivilege::default(),
        share_key,
        shard_id: Some(shard),
        created: None,
    }
}

/// Execute the share command.
pub async fn execute(client: &Client, token: &str, human: bool, args: ShareArgs) -> Result<()> {
    match args.action {
        ShareAction::Grant {
            notebook,
            email,
            access,
        } => {
            let shared = client.share_notebook(token, notebook, &email, access).await?;
            output(&ShareResponse(shared), human)
        }

        ShareAction::Authenticate {
            notebook,
            share_key,
            shard,
        } => {
            let descriptor = descriptor(notebook, Some(share_key), shard);
            let auth = client
                .authenticate_to_shared_notebook(token, &descriptor)
                .await?;
            output(&AuthenticateResponse(auth), human)
        }

        ShareAction::Get {
            notebook,
            share_token,
            shard,
        } => {
            let descriptor = descriptor(notebook, None, shard);
            let shared = client
                .get_shared_notebook_by_auth(token, &share_token, &descriptor)
                .await?;
            output(&ShareResponse(shared), human)
        }
    }
}
