//! THUMBNAIL command - Fetch a note's thumbnail image.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use evernote_client::Client;
use evernote_core::types::NoteGuid;

/// Arguments for the thumbnail command.
#[derive(Args)]
pub struct ThumbnailArgs {
    /// Note to fetch the thumbnail for
    pub note: NoteGuid,

    /// Shard id of the note's account
    pub shard: String,

    /// Write the image to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the thumbnail command.
pub async fn execute(client: &Client, token: &str, args: ThumbnailArgs) -> Result<()> {
    let bytes = client.fetch_thumbnail(token, args.note, &args.shard).await?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            std::io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}
