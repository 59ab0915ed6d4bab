//! Note-content assembly.
//!
//! A note body is an ENML document: a fixed XML preamble, an optional
//! pre-formatted fragment, and an optional media reference pointing at a
//! binary resource by its MD5 content hash. [`build_note_content`] performs
//! the whole transform in one pass with no I/O, so it is safe to call from
//! any number of tasks concurrently.
//!
//! # Example
//!
//! ```
//! use evernote_core::content::{NoteDraft, build_note_content};
//! use evernote_core::types::NotebookGuid;
//!
//! let draft = NoteDraft {
//!     title: "Trip".to_string(),
//!     notebook: NotebookGuid::new(),
//!     body_fragment: None,
//!     attachment: Some("data:image/png;base64,aGVsbG8=".to_string()),
//! };
//!
//! let content = build_note_content(&draft).unwrap();
//! assert!(content.document.contains("hash=\"5d41402abc4b2a76b9719d911017c592\""));
//! assert_eq!(content.resource.unwrap().body, b"hello");
//! ```

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use thiserror::Error;

use crate::types::NotebookGuid;

const ENML_PREAMBLE: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
    "<!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">",
    "<en-note>",
);
const ENML_CLOSE: &str = "</en-note>";

/// Rejections from the content builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The attachment is not a `data:<mime>;base64,<payload>` URI.
    #[error("attachment is not a base64 data URI")]
    InvalidAttachmentFormat,
}

/// Input for a new note.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    /// Note title. Sent alongside the document, never embedded in it;
    /// emptiness is validated by the service client, not here.
    pub title: String,
    /// Notebook the note is created in.
    pub notebook: NotebookGuid,
    /// Pre-formatted ENML fragment inserted verbatim, without escaping or
    /// validation.
    pub body_fragment: Option<String>,
    /// Image attachment as a `data:<mime>;base64,<payload>` URI.
    pub attachment: Option<String>,
}

/// Binary attachment decoded from a draft, referenced from the document by
/// its content hash. Built at most once per draft and handed to the
/// note-creation call unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub mime: String,
    pub body: Vec<u8>,
    /// MD5 digest of `body`.
    pub hash: [u8; 16],
}

impl Resource {
    /// Lowercase hex rendering of the content hash.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

/// Assembled note body: the ENML document plus at most one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent {
    pub document: String,
    pub resource: Option<Resource>,
}

/// Assemble the ENML document and optional resource for a draft.
///
/// Fails with [`ContentError::InvalidAttachmentFormat`] when an attachment is
/// supplied but malformed; no partial output is produced in that case.
pub fn build_note_content(draft: &NoteDraft) -> Result<NoteContent, ContentError> {
    let resource = draft.attachment.as_deref().map(decode_attachment).transpose()?;

    let mut document = String::from(ENML_PREAMBLE);

    if let Some(fragment) = &draft.body_fragment {
        document.push_str(fragment);
    }

    if let Some(resource) = &resource {
        document.push_str(&format!(
            "<en-media type=\"{}\" hash=\"{}\" />",
            resource.mime,
            resource.hash_hex()
        ));
    }

    document.push_str(ENML_CLOSE);

    Ok(NoteContent { document, resource })
}

/// Parse a `data:<mime>;base64,<payload>` URI into a [`Resource`].
///
/// The MIME type is restricted to `[A-Za-z-+/]`, the payload must be a
/// non-empty single line, and the base64 decoding is strict.
fn decode_attachment(uri: &str) -> Result<Resource, ContentError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or(ContentError::InvalidAttachmentFormat)?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or(ContentError::InvalidAttachmentFormat)?;

    if mime.is_empty() || !mime.bytes().all(is_mime_char) {
        return Err(ContentError::InvalidAttachmentFormat);
    }
    if payload.is_empty() || payload.contains(['\n', '\r']) {
        return Err(ContentError::InvalidAttachmentFormat);
    }

    let body = BASE64
        .decode(payload)
        .map_err(|_| ContentError::InvalidAttachmentFormat)?;
    let hash = md5::compute(&body).0;

    Ok(Resource {
        mime: mime.to_string(),
        body,
        hash,
    })
}

const fn is_mime_char(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'-' || b == b'+' || b == b'/'
}
