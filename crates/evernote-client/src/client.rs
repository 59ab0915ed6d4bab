//! The service operations.
//!
//! Each operation validates its preconditions, builds one typed request,
//! dispatches it, and decodes the answer. Store operations authenticate with
//! the access token passed per call; shared-notebook operations go through
//! the sharing account's shard URL.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use evernote_core::content::{NoteDraft, build_note_content};
use evernote_core::types::{
    LinkedNotebook, Note, NoteGuid, NotePage, Notebook, NotebookGuid, SharedNotebook,
    SharedNotebookAuth, SharedNotebookPrivilege, User,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{send_bytes, send_json, send_text};
use crate::oauth::{self, AccessCredentials, TemporaryCredentials};

/// Evernote API client.
///
/// Construction is cheap and the client is `Clone`; the configuration is
/// immutable, so concurrent use needs no coordination.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
}

/// Search window and filter for [`Client::find_notes_metadata`].
#[derive(Debug, Clone)]
pub struct NoteSearchOptions {
    /// Offset to start the result window at.
    pub offset: u32,
    /// Words to filter the search.
    pub keywords: Option<String>,
    /// Return results in ascending order.
    pub ascending: bool,
    /// Maximum number of notes to return.
    pub max_results: u32,
}

impl Default for NoteSearchOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            keywords: None,
            ascending: false,
            max_results: 50,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct NameRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct ShareNotebookRequest<'a> {
    email: &'a str,
    privilege: SharedNotebookPrivilege,
}

#[derive(Serialize)]
struct AuthenticateSharedRequest<'a> {
    share_key: &'a str,
}

#[derive(Serialize)]
struct CreateNoteRequest<'a> {
    title: &'a str,
    notebook_guid: NotebookGuid,
    /// Assembled ENML document.
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<ResourcePayload>,
}

#[derive(Serialize)]
struct ResourcePayload {
    mime: String,
    /// Base64-encoded resource body.
    data: String,
    /// Lowercase hex MD5 of the decoded body.
    hash: String,
}

#[derive(Serialize)]
struct UpdateNoteRequest<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct NotebookList<T> {
    notebooks: Vec<T>,
}

/// Reject empty required string arguments before any request is built.
fn require<'a>(name: &'static str, value: &'a str) -> ClientResult<&'a str> {
    if value.is_empty() {
        Err(ClientError::Precondition(name))
    } else {
        Ok(value)
    }
}

impl Client {
    /// Create a client from an immutable configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// Note-store URL prefix for a shard.
    fn shard_url(&self, shard_id: &str) -> String {
        format!("{}/shard/{}", self.base_url(), shard_id)
    }

    fn oauth_params(&self, extra: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("oauth_consumer_key", self.config.consumer_key.clone()),
            ("oauth_signature_method", "PLAINTEXT".to_string()),
            ("oauth_timestamp", Utc::now().timestamp().to_string()),
            ("oauth_nonce", Uuid::new_v4().simple().to_string()),
        ];
        params.extend(extra);
        params
    }

    // ========================================================================
    // OAuth
    // ========================================================================

    /// Request temporary OAuth credentials and the authorization URL the
    /// user must visit to approve them.
    pub async fn request_temporary_credentials(&self) -> ClientResult<TemporaryCredentials> {
        require("consumer_key", &self.config.consumer_key)?;
        require("consumer_secret", &self.config.consumer_secret)?;
        require("callback_url", &self.config.callback_url)?;

        let base = self.base_url();
        tracing::debug!(host = %base, "requesting temporary credentials");

        let params = self.oauth_params(vec![
            ("oauth_callback", self.config.callback_url.clone()),
            (
                "oauth_signature",
                oauth::plaintext_signature(&self.config.consumer_secret, ""),
            ),
        ]);

        let body = send_text(self.http.get(format!("{}/oauth", base)).query(&params)).await?;
        let (token, secret) = oauth::parse_credentials(&body)?;
        let authorize_url = oauth::authorize_url(&base, &token);

        Ok(TemporaryCredentials {
            token,
            secret,
            authorize_url,
        })
    }

    /// Exchange an approved temporary token for permanent access credentials.
    pub async fn exchange_access_token(
        &self,
        token: &str,
        secret: &str,
        verifier: &str,
    ) -> ClientResult<AccessCredentials> {
        require("token", token)?;
        require("secret", secret)?;
        require("verifier", verifier)?;
        require("consumer_key", &self.config.consumer_key)?;

        let base = self.base_url();
        tracing::debug!(host = %base, "exchanging for access token");

        let params = self.oauth_params(vec![
            ("oauth_token", token.to_string()),
            ("oauth_verifier", verifier.to_string()),
            (
                "oauth_signature",
                oauth::plaintext_signature(&self.config.consumer_secret, secret),
            ),
        ]);

        let body = send_text(self.http.get(format!("{}/oauth", base)).query(&params)).await?;
        let (token, secret) = oauth::parse_credentials(&body)?;

        Ok(AccessCredentials { token, secret })
    }

    // ========================================================================
    // UserStore
    // ========================================================================

    /// Fetch the account profile for the token's user.
    pub async fn get_user(&self, token: &str) -> ClientResult<User> {
        require("token", token)?;

        let url = format!("{}/user", self.base_url());
        tracing::debug!(%url, "fetching current user");

        send_json(self.http.get(url).bearer_auth(token)).await
    }

    // ========================================================================
    // NoteStore: notebooks
    // ========================================================================

    /// List the account's own notebooks.
    pub async fn list_notebooks(&self, token: &str) -> ClientResult<Vec<Notebook>> {
        require("token", token)?;

        let url = format!("{}/notebooks", self.base_url());
        tracing::debug!(%url, "listing notebooks");

        let list: NotebookList<Notebook> = send_json(self.http.get(url).bearer_auth(token)).await?;
        Ok(list.notebooks)
    }

    /// List notebooks other accounts have shared with this one.
    pub async fn list_linked_notebooks(&self, token: &str) -> ClientResult<Vec<LinkedNotebook>> {
        require("token", token)?;

        let url = format!("{}/notebooks/linked", self.base_url());
        tracing::debug!(%url, "listing linked notebooks");

        let list: NotebookList<LinkedNotebook> =
            send_json(self.http.get(url).bearer_auth(token)).await?;
        Ok(list.notebooks)
    }

    /// List share grants on notebooks this account is sharing.
    pub async fn list_shared_notebooks(&self, token: &str) -> ClientResult<Vec<SharedNotebook>> {
        let url = format!("{}/notebooks/shared", self.base_url());
        tracing::debug!(%url, "listing shared notebooks");

        let list: NotebookList<SharedNotebook> =
            send_json(self.http.get(url).bearer_auth(token)).await?;
        Ok(list.notebooks)
    }

    /// Create a new notebook.
    pub async fn create_notebook(&self, token: &str, name: &str) -> ClientResult<Notebook> {
        require("token", token)?;
        require("name", name)?;

        let url = format!("{}/notebooks", self.base_url());
        tracing::debug!(%url, name, "creating notebook");

        send_json(
            self.http
                .post(url)
                .bearer_auth(token)
                .json(&NameRequest { name }),
        )
        .await
    }

    /// Rename an existing notebook.
    pub async fn update_notebook(
        &self,
        token: &str,
        guid: NotebookGuid,
        name: &str,
    ) -> ClientResult<Notebook> {
        require("token", token)?;
        require("name", name)?;

        let url = format!("{}/notebooks/{}", self.base_url(), guid);
        tracing::debug!(%url, name, "updating notebook");

        send_json(
            self.http
                .put(url)
                .bearer_auth(token)
                .json(&NameRequest { name }),
        )
        .await
    }

    // ========================================================================
    // NoteStore: sharing
    // ========================================================================

    /// Share one of the account's notebooks with another user by email.
    ///
    /// An omitted privilege defaults to
    /// [`SharedNotebookPrivilege::FullAccess`].
    pub async fn share_notebook(
        &self,
        token: &str,
        guid: NotebookGuid,
        email: &str,
        privilege: Option<SharedNotebookPrivilege>,
    ) -> ClientResult<SharedNotebook> {
        require("token", token)?;
        require("email", email)?;

        let privilege = privilege.unwrap_or_default();
        let url = format!("{}/notebooks/{}/share", self.base_url(), guid);
        tracing::debug!(%url, email, %privilege, "sharing notebook");

        send_json(
            self.http
                .post(url)
                .bearer_auth(token)
                .json(&ShareNotebookRequest { email, privilege }),
        )
        .await
    }

    /// Authenticate to a notebook another account has shared with this one.
    ///
    /// The descriptor must carry the share key and the sharing account's
    /// shard id. The returned share token authenticates
    /// [`Client::get_shared_notebook_by_auth`].
    pub async fn authenticate_to_shared_notebook(
        &self,
        token: &str,
        notebook: &SharedNotebook,
    ) -> ClientResult<SharedNotebookAuth> {
        require("token", token)?;
        let share_key = require("share_key", notebook.share_key.as_deref().unwrap_or(""))?;
        let shard_id = require("shard_id", notebook.shard_id.as_deref().unwrap_or(""))?;

        let url = format!("{}/notestore/authenticate", self.shard_url(shard_id));
        tracing::debug!(%url, "authenticating to shared notebook");

        send_json(
            self.http
                .post(url)
                .bearer_auth(token)
                .json(&AuthenticateSharedRequest { share_key }),
        )
        .await
    }

    /// Fetch the shared-notebook descriptor with a share token obtained from
    /// [`Client::authenticate_to_shared_notebook`].
    pub async fn get_shared_notebook_by_auth(
        &self,
        token: &str,
        share_token: &str,
        notebook: &SharedNotebook,
    ) -> ClientResult<SharedNotebook> {
        require("token", token)?;
        require(
            "share_token (run authenticate_to_shared_notebook first)",
            share_token,
        )?;
        let shard_id = require("shard_id", notebook.shard_id.as_deref().unwrap_or(""))?;

        let url = format!("{}/notestore/shared", self.shard_url(shard_id));
        tracing::debug!(%url, "fetching shared notebook by auth");

        send_json(
            self.http
                .get(url)
                .bearer_auth(token)
                .query(&[("share_token", share_token)]),
        )
        .await
    }

    // ========================================================================
    // NoteStore: notes
    // ========================================================================

    /// Search note metadata, optionally restricted to one notebook.
    pub async fn find_notes_metadata(
        &self,
        token: &str,
        notebook: Option<NotebookGuid>,
        options: NoteSearchOptions,
    ) -> ClientResult<NotePage> {
        require("token", token)?;

        let mut params = vec![
            ("offset", options.offset.to_string()),
            ("max_results", options.max_results.to_string()),
            ("ascending", options.ascending.to_string()),
        ];
        if let Some(keywords) = &options.keywords {
            params.push(("keywords", keywords.clone()));
        }
        if let Some(notebook) = notebook {
            params.push(("notebook", notebook.to_string()));
        }

        let url = format!("{}/notes", self.base_url());
        tracing::debug!(%url, "searching note metadata");

        send_json(self.http.get(url).bearer_auth(token).query(&params)).await
    }

    /// Create a note, assembling its content document and optional binary
    /// attachment from the body fragment and data-URI image.
    pub async fn create_note(
        &self,
        token: &str,
        notebook: NotebookGuid,
        title: &str,
        body_fragment: Option<&str>,
        attachment: Option<&str>,
    ) -> ClientResult<Note> {
        require("token", token)?;
        require("title", title)?;

        let draft = NoteDraft {
            title: title.to_string(),
            notebook,
            body_fragment: body_fragment.map(str::to_string),
            attachment: attachment.map(str::to_string),
        };
        let content = build_note_content(&draft)?;

        let resource = content.resource.map(|r| ResourcePayload {
            hash: r.hash_hex(),
            data: BASE64.encode(&r.body),
            mime: r.mime,
        });

        let url = format!("{}/notes", self.base_url());
        tracing::debug!(%url, title, has_attachment = resource.is_some(), "creating note");

        send_json(
            self.http
                .post(url)
                .bearer_auth(token)
                .json(&CreateNoteRequest {
                    title,
                    notebook_guid: notebook,
                    content: content.document,
                    resource,
                }),
        )
        .await
    }

    /// Rename an existing note.
    pub async fn update_note(
        &self,
        token: &str,
        guid: NoteGuid,
        title: &str,
    ) -> ClientResult<Note> {
        require("token", token)?;
        require("title", title)?;

        let url = format!("{}/notes/{}", self.base_url(), guid);
        tracing::debug!(%url, title, "updating note");

        send_json(
            self.http
                .put(url)
                .bearer_auth(token)
                .json(&UpdateNoteRequest { title }),
        )
        .await
    }

    /// Fetch the thumbnail image for a note as raw bytes.
    pub async fn fetch_thumbnail(
        &self,
        token: &str,
        guid: NoteGuid,
        shard_id: &str,
    ) -> ClientResult<Vec<u8>> {
        require("token", token)?;
        require("shard_id", shard_id)?;

        let url = format!("{}/thm/note/{}", self.shard_url(shard_id), guid);
        tracing::debug!(%url, "fetching thumbnail");

        send_bytes(self.http.post(url).form(&[("auth", token)])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Precondition failures must surface before anything touches the
    // network; the unroutable service URL would fail any dispatched request.
    fn test_client() -> Client {
        Client::new(ClientConfig {
            sandbox: true,
            consumer_key: "key".to_string(),
            consumer_secret: "consumer-secret".to_string(),
            callback_url: "https://example.com/callback".to_string(),
            service_url: Some("http://127.0.0.1:1".to_string()),
        })
    }

    fn descriptor(share_key: Option<&str>, shard_id: Option<&str>) -> SharedNotebook {
        SharedNotebook {
            id: None,
            notebook_guid: NotebookGuid::new(),
            email: "friend@example.com".to_string(),
            privilege: SharedNotebookPrivilege::default(),
            share_key: share_key.map(str::to_string),
            shard_id: shard_id.map(str::to_string),
            created: None,
        }
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected_before_dispatch() {
        let client = test_client();

        let err = client.list_notebooks("").await.unwrap_err();
        assert!(matches!(err, ClientError::Precondition("token")));

        let err = client.get_user("").await.unwrap_err();
        assert!(matches!(err, ClientError::Precondition("token")));

        let err = client
            .find_notes_metadata("", None, NoteSearchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("token")));
    }

    #[tokio::test]
    async fn test_empty_name_and_title_are_rejected() {
        let client = test_client();

        let err = client.create_notebook("access-token", "").await.unwrap_err();
        assert!(matches!(err, ClientError::Precondition("name")));

        let err = client
            .update_notebook("access-token", NotebookGuid::new(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("name")));

        let err = client
            .create_note("access-token", NotebookGuid::new(), "", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("title")));

        let err = client
            .update_note("access-token", NoteGuid::new(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("title")));
    }

    #[tokio::test]
    async fn test_oauth_preconditions() {
        let client = Client::new(ClientConfig {
            service_url: Some("http://127.0.0.1:1".to_string()),
            ..ClientConfig::default()
        });

        let err = client.request_temporary_credentials().await.unwrap_err();
        assert!(matches!(err, ClientError::Precondition("consumer_key")));

        let err = test_client()
            .exchange_access_token("tmp-token", "tmp-secret", "")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("verifier")));
    }

    #[tokio::test]
    async fn test_share_preconditions() {
        let client = test_client();

        let err = client
            .share_notebook("access-token", NotebookGuid::new(), "", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("email")));

        let err = client
            .authenticate_to_shared_notebook("access-token", &descriptor(None, Some("s1")))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("share_key")));

        let err = client
            .authenticate_to_shared_notebook("access-token", &descriptor(Some("sk"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("shard_id")));
    }

    #[tokio::test]
    async fn test_missing_share_token_names_the_handshake() {
        let client = test_client();

        let err = client
            .get_shared_notebook_by_auth("access-token", "", &descriptor(Some("sk"), Some("s1")))
            .await
            .unwrap_err();

        match err {
            ClientError::Precondition(name) => {
                assert!(name.contains("authenticate_to_shared_notebook"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_attachment_is_rejected_before_dispatch() {
        let client = test_client();

        let err = client
            .create_note(
                "access-token",
                NotebookGuid::new(),
                "Trip",
                None,
                Some("not-a-data-uri"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Content(_)));
    }

    #[tokio::test]
    async fn test_empty_shard_is_rejected_for_thumbnails() {
        let client = test_client();

        let err = client
            .fetch_thumbnail("access-token", NoteGuid::new(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition("shard_id")));
    }
}
