//! Integration tests for the HTTP binding, against a local mock service.

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use evernote_client::{Client, ClientConfig, ClientError, NoteSearchOptions};
use evernote_core::types::{NotebookGuid, SharedNotebook, SharedNotebookPrivilege};

const TOKEN: &str = "access-token";

fn client_for(server: &MockServer) -> Client {
    Client::new(ClientConfig {
        sandbox: true,
        consumer_key: "key".to_string(),
        consumer_secret: "consumer-secret".to_string(),
        callback_url: "https://example.com/callback".to_string(),
        service_url: Some(server.uri()),
    })
}

#[tokio::test]
async fn temporary_credentials_use_plaintext_signature() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oauth"))
        .and(query_param("oauth_signature_method", "PLAINTEXT"))
        .and(query_param("oauth_signature", "consumer-secret&"))
        .and(query_param("oauth_callback", "https://example.com/callback"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "oauth_token=tmp-token&oauth_token_secret=tmp-secret&oauth_callback_confirmed=true",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = client_for(&server)
        .request_temporary_credentials()
        .await
        .unwrap();

    assert_eq!(credentials.token, "tmp-token");
    assert_eq!(credentials.secret, "tmp-secret");
    assert_eq!(
        credentials.authorize_url,
        format!("{}/OAuth.action?oauth_token=tmp-token", server.uri())
    );
}

#[tokio::test]
async fn access_token_exchange_signs_with_both_secrets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oauth"))
        .and(query_param("oauth_token", "tmp-token"))
        .and(query_param("oauth_verifier", "verifier-code"))
        .and(query_param("oauth_signature", "consumer-secret&tmp-secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("oauth_token=permanent-token&oauth_token_secret=permanent-secret"),
        )
        .mount(&server)
        .await;

    let credentials = client_for(&server)
        .exchange_access_token("tmp-token", "tmp-secret", "verifier-code")
        .await
        .unwrap();

    assert_eq!(credentials.token, "permanent-token");
    assert_eq!(credentials.secret, "permanent-secret");
}

#[tokio::test]
async fn list_notebooks_decodes_the_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notebooks"))
        .and(header("authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notebooks": [
                {
                    "guid": "5f0b6f9e-4a37-4f2e-9d6a-2c8f1f6e0a11",
                    "name": "Field Notes",
                    "default_notebook": true
                },
                {
                    "guid": "9a3d2c1b-0e5f-4d6a-8b7c-1f2e3d4c5b6a",
                    "name": "Trips"
                }
            ]
        })))
        .mount(&server)
        .await;

    let notebooks = client_for(&server).list_notebooks(TOKEN).await.unwrap();

    assert_eq!(notebooks.len(), 2);
    assert_eq!(notebooks[0].name, "Field Notes");
    assert!(notebooks[0].default_notebook);
    assert!(!notebooks[1].default_notebook);
}

#[tokio::test]
async fn service_failures_surface_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notebooks"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "no such account" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_notebooks(TOKEN).await.unwrap_err();

    match err {
        ClientError::Service { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "no such account");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn create_notebook_posts_the_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notebooks"))
        .and(header("authorization", "Bearer access-token"))
        .and(body_string_contains("\"name\":\"Trip\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "guid": "5f0b6f9e-4a37-4f2e-9d6a-2c8f1f6e0a11",
            "name": "Trip"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let notebook = client_for(&server)
        .create_notebook(TOKEN, "Trip")
        .await
        .unwrap();

    assert_eq!(notebook.name, "Trip");
}

#[tokio::test]
async fn share_notebook_defaults_to_full_access() {
    let server = MockServer::start().await;
    let guid: NotebookGuid = "5f0b6f9e-4a37-4f2e-9d6a-2c8f1f6e0a11".parse().unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/notebooks/{}/share", guid)))
        .and(body_string_contains("FULL_ACCESS"))
        .and(body_string_contains("friend@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notebook_guid": guid,
            "email": "friend@example.com",
            "privilege": "FULL_ACCESS",
            "share_key": "share-key",
            "shard_id": "s1"
        })))
        .mount(&server)
        .await;

    let shared = client_for(&server)
        .share_notebook(TOKEN, guid, "friend@example.com", None)
        .await
        .unwrap();

    assert_eq!(shared.privilege, SharedNotebookPrivilege::FullAccess);
    assert_eq!(shared.share_key.as_deref(), Some("share-key"));
}

#[tokio::test]
async fn shared_notebook_handshake_goes_through_the_shard() {
    let server = MockServer::start().await;
    let guid: NotebookGuid = "5f0b6f9e-4a37-4f2e-9d6a-2c8f1f6e0a11".parse().unwrap();
    let descriptor = SharedNotebook {
        id: None,
        notebook_guid: guid,
        email: "friend@example.com".to_string(),
        privilege: SharedNotebookPrivilege::default(),
        share_key: Some("share-key".to_string()),
        shard_id: Some("s1".to_string()),
        created: None,
    };

    Mock::given(method("POST"))
        .and(path("/shard/s1/notestore/authenticate"))
        .and(body_string_contains("share-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "auth_token": "share-token" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shard/s1/notestore/shared"))
        .and(query_param("share_token", "share-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "notebook_guid": guid,
            "email": "friend@example.com",
            "privilege": "READ_NOTEBOOK"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let auth = client
        .authenticate_to_shared_notebook(TOKEN, &descriptor)
        .await
        .unwrap();
    assert_eq!(auth.auth_token, "share-token");

    let shared = client
        .get_shared_notebook_by_auth(TOKEN, &auth.auth_token, &descriptor)
        .await
        .unwrap();
    assert_eq!(shared.privilege, SharedNotebookPrivilege::ReadNotebook);
}

#[tokio::test]
async fn find_notes_sends_the_default_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(query_param("offset", "0"))
        .and(query_param("max_results", "50"))
        .and(query_param("ascending", "false"))
        .and(query_param("keywords", "receipt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_notes": 1,
            "start_index": 0,
            "notes": [
                {
                    "guid": "0d9e8f7a-6b5c-4d3e-2f1a-0b9c8d7e6f5a",
                    "title": "Hotel receipt",
                    "largest_resource_mime": "image/png",
                    "largest_resource_size": 512
                }
            ]
        })))
        .mount(&server)
        .await;

    let options = NoteSearchOptions {
        keywords: Some("receipt".to_string()),
        ..NoteSearchOptions::default()
    };
    let page = client_for(&server)
        .find_notes_metadata(TOKEN, None, options)
        .await
        .unwrap();

    assert_eq!(page.total_notes, 1);
    assert_eq!(page.notes[0].title.as_deref(), Some("Hotel receipt"));
    assert_eq!(page.notes[0].largest_resource_size, Some(512));
}

#[tokio::test]
async fn create_note_posts_document_and_hashed_resource() {
    let server = MockServer::start().await;
    let guid: NotebookGuid = "5f0b6f9e-4a37-4f2e-9d6a-2c8f1f6e0a11".parse().unwrap();

    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(body_string_contains("en-media"))
        .and(body_string_contains("5d41402abc4b2a76b9719d911017c592"))
        .and(body_string_contains("aGVsbG8="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "guid": "0d9e8f7a-6b5c-4d3e-2f1a-0b9c8d7e6f5a",
            "title": "Trip",
            "notebook_guid": guid
        })))
        .expect(1)
        .mount(&server)
        .await;

    let note = client_for(&server)
        .create_note(
            TOKEN,
            guid,
            "Trip",
            Some("<div>day one</div>"),
            Some("data:image/png;base64,aGVsbG8="),
        )
        .await
        .unwrap();

    assert_eq!(note.title, "Trip");
}

#[tokio::test]
async fn thumbnails_come_back_as_raw_bytes() {
    let server = MockServer::start().await;
    let guid: evernote_core::types::NoteGuid =
        "0d9e8f7a-6b5c-4d3e-2f1a-0b9c8d7e6f5a".parse().unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/shard/s1/thm/note/{}", guid)))
        .and(body_string_contains("auth=access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .mount(&server)
        .await;

    let bytes = client_for(&server)
        .fetch_thumbnail(TOKEN, guid, "s1")
        .await
        .unwrap();

    assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
}
