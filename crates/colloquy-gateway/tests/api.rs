// SPDX-FileCopyrightText: 2026 Colloquy Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level API tests driven through tower's `oneshot`, with a wiremock
//! Anthropic endpoint behind the author-reply route.
//!
//! Fixtures not under test are seeded through the storage layer directly;
//! the operation each test exercises goes through HTTP.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use colloquy_agent::ReplyEngine;
use colloquy_anthropic::AnthropicClient;
use colloquy_config::model::{AnthropicConfig, ContextConfig};
use colloquy_context::ContextAssembler;
use colloquy_core::{Club, Sender, TokenUsage, User};
use colloquy_cost::{Feature, UsageEntry, UsageLedger, UsageRecorder};
use colloquy_gateway::{AppState, router};
use colloquy_storage::Database;
use colloquy_storage::queries::{clubs, messages, users};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    db: Database,
    ledger: UsageLedger,
    app: Router,
    server: MockServer,
    _recorder: UsageRecorder,
}

impl Harness {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let db = Database::open_in_memory().await.unwrap();
        let ledger = UsageLedger::new(db.clone());
        let (recorder, _task) = UsageRecorder::spawn(ledger.clone());

        let config = AnthropicConfig {
            api_key: Some("test-api-key".into()),
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 1024,
            api_version: "2023-06-01".into(),
            request_timeout_secs: 5,
        };
        let client = AnthropicClient::from_config(&config)
            .unwrap()
            .with_base_url(server.uri());
        let assembler = ContextAssembler::new(db.clone(), &ContextConfig::default());
        let engine = ReplyEngine::new(db.clone(), assembler, client, recorder.clone());
        let app = router(AppState::new(db.clone(), ledger.clone(), engine));

        Self {
            db,
            ledger,
            app,
            server,
            _recorder: recorder,
        }
    }

    /// One reader and their club on the catalog's "Frankenstein" row.
    async fn seed_club(&self) -> (User, Club) {
        let owner = users::create_user(&self.db, "Sarah").await.unwrap();
        let club = clubs::create_club(&self.db, "Gothic Circle", 1, owner.id)
            .await
            .unwrap();
        (owner, club)
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---- Health ----

#[tokio::test]
async fn health_reports_service_and_version() {
    let harness = Harness::new().await;
    let (status, body) = get(&harness.app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "colloquy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ---- Readers ----

#[tokio::test]
async fn create_get_and_rename_a_reader() {
    let harness = Harness::new().await;

    let (status, created) = post(&harness.app, "/api/users", json!({"name": "  Sarah  "})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Sarah");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = get(&harness.app, &format!("/api/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Sarah");

    let (status, renamed) = put(
        &harness.app,
        &format!("/api/users/{id}/name"),
        json!({"name": "Sadie"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Sadie");
}

#[tokio::test]
async fn blank_reader_names_are_rejected() {
    let harness = Harness::new().await;

    let (status, body) = post(&harness.app, "/api/users", json!({"name": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (owner, _club) = harness.seed_club().await;
    let (status, body) = put(
        &harness.app,
        &format!("/api/users/{}/name", owner.id),
        json!({"name": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");
}

#[tokio::test]
async fn missing_reader_is_a_404() {
    let harness = Harness::new().await;

    let (status, body) = get(&harness.app, "/api/users/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, _) = put(&harness.app, "/api/users/404/name", json!({"name": "X"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---- Catalog ----

#[tokio::test]
async fn catalog_lists_seeded_books_alphabetically() {
    let harness = Harness::new().await;

    let (status, body) = get(&harness.app, "/api/books").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Frankenstein", "Moby-Dick", "Pride and Prejudice"]);

    let id = body[0]["id"].as_i64().unwrap();
    let (status, book) = get(&harness.app, &format!("/api/books/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["author"], "Mary Shelley");
    assert_eq!(book["publication_year"], 1818);

    let (status, body) = get(&harness.app, "/api/books/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found");
}

// ---- Clubs ----

#[tokio::test]
async fn create_club_and_list_for_owner() {
    let harness = Harness::new().await;
    let (_, owner) = post(&harness.app, "/api/users", json!({"name": "Sarah"})).await;
    let owner_id = owner["id"].as_i64().unwrap();

    let (status, club) = post(
        &harness.app,
        "/api/clubs",
        json!({"name": "Gothic Circle", "book_id": 1, "user_id": owner_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(club["name"], "Gothic Circle");
    assert_eq!(club["status"], "active");
    assert_eq!(club["invite_code"].as_str().unwrap().len(), 6);

    let (status, listed) = get(&harness.app, &format!("/api/clubs?user_id={owner_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], club["id"]);
    assert_eq!(listed[0]["book_title"], "Frankenstein");
    assert_eq!(listed[0]["book_author"], "Mary Shelley");
}

#[tokio::test]
async fn club_create_requires_a_name() {
    let harness = Harness::new().await;
    let (status, body) = post(
        &harness.app,
        "/api/clubs",
        json!({"name": "  ", "book_id": 1, "user_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: name, book_id, user_id");
}

#[tokio::test]
async fn listing_clubs_requires_user_id() {
    let harness = Harness::new().await;
    let (status, body) = get(&harness.app, "/api/clubs").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing user_id parameter");
}

#[tokio::test]
async fn join_by_invite_code_covers_the_outcomes() {
    let harness = Harness::new().await;
    let (_owner, club) = harness.seed_club().await;
    let mike = users::create_user(&harness.db, "Mike").await.unwrap();

    // Lowercase code with padding still resolves.
    let sloppy_code = format!(" {} ", club.invite_code.to_lowercase());
    let (status, joined) = post(
        &harness.app,
        "/api/clubs/join",
        json!({"invite_code": sloppy_code, "user_id": mike.id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(joined["id"], Value::String(club.id.clone()));
    assert_eq!(joined["book_title"], "Frankenstein");

    let (status, body) = post(
        &harness.app,
        "/api/clubs/join",
        json!({"invite_code": club.invite_code, "user_id": mike.id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "You are already a member of this club");

    let (status, body) = post(
        &harness.app,
        "/api/clubs/join",
        json!({"invite_code": "ZZZZZZ", "user_id": mike.id}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invalid invite code");

    // Fill the last three seats, then the next reader is turned away.
    for i in 0..3 {
        let user = users::create_user(&harness.db, &format!("Reader {i}"))
            .await
            .unwrap();
        let (status, _) = post(
            &harness.app,
            "/api/clubs/join",
            json!({"invite_code": club.invite_code, "user_id": user.id}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let sixth = users::create_user(&harness.db, "Latecomer").await.unwrap();
    let (status, body) = post(
        &harness.app,
        "/api/clubs/join",
        json!({"invite_code": club.invite_code, "user_id": sixth.id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "This club is full (max 5 members for MVP)");
}

#[tokio::test]
async fn club_details_hide_existence_from_outsiders() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;

    let (status, details) = get(
        &harness.app,
        &format!("/api/clubs/{}?user_id={}", club.id, owner.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["name"], "Gothic Circle");
    assert_eq!(details["book_title"], "Frankenstein");
    assert_eq!(details["genre"], "Gothic fiction");

    let outsider = users::create_user(&harness.db, "Outsider").await.unwrap();
    let (status, body) = get(
        &harness.app,
        &format!("/api/clubs/{}?user_id={}", club.id, outsider.id),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not a member of this club");

    // Unknown ids read the same as clubs you are not in.
    let (status, _) = get(
        &harness.app,
        &format!("/api/clubs/no-such-club?user_id={}", owner.id),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = get(&harness.app, &format!("/api/clubs/{}", club.id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing user_id parameter");
}

#[tokio::test]
async fn members_roster_in_join_order() {
    let harness = Harness::new().await;
    let (_owner, club) = harness.seed_club().await;
    let mike = users::create_user(&harness.db, "Mike").await.unwrap();
    clubs::join_by_invite_code(&harness.db, &club.invite_code, mike.id)
        .await
        .unwrap();

    let (status, body) = get(&harness.app, &format!("/api/clubs/{}/members", club.id)).await;
    assert_eq!(status, StatusCode::OK);
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["name"], "Sarah");
    assert_eq!(members[0]["role"], "owner");
    assert_eq!(members[1]["name"], "Mike");
    assert_eq!(members[1]["role"], "member");
}

// ---- Conversation log ----

#[tokio::test]
async fn post_and_poll_club_messages() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;

    let (status, first) = post(
        &harness.app,
        &format!("/api/messages/club/{}", club.id),
        json!({"body": "First!", "sender": {"kind": "human", "user_id": owner.id}}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let first_id = first["id"].as_i64().unwrap();

    let (status, log) = get(&harness.app, &format!("/api/messages/club/{}", club.id)).await;
    assert_eq!(status, StatusCode::OK);
    let log = log.as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["body"], "First!");
    assert_eq!(log[0]["sender"]["kind"], "human");
    assert_eq!(log[0]["sender_name"], "Sarah");

    post(
        &harness.app,
        &format!("/api/messages/club/{}", club.id),
        json!({"body": "Second.", "sender": {"kind": "human", "user_id": owner.id}}),
    )
    .await;

    let (status, newer) = get(
        &harness.app,
        &format!("/api/messages/club/{}/since/{first_id}", club.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let newer = newer.as_array().unwrap();
    assert_eq!(newer.len(), 1);
    assert_eq!(newer[0]["body"], "Second.");
}

#[tokio::test]
async fn message_body_must_be_nonblank() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;

    let (status, body) = post(
        &harness.app,
        &format!("/api/messages/club/{}", club.id),
        json!({"body": "  \n ", "sender": {"kind": "human", "user_id": owner.id}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message body is required");
}

#[tokio::test]
async fn posting_into_a_missing_club_is_a_404() {
    let harness = Harness::new().await;
    let (status, body) = post(
        &harness.app,
        "/api/messages/club/no-such-club",
        json!({"body": "Hello?", "sender": {"kind": "human", "user_id": 1}}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Club not found");
}

#[tokio::test]
async fn agent_messages_carry_their_persona() {
    let harness = Harness::new().await;
    let (_owner, club) = harness.seed_club().await;

    let (status, _) = post(
        &harness.app,
        &format!("/api/messages/club/{}", club.id),
        json!({"body": "A note from your author.", "sender": {"kind": "agent", "persona_name": "Mary Shelley"}}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, log) = get(&harness.app, &format!("/api/messages/club/{}", club.id)).await;
    let entry = &log.as_array().unwrap()[0];
    assert_eq!(entry["sender"]["kind"], "agent");
    assert_eq!(entry["sender"]["persona_name"], "Mary Shelley");
    assert_eq!(entry["sender_name"], Value::Null);
}

#[tokio::test]
async fn delete_message_round_trip() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;
    let message = messages::insert_message(
        &harness.db,
        &club.id,
        &Sender::Human { user_id: owner.id },
        "Delete me",
        None,
    )
    .await
    .unwrap();

    let (status, body) = delete(&harness.app, &format!("/api/messages/{}", message.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = delete(&harness.app, &format!("/api/messages/{}", message.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Message not found");
}

// ---- Reading progress ----

#[tokio::test]
async fn record_and_read_progress() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;

    let (status, saved) = post(
        &harness.app,
        &format!("/api/reading-progress/club/{}", club.id),
        json!({"user_id": owner.id, "position": 40, "label": "Chapter 7"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["position"], 40);
    assert_eq!(saved["label"], "Chapter 7");

    let (status, rows) = get(
        &harness.app,
        &format!("/api/reading-progress/club/{}", club.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Sarah");
    assert_eq!(rows[0]["position"], 40);

    let (status, mine) = get(
        &harness.app,
        &format!("/api/reading-progress/club/{}/user/{}", club.id, owner.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["position"], 40);

    // A member who has not reported reads as position zero.
    let mike = users::create_user(&harness.db, "Mike").await.unwrap();
    let (status, theirs) = get(
        &harness.app,
        &format!("/api/reading-progress/club/{}/user/{}", club.id, mike.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(theirs, json!({"position": 0, "label": null}));
}

#[tokio::test]
async fn progress_position_is_bounded() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;

    for position in [-1, 101] {
        let (status, body) = post(
            &harness.app,
            &format!("/api/reading-progress/club/{}", club.id),
            json!({"user_id": owner.id, "position": position}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "position must be between 0 and 100");
    }
}

#[tokio::test]
async fn club_progress_sorts_furthest_first() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;
    let mike = users::create_user(&harness.db, "Mike").await.unwrap();
    clubs::join_by_invite_code(&harness.db, &club.invite_code, mike.id)
        .await
        .unwrap();

    for (user_id, position) in [(owner.id, 30), (mike.id, 70)] {
        post(
            &harness.app,
            &format!("/api/reading-progress/club/{}", club.id),
            json!({"user_id": user_id, "position": position}),
        )
        .await;
    }

    let (_, rows) = get(
        &harness.app,
        &format!("/api/reading-progress/club/{}", club.id),
    )
    .await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows[0]["name"], "Mike");
    assert_eq!(rows[0]["position"], 70);
    assert_eq!(rows[1]["name"], "Sarah");
}

// ---- Author reply ----

fn reply_body(text: &str, input_tokens: u32, output_tokens: u32) -> Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "model": "claude-sonnet-4-20250514",
        "stop_reason": "end_turn",
        "usage": {"input_tokens": input_tokens, "output_tokens": output_tokens}
    })
}

#[tokio::test]
async fn author_reply_endpoint_persists_a_message() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;
    messages::insert_message(
        &harness.db,
        &club.id,
        &Sender::Human { user_id: owner.id },
        "Why the framing letters?",
        None,
    )
    .await
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(
            "Walton mirrors Victor's ambition.",
            812,
            214,
        )))
        .mount(&harness.server)
        .await;

    let (status, reply) = post(
        &harness.app,
        &format!("/api/messages/club/{}/author-reply", club.id),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reply["sender"]["kind"], "agent");
    assert_eq!(reply["sender"]["persona_name"], "Mary Shelley");
    assert_eq!(reply["body"], "Walton mirrors Victor's ambition.");
    assert_eq!(reply["metadata"]["kind"], "completion");
    assert_eq!(reply["metadata"]["input_tokens"], 812);

    let (_, log) = get(&harness.app, &format!("/api/messages/club/{}", club.id)).await;
    assert_eq!(log.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn author_reply_for_missing_club_is_404() {
    let harness = Harness::new().await;
    let (status, body) = post(
        &harness.app,
        "/api/messages/club/no-such-club/author-reply",
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Club not found");

    let requests = harness.server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn provider_errors_surface_as_bad_gateway() {
    let harness = Harness::new().await;
    let (owner, club) = harness.seed_club().await;
    messages::insert_message(
        &harness.db,
        &club.id,
        &Sender::Human { user_id: owner.id },
        "Hello?",
        None,
    )
    .await
    .unwrap();

    // One transient retry, then the pipeline gives up.
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"type": "api_error", "message": "boom"}
        })))
        .expect(2)
        .mount(&harness.server)
        .await;

    let (status, body) = post(
        &harness.app,
        &format!("/api/messages/club/{}/author-reply", club.id),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to generate author reply");

    let (_, log) = get(&harness.app, &format!("/api/messages/club/{}", club.id)).await;
    assert_eq!(log.as_array().unwrap().len(), 1);
}

// ---- Admin usage ----

#[tokio::test]
async fn usage_report_starts_empty() {
    let harness = Harness::new().await;
    let (status, report) = get(&harness.app, "/api/admin/usage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totals"]["total_calls"], 0);
    assert_eq!(report["totals"]["total_cost_usd"], "$0.000000");
    assert!(report["by_feature"].as_array().unwrap().is_empty());
    assert!(report["daily"].as_array().unwrap().is_empty());
    assert!(report["recent"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn usage_report_aggregates_recorded_calls() {
    let harness = Harness::new().await;
    let (_owner, club) = harness.seed_club().await;

    for usage in [
        TokenUsage {
            input_tokens: 812,
            output_tokens: 214,
        },
        TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        },
    ] {
        harness
            .ledger
            .record(&UsageEntry {
                feature: Feature::AuthorResponse,
                club_id: Some(club.id.clone()),
                model: "claude-sonnet-4-20250514".into(),
                usage,
            })
            .await
            .unwrap();
    }

    let (status, report) = get(&harness.app, "/api/admin/usage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totals"]["total_calls"], 2);
    assert_eq!(report["totals"]["total_input_tokens"], 912);
    assert_eq!(report["totals"]["total_output_tokens"], 264);
    // 812*3k + 214*15k + 100*3k + 50*15k nanodollars.
    assert_eq!(report["totals"]["total_cost_nanos"], 6_696_000);
    assert_eq!(report["totals"]["total_cost_usd"], "$0.006696");

    let by_feature = report["by_feature"].as_array().unwrap();
    assert_eq!(by_feature.len(), 1);
    assert_eq!(by_feature[0]["feature"], "author_response");
    assert_eq!(by_feature[0]["calls"], 2);

    let daily = report["daily"].as_array().unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["calls"], 2);

    let recent = report["recent"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    for row in recent {
        assert_eq!(row["club_name"], "Gothic Circle");
    }
}
