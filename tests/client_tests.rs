mod common;

use reqwest::StatusCode;
use uuid::Uuid;

use airdrop_tracker::client::form::FormError;
use airdrop_tracker::client::{
    ClientError, FormState, Notification, ProjectBoard, ProjectForm, ProjectsClient,
};
use airdrop_tracker::models::{AirdropStatus, NewProject, ProjectPatch};

async fn connect() -> (common::TestApp, ProjectsClient) {
    let app = common::spawn_app().await;
    let client = ProjectsClient::new(app.base_url()).unwrap();
    (app, client)
}

fn named(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        ..Default::default()
    }
}

// ── ProjectsClient ──────────────────────────────────────────────

#[tokio::test]
async fn client_round_trip() {
    let (_app, client) = connect().await;

    let created = client.create(&named("Pyth")).await.unwrap();
    assert_eq!(client.get(created.id).await.unwrap(), created);

    let updated = client
        .update(
            created.id,
            &ProjectPatch {
                airdrop_status: Some(AirdropStatus::Airdropped),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.airdrop_status, AirdropStatus::Airdropped);
    assert_eq!(updated.created_at, created.created_at);

    assert_eq!(client.list().await.unwrap().len(), 1);
    client.delete(created.id).await.unwrap();
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_surfaces_api_errors() {
    let (_app, client) = connect().await;

    match client.get(Uuid::now_v7()).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Project not found");
        }
        other => panic!("expected not found, got {other:?}"),
    }

    match client.create(&named("")).await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status, StatusCode::BAD_REQUEST),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ── ProjectForm ─────────────────────────────────────────────────

#[tokio::test]
async fn form_create_success() {
    let (_app, client) = connect().await;

    let mut form = ProjectForm::create();
    let data = form.data_mut().unwrap();
    data.name = "Hyperliquid".to_string();
    data.airdrop_status = AirdropStatus::Scheduled;
    data.airdrop_date = "2026-01-15".to_string();

    let outcome = form.submit(&client).await.unwrap();
    assert_eq!(form.state(), &FormState::Success);
    assert!(outcome.close && outcome.refresh);
    assert_eq!(
        outcome.notification,
        Notification::Success("Project created successfully".to_string())
    );

    let stored = client.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Hyperliquid");
    assert_eq!(stored[0].airdrop_date.unwrap().to_string(), "2026-01-15");
}

#[tokio::test]
async fn form_failure_stays_open() {
    let (_app, client) = connect().await;

    let mut form = ProjectForm::create();
    form.data_mut().unwrap().wallet = "0xdead".to_string();

    let outcome = form.submit(&client).await.unwrap();
    assert!(matches!(form.state(), FormState::Failed(_)));
    assert!(!outcome.close);
    assert!(matches!(outcome.notification, Notification::Error(_)));
    assert_eq!(form.data().wallet, "0xdead");
    assert!(form.inputs_enabled());

    form.data_mut().unwrap().name = "Fixed".to_string();
    let outcome = form.submit(&client).await.unwrap();
    assert!(outcome.close);
}

#[tokio::test]
async fn form_edit_updates_existing_project() {
    let (_app, client) = connect().await;
    let project = client.create(&named("Aptos")).await.unwrap();

    let mut form = ProjectForm::edit(&project);
    form.data_mut().unwrap().email = "ops@aptos.dev".to_string();
    let outcome = form.submit(&client).await.unwrap();
    assert_eq!(
        outcome.notification,
        Notification::Success("Project updated successfully".to_string())
    );

    let stored = client.get(project.id).await.unwrap();
    assert_eq!(stored.email.as_deref(), Some("ops@aptos.dev"));
    assert_eq!(stored.name, "Aptos");
}

#[tokio::test]
async fn form_edit_of_deleted_project_fails() {
    let (_app, client) = connect().await;
    let project = client.create(&named("Sui")).await.unwrap();
    client.delete(project.id).await.unwrap();

    let mut form = ProjectForm::edit(&project);
    let outcome = form.submit(&client).await.unwrap();
    assert!(!outcome.close);
    assert!(matches!(form.state(), FormState::Failed(_)));
}

#[tokio::test]
async fn form_refuses_duplicate_submission() {
    let mut form = ProjectForm::create();
    form.data_mut().unwrap().name = "Sei".to_string();
    form.begin_submit().unwrap();

    let (_app, client) = connect().await;
    assert_eq!(form.submit(&client).await, Err(FormError::InFlight));
    assert!(client.list().await.unwrap().is_empty());
}

// ── ProjectBoard ────────────────────────────────────────────────

#[tokio::test]
async fn board_refresh_and_toggle() {
    let (_app, client) = connect().await;
    client.create(&named("Arbitrum")).await.unwrap();
    client.create(&named("Optimism")).await.unwrap();

    let mut board = ProjectBoard::new();
    board.refresh(&client).await.unwrap();
    assert_eq!(board.projects().len(), 2);

    let id = board.projects()[0].id;
    let toggled = board.toggle_completed(&client, id).await.unwrap();
    assert!(toggled.completed);
    assert!(client.get(id).await.unwrap().completed);

    board.toggle_completed(&client, id).await.unwrap();
    assert!(!board.find(id).unwrap().completed);
}

#[tokio::test]
async fn board_delete_removes_locally_only_on_success() {
    let (_app, client) = connect().await;
    let keep = client.create(&named("Keep")).await.unwrap();
    let gone = client.create(&named("Gone")).await.unwrap();

    let mut board = ProjectBoard::new();
    board.refresh(&client).await.unwrap();

    board.delete(&client, gone.id).await.unwrap();
    assert_eq!(board.projects().len(), 1);
    assert_eq!(board.projects()[0].id, keep.id);

    // Removed behind the board's back: the delete fails and nothing changes locally.
    client.delete(keep.id).await.unwrap();
    assert!(board.delete(&client, keep.id).await.is_err());
    assert_eq!(board.projects().len(), 1);
}

#[tokio::test]
async fn board_forms_and_refresh_after_submit() {
    let (_app, client) = connect().await;
    let project = client.create(&named("Celo")).await.unwrap();

    let mut board = ProjectBoard::new();
    board.refresh(&client).await.unwrap();

    let mut form = board.edit_form(project.id).unwrap();
    assert_eq!(form.data().name, "Celo");
    assert!(board.edit_form(Uuid::now_v7()).is_none());

    form.data_mut().unwrap().name = "Celo L2".to_string();
    let outcome = form.submit(&client).await.unwrap();
    board.after_submit(&client, &outcome).await.unwrap();
    assert_eq!(board.find(project.id).unwrap().name, "Celo L2");

    let mut form = board.new_form();
    form.data_mut().unwrap().name = "Mantle".to_string();
    let outcome = form.submit(&client).await.unwrap();
    board.after_submit(&client, &outcome).await.unwrap();
    assert_eq!(board.projects().len(), 2);
}
