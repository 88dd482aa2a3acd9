//! API client and effect runner against a mock backend

use std::time::Duration;

use pretty_assertions::assert_eq;
use rosterdesk::action::{Action, WriteOp};
use rosterdesk::api::{ApiClient, ApiError, PlayerPayload, TeamPayload};
use rosterdesk::effect::{Effect, EffectRunner};
use rosterdesk::form::Submission;
use serde_json::json;
use tokio::sync::mpsc;
use tui_dispatch::TaskManager;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn lists_teams_with_nullable_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"team_id": 1, "team_name": "Lions", "coach_name": null, "founded_year": 1901,
             "city": "Leeds", "stadium": null, "created_at": "2024-01-01 10:00:00"}
        ])))
        .mount(&server)
        .await;

    let teams = client(&server).list_teams().await.unwrap();

    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].team_name, "Lions");
    assert_eq!(teams[0].coach_name, None);
    assert_eq!(teams[0].founded_year, Some(1901));
}

#[tokio::test]
async fn missing_record_maps_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Player not found"})))
        .mount(&server)
        .await;

    let err = client(&server).get_player(99).await.unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Player not found");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn create_team_posts_payload_and_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/teams"))
        .and(body_json(json!({
            "team_name": "Lions",
            "coach_name": "",
            "founded_year": null,
            "city": "Leeds",
            "stadium": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            json!({"success": true, "message": "Team created successfully", "team_id": 7}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let payload = TeamPayload {
        team_name: "Lions".into(),
        city: "Leeds".into(),
        ..Default::default()
    };
    let message = client(&server).create_team(&payload).await.unwrap();

    assert_eq!(message, "Team created successfully");
}

#[tokio::test]
async fn unsuccessful_write_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/players/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Invalid team"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .update_player(3, &PlayerPayload::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected(ref m) if m == "Invalid team"));
    assert_eq!(err.to_string(), "Invalid team");
}

#[tokio::test]
async fn search_term_is_url_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/search"))
        .and(query_param("q", "Ann & Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"player_id": 2, "first_name": "Ann", "last_name": "Co", "team_id": null,
             "team_name": null, "ranking": 90}
        ])))
        .mount(&server)
        .await;

    let players = client(&server).search_players("Ann & Co").await.unwrap();

    assert_eq!(players.len(), 1);
    assert_eq!(players[0].ranking, 90);
}

#[tokio::test]
async fn search_effect_tags_results_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/players/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let action = Effect::SearchPlayers {
        query: "zed".into(),
        debounce: false,
    }
    .run(&client(&server))
    .await;

    assert_eq!(
        action,
        Action::PlayersDidLoad {
            query: Some("zed".into()),
            players: Vec::new(),
        }
    );
}

#[tokio::test]
async fn dashboard_effect_sums_players() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"team_id": 1, "team_name": "Lions"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"player_id": 1, "first_name": "A", "last_name": "B", "goals": 4, "assists": 2},
            {"player_id": 2, "first_name": "C", "last_name": "D", "goals": 1, "assists": 5}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/players/top/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"player_id": 1, "first_name": "A", "last_name": "B", "ranking": 99}
        ])))
        .mount(&server)
        .await;

    let action = Effect::LoadDashboard.run(&client(&server)).await;

    let Action::DashboardDidLoad(summary) = action else {
        panic!("expected dashboard, got {action:?}");
    };
    assert_eq!(summary.total_teams, 1);
    assert_eq!(summary.total_players, 2);
    assert_eq!(summary.total_goals, 5);
    assert_eq!(summary.total_assists, 7);
    assert_eq!(summary.top_players.len(), 1);
}

#[tokio::test]
async fn failed_submit_reports_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/players"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"success": false, "message": "First name is required"})),
        )
        .mount(&server)
        .await;

    let action = Effect::Submit(Submission::CreatePlayer(PlayerPayload::default()))
        .run(&client(&server))
        .await;

    assert_eq!(
        action,
        Action::WriteDidFail {
            op: WriteOp::SavePlayer,
            message: "First name is required (HTTP 400)".into(),
        }
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_load_error() {
    // Nothing listens on the discard port
    let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

    let action = Effect::LoadTeams.run(&api).await;

    assert!(matches!(action, Action::TeamsDidError(_)));
}

async fn collect_actions(rx: &mut mpsc::UnboundedReceiver<Action>, wait: Duration) -> Vec<Action> {
    let mut actions = Vec::new();
    while let Ok(Some(action)) = tokio::time::timeout(wait, rx.recv()).await {
        actions.push(action);
    }
    actions
}

#[tokio::test]
async fn overlapping_deletes_both_report() {
    let server = MockServer::start().await;
    for id in [1, 2] {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/players/{id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "message": format!("deleted {id}")}))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;
    }
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(tx);
    let mut runner = EffectRunner::new(client(&server));

    runner.spawn(Effect::DeletePlayer { id: 1 }, &mut tasks);
    runner.spawn(Effect::DeletePlayer { id: 2 }, &mut tasks);

    let mut messages: Vec<String> = collect_actions(&mut rx, Duration::from_millis(1000))
        .await
        .into_iter()
        .filter_map(|action| match action {
            Action::WriteDidSucceed {
                op: WriteOp::DeletePlayer,
                message,
            } => Some(message),
            _ => None,
        })
        .collect();
    messages.sort();

    assert_eq!(messages, vec!["deleted 1", "deleted 2"]);
}

#[tokio::test]
async fn newer_read_supersedes_older() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = TaskManager::new(tx);
    let mut runner = EffectRunner::new(client(&server));

    runner.spawn(Effect::LoadTeams, &mut tasks);
    runner.spawn(Effect::LoadTeams, &mut tasks);

    let actions = collect_actions(&mut rx, Duration::from_millis(1000)).await;

    assert_eq!(actions, vec![Action::TeamsDidLoad(Vec::new())]);
}
