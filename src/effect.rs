//! Effects - side effects declared by the reducer

use std::time::Duration;

use tui_dispatch::{TaskKey, TaskManager};

use crate::action::{Action, WriteOp};
use crate::api::ApiClient;
use crate::form::Submission;
use crate::state::{DashboardSummary, DASHBOARD_TOP_PLAYERS};

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch both lists and the top players for the dashboard totals
    LoadDashboard,
    LoadTeams,
    LoadPlayers,
    /// Search players by name substring. `debounce` is set while the user is typing.
    SearchPlayers { query: String, debounce: bool },
    LoadRankings { limit: usize },
    /// Fetch player and team statistics together
    LoadStats,
    LoadTeamForEdit { id: i64 },
    LoadPlayerForEdit { id: i64 },
    /// Refresh the player form's team selector
    LoadTeamOptions,
    LoadRoster { team_id: i64 },
    Submit(Submission),
    DeleteTeam { id: i64 },
    DeletePlayer { id: i64 },
    InsertSampleData,
    ClearAllData,
}

impl Effect {
    /// Task slot for a read. A new read replaces a running one with the same key.
    /// Writes return `None`: each one runs to completion and reports its outcome.
    pub fn task_key(&self) -> Option<&'static str> {
        let key = match self {
            Effect::LoadDashboard => "dashboard",
            Effect::LoadTeams => "teams",
            // Listing and searching share a slot so only the newest player request survives.
            Effect::LoadPlayers | Effect::SearchPlayers { .. } => "players",
            Effect::LoadRankings { .. } => "rankings",
            Effect::LoadStats => "stats",
            Effect::LoadTeamForEdit { .. } | Effect::LoadPlayerForEdit { .. } => "edit",
            Effect::LoadTeamOptions => "team_options",
            Effect::LoadRoster { .. } => "roster",
            Effect::Submit(_)
            | Effect::DeleteTeam { .. }
            | Effect::DeletePlayer { .. }
            | Effect::InsertSampleData
            | Effect::ClearAllData => return None,
        };
        Some(key)
    }

    fn is_debounced(&self) -> bool {
        matches!(self, Effect::SearchPlayers { debounce: true, .. })
    }

    /// Perform the request and turn its outcome into an action.
    pub async fn run(self, api: &ApiClient) -> Action {
        match self {
            Effect::LoadDashboard => {
                let result = tokio::try_join!(
                    api.list_teams(),
                    api.list_players(),
                    api.top_players(DASHBOARD_TOP_PLAYERS),
                );
                match result {
                    Ok((teams, players, top)) => {
                        Action::DashboardDidLoad(DashboardSummary::compute(&teams, &players, top))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "dashboard load failed");
                        Action::DashboardDidError(e.to_string())
                    }
                }
            }
            Effect::LoadTeams => match api.list_teams().await {
                Ok(teams) => Action::TeamsDidLoad(teams),
                Err(e) => {
                    tracing::warn!(error = %e, "team list load failed");
                    Action::TeamsDidError(e.to_string())
                }
            },
            Effect::LoadPlayers => match api.list_players().await {
                Ok(players) => Action::PlayersDidLoad {
                    query: None,
                    players,
                },
                Err(e) => {
                    tracing::warn!(error = %e, "player list load failed");
                    Action::PlayersDidError(e.to_string())
                }
            },
            Effect::SearchPlayers { query, .. } => match api.search_players(&query).await {
                Ok(players) => Action::PlayersDidLoad {
                    query: Some(query),
                    players,
                },
                Err(e) => {
                    tracing::warn!(error = %e, %query, "player search failed");
                    Action::PlayersDidError(e.to_string())
                }
            },
            Effect::LoadRankings { limit } => match api.top_players(limit).await {
                Ok(players) => Action::RankingsDidLoad(players),
                Err(e) => {
                    tracing::warn!(error = %e, limit, "rankings load failed");
                    Action::RankingsDidError(e.to_string())
                }
            },
            Effect::LoadStats => match tokio::try_join!(api.player_stats(), api.team_stats()) {
                Ok((players, teams)) => Action::StatsDidLoad { players, teams },
                Err(e) => {
                    tracing::warn!(error = %e, "statistics load failed");
                    Action::StatsDidError(e.to_string())
                }
            },
            Effect::LoadTeamForEdit { id } => match api.get_team(id).await {
                Ok(team) => Action::TeamDidLoadForEdit(team),
                Err(e) => {
                    tracing::warn!(error = %e, id, "team fetch for edit failed");
                    Action::EditDidError(format!("Error loading team: {e}"))
                }
            },
            Effect::LoadPlayerForEdit { id } => match api.get_player(id).await {
                Ok(player) => Action::PlayerDidLoadForEdit(player),
                Err(e) => {
                    tracing::warn!(error = %e, id, "player fetch for edit failed");
                    Action::EditDidError(format!("Error loading player: {e}"))
                }
            },
            Effect::LoadTeamOptions => match api.list_teams().await {
                Ok(teams) => Action::TeamOptionsDidLoad(teams),
                Err(e) => {
                    // The selector keeps its previous options.
                    tracing::warn!(error = %e, "team options load failed");
                    Action::Render
                }
            },
            Effect::LoadRoster { team_id } => match api.team_players(team_id).await {
                Ok(players) => Action::RosterDidLoad { team_id, players },
                Err(e) => {
                    tracing::warn!(error = %e, team_id, "roster load failed");
                    Action::RosterDidError {
                        team_id,
                        error: e.to_string(),
                    }
                }
            },
            Effect::Submit(submission) => {
                let op = submission.op();
                let result = match &submission {
                    Submission::CreateTeam(payload) => api.create_team(payload).await,
                    Submission::UpdateTeam { id, payload } => api.update_team(*id, payload).await,
                    Submission::CreatePlayer(payload) => api.create_player(payload).await,
                    Submission::UpdatePlayer { id, payload } => {
                        api.update_player(*id, payload).await
                    }
                };
                write_outcome(op, result)
            }
            Effect::DeleteTeam { id } => write_outcome(WriteOp::DeleteTeam, api.delete_team(id).await),
            Effect::DeletePlayer { id } => {
                write_outcome(WriteOp::DeletePlayer, api.delete_player(id).await)
            }
            Effect::InsertSampleData => {
                write_outcome(WriteOp::LoadSampleData, api.load_sample_data().await)
            }
            Effect::ClearAllData => write_outcome(WriteOp::ClearData, api.clear_data().await),
        }
    }
}

pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Spawns effects on the runtime's task manager
pub struct EffectRunner {
    api: ApiClient,
    writes: u64,
}

impl EffectRunner {
    pub fn new(api: ApiClient) -> Self {
        Self { api, writes: 0 }
    }

    pub fn spawn(&mut self, effect: Effect, tasks: &mut TaskManager<Action>) {
        let api = self.api.clone();
        match effect.task_key() {
            Some(key) if effect.is_debounced() => {
                tasks.debounce(
                    key,
                    Duration::from_millis(SEARCH_DEBOUNCE_MS),
                    async move { effect.run(&api).await },
                );
            }
            Some(key) => {
                tasks.spawn(key, async move { effect.run(&api).await });
            }
            None => {
                self.writes += 1;
                let key = TaskKey::new(format!("write:{}", self.writes));
                tasks.spawn(key, async move { effect.run(&api).await });
            }
        }
    }
}

fn write_outcome(op: WriteOp, result: Result<String, crate::api::ApiError>) -> Action {
    match result {
        Ok(message) => {
            tracing::info!(?op, %message, "write succeeded");
            Action::WriteDidSucceed { op, message }
        }
        Err(e) => {
            tracing::error!(?op, error = %e, "write failed");
            Action::WriteDidFail {
                op,
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_list_and_search_share_a_task() {
        assert_eq!(
            Effect::LoadPlayers.task_key(),
            Effect::SearchPlayers {
                query: "ann".into(),
                debounce: true,
            }
            .task_key()
        );
        assert_ne!(Effect::LoadTeams.task_key(), Effect::LoadPlayers.task_key());
    }

    #[test]
    fn writes_have_no_shared_slot() {
        assert_eq!(Effect::DeletePlayer { id: 1 }.task_key(), None);
        assert_eq!(Effect::ClearAllData.task_key(), None);
        assert!(Effect::LoadTeams.task_key().is_some());
    }

    #[test]
    fn only_typed_searches_are_debounced() {
        let typed = Effect::SearchPlayers {
            query: "ann".into(),
            debounce: true,
        };
        let submitted = Effect::SearchPlayers {
            query: "ann".into(),
            debounce: false,
        };
        assert!(typed.is_debounced());
        assert!(!submitted.is_debounced());
        assert!(!Effect::LoadPlayers.is_debounced());
    }

    #[test]
    fn failed_write_keeps_the_server_message() {
        let action = write_outcome(
            WriteOp::SaveTeam,
            Err(crate::api::ApiError::Rejected("Team name is required".into())),
        );
        assert_eq!(
            action,
            Action::WriteDidFail {
                op: WriteOp::SaveTeam,
                message: "Team name is required".into(),
            }
        );
    }
}
