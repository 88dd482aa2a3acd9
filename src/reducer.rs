//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::{Action, WriteOp};
use crate::effect::Effect;
use crate::form::EntityForm;
use crate::state::{AppState, PendingConfirm, Section, TeamOption, TeamRoster, RANKING_LIMITS};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let mut effects = section_load(state);
            effects.push(Effect::LoadTeamOptions);
            DispatchResult::changed_with_many(effects)
        }

        // ===== Navigation =====
        Action::NavSelect(section) => navigate(state, section),
        Action::NavNext => {
            let next = state.section.next();
            navigate(state, next)
        }
        Action::NavPrev => {
            let prev = state.section.prev();
            navigate(state, prev)
        }

        Action::Refresh => DispatchResult::changed_with_many(section_load(state)),

        Action::StatsTabToggle => {
            if state.section != Section::Statistics {
                return DispatchResult::unchanged();
            }
            state.stats_tab = state.stats_tab.toggle();
            DispatchResult::changed()
        }

        // ===== Load results =====
        Action::DashboardDidLoad(summary) => {
            state.dashboard = DataResource::Loaded(summary);
            DispatchResult::changed()
        }

        Action::DashboardDidError(error) => {
            fail_load(state, |s| &mut s.dashboard, "Error loading dashboard", error);
            DispatchResult::changed()
        }

        Action::TeamsDidLoad(teams) => {
            state.team_options = teams.iter().map(TeamOption::from).collect();
            clamp_selection(&mut state.selected_team, teams.len());
            state.teams = DataResource::Loaded(teams);
            DispatchResult::changed()
        }

        Action::TeamsDidError(error) => {
            fail_load(state, |s| &mut s.teams, "Error loading teams", error);
            DispatchResult::changed()
        }

        Action::PlayersDidLoad { query, players } => {
            if query.as_deref() != state.search.filter() {
                tracing::debug!(?query, "dropping stale player response");
                return DispatchResult::unchanged();
            }
            clamp_selection(&mut state.selected_player, players.len());
            state.players = DataResource::Loaded(players);
            DispatchResult::changed()
        }

        Action::PlayersDidError(error) => {
            fail_load(state, |s| &mut s.players, "Error loading players", error);
            DispatchResult::changed()
        }

        Action::RankingsDidLoad(players) => {
            state.rankings = DataResource::Loaded(players);
            DispatchResult::changed()
        }

        Action::RankingsDidError(error) => {
            fail_load(state, |s| &mut s.rankings, "Error loading rankings", error);
            DispatchResult::changed()
        }

        Action::RankingLimitNext | Action::RankingLimitPrev => {
            if state.section != Section::Rankings {
                return DispatchResult::unchanged();
            }
            let forward = matches!(action, Action::RankingLimitNext);
            state.ranking_limit = step_limit(state.ranking_limit, forward);
            DispatchResult::changed_with_many(section_load(state))
        }

        Action::StatsDidLoad { players, teams } => {
            state.player_stats = DataResource::Loaded(players);
            state.team_stats = DataResource::Loaded(teams);
            DispatchResult::changed()
        }

        Action::StatsDidError(error) => {
            fail_load(state, |s| &mut s.player_stats, "Error loading statistics", error.clone());
            if !state.team_stats.is_loaded() {
                state.team_stats = DataResource::Failed(error);
            }
            DispatchResult::changed()
        }

        // ===== Selection =====
        Action::SelectionMove(delta) => {
            let (selected, len) = match state.section {
                Section::Teams => (
                    &mut state.selected_team,
                    state.teams.data().map_or(0, Vec::len),
                ),
                Section::Players => (
                    &mut state.selected_player,
                    state.players.data().map_or(0, Vec::len),
                ),
                _ => return DispatchResult::unchanged(),
            };
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let target = (*selected as i64 + i64::from(delta)).clamp(0, len as i64 - 1) as usize;
            if target == *selected {
                DispatchResult::unchanged()
            } else {
                *selected = target;
                DispatchResult::changed()
            }
        }

        // ===== Search =====
        Action::SearchOpen => {
            if state.section != Section::Players || state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search.active = false;
            if state.search.query.is_empty() {
                return DispatchResult::changed();
            }
            state.search.query.clear();
            DispatchResult::changed_with(players_load(state))
        }

        Action::SearchQueryChange(query) => {
            if query == state.search.query {
                return DispatchResult::unchanged();
            }
            state.search.query = query;
            DispatchResult::changed_with(players_request(state, true))
        }

        Action::SearchSubmit(query) => {
            state.search.active = false;
            state.search.query = query;
            DispatchResult::changed_with(players_load(state))
        }

        // ===== Roster =====
        Action::RosterOpen => {
            if state.section != Section::Teams {
                return DispatchResult::unchanged();
            }
            let Some(team) = state.current_team() else {
                return DispatchResult::unchanged();
            };
            let (team_id, team_name) = (team.team_id, team.team_name.clone());
            state.roster = Some(TeamRoster {
                team_id,
                team_name,
                players: DataResource::Loading,
            });
            DispatchResult::changed_with(Effect::LoadRoster { team_id })
        }

        Action::RosterDidLoad { team_id, players } => match state.roster.as_mut() {
            Some(roster) if roster.team_id == team_id => {
                roster.players = DataResource::Loaded(players);
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::RosterDidError { team_id, error } => match state.roster.as_mut() {
            Some(roster) if roster.team_id == team_id => {
                roster.players = DataResource::Failed(error.clone());
                state
                    .notifications
                    .error(format!("Error loading team players: {error}"));
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        Action::RosterClose => {
            if state.roster.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Forms =====
        Action::FormOpenCreate => match state.section {
            Section::Teams => open_form(state, EntityForm::new_team(), None),
            Section::Players => open_form(
                state,
                EntityForm::new_player(),
                Some(Effect::LoadTeamOptions),
            ),
            _ => DispatchResult::unchanged(),
        },

        Action::EditSelected => {
            let effect = match state.section {
                Section::Teams => state
                    .current_team()
                    .map(|team| Effect::LoadTeamForEdit { id: team.team_id }),
                Section::Players => state
                    .current_player()
                    .map(|player| Effect::LoadPlayerForEdit { id: player.player_id }),
                _ => None,
            };
            match effect {
                Some(effect) => DispatchResult::changed_with(effect),
                None => DispatchResult::unchanged(),
            }
        }

        Action::TeamDidLoadForEdit(team) => open_form(state, EntityForm::edit_team(&team), None),

        Action::PlayerDidLoadForEdit(player) => open_form(
            state,
            EntityForm::edit_player(&player),
            Some(Effect::LoadTeamOptions),
        ),

        Action::EditDidError(message) => {
            state.notifications.error(message);
            DispatchResult::changed()
        }

        Action::TeamOptionsDidLoad(teams) => {
            state.team_options = teams.iter().map(TeamOption::from).collect();
            DispatchResult::changed()
        }

        Action::FormFocusNext => with_form(state, |form| {
            form.focus_next();
            true
        }),

        Action::FormFocusPrev => with_form(state, |form| {
            form.focus_prev();
            true
        }),

        Action::FormInput(ch) => with_form(state, |form| form.input(ch)),

        Action::FormBackspace => with_form(state, EntityForm::backspace),

        Action::FormOptionNext | Action::FormOptionPrev => {
            let forward = matches!(action, Action::FormOptionNext);
            let options = &state.team_options;
            match state
                .form
                .as_mut()
                .map(|form| form.cycle_choice(options, forward))
            {
                Some(true) => DispatchResult::changed(),
                _ => DispatchResult::unchanged(),
            }
        }

        Action::FormSubmit => {
            if state.form_submitting {
                return DispatchResult::unchanged();
            }
            let Some(form) = state.form.as_ref() else {
                return DispatchResult::unchanged();
            };
            match form.submission() {
                Ok(submission) => {
                    state.form_submitting = true;
                    DispatchResult::changed_with(Effect::Submit(submission))
                }
                Err(e) => {
                    state.notifications.error(e.to_string());
                    DispatchResult::changed()
                }
            }
        }

        Action::FormCancel => {
            state.form_submitting = false;
            if state.form.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Write results =====
        Action::WriteDidSucceed { op, message } => {
            state.notifications.success(message);
            if matches!(op, WriteOp::SaveTeam | WriteOp::SavePlayer) {
                state.form = None;
                state.form_submitting = false;
            }
            DispatchResult::changed_with_many(reloads_after(state, op))
        }

        Action::WriteDidFail { op, message } => {
            state
                .notifications
                .error(format!("{}: {message}", op.failure_label()));
            if matches!(op, WriteOp::SaveTeam | WriteOp::SavePlayer) {
                state.form_submitting = false;
            }
            DispatchResult::changed()
        }

        // ===== Confirmations =====
        Action::DeleteRequest => {
            let pending = match state.section {
                Section::Teams => state.current_team().map(|team| PendingConfirm::DeleteTeam {
                    id: team.team_id,
                    name: team.team_name.clone(),
                }),
                Section::Players => {
                    state
                        .current_player()
                        .map(|player| PendingConfirm::DeletePlayer {
                            id: player.player_id,
                            name: player.full_name(),
                        })
                }
                _ => None,
            };
            match pending {
                Some(pending) => {
                    state.confirm = Some(pending);
                    DispatchResult::changed()
                }
                None => DispatchResult::unchanged(),
            }
        }

        Action::SampleDataRequest => {
            state.confirm = Some(PendingConfirm::LoadSampleData);
            DispatchResult::changed()
        }

        Action::ClearDataRequest => {
            state.confirm = Some(PendingConfirm::ClearAllData);
            DispatchResult::changed()
        }

        Action::ConfirmAccept => {
            let Some(pending) = state.confirm.take() else {
                return DispatchResult::unchanged();
            };
            let effect = match pending {
                PendingConfirm::DeleteTeam { id, .. } => Effect::DeleteTeam { id },
                PendingConfirm::DeletePlayer { id, .. } => Effect::DeletePlayer { id },
                PendingConfirm::LoadSampleData => Effect::InsertSampleData,
                PendingConfirm::ClearAllData => Effect::ClearAllData,
            };
            DispatchResult::changed_with(effect)
        }

        Action::ConfirmCancel => {
            if state.confirm.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ToastDismiss => {
            let newest = state.notifications.latest().map(|toast| toast.id);
            match newest.map(|id| state.notifications.dismiss(id)) {
                Some(true) => DispatchResult::changed(),
                _ => DispatchResult::unchanged(),
            }
        }

        // ===== UI / global =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.notifications.tick() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn navigate(state: &mut AppState, section: Section) -> DispatchResult<Effect> {
    tracing::debug!(from = ?state.section, to = ?section, "navigate");
    state.section = section;
    state.search.active = false;
    DispatchResult::changed_with_many(section_load(state))
}

/// Keep rendered rows during a refresh; show a spinner only on first load.
fn begin_load<T>(resource: &mut DataResource<T>) {
    if !resource.is_loaded() {
        *resource = DataResource::Loading;
    }
}

/// Toast the failure. Rows that were already rendered stay as they are.
fn fail_load<T>(
    state: &mut AppState,
    resource: impl FnOnce(&mut AppState) -> &mut DataResource<T>,
    label: &str,
    error: String,
) {
    state.notifications.error(format!("{label}: {error}"));
    let resource = resource(state);
    if !resource.is_loaded() {
        *resource = DataResource::Failed(error);
    }
}

fn clamp_selection(selected: &mut usize, len: usize) {
    *selected = (*selected).min(len.saturating_sub(1));
}

/// Player list request honouring the active search term.
fn players_load(state: &mut AppState) -> Effect {
    players_request(state, false)
}

fn players_request(state: &mut AppState, typed: bool) -> Effect {
    begin_load(&mut state.players);
    match state.search.filter() {
        Some(query) => Effect::SearchPlayers {
            query: query.to_string(),
            debounce: typed,
        },
        None => Effect::LoadPlayers,
    }
}

fn teams_load(state: &mut AppState) -> Effect {
    begin_load(&mut state.teams);
    Effect::LoadTeams
}

fn dashboard_load(state: &mut AppState) -> Effect {
    begin_load(&mut state.dashboard);
    Effect::LoadDashboard
}

fn section_load(state: &mut AppState) -> Vec<Effect> {
    let effect = match state.section {
        Section::Dashboard => dashboard_load(state),
        Section::Teams => teams_load(state),
        Section::Players => players_load(state),
        Section::Rankings => {
            begin_load(&mut state.rankings);
            Effect::LoadRankings {
                limit: state.ranking_limit,
            }
        }
        Section::Statistics => {
            begin_load(&mut state.player_stats);
            begin_load(&mut state.team_stats);
            Effect::LoadStats
        }
    };
    vec![effect]
}

fn reloads_after(state: &mut AppState, op: WriteOp) -> Vec<Effect> {
    match op {
        WriteOp::SaveTeam | WriteOp::DeleteTeam => vec![teams_load(state), players_load(state)],
        WriteOp::SavePlayer | WriteOp::DeletePlayer => {
            vec![players_load(state), dashboard_load(state)]
        }
        WriteOp::LoadSampleData | WriteOp::ClearData => vec![
            dashboard_load(state),
            teams_load(state),
            players_load(state),
        ],
    }
}

fn open_form(
    state: &mut AppState,
    form: EntityForm,
    effect: Option<Effect>,
) -> DispatchResult<Effect> {
    state.search.active = false;
    state.form = Some(form);
    state.form_submitting = false;
    match effect {
        Some(effect) => DispatchResult::changed_with(effect),
        None => DispatchResult::changed(),
    }
}

fn with_form(
    state: &mut AppState,
    edit: impl FnOnce(&mut EntityForm) -> bool,
) -> DispatchResult<Effect> {
    match state.form.as_mut().map(edit) {
        Some(true) => DispatchResult::changed(),
        _ => DispatchResult::unchanged(),
    }
}

/// Next (or previous) preset limit, wrapping around. Off-preset limits snap to the nearest one in that direction.
fn step_limit(current: usize, forward: bool) -> usize {
    let first = RANKING_LIMITS[0];
    let last = RANKING_LIMITS[RANKING_LIMITS.len() - 1];
    if forward {
        RANKING_LIMITS
            .iter()
            .copied()
            .find(|&limit| limit > current)
            .unwrap_or(first)
    } else {
        RANKING_LIMITS
            .iter()
            .rev()
            .copied()
            .find(|&limit| limit < current)
            .unwrap_or(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldKey, Submission};
    use crate::state::{Player, Team};

    fn team(id: i64, name: &str) -> Team {
        Team {
            team_id: id,
            team_name: name.into(),
            ..Default::default()
        }
    }

    fn player(id: i64, first: &str) -> Player {
        Player {
            player_id: id,
            first_name: first.into(),
            last_name: "Test".into(),
            ..Default::default()
        }
    }

    #[test]
    fn init_loads_dashboard_and_team_options() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::Init);

        assert!(result.changed);
        assert!(state.dashboard.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::LoadDashboard, Effect::LoadTeamOptions]
        );
    }

    #[test]
    fn reselecting_a_section_reloads_it() {
        let mut state = AppState {
            section: Section::Teams,
            teams: DataResource::Loaded(vec![team(1, "Lions")]),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::NavSelect(Section::Teams));

        assert_eq!(result.effects, vec![Effect::LoadTeams]);
        // refresh keeps the rendered rows
        assert!(state.teams.is_loaded());
    }

    #[test]
    fn teams_did_load_refreshes_options_and_clamps_selection() {
        let mut state = AppState {
            selected_team: 5,
            ..Default::default()
        };

        reducer(
            &mut state,
            Action::TeamsDidLoad(vec![team(1, "Lions"), team(2, "Hawks")]),
        );

        assert_eq!(state.selected_team, 1);
        assert_eq!(state.team_options.len(), 2);
        assert_eq!(state.team_options[1].name, "Hawks");
    }

    #[test]
    fn failed_refresh_keeps_previous_rows() {
        let rows = vec![team(1, "Lions")];
        let mut state = AppState {
            teams: DataResource::Loaded(rows.clone()),
            ..Default::default()
        };

        reducer(&mut state, Action::TeamsDidError("timeout".into()));

        assert_eq!(state.teams.data(), Some(&rows));
        assert_eq!(
            state.notifications.latest().map(|t| t.message.as_str()),
            Some("Error loading teams: timeout")
        );
    }

    #[test]
    fn failed_first_load_marks_resource_failed() {
        let mut state = AppState {
            players: DataResource::Loading,
            ..Default::default()
        };

        reducer(&mut state, Action::PlayersDidError("boom".into()));

        assert!(state.players.is_failed());
    }

    #[test]
    fn stale_search_response_is_dropped() {
        let mut state = AppState {
            section: Section::Players,
            ..Default::default()
        };
        reducer(&mut state, Action::SearchQueryChange("an".into()));
        reducer(&mut state, Action::SearchQueryChange("ann".into()));

        let stale = reducer(
            &mut state,
            Action::PlayersDidLoad {
                query: Some("an".into()),
                players: vec![player(1, "Dan")],
            },
        );
        assert!(!stale.changed);
        assert!(state.players.is_loading());

        reducer(
            &mut state,
            Action::PlayersDidLoad {
                query: Some("ann".into()),
                players: vec![player(2, "Anna")],
            },
        );
        assert_eq!(state.players.data().map(Vec::len), Some(1));
    }

    #[test]
    fn typing_debounces_but_submit_searches_now() {
        let mut state = AppState {
            section: Section::Players,
            ..Default::default()
        };

        let typed = reducer(&mut state, Action::SearchQueryChange("ann".into()));
        assert_eq!(
            typed.effects,
            vec![Effect::SearchPlayers {
                query: "ann".into(),
                debounce: true,
            }]
        );

        let submitted = reducer(&mut state, Action::SearchSubmit("anna".into()));
        assert_eq!(
            submitted.effects,
            vec![Effect::SearchPlayers {
                query: "anna".into(),
                debounce: false,
            }]
        );
    }

    #[test]
    fn blank_search_reloads_full_list() {
        let mut state = AppState {
            section: Section::Players,
            ..Default::default()
        };
        reducer(&mut state, Action::SearchQueryChange("ann".into()));

        let result = reducer(&mut state, Action::SearchQueryChange("  ".into()));

        assert_eq!(result.effects, vec![Effect::LoadPlayers]);
    }

    #[test]
    fn search_close_clears_filter() {
        let mut state = AppState {
            section: Section::Players,
            ..Default::default()
        };
        reducer(&mut state, Action::SearchOpen);
        reducer(&mut state, Action::SearchQueryChange("ann".into()));

        let result = reducer(&mut state, Action::SearchClose);

        assert!(!state.search.active);
        assert!(state.search.query.is_empty());
        assert_eq!(result.effects, vec![Effect::LoadPlayers]);
    }

    #[test]
    fn ranking_limit_cycles_presets() {
        assert_eq!(step_limit(10, true), 20);
        assert_eq!(step_limit(50, true), 5);
        assert_eq!(step_limit(5, false), 50);
        assert_eq!(step_limit(7, true), 10);
        assert_eq!(step_limit(7, false), 5);
    }

    #[test]
    fn ranking_limit_change_reloads_rankings() {
        let mut state = AppState {
            section: Section::Rankings,
            ..Default::default()
        };

        let result = reducer(&mut state, Action::RankingLimitNext);

        assert_eq!(state.ranking_limit, 20);
        assert_eq!(result.effects, vec![Effect::LoadRankings { limit: 20 }]);
    }

    #[test]
    fn selection_is_clamped_to_list() {
        let mut state = AppState {
            section: Section::Teams,
            teams: DataResource::Loaded(vec![team(1, "A"), team(2, "B")]),
            ..Default::default()
        };

        assert!(reducer(&mut state, Action::SelectionMove(5)).changed);
        assert_eq!(state.selected_team, 1);
        assert!(!reducer(&mut state, Action::SelectionMove(1)).changed);
        reducer(&mut state, Action::SelectionMove(-3));
        assert_eq!(state.selected_team, 0);
    }

    #[test]
    fn create_form_submits_create() {
        let mut state = AppState {
            section: Section::Teams,
            ..Default::default()
        };
        reducer(&mut state, Action::FormOpenCreate);
        for ch in "Lions".chars() {
            reducer(&mut state, Action::FormInput(ch));
        }

        let result = reducer(&mut state, Action::FormSubmit);

        assert!(state.form_submitting);
        match &result.effects[..] {
            [Effect::Submit(Submission::CreateTeam(payload))] => {
                assert_eq!(payload.team_name, "Lions");
            }
            other => panic!("unexpected effects {other:?}"),
        }
        // a second submit while in flight is ignored
        assert!(reducer(&mut state, Action::FormSubmit).effects.is_empty());
    }

    #[test]
    fn team_selector_cycles_through_options() {
        let mut state = AppState {
            section: Section::Players,
            ..Default::default()
        };
        reducer(&mut state, Action::FormOpenCreate);
        reducer(&mut state, Action::TeamOptionsDidLoad(vec![team(4, "Lions")]));

        // first name is focused, not the selector
        assert!(!reducer(&mut state, Action::FormOptionNext).changed);

        reducer(&mut state, Action::FormFocusNext);
        reducer(&mut state, Action::FormFocusNext);
        assert!(reducer(&mut state, Action::FormOptionNext).changed);
        let form = state.form.as_ref().expect("form should be open");
        assert_eq!(form.value(FieldKey::Team), "4");

        reducer(&mut state, Action::FormOptionPrev);
        let form = state.form.as_ref().expect("form should be open");
        assert_eq!(form.value(FieldKey::Team), "");
    }

    #[test]
    fn missing_required_field_blocks_submit() {
        let mut state = AppState {
            section: Section::Players,
            ..Default::default()
        };
        let open = reducer(&mut state, Action::FormOpenCreate);
        assert_eq!(open.effects, vec![Effect::LoadTeamOptions]);

        let result = reducer(&mut state, Action::FormSubmit);

        assert!(result.effects.is_empty());
        assert!(!state.form_submitting);
        assert_eq!(
            state.notifications.latest().map(|t| t.message.as_str()),
            Some("First Name is required")
        );
    }

    #[test]
    fn failed_save_keeps_form_input() {
        let mut form = EntityForm::new_team();
        form.set_value(FieldKey::TeamName, "Lions");
        let mut state = AppState {
            form: Some(form.clone()),
            form_submitting: true,
            ..Default::default()
        };

        reducer(
            &mut state,
            Action::WriteDidFail {
                op: WriteOp::SaveTeam,
                message: "Team name is required".into(),
            },
        );

        assert_eq!(state.form, Some(form));
        assert!(!state.form_submitting);
        assert_eq!(
            state.notifications.latest().map(|t| t.message.as_str()),
            Some("Error saving team: Team name is required")
        );
    }

    #[test]
    fn saved_player_closes_form_and_reloads() {
        let mut state = AppState {
            form: Some(EntityForm::new_player()),
            form_submitting: true,
            ..Default::default()
        };

        let result = reducer(
            &mut state,
            Action::WriteDidSucceed {
                op: WriteOp::SavePlayer,
                message: "Player created successfully".into(),
            },
        );

        assert!(state.form.is_none());
        assert_eq!(
            result.effects,
            vec![Effect::LoadPlayers, Effect::LoadDashboard]
        );
    }

    #[test]
    fn deleted_team_reloads_teams_and_players() {
        let mut state = AppState {
            section: Section::Teams,
            teams: DataResource::Loaded(vec![team(3, "Lions")]),
            ..Default::default()
        };
        reducer(&mut state, Action::DeleteRequest);
        assert!(matches!(
            state.confirm,
            Some(PendingConfirm::DeleteTeam { id: 3, .. })
        ));

        let accept = reducer(&mut state, Action::ConfirmAccept);
        assert_eq!(accept.effects, vec![Effect::DeleteTeam { id: 3 }]);
        assert!(state.confirm.is_none());

        let done = reducer(
            &mut state,
            Action::WriteDidSucceed {
                op: WriteOp::DeleteTeam,
                message: "Team deleted successfully".into(),
            },
        );
        assert_eq!(done.effects, vec![Effect::LoadTeams, Effect::LoadPlayers]);
    }

    #[test]
    fn bulk_writes_reload_everything() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ClearDataRequest);
        assert_eq!(
            reducer(&mut state, Action::ConfirmAccept).effects,
            vec![Effect::ClearAllData]
        );

        let done = reducer(
            &mut state,
            Action::WriteDidSucceed {
                op: WriteOp::ClearData,
                message: "All data cleared".into(),
            },
        );
        assert_eq!(
            done.effects,
            vec![Effect::LoadDashboard, Effect::LoadTeams, Effect::LoadPlayers]
        );
    }

    #[test]
    fn roster_ignores_other_team_results() {
        let mut state = AppState {
            section: Section::Teams,
            teams: DataResource::Loaded(vec![team(4, "Lions")]),
            ..Default::default()
        };
        let result = reducer(&mut state, Action::RosterOpen);
        assert_eq!(result.effects, vec![Effect::LoadRoster { team_id: 4 }]);

        let other = reducer(
            &mut state,
            Action::RosterDidLoad {
                team_id: 9,
                players: vec![player(1, "X")],
            },
        );
        assert!(!other.changed);

        reducer(
            &mut state,
            Action::RosterDidLoad {
                team_id: 4,
                players: vec![player(1, "X")],
            },
        );
        assert!(state.roster.as_ref().is_some_and(|r| r.players.is_loaded()));
    }

    #[test]
    fn tick_only_changes_when_a_toast_expires() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);
    }

    #[test]
    fn dismiss_drops_newest_toast() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::ToastDismiss).changed);

        state.notifications.success("Team created successfully");
        state.notifications.error("Error deleting player: gone");

        assert!(reducer(&mut state, Action::ToastDismiss).changed);
        let left: Vec<_> = state
            .notifications
            .toasts()
            .iter()
            .map(|t| t.message.as_str())
            .collect();
        assert_eq!(left, vec!["Team created successfully"]);
    }
}
