//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::form::EntityForm;
use crate::notify::Notifications;

/// Subscription interval driving toast expiry.
pub const TICK_MS: u64 = 100;

/// Number of players shown on the dashboard.
pub const DASHBOARD_TOP_PLAYERS: usize = 5;

/// Choices offered by the rankings limit selector.
pub const RANKING_LIMITS: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// A team record
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    pub coach_name: Option<String>,
    pub founded_year: Option<i64>,
    pub city: Option<String>,
    pub stadium: Option<String>,
    pub created_at: Option<String>,
}

/// A player record. `team_name` is joined in by list endpoints only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub player_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub position: Option<String>,
    pub jersey_number: i64,
    pub age: i64,
    pub height: f64,
    pub weight: f64,
    pub ranking: i64,
    pub goals: i64,
    pub assists: i64,
    pub matches_played: i64,
    pub created_at: Option<String>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Per-player aggregate row from the stats endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerStat {
    pub player_id: i64,
    pub player_name: String,
    pub team_name: Option<String>,
    pub position: Option<String>,
    pub jersey_number: i64,
    pub age: i64,
    pub ranking: i64,
    pub goals: i64,
    pub assists: i64,
    pub matches_played: i64,
    pub goals_per_match: f64,
}

/// Per-team aggregate row from the stats endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamStat {
    pub team_id: i64,
    pub team_name: String,
    pub coach_name: Option<String>,
    pub city: Option<String>,
    pub total_players: i64,
    pub total_goals: i64,
    pub total_assists: i64,
}

/// Dashboard totals, computed from the full team and player lists
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DashboardSummary {
    pub total_teams: usize,
    pub total_players: usize,
    pub total_goals: i64,
    pub total_assists: i64,
    pub top_players: Vec<Player>,
}

impl DashboardSummary {
    pub fn compute(teams: &[Team], players: &[Player], top_players: Vec<Player>) -> Self {
        Self {
            total_teams: teams.len(),
            total_players: players.len(),
            total_goals: players.iter().map(|p| p.goals).sum(),
            total_assists: players.iter().map(|p| p.assists).sum(),
            top_players,
        }
    }
}

/// Entry in the player form's team selector
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamOption {
    pub id: i64,
    pub name: String,
}

impl From<&Team> for TeamOption {
    fn from(team: &Team) -> Self {
        Self {
            id: team.team_id,
            name: team.team_name.clone(),
        }
    }
}

/// Top-level navigation sections
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Section {
    #[default]
    Dashboard,
    Teams,
    Players,
    Rankings,
    Statistics,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Teams,
        Section::Players,
        Section::Rankings,
        Section::Statistics,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Teams => "Teams",
            Section::Players => "Players",
            Section::Rankings => "Rankings",
            Section::Statistics => "Statistics",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Sub-tabs of the statistics section
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum StatsTab {
    #[default]
    Players,
    Teams,
}

impl StatsTab {
    pub fn toggle(self) -> Self {
        match self {
            StatsTab::Players => StatsTab::Teams,
            StatsTab::Teams => StatsTab::Players,
        }
    }
}

/// Player search bar
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    /// Whether the search input has focus
    pub active: bool,
    pub query: String,
}

impl SearchState {
    /// The term the player list is currently filtered by, if any.
    pub fn filter(&self) -> Option<&str> {
        if self.query.trim().is_empty() {
            None
        } else {
            Some(self.query.as_str())
        }
    }
}

/// Roster overlay for a single team
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct TeamRoster {
    pub team_id: i64,
    pub team_name: String,
    pub players: DataResource<Vec<Player>>,
}

/// A destructive operation waiting for the user to confirm it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum PendingConfirm {
    DeleteTeam { id: i64, name: String },
    DeletePlayer { id: i64, name: String },
    LoadSampleData,
    ClearAllData,
}

impl PendingConfirm {
    pub fn title(&self) -> &'static str {
        match self {
            PendingConfirm::DeleteTeam { .. } => "Delete team",
            PendingConfirm::DeletePlayer { .. } => "Delete player",
            PendingConfirm::LoadSampleData => "Load sample data",
            PendingConfirm::ClearAllData => "Clear all data",
        }
    }

    pub fn message(&self) -> String {
        match self {
            PendingConfirm::DeleteTeam { name, .. } => format!(
                "Delete team '{name}'? Its players are kept but lose their team association."
            ),
            PendingConfirm::DeletePlayer { name, .. } => format!("Delete player '{name}'?"),
            PendingConfirm::LoadSampleData => {
                "This will add sample teams and players to the database. Continue?".to_string()
            }
            PendingConfirm::ClearAllData => {
                "WARNING: this deletes ALL teams and players and cannot be undone. Are you sure?"
                    .to_string()
            }
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Navigation ---
    #[debug(section = "Navigation", label = "Section", debug_fmt)]
    pub section: Section,

    #[debug(section = "Navigation", label = "Stats tab", debug_fmt)]
    pub stats_tab: StatsTab,

    // --- Loaded data ---
    #[debug(section = "Data", label = "Dashboard", debug_fmt)]
    pub dashboard: DataResource<DashboardSummary>,

    #[debug(section = "Data", label = "Teams", debug_fmt)]
    pub teams: DataResource<Vec<Team>>,

    #[debug(section = "Data", label = "Players", debug_fmt)]
    pub players: DataResource<Vec<Player>>,

    #[debug(section = "Data", label = "Rankings", debug_fmt)]
    pub rankings: DataResource<Vec<Player>>,

    #[debug(section = "Data", label = "Player stats", debug_fmt)]
    pub player_stats: DataResource<Vec<PlayerStat>>,

    #[debug(section = "Data", label = "Team stats", debug_fmt)]
    pub team_stats: DataResource<Vec<TeamStat>>,

    /// Teams offered by the player form's selector
    #[debug(section = "Data", label = "Team options", debug_fmt)]
    pub team_options: Vec<TeamOption>,

    #[debug(section = "Rankings", label = "Limit")]
    pub ranking_limit: usize,

    // --- Selection & overlays ---
    #[debug(skip)]
    pub selected_team: usize,

    #[debug(skip)]
    pub selected_player: usize,

    #[debug(section = "Players", label = "Search", debug_fmt)]
    pub search: SearchState,

    #[debug(section = "Overlay", label = "Roster", debug_fmt)]
    pub roster: Option<TeamRoster>,

    #[debug(section = "Overlay", label = "Form", debug_fmt)]
    pub form: Option<EntityForm>,

    /// A form submission is in flight
    #[debug(section = "Overlay", label = "Submitting")]
    pub form_submitting: bool,

    #[debug(section = "Overlay", label = "Confirm", debug_fmt)]
    pub confirm: Option<PendingConfirm>,

    #[debug(skip)]
    pub notifications: Notifications,
}

impl AppState {
    pub fn new(ranking_limit: usize) -> Self {
        Self {
            section: Section::default(),
            stats_tab: StatsTab::default(),
            dashboard: DataResource::Empty,
            teams: DataResource::Empty,
            players: DataResource::Empty,
            rankings: DataResource::Empty,
            player_stats: DataResource::Empty,
            team_stats: DataResource::Empty,
            team_options: Vec::new(),
            ranking_limit: ranking_limit.max(1),
            selected_team: 0,
            selected_player: 0,
            search: SearchState::default(),
            roster: None,
            form: None,
            form_submitting: false,
            confirm: None,
            notifications: Notifications::default(),
        }
    }

    pub fn current_team(&self) -> Option<&Team> {
        self.teams.data()?.get(self.selected_team)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.data()?.get(self.selected_player)
    }

    /// Whether an overlay owns keyboard input
    pub fn has_overlay(&self) -> bool {
        self.confirm.is_some() || self.form.is_some() || self.roster.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_RANKING_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_cycles_both_ways() {
        assert_eq!(Section::Dashboard.next(), Section::Teams);
        assert_eq!(Section::Statistics.next(), Section::Dashboard);
        assert_eq!(Section::Dashboard.prev(), Section::Statistics);
        assert_eq!(Section::from_index(3), Some(Section::Rankings));
        assert_eq!(Section::from_index(5), None);
    }

    #[test]
    fn dashboard_totals_sum_player_counters() {
        let teams = vec![Team::default(), Team::default()];
        let players = vec![
            Player {
                goals: 3,
                assists: 1,
                ..Default::default()
            },
            Player {
                goals: 2,
                ..Default::default()
            },
        ];

        let summary = DashboardSummary::compute(&teams, &players, Vec::new());
        assert_eq!(summary.total_teams, 2);
        assert_eq!(summary.total_players, 2);
        assert_eq!(summary.total_goals, 5);
        assert_eq!(summary.total_assists, 1);
    }

    #[test]
    fn blank_search_is_no_filter() {
        let search = SearchState {
            active: true,
            query: "   ".into(),
        };
        assert_eq!(search.filter(), None);
    }

    #[test]
    fn ranking_limit_is_at_least_one() {
        assert_eq!(AppState::new(0).ranking_limit, 1);
    }
}
