//! Actions for navigation, data loading, forms and writes

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{DashboardSummary, Player, PlayerStat, Section, Team, TeamStat};

/// A mutating request sent to the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum WriteOp {
    SaveTeam,
    SavePlayer,
    DeleteTeam,
    DeletePlayer,
    LoadSampleData,
    ClearData,
}

impl WriteOp {
    /// Prefix for the error toast when the request fails
    pub fn failure_label(self) -> &'static str {
        match self {
            WriteOp::SaveTeam => "Error saving team",
            WriteOp::SavePlayer => "Error saving player",
            WriteOp::DeleteTeam => "Error deleting team",
            WriteOp::DeletePlayer => "Error deleting player",
            WriteOp::LoadSampleData => "Error loading sample data",
            WriteOp::ClearData => "Error clearing data",
        }
    }
}

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Load every section once at startup
    Init,

    // ===== Nav category =====
    /// Switch to a section and refresh its data
    NavSelect(Section),

    NavNext,

    NavPrev,

    /// Reload the data of the visible section
    Refresh,

    /// Switch between player and team statistics
    StatsTabToggle,

    // ===== Data results =====
    DashboardDidLoad(DashboardSummary),

    DashboardDidError(String),

    TeamsDidLoad(Vec<Team>),

    TeamsDidError(String),

    /// Result: player list, tagged with the search term that produced it
    PlayersDidLoad {
        query: Option<String>,
        players: Vec<Player>,
    },

    PlayersDidError(String),

    RankingsDidLoad(Vec<Player>),

    RankingsDidError(String),

    /// Step to the next larger rankings limit
    RankingLimitNext,

    RankingLimitPrev,

    StatsDidLoad {
        players: Vec<PlayerStat>,
        teams: Vec<TeamStat>,
    },

    StatsDidError(String),

    // ===== Selection category =====
    /// Move the table cursor by a signed offset
    SelectionMove(i16),

    // ===== Search category =====
    SearchOpen,

    SearchClose,

    /// Search text changed (debounced)
    SearchQueryChange(String),

    /// Keep the filter and search without waiting for the debounce
    SearchSubmit(String),

    // ===== Roster category =====
    /// Show the players of the selected team
    RosterOpen,

    RosterDidLoad {
        team_id: i64,
        players: Vec<Player>,
    },

    RosterDidError {
        team_id: i64,
        error: String,
    },

    RosterClose,

    // ===== Form category =====
    /// Open an empty create form for the current section
    FormOpenCreate,

    /// Fetch the selected record and open it for editing
    EditSelected,

    TeamDidLoadForEdit(Team),

    PlayerDidLoadForEdit(Player),

    EditDidError(String),

    /// Result: teams for the player form's selector
    TeamOptionsDidLoad(Vec<Team>),

    FormFocusNext,

    FormFocusPrev,

    FormInput(char),

    FormBackspace,

    FormOptionNext,

    FormOptionPrev,

    FormSubmit,

    FormCancel,

    // ===== Write results =====
    WriteDidSucceed {
        op: WriteOp,
        message: String,
    },

    WriteDidFail {
        op: WriteOp,
        message: String,
    },

    // ===== Confirm category =====
    /// Ask to delete the selected record
    DeleteRequest,

    SampleDataRequest,

    ClearDataRequest,

    ConfirmAccept,

    ConfirmCancel,

    // ===== Toast category =====
    /// Dismiss the newest toast before it expires
    ToastDismiss,

    // ===== UI category =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for toast expiry
    Tick,

    /// Exit the application
    Quit,
}
