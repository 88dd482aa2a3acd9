//! Pure table builders: records in, display strings out

use crate::state::{Player, PlayerStat, Team, TeamStat};

pub const NO_TEAMS: &str = "No teams found. Press 'a' to add one.";
pub const NO_PLAYERS: &str = "No players found. Press 'a' to add one.";
pub const NO_RANKED_PLAYERS: &str = "No players found";
pub const NO_STATS: &str = "No statistics available";
pub const NO_ROSTER: &str = "No players on this team";

const MISSING: &str = "-";
const NO_TEAM: &str = "No Team";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    /// Relative width
    pub weight: u16,
}

const fn col(title: &'static str, weight: u16) -> Column {
    Column { title, weight }
}

/// A fully rendered table. `rows` being empty means the empty message is shown.
#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub empty_message: &'static str,
}

impl TableView {
    fn build<T>(
        columns: &[Column],
        records: &[T],
        empty_message: &'static str,
        row: impl Fn(usize, &T) -> Vec<String>,
    ) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: records
                .iter()
                .enumerate()
                .map(|(i, record)| row(i, record))
                .collect(),
            empty_message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn text(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => MISSING.to_string(),
    }
}

fn team_name(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => NO_TEAM.to_string(),
    }
}

fn count_or_dash(value: i64) -> String {
    if value == 0 {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

pub fn teams_table(teams: &[Team]) -> TableView {
    const COLUMNS: [Column; 6] = [
        col("ID", 1),
        col("Name", 3),
        col("Coach", 3),
        col("Founded", 2),
        col("City", 2),
        col("Stadium", 3),
    ];
    TableView::build(&COLUMNS, teams, NO_TEAMS, |_, team| {
        vec![
            team.team_id.to_string(),
            team.team_name.clone(),
            text(&team.coach_name),
            team.founded_year
                .map(|year| year.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            text(&team.city),
            text(&team.stadium),
        ]
    })
}

pub fn players_table(players: &[Player]) -> TableView {
    const COLUMNS: [Column; 10] = [
        col("ID", 1),
        col("Name", 3),
        col("Team", 3),
        col("Position", 2),
        col("Jersey", 1),
        col("Age", 1),
        col("Ranking", 1),
        col("Goals", 1),
        col("Assists", 1),
        col("Matches", 1),
    ];
    TableView::build(&COLUMNS, players, NO_PLAYERS, |_, p| {
        vec![
            p.player_id.to_string(),
            p.full_name(),
            team_name(&p.team_name),
            text(&p.position),
            count_or_dash(p.jersey_number),
            count_or_dash(p.age),
            p.ranking.to_string(),
            p.goals.to_string(),
            p.assists.to_string(),
            p.matches_played.to_string(),
        ]
    })
}

pub fn rankings_table(players: &[Player]) -> TableView {
    const COLUMNS: [Column; 8] = [
        col("Rank", 1),
        col("Name", 3),
        col("Team", 3),
        col("Position", 2),
        col("Ranking", 1),
        col("Goals", 1),
        col("Assists", 1),
        col("Matches", 1),
    ];
    TableView::build(&COLUMNS, players, NO_RANKED_PLAYERS, |i, p| {
        vec![
            (i + 1).to_string(),
            p.full_name(),
            team_name(&p.team_name),
            text(&p.position),
            p.ranking.to_string(),
            p.goals.to_string(),
            p.assists.to_string(),
            p.matches_played.to_string(),
        ]
    })
}

pub fn top_players_table(players: &[Player]) -> TableView {
    const COLUMNS: [Column; 5] = [
        col("Rank", 1),
        col("Name", 3),
        col("Team", 3),
        col("Ranking", 1),
        col("Goals", 1),
    ];
    TableView::build(&COLUMNS, players, NO_RANKED_PLAYERS, |i, p| {
        vec![
            (i + 1).to_string(),
            p.full_name(),
            team_name(&p.team_name),
            p.ranking.to_string(),
            p.goals.to_string(),
        ]
    })
}

pub fn player_stats_table(stats: &[PlayerStat]) -> TableView {
    const COLUMNS: [Column; 9] = [
        col("Player", 3),
        col("Team", 3),
        col("Position", 2),
        col("Jersey", 1),
        col("Ranking", 1),
        col("Goals", 1),
        col("Assists", 1),
        col("Matches", 1),
        col("Goals/Match", 2),
    ];
    TableView::build(&COLUMNS, stats, NO_STATS, |_, s| {
        vec![
            s.player_name.clone(),
            team_name(&s.team_name),
            text(&s.position),
            count_or_dash(s.jersey_number),
            s.ranking.to_string(),
            s.goals.to_string(),
            s.assists.to_string(),
            s.matches_played.to_string(),
            format!("{:.2}", s.goals_per_match),
        ]
    })
}

pub fn team_stats_table(stats: &[TeamStat]) -> TableView {
    const COLUMNS: [Column; 6] = [
        col("Team", 3),
        col("Coach", 3),
        col("City", 2),
        col("Players", 1),
        col("Goals", 1),
        col("Assists", 1),
    ];
    TableView::build(&COLUMNS, stats, NO_STATS, |_, s| {
        vec![
            s.team_name.clone(),
            text(&s.coach_name),
            text(&s.city),
            s.total_players.to_string(),
            s.total_goals.to_string(),
            s.total_assists.to_string(),
        ]
    })
}

pub fn roster_table(players: &[Player]) -> TableView {
    const COLUMNS: [Column; 6] = [
        col("Name", 3),
        col("Position", 2),
        col("Jersey", 1),
        col("Ranking", 1),
        col("Goals", 1),
        col("Assists", 1),
    ];
    TableView::build(&COLUMNS, players, NO_ROSTER, |_, p| {
        vec![
            p.full_name(),
            text(&p.position),
            count_or_dash(p.jersey_number),
            p.ranking.to_string(),
            p.goals.to_string(),
            p.assists.to_string(),
        ]
    })
}
