//! Create/edit forms for teams and players

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::action::WriteOp;
use crate::api::{PlayerPayload, TeamPayload};
use crate::state::{Player, Team, TeamOption};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EntityKind {
    Team,
    Player,
}

/// Create when the identifier is empty, edit otherwise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    Integer,
    Decimal,
    /// Cycled through the team options
    TeamChoice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FieldKey {
    TeamName,
    CoachName,
    FoundedYear,
    City,
    Stadium,
    FirstName,
    LastName,
    Team,
    Position,
    JerseyNumber,
    Age,
    Height,
    Weight,
    Ranking,
    Goals,
    Assists,
    MatchesPlayed,
}

impl FieldKey {
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::TeamName => "Team Name",
            FieldKey::CoachName => "Coach",
            FieldKey::FoundedYear => "Founded Year",
            FieldKey::City => "City",
            FieldKey::Stadium => "Stadium",
            FieldKey::FirstName => "First Name",
            FieldKey::LastName => "Last Name",
            FieldKey::Team => "Team",
            FieldKey::Position => "Position",
            FieldKey::JerseyNumber => "Jersey Number",
            FieldKey::Age => "Age",
            FieldKey::Height => "Height",
            FieldKey::Weight => "Weight",
            FieldKey::Ranking => "Ranking",
            FieldKey::Goals => "Goals",
            FieldKey::Assists => "Assists",
            FieldKey::MatchesPlayed => "Matches Played",
        }
    }

    pub fn input(self) -> FieldInput {
        match self {
            FieldKey::FoundedYear
            | FieldKey::JerseyNumber
            | FieldKey::Age
            | FieldKey::Ranking
            | FieldKey::Goals
            | FieldKey::Assists
            | FieldKey::MatchesPlayed => FieldInput::Integer,
            FieldKey::Height | FieldKey::Weight => FieldInput::Decimal,
            FieldKey::Team => FieldInput::TeamChoice,
            _ => FieldInput::Text,
        }
    }

    pub fn required(self) -> bool {
        matches!(
            self,
            FieldKey::TeamName | FieldKey::FirstName | FieldKey::LastName
        )
    }
}

const TEAM_FIELDS: [FieldKey; 5] = [
    FieldKey::TeamName,
    FieldKey::CoachName,
    FieldKey::FoundedYear,
    FieldKey::City,
    FieldKey::Stadium,
];

const PLAYER_FIELDS: [FieldKey; 12] = [
    FieldKey::FirstName,
    FieldKey::LastName,
    FieldKey::Team,
    FieldKey::Position,
    FieldKey::JerseyNumber,
    FieldKey::Age,
    FieldKey::Height,
    FieldKey::Weight,
    FieldKey::Ranking,
    FieldKey::Goals,
    FieldKey::Assists,
    FieldKey::MatchesPlayed,
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormField {
    pub key: FieldKey,
    pub value: String,
}

/// A validated form, ready to be sent
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    CreateTeam(TeamPayload),
    UpdateTeam { id: i64, payload: TeamPayload },
    CreatePlayer(PlayerPayload),
    UpdatePlayer { id: i64, payload: PlayerPayload },
}

impl Submission {
    pub fn op(&self) -> WriteOp {
        match self {
            Submission::CreateTeam(_) | Submission::UpdateTeam { .. } => WriteOp::SaveTeam,
            Submission::CreatePlayer(_) | Submission::UpdatePlayer { .. } => WriteOp::SavePlayer,
        }
    }
}

/// Modal form state. The identifier decides between create and update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EntityForm {
    pub kind: EntityKind,
    pub id: Option<i64>,
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl EntityForm {
    fn blank(kind: EntityKind, id: Option<i64>) -> Self {
        let keys: &[FieldKey] = match kind {
            EntityKind::Team => &TEAM_FIELDS,
            EntityKind::Player => &PLAYER_FIELDS,
        };
        Self {
            kind,
            id,
            fields: keys
                .iter()
                .map(|&key| FormField {
                    key,
                    value: String::new(),
                })
                .collect(),
            focused: 0,
        }
    }

    pub fn new_team() -> Self {
        Self::blank(EntityKind::Team, None)
    }

    pub fn new_player() -> Self {
        Self::blank(EntityKind::Player, None)
    }

    pub fn edit_team(team: &Team) -> Self {
        let mut form = Self::blank(EntityKind::Team, Some(team.team_id));
        form.set_value(FieldKey::TeamName, team.team_name.clone());
        form.set_value(FieldKey::CoachName, team.coach_name.clone().unwrap_or_default());
        form.set_value(FieldKey::FoundedYear, blank_if_zero(team.founded_year.unwrap_or(0)));
        form.set_value(FieldKey::City, team.city.clone().unwrap_or_default());
        form.set_value(FieldKey::Stadium, team.stadium.clone().unwrap_or_default());
        form
    }

    pub fn edit_player(player: &Player) -> Self {
        let mut form = Self::blank(EntityKind::Player, Some(player.player_id));
        form.set_value(FieldKey::FirstName, player.first_name.clone());
        form.set_value(FieldKey::LastName, player.last_name.clone());
        form.set_value(
            FieldKey::Team,
            player.team_id.map(|id| id.to_string()).unwrap_or_default(),
        );
        form.set_value(FieldKey::Position, player.position.clone().unwrap_or_default());
        form.set_value(FieldKey::JerseyNumber, blank_if_zero(player.jersey_number));
        form.set_value(FieldKey::Age, blank_if_zero(player.age));
        form.set_value(FieldKey::Height, blank_if_zero_f(player.height));
        form.set_value(FieldKey::Weight, blank_if_zero_f(player.weight));
        form.set_value(FieldKey::Ranking, player.ranking.to_string());
        form.set_value(FieldKey::Goals, player.goals.to_string());
        form.set_value(FieldKey::Assists, player.assists.to_string());
        form.set_value(FieldKey::MatchesPlayed, player.matches_played.to_string());
        form
    }

    pub fn mode(&self) -> FormMode {
        match self.id {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    pub fn title(&self) -> &'static str {
        match (self.kind, self.mode()) {
            (EntityKind::Team, FormMode::Create) => "Add Team",
            (EntityKind::Team, FormMode::Edit(_)) => "Edit Team",
            (EntityKind::Player, FormMode::Create) => "Add Player",
            (EntityKind::Player, FormMode::Edit(_)) => "Edit Player",
        }
    }

    pub fn value(&self, key: FieldKey) -> &str {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }

    pub fn set_value(&mut self, key: FieldKey, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.key == key) {
            field.value = value.into();
        }
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focused)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Type into the focused field. Returns false when the key was rejected.
    pub fn input(&mut self, ch: char) -> bool {
        let Some(field) = self.fields.get_mut(self.focused) else {
            return false;
        };
        let accepted = match field.key.input() {
            FieldInput::Text => !ch.is_control(),
            FieldInput::Integer => ch.is_ascii_digit() || ch == '-',
            FieldInput::Decimal => ch.is_ascii_digit() || ch == '-' || ch == '.',
            FieldInput::TeamChoice => false,
        };
        if accepted {
            field.value.push(ch);
        }
        accepted
    }

    pub fn backspace(&mut self) -> bool {
        match self.fields.get_mut(self.focused) {
            Some(field) if field.key.input() == FieldInput::TeamChoice => {
                let changed = !field.value.is_empty();
                field.value.clear();
                changed
            }
            Some(field) => field.value.pop().is_some(),
            None => false,
        }
    }

    /// Step the focused team selector through "No Team" and `options`.
    pub fn cycle_choice(&mut self, options: &[TeamOption], forward: bool) -> bool {
        let Some(field) = self.fields.get_mut(self.focused) else {
            return false;
        };
        if field.key.input() != FieldInput::TeamChoice {
            return false;
        }
        // Slot 0 is "No Team", slot i + 1 is options[i].
        let slots = options.len() + 1;
        let current = parse_int(&field.value)
            .and_then(|id| options.iter().position(|opt| opt.id == id))
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        field.value = match next {
            0 => String::new(),
            slot => options[slot - 1].id.to_string(),
        };
        true
    }

    /// Label of the team currently picked in the selector.
    pub fn team_choice_label(&self, options: &[TeamOption]) -> String {
        match parse_int(self.value(FieldKey::Team)).filter(|id| *id != 0) {
            None => "No Team".to_string(),
            Some(id) => options
                .iter()
                .find(|opt| opt.id == id)
                .map(|opt| opt.name.clone())
                .unwrap_or_else(|| format!("Team #{id}")),
        }
    }

    /// Read every field into a create or update request.
    pub fn submission(&self) -> Result<Submission, FormError> {
        if let Some(missing) = self
            .fields
            .iter()
            .find(|field| field.key.required() && field.value.trim().is_empty())
        {
            return Err(FormError::MissingField(missing.key.label()));
        }

        Ok(match self.kind {
            EntityKind::Team => {
                let payload = self.team_payload();
                match self.mode() {
                    FormMode::Create => Submission::CreateTeam(payload),
                    FormMode::Edit(id) => Submission::UpdateTeam { id, payload },
                }
            }
            EntityKind::Player => {
                let payload = self.player_payload();
                match self.mode() {
                    FormMode::Create => Submission::CreatePlayer(payload),
                    FormMode::Edit(id) => Submission::UpdatePlayer { id, payload },
                }
            }
        })
    }

    fn team_payload(&self) -> TeamPayload {
        TeamPayload {
            team_name: self.value(FieldKey::TeamName).to_string(),
            coach_name: self.value(FieldKey::CoachName).to_string(),
            founded_year: nonzero(self.value(FieldKey::FoundedYear)),
            city: self.value(FieldKey::City).to_string(),
            stadium: self.value(FieldKey::Stadium).to_string(),
        }
    }

    fn player_payload(&self) -> PlayerPayload {
        let int = |key| parse_int(self.value(key)).unwrap_or(0);
        let dec = |key| parse_decimal(self.value(key)).unwrap_or(0.0);
        PlayerPayload {
            first_name: self.value(FieldKey::FirstName).to_string(),
            last_name: self.value(FieldKey::LastName).to_string(),
            team_id: nonzero(self.value(FieldKey::Team)),
            position: self.value(FieldKey::Position).to_string(),
            jersey_number: int(FieldKey::JerseyNumber),
            age: int(FieldKey::Age),
            height: dec(FieldKey::Height),
            weight: dec(FieldKey::Weight),
            ranking: int(FieldKey::Ranking),
            goals: int(FieldKey::Goals),
            assists: int(FieldKey::Assists),
            matches_played: int(FieldKey::MatchesPlayed),
        }
    }
}

/// Parse the leading integer of `raw`, ignoring trailing garbage.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Parse the leading decimal number of `raw`, ignoring trailing garbage.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['+', '-']));
    let mut digits = 0;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        if b.is_ascii_digit() {
            digits += 1;
        } else if b == b'.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse().ok()
}

/// Integer fields that map 0 and garbage to null.
fn nonzero(raw: &str) -> Option<i64> {
    parse_int(raw).filter(|value| *value != 0)
}

fn blank_if_zero(value: i64) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn blank_if_zero_f(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}
