use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, DataTable, DataTableProps, TableContent};
use crate::action::Action;
use crate::state::{AppState, DashboardSummary, Section, StatsTab};
use crate::view;

const TABS_HEIGHT: u16 = 3;
const SEARCH_HEIGHT: u16 = 3;

/// Props for MainView - read-only view of state
pub struct MainViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Section tabs, the active section's body and the key hints
#[derive(Default)]
pub struct MainView;

fn split(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(TABS_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(1), // Help bar
    ])
    .split(area);
    (chunks[0], chunks[1], chunks[2])
}

fn split_players(body: Rect) -> (Rect, Rect) {
    let chunks =
        Layout::vertical([Constraint::Length(SEARCH_HEIGHT), Constraint::Min(1)]).split(body);
    (chunks[0], chunks[1])
}

/// Where the search input sits inside the players section.
pub fn search_bar_area(area: Rect) -> Rect {
    let (_, body, _) = split(area);
    split_players(body).0
}

impl MainView {
    fn section_keys(state: &AppState, code: KeyCode) -> Option<Action> {
        let section = state.section;
        let crud = matches!(section, Section::Teams | Section::Players);
        match code {
            KeyCode::Char('j') | KeyCode::Down if crud => Some(Action::SelectionMove(1)),
            KeyCode::Char('k') | KeyCode::Up if crud => Some(Action::SelectionMove(-1)),
            KeyCode::PageDown if crud => Some(Action::SelectionMove(10)),
            KeyCode::PageUp if crud => Some(Action::SelectionMove(-10)),
            KeyCode::Char('a') if crud => Some(Action::FormOpenCreate),
            KeyCode::Char('e') | KeyCode::Enter if crud => Some(Action::EditSelected),
            KeyCode::Char('d') | KeyCode::Delete if crud => Some(Action::DeleteRequest),
            KeyCode::Char('v') if section == Section::Teams => Some(Action::RosterOpen),
            KeyCode::Char('/') if section == Section::Players => Some(Action::SearchOpen),
            KeyCode::Esc if section == Section::Players && state.search.filter().is_some() => {
                Some(Action::SearchClose)
            }
            KeyCode::Char('+') | KeyCode::Char(']') if section == Section::Rankings => {
                Some(Action::RankingLimitNext)
            }
            KeyCode::Char('-') | KeyCode::Char('[') if section == Section::Rankings => {
                Some(Action::RankingLimitPrev)
            }
            KeyCode::Char('t') if section == Section::Statistics => Some(Action::StatsTabToggle),
            _ => None,
        }
    }

    fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
        let titles: Vec<Line> = Section::ALL
            .iter()
            .enumerate()
            .map(|(i, section)| Line::from(format!("{} {}", i + 1, section.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(state.section.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Rosterdesk "),
            )
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(area);

        let summary = state.dashboard.data();
        let cards = [
            ("Teams", summary.map(|s| s.total_teams.to_string())),
            ("Players", summary.map(|s| s.total_players.to_string())),
            ("Goals", summary.map(|s| s.total_goals.to_string())),
            ("Assists", summary.map(|s| s.total_assists.to_string())),
        ];
        let card_areas = Layout::horizontal([Constraint::Fill(1); 4]).split(chunks[0]);
        for ((label, value), card_area) in cards.into_iter().zip(card_areas.iter()) {
            let value = value.unwrap_or_else(|| "-".to_string());
            let card = Paragraph::new(Line::from(Span::styled(
                value,
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {label} ")),
            );
            frame.render_widget(card, *card_area);
        }

        let content = TableContent::from_resource(&state.dashboard, |s: &DashboardSummary| {
            view::top_players_table(&s.top_players)
        });
        DataTable.render(
            frame,
            chunks[1],
            DataTableProps {
                title: "Top Players",
                content,
                selected: None,
                is_focused,
            },
        );
    }

    fn render_players(frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
        let (search_area, table_area) = split_players(area);

        // The live input is drawn on top of this by the search bar while it has focus.
        let text = match state.search.filter() {
            Some(query) => Line::from(vec![
                Span::raw(query.to_string()),
                Span::styled("  (Esc to clear)", Style::default().fg(Color::DarkGray)),
            ]),
            None => Line::from(Span::styled(
                "Press / to search players",
                Style::default().fg(Color::DarkGray),
            )),
        };
        let search = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" Search "));
        frame.render_widget(search, search_area);

        let title = match state.search.filter() {
            Some(_) => "Players (filtered)",
            None => "Players",
        };
        DataTable.render(
            frame,
            table_area,
            DataTableProps {
                title,
                content: TableContent::from_resource(&state.players, |p| view::players_table(p)),
                selected: Some(state.selected_player),
                is_focused,
            },
        );
    }

    fn render_statistics(frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);
        let selected = match state.stats_tab {
            StatsTab::Players => 0,
            StatsTab::Teams => 1,
        };
        let tabs = Tabs::new(vec!["Player Stats", "Team Stats"])
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        let (title, content) = match state.stats_tab {
            StatsTab::Players => (
                "Player Statistics",
                TableContent::from_resource(&state.player_stats, |s| view::player_stats_table(s)),
            ),
            StatsTab::Teams => (
                "Team Statistics",
                TableContent::from_resource(&state.team_stats, |s| view::team_stats_table(s)),
            ),
        };
        DataTable.render(
            frame,
            chunks[1],
            DataTableProps {
                title,
                content,
                selected: None,
                is_focused,
            },
        );
    }

    fn hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
        let mut hints = vec![StatusBarHint::new("1-5", "section")];
        match state.section {
            Section::Teams => hints.extend([
                StatusBarHint::new("a", "add"),
                StatusBarHint::new("e", "edit"),
                StatusBarHint::new("d", "delete"),
                StatusBarHint::new("v", "players"),
            ]),
            Section::Players => hints.extend([
                StatusBarHint::new("a", "add"),
                StatusBarHint::new("e", "edit"),
                StatusBarHint::new("d", "delete"),
                StatusBarHint::new("/", "search"),
            ]),
            Section::Rankings => hints.push(StatusBarHint::new("+/-", "limit")),
            Section::Statistics => hints.push(StatusBarHint::new("t", "tab")),
            Section::Dashboard => hints.extend([
                StatusBarHint::new("S", "sample data"),
                StatusBarHint::new("X", "clear"),
            ]),
        }
        if !state.notifications.is_empty() {
            hints.push(StatusBarHint::new("c", "dismiss"));
        }
        hints.extend([
            StatusBarHint::new("r", "refresh"),
            StatusBarHint::new("q", "quit"),
        ]);
        hints
    }
}

impl Component<Action> for MainView {
    type Props<'a> = MainViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }

        match key.code {
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                Section::from_index(index).map(Action::NavSelect)
            }
            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => Some(Action::NavNext),
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => Some(Action::NavPrev),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Refresh),
            KeyCode::Char('S') => Some(Action::SampleDataRequest),
            KeyCode::Char('X') => Some(Action::ClearDataRequest),
            KeyCode::Char('c') if !props.state.notifications.is_empty() => {
                Some(Action::ToastDismiss)
            }
            KeyCode::Char('q') => Some(Action::Quit),
            code => Self::section_keys(props.state, code),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: MainViewProps<'_>) {
        let (tabs_area, body, help_area) = split(area);
        let state = props.state;
        let focused = props.is_focused;

        Self::render_tabs(frame, tabs_area, state);

        match state.section {
            Section::Dashboard => Self::render_dashboard(frame, body, state, focused),
            Section::Teams => DataTable.render(
                frame,
                body,
                DataTableProps {
                    title: "Teams",
                    content: TableContent::from_resource(&state.teams, |t| view::teams_table(t)),
                    selected: Some(state.selected_team),
                    is_focused: focused,
                },
            ),
            Section::Players => Self::render_players(frame, body, state, focused),
            Section::Rankings => {
                let title = format!("Top {} Players", state.ranking_limit);
                DataTable.render(
                    frame,
                    body,
                    DataTableProps {
                        title: &title,
                        content: TableContent::from_resource(&state.rankings, |p| {
                            view::rankings_table(p)
                        }),
                        selected: None,
                        is_focused: focused,
                    },
                );
            }
            Section::Statistics => Self::render_statistics(frame, body, state, focused),
        }

        let hints = Self::hints(state);
        let status = if section_is_loading(state) {
            "Loading..."
        } else {
            ""
        };
        let status_items = [StatusBarItem::span(Span::styled(
            status,
            Style::default().fg(Color::Yellow),
        ))];
        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            help_area,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints).with_separator("  "),
                right: StatusBarSection::items(&status_items),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

/// Loading state of the resource behind the active section
pub fn section_is_loading(state: &AppState) -> bool {
    fn loading<T>(resource: &DataResource<T>) -> bool {
        resource.is_loading()
    }
    match state.section {
        Section::Dashboard => loading(&state.dashboard),
        Section::Teams => loading(&state.teams),
        Section::Players => loading(&state.players),
        Section::Rankings => loading(&state.rankings),
        Section::Statistics => loading(&state.player_stats),
    }
}
