use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap},
};
use tui_dispatch::DataResource;

use super::Component;
use crate::action::Action;
use crate::view::TableView;

/// What a table area shows for a resource in a given lifecycle state
#[derive(Debug, PartialEq)]
pub enum TableContent<'a> {
    Loading,
    Failed(&'a str),
    Ready(TableView),
}

impl<'a> TableContent<'a> {
    pub fn from_resource<T>(
        resource: &'a DataResource<T>,
        build: impl FnOnce(&T) -> TableView,
    ) -> Self {
        match resource {
            DataResource::Empty | DataResource::Loading => TableContent::Loading,
            DataResource::Failed(error) => TableContent::Failed(error),
            DataResource::Loaded(data) => TableContent::Ready(build(data)),
        }
    }
}

pub struct DataTableProps<'a> {
    pub title: &'a str,
    pub content: TableContent<'a>,
    /// Highlighted row, if the table is selectable
    pub selected: Option<usize>,
    pub is_focused: bool,
}

/// Bordered table with loading, error and empty states
#[derive(Default)]
pub struct DataTable;

impl Component<Action> for DataTable {
    type Props<'a> = DataTableProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DataTableProps<'_>) {
        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", props.title));

        let message = |text: String, style: Style| {
            Paragraph::new(Line::from(text).style(style))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
        };

        match props.content {
            TableContent::Loading => {
                let paragraph = message("Loading...".into(), Style::default().fg(Color::Gray));
                frame.render_widget(paragraph.block(block), area);
            }
            TableContent::Failed(error) => {
                let paragraph = message(
                    format!("Error: {error}  (press r to retry)"),
                    Style::default().fg(Color::Red),
                );
                frame.render_widget(paragraph.block(block), area);
            }
            TableContent::Ready(view) if view.is_empty() => {
                let paragraph = message(
                    view.empty_message.to_string(),
                    Style::default().fg(Color::DarkGray),
                );
                frame.render_widget(paragraph.block(block), area);
            }
            TableContent::Ready(view) => {
                let header = Row::new(view.columns.iter().map(|c| c.title))
                    .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));
                let widths: Vec<Constraint> = view
                    .columns
                    .iter()
                    .map(|c| Constraint::Fill(c.weight))
                    .collect();
                let rows = view.rows.into_iter().map(Row::new);
                let table = Table::new(rows, widths)
                    .header(header)
                    .block(block)
                    .row_highlight_style(Style::default().bg(Color::Rgb(50, 50, 70)))
                    .highlight_symbol("> ");

                let mut table_state = TableState::default().with_selected(props.selected);
                frame.render_stateful_widget(table, area, &mut table_state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Team;
    use crate::view::teams_table;
    use tui_dispatch::testing::*;

    fn render(content: TableContent<'_>) -> String {
        let mut render = RenderHarness::new(70, 8);
        let mut table = DataTable;
        render.render_to_string_plain(|frame| {
            table.render(
                frame,
                frame.area(),
                DataTableProps {
                    title: "Teams",
                    content,
                    selected: Some(0),
                    is_focused: true,
                },
            );
        })
    }

    #[test]
    fn empty_table_shows_message() {
        let output = render(TableContent::Ready(teams_table(&[])));
        assert!(output.contains("No teams found. Press 'a' to add one."));
    }

    #[test]
    fn rows_render_under_header() {
        let team = Team {
            team_id: 1,
            team_name: "Lions".into(),
            ..Default::default()
        };
        let output = render(TableContent::Ready(teams_table(&[team])));
        assert!(output.contains("Name"));
        assert!(output.contains("Lions"));
    }

    #[test]
    fn failure_shows_error() {
        let output = render(TableContent::Failed("connection refused"));
        assert!(output.contains("connection refused"));
    }

    #[test]
    fn empty_resource_is_loading() {
        let resource: DataResource<Vec<Team>> = DataResource::Empty;
        assert_eq!(
            TableContent::from_resource(&resource, |t| teams_table(t)),
            TableContent::Loading
        );
    }
}
