use crossterm::event::KeyCode;
use ratatui::{Frame, layout::Rect, style::Color};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::{Component, DataTable, DataTableProps, TableContent};
use crate::action::Action;
use crate::state::TeamRoster;
use crate::view;

pub struct RosterPanelProps<'a> {
    pub roster: &'a TeamRoster,
    pub is_focused: bool,
}

/// Overlay listing the players of one team
pub struct RosterPanel {
    modal: Modal,
}

impl Default for RosterPanel {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl RosterPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for RosterPanel {
    type Props<'a> = RosterPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') => Some(Action::RosterClose),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(76, 18, area);
        let roster = props.roster;
        let title = format!("{} - Players (Esc to close)", roster.team_name);

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let content = TableContent::from_resource(&roster.players, |p| view::roster_table(p));
            DataTable.render(
                frame,
                content_area,
                DataTableProps {
                    title: &title,
                    content,
                    selected: None,
                    is_focused: true,
                },
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::RosterClose,
                render_content: &mut render_content,
            },
        );
    }
}
