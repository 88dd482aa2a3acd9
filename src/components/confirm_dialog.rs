use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::state::PendingConfirm;

pub struct ConfirmDialogProps<'a> {
    pub pending: &'a PendingConfirm,
    pub is_focused: bool,
}

/// Yes/no prompt guarding deletes and bulk operations
pub struct ConfirmDialog {
    modal: Modal,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ConfirmDialog {
    type Props<'a> = ConfirmDialogProps<'a>;

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
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    Some(Action::ConfirmAccept)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    Some(Action::ConfirmCancel)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(56, 9, area);
        let pending = props.pending;
        let danger = matches!(pending, PendingConfirm::ClearAllData);

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(2), // Title
                Constraint::Min(1),    // Message
                Constraint::Length(1), // Hint
            ])
            .split(content_area);

            let title_color = if danger { Color::Red } else { Color::Yellow };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    pending.title(),
                    Style::default()
                        .fg(title_color)
                        .add_modifier(Modifier::BOLD),
                ))),
                chunks[0],
            );
            frame.render_widget(
                Paragraph::new(pending.message()).wrap(Wrap { trim: true }),
                chunks[1],
            );
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "[y] confirm  [n] cancel",
                    Style::default().fg(Color::DarkGray),
                ))),
                chunks[2],
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
                        bg: Some(Color::Rgb(45, 30, 35)),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::ConfirmCancel,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn y_accepts_and_n_cancels() {
        let pending = PendingConfirm::LoadSampleData;
        let mut dialog = ConfirmDialog::new();
        let props = || ConfirmDialogProps {
            pending: &pending,
            is_focused: true,
        };

        let yes: Vec<_> = dialog
            .handle_event(&EventKind::Key(key("y")), props())
            .into_iter()
            .collect();
        yes.assert_first(Action::ConfirmAccept);

        let no: Vec<_> = dialog
            .handle_event(&EventKind::Key(key("n")), props())
            .into_iter()
            .collect();
        no.assert_first(Action::ConfirmCancel);
    }

    #[test]
    fn delete_prompt_names_the_record() {
        let pending = PendingConfirm::DeleteTeam {
            id: 1,
            name: "Lions".into(),
        };
        let mut render = RenderHarness::new(80, 20);
        let mut dialog = ConfirmDialog::new();

        let output = render.render_to_string_plain(|frame| {
            dialog.render(
                frame,
                frame.area(),
                ConfirmDialogProps {
                    pending: &pending,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Delete team"));
        assert!(output.contains("Lions"));
    }
}
