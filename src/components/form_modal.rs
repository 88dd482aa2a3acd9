use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::form::{EntityForm, FieldInput};
use crate::state::TeamOption;

const LABEL_WIDTH: usize = 16;

pub struct FormModalProps<'a> {
    pub form: &'a EntityForm,
    pub team_options: &'a [TeamOption],
    pub submitting: bool,
    pub is_focused: bool,
}

/// Create/edit form for a team or player
pub struct FormModal {
    modal: Modal,
}

impl Default for FormModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl FormModal {
    pub fn new() -> Self {
        Self::default()
    }

    fn field_lines(props: &FormModalProps<'_>) -> Vec<Line<'static>> {
        let form = props.form;
        form.fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = i == form.focused;
                let marker = if focused { "> " } else { "  " };
                let required = if field.key.required() { "*" } else { "" };
                let label = format!("{}{}", field.key.label(), required);

                let value = match field.key.input() {
                    FieldInput::TeamChoice => {
                        format!("< {} >", form.team_choice_label(props.team_options))
                    }
                    _ if focused => format!("{}_", field.value),
                    _ => field.value.clone(),
                };

                let label_style = if focused {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let value_style = if focused {
                    Style::default().fg(Color::White).bg(Color::Rgb(50, 50, 60))
                } else {
                    Style::default().fg(Color::White)
                };

                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style),
                    Span::styled(value, value_style),
                ])
            })
            .collect()
    }
}

impl Component<Action> for FormModal {
    type Props<'a> = FormModalProps<'a>;

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

        let on_choice = props
            .form
            .focused_field()
            .is_some_and(|field| field.key.input() == FieldInput::TeamChoice);

        match key.code {
            KeyCode::Esc => Some(Action::FormCancel),
            KeyCode::Enter => Some(Action::FormSubmit),
            KeyCode::Tab | KeyCode::Down => Some(Action::FormFocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FormFocusPrev),
            KeyCode::Backspace => Some(Action::FormBackspace),
            KeyCode::Right | KeyCode::Char(' ') if on_choice => Some(Action::FormOptionNext),
            KeyCode::Left if on_choice => Some(Action::FormOptionPrev),
            KeyCode::Char(c) if !on_choice => Some(Action::FormInput(c)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = Self::field_lines(&props);
        let height = (lines.len() as u16).saturating_add(6);
        let modal_area = centered_rect(64, height, area);
        let title = props.form.title();
        let footer = if props.submitting {
            Line::from(Span::styled("Saving...", Style::default().fg(Color::Yellow)))
        } else {
            Line::from(Span::styled(
                "Enter save  Tab next field  \u{2190}/\u{2192} pick team  Esc cancel",
                Style::default().fg(Color::DarkGray),
            ))
        };

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(2), // Title
                Constraint::Min(1),    // Fields
                Constraint::Length(1), // Footer
            ])
            .split(content_area);

            let heading = Paragraph::new(Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            frame.render_widget(heading, chunks[0]);
            frame.render_widget(Paragraph::new(lines.clone()), chunks[1]);
            frame.render_widget(Paragraph::new(footer.clone()), chunks[2]);
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
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::FormCancel,
                render_content: &mut render_content,
            },
        );
    }
}
