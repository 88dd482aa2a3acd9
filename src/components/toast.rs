use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::notify::{Toast, ToastKind};

pub struct ToastStackProps<'a> {
    pub toasts: &'a [Toast],
}

/// Toasts stacked in the top-right corner, newest at the bottom
#[derive(Default)]
pub struct ToastStack;

const MAX_WIDTH: u16 = 60;
const TOP_OFFSET: u16 = 1;

impl Component<Action> for ToastStack {
    type Props<'a> = ToastStackProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut y = area.y.saturating_add(TOP_OFFSET);
        for toast in props.toasts {
            if y >= area.bottom() {
                break;
            }
            let (icon, bg) = match toast.kind {
                ToastKind::Success => ("\u{2713}", Color::Rgb(30, 110, 60)),
                ToastKind::Error => ("\u{2717}", Color::Rgb(150, 40, 40)),
            };
            let text = format!(" {icon} {} ", toast.message);
            let width = (text.chars().count() as u16)
                .min(MAX_WIDTH)
                .min(area.width);
            let rect = Rect {
                x: area.right().saturating_sub(width + 1).max(area.x),
                y,
                width,
                height: 1,
            };

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::White)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ))),
                rect,
            );
            y += 1;
        }
    }
}
