use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

const PLACEHOLDER: &str = "Search players by name...";

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
}

/// Player search input, shown over the players section while focused
pub struct SearchBar {
    input: TextInput,
    was_open: bool,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            was_open: false,
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a fresh cursor each time the bar gains focus.
    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.input = TextInput::new();
        }
        self.was_open = is_open;
    }

    fn input_style() -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(Color::Rgb(50, 50, 60)),
                fg: None,
            },
            placeholder_style: None,
            cursor_style: None,
        }
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::SearchClose],
            KeyCode::Enter => return vec![Action::SearchSubmit(props.query.to_string())],
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: Self::input_style(),
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Search (Enter keep, Esc clear) ");
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: Self::input_style(),
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, inner, input_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn handle(bar: &mut SearchBar, query: &str, event: EventKind) -> Vec<Action> {
        bar.handle_event(
            &event,
            SearchBarProps {
                query,
                is_focused: true,
            },
        )
        .into_iter()
        .collect()
    }

    #[test]
    fn typing_changes_query() {
        let mut bar = SearchBar::new();
        let actions = handle(&mut bar, "", EventKind::Key(key("a")));
        actions.assert_first(Action::SearchQueryChange("a".into()));
    }

    #[test]
    fn enter_keeps_filter_and_esc_clears() {
        let mut bar = SearchBar::new();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        handle(&mut bar, "ann", EventKind::Key(enter))
            .assert_first(Action::SearchSubmit("ann".into()));

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        handle(&mut bar, "ann", EventKind::Key(esc)).assert_first(Action::SearchClose);
    }
}
