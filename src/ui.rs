//! Event routing and top-level composition of the components

use ratatui::{Frame, layout::Rect};
use tui_dispatch::{EventContext, EventKind, EventRoutingState, HandlerResponse, RenderContext};

use crate::action::Action;
use crate::components::{
    search_bar_area, Component, ConfirmDialog, ConfirmDialogProps, FormModal, FormModalProps,
    MainView, MainViewProps, RosterPanel, RosterPanelProps, SearchBar, SearchBarProps, ToastStack,
    ToastStackProps,
};
use crate::state::{AppState, Section};

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DeskComponentId {
    Main,
    Search,
    Roster,
    Form,
    Confirm,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DeskContext {
    Main,
    Search,
    Roster,
    Form,
    Confirm,
}

impl AppState {
    fn search_focused(&self) -> bool {
        self.search.active && self.section == Section::Players
    }

    /// Topmost overlay; it receives every key.
    fn top_overlay(&self) -> Option<DeskComponentId> {
        if self.confirm.is_some() {
            Some(DeskComponentId::Confirm)
        } else if self.form.is_some() {
            Some(DeskComponentId::Form)
        } else if self.roster.is_some() {
            Some(DeskComponentId::Roster)
        } else if self.search_focused() {
            Some(DeskComponentId::Search)
        } else {
            None
        }
    }
}

impl EventRoutingState<DeskComponentId, DeskContext> for AppState {
    fn focused(&self) -> Option<DeskComponentId> {
        Some(self.top_overlay().unwrap_or(DeskComponentId::Main))
    }

    fn modal(&self) -> Option<DeskComponentId> {
        self.top_overlay()
    }

    fn binding_context(&self, id: DeskComponentId) -> DeskContext {
        match id {
            DeskComponentId::Main => DeskContext::Main,
            DeskComponentId::Search => DeskContext::Search,
            DeskComponentId::Roster => DeskContext::Roster,
            DeskComponentId::Form => DeskContext::Form,
            DeskComponentId::Confirm => DeskContext::Confirm,
        }
    }

    fn default_context(&self) -> DeskContext {
        DeskContext::Main
    }
}

fn respond(actions: Vec<Action>, consumed: bool) -> HandlerResponse<Action> {
    if actions.is_empty() && !consumed {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

/// Owns the stateful components and wires them to `AppState`
pub struct DeskUi {
    main: MainView,
    search: SearchBar,
    roster: RosterPanel,
    form: FormModal,
    confirm: ConfirmDialog,
    toasts: ToastStack,
}

impl Default for DeskUi {
    fn default() -> Self {
        Self::new()
    }
}

impl DeskUi {
    pub fn new() -> Self {
        Self {
            main: MainView,
            search: SearchBar::new(),
            roster: RosterPanel::new(),
            form: FormModal::new(),
            confirm: ConfirmDialog::new(),
            toasts: ToastStack,
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<DeskComponentId>,
    ) {
        let overlay = state.top_overlay();
        event_ctx.set_component_area(DeskComponentId::Main, area);
        self.main.render(
            frame,
            area,
            MainViewProps {
                state,
                is_focused: render_ctx.is_focused() && overlay.is_none(),
            },
        );

        let search_open = state.search_focused();
        self.search.set_open(search_open);
        if search_open {
            let search_area = search_bar_area(area);
            event_ctx.set_component_area(DeskComponentId::Search, search_area);
            self.search.render(
                frame,
                search_area,
                SearchBarProps {
                    query: &state.search.query,
                    is_focused: render_ctx.is_focused()
                        && overlay == Some(DeskComponentId::Search),
                },
            );
        } else {
            event_ctx.component_areas.remove(&DeskComponentId::Search);
        }

        if let Some(roster) = &state.roster {
            event_ctx.set_component_area(DeskComponentId::Roster, area);
            self.roster.render(
                frame,
                area,
                RosterPanelProps {
                    roster,
                    is_focused: render_ctx.is_focused()
                        && overlay == Some(DeskComponentId::Roster),
                },
            );
        } else {
            event_ctx.component_areas.remove(&DeskComponentId::Roster);
        }

        if let Some(form) = &state.form {
            event_ctx.set_component_area(DeskComponentId::Form, area);
            self.form.render(
                frame,
                area,
                FormModalProps {
                    form,
                    team_options: &state.team_options,
                    submitting: state.form_submitting,
                    is_focused: render_ctx.is_focused() && overlay == Some(DeskComponentId::Form),
                },
            );
        } else {
            event_ctx.component_areas.remove(&DeskComponentId::Form);
        }

        if let Some(pending) = &state.confirm {
            event_ctx.set_component_area(DeskComponentId::Confirm, area);
            self.confirm.render(
                frame,
                area,
                ConfirmDialogProps {
                    pending,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx.component_areas.remove(&DeskComponentId::Confirm);
        }

        self.toasts.render(
            frame,
            area,
            ToastStackProps {
                toasts: state.notifications.toasts(),
            },
        );
    }

    pub fn handle_main_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = MainViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.main.handle_event(event, props).into_iter().collect();
        respond(actions, false)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_focused());
        let props = SearchBarProps {
            query: &state.search.query,
            is_focused: true,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        respond(actions, true)
    }

    pub fn handle_roster_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(roster) = &state.roster else {
            return HandlerResponse::ignored();
        };
        let props = RosterPanelProps {
            roster,
            is_focused: true,
        };
        let actions: Vec<_> = self.roster.handle_event(event, props).into_iter().collect();
        respond(actions, true)
    }

    pub fn handle_form_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(form) = &state.form else {
            return HandlerResponse::ignored();
        };
        let props = FormModalProps {
            form,
            team_options: &state.team_options,
            submitting: state.form_submitting,
            is_focused: true,
        };
        let actions: Vec<_> = self.form.handle_event(event, props).into_iter().collect();
        respond(actions, true)
    }

    pub fn handle_confirm_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(pending) = &state.confirm else {
            return HandlerResponse::ignored();
        };
        let props = ConfirmDialogProps {
            pending,
            is_focused: true,
        };
        let actions: Vec<_> = self.confirm.handle_event(event, props).into_iter().collect();
        respond(actions, true)
    }
}
