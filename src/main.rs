//! Rosterdesk - terminal client for the team/player management API

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rosterdesk::action::Action;
use rosterdesk::api::ApiClient;
use rosterdesk::config::ClientConfig;
use rosterdesk::effect::{Effect, EffectRunner};
use rosterdesk::logging;
use rosterdesk::reducer::reducer;
use rosterdesk::state::{AppState, TICK_MS};
use rosterdesk::ui::{DeskComponentId, DeskContext, DeskUi};
use tui_dispatch::{
    EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    HandlerResponse, Keybindings,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Rosterdesk - manage sports teams and players from the terminal
#[derive(Parser, Debug)]
#[command(name = "rosterdesk")]
#[command(about = "Terminal client for a sports team and player management API")]
struct Args {
    #[command(flatten)]
    config: ClientConfig,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        config,
        debug: debug_args,
    } = Args::parse();

    logging::init(&config.log_path())?;

    let api = ApiClient::new(&config.api_url, config.timeout())
        .map_err(|e| io::Error::other(format!("cannot build API client: {e}")))?;
    tracing::info!(base_url = api.base_url(), "starting rosterdesk");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let ranking_limit = config.ranking_limit();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(ranking_limit))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, api, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
    }

    let run_output = match result {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(error = %e, "app loop failed");
            return Err(e);
        }
    };
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("shutting down");
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    api: ApiClient,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(DeskUi::new()));
    let mut effects = EffectRunner::new(api);
    let mut bus: EventBus<AppState, Action, DeskComponentId, DeskContext> = EventBus::new();
    let keybindings: Keybindings<DeskContext> = Keybindings::new();

    let ui_main = Rc::clone(&ui);
    bus.register(DeskComponentId::Main, move |event, state| {
        ui_main.borrow_mut().handle_main_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DeskComponentId::Search, move |event, state| {
        ui_search.borrow_mut().handle_search_event(&event.kind, state)
    });

    let ui_roster = Rc::clone(&ui);
    bus.register(DeskComponentId::Roster, move |event, state| {
        ui_roster.borrow_mut().handle_roster_event(&event.kind, state)
    });

    let ui_form = Rc::clone(&ui);
    bus.register(DeskComponentId::Form, move |event, state| {
        ui_form.borrow_mut().handle_form_event(&event.kind, state)
    });

    let ui_confirm = Rc::clone(&ui);
    bus.register(DeskComponentId::Confirm, move |event, state| {
        ui_confirm
            .borrow_mut()
            .handle_confirm_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| effects.spawn(effect, ctx.tasks()),
        )
        .await
}
