pub mod app;
pub mod event;
pub mod layout;
pub mod viewport;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{AppContext, Result};
use crate::domain::Platform;

use self::app::{ActivePane, InputField, TuiApp};
use self::event::{Action, AppEvent, EventHandler, Message};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let config = ctx.config.clone();
    let mut tui_app = TuiApp::new(ctx.theme()?, config.browse.default_sort);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let load_delay = Duration::from_millis(config.browse.load_delay_ms);

    spawn_feed_fetch(&ctx, tx.clone());

    loop {
        terminal.draw(|frame| {
            layout::render(
                frame,
                &mut tui_app,
                &config.colors,
                &config.feed.commit_url_template,
            )
        })?;

        // The list only reports where it scrolled to after a draw
        let displayed_len = tui_app.displayed().len();
        let tail_visible = tui_app.tail_visible;
        if let Some(action) = tui_app.watcher.observe(tail_visible, displayed_len) {
            handle_action(&mut tui_app, action, &ctx, &tx, load_delay);
        }

        while let Ok(message) = rx.try_recv() {
            match message {
                Message::FeedLoaded(result) => tui_app.feed_loaded(result),
                Message::BatchReady(ticket) => tui_app.finish_load_more(ticket),
            }
        }

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.input.is_some() {
                    handle_input_key(&mut tui_app, key);
                } else {
                    tui_app.clear_status();
                    let action = config.keybindings.get_action(&key);
                    handle_action(&mut tui_app, action, &ctx, &tx, load_delay);
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// The one and only fetch of the feed. Its outcome arrives as
/// `Message::FeedLoaded`; nothing retries it.
fn spawn_feed_fetch(ctx: &AppContext, tx: UnboundedSender<Message>) {
    let fetcher = ctx.fetcher.clone();
    let url = ctx.feed_url.to_string();

    tokio::spawn(async move {
        let result = fetcher.fetch_releases(&url).await;
        let _ = tx.send(Message::FeedLoaded(result));
    });
}

fn handle_input_key(tui_app: &mut TuiApp, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            tui_app.should_quit = true;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            tui_app.input_char(c);
        }
        KeyCode::Backspace => tui_app.input_backspace(),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => tui_app.blur_input(),
        _ => {}
    }
}

fn handle_action(
    tui_app: &mut TuiApp,
    action: Action,
    ctx: &AppContext,
    tx: &UnboundedSender<Message>,
    load_delay: Duration,
) {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => {
            tui_app.move_up();
        }
        Action::MoveDown => {
            tui_app.move_down();
        }
        Action::NextPage => {
            tui_app.next_page();
        }
        Action::PrevPage => {
            tui_app.prev_page();
        }
        Action::NextPane => {
            tui_app.active_pane = tui_app.active_pane.next();
        }
        Action::PrevPane => {
            tui_app.active_pane = tui_app.active_pane.prev();
        }
        Action::FocusSearch => {
            tui_app.active_pane = ActivePane::Releases;
            tui_app.focus_input(InputField::Search);
        }
        Action::FocusFromDate => {
            tui_app.focus_input(InputField::FromDate);
        }
        Action::FocusToDate => {
            tui_app.focus_input(InputField::ToDate);
        }
        Action::ClearFilters => {
            tui_app.clear_filters();
        }
        Action::ToggleSort => {
            tui_app.toggle_sort();
        }
        Action::ToggleTheme => {
            tui_app.toggle_theme();
        }
        Action::OpenRelease => {
            let url = tui_app.selected_release().map(|r| r.url.clone());
            open_link(tui_app, url, "release page");
        }
        Action::OpenCommit => {
            let url = tui_app
                .selected_release()
                .map(|r| r.commit_url(&ctx.config.feed.commit_url_template));
            open_link(tui_app, url, "commit");
        }
        Action::DownloadWindows => {
            download(tui_app, Platform::Windows);
        }
        Action::DownloadLinux => {
            download(tui_app, Platform::Linux);
        }
        Action::LoadMore => {
            if let Some(ticket) = tui_app.begin_load_more() {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if !load_delay.is_zero() {
                        tokio::time::sleep(load_delay).await;
                    }
                    let _ = tx.send(Message::BatchReady(ticket));
                });
            }
        }
        Action::None => {}
    }
}

fn download(tui_app: &mut TuiApp, platform: Platform) {
    let Some(release) = tui_app.selected_release() else {
        return;
    };
    match release.asset_for(platform) {
        Some(asset) => {
            let url = asset.url.clone();
            open_link(tui_app, Some(url), platform.label());
        }
        None => {
            let msg = format!("No {} download for {}", platform.label(), release.tag_name);
            tui_app.set_status(msg);
        }
    }
}

fn open_link(tui_app: &mut TuiApp, url: Option<String>, what: &str) {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return;
    };

    match open::that(&url) {
        Ok(()) => {
            tracing::info!("Opened {} link {}", what, url);
            tui_app.set_status(format!("Opened {}: {}", what, url));
        }
        Err(e) => {
            tracing::warn!("Failed to open {}: {}", url, e);
            tui_app.set_status(format!("Failed to open browser: {}", e));
        }
    }
}
