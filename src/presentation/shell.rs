// Dashboard shell - widget wiring, layout and the terminal event loop
use crate::application::fetcher::EndpointFetcher;
use crate::application::widget::Widget;
use crate::domain::extractor::Extractor;
use crate::domain::node_config::ConfigExtractor;
use crate::domain::performance::PerformanceExtractor;
use crate::domain::points::PointsExtractor;
use crate::domain::qos::QosExtractor;
use crate::domain::status::StatusExtractor;
use crate::domain::summary::Snapshot;
use crate::infrastructure::config::Settings;
use crate::presentation::content::PanelContent;
use crate::presentation::panels::{
    render_config, render_performance, render_points, render_qos, render_status,
};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use futures::StreamExt;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinSet;

pub const TITLE: &str = "Synchronizer Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Status,
    Config,
    Performance,
    Qos,
    Points,
}

impl Slot {
    pub const ALL: [Slot; 5] = [Slot::Status, Slot::Config, Slot::Performance, Slot::Qos, Slot::Points];

    pub fn title(self) -> &'static str {
        match self {
            Slot::Status => "Service Status",
            Slot::Config => "Configuration",
            Slot::Performance => "Performance",
            Slot::Qos => "QoS Metrics",
            Slot::Points => "Points",
        }
    }

    pub fn interval(self) -> Duration {
        match self {
            Slot::Status => Duration::from_secs(10),
            Slot::Config => Duration::from_secs(15),
            Slot::Performance | Slot::Qos => Duration::from_secs(5),
            Slot::Points => Duration::from_secs(15),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelUpdate {
    pub slot: Slot,
    pub content: PanelContent,
}

/// Latest rendered content of every panel.
#[derive(Debug, Clone)]
pub struct Dashboard {
    panels: [PanelContent; 5],
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            panels: std::array::from_fn(|_| PanelContent::loading()),
        }
    }
}

impl Dashboard {
    pub fn panel(&self, slot: Slot) -> &PanelContent {
        &self.panels[slot.index()]
    }

    /// Returns whether the panel actually changed.
    pub fn apply(&mut self, update: PanelUpdate) -> bool {
        let panel = &mut self.panels[update.slot.index()];
        if *panel == update.content {
            return false;
        }
        *panel = update.content;
        true
    }

    pub fn draw(&self, frame: &mut Frame) {
        let [header, top, middle, bottom, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(9),
            Constraint::Min(8),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Line::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)).alignment(Alignment::Center),
            header,
        );

        let halves = |area| Layout::horizontal([Constraint::Percentage(50); 2]).split(area);
        let top = halves(top);
        let middle = halves(middle);

        self.draw_panel(frame, Slot::Status, top[0]);
        self.draw_panel(frame, Slot::Config, top[1]);
        self.draw_panel(frame, Slot::Performance, middle[0]);
        self.draw_panel(frame, Slot::Qos, middle[1]);
        self.draw_panel(frame, Slot::Points, bottom);

        frame.render_widget(
            Line::styled(" q quit  r refresh", Style::default().add_modifier(Modifier::DIM)),
            footer,
        );
    }

    fn draw_panel(&self, frame: &mut Frame, slot: Slot, area: ratatui::layout::Rect) {
        self.panel(slot).draw(frame, area, slot.title());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    Ignore,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::Ignore,
    }
}

/// Spawn one task per widget. Each renders on state change and sends the
/// content to the shell.
pub fn spawn_widgets(
    settings: &Settings,
    fetcher: Arc<dyn EndpointFetcher>,
    updates: mpsc::UnboundedSender<PanelUpdate>,
    refresh: Arc<Notify>,
) -> JoinSet<()> {
    let mut widgets = JoinSet::new();
    let api = settings.api_base.as_str();

    spawn_widget(&mut widgets, Slot::Status, StatusExtractor::new(api), render_status, &fetcher, &updates, &refresh);
    spawn_widget(
        &mut widgets,
        Slot::Config,
        ConfigExtractor::new(api, &settings.metrics_base),
        render_config,
        &fetcher,
        &updates,
        &refresh,
    );
    spawn_widget(
        &mut widgets,
        Slot::Performance,
        PerformanceExtractor::new(api),
        render_performance,
        &fetcher,
        &updates,
        &refresh,
    );
    spawn_widget(&mut widgets, Slot::Qos, QosExtractor::new(api), render_qos, &fetcher, &updates, &refresh);
    spawn_widget(&mut widgets, Slot::Points, PointsExtractor::new(api), render_points, &fetcher, &updates, &refresh);

    widgets
}

fn spawn_widget<E: Extractor>(
    widgets: &mut JoinSet<()>,
    slot: Slot,
    extractor: E,
    render: fn(&Snapshot<E::Summary>) -> PanelContent,
    fetcher: &Arc<dyn EndpointFetcher>,
    updates: &mpsc::UnboundedSender<PanelUpdate>,
    refresh: &Arc<Notify>,
) {
    let updates = updates.clone();
    let widget = Widget::new(
        slot.title(),
        fetcher.clone(),
        extractor,
        slot.interval(),
        move |snapshot: &Snapshot<E::Summary>| {
            let _ = updates.send(PanelUpdate {
                slot,
                content: render(snapshot),
            });
        },
    );
    widgets.spawn(widget.run(refresh.clone()));
}

/// Restores the terminal however the shell exits.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<(Self, Terminal<CrosstermBackend<Stdout>>)> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok((guard, terminal))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    }
}

/// Run the dashboard until the user quits.
pub async fn run(settings: &Settings, fetcher: Arc<dyn EndpointFetcher>) -> io::Result<()> {
    let (tx, mut updates) = mpsc::unbounded_channel();
    let refresh = Arc::new(Notify::new());
    let mut widgets = spawn_widgets(settings, fetcher, tx, refresh.clone());

    let result = event_loop(&mut updates, &refresh).await;

    widgets.abort_all();
    tracing::info!("Dashboard stopped");
    result
}

async fn event_loop(
    updates: &mut mpsc::UnboundedReceiver<PanelUpdate>,
    refresh: &Notify,
) -> io::Result<()> {
    let (_guard, mut terminal) = TerminalGuard::enter()?;
    let mut events = EventStream::new();
    let mut dashboard = Dashboard::default();

    terminal.draw(|frame| dashboard.draw(frame))?;

    loop {
        let redraw = tokio::select! {
            Some(update) = updates.recv() => {
                let mut changed = dashboard.apply(update);
                while let Ok(update) = updates.try_recv() {
                    changed |= dashboard.apply(update);
                }
                changed
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => match handle_key(key) {
                    Action::Quit => break,
                    Action::Refresh => {
                        tracing::info!("Refresh requested");
                        refresh.notify_waiters();
                        false
                    }
                    Action::Ignore => false,
                },
                Some(Ok(Event::Resize(_, _))) => true,
                Some(Ok(_)) => false,
                Some(Err(e)) => return Err(e),
                None => break,
            },
        };

        if redraw {
            terminal.draw(|frame| dashboard.draw(frame))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::poller::tests::FakeFetcher;
    use crate::domain::response::FetchError;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use std::path::PathBuf;

    fn render(dashboard: &Dashboard, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| dashboard.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn settings() -> Settings {
        Settings {
            api_base: "http://api".to_string(),
            metrics_base: "http://metrics".to_string(),
            password: "secret".to_string(),
            config_path: PathBuf::from("config.json"),
            log_file: PathBuf::from("dashboard.log"),
        }
    }

    #[test]
    fn test_initial_layout_shows_every_panel_loading() {
        let frame = render(&Dashboard::default(), 100, 32);
        assert!(frame.contains(TITLE));
        for slot in Slot::ALL {
            assert!(frame.contains(slot.title()), "missing {}", slot.title());
        }
        assert_eq!(frame.matches("Loading...").count(), 5);
    }

    #[test]
    fn test_apply_reports_changes_only() {
        let mut dashboard = Dashboard::default();
        let update = PanelUpdate {
            slot: Slot::Points,
            content: PanelContent::error("Authentication failed"),
        };

        assert!(dashboard.apply(update.clone()));
        assert!(!dashboard.apply(update));
        assert!(dashboard.panel(Slot::Points).is_error());
        assert!(!dashboard.panel(Slot::Status).is_error());

        let frame = render(&dashboard, 100, 32);
        assert!(frame.contains("✖ Authentication failed"));
        assert_eq!(frame.matches("Loading...").count(), 4);
    }

    #[test]
    fn test_handle_key() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(handle_key(key(KeyCode::Char('r'))), Action::Refresh);
        assert_eq!(handle_key(key(KeyCode::Char('x'))), Action::Ignore);
        assert_eq!(
            handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[tokio::test]
    async fn test_spawned_widgets_publish_loading_then_results() {
        let settings = settings();
        let fetcher = FakeFetcher::with([
            (
                "http://api/api/status".to_string(),
                Ok(json!({"serviceStatus": "running"})),
            ),
            ("http://api/api/points".to_string(), Err(FetchError::AuthFailed)),
        ]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widgets = spawn_widgets(&settings, Arc::new(fetcher), tx, Arc::new(Notify::new()));

        let mut dashboard = Dashboard::default();
        let mut seen = Vec::new();
        // Five loading updates, then one result per widget.
        while seen.len() < 10 {
            let update = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .unwrap()
                .unwrap();
            seen.push(update.clone());
            dashboard.apply(update);
        }
        widgets.abort_all();

        for slot in Slot::ALL {
            let first = seen.iter().find(|u| u.slot == slot).unwrap();
            assert_eq!(first.content, PanelContent::loading());
        }
        assert!(dashboard.panel(Slot::Status).plain_text().contains("Status: running"));
        assert!(dashboard.panel(Slot::Points).is_error());
        // Unknown URLs fail in the fake, so the other panels show errors too.
        assert!(dashboard.panel(Slot::Performance).is_error());
        assert!(dashboard.panel(Slot::Config).plain_text().starts_with("✖ metrics:"));
    }
}
