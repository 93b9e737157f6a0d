// Renderers - one per widget kind, all pure and total
use crate::domain::node_config::ConfigSummary;
use crate::domain::performance::PerformanceSummary;
use crate::domain::points::PointsSummary;
use crate::domain::qos::QosSummary;
use crate::domain::status::StatusSummary;
use crate::domain::summary::Snapshot;
use crate::domain::units::convert_bytes;
use crate::presentation::content::{NOT_AVAILABLE, PanelContent};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;

/// Error first, then loading, then the populated summary.
fn render_with<T>(snapshot: &Snapshot<T>, ready: impl FnOnce(&T) -> PanelContent) -> PanelContent {
    match snapshot {
        Snapshot::Error(reason) => PanelContent::error(reason),
        Snapshot::Loading => PanelContent::loading(),
        Snapshot::Ready(summary) => ready(summary),
    }
}

fn or_na(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn or_zero(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "0".to_string())
}

fn choice(value: Option<bool>, yes: &str, no: &str) -> String {
    match value {
        Some(true) => yes.to_string(),
        Some(false) => no.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn percent(value: Option<u8>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |p| format!("{}%", p))
}

pub fn render_status(snapshot: &Snapshot<StatusSummary>) -> PanelContent {
    render_with(snapshot, |s| {
        PanelContent::fields([
            ("Status", or_na(&s.status)),
            ("Docker", choice(s.docker_available, "Available", "Not Available")),
            ("Autostart", choice(s.autostart, "Enabled", "Disabled")),
            ("Uptime", or_na(&s.uptime)),
            ("Container", choice(s.container_running, "Running", "Stopped")),
            ("Image", choice(s.update_available, "Update available", "Up to date")),
            ("Last Checked", or_na(&s.last_checked)),
        ])
    })
}

pub fn render_performance(snapshot: &Snapshot<PerformanceSummary>) -> PanelContent {
    render_with(snapshot, |p| {
        let bytes = |value: Option<f64>| convert_bytes(value.unwrap_or(0.0));
        PanelContent::fields([
            ("Total Traffic", bytes(p.total_traffic)),
            ("In/Out", format!("{} / {}", bytes(p.bytes_in), bytes(p.bytes_out))),
            ("Sessions", or_zero(&p.sessions)),
            ("Users", or_zero(&p.users)),
        ])
    })
}

pub fn render_qos(snapshot: &Snapshot<QosSummary>) -> PanelContent {
    render_with(snapshot, |q| {
        let blurbs = q.blurbs.iter().map(|(_, blurb)| {
            Line::styled(format!("• {}", blurb), Style::default().add_modifier(Modifier::ITALIC))
        });

        PanelContent::fields([
            ("Score", percent(q.score)),
            ("Reliability", percent(q.reliability)),
            ("Availability", percent(q.availability)),
            ("Efficiency", percent(q.efficiency)),
        ])
        .with_lines(blurbs)
    })
}

pub fn render_points(snapshot: &Snapshot<PointsSummary>) -> PanelContent {
    render_with(snapshot, |p| {
        PanelContent::tiles([
            ("Total", or_zero(&p.total)),
            ("Today", or_zero(&p.daily)),
            ("This Week", or_zero(&p.weekly)),
            ("This Month", or_zero(&p.monthly)),
            ("Day Streak", or_zero(&p.streak)),
            ("Global Rank", or_zero(&p.rank)),
            ("Multiplier", or_zero(&p.multiplier)),
            ("Wallet Lifetime", or_zero(&p.wallet_lifetime)),
            ("Sync Lifetime", or_zero(&p.sync_lifetime)),
        ])
    })
}

pub fn render_config(snapshot: &Snapshot<ConfigSummary>) -> PanelContent {
    render_with(snapshot, |c| {
        PanelContent::fields([
            ("Sync Name", or_na(&c.sync_name)),
            ("Wallet", or_na(&c.wallet)),
            ("Hostname", or_na(&c.hostname)),
            ("Platform", or_na(&c.platform)),
            ("Version", or_na(&c.version)),
            ("Docker Image", or_na(&c.docker_image)),
            ("Container Image", or_na(&c.container_image)),
            ("Reflector", or_na(&c.reflector_version)),
            ("Launcher", or_na(&c.launcher)),
        ])
    })
}
