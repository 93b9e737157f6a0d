// Renderable panel content and how it is laid into a bordered block
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};

pub const NOT_AVAILABLE: &str = "N/A";
pub const LOADING: &str = "Loading...";

const ERROR_MARK: &str = "✖ ";
const LABEL_COLOR: Color = Color::Rgb(0x62, 0x72, 0xa4);
const TILE_BORDER: Color = Color::Rgb(0x66, 0x66, 0x66);
const TILE_MIN_WIDTH: u16 = 16;
const TILE_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Lines(Text<'static>),
    Tiles(Vec<Tile>),
}

impl PanelContent {
    pub fn loading() -> Self {
        PanelContent::Lines(Text::from(Line::styled(
            LOADING,
            Style::default().add_modifier(Modifier::DIM),
        )))
    }

    pub fn error(reason: &str) -> Self {
        PanelContent::Lines(Text::from(Line::styled(
            format!("{}{}", ERROR_MARK, reason),
            error_style(),
        )))
    }

    /// `label: value` rows with dimmed labels.
    pub fn fields<'a>(rows: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        let lines: Vec<Line<'static>> = rows
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", label), Style::default().fg(LABEL_COLOR)),
                    Span::raw(value),
                ])
            })
            .collect();
        PanelContent::Lines(Text::from(lines))
    }

    pub fn tiles<'a>(tiles: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        PanelContent::Tiles(
            tiles
                .into_iter()
                .map(|(label, value)| Tile {
                    label: label.to_string(),
                    value,
                })
                .collect(),
        )
    }

    /// Append extra lines below a field list. Tiles are left untouched.
    pub fn with_lines(self, extra: impl IntoIterator<Item = Line<'static>>) -> Self {
        match self {
            PanelContent::Lines(mut text) => {
                text.lines.extend(extra);
                PanelContent::Lines(text)
            }
            tiles => tiles,
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            PanelContent::Lines(text) => text.lines.first().is_some_and(|line| {
                line.style == error_style()
                    && line.spans.first().is_some_and(|s| s.content.starts_with(ERROR_MARK))
            }),
            PanelContent::Tiles(_) => false,
        }
    }

    /// Unstyled text, one line per row or tile.
    pub fn plain_text(&self) -> String {
        match self {
            PanelContent::Lines(text) => text
                .lines
                .iter()
                .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n"),
            PanelContent::Tiles(tiles) => tiles
                .iter()
                .map(|tile| format!("{}: {}", tile.label, tile.value))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, title: &str) {
        let block = Block::bordered().title(format!(" {} ", title));

        match self {
            PanelContent::Lines(text) => {
                let paragraph = Paragraph::new(text.clone())
                    .block(block)
                    .wrap(Wrap { trim: false });
                frame.render_widget(paragraph, area);
            }
            PanelContent::Tiles(tiles) => {
                let inner = block.inner(area);
                frame.render_widget(block.title_alignment(Alignment::Center), area);
                draw_tiles(frame, inner, tiles);
            }
        }
    }
}

fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

/// Lay tiles out in as many equal columns as fit, wrapping onto new rows.
fn draw_tiles(frame: &mut Frame, area: Rect, tiles: &[Tile]) {
    if tiles.is_empty() || area.width == 0 || area.height == 0 {
        return;
    }

    let columns = usize::from((area.width / TILE_MIN_WIDTH).max(1)).min(tiles.len());
    let rows = tiles.chunks(columns).collect::<Vec<_>>();
    let row_areas = Layout::vertical(vec![Constraint::Length(TILE_HEIGHT); rows.len()]).split(area);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(*row_area);
        for (tile, cell) in row.iter().zip(cells.iter()) {
            let tile_block = Block::bordered()
                .title(Span::styled(tile.label.clone(), Style::default().fg(LABEL_COLOR)))
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(TILE_BORDER));
            let value = Paragraph::new(tile.value.clone())
                .alignment(Alignment::Center)
                .block(tile_block);
            frame.render_widget(value, *cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(content: &PanelContent, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| content.draw(frame, frame.area(), "Panel"))
            .unwrap();

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

    #[test]
    fn test_error_is_flagged() {
        let content = PanelContent::error("Authentication failed");
        assert!(content.is_error());
        assert_eq!(content.plain_text(), "✖ Authentication failed");
        assert!(!PanelContent::loading().is_error());
        assert!(!PanelContent::fields([("Status", "ok".to_string())]).is_error());
    }

    #[test]
    fn test_fields_render_inside_border() {
        let content = PanelContent::fields([("Status", "running".to_string())]);
        let frame = render(&content, 30, 4);
        assert!(frame.contains("Panel"));
        assert!(frame.contains("Status: running"));
    }

    #[test]
    fn test_tiles_wrap_when_narrow() {
        let content = PanelContent::tiles([
            ("Total", "10".to_string()),
            ("Today", "2".to_string()),
            ("Streak", "5".to_string()),
        ]);
        let frame = render(&content, 36, 8);
        assert!(frame.contains("Total"));
        assert!(frame.contains("Today"));
        assert!(frame.contains("Streak"));
    }

    #[test]
    fn test_with_lines_appends() {
        let content = PanelContent::fields([("A", "1".to_string())]).with_lines([Line::raw("extra")]);
        assert_eq!(content.plain_text(), "A: 1\nextra");
    }
}
