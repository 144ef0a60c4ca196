use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{EndReason, GameStatus, Position, Snapshot};
use crate::metrics::SessionMetrics;

/// Final result shown on the game-over panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverNotice {
    pub score: u32,
    pub reason: EndReason,
}

/// What a single grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

/// Draws the latest snapshot; holds no game state of its own
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &Snapshot,
        metrics: &SessionMetrics,
        game_over: Option<&GameOverNotice>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_grid(snapshot), game_area);

        // Overlays sit on top of the board
        let overlay = match (snapshot.status, game_over) {
            (GameStatus::Idle, _) => Some(self.render_splash()),
            (GameStatus::Paused, _) => Some(self.render_paused()),
            (GameStatus::Ended, Some(notice)) => Some(self.render_game_over(notice)),
            _ => None,
        };
        if let Some(panel) = overlay {
            let area = centered(game_area, 36, 8);
            frame.render_widget(Clear, area);
            frame.render_widget(panel, area);
        }

        let controls = self.render_controls(snapshot.status);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let cells = cell_grid(snapshot);
        let lines: Vec<Line> = cells
            .iter()
            .map(|row| Line::from(row.iter().map(|cell| cell_span(*cell)).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &SessionMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.snake.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_splash(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            key_hint("Enter", Color::Green, " to start"),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            key_hint("Space", Color::Yellow, " to resume"),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, notice: &GameOverNotice) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(
                format!("The snake {}", notice.reason.as_str()),
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    notice.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            key_hint("Enter", Color::Green, " to play again"),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'_> {
        let start_label = match status {
            GameStatus::Running | GameStatus::Paused => " restart | ",
            GameStatus::Idle | GameStatus::Ended => " start | ",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(start_label),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a snapshot onto rows of cells, row 0 at the top
///
/// Every frame starts from an empty grid. Segments outside the board are
/// skipped rather than drawn.
pub fn cell_grid(snapshot: &Snapshot) -> Vec<Vec<Cell>> {
    let size = snapshot.board_size;
    let mut cells = vec![vec![Cell::Empty; size]; size];

    let mut mark = |pos: Position, cell: Cell| {
        if pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < size && (pos.y as usize) < size {
            cells[pos.y as usize][pos.x as usize] = cell;
        }
    };

    if let Some(food) = snapshot.food {
        mark(food, Cell::Food);
    }
    for (i, segment) in snapshot.snake.iter().enumerate() {
        mark(*segment, if i == 0 { Cell::Head } else { Cell::Body });
    }

    cells
}

fn cell_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
        Cell::Food => Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

fn key_hint(key: &'static str, color: Color, rest: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::Gray)),
        Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(rest, Style::default().fg(Color::Gray)),
    ])
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn snapshot(status: GameStatus) -> Snapshot {
        Snapshot {
            snake: vec![Position::new(2, 1), Position::new(1, 1)],
            food: Some(Position::new(3, 3)),
            score: 30,
            status,
            board_size: 5,
        }
    }

    #[test]
    fn test_cell_grid_marks_snake_and_food() {
        let cells = cell_grid(&snapshot(GameStatus::Running));

        assert_eq!(cells.len(), 5);
        assert_eq!(cells[1][2], Cell::Head);
        assert_eq!(cells[1][1], Cell::Body);
        assert_eq!(cells[3][3], Cell::Food);
        let marked = cells.iter().flatten().filter(|c| **c != Cell::Empty).count();
        assert_eq!(marked, 3);
    }

    #[test]
    fn test_cell_grid_without_food() {
        let mut snap = snapshot(GameStatus::Ended);
        snap.food = None;
        let cells = cell_grid(&snap);
        assert!(cells.iter().flatten().all(|c| *c != Cell::Food));
    }

    #[test]
    fn test_cell_grid_skips_out_of_bounds() {
        let mut snap = snapshot(GameStatus::Running);
        snap.snake.insert(0, Position::new(-1, 1));
        let cells = cell_grid(&snap);
        assert_eq!(cells[1][2], Cell::Body);
    }

    #[test]
    fn test_render_draws_score_and_game_over() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let metrics = SessionMetrics::new();
        let notice = GameOverNotice {
            score: 30,
            reason: EndReason::Wall,
        };

        terminal
            .draw(|frame| {
                renderer.render(frame, &snapshot(GameStatus::Ended), &metrics, Some(&notice))
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Score: 30"));
        assert!(text.contains("GAME OVER"));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        let inner = centered(area, 36, 8);
        assert_eq!(inner, area);
    }
}
