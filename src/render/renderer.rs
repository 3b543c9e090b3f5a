use std::collections::HashSet;

use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::Snapshot;

/// Snake and apple colours, rolled again for every session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub snake: Color,
    pub apple: Color,
}

impl Palette {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            snake: random_color(rng),
            apple: random_color(rng),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: Color::Green,
            apple: Color::Red,
        }
    }
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::Rgb(rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255))
}

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_scores(snapshot), chunks[0]);

        if snapshot.is_over {
            frame.render_widget(self.render_game_over(snapshot), chunks[1]);
        } else {
            frame.render_widget(self.render_board(snapshot), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// One line per board row, two characters per cell
    fn grid_lines(&self, snapshot: &Snapshot) -> Vec<Line<'static>> {
        let board = &snapshot.board;
        let head = snapshot.snake.first().map(|&seg| board.index_of(seg));
        let body: HashSet<_> = snapshot
            .snake
            .iter()
            .skip(1)
            .map(|&seg| board.index_of(seg))
            .collect();
        let apple = board.index_of(snapshot.apple);

        (0..board.rows())
            .map(|row| {
                let spans: Vec<Span> = (0..board.columns())
                    .map(|col| {
                        let cell = (col, row);
                        if Some(cell) == head {
                            Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(self.palette.snake)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else if body.contains(&cell) {
                            Span::styled("□ ", Style::default().fg(self.palette.snake))
                        } else if cell == apple {
                            Span::styled(
                                "O ",
                                Style::default()
                                    .fg(self.palette.apple)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(". ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_board(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        Paragraph::new(self.grid_lines(snapshot))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_scores(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("HIGH-SCORE: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.high_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("SCORE: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("High score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        if snapshot.new_high_score {
            text.push(Line::from(""));
            text.push(Line::from(vec![Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Space",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}
