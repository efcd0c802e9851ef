//! Main UI Application
//!
//! Draws a session snapshot and routes key presses to the session.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::input::{action_for_key, InputAction};
use crate::entities::{Health, Position};
use crate::game::{Game, GameState, MessageCategory, Snapshot};

/// Width of the sidebar health bars in characters
const BAR_WIDTH: usize = 12;

/// Main UI application
pub struct App {
    /// Height of the message log, borders included
    message_height: u16,
}

impl App {
    pub fn new() -> Self {
        Self { message_height: 7 }
    }

    /// Handle a key press. Returns true when the player asked to quit.
    pub fn handle_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        let Some(action) = action_for_key(key) else {
            return Ok(false);
        };
        if action == InputAction::Quit {
            log::info!("Quit requested after {} ticks", game.tick_count());
            return Ok(true);
        }
        if let Some(command) = action.command() {
            game.apply(command);
        }
        Ok(false)
    }

    pub fn render(&self, frame: &mut Frame, game: &Game) {
        frame.render_widget(Clear, frame.area());
        let snapshot = game.snapshot();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(snapshot.cols as u16 + 2), Constraint::Length(26)])
            .split(frame.area());

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(snapshot.rows as u16 + 2), Constraint::Length(self.message_height)])
            .split(chunks[0]);

        self.render_map(frame, &snapshot, game.seed(), left_chunks[0]);
        self.render_messages(frame, game, left_chunks[1]);
        self.render_sidebar(frame, &snapshot, chunks[1]);

        if snapshot.state == GameState::GameOver {
            self.render_game_over(frame, snapshot.tick);
        }
    }

    fn render_map(&self, frame: &mut Frame, snapshot: &Snapshot, seed: u64, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Dungeon - seed {} ", seed))
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let buf = frame.buffer_mut();
        for y in 0..snapshot.rows.min(inner.height as i32) {
            for x in 0..snapshot.cols.min(inner.width as i32) {
                let Some(kind) = snapshot.cell(Position::new(x, y)) else {
                    continue;
                };
                let (fr, fg, fb) = kind.fg_color();
                let (br, bg, bb) = kind.bg_color();

                let cell = &mut buf[(inner.x + x as u16, inner.y + y as u16)];
                cell.set_char(kind.glyph());
                cell.set_fg(Color::Rgb(fr, fg, fb));
                cell.set_bg(Color::Rgb(br, bg, bb));
            }
        }
    }

    fn render_messages(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);

        let messages: Vec<Line> = game
            .messages()
            .iter()
            .rev()
            .take(inner.height as usize)
            .rev()
            .map(|msg| {
                let color = match msg.category {
                    MessageCategory::Combat => Color::Red,
                    MessageCategory::Item => Color::Yellow,
                    MessageCategory::System => Color::Cyan,
                };
                Line::from(Span::styled(&msg.text, Style::default().fg(color)))
            })
            .collect();

        let para = Paragraph::new(messages).block(block);
        frame.render_widget(para, area);
    }

    fn render_sidebar(&self, frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Color::DarkGray));

        let mut lines = vec![
            Line::from(Span::styled("Hero", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
            Line::from(""),
        ];

        if let Some(player) = &snapshot.player {
            lines.push(Line::from(vec![
                Span::raw("HP: "),
                Span::styled(
                    format!("{}/{}", player.health.current, player.health.max),
                    Style::default().fg(health_color(&player.health)),
                ),
            ]));
            lines.push(health_bar(&player.health));
            lines.push(Line::from(vec![
                Span::raw("ATK: "),
                Span::styled(format!("{}", player.attack), Style::default().fg(Color::Yellow)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Tick ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}", snapshot.tick), Style::default().fg(Color::Yellow)),
        ]));

        if !snapshot.enemies.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Enemies ({})", snapshot.enemies.len()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));

            for enemy in &snapshot.enemies {
                lines.push(Line::from(Span::styled(
                    format!("({:>2},{:>2})", enemy.position.x, enemy.position.y),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(health_bar(&enemy.health));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "WASD move  Space attack  q quit",
            Style::default().fg(Color::DarkGray),
        )));

        let para = Paragraph::new(lines).block(block);
        frame.render_widget(para, area);
    }

    fn render_game_over(&self, frame: &mut Frame, ticks: u64) {
        let area = centered_rect(50, 40, frame.area());

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "YOU HAVE FALLEN",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Survived {} ticks", ticks)),
            Line::from(""),
            Line::from(Span::styled("Press [q] to quit", Style::default().fg(Color::Gray))),
        ];

        let para = Paragraph::new(text)
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(Clear, area);
        frame.render_widget(para, area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn health_color(health: &Health) -> Color {
    let pct = health.percentage();
    if pct > 0.6 {
        Color::Green
    } else if pct > 0.3 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn health_bar(health: &Health) -> Line<'static> {
    let filled = ((BAR_WIDTH as f32 * health.percentage()).round() as usize).min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    Line::from(Span::styled(bar, Style::default().fg(health_color(health))))
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
