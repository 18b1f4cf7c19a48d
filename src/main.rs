use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::{Duration, Instant},
};

use blockdrop::config::{Args, GameConfig};
use blockdrop::game::{ColorIndex, GameEngine, GameEvent, GameState, Intent, GRID_HEIGHT, GRID_WIDTH};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";
const PREVIEW_SIZE: usize = 4;

fn cell_color(color: ColorIndex) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

// ============================================================================
// Rendering
// ============================================================================

struct View<'a> {
    engine: &'a GameEngine,
    status: &'a str,
}

fn render(frame: &mut Frame, view: &View) {
    let area = frame.size();

    render_game(frame, view, area);
    match view.engine.state() {
        GameState::Falling => {}
        GameState::Paused => render_paused(frame, area),
        GameState::GameOver => render_game_over(frame, view.engine, area),
    }
}

fn render_game(frame: &mut Frame, view: &View, area: Rect) {
    let grid_display_width = (GRID_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = GRID_HEIGHT as u16 + 2;
    let preview_width = PREVIEW_SIZE as u16 * CELL_WIDTH + 4;
    let info_width = 16;
    let total_width = grid_display_width + preview_width + info_width + 4;
    let total_height = grid_display_height + 3;

    let main_area = centered_rect(total_width, total_height, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let game_row = vertical[0];

    // [Grid][Next][Info]
    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(preview_width),
        Constraint::Length(info_width),
    ])
    .split(game_row);

    let side = Layout::vertical([Constraint::Length(PREVIEW_SIZE as u16 + 2), Constraint::Fill(1)])
        .split(horizontal[1]);

    render_grid(frame, view.engine, horizontal[0]);
    render_preview(frame, view.engine, side[0]);
    render_info(frame, view, horizontal[2]);

    let controls_area = Rect {
        x: area.x,
        y: game_row.y + game_row.height,
        width: area.width,
        height: 2,
    };

    if controls_area.y + 1 < area.height {
        let controls = Paragraph::new(vec![Line::from(
            "←→/AD: Move | ↑/W: Rotate | ↓/S: Drop | P: Pause | R: Restart | Q/ESC: Quit",
        )])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(controls, controls_area);
    }
}

fn render_grid(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockdrop ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = engine
        .render_grid()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    None => Span::raw(EMPTY_CHAR),
                    Some(color) => Span::styled(BLOCK_CHAR, Style::default().fg(cell_color(*color))),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_preview(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let next = engine.next_piece();
    let style = Style::default().fg(cell_color(next.color));
    let shape = next.shape;

    let mut lines: Vec<Line> = Vec::new();
    for row in 0..shape.size() {
        let mut spans = vec![Span::raw(" ")];
        for col in 0..shape.size() {
            if shape.get(row, col) != 0 {
                spans.push(Span::styled(BLOCK_CHAR, style));
            } else {
                spans.push(Span::raw(EMPTY_CHAR));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, view: &View, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", view.engine.score())),
        Line::from(""),
        Line::from(Span::styled("Lines", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}", view.engine.lines_cleared())),
        Line::from(""),
        Line::from(Span::styled(view.status, Style::default().fg(Color::Green))),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", engine.score())),
        Line::from(format!("Lines: {}", engine.lines_cleared())),
        Line::from(""),
        Line::from(Span::styled(
            "R to restart, ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(28, 10, area));
}

fn render_paused(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("PAUSED", Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(Span::styled(
            "Press P to continue",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Press ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Paused ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(24, 9, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Input
// ============================================================================

enum Command {
    Play(Intent),
    TogglePause,
    Restart,
    Quit,
}

fn key_to_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::Play(Intent::MoveLeft)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::Play(Intent::MoveRight)),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Play(Intent::Rotate)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Play(Intent::SoftDrop)),
        _ => None,
    }
}

fn status_for(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::LinesCleared(n) => Some(format!("+{} line{}", n, if *n == 1 { "" } else { "s" })),
        GameEvent::GameRestarted => Some("New game".to_string()),
        GameEvent::GameOver => Some("Topped out".to_string()),
        _ => None,
    }
}

// ============================================================================
// Main Loop
// ============================================================================

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: &GameConfig) -> Result<()> {
    let mut engine = GameEngine::from_config(config);
    let mut status = String::new();
    let mut intents: Vec<Intent> = Vec::new();

    loop {
        terminal.draw(|frame| {
            render(
                frame,
                &View {
                    engine: &engine,
                    status: &status,
                },
            )
        })?;

        // Gather key presses until the frame deadline. Repeats and releases
        // are ignored so each physical press yields one intent.
        let frame_start = Instant::now();
        intents.clear();
        loop {
            let timeout = config
                .frame_duration
                .checked_sub(frame_start.elapsed())
                .unwrap_or(Duration::ZERO);
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key_to_command(key.code) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::TogglePause) => engine.toggle_pause(),
                    Some(Command::Restart) => engine.restart(),
                    Some(Command::Play(intent)) => intents.push(intent),
                    None => {}
                }
            }
        }

        engine.step(&intents);

        for event in engine.take_events() {
            if let Some(message) = status_for(&event) {
                status = message;
            }
        }
    }
}

fn play(config: &GameConfig) -> Result<()> {
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    run(&mut terminal, config)
}

fn main() -> Result<()> {
    let config = Args::parse().into_config()?;

    enable_raw_mode()?;
    let outcome = play(&config);

    // Restore terminal, even when setup failed halfway
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    outcome
}
