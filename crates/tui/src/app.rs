use std::{cmp, io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};
use yard_core::{
    models::TicketKind,
    session::{Role, SeededSession, MAX_PLAYERS, MIN_PLAYERS, RANDOM_POSITION_TOKEN},
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_INPUT_LEN: usize = 16;

/// Pawn colour per seat. Mister X's black pawn is drawn grey.
const PLAYER_COLOURS: [Color; MAX_PLAYERS] = [
    Color::Gray,
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
];

enum AppEvent {
    Input(Event),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Position { player: usize },
    Probe,
}

struct InputPrompt {
    kind: PromptKind,
    input: String,
}

impl InputPrompt {
    fn position(player: usize, initial: String) -> Self {
        Self {
            kind: PromptKind::Position { player },
            input: initial,
        }
    }

    fn probe() -> Self {
        Self {
            kind: PromptKind::Probe,
            input: String::new(),
        }
    }

    fn insert(&mut self, ch: char) {
        if self.input.chars().count() < MAX_INPUT_LEN {
            self.input.push(ch);
        }
    }

    fn backspace(&mut self) {
        self.input.pop();
    }
}

/// Setup screen: edits the roster and renders the latest snapshot.
pub struct SetupApp {
    session: SeededSession,
    selected: usize,
    prompt: Option<InputPrompt>,
    status: String,
    should_quit: bool,
}

impl SetupApp {
    /// Wrap `session`, seating the smallest playable roster.
    pub fn new(mut session: SeededSession) -> Self {
        while session.roster().len() < MIN_PLAYERS {
            if !session.add_player() {
                break;
            }
        }
        let status = format!(
            "Loaded {} stations • {} players seated",
            session.stations().len(),
            session.roster().len()
        );
        Self {
            session,
            selected: 0,
            prompt: None,
            status,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }

            match event_rx.recv().await {
                Some(AppEvent::Input(event)) => self.handle_input(event),
                Some(AppEvent::Tick) => {}
                None => break,
            }
        }

        restore_terminal(&mut terminal)?;
        info!("Setup screen closed");
        Ok(())
    }

    fn set_status(&mut self, message: String) {
        debug!(%message, "Status");
        self.status = message;
    }

    fn handle_input(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
        } else {
            self.handle_setup_key(key);
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('a') => self.add_player(),
            KeyCode::Char('d') => self.delete_player(),
            KeyCode::Char('r') => self.restore_random_position(),
            KeyCode::Char('p') | KeyCode::Enter => {
                let initial = self
                    .session
                    .roster()
                    .random_draw(self.selected)
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                self.prompt = Some(InputPrompt::position(self.selected, initial));
            }
            KeyCode::Char('c') => {
                self.prompt = Some(InputPrompt::probe());
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                self.set_status("Cancelled".to_string());
            }
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.commit_prompt(prompt);
                }
            }
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Char(ch) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    prompt.insert(ch);
                }
            }
            _ => {}
        }
    }

    fn commit_prompt(&mut self, prompt: InputPrompt) {
        let value = prompt.input.trim();
        match prompt.kind {
            PromptKind::Position { player } => {
                if self.session.set_position(player, value) {
                    self.report_position(player);
                } else {
                    self.set_status(format!(
                        "'{value}' is not a station number; use digits or {RANDOM_POSITION_TOKEN}"
                    ));
                }
            }
            PromptKind::Probe => match parse_point(value) {
                Some((x, y)) => self.probe(x, y),
                None => self.set_status("Enter board coordinates as x,y".to_string()),
            },
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self.session.roster().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, count as isize - 1) as usize;
    }

    fn add_player(&mut self) {
        if self.session.add_player() {
            self.selected = self.session.roster().len() - 1;
            self.report_position(self.selected);
        } else {
            self.set_status(format!("Roster is full ({MAX_PLAYERS} players)"));
        }
    }

    fn delete_player(&mut self) {
        if self.session.delete_player() {
            let count = self.session.roster().len();
            self.selected = cmp::min(self.selected, count.saturating_sub(1));
            self.set_status(format!("Removed last player; {count} remain"));
        } else {
            self.set_status(format!("A game needs at least {MIN_PLAYERS} players"));
        }
    }

    fn restore_random_position(&mut self) {
        if self
            .session
            .set_position(self.selected, RANDOM_POSITION_TOKEN)
        {
            self.report_position(self.selected);
        }
    }

    fn report_position(&mut self, player: usize) {
        let Some(record) = self.session.roster().get(player) else {
            return;
        };
        let name = record.display_name.clone();
        let station = record.station_id;
        let on_board = self.session.stations().coords_of(station).is_some();
        let message = if on_board {
            format!("{name} starts on station {station}")
        } else {
            format!("{name} starts on station {station} (not on the board)")
        };
        self.set_status(message);
    }

    fn probe(&mut self, x: i32, y: i32) {
        let hits = self.session.stations().query_box(x, y);
        let message = match hits.split_first() {
            None => format!("No station near ({x}, {y})"),
            Some((first, [])) => format!("Clicked on station: {}", first.id),
            Some((first, rest)) => format!(
                "Clicked on station: {} (+{} nearby)",
                first.id,
                rest.len()
            ),
        };
        self.set_status(message);
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[1]);

        self.render_header(frame, layout[0]);
        self.render_roster(frame, body[0]);
        self.render_tickets(frame, body[1]);
        self.render_status(frame, layout[2]);
        if let Some(prompt) = &self.prompt {
            self.render_prompt(frame, prompt);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let stations = self.session.stations();
        let source = stations
            .source()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "memory".to_string());
        let turn = self.session.state().map(|state| state.turn()).unwrap_or(0);
        let lines = vec![
            Line::from(Span::styled(
                format!(
                    "Setup • turn {turn} • {}/{MAX_PLAYERS} players",
                    self.session.roster().len()
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} stations from {source} (loaded {})",
                stations.len(),
                stations.loaded_at().format("%H:%M:%S")
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Hidden Movement"));
        frame.render_widget(paragraph, area);
    }

    fn render_roster(&self, frame: &mut Frame, area: Rect) {
        let markers = self.session.marker_positions();
        let items: Vec<ListItem> = self
            .session
            .roster()
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| {
                let colour = PLAYER_COLOURS[index % PLAYER_COLOURS.len()];
                let role = match player.role {
                    Role::Fugitive => "fugitive",
                    Role::Pursuer => "detective",
                };
                let location = match markers.get(index).copied().flatten() {
                    Some(station) => format!("({}, {})", station.x, station.y),
                    None => "off-board".to_string(),
                };
                ListItem::new(Line::from(vec![
                    Span::styled("● ", Style::default().fg(colour)),
                    Span::styled(
                        format!("{:<10}", player.display_name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" {role:<9} station {:>4} ", player.station_id)),
                    Span::styled(location, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Players"))
            .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_tickets(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Tickets");
        let roster = self.session.roster();
        let (Some(state), Some(player)) = (self.session.state(), roster.get(self.selected)) else {
            frame.render_widget(Paragraph::new("No players seated").block(block), area);
            return;
        };
        let Some(cards) = state.player_cards().get(self.selected) else {
            frame.render_widget(Paragraph::new("No tickets").block(block), area);
            return;
        };

        let mut lines = vec![Line::from(Span::styled(
            player.display_name.clone(),
            Style::default()
                .fg(PLAYER_COLOURS[self.selected % PLAYER_COLOURS.len()])
                .add_modifier(Modifier::BOLD),
        ))];
        for kind in TicketKind::ALL {
            let fugitive_only = matches!(kind, TicketKind::Black | TicketKind::DoubleMove);
            if fugitive_only && player.role == Role::Pursuer {
                continue;
            }
            let count = cards.get(kind);
            lines.push(Line::from(vec![
                Span::raw(format!("{:<6}{count:>3} ", kind.label())),
                Span::styled(
                    "■".repeat(count as usize),
                    Style::default().fg(ticket_colour(kind)),
                ),
            ]));
        }
        if let Some(draw) = roster.random_draw(self.selected) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("random draw: station {draw}"),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let help = Line::from(vec![
            key_hint("a"),
            Span::raw(" add  "),
            key_hint("d"),
            Span::raw(" delete  "),
            key_hint("p"),
            Span::raw(" position  "),
            key_hint("r"),
            Span::raw(" random  "),
            key_hint("c"),
            Span::raw(" click x,y  "),
            key_hint("q"),
            Span::raw(" quit"),
        ]);
        let paragraph = Paragraph::new(vec![Line::from(self.status.clone()), help])
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_prompt(&self, frame: &mut Frame, prompt: &InputPrompt) {
        let frame_area = frame.size();
        let width = cmp::max(
            cmp::min(50_u16, frame_area.width.saturating_sub(4)),
            24_u16,
        );
        let height = 6_u16.min(frame_area.height.saturating_sub(2)).max(5_u16);
        let x = frame_area.x + (frame_area.width.saturating_sub(width)) / 2;
        let y = frame_area.y + (frame_area.height.saturating_sub(height)) / 2;
        let area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, area);

        let (title, instruction) = match prompt.kind {
            PromptKind::Position { player } => {
                let name = self
                    .session
                    .roster()
                    .get(player)
                    .map(|record| record.display_name.clone())
                    .unwrap_or_default();
                (
                    format!("Position - {name}"),
                    format!("Station number or {RANDOM_POSITION_TOKEN}"),
                )
            }
            PromptKind::Probe => ("Click".to_string(), "Board coordinates x,y".to_string()),
        };
        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(prompt.input.clone()),
        ]);
        let helper = Line::from(vec![
            key_hint("Enter"),
            Span::raw(" apply  "),
            key_hint("Esc"),
            Span::raw(" cancel"),
        ]);

        let paragraph = Paragraph::new(vec![Line::from(instruction), input_line, helper])
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);

        let cursor_x = (area.x + 3 + prompt.input.chars().count() as u16)
            .min(area.x + area.width.saturating_sub(2));
        frame.set_cursor(cursor_x, area.y + 2);
    }
}

fn key_hint(key: &'static str) -> Span<'static> {
    Span::styled(key, Style::default().add_modifier(Modifier::BOLD))
}

fn ticket_colour(kind: TicketKind) -> Color {
    match kind {
        TicketKind::Taxi => Color::Yellow,
        TicketKind::Bus => Color::Green,
        TicketKind::Tube => Color::Red,
        TicketKind::Black => Color::Gray,
        TicketKind::DoubleMove => Color::Cyan,
    }
}

fn parse_point(input: &str) -> Option<(i32, i32)> {
    let (x, y) = input.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
