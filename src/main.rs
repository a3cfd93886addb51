use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use futcard_terminal::assets::AssetUrls;
use futcard_terminal::card::{CardView, display_name};
use futcard_terminal::colors::{ColorPalette, PaletteSlot, compute_palette};
use futcard_terminal::config::{Config, config};
use futcard_terminal::feed;
use futcard_terminal::model::PlayerRecord;
use futcard_terminal::sbc;
use futcard_terminal::state::{
    self, AppState, PlayerTab, ProviderCommand, Screen, apply_delta, tab_heading, tab_label,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    cfg: &'static Config,
    urls: AssetUrls,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>, cfg: &'static Config) -> Self {
        Self {
            state: AppState::new(cfg.search_debounce),
            should_quit: false,
            cmd_tx,
            cfg,
            urls: AssetUrls::from_config(cfg),
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if self.state.screen == Screen::Search {
            self.on_search_key(key, now);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Home,
            KeyCode::Char('2') => {
                self.state.screen = Screen::Sbc;
                if self.state.sbcs.is_empty() && !self.state.sbcs_loading {
                    self.request_sbcs(false);
                }
            }
            KeyCode::Char('/') => {
                self.state.screen = Screen::Search;
                self.state.search_selected = 0;
            }
            KeyCode::Tab => {
                self.state.cycle_tab();
                if !self.state.players.contains_key(&self.state.player_tab) {
                    self.request_players(self.state.player_tab, false);
                }
            }
            KeyCode::Char('n') => self.change_investment_page(1),
            KeyCode::Char('p') => self.change_investment_page(-1),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('r') => self.refresh_screen(),
            KeyCode::Char('R') => {
                self.send(ProviderCommand::ClearCache, "");
                self.refresh_screen();
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => self.state.close_search(),
            KeyCode::Backspace => self.state.search_pop(now),
            KeyCode::Down => self.state.select_next(),
            KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter => {
                if let Some(player) = self.state.selected_player() {
                    let view = CardView::build(player, &self.state.reference.rarities, &self.urls);
                    self.state.push_log(format!("[INFO] Open {}", view.link));
                }
            }
            KeyCode::Char(c) => self.state.search_push(c, now),
            _ => {}
        }
    }

    fn send(&mut self, cmd: ProviderCommand, announce: &str) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Provider unavailable");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Provider request failed");
        } else if !announce.is_empty() {
            self.state.push_log(format!("[INFO] {announce}"));
        }
    }

    fn request_reference(&mut self) {
        if self.state.reference.is_complete() {
            return;
        }
        self.state.reference_loading = true;
        self.send(ProviderCommand::FetchReference, "");
    }

    fn request_players(&mut self, tab: PlayerTab, announce: bool) {
        self.state.players_loading.insert(tab, true);
        let page = self.state.investment_page;
        let note = if announce {
            format!("{} players request sent", tab_label(tab))
        } else {
            String::new()
        };
        self.send(ProviderCommand::FetchPlayers { tab, page }, &note);
    }

    fn request_sbcs(&mut self, announce: bool) {
        self.state.sbcs_loading = true;
        let note = if announce { "SBC request sent" } else { "" };
        self.send(ProviderCommand::FetchSbcs, note);
    }

    fn change_investment_page(&mut self, step: i32) {
        if self.state.player_tab != PlayerTab::Investment {
            return;
        }
        let next = self.state.investment_page.saturating_add_signed(step).max(1);
        if next == self.state.investment_page {
            return;
        }
        self.state.investment_page = next;
        self.state.selected = 0;
        self.request_players(PlayerTab::Investment, false);
    }

    fn refresh_screen(&mut self) {
        match self.state.screen {
            Screen::Home => self.request_players(self.state.player_tab, true),
            Screen::Sbc => self.request_sbcs(true),
            Screen::Search => {}
        }
    }

    fn maybe_search(&mut self, now: Instant) {
        if let Some(query) = self.state.poll_search(now, self.cfg.search_min_chars) {
            self.send(ProviderCommand::Search { query }, "");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let cfg = config();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_provider(tx, cmd_rx);

    let mut app = App::new(Some(cmd_tx), cfg);
    app.request_reference();
    app.request_players(PlayerTab::Recent, false);
    app.request_sbcs(false);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_search(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let now = Instant::now();
        let mut timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if let Some(remaining) = app.state.search_debounce.remaining(now) {
            timeout = timeout.min(remaining);
        }
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key, Instant::now());
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Home => render_home(frame, chunks[1], app),
        Screen::Sbc => render_sbcs(frame, chunks[1], app),
        Screen::Search => render_search(frame, chunks[1], app),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::Home => {
            let (heading, description) = tab_heading(state.player_tab);
            let page = if state.player_tab == PlayerTab::Investment {
                format!(" | Page {}", state.investment_page)
            } else {
                String::new()
            };
            format!("FUTCARD | {heading}{page}\n  {description}")
        }
        Screen::Sbc => "FUTCARD | LATEST SBCS\n  Freshly added squad building challenges".to_string(),
        Screen::Search => format!("FUTCARD | Search: {}_", state.search_input),
    };
    if state.reference_loading {
        format!("{title} (loading reference data)")
    } else {
        title
    }
}

fn footer_text(state: &AppState) -> &'static str {
    match state.screen {
        Screen::Home => {
            "1 Home | 2 SBCs | / Search | Tab Recent/Trending/Investment | n/p Page | j/k Move | r/R Refresh | ? Help | q Quit"
        }
        Screen::Sbc => "1 Home | / Search | j/k Move | r Refresh | ? Help | q Quit",
        Screen::Search => "Type to search | ↑/↓ Move | Enter Open | Esc Close",
    }
}

fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(44)])
        .split(area);

    let state = &app.state;
    let players = state.tab_players();
    let list_block = Block::default()
        .title(tab_title(state.player_tab))
        .borders(Borders::ALL);
    if players.is_empty() {
        let text = if state.tab_loading() {
            "Loading players..."
        } else {
            "No players found"
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(list_block);
        frame.render_widget(empty, columns[0]);
    } else {
        let inner = list_block.inner(columns[0]);
        frame.render_widget(list_block, columns[0]);
        render_player_rows(frame, inner, players, state.selected, app);
    }

    render_card_panel(frame, columns[1], state.selected_player(), app);
}

fn tab_title(active: PlayerTab) -> String {
    [PlayerTab::Recent, PlayerTab::Trending, PlayerTab::Investment]
        .into_iter()
        .map(|tab| {
            if tab == active {
                format!("[{}]", tab_label(tab))
            } else {
                format!(" {} ", tab_label(tab))
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

fn render_player_rows(
    frame: &mut Frame,
    area: Rect,
    players: &[PlayerRecord],
    selected: usize,
    app: &App,
) {
    if area.height == 0 {
        return;
    }
    let visible = area.height as usize;
    let (start, end) = visible_range(selected, players.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let player = &players[idx];
        let row_area = Rect {
            x: area.x,
            y: area.y + i as u16,
            width: area.width,
            height: 1,
        };
        let rarity = app.state.reference.rarity(player.rarity);
        let palette = compute_palette(rarity, player.rating);
        let rating_style = slot_style(&palette, PaletteSlot::Header, PaletteSlot::Background);
        let row_style = if idx == selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let nation = app
            .state
            .reference
            .nation_name(player.nation)
            .unwrap_or("-");
        let price = player
            .latest_price
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let line = Line::from(vec![
            Span::styled(format!(" {:>2} ", player.rating), rating_style),
            Span::styled(
                format!(
                    " {:<4} {:<24} {:<16} {:>10}",
                    player.position.first().map(String::as_str).unwrap_or("-"),
                    display_name(player),
                    nation,
                    price
                ),
                row_style,
            ),
        ]);
        frame.render_widget(Paragraph::new(line).style(row_style), row_area);
    }
}

fn render_card_panel(frame: &mut Frame, area: Rect, player: Option<&PlayerRecord>, app: &App) {
    let Some(player) = player else {
        let empty = Paragraph::new("No player selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Card").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let view = CardView::build(player, &app.state.reference.rarities, &app.urls);
    let palette = &view.palette;
    let bg = slot_color(palette, PaletteSlot::Background);
    let block = Block::default()
        .title(format!(" {} ", view.rarity_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(slot_color(palette, PaletteSlot::Dividers)))
        .style(Style::default().bg(bg));

    let header = slot_style(palette, PaletteSlot::Header, PaletteSlot::Background);
    let name = slot_style(palette, PaletteSlot::Name, PaletteSlot::Background)
        .add_modifier(Modifier::BOLD);
    let attrs = slot_style(palette, PaletteSlot::AttributeValues, PaletteSlot::Background);
    let play_text = slot_style(palette, PaletteSlot::PlayStyleText, PaletteSlot::Background);
    let play_icon = slot_style(palette, PaletteSlot::PlayStyleIcon, PaletteSlot::Background);
    let footer = slot_style(palette, PaletteSlot::Footer, PaletteSlot::Background);
    let divider = slot_style(palette, PaletteSlot::Dividers, PaletteSlot::Background);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", view.rating), header.add_modifier(Modifier::BOLD)),
            Span::styled(view.position.clone(), header),
            Span::styled(
                format!("   {} SM  {} WF", view.skill_moves, view.weak_foot),
                attrs,
            ),
        ]),
        Line::from(Span::styled(view.display_name.clone(), name)),
        Line::from(Span::styled("─".repeat(30), divider)),
    ];
    let labels: Vec<Span> = view
        .attributes
        .iter()
        .map(|(label, _)| Span::styled(format!("{label:>4} "), attrs))
        .collect();
    let values: Vec<Span> = view
        .attributes
        .iter()
        .map(|(_, value)| Span::styled(format!("{value:>4} "), attrs.add_modifier(Modifier::BOLD)))
        .collect();
    lines.push(Line::from(labels));
    lines.push(Line::from(values));
    if !view.alt_positions.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Alt: {}", view.alt_positions.join(" ")),
            attrs,
        )));
    }
    lines.push(Line::from(Span::styled("─".repeat(30), divider)));
    for (id, url) in player.playstyle_plus.iter().zip(view.playstyle_plus_urls.iter()) {
        lines.push(Line::from(vec![
            Span::styled("◆ ", play_icon),
            Span::styled(format!("PlayStyle+ {id} {url}"), play_text),
        ]));
    }
    let reference = &app.state.reference;
    lines.push(Line::from(Span::styled(
        format!(
            "{} | {} | {}",
            reference.nation_name(player.nation).unwrap_or("-"),
            reference.league_name(player.leagueid).unwrap_or("-"),
            reference.team_name(player.teamid).unwrap_or("-"),
        ),
        footer,
    )));
    lines.push(Line::from(Span::styled(
        format!("Crests: {}", view.crest_theme.as_str()),
        footer,
    )));
    for url in [
        &view.card_url,
        &view.portrait_urls[0],
        &view.nation_url,
        &view.league_url,
        &view.club_url,
    ] {
        lines.push(Line::from(Span::styled(url.clone(), footer)));
    }
    lines.push(Line::from(Span::styled(view.link.clone(), footer)));

    let card = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

fn render_sbcs(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let block = Block::default().title("SBCs").borders(Borders::ALL);
    let sbcs = state.visible_sbcs();
    if sbcs.is_empty() {
        let text = if state.sbcs_loading {
            "Loading SBCs..."
        } else {
            "No SBCs available"
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let now = Utc::now();
    let mut lines = Vec::with_capacity(sbcs.len() * 3);
    for (idx, set) in sbcs.iter().enumerate() {
        let selected = idx == state.sbc_selected;
        let base = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let expired = sbc::is_expired(set, now);
        let expiry_style = if expired {
            Style::default().fg(Color::Red)
        } else if sbc::is_expiring_soon(set, now) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let mut title = vec![Span::styled(set.name.clone(), base.add_modifier(Modifier::BOLD))];
        if sbc::is_new(set, now) {
            title.push(Span::styled(" NEW", Style::default().fg(Color::Green)));
        }
        if sbc::is_expiring_soon(set, now) && !expired {
            title.push(Span::styled(" EXPIRING", Style::default().fg(Color::Yellow)));
        }
        if let Some(cost) = set.total_cost.filter(|c| *c > 0) {
            title.push(Span::styled(format!(" {cost} coins"), Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(title));
        lines.push(Line::from(Span::styled(
            format!("  {}", set.description),
            Style::default().fg(Color::Gray),
        )));
        let reward = sbc::reward_name(set).unwrap_or("-");
        let repeat = set
            .repeatability
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(vec![
            Span::raw(format!(
                "  Challenges {} | Reward {reward} | Repeatable {repeat} | Expires ",
                set.challenges_count
            )),
            Span::styled(sbc::expiry_label(set, now), expiry_style),
            Span::styled(
                format!("  {}", sbc::image_url(set, &app.urls)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let list = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(list, area);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(44)])
        .split(area);

    let title = if state.search_loading {
        "Results (searching...)".to_string()
    } else {
        format!("Results for '{}'", state.search_query)
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let too_short = state.search_query.chars().count() < app.cfg.search_min_chars;
    if state.search_results.is_empty() {
        let text = if too_short {
            format!("Type at least {} characters", app.cfg.search_min_chars)
        } else if state.search_loading {
            "Searching...".to_string()
        } else {
            "No players found".to_string()
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, columns[0]);
    } else {
        let inner = block.inner(columns[0]);
        frame.render_widget(block, columns[0]);
        render_player_rows(frame, inner, &state.search_results, state.search_selected, app);
    }

    render_card_panel(frame, columns[1], state.selected_player(), app);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn slot_color(palette: &ColorPalette, slot: PaletteSlot) -> Color {
    let (r, g, b) = palette.rgb(slot);
    Color::Rgb(r, g, b)
}

fn slot_style(palette: &ColorPalette, fg: PaletteSlot, bg: PaletteSlot) -> Style {
    Style::default()
        .fg(slot_color(palette, fg))
        .bg(slot_color(palette, bg))
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Futcard Terminal - Help",
        "",
        "Global:",
        "  1            Home",
        "  2            SBCs",
        "  /            Search players",
        "  r            Refresh current screen",
        "  R            Clear HTTP cache and refresh",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Home:",
        "  Tab          Recent / Trending / Investment",
        "  n / p        Next / previous investment page",
        "  j/k or ↑/↓   Move",
        "",
        "Search:",
        "  Esc          Close search",
        "  Enter        Show card link",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
