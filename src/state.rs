use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::model::{PlayerRecord, SbcSet};
use crate::reference::ReferenceData;
use crate::sbc::SBC_LIST_LIMIT;

pub const SEARCH_RESULT_LIMIT: usize = 10;
const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Sbc,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerTab {
    Recent,
    Trending,
    Investment,
}

impl PlayerTab {
    pub fn next(self) -> Self {
        match self {
            PlayerTab::Recent => PlayerTab::Trending,
            PlayerTab::Trending => PlayerTab::Investment,
            PlayerTab::Investment => PlayerTab::Recent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Reference,
    Players { tab: PlayerTab, page: u32 },
    Sbcs,
    Search,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub player_tab: PlayerTab,
    pub investment_page: u32,
    pub selected: usize,
    pub players: HashMap<PlayerTab, Vec<PlayerRecord>>,
    pub players_loading: HashMap<PlayerTab, bool>,
    pub sbcs: Vec<SbcSet>,
    pub sbc_selected: usize,
    pub sbcs_loading: bool,
    pub reference: ReferenceData,
    pub reference_loading: bool,
    pub search_input: String,
    pub search_query: String,
    pub search_debounce: Debouncer<String>,
    pub search_results: Vec<PlayerRecord>,
    pub search_selected: usize,
    pub search_loading: bool,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(search_delay: Duration) -> Self {
        Self {
            screen: Screen::Home,
            player_tab: PlayerTab::Recent,
            investment_page: 1,
            selected: 0,
            players: HashMap::with_capacity(3),
            players_loading: HashMap::with_capacity(3),
            sbcs: Vec::new(),
            sbc_selected: 0,
            sbcs_loading: false,
            reference: ReferenceData::default(),
            reference_loading: false,
            search_input: String::new(),
            search_query: String::new(),
            search_debounce: Debouncer::new(search_delay),
            search_results: Vec::new(),
            search_selected: 0,
            search_loading: false,
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() == LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }

    pub fn tab_players(&self) -> &[PlayerRecord] {
        self.players
            .get(&self.player_tab)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn tab_loading(&self) -> bool {
        self.players_loading
            .get(&self.player_tab)
            .copied()
            .unwrap_or(false)
    }

    pub fn visible_sbcs(&self) -> &[SbcSet] {
        let end = self.sbcs.len().min(SBC_LIST_LIMIT);
        &self.sbcs[..end]
    }

    /// The player under the cursor on whichever screen lists players.
    pub fn selected_player(&self) -> Option<&PlayerRecord> {
        match self.screen {
            Screen::Home => self.tab_players().get(self.selected),
            Screen::Search => self.search_results.get(self.search_selected),
            Screen::Sbc => None,
        }
    }

    pub fn select_next(&mut self) {
        let (cursor, len) = self.cursor_mut();
        if len > 0 && *cursor + 1 < len {
            *cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        let (cursor, _) = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    fn cursor_mut(&mut self) -> (&mut usize, usize) {
        match self.screen {
            Screen::Home => {
                let len = self.tab_players().len();
                (&mut self.selected, len)
            }
            Screen::Sbc => {
                let len = self.visible_sbcs().len();
                (&mut self.sbc_selected, len)
            }
            Screen::Search => {
                let len = self.search_results.len();
                (&mut self.search_selected, len)
            }
        }
    }

    pub fn cycle_tab(&mut self) {
        self.player_tab = self.player_tab.next();
        self.selected = 0;
    }

    pub fn search_push(&mut self, c: char, now: Instant) {
        self.search_input.push(c);
        self.search_debounce.update(self.search_input.clone(), now);
    }

    pub fn search_pop(&mut self, now: Instant) {
        self.search_input.pop();
        self.search_debounce.update(self.search_input.clone(), now);
    }

    /// Leaves search: pending keystrokes are cancelled and never fetched.
    pub fn close_search(&mut self) {
        self.search_debounce.cancel();
        self.search_input.clear();
        self.search_query.clear();
        self.search_results.clear();
        self.search_selected = 0;
        self.search_loading = false;
        self.screen = Screen::Home;
    }

    /// Commits the debounced query once it settles. Returns the query to fetch,
    /// or `None` when nothing settled or the query is too short to search.
    pub fn poll_search(&mut self, now: Instant, min_chars: usize) -> Option<String> {
        let settled = self.search_debounce.poll(now)?;
        let query = settled.trim().to_string();
        if query == self.search_query {
            return None;
        }
        self.search_query = query.clone();
        self.search_selected = 0;
        if query.chars().count() < min_chars {
            self.search_results.clear();
            self.search_loading = false;
            return None;
        }
        self.search_loading = true;
        Some(query)
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetReference(ReferenceData),
    SetPlayers {
        tab: PlayerTab,
        page: u32,
        players: Vec<PlayerRecord>,
    },
    SetSbcs(Vec<SbcSet>),
    SetSearchResults {
        query: String,
        players: Vec<PlayerRecord>,
    },
    Failed {
        request: RequestKind,
        message: String,
    },
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    FetchReference,
    FetchPlayers { tab: PlayerTab, page: u32 },
    FetchSbcs,
    Search { query: String },
    ClearCache,
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetReference(reference) => {
            state.push_log(format!("[INFO] Reference data: {}", reference.summary()));
            state.reference = reference;
            state.reference_loading = false;
        }
        Delta::SetPlayers { tab, page, players } => {
            if tab == PlayerTab::Investment && page != state.investment_page {
                return;
            }
            state.players_loading.insert(tab, false);
            state.players.insert(tab, players);
            if tab == state.player_tab {
                let len = state.tab_players().len();
                state.selected = state.selected.min(len.saturating_sub(1));
            }
        }
        Delta::SetSbcs(sbcs) => {
            state.sbcs = sbcs;
            state.sbcs_loading = false;
            state.sbc_selected = state
                .sbc_selected
                .min(state.visible_sbcs().len().saturating_sub(1));
        }
        Delta::SetSearchResults { query, mut players } => {
            // A slower response for an older query must not overwrite newer results.
            if query != state.search_query {
                return;
            }
            players.truncate(SEARCH_RESULT_LIMIT);
            state.search_results = players;
            state.search_selected = 0;
            state.search_loading = false;
        }
        Delta::Failed { request, message } => {
            match request {
                RequestKind::Reference => state.reference_loading = false,
                RequestKind::Players { tab, page } => {
                    if tab == PlayerTab::Investment && page != state.investment_page {
                        return;
                    }
                    state.players_loading.insert(tab, false);
                }
                RequestKind::Sbcs => state.sbcs_loading = false,
                RequestKind::Search => {
                    // Forget the query so settling on the same text again resends it.
                    state.search_query.clear();
                    state.search_loading = false;
                }
            }
            state.push_log(format!("[WARN] {message}"));
        }
        Delta::Log(line) => state.push_log(line),
    }
}

pub fn tab_label(tab: PlayerTab) -> &'static str {
    match tab {
        PlayerTab::Recent => "Recent",
        PlayerTab::Trending => "Trending",
        PlayerTab::Investment => "Investment",
    }
}

pub fn tab_heading(tab: PlayerTab) -> (&'static str, &'static str) {
    match tab {
        PlayerTab::Recent => (
            "Recently Added Players",
            "Just added players to the platform",
        ),
        PlayerTab::Trending => ("Trending Players", "Players that are currently trending"),
        PlayerTab::Investment => (
            "Investment Players",
            "Players that are currently in investment",
        ),
    }
}
