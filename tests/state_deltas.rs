use std::time::{Duration, Instant};

use futcard_terminal::feed::coalesce;
use futcard_terminal::model::{PlayerRecord, SbcSet};
use futcard_terminal::reference::ReferenceData;
use futcard_terminal::state::{
    AppState, Delta, PlayerTab, ProviderCommand, RequestKind, SEARCH_RESULT_LIMIT, Screen,
    apply_delta,
};

const DELAY: Duration = Duration::from_millis(400);

fn player(id: u64, name: &str) -> PlayerRecord {
    PlayerRecord {
        id,
        name: name.to_string(),
        rating: 80,
        ..PlayerRecord::default()
    }
}

#[test]
fn set_players_fills_tab_and_clamps_selection() {
    let mut state = AppState::new(DELAY);
    state.selected = 5;
    state.players_loading.insert(PlayerTab::Recent, true);
    apply_delta(
        &mut state,
        Delta::SetPlayers {
            tab: PlayerTab::Recent,
            page: 1,
            players: vec![player(1, "A"), player(2, "B")],
        },
    );
    assert_eq!(state.tab_players().len(), 2);
    assert_eq!(state.selected, 1);
    assert!(!state.tab_loading());
    assert_eq!(state.selected_player().map(|p| p.id), Some(2));
}

#[test]
fn investment_page_mismatch_is_dropped() {
    let mut state = AppState::new(DELAY);
    state.investment_page = 2;
    apply_delta(
        &mut state,
        Delta::SetPlayers {
            tab: PlayerTab::Investment,
            page: 1,
            players: vec![player(1, "A")],
        },
    );
    assert!(!state.players.contains_key(&PlayerTab::Investment));
}

#[test]
fn sbc_list_is_capped() {
    let mut state = AppState::new(DELAY);
    let sbcs: Vec<SbcSet> = (0..15)
        .map(|i| SbcSet {
            setid: i.to_string(),
            ..SbcSet::default()
        })
        .collect();
    apply_delta(&mut state, Delta::SetSbcs(sbcs));
    assert_eq!(state.sbcs.len(), 15);
    assert_eq!(state.visible_sbcs().len(), 9);
}

#[test]
fn debounced_search_issues_one_query() {
    let t0 = Instant::now();
    let mut state = AppState::new(DELAY);
    state.screen = Screen::Search;
    for (i, c) in "mes".chars().enumerate() {
        state.search_push(c, t0 + Duration::from_millis(50 * i as u64));
    }
    assert_eq!(state.poll_search(t0 + Duration::from_millis(300), 2), None);
    let query = state.poll_search(t0 + Duration::from_millis(100 + 400), 2);
    assert_eq!(query.as_deref(), Some("mes"));
    assert!(state.search_loading);
    assert_eq!(state.poll_search(t0 + Duration::from_secs(5), 2), None);
}

#[test]
fn short_query_clears_results_without_fetch() {
    let t0 = Instant::now();
    let mut state = AppState::new(DELAY);
    state.search_results = vec![player(1, "A")];
    state.search_push('m', t0);
    assert_eq!(state.poll_search(t0 + DELAY, 2), None);
    assert!(state.search_results.is_empty());
    assert_eq!(state.search_query, "m");
}

#[test]
fn stale_search_results_are_ignored() {
    let t0 = Instant::now();
    let mut state = AppState::new(DELAY);
    state.search_push('m', t0);
    state.search_push('e', t0);
    state.search_push('s', t0);
    assert!(state.poll_search(t0 + DELAY, 2).is_some());

    apply_delta(
        &mut state,
        Delta::SetSearchResults {
            query: "me".to_string(),
            players: vec![player(1, "Old")],
        },
    );
    assert!(state.search_results.is_empty());

    let many: Vec<PlayerRecord> = (0..25).map(|i| player(i, "P")).collect();
    apply_delta(
        &mut state,
        Delta::SetSearchResults {
            query: "mes".to_string(),
            players: many,
        },
    );
    assert_eq!(state.search_results.len(), SEARCH_RESULT_LIMIT);
    assert!(!state.search_loading);
}

#[test]
fn closing_search_cancels_pending_keystrokes() {
    let t0 = Instant::now();
    let mut state = AppState::new(DELAY);
    state.screen = Screen::Search;
    state.search_push('m', t0);
    state.search_push('e', t0);
    state.close_search();
    assert_eq!(state.screen, Screen::Home);
    assert_eq!(state.poll_search(t0 + Duration::from_secs(10), 2), None);
    assert!(state.search_query.is_empty());
}

#[test]
fn failures_reset_loading_and_log() {
    let mut state = AppState::new(DELAY);
    state.sbcs_loading = true;
    state.reference_loading = true;
    apply_delta(
        &mut state,
        Delta::Failed {
            request: RequestKind::Sbcs,
            message: "SBC fetch error: timeout".to_string(),
        },
    );
    assert!(!state.sbcs_loading);
    assert!(state.reference_loading);
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] SBC fetch error: timeout")
    );
}

#[test]
fn reference_data_is_logged() {
    let mut state = AppState::new(DELAY);
    let reference = ReferenceData::default();
    apply_delta(&mut state, Delta::SetReference(reference));
    assert!(
        state
            .logs
            .back()
            .is_some_and(|l| l.starts_with("[INFO] Reference data"))
    );
}

#[test]
fn log_is_bounded() {
    let mut state = AppState::new(DELAY);
    for i in 0..500 {
        state.push_log(format!("line {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("line 300"));
}

#[test]
fn coalesce_keeps_latest_search_only() {
    let batch = vec![
        ProviderCommand::Search {
            query: "me".to_string(),
        },
        ProviderCommand::FetchSbcs,
        ProviderCommand::Search {
            query: "mes".to_string(),
        },
        ProviderCommand::FetchSbcs,
    ];
    assert_eq!(
        coalesce(batch),
        vec![
            ProviderCommand::FetchSbcs,
            ProviderCommand::Search {
                query: "mes".to_string()
            },
        ]
    );
}

#[test]
fn reference_lookups_and_completeness() {
    use futcard_terminal::model::{NamedEntity, RarityDefinition};

    let named = |id: u32, name: &str| NamedEntity {
        id,
        name: name.to_string(),
    };
    let mut reference = ReferenceData {
        nations: vec![named(18, "France")],
        leagues: vec![named(53, "LALIGA EA SPORTS")],
        rarities: vec![RarityDefinition {
            id: 3,
            name: "TOTW".to_string(),
            ..RarityDefinition::default()
        }],
        teams: Vec::new(),
    };
    assert!(!reference.is_complete());
    reference.teams.push(named(243, "Real Madrid"));
    assert!(reference.is_complete());

    assert_eq!(reference.nation_name(18), Some("France"));
    assert_eq!(reference.league_name(53), Some("LALIGA EA SPORTS"));
    assert_eq!(reference.team_name(243), Some("Real Madrid"));
    assert_eq!(reference.team_name(1), None);
    assert_eq!(reference.rarity(3).map(|r| r.name.as_str()), Some("TOTW"));
    assert_eq!(
        reference.summary(),
        "1 nations, 1 leagues, 1 rarities, 1 teams"
    );
}

#[test]
fn failed_search_can_be_retried_with_same_text() {
    let t0 = Instant::now();
    let mut state = AppState::new(DELAY);
    state.screen = Screen::Search;
    for c in "mes".chars() {
        state.search_push(c, t0);
    }
    assert_eq!(state.poll_search(t0 + DELAY, 2).as_deref(), Some("mes"));

    apply_delta(
        &mut state,
        Delta::Failed {
            request: RequestKind::Search,
            message: "Search 'mes' failed: timeout".to_string(),
        },
    );
    assert!(!state.search_loading);

    let t1 = t0 + Duration::from_secs(1);
    state.search_push('x', t1);
    state.search_pop(t1 + Duration::from_millis(50));
    let retry = state.poll_search(t1 + Duration::from_millis(50) + DELAY, 2);
    assert_eq!(retry.as_deref(), Some("mes"));
    assert!(state.search_loading);
}

#[test]
fn stale_investment_failure_keeps_current_page_loading() {
    let mut state = AppState::new(DELAY);
    state.investment_page = 3;
    state.players_loading.insert(PlayerTab::Investment, true);
    apply_delta(
        &mut state,
        Delta::Failed {
            request: RequestKind::Players {
                tab: PlayerTab::Investment,
                page: 2,
            },
            message: "Player list fetch error: timeout".to_string(),
        },
    );
    assert_eq!(state.players_loading.get(&PlayerTab::Investment), Some(&true));

    apply_delta(
        &mut state,
        Delta::Failed {
            request: RequestKind::Players {
                tab: PlayerTab::Investment,
                page: 3,
            },
            message: "Player list fetch error: timeout".to_string(),
        },
    );
    assert_eq!(state.players_loading.get(&PlayerTab::Investment), Some(&false));
}
