use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::api;
use crate::http_cache::clear_cache;
use crate::state::{Delta, ProviderCommand, RequestKind};

/// Serves provider commands on a background thread until the UI hangs up.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        while let Ok(first) = cmd_rx.recv() {
            let mut batch = vec![first];
            batch.extend(cmd_rx.try_iter());
            for cmd in coalesce(batch) {
                let delta = handle(cmd);
                if tx.send(delta).is_err() {
                    return;
                }
            }
        }
    });
}

/// Drops duplicate commands and every search but the newest; typing faster
/// than the API answers should not queue stale searches.
pub fn coalesce(batch: Vec<ProviderCommand>) -> Vec<ProviderCommand> {
    let last_search = batch
        .iter()
        .rposition(|cmd| matches!(cmd, ProviderCommand::Search { .. }));
    let mut out: Vec<ProviderCommand> = Vec::with_capacity(batch.len());
    for (idx, cmd) in batch.into_iter().enumerate() {
        if matches!(cmd, ProviderCommand::Search { .. }) && Some(idx) != last_search {
            continue;
        }
        if !out.contains(&cmd) {
            out.push(cmd);
        }
    }
    out
}

fn handle(cmd: ProviderCommand) -> Delta {
    match cmd {
        ProviderCommand::FetchReference => match api::fetch_reference_data() {
            Ok(reference) => Delta::SetReference(reference),
            Err(err) => failed(RequestKind::Reference, format!("Reference fetch error: {err:#}")),
        },
        ProviderCommand::FetchPlayers { tab, page } => match api::fetch_players(tab, page) {
            Ok(players) => Delta::SetPlayers { tab, page, players },
            Err(err) => failed(
                RequestKind::Players { tab, page },
                format!("Player list fetch error: {err:#}"),
            ),
        },
        ProviderCommand::FetchSbcs => match api::fetch_sbcs() {
            Ok(sbcs) => Delta::SetSbcs(sbcs),
            Err(err) => failed(RequestKind::Sbcs, format!("SBC fetch error: {err:#}")),
        },
        ProviderCommand::Search { query } => match api::search_players(&query) {
            Ok(players) => Delta::SetSearchResults { query, players },
            Err(err) => failed(RequestKind::Search, format!("Search '{query}' failed: {err:#}")),
        },
        ProviderCommand::ClearCache => match clear_cache() {
            Ok(()) => Delta::Log("[INFO] HTTP cache cleared".to_string()),
            Err(err) => Delta::Log(format!("[WARN] Cache clear failed: {err:#}")),
        },
    }
}

fn failed(request: RequestKind, message: String) -> Delta {
    Delta::Failed { request, message }
}
