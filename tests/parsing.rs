use std::fs;
use std::path::PathBuf;

use futcard_terminal::api::{
    parse_named_json, parse_players_json, parse_rarities_json, parse_sbcs_json, players_path,
    search_url,
};
use futcard_terminal::colors::compute_palette;
use futcard_terminal::config::Config;
use futcard_terminal::state::PlayerTab;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_players_fixture() {
    let players = parse_players_json(&read_fixture("players.json")).expect("fixture should parse");
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].id, 50_563_999);
    assert_eq!(players[0].c_name, "Mbappé");
    assert_eq!(players[0].position, vec!["ST".to_string(), "LW".to_string()]);
    assert_eq!(players[0].latest_price, Some(154_000));
    assert_eq!(players[0].playstyle_plus, vec![7]);

    // Loosely typed second row: string ids, nulls where arrays belong.
    assert_eq!(players[1].id, 212_831);
    assert_eq!(players[1].base_id, 0);
    assert_eq!(players[1].rating, 89);
    assert!(players[1].playstyles.is_empty());
    assert_eq!(players[1].latest_price, None);
}

#[test]
fn parses_rarities_fixture() {
    let rarities =
        parse_rarities_json(&read_fixture("promos.json")).expect("fixture should parse");
    assert_eq!(rarities.len(), 3);
    assert_eq!(rarities[0].level_count, 3);
    assert_eq!(rarities[0].color_slot_indices.len(), 9);

    let gold = compute_palette(rarities.first(), 80);
    assert_eq!(gold.header, "#3d2612");
    assert_eq!(gold.dividers, "#cd7f32");

    let broken = &rarities[2];
    assert!(broken.colors.is_empty());
    assert!(broken.color_slot_indices.is_empty());
    assert_eq!(compute_palette(Some(broken), 80).header, "#ffffff");
}

#[test]
fn parses_sbcs_fixture_as_bare_array() {
    let sbcs = parse_sbcs_json(&read_fixture("sbcs.json")).expect("fixture should parse");
    assert_eq!(sbcs.len(), 2);
    assert_eq!(sbcs[0].setid, "101");
    assert_eq!(sbcs[0].challenges_count, 4);
    assert_eq!(sbcs[0].rewards.len(), 2);
    assert_eq!(sbcs[1].setid, "basic-1");
    assert_eq!(sbcs[1].end_time, 0);
    assert!(sbcs[1].rewards.is_empty());
}

#[test]
fn parses_named_reference_fixture() {
    let nations = parse_named_json(&read_fixture("nations.json")).expect("fixture should parse");
    assert_eq!(nations.len(), 2);
    assert_eq!(nations[1].name, "Brazil");
}

#[test]
fn null_and_empty_payloads_are_empty() {
    assert!(parse_players_json("null").expect("null should parse").is_empty());
    assert!(parse_players_json("  ").expect("blank should parse").is_empty());
    assert!(parse_sbcs_json(r#"{"data": null}"#).expect("null data should parse").is_empty());
}

#[test]
fn rejects_non_list_payloads() {
    assert!(parse_players_json(r#"{"data": 3}"#).is_err());
    assert!(parse_players_json("42").is_err());
    assert!(parse_players_json("{not json").is_err());
}

#[test]
fn endpoint_paths() {
    assert_eq!(players_path(PlayerTab::Recent, 1), "/get_latest");
    assert_eq!(players_path(PlayerTab::Trending, 1), "/top_rated/");
    assert_eq!(players_path(PlayerTab::Investment, 3), "/investment_players/?page=3");
    assert_eq!(players_path(PlayerTab::Investment, 0), "/investment_players/?page=1");
}

#[test]
fn search_url_encodes_query() {
    let cfg = Config {
        api_base_url: "https://api.test".to_string(),
        ..Config::default()
    };
    let url = search_url(&cfg, "vini jr&co").expect("url should build");
    assert_eq!(url, "https://api.test/search/?name=vini+jr%26co");
}
