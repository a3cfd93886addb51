use futcard_terminal::assets::{AssetUrls, CrestTheme};
use futcard_terminal::card::{CardView, GK_ATTRIBUTE_LABELS, display_name, slugify};
use futcard_terminal::model::{PlayerRecord, RarityDefinition};

fn urls() -> AssetUrls {
    AssetUrls::new("https://cdn.test", "https://ea.test")
}

fn totw() -> RarityDefinition {
    RarityDefinition {
        id: 3,
        name: "Team of the Week".to_string(),
        colors: vec!["f5d67b".into(), "fff".into(), "1b1b1b".into()],
        color_slot_indices: vec![1, 2, 1, 2, 1, 2, 3, 1, 1],
        level_count: 0,
    }
}

fn player() -> PlayerRecord {
    PlayerRecord {
        id: 50_563_999,
        base_id: 231_747,
        name: "Kylian Mbappé Lottin".to_string(),
        c_name: "Mbappé".to_string(),
        rating: 91,
        position: vec!["ST".to_string(), "LW".to_string()],
        nation: 18,
        leagueid: 53,
        teamid: 243,
        rarity: 3,
        attributes: vec![97, 90, 80, 92, 36, 78],
        skill_moves: 5,
        weak_foot: 4,
        playstyle_plus: vec![7, 21],
        ..PlayerRecord::default()
    }
}

#[test]
fn builds_outfield_card() {
    let view = CardView::build(&player(), &[totw()], &urls());
    assert_eq!(view.display_name, "Mbappé");
    assert!(!view.is_goalkeeper);
    assert_eq!(view.attributes[0], ("PAC", 97));
    assert_eq!(view.attributes.len(), 6);
    assert_eq!(view.position, "ST");
    assert_eq!(view.alt_positions, vec!["LW".to_string()]);
    assert_eq!(view.rarity_name, "Team of the Week");
    assert_eq!(view.palette.header, "#f5d67b");
    assert_eq!(view.palette.name, "#000fff");
    assert_eq!(view.palette.background, "#1b1b1b");
    assert_eq!(view.crest_theme, CrestTheme::Light);
    assert_eq!(view.card_url, "https://cdn.test/card/l_0_r_3.png");
    assert_eq!(
        view.portrait_urls,
        [
            "https://cdn.test/player/50563999.webp".to_string(),
            "https://cdn.test/player/231747.webp".to_string(),
        ]
    );
    assert_eq!(view.nation_url, "https://cdn.test/nation/light/18.png");
    assert_eq!(view.league_url, "https://cdn.test/league/light/53.png");
    assert_eq!(view.club_url, "https://cdn.test/club/light/243.png");
    assert_eq!(
        view.playstyle_plus_urls,
        vec![
            "https://cdn.test/traits/7.png".to_string(),
            "https://cdn.test/traits/21.png".to_string(),
        ]
    );
    assert_eq!(view.link, "/player/mbapp--50563999");
}

#[test]
fn goalkeeper_labels_and_unknown_rarity() {
    let mut keeper = player();
    keeper.position = vec!["GK".to_string()];
    keeper.rarity = 999;
    keeper.rarity_name = "Rare".to_string();
    let view = CardView::build(&keeper, &[totw()], &urls());
    assert!(view.is_goalkeeper);
    let labels: Vec<&str> = view.attributes.iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, GK_ATTRIBUTE_LABELS.to_vec());
    assert_eq!(view.rarity_name, "Rare");
    assert_eq!(view.palette.header, "#ffffff");
    assert_eq!(view.crest_theme, CrestTheme::Dark);
    assert_eq!(view.card_url, "https://cdn.test/card/l_0_r_999.png");
    assert_eq!(view.nation_url, "https://cdn.test/nation/dark/18.png");
}

#[test]
fn display_name_falls_back() {
    let mut p = PlayerRecord::default();
    assert_eq!(display_name(&p), "Unknown");
    p.name = "Full Name".to_string();
    assert_eq!(display_name(&p), "Full Name");
    p.c_name = "Short".to_string();
    assert_eq!(display_name(&p), "Short");
}

#[test]
fn slug_matches_link_format() {
    assert_eq!(slugify("Vini Jr."), "vini-jr-");
}
