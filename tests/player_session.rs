use katube::catalog::CatalogDirectory;
use katube::model::{Item, MoveOutcome};
use katube::store::{FileStore, KeyValueStore};
use katube::{Player, PlayerConfig};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

/// Create a catalog with three summaries and a dictionary
fn create_test_catalog(root: &Path) {
    let summary_dir = root.join("summary");
    fs::create_dir_all(&summary_dir).expect("Failed to create summary dir");

    for (file, title) in [("night.json", "Night"), ("day.json", "Day"), ("dawn.json", "Dawn")] {
        let summary = format!(
            r#"{{"path": "/{file}.mp4", "mimeType": "video/mp4", "title": "{title}", "principalArray": ["Someone"], "name": "{file}.mp4"}}"#
        );
        fs::write(summary_dir.join(file), summary).expect("Failed to write summary");
    }

    fs::write(
        summary_dir.join("dictionary.json"),
        r#"{
            "tagArray": [
                {"name": "cat", "referenceArray": [{"name": "k-night", "count": 3}, {"name": "k-day", "count": 1}]},
                {"name": "dog", "referenceArray": [{"name": "k-day", "count": 2}, {"name": "k-dawn", "count": 5}]}
            ],
            "translationArray": [
                {"key": "k-night", "value": "night.json"},
                {"key": "k-day", "value": "day.json"},
                {"key": "k-dawn", "value": "dawn.json"}
            ]
        }"#,
    )
    .expect("Failed to write dictionary");
}

fn open_player(dir: &TempDir) -> Player<CatalogDirectory> {
    let store = FileStore::open(dir.path().join("store.json")).expect("Failed to open store");
    let catalog = CatalogDirectory::new(dir.path().to_path_buf());
    Player::new(PlayerConfig::default(), Rc::new(store), catalog)
}

#[test]
fn test_playlists_survive_restart() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    create_test_catalog(dir.path());

    {
        let mut player = open_player(&dir);
        player.create_playlist("evening");
        player.create_playlist("morning");
        player.add_play(0, "night.json");
        player.add_play(0, "dawn.json");
        player.add_play(1, "day.json");

        player.select_playlist(0);
        assert_eq!(player.move_play(1, 0, false), MoveOutcome::Moved { from: 1, to: 0 });
        assert_eq!(player.move_playlist(1, 0, false), MoveOutcome::Moved { from: 1, to: 0 });
    }

    let player = open_player(&dir);
    let names: Vec<_> = player.playlists().iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, vec!["morning", "evening"]);

    // Indices are regenerated in stored order
    let evening = player.playlists().playlist_by_index(1).unwrap();
    assert_eq!(evening.name(), "evening");
    let plays: Vec<_> = evening.plays().iter().map(|p| (p.index(), p.name().to_string())).collect();
    assert_eq!(
        plays,
        vec![(Some(0), "dawn.json".to_string()), (Some(1), "night.json".to_string())]
    );
}

#[test]
fn test_store_file_format() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    {
        let mut player = open_player(&dir);
        player.create_playlist("evening");
        player.add_play(0, "night.json");
    }

    let store = FileStore::open(dir.path().join("store.json")).unwrap();
    assert_eq!(store.get("katube-playListList").as_deref(), Some(r#""evening""#));
    assert_eq!(
        store.get("katube-playList-evening").as_deref(),
        Some(r#""night.json""#)
    );
}

#[test]
fn test_search_ranks_and_resolves_summaries() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    create_test_catalog(dir.path());

    let mut player = open_player(&dir);
    assert!(player.load_dictionary());

    let result = player.search("Cat dog");
    let names: Vec<_> = result.plays().iter().map(|p| p.name().to_string()).collect();
    // dawn 5, night 3, day 1 + 2 = 3 (night seen first)
    assert_eq!(names, vec!["dawn.json", "night.json", "day.json"]);

    let view = player.page_view().expect("search result is displayed");
    let titles: Vec<_> = view
        .plays
        .iter()
        .map(|entry| entry.summary.as_ref().map(|s| s.title.clone()))
        .collect();
    assert_eq!(
        titles,
        vec![Some("Dawn".to_string()), Some("Night".to_string()), Some("Day".to_string())]
    );
}

#[test]
fn test_missing_catalog_degrades_quietly() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let mut player = open_player(&dir);
    assert!(!player.load_dictionary());
    assert!(player.search("cat").is_empty());

    player.create_playlist("evening");
    player.add_play(0, "night.json");
    player.select_playlist(0);

    let view = player.page_view().unwrap();
    assert_eq!(view.plays.len(), 1);
    assert!(view.plays[0].summary.is_none());
}

#[test]
fn test_clear_all_empties_store_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    {
        let mut player = open_player(&dir);
        player.create_playlist("a");
        player.create_playlist("b");
        player.add_play(0, "x.json");
        player.add_play(1, "y.json");
        player.clear_all();
    }

    let store = FileStore::open(dir.path().join("store.json")).unwrap();
    assert!(store.get("katube-playListList").is_none());
    assert!(store.get("katube-playList-a").is_none());
    assert!(store.get("katube-playList-b").is_none());
}
