use super::*;
use serde_json::json;

#[test]
fn requests_use_the_action_tag() {
    let req: ApiRequest = serde_json::from_value(json!({
        "action": "updateScore",
        "name": "ada",
        "time": 93,
        "size": 10,
        "difficulty": 2
    }))
    .unwrap();
    assert_eq!(
        req,
        ApiRequest::UpdateScore {
            name: "ada".into(),
            time: 93,
            size: 10,
            difficulty: 2
        }
    );

    let req: ApiRequest = serde_json::from_value(json!({"action": "getBestScores"})).unwrap();
    assert_eq!(req, ApiRequest::GetBestScores);

    assert_eq!(
        serde_json::to_value(ApiRequest::GetUserName { id: 3 }).unwrap(),
        json!({"action": "getUserName", "id": 3})
    );

    assert!(serde_json::from_value::<ApiRequest>(json!({"action": "dropTable"})).is_err());
    assert!(serde_json::from_value::<ApiRequest>(json!({"name": "ada"})).is_err());
}

#[test]
fn create_user_is_idempotent_by_name() {
    let mut store = MemoryStore::new();
    let a = store.create_user("ada").unwrap();
    let b = store.create_user("bob").unwrap();
    let again = store.create_user("ada").unwrap();

    assert_eq!(a, User { id: 1, name: "ada".into() });
    assert_eq!(b.id, 2);
    assert_eq!(again, a);
    assert_eq!(store.users().len(), 2);
    assert!(store.create_user("").is_err());
}

#[test]
fn update_score_upserts_and_keeps_the_score_column() {
    let mut store = MemoryStore::new();
    let ada = store.create_user("ada").unwrap();

    store.update_score("ada", 120, 10, 1).unwrap();
    assert_eq!(
        store.scores(),
        &[Score {
            user_id: ada.id,
            score: 0,
            time: 120,
            size: 10,
            difficulty: 1
        }]
    );

    store.set_score(Score {
        score: 40,
        ..store.scores()[0]
    });
    store.update_score("ada", 80, 16, 2).unwrap();
    let row = store.scores()[0];
    assert_eq!(store.scores().len(), 1);
    assert_eq!((row.score, row.time, row.size, row.difficulty), (40, 80, 16, 2));

    assert!(matches!(
        store.update_score("nobody", 1, 1, 1),
        Err(CellGlyphError::UnknownUser(_))
    ));
}

#[test]
fn best_scores_are_top_five_descending() {
    let mut store = MemoryStore::new();
    for (i, score) in [10, 70, 30, 90, 50, 20, 80].into_iter().enumerate() {
        store.set_score(Score {
            score,
            ..Score::empty(i as u64 + 1)
        });
    }

    let best: Vec<i64> = store
        .best_scores()
        .unwrap()
        .iter()
        .map(|s| s.score)
        .collect();
    assert_eq!(best, vec![90, 80, 70, 50, 30]);
}

#[test]
fn user_name_lookup() {
    let mut store = MemoryStore::new();
    let u = store.create_user("grace").unwrap();
    assert_eq!(store.user_name(u.id).unwrap(), "grace");
    assert!(matches!(
        store.user_name(99),
        Err(CellGlyphError::UnknownUser(_))
    ));
}

#[test]
fn handle_json_returns_wire_shapes() {
    let mut store = MemoryStore::new();

    let out = handle_json(&mut store, r#"{"action": "createUser", "name": "ada"}"#).unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&out).unwrap(),
        json!({"id": 1, "name": "ada"})
    );

    let out = handle_json(
        &mut store,
        r#"{"action": "updateScore", "name": "ada", "time": 61, "size": 8, "difficulty": 1}"#,
    )
    .unwrap();
    assert_eq!(out, "true");

    let out = handle_json(&mut store, r#"{"action": "getBestScores"}"#).unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&out).unwrap(),
        json!([{"user_id": 1, "score": 0, "time": 61, "size": 8, "difficulty": 1}])
    );

    let out = handle_json(&mut store, r#"{"action": "getUserName", "id": 1}"#).unwrap();
    assert_eq!(out, "\"ada\"");

    assert!(matches!(
        handle_json(&mut store, "{"),
        Err(CellGlyphError::Serde(_))
    ));
}

#[test]
fn store_persists_as_json() {
    let dir = std::path::PathBuf::from("target").join("leaderboard_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("store.json");
    let _ = std::fs::remove_file(&path);

    assert_eq!(MemoryStore::load(&path).unwrap(), MemoryStore::new());

    let mut store = MemoryStore::new();
    store.create_user("ada").unwrap();
    store.update_score("ada", 5, 9, 3).unwrap();
    store.save(&path).unwrap();

    assert_eq!(MemoryStore::load(&path).unwrap(), store);
}

#[test]
fn only_create_and_update_mutate_the_store() {
    let mutating = |body: &str| serde_json::from_str::<ApiRequest>(body).unwrap().is_mutating();
    assert!(mutating(r#"{"action": "createUser", "name": "ada"}"#));
    assert!(mutating(
        r#"{"action": "updateScore", "name": "ada", "time": 1, "size": 8, "difficulty": 1}"#
    ));
    assert!(!mutating(r#"{"action": "getBestScores"}"#));
    assert!(!mutating(r#"{"action": "getUserName", "id": 1}"#));
}
