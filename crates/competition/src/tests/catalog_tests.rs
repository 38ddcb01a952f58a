use super::*;
use std::io::Write;

fn question(id: u32) -> Question {
    Question {
        id: QuestionId(id),
        text: format!("riddle {id}"),
        answer: format!("answer {id}"),
    }
}

#[test]
fn builtin_catalog_has_twenty_ordered_riddles() {
    let catalog = Catalog::builtin().expect("builtin");
    assert_eq!(catalog.len(), 20);
    assert_eq!(catalog.last_index(), 19);
    let ids: Vec<u32> = catalog.questions().iter().map(|q| q.id.0).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    assert_eq!(catalog.get(2).expect("third").answer, "Echo");
    assert!(catalog.get(0).expect("first").text.contains('\n'));
    assert!(catalog.get(20).is_none());
}

#[test]
fn rejects_empty_catalog() {
    assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
}

#[test]
fn rejects_zero_and_duplicate_ids() {
    let err = Catalog::new(vec![question(1), question(0)]).expect_err("zero id");
    assert!(matches!(err, CatalogError::NonPositiveId(QuestionId(0), 1)));

    let err = Catalog::new(vec![question(4), question(7), question(4)]).expect_err("dup");
    assert!(matches!(err, CatalogError::DuplicateId(QuestionId(4))));
}

#[test]
fn rejects_negative_ids_in_json() {
    let raw = r#"[{ "id": -1, "text": "t", "answer": "a" }]"#;
    assert!(matches!(Catalog::from_json(raw), Err(CatalogError::Json(_))));
}

#[test]
fn keeps_file_order_rather_than_id_order() {
    let catalog = Catalog::new(vec![question(9), question(2), question(5)]).expect("catalog");
    let ids: Vec<u32> = catalog.questions().iter().map(|q| q.id.0).collect();
    assert_eq!(ids, vec![9, 2, 5]);
}

#[test]
fn parses_toml_catalog() {
    let raw = r#"
        [[questions]]
        id = 1
        text = """
I have keys but no locks,
I have space but no room."""
        answer = "Keyboard"

        [[questions]]
        id = 2
        text = "The more you take, the bigger I get."
        answer = "Hole"
    "#;
    let catalog = Catalog::from_toml(raw).expect("toml");
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get(0).expect("first").text,
        "I have keys but no locks,\nI have space but no room."
    );
}

#[test]
fn loads_catalog_files_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");

    let json_path = dir.path().join("quiz.json");
    let mut file = std::fs::File::create(&json_path).expect("create");
    file.write_all(br#"[{ "id": 1, "text": "t", "answer": "a" }]"#)
        .expect("write");
    assert_eq!(Catalog::load(&json_path).expect("json").len(), 1);

    let toml_path = dir.path().join("quiz.TOML");
    std::fs::write(
        &toml_path,
        "[[questions]]\nid = 3\ntext = \"t\"\nanswer = \"a\"\n",
    )
    .expect("write");
    assert_eq!(Catalog::load(&toml_path).expect("toml").len(), 1);

    let yaml_path = dir.path().join("quiz.yaml");
    assert!(matches!(
        Catalog::load(&yaml_path),
        Err(CatalogError::UnsupportedFormat(ext)) if ext == "yaml"
    ));

    let missing = dir.path().join("missing.json");
    assert!(matches!(Catalog::load(&missing), Err(CatalogError::Io { .. })));
}
