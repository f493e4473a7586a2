// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for loading and validating status catalogs from disk

use anef_checker::catalog::{CatalogError, StatusDatabase};
use anef_checker::i18n::Lang;
use anef_checker::types::{Service, Stage, StatusCode};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

const VALID_JSON: &str = r#"{
  "statuses": [
    {
      "index": "1",
      "api_code": "draft",
      "stage": "Création de la demande",
      "comments": [
        {"language": "fr", "comment": "Brouillon"},
        {"language": "en", "comment": "Draft"}
      ]
    },
    {
      "index": "4.3",
      "api_code": "EA_EN_ATTENTE_EA",
      "stage": "ENTRETIEN_ASSIMILATION",
      "service": "prefecture"
    }
  ]
}"#;

#[test]
fn test_load_json_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "status_data.json", VALID_JSON);

    let db = StatusDatabase::from_file(&path).expect("catalog should load");
    assert_eq!(db.len(), 2);

    let draft = db.find(StatusCode::Draft).unwrap();
    assert_eq!(draft.stage, Stage::CreationDemande);
    assert_eq!(draft.comment(Lang::Fr), Some("Brouillon"));

    let interview = db.find(StatusCode::EaEnAttenteEa).unwrap();
    assert_eq!(interview.service, Some(Service::Prefecture));
    assert!(interview.comments.is_empty());
}

#[test]
fn test_entries_keep_document_order() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "status_data.json", VALID_JSON);
    let db = StatusDatabase::from_file(&path).unwrap();
    let codes: Vec<StatusCode> = db.entries().iter().map(|e| e.api_code).collect();
    assert_eq!(codes, vec![StatusCode::Draft, StatusCode::EaEnAttenteEa]);
}

#[test]
fn test_load_yaml_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "status_data.yaml",
        r#"
statuses:
  - index: 8.2
    api_code: decret_publie
    stage: CEREMONIE_LIVRET
    service: DECRET
    comments:
      - language: es
        comment: Decreto publicado
"#,
    );

    let db = StatusDatabase::from_file(&path).expect("yaml catalog should load");
    let entry = db.find(StatusCode::DecretPublie).unwrap();
    assert_eq!(entry.index.as_deref(), Some("8.2"));
    assert_eq!(entry.comment(Lang::Es), Some("Decreto publicado"));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = StatusDatabase::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    assert!(!err.is_malformed());
}

#[test]
fn test_unparseable_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "{ \"statuses\": [ ");
    let err = StatusDatabase::from_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Malformed(_)));
}

#[test]
fn test_one_invalid_code_fails_whole_load() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "status_data.json",
        r#"{"statuses": [
            {"api_code": "DRAFT", "stage": "CREATION_DEMANDE"},
            {"api_code": "NOT_A_REAL_CODE", "stage": "CREATION_DEMANDE"},
            {"api_code": "DECRET_PUBLIE", "stage": "CEREMONIE_LIVRET"}
        ]}"#,
    );

    match StatusDatabase::from_file(&path) {
        Err(CatalogError::InvalidValue {
            entry,
            field,
            value,
        }) => {
            assert_eq!(entry, 2);
            assert_eq!(field, "api_code");
            assert_eq!(value, "NOT_A_REAL_CODE");
        }
        other => panic!("expected invalid api_code, got {:?}", other),
    }
}

#[test]
fn test_invalid_stage_or_service_is_fatal() {
    let stage = StatusDatabase::from_json_str(
        r#"{"statuses": [{"api_code": "DRAFT", "stage": "Somewhere"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(
        stage,
        CatalogError::InvalidValue { field: "stage", .. }
    ));

    let service = StatusDatabase::from_json_str(
        r#"{"statuses": [{"api_code": "DRAFT", "stage": "CREATION_DEMANDE", "service": "MAIRIE"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(
        service,
        CatalogError::InvalidValue { field: "service", .. }
    ));
}

#[test]
fn test_duplicate_codes_are_rejected() {
    let err = StatusDatabase::from_json_str(
        r#"{"statuses": [
            {"api_code": "DRAFT", "stage": "CREATION_DEMANDE"},
            {"api_code": "draft", "stage": "CREATION_DEMANDE"}
        ]}"#,
    )
    .unwrap_err();
    match err {
        CatalogError::DuplicateCode {
            code,
            first,
            second,
        } => {
            assert_eq!(code, StatusCode::Draft);
            assert_eq!((first, second), (1, 2));
        }
        other => panic!("expected duplicate code, got {:?}", other),
    }
}

#[test]
fn test_duplicate_language_is_rejected() {
    let err = StatusDatabase::from_json_str(
        r#"{"statuses": [{
            "api_code": "DRAFT",
            "stage": "CREATION_DEMANDE",
            "comments": [
                {"language": "fr", "comment": "Brouillon"},
                {"language": "FR", "comment": "Encore un brouillon"}
            ]
        }]}"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::DuplicateComment {
            lang: Lang::Fr,
            ..
        }
    ));
    assert!(err.is_malformed());
}

#[test]
fn test_load_without_path_uses_embedded_catalog() {
    let db = StatusDatabase::load(None).expect("embedded catalog should load");
    assert_eq!(db.len(), StatusCode::all().count());
}
