// ABOUTME: Integration tests for loading the fixture CSV and training both classifiers
// ABOUTME: Covers the training report, per-goal predictions, determinism and dataset failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use routine_core::models::UserAttributes;
use routine_intelligence::dataset::{load_records, resolve_dataset_path};
use routine_intelligence::{train, train_from_path, TrainingError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn attributes(goal: &str) -> UserAttributes {
    UserAttributes {
        goal: goal.to_owned(),
        level: "Avanzado".to_owned(),
        days: 5,
        duration_minutes: 75,
        equipment: "Peso corporal".to_owned(),
        age: 40,
        sex: "Masculino".to_owned(),
    }
}

#[test]
fn test_tree_report_on_fixture() {
    common::init_test_logging();
    let recommender = train_from_path(&common::fixture_path(), &common::tree_config()).unwrap();
    let report = recommender.report();

    assert_eq!(report.model, "DecisionTreeClassifier");
    assert_eq!(report.total_samples, 25);
    assert_eq!(report.dropped_classes, vec!["Strongman".to_owned()]);
    assert_eq!(report.train_samples, 24);
    assert_eq!(report.test_samples, 0);
    assert_eq!(report.test_accuracy, None);
    assert_eq!(report.oob_accuracy, None);
}

#[test]
fn test_tree_predicts_routine_by_goal() {
    let recommender = train_from_path(&common::fixture_path(), &common::tree_config()).unwrap();

    for (goal, routine) in [
        ("Fuerza", "Fuerza 5x5"),
        ("Hipertrofia", "Push-Pull-Legs"),
        ("Resistencia", "Cardio y Resistencia"),
        ("Perdida de peso", "HIIT"),
    ] {
        assert_eq!(recommender.predict(&attributes(goal)).unwrap(), routine);
    }
}

#[test]
fn test_encoder_accepts_case_and_accent_variants() {
    let recommender = train_from_path(&common::fixture_path(), &common::tree_config()).unwrap();
    assert_eq!(
        recommender.predict(&attributes("pérdida  de PESO")).unwrap(),
        "HIIT"
    );
}

#[test]
fn test_forest_is_deterministic_for_a_seed() {
    let records = load_records(&common::fixture_path()).unwrap();
    let first = train(&records, &common::forest_config()).unwrap();
    let second = train(&records, &common::forest_config()).unwrap();

    assert_eq!(first.report().test_samples, 4);
    assert_eq!(first.report().train_samples, 20);
    assert_eq!(first.report().test_accuracy, second.report().test_accuracy);
    assert_eq!(first.report().oob_accuracy, second.report().oob_accuracy);

    for goal in ["Fuerza", "Hipertrofia", "Resistencia", "Perdida de peso"] {
        assert_eq!(
            first.predict(&attributes(goal)).unwrap(),
            second.predict(&attributes(goal)).unwrap()
        );
    }
}

#[test]
fn test_unknown_category_is_reported_with_classes() {
    let recommender = train_from_path(&common::fixture_path(), &common::tree_config()).unwrap();
    let mut input = attributes("Fuerza");
    input.equipment = "Kettlebells".to_owned();

    match recommender.predict(&input) {
        Err(TrainingError::UnknownCategory { value, expected, .. }) => {
            assert_eq!(value, "Kettlebells");
            assert_eq!(expected, ["Gimnasio", "Mancuernas", "Peso corporal"]);
        }
        other => panic!("expected UnknownCategory, got {other:?}"),
    }
}

#[test]
fn test_dataset_failures() {
    let missing = train_from_path(Path::new("no/such/file.csv"), &common::tree_config());
    assert!(matches!(missing, Err(TrainingError::Io { .. })));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Objetivo,Nivel,Dias,Tiempo,Equipo_Disponible,Edad,Rutina").unwrap();
    writeln!(file, "Fuerza,Avanzado,4,60,Gimnasio,30,Fuerza 5x5").unwrap();
    let result = train_from_path(file.path(), &common::tree_config());
    assert!(matches!(result, Err(TrainingError::MissingColumn("Sexo"))));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Objetivo,Nivel,Dias,Tiempo,Equipo_Disponible,Edad,Sexo,Rutina").unwrap();
    writeln!(file, "Fuerza,Avanzado,cuatro,60,Gimnasio,30,Masculino,Fuerza 5x5").unwrap();
    let result = train_from_path(file.path(), &common::tree_config());
    assert!(matches!(result, Err(TrainingError::Csv(_))));
}

#[test]
fn test_only_singleton_classes_is_insufficient() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Objetivo,Nivel,Dias,Tiempo,Equipo_Disponible,Edad,Sexo,Rutina").unwrap();
    writeln!(file, "Fuerza,Avanzado,4,60,Gimnasio,30,Masculino,Fuerza 5x5").unwrap();
    writeln!(file, "Hipertrofia,Avanzado,4,60,Gimnasio,30,Masculino,Push-Pull-Legs").unwrap();

    let result = train_from_path(file.path(), &common::tree_config());
    assert!(matches!(result, Err(TrainingError::InsufficientData(_))));
}

#[test]
fn test_existing_dataset_path_is_kept() {
    let path = common::fixture_path();
    assert_eq!(resolve_dataset_path(&path), path);

    let relative = Path::new("definitely/missing.csv");
    assert_eq!(resolve_dataset_path(relative), relative);
}

#[test]
fn test_relative_dataset_path_falls_back_beside_executable() {
    let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
    let beside_exe = tempfile::Builder::new()
        .prefix("routines-beside-exe-")
        .suffix(".csv")
        .tempfile_in(&exe_dir)
        .unwrap();
    let file_name = beside_exe.path().file_name().unwrap();

    let relative = Path::new(file_name);
    assert!(!relative.exists(), "must not resolve from the working directory");
    assert_eq!(resolve_dataset_path(relative), exe_dir.join(file_name));
}

#[test]
fn test_bundled_dataset_trains() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join("pruebas.csv");
    let recommender = train_from_path(&path, &common::forest_config()).unwrap();

    let report = recommender.report();
    assert_eq!(report.model, "RandomForestClassifier");
    assert!(report.total_samples > 300);
    assert!(report.test_accuracy.is_some());
}
