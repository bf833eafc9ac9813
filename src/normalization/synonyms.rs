// ABOUTME: Synonym tables mapping free-text categorical answers to dataset labels
// ABOUTME: Keys are folded text; values are the canonical labels used in the training CSV
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use routine_core::models::FeatureColumn;

type SynonymTable = &'static [(&'static str, &'static [&'static str])];

const GOALS: SynonymTable = &[
    (
        "Fuerza",
        &["fuerza", "strength", "fuerza maxima", "powerlifting", "power", "ser mas fuerte"],
    ),
    (
        "Hipertrofia",
        &[
            "hipertrofia",
            "hypertrophy",
            "ganar musculo",
            "ganar masa",
            "masa muscular",
            "musculo",
            "muscle",
            "muscle gain",
            "bodybuilding",
            "volumen",
        ],
    ),
    (
        "Resistencia",
        &[
            "resistencia",
            "endurance",
            "cardio",
            "stamina",
            "aguante",
            "condicion fisica",
            "mantenerse",
            "mantenerme",
            "mantenimiento",
            "maintain",
            "maintenance",
            "stay fit",
        ],
    ),
    (
        "Perdida de peso",
        &[
            "perdida de peso",
            "perder peso",
            "bajar de peso",
            "adelgazar",
            "quemar grasa",
            "perder grasa",
            "definicion",
            "weight loss",
            "lose weight",
            "fat loss",
        ],
    ),
];

const LEVELS: SynonymTable = &[
    (
        "Principiante",
        &["principiante", "beginner", "novato", "novice", "basico", "inicial", "nuevo", "newbie"],
    ),
    ("Intermedio", &["intermedio", "intermediate", "medio", "regular"]),
    ("Avanzado", &["avanzado", "advanced", "experto", "expert", "pro"]),
];

const EQUIPMENT: SynonymTable = &[
    (
        "Gimnasio",
        &[
            "gimnasio",
            "gym",
            "gimnacio",
            "gimnasio completo",
            "gym completo",
            "full gym",
            "maquinas",
            "machines",
        ],
    ),
    (
        "Mancuernas",
        &["mancuernas", "mancuerna", "dumbbells", "dumbbell", "pesas", "pesas libres", "free weights"],
    ),
    (
        "Peso corporal",
        &[
            "peso corporal",
            "bodyweight",
            "body weight",
            "sin equipo",
            "solo cuerpo",
            "sin material",
            "ninguno",
            "nada",
            "none",
            "no equipment",
            "calistenia",
            "en casa",
        ],
    ),
];

const SEXES: SynonymTable = &[
    (
        "Masculino",
        &["masculino", "male", "m", "h", "hombre", "man", "varon", "chico"],
    ),
    (
        "Femenino",
        &["femenino", "female", "f", "mujer", "woman", "chica"],
    ),
];

/// Table for a categorical column; numeric columns have none
const fn table(column: FeatureColumn) -> Option<SynonymTable> {
    match column {
        FeatureColumn::Goal => Some(GOALS),
        FeatureColumn::Level => Some(LEVELS),
        FeatureColumn::Equipment => Some(EQUIPMENT),
        FeatureColumn::Sex => Some(SEXES),
        FeatureColumn::Days | FeatureColumn::Duration | FeatureColumn::Age => None,
    }
}

/// Canonical label for an already-folded value, if the value is a known synonym
#[must_use]
pub fn canonical(column: FeatureColumn, folded: &str) -> Option<&'static str> {
    table(column)?
        .iter()
        .find(|(_, aliases)| aliases.contains(&folded))
        .map(|(label, _)| *label)
}

/// Canonical labels known for a column, in table order
#[must_use]
pub fn known_labels(column: FeatureColumn) -> Vec<&'static str> {
    table(column)
        .map(|entries| entries.iter().map(|(label, _)| *label).collect())
        .unwrap_or_default()
}
