// ABOUTME: Text folding for tolerant matching of categorical values
// ABOUTME: Lowercases, strips Spanish diacritics and collapses separators and whitespace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Text folding.
//!
//! `fold("  Pérdida_de   PESO ")` yields `"perdida de peso"`. Two strings that
//! fold to the same key are treated as the same category everywhere.

/// Fold a free-text value into its comparison key
#[must_use]
pub fn fold(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        let ch = strip_diacritic(ch);
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_space = !folded.is_empty();
            continue;
        }
        if pending_space {
            folded.push(' ');
            pending_space = false;
        }
        folded.push(ch);
    }

    folded
}

/// Map accented Latin letters to their base letter
const fn strip_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}
