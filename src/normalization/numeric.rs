// ABOUTME: Tolerant parsing of free-text numeric answers (days per week, minutes, age)
// ABOUTME: Understands units, hour/minute combinations, ranges and Spanish/English number words
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Numeric field parsing.
//!
//! Text is split into numbers, words, dashes, colons and minute marks. Words
//! are folded before matching, so `"días"` and `"DIAS"` read the same, and
//! compound number words such as `"treinta y cinco"` or `"thirty-five"` are
//! joined. A range such as `"3-4"` or `"45 a 60 min"` resolves to its midpoint
//! rounded up, and `"1:30"` reads as hours and minutes. Every function returns
//! `None` when the text carries no usable quantity or more numbers than it
//! can account for; bounds are checked by the caller.

use routine_core::text::fold;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    /// Number spelled as a word, before compounds are joined
    WordNumber(f64),
    Word(String),
    Dash,
    Colon,
    MinuteMark,
}

const HOUR_UNITS: &[&str] = &["h", "hr", "hrs", "hora", "horas", "hour", "hours"];
const MINUTE_UNITS: &[&str] = &[
    "m", "min", "mins", "minuto", "minutos", "minute", "minutes",
];
const RANGE_WORDS: &[&str] = &["a", "to", "o", "or"];
const COMPOUND_JOINERS: &[&str] = &["y", "and"];

fn number_word(word: &str) -> Option<f64> {
    let value = match word {
        "un" | "uno" | "una" | "one" => 1.0,
        "dos" | "two" => 2.0,
        "tres" | "three" => 3.0,
        "cuatro" | "four" => 4.0,
        "cinco" | "five" => 5.0,
        "seis" | "six" => 6.0,
        "siete" | "seven" => 7.0,
        "ocho" | "eight" => 8.0,
        "nueve" | "nine" => 9.0,
        "diez" | "ten" => 10.0,
        "once" | "eleven" => 11.0,
        "doce" | "twelve" => 12.0,
        "quince" | "fifteen" => 15.0,
        "veinte" | "twenty" => 20.0,
        "veintiun" | "veintiuno" => 21.0,
        "veintidos" => 22.0,
        "veintitres" => 23.0,
        "veinticuatro" => 24.0,
        "veinticinco" => 25.0,
        "veintiseis" => 26.0,
        "veintisiete" => 27.0,
        "veintiocho" => 28.0,
        "veintinueve" => 29.0,
        "treinta" | "thirty" => 30.0,
        "cuarenta" | "forty" => 40.0,
        "cincuenta" | "fifty" => 50.0,
        "sesenta" | "sixty" => 60.0,
        "setenta" | "seventy" => 70.0,
        "ochenta" | "eighty" => 80.0,
        "noventa" | "ninety" => 90.0,
        _ => return None,
    };
    Some(value)
}

fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut negative = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_ascii_digit() {
            let mut literal = String::new();
            let mut seen_separator = false;
            while i < chars.len() {
                let current = chars[i];
                let decimal_separator = (current == '.' || current == ',')
                    && !seen_separator
                    && chars.get(i + 1).is_some_and(char::is_ascii_digit);
                if current.is_ascii_digit() {
                    literal.push(current);
                } else if decimal_separator {
                    literal.push('.');
                    seen_separator = true;
                } else {
                    break;
                }
                i += 1;
            }
            if let Ok(value) = literal.parse::<f64>() {
                tokens.push(Token::Number(if negative { -value } else { value }));
            }
            negative = false;
            continue;
        }

        if matches!(ch, '-' | '–' | '—') {
            let follows_number =
                matches!(tokens.last(), Some(Token::Number(_) | Token::WordNumber(_)));
            let precedes_digit = chars.get(i + 1).is_some_and(char::is_ascii_digit);
            if !follows_number && precedes_digit {
                negative = true;
            } else {
                tokens.push(Token::Dash);
            }
        } else if ch == ':' {
            tokens.push(Token::Colon);
        } else if matches!(ch, '\'' | '’' | '´') {
            tokens.push(Token::MinuteMark);
        } else if ch.is_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let word = fold(&word);
            tokens.push(number_word(&word).map_or(Token::Word(word), Token::WordNumber));
            continue;
        }
        i += 1;
    }

    join_compound_numbers(&tokens)
}

fn is_tens(value: f64) -> bool {
    (20.0..=90.0).contains(&value) && (value % 10.0).abs() < f64::EPSILON
}

fn is_unit(value: f64) -> bool {
    (1.0..=9.0).contains(&value)
}

/// `"treinta y cinco"` / `"thirty-five"` become one number; remaining number words become numbers
fn join_compound_numbers(tokens: &[Token]) -> Vec<Token> {
    let mut joined = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        if let [Token::WordNumber(tens), joiner, Token::WordNumber(units), ..] = &tokens[i..] {
            let joins = matches!(joiner, Token::Dash) || is_word(Some(joiner), COMPOUND_JOINERS);
            if joins && is_tens(*tens) && is_unit(*units) {
                joined.push(Token::Number(tens + units));
                i += 3;
                continue;
            }
        }
        joined.push(match &tokens[i] {
            Token::WordNumber(value) => Token::Number(*value),
            other => other.clone(),
        });
        i += 1;
    }

    joined
}

fn is_word(token: Option<&Token>, words: &[&str]) -> bool {
    matches!(token, Some(Token::Word(word)) if words.contains(&word.as_str()))
}

fn is_range_separator(token: Option<&Token>) -> bool {
    matches!(token, Some(Token::Dash)) || is_word(token, RANGE_WORDS)
}

fn number_count(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .filter(|token| matches!(token, Token::Number(_)))
        .count()
}

/// First `a - b` / `a a b` / `a to b` range, as `(lo, hi, index of hi)`
fn find_range(tokens: &[Token]) -> Option<(f64, f64, usize)> {
    tokens.windows(3).enumerate().find_map(|(index, window)| match window {
        [Token::Number(lo), separator, Token::Number(hi)] if is_range_separator(Some(separator)) => {
            Some((*lo, *hi, index + 2))
        }
        _ => None,
    })
}

fn midpoint_rounded_up(lo: f64, hi: f64) -> f64 {
    ((lo + hi) / 2.0).ceil()
}

/// Count-like quantity (days, age): a single number or a single range
fn count_from_tokens(tokens: &[Token]) -> Option<f64> {
    if tokens.contains(&Token::Colon) {
        return None;
    }

    let numbers = number_count(tokens);
    if let Some((lo, hi, _)) = find_range(tokens) {
        return (numbers == 2).then(|| midpoint_rounded_up(lo, hi));
    }
    if numbers != 1 {
        return None;
    }

    tokens.iter().find_map(|token| match token {
        Token::Number(value) => Some(value.round()),
        _ => None,
    })
}

/// Days per week from free text
#[must_use]
pub fn parse_days(text: &str) -> Option<f64> {
    count_from_tokens(&tokenize(text))
}

/// Age in years from free text
#[must_use]
pub fn parse_age(text: &str) -> Option<f64> {
    count_from_tokens(&tokenize(text))
}

/// Session length in minutes from free text
#[must_use]
pub fn parse_minutes(text: &str) -> Option<f64> {
    let tokens = tokenize(text);
    let has_clock = tokens.contains(&Token::Colon);

    if has_clock && tokens.contains(&Token::Dash) {
        return None;
    }
    if !has_clock {
        if let Some((lo, hi, hi_index)) = find_range(&tokens) {
            if number_count(&tokens) != 2 {
                return None;
            }
            let factor = if is_word(tokens.get(hi_index + 1), HOUR_UNITS) {
                60.0
            } else {
                1.0
            };
            return Some(midpoint_rounded_up(lo * factor, hi * factor));
        }
    }

    // A bare number is either the whole answer or the minutes after an hour group
    let mut total = 0.0;
    let mut groups = 0;
    let mut bare = 0;
    let mut after_hours = false;
    let mut i = 0;
    while i < tokens.len() {
        let next = tokens.get(i + 1);
        match &tokens[i] {
            Token::Number(hours) if matches!(next, Some(Token::Colon)) => {
                let Some(Token::Number(minutes)) = tokens.get(i + 2) else {
                    return None;
                };
                if *minutes >= 60.0 || minutes.fract() > 0.0 {
                    return None;
                }
                total += hours * 60.0 + minutes;
                groups += 1;
                after_hours = false;
                i += 3;
                if is_word(tokens.get(i), HOUR_UNITS) {
                    i += 1;
                }
            }
            Token::Colon => return None,
            Token::Number(value) if is_word(next, HOUR_UNITS) => {
                total += value * 60.0;
                groups += 1;
                after_hours = true;
                i += 2 + half_hour_suffix(&tokens[i + 2..], &mut total);
            }
            Token::Number(value)
                if is_word(next, MINUTE_UNITS) || matches!(next, Some(Token::MinuteMark)) =>
            {
                total += value;
                if !after_hours {
                    groups += 1;
                }
                after_hours = false;
                i += 2;
            }
            Token::Number(value) => {
                total += value;
                if !after_hours {
                    groups += 1;
                    bare += 1;
                }
                after_hours = false;
                i += 1;
            }
            Token::Word(word) if word == "media" || word == "half" => {
                if is_word(next, HOUR_UNITS) {
                    total += 30.0;
                    groups += 1;
                    i += 2;
                } else {
                    i += 1;
                }
                after_hours = false;
            }
            Token::Word(word) if HOUR_UNITS.contains(&word.as_str()) => {
                total += 60.0;
                groups += 1;
                after_hours = true;
                i += 1 + half_hour_suffix(&tokens[i + 1..], &mut total);
            }
            Token::Word(word) if COMPOUND_JOINERS.contains(&word.as_str()) => i += 1,
            _ => {
                after_hours = false;
                i += 1;
            }
        }
    }

    (groups > 0 && (bare == 0 || groups == 1)).then(|| total.round())
}

/// `"y media"` / `"and a half"` after an hour unit; returns tokens consumed
fn half_hour_suffix(rest: &[Token], total: &mut f64) -> usize {
    let words: Vec<&str> = rest
        .iter()
        .take(3)
        .map(|token| match token {
            Token::Word(word) => word.as_str(),
            _ => "",
        })
        .collect();

    match words.as_slice() {
        ["y", "media", ..] => {
            *total += 30.0;
            2
        }
        ["and", "a", "half"] => {
            *total += 30.0;
            3
        }
        _ => 0,
    }
}
