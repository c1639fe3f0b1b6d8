//! Storage-level shape of the `clients` collection.
//!
//! # Design
//! The service validates drafts before they reach a store, and every store
//! checks records against `ClientSchema` again before writing. Both layers
//! agree on the bag range through `BAGS_MIN` / `BAGS_MAX`.
//!
//! The collection compares text with Spanish primary-strength collation:
//! case and accents are ignored, but `ñ` stays its own letter after `n`.

use std::cmp::Ordering;

use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::ClientRecord;

pub const BAGS_MIN: i64 = 1;
pub const BAGS_MAX: i64 = 5;

/// Constraint a record failed at the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("path `{0}` is required")]
    Required(&'static str),

    #[error("path `bags` ({0}) is less than minimum allowed value ({min})", min = BAGS_MIN)]
    BelowMinimum(i64),

    #[error("path `bags` ({0}) is more than maximum allowed value ({max})", max = BAGS_MAX)]
    AboveMaximum(i64),
}

/// Constraints of the `clients` collection.
pub struct ClientSchema;

impl ClientSchema {
    pub const COLLECTION: &'static str = "clients";

    pub const COLLATION: Collation = Collation::new("es", Strength::Primary);

    /// Check a record before it is written. Fields are checked in declaration
    /// order: name, bags, flightCode.
    pub fn check(record: &ClientRecord) -> Result<(), SchemaViolation> {
        if record.name.is_empty() {
            return Err(SchemaViolation::Required("name"));
        }
        if record.bags < BAGS_MIN {
            return Err(SchemaViolation::BelowMinimum(record.bags));
        }
        if record.bags > BAGS_MAX {
            return Err(SchemaViolation::AboveMaximum(record.bags));
        }
        if record.flight_code.is_empty() {
            return Err(SchemaViolation::Required("flightCode"));
        }
        Ok(())
    }
}

/// Comparison strength, as in ICU: each level adds one more kind of
/// difference that counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    /// Base letters only.
    Primary,
    /// Base letters, then accents.
    Secondary,
    /// Base letters, then accents, then case.
    Tertiary,
}

/// Locale-aware text comparison for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collation {
    pub locale: &'static str,
    pub strength: Strength,
}

/// Opaque sort key; keys order the same way their source strings collate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey(Vec<u32>);

impl Collation {
    pub const fn new(locale: &'static str, strength: Strength) -> Self {
        Self { locale, strength }
    }

    pub fn sort_key(&self, text: &str) -> CollationKey {
        let folded = fold(text);

        // Level separator is 0; every weight is >= 1.
        let mut key: Vec<u32> = folded.iter().map(|f| f.base).collect();
        if self.strength >= Strength::Secondary {
            key.push(0);
            key.extend(folded.iter().map(|f| f.accent.saturating_add(1)));
        }
        if self.strength >= Strength::Tertiary {
            key.push(0);
            key.extend(folded.iter().map(|f| u32::from(f.upper) + 1));
        }
        CollationKey(key)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    pub fn equals(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

struct Folded {
    base: u32,
    accent: u32,
    upper: bool,
}

const COMBINING_TILDE: char = '\u{303}';

/// Primary weight of a lowercase base letter. Weights are spaced by two so
/// `ñ` can sit between `n` and `o`.
fn primary_weight(base: char) -> u32 {
    if base == 'ñ' {
        return u32::from('n') * 2 + 2;
    }
    u32::from(base) * 2 + 1
}

/// Decompose `text` and fold each base letter with the marks that follow it.
/// Marks only add secondary weight, except a tilde on `n`, which makes `ñ`.
fn fold(text: &str) -> Vec<Folded> {
    let mut folded: Vec<Folded> = Vec::new();
    for c in text.nfd() {
        if is_combining_mark(c) {
            let Some(last) = folded.last_mut() else {
                continue;
            };
            if c == COMBINING_TILDE && last.base == primary_weight('n') && last.accent == 0 {
                last.base = primary_weight('ñ');
            } else {
                last.accent = last.accent.saturating_add(u32::from(c));
            }
            continue;
        }

        let upper = c.is_uppercase();
        folded.extend(c.to_lowercase().map(|lower| {
            let (base, accent) = strip_stroke(lower);
            Folded {
                base: primary_weight(base),
                accent,
                upper,
            }
        }));
    }
    folded
}

/// Letters with a stroke have no canonical decomposition; weigh the stroke
/// like an overlay mark on the base letter.
fn strip_stroke(c: char) -> (char, u32) {
    const STROKE: u32 = 0x338;
    match c {
        'ø' => ('o', STROKE),
        'đ' => ('d', STROKE),
        'ł' => ('l', STROKE),
        'ħ' => ('h', STROKE),
        'ŧ' => ('t', STROKE),
        _ => (c, 0),
    }
}
