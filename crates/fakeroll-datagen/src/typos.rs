//! Character-level typo injection.
//!
//! All decisions come from the record's error stream in a fixed order:
//! one draw for the fractional error, then per error the field, the kind,
//! the position and, for insertions, the character.

use crate::fields::RecordFields;
use crate::rng::KeyedRng;
use std::fmt;

/// Expected number of typos per record, within `0.0..=ErrorRate::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ErrorRate(f64);

impl ErrorRate {
    pub const ZERO: ErrorRate = ErrorRate(0.0);

    /// Highest rate any record can be generated with. Request limits may
    /// only lower it.
    pub const MAX: ErrorRate = ErrorRate(1000.0);

    /// Returns `None` for negative, NaN or infinite values and for values
    /// above [`ErrorRate::MAX`].
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..=Self::MAX.0).contains(&value)).then_some(Self(value))
    }

    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for ErrorRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The mutable text fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Address,
    Phone,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Address, Field::Phone];

    fn slot(self, fields: &mut RecordFields) -> &mut String {
        match self {
            Field::Name => &mut fields.name,
            Field::Address => &mut fields.address,
            Field::Phone => &mut fields.phone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypoKind {
    Delete,
    Insert,
    Swap,
}

impl TypoKind {
    pub const ALL: [TypoKind; 3] = [TypoKind::Delete, TypoKind::Insert, TypoKind::Swap];
}

/// One applied edit. `changed` is false when the draw was absorbed, e.g. a
/// delete on empty text or a swap at the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typo {
    pub kind: TypoKind,
    pub position: usize,
    pub inserted: Option<char>,
    pub changed: bool,
}

/// A typo together with the field it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTypo {
    pub field: Field,
    pub typo: Typo,
}

/// Resolve the whole number of typos for one record.
///
/// `floor(rate)` typos always happen; one more happens when the fractional
/// part beats a single uniform draw. The draw is taken even for whole rates.
pub fn resolve_error_count(rate: ErrorRate, rng: &mut KeyedRng) -> usize {
    let base = rate.value().floor();
    let fractional = rate.value() - base;
    let draw = rng.next_float();
    base as usize + usize::from(fractional > draw)
}

/// Apply one random single-character edit to `text`.
///
/// Positions count `char`s, so multi-byte letters are never split. The
/// result is at most one character longer or shorter than the input.
pub fn introduce_error(text: &str, rng: &mut KeyedRng, alphabet: &str) -> (String, Typo) {
    let mut chars: Vec<char> = text.chars().collect();
    let kind = TypoKind::ALL[rng.pick(TypoKind::ALL.len())];
    let position = rng.pick(chars.len());

    let mut inserted = None;
    let changed = match kind {
        TypoKind::Delete => {
            if position < chars.len() {
                chars.remove(position);
                true
            } else {
                false
            }
        }
        TypoKind::Insert => {
            let letters: Vec<char> = alphabet.chars().collect();
            match letters.get(rng.pick(letters.len())) {
                Some(&ch) => {
                    chars.insert(position, ch);
                    inserted = Some(ch);
                    true
                }
                None => false,
            }
        }
        TypoKind::Swap => {
            if position + 1 < chars.len() {
                chars.swap(position, position + 1);
                true
            } else {
                false
            }
        }
    };

    let typo = Typo {
        kind,
        position,
        inserted,
        changed,
    };
    (chars.into_iter().collect(), typo)
}

/// Inject `rate` typos into `fields`, in draw order.
///
/// A field hit twice is edited again on top of its previous edit.
pub fn inject_errors(
    fields: &mut RecordFields,
    rate: ErrorRate,
    rng: &mut KeyedRng,
    alphabet: &str,
) -> Vec<AppliedTypo> {
    let total = resolve_error_count(rate, rng);
    let mut applied = Vec::new();

    for _ in 0..total {
        let field = Field::ALL[rng.pick(Field::ALL.len())];
        let slot = field.slot(fields);
        let (mutated, typo) = introduce_error(slot, rng, alphabet);
        *slot = mutated;
        applied.push(AppliedTypo { field, typo });
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RecordKey, ERROR_STREAM};
    use proptest::prelude::*;

    const LATIN: &str = "abcdefghijklmnopqrstuvwxyz";
    const SPANISH: &str = "abcdefghijklmnopqrstuvwxyzñáéíóúü";

    fn rng(seed: &str, index: u64) -> KeyedRng {
        KeyedRng::new(&RecordKey::new(seed, index), ERROR_STREAM)
    }

    fn sample_fields() -> RecordFields {
        RecordFields {
            identifier: "00000000-0000-4000-8000-000000000000".to_string(),
            name: "Ana Elena García".to_string(),
            address: "Calle Hidalgo 12 Puebla Puebla".to_string(),
            phone: "+52-555-123-4567".to_string(),
        }
    }

    #[test]
    fn test_error_rate_validation() {
        assert!(ErrorRate::new(0.0).is_some());
        assert!(ErrorRate::new(2.5).is_some());
        assert!(ErrorRate::new(-0.1).is_none());
        assert!(ErrorRate::new(f64::NAN).is_none());
        assert!(ErrorRate::new(f64::INFINITY).is_none());
        assert!(ErrorRate::new(1000.0).is_some());
        assert!(ErrorRate::new(1000.5).is_none());
        assert!(ErrorRate::new(1e18).is_none());
    }

    #[test]
    fn test_max_rate_injects_every_typo() {
        let mut fields = sample_fields();
        let typos = inject_errors(&mut fields, ErrorRate::MAX, &mut rng("max", 1), LATIN);
        assert_eq!(typos.len(), 1000);
        assert_eq!(fields.identifier, sample_fields().identifier);
    }

    #[test]
    fn test_zero_rate_yields_no_typos() {
        for index in 0..500 {
            let mut rng = rng("zero", index);
            assert_eq!(resolve_error_count(ErrorRate::ZERO, &mut rng), 0);
        }
    }

    #[test]
    fn test_whole_rate_is_exact() {
        let rate = ErrorRate::new(3.0).unwrap();
        for index in 0..500 {
            let mut rng = rng("whole", index);
            assert_eq!(resolve_error_count(rate, &mut rng), 3);
        }
    }

    #[test]
    fn test_fractional_rate_distribution() {
        let rate = ErrorRate::new(2.3).unwrap();
        let mut threes = 0;
        let samples = 10_000;

        for index in 0..samples {
            let seed = format!("dist-{}", index % 17);
            let mut rng = rng(&seed, index);
            let count = resolve_error_count(rate, &mut rng);
            assert!(count == 2 || count == 3, "count {count}");
            if count == 3 {
                threes += 1;
            }
        }

        let share = threes as f64 / samples as f64;
        assert!((share - 0.3).abs() < 0.03, "share of 3 was {share}");
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        // Any draw on an empty string either inserts one char or does nothing.
        for index in 0..200 {
            let mut rng = rng("empty", index);
            let (out, typo) = introduce_error("", &mut rng, LATIN);
            match typo.kind {
                TypoKind::Insert => assert_eq!(out.chars().count(), 1),
                TypoKind::Delete | TypoKind::Swap => {
                    assert_eq!(out, "");
                    assert!(!typo.changed);
                }
            }
        }
    }

    #[test]
    fn test_swap_at_last_char_is_noop() {
        for index in 0..500 {
            let mut rng = rng("swap", index);
            let (out, typo) = introduce_error("x", &mut rng, LATIN);
            if typo.kind == TypoKind::Swap {
                assert_eq!(out, "x");
                assert!(!typo.changed);
            }
        }
    }

    #[test]
    fn test_insert_uses_region_alphabet() {
        for index in 0..500 {
            let mut rng = rng("insert", index);
            let (out, typo) = introduce_error("abc", &mut rng, SPANISH);
            if let Some(ch) = typo.inserted {
                assert!(SPANISH.contains(ch));
                assert_eq!(out.chars().nth(typo.position), Some(ch));
            }
        }
    }

    #[test]
    fn test_multibyte_text_is_not_split() {
        for index in 0..500 {
            let mut rng = rng("utf8", index);
            let (out, _) = introduce_error("ñáéíóú", &mut rng, SPANISH);
            assert!(out.chars().all(|c| SPANISH.contains(c)));
        }
    }

    #[test]
    fn test_injection_is_deterministic() {
        let rate = ErrorRate::new(4.7).unwrap();
        let mut a = sample_fields();
        let mut b = sample_fields();

        let typos_a = inject_errors(&mut a, rate, &mut rng("same", 9), SPANISH);
        let typos_b = inject_errors(&mut b, rate, &mut rng("same", 9), SPANISH);

        assert_eq!(a, b);
        assert_eq!(typos_a, typos_b);
    }

    #[test]
    fn test_injection_count_matches_rate() {
        let rate = ErrorRate::new(5.0).unwrap();
        let mut fields = sample_fields();
        let typos = inject_errors(&mut fields, rate, &mut rng("count", 1), LATIN);
        assert_eq!(typos.len(), 5);
    }

    #[test]
    fn test_identifier_never_mutated() {
        let rate = ErrorRate::new(20.0).unwrap();
        for index in 0..50 {
            let mut fields = sample_fields();
            inject_errors(&mut fields, rate, &mut rng("id", index), LATIN);
            assert_eq!(fields.identifier, sample_fields().identifier);
        }
    }

    #[test]
    fn test_errors_compound_on_same_field() {
        // Replaying the draws by hand must reproduce the injected result.
        let rate = ErrorRate::new(6.0).unwrap();
        let mut injected = sample_fields();
        inject_errors(&mut injected, rate, &mut rng("replay", 3), LATIN);

        let mut replay = sample_fields();
        let mut rng = rng("replay", 3);
        let total = resolve_error_count(rate, &mut rng);
        for _ in 0..total {
            let field = Field::ALL[rng.pick(3)];
            let slot = field.slot(&mut replay);
            *slot = introduce_error(slot, &mut rng, LATIN).0;
        }

        assert_eq!(injected, replay);
    }

    proptest! {
        #[test]
        fn prop_length_changes_by_at_most_one(text in "\\PC{0,40}", index in 0u64..10_000) {
            let mut rng = rng("prop", index);
            let before = text.chars().count();
            let (out, typo) = introduce_error(&text, &mut rng, SPANISH);
            let after = out.chars().count();

            prop_assert!(after + 1 >= before && after <= before + 1);
            match typo.kind {
                TypoKind::Delete if typo.changed => prop_assert_eq!(after, before - 1),
                TypoKind::Insert => prop_assert_eq!(after, before + 1),
                _ => prop_assert_eq!(after, before),
            }
        }
    }
}
