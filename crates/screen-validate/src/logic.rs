//! Three-valued predicate helpers.
//!
//! A verdict is `Some(true)` (the row fails), `Some(false)` (the row passes) or
//! `None` (unknown, because an input was null). Unknown never fails a row.

use std::cmp::Ordering;

pub type Verdict = Option<bool>;

pub fn and(a: Verdict, b: Verdict) -> Verdict {
    match (a, b) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}

pub fn or(a: Verdict, b: Verdict) -> Verdict {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}

pub fn not(a: Verdict) -> Verdict {
    a.map(|v| !v)
}

/// `a != b`, unknown when either side is null.
pub fn ne<T: PartialEq>(a: Option<T>, b: Option<T>) -> Verdict {
    Some(a? != b?)
}

/// `a < b`, unknown when either side is null.
pub fn lt<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Verdict {
    Some(a?.partial_cmp(&b?)? == Ordering::Less)
}

/// Only a definite `true` marks a row as failing.
pub fn fails(verdict: Verdict) -> bool {
    verdict == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kleene_tables() {
        assert_eq!(and(None, Some(false)), Some(false));
        assert_eq!(and(None, Some(true)), None);
        assert_eq!(or(None, Some(true)), Some(true));
        assert_eq!(or(None, Some(false)), None);
        assert_eq!(not(None), None);
    }

    #[test]
    fn comparisons_with_nulls_are_unknown() {
        assert_eq!(ne(Some(1), None), None);
        assert_eq!(ne(Some(1), Some(2)), Some(true));
        assert_eq!(lt(Some(1), Some(2)), Some(true));
        assert_eq!(lt::<i32>(None, Some(2)), None);
        assert!(!fails(None));
    }
}
