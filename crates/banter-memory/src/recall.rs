// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome of a memory operation that never fails outright.

/// A value read from (or an acknowledgement written to) memory.
///
/// Memory operations do not return errors to the caller. When a backing store
/// fails or times out the operation yields a fallback value marked `Degraded`,
/// so callers can tell "nothing stored" apart from "store unavailable".
#[derive(Debug, Clone, PartialEq)]
pub enum Recall<T> {
    /// The store answered.
    Fresh(T),
    /// The store failed; `value` is the fallback.
    Degraded { value: T, reason: String },
}

impl<T> Recall<T> {
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Recall::Degraded {
            value,
            reason: reason.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Recall::Degraded { .. })
    }

    /// Why the operation degraded, if it did.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Recall::Fresh(_) => None,
            Recall::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Recall::Fresh(value) | Recall::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Recall::Fresh(value) | Recall::Degraded { value, .. } => value,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Recall<U> {
        match self {
            Recall::Fresh(value) => Recall::Fresh(f(value)),
            Recall::Degraded { value, reason } => Recall::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}
