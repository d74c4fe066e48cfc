//! # Amount Module
//!
//! Finite-amount arithmetic for receipt lines and totals.
//!
//! ## The Partial Data Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Event lines are free-form: quantity and value are optional floats,     │
//! │  entered by hand or denormalized from the catalog.                      │
//! │                                                                         │
//! │    line amount = quantity × value     (only when BOTH are finite)       │
//! │                                                                         │
//! │  A line missing either side has NO amount. It is rendered as a          │
//! │  placeholder and excluded from the grand total - it is never            │
//! │  treated as zero, because a partial dataset must not silently           │
//! │  report a misleadingly low total.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use anbargar_core::amount::Amount;
//!
//! // Computable line: 5 × 10 = 50
//! let amount = Amount::line_amount(Some(5.0), Some(10.0));
//! assert_eq!(amount.map(|a| a.get()), Some(50.0));
//!
//! // Missing value: no amount, not zero
//! assert!(Amount::line_amount(Some(3.0), None).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use ts_rs::TS;

// =============================================================================
// Amount Type
// =============================================================================

/// A finite monetary amount.
///
/// Upstream stores item values as floats, so amounts are `f64` - but an
/// `Amount` is only ever constructed from finite inputs, so arithmetic
/// on it cannot smuggle a NaN into a receipt. "No amount" is expressed
/// as `Option<Amount>`, never as a sentinel number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Wraps a finite value; `None` for NaN or infinities.
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Amount(value))
    }

    /// Computes a line amount: quantity × value when both are present
    /// and finite, otherwise `None` ("not computable").
    pub fn line_amount(quantity: Option<f64>, value: Option<f64>) -> Option<Self> {
        match (quantity, value) {
            (Some(qty), Some(val)) if qty.is_finite() && val.is_finite() => {
                Amount::new(qty * val)
            }
            _ => None,
        }
    }

    /// Returns the raw value.
    #[inline]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Zero amount, the fold seed for totals.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0.0)
    }
}

impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

/// Display formatting groups thousands: `1234567.5` → `"1,234,567.5"`.
///
/// For debugging and the HTML renderer. Locale-aware digit shaping is a
/// presentation concern left to the frontend.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_grouped(self.0))
    }
}

// =============================================================================
// Number Formatting
// =============================================================================

/// Formats a finite number with thousands grouping and up to three
/// fraction digits, trailing zeros trimmed.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let negative = value < 0.0;
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed
        .split_once('.')
        .unwrap_or((fixed.as_str(), ""));

    // Group integer digits in threes from the right.
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let mut out = String::new();
    if negative && (grouped.chars().any(|c| c != '0') || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(Amount::new(f64::NAN).is_none());
        assert!(Amount::new(f64::INFINITY).is_none());
        assert!(Amount::new(12.5).is_some());
    }

    #[test]
    fn test_line_amount_requires_both_sides() {
        assert_eq!(
            Amount::line_amount(Some(5.0), Some(10.0)).map(|a| a.get()),
            Some(50.0)
        );
        assert!(Amount::line_amount(Some(3.0), None).is_none());
        assert!(Amount::line_amount(None, Some(10.0)).is_none());
        assert!(Amount::line_amount(Some(f64::NAN), Some(10.0)).is_none());
    }

    #[test]
    fn test_addition() {
        let total = Amount::zero() + Amount::new(50.0).unwrap() + Amount::new(36.0).unwrap();
        assert_eq!(total.get(), 86.0);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(50.0), "50");
        assert_eq!(format_grouped(1234.5), "1,234.5");
        assert_eq!(format_grouped(1_000_000.0), "1,000,000");
        assert_eq!(format_grouped(-1234.0), "-1,234");
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(0.125), "0.125");
    }

    #[test]
    fn test_display_uses_grouping() {
        assert_eq!(Amount::new(12345.0).unwrap().to_string(), "12,345");
    }
}
