//! Conversion between the base unit and the selected display currency.
//!
//! Stored amounts are always in the base unit. [`to_display`] is applied only
//! when reading for presentation and [`to_base`] only when accepting input.

use dash_domain::Currency;

use crate::CoreError;

const DISPLAY_PRECISION: usize = 2;
const DECIMAL_SEPARATOR: char = '.';
const GROUPING_SEPARATOR: char = ',';

pub fn to_display(base_amount: f64, currency: Currency) -> f64 {
    base_amount * currency.rate()
}

pub fn to_base(display_amount: f64, currency: Currency) -> f64 {
    display_amount / currency.rate()
}

/// [`to_base`] for user input: fails when the base amount is not a finite number.
pub fn to_base_checked(display_amount: f64, currency: Currency) -> Result<f64, CoreError> {
    let base = to_base(display_amount, currency);
    if base.is_finite() {
        Ok(base)
    } else {
        Err(CoreError::Validation(format!(
            "{display_amount} {} is too large to store.",
            currency.code()
        )))
    }
}

/// Converts a base amount and renders it as an en-US currency string, e.g. `$1,234.50`.
pub fn format_currency(base_amount: f64, currency: Currency) -> String {
    format_display(to_display(base_amount, currency), currency)
}

/// Renders an amount that is already in `currency`.
pub fn format_display(display_amount: f64, currency: Currency) -> String {
    let body = format_number(display_amount.abs());
    if display_amount < 0.0 {
        format!("-{}{}", currency.symbol(), body)
    } else {
        format!("{}{}", currency.symbol(), body)
    }
}

/// Fixed two-decimal rendering without symbol or grouping, as used in CSV rows.
pub fn plain_amount(display_amount: f64) -> String {
    format!("{:.*}", DISPLAY_PRECISION, display_amount)
}

fn format_number(value: f64) -> String {
    let body = format!("{:.*}", DISPLAY_PRECISION, value);
    match body.find(DECIMAL_SEPARATOR) {
        Some(pos) => format!("{}{}", group_digits(&body[..pos]), &body[pos..]),
        None => group_digits(&body),
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUPING_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}
