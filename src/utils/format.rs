//! Display formatting for figures and slider marks
//!
//! en-US grouping only. Rounding is half away from zero and trailing
//! fractional zeros are dropped.

use crate::types::{Mark, SliderFormat, SliderSpec};

/// Group an amount with thousands separators, keeping at most `max_fraction_digits`
pub fn format_number(amount: f64, max_fraction_digits: u8) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let digits = usize::from(max_fraction_digits.min(20));
    let factor = 10f64.powi(digits as i32);
    let rounded = (amount.abs() * factor).round() / factor;
    let negative = amount.is_sign_negative() && rounded != 0.0;

    let fixed = format!("{:.*}", digits, rounded);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Prefix + grouped amount, as shown on the summary card
pub fn format_currency(amount: f64, prefix: &str, max_fraction_digits: u8) -> String {
    format!("{}{}", prefix, format_number(amount, max_fraction_digits))
}

/// Symbol used for a currency code
pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "ILS" => "₪".to_string(),
        other => format!("{} ", other),
    }
}

/// Render one scale mark according to the slider's format
pub fn format_mark(slider: &SliderSpec, mark: &Mark) -> String {
    let value = match mark {
        Mark::Label(label) => return label.clone(),
        Mark::Number(value) => *value,
    };

    match &slider.format {
        SliderFormat::Currency {
            currency_code,
            max_fraction_digits,
        } => {
            let body = format_number(value.abs(), *max_fraction_digits);
            let sign = if value < 0.0 && body != "0" { "-" } else { "" };
            format!("{}{}{}", sign, currency_symbol(currency_code), body)
        }
        SliderFormat::Number { thousands: true } => format_number(value, 3),
        SliderFormat::Number { thousands: false } => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
        assert_eq!(format_number(100800.0, 0), "100,800");
        assert_eq!(format_number(1234567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_rounding() {
        assert_eq!(format_number(82920.5, 0), "82,921");
        assert_eq!(format_number(2.50, 2), "2.5");
        assert_eq!(format_number(1234.5678, 2), "1,234.57");
        assert_eq!(format_number(-1500.0, 0), "-1,500");
        assert_eq!(format_number(-0.2, 0), "0");
        assert_eq!(format_number(f64::NAN, 0), "0");
    }

    #[test]
    fn test_format_currency_prefix() {
        assert_eq!(format_currency(17880.0, "$", 0), "$17,880");
        assert_eq!(format_currency(0.0, "€", 0), "€0");
    }

    #[test]
    fn test_format_mark_by_format() {
        let currency = SliderSpec::new("endpointRate", 1.0, 20.0, 1.0, 7.0).with_format(
            SliderFormat::Currency {
                currency_code: "USD".to_string(),
                max_fraction_digits: 0,
            },
        );
        assert_eq!(format_mark(&currency, &Mark::Number(20.0)), "$20");

        let grouped = SliderSpec::new("endpoints", 0.0, 2500.0, 100.0, 1200.0)
            .with_format(SliderFormat::Number { thousands: true });
        assert_eq!(format_mark(&grouped, &Mark::Number(2500.0)), "2,500");

        let plain = SliderSpec::new("technicians", 0.0, 20.0, 1.0, 10.0);
        assert_eq!(format_mark(&plain, &Mark::Number(2500.0)), "2500");
        assert_eq!(format_mark(&plain, &Mark::Label("20+".to_string())), "20+");
    }

    #[test]
    fn test_currency_symbol_unknown_code() {
        assert_eq!(currency_symbol("chf"), "CHF ");
    }
}
