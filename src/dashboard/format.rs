//! Number formatting for metric tiles and callouts

use crate::locale::Labels;

/// Group digits in threes: `8260` -> `"8,260"`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Grouped quantity with the locale's unit suffix: `"8,260개"`
pub fn units(value: u64, labels: &Labels) -> String {
    format!("{}{}", thousands(value), labels.unit_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(950), "950");
        assert_eq!(thousands(8260), "8,260");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_units_per_locale() {
        assert_eq!(units(8260, Locale::Ko.labels()), "8,260개");
        assert_eq!(units(688, Locale::En.labels()), "688 units");
    }
}
