pub mod coinranking;
pub mod cron;

use once_cell::sync::Lazy;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex"));

/// en-US currency formatting: `$1,234.57`, `-$0.50`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let (int_part, frac_part) = round_decimal(&amount.abs().to_string(), 2);
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(&int_part), frac_part)
}

pub fn format_price(price: Option<f64>) -> String {
    price.map(format_usd).unwrap_or_else(|| "-".to_string())
}

/// Shows the change text untouched (`"2.10"` stays `2.10%`) as long as it is a number.
pub fn format_change(change: Option<&str>) -> String {
    match change.map(str::trim) {
        Some(text) if text.parse::<f64>().is_ok_and(f64::is_finite) => format!("{}%", text),
        _ => "-".to_string(),
    }
}

/// Keeps `#rgb` and `#rrggbb` colors, drops anything else.
pub fn sanitize_color(color: Option<&str>) -> Option<String> {
    color
        .map(str::trim)
        .filter(|c| HEX_COLOR.is_match(c))
        .map(|c| c.to_string())
}

pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// Rounds half away from zero on the shortest decimal representation, so
// 1.005 becomes 1.01 rather than whatever the binary value rounds to.
fn round_decimal(repr: &str, places: usize) -> (String, String) {
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr, ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(places)
        .is_some_and(|&d| d >= b'5');
    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - places;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let int_digits = render(&digits[..split]);
    let int_digits = if int_digits.is_empty() {
        "0".to_string()
    } else {
        int_digits
    };
    (int_digits, render(&digits[split..]))
}
