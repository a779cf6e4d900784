//! Formatting helpers shared by every fragment builder.
//!
//! Anything a caller hands us as free text must go through [`escape_html`] or
//! [`to_html_lines`] before it is spliced into markup. Amounts go through
//! [`format_currency`].

/// Format an amount with en-NZ digit grouping and exactly two decimals.
///
/// `2500.0` → `"2,500.00"`, `-1150.0` → `"-1,150.00"`. Grouping is fixed
/// regardless of the document currency.
///
/// Rounding works on the shortest decimal form of the amount, half away from
/// zero, so `1.005` prints as `1.01` the way the web client shows it.
///
/// Non-finite input is not meaningful here; it renders as Rust's own
/// representation (`NaN`, `inf`) rather than panicking.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{amount}");
    }

    let cents = round_to_cents(amount.abs());
    let (whole, fraction) = cents.split_at(cents.len() - 2);
    let negative = amount.is_sign_negative() && cents.bytes().any(|b| b != b'0');

    let mut out = String::with_capacity(cents.len() + cents.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    out.push('.');
    out.push_str(fraction);
    out
}

/// Digits of `amount` (non-negative, finite) in whole cents, at least three
/// long: `1.005` → `"101"`, `0.5` → `"050"`.
fn round_to_cents(amount: f64) -> String {
    // `Display` for f64 is the shortest round-trip form and never uses an
    // exponent.
    let text = amount.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut frac = fraction.bytes();
    let cents_digits = [frac.next().unwrap_or(b'0'), frac.next().unwrap_or(b'0')];
    let round_up = frac.next().is_some_and(|d| d >= b'5');

    let mut digits: Vec<u8> = whole.bytes().chain(cents_digits).collect();
    if round_up {
        increment(&mut digits);
    }
    while digits.len() < 3 {
        digits.insert(0, b'0');
    }
    // Drop redundant leading zeros, keeping `0.xx`.
    let leading = digits
        .iter()
        .take(digits.len() - 3)
        .take_while(|&&d| d == b'0')
        .count();
    String::from_utf8_lossy(&digits[leading..]).into_owned()
}

/// Add one to a string of ASCII decimal digits.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Escape `&`, `<`, `>` and `"` so the text can sit inside element content
/// or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape, then turn line breaks into `<br>` (used for postal addresses).
pub fn to_html_lines(text: &str) -> String {
    escape_html(text)
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

/// Lower-case, hyphenated form of a free-text value, safe for a class name.
pub(crate) fn class_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
