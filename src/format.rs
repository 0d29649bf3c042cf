//! Display formatting for metric values: `$#,##0.00`, `0.00%` and signed deltas.

/// `1234.5` → `"$1,234.50"`, `-30.0` → `"$-30.00"`.
pub fn currency(value: f64) -> String {
    format!("${}", grouped(value, 2))
}

/// Percent value (already scaled by 100): `20.0` → `"20.00%"`.
pub fn percent(value: f64) -> String {
    format!("{}%", grouped(value, 2))
}

/// Always carries a sign: `15.0` → `"+15.00%"`, `-2.5` → `"-2.50%"`.
pub fn signed_percent(delta: f64) -> String {
    let body = grouped(delta, 2);
    if body.starts_with('-') {
        format!("{body}%")
    } else {
        format!("+{body}%")
    }
}

/// Plain sales figure with thousands separators, for tables.
pub fn amount(value: f64) -> String {
    grouped(value, 2)
}

/// Fixed decimals with `,` between thousands. Values that round to zero never
/// print as `-0.00`.
fn grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
