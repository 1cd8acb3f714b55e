//! Live input formatting and cosmetic validation.
//!
//! Both helpers are pure so any host can call them from its input and blur
//! events. Neither blocks a submission.

/// Visual state of a validated field after it loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Normal,
    Flagged,
}

/// Mask a CPF as `000.000.000-00`, tolerating partial input.
///
/// Only ASCII digits are kept. Dots follow the 3rd and 6th digits once more
/// digits exist; the dash goes before the last one or two digits once at least
/// four digits follow the second dot. The output depends only on the digits,
/// so the mask is idempotent.
pub fn format_cpf(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + 3);
    out.push_str(&digits[..3]);
    out.push('.');
    if digits.len() < 7 {
        out.push_str(&digits[3..]);
        return out;
    }

    out.push_str(&digits[3..6]);
    out.push('.');
    let tail = &digits[6..];
    if tail.len() < 4 {
        out.push_str(tail);
        return out;
    }

    let check = if tail.len() == 4 { 1 } else { 2 };
    let (body, verifier) = tail.split_at(tail.len() - check);
    out.push_str(body);
    out.push('-');
    out.push_str(verifier);
    out
}

/// Whitespace as matched by `\s` in browser form patterns.
///
/// Not `char::is_whitespace`: U+FEFF counts here and U+0085 does not.
fn is_pattern_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Permissive email shape check: `local@domain.tld`, no whitespace, one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_pattern_space) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// State applied to an email field on blur. Empty fields are never flagged.
pub fn email_field_state(value: &str) -> FieldState {
    if !value.is_empty() && !is_valid_email(value) {
        FieldState::Flagged
    } else {
        FieldState::Normal
    }
}
