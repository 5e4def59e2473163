//! Phone number utilities

/// Number of trailing characters left visible by [`mask_phone_number`]
pub const VISIBLE_DIGITS: usize = 4;

/// Mask a phone number for display, keeping only the last 4 characters
///
/// Every other character (including a leading `+`) is replaced by `*`, so the
/// masked value has the same length as the input.
///
/// ```
/// use pv_shared::phone::mask_phone_number;
///
/// assert_eq!(mask_phone_number("+15551234567"), "********4567");
/// assert_eq!(mask_phone_number("123"), "123");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let total = phone.chars().count();
    if total <= VISIBLE_DIGITS {
        return phone.to_string();
    }

    phone
        .chars()
        .enumerate()
        .map(|(i, c)| if i < total - VISIBLE_DIGITS { '*' } else { c })
        .collect()
}

/// Check whether a phone number looks like E.164 (`+` followed by 8–15 digits)
pub fn is_e164(phone: &str) -> bool {
    match phone.strip_prefix('+') {
        Some(digits) => {
            (8..=15).contains(&digits.len())
                && !digits.starts_with('0')
                && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
