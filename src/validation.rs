pub fn validate_name(name: &str) -> bool {
    // Names are case-sensitive free text; the only rule is non-empty
    !name.trim().is_empty()
}

pub fn validate_number(phone: &str) -> bool {
    // Must contain only digits, at least one
    !phone.is_empty() && phone.chars().all(|c| c.is_ascii_digit())
}

pub fn validate_email(email: &str) -> bool {
    // Email can be empty
    // Or email must contain '@' char
    email.is_empty() || email.contains('@')
}

pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
