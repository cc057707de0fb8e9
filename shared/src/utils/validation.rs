//! Input validation utilities

/// Check if a string is not blank
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if an email address is plausible: a non-empty local part and domain
/// around a single '@', with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Check if a password meets the minimum length, counted in characters
pub fn is_valid_password(password: &str, min_length: usize) -> bool {
    password.chars().count() >= min_length
}

/// Check if a verification code is exactly six decimal digits
pub fn is_valid_verification_code(code: &str) -> bool {
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}

/// Check if an amount is a finite, strictly positive number
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Mask an email address for logs (e.g., j***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email(" user@example.org "));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b@c"));
    }

    #[test]
    fn test_password_length() {
        assert!(is_valid_password("password1", 8));
        assert!(is_valid_password("12345678", 8));
        assert!(!is_valid_password("short", 8));
    }

    #[test]
    fn test_verification_code_format() {
        assert!(is_valid_verification_code("123456"));
        assert!(!is_valid_verification_code("12345"));
        assert!(!is_valid_verification_code("12345a"));
        assert!(!is_valid_verification_code("1234567"));
    }

    #[test]
    fn test_amount() {
        assert!(is_valid_amount(9.99));
        assert!(!is_valid_amount(0.0));
        assert!(!is_valid_amount(-1.0));
        assert!(!is_valid_amount(f64::NAN));
        assert!(!is_valid_amount(f64::INFINITY));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("invalid"), "***");
    }

    #[test]
    fn test_not_empty() {
        assert!(not_empty("x"));
        assert!(!not_empty("   "));
    }
}
