//! MSISDN utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Optional leading '+', then 10 to 15 digits
static MSISDN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

/// Check if an MSISDN is well-formed
pub fn is_valid_msisdn(msisdn: &str) -> bool {
    MSISDN_REGEX.is_match(msisdn.trim())
}

/// Mask an MSISDN for logs (e.g., +4071****678)
pub fn mask_msisdn(msisdn: &str) -> String {
    let chars: Vec<char> = msisdn.chars().collect();
    if chars.len() >= 8 {
        let head: String = chars[..chars.len() - 7].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "*".repeat(chars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_msisdn() {
        assert!(is_valid_msisdn("+40712345678"));
        assert!(is_valid_msisdn("0712345678"));
        assert!(is_valid_msisdn("123456789012345"));
    }

    #[test]
    fn test_invalid_msisdn() {
        assert!(!is_valid_msisdn("12345"));
        assert!(!is_valid_msisdn("+40 712 345 678"));
        assert!(!is_valid_msisdn("++40712345678"));
        assert!(!is_valid_msisdn("1234567890123456"));
        assert!(!is_valid_msisdn(""));
    }

    #[test]
    fn test_mask_msisdn() {
        assert_eq!(mask_msisdn("+40712345678"), "+4071****678");
        assert_eq!(mask_msisdn("12345"), "*****");
    }
}
