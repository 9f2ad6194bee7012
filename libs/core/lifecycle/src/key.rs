/// Case folding applied to a natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    Lower,
    Upper,
}

/// Normalize a natural key: trim, replace each space with `_`, then fold case.
///
/// ```
/// use lifecycle::{KeyCase, normalize_key};
///
/// assert_eq!(normalize_key("  Engineering Team ", KeyCase::Lower), "engineering_team");
/// assert_eq!(normalize_key("super admin", KeyCase::Upper), "SUPER_ADMIN");
/// ```
pub fn normalize_key(raw: &str, case: KeyCase) -> String {
    let joined = raw.trim().replace(' ', "_");
    match case {
        KeyCase::Lower => joined.to_lowercase(),
        KeyCase::Upper => joined.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_spaces_are_not_collapsed() {
        assert_eq!(normalize_key("a  b", KeyCase::Lower), "a__b");
    }

    #[test]
    fn test_case_and_whitespace_variants_collide() {
        let a = normalize_key("Engineering Team", KeyCase::Lower);
        let b = normalize_key("  engineering team  ", KeyCase::Lower);
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_key_normalizes_to_empty() {
        assert!(normalize_key("   ", KeyCase::Upper).is_empty());
    }
}
