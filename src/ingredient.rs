/// Canonical comparison key for an ingredient name: trimmed and lower-cased.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// True when both names denote the same ingredient.
pub fn same_ingredient(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Turmeric Powder "), "turmeric powder");
        assert_eq!(normalize("RICE"), "rice");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_same_ingredient_ignores_case_and_padding() {
        assert!(same_ingredient("Onion", " onion"));
        assert!(!same_ingredient("onion", "onions"));
    }
}
