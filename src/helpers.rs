/// `true` if `haystack` contains any of `needles`. Callers lower-case the
/// haystack first where matching is case-insensitive.
pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
