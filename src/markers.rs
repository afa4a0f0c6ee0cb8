use aho_corasick::AhoCorasick;

use crate::error::Result;

/// Literal-token matcher over several entries, each owning one or more
/// markers. Built on a single Aho-Corasick automaton so the UA is scanned once
/// however many markers there are.
pub(crate) struct MarkerSet<T> {
    automaton: AhoCorasick,
    /// Maps automaton pattern index → entry index.
    pattern_to_entry: Vec<usize>,
    data: Vec<T>,
}

impl<T> MarkerSet<T> {
    /// Build from `(markers, data)` pairs. Entry order is the precedence order
    /// used by [`MarkerSet::first`]. Empty markers are ignored.
    pub fn build(
        items: impl IntoIterator<Item = (Vec<String>, T)>,
        ascii_case_insensitive: bool,
    ) -> Result<Self> {
        let mut patterns: Vec<String> = Vec::new();
        let mut pattern_to_entry: Vec<usize> = Vec::new();
        let mut data: Vec<T> = Vec::new();

        for (entry_idx, (markers, d)) in items.into_iter().enumerate() {
            for marker in markers.into_iter().filter(|m| !m.is_empty()) {
                patterns.push(marker);
                pattern_to_entry.push(entry_idx);
            }
            data.push(d);
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(ascii_case_insensitive)
            .build(&patterns)?;

        Ok(Self {
            automaton,
            pattern_to_entry,
            data,
        })
    }

    pub fn is_match(&self, ua: &str) -> bool {
        self.automaton.is_match(ua)
    }

    /// The highest-precedence entry with a marker anywhere in `ua`, regardless
    /// of where in the string the markers occur.
    pub fn first(&self, ua: &str) -> Option<&T> {
        self.automaton
            .find_overlapping_iter(ua)
            .map(|m| self.pattern_to_entry[m.pattern().as_usize()])
            .min()
            .map(|idx| &self.data[idx])
    }

    /// Every entry with at least one marker in `ua`, in precedence order.
    pub fn all<'a>(&'a self, ua: &str) -> impl Iterator<Item = &'a T> + 'a {
        let mut hit = vec![false; self.data.len()];
        for m in self.automaton.find_overlapping_iter(ua) {
            hit[self.pattern_to_entry[m.pattern().as_usize()]] = true;
        }
        self.data
            .iter()
            .zip(hit)
            .filter_map(|(d, hit)| hit.then_some(d))
    }
}
