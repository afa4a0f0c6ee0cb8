use rayon::prelude::*;

use crate::error::Result;

/// Compile a rule pattern, optionally wrapped in a case-insensitive group.
pub(crate) fn compile_regex(pattern: &str, ignore_case: bool) -> Result<fancy_regex::Regex> {
    let full = if ignore_case {
        format!("(?i)(?:{})", pattern)
    } else {
        pattern.to_owned()
    };
    Ok(fancy_regex::Regex::new(&full)?)
}

/// fancy_regex reports backtrack-limit failures as errors; treat those as "no match".
fn is_match(re: &fancy_regex::Regex, ua: &str) -> bool {
    re.is_match(ua).unwrap_or(false)
}

// ---------------------------------------------------------------------------
// RuleSet — ordered (predicate, result) list, first match wins
// ---------------------------------------------------------------------------

/// Source form of one rule's predicate.
pub(crate) struct RulePattern {
    pub regex: String,
    pub exclude: Option<String>,
    pub ignore_case: bool,
}

/// A compiled rule: the UA must match `include` and must not match `exclude`.
pub(crate) struct CompiledRule<T> {
    include: fancy_regex::Regex,
    exclude: Option<fancy_regex::Regex>,
    pub data: T,
}

impl<T> CompiledRule<T> {
    pub fn matches(&self, ua: &str) -> bool {
        is_match(&self.include, ua) && !self.exclude.as_ref().is_some_and(|re| is_match(re, ua))
    }
}

/// Precedence cascade: rules are tried in source order and the first one whose
/// predicate holds decides the result. Later rules therefore only need to
/// exclude the vendors of the rules above them when their tokens overlap.
pub(crate) struct RuleSet<T> {
    rules: Vec<CompiledRule<T>>,
}

impl<T> RuleSet<T> {
    /// Build a RuleSet from an iterator of (pattern, data) pairs, compiling the
    /// patterns in parallel. Source order is preserved.
    pub fn build(items: impl IntoIterator<Item = (RulePattern, T)>) -> Result<Self>
    where
        T: Send,
    {
        let items: Vec<(RulePattern, T)> = items.into_iter().collect();

        let rules = items
            .into_par_iter()
            .map(|(pattern, data)| -> Result<_> {
                let include = compile_regex(&pattern.regex, pattern.ignore_case)?;
                let exclude = pattern
                    .exclude
                    .as_deref()
                    .map(|ex| compile_regex(ex, pattern.ignore_case))
                    .transpose()?;
                Ok(CompiledRule {
                    include,
                    exclude,
                    data,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(rules = rules.len(), "compiled rule set");

        Ok(Self { rules })
    }

    /// Data of the first rule matching `ua`, if any.
    pub fn match_first(&self, ua: &str) -> Option<&T> {
        self.rules
            .iter()
            .find(|rule| rule.matches(ua))
            .map(|rule| &rule.data)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
