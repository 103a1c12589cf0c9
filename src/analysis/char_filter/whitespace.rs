use super::CharFilter;

/// Collapses runs of whitespace to a single space and trims both ends.
#[derive(Clone, Debug, Default)]
pub struct CollapseWhitespaceCharFilter;

impl CollapseWhitespaceCharFilter {
    pub fn new() -> Self {
        CollapseWhitespaceCharFilter
    }
}

impl CharFilter for CollapseWhitespaceCharFilter {
    fn filter(&self, input: &str) -> String {
        input.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "collapse_whitespace"
    }
}
