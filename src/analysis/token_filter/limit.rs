//! Token count cap, used to bound keyword lists.

use super::Filter;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Passes through at most `max_tokens` tokens, in stream order.
#[derive(Clone, Debug)]
pub struct LimitFilter {
    max_tokens: usize,
}

impl LimitFilter {
    pub fn new(max_tokens: usize) -> Self {
        LimitFilter { max_tokens }
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }
}

impl Filter for LimitFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.take(self.max_tokens)))
    }

    fn name(&self) -> &'static str {
        "limit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn stream(words: &[&str]) -> TokenStream {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        Box::new(tokens.into_iter())
    }

    #[test]
    fn test_keeps_first_tokens_in_order() {
        let texts: Vec<String> = LimitFilter::new(2)
            .filter(stream(&["package", "arrived", "damaged", "again"]))
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["package", "arrived"]);
    }

    #[test]
    fn test_zero_limit_and_short_streams() {
        assert_eq!(LimitFilter::new(0).filter(stream(&["a", "b"])).unwrap().count(), 0);
        assert_eq!(LimitFilter::new(10).filter(stream(&["a", "b"])).unwrap().count(), 2);
    }
}
