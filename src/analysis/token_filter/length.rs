//! Minimum length filter implementation.

use super::Filter;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Drops tokens shorter than a minimum number of characters.
#[derive(Clone, Debug)]
pub struct MinLengthFilter {
    min_chars: usize,
}

impl MinLengthFilter {
    /// Create a filter keeping tokens with at least `min_chars` characters.
    pub fn new(min_chars: usize) -> Self {
        MinLengthFilter { min_chars }
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}

impl Filter for MinLengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min_chars = self.min_chars;
        Ok(Box::new(
            tokens.filter(move |token| token.char_len() >= min_chars),
        ))
    }

    fn name(&self) -> &'static str {
        "min_length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_min_length_filter() {
        let filter = MinLengthFilter::new(4);
        let tokens = vec![
            Token::new("my", 0),
            Token::new("bill", 1),
            Token::new("was", 2),
            Token::new("wrong", 3),
        ];

        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["bill", "wrong"]);
    }
}
