use crate::Token;

/// Marker that sentencepiece prepends to pieces that start a word.
pub const SENTENCEPIECE_MARKER: char = '\u{2581}';

/// Align subword pieces with the word that they were split from.
///
/// Subword models return pieces without offsets. The aligner removes
/// the word boundary marker from the pieces and then assigns each
/// piece consecutive character offsets, starting at the offset of the
/// word in the original text.
///
/// The alignment assumes that the cleaned pieces concatenate to the
/// text of the word. If the model normalizes characters (e.g. changes
/// case), the offsets of later pieces will drift. This is not checked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubwordAligner {
    marker: char,
}

impl SubwordAligner {
    /// Construct an aligner that strips the given boundary marker.
    pub fn new(marker: char) -> Self {
        SubwordAligner { marker }
    }

    /// Remove the boundary marker from pieces and drop empty pieces.
    pub fn clean<I, S>(&self, pieces: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        pieces
            .into_iter()
            .map(|piece| piece.as_ref().replace(self.marker, ""))
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    /// Assign offsets to cleaned pieces of `word`.
    pub fn align<S>(&self, word: &Token, pieces: &[S]) -> Vec<Token>
    where
        S: AsRef<str>,
    {
        let mut cursor = word.start();
        pieces
            .iter()
            .map(|piece| {
                let token = Token::new(piece.as_ref(), cursor);
                cursor = token.end();
                token
            })
            .collect()
    }

    /// Clean the raw pieces of `word` and align them.
    ///
    /// The result is empty when every piece consists of markers only.
    pub fn split<S>(&self, word: &Token, raw_pieces: &[S]) -> Vec<Token>
    where
        S: AsRef<str>,
    {
        self.align(word, &self.clean(raw_pieces))
    }
}

impl Default for SubwordAligner {
    fn default() -> Self {
        SubwordAligner::new(SENTENCEPIECE_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::SubwordAligner;
    use crate::Token;

    fn check_contiguous(word: &Token, sub_tokens: &[Token]) {
        assert_eq!(sub_tokens.first().unwrap().start(), word.start());
        assert_eq!(sub_tokens.last().unwrap().end(), word.end());
        for pair in sub_tokens.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }

        let text = sub_tokens.iter().map(Token::text).collect::<String>();
        assert_eq!(text, word.text());
    }

    #[test]
    fn splits_contraction() {
        let aligner = SubwordAligner::default();
        let word = Token::new("don't", 0);
        let sub_tokens = aligner.split(&word, &["▁don", "'", "t"]);

        assert_eq!(
            sub_tokens,
            vec![Token::new("don", 0), Token::new("'", 3), Token::new("t", 4)]
        );
        assert_eq!(sub_tokens[0].end(), 3);
        assert_eq!(sub_tokens[2].end(), 5);
        check_contiguous(&word, &sub_tokens);
    }

    #[test]
    fn single_piece_keeps_word_offsets() {
        let aligner = SubwordAligner::default();
        let word = Token::new("hello", 6);
        let sub_tokens = aligner.split(&word, &["▁hello"]);

        assert_eq!(sub_tokens, vec![Token::new("hello", 6)]);
        assert_eq!(sub_tokens[0].end(), 11);
    }

    #[test]
    fn marker_only_pieces_give_no_sub_tokens() {
        let aligner = SubwordAligner::default();
        let word = Token::new("x", 0);
        assert!(aligner.split(&word, &["▁"]).is_empty());
        assert!(aligner.split::<&str>(&word, &[]).is_empty());
    }

    #[test]
    fn empty_pieces_are_never_emitted() {
        let aligner = SubwordAligner::default();
        let word = Token::new("Spendengeld", 12);
        let sub_tokens = aligner.split(&word, &["▁", "Spenden", "▁▁", "geld", ""]);

        assert_eq!(sub_tokens.len(), 2);
        assert!(sub_tokens.iter().all(|token| !token.text().is_empty()));
        check_contiguous(&word, &sub_tokens);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let aligner = SubwordAligner::default();
        let cleaned = aligner.clean(&["▁Ver", "unt", "▁", "reute"]);
        assert_eq!(cleaned, vec!["Ver", "unt", "reute"]);
        assert_eq!(aligner.clean(&cleaned), cleaned);
    }

    #[test]
    fn offsets_count_chars() {
        let aligner = SubwordAligner::default();
        let word = Token::new("größer", 4);
        let sub_tokens = aligner.split(&word, &["▁grö", "ßer"]);

        assert_eq!(sub_tokens[1].start(), 7);
        check_contiguous(&word, &sub_tokens);
    }

    #[test]
    fn custom_marker() {
        let aligner = SubwordAligner::new('_');
        assert_eq!(aligner.clean(&["_hel", "lo", "_"]), vec!["hel", "lo"]);
    }
}
