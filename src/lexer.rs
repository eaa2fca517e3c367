//! Tokenizer: program text to a flat stream of classified lexemes.

use miette::SourceSpan;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "drawbot.pest"]
struct TokenGrammar;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of ASCII letters
    Word,
    /// A run of ASCII digits
    Number,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
}

/// A classified lexeme borrowed from the program text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: SourceSpan,
}

impl Token<'_> {
    pub fn is_word(&self, text: &str) -> bool {
        self.kind == TokenKind::Word && self.text == text
    }
}

/// Tokens of one program, in source order, plus where the program ends.
#[derive(Debug, Clone, Default)]
pub struct TokenStream<'src> {
    tokens: Vec<Token<'src>>,
    end: usize,
}

impl<'src> TokenStream<'src> {
    pub fn tokens(&self) -> &[Token<'src>] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Zero-length span just past the last byte of the program
    pub fn eof_span(&self) -> SourceSpan {
        (self.end, 0).into()
    }
}

/// Split program text into tokens.
///
/// Never fails: characters that start no token are skipped.
pub fn tokenize(source: &str) -> TokenStream<'_> {
    // `program` matches every input, so pest never reports an error here.
    let tokens = TokenGrammar::parse(Rule::program, source)
        .ok()
        .and_then(|mut pairs| pairs.next())
        .map(|program| {
            program
                .into_inner()
                .filter_map(|pair| {
                    let kind = match pair.as_rule() {
                        Rule::word => TokenKind::Word,
                        Rule::number => TokenKind::Number,
                        Rule::lbracket => TokenKind::LBracket,
                        Rule::rbracket => TokenKind::RBracket,
                        _ => return None,
                    };
                    let span = pair.as_span();
                    Some(Token {
                        kind,
                        text: span.as_str(),
                        span: (span.start(), span.end() - span.start()).into(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    TokenStream {
        tokens,
        end: source.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .tokens()
            .iter()
            .map(|t| (t.kind, t.text.to_string()))
            .collect()
    }

    #[test]
    fn splits_commands_and_operands() {
        use TokenKind::*;
        assert_eq!(
            kinds("F 10 R 90 COLOR S"),
            vec![
                (Word, "F".into()),
                (Number, "10".into()),
                (Word, "R".into()),
                (Number, "90".into()),
                (Word, "COLOR".into()),
                (Word, "S".into()),
            ]
        );
    }

    #[test]
    fn brackets_are_single_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("L 2[[]]"),
            vec![
                (Word, "L".into()),
                (Number, "2".into()),
                (LBracket, "[".into()),
                (LBracket, "[".into()),
                (RBracket, "]".into()),
                (RBracket, "]".into()),
            ]
        );
    }

    #[test]
    fn longest_runs_and_no_separator_needed() {
        use TokenKind::*;
        // letters and digits split each other without whitespace
        assert_eq!(
            kinds("F100R90abc"),
            vec![
                (Word, "F".into()),
                (Number, "100".into()),
                (Word, "R".into()),
                (Number, "90".into()),
                (Word, "abc".into()),
            ]
        );
    }

    #[test]
    fn skips_everything_else() {
        use TokenKind::*;
        assert_eq!(
            kinds("  F, -10;\n\t( R + 5 ) é ü 7"),
            vec![
                (Word, "F".into()),
                (Number, "10".into()),
                (Word, "R".into()),
                (Number, "5".into()),
                (Number, "7".into()),
            ]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,.;!? \n").is_empty());
    }

    #[test]
    fn words_are_case_sensitive() {
        let stream = tokenize("color COLOR");
        assert_eq!(stream.len(), 2);
        assert!(!stream.tokens()[0].is_word("COLOR"));
        assert!(stream.tokens()[1].is_word("COLOR"));
    }

    #[test]
    fn spans_point_into_source() {
        let source = "F  12 [";
        let stream = tokenize(source);
        let spans: Vec<(usize, usize)> = stream
            .tokens()
            .iter()
            .map(|t| (t.span.offset(), t.span.len()))
            .collect();
        assert_eq!(spans, vec![(0, 1), (3, 2), (6, 1)]);
        assert_eq!(stream.eof_span().offset(), source.len());
        assert_eq!(stream.eof_span().len(), 0);
    }

    #[test]
    fn multibyte_text_keeps_byte_offsets() {
        let source = "é F 1";
        let stream = tokenize(source);
        assert_eq!(stream.tokens()[0].span.offset(), 3);
        assert_eq!(stream.tokens()[0].text, "F");
    }
}
