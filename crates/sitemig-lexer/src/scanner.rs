use crate::token::{is_raw_text_element, Quote, RawAttribute, Span, Token, TokenKind};
use crate::LexerError;

/// Scanner mode determines how `<` is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerMode {
    /// Default mode: `<` may open a tag, comment or doctype.
    Data,
    /// Inside `script`/`style`/`textarea`/`title`: everything up to the
    /// matching end tag is text.
    RawText(String),
}

/// HTML source scanner.
///
/// Tokenizes static HTML pages into a stream of tokens.
/// Handles start/end tags with raw attributes, comments, doctypes,
/// and raw text elements whose bodies must never be treated as markup.
///
/// - `Vec<char>` source for index-based navigation
/// - Mode-aware handling of raw text element bodies
/// - Position tracking on every token
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    mode: ScannerMode,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
            mode: ScannerMode::Data,
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens()?;
        Ok(scanner.tokens)
    }

    /// Scan all tokens from the source.
    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            match self.mode.clone() {
                ScannerMode::Data => self.scan_token()?,
                ScannerMode::RawText(tag) => self.scan_raw_text(&tag),
            }
        }

        let span = Span::new(self.pos, self.pos, self.line, self.column);
        self.tokens.push(Token::new(TokenKind::Eof, span));
        Ok(())
    }

    /// Scan the next token in data mode.
    fn scan_token(&mut self) -> Result<(), LexerError> {
        if self.peek() == '<' {
            let next = self.peek_at(1);
            if next == '!' {
                if self.starts_with("<!--") {
                    return self.scan_comment();
                }
                return self.scan_doctype();
            }
            if next == '/' && self.peek_at(2).is_ascii_alphabetic() {
                return self.scan_end_tag();
            }
            if next.is_ascii_alphabetic() {
                return self.scan_start_tag();
            }
        }
        self.scan_text();
        Ok(())
    }

    // --- Scanners ---

    /// Scan character data up to the next markup construct.
    fn scan_text(&mut self) {
        let (start_pos, start_line, start_col) = self.mark();
        let mut text = String::new();

        // A lone `<` (e.g. `a < b`) is text, so always take the first char.
        text.push(self.peek());
        self.advance();

        while !self.is_at_end() && !self.at_markup() {
            text.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Text(text), span));
    }

    /// Scan the body of a raw text element up to its end tag.
    fn scan_raw_text(&mut self, tag: &str) {
        let (start_pos, start_line, start_col) = self.mark();
        let mut text = String::new();

        while !self.is_at_end() && !self.at_end_tag_for(tag) {
            text.push(self.peek());
            self.advance();
        }

        if !text.is_empty() {
            let span = Span::new(start_pos, self.pos, start_line, start_col);
            self.tokens.push(Token::new(TokenKind::Text(text), span));
        }
        self.mode = ScannerMode::Data;
    }

    /// Scan `<!-- ... -->`.
    fn scan_comment(&mut self) -> Result<(), LexerError> {
        let (start_pos, start_line, start_col) = self.mark();
        self.advance_by(4); // consume `<!--`

        let mut content = String::new();
        while !self.starts_with("-->") {
            if self.is_at_end() {
                return Err(LexerError {
                    message: "Unterminated comment".into(),
                    line: start_line,
                    column: start_col,
                });
            }
            content.push(self.peek());
            self.advance();
        }
        self.advance_by(3); // consume `-->`

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Comment(content), span));
        Ok(())
    }

    /// Scan `<!DOCTYPE ...>` and other `<!...>` declarations.
    fn scan_doctype(&mut self) -> Result<(), LexerError> {
        let (start_pos, start_line, start_col) = self.mark();
        self.advance_by(2); // consume `<!`

        let mut content = String::new();
        while self.peek() != '>' {
            if self.is_at_end() {
                return Err(LexerError {
                    message: "Unterminated declaration".into(),
                    line: start_line,
                    column: start_col,
                });
            }
            content.push(self.peek());
            self.advance();
        }
        self.advance(); // consume `>`

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Doctype(content), span));
        Ok(())
    }

    /// Scan `</name>`. Anything between the name and `>` is discarded.
    fn scan_end_tag(&mut self) -> Result<(), LexerError> {
        let (start_pos, start_line, start_col) = self.mark();
        self.advance_by(2); // consume `</`

        let name = self.scan_tag_name();
        while self.peek() != '>' {
            if self.is_at_end() {
                return Err(LexerError {
                    message: format!("Unterminated end tag </{name}"),
                    line: start_line,
                    column: start_col,
                });
            }
            self.advance();
        }
        self.advance(); // consume `>`

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::EndTag(name), span));
        Ok(())
    }

    /// Scan `<name attr=value ...>` or its self-closing form.
    fn scan_start_tag(&mut self) -> Result<(), LexerError> {
        let (start_pos, start_line, start_col) = self.mark();
        self.advance(); // consume `<`

        let name = self.scan_tag_name();
        let mut attributes = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                return Err(LexerError {
                    message: format!("Unterminated start tag <{name}"),
                    line: start_line,
                    column: start_col,
                });
            }
            match self.peek() {
                '>' => {
                    self.advance();
                    break;
                }
                '/' if self.peek_at(1) == '>' => {
                    self.advance_by(2);
                    self_closing = true;
                    break;
                }
                '/' => {
                    // Stray slash inside a tag, e.g. `<a / href="x">`
                    self.advance();
                }
                _ => attributes.push(self.scan_attribute()?),
            }
        }

        if !self_closing && is_raw_text_element(&name) {
            self.mode = ScannerMode::RawText(name.clone());
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            },
            span,
        ));
        Ok(())
    }

    /// Scan one attribute: `name`, `name=value`, `name="value"` or `name='value'`.
    fn scan_attribute(&mut self) -> Result<RawAttribute, LexerError> {
        let mut name = String::new();
        // First char is always part of the name so a leading `=` cannot stall the loop.
        name.push(self.peek());
        self.advance();
        while !self.is_at_end() {
            let c = self.peek();
            if c.is_whitespace() || c == '=' || c == '>' || (c == '/' && self.peek_at(1) == '>') {
                break;
            }
            name.push(c);
            self.advance();
        }

        self.skip_whitespace();
        if self.peek() != '=' {
            return Ok(RawAttribute {
                name,
                value: None,
                quote: Quote::None,
            });
        }
        self.advance(); // consume `=`
        self.skip_whitespace();

        let quote = match self.peek() {
            '"' => Quote::Double,
            '\'' => Quote::Single,
            _ => Quote::None,
        };

        let mut value = String::new();
        if let Some(q) = quote.as_char() {
            let (line, column) = (self.line, self.column);
            self.advance(); // consume opening quote
            while self.peek() != q {
                if self.is_at_end() {
                    return Err(LexerError {
                        message: format!("Unterminated value for attribute '{name}'"),
                        line,
                        column,
                    });
                }
                value.push(self.peek());
                self.advance();
            }
            self.advance(); // consume closing quote
        } else {
            while !self.is_at_end() && !self.peek().is_whitespace() && self.peek() != '>' {
                value.push(self.peek());
                self.advance();
            }
        }

        Ok(RawAttribute {
            name,
            value: Some(value),
            quote,
        })
    }

    fn scan_tag_name(&mut self) -> String {
        let mut name = String::new();
        while !self.is_at_end() {
            let c = self.peek();
            if c.is_whitespace() || c == '/' || c == '>' {
                break;
            }
            name.push(c);
            self.advance();
        }
        name
    }

    // --- Lookahead ---

    /// True if the current `<` begins a tag, comment or declaration.
    fn at_markup(&self) -> bool {
        if self.peek() != '<' {
            return false;
        }
        let next = self.peek_at(1);
        next == '!'
            || next.is_ascii_alphabetic()
            || (next == '/' && self.peek_at(2).is_ascii_alphabetic())
    }

    /// True if the input continues with `</tag` followed by a delimiter.
    fn at_end_tag_for(&self, tag: &str) -> bool {
        if self.peek() != '<' || self.peek_at(1) != '/' {
            return false;
        }
        let len = tag.chars().count();
        let candidate: String = self.chars.iter().skip(self.pos + 2).take(len).collect();
        if !candidate.eq_ignore_ascii_case(tag) {
            return false;
        }
        let after = self.peek_at(2 + len);
        after == '>' || after == '/' || after.is_whitespace() || after == '\0'
    }

    fn starts_with(&self, needle: &str) -> bool {
        needle
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == c)
    }

    // --- Helpers ---

    fn mark(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.column)
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> char {
        self.chars.get(self.pos + offset).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        if let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return token kinds (ignoring spans).
    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn start(name: &str, attributes: Vec<RawAttribute>, self_closing: bool) -> TokenKind {
        TokenKind::StartTag {
            name: name.into(),
            attributes,
            self_closing,
        }
    }

    fn attr(name: &str, value: &str, quote: Quote) -> RawAttribute {
        RawAttribute {
            name: name.into(),
            value: Some(value.into()),
            quote,
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            kinds("hello world"),
            vec![TokenKind::Text("hello world".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_element_with_text() {
        assert_eq!(
            kinds("<span>x</span>"),
            vec![
                start("span", vec![], false),
                TokenKind::Text("x".into()),
                TokenKind::EndTag("span".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lone_angle_bracket_is_text() {
        assert_eq!(
            kinds("a < b"),
            vec![TokenKind::Text("a < b".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_doctype() {
        assert_eq!(
            kinds("<!DOCTYPE html>"),
            vec![TokenKind::Doctype("DOCTYPE html".into()), TokenKind::Eof]
        );
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[test]
    fn test_quoted_attributes() {
        assert_eq!(
            kinds("<div class=\"a b\" id='main'>"),
            vec![
                start(
                    "div",
                    vec![
                        attr("class", "a b", Quote::Double),
                        attr("id", "main", Quote::Single),
                    ],
                    false
                ),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unquoted_and_boolean_attributes() {
        assert_eq!(
            kinds("<input type=checkbox checked>"),
            vec![
                start(
                    "input",
                    vec![
                        attr("type", "checkbox", Quote::None),
                        RawAttribute {
                            name: "checked".into(),
                            value: None,
                            quote: Quote::None,
                        },
                    ],
                    false
                ),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_self_closing_tag() {
        assert_eq!(
            kinds("<br />"),
            vec![start("br", vec![], true), TokenKind::Eof]
        );
    }

    #[test]
    fn test_gt_inside_quoted_value() {
        assert_eq!(
            kinds("<a title=\"1 > 0\">"),
            vec![
                start("a", vec![attr("title", "1 > 0", Quote::Double)], false),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_start_tag() {
        let err = Scanner::tokenize("<div class=\"a\"").unwrap_err();
        assert!(err.message.contains("Unterminated start tag"));
    }

    #[test]
    fn test_unterminated_attribute_value() {
        let err = Scanner::tokenize("<div class=\"a>").unwrap_err();
        assert!(err.message.contains("Unterminated value"));
    }

    // =========================================================================
    // Comments and raw text
    // =========================================================================

    #[test]
    fn test_comment() {
        assert_eq!(
            kinds("<!-- note -->"),
            vec![TokenKind::Comment(" note ".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let err = Scanner::tokenize("<!-- open").unwrap_err();
        assert_eq!(err.message, "Unterminated comment");
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_script_body_is_raw() {
        assert_eq!(
            kinds("<script>if (a<b) { x = '<div class=\"y\">'; }</script>"),
            vec![
                start("script", vec![], false),
                TokenKind::Text("if (a<b) { x = '<div class=\"y\">'; }".into()),
                TokenKind::EndTag("script".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_style_end_tag_case_insensitive() {
        assert_eq!(
            kinds("<style>.a{}</STYLE>"),
            vec![
                start("style", vec![], false),
                TokenKind::Text(".a{}".into()),
                TokenKind::EndTag("STYLE".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comment_inside_script_is_text() {
        let k = kinds("<script><!-- x --></script>");
        assert_eq!(k[1], TokenKind::Text("<!-- x -->".into()));
    }

    // =========================================================================
    // Spans
    // =========================================================================

    #[test]
    fn test_span_tracks_lines() {
        let toks = Scanner::tokenize("<p>\n  <b>x</b>\n</p>").unwrap();
        let b = toks
            .iter()
            .find(|t| matches!(&t.kind, TokenKind::StartTag { name, .. } if name == "b"))
            .unwrap();
        assert_eq!(b.span.line, 2);
        assert_eq!(b.span.column, 3);
    }
}
