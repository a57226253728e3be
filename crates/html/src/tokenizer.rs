//! HTML Tokenizer
//!
//! Converts HTML text into a stream of tokens. Text and attribute values are
//! kept verbatim (character references are not decoded) so a parsed document
//! serializes back to the markup it came from.

use smallvec::SmallVec;
use std::collections::VecDeque;

/// Elements whose content is raw text up to the matching end tag
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

/// An HTML token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// DOCTYPE declaration
    Doctype {
        name: String,
        public_id: Option<String>,
        system_id: Option<String>,
    },
    /// Start tag
    StartTag {
        name: String,
        attributes: SmallVec<[(String, String); 4]>,
        self_closing: bool,
    },
    /// End tag
    EndTag {
        name: String,
    },
    /// A run of character data
    Text(String),
    /// Comment
    Comment(String),
    /// End of file
    Eof,
}

/// Tokenizer state machine states
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueQuoted(char),
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    BogusComment,
    MarkupDeclarationOpen,
    RawText,
}

/// HTML tokenizer
pub struct Tokenizer {
    input: Vec<char>,
    pos: usize,
    state: State,
    tokens: VecDeque<Token>,

    // Pending character data, flushed before any other token
    text: String,

    // Current tag being built
    current_tag_name: String,
    current_tag_is_end: bool,
    current_tag_self_closing: bool,
    current_attributes: SmallVec<[(String, String); 4]>,
    current_attr_name: String,
    current_attr_value: String,

    // Element whose end tag terminates raw text
    raw_text_tag: String,
}

fn is_html_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

impl Tokenizer {
    /// Create a new tokenizer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            state: State::Data,
            tokens: VecDeque::new(),

            text: String::new(),

            current_tag_name: String::new(),
            current_tag_is_end: false,
            current_tag_self_closing: false,
            current_attributes: SmallVec::new(),
            current_attr_name: String::new(),
            current_attr_value: String::new(),

            raw_text_tag: String::new(),
        }
    }

    /// Get the next token. Returns [`Token::Eof`] once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        while self.tokens.is_empty() {
            if self.pos >= self.input.len() {
                self.finish();
                return self.tokens.pop_front().unwrap_or(Token::Eof);
            }
            self.step();
        }
        self.tokens.pop_front().unwrap_or(Token::Eof)
    }

    /// Handle end of input. A tag cut off by EOF is dropped; a lone `<` is text.
    fn finish(&mut self) {
        match self.state {
            State::TagOpen => self.text.push('<'),
            State::EndTagOpen => self.text.push_str("</"),
            State::Data | State::RawText => {}
            _ => log::trace!("Dropping tag <{}> truncated by end of input", self.current_tag_name),
        }
        self.state = State::Data;
        self.flush_text();
    }

    /// Peek at the current character without consuming
    fn current_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    /// Consume and return the current character
    fn consume(&mut self) -> Option<char> {
        let c = self.current_char()?;
        self.pos += 1;
        Some(c)
    }

    /// Check if the input at `at` starts with `s` (case-insensitive)
    fn matches_at_ci(&self, at: usize, s: &str) -> bool {
        let mut idx = at;
        for expected in s.chars() {
            match self.input.get(idx) {
                Some(c) if c.eq_ignore_ascii_case(&expected) => idx += 1,
                _ => return false,
            }
        }
        true
    }

    /// Find the next occurrence of `s` at or after `from` (case-insensitive)
    fn find_ci(&self, from: usize, s: &str) -> Option<usize> {
        (from..self.input.len()).find(|&i| self.matches_at_ci(i, s))
    }

    /// Where a trailing, incomplete copy of `s` begins, or the input length
    fn partial_suffix_start(&self, s: &str) -> usize {
        let len = self.input.len();
        let available = len.saturating_sub(self.pos);
        let width = s.chars().count();

        (1..width.min(available + 1))
            .rev()
            .find(|&k| self.matches_at_ci(len - k, &s.chars().take(k).collect::<String>()))
            .map(|k| len - k)
            .unwrap_or(len)
    }

    fn slice_text(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.tokens.push_back(Token::Text(text));
        }
    }

    /// Emit a non-text token
    fn emit(&mut self, token: Token) {
        self.flush_text();
        self.tokens.push_back(token);
    }

    fn begin_tag(&mut self, is_end: bool) {
        self.current_tag_name.clear();
        self.current_tag_is_end = is_end;
        self.current_tag_self_closing = false;
        self.current_attributes.clear();
        self.current_attr_name.clear();
        self.current_attr_value.clear();
    }

    /// Emit the current tag and pick the state that follows it
    fn emit_current_tag(&mut self) {
        let name = std::mem::take(&mut self.current_tag_name);

        if self.current_tag_is_end {
            self.emit(Token::EndTag { name });
            self.state = State::Data;
            return;
        }

        let enters_raw_text =
            !self.current_tag_self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str());
        if enters_raw_text {
            self.raw_text_tag = name.clone();
        }

        let attributes = std::mem::take(&mut self.current_attributes);
        let self_closing = self.current_tag_self_closing;
        self.emit(Token::StartTag {
            name,
            attributes,
            self_closing,
        });
        self.state = if enters_raw_text { State::RawText } else { State::Data };
    }

    /// Push the pending attribute. The first occurrence of a name wins.
    fn push_attribute(&mut self) {
        if !self.current_attr_name.is_empty() {
            let name = std::mem::take(&mut self.current_attr_name);
            let value = std::mem::take(&mut self.current_attr_value);
            if self.current_attributes.iter().any(|(k, _)| *k == name) {
                log::trace!("Ignoring duplicate attribute '{}'", name);
            } else {
                self.current_attributes.push((name, value));
            }
        }
        self.current_attr_name.clear();
        self.current_attr_value.clear();
    }

    /// Execute one step of the state machine
    fn step(&mut self) {
        match self.state {
            State::Data => self.data_state(),
            State::TagOpen => self.tag_open_state(),
            State::EndTagOpen => self.end_tag_open_state(),
            State::TagName => self.tag_name_state(),
            State::BeforeAttributeName => self.before_attribute_name_state(),
            State::AttributeName => self.attribute_name_state(),
            State::AfterAttributeName => self.after_attribute_name_state(),
            State::BeforeAttributeValue => self.before_attribute_value_state(),
            State::AttributeValueQuoted(quote) => self.attribute_value_quoted_state(quote),
            State::AttributeValueUnquoted => self.attribute_value_unquoted_state(),
            State::AfterAttributeValueQuoted => self.after_attribute_value_quoted_state(),
            State::SelfClosingStartTag => self.self_closing_start_tag_state(),
            State::BogusComment => self.bogus_comment_state(),
            State::MarkupDeclarationOpen => self.markup_declaration_open_state(),
            State::RawText => self.raw_text_state(),
        }
    }

    // State implementations

    fn data_state(&mut self) {
        match self.consume() {
            Some('<') => self.state = State::TagOpen,
            Some(c) => self.text.push(c),
            None => {}
        }
    }

    fn tag_open_state(&mut self) {
        match self.current_char() {
            Some('!') => {
                self.consume();
                self.state = State::MarkupDeclarationOpen;
            }
            Some('/') => {
                self.consume();
                self.state = State::EndTagOpen;
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.begin_tag(false);
                self.state = State::TagName;
            }
            Some('?') => self.state = State::BogusComment,
            _ => {
                self.text.push('<');
                self.state = State::Data;
            }
        }
    }

    fn end_tag_open_state(&mut self) {
        match self.current_char() {
            Some(c) if c.is_ascii_alphabetic() => {
                self.begin_tag(true);
                self.state = State::TagName;
            }
            Some('>') => {
                self.consume();
                self.state = State::Data;
            }
            _ => self.state = State::BogusComment,
        }
    }

    fn tag_name_state(&mut self) {
        match self.consume() {
            Some(c) if is_html_whitespace(c) => self.state = State::BeforeAttributeName,
            Some('/') => self.state = State::SelfClosingStartTag,
            Some('>') => self.emit_current_tag(),
            Some(c) => self.current_tag_name.push(c.to_ascii_lowercase()),
            None => {}
        }
    }

    fn before_attribute_name_state(&mut self) {
        match self.current_char() {
            Some(c) if is_html_whitespace(c) => {
                self.consume();
            }
            Some('/') => {
                self.consume();
                self.state = State::SelfClosingStartTag;
            }
            Some('>') => {
                self.consume();
                self.emit_current_tag();
            }
            Some('=') => {
                self.consume();
                self.current_attr_name.push('=');
                self.state = State::AttributeName;
            }
            Some(_) => self.state = State::AttributeName,
            None => {}
        }
    }

    fn attribute_name_state(&mut self) {
        match self.current_char() {
            Some(c) if is_html_whitespace(c) || c == '/' || c == '>' => {
                self.state = State::AfterAttributeName;
            }
            Some('=') => {
                self.consume();
                self.state = State::BeforeAttributeValue;
            }
            Some(c) => {
                self.consume();
                self.current_attr_name.push(c.to_ascii_lowercase());
            }
            None => {}
        }
    }

    fn after_attribute_name_state(&mut self) {
        match self.current_char() {
            Some(c) if is_html_whitespace(c) => {
                self.consume();
            }
            Some('=') => {
                self.consume();
                self.state = State::BeforeAttributeValue;
            }
            Some('/') => {
                self.consume();
                self.push_attribute();
                self.state = State::SelfClosingStartTag;
            }
            Some('>') => {
                self.consume();
                self.push_attribute();
                self.emit_current_tag();
            }
            Some(_) => {
                self.push_attribute();
                self.state = State::AttributeName;
            }
            None => {}
        }
    }

    fn before_attribute_value_state(&mut self) {
        match self.current_char() {
            Some(c) if is_html_whitespace(c) => {
                self.consume();
            }
            Some(quote @ ('"' | '\'')) => {
                self.consume();
                self.state = State::AttributeValueQuoted(quote);
            }
            Some('>') => {
                self.consume();
                self.push_attribute();
                self.emit_current_tag();
            }
            Some(_) => self.state = State::AttributeValueUnquoted,
            None => {}
        }
    }

    fn attribute_value_quoted_state(&mut self, quote: char) {
        match self.consume() {
            Some(c) if c == quote => {
                self.push_attribute();
                self.state = State::AfterAttributeValueQuoted;
            }
            Some(c) => self.current_attr_value.push(c),
            None => {}
        }
    }

    fn attribute_value_unquoted_state(&mut self) {
        match self.current_char() {
            Some(c) if is_html_whitespace(c) => {
                self.consume();
                self.push_attribute();
                self.state = State::BeforeAttributeName;
            }
            Some('>') => {
                self.consume();
                self.push_attribute();
                self.emit_current_tag();
            }
            Some(c) => {
                self.consume();
                self.current_attr_value.push(c);
            }
            None => {}
        }
    }

    fn after_attribute_value_quoted_state(&mut self) {
        match self.current_char() {
            Some(c) if is_html_whitespace(c) => {
                self.consume();
                self.state = State::BeforeAttributeName;
            }
            Some('/') => {
                self.consume();
                self.state = State::SelfClosingStartTag;
            }
            Some('>') => {
                self.consume();
                self.emit_current_tag();
            }
            Some(_) => self.state = State::BeforeAttributeName,
            None => {}
        }
    }

    fn self_closing_start_tag_state(&mut self) {
        match self.current_char() {
            Some('>') => {
                self.consume();
                self.current_tag_self_closing = true;
                self.emit_current_tag();
            }
            Some(_) => self.state = State::BeforeAttributeName,
            None => {}
        }
    }

    /// `<?...>`, `</ ...>` and unknown `<!...>` become comments up to the next `>`
    fn bogus_comment_state(&mut self) {
        let end = (self.pos..self.input.len())
            .find(|&i| self.input[i] == '>')
            .unwrap_or(self.input.len());
        let comment = self.slice_text(self.pos, end);
        self.pos = (end + 1).min(self.input.len());
        self.emit(Token::Comment(comment));
        self.state = State::Data;
    }

    fn markup_declaration_open_state(&mut self) {
        if self.matches_at_ci(self.pos, "--") {
            let start = self.pos + 2;
            let (comment, resume) = match self.find_ci(start, "-->") {
                Some(end) => (self.slice_text(start, end), end + 3),
                None => (self.slice_text(start, self.input.len()), self.input.len()),
            };
            self.pos = resume;
            self.emit(Token::Comment(comment));
            self.state = State::Data;
        } else if self.matches_at_ci(self.pos, "DOCTYPE") {
            self.pos += 7;
            self.doctype();
        } else {
            // CDATA and anything else we don't understand
            self.state = State::BogusComment;
        }
    }

    fn doctype(&mut self) {
        let end = (self.pos..self.input.len())
            .find(|&i| self.input[i] == '>')
            .unwrap_or(self.input.len());
        let body = self.slice_text(self.pos, end);
        self.pos = (end + 1).min(self.input.len());
        self.emit(parse_doctype(&body));
        self.state = State::Data;
    }

    /// Consume raw text up to the end tag of the element that opened it
    fn raw_text_state(&mut self) {
        let closing = format!("</{}", self.raw_text_tag);
        let mut search_from = self.pos;

        let end = loop {
            match self.find_ci(search_from, &closing) {
                Some(at) => {
                    let after = at + closing.chars().count();
                    match self.input.get(after) {
                        Some(&c) if is_html_whitespace(c) || c == '/' || c == '>' => break at,
                        None => break at,
                        Some(_) => search_from = at + 1,
                    }
                }
                None => break self.input.len(),
            }
        };

        if end >= self.input.len() {
            // Unclosed: a partial end tag at EOF is not content
            let content_end = self.partial_suffix_start(&closing);
            let content = self.slice_text(self.pos, content_end);
            self.text.push_str(&content);
            self.pos = end;
            self.state = State::Data;
            return;
        }

        let content = self.slice_text(self.pos, end);
        self.text.push_str(&content);

        // Hand the end tag to the regular tag states
        self.pos = end + 2;
        self.begin_tag(true);
        self.state = State::TagName;
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::Eof => None,
            token => Some(token),
        }
    }
}

/// Parse the inside of `<!DOCTYPE ...>`
fn parse_doctype(body: &str) -> Token {
    let mut rest = body.trim_start();
    let name_end = rest.find(is_html_whitespace).unwrap_or(rest.len());
    let name = rest[..name_end].to_ascii_lowercase();
    rest = rest[name_end..].trim_start();

    let mut public_id = None;
    let mut system_id = None;

    let keyword = rest.get(..6).unwrap_or_default();
    if keyword.eq_ignore_ascii_case("PUBLIC") {
        let (public, after) = quoted(&rest[6..]);
        public_id = public;
        system_id = quoted(after).0;
    } else if keyword.eq_ignore_ascii_case("SYSTEM") {
        system_id = quoted(&rest[6..]).0;
    }

    Token::Doctype { name, public_id, system_id }
}

/// Read one quoted string, returning it and the remainder
fn quoted(input: &str) -> (Option<String>, &str) {
    let input = input.trim_start();
    let Some(quote) = input.chars().next().filter(|c| *c == '"' || *c == '\'') else {
        return (None, input);
    };
    let inner = &input[1..];
    match inner.find(quote) {
        Some(end) => (Some(inner[..end].to_string()), &inner[end + 1..]),
        None => (Some(inner.to_string()), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(html: &str) -> Vec<Token> {
        Tokenizer::new(html).collect()
    }

    #[test]
    fn test_simple_element() {
        let tokens = tokens("<div>hello</div>");

        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "div"));
        assert_eq!(tokens[1], Token::Text("hello".to_string()));
        assert!(matches!(&tokens[2], Token::EndTag { name } if name == "div"));
    }

    #[test]
    fn test_attributes() {
        let mut tokenizer = Tokenizer::new(r#"<a href="test" class='foo' data-x=1 hidden>"#);
        let tok = tokenizer.next_token();

        if let Token::StartTag { name, attributes, .. } = tok {
            assert_eq!(name, "a");
            let pairs: Vec<(&str, &str)> =
                attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            assert_eq!(
                pairs,
                [("href", "test"), ("class", "foo"), ("data-x", "1"), ("hidden", "")]
            );
        } else {
            panic!("Expected StartTag");
        }
    }

    #[test]
    fn test_attribute_whitespace_around_equals() {
        let tokens = tokens(r#"<div class = "a b" ID=x>"#);
        if let Token::StartTag { attributes, .. } = &tokens[0] {
            assert_eq!(attributes[0], ("class".to_string(), "a b".to_string()));
            assert_eq!(attributes[1], ("id".to_string(), "x".to_string()));
        } else {
            panic!("Expected StartTag");
        }
    }

    #[test]
    fn test_duplicate_attribute_first_wins() {
        let tokens = tokens(r#"<p class="one" class="two">"#);
        if let Token::StartTag { attributes, .. } = &tokens[0] {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].1, "one");
        } else {
            panic!("Expected StartTag");
        }
    }

    #[test]
    fn test_self_closing() {
        let tokens = tokens("<br/><img src=a />");
        assert!(matches!(&tokens[0], Token::StartTag { name, self_closing: true, .. } if name == "br"));
        assert!(matches!(&tokens[1], Token::StartTag { name, self_closing: true, .. } if name == "img"));
    }

    #[test]
    fn test_doctype() {
        let tok = Tokenizer::new("<!DOCTYPE html>").next_token();
        assert_eq!(
            tok,
            Token::Doctype { name: "html".to_string(), public_id: None, system_id: None }
        );
    }

    #[test]
    fn test_doctype_public() {
        let tok = Tokenizer::new(
            r#"<!doctype HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
        )
        .next_token();

        assert_eq!(
            tok,
            Token::Doctype {
                name: "html".to_string(),
                public_id: Some("-//W3C//DTD HTML 4.01//EN".to_string()),
                system_id: Some("http://www.w3.org/TR/html4/strict.dtd".to_string()),
            }
        );
    }

    #[test]
    fn test_comment() {
        let tok = Tokenizer::new("<!-- this is a comment -->").next_token();
        assert_eq!(tok, Token::Comment(" this is a comment ".to_string()));
    }

    #[test]
    fn test_unterminated_comment_runs_to_eof() {
        let tokens = tokens("a<!-- open");
        assert_eq!(
            tokens,
            [Token::Text("a".to_string()), Token::Comment(" open".to_string())]
        );
    }

    #[test]
    fn test_entities_kept_verbatim() {
        let tokens = tokens("<p title=\"&amp;\">&lt;b&gt; &copy;</p>");
        if let Token::StartTag { attributes, .. } = &tokens[0] {
            assert_eq!(attributes[0].1, "&amp;");
        }
        assert_eq!(tokens[1], Token::Text("&lt;b&gt; &copy;".to_string()));
    }

    #[test]
    fn test_raw_text() {
        let tokens = tokens("<script>if (a < b) { x = '</div>'; }</script ><p>");

        assert_eq!(tokens[1], Token::Text("if (a < b) { x = '</div>'; }".to_string()));
        assert!(matches!(&tokens[2], Token::EndTag { name } if name == "script"));
        assert!(matches!(&tokens[3], Token::StartTag { name, .. } if name == "p"));
    }

    #[test]
    fn test_raw_text_ignores_longer_tag_names() {
        let tokens = tokens("<style>a{}</styles></STYLE>");
        assert_eq!(tokens[1], Token::Text("a{}</styles>".to_string()));
        assert!(matches!(&tokens[2], Token::EndTag { name } if name == "style"));
    }

    #[test]
    fn test_unclosed_raw_text() {
        let tokens = tokens("<style>.a{color:red}");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Token::Text(".a{color:red}".to_string()));
    }

    #[test]
    fn test_unclosed_raw_text_drops_partial_end_tag() {
        assert_eq!(tokens("<style>a{}</sty"), tokens("<style>a{}"));
        assert_eq!(tokens("<STYLE>a{}</STY")[1], Token::Text("a{}".to_string()));
        assert_eq!(tokens("<style></st").len(), 1);
        assert_eq!(tokens("<title>x<")[1], Token::Text("x".to_string()));
        assert_eq!(tokens("<style>a</b")[1], Token::Text("a</b".to_string()));
    }

    #[test]
    fn test_stray_less_than_is_text() {
        assert_eq!(tokens("1 < 2 <"), [Token::Text("1 < 2 <".to_string())]);
    }

    #[test]
    fn test_truncated_tag_dropped() {
        assert_eq!(tokens("hi <div class=\"x"), [Token::Text("hi ".to_string())]);
    }

    #[test]
    fn test_processing_instruction_is_comment() {
        let tokens = tokens("<?xml version=\"1.0\"?><a>");
        assert_eq!(tokens[0], Token::Comment("?xml version=\"1.0\"?".to_string()));
    }
}
