//! Incremental HTML tokenizer.
//!
//! Input is fed in chunks of any size and tokens come out as soon as they are
//! complete. A construct cut by a chunk boundary waits in the buffer for the rest, and
//! character data is held until the next markup delimiter, so the token sequence does
//! not depend on where the chunks were split.
//!
//! Comments, doctype declarations and processing instructions are skipped. The content
//! of `script` and `style` elements is discarded; their start and end tags are still
//! reported.

use crate::error::FormatError;

/// A lexical unit of HTML input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        /// Lowercased tag name
        name: String,
        /// Lowercased attribute names with decoded values, in source order
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
    /// A named reference such as `amp` in `&amp;`
    EntityRef(String),
    /// A numeric reference without the `#`, such as `09` or `x9`
    CharRef(String),
}

enum Step {
    Token(Token, usize),
    Text(usize),
    Skip(usize),
    Incomplete,
}

#[derive(Debug, Default)]
pub struct Tokenizer {
    buffer: String,
    text: String,
    raw_text: Option<String>,
    line: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {
            line: 1,
            ..Default::default()
        }
    }

    /// Feed the next chunk of input and return the tokens completed by it.
    pub fn feed(&mut self, chunk: &str) -> Vec<Token> {
        self.buffer.push_str(chunk);
        // without end of input nothing can be unterminated yet
        self.scan(false).unwrap_or_default()
    }

    /// Signal the end of input and return the remaining tokens.
    pub fn finish(&mut self) -> Result<Vec<Token>, FormatError> {
        let mut tokens = self.scan(true)?;
        if !self.text.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut self.text)));
        }
        Ok(tokens)
    }

    fn push(&mut self, tokens: &mut Vec<Token>, token: Token) {
        if !self.text.is_empty() {
            tokens.push(Token::Text(std::mem::take(&mut self.text)));
        }
        tokens.push(token);
    }

    fn scan(&mut self, eof: bool) -> Result<Vec<Token>, FormatError> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < self.buffer.len() {
            if let Some(name) = &self.raw_text {
                let close = format!("</{name}");
                match self.buffer[pos..].to_ascii_lowercase().find(&close) {
                    Some(offset) => {
                        log::trace!("skipping content of <{name}>");
                        pos += offset;
                        self.raw_text = None;
                    }
                    None if eof => pos = self.buffer.len(),
                    None => break,
                }
                continue;
            }

            let step = match next_step(&self.buffer[pos..], eof) {
                Ok(step) => step,
                Err(message) => {
                    let line = self.line + self.buffer[..pos].matches('\n').count();
                    return Err(FormatError::ParseError(format!("{message} at line {line}")));
                }
            };
            match step {
                Step::Token(token, len) => {
                    if let Token::StartTag {
                        name,
                        self_closing: false,
                        ..
                    } = &token
                    {
                        if name == "script" || name == "style" {
                            self.raw_text = Some(name.clone());
                        }
                    }
                    self.push(&mut tokens, token);
                    pos += len;
                }
                Step::Text(len) => {
                    self.text.push_str(&self.buffer[pos..pos + len]);
                    pos += len;
                }
                Step::Skip(len) => pos += len,
                Step::Incomplete => break,
            }
        }

        self.line += self.buffer[..pos].matches('\n').count();
        self.buffer.drain(..pos);
        Ok(tokens)
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

fn next_step(rest: &str, eof: bool) -> Result<Step, String> {
    match rest.as_bytes()[0] {
        b'<' => markup(rest, eof),
        b'&' => Ok(reference(rest, eof)),
        _ => Ok(Step::Text(
            rest.find(|c: char| c == '<' || c == '&').unwrap_or(rest.len()),
        )),
    }
}

fn skip_until(rest: &str, from: usize, terminator: &str, eof: bool, what: &str) -> Result<Step, String> {
    match rest[from..].find(terminator) {
        Some(offset) => Ok(Step::Skip(from + offset + terminator.len())),
        None if eof => Err(format!("unterminated {what}")),
        None => Ok(Step::Incomplete),
    }
}

fn markup(rest: &str, eof: bool) -> Result<Step, String> {
    let bytes = rest.as_bytes();
    if rest.starts_with("<!--") {
        return skip_until(rest, 4, "-->", eof, "comment");
    }
    if bytes.len() < 2 {
        return Ok(if eof { Step::Text(1) } else { Step::Incomplete });
    }

    match bytes[1] {
        b'!' => skip_until(rest, 2, ">", eof, "declaration"),
        b'?' => skip_until(rest, 2, ">", eof, "processing instruction"),
        b'/' => {
            if bytes.len() < 3 {
                return Ok(if eof { Step::Text(1) } else { Step::Incomplete });
            }
            if !bytes[2].is_ascii_alphabetic() {
                return Ok(Step::Text(1));
            }
            match rest.find('>') {
                Some(end) => {
                    let name_end = rest[2..end]
                        .find(|c: char| !(c.is_ascii() && is_name_byte(c as u8)))
                        .map_or(end, |i| i + 2);
                    let name = rest[2..name_end].to_ascii_lowercase();
                    Ok(Step::Token(Token::EndTag(name), end + 1))
                }
                None if eof => Err("unterminated end tag".to_string()),
                None => Ok(Step::Incomplete),
            }
        }
        b if b.is_ascii_alphabetic() => match start_tag(rest) {
            Some((token, len)) => Ok(Step::Token(token, len)),
            None if eof => Err("unterminated start tag".to_string()),
            None => Ok(Step::Incomplete),
        },
        _ => Ok(Step::Text(1)),
    }
}

/// Parse a start tag at the beginning of `rest`. `None` means it is not complete yet.
fn start_tag(rest: &str) -> Option<(Token, usize)> {
    let bytes = rest.as_bytes();
    let len = bytes.len();

    let mut i = 1;
    while i < len && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = rest[1..i].to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return None;
        }
        match bytes[i] {
            b'>' => {
                let token = Token::StartTag {
                    name,
                    attrs,
                    self_closing: false,
                };
                return Some((token, i + 1));
            }
            b'/' => {
                if i + 1 >= len {
                    return None;
                }
                if bytes[i + 1] == b'>' {
                    let token = Token::StartTag {
                        name,
                        attrs,
                        self_closing: true,
                    };
                    return Some((token, i + 2));
                }
                i += 1;
                continue;
            }
            _ => {}
        }

        let key_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let key = rest[key_start..i].to_ascii_lowercase();
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return None;
        }

        let mut value = String::new();
        if bytes[i] == b'=' {
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= len {
                return None;
            }
            if bytes[i] == b'"' || bytes[i] == b'\'' {
                let quote = bytes[i] as char;
                let end = rest[i + 1..].find(quote)? + i + 1;
                value = decode_attribute(&rest[i + 1..end]);
                i = end + 1;
            } else {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = decode_attribute(&rest[value_start..i]);
            }
        }

        if !key.is_empty() {
            attrs.push((key, value));
        }
    }
}

fn reference(rest: &str, eof: bool) -> Step {
    let bytes = rest.as_bytes();
    let len = bytes.len();
    if len < 2 {
        return if eof { Step::Text(1) } else { Step::Incomplete };
    }

    let numeric = bytes[1] == b'#';
    let start = if numeric { 2 } else { 1 };
    let mut i = start;
    if numeric && i < len && matches!(bytes[i], b'x' | b'X') {
        i += 1;
    }
    while i < len && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i >= len && !eof {
        return Step::Incomplete;
    }

    let name = &rest[start..i];
    let valid = if numeric {
        match name.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()),
            None => !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()),
        }
    } else {
        name.as_bytes().first().is_some_and(|b| b.is_ascii_alphabetic())
    };
    if !valid {
        return Step::Text(1);
    }

    let consumed = if i < len && bytes[i] == b';' { i + 1 } else { i };
    let token = if numeric {
        Token::CharRef(name.to_string())
    } else {
        Token::EntityRef(name.to_string())
    };
    Step::Token(token, consumed)
}

/// The code point of a numeric reference name such as `09` or `x9`.
pub fn char_ref_value(name: &str) -> Option<u32> {
    match name.strip_prefix(|c: char| c == 'x' || c == 'X') {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => name.parse().ok(),
    }
}

/// Decode the references the writer produces inside attribute values.
/// Unknown references are kept as written.
pub fn decode_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut cursor = 0;

    while let Some(offset) = value[cursor..].find('&') {
        let amp = cursor + offset;
        out.push_str(&value[cursor..amp]);

        let decoded = value[amp + 1..].find(';').and_then(|semi| {
            let name = &value[amp + 1..amp + 1 + semi];
            let ch = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => name
                    .strip_prefix('#')
                    .and_then(char_ref_value)
                    .and_then(char::from_u32),
            };
            ch.map(|ch| (ch, semi))
        });

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                cursor = amp + semi + 2;
            }
            None => {
                out.push('&');
                cursor = amp + 1;
            }
        }
    }

    out.push_str(&value[cursor..]);
    out
}
