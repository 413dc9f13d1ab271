use super::token::{Token, TokenKind, KEYWORDS};

/*
The lexer is single-pass with exactly one byte of lookahead. It never raises:
an unrecognized byte becomes an `Illegal` token and is surfaced later by the
parser, which is the only component allowed to fail loudly (via its error
list, not a panic).
*/
pub struct Lexer {
    input: Vec<u8>,
    position: usize,
    read_position: usize,
    ch: u8,
    line: usize,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Self {
        let mut lexer = Self {
            input: source.into().into_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        };
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        if self.read_position >= self.input.len() {
            0
        } else {
            self.input[self.read_position]
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        let tok = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::Eq, "==", line)
                } else {
                    Token::new(TokenKind::Assign, "=", line)
                }
            }
            b';' => Token::new(TokenKind::Semicolon, ";", line),
            b':' => Token::new(TokenKind::Colon, ":", line),
            b'(' => Token::new(TokenKind::LParen, "(", line),
            b')' => Token::new(TokenKind::RParen, ")", line),
            b',' => Token::new(TokenKind::Comma, ",", line),
            b'+' => Token::new(TokenKind::Plus, "+", line),
            b'-' => Token::new(TokenKind::Minus, "-", line),
            b'*' => Token::new(TokenKind::Asterisk, "*", line),
            b'/' => {
                if self.peek_char() == b'/' {
                    self.read_char();
                    self.skip_line();
                    return self.next_token();
                } else {
                    Token::new(TokenKind::Slash, "/", line)
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::NotEq, "!=", line)
                } else {
                    Token::new(TokenKind::Bang, "!", line)
                }
            }
            b'<' => Token::new(TokenKind::Lt, "<", line),
            b'>' => Token::new(TokenKind::Gt, ">", line),
            b'{' => Token::new(TokenKind::LBrace, "{", line),
            b'}' => Token::new(TokenKind::RBrace, "}", line),
            0 => Token::new(TokenKind::Eof, "", line),
            ch => {
                if is_letter(ch) {
                    let literal = self.read_identifier();
                    let kind = KEYWORDS.get(literal.as_str()).copied().unwrap_or(TokenKind::Ident);
                    log::trace!("lexed identifier/keyword {:?} -> {:?}", literal, kind);
                    return Token::new(kind, literal, line);
                } else if is_digit(ch) {
                    let literal = self.read_number();
                    log::trace!("lexed integer literal {:?}", literal);
                    return Token::new(TokenKind::Int, literal, line);
                } else if ch == b'"' {
                    let literal = self.read_string();
                    return Token::new(TokenKind::String, literal, line);
                } else {
                    Token::new(TokenKind::Illegal, (ch as char).to_string(), line)
                }
            }
        };

        log::trace!("lexed token {:?}", tok);
        self.read_char();
        tok
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while is_identifier_continuation(self.ch) {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while is_digit(self.ch) {
            self.read_char();
        }
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn read_string(&mut self) -> String {
        // `self.ch` is the opening quote; consume it and scan to the closing one.
        self.read_char();
        let start = self.position;
        while self.ch != b'"' && self.ch != 0 {
            self.read_char();
        }
        let literal = String::from_utf8_lossy(&self.input[start..self.position]).into_owned();
        // consume the closing quote (or stop at EOF on an unterminated string)
        self.read_char();
        literal
    }

    fn skip_line(&mut self) {
        while self.ch != b'\n' && self.ch != 0 {
            self.read_char();
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.ch {
                b' ' | b'\t' | b'\r' => self.read_char(),
                b'\n' => {
                    self.line += 1;
                    self.read_char();
                }
                _ => break,
            }
        }
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

// Identifier continuation accepts `-`, so `x-y` lexes as one identifier, not
// a subtraction. This reproduces the behavior of the source language as-is.
fn is_identifier_continuation(ch: u8) -> bool {
    is_letter(ch) || is_digit(ch) || ch == b'-'
}
