use crate::error::{CalcError, Span};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,

    // Literals
    Integer,

    // Special
    End,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Star => "MULTIPLY",
            TokenType::Slash => "DIVIDE",
            TokenType::LeftParen => "LPAREN",
            TokenType::RightParen => "RPAREN",
            TokenType::Integer => "INTEGER",
            TokenType::End => "EOF",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    /// Only present for `Integer` tokens.
    pub value: Option<i64>,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            value: None,
            span,
        }
    }

    pub fn integer(value: i64, lexeme: String, span: Span) -> Self {
        Self {
            token_type: TokenType::Integer,
            lexeme,
            value: Some(value),
            span,
        }
    }

    /// How the token reads in a diagnostic, e.g. `'+'` or `end of input`.
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::End => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.token_type {
            TokenType::End => write!(f, "Token({}, None)", self.token_type),
            _ => write!(f, "Token({}, {})", self.token_type, self.lexeme),
        }
    }
}

/// Hook invoked with every token the scanner produces.
pub type TokenObserver<'a> = Box<dyn FnMut(&Token) + 'a>;

/// Pull-based scanner: produces one token per `next_token` call.
pub struct Scanner<'a> {
    source: Vec<char>,
    start: usize,
    current: usize,
    observer: Option<TokenObserver<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            observer: None,
        }
    }

    pub fn with_observer(source: &str, observer: impl FnMut(&Token) + 'a) -> Self {
        let mut scanner = Self::new(source);
        scanner.observer = Some(Box::new(observer));
        scanner
    }

    /// Returns the next token and advances past it. Once the input is
    /// exhausted every further call yields `End`.
    pub fn next_token(&mut self) -> Result<Token, CalcError> {
        let token = self.scan_token()?;
        if let Some(observer) = self.observer.as_mut() {
            observer(&token);
        }
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, CalcError> {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return Ok(Token::new(
                TokenType::End,
                String::new(),
                Span::new(self.current, self.current),
            ));
        }

        let c = self.advance();
        match c {
            '+' => Ok(self.make_token(TokenType::Plus)),
            '-' => Ok(self.make_token(TokenType::Minus)),
            '*' => Ok(self.make_token(TokenType::Star)),
            '/' => Ok(self.make_token(TokenType::Slash)),
            '(' => Ok(self.make_token(TokenType::LeftParen)),
            ')' => Ok(self.make_token(TokenType::RightParen)),
            c if c.is_ascii_digit() => self.integer(),
            _ => Err(CalcError::invalid_character(self.start, c)
                .with_help("Only digits, whitespace and the characters + - * / ( ) are allowed.")),
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn integer(&mut self) -> Result<Token, CalcError> {
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }

        let lexeme = self.lexeme();
        let span = Span::new(self.start, self.current);
        match lexeme.parse::<i64>() {
            Ok(value) => Ok(Token::integer(value, lexeme, span)),
            Err(_) => Err(CalcError::integer_overflow(
                span,
                format!("literal {} does not fit in a 64-bit integer", lexeme),
            )
            .with_help(format!("The largest supported literal is {}.", i64::MAX))),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        self.source[self.current]
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token::new(token_type, self.lexeme(), Span::new(self.start, self.current))
    }
}
