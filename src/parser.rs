use crate::ast::{BinaryOp, Expr};
use crate::error::CalcError;
use crate::lexer::{Scanner, Token, TokenType};

/// Limit on both parenthesis nesting and tree height. Parsing, evaluation
/// and rendering recurse once per level.
pub const MAX_DEPTH: usize = 256;

/// Recursive-descent parser over a single token of lookahead.
///
/// ```text
/// expr   := term ( (PLUS | MINUS) term )*
/// term   := factor ( (STAR | SLASH) factor )*
/// factor := INTEGER | LPAREN expr RPAREN
/// ```
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token,
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Primes the lookahead with the first token of the input.
    pub fn new(mut scanner: Scanner<'a>) -> Result<Self, CalcError> {
        let current = scanner.next_token()?;
        Ok(Self {
            scanner,
            current,
            nesting: 0,
        })
    }

    /// Parses a complete expression. Anything left over after it is an error.
    pub fn parse(mut self) -> Result<Expr, CalcError> {
        let expr = self.expression()?;
        if !self.check(TokenType::End) {
            return Err(CalcError::invalid_syntax(
                self.current.span,
                "an operator or end of input",
                self.current.describe(),
            )
            .with_help("Two operands must be joined by one of + - * /, and every ')' needs a matching '('."));
        }
        Ok(expr)
    }

    /// `expr := term ( (PLUS | MINUS) term )*`
    pub fn expression(&mut self) -> Result<Expr, CalcError> {
        self.sum().map(|(expr, _)| expr)
    }

    // Each rule returns the tree together with its height so that
    // over-deep input is rejected before anything recurses over it.

    fn sum(&mut self) -> Result<(Expr, usize), CalcError> {
        let (mut expr, mut height) = self.term()?;

        while let Some(operator_token) = self.match_types(&[TokenType::Plus, TokenType::Minus])? {
            let operator = match operator_token.token_type {
                TokenType::Plus => BinaryOp::Add,
                _ => BinaryOp::Subtract,
            };
            let (right, right_height) = self.term()?;
            height = self.grow(height.max(right_height))?;
            expr = Expr::binary(operator, expr, right);
        }

        Ok((expr, height))
    }

    /// `term := factor ( (STAR | SLASH) factor )*`
    fn term(&mut self) -> Result<(Expr, usize), CalcError> {
        let (mut expr, mut height) = self.factor()?;

        while let Some(operator_token) = self.match_types(&[TokenType::Star, TokenType::Slash])? {
            let operator = match operator_token.token_type {
                TokenType::Star => BinaryOp::Multiply,
                _ => BinaryOp::Divide,
            };
            let (right, right_height) = self.factor()?;
            height = self.grow(height.max(right_height))?;
            expr = Expr::binary(operator, expr, right);
        }

        Ok((expr, height))
    }

    /// `factor := INTEGER | LPAREN expr RPAREN`
    fn factor(&mut self) -> Result<(Expr, usize), CalcError> {
        match self.current.token_type {
            TokenType::Integer => {
                let token = self.advance()?;
                // Integer tokens always carry their value
                Ok((Expr::Literal(token.value.unwrap_or_default()), 0))
            }
            TokenType::LeftParen => {
                self.nesting += 1;
                if self.nesting > MAX_DEPTH {
                    return Err(self.too_deep());
                }
                self.advance()?;
                let inner = self.sum()?;
                self.consume(TokenType::RightParen, "')'")
                    .map_err(|error| error.with_help("Every '(' must be closed with a matching ')'."))?;
                self.nesting -= 1;
                Ok(inner)
            }
            _ => Err(CalcError::invalid_syntax(
                self.current.span,
                "an integer or '('",
                self.current.describe(),
            )
            .with_help("Each operand must be a non-negative integer or a parenthesised expression.")),
        }
    }

    /// Height of a new operator node whose tallest child is `child_height`.
    fn grow(&self, child_height: usize) -> Result<usize, CalcError> {
        let height = child_height + 1;
        if height > MAX_DEPTH {
            Err(self.too_deep())
        } else {
            Ok(height)
        }
    }

    fn too_deep(&self) -> CalcError {
        CalcError::invalid_syntax(
            self.current.span,
            format!("at most {} levels of nesting", MAX_DEPTH),
            "expression nested too deeply",
        )
        .with_help("Split the calculation into smaller expressions.")
    }

    fn match_types(&mut self, types: &[TokenType]) -> Result<Option<Token>, CalcError> {
        if types.iter().any(|token_type| self.check(*token_type)) {
            Ok(Some(self.advance()?))
        } else {
            Ok(None)
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type == token_type
    }

    /// Replaces the lookahead with the next scanned token, returning the old one.
    fn advance(&mut self) -> Result<Token, CalcError> {
        let next = self.scanner.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Eats the lookahead if it has the expected type.
    fn consume(&mut self, token_type: TokenType, expected: &str) -> Result<Token, CalcError> {
        if self.check(token_type) {
            self.advance()
        } else {
            Err(CalcError::invalid_syntax(
                self.current.span,
                expected,
                self.current.describe(),
            ))
        }
    }
}
