//! Parse a token stream into a flat, loop-unrolled command list
//!
//! Recursive descent: each loop body is parsed by a nested call that knows it
//! is inside a loop, returns at its closing `]`, and is then copied into the
//! caller's output once per repetition.

use miette::SourceSpan;

use crate::ast::{ColorCode, Command, Keyword};
use crate::defaults;
use crate::errors::ParseError;
use crate::lexer::{Token, TokenKind, TokenStream};

/// Parser limits that protect against pathological programs
///
/// Every valid program shallower than `max_depth` whose unrolled form fits
/// in `max_commands` parses. Anything bigger is rejected with an error rather
/// than exhausting the stack or memory; raise the limits to accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest loop nesting accepted
    pub max_depth: usize,
    /// Longest unrolled command list any block may produce. The default
    /// holds about 80 MB of commands.
    pub max_commands: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: defaults::MAX_LOOP_DEPTH,
            max_commands: defaults::MAX_COMMANDS,
        }
    }
}

/// Where the block being parsed lives
#[derive(Debug, Clone, Copy)]
enum Scope {
    TopLevel,
    Loop {
        /// The `[` that opened this body
        open: SourceSpan,
        depth: usize,
    },
}

impl Scope {
    fn depth(self) -> usize {
        match self {
            Scope::TopLevel => 0,
            Scope::Loop { depth, .. } => depth,
        }
    }
}

/// Parse tokens with the default limits
pub fn parse(tokens: &TokenStream<'_>) -> Result<Vec<Command>, ParseError> {
    parse_with(tokens, &ParseOptions::default())
}

pub fn parse_with(
    tokens: &TokenStream<'_>,
    options: &ParseOptions,
) -> Result<Vec<Command>, ParseError> {
    let mut parser = Parser {
        tokens: tokens.tokens(),
        pos: 0,
        eof: tokens.eof_span(),
        options,
    };
    parser.parse_block(Scope::TopLevel)
}

struct Parser<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
    eof: SourceSpan,
    options: &'a ParseOptions,
}

impl<'src> Parser<'_, 'src> {
    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'src>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn parse_block(&mut self, scope: Scope) -> Result<Vec<Command>, ParseError> {
        let mut commands = Vec::new();

        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::Word => {
                    let keyword = token.text.parse::<Keyword>().map_err(|()| {
                        ParseError::UnknownCommand {
                            word: token.text.to_string(),
                            span: token.span,
                        }
                    })?;
                    self.parse_command(keyword, token, scope, &mut commands)?;
                }
                TokenKind::RBracket => {
                    return match scope {
                        Scope::Loop { .. } => Ok(commands),
                        Scope::TopLevel => Err(ParseError::UnmatchedCloseBracket { span: token.span }),
                    };
                }
                // A number or `[` where a command should start
                TokenKind::Number | TokenKind::LBracket => {
                    return Err(ParseError::UnknownCommand {
                        word: token.text.to_string(),
                        span: token.span,
                    });
                }
            }
        }

        match scope {
            Scope::TopLevel => Ok(commands),
            Scope::Loop { open, .. } => Err(ParseError::UnterminatedLoop { span: open }),
        }
    }

    fn parse_command(
        &mut self,
        keyword: Keyword,
        token: Token<'src>,
        scope: Scope,
        out: &mut Vec<Command>,
    ) -> Result<(), ParseError> {
        let command = match keyword {
            Keyword::Forward => Command::Move(self.number(keyword)?),
            Keyword::Rotate => Command::Rotate(self.number(keyword)?),
            Keyword::Pen => Command::SetPenWidth(self.number(keyword)?),
            Keyword::Color => Command::SetColor(self.color_code()?.rgb()),
            Keyword::Loop => return self.parse_loop(token, scope, out),
        };
        push_within_limit(out, command, self.options.max_commands, token.span)
    }

    /// `L <count> [ body ]`; `token` is the `L`
    fn parse_loop(
        &mut self,
        token: Token<'src>,
        scope: Scope,
        out: &mut Vec<Command>,
    ) -> Result<(), ParseError> {
        let count = self.number(Keyword::Loop)?;

        let open = match self.bump() {
            Some(t) if t.kind == TokenKind::LBracket => t.span,
            Some(t) => return Err(ParseError::ExpectedOpenBracket { span: t.span }),
            None => return Err(ParseError::ExpectedOpenBracket { span: self.eof }),
        };

        let depth = scope.depth() + 1;
        if depth > self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                span: open,
            });
        }

        let body = self.parse_block(Scope::Loop { open, depth })?;
        crate::log::debug!(count, depth, body_len = body.len(), "unrolling loop");
        unroll(out, &body, count, self.options.max_commands, token.span)
    }

    fn number(&mut self, command: Keyword) -> Result<i32, ParseError> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Number => {
                self.pos += 1;
                t.text.parse::<i32>().map_err(|_| ParseError::NumberOutOfRange {
                    literal: t.text.to_string(),
                    span: t.span,
                })
            }
            Some(t) => Err(ParseError::MissingOperand {
                command,
                span: t.span,
            }),
            None => Err(ParseError::MissingOperand {
                command,
                span: self.eof,
            }),
        }
    }

    /// Whatever token follows `COLOR` is taken as its code
    fn color_code(&mut self) -> Result<ColorCode, ParseError> {
        let Some(t) = self.bump() else {
            return Err(ParseError::MissingOperand {
                command: Keyword::Color,
                span: self.eof,
            });
        };
        t.text
            .parse::<ColorCode>()
            .map_err(|()| ParseError::InvalidColorCode {
                code: t.text.to_string(),
                span: t.span,
            })
    }
}

fn push_within_limit(
    out: &mut Vec<Command>,
    command: Command,
    limit: usize,
    span: SourceSpan,
) -> Result<(), ParseError> {
    if out.len() >= limit {
        return Err(ParseError::ProgramTooLarge { limit, span });
    }
    out.push(command);
    Ok(())
}

/// Append `body` to `out` `count` times. Zero or negative counts append nothing.
fn unroll(
    out: &mut Vec<Command>,
    body: &[Command],
    count: i32,
    limit: usize,
    span: SourceSpan,
) -> Result<(), ParseError> {
    let reps = usize::try_from(count).unwrap_or(0);
    let total = body
        .len()
        .checked_mul(reps)
        .and_then(|n| n.checked_add(out.len()));
    match total {
        Some(total) if total <= limit => {}
        _ => return Err(ParseError::ProgramTooLarge { limit, span }),
    }

    out.reserve(body.len() * reps);
    for _ in 0..reps {
        out.extend_from_slice(body);
    }
    Ok(())
}
