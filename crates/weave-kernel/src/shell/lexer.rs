//! Command-line lexer.
//!
//! Splits a line into words using logos, then joins adjacent pieces and
//! expands variables.
//!
//! - Whitespace separates words; quotes suppress splitting and are stripped
//! - `'single'` quotes are literal
//! - `"double"` quotes and bare text expand `$NAME` and `${NAME}`; a
//!   backslash escapes the next character
//! - `>` and `>>` redirect output to the following word
//! - Pieces with no whitespace between them form one word: `a"b c"'d'`

use std::collections::BTreeMap;
use std::fmt;

use logos::{Logos, Span};

/// Lexer errors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    UnexpectedCharacter,
    UnterminatedQuote,
    /// A redirection operator with no target word.
    MissingRedirectTarget,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter => write!(f, "unexpected character"),
            LexError::UnterminatedQuote => write!(f, "unexpected end of input: unterminated quote"),
            LexError::MissingRedirectTarget => {
                write!(f, "syntax error near unexpected token `newline'")
            }
        }
    }
}

impl std::error::Error for LexError {}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[token(">>")]
    Append,

    #[token(">")]
    Overwrite,

    #[regex(r#""([^"\\]|\\.)*""#, strip_quotes)]
    DoubleQuoted(String),

    #[regex(r"'[^']*'", strip_quotes)]
    SingleQuoted(String),

    #[regex(r#"([^\s'">\\]|\\.)+"#, |lex| lex.slice().to_string())]
    Bare(String),

    /// An opening quote with no partner.
    #[regex(r#"["']"#)]
    StrayQuote,
}

fn strip_quotes(lex: &mut logos::Lexer<Token>) -> String {
    let s = lex.slice();
    s[1..s.len() - 1].to_string()
}

/// Target of an output redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub append: bool,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    /// Command name followed by its arguments.
    pub words: Vec<String>,
    /// The last redirection on the line, if any.
    pub redirect: Option<Redirect>,
}

enum Piece {
    Word(String),
    Redirect { append: bool },
}

/// Split and expand a command line.
pub fn parse_line(line: &str, env: &BTreeMap<String, String>) -> Result<CommandLine, LexError> {
    let mut pieces: Vec<(Piece, Span)> = Vec::new();

    for (result, span) in Token::lexer(line).spanned() {
        let token = result.map_err(|e| {
            if line[span.clone()].starts_with(['"', '\'']) {
                LexError::UnterminatedQuote
            } else {
                e
            }
        })?;
        let piece = match token {
            Token::Append => Piece::Redirect { append: true },
            Token::Overwrite => Piece::Redirect { append: false },
            Token::SingleQuoted(s) => Piece::Word(s),
            Token::DoubleQuoted(s) | Token::Bare(s) => Piece::Word(expand(&s, env)),
            Token::StrayQuote => return Err(LexError::UnterminatedQuote),
        };

        // Join with the previous word when nothing separates them
        if let Piece::Word(text) = &piece
            && let Some((Piece::Word(prev), prev_span)) = pieces.last_mut()
            && prev_span.end == span.start
        {
            prev.push_str(text);
            prev_span.end = span.end;
            continue;
        }
        pieces.push((piece, span));
    }

    let mut command = CommandLine::default();
    let mut iter = pieces.into_iter();
    while let Some((piece, _)) = iter.next() {
        match piece {
            Piece::Word(word) => command.words.push(word),
            Piece::Redirect { append } => match iter.next() {
                Some((Piece::Word(target), _)) => {
                    command.redirect = Some(Redirect { target, append });
                }
                _ => return Err(LexError::MissingRedirectTarget),
            },
        }
    }
    Ok(command)
}

/// Expand `$NAME`/`${NAME}` and process backslash escapes. Unset
/// variables expand to nothing.
pub fn expand(text: &str, env: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            },
            '$' => {
                let name = if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        out.push_str("${");
                        out.push_str(&name);
                        continue;
                    }
                    name
                } else {
                    let mut name = String::new();
                    while let Some(&c) = chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '_' {
                            name.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    name
                };

                if name.is_empty() {
                    out.push('$');
                } else if let Some(value) = env.get(&name) {
                    out.push_str(value);
                }
            }
            c => out.push(c),
        }
    }
    out
}
