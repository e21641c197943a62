use crate::model::Separator;
use std::fmt::{Display, Formatter};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A lexical unit of the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A maximal run of non-whitespace, non-separator characters, or a quoted span.
    Word(String),
    /// A standalone occurrence of the configured separator.
    Separator(char),
}

impl Token {
    /// The word text, or `None` for a separator token.
    pub fn word(&self) -> Option<&str> {
        match self {
            Token::Word(word) => Some(word.as_str()),
            Token::Separator(_) => None,
        }
    }

    /// Whether this token is a separator.
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Separator(_))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(word) => write!(f, "{word}"),
            Token::Separator(separator) => write!(f, "{separator}"),
        }
    }
}

/// Split a single command line into tokens.
///
/// Whitespace outside quotes delimits words.
/// The separator outside quotes is emitted as its own token.
/// A `"` toggles quoting and is never part of a token, so `"a = b"` becomes the single word `a = b`.
///
/// ```
/// use argbind_builder::{tokenize, Separator, Token};
///
/// assert_eq!(
///     tokenize(r#"--arg = "two words""#, Separator::default()),
///     vec![
///         Token::Word("--arg".to_string()),
///         Token::Separator('='),
///         Token::Word("two words".to_string()),
///     ]
/// );
/// ```
pub fn tokenize(line: &str, separator: Separator) -> Vec<Token> {
    let separator = separator.value();
    let mut tokens = Vec::default();
    let mut current = String::default();
    let mut quoted = false;
    // An empty quoted span (`""`) still produces a word.
    let mut pending = false;

    for c in line.chars() {
        if c == '"' {
            quoted = !quoted;
            pending = true;
        } else if quoted {
            current.push(c);
        } else if c.is_whitespace() {
            flush(&mut tokens, &mut current, &mut pending);
        } else if c == separator {
            flush(&mut tokens, &mut current, &mut pending);
            tokens.push(Token::Separator(c));
        } else {
            current.push(c);
            pending = true;
        }
    }

    flush(&mut tokens, &mut current, &mut pending);

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Tokenized line into {} tokens: {tokens:?}.", tokens.len());
    }

    tokens
}

fn flush(tokens: &mut Vec<Token>, current: &mut String, pending: &mut bool) {
    if *pending {
        tokens.push(Token::Word(std::mem::take(current)));
        *pending = false;
    }
}

/// Tokenize an already split argument vector (ex: `std::env::args().skip(1)`).
///
/// The shell has done the quoting, so each element becomes one word, except that an element containing the separator is split at its first occurrence.
/// The value part is dropped when empty, which leaves `--name=` for the engine to treat as an explicitly empty value.
///
/// ```
/// use argbind_builder::{tokenize_args, Separator, Token};
///
/// assert_eq!(
///     tokenize_args(&["--arg=a=b", "x y"], Separator::default()),
///     vec![
///         Token::Word("--arg".to_string()),
///         Token::Separator('='),
///         Token::Word("a=b".to_string()),
///         Token::Word("x y".to_string()),
///     ]
/// );
/// ```
pub fn tokenize_args<S: AsRef<str>>(args: &[S], separator: Separator) -> Vec<Token> {
    let separator = separator.value();
    let mut tokens = Vec::with_capacity(args.len());

    for argument in args {
        let argument = argument.as_ref();

        match argument.split_once(separator) {
            Some((key, value)) => {
                if !key.is_empty() {
                    tokens.push(Token::Word(key.to_string()));
                }

                tokens.push(Token::Separator(separator));

                if !value.is_empty() {
                    tokens.push(Token::Word(value.to_string()));
                }
            }
            None => tokens.push(Token::Word(argument.to_string())),
        }
    }

    tokens
}
