//! nom recognisers for the pieces of a token

use nom::bytes::complete::{tag, take_till, take_until, take_while, take_while1};
use nom::character::complete::char;
use nom::combinator::opt;
use nom::sequence::preceded;
use nom::IResult;
use std::sync::OnceLock;
use zoop_tokens::token::{TokenKind, BINARY_OPERATORS, KEYWORDS, TYPE_KEYWORDS};

type Result<'a, O> = IResult<&'a str, O>;

/// Characters that make a neighbouring `-` or `~` part of a larger operator expression
pub const OPERATOR_CHARS: [char; 11] = ['~', '-', '_', '+', '*', '/', '&', '|', '<', '>', '='];

/// The identifier after a variable sigil. May be empty or start with a digit, the caller validates
/// it.
pub fn parse_variable_id(src: &str) -> Result<&str> {
    take_while(|c: char| c.is_ascii_alphanumeric())(src)
}

/// A run of digits and dots, and whether it carries the unsigned `u` suffix
pub fn parse_number_run(src: &str) -> Result<(&str, bool)> {
    let (rest, run) = take_while1(|c: char| c.is_ascii_digit() || c == '.')(src)?;
    let (rest, suffix) = opt(char('u'))(rest)?;
    Ok((rest, (run, suffix.is_some())))
}

/// A quoted literal delimited by `quote`, returning the inner text
pub fn parse_quoted(quote: char) -> impl FnMut(&str) -> Result<&str> {
    move |src| {
        let (rest, _) = char(quote)(src)?;
        let (rest, inner) = take_till(|c| c == quote)(rest)?;
        let (rest, _) = char(quote)(rest)?;
        Ok((rest, inner))
    }
}

/// `-- ...` up to, but not including, the end of the line
pub fn parse_line_comment(src: &str) -> Result<&str> {
    preceded(tag("--"), take_till(|c| c == '\n'))(src)
}

/// `--* ... *--`, returning the inner text
pub fn parse_block_comment(src: &str) -> Result<&str> {
    let (rest, inner) = preceded(tag("--*"), take_until("*--"))(src)?;
    let (rest, _) = tag("*--")(rest)?;
    Ok((rest, inner))
}

/// `true` or `false`
pub fn parse_bool(src: &str) -> Result<bool> {
    if let Ok((rest, _)) = tag::<_, _, nom::error::Error<&str>>("true")(src) {
        Ok((rest, true))
    } else {
        let (rest, _) = tag("false")(src)?;
        Ok((rest, false))
    }
}

/// The first data type name that `src` starts with
pub fn parse_type_keyword(src: &str) -> Result<&str> {
    for keyword in TYPE_KEYWORDS {
        if let Ok(ok) = tag::<_, _, nom::error::Error<&str>>(keyword)(src) {
            return Ok(ok);
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        src,
        nom::error::ErrorKind::Tag,
    )))
}

/// The longest operator, punctuation or keyword that `src` starts with
pub fn parse_slice(src: &str) -> Result<(&'static str, TokenKind)> {
    for &(slice, kind) in slices() {
        if let Ok((rest, _)) = tag::<_, _, nom::error::Error<&str>>(slice)(src) {
            return Ok((rest, (slice, kind)));
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        src,
        nom::error::ErrorKind::Tag,
    )))
}

/// Every fixed lexeme, longest first
fn slices() -> &'static [(&'static str, TokenKind)] {
    static SLICES: OnceLock<Vec<(&'static str, TokenKind)>> = OnceLock::new();
    SLICES.get_or_init(|| {
        let mut slices = vec![
            ("{", TokenKind::BlockOpen),
            ("}", TokenKind::BlockClose),
            ("->|", TokenKind::Output),
            ("<-|", TokenKind::Input),
            ("->", TokenKind::FlowOut),
            ("<-", TokenKind::FlowIn),
            ("=>", TokenKind::Direct),
        ];
        slices.extend(
            BINARY_OPERATORS
                .iter()
                .map(|&op| (op, TokenKind::BinaryOperator)),
        );
        slices.extend(
            KEYWORDS
                .iter()
                .chain(TYPE_KEYWORDS.iter())
                .map(|&keyword| (keyword, TokenKind::Keyword)),
        );
        slices.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        slices
    })
}
