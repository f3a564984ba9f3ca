//! nom helpers

use nom::character::complete::{alpha1, alphanumeric0, char, digit0, digit1};
use nom::combinator::{all_consuming, opt, recognize};
use nom::error::ParseError;
use nom::sequence::pair;
use nom::IResult;

/// Recognizes an identifier, a run of letters followed by letters or digits
pub fn recognize_identifier<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(alpha1, alphanumeric0))(input)
}

/// Recognizes an unsigned number literal without its `u` suffix, `digits ('.' digits*)?`
pub fn recognize_number<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(digit1, opt(pair(char('.'), digit0))))(input)
}

/// Checks that the whole of `src` is one identifier
pub fn is_identifier(src: &str) -> bool {
    all_consuming(recognize_identifier::<nom::error::Error<&str>>)(src).is_ok()
}

/// Checks that the whole of `src` is one number literal
pub fn is_number(src: &str) -> bool {
    all_consuming(recognize_number::<nom::error::Error<&str>>)(src).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::Finish;

    #[test]
    fn test_one_letter_variable() {
        let (rest, parsed) = recognize_identifier::<nom::error::Error<_>>("i ")
            .finish()
            .unwrap();
        assert_eq!(parsed, "i");
        assert_eq!(rest, " ");
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("count2"));
        assert!(is_identifier("X"));
        assert!(!is_identifier("2count"));
        assert!(!is_identifier("snake_case"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_number_rules() {
        assert!(is_number("3"));
        assert!(is_number("3."));
        assert!(is_number("3.25"));
        assert!(!is_number("3.2.5"));
        assert!(!is_number(".5"));
    }
}
