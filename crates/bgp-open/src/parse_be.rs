use nom::combinator::complete;
use nom::error::ParseError;
use nom::multi::many0;
use nom::{IResult, Input, Parser};

use crate::{CapCode, OpenParseError};

pub trait ParseBe<T> {
    fn parse_be(input: &[u8]) -> IResult<&[u8], T>;
}

/// Applies the parser zero or more times, treating incomplete input as end-of-input.
pub fn many0_complete<I, O, E, F>(parser: F) -> impl Parser<I, Output = Vec<O>, Error = E>
where
    I: Clone + Input,
    E: ParseError<I>,
    F: Parser<I, Output = O, Error = E>,
{
    many0(complete(parser))
}

/// Parse a capability value which must be consumed exactly.
pub fn parse_value<T: ParseBe<T>>(code: CapCode, input: &[u8]) -> Result<T, OpenParseError> {
    match T::parse_be(input) {
        Ok((rest, value)) if rest.is_empty() => Ok(value),
        _ => Err(OpenParseError::malformed(code, input.len())),
    }
}

/// Parse a capability value made of back-to-back fixed size entries.
pub fn parse_entries<T: ParseBe<T>>(
    code: CapCode,
    input: &[u8],
) -> Result<Vec<T>, OpenParseError> {
    let parsed: IResult<&[u8], Vec<T>> = many0_complete(T::parse_be).parse(input);
    match parsed {
        Ok((rest, values)) if rest.is_empty() => Ok(values),
        _ => Err(OpenParseError::malformed(code, input.len())),
    }
}
