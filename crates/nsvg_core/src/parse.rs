//! Shared nom building blocks for numerals and argument lists

use nom::{
    character::complete::{char, multispace0},
    combinator::{all_consuming, opt, value, verify},
    error::ParseError,
    multi::many0,
    number::complete::double,
    sequence::{preceded, tuple},
    IResult,
};

/// Custom parser result type, generic over the nom error
pub(crate) type ParseResult<'a, O, E> = IResult<&'a str, O, E>;

/// Skip optional whitespace
pub(crate) fn ws<'a, E: ParseError<&'a str>>(input: &'a str) -> ParseResult<'a, (), E> {
    value((), multispace0)(input)
}

/// Argument separator: optional whitespace around at most one comma
///
/// May match nothing, which is how SVG allows `10-5` to mean two numbers.
pub(crate) fn separator<'a, E: ParseError<&'a str>>(input: &'a str) -> ParseResult<'a, (), E> {
    value((), tuple((multispace0, opt(char(',')), multispace0)))(input)
}

/// A finite floating-point numeral
///
/// nom's `double` also recognizes `inf` and `nan`; those are rejected here.
pub(crate) fn number<'a, E: ParseError<&'a str>>(input: &'a str) -> ParseResult<'a, f64, E> {
    verify(double, |v: &f64| v.is_finite())(input)
}

/// Zero or more numbers separated by whitespace and/or commas
pub(crate) fn number_list<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> ParseResult<'a, Vec<f64>, E> {
    let (input, first) = opt(number)(input)?;
    let Some(first) = first else {
        return Ok((input, Vec::new()));
    };
    let (input, rest) = many0(preceded(separator, number))(input)?;

    let mut values = Vec::with_capacity(rest.len() + 1);
    values.push(first);
    values.extend(rest);
    Ok((input, values))
}

/// Parse a complete numeral, rejecting trailing garbage
pub(crate) fn numeral(input: &str) -> Option<f64> {
    all_consuming(number::<nom::error::Error<&str>>)(input)
        .ok()
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeral() {
        assert_eq!(numeral("1.5"), Some(1.5));
        assert_eq!(numeral("-2e3"), Some(-2000.0));
        assert_eq!(numeral("+4"), Some(4.0));
        assert_eq!(numeral("10px"), None);
        assert_eq!(numeral(""), None);
        assert_eq!(numeral("inf"), None);
        assert_eq!(numeral("NaN"), None);
    }

    #[test]
    fn test_number_list_separators() {
        let (rest, values) = number_list::<nom::error::Error<&str>>("1, 2 3,4").unwrap();
        assert_eq!(rest, "");
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);

        let (_, values) = number_list::<nom::error::Error<&str>>("10-5").unwrap();
        assert_eq!(values, vec![10.0, -5.0]);

        let (rest, values) = number_list::<nom::error::Error<&str>>(")").unwrap();
        assert_eq!(rest, ")");
        assert!(values.is_empty());
    }
}
