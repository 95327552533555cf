/// Parser for human-written vector literals such as `1 2 3`, `1, 2, 3` or
/// `(1.0, 2.0, 3.0)`
use std::str::FromStr;

use nom::{
    branch::alt,
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, cond, opt, value},
    number::complete::float,
    sequence::{delimited, tuple},
    IResult,
};

use crate::error::ParseVectorError;
use crate::vector3::Vector3;

/// A comma with optional whitespace around it, or plain whitespace.
fn separator(input: &str) -> IResult<&str, ()> {
    let (input, _) = alt((
        delimited(multispace0, char(','), multispace0),
        value(' ', multispace1),
    ))(input)?;
    Ok((input, ()))
}

fn components(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, (x, _, y, _, z)) = tuple((float, separator, float, separator, float))(input)?;
    Ok((input, (x, y, z)))
}

fn vector3(input: &str) -> IResult<&str, Vector3> {
    let (input, _) = multispace0(input)?;
    let (input, open) = opt(char('('))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, (x, y, z)) = components(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = cond(open.is_some(), char(')'))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

/// Parse a whole string as a vector literal.
pub fn parse_vector3(input: &str) -> Result<Vector3, ParseVectorError> {
    all_consuming(vector3)(input)
        .map(|(_, v)| v)
        .map_err(|_| ParseVectorError::new(input))
}

impl FromStr for Vector3 {
    type Err = ParseVectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_vector3(s)
    }
}
