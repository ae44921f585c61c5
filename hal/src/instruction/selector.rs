//! Parser for member selectors
//!
//! A selector names one member of the registered type. It may be written as a bare
//! member name or as a closure that does nothing but read that member:
//! - `Name`
//! - `x => x.Name`
//! - `|x| x.name`
//! - `|x: &Widget| x.name`
//! - `x => (object)x.Name`, `|x| x.count as u64`, `x => (x.Name)`
//!
//! Anything else (a call, a chain of member accesses, a different variable) is
//! rejected, because the member name is all the transformation needs.

use std::fmt;

use error_stack::Report;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{opt, recognize, verify};
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::{IResult, Parser};

use crate::error::{Error, Result};

/// Validated native name of a member of a registered type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberName(String);

impl MemberName {
    /// Parse a selector into the member name it reads
    pub fn parse(selector: &str) -> Result<Self> {
        match full_selector(selector) {
            Ok((rest, name)) => {
                let rest = rest.trim();
                if rest.is_empty() {
                    Ok(Self(name.to_string()))
                } else {
                    Err(Report::new(Error::malformed_selector(
                        selector,
                        rejection(rest),
                    )))
                }
            }
            Err(error) => Err(Report::new(Error::malformed_selector(
                selector,
                format!("expected a direct member access on the selector parameter ({error})"),
            ))),
        }
    }

    /// The member name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn rejection(rest: &str) -> String {
    if rest.starts_with('.') {
        format!("multi-hop member access '{rest}' is not supported")
    } else if rest.starts_with('(') {
        "computed expressions are not supported".to_string()
    } else {
        format!("unexpected trailing input '{rest}'")
    }
}

/// Parse an identifier (alphanumeric + underscore, not starting with digit)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

/// Parse a type as written in a cast or parameter annotation
fn type_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| {
        c.is_alphanumeric()
            || matches!(
                c,
                '_' | ':' | '<' | '>' | '&' | ',' | '\'' | '[' | ']' | ' '
            )
    })
    .parse(input)
}

/// `x =>` or `(x) =>`
fn arrow_parameter(input: &str) -> IResult<&str, &str> {
    terminated(
        alt((
            identifier,
            delimited(
                (char('('), multispace0),
                identifier,
                (multispace0, char(')')),
            ),
        )),
        (multispace0, tag("=>")),
    )
    .parse(input)
}

/// `|x|` or `|x: &Type|`
fn closure_parameter(input: &str) -> IResult<&str, &str> {
    delimited(
        (char('|'), multispace0),
        terminated(
            identifier,
            opt(preceded((multispace0, char(':')), type_name)),
        ),
        (multispace0, char('|')),
    )
    .parse(input)
}

/// `parameter.member`
fn direct_access<'a>(input: &'a str, parameter: &str) -> IResult<&'a str, &'a str> {
    preceded(
        (verify(identifier, |name: &str| name == parameter), char('.')),
        identifier,
    )
    .parse(input)
}

/// `(Type)access`
fn prefix_conversion<'a>(input: &'a str, parameter: &str) -> IResult<&'a str, &'a str> {
    let (input, _) = delimited(char('('), type_name, char(')')).parse(input)?;
    member_access(input, parameter)
}

/// `(access)`
fn grouped<'a>(input: &'a str, parameter: &str) -> IResult<&'a str, &'a str> {
    let (input, _) = char('(').parse(input)?;
    let (input, member) = converted_access(input, parameter)?;
    let (input, _) = preceded(multispace0, char(')')).parse(input)?;
    Ok((input, member))
}

fn member_access<'a>(input: &'a str, parameter: &str) -> IResult<&'a str, &'a str> {
    let (input, _) = multispace0(input)?;
    alt((
        |i: &'a str| prefix_conversion(i, parameter),
        |i: &'a str| grouped(i, parameter),
        |i: &'a str| direct_access(i, parameter),
    ))
    .parse(input)
}

/// A member access optionally followed by `as Type`
fn converted_access<'a>(input: &'a str, parameter: &str) -> IResult<&'a str, &'a str> {
    let (input, member) = member_access(input, parameter)?;
    let (input, _) = opt(preceded((multispace1, tag("as"), multispace1), type_name)).parse(input)?;
    Ok((input, member))
}

fn full_selector(input: &str) -> IResult<&str, &str> {
    let (rest, parameter) = opt(preceded(
        multispace0,
        alt((closure_parameter, arrow_parameter)),
    ))
    .parse(input)?;

    match parameter {
        Some(parameter) => converted_access(rest, parameter),
        None => preceded(multispace0, identifier).parse(rest),
    }
}
