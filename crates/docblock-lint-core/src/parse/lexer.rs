//! Lexer and token parsers for documentation comment lines.
//!
//! This module contains nom-based parsers for the comment markers, tag
//! headers, and the fields of property declarations.

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, space0},
    combinator::{opt, rest},
};

/// Characters that can appear in a tag name.
fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Characters that can appear in a single field word.
fn is_field_char(c: char) -> bool {
    !c.is_whitespace()
}

/// Checks if a stripped comment line is blank.
pub fn is_blank_line(input: &str) -> bool {
    input.trim().is_empty()
}

/// Parses the opening line of a comment, returning what follows `/**`.
pub fn parse_opener(input: &str) -> IResult<&str, &str> {
    (space0, tag("/**"), rest)
        .map(|(_, _, content)| content)
        .parse(input)
}

/// Parses a continuation line, returning what follows the leading `*`.
///
/// Whitespace after the star is kept; alignment checks depend on it.
pub fn parse_star_prefix(input: &str) -> IResult<&str, &str> {
    (space0, opt(char('*')), rest)
        .map(|(_, _, content)| content)
        .parse(input)
}

/// Parses a tag header (`@name`), returning the name.
///
/// The remaining input is everything after the name, unmodified.
pub fn parse_tag_header(input: &str) -> IResult<&str, &str> {
    (space0, char('@'), take_while1(is_tag_name_char))
        .map(|(_, _, name)| name)
        .parse(input)
}

/// Splits tag content into its first word and the trimmed remainder.
pub fn split_key_value(input: &str) -> (&str, &str) {
    let trimmed = input.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((value, comment)) => (value, comment.trim()),
        None => (trimmed, ""),
    }
}

/// The fields of a property declaration with the exact whitespace runs
/// between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFields<'a> {
    /// Whitespace between the tag name and the type.
    pub whitespace_before_type: &'a str,
    /// The type word (empty when the first word is a variable).
    pub type_name: &'a str,
    /// Whitespace between the type and the variable name.
    pub whitespace_before_var_name: &'a str,
    /// The variable word (empty when missing).
    pub var_name: &'a str,
    /// Whitespace before the comment; may span line breaks.
    pub whitespace_before_comment: &'a str,
    /// The comment text, trailing whitespace removed.
    pub comment: &'a str,
}

/// Parses the fields following a property tag name.
///
/// A first word starting with `$` is taken as the variable name. A second
/// word that does not start with `$` is the start of the comment.
pub fn parse_property_fields(input: &str) -> IResult<&str, PropertyFields<'_>> {
    let (after_ws, ws_type) = multispace0(input)?;
    let (after_first, first) = take_while(is_field_char)(after_ws)?;

    if first.starts_with('$') {
        let (comment, ws_comment) = multispace0(after_first)?;
        return Ok((
            "",
            PropertyFields {
                whitespace_before_type: ws_type,
                var_name: first,
                whitespace_before_comment: ws_comment,
                comment: comment.trim_end(),
                ..Default::default()
            },
        ));
    }

    let (after_ws, ws_var) = multispace0(after_first)?;
    let (after_second, second) = take_while(is_field_char)(after_ws)?;

    if second.starts_with('$') {
        let (comment, ws_comment) = multispace0(after_second)?;
        Ok((
            "",
            PropertyFields {
                whitespace_before_type: ws_type,
                type_name: first,
                whitespace_before_var_name: ws_var,
                var_name: second,
                whitespace_before_comment: ws_comment,
                comment: comment.trim_end(),
            },
        ))
    } else {
        Ok((
            "",
            PropertyFields {
                whitespace_before_type: ws_type,
                type_name: first,
                whitespace_before_comment: ws_var,
                comment: after_ws.trim_end(),
                ..Default::default()
            },
        ))
    }
}
