//! Block-level parser for documentation comments.
//!
//! This module combines the lexer components to split one raw comment
//! into its description sections and tag occurrences, shaping each tag's
//! content according to the registry.

use super::ast::{ParsedComment, PropertyElement, TagElement, TagOccurrence, UnknownTag};
use super::error::ParseError;
use super::lexer::{
    is_blank_line, parse_opener, parse_property_fields, parse_star_prefix, parse_tag_header,
    split_key_value,
};
use super::registry::{ElementShape, TagRegistry};
use log::{debug, trace};

/// A tag header line and the continuation lines that follow it.
struct RawTag<'a> {
    name: &'a str,
    line: usize,
    rest: &'a str,
    continuation: Vec<&'a str>,
    blank_before: usize,
}

impl RawTag<'_> {
    /// Header and continuation lines, each trimmed, joined with `eol`.
    fn joined_text(&self, eol: &str) -> String {
        std::iter::once(self.rest)
            .chain(self.continuation.iter().copied())
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(eol)
            .trim()
            .to_string()
    }

    /// Header and continuation lines with whitespace preserved, trailing
    /// blank lines dropped.
    fn raw_text(&self, eol: &str) -> String {
        let used = self
            .continuation
            .iter()
            .rposition(|line| !is_blank_line(line))
            .map_or(0, |i| i + 1);
        let mut text = self.rest.to_string();
        for line in &self.continuation[..used] {
            text.push_str(eol);
            text.push_str(line);
        }
        text
    }
}

/// Removes the comment markers from every line of `raw`.
///
/// The returned lines keep the whitespace that followed the `*` so that
/// column alignment can be measured; trailing whitespace is removed.
fn strip_markers(raw: &str, eol: &str) -> Vec<String> {
    let raw_lines: Vec<&str> = raw.split(eol).collect();
    let last = raw_lines.len().saturating_sub(1);

    raw_lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut text: &str = line;
            if i == last {
                text = text.trim_end();
                text = text.strip_suffix("*/").unwrap_or(text);
            }
            let text = if i == 0 {
                parse_opener(text).map(|(_, content)| content).unwrap_or(text)
            } else {
                parse_star_prefix(text)
                    .map(|(_, content)| content)
                    .unwrap_or(text)
            };
            text.trim_end().to_string()
        })
        .collect()
}

/// Returns the `[first, end)` range of content lines.
fn content_bounds(lines: &[String]) -> (usize, usize) {
    let first = match lines.first() {
        Some(line) if is_blank_line(line) => 1,
        _ => 0,
    };
    let mut end = lines.len();
    if end > first && lines.len() > 1 && is_blank_line(&lines[end - 1]) {
        end -= 1;
    }
    (first, end.max(first))
}

/// Fills the description fields of `comment` from `lines[first..tag_start]`.
fn parse_description(
    lines: &[String],
    first: usize,
    tag_start: usize,
    eol: &str,
    comment: &mut ParsedComment,
) {
    let body = &lines[first..tag_start];
    let leading = body.iter().take_while(|l| is_blank_line(l)).count();

    let Some(last_text) = body.iter().rposition(|l| !is_blank_line(l)) else {
        // No description text; only blank lines before the tags.
        comment.newline_after = body.len() + 1;
        return;
    };
    let last_text = first + last_text;

    let short_start = first + leading;
    let short_end = (short_start..tag_start)
        .find(|&i| is_blank_line(&lines[i]))
        .unwrap_or(tag_start);

    comment.newlines_before_short = leading;
    comment.short = lines[short_start..short_end]
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join(eol);
    comment.short_end_line = short_end - 1;

    let gap = (short_end..tag_start)
        .take_while(|&i| is_blank_line(&lines[i]))
        .count();
    let long_start = short_end + gap;
    if long_start <= last_text {
        comment.long = lines[long_start..=last_text]
            .iter()
            .map(|l| l.strip_prefix(' ').unwrap_or(l))
            .collect::<Vec<_>>()
            .join(eol);
        comment.whitespace_between = eol.repeat(gap + 1);
    }

    comment.newline_after = tag_start - last_text;
}

/// Groups tag lines into raw occurrences.
fn collect_tags(lines: &[String], first: usize, tag_start: usize, end: usize) -> Vec<RawTag<'_>> {
    let mut tags: Vec<RawTag<'_>> = Vec::new();

    for (i, line) in lines.iter().enumerate().take(end).skip(tag_start) {
        match parse_tag_header(line) {
            Ok((rest, name)) => {
                let blank_before = lines[first..i]
                    .iter()
                    .rev()
                    .take_while(|l| is_blank_line(l))
                    .count();
                tags.push(RawTag {
                    name,
                    line: i,
                    rest,
                    continuation: Vec::new(),
                    blank_before,
                });
            }
            Err(_) => {
                if let Some(current) = tags.last_mut() {
                    current.continuation.push(line);
                }
            }
        }
    }

    tags
}

/// Shapes a property-style tag.
fn parse_property(
    tag: &RawTag<'_>,
    position: usize,
    eol: &str,
) -> Result<PropertyElement, ParseError> {
    if tag.rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
        return Err(ParseError::missing_field_separator(tag.line, tag.name, "type"));
    }

    let text = tag.raw_text(eol);
    let fields = parse_property_fields(&text)
        .map(|(_, fields)| fields)
        .unwrap_or_default();

    if fields.type_name.contains('$') {
        return Err(ParseError::missing_field_separator(
            tag.line,
            tag.name,
            "variable name",
        ));
    }

    Ok(PropertyElement {
        tag: tag.name.to_string(),
        type_name: fields.type_name.to_string(),
        var_name: fields.var_name.to_string(),
        comment: fields.comment.to_string(),
        whitespace_before_type: fields.whitespace_before_type.to_string(),
        whitespace_before_var_name: fields.whitespace_before_var_name.to_string(),
        whitespace_before_comment: fields.whitespace_before_comment.to_string(),
        whitespace_before: eol.repeat(tag.blank_before + 1),
        position,
        line: tag.line,
    })
}

/// Parses the raw text of one documentation comment.
///
/// `eol` is the exact line separator of the source; every line-break count
/// in the result is expressed in it. Tags unknown to `registry` are
/// collected, not rejected.
pub fn parse_comment(
    raw: &str,
    registry: &TagRegistry,
    eol: &str,
) -> Result<ParsedComment, ParseError> {
    let lines = strip_markers(raw, eol);
    let (first, end) = content_bounds(&lines);
    let tag_start = (first..end)
        .find(|&i| parse_tag_header(&lines[i]).is_ok())
        .unwrap_or(end);

    trace!(
        "Comment has {} lines, content {}..{}, tags from {}",
        lines.len(),
        first,
        end,
        tag_start
    );

    let mut comment = ParsedComment::default();
    parse_description(&lines, first, tag_start, eol, &mut comment);

    if tag_start < end {
        comment.first_tag_line = Some(tag_start);
    }

    let mut property_position = 0;
    for raw_tag in collect_tags(&lines, first, tag_start, end) {
        comment.order.push(raw_tag.name);

        let Some(grammar) = registry.get(raw_tag.name) else {
            trace!("Unknown tag @{} at line {}", raw_tag.name, raw_tag.line);
            comment.unknown.push(UnknownTag {
                name: raw_tag.name.to_string(),
                line: raw_tag.line,
            });
            continue;
        };

        let element = match grammar.shape {
            ElementShape::Leaf => {
                if !raw_tag.joined_text(eol).is_empty() {
                    return Err(ParseError::unexpected_content(raw_tag.line, raw_tag.name));
                }
                TagElement::Leaf
            }
            ElementShape::Single => TagElement::Single {
                content: raw_tag.joined_text(eol),
            },
            ElementShape::KeyValue => {
                let content = raw_tag.joined_text(eol);
                let (value, comment) = split_key_value(&content);
                TagElement::KeyValue {
                    value: value.to_string(),
                    comment: comment.to_string(),
                }
            }
            ElementShape::Property => {
                property_position += 1;
                TagElement::Property(parse_property(&raw_tag, property_position, eol)?)
            }
        };

        trace!("Parsed @{} at line {}", raw_tag.name, raw_tag.line);
        comment.tags.push(TagOccurrence {
            name: raw_tag.name.to_string(),
            container: grammar.container.clone(),
            line: raw_tag.line,
            whitespace_before: eol.repeat(raw_tag.blank_before + 1),
            element,
        });
    }

    debug!(
        "Parsed comment: {} tags, {} unknown",
        comment.tags.len(),
        comment.unknown.len()
    );
    Ok(comment)
}
