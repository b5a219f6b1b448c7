//! Column alignment of `@property` declarations.
//!
//! A property comment is written either inline (after the variable name)
//! or on its own indented line below the declaration. Inline declarations
//! must line up in columns with their neighbours; own-line comments must
//! start under the type. All running state lives in this function's
//! locals, one pass per block.

use super::error::{DiagnosticSink, DocIssue};
use super::scope::BlockScope;
use crate::parse::PropertyElement;
use log::trace;

/// Checks the property declarations of one class comment, in source order.
pub fn check_properties(
    properties: &[&PropertyElement],
    scope: &BlockScope<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    let Some(first) = properties.first() else {
        return;
    };

    if scope.count_eols(&first.whitespace_before) != 2 {
        sink.report(DocIssue::PropertyNotSeparated {
            position: scope.at(first.line),
        });
    }

    // (minimum space count, position of the first property with it)
    let mut space_before_var: Option<(usize, usize)> = None;
    let mut space_before_comment: Option<(usize, usize)> = None;
    let mut indent_style: Option<bool> = None;
    let mut indent_mix_position: Option<usize> = None;
    let mut previous: Option<(&PropertyElement, bool)> = None;
    let mut own_line = false;

    for property in properties {
        let position = scope.at(property.line);
        let comment = property.comment.trim();

        let spaces = property.whitespace_before_var_name.matches(' ').count();
        if space_before_var.is_none_or(|(min, _)| spaces < min) {
            space_before_var = Some((spaces, position));
        }

        let ws = property.whitespace_before_comment.as_str();
        let indentation = match ws.rfind(scope.eol) {
            Some(idx) => {
                own_line = true;
                &ws[idx + scope.eol.len()..]
            }
            None => {
                own_line = false;
                ws
            }
        };

        match indent_style {
            None => indent_style = Some(own_line),
            Some(style) if style != own_line && indent_mix_position.is_none() => {
                indent_mix_position = Some(position);
            }
            _ => {}
        }

        let spaces = indentation.matches(' ').count();
        if !comment.is_empty() && space_before_comment.is_none_or(|(min, _)| spaces < min) {
            space_before_comment = Some((spaces, position));
        }

        let index = property.position;
        let name = if property.var_name.is_empty() {
            "[ UNKNOWN ]"
        } else {
            property.var_name.as_str()
        };

        if let Some((prev, false)) = previous {
            if !own_line {
                let column = property.type_column();
                let previous_column = prev.type_column();
                if column != previous_column {
                    sink.report(DocIssue::PropertyTypesNotAligned {
                        type_name: property.type_name.clone(),
                        column,
                        previous_type: prev.type_name.clone(),
                        previous_column,
                        position,
                    });
                }

                if !property.aligns_with(prev) {
                    let previous_name = if prev.var_name.is_empty() {
                        "UNKNOWN"
                    } else {
                        prev.var_name.as_str()
                    };
                    sink.report(DocIssue::PropertiesNotAligned {
                        previous: previous_name.to_string(),
                        previous_index: index.saturating_sub(1),
                        name: name.to_string(),
                        index,
                        position,
                    });
                }
            }
        }

        if property.var_name.is_empty() {
            sink.report(DocIssue::MissingPropertyName { index, position });
        }
        if property.type_name.is_empty() {
            sink.report(DocIssue::MissingPropertyType { index, position });
        }
        if comment.is_empty() {
            sink.report(DocIssue::MissingPropertyComment {
                name: name.to_string(),
                index,
                position,
            });
        }

        if own_line {
            if indentation.len() != property.tag.len() + 3 {
                sink.report(DocIssue::PropertyCommentIndent { position });
            }

            let comment_line = property.line + scope.count_eols(ws);
            for (i, line) in property.comment.split(scope.eol).enumerate().skip(1) {
                if line.trim().is_empty() {
                    continue;
                }
                if !line.starts_with(indentation) {
                    let leading = &line[..line.len() - line.trim_start().len()];
                    trace!("Property comment line {} is indented by {:?}", i, leading);
                    sink.report(DocIssue::PropertyCommentLines {
                        position: scope.at(comment_line + i),
                    });
                }
            }
        }

        previous = Some((property, own_line));
    }

    if let Some(position) = indent_mix_position {
        sink.report(DocIssue::MixedPropertyIndent { position });
    }

    if let (Some((spaces, position)), Some(_)) = (space_before_var, space_before_comment) {
        if spaces != 1 {
            sink.report(DocIssue::PropertyTypeSpacing { position });
        }
    }

    if !own_line {
        if let Some((spaces, position)) = space_before_comment {
            if spaces != 1 {
                sink.report(DocIssue::PropertyNameSpacing { position });
            }
        }
    }
}
