//! Rewriting a record literal embedded in a source file.
//!
//! The record is found by its anchor, the `name: "<component>"` property.
//! Only the values of owned properties inside the enclosing object literal
//! change. Owned properties the literal lacks are appended before its closing
//! brace. Every other property, comment and byte outside the braces is kept.

use std::ops::Range;

use crate::analysis::lexer::{tokenize, Token};
use crate::core::{FileEntry, ManifestRecord};

const INDENT: &str = "  ";

/// Token indices of the record: opening brace, anchor key, closing brace.
struct Located {
    open: usize,
    anchor: usize,
    close: usize,
}

fn locate(tokens: &[Token], name: &str) -> Option<Located> {
    let anchor = tokens.windows(3).position(|w| {
        let is_key = w[0].is_ident("name") || w[0].string() == Some("name");
        is_key && w[1].is_punct(':') && w[2].string() == Some(name)
    })?;

    Some(Located {
        open: enclosing_open(tokens, anchor)?,
        anchor,
        close: matching_close(tokens, anchor)?,
    })
}

/// Locate the anchored record literal. Returns the span between (and
/// excluding) its braces.
pub fn find_record(text: &str, name: &str) -> Option<Range<usize>> {
    let tokens = tokenize(text);
    let record = locate(&tokens, name)?;
    Some(tokens[record.open].span.end..tokens[record.close].span.start)
}

fn enclosing_open(tokens: &[Token], anchor: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..anchor).rev() {
        if tokens[i].is_punct('}') {
            depth += 1;
        } else if tokens[i].is_punct('{') {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

fn matching_close(tokens: &[Token], anchor: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(anchor) {
        if token.is_punct('{') {
            depth += 1;
        } else if token.is_punct('}') {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

/// A top-level entry of the record literal.
#[derive(Debug)]
struct Property {
    /// Set for `key: value` entries; spreads and shorthands have none.
    key: Option<String>,
    /// The value for keyed entries, otherwise the whole entry.
    value: Range<usize>,
    /// The `,` following the entry, if any.
    comma: Option<Range<usize>>,
}

fn properties(tokens: &[Token], open: usize, close: usize) -> Vec<Property> {
    let mut props = Vec::new();
    let mut start = open + 1;

    while start < close {
        let mut depth = 0usize;
        let mut end = start;
        while end < close {
            let token = &tokens[end];
            if depth == 0 && token.is_punct(',') {
                break;
            }
            if token.is_punct('{') || token.is_punct('[') || token.is_punct('(') {
                depth += 1;
            } else if token.is_punct('}') || token.is_punct(']') || token.is_punct(')') {
                depth = depth.saturating_sub(1);
            }
            end += 1;
        }

        if end > start {
            let first = &tokens[start];
            let keyed = end > start + 2 && tokens[start + 1].is_punct(':');
            let key = first
                .ident()
                .or_else(|| first.string())
                .filter(|_| keyed)
                .map(str::to_string);
            let value_start = if key.is_some() { start + 2 } else { start };

            props.push(Property {
                key,
                value: tokens[value_start].span.start..tokens[end - 1].span.end,
                comma: (end < close).then(|| tokens[end].span.clone()),
            });
        }
        start = end + 1;
    }

    props
}

/// Leading whitespace of the line containing `pos`.
fn line_indent(text: &str, pos: usize) -> &str {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..];
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

fn literal<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn render_files(files: &[FileEntry], indent: &str) -> String {
    if files.is_empty() {
        return "[]".to_string();
    }

    let inner = format!("{indent}{INDENT}");
    let entry = format!("{inner}{INDENT}");
    let entries = files
        .iter()
        .map(|file| {
            format!(
                "{inner}{{\n{entry}path: {},\n{entry}type: {}\n{inner}}}",
                literal(&file.path),
                literal(&file.file_type)
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("[\n{entries}\n{indent}]")
}

/// The record's owned properties as object-literal values, in rendering
/// order. Multi-line values are laid out for properties at `indent`.
fn owned_values(record: &ManifestRecord, indent: &str) -> Vec<(&'static str, String)> {
    let mut values = vec![
        ("name", literal(&record.name)),
        ("type", literal(&record.item_type)),
        ("title", literal(&record.title)),
        ("description", literal(&record.description)),
        ("registryDependencies", literal(&record.registry_dependencies)),
        ("devDependencies", literal(&record.dev_dependencies)),
    ];
    if let Some(categories) = &record.categories {
        values.push(("categories", literal(categories)));
    }
    values.push(("files", render_files(&record.files, indent)));
    values
}

/// Update the anchored record's owned properties. Returns `None` when the
/// anchor is not present.
pub fn rewrite_record(text: &str, record: &ManifestRecord) -> Option<String> {
    let tokens = tokenize(text);
    let located = locate(&tokens, &record.name)?;
    let props = properties(&tokens, located.open, located.close);

    let open_pos = tokens[located.open].span.start;
    let anchor_pos = tokens[located.anchor].span.start;
    let field_indent = if text[open_pos..anchor_pos].contains('\n') {
        line_indent(text, anchor_pos).to_string()
    } else {
        format!("{}{INDENT}", line_indent(text, open_pos))
    };

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    let mut missing = Vec::new();

    for (key, value) in owned_values(record, &field_indent) {
        match props.iter().find(|p| p.key.as_deref() == Some(key)) {
            Some(prop) => edits.push((prop.value.clone(), value)),
            None => missing.push(format!("{field_indent}{key}: {value}")),
        }
    }

    // The anchor guarantees at least one entry.
    if let Some(last) = props.last().filter(|_| !missing.is_empty()) {
        let edit = match &last.comma {
            Some(comma) => {
                let lines: Vec<String> = missing.iter().map(|line| format!("{line},")).collect();
                (comma.end..comma.end, format!("\n{}", lines.join("\n")))
            }
            None => (
                last.value.end..last.value.end,
                format!(",\n{}", missing.join(",\n")),
            ),
        };
        edits.push(edit);
    }

    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut out = text.to_string();
    for (range, replacement) in edits {
        out.replace_range(range, &replacement);
    }
    Some(out)
}
