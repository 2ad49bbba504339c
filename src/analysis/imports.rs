//! Import statement extraction.

use super::lexer::{tokenize, Token};
use crate::core::source::ModuleReference;

/// Extract module references from source text, in order of appearance.
///
/// Duplicates are kept; deduplication happens during classification.
pub fn extract_imports(src: &str) -> Vec<ModuleReference> {
    let tokens = tokenize(src);
    let mut refs = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let is_keyword = tokens[i].is_ident("import") && (i == 0 || !tokens[i - 1].is_punct('.'));

        if is_keyword {
            if let Some((end, specifier)) = parse_import(&tokens, i + 1) {
                let span = tokens[i].span.start..tokens[end].span.end;
                refs.push(ModuleReference {
                    statement: src[span].to_string(),
                    specifier,
                });
                i = end + 1;
                continue;
            }
        }
        i += 1;
    }

    refs
}

/// Parse the clause after `import`. Returns the index of the specifier token
/// and the specifier.
fn parse_import(tokens: &[Token], mut i: usize) -> Option<(usize, String)> {
    // `import type X from`, but not a default binding named `type`
    // (`import type from`, `import type, { a } from`)
    let next = tokens.get(i + 1)?;
    if tokens.get(i)?.is_ident("type") && !next.is_ident("from") && !next.is_punct(',') {
        i += 1;
    }

    let tok = tokens.get(i)?;
    if tok.is_punct('{') || tok.is_punct('*') {
        i = parse_bindings(tokens, i)?;
    } else if tok.ident().is_some() && !tok.is_ident("from") {
        i += 1;
        if tokens.get(i)?.is_punct(',') {
            i = parse_bindings(tokens, i + 1)?;
        }
    } else {
        return None;
    }

    if !tokens.get(i)?.is_ident("from") {
        return None;
    }
    let specifier = tokens.get(i + 1)?.string()?.to_string();
    Some((i + 1, specifier))
}

/// Parse `{ ... }` or `* as name`; returns the index after the bindings.
fn parse_bindings(tokens: &[Token], i: usize) -> Option<usize> {
    let tok = tokens.get(i)?;

    if tok.is_punct('*') {
        let is_namespace = tokens.get(i + 1)?.is_ident("as") && tokens.get(i + 2)?.ident().is_some();
        return is_namespace.then_some(i + 3);
    }

    if !tok.is_punct('{') {
        return None;
    }

    let mut j = i + 1;
    let mut names = 0;
    loop {
        let t = tokens.get(j)?;
        if t.is_punct('}') {
            break;
        }
        if t.ident().is_some() {
            names += 1;
        } else if !t.is_punct(',') {
            return None;
        }
        j += 1;
    }

    (names > 0).then_some(j + 1)
}
