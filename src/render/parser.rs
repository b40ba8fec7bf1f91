//! mpc-style conditional template evaluator.
//!
//! Templates are scanned once per render, character by character. Syntax:
//!
//! - `%key%` / `{key}` — placeholder, resolved through the caller's lookup.
//! - `[ ... ]` — optional group, dropped unless something inside was found.
//! - `a|b` — `b` is only used when `a` produced nothing.
//! - `a&b` — both sides must be found, otherwise the whole scope is dropped.
//! - `#c` — emit `c` literally.
//! - `\n`, `\t`, ... — C-style control escapes.
//!
//! Malformed templates never fail; they degrade to partial output.

/// Nesting ceiling for `[`, `|` and `&` scopes.
const MAX_DEPTH: usize = 256;

/// Result of scanning one scope.
struct Scope {
    text: String,
    found: bool,
    /// Byte offset just past the last consumed character.
    pos: usize,
}

/// Render `template`, resolving placeholders with `resolve`.
///
/// Returns the rendered text and whether real content was produced. A
/// resolution of `None` and one of `Some("")` are treated the same.
pub fn render<F>(template: &str, mut resolve: F) -> (String, bool)
where
    F: FnMut(&str) -> Option<String>,
{
    if template.is_empty() {
        return (String::new(), false);
    }
    let scope = scan(template, 0, true, 0, &mut resolve);
    (scope.text, scope.found)
}

fn scan<F>(src: &str, start: usize, mut found: bool, depth: usize, resolve: &mut F) -> Scope
where
    F: FnMut(&str) -> Option<String>,
{
    if depth > MAX_DEPTH {
        return Scope::dropped(src.len());
    }

    let mut out = String::new();
    let mut pos = start;

    while let Some(c) = src[pos..].chars().next() {
        pos += c.len_utf8();
        match c {
            '%' | '{' => {
                let end = if c == '%' { '%' } else { '}' };
                let rest = &src[pos..];
                let (key, consumed) = match rest.find(end) {
                    Some(i) => (&rest[..i], i + end.len_utf8()),
                    None => (rest, rest.len()),
                };
                pos += consumed;
                match resolve(key).filter(|v| !v.is_empty()) {
                    Some(value) => {
                        out.push_str(&value);
                        found = true;
                    }
                    None => found = false,
                }
            }
            '#' => match src[pos..].chars().next() {
                Some(lit) => {
                    out.push(lit);
                    pos += lit.len_utf8();
                }
                None => out.push('#'),
            },
            '\\' => match src[pos..].chars().next() {
                Some(esc) => {
                    out.push(unescape(esc));
                    pos += esc.len_utf8();
                }
                None => out.push('\\'),
            },
            '[' => {
                let group = scan(src, pos, found, depth + 1, resolve);
                out.push_str(&group.text);
                found = group.found;
                pos = group.pos;
            }
            ']' => {
                return if found {
                    Scope { text: out, found: true, pos }
                } else {
                    Scope::dropped(pos)
                };
            }
            '|' => {
                let alt = scan(src, pos, found, depth + 1, resolve);
                pos = alt.pos;
                // A found left side wins; the fallback is consumed but dropped.
                if !found {
                    if !alt.found {
                        return Scope::dropped(pos);
                    }
                    out.push_str(&alt.text);
                    found = true;
                }
            }
            '&' => {
                let rhs = scan(src, pos, found, depth + 1, resolve);
                pos = rhs.pos;
                if found && rhs.found {
                    out.push_str(&rhs.text);
                } else {
                    return Scope::dropped(pos);
                }
            }
            other => out.push(other),
        }
    }

    Scope { text: out, found, pos }
}

impl Scope {
    fn dropped(pos: usize) -> Self {
        Self {
            text: String::new(),
            found: false,
            pos,
        }
    }
}

/// Map the character after `\` to the byte it stands for.
fn unescape(c: char) -> char {
    match c {
        'a' => '\u{07}',
        'b' => '\u{08}',
        't' => '\t',
        'n' => '\n',
        'v' => '\u{0B}',
        'f' => '\u{0C}',
        'r' => '\r',
        other => other,
    }
}
