// {{{ Copyright (c) Paul R. Tagliamonte <paultag@debian.org>, 2024
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE. }}}

use super::field_file::FieldFile;
use super::Error;

/// Expand `${...}`/`$(...)` references in `raw`, using `stack` to detect
/// cycles across nested `${F:x}`/`${V:x}` lookups.
pub(super) fn expand(
    file: &FieldFile,
    raw: &str,
    stack: &mut Vec<String>,
    ctx: &dyn crate::expr::Context,
) -> Result<String, Error> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().map(|(_, c)| *c) {
            Some('{') => {
                chars.next();
                let start = i + 2;
                let end = find_close(raw, start, '}')?;
                let name = &raw[start..end];
                if name.is_empty() {
                    return Err(Error::Invalid("empty ${} substitution".into()));
                }
                out.push_str(&expand_braced(file, name, stack, ctx)?);
                advance_to(&mut chars, end);
            }
            Some('(') => {
                chars.next();
                let start = i + 2;
                let end = find_close_paren(raw, start)?;
                let expr = &raw[start..end];
                if expr.is_empty() {
                    return Err(Error::Invalid("empty $() substitution".into()));
                }
                let value = crate::expr::evaluate(expr, ctx)?;
                out.push_str(&value.to_string());
                advance_to(&mut chars, end);
            }
            _ => out.push('$'),
        }
    }
    Ok(out)
}

fn find_close(raw: &str, start: usize, close: char) -> Result<usize, Error> {
    raw[start..]
        .find(close)
        .map(|rel| start + rel)
        .ok_or_else(|| Error::Invalid(format!("unterminated ${{/$( starting at byte {start}")))
}

/// Find the `)` matching the `$(` opened at `start`, balancing nested
/// parentheses (every expression-engine built-in takes its own argument
/// list) and skipping over `"..."` string literals so a `)` inside a
/// string doesn't end the scan early.
fn find_close_paren(raw: &str, start: usize) -> Result<usize, Error> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (rel, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Ok(start + rel);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    Err(Error::Invalid(format!(
        "unterminated ${{/$( starting at byte {start}"
    )))
}

fn advance_to(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>, end: usize) {
    for (i, _) in chars.by_ref() {
        if i == end {
            break;
        }
    }
}

fn expand_braced(
    file: &FieldFile,
    name: &str,
    stack: &mut Vec<String>,
    ctx: &dyn crate::expr::Context,
) -> Result<String, Error> {
    if let Some(field_name) = name.strip_prefix("F:") {
        return resolve(file, &format!("F:{field_name}"), stack, ctx, |f, s, c| {
            let raw = f
                .get_raw(field_name)
                .ok_or_else(|| Error::Undefined(field_name.to_string()))?;
            expand(f, raw, s, c)
        });
    }
    if let Some(var_name) = name.strip_prefix("V:") {
        return resolve(file, &format!("V:{var_name}"), stack, ctx, |f, s, c| {
            let raw = f
                .get_variable(var_name)
                .ok_or_else(|| Error::Undefined(var_name.to_string()))?
                .to_string();
            expand(f, &raw, s, c)
        });
    }

    if let Some(value) = builtin(name, ctx) {
        return Ok(value);
    }

    if file.auto_transform_variables() {
        if let Some(raw) = file.get_variable(name) {
            let raw = raw.to_string();
            return resolve(file, &format!("V:{name}"), stack, ctx, move |f, s, c| {
                expand(f, &raw, s, c)
            });
        }
    }

    Err(Error::Undefined(name.to_string()))
}

fn resolve(
    file: &FieldFile,
    key: &str,
    stack: &mut Vec<String>,
    ctx: &dyn crate::expr::Context,
    f: impl FnOnce(&FieldFile, &mut Vec<String>, &dyn crate::expr::Context) -> Result<String, Error>,
) -> Result<String, Error> {
    if stack.iter().any(|s| s == key) {
        return Err(Error::Cyclic(key.to_string()));
    }
    stack.push(key.to_string());
    let result = f(file, stack, ctx);
    stack.pop();
    result
}

fn builtin(name: &str, ctx: &dyn crate::expr::Context) -> Option<String> {
    match name {
        "Newline" => Some("\n".to_string()),
        "Space" => Some(" ".to_string()),
        "Tab" => Some("\t".to_string()),
        "wpkg:Version" => Some(ctx.wpkgversion()),
        "wpkg:Upstream-Version" => Some(
            ctx.wpkgversion()
                .split('-')
                .next()
                .unwrap_or_default()
                .to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldFile;

    struct TestContext;
    impl crate::expr::Context for TestContext {
        fn architecture(&self) -> String {
            "amd64".into()
        }
        fn os(&self) -> String {
            "linux".into()
        }
        fn processor(&self) -> String {
            "x86_64".into()
        }
        fn vendor(&self) -> String {
            "pc".into()
        }
        fn wpkgversion(&self) -> String {
            "2.1.0".into()
        }
        fn getfield(&self, _name: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn expands_builtins() {
        let file = FieldFile::parse("Package: foo\n").unwrap();
        let mut stack = Vec::new();
        let out = expand(&file, "a${Space}b${Newline}c", &mut stack, &TestContext).unwrap();
        assert_eq!(out, "a b\nc");
    }

    #[test]
    fn expands_field_reference() {
        let file = FieldFile::parse("Package: foo\nDescription: a ${F:Package} thing\n").unwrap();
        assert_eq!(
            file.get_with_context("Description", &TestContext).unwrap(),
            "a foo thing"
        );
    }

    #[test]
    fn detects_cycles() {
        let mut file = FieldFile::parse("Package: foo\n").unwrap();
        file.set("A", "${F:B}").unwrap();
        file.set("B", "${F:A}").unwrap();
        assert!(matches!(
            file.get_with_context("A", &TestContext),
            Err(Error::Cyclic(_))
        ));
    }

    #[test]
    fn evaluates_expr_substitution() {
        let file = FieldFile::parse("Package: foo\n").unwrap();
        let mut stack = Vec::new();
        let out = expand(&file, "$(1 + 2)", &mut stack, &TestContext).unwrap();
        assert_eq!(out, "3");
    }

    #[test]
    fn evaluates_nested_parens_in_function_calls() {
        let file = FieldFile::parse("Package: foo\n").unwrap();
        let mut stack = Vec::new();
        let out = expand(
            &file,
            "a$(versioncmp(\"1.0\", \"2.0\"))b",
            &mut stack,
            &TestContext,
        )
        .unwrap();
        assert_eq!(out, "a-1b");
    }

    #[test]
    fn ignores_parens_inside_string_literals() {
        let file = FieldFile::parse("Package: foo\n").unwrap();
        let mut stack = Vec::new();
        let out = expand(&file, "$(\"a)b\" == \"a)b\")", &mut stack, &TestContext).unwrap();
        assert_eq!(out, "1");
    }
}

// vim: foldmethod=marker
