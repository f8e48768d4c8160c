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

use super::name::FieldName;
use super::{substitute, Error};

/// How [FieldFile::write] renders a field file back to text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteMode {
    /// Emit transformed field values only.
    FieldOnly,
    /// Emit transformed field values, followed by variable assignments.
    Variables,
    /// Emit the untransformed values exactly as stored.
    Raw,
}

struct Entry {
    name: String,
    value: String,
}

/// A case-insensitive map of `Name: value` fields plus a sibling map of
/// `Name=value` variables, with `${...}`/`$(...)` substitution.
#[derive(Default)]
pub struct FieldFile {
    fields: Vec<Entry>,
    variables: Vec<Entry>,
    package_name: Option<String>,
    auto_transform_variables: bool,
}

struct DefaultContext;

impl crate::expr::Context for DefaultContext {
    fn architecture(&self) -> String {
        std::env::consts::ARCH.to_string()
    }
    fn os(&self) -> String {
        std::env::consts::OS.to_string()
    }
    fn processor(&self) -> String {
        std::env::consts::ARCH.to_string()
    }
    fn vendor(&self) -> String {
        "unknown".to_string()
    }
    fn wpkgversion(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
    fn getfield(&self, _name: &str) -> Option<String> {
        None
    }
}

impl FieldFile {
    /// Parse a field file's text.
    ///
    /// Fields are separated from their value by `:`, variables by `=`.
    /// A line beginning with whitespace continues the previous entry; a
    /// continuation line containing only `.` is an intentionally blank
    /// line. `#` at the start of a line is a comment. The first blank line
    /// ends the file.
    pub fn parse(data: &str) -> Result<Self, Error> {
        let mut file = FieldFile::default();
        let mut current: Option<(bool, usize)> = None; // (is_variable, index)

        for raw_line in data.lines() {
            if raw_line.trim().is_empty() {
                break;
            }
            if raw_line.starts_with('#') {
                continue;
            }
            if raw_line.starts_with(' ') || raw_line.starts_with('\t') {
                let content = raw_line.trim_start();
                let (is_var, idx) = current
                    .ok_or_else(|| Error::InvalidField("continuation with no field".into()))?;
                let entry = if is_var {
                    &mut file.variables[idx]
                } else {
                    &mut file.fields[idx]
                };
                if content.trim_end() == "." {
                    entry.value.push('\n');
                } else {
                    entry.value.push('\n');
                    entry.value.push_str(content);
                }
                continue;
            }

            let colon = raw_line.find(':');
            let equals = raw_line.find('=');
            let (sep, is_var) = match (colon, equals) {
                (Some(c), Some(e)) if e < c => (e, true),
                (Some(c), _) => (c, false),
                (None, Some(e)) => (e, true),
                (None, None) => {
                    return Err(Error::InvalidField(format!(
                        "line has no field separator: {raw_line:?}"
                    )))
                }
            };
            let name = FieldName::parse(raw_line[..sep].trim_end())?;
            let value = raw_line[sep + 1..].trim_start().to_string();

            let table = if is_var {
                &mut file.variables
            } else {
                &mut file.fields
            };
            if table
                .iter()
                .any(|e| e.name.eq_ignore_ascii_case(name.as_str()))
            {
                return Err(Error::InvalidField(format!(
                    "duplicate {} {:?}",
                    if is_var { "variable" } else { "field" },
                    name.as_str()
                )));
            }
            table.push(Entry {
                name: name.as_str().to_string(),
                value,
            });
            current = Some((is_var, table.len() - 1));

            if !is_var && name.bare_name().eq_ignore_ascii_case("package") {
                file.package_name = Some(file.fields[file.fields.len() - 1].value.clone());
            }
        }

        Ok(file)
    }

    /// The package name recorded by a `Package:` field, if this file has
    /// one.
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    /// Explicitly set the owning package's name, independent of whether a
    /// `Package` field has been parsed yet.
    pub fn set_package_name(&mut self, name: impl Into<String>) {
        self.package_name = Some(name.into());
    }

    /// Enable or disable fallback of bare `${name}` references to the
    /// variable table when no built-in matches.
    pub fn set_auto_transform_variables(&mut self, on: bool) {
        self.auto_transform_variables = on;
    }

    pub(super) fn auto_transform_variables(&self) -> bool {
        self.auto_transform_variables
    }

    /// True if a field by this name (case-insensitive) is set.
    pub fn field_is_defined(&self, name: &str) -> bool {
        self.fields.iter().any(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// True if a variable by this name is set.
    pub fn variable_is_defined(&self, name: &str) -> bool {
        self.variables.iter().any(|e| e.name == name)
    }

    /// The field's untransformed value, or `None` if it isn't set.
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .map(|e| e.value.as_str())
    }

    /// The variable's value, or `None` if it isn't set.
    pub fn get_variable(&self, name: &str) -> Option<&str> {
        self.variables.iter().find(|e| e.name == name).map(|e| e.value.as_str())
    }

    /// Iterate over the names of every field, in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|e| e.name.as_str())
    }

    /// Set (or replace) a field's raw value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), Error> {
        let parsed = FieldName::parse(name)?;
        if let Some(entry) = self
            .fields
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(parsed.as_str()))
        {
            entry.value = value.into();
        } else {
            self.fields.push(Entry {
                name: parsed.as_str().to_string(),
                value: value.into(),
            });
        }
        Ok(())
    }

    /// Set (or replace) a variable's raw value.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(entry) = self.variables.iter_mut().find(|e| e.name == name) {
            entry.value = value.into();
        } else {
            self.variables.push(Entry {
                name,
                value: value.into(),
            });
        }
    }

    /// Remove a field, returning whether it had been set.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|e| !e.name.eq_ignore_ascii_case(name));
        self.fields.len() != before
    }

    /// Get a field's fully transformed value, using a host-default
    /// [crate::expr::Context] (the running process's architecture, OS and
    /// this crate's own version).
    pub fn get(&self, name: &str) -> Result<String, Error> {
        self.get_with_context(name, &DefaultContext)
    }

    /// Get a field's fully transformed value under an explicit
    /// [crate::expr::Context], e.g. one reporting a target architecture
    /// rather than the host's.
    pub fn get_with_context(
        &self,
        name: &str,
        ctx: &dyn crate::expr::Context,
    ) -> Result<String, Error> {
        let raw = self
            .get_raw(name)
            .ok_or_else(|| Error::Undefined(name.to_string()))?;
        let mut stack = vec![format!("F:{name}")];
        substitute::expand(self, raw, &mut stack, ctx)
    }

    /// The first line of a field's fully transformed value.
    pub fn get_first_line(&self, name: &str) -> Result<String, Error> {
        Ok(self
            .get(name)?
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    /// Render this field file back to text.
    ///
    /// `prefix` names fields to emit first, in the given order, ahead of
    /// the remaining fields in their original file order.
    pub fn write(&self, mode: WriteMode, prefix: &[&str]) -> Result<String, Error> {
        let mut out = String::new();
        let mut emitted = std::collections::HashSet::new();

        let emit = |out: &mut String, entry: &Entry| -> Result<(), Error> {
            let value = match mode {
                WriteMode::Raw => entry.value.clone(),
                WriteMode::FieldOnly | WriteMode::Variables => {
                    self.get(&entry.name).unwrap_or_else(|_| entry.value.clone())
                }
            };
            out.push_str(&entry.name);
            out.push_str(": ");
            out.push_str(&quote(&value));
            out.push('\n');
            Ok(())
        };

        for name in prefix {
            if let Some(entry) = self.fields.iter().find(|e| e.name.eq_ignore_ascii_case(name)) {
                emit(&mut out, entry)?;
                emitted.insert(entry.name.to_ascii_lowercase());
            }
        }
        for entry in &self.fields {
            if emitted.contains(&entry.name.to_ascii_lowercase()) {
                continue;
            }
            emit(&mut out, entry)?;
        }

        if mode == WriteMode::Variables {
            for entry in &self.variables {
                out.push_str(&entry.name);
                out.push('=');
                out.push_str(&quote(&entry.value));
                out.push('\n');
            }
        }

        Ok(out)
    }
}

fn quote(value: &str) -> String {
    let mut lines = value.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if line.is_empty() {
            out.push_str(" .");
        } else {
            out.push(' ');
            out.push_str(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_fields() {
        let file = FieldFile::parse("Package: foo\nVersion: 1.0\n").unwrap();
        assert_eq!(file.get_raw("Package"), Some("foo"));
        assert_eq!(file.package_name(), Some("foo"));
    }

    #[test]
    fn parses_continuations_with_blank_marker() {
        let file = FieldFile::parse("Description: short\n long line one\n .\n long line two\n").unwrap();
        assert_eq!(
            file.get_raw("Description"),
            Some("short\nlong line one\n\nlong line two")
        );
    }

    #[test]
    fn parses_variables_separately() {
        let file = FieldFile::parse("Package: foo\nMY_VAR=hello\n").unwrap();
        assert!(!file.field_is_defined("MY_VAR"));
        assert_eq!(file.get_variable("MY_VAR"), Some("hello"));
    }

    #[test]
    fn rejects_duplicate_fields() {
        assert!(FieldFile::parse("Package: foo\nPackage: bar\n").is_err());
    }

    #[test]
    fn stops_at_blank_line() {
        let file = FieldFile::parse("Package: foo\n\nVersion: 1.0\n").unwrap();
        assert!(!file.field_is_defined("Version"));
    }

    #[test]
    fn write_round_trips_continuation_quoting() {
        let mut file = FieldFile::default();
        file.set("Description", "first\n\nthird").unwrap();
        let text = file.write(WriteMode::Raw, &[]).unwrap();
        assert_eq!(text, "Description: first\n .\n third\n");
    }

    #[test]
    fn write_honors_prefix_order() {
        let mut file = FieldFile::default();
        file.set("Version", "1.0").unwrap();
        file.set("Package", "foo").unwrap();
        let text = file.write(WriteMode::Raw, &["Package"]).unwrap();
        assert!(text.starts_with("Package: foo\n"));
    }
}

// vim: foldmethod=marker
