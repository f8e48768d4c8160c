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

/// Which subsystem produced a [crate::output::Message]. A closed set, so a
/// caller filtering by subsystem can match exhaustively.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Module {
    /// An archive was attached to the database.
    Attached,
    /// An archive was detached from the database.
    Detached,
    /// Gathering build information for a package being built.
    BuildInfo,
    /// Building a package.
    BuildPackage,
    /// Validating a package before it is unpacked.
    ValidateInstallation,
    /// Unpacking a package's files.
    UnpackPackage,
    /// Running a package's `postinst`/configuration step.
    ConfigurePackage,
    /// Validating that a package may be removed.
    ValidateRemoval,
    /// Removing a package's files.
    RemovePackage,
    /// Running a package's `prerm`/deconfiguration step.
    DeconfigurePackage,
    /// Invoking a maintainer script.
    RunScript,
    /// Repository-index handling.
    Repository,
    /// Control-file parsing.
    Control,
    /// Field-file parsing and substitution.
    Field,
    /// General-purpose tooling with no more specific module.
    Tool,
}

impl Module {
    /// The hyphenated name used in rendered messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Attached => "attached",
            Module::Detached => "detached",
            Module::BuildInfo => "build-info",
            Module::BuildPackage => "build-package",
            Module::ValidateInstallation => "validate-installation",
            Module::UnpackPackage => "unpack-package",
            Module::ConfigurePackage => "configure-package",
            Module::ValidateRemoval => "validate-removal",
            Module::RemovePackage => "remove-package",
            Module::DeconfigurePackage => "deconfigure-package",
            Module::RunScript => "run-script",
            Module::Repository => "repository",
            Module::Control => "control",
            Module::Field => "field",
            Module::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Module {
    fn default() -> Self {
        Module::Tool
    }
}

// vim: foldmethod=marker
