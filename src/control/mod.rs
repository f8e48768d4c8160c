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

//! The `control` module contains support for parsing Debian RFC 2822-style
//! files into our conventional formats.
//!
//! # Feature `serde`
//!
//! ⚠️  Support for directly using [ser] and [de] to encode and decode
//! arbitrary Debian-flavored RFC2822 files is possible but not recommended
//! yet. The Serializer and Deserializer implementation is very strict on
//! what it will encode or decode, and I don't particularly want to make
//! it very clever. It may be worth checking out Jelmer's
//! [deb822](https://github.com/jelmer/deb822-rs) project for that.
//!
//! This will export two modules from this package - [ser] and [de].
//! Additionally the crate will add [serde::Serialize] and [serde::Deserialize]
//! derives as required.

mod architectures;
mod date_time;
mod delimited_strings;
mod digest;
mod email;
mod file_digest;
mod file_list;
mod macros;
mod number;
mod paragraph;
mod pest;
mod priority;
mod section;
mod selection;
mod standards_version;
mod traits;
mod uri;
mod urgency;

#[cfg(feature = "serde")]
pub mod de;

#[cfg(feature = "serde")]
pub mod ser;

pub use architectures::Architectures;
pub use date_time::{DateTime2822, DateTime2822ParseError};
pub use delimited_strings::{CommaDelimitedStrings, SpaceDelimitedStrings};
pub use digest::{Digest, DigestMd5, DigestParseError, DigestSha1, DigestSha256, DigestSha512};
pub use email::{Email, EmailList, EmailParseError};
pub use file_digest::{
    FileDigest, FileDigestMd5, FileDigestParseError, FileDigestSha1, FileDigestSha256,
    FileDigestSha512,
};
pub use file_list::{FileList, FileListEntry, FileListFormat, FileListParseError};
pub use number::Number;
pub use paragraph::{Error, RawField, RawParagraph};
pub use priority::{Priority, PriorityParseError};
pub use section::{Area, AreaParseError, Section, SectionName, SectionNameParseError, SectionParseError};
pub use selection::{Selection, SelectionParseError};
pub use standards_version::{StandardsVersion, StandardsVersionParseError};
pub use traits::FileEntry;
pub use uri::{Uri, UriParseError};
pub use urgency::{Urgency, UrgencyLevel, UrgencyParseError};

mod control_file;
pub use control_file::{ControlFile, VerifyErrors};

pub(crate) use macros::{def_failing_parse_test, def_parse_test, def_serde_traits_for};

// vim: foldmethod=marker
