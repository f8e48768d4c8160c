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

use super::Error;
use std::io::{Read, Write};

/// The compression wrapper applied to an archive member, detected from
/// its magic bytes or filename extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompressionFormat {
    /// gzip (`.gz`), via [flate2].
    Gz,
    /// bzip2 (`.bz2`), via [bzip2].
    Bz2,
    /// The legacy `.lzma` stream format, via [xz2].
    Lzma,
    /// `.xz`, via [xz2].
    Xz,
}

impl CompressionFormat {
    /// The conventional filename extension for this format, without a
    /// leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gz => "gz",
            Self::Bz2 => "bz2",
            Self::Lzma => "lzma",
            Self::Xz => "xz",
        }
    }

    /// Guess a [CompressionFormat] from a filename's trailing extension.
    pub fn from_extension(name: &str) -> Option<Self> {
        if name.ends_with(".gz") {
            Some(Self::Gz)
        } else if name.ends_with(".bz2") {
            Some(Self::Bz2)
        } else if name.ends_with(".lzma") {
            Some(Self::Lzma)
        } else if name.ends_with(".xz") {
            Some(Self::Xz)
        } else {
            None
        }
    }

    /// Sniff a [CompressionFormat] from the leading magic bytes of `data`.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x1f, 0x8b]) {
            Some(Self::Gz)
        } else if data.starts_with(b"BZh") {
            Some(Self::Bz2)
        } else if data.starts_with(&[0xfd, b'7', b'z', b'X', b'Z', 0x00]) {
            Some(Self::Xz)
        } else if data.len() > 4 && data[0] <= 0xe1 && data[1] == 0x00 {
            // Legacy `.lzma` streams begin with a one-byte properties field
            // followed by a 4-byte little-endian dictionary size; this is a
            // heuristic, not a strict magic number.
            Some(Self::Lzma)
        } else {
            None
        }
    }

    /// Compress `data` under this format.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        match self {
            Self::Gz => {
                let mut enc =
                    flate2::write::GzEncoder::new(&mut out, flate2::Compression::default());
                enc.write_all(data)?;
                enc.finish()?;
            }
            Self::Bz2 => {
                let mut enc =
                    bzip2::write::BzEncoder::new(&mut out, bzip2::Compression::default());
                enc.write_all(data)?;
                enc.finish()?;
            }
            Self::Xz => {
                let mut enc = xz2::write::XzEncoder::new(&mut out, 6);
                enc.write_all(data)?;
                enc.finish()?;
            }
            Self::Lzma => {
                let stream = xz2::stream::Stream::new_lzma_encoder(&xz2::stream::LzmaOptions::new_preset(6)?)?;
                let mut enc = xz2::write::XzEncoder::new_stream(&mut out, stream);
                enc.write_all(data)?;
                enc.finish()?;
            }
        }
        Ok(out)
    }

    /// Decompress `data`, which must have been produced by this format.
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        match self {
            Self::Gz => {
                flate2::read::GzDecoder::new(data).read_to_end(&mut out)?;
            }
            Self::Bz2 => {
                bzip2::read::BzDecoder::new(data).read_to_end(&mut out)?;
            }
            Self::Xz => {
                xz2::read::XzDecoder::new(data).read_to_end(&mut out)?;
            }
            Self::Lzma => {
                let stream = xz2::stream::Stream::new_lzma_decoder(u64::MAX)?;
                xz2::read::XzDecoder::new_stream(data, stream).read_to_end(&mut out)?;
            }
        }
        Ok(out)
    }
}

impl From<xz2::stream::Error> for Error {
    fn from(err: xz2::stream::Error) -> Self {
        Error::Compatibility(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gz_round_trips() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let compressed = CompressionFormat::Gz.compress(data).unwrap();
        assert_eq!(CompressionFormat::sniff(&compressed), Some(CompressionFormat::Gz));
        let decompressed = CompressionFormat::Gz.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn bz2_round_trips() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let compressed = CompressionFormat::Bz2.compress(data).unwrap();
        let decompressed = CompressionFormat::Bz2.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn xz_round_trips() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let compressed = CompressionFormat::Xz.compress(data).unwrap();
        assert_eq!(CompressionFormat::sniff(&compressed), Some(CompressionFormat::Xz));
        let decompressed = CompressionFormat::Xz.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn extension_detection() {
        assert_eq!(
            CompressionFormat::from_extension("control.tar.gz"),
            Some(CompressionFormat::Gz)
        );
        assert_eq!(CompressionFormat::from_extension("control.tar"), None);
    }
}

// vim: foldmethod=marker
