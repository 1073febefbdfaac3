//! Serialization for PixColormap
//!
//! Text-based serialization format compatible with C Leptonica.
//! The format has no version number.
//!
//! # Format
//!
//! ```text
//! \nPixcmap: depth = D bpp; N colors\n
//! Color    R-val    G-val    B-val\n
//! --------------------------------\n
//!   0       R        G        B\n
//!   1       R        G        B\n
//!   ...
//! \n
//! ```
//!
//! Reading is line based and stops after the last color row, so a stream
//! may hold several colormaps back to back.
//!
//! # See also
//!
//! C Leptonica: `colormap.c` (`pixcmapReadStream`, `pixcmapWriteStream`)

use super::PixColormap;
use crate::error::{Error, Result};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Longest accepted input line in bytes, excluding the newline.
const MAX_LINE_LEN: usize = 1024;

/// Smallest and largest color count a serialized colormap may declare.
const MIN_SERIAL_COLORS: usize = 2;
const MAX_SERIAL_COLORS: usize = 256;

impl PixColormap {
    /// Read one PixColormap from a buffered stream.
    ///
    /// Leading blank lines are skipped. The stream is left positioned just
    /// after the last color row, so content that follows is not consumed.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedInput`] if the header is missing or invalid, the
    /// depth is not 1, 2, 4 or 8, the color count is outside [2, 256] or
    /// exceeds the depth's capacity, or a color row is short or out of
    /// range. No partial colormap is returned.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapReadStream()`
    pub fn read_stream(reader: &mut impl BufRead) -> Result<Self> {
        let mut lines = LineReader::new(reader);

        let header = lines
            .next_nonblank()?
            .ok_or_else(|| Error::MalformedInput("colormap header not found".into()))?;
        let (depth, ncolors) = parse_header_line(&header)?;

        if !matches!(depth, 1 | 2 | 4 | 8) {
            return Err(Error::MalformedInput(format!("invalid depth: {depth}")));
        }
        if !(MIN_SERIAL_COLORS..=MAX_SERIAL_COLORS).contains(&ncolors) {
            return Err(Error::MalformedInput(format!(
                "invalid number of colors: {ncolors}"
            )));
        }
        if ncolors > 1usize << depth {
            return Err(Error::MalformedInput(format!(
                "{ncolors} colors exceed capacity of depth {depth}"
            )));
        }

        lines.skip_banner()?;

        let mut cmap = PixColormap::new(depth)?;
        for row in 0..ncolors {
            let line = lines.next_nonblank()?.ok_or_else(|| {
                Error::MalformedInput(format!("missing color row {row} of {ncolors}"))
            })?;
            let (r, g, b) = parse_color_line(&line)?;
            cmap.add_rgb(r, g, b)?;
        }

        Ok(cmap)
    }

    /// Read a PixColormap from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = data;
        Self::read_stream(&mut cursor)
    }

    /// Read a PixColormap from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_stream(&mut BufReader::new(file))
    }

    /// Write a PixColormap to a stream in the text format above.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the writer fails.
    ///
    /// # See also
    ///
    /// C Leptonica: `pixcmapWriteStream()`
    pub fn write_stream(&self, writer: &mut impl Write) -> Result<()> {
        let arrays = self.to_arrays()?;

        writeln!(
            writer,
            "\nPixcmap: depth = {} bpp; {} colors",
            self.depth(),
            arrays.len()
        )?;
        writeln!(writer, "Color    R-val    G-val    B-val")?;
        writeln!(writer, "--------------------------------")?;

        for i in 0..arrays.len() {
            writeln!(
                writer,
                "{i:3}       {r:3}      {g:3}      {b:3}",
                r = arrays.red[i],
                g = arrays.green[i],
                b = arrays.blue[i],
            )?;
        }

        writeln!(writer)?;
        Ok(())
    }

    /// Write a PixColormap to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_stream(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a PixColormap to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_stream(&mut buf)?;
        Ok(buf)
    }
}

// ============================================================================
// Internal helpers
// ============================================================================

/// Line reader with one line of pushback and a per-line length limit.
struct LineReader<'a, R: BufRead> {
    inner: &'a mut R,
    pending: Option<String>,
}

impl<'a, R: BufRead> LineReader<'a, R> {
    fn new(inner: &'a mut R) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    /// Next line without its terminator, or `None` at end of stream.
    fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        let mut buf = Vec::new();
        let n = self
            .inner
            .by_ref()
            .take((MAX_LINE_LEN + 2) as u64)
            .read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        if buf.len() > MAX_LINE_LEN {
            return Err(Error::MalformedInput(format!(
                "line exceeds {MAX_LINE_LEN} bytes"
            )));
        }
        String::from_utf8(buf)
            .map(Some)
            .map_err(|e| Error::MalformedInput(format!("invalid UTF-8: {e}")))
    }

    fn next_nonblank(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Consume the "Color ..." and "----" lines if they are present.
    fn skip_banner(&mut self) -> Result<()> {
        for prefix in ["Color", "---"] {
            match self.next_nonblank()? {
                Some(line) if line.trim_start().starts_with(prefix) => {}
                other => self.pending = other,
            }
        }
        Ok(())
    }
}

/// Parse "Pixcmap: depth = D bpp; N colors" and return (depth, ncolors).
///
/// Whitespace between tokens may be any run, including none.
fn parse_header_line(line: &str) -> Result<(u32, usize)> {
    let trimmed = line.trim();
    let invalid = || Error::MalformedInput(format!("invalid colormap header: '{trimmed}'"));

    let rest = strip_token(trimmed, "Pixcmap:")
        .and_then(|s| strip_token(s, "depth"))
        .and_then(|s| strip_token(s, "="))
        .ok_or_else(invalid)?;
    let (depth_str, rest) = rest.split_once("bpp").ok_or_else(invalid)?;
    let count_str = strip_token(rest, ";")
        .and_then(|s| s.trim_end().strip_suffix("colors"))
        .ok_or_else(invalid)?;

    let depth: u32 = depth_str
        .trim()
        .parse()
        .map_err(|e| Error::MalformedInput(format!("failed to parse colormap depth: {e}")))?;
    let ncolors: usize = count_str
        .trim()
        .parse()
        .map_err(|e| Error::MalformedInput(format!("failed to parse colormap ncolors: {e}")))?;
    Ok((depth, ncolors))
}

/// Strip `tok` after any leading whitespace.
fn strip_token<'a>(s: &'a str, tok: &str) -> Option<&'a str> {
    s.trim_start().strip_prefix(tok)
}

/// Parse a color row: "  i       R      G      B". The index is ignored.
fn parse_color_line(line: &str) -> Result<(u8, u8, u8)> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(Error::MalformedInput(format!(
            "invalid color entry: '{trimmed}' (expected 4 fields, got {})",
            parts.len()
        )));
    }
    parts[0]
        .parse::<i64>()
        .map_err(|e| Error::MalformedInput(format!("failed to parse color index: {e}")))?;

    let channel = |name: &str, s: &str| -> Result<u8> {
        let v: i64 = s
            .parse()
            .map_err(|e| Error::MalformedInput(format!("failed to parse {name} value: {e}")))?;
        u8::try_from(v)
            .map_err(|_| Error::MalformedInput(format!("{name} value {v} outside [0, 255]")))
    };
    Ok((
        channel("R", parts[1])?,
        channel("G", parts[2])?,
        channel("B", parts[3])?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixColormap {
        let mut cmap = PixColormap::new(2).unwrap();
        cmap.add_rgb(255, 0, 0).unwrap();
        cmap.add_rgb(0, 128, 7).unwrap();
        cmap
    }

    #[test]
    fn test_write_exact_bytes() {
        let text = String::from_utf8(sample().write_to_bytes().unwrap()).unwrap();
        let expected = "\nPixcmap: depth = 2 bpp; 2 colors\n\
                        Color    R-val    G-val    B-val\n\
                        --------------------------------\n  \
                        0       255        0        0\n  \
                        1         0      128        7\n\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_roundtrip() {
        let mut cmap = PixColormap::new(8).unwrap();
        for i in 0..=255u8 {
            cmap.add_rgb(i, 255 - i, i / 2).unwrap();
        }
        let restored = PixColormap::read_from_bytes(&cmap.write_to_bytes().unwrap()).unwrap();
        assert_eq!(restored, cmap);
        assert_eq!(restored.len(), 256);
    }

    #[test]
    fn test_read_leaves_trailing_content() {
        let first = sample();
        let mut second = PixColormap::new(4).unwrap();
        second.add_rgb(1, 2, 3).unwrap();
        second.add_rgb(4, 5, 6).unwrap();
        second.add_rgb(7, 8, 9).unwrap();

        let mut buf = first.write_to_bytes().unwrap();
        second.write_stream(&mut buf).unwrap();

        let mut reader: &[u8] = &buf;
        assert_eq!(PixColormap::read_stream(&mut reader).unwrap(), first);
        assert_eq!(PixColormap::read_stream(&mut reader).unwrap(), second);
    }

    #[test]
    fn test_read_without_banner() {
        let text = "Pixcmap: depth = 1 bpp; 2 colors\n0 0 0 0\n1 255 255 255\n";
        let cmap = PixColormap::read_from_bytes(text.as_bytes()).unwrap();
        assert_eq!(cmap.get_rgb(1), Some((255, 255, 255)));
    }

    #[test]
    fn test_read_skips_blank_rows() {
        let text = "\n\nPixcmap: depth = 1 bpp; 2 colors\n\
                    Color    R-val    G-val    B-val\n\
                    --------------------------------\n\
                    0 1 2 3\n\n   \n1 4 5 6\n";
        let cmap = PixColormap::read_from_bytes(text.as_bytes()).unwrap();
        assert_eq!(cmap.get_rgb(0), Some((1, 2, 3)));
        assert_eq!(cmap.get_rgb(1), Some((4, 5, 6)));
    }

    #[test]
    fn test_read_header_spacing() {
        for header in [
            "Pixcmap: depth=8 bpp;2 colors",
            "Pixcmap:depth = 8bpp ;  2   colors",
            "  Pixcmap:   depth   =   8   bpp;   2 colors  ",
        ] {
            let text = format!("{header}\n0 1 2 3\n1 4 5 6\n");
            let cmap = PixColormap::read_from_bytes(text.as_bytes()).unwrap();
            assert_eq!(cmap.depth(), 8);
            assert_eq!(cmap.get_rgb(1), Some((4, 5, 6)));
        }
        for header in ["Pixcmap depth = 8 bpp; 2 colors", "Pixcmap: depth = 8 bpp 2 colors"] {
            let text = format!("{header}\n0 1 2 3\n1 4 5 6\n");
            assert!(PixColormap::read_from_bytes(text.as_bytes()).is_err());
        }
    }

    #[test]
    fn test_read_bad_counts() {
        for n in [0, 1, 257] {
            let text = format!("Pixcmap: depth = 8 bpp; {n} colors\n");
            assert!(matches!(
                PixColormap::read_from_bytes(text.as_bytes()),
                Err(Error::MalformedInput(_))
            ));
        }
        // 5 colors do not fit in a 2 bpp colormap
        let text = "Pixcmap: depth = 2 bpp; 5 colors\n";
        assert!(PixColormap::read_from_bytes(text.as_bytes()).is_err());
    }

    #[test]
    fn test_read_bad_depth() {
        let text = "Pixcmap: depth = 3 bpp; 2 colors\n0 0 0 0\n1 1 1 1\n";
        assert!(matches!(
            PixColormap::read_from_bytes(text.as_bytes()),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_read_short_or_bad_rows() {
        let short = "Pixcmap: depth = 1 bpp; 2 colors\n0 0 0\n1 1 1 1\n";
        assert!(PixColormap::read_from_bytes(short.as_bytes()).is_err());

        let truncated = "Pixcmap: depth = 1 bpp; 2 colors\n0 0 0 0\n";
        assert!(PixColormap::read_from_bytes(truncated.as_bytes()).is_err());

        let big = "Pixcmap: depth = 1 bpp; 2 colors\n0 0 0 256\n1 1 1 1\n";
        assert!(PixColormap::read_from_bytes(big.as_bytes()).is_err());

        let negative = "Pixcmap: depth = 1 bpp; 2 colors\n0 -1 0 0\n1 1 1 1\n";
        assert!(PixColormap::read_from_bytes(negative.as_bytes()).is_err());
    }

    #[test]
    fn test_read_invalid_data() {
        assert!(PixColormap::read_from_bytes(b"not valid").is_err());
        assert!(PixColormap::read_from_bytes(b"").is_err());
    }

    #[test]
    fn test_read_long_line() {
        let mut text = "Pixcmap: depth = 1 bpp; 2 colors\n".to_string();
        text.push_str(&" ".repeat(MAX_LINE_LEN + 10));
        text.push_str("0 0 0 0\n1 1 1 1\n");
        assert!(matches!(
            PixColormap::read_from_bytes(text.as_bytes()),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_file_roundtrip() {
        let cmap = sample();
        let dir = std::env::temp_dir().join("pixcmap_test_serial");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test_cmap.txt");

        cmap.write_to_file(&path).unwrap();
        let restored = PixColormap::read_from_file(&path).unwrap();
        assert_eq!(restored, cmap);

        std::fs::remove_dir_all(&dir).ok();
    }
}
