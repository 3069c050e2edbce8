//! Binary PPM (`P6`) codec
//!
//! Decoding is strict: the file must start with exactly `P6\n`, may carry
//! `#` comment lines right after the marker, then ASCII width, height and a
//! maximum channel value of 255, one whitespace byte, and exactly
//! `width * height` RGB triples. Encoding writes the same header followed by
//! the raw row-major pixel bytes.

use crate::io::error::{Result, TileError, WithPath, allocation_error, decode_error};
use image::RgbImage;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Format marker including its terminating newline
pub const MAGIC: &[u8; 3] = b"P6\n";

/// The only supported maximum channel value
pub const MAX_CHANNEL_VALUE: u32 = 255;

const BYTES_PER_PIXEL: usize = 3;

/// Decode a PPM stream into an RGB image
///
/// # Errors
///
/// Returns a decode error if the marker, header or maximum value is wrong,
/// or if the stream ends before all pixel data is read
pub fn decode(mut reader: impl BufRead) -> Result<RgbImage> {
    let mut marker = [0u8; 3];
    reader
        .read_exact(&mut marker)
        .map_err(|e| decode_error(&format!("truncated format marker: {e}")))?;
    if &marker != MAGIC {
        return Err(decode_error(&format!(
            "invalid format marker {:?}, expected \"P6\\n\"",
            String::from_utf8_lossy(&marker)
        )));
    }

    skip_comment_lines(&mut reader)?;

    let width = read_header_value(&mut reader, "width")?;
    let height = read_header_value(&mut reader, "height")?;
    let max_value = read_header_value(&mut reader, "max value")?;
    if max_value != MAX_CHANNEL_VALUE {
        return Err(decode_error(&format!(
            "max value {max_value} is not {MAX_CHANNEL_VALUE}"
        )));
    }

    match read_byte(&mut reader)? {
        Some(byte) if byte.is_ascii_whitespace() => {}
        _ => return Err(decode_error(&"missing separator after max value")),
    }

    let length = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| allocation_error("pixel buffer", &format!("{width}x{height} overflows")))?;

    // Sized by the bytes present, not by the header
    let limit = u64::try_from(length).map_err(|e| allocation_error("pixel buffer", &e))?;
    let mut pixels = Vec::new();
    reader
        .take(limit)
        .read_to_end(&mut pixels)
        .map_err(|e| decode_error(&format!("read failed: {e}")))?;
    if pixels.len() != length {
        return Err(decode_error(&format!(
            "truncated pixel data, expected {} pixels, found {} bytes",
            length / BYTES_PER_PIXEL,
            pixels.len()
        )));
    }

    RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| decode_error(&"pixel buffer does not match dimensions"))
}

/// Encode an RGB image as a PPM stream
///
/// # Errors
///
/// Returns an error if writing to `writer` fails
pub fn encode(image: &RgbImage, mut writer: impl Write) -> Result<()> {
    write!(
        writer,
        "P6\n{} {}\n{MAX_CHANNEL_VALUE}\n",
        image.width(),
        image.height()
    )?;
    writer.write_all(image.as_raw())?;
    writer.flush()?;
    Ok(())
}

/// Load and decode a PPM file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or fails to decode
pub fn load(path: &Path) -> Result<RgbImage> {
    let file = File::open(path).map_err(|e| TileError::FileSystem {
        path: path.to_path_buf(),
        operation: "open",
        source: e,
    })?;

    decode(BufReader::new(file)).with_path(path)
}

/// Encode an image into a PPM file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn store(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| TileError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    encode(image, BufWriter::new(file)).map_err(|error| match error {
        TileError::FileSystem { source, .. } => TileError::FileSystem {
            path: path.to_path_buf(),
            operation: "write",
            source,
        },
        other => other,
    })
}

fn peek_byte(reader: &mut impl BufRead) -> Result<Option<u8>> {
    let buffer = reader
        .fill_buf()
        .map_err(|e| decode_error(&format!("read failed: {e}")))?;
    Ok(buffer.first().copied())
}

fn read_byte(reader: &mut impl BufRead) -> Result<Option<u8>> {
    let byte = peek_byte(reader)?;
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

// Only lines directly after the marker may be comments
fn skip_comment_lines(reader: &mut impl BufRead) -> Result<()> {
    while peek_byte(reader)? == Some(b'#') {
        let mut line = Vec::new();
        reader
            .read_until(b'\n', &mut line)
            .map_err(|e| decode_error(&format!("read failed: {e}")))?;
    }
    Ok(())
}

fn read_header_value(reader: &mut impl BufRead, field: &str) -> Result<u32> {
    while let Some(byte) = peek_byte(reader)? {
        if !byte.is_ascii_whitespace() {
            break;
        }
        reader.consume(1);
    }

    let mut digits = String::new();
    while let Some(byte) = peek_byte(reader)? {
        if !byte.is_ascii_digit() {
            break;
        }
        digits.push(char::from(byte));
        reader.consume(1);
    }

    digits
        .parse()
        .map_err(|e| decode_error(&format!("invalid {field} in header: {e}")))
}
