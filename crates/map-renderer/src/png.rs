//! PNG encoding for RGBA figure data.

use std::io::Write;

/// Create a PNG image from RGBA pixel data (color type 6).
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    if pixels.len() != width * height * 4 {
        return Err(format!(
            "pixel buffer is {} bytes, expected {} for {}x{} RGBA",
            pixels.len(),
            width * height * 4,
            width,
            height
        ));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(6); // color type (RGBA)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat_rgba(pixels, width, height)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let crc_data = [chunk_type.as_slice(), data].concat();
    let crc = crc32fast::hash(&crc_data);
    png.extend_from_slice(&crc.to_be_bytes());
}

/// Deflate RGBA image data for the IDAT chunk.
fn deflate_idat_rgba(
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, std::io::Error> {
    // Filter byte (0 = no filter) prefixes each scanline
    let mut uncompressed = Vec::with_capacity(height * (1 + width * 4));
    for y in 0..height {
        uncompressed.push(0);
        let row_start = y * width * 4;
        uncompressed.extend_from_slice(&pixels[row_start..row_start + width * 4]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_png_signature() {
        let pixels = vec![255u8; 2 * 2 * 4];
        let png = create_png(&pixels, 2, 2).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        // IHDR follows immediately
        assert_eq!(&png[12..16], b"IHDR");
        // Ends with IEND
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }

    #[test]
    fn test_create_png_rejects_bad_buffer() {
        assert!(create_png(&[0u8; 5], 2, 2).is_err());
    }

    #[test]
    fn test_create_png_deterministic() {
        let mut pixels = Vec::with_capacity(8 * 8 * 4);
        for i in 0..8 * 8 {
            pixels.extend_from_slice(&[(i % 256) as u8, 128, 200, 255]);
        }
        let a = create_png(&pixels, 8, 8).unwrap();
        let b = create_png(&pixels, 8, 8).unwrap();
        assert_eq!(a, b);
    }
}
