//! PNG encoding for RGBA image data.
//!
//! Overlays are mostly transparent with a single stroke color plus its
//! anti-aliased edges, so they usually fit a palette. `create_png_auto`
//! writes an indexed PNG (color type 3) in that case and falls back to
//! RGBA (color type 6) otherwise.

use std::collections::HashMap;
use std::io::Write;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Create a PNG, indexed when the image has at most 256 distinct colors.
///
/// `pixels` holds straight (not premultiplied) RGBA, 4 bytes per pixel.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    check_len(pixels, width, height)?;
    match extract_palette(pixels) {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png(pixels, width, height),
    }
}

fn check_len(pixels: &[u8], width: usize, height: usize) -> Result<(), String> {
    if pixels.len() != width * height * 4 {
        return Err(format!(
            "expected {} bytes for {}x{} RGBA, got {}",
            width * height * 4,
            width,
            height,
            pixels.len()
        ));
    }
    Ok(())
}

/// Pack RGBA bytes into a u32 for faster hashing
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

/// Palette and per-pixel indices, or `None` past 256 colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);

        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push([chunk[0], chunk[1], chunk[2], chunk[3]]);
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Indexed PNG with a tRNS chunk carrying palette alpha.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> Result<Vec<u8>, String> {
    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // Trailing opaque entries may be omitted from tRNS
    let last_translucent = palette.iter().rposition(|c| c[3] != 255);
    if let Some(last) = last_translucent {
        let trns: Vec<u8> = palette[..=last].iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height, 1)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// RGBA PNG (color type 6).
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    check_len(pixels, width, height)?;
    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));

    let idat = deflate_scanlines(pixels, width, height, 4)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each scanline with filter type 0 and zlib-compress.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> std::io::Result<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in data.chunks_exact(stride.max(1)).take(height) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}
