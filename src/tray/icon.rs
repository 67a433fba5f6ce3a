//! Embedded tray icon decoded into the StatusNotifier pixmap format

use anyhow::{anyhow, Context, Result};
use std::io::Cursor;

pub fn load_tray_icon() -> Result<ksni::Icon> {
    let icon_bytes = include_bytes!("../../assets/tray-icon.png");
    decode_icon(icon_bytes)
}

fn decode_icon(bytes: &[u8]) -> Result<ksni::Icon> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().context("Failed to read tray icon header")?;
    let buffer_size = reader
        .output_buffer_size()
        .context("Tray icon too large to decode")?;
    let mut buf = vec![0; buffer_size];
    let info = reader.next_frame(&mut buf).context("Failed to decode tray icon")?;
    let pixels = &buf[..info.buffer_size()];

    let rgba = match info.color_type {
        png::ColorType::Rgba => pixels.to_vec(),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(pixels.len() / 3 * 4);
            for chunk in pixels.chunks_exact(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(0xFF);
            }
            rgba
        }
        other => {
            return Err(anyhow!(
                "Unsupported tray icon color type {:?} (expected RGB or RGBA)",
                other
            ))
        }
    };

    Ok(ksni::Icon {
        width: info.width as i32,
        height: info.height as i32,
        data: rgba_to_argb(&rgba),
    })
}

/// StatusNotifier pixmaps are ARGB32 in network byte order
fn rgba_to_argb(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[3], px[0], px[1], px[2]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_to_argb_moves_alpha_first() {
        assert_eq!(rgba_to_argb(&[1, 2, 3, 4, 5, 6, 7, 8]), vec![4, 1, 2, 3, 8, 5, 6, 7]);
    }

    #[test]
    fn test_embedded_icon_decodes() {
        let icon = load_tray_icon().unwrap();
        assert_eq!((icon.width, icon.height), (32, 32));
        assert_eq!(icon.data.len(), 32 * 32 * 4);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode_icon(b"not a png").is_err());
    }
}
