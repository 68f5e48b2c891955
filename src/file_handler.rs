use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tempfile::NamedTempFile;

use crate::error::{ExportError, ExportResult};
use crate::surface::Surface;

/// Writes the flattened canvas to `path` as PNG.
///
/// The image is encoded into a temporary file next to the destination and
/// renamed over it, so a failed export never leaves a partial file behind.
pub fn export_png(surface: &Surface, path: &Path) -> ExportResult<()> {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(ExportError::UnsupportedFormat(path.to_path_buf()));
    }

    let (width, height) = (surface.width(), surface.height());
    let image = RgbaImage::from_raw(width, height, surface.to_rgba_bytes())
        .ok_or(ExportError::Buffer { width, height })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        image.write_to(&mut writer, ImageFormat::Png)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| ExportError::Io(err.error))?;

    log::info!("Exported {}x{} canvas to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Rgba;

    #[test]
    fn test_rejects_non_png_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.jpg");
        let result = export_png(&Surface::new(2, 2), &path);
        assert!(matches!(result, Err(ExportError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_written_png_decodes_to_same_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut surface = Surface::filled(3, 2, Rgba::WHITE);
        surface.put(1, 1, Rgba::new(10, 20, 30, 128));

        export_png(&surface, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30, 128]);
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
