use image::RgbaImage;
use std::path::Path;
use crate::error::Result;

/// Decode a sprite sheet from disk as 8-bit RGBA
pub fn load_sheet<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClipError;
    use image::Rgba;

    #[test]
    fn test_load_sheet_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        let mut sheet = RgbaImage::new(3, 2);
        sheet.put_pixel(1, 1, Rgba([10, 20, 30, 128]));
        sheet.save(&path).unwrap();

        assert_eq!(load_sheet(&path).unwrap(), sheet);
    }

    #[test]
    fn test_load_sheet_reports_image_errors() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"not a png").unwrap();

        assert!(matches!(load_sheet(&broken), Err(ClipError::ImageLoad(_))));
        assert!(matches!(load_sheet(dir.path().join("missing.png")), Err(ClipError::ImageLoad(_))));
    }
}
