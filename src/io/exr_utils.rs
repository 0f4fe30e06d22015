// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;

use exr::prelude::*;

/// Writes a rendered film to an OpenEXR file, one RGB sample per
/// pixel, linear values.
///
/// The exr prelude shadows std's `Result` with a single-generic alias,
/// so the full path keeps the signature unambiguous.
pub fn write_exr_to_file(bitmap: &Bitmap, file_path: &str) -> std::result::Result<(), Error> {
    let width = bitmap.width();
    let height = bitmap.height();
    log::info!("writing {}x{} OpenEXR image to {}", width, height, file_path);

    let pixels = bitmap.raw_copy();
    write_rgb_file(file_path, width, height, |x, y| pixels[y * width + x])?;

    log::info!("EXR written to {}", file_path);
    Ok(())
}

/* Tests for EXR output */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_write_exr_round_trips_through_disk() {
        let mut bitmap = Bitmap::new(4, 2);
        bitmap[(1, 0)] = Vector3f::new(0.25, 0.5, 0.75);

        let path = std::env::temp_dir().join("praline_exr_write_test.exr");
        let path_str = path.to_str().expect("temp path is valid utf-8");

        let result = write_exr_to_file(&bitmap, path_str);
        assert!(result.is_ok(), "write failed: {:?}", result.err());
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_write_exr_invalid_path_is_an_error() {
        let bitmap = Bitmap::new(2, 2);
        let result = write_exr_to_file(&bitmap, "/nonexistent-praline-dir/out.exr");
        assert!(result.is_err());
    }
}
