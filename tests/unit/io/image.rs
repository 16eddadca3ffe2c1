//! Tests for PNG sample indexing and result export

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgba, RgbaImage};
    use tilecollapse::AlgorithmError;
    use tilecollapse::io::image::{SampleImage, UNRESOLVED_COLOR, export_result_as_png};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    // Tests colours are sorted and indexed from 1
    // Verified by starting the mapping at 0
    #[test]
    fn test_from_rgba_indexes_from_one() {
        let sample = SampleImage::from_rgba(2, 2, &[RED, BLUE, BLUE, RED]).expect("valid sample");

        assert_eq!(sample.colors(), &[UNRESOLVED_COLOR, BLUE, RED]);
        assert_eq!(sample.color_count(), 2);
        assert_eq!((sample.width(), sample.height()), (2, 2));
        assert_eq!(sample.pixels().as_slice(), Some(&[2, 1, 1, 2][..]));
    }

    // Tests buffers that do not match the dimensions are rejected
    #[test]
    fn test_from_rgba_rejects_bad_shape() {
        assert!(matches!(
            SampleImage::from_rgba(3, 2, &[RED; 5]),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
        assert!(SampleImage::from_rgba(0, 0, &[]).is_err());
    }

    // Tests more colours than a byte index can hold are rejected
    // Verified by removing the colour count check
    #[test]
    fn test_too_many_colors() {
        let colors: Vec<[u8; 4]> = (0..=255u8).map(|v| [v, 0, 0, 255]).collect();
        assert!(matches!(
            SampleImage::from_rgba(256, 1, &colors),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
        assert!(SampleImage::from_rgba(255, 1, &colors[..255]).is_ok());
    }

    // Tests a PNG written to disk loads back with the same layout
    #[test]
    fn test_from_png_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sample.png");

        let img: RgbaImage = ImageBuffer::from_fn(3, 2, |x, _| {
            if x == 1 { Rgba(BLUE) } else { Rgba(RED) }
        });
        img.save(&path).expect("write sample");

        let sample = SampleImage::from_png_file(&path).expect("load sample");
        assert_eq!((sample.width(), sample.height()), (3, 2));
        assert_eq!(sample.pixels()[(1, 1)], 1);
        assert_eq!(sample.pixels()[(0, 2)], 2);
    }

    // Tests missing files surface as load errors with the path
    #[test]
    fn test_from_png_file_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.png");
        assert!(matches!(
            SampleImage::from_png_file(&missing),
            Err(AlgorithmError::ImageLoad { path, .. }) if path == missing
        ));
    }

    // Tests export writes one pixel per cell with index 0 transparent
    // Verified by disabling file save operation
    #[test]
    fn test_export_result_as_png() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("result.png");
        let colors = [UNRESOLVED_COLOR, RED, BLUE];

        export_result_as_png(&[1, 2, 0, 1, 1, 2], 3, 2, &colors, &path).expect("export");

        let img = image::open(&path).expect("read back").to_rgba8();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, RED);
        assert_eq!(img.get_pixel(1, 0).0, BLUE);
        assert_eq!(img.get_pixel(2, 0).0, UNRESOLVED_COLOR);
    }

    // Tests export rejects values without a colour and mismatched lengths
    // Verified by clamping unknown values to the last colour
    #[test]
    fn test_export_result_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("result.png");
        let colors = [UNRESOLVED_COLOR, RED];

        assert!(matches!(
            export_result_as_png(&[0, 5], 2, 1, &colors, &path),
            Err(AlgorithmError::InvalidTileIndex { index: 5, .. })
        ));
        assert!(export_result_as_png(&[0, 1, 1], 2, 1, &colors, &path).is_err());
        assert!(!path.exists());
    }
}
