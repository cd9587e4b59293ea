//! Tests for raster buffer allocation, region access, and scaled drawing

#[cfg(test)]
mod tests {
    use seamweave::TextureError;
    use seamweave::raster::{CHANNELS, RasterBuffer};

    fn filled(width: usize, height: usize, pixel: [u8; CHANNELS]) -> RasterBuffer {
        let mut buffer = RasterBuffer::allocate(width, height).expect("allocation should succeed");
        for y in 0..height {
            for x in 0..width {
                buffer.set_pixel(x, y, pixel);
            }
        }
        buffer
    }

    // Tests zero-sized allocations are rejected
    // Verified by removing the dimension check
    #[test]
    fn test_allocate_rejects_zero_dimensions() {
        assert!(matches!(
            RasterBuffer::allocate(0, 4),
            Err(TextureError::InvalidDimension { .. })
        ));
        assert!(matches!(
            RasterBuffer::allocate(4, 0),
            Err(TextureError::InvalidDimension { .. })
        ));
    }

    // Tests allocation produces a zeroed buffer of the requested size
    // Verified by changing the fill value
    #[test]
    fn test_allocate_zero_initialized() {
        let buffer = RasterBuffer::allocate(3, 2).expect("allocation should succeed");
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.pixel(2, 1), Some([0, 0, 0, 0]));
        assert_eq!(buffer.pixel(3, 1), None, "x beyond width should be None");
        assert_eq!(buffer.pixel(0, 2), None, "y beyond height should be None");
    }

    // Tests written regions read back identically and neighbors are untouched
    // Verified by offsetting the write coordinates
    #[test]
    fn test_region_roundtrip() {
        let mut buffer = filled(8, 8, [10, 20, 30, 255]);
        let stamp = filled(2, 2, [200, 100, 50, 255]);

        buffer
            .write_region(3, 4, &stamp)
            .expect("write should succeed");
        let read = buffer.read_region(3, 4, 2, 2).expect("read should succeed");

        assert_eq!(read, stamp);
        assert_eq!(buffer.pixel(2, 4), Some([10, 20, 30, 255]));
        assert_eq!(buffer.pixel(5, 4), Some([10, 20, 30, 255]));
    }

    // Tests read_region returns a detached copy
    // Verified by making the region borrow the source array
    #[test]
    fn test_read_region_is_detached() {
        let buffer = filled(4, 4, [1, 2, 3, 4]);
        let mut region = buffer.read_region(0, 0, 2, 2).expect("read should succeed");

        region.set_pixel(0, 0, [9, 9, 9, 9]);

        assert_eq!(buffer.pixel(0, 0), Some([1, 2, 3, 4]));
    }

    // Tests region rectangles outside the buffer are rejected
    // Verified by dropping the containment check
    #[test]
    fn test_region_bounds_checks() {
        let mut buffer = filled(4, 4, [0, 0, 0, 0]);

        assert!(matches!(
            buffer.read_region(3, 0, 2, 1),
            Err(TextureError::OutOfBounds { .. })
        ));
        assert!(matches!(
            buffer.read_region(0, 3, 1, 2),
            Err(TextureError::OutOfBounds { .. })
        ));

        let stamp = filled(3, 3, [5, 5, 5, 5]);
        assert!(matches!(
            buffer.write_region(2, 2, &stamp),
            Err(TextureError::OutOfBounds { .. })
        ));
    }

    // Tests zero-sized region reads are rejected
    // Verified by allowing empty rectangles through
    #[test]
    fn test_read_region_rejects_empty_rectangle() {
        let buffer = filled(4, 4, [0, 0, 0, 0]);
        assert!(matches!(
            buffer.read_region(0, 0, 0, 1),
            Err(TextureError::InvalidDimension { .. })
        ));
        assert!(matches!(
            buffer.read_region(0, 0, 1, 0),
            Err(TextureError::InvalidDimension { .. })
        ));
    }

    // Tests scaled drawing fills the destination from a uniform source
    // Verified by shrinking the destination rectangle
    #[test]
    fn test_draw_scaled_fills_destination() {
        let source = filled(2, 2, [100, 150, 200, 255]);
        let mut dest = RasterBuffer::allocate(4, 4).expect("allocation should succeed");

        dest.draw_scaled(&source, 0, 0, 4, 4);

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(
                    dest.pixel(x, y),
                    Some([100, 150, 200, 255]),
                    "pixel ({x}, {y}) should match the uniform source"
                );
            }
        }
    }

    // Tests destinations hanging over the buffer edge are clipped, not errors
    // Verified by removing the clip bounds
    #[test]
    fn test_draw_scaled_clips_destination() {
        let source = filled(2, 2, [50, 60, 70, 255]);
        let mut dest = RasterBuffer::allocate(4, 4).expect("allocation should succeed");

        dest.draw_scaled(&source, 2, 2, 4, 4);
        dest.draw_scaled(&source, -10, -10, 4, 4);

        assert_eq!(dest.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(dest.pixel(2, 2), Some([50, 60, 70, 255]));
        assert_eq!(dest.pixel(3, 3), Some([50, 60, 70, 255]));
    }

    // Tests zero-sized destinations draw nothing
    // Verified by treating zero extent as full extent
    #[test]
    fn test_draw_scaled_empty_destination() {
        let source = filled(2, 2, [9, 9, 9, 255]);
        let mut dest = RasterBuffer::allocate(4, 4).expect("allocation should succeed");

        dest.draw_scaled(&source, 0, 0, 0, 4);
        dest.draw_scaled(&source, 0, 0, 4, 0);

        assert_eq!(dest.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    // Tests conversion to and from the image crate preserves every byte
    // Verified by transposing the pixel order
    #[test]
    fn test_image_conversion_roundtrip() {
        let mut image = image::RgbaImage::new(3, 2);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            *pixel = image::Rgba([x as u8 * 40, y as u8 * 80, 7, 255]);
        }

        let buffer = RasterBuffer::from_image(&image).expect("conversion should succeed");
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.pixel(2, 1), Some([80, 80, 7, 255]));

        let back = buffer.to_image().expect("conversion should succeed");
        assert_eq!(back.as_raw(), image.as_raw());
    }

    // Tests zeroed_like matches dimensions and clears contents
    // Verified by reusing the source data
    #[test]
    fn test_zeroed_like() {
        let buffer = filled(5, 3, [1, 2, 3, 4]);
        let blank = buffer.zeroed_like();

        assert_eq!(blank.width(), 5);
        assert_eq!(blank.height(), 3);
        assert_eq!(blank.pixel(4, 2), Some([0, 0, 0, 0]));
    }
}
