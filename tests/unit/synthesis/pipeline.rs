//! Tests for configuration validation, orchestration, and metadata

#[cfg(test)]
mod tests {
    use seamweave::TextureError;
    use seamweave::io::codec;
    use seamweave::raster::RasterBuffer;
    use seamweave::synthesis::{BlendConfig, TextureSynthesizer};

    fn uniform(size: usize, value: u8) -> RasterBuffer {
        let mut buffer = RasterBuffer::allocate(size, size).expect("allocation should succeed");
        for y in 0..size {
            for x in 0..size {
                buffer.set_pixel(x, y, [value, value, value, 255]);
            }
        }
        buffer
    }

    // Tests the documented defaults
    // Verified by changing default values
    #[test]
    fn test_default_configuration() {
        let config = BlendConfig::default();
        assert_eq!(config.target_size, 2048);
        assert!(config.blend_edges);
        assert_eq!(config.blend_width, 64);
        assert!(!config.enhance_details);
    }

    // Tests each parameter bound produces a configuration error
    // Verified by loosening the bounds one at a time
    #[test]
    fn test_validation_bounds() {
        let valid = BlendConfig {
            target_size: 256,
            blend_edges: true,
            blend_width: 32,
            enhance_details: false,
        };
        assert!(valid.validate().is_ok());

        let zero_size = BlendConfig {
            target_size: 0,
            ..valid
        };
        assert!(matches!(
            zero_size.validate(),
            Err(TextureError::InvalidConfiguration { .. })
        ));

        let oversized = BlendConfig {
            target_size: 100_000,
            ..valid
        };
        assert!(matches!(
            oversized.validate(),
            Err(TextureError::InvalidConfiguration { .. })
        ));

        let zero_blend = BlendConfig {
            blend_width: 0,
            ..valid
        };
        assert!(matches!(
            zero_blend.validate(),
            Err(TextureError::InvalidConfiguration { .. })
        ));

        let wide_blend = BlendConfig {
            blend_width: 129,
            ..valid
        };
        assert!(matches!(
            wide_blend.validate(),
            Err(TextureError::InvalidConfiguration { .. })
        ));
    }

    // Tests the blend width bound holds even with blending disabled,
    // because the configuration type declares the invariant
    // Verified by gating validation on blend_edges
    #[test]
    fn test_blend_width_validated_without_blending() {
        let config = BlendConfig {
            target_size: 64,
            blend_edges: false,
            blend_width: 60,
            enhance_details: false,
        };
        assert!(matches!(
            config.validate(),
            Err(TextureError::InvalidConfiguration { .. })
        ));
    }

    // Tests construction rejects invalid configurations before any work
    // Verified by deferring validation to synthesize
    #[test]
    fn test_synthesizer_rejects_invalid_configuration() {
        let config = BlendConfig {
            target_size: 64,
            blend_edges: true,
            blend_width: 40,
            enhance_details: false,
        };
        assert!(matches!(
            TextureSynthesizer::new(config),
            Err(TextureError::InvalidConfiguration { .. })
        ));
    }

    // Tests non-square sources are stretched onto an exactly square canvas
    // Verified by preserving the aspect ratio
    #[test]
    fn test_output_dimensions_are_canonical() {
        let mut source = RasterBuffer::allocate(20, 10).expect("allocation should succeed");
        source.draw_scaled(&uniform(2, 77), 0, 0, 20, 10);

        let config = BlendConfig {
            target_size: 32,
            blend_edges: true,
            blend_width: 8,
            enhance_details: true,
        };
        let result = TextureSynthesizer::new(config)
            .expect("configuration should validate")
            .synthesize(&source)
            .expect("synthesis should succeed");

        let decoded = codec::decode(&result.bytes).expect("output should decode");
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 32);

        assert_eq!(result.metadata.width, 32);
        assert_eq!(result.metadata.height, 32);
        assert_eq!(result.metadata.source_width, 20);
        assert_eq!(result.metadata.source_height, 10);
        assert!(result.metadata.tileable);
        assert!(result.metadata.enhanced);
        assert_eq!(result.metadata.format, "png");
    }

    // Tests the uniform gray scenario: blending a uniform field with
    // itself changes nothing materially and alpha stays opaque
    // Verified by stamping mismatched edges
    #[test]
    fn test_uniform_gray_scenario() {
        let source = uniform(512, 128);
        let config = BlendConfig {
            target_size: 256,
            blend_edges: true,
            blend_width: 32,
            enhance_details: false,
        };

        let result = TextureSynthesizer::new(config)
            .expect("configuration should validate")
            .synthesize(&source)
            .expect("synthesis should succeed");

        let decoded = codec::decode(&result.bytes).expect("output should decode");
        assert_eq!(decoded.width(), 256);
        assert_eq!(decoded.height(), 256);

        for y in 0..256 {
            for x in 0..256 {
                let pixel = decoded.pixel(x, y).unwrap_or_default();
                for channel in pixel.iter().take(3) {
                    assert!(
                        channel.abs_diff(128) <= 1,
                        "channel at ({x}, {y}) drifted to {channel}"
                    );
                }
                assert_eq!(pixel.last().copied(), Some(255));
            }
        }
    }

    // Tests flags flow through to metadata when passes are disabled
    // Verified by hardcoding the tileable flag
    #[test]
    fn test_metadata_reflects_disabled_passes() {
        let source = uniform(8, 10);
        let config = BlendConfig {
            target_size: 16,
            blend_edges: false,
            blend_width: 4,
            enhance_details: false,
        };

        let result = TextureSynthesizer::new(config)
            .expect("configuration should validate")
            .synthesize(&source)
            .expect("synthesis should succeed");

        assert!(!result.metadata.tileable);
        assert!(!result.metadata.enhanced);
    }

    // Tests the human-readable metadata summary carries the key lines
    // Verified by dropping lines from the Display implementation
    #[test]
    fn test_metadata_display() {
        let source = uniform(8, 10);
        let config = BlendConfig {
            target_size: 16,
            blend_edges: true,
            blend_width: 4,
            enhance_details: false,
        };

        let result = TextureSynthesizer::new(config)
            .expect("configuration should validate")
            .synthesize(&source)
            .expect("synthesis should succeed");

        let summary = result.metadata.to_string();
        assert!(summary.contains("Size: 16x16 pixels"));
        assert!(summary.contains("Format: PNG (lossless)"));
        assert!(summary.contains("diffuse/albedo"));
        assert!(summary.contains("Tiling: seamless"));
        assert!(summary.contains("Source: 8x8 -> 16x16"));
    }
}
