//! Tests for the download-and-decode adapter

#[cfg(test)]
mod tests {
    use seamweave::TextureError;
    use seamweave::fetch::adapter::ImageFetchAdapter;
    use seamweave::fetch::http::HttpClient;
    use seamweave::io::codec::encode_png;
    use seamweave::io::error::{Result, http_error};
    use seamweave::raster::RasterBuffer;

    // Mock transport returning a fixed response
    struct MockHttpClient {
        response: std::result::Result<Vec<u8>, String>,
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.response
                .clone()
                .map_err(|reason| http_error(&url, &reason))
        }
    }

    fn sample_png(width: usize, height: usize) -> Vec<u8> {
        let mut buffer = RasterBuffer::allocate(width, height).expect("allocation should succeed");
        for y in 0..height {
            for x in 0..width {
                buffer.set_pixel(x, y, [x as u8 * 9, y as u8 * 17, 3, 255]);
            }
        }
        encode_png(&buffer).expect("encoding should succeed")
    }

    // Tests a successful download decodes into a raster buffer
    // Verified by corrupting the downloaded bytes
    #[test]
    fn test_fetch_decodes_image() {
        let adapter = ImageFetchAdapter::new(MockHttpClient {
            response: Ok(sample_png(6, 4)),
        });

        let raster = adapter
            .fetch_raster("https://example.org/photo.png")
            .expect("fetch should succeed");

        assert_eq!(raster.width(), 6);
        assert_eq!(raster.height(), 4);
        assert_eq!(raster.pixel(5, 3), Some([45, 51, 3, 255]));
    }

    // Tests transport failures propagate as HTTP errors
    // Verified by retrying into a decode error
    #[test]
    fn test_fetch_propagates_transport_failure() {
        let adapter = ImageFetchAdapter::new(MockHttpClient {
            response: Err("connection refused".to_string()),
        });

        let result = adapter.fetch_raster("https://example.org/photo.png");
        match result {
            Err(TextureError::Http { url, reason }) => {
                assert_eq!(url, "https://example.org/photo.png");
                assert!(reason.contains("connection refused"));
            }
            _ => unreachable!("Expected Http error type"),
        }
    }

    // Tests undecodable payloads surface as decode failures
    // Verified by wrapping them as transport errors
    #[test]
    fn test_fetch_rejects_garbage_payload() {
        let adapter = ImageFetchAdapter::new(MockHttpClient {
            response: Ok(vec![0x00, 0x01, 0x02, 0x03]),
        });

        assert!(matches!(
            adapter.fetch_raster("https://example.org/photo.png"),
            Err(TextureError::Decode { .. })
        ));
    }

    // Tests empty payloads are rejected before format detection
    // Verified by decoding the empty byte string
    #[test]
    fn test_fetch_rejects_empty_payload() {
        let adapter = ImageFetchAdapter::new(MockHttpClient {
            response: Ok(Vec::new()),
        });

        assert!(matches!(
            adapter.fetch_raster("https://example.org/photo.png"),
            Err(TextureError::Decode { .. })
        ));
    }
}
