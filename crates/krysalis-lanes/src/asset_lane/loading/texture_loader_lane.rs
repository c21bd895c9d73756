// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Texture decoding.

use super::AssetLoaderLane;
use anyhow::Context;
use krysalis_core::renderer::{PixelBuffer, TextureDescriptor, TextureFormat};

/// An image decoded to tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Row-major RGBA8 pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DecodedImage {
    /// The descriptor of a single-level RGBA8 texture that can hold this image.
    pub fn descriptor(&self) -> TextureDescriptor {
        TextureDescriptor {
            width: self.width,
            height: self.height,
            levels: 1,
            format: TextureFormat::Rgba8,
        }
    }

    /// Moves the pixels into an upload buffer.
    pub fn into_pixel_buffer(self) -> PixelBuffer {
        PixelBuffer::new(self.pixels, self.width, self.height, TextureFormat::Rgba8)
    }
}

/// A lane dedicated to loading and decoding texture files on the CPU.
#[derive(Clone, Debug, Default)]
pub struct TextureLoaderLane;

impl AssetLoaderLane<DecodedImage> for TextureLoaderLane {
    fn load(
        &self,
        bytes: &[u8],
    ) -> Result<DecodedImage, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;

        // Always four channels, whatever the source layout.
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(DecodedImage {
            pixels: rgba_img.into_raw(),
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_rgb_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_rgb_source_is_expanded_to_rgba() {
        let image = TextureLoaderLane.load(&encode_rgb_png(3, 2)).unwrap();
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.pixels.len(), 3 * 2 * 4);
        assert_eq!(&image.pixels[..4], &[10, 20, 30, 255]);

        let descriptor = image.descriptor();
        assert_eq!(descriptor.levels, 1);
        assert_eq!(descriptor.format, TextureFormat::Rgba8);
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let err = TextureLoaderLane.load(b"definitely not an image").unwrap_err();
        assert!(err.to_string().contains("decode"));
    }

    #[test]
    fn test_pixel_buffer_matches_descriptor() {
        let buffer = TextureLoaderLane
            .load(&encode_rgb_png(4, 4))
            .unwrap()
            .into_pixel_buffer();
        assert_eq!(buffer.data().len(), buffer.expected_len());
    }
}
