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

//! Texture handles and the pixel upload descriptor.

use std::fmt;

/// A handle to a texture created by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Pixel formats accepted for texture uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8 bits per channel RGBA.
    Rgba8,
}

impl TextureFormat {
    /// Returns the size of one pixel in bytes.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgba8 => 4,
        }
    }
}

/// Describes a 2D texture to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Number of mip levels.
    pub levels: u8,
    /// Internal pixel format.
    pub format: TextureFormat,
}

type ReleaseCallback = Box<dyn FnOnce(Vec<u8>) + Send>;

/// Pixel data handed to the engine for an asynchronous texture upload.
///
/// The buffer is moved into the engine, which keeps it alive until the upload has
/// completed and then calls [`PixelBuffer::release`]. The optional release callback
/// receives the pixel memory back at that point.
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: TextureFormat,
    on_release: Option<ReleaseCallback>,
}

impl PixelBuffer {
    /// Wraps tightly packed pixel data of the given dimensions.
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
            on_release: None,
        }
    }

    /// Attaches a callback invoked once the engine is done with the pixels.
    pub fn with_release_callback(mut self, callback: impl FnOnce(Vec<u8>) + Send + 'static) -> Self {
        self.on_release = Some(Box::new(callback));
        self
    }

    /// The raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format of the data.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// The byte length implied by the dimensions and format.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }

    /// Ends the buffer's lifetime, handing the memory to the release callback if any.
    ///
    /// Engines call this when the upload has completed. Dropping the buffer has the
    /// same effect, so a failed upload still runs the callback.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for PixelBuffer {
    fn drop(&mut self) {
        if let Some(callback) = self.on_release.take() {
            callback(std::mem::take(&mut self.data));
        }
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("len", &self.data.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("has_release_callback", &self.on_release.is_some())
            .finish()
    }
}
