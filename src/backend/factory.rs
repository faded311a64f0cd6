// Entry point for creating image sources: resolves the backend, then delegates.

use std::cell::OnceCell;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::ImageBackend;
use super::image_rs::ImageRsBackend;
use crate::config::settings::Settings;
use crate::source::ImageSource;
use crate::source::pixels::PixelBuffer;

/// Holds the active [`ImageBackend`] and the settings used to build the
/// default one.
///
/// The backend slot starts empty unless one is injected. The first call to
/// [`from_file`](Self::from_file), [`from_stream`](Self::from_stream) or
/// [`from_binary`](Self::from_binary) on an empty slot installs an
/// [`ImageRsBackend`], which then stays installed. The factory performs no
/// locking; share one per thread or serialize access yourself.
pub struct ImageSourceFactory {
    settings: Settings,
    backend: OnceCell<Arc<dyn ImageBackend>>,
}

impl Default for ImageSourceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSourceFactory {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            backend: OnceCell::new(),
        }
    }

    /// Start with `backend` already installed.
    pub fn with_backend(backend: Arc<dyn ImageBackend>) -> Self {
        let factory = Self::new();
        let _ = factory.backend.set(backend);
        factory
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The installed backend, if any. Does not install a default.
    pub fn backend(&self) -> Option<&Arc<dyn ImageBackend>> {
        self.backend.get()
    }

    /// Swap the backend slot and return what was there.
    ///
    /// Passing `None` empties the slot so the next decode installs the
    /// default again; pass the returned value back to restore.
    pub fn replace_backend(
        &mut self,
        backend: Option<Arc<dyn ImageBackend>>,
    ) -> Option<Arc<dyn ImageBackend>> {
        let previous = self.backend.take();
        if let Some(backend) = backend {
            let _ = self.backend.set(backend);
        }
        previous
    }

    /// Resolve the backend, installing the default if the slot is empty.
    fn resolve(&self) -> &Arc<dyn ImageBackend> {
        self.backend.get_or_init(|| {
            debug!(
                backend = ImageRsBackend::NAME,
                "no image backend installed, using default"
            );
            let backend: Arc<dyn ImageBackend> =
                Arc::new(ImageRsBackend::new(self.settings.clone()));
            backend
        })
    }

    /// Decode an image file. The source is named after `path`.
    pub fn from_file(
        &self,
        path: impl AsRef<Path>,
        quality: Option<i32>,
    ) -> crate::error::Result<ImageSource> {
        let quality = self.settings.resolve_quality(quality);
        self.resolve().decode_file(path.as_ref(), quality)
    }

    /// Decode the stream produced by `open`.
    ///
    /// The stream is dropped before this returns, whether decoding
    /// succeeded or not.
    pub fn from_stream<F>(
        &self,
        name: &str,
        mut open: F,
        quality: Option<i32>,
    ) -> crate::error::Result<ImageSource>
    where
        F: FnMut() -> std::io::Result<Box<dyn Read>>,
    {
        let quality = self.settings.resolve_quality(quality);
        self.resolve().decode_stream(name, &mut open, quality)
    }

    /// Decode the in-memory image produced by `bytes`.
    ///
    /// The provider's buffer is copied and the copy is decoded; neither is
    /// kept once this returns.
    pub fn from_binary<F, B>(
        &self,
        name: &str,
        mut bytes: F,
        quality: Option<i32>,
    ) -> crate::error::Result<ImageSource>
    where
        F: FnMut() -> B,
        B: AsRef<[u8]>,
    {
        let quality = self.settings.resolve_quality(quality);
        let mut copy = || bytes().as_ref().to_vec();
        self.resolve().decode_binary(name, &mut copy, quality)
    }

    /// Wrap an already-decoded bitmap. Never touches the backend slot.
    pub fn from_bitmap(&self, pixels: PixelBuffer, quality: Option<i32>) -> ImageSource {
        ImageSource::from_bitmap(pixels, Some(self.settings.resolve_quality(quality)))
    }
}
