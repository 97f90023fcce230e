use bytes::Bytes;

/// Which tier satisfied an image load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the in-memory cache.
    MemoryCache,
    /// Served from the on-disk store.
    DiskCache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemoryCache => write!(f, "memory"),
            Self::DiskCache => write!(f, "disk"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// Raw image bytes resolved for a feed photo.
#[derive(Debug, Clone)]
pub struct LoadedImageData {
    /// The image URL the bytes were loaded for.
    pub url: String,
    /// The raw (undecoded) image bytes.
    pub data: Bytes,
    /// Which tier produced the bytes.
    pub source: ImageSource,
}
