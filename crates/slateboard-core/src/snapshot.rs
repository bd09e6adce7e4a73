//! Snapshots: the unit of undo/redo.

use crate::annotation::TextAnnotation;
use serde::{Deserialize, Serialize};

/// An opaque encoded bitmap (PNG bytes) captured from a surface.
///
/// Byte-for-byte comparable: two captures of identical pixels through the
/// same encoder produce equal images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

impl EncodedImage {
    /// Wrap already-encoded image bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume into the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Size of the encoded representation in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A point-in-time capture of the board: the surface pixels as an encoded
/// raster plus the committed text annotations.
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Encoded surface pixels at capture time.
    pub raster: EncodedImage,
    /// Text annotations at capture time (deep copy).
    pub texts: Vec<TextAnnotation>,
}

impl Snapshot {
    /// Capture a snapshot from an encoded raster and the live annotation
    /// list.
    pub fn capture(raster: EncodedImage, texts: &[TextAnnotation]) -> Self {
        Self {
            raster,
            texts: texts.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use kurbo::Point;

    #[test]
    fn test_capture_deep_copies_texts() {
        let mut texts = vec![TextAnnotation::new(
            "a",
            Point::new(1.0, 2.0),
            10.0,
            Rgba::black(),
        )];
        let snap = Snapshot::capture(EncodedImage::from_bytes(vec![1, 2, 3]), &texts);

        texts.push(TextAnnotation::new(
            "b",
            Point::new(3.0, 4.0),
            10.0,
            Rgba::black(),
        ));
        assert_eq!(snap.texts.len(), 1);
    }

    #[test]
    fn test_snapshot_equality() {
        let a = Snapshot::capture(EncodedImage::from_bytes(vec![9]), &[]);
        let b = Snapshot::capture(EncodedImage::from_bytes(vec![9]), &[]);
        assert_eq!(a, b);

        let c = Snapshot::capture(EncodedImage::from_bytes(vec![8]), &[]);
        assert_ne!(a, c);
    }
}
