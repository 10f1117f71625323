// docveil-core/src/geometry.rs
//! Spatial types for image redaction: OCR word boxes and the pixel
//! rectangles the rendering layer blacks out.
//!
//! These types are produced externally (the OCR service emits one
//! [`SpatialToken`] per recognized word) and consumed read-only here, so
//! they are plain serde-friendly value types.

use serde::{Deserialize, Serialize};

/// Pixel rectangle on a page image. Origin is the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// One OCR-recognized word-level unit on one page image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialToken {
    pub text: String,
    pub bbox: BoundingBox,
}

impl SpatialToken {
    pub fn new(text: impl Into<String>, left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            text: text.into(),
            bbox: BoundingBox {
                left,
                top,
                width,
                height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_json_round_trip() {
        let token = SpatialToken::new("9876543210", 12, 40, 180, 22);
        let json = serde_json::to_string(&token).unwrap();
        let back: SpatialToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
