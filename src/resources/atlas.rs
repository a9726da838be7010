//! Single-row shelf packing of tile bitmaps

use image::{imageops, RgbaImage};
use std::sync::Arc;

use super::config::TileSpec;
use super::tile::TileView;
use crate::math::Rect;

/// Clamp a spec's crop rectangle and draw offset to a `src_w` x `src_h` source.
///
/// An origin past the source edge resets that axis to the whole source; a
/// zero extent takes the rest of the source from the origin; an offset larger
/// than the final crop resets to 0.
pub fn sanitize_crop(spec: &TileSpec, src_w: u32, src_h: u32) -> (Rect, i32, i32) {
    let (x, w) = clamp_axis(spec.x, spec.w, src_w);
    let (y, h) = clamp_axis(spec.y, spec.h, src_h);

    let off_x = if spec.off_x > w as i32 { 0 } else { spec.off_x };
    let off_y = if spec.off_y > h as i32 { 0 } else { spec.off_y };

    (Rect::new(x, y, w, h), off_x, off_y)
}

fn clamp_axis(origin: u32, extent: u32, src: u32) -> (u32, u32) {
    let (origin, extent) = if src < origin {
        (0, src)
    } else if src < origin.saturating_add(extent) {
        (origin, src - origin)
    } else {
        (origin, extent)
    };

    if extent == 0 {
        (origin, src - origin)
    } else {
        (origin, extent)
    }
}

/// Packed bitmap holding every tile side by side
#[derive(Debug, Clone)]
pub struct Atlas {
    image: Arc<RgbaImage>,
}

impl Atlas {
    /// Pack `crops` of `sources` left to right. Returns the atlas and each
    /// tile's placement rectangle, in input order.
    pub fn pack(sources: &[RgbaImage], crops: &[Rect]) -> (Self, Vec<Rect>) {
        let width: u32 = crops.iter().map(|r| r.w).sum();
        let height = crops.iter().map(|r| r.h).max().unwrap_or(0);

        let mut image = RgbaImage::new(width, height);
        let mut placements = Vec::with_capacity(crops.len());
        let mut cursor = 0u32;

        for (src, crop) in sources.iter().zip(crops) {
            if crop.area() > 0 {
                let cropped = imageops::crop_imm(src, crop.x, crop.y, crop.w, crop.h).to_image();
                imageops::replace(&mut image, &cropped, cursor as i64, 0);
            }
            placements.push(Rect::new(cursor, 0, crop.w, crop.h));
            cursor += crop.w;
        }

        (
            Self {
                image: Arc::new(image),
            },
            placements,
        )
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Sub-bitmap view over `region`
    pub fn view(&self, region: Rect) -> TileView {
        TileView::new(Arc::clone(&self.image), region)
    }
}
