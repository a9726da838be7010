use fontdue::FontSettings;
use std::path::Path;
use std::sync::Arc;

use super::error::{ResourceError, Result};

/// Cell size of the builtin fixed-width face, in pixels
pub const BUILTIN_GLYPH_SIZE: f32 = 8.0;

#[derive(Clone)]
enum Face {
    Builtin,
    TrueType(Arc<fontdue::Font>),
}

/// A font handle registered with the resource manager
#[derive(Clone)]
pub struct Font {
    face: Face,
    size: f32,
}

impl Font {
    /// The builtin 8x8 bitmap face. `size` is recorded but glyphs stay 8px.
    pub fn builtin(size: u32) -> Self {
        Self {
            face: Face::Builtin,
            size: size as f32,
        }
    }

    /// Parse a TrueType/OpenType file
    pub fn load(path: &Path, size: u32) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, size).map_err(|reason| ResourceError::Font {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_bytes(bytes: &[u8], size: u32) -> std::result::Result<Self, String> {
        let settings = FontSettings {
            scale: size as f32,
            ..FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(str::to_string)?;
        Ok(Self {
            face: Face::TrueType(Arc::new(font)),
            size: size as f32,
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn line_height(&self) -> f32 {
        match &self.face {
            Face::Builtin => BUILTIN_GLYPH_SIZE,
            Face::TrueType(font) => font
                .horizontal_line_metrics(self.size)
                .map(|m| m.new_line_size)
                .unwrap_or(self.size),
        }
    }

    /// Horizontal advance of `text` in pixels
    pub fn text_width(&self, text: &str) -> f32 {
        match &self.face {
            Face::Builtin => text.chars().count() as f32 * BUILTIN_GLYPH_SIZE,
            Face::TrueType(font) => text
                .chars()
                .map(|c| font.metrics(c, self.size).advance_width)
                .sum(),
        }
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let face = match self.face {
            Face::Builtin => "builtin",
            Face::TrueType(_) => "truetype",
        };
        f.debug_struct("Font")
            .field("face", &face)
            .field("size", &self.size)
            .finish()
    }
}
