// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::Arc;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};

use super::vector::SvgRenderer;
use super::{ImageFormat, RenderError, RenderStyle, Renderer};
use crate::layout::DiagramLayout;

/// Rasterises the SVG rendering to PNG.
///
/// System fonts are loaded once per renderer and shared across renders.
pub struct PngRenderer {
    svg: SvgRenderer,
    fonts: Arc<fontdb::Database>,
}

impl PngRenderer {
    pub fn new(style: RenderStyle) -> Self {
        let mut fonts = fontdb::Database::new();
        fonts.load_system_fonts();
        log::debug!(faces = fonts.len(); "loaded system fonts");
        Self { svg: SvgRenderer::new(style), fonts: Arc::new(fonts) }
    }
}

impl fmt::Debug for PngRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PngRenderer")
            .field("style", self.svg.style())
            .field("font_faces", &self.fonts.len())
            .finish()
    }
}

fn primary_font(families: &str) -> Option<String> {
    families
        .split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
        .find(|family| !family.is_empty())
        .map(str::to_owned)
}

impl Renderer for PngRenderer {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    fn render(&self, layout: &DiagramLayout) -> Result<Vec<u8>, RenderError> {
        let scale = self.svg.style().scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidScale(scale));
        }

        let document = self.svg.document(layout).to_string();
        let mut options = Options { fontdb: Arc::clone(&self.fonts), ..Options::default() };
        if let Some(family) = primary_font(&self.svg.style().font_family) {
            options.font_family = family;
        }
        let tree = Tree::from_str(&document, &options)?;

        let size = tree.size().to_int_size();
        let width = (size.width() as f32 * scale).ceil().max(1.0) as u32;
        let height = (size.height() as f32 * scale).ceil().max(1.0) as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;

        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        pixmap.encode_png().map_err(|err| RenderError::Encode(err.to_string()))
    }
}
