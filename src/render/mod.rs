// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering for laid-out diagrams.
//!
//! [`SvgRenderer`] writes an SVG document with the `svg` crate; [`PngRenderer`]
//! rasterises that document with `resvg`. Both implement [`Renderer`], which the driver
//! holds as a trait object chosen from configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::DiagramLayout;

mod raster;
mod vector;

pub use raster::PngRenderer;
pub use vector::SvgRenderer;

/// Encoded image type produced by a renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown image format '{0}' (expected png or svg)")]
pub struct ParseImageFormatError(String);

impl FromStr for ImageFormat {
    type Err = ParseImageFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(ParseImageFormatError(value.to_owned())),
        }
    }
}

/// Visual settings shared by all renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background_color: String,
    pub font_family: String,
    /// Rasterisation scale for PNG output.
    pub scale: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_owned(),
            font_family: "Helvetica, Arial, sans-serif".to_owned(),
            scale: 1.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid scale {0}; expected a finite number greater than zero")]
    InvalidScale(f32),
    #[error("failed to parse generated SVG: {0}")]
    Parse(#[from] resvg::usvg::Error),
    #[error("cannot allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    Encode(String),
}

/// Turns a laid-out diagram into encoded image bytes.
pub trait Renderer: Send + Sync {
    fn format(&self) -> ImageFormat;

    fn render(&self, layout: &DiagramLayout) -> Result<Vec<u8>, RenderError>;
}

/// Builds the renderer for `format`.
pub fn renderer_for(format: ImageFormat, style: RenderStyle) -> Box<dyn Renderer> {
    match format {
        ImageFormat::Png => Box::new(PngRenderer::new(style)),
        ImageFormat::Svg => Box::new(SvgRenderer::new(style)),
    }
}
