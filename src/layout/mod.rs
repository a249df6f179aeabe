// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout for assembled diagrams.
//!
//! This module turns a [`DiagramGraph`](crate::model::DiagramGraph) into absolute
//! geometry: container boxes, node boxes, and edge polylines with label anchors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod geometry;
mod layered;

pub use geometry::{Point, Rect, Size};
pub use layered::{layout, DiagramLayout, PlacedEdge, PlacedGroup, PlacedNode};
pub(crate) use layered::{
    text_width, EDGE_FONT_SIZE, GROUP_FONT_SIZE, KIND_FONT_SIZE, NAME_FONT_SIZE,
    TITLE_FONT_SIZE,
};

/// Flow direction of the main axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "TB")]
    TopToBottom,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "LR",
            Self::TopToBottom => "TB",
        }
    }

    pub(crate) fn main(self, size: Size) -> f32 {
        match self {
            Self::LeftToRight => size.width,
            Self::TopToBottom => size.height,
        }
    }

    pub(crate) fn cross(self, size: Size) -> f32 {
        match self {
            Self::LeftToRight => size.height,
            Self::TopToBottom => size.width,
        }
    }

    pub(crate) fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Self::LeftToRight => Point { x: main, y: cross },
            Self::TopToBottom => Point { x: cross, y: main },
        }
    }

    pub(crate) fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Self::LeftToRight => Size { width: main, height: cross },
            Self::TopToBottom => Size { width: cross, height: main },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction '{0}' (expected LR or TB)")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "LR" => Ok(Self::LeftToRight),
            "TB" | "TD" => Ok(Self::TopToBottom),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests;
