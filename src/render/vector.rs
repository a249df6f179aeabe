// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use svg::node::element::{Definitions, Group, Marker, Path, Rectangle, Text};
use svg::Document;

use super::{ImageFormat, RenderError, RenderStyle, Renderer};
use crate::layout::{
    text_width, DiagramLayout, PlacedEdge, PlacedGroup, PlacedNode, EDGE_FONT_SIZE,
    GROUP_FONT_SIZE, KIND_FONT_SIZE, NAME_FONT_SIZE, TITLE_FONT_SIZE,
};

const ARROW_ID: &str = "arrow";
const EDGE_COLOR: &str = "#5f6368";
const TEXT_COLOR: &str = "#202124";
const GROUP_FILL: &str = "#f8f9fa";
const GROUP_STROKE: &str = "#9aa0a6";

#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    style: RenderStyle,
}

impl SvgRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn document(&self, layout: &DiagramLayout) -> Document {
        let width = layout.size.width;
        let height = layout.size.height;

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .set("font-family", self.style.font_family.as_str())
            .add(arrow_marker())
            .add(
                Rectangle::new()
                    .set("width", width)
                    .set("height", height)
                    .set("fill", self.style.background_color.as_str()),
            )
            .add(
                Text::new(layout.title.as_str())
                    .set("x", layout.title_at.x)
                    .set("y", layout.title_at.y)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "hanging")
                    .set("font-size", TITLE_FONT_SIZE)
                    .set("font-weight", "bold")
                    .set("fill", TEXT_COLOR),
            );

        for group in &layout.groups {
            doc = doc.add(group_element(group));
        }
        for edge in &layout.edges {
            doc = doc.add(edge_element(edge));
        }
        for node in &layout.nodes {
            doc = doc.add(node_element(node));
        }
        doc
    }
}

impl Renderer for SvgRenderer {
    fn format(&self) -> ImageFormat {
        ImageFormat::Svg
    }

    fn render(&self, layout: &DiagramLayout) -> Result<Vec<u8>, RenderError> {
        Ok(self.document(layout).to_string().into_bytes())
    }
}

fn arrow_marker() -> Definitions {
    Definitions::new().add(
        Marker::new()
            .set("id", ARROW_ID)
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 7)
            .set("markerHeight", 7)
            .set("orient", "auto")
            .add(Path::new().set("d", "M 0 0 L 10 5 L 0 10 z").set("fill", EDGE_COLOR)),
    )
}

fn group_element(group: &PlacedGroup) -> Group {
    let rect = group.rect;
    Group::new()
        .set("class", "group")
        .add(
            Rectangle::new()
                .set("x", rect.x)
                .set("y", rect.y)
                .set("width", rect.width)
                .set("height", rect.height)
                .set("rx", 8)
                .set("fill", GROUP_FILL)
                .set("stroke", GROUP_STROKE)
                .set("stroke-dasharray", "6 4"),
        )
        .add(
            Text::new(group.label.as_str())
                .set("x", rect.x + 12.0)
                .set("y", rect.y + 18.0)
                .set("font-size", GROUP_FONT_SIZE)
                .set("font-weight", "bold")
                .set("fill", GROUP_STROKE),
        )
}

fn node_element(node: &PlacedNode) -> Group {
    let rect = node.rect;
    let center = rect.center();
    Group::new()
        .set("class", "node")
        .add(
            Rectangle::new()
                .set("x", rect.x)
                .set("y", rect.y)
                .set("width", rect.width)
                .set("height", rect.height)
                .set("rx", 6)
                .set("fill", node.category.fill_color())
                .set("stroke", node.category.stroke_color())
                .set("stroke-width", 1.5),
        )
        .add(
            Text::new(node.kind_title)
                .set("x", center.x)
                .set("y", center.y - 9.0)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-size", KIND_FONT_SIZE)
                .set("fill", node.category.stroke_color()),
        )
        .add(
            Text::new(node.name.as_str())
                .set("x", center.x)
                .set("y", center.y + 10.0)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-size", NAME_FONT_SIZE)
                .set("fill", TEXT_COLOR),
        )
}

fn edge_element(edge: &PlacedEdge) -> Group {
    let data = edge
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {} {}", if i == 0 { "M" } else { "L" }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");

    let mut group = Group::new().set("class", "edge").add(
        Path::new()
            .set("d", data)
            .set("fill", "none")
            .set("stroke", EDGE_COLOR)
            .set("stroke-width", 1.5)
            .set("marker-end", format!("url(#{ARROW_ID})")),
    );

    if let Some(label) = &edge.label {
        let width = text_width(label, EDGE_FONT_SIZE) + 8.0;
        let height = EDGE_FONT_SIZE + 6.0;
        group = group
            .add(
                Rectangle::new()
                    .set("x", edge.label_at.x - width / 2.0)
                    .set("y", edge.label_at.y - height / 2.0)
                    .set("width", width)
                    .set("height", height)
                    .set("rx", 3)
                    .set("fill", "#ffffff")
                    .set("fill-opacity", 0.85),
            )
            .add(
                Text::new(label.as_str())
                    .set("x", edge.label_at.x)
                    .set("y", edge.label_at.y)
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("font-size", EDGE_FONT_SIZE)
                    .set("fill", EDGE_COLOR),
            );
    }
    group
}
