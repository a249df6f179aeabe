// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One diagram request from descriptors to image bytes.

use std::fmt;
use std::path::PathBuf;

use log::{debug, info, warn};
use thiserror::Error;

use crate::assemble::{build, AssemblyReport};
use crate::config::AppConfig;
use crate::layout::{layout, Direction};
use crate::model::DiagramRequest;
use crate::output::{sanitize_stem, OutputDir, OutputError};
use crate::registry::{DrawableNode, Platform, Registry, AWS, GCP, KUBERNETES};
use crate::render::{renderer_for, ImageFormat, RenderError, Renderer};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// A rendered image plus what assembly did to get there.
#[derive(Debug, Clone)]
pub struct RenderedDiagram {
    pub platform: Platform,
    pub name: String,
    pub path: PathBuf,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
    pub report: AssemblyReport,
}

impl RenderedDiagram {
    /// Status line reporting the drawn component count, then one line per diagnostic.
    pub fn status_text(&self) -> String {
        let mut text = format!(
            "{} architecture diagram '{}' created successfully with {} components.",
            self.platform.display_name(),
            self.name,
            self.report.components()
        );
        for diagnostic in &self.report.diagnostics {
            text.push_str("\n- ");
            text.push_str(&diagnostic.to_string());
        }
        text
    }
}

/// Renders requests into an output directory.
///
/// Each call builds a fresh graph; nothing carries over between calls except the
/// files left in the output directory.
pub struct DiagramDriver {
    output: OutputDir,
    renderer: Box<dyn Renderer>,
    direction: Direction,
}

impl fmt::Debug for DiagramDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramDriver")
            .field("output", &self.output)
            .field("format", &self.renderer.format())
            .field("direction", &self.direction)
            .finish()
    }
}

impl DiagramDriver {
    pub fn new(output: OutputDir, renderer: Box<dyn Renderer>, direction: Direction) -> Self {
        Self { output, renderer, direction }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.output_dir(),
            renderer_for(config.output.format, config.style.clone()),
            config.layout.direction,
        )
    }

    pub fn output(&self) -> &OutputDir {
        &self.output
    }

    pub fn format(&self) -> ImageFormat {
        self.renderer.format()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Assembles, lays out, renders, writes, and reads back one diagram.
    pub fn draw<K: DrawableNode>(
        &self,
        registry: &Registry<K>,
        request: &DiagramRequest,
    ) -> Result<RenderedDiagram, DriverError> {
        let platform = registry.platform();
        let name = if request.name.trim().is_empty() {
            platform.default_diagram_name().to_owned()
        } else {
            request.name.clone()
        };

        let (graph, report) = build(registry, request);
        for diagnostic in &report.diagnostics {
            debug!(diagram = name.as_str(); "{diagnostic}");
        }

        let placed = layout(&graph, self.direction);
        let bytes = self.renderer.render(&placed)?;
        let stem =
            sanitize_stem(&name).unwrap_or_else(|| platform.default_diagram_name().to_owned());
        let format = self.renderer.format();

        let path = self.output.write_image(&stem, format, &bytes).inspect_err(|err| {
            warn!(diagram = name.as_str(); "failed to write image: {err}");
        })?;
        let bytes = self.output.read_image(&path).inspect_err(|err| {
            warn!(diagram = name.as_str(); "failed to read back image: {err}");
        })?;

        info!(
            diagram = name.as_str(),
            platform = platform.display_name(),
            components = report.components(),
            edges = report.edges,
            path = path.display().to_string();
            "rendered diagram"
        );

        Ok(RenderedDiagram { platform, name, path, format, bytes, report })
    }

    pub fn draw_platform(
        &self,
        platform: Platform,
        request: &DiagramRequest,
    ) -> Result<RenderedDiagram, DriverError> {
        match platform {
            Platform::Kubernetes => self.draw(&KUBERNETES, request),
            Platform::Aws => self.draw(&AWS, request),
            Platform::Gcp => self.draw(&GCP, request),
        }
    }

    /// Dispatches by tool name, including the legacy names.
    pub fn draw_tool(
        &self,
        tool: &str,
        request: &DiagramRequest,
    ) -> Result<RenderedDiagram, DriverError> {
        let platform = Platform::from_tool_name(tool)
            .ok_or_else(|| DriverError::UnknownTool(tool.to_owned()))?;
        self.draw_platform(platform, request)
    }
}
