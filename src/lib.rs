// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Topodraw: Kubernetes, AWS and GCP topology diagrams over MCP.
//!
//! A request flows through [`assemble`] (descriptors to graph), [`layout`] (graph to
//! geometry), [`render`] (geometry to PNG or SVG bytes) and [`output`] (bytes to a file),
//! tied together by [`driver::DiagramDriver`] and exposed as tools by [`mcp`].

pub mod assemble;
pub mod config;
pub mod driver;
pub mod layout;
pub mod mcp;
pub mod model;
pub mod output;
pub mod registry;
pub mod render;
