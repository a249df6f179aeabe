// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Three drawing tools (plus their legacy aliases) take JSON topology descriptions and
//! return a status text followed by the rendered image.

mod server;
mod types;

pub use server::TopodrawMcp;
pub use types::{CloudDiagramParams, ClusterDiagramParams};
