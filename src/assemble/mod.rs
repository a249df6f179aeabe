// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Component resolution, grouping, and edge materialisation.
//!
//! The pipeline is written once over [`DrawableNode`](crate::registry::DrawableNode) and
//! runs against any of the platform registries. Dropped inputs are reported as
//! [`Diagnostic`] values rather than errors.

mod builder;
mod pipeline;

pub use builder::DiagramBuilder;
pub use pipeline::{
    assemble, build, connect_all, resolve, resolve_all, AssemblyReport, Diagnostic, Pool,
    Resolved, Unresolved,
};

#[cfg(test)]
mod tests;
