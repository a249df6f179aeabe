// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Request descriptors and the assembled diagram graph.
//!
//! Descriptors are what callers send; the graph is what the assembly pipeline produces
//! from them for one request and hands to layout and rendering.

pub mod graph;
pub mod ids;
pub mod request;

pub use graph::{DiagramGraph, GraphEdge, GraphGroup, GraphNode, Scope};
pub use ids::{EdgeId, GroupId, Id, NodeId};
pub use request::{
    ComponentDescriptor, ConnectionDescriptor, DiagramRequest, GroupDescriptor,
    ParseComponentError,
};
