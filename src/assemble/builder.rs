// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{DiagramGraph, EdgeId, NodeId, Scope};
use crate::registry::DrawableNode;

/// Grows one [`DiagramGraph`] with explicit scope handles.
///
/// Containers are opened with [`open_group`](Self::open_group), which returns the
/// [`Scope`] to pass to [`add_node`](Self::add_node). Membership is fixed at creation;
/// nodes are never moved between scopes afterwards.
#[derive(Debug)]
pub struct DiagramBuilder<K> {
    graph: DiagramGraph<K>,
    open: Scope,
}

impl<K: DrawableNode> DiagramBuilder<K> {
    pub fn new(title: impl Into<String>) -> Self {
        Self { graph: DiagramGraph::new(title), open: Scope::Root }
    }

    pub fn root(&self) -> Scope {
        Scope::Root
    }

    /// The container opened most recently, or the root before any was opened.
    pub fn current(&self) -> Scope {
        self.open
    }

    /// Creates a container and returns the scope for its members.
    pub fn open_group(&mut self, label: impl Into<String>) -> Scope {
        let id = self.graph.push_group(label.into());
        self.open = Scope::Group(id);
        self.open
    }

    /// Adds a node to `scope`.
    ///
    /// Returns `None` when `scope` names a group this builder never opened; nothing is
    /// added in that case.
    pub fn add_node(&mut self, scope: Scope, name: impl Into<String>, kind: K) -> Option<NodeId> {
        if let Scope::Group(group) = scope {
            self.graph.group(group)?;
        }
        Some(self.graph.push_node(scope, name.into(), kind))
    }

    /// Adds a directed edge; parallel edges and self loops are kept.
    pub fn connect(&mut self, from: NodeId, to: NodeId, label: Option<&str>) -> EdgeId {
        self.graph.push_edge(from, to, label.map(str::to_owned))
    }

    pub fn graph(&self) -> &DiagramGraph<K> {
        &self.graph
    }

    pub fn finish(self) -> DiagramGraph<K> {
        self.graph
    }
}
