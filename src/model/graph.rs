// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{EdgeId, GroupId, NodeId};

/// Where a node is drawn: at the top level or inside one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Root,
    Group(GroupId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode<K> {
    id: NodeId,
    name: String,
    kind: K,
    scope: Scope,
}

impl<K: Copy> GraphNode<K> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphGroup {
    id: GroupId,
    label: String,
}

impl GraphGroup {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    label: Option<String>,
}

impl GraphEdge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// An assembled diagram: nodes placed in scopes, containers, and directed edges.
///
/// Element ids are dense indices in creation order. The graph is append-only; it is
/// grown through [`DiagramBuilder`](crate::assemble::DiagramBuilder) and then handed to
/// layout and rendering read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramGraph<K> {
    title: String,
    nodes: Vec<GraphNode<K>>,
    groups: Vec<GraphGroup>,
    edges: Vec<GraphEdge>,
}

impl<K: Copy> DiagramGraph<K> {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), nodes: Vec::new(), groups: Vec::new(), edges: Vec::new() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn nodes(&self) -> &[GraphNode<K>] {
        &self.nodes
    }

    pub fn groups(&self) -> &[GraphGroup] {
        &self.groups
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode<K>> {
        self.nodes.get(id.index())
    }

    pub fn group(&self, id: GroupId) -> Option<&GraphGroup> {
        self.groups.get(id.index())
    }

    pub fn nodes_in(&self, scope: Scope) -> impl Iterator<Item = &GraphNode<K>> + '_ {
        self.nodes.iter().filter(move |node| node.scope == scope)
    }

    /// Finds a node by component name; names are unique per graph when built by the
    /// assembly pipeline.
    pub fn node_named(&self, name: &str) -> Option<&GraphNode<K>> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn group_labelled(&self, label: &str) -> Option<&GraphGroup> {
        self.groups.iter().find(|group| group.label == label)
    }

    pub(crate) fn push_group(&mut self, label: String) -> GroupId {
        let id = GroupId::from_index(self.groups.len());
        self.groups.push(GraphGroup { id, label });
        id
    }

    pub(crate) fn push_node(&mut self, scope: Scope, name: String, kind: K) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(GraphNode { id, name, kind, scope });
        id
    }

    pub(crate) fn push_edge(&mut self, from: NodeId, to: NodeId, label: Option<String>) -> EdgeId {
        let id = EdgeId::from_index(self.edges.len());
        self.edges.push(GraphEdge { id, from, to, label });
        id
    }
}
