// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::model::{ComponentDescriptor, ConnectionDescriptor, DiagramRequest, GroupDescriptor};
use crate::registry::Platform;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterDiagramParams {
    /// Diagram title and image file name. Defaults to "k8s-architecture" when null.
    #[serde(default)]
    #[schemars(required)]
    pub name: Option<String>,
    /// Kubernetes resources to draw.
    pub components: Vec<ComponentDescriptor>,
    /// Named clusters or namespaces; each lists the component names drawn inside it.
    #[serde(default)]
    pub clusters: Vec<GroupDescriptor>,
    /// Directed edges between component names.
    #[serde(default)]
    pub connections: Vec<ConnectionDescriptor>,
}

impl ClusterDiagramParams {
    pub fn into_request(self) -> DiagramRequest {
        DiagramRequest {
            name: self
                .name
                .unwrap_or_else(|| Platform::Kubernetes.default_diagram_name().to_owned()),
            components: self.components,
            groups: self.clusters,
            connections: self.connections,
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CloudDiagramParams {
    /// Diagram title and image file name. Defaults to "aws-architecture" or
    /// "gcp-architecture" when null.
    #[serde(default)]
    #[schemars(required)]
    pub name: Option<String>,
    /// Cloud services to draw.
    pub components: Vec<ComponentDescriptor>,
    /// Named VPCs; each lists the component names drawn inside it.
    #[serde(default)]
    pub vpcs: Vec<GroupDescriptor>,
    /// Directed edges between component names.
    #[serde(default)]
    pub connections: Vec<ConnectionDescriptor>,
}

impl CloudDiagramParams {
    pub fn into_request(self, platform: Platform) -> DiagramRequest {
        DiagramRequest {
            name: self.name.unwrap_or_else(|| platform.default_diagram_name().to_owned()),
            components: self.components,
            groups: self.vpcs,
            connections: self.connections,
        }
    }
}
