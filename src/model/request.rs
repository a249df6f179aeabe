// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One infrastructure resource to draw as a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentDescriptor {
    /// Component type keyword, e.g. "deployment", "ec2" or "gke" (case-insensitive)
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier used by groups and connections; unique within one request
    pub name: String,
    /// Replica count; accepted but not drawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<f64>,
}

impl ComponentDescriptor {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self { kind: kind.into(), name: name.into(), replicas: None }
    }

    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = Some(f64::from(replicas));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseComponentError {
    #[error("component shorthand must not be empty")]
    Empty,
    #[error("invalid replica count '{0}' (expected a non-negative integer)")]
    InvalidReplicas(String),
}

/// Parses the `type:name[:replicas]` shorthand.
///
/// A missing name becomes `unnamed` and a missing replica count becomes `1`.
impl FromStr for ComponentDescriptor {
    type Err = ParseComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseComponentError::Empty);
        }

        let mut parts = s.splitn(3, ':');
        let kind = parts.next().unwrap_or_default();
        let name = parts.next().filter(|name| !name.is_empty()).unwrap_or("unnamed");
        let replicas = match parts.next() {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ParseComponentError::InvalidReplicas(raw.to_owned()))?,
            None => 1,
        };

        Ok(Self::new(kind, name).with_replicas(replicas))
    }
}

/// A named visual container (namespace, VPC) listing the components drawn inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GroupDescriptor {
    /// Label of the container; defaults to "Cluster" or "VPC"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Names of the components placed inside this container
    #[serde(default, rename = "components")]
    pub members: Vec<String>,
}

impl GroupDescriptor {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { name: Some(name.into()), members: members.into_iter().map(Into::into).collect() }
    }

    pub fn label_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }
}

/// A directed, optionally labelled edge between two named components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionDescriptor {
    /// Name of the source component
    pub from: String,
    /// Name of the target component
    pub to: String,
    /// Optional edge label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ConnectionDescriptor {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into(), label: None }
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label to draw; empty labels draw as unlabelled edges.
    pub fn display_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }
}

/// A fully defaulted diagram request, independent of the tool that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagramRequest {
    pub name: String,
    pub components: Vec<ComponentDescriptor>,
    pub groups: Vec<GroupDescriptor>,
    pub connections: Vec<ConnectionDescriptor>,
}

impl DiagramRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn component(mut self, kind: &str, name: &str) -> Self {
        self.components.push(ComponentDescriptor::new(kind, name));
        self
    }

    pub fn group(mut self, name: &str, members: &[&str]) -> Self {
        self.groups.push(GroupDescriptor::new(name, members.iter().copied()));
        self
    }

    pub fn connection(mut self, from: &str, to: &str, label: Option<&str>) -> Self {
        let connection = ConnectionDescriptor::new(from, to);
        self.connections.push(match label {
            Some(label) => connection.labelled(label),
            None => connection,
        });
        self
    }
}
