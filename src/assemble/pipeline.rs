// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use super::builder::DiagramBuilder;
use crate::model::{
    ComponentDescriptor, ConnectionDescriptor, DiagramGraph, DiagramRequest, GroupDescriptor,
    NodeId,
};
use crate::registry::{DrawableNode, Registry};

/// Component name → drawn node, in the order nodes were created.
pub type Pool = IndexMap<String, NodeId>;

/// A descriptor whose type has no registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub name: String,
    pub kind: String,
}

/// A descriptor paired with the node kind its type resolved to.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a, K> {
    pub descriptor: &'a ComponentDescriptor,
    pub kind: K,
}

/// Something the pipeline dropped or overrode instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownType { component: String, kind: String, expected: Vec<&'static str> },
    /// An earlier descriptor with the same name was replaced by a later one.
    Superseded { component: String, kind: String, by: String },
    /// A component listed by more than one group stays in the first.
    ContestedMembership { component: String, kept: String, ignored: String },
    UnknownMember { group: String, member: String },
    UnresolvedEndpoint { from: String, to: String, missing: Vec<String> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType { component, kind, expected } => write!(
                f,
                "skipped component '{component}': unknown type '{kind}' (expected one of: {})",
                expected.join(", ")
            ),
            Self::Superseded { component, kind, by } => {
                write!(f, "component '{component}' of type '{kind}' replaced by a later '{by}'")
            }
            Self::ContestedMembership { component, kept, ignored } => write!(
                f,
                "component '{component}' already placed in group '{kept}'; ignored in '{ignored}'"
            ),
            Self::UnknownMember { group, member } => {
                write!(f, "group '{group}' lists unknown component '{member}'")
            }
            Self::UnresolvedEndpoint { from, to, missing } => write!(
                f,
                "skipped connection '{from}' -> '{to}': no component named {}",
                missing.iter().map(|name| format!("'{name}'")).collect::<Vec<_>>().join(" or ")
            ),
        }
    }
}

/// Outcome of assembling one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub pool: Pool,
    pub edges: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl AssemblyReport {
    pub fn components(&self) -> usize {
        self.pool.len()
    }
}

pub fn resolve<'a, K: DrawableNode>(
    registry: &Registry<K>,
    descriptor: &'a ComponentDescriptor,
) -> Result<Resolved<'a, K>, Unresolved> {
    match registry.lookup(&descriptor.kind) {
        Some(kind) => Ok(Resolved { descriptor, kind }),
        None => Err(Unresolved { name: descriptor.name.clone(), kind: descriptor.kind.clone() }),
    }
}

/// Resolves every descriptor and keeps the last resolvable one per name.
///
/// The map keeps the position where a name first resolved, so a replaced component is
/// still drawn where the caller first listed it.
fn effective<'a, K: DrawableNode>(
    registry: &Registry<K>,
    descriptors: &'a [ComponentDescriptor],
    diagnostics: &mut Vec<Diagnostic>,
) -> IndexMap<&'a str, Resolved<'a, K>> {
    let mut claimable: IndexMap<&'a str, Resolved<'a, K>> = IndexMap::new();
    for descriptor in descriptors {
        match resolve(registry, descriptor) {
            Ok(resolved) => {
                if let Some(previous) = claimable.insert(descriptor.name.as_str(), resolved) {
                    diagnostics.push(Diagnostic::Superseded {
                        component: descriptor.name.clone(),
                        kind: previous.descriptor.kind.clone(),
                        by: descriptor.kind.clone(),
                    });
                }
            }
            Err(Unresolved { name, kind }) => diagnostics.push(Diagnostic::UnknownType {
                component: name,
                kind,
                expected: registry.keywords().collect(),
            }),
        }
    }
    claimable
}

/// Resolves all descriptors into one scope, dropping unknown types.
pub fn resolve_all<K: DrawableNode>(
    builder: &mut DiagramBuilder<K>,
    registry: &Registry<K>,
    descriptors: &[ComponentDescriptor],
    diagnostics: &mut Vec<Diagnostic>,
) -> Pool {
    let scope = builder.current();
    effective(registry, descriptors, diagnostics)
        .into_iter()
        .filter_map(|(name, resolved)| {
            Some((name.to_owned(), builder.add_node(scope, name, resolved.kind)?))
        })
        .collect()
}

/// Places components into groups, then sweeps the rest to the top level.
///
/// Groups are opened in input order and the first group listing a name claims it. Every
/// resolvable component is drawn exactly once.
pub fn assemble<K: DrawableNode>(
    builder: &mut DiagramBuilder<K>,
    registry: &Registry<K>,
    descriptors: &[ComponentDescriptor],
    groups: &[GroupDescriptor],
    default_group_label: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Pool {
    let claimable = effective(registry, descriptors, diagnostics);
    let mut pool = Pool::with_capacity(claimable.len());
    let mut owners: IndexMap<&str, &str> = IndexMap::new();
    let described: HashSet<&str> =
        descriptors.iter().map(|descriptor| descriptor.name.as_str()).collect();

    for group in groups {
        let label = group.label_or(default_group_label);
        let scope = builder.open_group(label);
        let members: HashSet<&str> = group.members.iter().map(String::as_str).collect();

        for member in &group.members {
            if !described.contains(member.as_str()) {
                diagnostics.push(Diagnostic::UnknownMember {
                    group: label.to_owned(),
                    member: member.clone(),
                });
            }
        }

        for (&name, resolved) in &claimable {
            if !members.contains(name) {
                continue;
            }
            if let Some(&kept) = owners.get(name) {
                diagnostics.push(Diagnostic::ContestedMembership {
                    component: name.to_owned(),
                    kept: kept.to_owned(),
                    ignored: label.to_owned(),
                });
                continue;
            }
            if let Some(id) = builder.add_node(scope, name, resolved.kind) {
                pool.insert(name.to_owned(), id);
                owners.insert(name, label);
            }
        }
    }

    let root = builder.root();
    for (&name, resolved) in &claimable {
        if pool.contains_key(name) {
            continue;
        }
        if let Some(id) = builder.add_node(root, name, resolved.kind) {
            pool.insert(name.to_owned(), id);
        }
    }
    pool
}

/// Creates one edge per connection whose endpoints are both in the pool.
pub fn connect_all<K: DrawableNode>(
    builder: &mut DiagramBuilder<K>,
    pool: &Pool,
    connections: &[ConnectionDescriptor],
    diagnostics: &mut Vec<Diagnostic>,
) -> usize {
    let mut created = 0;
    for connection in connections {
        match (pool.get(&connection.from), pool.get(&connection.to)) {
            (Some(&from), Some(&to)) => {
                builder.connect(from, to, connection.display_label());
                created += 1;
            }
            (from, to) => {
                let missing = [(from, &connection.from), (to, &connection.to)]
                    .into_iter()
                    .filter(|(node, _)| node.is_none())
                    .map(|(_, name)| name.clone())
                    .collect();
                diagnostics.push(Diagnostic::UnresolvedEndpoint {
                    from: connection.from.clone(),
                    to: connection.to.clone(),
                    missing,
                });
            }
        }
    }
    created
}

/// Runs grouping and edge materialisation for one request.
pub fn build<K: DrawableNode>(
    registry: &Registry<K>,
    request: &DiagramRequest,
) -> (DiagramGraph<K>, AssemblyReport) {
    let mut builder = DiagramBuilder::new(request.name.as_str());
    let mut diagnostics = Vec::new();
    let pool = assemble(
        &mut builder,
        registry,
        &request.components,
        &request.groups,
        registry.platform().default_group_label(),
        &mut diagnostics,
    );
    let edges = connect_all(&mut builder, &pool, &request.connections, &mut diagnostics);
    (builder.finish(), AssemblyReport { pool, edges, diagnostics })
}
