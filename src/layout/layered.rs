// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use super::geometry::{Point, Rect, Size};
use super::Direction;
use crate::model::{DiagramGraph, GroupId, NodeId, Scope};
use crate::registry::{Category, DrawableNode};

const NODE_MIN_WIDTH: f32 = 140.0;
const NODE_HEIGHT: f32 = 56.0;
const NODE_PADDING: f32 = 12.0;
const GAP_MAIN: f32 = 72.0;
const GAP_CROSS: f32 = 28.0;
const GROUP_PADDING: f32 = 20.0;
const GROUP_LABEL_HEIGHT: f32 = 24.0;
const EMPTY_GROUP: Size = Size { width: 120.0, height: 40.0 };
const MARGIN: f32 = 40.0;
const TITLE_HEIGHT: f32 = 36.0;
const SELF_LOOP_REACH: f32 = 24.0;
const PARALLEL_LABEL_SHIFT: f32 = 16.0;

pub(crate) const NAME_FONT_SIZE: f32 = 13.0;
pub(crate) const KIND_FONT_SIZE: f32 = 11.0;
pub(crate) const GROUP_FONT_SIZE: f32 = 12.0;
pub(crate) const TITLE_FONT_SIZE: f32 = 16.0;
pub(crate) const EDGE_FONT_SIZE: f32 = 11.0;

/// Rough advance width for proportional sans fonts.
pub(crate) fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.6
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub name: String,
    pub kind_title: &'static str,
    pub category: Category,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGroup {
    pub label: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEdge {
    /// Polyline from the source border to the target border.
    pub points: Vec<Point>,
    pub label: Option<String>,
    pub label_at: Point,
}

/// Absolute geometry for one diagram, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    pub title: String,
    pub direction: Direction,
    pub size: Size,
    pub title_at: Point,
    pub groups: Vec<PlacedGroup>,
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<PlacedEdge>,
}

impl DiagramLayout {
    pub fn node_named(&self, name: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn group_labelled(&self, label: &str) -> Option<&PlacedGroup> {
        self.groups.iter().find(|group| group.label == label)
    }
}

/// Top-level block: a whole container or a node outside any container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Group(GroupId),
    Node(NodeId),
}

/// Edges that close a cycle in a depth-first pass taken in index order.
///
/// Walks with an explicit stack of `(block, successor iterator)` frames, so long chains
/// cost heap, not call stack.
fn break_cycles(count: usize, outgoing: &[BTreeSet<usize>]) -> BTreeSet<(usize, usize)> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    let mut marks = vec![Mark::New; count];
    let mut back = BTreeSet::new();
    let mut stack = Vec::new();
    for start in 0..count {
        if marks[start] != Mark::New {
            continue;
        }
        marks[start] = Mark::Active;
        stack.push((start, outgoing[start].iter()));

        while let Some((at, successors)) = stack.last_mut() {
            let at = *at;
            match successors.next().copied() {
                Some(to) => match marks[to] {
                    Mark::New => {
                        marks[to] = Mark::Active;
                        stack.push((to, outgoing[to].iter()));
                    }
                    Mark::Active => {
                        back.insert((at, to));
                    }
                    Mark::Done => {}
                },
                None => {
                    marks[at] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }
    back
}

fn topo_sort(count: usize, outgoing: &[BTreeSet<usize>]) -> Vec<usize> {
    let mut indegree = vec![0usize; count];
    for tos in outgoing {
        for &to in tos {
            indegree[to] += 1;
        }
    }

    let mut ready = (0..count).filter(|&i| indegree[i] == 0).collect::<BTreeSet<_>>();
    let mut topo = Vec::with_capacity(count);
    while let Some(next) = ready.pop_first() {
        topo.push(next);
        for &to in &outgoing[next] {
            indegree[to] = indegree[to].saturating_sub(1);
            if indegree[to] == 0 {
                ready.insert(to);
            }
        }
    }
    topo
}

fn assign_layers(topo: &[usize], outgoing: &[BTreeSet<usize>]) -> Vec<usize> {
    let mut layers = vec![0usize; outgoing.len()];
    for &from in topo {
        for &to in &outgoing[from] {
            layers[to] = layers[to].max(layers[from] + 1);
        }
    }
    layers
}

fn sort_layer_by_barycenter(
    layer: &mut [usize],
    prev_positions: &BTreeMap<usize, usize>,
    predecessors: &[BTreeSet<usize>],
) {
    let barycenter = |unit: usize| {
        let (sum, count) = predecessors[unit]
            .iter()
            .filter_map(|p| prev_positions.get(p).copied())
            .fold((0usize, 0usize), |(sum, count), pos| (sum + pos, count + 1));
        (count > 0).then_some((sum, count))
    };

    layer.sort_by(|&a, &b| match (barycenter(a), barycenter(b)) {
        (None, None) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some((sum_a, count_a)), Some((sum_b, count_b))) => {
            // sum_a/count_a vs sum_b/count_b without floats.
            let left = (sum_a as u128) * (count_b as u128);
            let right = (sum_b as u128) * (count_a as u128);
            left.cmp(&right).then_with(|| a.cmp(&b))
        }
    });
}

/// Longest-path layering of `count` blocks, tolerant of cycles.
///
/// Back edges found by a depth-first pass in index order are ignored for layering. Self
/// loops and repeated edges do not affect the result. Each layer is ordered by one
/// downward barycenter sweep.
pub(crate) fn layer_blocks(count: usize, edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    if count == 0 {
        return Vec::new();
    }

    let mut outgoing = vec![BTreeSet::new(); count];
    for &(from, to) in edges {
        if from != to && from < count && to < count {
            outgoing[from].insert(to);
        }
    }
    for (from, to) in break_cycles(count, &outgoing) {
        outgoing[from].remove(&to);
    }

    let mut predecessors = vec![BTreeSet::new(); count];
    for (from, tos) in outgoing.iter().enumerate() {
        for &to in tos {
            predecessors[to].insert(from);
        }
    }

    let topo = topo_sort(count, &outgoing);
    let block_layers = assign_layers(&topo, &outgoing);
    let max_layer = block_layers.iter().copied().max().unwrap_or(0);
    let mut layers = vec![Vec::new(); max_layer + 1];
    for (block, &layer) in block_layers.iter().enumerate() {
        layers[layer].push(block);
    }

    for idx in 1..layers.len() {
        let prev_positions = layers[idx - 1]
            .iter()
            .enumerate()
            .map(|(pos, &block)| (block, pos))
            .collect::<BTreeMap<_, _>>();
        sort_layer_by_barycenter(&mut layers[idx], &prev_positions, &predecessors);
    }
    layers
}

/// Places layered blocks along the main axis, centring each layer on the cross axis.
///
/// Returns the top-left corner of each block relative to the arrangement origin and
/// the overall extent.
pub(crate) fn arrange(
    layers: &[Vec<usize>],
    sizes: &[Size],
    direction: Direction,
) -> (Vec<Point>, Size) {
    let mut origins = vec![Point::default(); sizes.len()];
    let layer_main = layers
        .iter()
        .map(|layer| layer.iter().map(|&b| direction.main(sizes[b])).fold(0.0, f32::max))
        .collect::<Vec<_>>();
    let layer_cross = layers
        .iter()
        .map(|layer| {
            let sum: f32 = layer.iter().map(|&b| direction.cross(sizes[b])).sum();
            sum + GAP_CROSS * layer.len().saturating_sub(1) as f32
        })
        .collect::<Vec<_>>();

    let total_main =
        layer_main.iter().sum::<f32>() + GAP_MAIN * layers.len().saturating_sub(1) as f32;
    let total_cross = layer_cross.iter().copied().fold(0.0, f32::max);

    let mut main_offset = 0.0;
    for (idx, layer) in layers.iter().enumerate() {
        let mut cross_offset = (total_cross - layer_cross[idx]) / 2.0;
        for &block in layer {
            let size = sizes[block];
            let main = main_offset + (layer_main[idx] - direction.main(size)) / 2.0;
            origins[block] = direction.point(main, cross_offset);
            cross_offset += direction.cross(size) + GAP_CROSS;
        }
        main_offset += layer_main[idx] + GAP_MAIN;
    }

    (origins, direction.size(total_main, total_cross))
}

fn node_size(name: &str, kind_title: &str) -> Size {
    let text = text_width(name, NAME_FONT_SIZE).max(text_width(kind_title, KIND_FONT_SIZE));
    Size { width: NODE_MIN_WIDTH.max(text + 2.0 * NODE_PADDING), height: NODE_HEIGHT }
}

struct GroupBlock {
    members: Vec<NodeId>,
    origins: Vec<Point>,
    size: Size,
}

fn layout_group<K: DrawableNode>(
    graph: &DiagramGraph<K>,
    group: GroupId,
    label: &str,
    direction: Direction,
) -> GroupBlock {
    let members = graph.nodes_in(Scope::Group(group)).map(|node| node.id()).collect::<Vec<_>>();
    let local = members.iter().enumerate().map(|(i, &id)| (id, i)).collect::<BTreeMap<_, _>>();
    let edges = graph
        .edges()
        .iter()
        .filter_map(|edge| Some((*local.get(&edge.from())?, *local.get(&edge.to())?)))
        .collect::<Vec<_>>();
    let sizes = members
        .iter()
        .filter_map(|&id| graph.node(id))
        .map(|node| node_size(node.name(), node.kind().title()))
        .collect::<Vec<_>>();

    let (origins, content) = if members.is_empty() {
        (Vec::new(), EMPTY_GROUP)
    } else {
        arrange(&layer_blocks(members.len(), &edges), &sizes, direction)
    };

    let width = (content.width + 2.0 * GROUP_PADDING)
        .max(text_width(label, GROUP_FONT_SIZE) + 2.0 * GROUP_PADDING);
    let height = content.height + 2.0 * GROUP_PADDING + GROUP_LABEL_HEIGHT;
    let inset = Point { x: GROUP_PADDING, y: GROUP_PADDING + GROUP_LABEL_HEIGHT };
    let origins = origins.into_iter().map(|p| p.offset(inset)).collect();
    GroupBlock { members, origins, size: Size { width, height } }
}

fn route_edge(from: Rect, to: Rect, same: bool) -> (Vec<Point>, Point) {
    if same {
        let right = from.x + from.width;
        let mid = from.center().y;
        let points = vec![
            Point { x: right, y: mid - 10.0 },
            Point { x: right + SELF_LOOP_REACH, y: mid - 10.0 },
            Point { x: right + SELF_LOOP_REACH, y: mid + 10.0 },
            Point { x: right, y: mid + 10.0 },
        ];
        return (points, Point { x: right + SELF_LOOP_REACH + 4.0, y: mid });
    }

    let start = from.clip_towards(to.center());
    let end = to.clip_towards(from.center());
    (vec![start, end], start.midpoint(end))
}

/// Lays out an assembled graph.
///
/// Containers and ungrouped nodes are layered together as top-level blocks using the
/// edges between them; each container lays out its own members the same way.
pub fn layout<K: DrawableNode>(graph: &DiagramGraph<K>, direction: Direction) -> DiagramLayout {
    let mut units = graph.groups().iter().map(|group| Unit::Group(group.id())).collect::<Vec<_>>();
    units.extend(graph.nodes_in(Scope::Root).map(|node| Unit::Node(node.id())));

    let unit_of = |id: NodeId| -> Option<usize> {
        let target = match graph.node(id)?.scope() {
            Scope::Root => Unit::Node(id),
            Scope::Group(group) => Unit::Group(group),
        };
        units.iter().position(|&unit| unit == target)
    };

    let unit_edges = graph
        .edges()
        .iter()
        .filter_map(|edge| Some((unit_of(edge.from())?, unit_of(edge.to())?)))
        .collect::<Vec<_>>();

    let group_blocks = graph
        .groups()
        .iter()
        .map(|group| layout_group(graph, group.id(), group.label(), direction))
        .collect::<Vec<_>>();

    let sizes = units
        .iter()
        .map(|&unit| match unit {
            Unit::Group(group) => group_blocks[group.index()].size,
            Unit::Node(id) => graph
                .node(id)
                .map(|node| node_size(node.name(), node.kind().title()))
                .unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    let (origins, content) = arrange(&layer_blocks(units.len(), &unit_edges), &sizes, direction);
    let content_origin = Point { x: MARGIN, y: MARGIN + TITLE_HEIGHT };

    let mut node_rects = BTreeMap::<NodeId, Rect>::new();
    let mut groups = Vec::with_capacity(graph.groups().len());
    for (idx, (unit, origin)) in units.iter().zip(&origins).enumerate() {
        let origin = origin.offset(content_origin);
        match *unit {
            Unit::Group(group) => {
                let block = &group_blocks[group.index()];
                for (&member, inner) in block.members.iter().zip(&block.origins) {
                    if let Some(node) = graph.node(member) {
                        let size = node_size(node.name(), node.kind().title());
                        node_rects.insert(member, Rect::new(inner.offset(origin), size));
                    }
                }
                let label = graph.group(group).map(|g| g.label()).unwrap_or_default();
                groups.push(PlacedGroup {
                    label: label.to_owned(),
                    rect: Rect::new(origin, block.size),
                });
            }
            Unit::Node(id) => {
                node_rects.insert(id, Rect::new(origin, sizes[idx]));
            }
        }
    }

    let nodes = graph
        .nodes()
        .iter()
        .filter_map(|node| {
            Some(PlacedNode {
                name: node.name().to_owned(),
                kind_title: node.kind().title(),
                category: node.kind().category(),
                rect: *node_rects.get(&node.id())?,
            })
        })
        .collect::<Vec<_>>();

    let mut seen_pairs = BTreeMap::<(NodeId, NodeId), usize>::new();
    let edges = graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let from = *node_rects.get(&edge.from())?;
            let to = *node_rects.get(&edge.to())?;
            let pair = (edge.from().min(edge.to()), edge.from().max(edge.to()));
            let repeat = seen_pairs.entry(pair).or_insert(0);
            let (points, mut label_at) = route_edge(from, to, edge.from() == edge.to());
            label_at.y += *repeat as f32 * PARALLEL_LABEL_SHIFT;
            *repeat += 1;
            Some(PlacedEdge { points, label: edge.label().map(str::to_owned), label_at })
        })
        .collect::<Vec<_>>();

    let loops = graph.edges().iter().any(|edge| edge.from() == edge.to());
    let loop_room = if loops { SELF_LOOP_REACH } else { 0.0 };
    let width = (content.width + 2.0 * MARGIN + loop_room)
        .max(text_width(graph.title(), TITLE_FONT_SIZE) + 2.0 * MARGIN)
        .ceil();
    let height = (content.height + 2.0 * MARGIN + TITLE_HEIGHT).ceil();

    DiagramLayout {
        title: graph.title().to_owned(),
        direction,
        size: Size { width, height },
        title_at: Point { x: width / 2.0, y: MARGIN },
        groups,
        nodes,
        edges,
    }
}
