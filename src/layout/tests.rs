// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::layered::layer_blocks;
use super::*;
use crate::assemble::{build, DiagramBuilder};
use crate::model::DiagramRequest;
use crate::registry::{K8sKind, KUBERNETES};

fn three_tier() -> DiagramRequest {
    DiagramRequest::new("three tier")
        .component("ingress", "edge")
        .component("deployment", "api")
        .component("statefulset", "db")
        .component("configmap", "settings")
        .group("app", &["api", "db"])
        .connection("edge", "api", Some("https"))
        .connection("api", "db", Some("sql"))
}

#[test]
fn layers_a_chain_in_order() {
    let layers = layer_blocks(3, &[(0, 1), (1, 2)]);
    assert_eq!(layers, vec![vec![0], vec![1], vec![2]]);
}

#[test]
fn long_chain_inside_a_group_is_laid_out() {
    const LENGTH: usize = 100_000;
    let mut builder = DiagramBuilder::new("chain");
    let scope = builder.open_group("ns");
    let ids = (0..LENGTH)
        .map(|i| builder.add_node(scope, format!("p{i}"), K8sKind::Pod).expect("open scope"))
        .collect::<Vec<_>>();
    for pair in ids.windows(2) {
        builder.connect(pair[0], pair[1], None);
    }
    let graph = builder.finish();

    let layout = layout(&graph, Direction::LeftToRight);

    assert_eq!(layout.nodes.len(), LENGTH);
    assert_eq!(layout.edges.len(), LENGTH - 1);
    let first = layout.nodes[0].rect;
    let last = layout.nodes[LENGTH - 1].rect;
    assert_eq!(layout.nodes[LENGTH - 1].name, format!("p{}", LENGTH - 1));
    assert!(first.x < last.x);
}

#[test]
fn layers_use_longest_path() {
    let layers = layer_blocks(4, &[(0, 1), (1, 2), (0, 2), (3, 2)]);
    assert_eq!(layers, vec![vec![0, 3], vec![1], vec![2]]);
}

#[test]
fn cycles_do_not_drop_blocks() {
    let layers = layer_blocks(3, &[(0, 1), (1, 2), (2, 0), (1, 1)]);
    let mut flat = layers.concat();
    flat.sort();
    assert_eq!(flat, vec![0, 1, 2]);
    assert_eq!(layers, vec![vec![0], vec![1], vec![2]]);
}

#[test]
fn disconnected_blocks_share_the_first_layer() {
    assert_eq!(layer_blocks(3, &[]), vec![vec![0, 1, 2]]);
    assert!(layer_blocks(0, &[]).is_empty());
}

#[test]
fn barycenter_sweep_follows_predecessor_order() {
    // 0 and 1 in the first layer; 3 hangs off 0, 2 hangs off 1.
    let layers = layer_blocks(4, &[(1, 2), (0, 3)]);
    assert_eq!(layers, vec![vec![0, 1], vec![3, 2]]);
}

#[rstest]
#[case(Direction::LeftToRight)]
#[case(Direction::TopToBottom)]
fn groups_enclose_their_members_and_nodes_do_not_overlap(#[case] direction: Direction) {
    let (graph, _) = build(&KUBERNETES, &three_tier());
    let layout = layout(&graph, direction);

    assert_eq!(layout.nodes.len(), 4);
    assert_eq!(layout.groups.len(), 1);
    let app = layout.group_labelled("app").map(|g| g.rect);
    for name in ["api", "db"] {
        let node = layout.node_named(name).map(|n| n.rect);
        assert!(matches!((app, node), (Some(app), Some(node)) if app.encloses(&node)), "{name}");
    }
    for (i, a) in layout.nodes.iter().enumerate() {
        for b in &layout.nodes[i + 1..] {
            assert!(!a.rect.overlaps(&b.rect), "{} overlaps {}", a.name, b.name);
        }
    }
    let canvas = Rect::new(Point::default(), layout.size);
    assert!(layout.nodes.iter().all(|n| canvas.encloses(&n.rect)));
}

#[test]
fn left_to_right_places_targets_to_the_right() {
    let (graph, _) = build(&KUBERNETES, &three_tier());
    let layout = layout(&graph, Direction::LeftToRight);

    let edge = layout.node_named("edge").map(|n| n.rect.x);
    let api = layout.node_named("api").map(|n| n.rect.x);
    assert!(matches!((edge, api), (Some(edge), Some(api)) if edge < api));
}

#[test]
fn top_to_bottom_places_targets_below() {
    let (graph, _) = build(&KUBERNETES, &three_tier());
    let layout = layout(&graph, Direction::TopToBottom);

    let edge = layout.node_named("edge").map(|n| n.rect.y);
    let api = layout.node_named("api").map(|n| n.rect.y);
    assert!(matches!((edge, api), (Some(edge), Some(api)) if edge < api));
}

#[test]
fn edges_start_and_end_on_node_borders() {
    let (graph, _) = build(&KUBERNETES, &three_tier());
    let layout = layout(&graph, Direction::LeftToRight);

    assert_eq!(layout.edges.len(), 2);
    let first = &layout.edges[0];
    assert_eq!(first.label.as_deref(), Some("https"));
    let from = layout.node_named("edge").map(|n| n.rect);
    let to = layout.node_named("api").map(|n| n.rect);
    let (start, end) = (first.points[0], first.points[first.points.len() - 1]);
    assert!(matches!(from, Some(r) if r.contains(start)));
    assert!(matches!(to, Some(r) if r.contains(end)));
}

#[test]
fn empty_diagram_still_has_a_canvas() {
    let (graph, _) = build(&KUBERNETES, &DiagramRequest::new("empty"));
    let layout = layout(&graph, Direction::LeftToRight);

    assert!(layout.nodes.is_empty());
    assert!(layout.size.width > 0.0 && layout.size.height > 0.0);
    assert_eq!(layout.title, "empty");
}

#[test]
fn empty_group_gets_a_visible_box() {
    let request =
        DiagramRequest::new("g").component("pod", "a").group("ns1", &["a"]).group("ns2", &["a"]);
    let (graph, _) = build(&KUBERNETES, &request);
    let layout = layout(&graph, Direction::LeftToRight);

    let ns2 = layout.group_labelled("ns2").map(|g| g.rect);
    assert!(matches!(ns2, Some(r) if r.width > 0.0 && r.height > 0.0));
    assert!(layout.nodes.iter().all(|n| !matches!(ns2, Some(r) if r.overlaps(&n.rect))));
}

#[test]
fn self_loops_are_drawn_beside_the_node() {
    let request =
        DiagramRequest::new("loop").component("pod", "a").connection("a", "a", Some("retry"));
    let (graph, _) = build(&KUBERNETES, &request);
    let layout = layout(&graph, Direction::LeftToRight);

    let node = layout.nodes[0].rect;
    let edge = &layout.edges[0];
    assert_eq!(edge.points.len(), 4);
    assert!(edge.label_at.x > node.x + node.width);
    assert!(edge.label_at.x < layout.size.width);
}

#[rstest]
#[case("LR", Direction::LeftToRight)]
#[case("lr", Direction::LeftToRight)]
#[case("TB", Direction::TopToBottom)]
#[case("td", Direction::TopToBottom)]
fn parses_directions(#[case] raw: &str, #[case] expected: Direction) {
    assert_eq!(raw.parse::<Direction>(), Ok(expected));
}

#[test]
fn rejects_unknown_direction() {
    assert!("diagonal".parse::<Direction>().is_err());
}
