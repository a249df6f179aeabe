// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::*;
use crate::model::{ComponentDescriptor, DiagramRequest, Scope};
use crate::registry::{AwsKind, K8sKind, AWS, KUBERNETES};

#[fixture]
fn web_stack() -> DiagramRequest {
    DiagramRequest::new("web")
        .component("ingress", "edge")
        .component("deployment", "api")
        .component("service", "api-svc")
        .component("statefulset", "db")
        .component("configmap", "settings")
        .group("frontend", &["edge", "api-svc"])
        .group("backend", &["api", "db"])
        .connection("edge", "api-svc", Some("https"))
        .connection("api-svc", "api", None)
        .connection("api", "db", Some("sql"))
}

#[test]
fn scenario_a_two_components_one_edge() {
    let request = DiagramRequest::new("a")
        .component("deployment", "api")
        .component("service", "api-svc")
        .connection("api-svc", "api", None);

    let (graph, report) = build(&KUBERNETES, &request);

    assert_eq!(report.components(), 2);
    assert_eq!(report.edges, 1);
    assert!(report.diagnostics.is_empty());
    let edge = &graph.edges()[0];
    assert_eq!(graph.node(edge.from()).map(|n| n.name()), Some("api-svc"));
    assert_eq!(graph.node(edge.to()).map(|n| n.name()), Some("api"));
    assert_eq!(edge.label(), None);
}

#[test]
fn scenario_b_unknown_type_yields_empty_pool() {
    let request = DiagramRequest::new("b").component("bogus", "x");

    let (graph, report) = build(&KUBERNETES, &request);

    assert_eq!(report.components(), 0);
    assert_eq!(report.edges, 0);
    assert!(graph.nodes().is_empty());
    assert!(matches!(
        report.diagnostics.as_slice(),
        [Diagnostic::UnknownType { component, kind, .. }] if component == "x" && kind == "bogus"
    ));
}

#[test]
fn scenario_c_first_group_wins() {
    let request = DiagramRequest::new("c")
        .component("pod", "a")
        .group("ns1", &["a"])
        .group("ns2", &["a"]);

    let (graph, report) = build(&KUBERNETES, &request);

    let ns1 = graph.group_labelled("ns1").map(|g| g.id());
    let ns2 = graph.group_labelled("ns2").map(|g| g.id());
    assert!(ns1.is_some() && ns2.is_some());
    assert_eq!(graph.node_named("a").map(|n| n.scope()), ns1.map(Scope::Group));
    assert_eq!(graph.nodes_in(Scope::Group(ns2.unwrap())).count(), 0);
    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::ContestedMembership {
            component: "a".into(),
            kept: "ns1".into(),
            ignored: "ns2".into(),
        }]
    );
}

#[test]
fn scenario_d_dangling_connection_is_skipped() {
    let request = DiagramRequest::new("d")
        .component("pod", "a")
        .connection("a", "ghost", Some("calls"));

    let (graph, report) = build(&KUBERNETES, &request);

    assert_eq!(report.edges, 0);
    assert!(graph.edges().is_empty());
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::UnresolvedEndpoint {
            from: "a".into(),
            to: "ghost".into(),
            missing: vec!["ghost".into()],
        }]
    );
}

#[test]
fn scenario_e_duplicate_name_keeps_later_type() {
    let request = DiagramRequest::new("e").component("ec2", "dup").component("rds", "dup");

    let (graph, report) = build(&AWS, &request);

    assert_eq!(report.components(), 1);
    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(graph.node_named("dup").map(|n| n.kind()), Some(AwsKind::Rds));
    assert!(matches!(
        report.diagnostics.as_slice(),
        [Diagnostic::Superseded { component, kind, by }]
            if component == "dup" && kind == "ec2" && by == "rds"
    ));
}

#[test]
fn unresolvable_duplicate_does_not_replace_resolvable_one() {
    let request = DiagramRequest::new("e").component("pod", "dup").component("bogus", "dup");

    let (graph, report) = build(&KUBERNETES, &request);

    assert_eq!(graph.node_named("dup").map(|n| n.kind()), Some(K8sKind::Pod));
    assert_eq!(report.components(), 1);
}

#[test]
fn duplicate_names_in_a_group_are_drawn_once() {
    let request = DiagramRequest::new("e")
        .component("pod", "dup")
        .component("job", "dup")
        .group("ns", &["dup"]);

    let (graph, _) = build(&KUBERNETES, &request);

    assert_eq!(graph.nodes().len(), 1);
    let node = graph.node_named("dup").map(|n| (n.kind(), n.scope()));
    assert_eq!(node, Some((K8sKind::Job, Scope::Group(graph.groups()[0].id()))));
}

#[rstest]
fn every_component_is_placed_exactly_once(web_stack: DiagramRequest) {
    let (graph, report) = build(&KUBERNETES, &web_stack);

    assert_eq!(graph.nodes().len(), web_stack.components.len());
    assert_eq!(report.pool.len(), graph.nodes().len());
    for descriptor in &web_stack.components {
        let placed = graph.nodes().iter().filter(|n| n.name() == descriptor.name).count();
        assert_eq!(placed, 1, "{} placed {placed} times", descriptor.name);
    }

    let frontend = graph.group_labelled("frontend").map(|g| Scope::Group(g.id()));
    let backend = graph.group_labelled("backend").map(|g| Scope::Group(g.id()));
    assert_eq!(graph.node_named("edge").map(|n| n.scope()), frontend);
    assert_eq!(graph.node_named("db").map(|n| n.scope()), backend);
    assert_eq!(graph.node_named("settings").map(|n| n.scope()), Some(Scope::Root));
}

#[rstest]
fn edge_count_matches_connections_with_known_endpoints(web_stack: DiagramRequest) {
    let request = web_stack.connection("api", "nowhere", None).connection("nowhere", "db", None);

    let (graph, report) = build(&KUBERNETES, &request);

    assert_eq!(report.edges, 3);
    assert_eq!(graph.edges().len(), 3);
    let labels: Vec<_> = graph.edges().iter().map(|e| e.label()).collect();
    assert_eq!(labels, vec![Some("https"), None, Some("sql")]);
}

#[test]
fn parallel_edges_and_self_loops_are_kept() {
    let request = DiagramRequest::new("loops")
        .component("pod", "a")
        .component("pod", "b")
        .connection("a", "b", None)
        .connection("a", "b", Some("again"))
        .connection("a", "a", None);

    let (graph, report) = build(&KUBERNETES, &request);

    assert_eq!(report.edges, 3);
    assert_eq!(graph.edges().len(), 3);
}

#[test]
fn empty_connection_label_draws_unlabelled_edge() {
    let request = DiagramRequest::new("labels")
        .component("pod", "a")
        .component("pod", "b")
        .connection("a", "b", Some(""));

    let (graph, _) = build(&KUBERNETES, &request);

    assert_eq!(graph.edges()[0].label(), None);
}

#[test]
fn unnamed_group_uses_platform_default_label() {
    let mut request = DiagramRequest::new("vpc").component("ec2", "web");
    request.groups.push(crate::model::GroupDescriptor {
        name: None,
        members: vec!["web".into()],
    });

    let (graph, _) = build(&AWS, &request);

    assert_eq!(graph.groups()[0].label(), "VPC");
    assert_eq!(
        graph.node_named("web").map(|n| n.scope()),
        Some(Scope::Group(graph.groups()[0].id()))
    );
}

#[test]
fn unknown_group_member_is_reported_and_group_kept() {
    let request = DiagramRequest::new("m").component("pod", "a").group("ns", &["ghost"]);

    let (graph, report) = build(&KUBERNETES, &request);

    assert_eq!(graph.groups().len(), 1);
    assert_eq!(graph.node_named("a").map(|n| n.scope()), Some(Scope::Root));
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::UnknownMember { group: "ns".into(), member: "ghost".into() }]
    );
}

#[rstest]
#[case(vec![("deployment", "a"), ("Service", "b"), ("nope", "c")], 2)]
#[case(vec![("pod", "x"), ("pod", "x"), ("pod", "x")], 1)]
#[case(vec![("bogus", "x"), ("POD", "y")], 1)]
#[case(vec![], 0)]
fn pool_size_counts_resolvable_unique_names(
    #[case] components: Vec<(&str, &str)>,
    #[case] expected: usize,
) {
    let descriptors: Vec<_> =
        components.iter().map(|(kind, name)| ComponentDescriptor::new(*kind, *name)).collect();
    let mut builder = DiagramBuilder::new("pool");
    let mut diagnostics = Vec::new();

    let pool = resolve_all(&mut builder, &KUBERNETES, &descriptors, &mut diagnostics);

    assert_eq!(pool.len(), expected);
    assert_eq!(builder.graph().nodes().len(), expected);
}

#[test]
fn resolve_all_places_nodes_in_the_open_scope() {
    let descriptors = vec![ComponentDescriptor::new("pod", "a")];
    let mut builder = DiagramBuilder::new("scoped");
    let scope = builder.open_group("ns");
    let mut diagnostics = Vec::new();

    let pool = resolve_all(&mut builder, &KUBERNETES, &descriptors, &mut diagnostics);

    let node = pool.get("a").and_then(|id| builder.graph().node(*id));
    assert_eq!(node.map(|n| n.scope()), Some(scope));
}

#[rstest]
fn repeated_requests_do_not_share_state(web_stack: DiagramRequest) {
    let (_, first) = build(&KUBERNETES, &web_stack);
    let (_, second) = build(&KUBERNETES, &web_stack);

    assert_eq!(first.pool.len(), second.pool.len());
    assert!(first.pool.keys().eq(second.pool.keys()));
    assert_eq!(first, second);
}

#[test]
fn diagnostics_render_as_readable_lines() {
    let line = Diagnostic::UnresolvedEndpoint {
        from: "a".into(),
        to: "b".into(),
        missing: vec!["a".into(), "b".into()],
    }
    .to_string();
    assert_eq!(line, "skipped connection 'a' -> 'b': no component named 'a' or 'b'");

    let line = Diagnostic::UnknownType {
        component: "x".into(),
        kind: "bogus".into(),
        expected: vec!["pod", "job"],
    }
    .to_string();
    assert_eq!(line, "skipped component 'x': unknown type 'bogus' (expected one of: pod, job)");
}

#[test]
fn wide_groups_place_every_member_once() {
    const WIDTH: usize = 5_000;
    let names = (0..WIDTH).map(|i| format!("p{i}")).collect::<Vec<_>>();
    let mut request = DiagramRequest::new("wide");
    for name in &names {
        request = request.component("pod", name);
    }
    let mut first = names.iter().map(String::as_str).collect::<Vec<_>>();
    first.push("ghost");
    let second = names[WIDTH / 2..].iter().map(String::as_str).collect::<Vec<_>>();
    request = request.group("ns1", &first).group("ns2", &second);

    let (graph, report) = build(&KUBERNETES, &request);

    let ns1 = graph.group_labelled("ns1").map(|g| Scope::Group(g.id())).expect("ns1");
    let ns2 = graph.group_labelled("ns2").map(|g| Scope::Group(g.id())).expect("ns2");
    assert_eq!(graph.nodes().len(), WIDTH);
    assert_eq!(graph.nodes_in(ns1).count(), WIDTH);
    assert_eq!(graph.nodes_in(ns2).count(), 0);
    assert_eq!(report.components(), WIDTH);

    let contested = report
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::ContestedMembership { .. }))
        .count();
    assert_eq!(contested, WIDTH - WIDTH / 2);
    assert!(report.diagnostics.contains(&Diagnostic::UnknownMember {
        group: "ns1".into(),
        member: "ghost".into(),
    }));
}
