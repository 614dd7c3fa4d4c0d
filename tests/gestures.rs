use eframe::egui::{Pos2, pos2, vec2};
use pretty_assertions::assert_eq;
use umlcanvas::{Canvas, ConnectorKind, DEPTH_TOP, Diagram, Guide, PointerEvent, Shape, Tool};

fn press(canvas: &mut Canvas, diagram: &mut Diagram, p: Pos2) {
    canvas.handle(diagram, PointerEvent::Press(p), &());
}

fn drag(canvas: &mut Canvas, diagram: &mut Diagram, from: Pos2, to: Pos2) {
    canvas.handle(diagram, PointerEvent::Press(from), &());
    canvas.handle(diagram, PointerEvent::Drag(to), &());
    canvas.handle(diagram, PointerEvent::Release(to), &());
}

/// Rectangle at (10,10,50,30) then oval at (20,20,50,30), placed through the
/// create tools.
fn rect_and_oval() -> (Canvas, Diagram) {
    let mut diagram = Diagram::default();
    let mut canvas = Canvas::new(vec2(50.0, 30.0));
    canvas.set_tool(Tool::Rect, &mut diagram);
    press(&mut canvas, &mut diagram, pos2(10.0, 10.0));
    canvas.set_tool(Tool::Oval, &mut diagram);
    press(&mut canvas, &mut diagram, pos2(20.0, 20.0));
    (canvas, diagram)
}

fn depth_of(diagram: &Diagram, id: u64) -> i32 {
    diagram
        .shape(id)
        .map(Shape::depth)
        .expect("shape should be top-level")
}

#[test]
fn test_overlap_hit_and_association_between_rect_and_oval() {
    let (mut canvas, mut diagram) = rect_and_oval();
    let rect = diagram.shapes()[0].id();
    let oval = diagram.shapes()[1].id();
    assert_eq!(depth_of(&diagram, rect), 99);
    assert_eq!(depth_of(&diagram, oval), 98);
    assert_eq!(diagram.find_top_shape_at(pos2(25.0, 25.0)), Some(oval));

    canvas.set_tool(Tool::Connect(ConnectorKind::Association), &mut diagram);
    drag(&mut canvas, &mut diagram, pos2(12.0, 12.0), pos2(65.0, 45.0));

    assert_eq!(diagram.connectors().len(), 1);
    let connector = &diagram.connectors()[0];
    assert_eq!(connector.kind(), ConnectorKind::Association);
    assert_eq!((connector.start(), connector.end()), (rect, oval));
    assert_eq!(connector.start_point(), pos2(10.0, 10.0));
    assert_eq!(connector.end_point(), pos2(70.0, 35.0));
    assert_eq!(connector.depth(), 98);
    assert!(diagram.shapes().iter().all(|s| !s.show_ports()));

    canvas.set_tool(Tool::Select, &mut diagram);
    press(&mut canvas, &mut diagram, pos2(25.0, 25.0));
    assert_eq!(diagram.selection(), &[oval]);
    assert_eq!(diagram.connectors()[0].depth(), DEPTH_TOP);
}

#[test]
fn test_hit_always_returns_minimum_depth_shape() {
    let mut diagram = Diagram::default();
    let ids: Vec<u64> = (0..6)
        .map(|i| diagram.add_rect(pos2(i as f32 * 4.0, 0.0), vec2(30.0, 30.0)))
        .collect();
    diagram.set_selection(vec![ids[2]]);
    diagram.set_selection(vec![ids[1], ids[4]]);

    for x in [1.0_f32, 9.0, 14.0, 21.0, 29.0, 33.0, 45.0] {
        let p = pos2(x, 10.0);
        let expected = diagram
            .shapes()
            .iter()
            .filter(|s| s.contains(p))
            .map(Shape::depth)
            .min();
        let hit = diagram.find_top_shape_at(p).map(|id| depth_of(&diagram, id));
        assert_eq!(hit, expected, "hit mismatch at x = {x}");
    }
}

#[test]
fn test_link_release_on_same_shape_or_empty_space_creates_nothing() {
    let (mut canvas, mut diagram) = rect_and_oval();
    canvas.set_tool(Tool::Connect(ConnectorKind::Generalization), &mut diagram);

    drag(&mut canvas, &mut diagram, pos2(12.0, 12.0), pos2(14.0, 14.0));
    drag(&mut canvas, &mut diagram, pos2(12.0, 12.0), pos2(300.0, 300.0));
    drag(&mut canvas, &mut diagram, pos2(300.0, 300.0), pos2(65.0, 45.0));

    assert!(diagram.connectors().is_empty());
    assert!(!canvas.is_link_dragging());
    assert_eq!(canvas.guide(), None);
}

#[test]
fn test_groups_cannot_be_linked() {
    let (mut canvas, mut diagram) = rect_and_oval();
    let lone = diagram.add_rect(pos2(200.0, 200.0), vec2(20.0, 20.0));
    let rect = diagram.shapes()[0].id();
    let oval = diagram.shapes()[1].id();
    diagram.set_selection(vec![rect, oval]);
    diagram.group().expect("two shapes selected");
    diagram.clear_selection();

    canvas.set_tool(Tool::Connect(ConnectorKind::Composition), &mut diagram);
    drag(&mut canvas, &mut diagram, pos2(205.0, 205.0), pos2(25.0, 25.0));
    drag(&mut canvas, &mut diagram, pos2(25.0, 25.0), pos2(205.0, 205.0));

    assert!(diagram.connectors().is_empty());
    assert!(!canvas.is_link_dragging());
    assert_eq!(diagram.find_connectable_at(pos2(205.0, 205.0)), Some(lone));
}

#[test]
fn test_hover_lights_ports_of_exactly_one_connectable_shape() {
    let (mut canvas, mut diagram) = rect_and_oval();
    let rect = diagram.shapes()[0].id();
    let oval = diagram.shapes()[1].id();
    canvas.set_tool(Tool::Connect(ConnectorKind::Association), &mut diagram);

    let flags = |d: &Diagram| -> Vec<bool> { d.shapes().iter().map(Shape::show_ports).collect() };

    assert!(canvas.handle(&mut diagram, PointerEvent::Move(pos2(12.0, 12.0)), &()));
    assert_eq!(flags(&diagram), vec![true, false]);
    canvas.handle(&mut diagram, PointerEvent::Move(pos2(25.0, 25.0)), &());
    assert_eq!(flags(&diagram), vec![false, true]);
    canvas.handle(&mut diagram, PointerEvent::Move(pos2(500.0, 500.0)), &());
    assert_eq!(flags(&diagram), vec![false, false]);

    diagram.set_selection(vec![rect, oval]);
    diagram.group().expect("grouped");
    canvas.handle(&mut diagram, PointerEvent::Move(pos2(25.0, 25.0)), &());
    assert!(diagram.shapes().iter().all(|s| !s.show_ports()));
}

#[test]
fn test_connector_endpoints_follow_repeated_drags_exactly() {
    let mut diagram = Diagram::default();
    let a = diagram.add_rect(pos2(0.0, 0.0), vec2(40.0, 20.0));
    let b = diagram.add_oval(pos2(100.0, 0.0), vec2(40.0, 20.0));
    diagram
        .connect(ConnectorKind::Association, a, pos2(40.0, 10.0), b, pos2(100.0, 10.0))
        .expect("distinct shapes");
    let offset = diagram.connectors()[0].start_offset();
    let mut canvas = Canvas::default();

    let mut grab = pos2(5.0, 5.0);
    for step in 0..25 {
        let to = grab + vec2(3.0 + step as f32 * 0.1, -1.7);
        drag(&mut canvas, &mut diagram, grab, to);
        grab = to;
        let origin = diagram.shape(a).map(Shape::origin).expect("a exists");
        assert_eq!(diagram.connectors()[0].start_point(), origin + offset);
    }
    assert_eq!(diagram.connectors()[0].end_point(), pos2(100.0, 10.0));
}

#[test]
fn test_group_drag_moves_every_selected_shape_uniformly() {
    let mut diagram = Diagram::default();
    let a = diagram.add_rect(pos2(0.0, 0.0), vec2(20.0, 20.0));
    let b = diagram.add_rect(pos2(50.0, 0.0), vec2(20.0, 20.0));
    let c = diagram.add_rect(pos2(200.0, 0.0), vec2(20.0, 20.0));
    diagram.set_selection(vec![a, b]);
    let mut canvas = Canvas::default();

    canvas.handle(&mut diagram, PointerEvent::Press(pos2(55.0, 5.0)), &());
    assert!(canvas.is_dragging());
    for x in [60.0, 70.0, 85.0] {
        canvas.handle(&mut diagram, PointerEvent::Drag(pos2(x, 15.0)), &());
    }
    canvas.handle(&mut diagram, PointerEvent::Release(pos2(85.0, 15.0)), &());

    let origin = |id| diagram.shape(id).map(Shape::origin);
    assert_eq!(origin(a), Some(pos2(30.0, 10.0)));
    assert_eq!(origin(b), Some(pos2(80.0, 10.0)));
    assert_eq!(origin(c), Some(pos2(200.0, 0.0)));
    assert_eq!(diagram.selection(), &[a, b]);
}

#[test]
fn test_box_select_requires_full_containment() {
    let mut diagram = Diagram::default();
    let inside = diagram.add_rect(pos2(10.0, 10.0), vec2(20.0, 20.0));
    let overlapping = diagram.add_rect(pos2(40.0, 10.0), vec2(20.0, 20.0));
    let previously = diagram.add_oval(pos2(200.0, 200.0), vec2(20.0, 20.0));
    diagram.select_only(previously);
    let mut canvas = Canvas::default();

    canvas.handle(&mut diagram, PointerEvent::Press(pos2(5.0, 5.0)), &());
    assert!(canvas.is_box_selecting());
    assert!(diagram.selection().is_empty());
    canvas.handle(&mut diagram, PointerEvent::Drag(pos2(59.0, 35.0)), &());
    assert_eq!(
        canvas.guide(),
        Some(Guide::SelectionBox(eframe::egui::Rect::from_min_max(
            pos2(5.0, 5.0),
            pos2(59.0, 35.0)
        )))
    );
    canvas.handle(&mut diagram, PointerEvent::Release(pos2(59.0, 35.0)), &());

    assert_eq!(diagram.selection(), &[inside]);
    assert!(diagram.shape(inside).is_some_and(Shape::show_ports));
    assert!(diagram.shape(overlapping).is_some_and(|s| !s.show_ports()));
    assert_ne!(depth_of(&diagram, previously), DEPTH_TOP);
    assert_eq!(canvas.guide(), None);
}

#[test]
fn test_box_select_dragged_up_and_left_still_selects() {
    let mut diagram = Diagram::default();
    let a = diagram.add_rect(pos2(10.0, 10.0), vec2(20.0, 20.0));
    let mut canvas = Canvas::default();
    drag(&mut canvas, &mut diagram, pos2(40.0, 40.0), pos2(10.0, 10.0));
    assert_eq!(diagram.selection(), &[a]);
}

#[test]
fn test_connector_depth_tracks_selection_changes() {
    let mut diagram = Diagram::default();
    let a = diagram.add_rect(pos2(0.0, 0.0), vec2(20.0, 20.0));
    let b = diagram.add_rect(pos2(50.0, 0.0), vec2(20.0, 20.0));
    diagram.add_rect(pos2(100.0, 0.0), vec2(20.0, 20.0));
    diagram
        .connect(ConnectorKind::Generalization, a, pos2(20.0, 10.0), b, pos2(50.0, 10.0))
        .expect("a -> b");
    let mut canvas = Canvas::default();

    for target in [pos2(5.0, 5.0), pos2(105.0, 5.0), pos2(55.0, 5.0), pos2(300.0, 300.0)] {
        canvas.handle(&mut diagram, PointerEvent::Press(target), &());
        canvas.handle(&mut diagram, PointerEvent::Release(target), &());
        let conn = &diagram.connectors()[0];
        let expected = depth_of(&diagram, conn.start()).min(depth_of(&diagram, conn.end()));
        assert_eq!(conn.depth(), expected);
    }
    assert!(diagram.selection().is_empty());
    assert!(diagram.shapes().iter().all(|s| s.depth() != DEPTH_TOP));
}
