use eframe::egui;

use super::{Canvas, Gesture, PointerEvent, Tool};
use crate::diagram::Diagram;
use crate::model::{ConnectorKind, Shape};

impl Canvas {
    pub(super) fn handle_create(&mut self, diagram: &mut Diagram, event: PointerEvent) -> bool {
        let PointerEvent::Press(p) = event else {
            return false;
        };
        self.gesture = Gesture::Idle;
        match self.tool {
            Tool::Rect => {
                diagram.add_rect(p, self.default_size);
            }
            Tool::Oval => {
                diagram.add_oval(p, self.default_size);
            }
            Tool::Select | Tool::Connect(_) => return false,
        }
        true
    }

    pub(super) fn handle_connect(
        &mut self,
        diagram: &mut Diagram,
        kind: ConnectorKind,
        event: PointerEvent,
    ) -> bool {
        match event {
            PointerEvent::Press(p) => {
                self.gesture = Gesture::Idle;
                let Some(start) = diagram.find_connectable_at(p) else {
                    log::trace!("link press at {p:?} hit nothing connectable");
                    return false;
                };
                let Some(start_port) = diagram.shape(start).and_then(|s| s.closest_port(p)) else {
                    return false;
                };
                self.gesture = Gesture::Linking {
                    start,
                    start_port,
                    current: p,
                };
                true
            }
            PointerEvent::Drag(p) => match &mut self.gesture {
                Gesture::Linking { current, .. } => {
                    *current = p;
                    true
                }
                _ => false,
            },
            PointerEvent::Release(p) => {
                let gesture = std::mem::take(&mut self.gesture);
                if let Gesture::Linking {
                    start, start_port, ..
                } = gesture
                {
                    match diagram.find_connectable_at(p) {
                        Some(end) if end != start => {
                            let end_port = diagram.shape(end).and_then(|s| s.closest_port(p));
                            if let Some(end_port) = end_port {
                                diagram.connect(kind, start, start_port, end, end_port);
                            }
                        }
                        _ => log::trace!("link released at {p:?} without a second target"),
                    }
                }
                diagram.clear_port_flags();
                true
            }
            PointerEvent::Move(p) => {
                let hovered = diagram.find_connectable_at(p);
                diagram.highlight_ports(hovered)
            }
        }
    }

    pub(super) fn handle_select(&mut self, diagram: &mut Diagram, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Press(p) => {
                self.gesture = Gesture::Idle;
                match diagram.find_top_shape_at(p) {
                    Some(id) => {
                        if !diagram.is_selected(id) {
                            diagram.select_only(id);
                        }
                        let origins = diagram
                            .selection()
                            .iter()
                            .filter_map(|&sid| diagram.shape(sid).map(|s| (sid, s.origin())))
                            .collect();
                        self.gesture = Gesture::Dragging { press: p, origins };
                    }
                    None => {
                        diagram.clear_selection();
                        self.gesture = Gesture::BoxSelecting {
                            start: p,
                            current: p,
                        };
                    }
                }
                true
            }
            PointerEvent::Drag(p) => match &mut self.gesture {
                Gesture::Dragging { press, origins } => {
                    let offset = p - *press;
                    let mut moved = false;
                    for &(id, origin) in origins.iter() {
                        let Some(now) = diagram.shape(id).map(Shape::origin) else {
                            continue;
                        };
                        moved |= diagram.move_shape(id, (origin + offset) - now);
                    }
                    moved
                }
                Gesture::BoxSelecting { current, .. } => {
                    *current = p;
                    true
                }
                Gesture::Idle | Gesture::Linking { .. } => false,
            },
            // The band is the one last shown by `guide()`, so the release
            // position itself is ignored.
            PointerEvent::Release(_) => match std::mem::take(&mut self.gesture) {
                Gesture::BoxSelecting { start, current } => {
                    let area = egui::Rect::from_two_pos(start, current);
                    let picked = diagram.shapes_within(area);
                    log::debug!("box-selected {} shape(s)", picked.len());
                    diagram.set_selection(picked);
                    true
                }
                Gesture::Dragging { .. } | Gesture::Idle | Gesture::Linking { .. } => false,
            },
            PointerEvent::Move(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Guide;
    use crate::layers::DEPTH_TOP;

    #[test]
    fn create_modes_add_one_shape_per_press() {
        let mut d = Diagram::default();
        let mut canvas = Canvas::new(egui::vec2(40.0, 20.0));
        canvas.set_tool(Tool::Oval, &mut d);
        assert!(canvas.handle(&mut d, PointerEvent::Press(egui::pos2(5.0, 5.0)), &()));
        assert!(!canvas.handle(&mut d, PointerEvent::Drag(egui::pos2(9.0, 9.0)), &()));
        assert!(!canvas.handle(&mut d, PointerEvent::Release(egui::pos2(9.0, 9.0)), &()));
        canvas.handle(&mut d, PointerEvent::Press(egui::pos2(5.0, 5.0)), &());

        assert_eq!(d.shapes().len(), 2);
        let first = &d.shapes()[0];
        assert_eq!(first.bounds().min, egui::pos2(5.0, 5.0));
        assert_eq!(first.size(), egui::vec2(40.0, 20.0));
        assert_eq!(first.depth(), 99);
        assert_eq!(d.shapes()[1].depth(), 98);
    }

    #[test]
    fn link_drag_shows_guide_until_release() {
        let mut d = Diagram::default();
        d.add_rect(egui::pos2(0.0, 0.0), egui::vec2(50.0, 30.0));
        let mut canvas = Canvas::default();
        canvas.set_tool(Tool::Connect(ConnectorKind::Composition), &mut d);

        canvas.handle(&mut d, PointerEvent::Press(egui::pos2(2.0, 2.0)), &());
        canvas.handle(&mut d, PointerEvent::Drag(egui::pos2(80.0, 80.0)), &());
        assert_eq!(
            canvas.guide(),
            Some(Guide::Link {
                from: egui::pos2(0.0, 0.0),
                to: egui::pos2(80.0, 80.0),
            })
        );

        canvas.handle(&mut d, PointerEvent::Release(egui::pos2(80.0, 80.0)), &());
        assert!(!canvas.is_link_dragging());
        assert_eq!(canvas.guide(), None);
        assert!(d.connectors().is_empty());
    }

    #[test]
    fn press_on_unselected_shape_selects_and_drags() {
        let mut d = Diagram::default();
        let a = d.add_rect(egui::pos2(0.0, 0.0), egui::vec2(20.0, 20.0));
        let b = d.add_rect(egui::pos2(50.0, 0.0), egui::vec2(20.0, 20.0));
        d.select_only(a);
        let mut canvas = Canvas::default();

        canvas.handle(&mut d, PointerEvent::Press(egui::pos2(55.0, 5.0)), &());
        assert_eq!(d.selection(), &[b]);
        assert!(canvas.is_dragging());
        assert_ne!(d.shape(a).map(Shape::depth), Some(DEPTH_TOP));

        canvas.handle(&mut d, PointerEvent::Drag(egui::pos2(60.0, 15.0)), &());
        canvas.handle(&mut d, PointerEvent::Release(egui::pos2(60.0, 15.0)), &());
        assert_eq!(d.shape(b).map(Shape::origin), Some(egui::pos2(55.0, 10.0)));
        assert_eq!(d.shape(a).map(Shape::origin), Some(egui::pos2(0.0, 0.0)));
    }

    #[test]
    fn box_select_uses_the_band_from_the_last_drag() {
        let mut d = Diagram::default();
        let near = d.add_rect(egui::pos2(10.0, 10.0), egui::vec2(20.0, 20.0));
        let far = d.add_rect(egui::pos2(70.0, 70.0), egui::vec2(20.0, 20.0));
        let mut canvas = Canvas::default();

        canvas.handle(&mut d, PointerEvent::Press(egui::pos2(5.0, 5.0)), &());
        canvas.handle(&mut d, PointerEvent::Drag(egui::pos2(40.0, 40.0)), &());
        let shown = egui::Rect::from_min_max(egui::pos2(5.0, 5.0), egui::pos2(40.0, 40.0));
        assert_eq!(canvas.guide(), Some(Guide::SelectionBox(shown)));
        canvas.handle(&mut d, PointerEvent::Release(egui::pos2(100.0, 100.0)), &());

        assert_eq!(d.selection(), &[near]);
        assert!(!d.is_selected(far));
        assert!(!canvas.is_box_selecting());
    }

    #[test]
    fn switching_tools_drops_the_gesture() {
        let mut d = Diagram::default();
        let mut canvas = Canvas::default();
        canvas.handle(&mut d, PointerEvent::Press(egui::pos2(0.0, 0.0)), &());
        assert!(canvas.is_box_selecting());
        canvas.set_tool(Tool::Rect, &mut d);
        assert_eq!(canvas.guide(), None);
        assert_eq!(canvas.tool(), Tool::Rect);
    }
}
