//! Pointer-gesture state machine sitting between the egui canvas widget and
//! the [`Diagram`].

use eframe::egui;

use crate::diagram::Diagram;
use crate::model::{ConnectorKind, ShapeId};

mod interaction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Rect,
    Oval,
    Connect(ConnectorKind),
}

impl Tool {
    /// Toolbar order.
    pub const ALL: [Tool; 6] = [
        Tool::Select,
        Tool::Connect(ConnectorKind::Association),
        Tool::Connect(ConnectorKind::Generalization),
        Tool::Connect(ConnectorKind::Composition),
        Tool::Rect,
        Tool::Oval,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Rect => "Rect",
            Tool::Oval => "Oval",
            Tool::Connect(kind) => kind.name(),
        }
    }
}

/// Raw pointer input in canvas coordinates. `Move` is motion with no button
/// held; `Drag` is motion with the primary button held.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(egui::Pos2),
    Drag(egui::Pos2),
    Release(egui::Pos2),
    Move(egui::Pos2),
}

#[derive(Clone, Debug, Default)]
enum Gesture {
    #[default]
    Idle,
    Linking {
        start: ShapeId,
        start_port: egui::Pos2,
        current: egui::Pos2,
    },
    Dragging {
        press: egui::Pos2,
        origins: Vec<(ShapeId, egui::Pos2)>,
    },
    BoxSelecting {
        start: egui::Pos2,
        current: egui::Pos2,
    },
}

/// Transient overlay the view draws on top of the diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Guide {
    Link { from: egui::Pos2, to: egui::Pos2 },
    SelectionBox(egui::Rect),
}

/// Whoever hosts the canvas and needs to know it should redraw.
pub trait RepaintSink {
    fn request_repaint(&self);
}

impl RepaintSink for egui::Context {
    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

impl RepaintSink for () {
    fn request_repaint(&self) {}
}

#[derive(Clone, Debug)]
pub struct Canvas {
    tool: Tool,
    gesture: Gesture,
    default_size: egui::Vec2,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(egui::vec2(120.0, 80.0))
    }
}

impl Canvas {
    pub fn new(default_size: egui::Vec2) -> Self {
        Self {
            tool: Tool::default(),
            gesture: Gesture::Idle,
            default_size: egui::vec2(default_size.x.max(0.0), default_size.y.max(0.0)),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches mode. Any gesture in flight is abandoned and hover port
    /// flags go back to "selected shapes only".
    pub fn set_tool(&mut self, tool: Tool, diagram: &mut Diagram) {
        if self.tool != tool {
            log::debug!("tool {} -> {}", self.tool.label(), tool.label());
        }
        self.tool = tool;
        self.gesture = Gesture::Idle;
        diagram.restore_port_flags();
    }

    pub fn is_link_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Linking { .. })
    }

    pub fn is_box_selecting(&self) -> bool {
        matches!(self.gesture, Gesture::BoxSelecting { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn guide(&self) -> Option<Guide> {
        match self.gesture {
            Gesture::Linking {
                start_port,
                current,
                ..
            } => Some(Guide::Link {
                from: start_port,
                to: current,
            }),
            Gesture::BoxSelecting { start, current } => {
                Some(Guide::SelectionBox(egui::Rect::from_two_pos(start, current)))
            }
            Gesture::Idle | Gesture::Dragging { .. } => None,
        }
    }

    /// Feeds one pointer event through the active mode. Returns true and
    /// pings `repaint` when the diagram or a guide changed.
    pub fn handle(
        &mut self,
        diagram: &mut Diagram,
        event: PointerEvent,
        repaint: &dyn RepaintSink,
    ) -> bool {
        let changed = match self.tool {
            Tool::Rect | Tool::Oval => self.handle_create(diagram, event),
            Tool::Connect(kind) => self.handle_connect(diagram, kind, event),
            Tool::Select => self.handle_select(diagram, event),
        };
        if changed {
            repaint.request_repaint();
        }
        changed
    }
}
