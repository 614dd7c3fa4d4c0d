use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::layers::{self, DEPTH_TOP};

pub type ShapeId = u64;
pub type ConnectorId = u64;

pub const LABEL_FONT_MIN: f32 = 8.0;
pub const LABEL_FONT_MAX: f32 = 72.0;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }

    pub fn from_color32(c: egui::Color32) -> Self {
        let [r, g, b, a] = c.to_srgba_unmultiplied();
        Self { r, g, b, a }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LabelShape {
    #[default]
    Rect,
    Oval,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub shape: LabelShape,
    pub color: Rgba,
    font_size: f32,
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: String::new(),
            shape: LabelShape::Rect,
            color: Rgba::WHITE,
            font_size: 12.0,
        }
    }
}

impl Label {
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = if size.is_finite() {
            size.clamp(LABEL_FONT_MIN, LABEL_FONT_MAX)
        } else {
            LABEL_FONT_MIN
        };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Rect { label: Label },
    Oval { label: Label },
    Group { children: Vec<Shape> },
}

/// A rectangle, an oval or a group of shapes.
///
/// Position and size only change through `move_by` and `set_size`; a group's
/// bounds are always the union of its children's.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    id: ShapeId,
    origin: egui::Pos2,
    size: egui::Vec2,
    depth: i32,
    show_ports: bool,
    kind: ShapeKind,
}

impl Shape {
    pub fn rect(id: ShapeId, origin: egui::Pos2, size: egui::Vec2, depth: i32) -> Self {
        Self::basic(id, origin, size, depth, ShapeKind::Rect {
            label: Label::default(),
        })
    }

    pub fn oval(id: ShapeId, origin: egui::Pos2, size: egui::Vec2, depth: i32) -> Self {
        Self::basic(id, origin, size, depth, ShapeKind::Oval {
            label: Label::default(),
        })
    }

    fn basic(id: ShapeId, origin: egui::Pos2, size: egui::Vec2, depth: i32, kind: ShapeKind) -> Self {
        let mut shape = Self {
            id,
            origin,
            size: egui::Vec2::ZERO,
            depth: layers::clamp_depth(depth),
            show_ports: false,
            kind,
        };
        shape.set_size(size);
        shape
    }

    pub fn group(id: ShapeId, children: Vec<Shape>, depth: i32) -> Self {
        let mut shape = Self {
            id,
            origin: egui::Pos2::ZERO,
            size: egui::Vec2::ZERO,
            depth: layers::clamp_depth(depth),
            show_ports: false,
            kind: ShapeKind::Group { children },
        };
        shape.refresh_bounds();
        shape
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn origin(&self) -> egui::Pos2 {
        self.origin
    }

    pub fn size(&self) -> egui::Vec2 {
        self.size
    }

    pub fn bounds(&self) -> egui::Rect {
        egui::Rect::from_min_size(self.origin, self.size)
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.depth = layers::clamp_depth(depth);
    }

    pub fn is_on_top(&self) -> bool {
        self.depth == DEPTH_TOP
    }

    pub fn show_ports(&self) -> bool {
        self.show_ports
    }

    pub fn set_show_ports(&mut self, show: bool) {
        self.show_ports = show;
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group { .. })
    }

    /// Groups can be selected and dragged but never start or end a connector.
    pub fn is_connectable(&self) -> bool {
        !self.is_group()
    }

    pub fn children(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Group { children } => children,
            _ => &[],
        }
    }

    pub(crate) fn into_children(self) -> Vec<Shape> {
        match self.kind {
            ShapeKind::Group { children } => children,
            _ => Vec::new(),
        }
    }

    pub fn label(&self) -> Option<&Label> {
        match &self.kind {
            ShapeKind::Rect { label } | ShapeKind::Oval { label } => Some(label),
            ShapeKind::Group { .. } => None,
        }
    }

    pub fn label_mut(&mut self) -> Option<&mut Label> {
        match &mut self.kind {
            ShapeKind::Rect { label } | ShapeKind::Oval { label } => Some(label),
            ShapeKind::Group { .. } => None,
        }
    }

    /// Resizes a rectangle or oval. Negative extents clamp to zero; groups
    /// ignore this since their size follows their children.
    pub fn set_size(&mut self, size: egui::Vec2) {
        if self.is_group() {
            return;
        }
        self.size = egui::vec2(size.x.max(0.0), size.y.max(0.0));
    }

    pub fn contains(&self, p: egui::Pos2) -> bool {
        self.bounds().contains(p)
    }

    pub fn move_by(&mut self, delta: egui::Vec2) {
        self.origin += delta;
        if let ShapeKind::Group { children } = &mut self.kind {
            for child in children.iter_mut() {
                child.move_by(delta);
            }
        }
        self.refresh_bounds();
    }

    fn refresh_bounds(&mut self) {
        let ShapeKind::Group { children } = &self.kind else {
            return;
        };
        match geometry::union_bounds(children.iter().map(Shape::bounds)) {
            Some(b) => {
                self.origin = b.min;
                self.size = b.size();
            }
            None => {
                self.origin = egui::Pos2::ZERO;
                self.size = egui::Vec2::ZERO;
            }
        }
    }

    pub fn ports(&self) -> Vec<egui::Pos2> {
        match self.kind {
            ShapeKind::Rect { .. } => geometry::rect_ports(self.bounds()),
            ShapeKind::Oval { .. } | ShapeKind::Group { .. } => {
                geometry::edge_midpoints(self.bounds())
            }
        }
    }

    pub fn closest_port(&self, reference: egui::Pos2) -> Option<egui::Pos2> {
        geometry::closest_point(&self.ports(), reference)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectorKind {
    Association,
    Generalization,
    Composition,
}

impl ConnectorKind {
    pub fn name(self) -> &'static str {
        match self {
            ConnectorKind::Association => "Association",
            ConnectorKind::Generalization => "Generalization",
            ConnectorKind::Composition => "Composition",
        }
    }
}

/// A typed link between two top-level shapes.
///
/// Each end is glued to its shape by an offset frozen at creation time, and
/// the depth is always derived from the two endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    id: ConnectorId,
    kind: ConnectorKind,
    start: ShapeId,
    end: ShapeId,
    start_offset: egui::Vec2,
    end_offset: egui::Vec2,
    start_point: egui::Pos2,
    end_point: egui::Pos2,
    depth: i32,
}

impl Connector {
    pub(crate) fn new(
        id: ConnectorId,
        kind: ConnectorKind,
        start: &Shape,
        start_point: egui::Pos2,
        end: &Shape,
        end_point: egui::Pos2,
    ) -> Self {
        Self {
            id,
            kind,
            start: start.id(),
            end: end.id(),
            start_offset: start_point - start.origin(),
            end_offset: end_point - end.origin(),
            start_point,
            end_point,
            depth: start.depth().min(end.depth()),
        }
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }

    pub fn start(&self) -> ShapeId {
        self.start
    }

    pub fn end(&self) -> ShapeId {
        self.end
    }

    pub fn start_point(&self) -> egui::Pos2 {
        self.start_point
    }

    pub fn end_point(&self) -> egui::Pos2 {
        self.end_point
    }

    pub fn start_offset(&self) -> egui::Vec2 {
        self.start_offset
    }

    pub fn end_offset(&self) -> egui::Vec2 {
        self.end_offset
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn touches(&self, id: ShapeId) -> bool {
        self.start == id || self.end == id
    }

    /// Re-glues both ends to the current shape positions and re-derives depth.
    pub(crate) fn reattach(&mut self, start: &Shape, end: &Shape) {
        self.start_point = start.origin() + self.start_offset;
        self.end_point = end.origin() + self.end_offset;
        self.depth = layers::clamp_depth(start.depth().min(end.depth()));
    }

    /// Moves every end attached to `from` onto `to`, keeping the absolute
    /// point and re-freezing the offset against `to`.
    pub(crate) fn retarget(&mut self, from: ShapeId, to: &Shape) {
        if self.start == from {
            self.start = to.id();
            self.start_offset = self.start_point - to.origin();
        }
        if self.end == from {
            self.end = to.id();
            self.end_offset = self.end_point - to.origin();
        }
    }
}
