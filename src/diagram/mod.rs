//! The diagram context: top-level shapes, connectors, the selection set and
//! the layer allocator, passed explicitly to whoever mutates them.

use eframe::egui;

use crate::layers::LayerAllocator;
use crate::model::{Connector, ConnectorId, ConnectorKind, Label, Shape, ShapeId};

mod grouping;
mod hit;
mod ordering;
mod selection;

pub use ordering::PaintItem;

#[derive(Clone, Debug)]
pub struct Diagram {
    shapes: Vec<Shape>,
    connectors: Vec<Connector>,
    selection: Vec<ShapeId>,
    layers: LayerAllocator,
    default_label: Label,
    next_id: u64,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new(LayerAllocator::default())
    }
}

impl Diagram {
    pub fn new(layers: LayerAllocator) -> Self {
        Self {
            shapes: Vec::new(),
            connectors: Vec::new(),
            selection: Vec::new(),
            layers,
            default_label: Label::default(),
            next_id: 1,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn layers(&self) -> &LayerAllocator {
        &self.layers
    }

    /// Label style given to every rectangle and oval created from now on.
    pub fn set_default_label(&mut self, label: Label) {
        let mut label = label;
        label.set_font_size(label.font_size());
        self.default_label = label;
    }

    /// Top-level shape by id. Shapes nested inside a group are not reachable.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    fn shape_index(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Depth for a newly created shape.
    fn allocate_top(&mut self) -> i32 {
        self.ensure_layers();
        self.layers.allocate_top()
    }

    /// Depth for a shape leaving the selected tier.
    fn allocate_back(&mut self) -> i32 {
        self.ensure_layers();
        self.layers.allocate_back()
    }

    /// Restacks first when the allocator has run dry. Past that point it
    /// would hand `0` to every caller and new shapes would tie.
    fn ensure_layers(&mut self) {
        if self.layers.is_exhausted() {
            self.restack();
        }
    }

    fn restack(&mut self) {
        self.layers.reset();
        let mut order: Vec<usize> = (0..self.shapes.len())
            .filter(|&i| !self.shapes[i].is_on_top())
            .collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.shapes[i].depth()));
        log::debug!("restacking {} shapes", order.len());
        for i in order {
            let depth = self.layers.next_depth();
            self.shapes[i].set_depth(depth);
        }
    }

    fn push_basic(&mut self, mut shape: Shape) {
        if let Some(label) = shape.label_mut() {
            *label = self.default_label.clone();
        }
        self.shapes.push(shape);
    }

    pub fn add_rect(&mut self, origin: egui::Pos2, size: egui::Vec2) -> ShapeId {
        let id = self.allocate_id();
        let depth = self.allocate_top();
        self.push_basic(Shape::rect(id, origin, size, depth));
        log::debug!("created rect {id} at {origin:?} depth {depth}");
        id
    }

    pub fn add_oval(&mut self, origin: egui::Pos2, size: egui::Vec2) -> ShapeId {
        let id = self.allocate_id();
        let depth = self.allocate_top();
        self.push_basic(Shape::oval(id, origin, size, depth));
        log::debug!("created oval {id} at {origin:?} depth {depth}");
        id
    }

    /// Translates a top-level shape (recursively for groups) and re-glues the
    /// connectors attached to it.
    pub fn move_shape(&mut self, id: ShapeId, delta: egui::Vec2) -> bool {
        let Some(idx) = self.shape_index(id) else {
            return false;
        };
        if delta == egui::Vec2::ZERO {
            return false;
        }
        self.shapes[idx].move_by(delta);
        self.sync_connectors();
        true
    }

    /// Creates a connector between two distinct, connectable top-level shapes.
    pub fn connect(
        &mut self,
        kind: ConnectorKind,
        start: ShapeId,
        start_point: egui::Pos2,
        end: ShapeId,
        end_point: egui::Pos2,
    ) -> Option<ConnectorId> {
        if start == end {
            log::trace!("connector rejected: both ends on shape {start}");
            return None;
        }
        let (Some(ia), Some(ib)) = (self.shape_index(start), self.shape_index(end)) else {
            log::trace!("connector rejected: missing endpoint {start} -> {end}");
            return None;
        };
        if !self.shapes[ia].is_connectable() || !self.shapes[ib].is_connectable() {
            log::trace!("connector rejected: group endpoint {start} -> {end}");
            return None;
        }
        let id = self.allocate_id();
        let connector = Connector::new(
            id,
            kind,
            &self.shapes[ia],
            start_point,
            &self.shapes[ib],
            end_point,
        );
        log::debug!(
            "created {} {id}: {start} -> {end} depth {}",
            kind.name(),
            connector.depth()
        );
        self.connectors.push(connector);
        Some(id)
    }

    /// Re-derives every connector's endpoints and depth from its shapes.
    pub(crate) fn sync_connectors(&mut self) {
        let shapes = &self.shapes;
        self.connectors.retain_mut(|c| {
            let start = shapes.iter().find(|s| s.id() == c.start());
            let end = shapes.iter().find(|s| s.id() == c.end());
            match (start, end) {
                (Some(start), Some(end)) => {
                    c.reattach(start, end);
                    true
                }
                _ => {
                    log::warn!(
                        "dropping connector {} with dangling endpoint {} -> {}",
                        c.id(),
                        c.start(),
                        c.end()
                    );
                    false
                }
            }
        });
    }

    pub fn label(&self, id: ShapeId) -> Option<&Label> {
        self.shape(id).and_then(Shape::label)
    }

    /// Mutable label of a top-level rectangle or oval. Groups have none.
    pub fn label_mut(&mut self, id: ShapeId) -> Option<&mut Label> {
        let idx = self.shape_index(id)?;
        self.shapes[idx].label_mut()
    }

    /// Replaces a shape's label style; returns false for groups and unknown ids.
    pub fn set_label(&mut self, id: ShapeId, label: Label) -> bool {
        match self.label_mut(id) {
            Some(slot) => {
                let mut label = label;
                label.set_font_size(label.font_size());
                *slot = label;
                true
            }
            None => false,
        }
    }
}
