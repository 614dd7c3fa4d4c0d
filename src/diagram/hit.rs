use eframe::egui;

use super::Diagram;
use crate::model::ShapeId;

impl Diagram {
    /// Topmost top-level shape whose bounds contain `p`.
    ///
    /// Smallest depth wins; among equal depths the most recently inserted
    /// shape wins, which is also the one painted last. Connectors are never
    /// hit.
    pub fn find_top_shape_at(&self, p: egui::Pos2) -> Option<ShapeId> {
        self.shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.contains(p))
            .min_by_key(|(i, s)| (s.depth(), std::cmp::Reverse(*i)))
            .map(|(_, s)| s.id())
    }

    /// Like `find_top_shape_at`, but a group under the pointer yields nothing.
    pub fn find_connectable_at(&self, p: egui::Pos2) -> Option<ShapeId> {
        let id = self.find_top_shape_at(p)?;
        self.shape(id)
            .filter(|s| s.is_connectable())
            .map(|s| s.id())
    }

    /// Top-level shapes lying entirely inside `area` (edges inclusive).
    pub fn shapes_within(&self, area: egui::Rect) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| area.contains_rect(s.bounds()))
            .map(|s| s.id())
            .collect()
    }
}
