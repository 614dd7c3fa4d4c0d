use std::cmp::Reverse;

use super::Diagram;
use crate::layers::DEPTH_TOP;
use crate::model::{Connector, Shape};

/// One element of the paint sequence handed to the view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintItem<'a> {
    Shape(&'a Shape),
    Connector(&'a Connector),
}

impl PaintItem<'_> {
    pub fn depth(&self) -> i32 {
        match self {
            PaintItem::Shape(s) => s.depth(),
            PaintItem::Connector(c) => c.depth(),
        }
    }

    // Within one depth: shapes before connectors, except on the selected tier
    // where connectors go under the selected shapes.
    fn tier(&self) -> u8 {
        let top = self.depth() == DEPTH_TOP;
        match (self, top) {
            (PaintItem::Shape(_), false) | (PaintItem::Connector(_), true) => 0,
            (PaintItem::Shape(_), true) | (PaintItem::Connector(_), false) => 1,
        }
    }
}

impl Diagram {
    /// Back-to-front paint sequence: descending depth, so the most "on top"
    /// element comes last. Equal keys keep creation order.
    pub fn paint_order(&self) -> Vec<PaintItem<'_>> {
        let mut items: Vec<PaintItem<'_>> = self
            .shapes
            .iter()
            .map(PaintItem::Shape)
            .chain(self.connectors.iter().map(PaintItem::Connector))
            .collect();
        items.sort_by_key(|item| (Reverse(item.depth()), item.tier()));
        items
    }
}
