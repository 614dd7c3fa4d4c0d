use super::Diagram;
use crate::layers::DEPTH_TOP;
use crate::model::ShapeId;

impl Diagram {
    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    /// Replaces the selection set.
    ///
    /// Selected shapes move to `DEPTH_TOP` and show their ports. Any other
    /// shape still sitting at `DEPTH_TOP` gets a fresh depth so it rejoins
    /// normal stacking. Connector depths are re-derived afterwards.
    pub fn set_selection(&mut self, ids: Vec<ShapeId>) {
        let mut selection: Vec<ShapeId> = Vec::with_capacity(ids.len());
        for id in ids {
            if self.shape(id).is_some() && !selection.contains(&id) {
                selection.push(id);
            }
        }

        for i in 0..self.shapes.len() {
            let id = self.shapes[i].id();
            if selection.contains(&id) {
                self.shapes[i].set_depth(DEPTH_TOP);
                self.shapes[i].set_show_ports(true);
            } else {
                if self.shapes[i].is_on_top() {
                    let depth = self.allocate_back();
                    self.shapes[i].set_depth(depth);
                }
                self.shapes[i].set_show_ports(false);
            }
        }

        self.selection = selection;
        self.sync_connectors();
    }

    pub fn select_only(&mut self, id: ShapeId) {
        self.set_selection(vec![id]);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Vec::new());
    }

    pub fn clear_port_flags(&mut self) {
        for shape in &mut self.shapes {
            shape.set_show_ports(false);
        }
    }

    /// Shows ports on exactly `hovered`. Returns true if any flag changed.
    pub fn highlight_ports(&mut self, hovered: Option<ShapeId>) -> bool {
        let mut changed = false;
        for shape in &mut self.shapes {
            let show = Some(shape.id()) == hovered;
            if shape.show_ports() != show {
                shape.set_show_ports(show);
                changed = true;
            }
        }
        changed
    }

    /// Puts port flags back to "selected shapes only".
    pub fn restore_port_flags(&mut self) {
        for i in 0..self.shapes.len() {
            let selected = self.selection.contains(&self.shapes[i].id());
            self.shapes[i].set_show_ports(selected);
        }
    }
}
