use super::Diagram;
use crate::layers::DEPTH_TOP;
use crate::model::{Shape, ShapeId};

impl Diagram {
    /// Wraps the current selection (two or more shapes) in a new group.
    ///
    /// Connectors with both ends inside the selection are deleted. Connectors
    /// with one end inside are re-pointed at the group, keeping their
    /// absolute attachment point. Returns the group id, or `None` when fewer
    /// than two shapes are selected.
    pub fn group(&mut self) -> Option<ShapeId> {
        if self.selection.len() < 2 {
            log::trace!("group ignored: {} shape(s) selected", self.selection.len());
            return None;
        }

        let members = std::mem::take(&mut self.selection);
        let mut children = Vec::with_capacity(members.len());
        for id in &members {
            if let Some(idx) = self.shape_index(*id) {
                children.push(self.shapes.remove(idx));
            }
        }
        for child in &mut children {
            let depth = self.allocate_back();
            child.set_depth(depth);
            child.set_show_ports(false);
        }

        let group_id = self.allocate_id();
        let mut group = Shape::group(group_id, children, DEPTH_TOP);
        group.set_show_ports(true);

        let before = self.connectors.len();
        self.connectors
            .retain(|c| !(members.contains(&c.start()) && members.contains(&c.end())));
        let removed = before - self.connectors.len();
        for connector in &mut self.connectors {
            for id in &members {
                if connector.touches(*id) {
                    connector.retarget(*id, &group);
                }
            }
        }

        log::debug!(
            "grouped {:?} into {group_id}, dropped {removed} internal connector(s)",
            members
        );
        self.shapes.push(group);
        self.set_selection(vec![group_id]);
        Some(group_id)
    }

    /// Dissolves the single selected group back into its immediate children,
    /// which become top-level and selected. Connectors attached to the group
    /// itself are deleted. Returns the children's ids, or `None` when the
    /// selection is not exactly one group.
    pub fn ungroup(&mut self) -> Option<Vec<ShapeId>> {
        let [id] = self.selection[..] else {
            log::trace!("ungroup ignored: {} shape(s) selected", self.selection.len());
            return None;
        };
        let idx = self.shape_index(id)?;
        if !self.shapes[idx].is_group() {
            log::trace!("ungroup ignored: {id} is not a group");
            return None;
        }

        let group = self.shapes.remove(idx);
        self.selection.clear();
        self.connectors.retain(|c| !c.touches(id));

        let children = group.into_children();
        let ids: Vec<ShapeId> = children.iter().map(Shape::id).collect();
        self.shapes.extend(children);
        log::debug!("ungrouped {id} into {ids:?}");
        self.set_selection(ids.clone());
        Some(ids)
    }
}
