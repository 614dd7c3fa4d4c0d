use eframe::egui;

/// Four corners and four edge midpoints, row by row from the top-left.
pub fn rect_ports(rect: egui::Rect) -> Vec<egui::Pos2> {
    let c = rect.center();
    vec![
        rect.left_top(),
        egui::pos2(c.x, rect.min.y),
        rect.right_top(),
        egui::pos2(rect.min.x, c.y),
        egui::pos2(rect.max.x, c.y),
        rect.left_bottom(),
        egui::pos2(c.x, rect.max.y),
        rect.right_bottom(),
    ]
}

/// North, south, west and east edge midpoints.
pub fn edge_midpoints(rect: egui::Rect) -> Vec<egui::Pos2> {
    let c = rect.center();
    vec![
        egui::pos2(c.x, rect.min.y),
        egui::pos2(c.x, rect.max.y),
        egui::pos2(rect.min.x, c.y),
        egui::pos2(rect.max.x, c.y),
    ]
}

/// Linear scan for the point nearest to `reference`. The first one wins ties.
pub fn closest_point(points: &[egui::Pos2], reference: egui::Pos2) -> Option<egui::Pos2> {
    let mut it = points.iter().copied();
    let mut best = it.next()?;
    let mut best_dist = best.distance_sq(reference);
    for p in it {
        let d = p.distance_sq(reference);
        if d < best_dist {
            best = p;
            best_dist = d;
        }
    }
    Some(best)
}

pub fn union_bounds(rects: impl IntoIterator<Item = egui::Rect>) -> Option<egui::Rect> {
    rects.into_iter().reduce(|a, b| a.union(b))
}

/// Two barb end points of an open arrowhead whose tip sits at `b`.
pub fn open_arrow_barbs(a: egui::Pos2, b: egui::Pos2, size: f32) -> Option<[egui::Pos2; 2]> {
    let (dir, perp) = direction(a, b)?;
    let base = b - dir * size;
    Some([base + perp * (size * 0.6), base - perp * (size * 0.6)])
}

/// Closed triangle (tip first) for a generalization head at `b`.
pub fn triangle_head(a: egui::Pos2, b: egui::Pos2, size: f32) -> Option<[egui::Pos2; 3]> {
    let [left, right] = open_arrow_barbs(a, b, size)?;
    Some([b, left, right])
}

/// Diamond (tip first, then clockwise) for a composition head at `b`.
pub fn diamond_head(
    a: egui::Pos2,
    b: egui::Pos2,
    half_len: f32,
    half_width: f32,
) -> Option<[egui::Pos2; 4]> {
    let (dir, perp) = direction(a, b)?;
    let center = b - dir * half_len;
    let back = b - dir * (half_len * 2.0);
    Some([b, center + perp * half_width, back, center - perp * half_width])
}

fn direction(a: egui::Pos2, b: egui::Pos2) -> Option<(egui::Vec2, egui::Vec2)> {
    let v = b - a;
    if v.length_sq() <= f32::EPSILON {
        return None;
    }
    let dir = v.normalized();
    Some((dir, egui::vec2(-dir.y, dir.x)))
}
