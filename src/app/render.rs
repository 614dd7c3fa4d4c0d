use eframe::egui;

use crate::canvas::{Guide, Tool};
use crate::diagram::{Diagram, PaintItem};
use crate::geometry;
use crate::model::{self, Connector, ConnectorKind, Shape, ShapeKind};

const RECT_FILL: egui::Color32 = egui::Color32::from_rgb(0xF6, 0xF0, 0xF0);
const OUTLINE: egui::Color32 = egui::Color32::from_rgb(20, 20, 20);
const GROUP_OUTLINE: egui::Color32 = egui::Color32::from_rgb(255, 0, 255);
const SELECTION: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);
const PORT_SIZE: f32 = 6.0;
const HEAD_SIZE: f32 = 12.0;

pub(super) fn tool_button(ui: &mut egui::Ui, tool: Tool, selected: Tool) -> bool {
    ui.selectable_label(selected == tool, tool.label()).clicked()
}

fn color_row(ui: &mut egui::Ui, rgba: &mut model::Rgba) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        let presets = [
            egui::Color32::WHITE,
            egui::Color32::from_rgb(255, 240, 170),
            egui::Color32::from_rgb(200, 230, 255),
            egui::Color32::from_rgb(200, 240, 200),
            egui::Color32::from_rgb(255, 200, 200),
            egui::Color32::from_rgb(220, 200, 240),
        ];
        for c in presets {
            if ui
                .add_sized([18.0, 18.0], egui::Button::new("").fill(c))
                .clicked()
            {
                *rgba = model::Rgba::from_color32(c);
                changed = true;
            }
        }
        let mut arr = [rgba.r, rgba.g, rgba.b, rgba.a];
        if ui.color_edit_button_srgba_unmultiplied(&mut arr).changed() {
            let [r, g, b, a] = arr;
            *rgba = model::Rgba { r, g, b, a };
            changed = true;
        }
    });
    changed
}

/// Text, background shape, color and font size of one label.
pub(super) fn label_editor(ui: &mut egui::Ui, label: &mut model::Label) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Text:");
        changed |= ui.text_edit_singleline(&mut label.text).changed();
    });
    ui.horizontal(|ui| {
        ui.label("Shape:");
        changed |= ui
            .selectable_value(&mut label.shape, model::LabelShape::Rect, "Rectangle")
            .changed();
        changed |= ui
            .selectable_value(&mut label.shape, model::LabelShape::Oval, "Oval")
            .changed();
    });
    ui.label("Color");
    changed |= color_row(ui, &mut label.color);
    let mut size = label.font_size();
    if ui
        .add(
            egui::Slider::new(&mut size, model::LABEL_FONT_MIN..=model::LABEL_FONT_MAX)
                .step_by(1.0)
                .text("Font size"),
        )
        .changed()
    {
        label.set_font_size(size);
        changed = true;
    }
    changed
}

pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect, show_grid: bool) {
    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
    if !show_grid {
        return;
    }
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(230));
    let spacing = 32.0;
    let mut x = rect.min.x;
    while x < rect.max.x {
        painter.line_segment([egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)], stroke);
        x += spacing;
    }
    let mut y = rect.min.y;
    while y < rect.max.y {
        painter.line_segment([egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)], stroke);
        y += spacing;
    }
}

/// Paints the diagram back to front. `origin` is the canvas widget's top-left
/// corner in screen space.
pub(super) fn draw_diagram(painter: &egui::Painter, origin: egui::Pos2, diagram: &Diagram) {
    let offset = origin.to_vec2();
    for item in diagram.paint_order() {
        match item {
            PaintItem::Shape(shape) => {
                draw_shape(painter, offset, shape);
                if diagram.is_selected(shape.id()) {
                    let r = shape.bounds().translate(offset).expand(2.0);
                    painter.rect_stroke(
                        r,
                        0.0,
                        egui::Stroke::new(1.0, SELECTION),
                        egui::StrokeKind::Middle,
                    );
                }
            }
            PaintItem::Connector(connector) => draw_connector(painter, offset, connector),
        }
    }
}

fn draw_shape(painter: &egui::Painter, offset: egui::Vec2, shape: &Shape) {
    let r = shape.bounds().translate(offset);
    let stroke = egui::Stroke::new(1.0, OUTLINE);
    match shape.kind() {
        ShapeKind::Rect { label } => {
            painter.rect_filled(r, 0.0, RECT_FILL);
            painter.rect_stroke(r, 0.0, stroke, egui::StrokeKind::Middle);
            for frac in [1.0 / 3.0, 2.0 / 3.0] {
                let y = r.min.y + r.height() * frac;
                painter.line_segment([egui::pos2(r.min.x, y), egui::pos2(r.max.x, y)], stroke);
            }
            draw_label(painter, r, label);
        }
        ShapeKind::Oval { label } => {
            let radius = r.size() * 0.5;
            painter.add(egui::Shape::ellipse_filled(r.center(), radius, egui::Color32::WHITE));
            painter.add(egui::Shape::ellipse_stroke(r.center(), radius, stroke));
            draw_label(painter, r, label);
        }
        ShapeKind::Group { children } => {
            for child in children {
                draw_shape(painter, offset, child);
            }
            painter.rect_stroke(
                r,
                0.0,
                egui::Stroke::new(1.0, GROUP_OUTLINE),
                egui::StrokeKind::Middle,
            );
        }
    }
    if shape.show_ports() {
        for port in shape.ports() {
            let square = egui::Rect::from_center_size(port + offset, egui::Vec2::splat(PORT_SIZE));
            painter.rect_filled(square, 0.0, OUTLINE);
        }
    }
}

fn draw_label(painter: &egui::Painter, bounds: egui::Rect, label: &model::Label) {
    if label.text.is_empty() {
        return;
    }
    let font_id = egui::FontId::proportional(label.font_size());
    let galley = painter.layout_no_wrap(label.text.clone(), font_id, OUTLINE);
    let center = bounds.center();
    let back = egui::Rect::from_center_size(center, galley.size() + egui::vec2(8.0, 4.0));
    let fill = label.color.to_color32();
    match label.shape {
        model::LabelShape::Rect => {
            painter.rect_filled(back, 0.0, fill);
        }
        model::LabelShape::Oval => {
            painter.add(egui::Shape::ellipse_filled(back.center(), back.size() * 0.5, fill));
        }
    }
    let text_pos = center - galley.size() * 0.5;
    painter.galley(text_pos, galley, OUTLINE);
}

fn draw_connector(painter: &egui::Painter, offset: egui::Vec2, connector: &Connector) {
    let a = connector.start_point() + offset;
    let b = connector.end_point() + offset;
    let stroke = egui::Stroke::new(1.5, OUTLINE);
    match connector.kind() {
        ConnectorKind::Association => {
            painter.line_segment([a, b], stroke);
            if let Some([left, right]) = geometry::open_arrow_barbs(a, b, HEAD_SIZE) {
                painter.line_segment([left, b], stroke);
                painter.line_segment([right, b], stroke);
            }
        }
        ConnectorKind::Generalization => match geometry::triangle_head(a, b, HEAD_SIZE) {
            Some([tip, left, right]) => {
                let base = egui::pos2((left.x + right.x) * 0.5, (left.y + right.y) * 0.5);
                painter.line_segment([a, base], stroke);
                painter.add(egui::Shape::convex_polygon(
                    vec![tip, left, right],
                    egui::Color32::WHITE,
                    stroke,
                ));
            }
            None => {
                painter.line_segment([a, b], stroke);
            }
        },
        ConnectorKind::Composition => {
            match geometry::diamond_head(a, b, HEAD_SIZE * 0.5, HEAD_SIZE * 0.4) {
                Some(diamond) => {
                    painter.line_segment([a, diamond[2]], stroke);
                    painter.add(egui::Shape::convex_polygon(
                        diamond.to_vec(),
                        OUTLINE,
                        stroke,
                    ));
                }
                None => {
                    painter.line_segment([a, b], stroke);
                }
            }
        }
    }
}

pub(super) fn draw_guide(painter: &egui::Painter, origin: egui::Pos2, guide: Guide) {
    let offset = origin.to_vec2();
    match guide {
        Guide::Link { from, to } => {
            painter.line_segment(
                [from + offset, to + offset],
                egui::Stroke::new(1.0, egui::Color32::GRAY),
            );
        }
        Guide::SelectionBox(rect) => {
            let r = rect.translate(offset);
            painter.rect_filled(r, 0.0, SELECTION.gamma_multiply(0.1));
            painter.rect_stroke(
                r,
                0.0,
                egui::Stroke::new(1.0, SELECTION),
                egui::StrokeKind::Middle,
            );
        }
    }
}
