use eframe::egui;

use crate::canvas::{Canvas, PointerEvent, Tool};
use crate::diagram::Diagram;
use crate::layers::LayerAllocator;
use crate::model::{Label, ShapeId};

mod command_palette;
mod help;
mod render;
mod settings;
mod update;

/// Working copy of a shape's label while the label window is open.
#[derive(Clone, Debug)]
struct LabelEditor {
    shape: ShapeId,
    draft: Label,
}

pub struct DiagramApp {
    diagram: Diagram,
    canvas: Canvas,
    settings: settings::AppSettings,
    settings_path: String,
    /// Primary button went down over the canvas and has not been released.
    pointer_captured: bool,
    last_pointer: Option<egui::Pos2>,
    label_editor: Option<LabelEditor>,
    command_palette: command_palette::CommandPalette,
    status: Option<String>,
    show_help: bool,
}

impl DiagramApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = settings::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path);
        Self::with_settings(settings, settings_path)
    }

    fn with_settings(settings: settings::AppSettings, settings_path: String) -> Self {
        let mut diagram = Diagram::new(LayerAllocator::new(settings.initial_depth));
        let mut label = Label::default();
        label.color = settings.label_color;
        label.set_font_size(settings.label_font_size);
        diagram.set_default_label(label);
        let canvas = Canvas::new(egui::vec2(
            settings.default_shape_width,
            settings.default_shape_height,
        ));
        Self {
            diagram,
            canvas,
            settings,
            settings_path,
            pointer_captured: false,
            last_pointer: None,
            label_editor: None,
            command_palette: command_palette::CommandPalette::default(),
            status: None,
            show_help: false,
        }
    }

    fn set_tool(&mut self, tool: Tool) {
        self.canvas.set_tool(tool, &mut self.diagram);
        self.pointer_captured = false;
    }

    fn pointer(&mut self, event: PointerEvent, ctx: &egui::Context) {
        self.canvas.handle(&mut self.diagram, event, ctx);
    }

    fn can_ungroup(&self) -> bool {
        match self.diagram.selection() {
            [id] => self.diagram.shape(*id).is_some_and(|s| s.is_group()),
            _ => false,
        }
    }

    fn group_selected(&mut self) {
        match self.diagram.group() {
            Some(id) => self.status = Some(format!("Grouped into #{id}")),
            None => self.status = Some("Select at least two shapes to group".to_string()),
        }
    }

    fn ungroup_selected(&mut self) {
        match self.diagram.ungroup() {
            Some(children) => self.status = Some(format!("Ungrouped {} shape(s)", children.len())),
            None => self.status = Some("Select a single group to ungroup".to_string()),
        }
    }

    /// The single selected shape whose label can be edited, if any.
    fn label_target(&self) -> Option<ShapeId> {
        match self.diagram.selection() {
            [id] => self.diagram.label(*id).map(|_| *id),
            _ => None,
        }
    }

    fn open_label_editor(&mut self) {
        let Some(shape) = self.label_target() else {
            self.status = Some("Select a single rectangle or oval to edit its label".to_string());
            return;
        };
        if let Some(label) = self.diagram.label(shape) {
            self.label_editor = Some(LabelEditor {
                shape,
                draft: label.clone(),
            });
        }
    }

    fn apply_label_editor(&mut self) {
        if let Some(editor) = self.label_editor.take() {
            if !self.diagram.set_label(editor.shape, editor.draft) {
                log::warn!("label target {} no longer exists", editor.shape);
            }
        }
    }

    fn persist_settings(&mut self) {
        if let Err(err) = settings::save_settings(&self.settings_path, &self.settings) {
            log::warn!("failed to save settings: {err:#}");
            self.status = Some(format!("Failed to save settings: {err}"));
        }
    }
}
