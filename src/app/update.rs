use eframe::egui;

use super::command_palette::{CommandContext, CommandPalette};
use super::help::draw_help_window;
use super::render::{draw_background, draw_diagram, draw_guide, label_editor, tool_button};
use super::{DiagramApp, Tool};
use crate::canvas::PointerEvent;
use crate::model::ConnectorKind;

impl eframe::App for DiagramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();
        let editing_label = self.label_editor.is_some();
        ctx.input_mut(|i| {
            if !self.command_palette.open
                && i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::P)
            {
                self.command_palette.open("");
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = true;
            }
            if wants_keyboard || self.command_palette.open || editing_label {
                return;
            }
            if i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::G) {
                self.ungroup_selected();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::G) {
                self.group_selected();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::L) {
                self.open_label_editor();
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                self.set_tool(Tool::Select);
            }
            let shortcuts = [
                (egui::Key::V, Tool::Select),
                (egui::Key::A, Tool::Connect(ConnectorKind::Association)),
                (egui::Key::G, Tool::Connect(ConnectorKind::Generalization)),
                (egui::Key::C, Tool::Connect(ConnectorKind::Composition)),
                (egui::Key::R, Tool::Rect),
                (egui::Key::O, Tool::Oval),
            ];
            for (key, tool) in shortcuts {
                if i.consume_key(egui::Modifiers::NONE, key) {
                    self.set_tool(tool);
                }
            }
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Edit", |ui| {
                    let selected = self.diagram.selection().len();
                    if ui
                        .add_enabled(selected >= 2, egui::Button::new("Group (⌘G)"))
                        .clicked()
                    {
                        self.group_selected();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.can_ungroup(), egui::Button::new("Ungroup (⌘⇧G)"))
                        .clicked()
                    {
                        self.ungroup_selected();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(self.label_target().is_some(), egui::Button::new("Label... (⌘L)"))
                        .clicked()
                    {
                        self.open_label_editor();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(selected > 0, egui::Button::new("Deselect All"))
                        .clicked()
                    {
                        self.diagram.clear_selection();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.settings.show_grid, "Show grid").changed() {
                        self.persist_settings();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Show Help (F1)").clicked() {
                        self.show_help = true;
                        ui.close_menu();
                    }
                    if ui.button("Command Palette (⌘⇧P)").clicked() {
                        self.command_palette.open("");
                        ui.close_menu();
                    }
                });
                ui.separator();
                let current = self.canvas.tool();
                for tool in Tool::ALL {
                    if tool_button(ui, tool, current) {
                        self.set_tool(tool);
                    }
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Depth: {}", self.diagram.layers().peek()));
                    ui.separator();
                    ui.label(format!("Connectors: {}", self.diagram.connectors().len()));
                    ui.separator();
                    ui.label(format!("Shapes: {}", self.diagram.shapes().len()));
                    ui.separator();
                    ui.label(format!("Selected: {}", self.diagram.selection().len()));
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.canvas_ui(ui));

        self.label_window(ctx);

        let cx = CommandContext {
            selected_len: self.diagram.selection().len(),
            can_ungroup: self.can_ungroup(),
            can_edit_label: self.label_target().is_some(),
        };
        if let Some(cmd) = self.command_palette.ui(ctx, cx) {
            CommandPalette::execute(self, ctx, cmd);
        }

        draw_help_window(ctx, &mut self.show_help);
    }
}

impl DiagramApp {
    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let origin = response.rect.min;
        self.route_pointer(&ctx, &response, origin);

        if response.double_clicked() && self.canvas.tool() == Tool::Select {
            self.open_label_editor();
        }

        draw_background(&painter, response.rect, self.settings.show_grid);
        draw_diagram(&painter, origin, &self.diagram);
        if let Some(guide) = self.canvas.guide() {
            draw_guide(&painter, origin, guide);
        }
    }

    /// Turns this frame's raw egui pointer state into canvas events.
    /// Coordinates are relative to the canvas widget's top-left corner.
    fn route_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, origin: egui::Pos2) {
        let (pressed, released, down, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.interact_pos(),
            )
        });
        let Some(screen) = pos else {
            return;
        };
        let p = screen - origin.to_vec2();
        let moved = self.last_pointer != Some(p);
        self.last_pointer = Some(p);

        // A quick click can report press and release in the same frame.
        if pressed && response.hovered() {
            self.pointer_captured = true;
            self.pointer(PointerEvent::Press(p), ctx);
        }
        if self.pointer_captured && released {
            self.pointer_captured = false;
            self.pointer(PointerEvent::Release(p), ctx);
        } else if self.pointer_captured && down && moved && !pressed {
            self.pointer(PointerEvent::Drag(p), ctx);
        } else if !pressed && !down && moved && response.hovered() {
            self.pointer(PointerEvent::Move(p), ctx);
        }
    }

    fn label_window(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.label_editor.as_mut() else {
            return;
        };
        let mut apply = false;
        let mut cancel = false;
        egui::Window::new("Label")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                label_editor(ui, &mut editor.draft);
                ui.separator();
                ui.horizontal(|ui| {
                    apply = ui.button("OK").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });
        if apply {
            self.apply_label_editor();
        } else if cancel {
            self.label_editor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::settings::AppSettings;
    use crate::canvas::Guide;

    fn app() -> DiagramApp {
        DiagramApp::with_settings(AppSettings::default(), "unused-settings.toml".to_string())
    }

    fn run_frame(ctx: &egui::Context, app: &mut DiagramApp, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| app.canvas_ui(ui));
        });
    }

    fn button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Hovers `pos`, clicks it with press and release in one frame, then
    /// lets two idle frames pass.
    fn fast_click(ctx: &egui::Context, app: &mut DiagramApp, pos: egui::Pos2) {
        run_frame(ctx, app, vec![egui::Event::PointerMoved(pos)]);
        run_frame(ctx, app, vec![button(pos, true), button(pos, false)]);
        run_frame(ctx, app, vec![]);
        run_frame(ctx, app, vec![egui::Event::PointerMoved(pos)]);
    }

    #[test]
    fn fast_click_on_empty_canvas_ends_the_box_select() {
        let ctx = egui::Context::default();
        let mut app = app();

        fast_click(&ctx, &mut app, egui::pos2(400.0, 300.0));

        assert!(!app.canvas.is_box_selecting());
        assert_eq!(app.canvas.guide(), None);
        assert!(!app.pointer_captured);
    }

    #[test]
    fn fast_click_in_connect_mode_ends_the_link() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.diagram
            .add_rect(egui::pos2(380.0, 280.0), egui::vec2(40.0, 40.0));
        app.set_tool(Tool::Connect(ConnectorKind::Association));

        fast_click(&ctx, &mut app, egui::pos2(400.0, 300.0));

        assert!(!app.canvas.is_link_dragging());
        assert_eq!(app.canvas.guide(), None);
        assert!(app.diagram.connectors().is_empty());
        assert!(!app.pointer_captured);
    }

    #[test]
    fn press_drag_release_across_frames_box_selects() {
        let ctx = egui::Context::default();
        let mut app = app();
        let inside = app
            .diagram
            .add_rect(egui::pos2(50.0, 50.0), egui::vec2(40.0, 40.0));
        let start = egui::pos2(10.0, 10.0);
        let end = egui::pos2(200.0, 200.0);

        run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(start)]);
        run_frame(&ctx, &mut app, vec![button(start, true)]);
        assert!(app.canvas.is_box_selecting());
        run_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(end)]);
        assert_eq!(
            app.canvas.guide(),
            Some(Guide::SelectionBox(egui::Rect::from_min_max(start, end)))
        );
        run_frame(&ctx, &mut app, vec![button(end, false)]);

        assert_eq!(app.diagram.selection(), &[inside]);
        assert!(!app.canvas.is_box_selecting());
        assert!(!app.pointer_captured);
    }
}
