use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help & Commands")
        .open(open)
        .resizable(true)
        .default_width(460.0)
        .default_height(420.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.separator();

                ui.label("General");
                help_row(ui, "⌘⇧P", "Open command palette");
                help_row(ui, "F1", "Show this window");
                help_row(ui, "Escape", "Cancel current gesture / Select tool");

                ui.add_space(10.0);
                ui.label("Editing");
                help_row(ui, "⌘G", "Group selected shapes");
                help_row(ui, "⌘⇧G", "Ungroup selected group");
                help_row(ui, "⌘L", "Edit label of selected shape");
                help_row(ui, "Double-click", "Edit label of a shape");

                ui.add_space(10.0);
                ui.label("Tools");
                help_row(ui, "V", "Select");
                help_row(ui, "A", "Association");
                help_row(ui, "G", "Generalization");
                help_row(ui, "C", "Composition");
                help_row(ui, "R", "Rect");
                help_row(ui, "O", "Oval");

                ui.add_space(20.0);
                ui.heading("Canvas");
                ui.separator();
                ui.label("• Rect / Oval: click to drop a shape at the pointer.");
                ui.label("• Connector tools: press on a shape, drag to another, release.");
                ui.label("  Ends snap to the nearest port. Groups cannot be linked.");
                ui.label("• Select: click a shape to select and drag it.");
                ui.label("  Drag on empty space to box-select fully enclosed shapes.");
                ui.label("• Selected shapes always paint and hit-test on top.");

                ui.add_space(20.0);
                ui.heading("Settings");
                ui.separator();
                ui.label("Settings are read from ~/.config/umlcanvas.toml or ./settings.toml:");
                ui.add_space(5.0);
                ui.code(
                    r##"default_shape_width = 120.0
default_shape_height = 80.0
initial_depth = 99
label_font_size = 12.0
label_color = { r = 255, g = 255, b = 255, a = 255 }
show_grid = false"##,
                );
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [100.0, 16.0],
            egui::Label::new(egui::RichText::new(shortcut).monospace().strong()),
        );
        ui.label(description);
    });
}
