use eframe::egui;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::DiagramApp;
use crate::canvas::Tool;
use crate::model::ConnectorKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CommandId {
    ToolSelect,
    ToolAssociation,
    ToolGeneralization,
    ToolComposition,
    ToolRect,
    ToolOval,
    Group,
    Ungroup,
    EditLabel,
    ClearSelection,
    ToggleGrid,
    Help,
}

pub(super) struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub search: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec { id: CommandId::ToolSelect, name: "Tool: Select", search: "select tool move v" },
    CommandSpec { id: CommandId::ToolAssociation, name: "Tool: Association", search: "association link connector tool a" },
    CommandSpec { id: CommandId::ToolGeneralization, name: "Tool: Generalization", search: "generalization inheritance link connector tool g" },
    CommandSpec { id: CommandId::ToolComposition, name: "Tool: Composition", search: "composition diamond link connector tool c" },
    CommandSpec { id: CommandId::ToolRect, name: "Tool: Rect", search: "rectangle rect class tool r" },
    CommandSpec { id: CommandId::ToolOval, name: "Tool: Oval", search: "oval ellipse use case tool o" },
    CommandSpec { id: CommandId::Group, name: "Edit: Group", search: "group" },
    CommandSpec { id: CommandId::Ungroup, name: "Edit: Ungroup", search: "ungroup" },
    CommandSpec { id: CommandId::EditLabel, name: "Edit: Label...", search: "label text name rename font color" },
    CommandSpec { id: CommandId::ClearSelection, name: "Edit: Clear selection", search: "clear deselect selection" },
    CommandSpec { id: CommandId::ToggleGrid, name: "View: Toggle grid", search: "grid toggle view" },
    CommandSpec { id: CommandId::Help, name: "Help: Shortcuts", search: "help shortcuts keys" },
];

#[derive(Default)]
pub(super) struct CommandPalette {
    pub open: bool,
    pub query: String,
    pub selected: usize,
    request_focus: bool,
}

#[derive(Clone, Copy)]
pub(super) struct CommandContext {
    pub selected_len: usize,
    pub can_ungroup: bool,
    pub can_edit_label: bool,
}

impl CommandPalette {
    pub fn open(&mut self, query: impl Into<String>) {
        self.open = true;
        self.query = query.into();
        self.selected = 0;
        self.request_focus = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
        self.request_focus = false;
    }

    fn is_enabled(cx: CommandContext, id: CommandId) -> bool {
        match id {
            CommandId::Group => cx.selected_len >= 2,
            CommandId::Ungroup => cx.can_ungroup,
            CommandId::EditLabel => cx.can_edit_label,
            CommandId::ClearSelection => cx.selected_len > 0,
            _ => true,
        }
    }

    pub(super) fn execute(app: &mut DiagramApp, ctx: &egui::Context, id: CommandId) {
        match id {
            CommandId::ToolSelect => app.set_tool(Tool::Select),
            CommandId::ToolAssociation => app.set_tool(Tool::Connect(ConnectorKind::Association)),
            CommandId::ToolGeneralization => {
                app.set_tool(Tool::Connect(ConnectorKind::Generalization))
            }
            CommandId::ToolComposition => app.set_tool(Tool::Connect(ConnectorKind::Composition)),
            CommandId::ToolRect => app.set_tool(Tool::Rect),
            CommandId::ToolOval => app.set_tool(Tool::Oval),
            CommandId::Group => app.group_selected(),
            CommandId::Ungroup => app.ungroup_selected(),
            CommandId::EditLabel => app.open_label_editor(),
            CommandId::ClearSelection => app.diagram.clear_selection(),
            CommandId::ToggleGrid => {
                app.settings.show_grid = !app.settings.show_grid;
                app.persist_settings();
            }
            CommandId::Help => app.show_help = true,
        }
        log::debug!("ran command {id:?}");
        ctx.request_repaint();
    }

    fn filtered(&self) -> Vec<(&'static CommandSpec, i64)> {
        filter_commands(&self.query)
    }

    pub fn ui(&mut self, ctx: &egui::Context, cx: CommandContext) -> Option<CommandId> {
        if !self.open {
            return None;
        }
        let matches = self.filtered();
        if self.selected >= matches.len() {
            self.selected = matches.len().saturating_sub(1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
            return None;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowDown)) && !matches.is_empty() {
            self.selected = (self.selected + 1).min(matches.len() - 1);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowUp)) && !matches.is_empty() {
            self.selected = self.selected.saturating_sub(1);
        }
        let mut run_selected = ctx.input(|i| i.key_pressed(egui::Key::Enter));

        let screen = ctx.content_rect();
        let width = 420.0;
        let height = 260.0;
        let pos = egui::pos2(screen.center().x - width * 0.5, screen.top() + 48.0);
        egui::Area::new(egui::Id::new("command_palette"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 20, 240))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 160, 255)))
                    .inner_margin(10.0)
                    .corner_radius(egui::CornerRadius::same(8));
                frame.show(ui, |ui| {
                    ui.set_min_size(egui::vec2(width, height));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .desired_width(f32::INFINITY)
                            .hint_text("Search commands"),
                    );
                    if self.request_focus {
                        resp.request_focus();
                        self.request_focus = false;
                    }
                    ui.separator();
                    egui::ScrollArea::vertical().max_height(height - 64.0).show(ui, |ui| {
                        for (idx, (spec, _score)) in matches.iter().enumerate() {
                            let enabled = CommandPalette::is_enabled(cx, spec.id);
                            let resp = ui.add_enabled(
                                enabled,
                                egui::Button::new(spec.name).selected(idx == self.selected),
                            );
                            if resp.clicked() {
                                self.selected = idx;
                                run_selected = true;
                            }
                        }
                    });
                });
            });

        if run_selected {
            if let Some((spec, _)) = matches.get(self.selected) {
                if CommandPalette::is_enabled(cx, spec.id) {
                    let cmd = spec.id;
                    self.close();
                    return Some(cmd);
                }
            }
        }
        None
    }
}

/// Commands matching `query`, best score first. An empty query lists all.
fn filter_commands(query: &str) -> Vec<(&'static CommandSpec, i64)> {
    let q = query.trim();
    if q.is_empty() {
        return COMMANDS.iter().map(|c| (c, 0)).collect();
    }
    let matcher = SkimMatcherV2::default();
    let mut out: Vec<(&'static CommandSpec, i64)> = COMMANDS
        .iter()
        .filter_map(|c| matcher.fuzzy_match(c.search, q).map(|score| (c, score)))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(b.0.name)));
    out
}
