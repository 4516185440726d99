//! Control Panel Widget
//! Region and month dropdowns, export buttons and the status line.

use crate::data::Region;
use crate::view::ViewModel;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Selection controls shown above the charts.
pub struct ControlPanel {
    pub status: String,
    pub last_export: Option<PathBuf>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            last_export: None,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the controls for the current view
    pub fn show(&mut self, ui: &mut egui::Ui, view: &ViewModel) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        let label_width = 110.0;
        let combo_width = 180.0;

        // Region
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select park:"));
            ComboBox::from_id_salt("region")
                .width(combo_width)
                .selected_text(view.selection.region.as_str())
                .show_ui(ui, |ui| {
                    for &region in &view.regions {
                        if ui
                            .selectable_label(view.selection.region == region, region.as_str())
                            .clicked()
                            && view.selection.region != region
                        {
                            action = ControlPanelAction::RegionChanged(region);
                        }
                    }
                });
        });

        ui.add_space(5.0);

        // Month
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select month:"));
            let selected = view.selection.month.as_deref().unwrap_or("-");
            ComboBox::from_id_salt("month")
                .width(combo_width)
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    for month in &view.months {
                        let is_selected = view.selection.month.as_deref() == Some(month.as_str());
                        if ui.selectable_label(is_selected, month).clicked() && !is_selected {
                            action = ControlPanelAction::MonthChanged(month.clone());
                        }
                    }
                });
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui.button(RichText::new("🖼 Export PNG").size(14.0)).clicked() {
                action = ControlPanelAction::ExportPng;
            }
            ui.add_enabled_ui(self.last_export.is_some(), |ui| {
                if ui.button(RichText::new("📂 Open export").size(14.0)).clicked() {
                    action = ControlPanelAction::OpenExport;
                }
            });

            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.starts_with("Exported") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    RegionChanged(Region),
    MonthChanged(String),
    ExportPng,
    OpenExport,
}
