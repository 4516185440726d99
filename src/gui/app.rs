//! Park Review Dashboard Main Application
//! Single window: title, banner, selection controls, charts, reviews, recommendations.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::DataContext;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::view::{render, RenderOptions, SelectionState, ViewModel};
use egui::{RichText, ScrollArea, TextureHandle, TextureOptions};
use std::path::Path;
use std::sync::Arc;

const BANNER_MAX_HEIGHT: f32 = 260.0;

/// Main application window. Owns its selection; the loaded data is shared.
pub struct DashboardApp {
    data: Arc<DataContext>,
    options: RenderOptions,
    selection: SelectionState,
    view: ViewModel,
    control_panel: ControlPanel,
    banner: Option<TextureHandle>,
    export_size: (u32, u32),
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        data: Arc<DataContext>,
        config: &DashboardConfig,
    ) -> Self {
        let options = RenderOptions::from(config);
        let selection = SelectionState::new(&data);
        let view = render(&selection, &data, &options);

        let banner = options
            .banner_image
            .as_deref()
            .and_then(|path| Self::load_banner(&cc.egui_ctx, path));

        Self {
            data,
            options,
            selection,
            view,
            control_panel: ControlPanel::new(),
            banner,
            export_size: (config.export_width, config.export_height),
        }
    }

    /// Decode an image file into egui pixels.
    pub fn decode_banner(path: &Path) -> Result<egui::ColorImage, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let size = [img.width() as usize, img.height() as usize];
        Ok(egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw()))
    }

    fn load_banner(ctx: &egui::Context, path: &Path) -> Option<TextureHandle> {
        match Self::decode_banner(path) {
            Ok(pixels) => {
                log::info!("Loaded banner {}", path.display());
                Some(ctx.load_texture("banner", pixels, TextureOptions::LINEAR))
            }
            Err(e) => {
                log::warn!("Banner {} not shown: {}", path.display(), e);
                None
            }
        }
    }

    /// Recompute everything shown from the current selection.
    fn refresh(&mut self) {
        self.view = render(&self.selection, &self.data, &self.options);
        log::debug!(
            "Rendered {} / {:?}: {} reviews",
            self.view.selection.region,
            self.view.selection.month,
            self.view.reviews.len()
        );
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::RegionChanged(region) => {
                self.selection.set_region(region, &self.data);
                self.refresh();
            }
            ControlPanelAction::MonthChanged(month) => {
                if self.selection.set_month(&month, &self.data) {
                    self.refresh();
                }
            }
            ControlPanelAction::ExportPng => self.handle_export_png(),
            ControlPanelAction::OpenExport => self.handle_open_export(),
            ControlPanelAction::None => {}
        }
    }

    /// Ask for a target file and render the current charts into it.
    fn handle_export_png(&mut self) {
        let file_name = format!(
            "{}_{}.png",
            self.view.selection.region,
            self.view.selection.month.as_deref().unwrap_or("all")
        );

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let (width, height) = self.export_size;
        match StaticChartRenderer::render_to_file(&self.view, &output_path, width, height) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                self.control_panel.last_export = Some(output_path);
            }
            Err(e) => {
                log::warn!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_open_export(&mut self) {
        let Some(path) = self.control_panel.last_export.clone() else {
            return;
        };
        if let Err(e) = open::that(&path) {
            log::warn!("Could not open {}: {}", path.display(), e);
            self.control_panel
                .set_status(&format!("Error: cannot open {}", path.display()));
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(RichText::new(self.view.title).size(28.0).strong());
                    ui.add_space(8.0);

                    if let Some(banner) = &self.banner {
                        ui.add(
                            egui::Image::from_texture(banner)
                                .max_height(BANNER_MAX_HEIGHT)
                                .max_width(ui.available_width()),
                        );
                        ui.add_space(8.0);
                    }

                    let action = self.control_panel.show(ui, &self.view);

                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(10.0);

                    ChartViewer::show(ui, &self.view);

                    self.handle_action(action);
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_decodes_to_image_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.png");
        image::RgbaImage::from_pixel(4, 3, image::Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();

        let pixels = DashboardApp::decode_banner(&path).unwrap();
        assert_eq!(pixels.size, [4, 3]);
    }

    #[test]
    fn missing_banner_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DashboardApp::decode_banner(&dir.path().join("missing.png")).is_err());
    }
}
