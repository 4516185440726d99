//! Chart Viewer Widget
//! Trend and pie charts side by side, followed by sampled reviews and the recommendation table.

use crate::charts::ChartPlotter;
use crate::data::RecommendationTable;
use crate::view::ViewModel;
use egui::{Color32, RichText};

const CHART_SPACING: f32 = 15.0;

/// Cells wider than this wrap.
const CELL_WRAP_WIDTH: f32 = 520.0;

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, view: &ViewModel) {
        let half = ((ui.available_width() - CHART_SPACING) / 2.0).max(200.0);

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.set_width(half);
                ChartPlotter::draw_trend_chart(ui, &view.trend);
            });

            ui.add_space(CHART_SPACING);

            ui.vertical(|ui| {
                ui.set_width(half);
                match &view.pie {
                    Some(pie) => ChartPlotter::draw_pie_chart(ui, pie),
                    None => {
                        ui.label(
                            RichText::new(view.notice.as_deref().unwrap_or("No data"))
                                .color(Color32::GRAY),
                        );
                    }
                }
            });
        });

        ui.add_space(20.0);
        ui.separator();

        Self::draw_reviews(ui, &view.reviews);

        ui.add_space(20.0);
        ui.separator();

        ui.label(RichText::new("Top-rated Disneyland reviews").size(18.0).strong());
        ui.add_space(5.0);
        Self::draw_recommendations(ui, &view.recommendations);
    }

    fn draw_reviews(ui: &mut egui::Ui, reviews: &[String]) {
        ui.label(RichText::new("Randomly sampled reviews").size(18.0).strong());
        ui.add_space(5.0);

        if reviews.is_empty() {
            ui.label(RichText::new("No reviews for this month.").color(Color32::GRAY));
            return;
        }

        for line in reviews {
            ui.label(line);
            ui.add_space(4.0);
        }
    }

    fn draw_recommendations(ui: &mut egui::Ui, table: &RecommendationTable) {
        if table.is_empty() {
            ui.label(RichText::new("No recommendations").color(Color32::GRAY));
            return;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("recommendations")
                    .striped(true)
                    .min_col_width(40.0)
                    .max_col_width(CELL_WRAP_WIDTH)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("#").strong());
                        for column in &table.columns {
                            ui.label(RichText::new(column).strong());
                        }
                        ui.end_row();

                        for (i, row) in table.rows.iter().enumerate() {
                            ui.label(i.to_string());
                            for cell in row {
                                ui.add(egui::Label::new(cell).wrap());
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
