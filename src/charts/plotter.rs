//! Chart Plotter Module
//! Interactive trend chart (egui_plot) and pie chart (egui painter).

use crate::view::{PieChart, TrendChart};
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Vec2};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};
use std::f32::consts::PI;

pub const POSITIVE_COLOR: Color32 = Color32::from_rgb(31, 119, 180); // Blue
pub const NEGATIVE_COLOR: Color32 = Color32::from_rgb(255, 127, 14); // Orange
const SHADOW_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 60);

const CHART_HEIGHT: f32 = 320.0;

/// Largest arc drawn as a single convex polygon.
const MAX_SEGMENT_RAD: f32 = PI / 4.0;
const ARC_STEPS_PER_SEGMENT: usize = 8;

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn slice_color(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Line chart of positive and negative rates. X: month index, labelled with month names.
    pub fn draw_trend_chart(ui: &mut egui::Ui, chart: &TrendChart) {
        ui.label(RichText::new(&chart.caption).size(15.0).strong());

        let labels: Vec<String> = chart.points.iter().map(|p| p.month.clone()).collect();
        let count = labels.len();

        Plot::new(format!("trend_{}", chart.caption))
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(chart.x_label)
            .y_axis_label(chart.y_label)
            .include_y(0.0)
            .x_grid_spacer(move |_input| {
                (0..count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| Self::month_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                let positive: Vec<[f64; 2]> = chart
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| [i as f64, p.positive_rate])
                    .collect();
                let negative: Vec<[f64; 2]> = chart
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| [i as f64, p.negative_rate])
                    .collect();

                for (name, values, color) in [
                    ("Positive rate", positive, POSITIVE_COLOR),
                    ("Negative rate", negative, NEGATIVE_COLOR),
                ] {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(values.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(name),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(values.iter().copied()))
                            .radius(4.0)
                            .color(color),
                    );
                }
            });
    }

    /// Month name for an axis position; blank between months.
    pub fn month_label(labels: &[String], value: f64) -> String {
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }

    /// Pie chart with an exploded first slice, drop shadow and percentage labels.
    pub fn draw_pie_chart(ui: &mut egui::Ui, chart: &PieChart) {
        ui.label(RichText::new(&chart.caption).size(15.0).strong());

        let (rect, _) = ui.allocate_exact_size(
            Vec2::new(ui.available_width(), CHART_HEIGHT),
            Sense::hover(),
        );
        let painter = ui.painter_at(rect);

        if chart.total() == 0 {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No reviews recorded for this month",
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        let radius = rect.width().min(rect.height()) * 0.36;
        let center = rect.center();
        let text_color = ui.visuals().text_color();

        let wedges = Self::wedge_angles(chart);

        // Shadow first so every wedge sits on top of it
        for (slice, &(start, end)) in chart.slices.iter().zip(&wedges) {
            let offset = Self::explode_offset(start, end, slice.explode * radius);
            let shadow_center = center + offset + Vec2::new(4.0, 4.0);
            Self::paint_wedge(&painter, shadow_center, radius, start, end, SHADOW_COLOR);
        }

        for (slice, &(start, end)) in chart.slices.iter().zip(&wedges) {
            if end - start <= f32::EPSILON {
                continue;
            }
            let wedge_center = center + Self::explode_offset(start, end, slice.explode * radius);
            Self::paint_wedge(
                &painter,
                wedge_center,
                radius,
                start,
                end,
                Self::slice_color(slice.color),
            );

            let mid = (start + end) / 2.0;
            painter.text(
                wedge_center + Self::polar(mid, radius * 0.6),
                Align2::CENTER_CENTER,
                slice.percentage_label(),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
            painter.text(
                wedge_center + Self::polar(mid, radius * 1.15),
                Self::label_anchor(mid),
                slice.label,
                FontId::proportional(13.0),
                text_color,
            );
        }
    }

    /// (start, end) angle of each slice in radians, counter-clockwise from the x axis.
    pub fn wedge_angles(chart: &PieChart) -> Vec<(f32, f32)> {
        let total = chart.total() as f32;
        let mut angle = chart.start_angle_deg.to_radians();

        chart
            .slices
            .iter()
            .map(|slice| {
                let sweep = if total > 0.0 {
                    slice.value as f32 / total * 2.0 * PI
                } else {
                    0.0
                };
                let wedge = (angle, angle + sweep);
                angle += sweep;
                wedge
            })
            .collect()
    }

    /// Screen-space vector for an angle. Screen y grows downwards.
    fn polar(angle: f32, length: f32) -> Vec2 {
        Vec2::new(angle.cos() * length, -angle.sin() * length)
    }

    fn explode_offset(start: f32, end: f32, distance: f32) -> Vec2 {
        Self::polar((start + end) / 2.0, distance)
    }

    fn label_anchor(angle: f32) -> Align2 {
        if angle.cos() >= 0.0 {
            Align2::LEFT_CENTER
        } else {
            Align2::RIGHT_CENTER
        }
    }

    /// Fill a wedge as a fan of convex polygons, each spanning at most `MAX_SEGMENT_RAD`.
    fn paint_wedge(
        painter: &egui::Painter,
        center: Pos2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color32,
    ) {
        let sweep = end - start;
        if sweep <= 0.0 {
            return;
        }

        let segments = (sweep / MAX_SEGMENT_RAD).ceil().max(1.0) as usize;
        let step = sweep / segments as f32;

        for s in 0..segments {
            let a0 = start + step * s as f32;
            let mut points = Vec::with_capacity(ARC_STEPS_PER_SEGMENT + 2);
            points.push(center);
            for k in 0..=ARC_STEPS_PER_SEGMENT {
                let a = a0 + step * k as f32 / ARC_STEPS_PER_SEGMENT as f32;
                points.push(center + Self::polar(a, radius));
            }
            painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::composer::PieBreakdown;
    use crate::charts::ChartComposer;

    fn pie(positive: u64, negative: u64, neutral: u64) -> PieChart {
        PieChart {
            caption: "June review breakdown".to_string(),
            slices: ChartComposer::pie_slices(&PieBreakdown {
                positive,
                negative,
                neutral,
            }),
            start_angle_deg: 140.0,
        }
    }

    #[test]
    fn wedges_cover_full_circle_from_start_angle() {
        let wedges = ChartPlotter::wedge_angles(&pie(2, 1, 1));
        let start = 140f32.to_radians();

        assert!((wedges[0].0 - start).abs() < 1e-5);
        assert!((wedges[0].1 - wedges[0].0 - PI).abs() < 1e-5);
        assert!((wedges[2].1 - start - 2.0 * PI).abs() < 1e-4);
        assert!((wedges[1].1 - wedges[2].0).abs() < 1e-6);
    }

    #[test]
    fn month_labels_only_on_whole_positions() {
        let labels = vec!["January".to_string(), "February".to_string()];
        assert_eq!(ChartPlotter::month_label(&labels, 1.0), "February");
        assert_eq!(ChartPlotter::month_label(&labels, 0.5), "");
        assert_eq!(ChartPlotter::month_label(&labels, 2.0), "");
        assert_eq!(ChartPlotter::month_label(&labels, -1.0), "");
    }
}
