//! Static Chart Renderer
//! Writes the current view's charts to a PNG file.
//!
//! Layout:
//! 1. Left: review trend (positive and negative rate per month, with markers and legend)
//! 2. Right: sentiment breakdown pie for the selected month

use crate::charts::ChartPlotter;
use crate::view::{PieChart, TrendChart, ViewModel};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

const POSITIVE: RGBColor = RGBColor(31, 119, 180);
const NEGATIVE: RGBColor = RGBColor(255, 127, 14);
const SHADOW: RGBColor = RGBColor(190, 190, 190);
const SHADOW_OFFSET: i32 = 4;
/// Arc vertices per radian of sweep.
const ARC_STEPS_PER_RAD: f64 = 24.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image size {0}x{1} is too small")]
    TooSmall(u32, u32),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub const MIN_WIDTH: u32 = 400;
    pub const MIN_HEIGHT: u32 = 240;

    /// Render trend and pie side by side into a PNG at `path`.
    pub fn render_to_file(
        view: &ViewModel,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if width < Self::MIN_WIDTH || height < Self::MIN_HEIGHT {
            return Err(RenderError::TooSmall(width, height));
        }

        Self::draw(view, path, width, height).map_err(|e| RenderError::Draw(e.to_string()))?;
        log::info!("Exported charts to {}", path.display());
        Ok(())
    }

    fn draw(
        view: &ViewModel,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let (left, right) = root.split_horizontally((width / 2) as i32);
        Self::draw_trend(&left, &view.trend)?;

        match &view.pie {
            Some(pie) if pie.total() > 0 => Self::draw_pie(&right, pie)?,
            Some(pie) => Self::draw_message(&right, &pie.caption, "No reviews recorded")?,
            None => Self::draw_message(
                &right,
                "",
                view.notice.as_deref().unwrap_or("No data for this month"),
            )?,
        }

        root.present()?;
        Ok(())
    }

    fn draw_trend<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        chart: &TrendChart,
    ) -> Result<(), Box<dyn std::error::Error + 'static>>
    where
        DB::ErrorType: 'static,
    {
        let labels: Vec<String> = chart.points.iter().map(|p| p.month.clone()).collect();
        let (y_min, y_max) = Self::y_range(chart);
        let x_max = (chart.points.len().max(1) as f64) - 0.5;

        let mut ctx = ChartBuilder::on(area)
            .caption(&chart.caption, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)?;

        let label_of = |x: &f64| {
            let rounded = x.round();
            if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
                String::new()
            } else {
                labels.get(rounded as usize).cloned().unwrap_or_default()
            }
        };

        ctx.configure_mesh()
            .x_labels(labels.len().max(1))
            .x_label_formatter(&label_of)
            .x_desc(chart.x_label)
            .y_desc(chart.y_label)
            .disable_x_mesh()
            .draw()?;

        let positive: Vec<(f64, f64)> = chart
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.positive_rate))
            .collect();
        let negative: Vec<(f64, f64)> = chart
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.negative_rate))
            .collect();

        for (name, color, values) in [
            ("Positive rate", POSITIVE, positive),
            ("Negative rate", NEGATIVE, negative),
        ] {
            ctx.draw_series(LineSeries::new(values.iter().copied(), color.stroke_width(2)))?
                .label(name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            ctx.draw_series(
                values
                    .iter()
                    .map(|&point| Circle::new(point, 4, color.filled())),
            )?;
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }

    fn draw_pie<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        chart: &PieChart,
    ) -> Result<(), Box<dyn std::error::Error + 'static>>
    where
        DB::ErrorType: 'static,
    {
        let area = area.titled(&chart.caption, ("sans-serif", 22))?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as f64 / 2.0, h as f64 / 2.0);
        let radius = (w.min(h) as f64) * 0.35;
        let wedges = ChartPlotter::wedge_angles(chart);

        // Shadow first so every wedge sits on top of it
        for (slice, &(start, end)) in chart.slices.iter().zip(&wedges) {
            let (cx, cy) = Self::wedge_center(center, start, end, slice.explode as f64 * radius);
            let shadow = (cx + SHADOW_OFFSET as f64, cy + SHADOW_OFFSET as f64);
            if let Some(points) = Self::wedge_points(shadow, radius, start, end) {
                area.draw(&Polygon::new(points, SHADOW.filled()))?;
            }
        }

        let percent_style = TextStyle::from(("sans-serif", 14).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for (slice, &(start, end)) in chart.slices.iter().zip(&wedges) {
            let wedge_center =
                Self::wedge_center(center, start, end, slice.explode as f64 * radius);
            let Some(points) = Self::wedge_points(wedge_center, radius, start, end) else {
                continue;
            };
            let color = RGBColor(slice.color[0], slice.color[1], slice.color[2]);
            area.draw(&Polygon::new(points, color.filled()))?;

            let mid = (start + end) as f64 / 2.0;
            area.draw_text(
                &slice.percentage_label(),
                &percent_style,
                Self::pixel(Self::polar(wedge_center, mid, radius * 0.6)),
            )?;

            let side = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
            let label_style = TextStyle::from(("sans-serif", 16).into_font())
                .color(&BLACK)
                .pos(Pos::new(side, VPos::Center));
            area.draw_text(
                slice.label,
                &label_style,
                Self::pixel(Self::polar(wedge_center, mid, radius * 1.15)),
            )?;
        }

        Ok(())
    }

    /// Point at `angle` (radians, counter-clockwise) and `length` from `origin`. Pixel y grows downwards.
    fn polar(origin: (f64, f64), angle: f64, length: f64) -> (f64, f64) {
        (origin.0 + angle.cos() * length, origin.1 - angle.sin() * length)
    }

    fn pixel(point: (f64, f64)) -> (i32, i32) {
        (point.0.round() as i32, point.1.round() as i32)
    }

    /// Center of a wedge pushed `distance` outwards along its bisector.
    fn wedge_center(center: (f64, f64), start: f32, end: f32, distance: f64) -> (f64, f64) {
        Self::polar(center, (start + end) as f64 / 2.0, distance)
    }

    /// Outline of a wedge, or `None` when it has no sweep.
    fn wedge_points(
        center: (f64, f64),
        radius: f64,
        start: f32,
        end: f32,
    ) -> Option<Vec<(i32, i32)>> {
        let (start, end) = (start as f64, end as f64);
        let sweep = end - start;
        if sweep <= f32::EPSILON as f64 {
            return None;
        }

        let steps = (sweep * ARC_STEPS_PER_RAD).ceil().max(2.0) as usize;
        let mut points = Vec::with_capacity(steps + 2);
        points.push(Self::pixel(center));
        for k in 0..=steps {
            let angle = start + sweep * k as f64 / steps as f64;
            points.push(Self::pixel(Self::polar(center, angle, radius)));
        }
        Some(points)
    }

    fn draw_message<DB: DrawingBackend>(
        area: &DrawingArea<DB, plotters::coord::Shift>,
        caption: &str,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + 'static>>
    where
        DB::ErrorType: 'static,
    {
        let area = if caption.is_empty() {
            area.clone()
        } else {
            area.titled(caption, ("sans-serif", 22))?
        };
        let (w, h) = area.dim_in_pixel();
        let style = TextStyle::from(("sans-serif", 18).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw_text(message, &style, ((w / 2) as i32, (h / 2) as i32))?;
        Ok(())
    }

    /// Y range covering both rate lines with some headroom; 0-100 when empty.
    pub fn y_range(chart: &TrendChart) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in &chart.points {
            for v in [p.positive_rate, p.negative_rate] {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min.is_infinite() {
            return (0.0, 100.0);
        }
        let pad = ((max - min) * 0.1).max(1.0);
        ((min - pad).floor().min(0.0), (max + pad).ceil())
    }
}
