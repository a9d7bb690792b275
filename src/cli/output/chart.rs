use std::{fmt::Display, path::Path};

use anyhow::Result;
use clap::ValueEnum;
use plotters::{coord::Shift, element::Pie, prelude::*};
use tracing::instrument;

use crate::attendance::{summary::WorkModeSummary, work_mode::WorkMode};

const CHART_TITLE: &str = "Work Categories";
const CHART_SIZE: (u32, u32) = (640, 480);
const FONT: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

impl ChartKind {
    pub fn file_name(&self) -> String {
        format!("{self}_chart.svg")
    }
}

impl Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
        }
    }
}

fn mode_color(mode: WorkMode) -> RGBColor {
    match mode {
        WorkMode::HalfDay => RGBColor(239, 131, 84),
        WorkMode::Regularization => RGBColor(76, 120, 168),
        WorkMode::FullDay => RGBColor(84, 162, 75),
        WorkMode::Overtime => RGBColor(178, 121, 162),
        WorkMode::InvalidTime => RGBColor(158, 158, 158),
    }
}

#[instrument(skip(summary))]
pub fn save_chart(path: &Path, kind: ChartKind, summary: &WorkModeSummary) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    draw_chart(&root, kind, summary)
}

/// Draws work mode counts. Invalid time is never charted.
pub fn draw_chart(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    kind: ChartKind,
    summary: &WorkModeSummary,
) -> Result<()> {
    root.fill(&WHITE)?;
    match kind {
        ChartKind::Pie => draw_pie(root, &summary.chart_counts())?,
        ChartKind::Bar => draw_bars(root, &all_chart_modes(summary))?,
        ChartKind::Line => draw_line(root, &all_chart_modes(summary))?,
    }
    root.present()?;
    Ok(())
}

fn all_chart_modes(summary: &WorkModeSummary) -> Vec<(WorkMode, usize)> {
    WorkMode::CHART
        .into_iter()
        .map(|mode| (mode, summary.count(mode)))
        .collect()
}

fn draw_pie(root: &DrawingArea<SVGBackend<'_>, Shift>, counts: &[(WorkMode, usize)]) -> Result<()> {
    let area = root.titled(CHART_TITLE, (FONT, 24))?;
    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let sizes = counts.iter().map(|(_, v)| *v as f64).collect::<Vec<_>>();
    let colors = counts.iter().map(|(mode, _)| mode_color(*mode)).collect::<Vec<_>>();
    let labels = counts.iter().map(|(mode, _)| mode.label()).collect::<Vec<_>>();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.);
    pie.label_style((FONT, 16).into_font().color(&BLACK));
    pie.percentages((FONT, 14).into_font().color(&WHITE));
    area.draw(&pie)?;
    Ok(())
}

fn draw_bars(root: &DrawingArea<SVGBackend<'_>, Shift>, counts: &[(WorkMode, usize)]) -> Result<()> {
    let max = counts.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let mut chart = ChartBuilder::on(root)
        .caption(CHART_TITLE, (FONT, 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d((0..counts.len()).into_segmented(), 0..max + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Records")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(index) => counts
                .get(*index)
                .map(|(mode, _)| mode.label().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(index, (mode, count))| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(index), 0),
                (SegmentValue::Exact(index + 1), *count),
            ],
            mode_color(*mode).filled(),
        );
        bar.set_margin(0, 0, 12, 12);
        bar
    }))?;
    Ok(())
}

fn draw_line(root: &DrawingArea<SVGBackend<'_>, Shift>, counts: &[(WorkMode, usize)]) -> Result<()> {
    let max = counts.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let last = counts.len().saturating_sub(1).max(1);
    let mut chart = ChartBuilder::on(root)
        .caption(CHART_TITLE, (FONT, 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..last, 0..max + 1)?;

    chart
        .configure_mesh()
        .x_labels(counts.len())
        .y_desc("Records")
        .x_label_formatter(&|index| {
            counts
                .get(*index)
                .map(|(mode, _)| mode.label().to_string())
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(LineSeries::new(
        counts
            .iter()
            .enumerate()
            .map(|(index, (_, count))| (index, *count)),
        &BLUE,
    ))?;
    chart.draw_series(
        counts
            .iter()
            .enumerate()
            .map(|(index, (mode, count))| Circle::new((index, *count), 5, mode_color(*mode).filled())),
    )?;
    Ok(())
}
