//! Chart rendering. Each chart is first described as plain data, then
//! drawn to an SVG document with plotters.

use anyhow::{bail, Result};
use argo_core::responder::RegionGroup;
use argo_schemas::profile::{Parameter, Profile};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::ops::Range;

pub const TEMPERATURE_COLOR: RGBColor = RGBColor(0xFF, 0x6B, 0x6B);
pub const SALINITY_COLOR: RGBColor = RGBColor(0x4E, 0xCD, 0xC4);
pub const FLOAT_COLOR: RGBColor = RGBColor(0x96, 0xCE, 0xB4);

const PROFILE_SIZE: (u32, u32) = (800, 500);
const SUMMARY_SIZE: (u32, u32) = (800, 400);

pub fn parameter_color(parameter: Parameter) -> RGBColor {
    match parameter {
        Parameter::Temperature => TEMPERATURE_COLOR,
        Parameter::Salinity => SALINITY_COLOR,
    }
}

fn axis_label(parameter: Parameter) -> String {
    format!("{} ({})", parameter.label(), parameter.unit())
}

/// Pads a value range so a flat series still gets a drawable axis.
fn padded(min: f64, max: f64, pad: f64) -> Range<f64> {
    if min > max {
        return 0.0..1.0;
    }
    (min - pad)..(max + pad)
}

/// Value plotted against negated depth, so depth grows downwards.
#[derive(Debug, Clone)]
pub struct DepthChart {
    pub title: String,
    pub parameter: Parameter,
    pub points: Vec<(f64, f64)>,
}

pub fn depth_chart(profile: &Profile, parameter: Parameter, title: &str) -> DepthChart {
    let points = profile
        .values(parameter)
        .iter()
        .zip(&profile.depths)
        .map(|(value, depth)| (*value, -*depth))
        .collect();
    DepthChart {
        title: title.to_string(),
        parameter,
        points,
    }
}

impl DepthChart {
    pub fn x_range(&self) -> Range<f64> {
        let (min, max) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
        padded(min, max, 1.0)
    }

    pub fn y_range(&self) -> Range<f64> {
        let deepest = self.points.iter().map(|&(_, y)| y).fold(0.0, f64::min);
        (deepest - 50.0)..10.0
    }

    pub fn render_svg(&self) -> Result<String> {
        let color = parameter_color(self.parameter);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, PROFILE_SIZE).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&self.title, ("sans-serif", 24).into_font())
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(self.x_range(), self.y_range())?;

            chart
                .configure_mesh()
                .x_desc(axis_label(self.parameter))
                .y_desc("Depth (m)")
                .y_label_formatter(&|y: &f64| format!("{:.0}", -y))
                .draw()?;

            chart.draw_series(LineSeries::new(
                self.points.iter().copied(),
                color.stroke_width(3),
            ))?;
            chart.draw_series(
                self.points
                    .iter()
                    .map(|&point| Circle::new(point, 3, color.filled())),
            )?;

            root.present()?;
        }
        Ok(svg)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub count: u32,
    pub color: RGBColor,
}

/// One bar per region, keyed on the number of units in it.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

pub fn comparison_chart(groups: &[RegionGroup], title: &str) -> BarChart {
    let palette = [FLOAT_COLOR, TEMPERATURE_COLOR];
    let bars = groups
        .iter()
        .enumerate()
        .map(|(i, group)| Bar {
            label: group.display_name.clone(),
            count: group.units.len() as u32,
            color: palette[i % palette.len()],
        })
        .collect();
    BarChart {
        title: title.to_string(),
        bars,
    }
}

impl BarChart {
    pub fn render_svg(&self) -> Result<String> {
        let labels: Vec<String> = self.bars.iter().map(|b| b.label.clone()).collect();
        let colors: Vec<RGBColor> = self.bars.iter().map(|b| b.color).collect();
        let slots = (self.bars.len() as u32).max(1);
        let max_count = self.bars.iter().map(|b| b.count).max().unwrap_or(0);

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, SUMMARY_SIZE).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&self.title, ("sans-serif", 24).into_font())
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(50)
                .build_cartesian_2d((0u32..slots).into_segmented(), 0u32..max_count + 1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc("Region")
                .y_desc("Number of ARGO Floats")
                .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                    SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                        labels.get(*i as usize).cloned().unwrap_or_default()
                    }
                    SegmentValue::Last => String::new(),
                })
                .draw()?;

            chart.draw_series(
                Histogram::vertical(&chart)
                    .margin(40)
                    .style_func(|v, _| {
                        let index = match v {
                            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => *i as usize,
                            SegmentValue::Last => 0,
                        };
                        colors.get(index).copied().unwrap_or(FLOAT_COLOR).filled()
                    })
                    .data(self.bars.iter().enumerate().map(|(i, b)| (i as u32, b.count))),
            )?;

            root.present()?;
        }
        Ok(svg)
    }
}

/// Surface value of one parameter across several profiles, oldest first.
#[derive(Debug, Clone)]
pub struct TimeSeriesChart {
    pub parameter: Parameter,
    pub points: Vec<(NaiveDate, f64)>,
}

/// `None` for an empty profile list.
pub fn time_series(profiles: &[Profile], parameter: Parameter) -> Option<TimeSeriesChart> {
    let mut points: Vec<(NaiveDate, f64)> = profiles
        .iter()
        .filter_map(|p| p.surface_value(parameter).map(|v| (p.date, v)))
        .collect();
    if points.is_empty() {
        return None;
    }
    points.sort_by_key(|&(date, _)| date);
    Some(TimeSeriesChart { parameter, points })
}

impl TimeSeriesChart {
    pub fn title(&self) -> String {
        format!("Surface {} Time Series", self.parameter.label())
    }

    pub fn render_svg(&self) -> Result<String> {
        let color = parameter_color(self.parameter);
        let Some(&(origin, _)) = self.points.first() else {
            bail!("time series has no points");
        };
        let offsets: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|&(date, value)| ((date - origin).num_days() as f64, value))
            .collect();
        let span = offsets.last().map_or(1.0, |&(x, _)| x.max(1.0));
        let (min, max) = offsets
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, SUMMARY_SIZE).into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(self.title(), ("sans-serif", 24).into_font())
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(-2.0..span + 2.0, padded(min, max, 0.5))?;

            chart
                .configure_mesh()
                .x_desc("Date")
                .y_desc(axis_label(self.parameter))
                .x_label_formatter(&|x: &f64| {
                    (origin + Duration::days(x.round() as i64))
                        .format("%Y-%m-%d")
                        .to_string()
                })
                .draw()?;

            chart.draw_series(LineSeries::new(offsets.iter().copied(), color.stroke_width(2)))?;
            chart.draw_series(
                offsets
                    .iter()
                    .map(|&point| Circle::new(point, 3, color.filled())),
            )?;

            root.present()?;
        }
        Ok(svg)
    }
}
