// Indicator bar chart rendered as inline SVG
#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::models::{IndicatorCode, ResultSet};
use shared::utils::format_value;

use crate::config::ChartConfig;

const MARGIN_LEFT: f64 = 180.0; // room for the first slanted label
const MARGIN_RIGHT: f64 = 110.0; // legend column
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 180.0; // rotated tick labels
const TICKS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub code: IndicatorCode,
    /// Indicator label in the current language, shown under the bar
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl Bar {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    /// Vertical position of the zero line
    pub baseline_y: f64,
    pub bars: Vec<Bar>,
    /// (value, y) pairs for the value axis
    pub ticks: Vec<(f64, f64)>,
    pub legend: Vec<(IndicatorCode, String)>,
}

/// Places one bar per indicator with a finite value. `None` when nothing is plottable.
pub fn layout_bars(result_set: &ResultSet, chart: &ChartConfig) -> Option<ChartLayout> {
    let points: Vec<(IndicatorCode, &str, f64)> = result_set
        .plottable()
        .map(|(ind, v)| (ind.code, ind.label.as_str(), v))
        .collect();
    if points.is_empty() {
        return None;
    }

    let plot_left = MARGIN_LEFT;
    let plot_right = (chart.width - MARGIN_RIGHT).max(plot_left + 1.0);
    let plot_top = MARGIN_TOP;
    let plot_bottom = (chart.height - MARGIN_BOTTOM).max(plot_top + 1.0);
    let plot_height = plot_bottom - plot_top;

    // The zero line is always inside the value range.
    let min = points.iter().map(|(_, _, v)| *v).fold(0.0_f64, f64::min);
    let mut max = points.iter().map(|(_, _, v)| *v).fold(0.0_f64, f64::max);
    if max - min == 0.0 {
        max = 1.0;
    }
    let scale = |v: f64| plot_top + (max - v) / (max - min) * plot_height;
    let baseline_y = scale(0.0);

    let slot = (plot_right - plot_left) / points.len() as f64;
    let bars: Vec<Bar> = points
        .iter()
        .enumerate()
        .map(|(i, (code, label, value))| {
            let top = scale(*value);
            Bar {
                code: *code,
                label: label.to_string(),
                value: *value,
                x: plot_left + i as f64 * slot + slot * 0.2,
                y: top.min(baseline_y),
                width: slot * 0.6,
                height: (top - baseline_y).abs(),
                color: chart.color_for(*code),
            }
        })
        .collect();

    let ticks = (0..=TICKS)
        .map(|i| {
            let value = min + (max - min) * i as f64 / TICKS as f64;
            (value, scale(value))
        })
        .collect();

    let mut legend: Vec<(IndicatorCode, String)> = Vec::new();
    for bar in &bars {
        if !legend.iter().any(|(code, _)| *code == bar.code) {
            legend.push((bar.code, bar.color.clone()));
        }
    }

    Some(ChartLayout {
        width: chart.width,
        height: chart.height,
        plot_left,
        plot_right,
        plot_top,
        plot_bottom,
        baseline_y,
        bars,
        ticks,
        legend,
    })
}

#[component]
pub fn BarChart(result_set: ResultSet, chart: ChartConfig, decimals: usize) -> Element {
    let Some(layout) = layout_bars(&result_set, &chart) else {
        return None;
    };
    let view_box = format!("0 0 {} {}", layout.width, layout.height);
    let title_x = layout.width / 2.0;
    let x_label_y = layout.height - 8.0;
    let y_label_y = (layout.plot_top + layout.plot_bottom) / 2.0;
    let y_label_transform = format!("rotate(-90 16 {})", y_label_y);
    let legend_x = layout.plot_right + 20.0;
    let tick_labels: Vec<(String, f64)> = layout
        .ticks
        .iter()
        .map(|(value, y)| (format_value(Some(*value), decimals), *y))
        .collect();

    rsx! {
        svg {
            class: "bar-chart",
            width: "{layout.width}",
            height: "{layout.height}",
            view_box: "{view_box}",
            text { x: "{title_x}", y: "22", text_anchor: "middle", font_size: "16", font_weight: "bold", "{chart.title}" }

            for (label, y) in tick_labels.iter() {
                line { x1: "{layout.plot_left}", y1: "{y}", x2: "{layout.plot_right}", y2: "{y}", stroke: "#e0e0e0", stroke_width: "1" }
                text { x: "{layout.plot_left - 6.0}", y: "{y + 4.0}", text_anchor: "end", font_size: "11", "{label}" }
            }

            for bar in layout.bars.iter() {
                rect { x: "{bar.x}", y: "{bar.y}", width: "{bar.width}", height: "{bar.height}", fill: "{bar.color}" }
                text {
                    x: "{bar.center_x()}",
                    y: "{layout.plot_bottom + 16.0}",
                    text_anchor: "end",
                    font_size: "12",
                    transform: "rotate(-45 {bar.center_x()} {layout.plot_bottom + 16.0})",
                    "{bar.label}"
                }
            }

            line { x1: "{layout.plot_left}", y1: "{layout.baseline_y}", x2: "{layout.plot_right}", y2: "{layout.baseline_y}", stroke: "#333333", stroke_width: "1" }
            line { x1: "{layout.plot_left}", y1: "{layout.plot_top}", x2: "{layout.plot_left}", y2: "{layout.plot_bottom}", stroke: "#333333", stroke_width: "1" }

            text { x: "{title_x}", y: "{x_label_y}", text_anchor: "middle", font_size: "13", "{chart.x_axis_label}" }
            text { x: "16", y: "{y_label_y}", text_anchor: "middle", font_size: "13", transform: "{y_label_transform}", "{chart.y_axis_label}" }

            for (i, (code, color)) in layout.legend.iter().enumerate() {
                rect { x: "{legend_x}", y: "{layout.plot_top + i as f64 * 20.0}", width: "12", height: "12", fill: "{color}" }
                text { x: "{legend_x + 18.0}", y: "{layout.plot_top + i as f64 * 20.0 + 10.0}", font_size: "12", "{code}" }
            }
        }
    }
}
