//! Inline SVG rendering for the dashboard charts
//!
//! Hover detail uses SVG `<title>` elements, which browsers show as tooltips.

use super::{series_color, SessionScatter, WoodSummary, WOOD_COUNTERS};
use crate::export::html_escape;
use chrono::{NaiveDate, Timelike};

const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 110.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;

const BAR_WIDTH: f64 = 1000.0;
const BAR_HEIGHT: f64 = 500.0;
const SCATTER_WIDTH: f64 = 800.0;
const SCATTER_HEIGHT: f64 = 500.0;

const SECONDS_PER_DAY: f64 = 86_400.0;
const Y_TICKS: u64 = 5;

/// Grouped bar chart: wood type on the category axis, counter as series
pub fn render_bar_chart(summary: &WoodSummary) -> String {
    let title = summary.title();
    if summary.is_empty() {
        return empty_chart(BAR_WIDTH, BAR_HEIGHT, &title);
    }

    let inner_width = BAR_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let inner_height = BAR_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + inner_height;

    let max_value = nice_ceiling(summary.max_value());
    let y_scale = |value: u64| -> f64 { baseline - (value as f64 / max_value as f64) * inner_height };

    let groups = summary.groups();
    let group_width = inner_width / groups.len() as f64;
    let bar_width = group_width * 0.8 / WOOD_COUNTERS.len() as f64;

    let mut svg = open_svg(BAR_WIDTH, BAR_HEIGHT, &title);

    // Y-axis ticks and grid
    for i in 0..=Y_TICKS {
        let value = max_value * i / Y_TICKS;
        let y = y_scale(value);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#e0e0e0\"/>\n",
            MARGIN_LEFT,
            BAR_WIDTH - MARGIN_RIGHT,
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{}</text>\n",
            MARGIN_LEFT - 8.0,
            y + 4.0,
            value
        ));
    }

    // Bars
    for (group_index, wood) in groups.iter().enumerate() {
        let group_x = MARGIN_LEFT + group_index as f64 * group_width + group_width * 0.1;
        let label = wood.label();

        for (series_index, counter) in WOOD_COUNTERS.iter().enumerate() {
            let value = summary.value(*wood, *counter).unwrap_or(0);
            let x = group_x + series_index as f64 * bar_width;
            let y = y_scale(value);
            svg.push_str(&format!(
                "  <rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"><title>{}, {}: {}</title></rect>\n",
                bar_width,
                baseline - y,
                series_color(series_index),
                html_escape(&label),
                counter.label(),
                value
            ));
        }

        // Rotated category label
        let label_x = group_x + group_width * 0.4;
        svg.push_str(&format!(
            "  <text x=\"{label_x:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"end\" transform=\"rotate(-60 {label_x:.1} {:.1})\">{}</text>\n",
            baseline + 14.0,
            baseline + 14.0,
            html_escape(&label)
        ));
    }

    axes(&mut svg, BAR_WIDTH, BAR_HEIGHT);
    axis_labels(&mut svg, BAR_WIDTH, BAR_HEIGHT, "Wood Type Statistics", "Total");

    // Legend, top left
    let legend: Vec<(String, &str)> = WOOD_COUNTERS
        .iter()
        .enumerate()
        .map(|(i, c)| (c.label(), series_color(i)))
        .collect();
    legend_row(&mut svg, MARGIN_LEFT + 10.0, MARGIN_TOP - 20.0, &legend);

    svg.push_str("</svg>\n");
    svg
}

/// Scatter of login date × time of day, one series per user
pub fn render_scatter_chart(scatter: &SessionScatter) -> String {
    let title = SessionScatter::TITLE;
    let Some((first, last)) = scatter.date_range() else {
        return empty_chart(SCATTER_WIDTH, SCATTER_HEIGHT, title);
    };

    // Pad a single-day range so points do not sit on the axis
    let (first, last) = if first == last {
        (
            first.pred_opt().unwrap_or(first),
            last.succ_opt().unwrap_or(last),
        )
    } else {
        (first, last)
    };
    let span_days = (last - first).num_days().max(1) as f64;

    let inner_width = SCATTER_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let inner_height = SCATTER_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + inner_height;

    let x_scale =
        |date: NaiveDate| -> f64 { MARGIN_LEFT + ((date - first).num_days() as f64 / span_days) * inner_width };
    let y_scale = |seconds: u32| -> f64 { baseline - (seconds as f64 / SECONDS_PER_DAY) * inner_height };

    let mut svg = open_svg(SCATTER_WIDTH, SCATTER_HEIGHT, title);

    // Y-axis: every 4 hours
    for hour in (0..=24).step_by(4) {
        let y = y_scale(hour * 3600);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#e0e0e0\"/>\n",
            MARGIN_LEFT,
            SCATTER_WIDTH - MARGIN_RIGHT,
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{:02}:00</text>\n",
            MARGIN_LEFT - 8.0,
            y + 4.0,
            hour
        ));
    }

    // X-axis: up to 6 date ticks
    let tick_count = (span_days as i64).clamp(1, 6);
    for i in 0..=tick_count {
        let offset = (span_days as i64 * i) / tick_count;
        let date = first + chrono::Duration::days(offset);
        let x = x_scale(date);
        svg.push_str(&format!(
            "  <text x=\"{x:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"end\" transform=\"rotate(-45 {x:.1} {:.1})\">{}</text>\n",
            baseline + 16.0,
            baseline + 16.0,
            date.format("%Y-%m-%d")
        ));
    }

    // Points
    for point in &scatter.points {
        let series = scatter.series_index(&point.user_name).unwrap_or(0);
        svg.push_str(&format!(
            "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"5\" fill=\"{}\" fill-opacity=\"0.8\"><title>{} at {}</title></circle>\n",
            x_scale(point.date),
            y_scale(point.time.num_seconds_from_midnight()),
            series_color(series),
            html_escape(&point.user_name),
            point.timestamp.format("%Y-%m-%d %H:%M:%S")
        ));
    }

    axes(&mut svg, SCATTER_WIDTH, SCATTER_HEIGHT);
    axis_labels(&mut svg, SCATTER_WIDTH, SCATTER_HEIGHT, "Log In Date", "Log In Time");

    let legend: Vec<(String, &str)> = scatter
        .users
        .iter()
        .enumerate()
        .map(|(i, user)| (user.clone(), series_color(i)))
        .collect();
    legend_row(&mut svg, MARGIN_LEFT + 10.0, MARGIN_TOP - 20.0, &legend);

    svg.push_str("</svg>\n");
    svg
}

fn open_svg(width: f64, height: f64, title: &str) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg viewBox=\"0 0 {width} {height}\" class=\"chart\" role=\"img\" style=\"width: 100%; height: auto;\" font-family=\"sans-serif\">\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"24\" text-anchor=\"middle\" font-size=\"16\" font-weight=\"600\">{}</text>\n",
        width / 2.0,
        html_escape(title)
    ));
    svg
}

fn empty_chart(width: f64, height: f64, title: &str) -> String {
    let mut svg = open_svg(width, height, title);
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\" fill=\"#888\">No data available</text>\n",
        width / 2.0,
        height / 2.0
    ));
    svg.push_str("</svg>\n");
    svg
}

fn axes(svg: &mut String, width: f64, height: f64) {
    let baseline = height - MARGIN_BOTTOM;
    svg.push_str(&format!(
        "  <line x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{baseline}\" stroke=\"#333\" stroke-width=\"1.5\"/>\n"
    ));
    svg.push_str(&format!(
        "  <line x1=\"{MARGIN_LEFT}\" y1=\"{baseline}\" x2=\"{:.1}\" y2=\"{baseline}\" stroke=\"#333\" stroke-width=\"1.5\"/>\n",
        width - MARGIN_RIGHT
    ));
}

fn axis_labels(svg: &mut String, width: f64, height: f64, x_label: &str, y_label: &str) {
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\">{}</text>\n",
        MARGIN_LEFT + (width - MARGIN_LEFT - MARGIN_RIGHT) / 2.0,
        height - 10.0,
        html_escape(x_label)
    ));
    let y_mid = MARGIN_TOP + (height - MARGIN_TOP - MARGIN_BOTTOM) / 2.0;
    svg.push_str(&format!(
        "  <text x=\"18\" y=\"{y_mid:.1}\" text-anchor=\"middle\" font-size=\"13\" transform=\"rotate(-90 18 {y_mid:.1})\">{}</text>\n",
        html_escape(y_label)
    ));
}

fn legend_row(svg: &mut String, x: f64, y: f64, entries: &[(String, &str)]) {
    let mut cursor = x;
    for (label, color) in entries {
        svg.push_str(&format!(
            "  <rect x=\"{cursor:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{color}\"/>\n",
            y - 10.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{y:.1}\" font-size=\"12\">{}</text>\n",
            cursor + 16.0,
            html_escape(label)
        ));
        cursor += 16.0 + 7.5 * label.chars().count() as f64 + 18.0;
    }
}

/// Round up to 1, 2 or 5 times a power of ten so tick labels stay readable
fn nice_ceiling(value: u64) -> u64 {
    if value == 0 {
        return Y_TICKS;
    }
    let mut magnitude = 1u64;
    while magnitude.saturating_mul(10) <= value {
        magnitude *= 10;
    }
    for step in [1, 2, 5, 10] {
        let candidate = magnitude.saturating_mul(step);
        if candidate >= value && candidate % Y_TICKS == 0 {
            return candidate;
        }
    }
    magnitude.saturating_mul(10)
}
