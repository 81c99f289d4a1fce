use dioxus::prelude::*;

use crate::core::format::{format_signal, format_tick};
use crate::core::series::{Extent, PlotLabels, ScatterSeries};

pub(crate) const PLOT_WIDTH: f64 = 900.0;
pub(crate) const PLOT_HEIGHT: f64 = 620.0;

const MARGIN_LEFT: f64 = 76.0;
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 56.0;
const MARGIN_BOTTOM: f64 = 64.0;

const COLORBAR_GAP: f64 = 28.0;
const COLORBAR_WIDTH: f64 = 18.0;
const GRADIENT_STOPS: usize = 9;
const AXIS_TICKS: usize = 6;

#[component]
pub fn ScatterPlot(markup: String) -> Element {
    rsx! {
        div { class: "umap-plot__canvas", dangerous_inner_html: "{markup}" }
    }
}

/// Renders `series` as a standalone SVG document. `tooltips` is parallel to
/// the series; missing entries simply produce no tooltip.
pub fn render_svg(series: &ScatterSeries, labels: &PlotLabels, tooltips: &[String]) -> String {
    let plot_left = MARGIN_LEFT;
    let plot_right = PLOT_WIDTH - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = PLOT_HEIGHT - MARGIN_BOTTOM;

    let x_domain = series
        .x_extent()
        .map(|extent| extent.padded(0.05))
        .unwrap_or(Extent { min: 0.0, max: 1.0 });
    let y_domain = series
        .y_extent()
        .map(|extent| extent.padded(0.05))
        .unwrap_or(Extent { min: 0.0, max: 1.0 });
    let color_domain = series
        .color_extent()
        .unwrap_or(Extent { min: 0.0, max: 0.0 });

    let to_px_x = |x: f64| plot_left + x_domain.normalize(x) * (plot_right - plot_left);
    let to_px_y = |y: f64| plot_bottom - y_domain.normalize(y) * (plot_bottom - plot_top);

    let mut svg = String::with_capacity(512 + series.len() * 160);
    svg.push_str(&format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{PLOT_WIDTH}' height='{PLOT_HEIGHT}' viewBox='0 0 {PLOT_WIDTH} {PLOT_HEIGHT}' font-family='Inter, sans-serif'>\n"
    ));
    svg.push_str(&format!(
        "  <defs>\n    <linearGradient id='colorbar' x1='0' y1='1' x2='0' y2='0'>\n{}    </linearGradient>\n  </defs>\n",
        gradient_stops(labels)
    ));
    svg.push_str(&format!(
        "  <rect width='{PLOT_WIDTH}' height='{PLOT_HEIGHT}' fill='#ffffff'/>\n"
    ));
    svg.push_str(&format!(
        "  <text x='{}' y='32' text-anchor='middle' font-size='20' fill='#1f2430'>{}</text>\n",
        (plot_left + plot_right) / 2.0,
        escape_xml(labels.title)
    ));

    // Grid and tick labels.
    for tick in x_domain.ticks(AXIS_TICKS) {
        let px = to_px_x(tick);
        svg.push_str(&format!(
            "  <line x1='{px:.1}' y1='{plot_top}' x2='{px:.1}' y2='{plot_bottom}' stroke='#e6e8ee'/>\n  <text x='{px:.1}' y='{:.1}' text-anchor='middle' font-size='12' fill='#4a5060'>{}</text>\n",
            plot_bottom + 18.0,
            format_tick(tick)
        ));
    }
    for tick in y_domain.ticks(AXIS_TICKS) {
        let py = to_px_y(tick);
        svg.push_str(&format!(
            "  <line x1='{plot_left}' y1='{py:.1}' x2='{plot_right}' y2='{py:.1}' stroke='#e6e8ee'/>\n  <text x='{:.1}' y='{py:.1}' text-anchor='end' dominant-baseline='middle' font-size='12' fill='#4a5060'>{}</text>\n",
            plot_left - 8.0,
            format_tick(tick)
        ));
    }

    svg.push_str(&format!(
        "  <rect x='{plot_left}' y='{plot_top}' width='{}' height='{}' fill='none' stroke='#9aa0ae'/>\n",
        plot_right - plot_left,
        plot_bottom - plot_top
    ));
    svg.push_str(&format!(
        "  <text x='{:.1}' y='{:.1}' text-anchor='middle' font-size='14' fill='#1f2430'>{}</text>\n",
        (plot_left + plot_right) / 2.0,
        PLOT_HEIGHT - 18.0,
        escape_xml(labels.x_axis)
    ));
    svg.push_str(&format!(
        "  <text x='22' y='{:.1}' text-anchor='middle' font-size='14' fill='#1f2430' transform='rotate(-90 22 {:.1})'>{}</text>\n",
        (plot_top + plot_bottom) / 2.0,
        (plot_top + plot_bottom) / 2.0,
        escape_xml(labels.y_axis)
    ));

    // Markers.
    let radius = labels.marker_size / 2.0;
    svg.push_str("  <g class='umap-plot__markers' stroke='#ffffff' stroke-width='0.5'>\n");
    for i in 0..series.len() {
        let fill = labels
            .color_scale
            .sample(color_domain.normalize(series.color[i]))
            .to_hex();
        let cx = to_px_x(series.x[i]);
        let cy = to_px_y(series.y[i]);
        match tooltips.get(i) {
            Some(tip) => svg.push_str(&format!(
                "    <circle cx='{cx:.1}' cy='{cy:.1}' r='{radius}' fill='{fill}'><title>{}</title></circle>\n",
                escape_xml(tip)
            )),
            None => svg.push_str(&format!(
                "    <circle cx='{cx:.1}' cy='{cy:.1}' r='{radius}' fill='{fill}'/>\n"
            )),
        }
    }
    svg.push_str("  </g>\n");

    svg.push_str(&colorbar(labels, color_domain, plot_right, plot_top, plot_bottom));
    svg.push_str("</svg>\n");
    svg
}

fn gradient_stops(labels: &PlotLabels) -> String {
    let colors = labels.color_scale.gradient(GRADIENT_STOPS);
    let last = (colors.len().max(2) - 1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            format!(
                "      <stop offset='{:.1}%' stop-color='{}'/>\n",
                i as f64 / last * 100.0,
                color.to_hex()
            )
        })
        .collect()
}

fn colorbar(
    labels: &PlotLabels,
    domain: Extent,
    plot_right: f64,
    top: f64,
    bottom: f64,
) -> String {
    let x = plot_right + COLORBAR_GAP;
    let height = bottom - top;
    let mut out = format!(
        "  <rect x='{x}' y='{top}' width='{COLORBAR_WIDTH}' height='{height}' fill='url(#colorbar)' stroke='#9aa0ae'/>\n"
    );

    let ticks = if domain.span() > 0.0 {
        domain.ticks(5)
    } else {
        vec![domain.min]
    };
    for tick in ticks {
        let py = bottom - domain.normalize(tick) * height;
        out.push_str(&format!(
            "  <text x='{:.1}' y='{py:.1}' dominant-baseline='middle' font-size='11' fill='#4a5060'>{}</text>\n",
            x + COLORBAR_WIDTH + 6.0,
            format_signal(tick)
        ));
    }

    out.push_str(&format!(
        "  <text x='{x}' y='{:.1}' font-size='12' fill='#1f2430'>{}</text>\n",
        top - 12.0,
        escape_xml(labels.colorbar)
    ));
    out
}

pub(crate) fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
