use api::{ApiClient, Target};
use dioxus::prelude::*;

use crate::core::load::{load_snapshot, LoadOutcome, ViewState};
use crate::core::options::FilterOptions;
use crate::core::selection::SelectionState;
use crate::core::series::PlotLabels;
use crate::explorer::{
    point_tooltips, render_svg, ExportPanel, ExportRow, FilterPanel, ScatterPlot, TargetPicker,
};
use crate::t;

/// Everything the loaded page renders, computed with the read guards held
/// and then released before `rsx!`.
struct PageData {
    options: FilterOptions,
    targets: Vec<Target>,
    total: usize,
    plot: Option<PlotData>,
}

struct PlotData {
    shown: usize,
    svg: String,
    rows: Vec<ExportRow>,
}

#[component]
pub fn Umap() -> Element {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let mut selection = use_signal(SelectionState::default);
    let outcome = use_resource(move || async move {
        let client = ApiClient::default();
        let outcome = load_snapshot(&client).await;
        if let Some(explorer) = outcome.explorer() {
            selection.set(explorer.seed_selection());
        }
        outcome
    });

    let current = selection();
    let guard = outcome.read();
    let loaded: Option<&LoadOutcome> = Option::as_ref(&guard);
    let view = ViewState::resolve(loaded, &current);
    let page = loaded
        .and_then(LoadOutcome::explorer)
        .map(|explorer| {
            let plot = match &view {
                ViewState::Ready(series) => {
                    let visible = explorer.visible_points(&current);
                    let target = current
                        .active_target()
                        .and_then(|id| explorer.target_name(id));
                    let tooltips = point_tooltips(&visible, series);
                    Some(PlotData {
                        shown: series.len(),
                        svg: render_svg(series, &PlotLabels::default(), &tooltips),
                        rows: ExportRow::collect(&visible, series, target),
                    })
                }
                _ => None,
            };
            PageData {
                options: explorer.options().clone(),
                targets: explorer.targets().to_vec(),
                total: explorer.snapshot().points.len(),
                plot,
            }
        });
    drop(guard);

    tracing::debug!(
        lang = %lang_marker,
        shown = page.as_ref().and_then(|p| p.plot.as_ref()).map_or(0, |p| p.shown),
        "umap page render"
    );

    rsx! {
        section { class: "page page-umap",
            h1 { {t!("umap-title")} }

            match (view, page) {
                (ViewState::Loading, _) => rsx! {
                    p { class: "umap-card__placeholder", {t!("umap-loading")} }
                },
                (ViewState::Failed(message), _) => rsx! {
                    p { class: "umap-card__placeholder umap-card__placeholder--error",
                        {t!("umap-error", message = message)}
                    }
                },
                (_, None) => rsx! {},
                (_, Some(page)) => rsx! {
                    div { class: "umap__layout",
                        aside { class: "umap-card umap-filters",
                            FilterPanel { options: page.options, selection }
                            TargetPicker { targets: page.targets, selection }
                        }

                        div { class: "umap__main",
                            section { class: "umap-card umap-plot",
                                div { class: "umap-card__header",
                                    h2 { {t!("umap-plot-title")} }
                                    span { class: "umap-card__meta",
                                        {t!(
                                            "umap-points-shown",
                                            shown = page.plot.as_ref().map_or(0, |p| p.shown),
                                            total = page.total
                                        )}
                                    }
                                }
                                if let Some(plot) = page.plot.as_ref() {
                                    ScatterPlot { markup: plot.svg.clone() }
                                } else {
                                    p { class: "umap-card__placeholder", {t!("umap-empty")} }
                                }
                            }

                            if let Some(plot) = page.plot {
                                ExportPanel { rows: plot.rows, svg: plot.svg }
                            }
                        }
                    }
                },
            }
        }
    }
}
