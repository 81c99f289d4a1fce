use dioxus::prelude::*;

use crate::core::options::FilterOptions;
use crate::core::selection::{Dimension, FilterValue, SelectionState};
use crate::t;

#[derive(Clone, PartialEq)]
struct FilterEntry {
    value: FilterValue,
    label: String,
    checked: bool,
}

/// Checkbox groups for the four categorical dimensions.
#[component]
pub fn FilterPanel(options: FilterOptions, selection: Signal<SelectionState>) -> Element {
    let current = selection();

    let groups: Vec<(Dimension, String, usize, Vec<FilterEntry>)> = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let entries: Vec<FilterEntry> = options
                .values(dimension)
                .into_iter()
                .map(|value| FilterEntry {
                    checked: current.is_selected(&value),
                    label: value_label(&value),
                    value,
                })
                .collect();
            let selected = current.selected_count(dimension);
            (dimension, dimension_title(dimension), selected, entries)
        })
        .collect();

    rsx! {
        for (dimension, title, selected, entries) in groups.into_iter() {
            FilterGroup {
                key: "{dimension:?}",
                title,
                selected,
                entries,
                selection,
            }
        }
    }
}

fn dimension_title(dimension: Dimension) -> String {
    match dimension {
        Dimension::Dataset => t!("filter-dataset"),
        Dimension::Donor => t!("filter-donor"),
        Dimension::Buffer => t!("filter-buffer"),
        Dimension::IncubationTime => t!("filter-incubation"),
    }
}

fn value_label(value: &FilterValue) -> String {
    match value {
        FilterValue::Dataset(id) => t!("filter-dataset-option", id = id.to_string()),
        FilterValue::Donor(donor) => donor.clone(),
        FilterValue::Buffer(buffer) => buffer.clone(),
        FilterValue::Incubation(hours) => {
            t!("filter-incubation-option", hours = hours.to_string())
        }
    }
}

#[component]
fn FilterGroup(
    title: String,
    selected: usize,
    entries: Vec<FilterEntry>,
    selection: Signal<SelectionState>,
) -> Element {
    let total = entries.len();

    rsx! {
        fieldset { class: "umap-filters__group",
            legend { class: "umap-filters__title",
                "{title} "
                span { class: "umap-filters__count", "{selected}/{total}" }
            }
            for entry in entries.into_iter() {
                {render_entry(entry, selection)}
            }
        }
    }
}

fn render_entry(entry: FilterEntry, mut selection: Signal<SelectionState>) -> Element {
    let FilterEntry {
        value,
        label,
        checked,
    } = entry;

    rsx! {
        label { key: "{label}", class: "umap-filters__option",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |_| selection.write().toggle(value.clone()),
            }
            span { "{label}" }
        }
    }
}
