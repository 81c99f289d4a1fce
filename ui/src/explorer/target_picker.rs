use api::{Target, TargetId};
use dioxus::prelude::*;

use crate::core::selection::SelectionState;
use crate::t;

/// Single-choice target select. The empty option clears the active target.
#[component]
pub fn TargetPicker(targets: Vec<Target>, selection: Signal<SelectionState>) -> Element {
    let mut selection = selection;
    let active = selection.read().active_target();
    let current = active.map(|id| id.to_string()).unwrap_or_default();

    let on_change = move |evt: FormEvent| {
        let next = evt.value().parse::<TargetId>().ok();
        tracing::debug!(target_id = ?next, "active target changed");
        selection.write().set_active_target(next);
    };

    rsx! {
        div { class: "umap-filters__group umap-filters__group--target",
            label { class: "umap-filters__title", r#for: "target-select", {t!("filter-target")} }
            select {
                id: "target-select",
                value: "{current}",
                onchange: on_change,
                option { value: "", selected: active.is_none(), {t!("filter-target-none")} }
                for target in targets.iter() {
                    option {
                        key: "{target.id}",
                        value: "{target.id}",
                        selected: active == Some(target.id),
                        "{target.name}"
                    }
                }
            }
        }
    }
}
