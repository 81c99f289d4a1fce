use std::collections::{BTreeMap, BTreeSet};

/// Each non-fallback locale must define every fallback message with the
/// same `$variables`; `fl!` only validates arguments against en-US.
///
/// New locales go in `ui/i18n/<locale>/umap-explorer-ui.ftl` and are
/// registered in `LOCALES` below.
const EN_US: &str = include_str!("../i18n/en-US/umap-explorer-ui.ftl");

const LOCALES: &[(&str, &str)] = &[
    ("es-ES", include_str!("../i18n/es-ES/umap-explorer-ui.ftl")),
    ("fr-FR", include_str!("../i18n/fr-FR/umap-explorer-ui.ftl")),
];

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback = messages(EN_US, "en-US");
    assert!(!fallback.is_empty(), "Fallback (en-US) contains no keys.");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        let keys = messages(src, locale);
        let missing: Vec<_> = fallback
            .keys()
            .filter(|key| !keys.contains_key(*key))
            .cloned()
            .collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing:\n  {}", missing.join("\n  ")));
        }
    }

    assert!(
        failures.is_empty(),
        "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en-US, then translate.",
        failures.join("\n\n")
    );
}

#[test]
fn translations_use_fallback_variables() {
    let fallback = messages(EN_US, "en-US");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        for (key, vars) in messages(src, locale) {
            let Some(expected) = fallback.get(&key) else {
                continue;
            };
            if &vars != expected {
                failures.push(format!("{locale} {key}: {vars:?} (en-US has {expected:?})"));
            }
        }
    }

    assert!(failures.is_empty(), "Variable mismatch:\n  {}", failures.join("\n  "));
}

#[test]
fn dataset_and_incubation_labels_carry_their_value() {
    let fallback = messages(EN_US, "en-US");
    assert_eq!(fallback["filter-dataset-option"], BTreeSet::from(["id".to_string()]));
    assert_eq!(fallback["filter-incubation-option"], BTreeSet::from(["hours".to_string()]));
}

/// Message id -> variables referenced in its body (continuation lines
/// included). Panics on duplicate ids.
fn messages(src: &str, locale: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut out: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in src.lines() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let body = if line.starts_with(char::is_whitespace) {
            line
        } else {
            let Some((id, body)) = line.split_once('=') else {
                current = None;
                continue;
            };
            let id = id.trim();
            if id.is_empty() || id.starts_with('-') || id.contains(char::is_whitespace) {
                current = None;
                continue;
            }
            assert!(
                out.insert(id.to_string(), BTreeSet::new()).is_none(),
                "Duplicate key {id} in {locale}"
            );
            current = Some(id.to_string());
            body
        };

        if let Some(id) = &current {
            if let Some(vars) = out.get_mut(id) {
                vars.extend(variables(body));
            }
        }
    }

    out
}

fn variables(body: &str) -> impl Iterator<Item = String> + '_ {
    body.split('$').skip(1).filter_map(|rest| {
        let name: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        (!name.is_empty()).then_some(name)
    })
}
