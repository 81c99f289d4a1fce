use api::PlotPoint;
use dioxus::prelude::*;
use serde::Serialize;

#[cfg(target_arch = "wasm32")]
use crate::core::platform;
use crate::core::series::ScatterSeries;
use crate::t;

/// One displayed point, flattened for JSON/CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub sample_id: i64,
    pub dataset_id: i64,
    pub donor: String,
    pub buffer: String,
    pub incubation_time_hr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub well_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub signal: f64,
    pub target: Option<String>,
}

impl ExportRow {
    /// Pairs each displayed point with its colour value. `points` and
    /// `series` must come from the same filter pass.
    pub fn collect(points: &[&PlotPoint], series: &ScatterSeries, target: Option<&str>) -> Vec<Self> {
        points
            .iter()
            .zip(series.color.iter())
            .map(|(point, signal)| {
                let sample = &point.sample;
                ExportRow {
                    sample_id: sample.id,
                    dataset_id: sample.dataset.id,
                    donor: sample.metadata.donor.clone(),
                    buffer: sample.metadata.buffer.clone(),
                    incubation_time_hr: sample.metadata.incubation_time.hours(),
                    plate_barcode: sample.plate_barcode.clone(),
                    well_id: sample.well_id.clone(),
                    x: point.x_coor,
                    y: point.y_coor,
                    signal: *signal,
                    target: target.map(str::to_string),
                }
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ExportKind {
    Json,
    Csv,
    Png,
}

impl ExportKind {
    fn working_label(self) -> &'static str {
        match self {
            ExportKind::Json => "Preparing JSON",
            ExportKind::Csv => "Preparing CSV",
            ExportKind::Png => "Preparing PNG",
        }
    }
}

#[component]
pub fn ExportPanel(rows: Vec<ExportRow>, svg: String) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => {
            Some(("umap-card__meta".to_string(), format!("{label}…")))
        }
        ExportStatus::Done(message) => Some((
            "umap-card__meta umap-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "umap-card__meta umap-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let handler = |kind: ExportKind| {
        let rows = rows.clone();
        let svg = svg.clone();
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_: MouseEvent| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working(kind.working_label()));
            let rows = rows.clone();
            let svg = svg.clone();

            #[cfg(target_arch = "wasm32")]
            {
                platform::spawn_future(async move {
                    let outcome = perform_export(kind, rows, svg).await;
                    finish(outcome, status_signal, busy_signal);
                });
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let outcome = futures::executor::block_on(perform_export(kind, rows, svg));
                finish(outcome, status_signal, busy_signal);
            }
        }
    };

    let json_handler = handler(ExportKind::Json);
    let csv_handler = handler(ExportKind::Csv);
    let png_handler = handler(ExportKind::Png);
    let total = rows.len();

    rsx! {
        section { class: "umap-card umap-export",
            div { class: "umap-card__header",
                h2 { {t!("export-title")} }
                span { class: "umap-card__meta", {t!("export-count", count = total)} }
            }
            p { {t!("export-intro")} }

            div { class: "umap-export__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: json_handler,
                    {t!("export-json")}
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: csv_handler,
                    {t!("export-csv")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy(),
                    onclick: png_handler,
                    {t!("export-png")}
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

fn finish(
    outcome: Result<String, String>,
    mut status_signal: Signal<ExportStatus>,
    mut busy_signal: Signal<bool>,
) {
    match outcome {
        Ok(message) => status_signal.set(ExportStatus::Done(message)),
        Err(err) => {
            tracing::warn!(error = %err, "export failed");
            status_signal.set(ExportStatus::Error(err));
        }
    }
    busy_signal.set(false);
}

async fn perform_export(kind: ExportKind, rows: Vec<ExportRow>, svg: String) -> Result<String, String> {
    match kind {
        ExportKind::Json => perform_json_export(rows).await,
        ExportKind::Csv => perform_csv_export(rows).await,
        ExportKind::Png => perform_png_export(svg).await,
    }
}

async fn perform_json_export(rows: Vec<ExportRow>) -> Result<String, String> {
    let json = serde_json::to_string_pretty(&rows).map_err(|err| err.to_string())?;
    let filename = format!("umap-points-{}.json", timestamp_slug());
    let delivery = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("JSON saved to {path}"),
        None => "JSON download started".to_string(),
    })
}

async fn perform_csv_export(rows: Vec<ExportRow>) -> Result<String, String> {
    let csv = build_csv(&rows);
    let copied = copy_to_clipboard(csv.clone()).await?;
    let filename = format!("umap-points-{}.csv", timestamp_slug());
    let delivery = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(match (delivery, copied) {
        (Some(path), true) => format!("CSV copied and saved to {path}"),
        (Some(path), false) => format!("CSV saved to {path}"),
        (None, _) => "CSV download started".to_string(),
    })
}

async fn perform_png_export(svg: String) -> Result<String, String> {
    let png_bytes = build_png(&svg).await?;
    let filename = format!("umap-plot-{}.png", timestamp_slug());
    let delivery = download_bytes(&filename, "image/png", png_bytes).await?;
    Ok(match delivery {
        Some(path) => format!("PNG snapshot saved to {path}"),
        None => "PNG download started".to_string(),
    })
}

fn build_csv(rows: &[ExportRow]) -> String {
    let header = [
        "sample_id",
        "dataset_id",
        "donor",
        "buffer",
        "incubation_time_hr",
        "plate_barcode",
        "well_id",
        "x",
        "y",
        "signal",
        "target",
    ];

    let mut csv = header.join(",");
    csv.push('\n');

    for row in rows {
        let fields = [
            row.sample_id.to_string(),
            row.dataset_id.to_string(),
            row.donor.clone(),
            row.buffer.clone(),
            row.incubation_time_hr.to_string(),
            row.plate_barcode.clone().unwrap_or_default(),
            row.well_id.clone().unwrap_or_default(),
            row.x.to_string(),
            row.y.to_string(),
            row.signal.to_string(),
            row.target.clone().unwrap_or_default(),
        ];
        let line = fields
            .iter()
            .map(|field| escape_csv(field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

/// Returns whether the payload actually reached the clipboard.
async fn copy_to_clipboard(payload: String) -> Result<bool, String> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = payload;
        Ok(false)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(payload)) {
            Ok(()) => Ok(true),
            Err(err) => {
                tracing::debug!(error = %err, "clipboard unavailable");
                Ok(false)
            }
        }
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = crate::core::platform::export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
        file.write_all(&bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

async fn build_png(svg: &str) -> Result<Vec<u8>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        build_png_web(svg).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        build_png_desktop(svg)
    }
}

#[cfg(target_arch = "wasm32")]
async fn build_png_web(svg: &str) -> Result<Vec<u8>, String> {
    use base64::Engine;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    use super::scatter::{PLOT_HEIGHT, PLOT_WIDTH};

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Unable to build SVG blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create SVG URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    canvas.set_width(PLOT_WIDTH as u32);
    canvas.set_height(PLOT_HEIGHT as u32);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "Canvas context unavailable")?
        .ok_or("Canvas context missing")?
        .dyn_into()
        .map_err(|_| "Context cast failed")?;

    let image = HtmlImageElement::new().map_err(|_| "Unable to create image")?;
    image.set_src(&url);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| "Image decode failed")?;

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| "Unable to draw image")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "Unable to serialise canvas")?;
    Url::revoke_object_url(&url).ok();

    let encoded = data_url.split(',').nth(1).ok_or("Malformed data URL")?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| "PNG decode failed".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn build_png_desktop(svg: &str) -> Result<Vec<u8>, String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|err| err.to_string())?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or("Unable to allocate PNG canvas")?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{mixed_points, signal};

    #[test]
    fn rows_pair_points_with_colour_values() {
        let points = mixed_points();
        let refs: Vec<&PlotPoint> = points.iter().collect();
        let series = ScatterSeries::from_signals(&refs, &[signal(2, 7, 1.25)], Some(7));

        let rows = ExportRow::collect(&refs, &series, Some("IFNG"));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].sample_id, 2);
        assert_eq!(rows[1].signal, 1.25);
        assert_eq!(rows[0].signal, 0.0);
        assert_eq!(rows[2].target.as_deref(), Some("IFNG"));
    }

    #[test]
    fn csv_quotes_awkward_fields() {
        let points = mixed_points();
        let refs: Vec<&PlotPoint> = points.iter().take(1).collect();
        let series = ScatterSeries::from_signals(&refs, &[], None);
        let mut rows = ExportRow::collect(&refs, &series, None);
        rows[0].donor = "Smith, \"J\"".to_string();

        let csv = build_csv(&rows);
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("sample_id,dataset_id,donor"));
        assert_eq!(
            lines.next().unwrap(),
            "1,1,\"Smith, \"\"J\"\"\",PBS,4,,,1,-1,0,"
        );
    }

    #[test]
    fn line_breaks_force_quoting() {
        assert_eq!(escape_csv("plate\r7"), "\"plate\r7\"");
        assert_eq!(escape_csv("well\nA1"), "\"well\nA1\"");
        assert_eq!(escape_csv("A1"), "A1");
    }

    #[test]
    fn json_omits_missing_plate_fields() {
        let points = mixed_points();
        let refs: Vec<&PlotPoint> = points.iter().take(1).collect();
        let series = ScatterSeries::from_signals(&refs, &[], None);
        let rows = ExportRow::collect(&refs, &series, None);

        let value = serde_json::to_value(&rows).unwrap();
        assert!(value[0].get("plate_barcode").is_none());
        assert_eq!(value[0]["target"], serde_json::Value::Null);
    }
}
