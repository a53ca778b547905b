//! Extract command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tabled::Tabled;
use trackx_core::config::CliConfigOverrides;
use trackx_core::formats::csv::ingest_csv;
use trackx_core::formats::DocumentRegistry;
use trackx_core::geo;
use trackx_core::models::{CaseMeta, CasePayload, Extraction};
use trackx_core::payload::build_case_payload;
use trackx_core::GpsExtractor;

use crate::cli::ExtractArgs;
use crate::output::OutputWriter;
use crate::output_types::ExtractOutput;

/// Rows shown in the human-readable points table before truncating
const MAX_TABLE_ROWS: usize = 20;

pub fn execute(args: ExtractArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    // Collapse the configuration layers, CLI flags last
    let mut layered = super::load_layered_config(config_path)?;
    layered.update_from_cli(CliConfigOverrides {
        dedup_degrees: args.dedup_degrees,
        dedup_radius_m: args.dedup_radius_m,
        context_before: args.context_before,
        context_after: args.context_after,
    });
    for (key, (value, source)) in layered.to_inspection_map() {
        tracing::debug!(%key, %value, ?source, "resolved config value");
    }
    let config = layered.into_extractor_config()?;

    let extension =
        args.file.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase();

    // CSV exports carry structured rows; everything else goes through a
    // document reader and the text extractor
    let (extraction, format_name, csv_summary) = if extension == "csv" {
        tracing::debug!("Ingesting {} as a structured CSV export", args.file.display());
        let (extraction, summary) = ingest_csv(&args.file)?;
        (extraction, "CSV".to_string(), Some(summary))
    } else {
        let registry = DocumentRegistry::with_defaults();
        let reader = registry.detect_format(&args.file)?;
        tracing::debug!(
            "Routing {} through the {} reader",
            args.file.display(),
            reader.format_name()
        );
        let document = reader.read(&args.file)?;
        let extractor = GpsExtractor::new(config)?;
        let extraction = extractor.extract_from_pages(&document.pages)?;
        (extraction, document.format_name, None)
    };

    let payload = build_payload_if_requested(&args, &extraction)?;

    let track_length_m = geo::track_length_m(&extraction.raw);
    let bounds = geo::bounding_box(&extraction.raw);

    if let Some(path) = &args.output {
        let json = match &payload {
            Some(payload) => serde_json::to_string_pretty(payload)?,
            None => serde_json::to_string_pretty(&extraction)?,
        };
        fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if output.is_json() {
        output.result(ExtractOutput {
            file: args.file.display().to_string(),
            format: format_name,
            total_points: extraction.raw.len(),
            points_of_interest: extraction.stopped_points.len(),
            track_length_m,
            bounding_box: bounds,
            csv_summary,
            extraction,
            payload,
        })?;
        return Ok(());
    }

    output.section("Extraction Summary");
    output.kv("File", args.file.display());
    output.kv("Format", &format_name);
    output.kv("Total points", extraction.raw.len());
    output.kv("Points of interest", extraction.stopped_points.len());
    output.kv("Track length", format_track_length(track_length_m));
    if let Some(bounds) = bounds {
        output.kv(
            "Bounding box",
            format!(
                "({:.4}, {:.4}) to ({:.4}, {:.4})",
                bounds.min_lat, bounds.min_lng, bounds.max_lat, bounds.max_lng
            ),
        );
    }

    if let Some(summary) = &csv_summary {
        output.kv("Latitude column", &summary.columns_used.lat);
        output.kv("Longitude column", &summary.columns_used.lng);
        if summary.derived_status {
            output.info("Ignition status derived from description keywords");
        }
    }

    output.section("Points of Interest");

    #[derive(Tabled)]
    struct PointRow {
        #[tabled(rename = "ID")]
        id: usize,
        #[tabled(rename = "Latitude")]
        lat: String,
        #[tabled(rename = "Longitude")]
        lng: String,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Timestamp")]
        timestamp: String,
    }

    let rows: Vec<PointRow> = extraction
        .stopped_points
        .iter()
        .take(MAX_TABLE_ROWS)
        .map(|p| PointRow {
            id: p.id,
            lat: format!("{:.6}", p.lat),
            lng: format!("{:.6}", p.lng),
            status: p.ignition_status.to_string(),
            timestamp: p.timestamp.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    output.table(rows);

    if extraction.stopped_points.len() > MAX_TABLE_ROWS {
        output.info(format!(
            "Showing {} of {} points of interest",
            MAX_TABLE_ROWS,
            extraction.stopped_points.len()
        ));
    }

    if let Some(path) = &args.output {
        output.success(format!(
            "Wrote {} points to {}",
            extraction.raw.len(),
            path.display()
        ));
    }

    if let Some(payload) = &payload {
        output.success(format!("Case payload prepared for {}", payload.case_number));
    }

    Ok(())
}

/// Build the case-creation payload when any case metadata flag was given.
///
/// A partial set of flags is an error: the payload needs at least the
/// incident date and the case number.
fn build_payload_if_requested(
    args: &ExtractArgs,
    extraction: &Extraction,
) -> Result<Option<CasePayload>> {
    let wants_case = args.date.is_some()
        || args.case_number.is_some()
        || args.title.is_some()
        || args.region.is_some()
        || args.between.is_some();

    if !wants_case {
        return Ok(None);
    }

    let date = args
        .date
        .clone()
        .context("--date is required when building a case payload")?;
    let case_number = args
        .case_number
        .clone()
        .context("--case-number is required when building a case payload")?;

    let meta = CaseMeta {
        case_number,
        case_title: args.title.clone().unwrap_or_default(),
        date_of_incident: date,
        region: args.region.clone().unwrap_or_default(),
        between: args.between.clone().unwrap_or_default(),
        urgency: args.urgency.clone(),
    };

    Ok(Some(build_case_payload(&meta, extraction)?))
}

fn format_track_length(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters)
    }
}
