//! Formats command implementation

use anyhow::Result;
use tabled::Tabled;
use trackx_core::formats::DocumentRegistry;

use crate::output::OutputWriter;
use crate::output_types::{FormatInfo, FormatsOutput};

pub fn execute(output: &OutputWriter) -> Result<()> {
    let registry = DocumentRegistry::with_defaults();

    let mut formats: Vec<FormatInfo> = registry
        .readers()
        .iter()
        .map(|reader| FormatInfo {
            name: reader.format_name().to_string(),
            extensions: reader.supported_extensions().iter().map(|e| e.to_string()).collect(),
        })
        .collect();

    // CSV bypasses the registry but is an input format all the same
    formats.push(FormatInfo { name: "CSV".to_string(), extensions: vec!["csv".to_string()] });

    if output.is_json() {
        return output.result(FormatsOutput { formats });
    }

    output.section("Supported Formats");

    #[derive(Tabled)]
    struct FormatRow {
        #[tabled(rename = "Format")]
        name: String,
        #[tabled(rename = "Extensions")]
        extensions: String,
    }

    let rows: Vec<FormatRow> = formats
        .into_iter()
        .map(|f| FormatRow { name: f.name, extensions: f.extensions.join(", ") })
        .collect();

    output.table(rows);

    Ok(())
}
