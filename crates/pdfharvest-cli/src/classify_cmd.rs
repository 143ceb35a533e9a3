use std::path::Path;

use pdfharvest::{ExtractOptions, Harvester};

use crate::cli::OutputFormat;
use crate::shared::{ProgressReporter, open_pdf, print_json, print_warnings, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    options: ExtractOptions,
    format: &OutputFormat,
    password: Option<&str>,
) -> Result<(), i32> {
    let pdf = open_pdf(file, password, options)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;
    let harvester = Harvester::new(&pdf);
    let progress = ProgressReporter::new(page_indices.len());

    let mut pages_json = Vec::new();
    for (i, &idx) in page_indices.iter().enumerate() {
        progress.report(i + 1);
        let result = harvester.harvest_page(idx).map_err(|e| {
            eprintln!("Error: page {}: {e}", idx + 1);
            1
        })?;
        print_warnings(&result.warnings);
        let record = result.value;

        match format {
            OutputFormat::Text => {
                println!("--- Page {} ---", record.page_number);
                println!("Chapter: {}", record.chapter);
                println!("Subsection: {}", record.subsection);
            }
            OutputFormat::Json => pages_json.push(serde_json::json!({
                "page": record.page_number,
                "total_pages": record.total_pages,
                "chapter": record.chapter,
                "subsection": record.subsection,
                "body": record.body_text,
            })),
        }
    }
    progress.finish();

    if matches!(format, OutputFormat::Json) {
        print_json(&serde_json::Value::Array(pages_json))?;
    }
    Ok(())
}
