use std::path::Path;

use pdfharvest::{DirectorySink, ExtractOptions, Harvester, PageRecord, Report};

use crate::cli::OutputFormat;
use crate::shared::{ProgressReporter, open_pdf, print_json, print_warnings, resolve_pages};

pub fn run(
    file: &Path,
    output_dir: &Path,
    pages: Option<&str>,
    options: ExtractOptions,
    format: &OutputFormat,
    password: Option<&str>,
) -> Result<(), i32> {
    let pdf = open_pdf(file, password, options)?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;

    let sink = DirectorySink::new(output_dir).map_err(|e| {
        eprintln!(
            "Error: failed to create output directory {}: {e}",
            output_dir.display()
        );
        1
    })?;
    let harvester = Harvester::new(&pdf).with_sink(&sink);
    let progress = ProgressReporter::new(page_indices.len());

    let mut records: Vec<PageRecord> = Vec::with_capacity(page_indices.len());
    let mut warnings = Vec::new();
    for (i, &idx) in page_indices.iter().enumerate() {
        progress.report(i + 1);
        let result = harvester.harvest_page(idx).map_err(|e| {
            eprintln!("Error: page {}: {e}", idx + 1);
            1
        })?;
        records.push(result.value);
        warnings.extend(result.warnings);
    }
    progress.finish();
    print_warnings(&warnings);

    match format {
        OutputFormat::Text => {
            for record in &records {
                println!(
                    "Page {} extracted: Chapter - '{}', Subsection - '{}', {} image(s)",
                    record.page_number,
                    record.chapter,
                    record.subsection,
                    record.image_paths.len()
                );
            }
            println!(
                "Extraction completed. Files are saved in '{}'",
                output_dir.display()
            );
            Ok(())
        }
        OutputFormat::Json => {
            let source = file.file_name().map_or_else(
                || file.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            );
            let report = Report::new(
                &source,
                &file.display().to_string(),
                &records,
                pdf.metadata(),
            );
            print_json(&report.to_json())
        }
    }
}
