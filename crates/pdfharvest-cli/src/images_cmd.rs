use std::path::Path;

use pdfharvest::{ExtractOptions, ImageResource, Pdf, classify_filter};

use crate::cli::OutputFormat;
use crate::shared::{ProgressReporter, open_pdf, print_json, print_warnings, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: &OutputFormat,
    password: Option<&str>,
) -> Result<(), i32> {
    let pdf = open_pdf(file, password, ExtractOptions::default())?;
    let page_indices = resolve_pages(pages, pdf.page_count())?;
    let reporter = ProgressReporter::new(page_indices.len());

    match format {
        OutputFormat::Text => write_text(&pdf, &page_indices, &reporter),
        OutputFormat::Json => write_json(&pdf, &page_indices, &reporter),
    }
}

/// "lossless", "lossy" or "unknown".
fn family_name(image: &ImageResource) -> &'static str {
    classify_filter(&image.filter_name).map_or("unknown", |family| family.as_str())
}

fn read_images(pdf: &Pdf, idx: usize) -> Result<Vec<ImageResource>, i32> {
    let result = pdf.read_page(idx).map_err(|e| {
        eprintln!("Error reading page {}: {e}", idx + 1);
        1
    })?;
    print_warnings(&result.warnings);
    Ok(result.value.images)
}

fn write_text(pdf: &Pdf, page_indices: &[usize], reporter: &ProgressReporter) -> Result<(), i32> {
    for (i, &idx) in page_indices.iter().enumerate() {
        reporter.report(i + 1);
        let images = read_images(pdf, idx)?;

        println!("--- Page {} ---", idx + 1);
        for img in &images {
            println!(
                "  {}\t{}\t{}\t{}x{}\t{}\t{}\t{} bytes",
                img.name,
                if img.filter_name.is_empty() { "-" } else { img.filter_name.as_str() },
                family_name(img),
                img.width,
                img.height,
                img.bits_per_component.map_or("-".to_string(), |b| b.to_string()),
                img.color_space.as_deref().unwrap_or("-"),
                img.raw_bytes.len(),
            );
        }
    }
    reporter.finish();
    Ok(())
}

fn write_json(pdf: &Pdf, page_indices: &[usize], reporter: &ProgressReporter) -> Result<(), i32> {
    let mut pages_json = Vec::new();

    for (i, &idx) in page_indices.iter().enumerate() {
        reporter.report(i + 1);
        let images = read_images(pdf, idx)?;

        let images_json: Vec<serde_json::Value> = images
            .iter()
            .map(|img| {
                serde_json::json!({
                    "name": img.name,
                    "filter": img.filter_name,
                    "family": family_name(img),
                    "width": img.width,
                    "height": img.height,
                    "bits_per_component": img.bits_per_component,
                    "color_space": img.color_space,
                    "bytes": img.raw_bytes.len(),
                })
            })
            .collect();

        pages_json.push(serde_json::json!({
            "page": idx + 1,
            "images": images_json,
        }));
    }

    reporter.finish();
    print_json(&serde_json::Value::Array(pages_json))
}
