mod classify_cmd;
mod cli;
mod extract_cmd;
mod images_cmd;
mod page_range;
mod serve_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use pdfharvest::ExtractOptions;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Extract {
            ref file,
            ref output_dir,
            ref pages,
            ref headings,
            index_base,
            no_images,
            no_text_files,
            ref format,
            ref password,
        } => {
            let options = ExtractOptions {
                heading_strategy: headings.headings.to_strategy(),
                fallback_labels: headings.fallback_labels(),
                index_base: cli::index_base_from(index_base),
                extract_images: !no_images,
                write_text_files: !no_text_files,
                ..ExtractOptions::default()
            };
            extract_cmd::run(
                file,
                output_dir,
                pages.as_deref(),
                options,
                format,
                password.as_deref(),
            )
        }
        cli::Commands::Classify {
            ref file,
            ref pages,
            ref headings,
            ref format,
            ref password,
        } => {
            let options = ExtractOptions {
                heading_strategy: headings.headings.to_strategy(),
                fallback_labels: headings.fallback_labels(),
                ..ExtractOptions::default()
            };
            classify_cmd::run(file, pages.as_deref(), options, format, password.as_deref())
        }
        cli::Commands::Images {
            ref file,
            ref pages,
            ref format,
            ref password,
        } => images_cmd::run(file, pages.as_deref(), format, password.as_deref()),
        cli::Commands::Serve {
            ref bind,
            ref image_dir,
            ref headings,
        } => {
            let options = ExtractOptions {
                heading_strategy: headings.headings.to_strategy(),
                fallback_labels: headings.fallback_labels(),
                ..ExtractOptions::default()
            };
            serve_cmd::run(bind, image_dir, options)
        }
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
