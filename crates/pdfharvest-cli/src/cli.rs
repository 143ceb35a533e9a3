use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pdfharvest::{FallbackLabels, HeadingStrategy, IndexBase};

/// Extract chapter/subsection headings, page text and embedded images from PDF documents.
#[derive(Debug, Parser)]
#[command(name = "pdfharvest", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write page text files and images, then print a summary or the JSON report
    Extract {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for page text files and images
        #[arg(long, short, default_value = "extracted")]
        output_dir: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        #[command(flatten)]
        headings: HeadingArgs,

        /// Numbering base for page numbers and image indices
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
        index_base: u8,

        /// Do not extract embedded images
        #[arg(long)]
        no_images: bool,

        /// Do not write page_<N>.txt files
        #[arg(long)]
        no_text_files: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },

    /// Print the chapter and subsection detected on each page
    Classify {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        #[command(flatten)]
        headings: HeadingArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },

    /// List image resources with their filter and extraction path
    Images {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,
    },

    /// Serve POST /parse_pdf over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "PDFHARVEST_BIND", default_value = "127.0.0.1:5000")]
        bind: String,

        /// Directory extracted images are written under
        #[arg(long, default_value = "extracted_images")]
        image_dir: PathBuf,

        #[command(flatten)]
        headings: HeadingArgs,
    },
}

/// Heading detection flags shared by several subcommands.
#[derive(Debug, Clone, clap::Args)]
pub struct HeadingArgs {
    /// Heading detection rule
    #[arg(long, value_enum, default_value_t = HeadingsArg::Pattern)]
    pub headings: HeadingsArg,

    /// Use "Untitled ..." instead of "Unknown ..." for missing headings
    #[arg(long)]
    pub untitled: bool,
}

impl HeadingArgs {
    /// The fallback labels selected by `--untitled`.
    pub fn fallback_labels(&self) -> FallbackLabels {
        if self.untitled {
            FallbackLabels::untitled()
        } else {
            FallbackLabels::default()
        }
    }
}

/// Heading detection rule for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadingsArg {
    /// "Chapter N: title" and numbered or "Section" subsections
    Pattern,
    /// All-caps chapters and "Section" subsections
    Uppercase,
}

impl HeadingsArg {
    /// Convert to the library's `HeadingStrategy`.
    pub fn to_strategy(self) -> HeadingStrategy {
        match self {
            HeadingsArg::Pattern => HeadingStrategy::Pattern,
            HeadingsArg::Uppercase => HeadingStrategy::UpperCase,
        }
    }
}

/// Output format for all subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}

/// Map the `--index-base` value onto the library's `IndexBase`.
pub fn index_base_from(value: u8) -> IndexBase {
    if value == 0 {
        IndexBase::Zero
    } else {
        IndexBase::One
    }
}
