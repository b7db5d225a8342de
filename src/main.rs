//! quill2pdf CLI - render a Quill delta JSON document to PDF

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use quill_pdf_rust::convert_file;

#[derive(Parser)]
#[command(name = "quill2pdf")]
#[command(version)]
#[command(about = "Render Quill delta JSON documents to styled, hyperlinked PDFs", long_about = None)]
struct Cli {
    /// Input delta JSON file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output PDF file
    #[arg(short, long, value_name = "FILE", default_value = "output.pdf")]
    output: PathBuf,

    /// Directory holding inline icon assets
    #[arg(long, value_name = "DIR")]
    icons: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match convert_file(&cli.input, &cli.output, cli.icons.as_deref()) {
        Ok(stats) => {
            println!(
                "PDF generated: {} ({} paragraphs, {} operations skipped)",
                cli.output.display(),
                stats.paragraphs,
                stats.skipped
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
