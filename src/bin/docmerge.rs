//! Docmerge CLI - merge XML data into document templates

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use docmerge::core::scanner::has_placeholders;
#[cfg(feature = "cli")]
use docmerge::{
    ir::{Block, Document},
    merge_package, merged_file_name, sample_template, scan_content, scan_tables, DocumentPackage,
    JsonPackage, MergeOptions, MergeReport,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "docmerge")]
#[command(version)]
#[command(about = "Merge XML data into rich-text document templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every placeholder and path lookup
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Merge a data file into a template
    Merge {
        /// Template document tree (JSON)
        template: PathBuf,

        /// XML data file
        #[arg(short, long, default_value = "Data/data.xml")]
        data: PathBuf,

        /// Output path (defaults to <template>_merged.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the merge report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Fail when any placeholder is blanked or skipped
        #[arg(long)]
        strict: bool,

        /// Header shading for generated tables (hex RGB)
        #[arg(long, default_value = "DDDDDD")]
        header_fill: String,

        /// Border size for generated tables, in eighths of a point
        #[arg(long, default_value_t = 12)]
        table_border: u32,

        /// Border size for populated cells without template styling
        #[arg(long, default_value_t = 4)]
        cell_border: u32,
    },

    /// Write a sample template using every placeholder kind
    Sample {
        /// Output path
        #[arg(short, long, default_value = "sample_template.json")]
        output: PathBuf,
    },

    /// List the placeholders found in a template
    Scan {
        /// Template document tree (JSON)
        template: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Merge {
            template,
            data,
            output,
            report,
            strict,
            header_fill,
            table_border,
            cell_border,
        } => {
            let options = MergeOptions {
                header_fill,
                table_border_size: table_border,
                cell_border_size: cell_border,
                strict,
            };
            let output = output.unwrap_or_else(|| merged_file_name(&template));
            run_merge(&template, &data, &output, report.as_ref(), &options)
        }
        Commands::Sample { output } => JsonPackage::new(&output)
            .save(&sample_template())
            .map(|()| eprintln!("✓ Sample template written to: {}", output.display()))
            .map_err(|e| e.to_string()),
        Commands::Scan { template } => run_scan(&template),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("✗ {}", message);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "cli")]
fn run_merge(
    template: &PathBuf,
    data: &PathBuf,
    output: &PathBuf,
    report_path: Option<&PathBuf>,
    options: &MergeOptions,
) -> Result<(), String> {
    let report = merge_package(
        &JsonPackage::new(template),
        data,
        &JsonPackage::new(output),
        options,
    )
    .map_err(|e| e.to_string())?;

    print_summary(&report);
    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| format!("{}: {}", path.display(), e))?;
    }
    eprintln!("✓ Output written to: {}", output.display());
    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(report: &MergeReport) {
    eprintln!(
        "{} content placeholder(s), {} table(s) populated, {} table(s) generated",
        report.content_placeholders, report.tables_populated, report.tables_synthesized
    );
    for diagnostic in &report.diagnostics {
        eprintln!("  {}", diagnostic);
    }
}

#[cfg(feature = "cli")]
fn run_scan(template: &PathBuf) -> Result<(), String> {
    let document = JsonPackage::new(template).load().map_err(|e| e.to_string())?;
    let texts = paragraph_texts(&document);
    let marked: Vec<&String> = texts.iter().filter(|t| has_placeholders(t)).collect();
    eprintln!("{} of {} paragraph(s) hold placeholders", marked.len(), texts.len());
    for text in marked {
        for placeholder in scan_content(text).into_iter().chain(scan_tables(text)) {
            println!("{:?}\t{}", placeholder.kind, placeholder.path.trim());
        }
    }
    Ok(())
}

/// Every paragraph's text, at any depth, in document order.
#[cfg(feature = "cli")]
fn paragraph_texts(document: &Document) -> Vec<String> {
    fn collect(blocks: &[Block], out: &mut Vec<String>) {
        for block in blocks {
            match block {
                Block::Paragraph(p) => out.push(p.text()),
                Block::Table(t) => {
                    for cell in t.rows.iter().flat_map(|r| &r.cells) {
                        collect(&cell.blocks, out);
                    }
                }
            }
        }
    }
    let mut out = Vec::new();
    if let Some(body) = document.body() {
        collect(&body.blocks, &mut out);
    }
    out
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install docmerge --features cli");
    eprintln!("  docmerge merge <TEMPLATE> --data <DATA>");
}
