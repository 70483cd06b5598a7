//! The Bic translator CLI.
//!
//! `bicc <input.bic> [-o <dir>]` translates one Bic source file into a
//! `.cpp`/`.hpp` pair in the output directory (default: the current
//! directory), creating intermediate directories on demand. The process
//! exits non-zero after the first scanner, parser, or emitter error; the
//! diagnostic names the file, line, and column and points a caret at the
//! offending token.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use bic_common::span::{LineIndex, Span};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bicc", version, about = "The Bic to C++ translator")]
struct Cli {
    /// Path to the `.bic` source file to translate
    input: PathBuf,

    /// Output directory for the generated `.cpp`/`.hpp` pair
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Execute the translation pipeline: read -> parse -> emit -> write both
/// units.
fn run(cli: &Cli) -> Result<(), String> {
    let source = fs::read_to_string(&cli.input)
        .map_err(|e| format!("failed to read '{}': {}", cli.input.display(), e))?;

    let stem = cli
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("'{}' has no usable file name", cli.input.display()))?;
    let header_filename = format!("{stem}.hpp");

    let program = match bic_parser::parse(&source) {
        Ok(program) => program,
        Err(err) => {
            report_error(&source, &cli.input, err.span, &err.message);
            return Err("translation failed due to the error above".to_string());
        }
    };

    let output = match bic_codegen::generate(&program, &header_filename) {
        Ok(output) => output,
        Err(err) => {
            report_error(&source, &cli.input, err.span, &err.message);
            return Err("translation failed due to the error above".to_string());
        }
    };

    fs::create_dir_all(&cli.output)
        .map_err(|e| format!("failed to create '{}': {}", cli.output.display(), e))?;

    let cpp_path = cli.output.join(format!("{stem}.cpp"));
    let hpp_path = cli.output.join(&header_filename);
    fs::write(&cpp_path, &output.source)
        .map_err(|e| format!("failed to write '{}': {}", cpp_path.display(), e))?;
    fs::write(&hpp_path, &output.header)
        .map_err(|e| format!("failed to write '{}': {}", hpp_path.display(), e))?;

    println!(
        "\u{2713} {} \u{2192} {} {}",
        cli.input.display(),
        cpp_path.display(),
        hpp_path.display()
    );

    Ok(())
}

/// Render a diagnostic with ariadne: a file/line/column header, the source
/// excerpt, and a caret label carrying the message.
fn report_error(source: &str, path: &Path, span: Span, message: &str) {
    use ariadne::{Label, Report, ReportKind, Source};

    let index = LineIndex::new(source);
    let (line, col) = index.line_col(span.start);
    eprintln!("{}: line {}, column {}", path.display(), line, col);

    let start = span.start as usize;
    let end = (span.end as usize).max(start + 1);
    let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, start..end)
        .with_message(message)
        .with_label(Label::new(start..end).with_message(message))
        .finish()
        .eprint(Source::from(source));
}
