//! docforge – command-line document renderer.
//!
//! Usage:
//!   docforge <kind> <data.json> [output.html] [--theme style.css] [--print] [--preview]
//!   docforge <kind> --sample [output.html] [...]
//!
//! If `output.html` is omitted the document is written next to the data file
//! with the same stem (e.g. `inv-42.json` → `inv-42.html`). With `--sample` the
//! default name is derived from the counterparty (e.g. `acme-corp-invoice.html`).

use std::{env, fs, path::PathBuf, process};

use docforge::error::ForgeError;
use docforge::output::{download_as_file, print_document, BrowserPrintHost, DirectoryDownloads};
use docforge::pipeline::{DocumentData, DocumentKind, RenderConfig};
use docforge::preview::text_outline;
use docforge::theme::Theme;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut kind: Option<DocumentKind> = None;
    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut theme_path: Option<PathBuf> = None;
    let mut print = false;
    let mut preview = false;
    let mut sample = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--print" | "-p" => print = true,
            "--preview" => preview = true,
            "--sample" | "-s" => sample = true,
            "--theme" | "-t" => match iter.next() {
                Some(v) => theme_path = Some(PathBuf::from(v)),
                None => {
                    eprintln!("Error: --theme needs a CSS file.");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            value if kind.is_none() => match value.parse() {
                Ok(k) => kind = Some(k),
                Err(e) => {
                    eprintln!("Error: {e}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
            },
            path if input_path.is_none() && !sample => input_path = Some(PathBuf::from(path)),
            path if output_path.is_none() => output_path = Some(PathBuf::from(path)),
            path => {
                eprintln!("Unexpected argument: {path}");
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    // `--sample` may come after the positionals; the first path is then the output.
    if sample && output_path.is_none() {
        output_path = input_path.take();
    }

    let Some(kind) = kind else {
        eprintln!("Error: no document kind specified.");
        print_usage(&args[0]);
        process::exit(1);
    };

    let theme = match theme_path {
        Some(path) => match Theme::from_file(&path) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("cannot load theme '{}': {e}", path.display());
                eprintln!("Error reading theme '{}': {e}", path.display());
                process::exit(1);
            }
        },
        None => Theme::default(),
    };
    let config = RenderConfig::with_theme(theme);

    let data = if sample {
        DocumentData::sample(kind)
    } else {
        let Some(input) = input_path.as_ref() else {
            eprintln!("Error: no data file specified (or pass --sample).");
            print_usage(&args[0]);
            process::exit(1);
        };
        let json = match fs::read_to_string(input) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading '{}': {e}", input.display());
                process::exit(1);
            }
        };
        let parsed = serde_json::from_str::<serde_json::Value>(&json)
            .map_err(ForgeError::from)
            .and_then(|value| DocumentData::from_value(kind, value));
        match parsed {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error in '{}': {e}", input.display());
                process::exit(1);
            }
        }
    };

    let doc = data.render(&config);

    if preview {
        println!("{}", text_outline(&doc.html));
    }

    if print {
        // Silently does nothing when no browser is available.
        print_document(&mut BrowserPrintHost::default(), &doc);
    }

    // Preview and print replace the default download unless an output is named.
    if (preview || print) && output_path.is_none() {
        return;
    }

    // Default output: same directory + same stem as input, but with .html
    let output = output_path.unwrap_or_else(|| match &input_path {
        Some(input) => {
            let mut o = input.clone();
            o.set_extension("html");
            o
        }
        None => PathBuf::from(data.suggested_filename()),
    });

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Some(filename) = output.file_name().and_then(|n| n.to_str()) else {
        eprintln!("Error: invalid output path '{}'", output.display());
        process::exit(1);
    };

    let mut downloads = DirectoryDownloads::new(dir);
    if let Err(e) = download_as_file(&mut downloads, &doc, filename) {
        eprintln!("Error writing '{}': {e}", output.display());
        process::exit(1);
    }
    eprintln!(
        "Wrote '{}' ({} bytes): {}",
        output.display(),
        doc.html.len(),
        doc.title
    );
}

fn print_usage(prog: &str) {
    eprintln!("docforge – render financial documents as printable HTML");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <kind> <data.json> [output.html] [--theme style.css] [--print] [--preview]");
    eprintln!("  {prog} <kind> --sample [output.html]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <kind>         invoice, quote, bill, credit-note, statement or payslip");
    eprintln!("  <data.json>    Document data (camelCase JSON)");
    eprintln!("  [output.html]  Output path  (default: same stem as input with .html)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --theme, -t    Use this style sheet instead of the built-in one");
    eprintln!("  --print, -p    Open the document in the browser and print it");
    eprintln!("  --preview      Print a plain-text outline to stdout");
    eprintln!("  --sample, -s   Render built-in sample data instead of a data file");
    eprintln!("  --help         Print this message");
}
