use std::env;
use std::fs;
use std::path::Path;
use std::process;
use yarnspinner_markup::styles::style_element;
use yarnspinner_markup::{MarkupError, PreviewOptions, PreviewSession};

fn print_usage() {
    eprintln!("Usage: yarn-preview [--options <options.yaml>] [--styles] <node.yarn>...");
    eprintln!();
    eprintln!("Renders each node body to preview HTML on stdout.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  yarn-preview intro.yarn");
    eprintln!("  yarn-preview --options preview.yaml --styles *.yarn");
}

fn main() {
    // Library warnings (bad speaker colors, options) go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .with_target(false)
        .try_init();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut options = PreviewOptions::default();
    let mut with_styles = false;
    let mut files: Vec<String> = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--options" => {
                let Some(path) = iter.next() else {
                    print_usage();
                    process::exit(1);
                };
                options = match PreviewOptions::load(Path::new(&path)) {
                    Ok(options) => options,
                    Err(e) => {
                        eprintln!("✗ {}:", path);
                        print_error(&e);
                        process::exit(1);
                    }
                };
            }
            "--styles" => with_styles = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            _ => files.push(arg),
        }
    }

    if files.is_empty() {
        print_usage();
        process::exit(1);
    }

    if with_styles {
        println!("{}", style_element());
    }

    // One session for all files so a speaker keeps its color across nodes.
    let mut session = PreviewSession::new(options);
    let mut exit_code = 0;

    for file_path in files {
        match render_file(&mut session, &file_path) {
            Ok(html) => {
                println!("<!-- {} -->", file_path);
                println!("{}", html);
            }
            Err(e) => {
                eprintln!("✗ {} could not be rendered:", file_path);
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn render_file(session: &mut PreviewSession, path: &str) -> Result<String, MarkupError> {
    let content = fs::read_to_string(path).map_err(|e| MarkupError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    Ok(session.render_preview_block(&content))
}

fn print_error(error: &MarkupError) {
    match error {
        MarkupError::Io { path, message } => {
            eprintln!("  Could not read '{}':", path);
            eprintln!("    {}", message);
        }
        MarkupError::Options(msg) => {
            eprintln!("  Invalid preview options:");
            eprintln!("    {}", msg);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
