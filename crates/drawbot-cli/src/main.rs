use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use drawbot::ParseError;

const USAGE: &str = "Usage: drawbot [PROGRAM_FILE|-] [--json] [--error-log PATH]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    /// `None` reads stdin
    program: Option<PathBuf>,
    json: bool,
    error_log: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--error-log" => {
                let Some(path) = args.next() else {
                    bail!("--error-log needs a path\n{USAGE}");
                };
                parsed.error_log = Some(path.into());
            }
            "-h" | "--help" => bail!("{USAGE}"),
            "-" if parsed.program.is_none() => {}
            flag if flag.starts_with("--") => bail!("unknown option: {flag}\n{USAGE}"),
            path if parsed.program.is_none() => parsed.program = Some(path.into()),
            extra => bail!("unexpected argument: {extra}\n{USAGE}"),
        }
    }
    Ok(parsed)
}

/// One error-log record: the message, then the program that caused it
fn error_record(error: &ParseError, source: &str) -> String {
    format!("[ERROR] {error}\nCommands: {source}\n\n")
}

fn append_error_log(path: &Path, error: &ParseError, source: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening error log {}", path.display()))?;
    file.write_all(error_record(error, source).as_bytes())
        .with_context(|| format!("writing error log {}", path.display()))?;
    Ok(())
}

fn read_program(path: Option<&Path>) -> anyhow::Result<(String, String)> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("reading program from stdin")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let (name, source) = read_program(args.program.as_deref())?;

    let drawing = match drawbot::draw(&source) {
        Ok(drawing) => drawing,
        Err(error) => {
            tracing::info!(%error, program = %name, "program rejected");
            if let Some(log) = &args.error_log {
                append_error_log(log, &error, &source)?;
            }
            let report = drawbot::SourceContext::new(name, source).report(error);
            eprintln!("{report:?}");
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::debug!(segments = drawing.segments.len(), "program drawn");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &drawing).context("writing JSON")?;
        writeln!(out)?;
    } else {
        for segment in &drawing.segments {
            writeln!(out, "{segment}")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the drawing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_reads_stdin() {
        assert_eq!(args(&[]).unwrap(), Args::default());
        assert_eq!(args(&["-"]).unwrap(), Args::default());
    }

    #[test]
    fn file_and_flags() {
        let parsed = args(&["--json", "square.drawbot", "--error-log", "errorLog.txt"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                program: Some("square.drawbot".into()),
                json: true,
                error_log: Some("errorLog.txt".into()),
            }
        );
    }

    #[test]
    fn bad_arguments() {
        assert!(args(&["--error-log"]).is_err());
        assert!(args(&["--svg"]).is_err());
        assert!(args(&["a.drawbot", "b.drawbot"]).is_err());
    }

    #[test]
    fn error_record_format() {
        let error = drawbot::compile("F 10 Z 20").unwrap_err();
        assert_eq!(
            error_record(&error, "F 10 Z 20"),
            "[ERROR] Unknown command: Z\nCommands: F 10 Z 20\n\n"
        );
    }

    #[test]
    fn error_log_appends() {
        let path = std::env::temp_dir().join(format!("drawbot-errlog-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let error = drawbot::compile("]").unwrap_err();
        append_error_log(&path, &error, "]").unwrap();
        append_error_log(&path, &error, "]").unwrap();

        let log = std::fs::read_to_string(&path).unwrap();
        assert_eq!(log, "[ERROR] ']' without matching '['\nCommands: ]\n\n".repeat(2));
        std::fs::remove_file(&path).unwrap();
    }
}
