use depscope_render::{ExploreOptions, SvgDocument, ViewerConfig};
use serde::Serialize;
use std::io::{Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Render(depscope_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<depscope_render::Error> for CliError {
    fn from(value: depscope_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Html,
    Svg,
    Index,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    select: Option<String>,
    title: Option<String>,
    config: Option<String>,
    no_pan_zoom: bool,
    strict: bool,
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexOut<'a> {
    node_count: usize,
    edge_count: usize,
    index: &'a depscope_core::AdjacencyIndex,
}

fn usage() -> &'static str {
    "depscope\n\
\n\
USAGE:\n\
  depscope [html] [--select <name>] [--title <text>] [--config <path>] [--no-pan-zoom] [--strict] [--out <path>] [<path>|-]\n\
  depscope svg [--select <name>] [--config <path>] [--strict] [--out <path>] [<path>|-]\n\
  depscope index [--pretty] [--strict] [<path>|-]\n\
\n\
NOTES:\n\
  - Input is Graphviz SVG (e.g. `dot -Tsvg`). If <path> is omitted or '-', it is read from stdin.\n\
  - html prints a standalone explorer page; svg prints the input SVG with the explorer injected.\n\
  - index prints the adjacency index (nodes, in/out edges, tops, bottoms) as JSON.\n\
  - --select preselects a node; --strict fails on edge titles that do not name two nodes.\n\
  - Set DEPSCOPE_LOG (e.g. `debug`) to control diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "html" => args.command = Command::Html,
            "svg" => args.command = Command::Svg,
            "index" => args.command = Command::Index,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--no-pan-zoom" => args.no_pan_zoom = true,
            "--select" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.select = Some(name.clone());
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(args: &Args) -> Result<ViewerConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => ViewerConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ViewerConfig::default(),
    };
    if let Some(title) = &args.title {
        config.title = Some(title.clone());
    }
    if args.no_pan_zoom {
        config.pan_zoom = false;
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let text = read_input(args.input.as_deref())?;
    tracing::debug!(command = ?args.command, bytes = text.len(), "read input");
    let doc = SvgDocument::parse(&text)?;
    let explorer = depscope_render::explore(
        &doc,
        ExploreOptions {
            select: args.select.as_deref(),
            strict: args.strict,
        },
    )?;

    // Everything is rendered in memory first so a failure never leaves partial output.
    let rendered = match args.command {
        Command::Html => depscope_render::render_html(&doc, &explorer, &config)?,
        Command::Svg => depscope_render::inject_svg(&doc, &explorer, &config)?,
        Command::Index => {
            let index = explorer.index();
            let out = IndexOut {
                node_count: index.node_count(),
                edge_count: index.edge_count(),
                index,
            };
            let mut json = if args.pretty {
                serde_json::to_string_pretty(&out)?
            } else {
                serde_json::to_string(&out)?
            };
            json.push('\n');
            json
        }
    };
    write_text(&rendered, args.out.as_deref())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DEPSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
