use boxfish::graph::{CellKind, Dir, Graph};
use boxfish::{Charset, LayoutReport, Options};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Boxfish(boxfish::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Boxfish(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<boxfish::Error> for CliError {
    fn from(value: boxfish::Error) -> Self {
        Self::Boxfish(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Ascii,
    BoxArt,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "boxart" | "box-art" | "unicode" => Ok(Self::BoxArt),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    output: Option<String>,
    format: OutputFormat,
    flow: Option<Dir>,
    stats: bool,
}

const USAGE: &str = "\
boxfish - render graph descriptions as ASCII or box art

Usage: boxfish [OPTIONS] [FILE]

Reads FILE (or stdin when FILE is `-` or absent) in either the bracketed
notation ([ A ] -> [ B ]) or the DOT subset (digraph { a -> b }).

Options:
  -f, --format <ascii|boxart|json>   output format (default: ascii)
      --flow <east|south|west|north> override the graph flow direction
  -o, --output <FILE>                write to FILE instead of stdout
      --stats                        print layout score and failures to stderr
  -h, --help                         show this help
  -V, --version                      show the version
";

fn parse_args() -> Result<Option<Args>, CliError> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{USAGE}");
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("boxfish {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "-f" | "--format" => {
                let value = it
                    .next()
                    .ok_or_else(|| CliError::Usage("--format needs a value".into()))?;
                args.format = value
                    .parse()
                    .map_err(|_| CliError::Usage(format!("unknown format `{value}`")))?;
            }
            "--flow" => {
                let value = it
                    .next()
                    .ok_or_else(|| CliError::Usage("--flow needs a value".into()))?;
                args.flow = Some(
                    Dir::from_attr(&value)
                        .ok_or_else(|| CliError::Usage(format!("unknown flow `{value}`")))?,
                );
            }
            "-o" | "--output" => {
                args.output = Some(
                    it.next()
                        .ok_or_else(|| CliError::Usage("--output needs a value".into()))?,
                );
            }
            "--stats" => args.stats = true,
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(format!(
                    "unknown option `{other}` (see --help)"
                )));
            }
            _ => {
                if args.input.is_some() {
                    return Err(CliError::Usage("more than one input file".into()));
                }
                args.input = Some(arg);
            }
        }
    }
    Ok(Some(args))
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

#[derive(Serialize)]
struct NodeDump<'a> {
    name: &'a str,
    label: &'a str,
    rank: Option<i32>,
    pos: Option<(i32, i32)>,
    cx: u16,
    cy: u16,
}

#[derive(Serialize)]
struct EdgeDump<'a> {
    from: &'a str,
    to: &'a str,
    label: Option<&'a str>,
    offset: i32,
    cells: &'a [(i32, i32)],
}

#[derive(Serialize)]
struct CellDump<'a> {
    x: i32,
    y: i32,
    kind: &'static str,
    owner: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cell_type: Option<u16>,
}

#[derive(Serialize)]
struct LayoutDump<'a> {
    nodes: Vec<NodeDump<'a>>,
    edges: Vec<EdgeDump<'a>>,
    cells: Vec<CellDump<'a>>,
    report: &'a LayoutReport,
}

fn dump_json(g: &Graph, report: &LayoutReport) -> Result<String, CliError> {
    let nodes = g
        .nodes()
        .map(|n| NodeDump {
            name: n.name(),
            label: &n.label,
            rank: n.rank,
            pos: n.pos,
            cx: n.cx,
            cy: n.cy,
        })
        .collect();
    let edges = g
        .edges()
        .map(|e| EdgeDump {
            from: g.node(e.from()).name(),
            to: g.node(e.to()).name(),
            label: e.label.as_deref(),
            offset: e.offset,
            cells: &e.cells,
        })
        .collect();
    let cells = g
        .cells
        .sorted()
        .into_iter()
        .map(|c| match c.kind {
            CellKind::Node(id) => CellDump {
                x: c.x,
                y: c.y,
                kind: "node",
                owner: g.node(id).name(),
                cell_type: None,
            },
            CellKind::Edge(id, ty) => CellDump {
                x: c.x,
                y: c.y,
                kind: "edge",
                owner: g.node(g.edge(id).from()).name(),
                cell_type: Some(ty.bits()),
            },
        })
        .collect();
    let dump = LayoutDump {
        nodes,
        edges,
        cells,
        report,
    };
    Ok(serde_json::to_string_pretty(&dump)?)
}

fn run() -> Result<(), CliError> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let text = read_input(args.input.as_deref())?;
    let options = Options {
        charset: match args.format {
            OutputFormat::BoxArt => Charset::BoxArt,
            _ => Charset::Ascii,
        },
        flow: args.flow,
    };

    let (g, report) = boxfish::lay_out(&text, &options)?;
    if args.stats {
        eprintln!(
            "score {} | unplaced {} | unrouted {} | budget spent {}",
            report.score,
            report.unplaced.len(),
            report.unrouted.len(),
            report.budget_spent
        );
    }

    let out = match args.format {
        OutputFormat::Json => dump_json(&g, &report)?,
        _ => boxfish::render(
            &g,
            &boxfish::RenderOptions {
                charset: options.charset,
            },
        ),
    };

    match args.output.as_deref() {
        Some(path) => std::fs::write(path, out)?,
        None => print!("{out}"),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("boxfish: {err}");
        std::process::exit(1);
    }
}
