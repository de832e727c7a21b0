use std::path::PathBuf;
use std::str::FromStr as _;
use std::time::Duration;

use anyhow::Context as _;
use brayns::model::{GenericLoader, Loader as _};
use brayns::{BlockingInstance, Connector, Resolution, Snapshot};
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "brayns", version)]
struct Cli {
    /// Service address (`host:port` or a full `ws://` / `wss://` URL).
    #[arg(long, global = true, default_value = "localhost:5000")]
    uri: String,

    /// Connect with `wss://` (requires the `tls` feature).
    #[arg(long, global = true, default_value_t = false)]
    secure: bool,

    /// Connection attempts while the service is unavailable (0 retries forever).
    #[arg(long, global = true, default_value_t = 1)]
    max_attempts: u32,

    /// Delay between connection attempts.
    #[arg(long, global = true, default_value_t = 100)]
    attempt_period_ms: u64,

    /// Client log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the service version.
    Version(VersionArgs),
    /// List the methods of the service.
    Methods,
    /// Print the description of a method.
    Schema(SchemaArgs),
    /// Send a raw JSON-RPC request and print its result.
    Request(RequestArgs),
    /// Print the models of the scene.
    Scene,
    /// Render a snapshot into a local PNG or JPEG file.
    Snapshot(SnapshotArgs),
    /// Load a model from a file.
    Load(LoadArgs),
}

#[derive(Parser, Debug)]
struct VersionArgs {
    /// Fail unless the service runs the same release as this client.
    #[arg(long, default_value_t = false)]
    check: bool,
}

#[derive(Parser, Debug)]
struct SchemaArgs {
    /// Method name.
    method: String,
}

#[derive(Parser, Debug)]
struct RequestArgs {
    /// Method name.
    method: String,

    /// Params as JSON text.
    #[arg(long)]
    params: Option<String>,

    /// File sent as binary payload.
    #[arg(long)]
    binary_in: Option<PathBuf>,

    /// Where to write the binary payload of the reply.
    #[arg(long)]
    binary_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Output path; the extension selects the format.
    #[arg(long)]
    out: PathBuf,

    /// Image width (needs `--height`).
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Image height (needs `--width`).
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Simulation frame.
    #[arg(long)]
    frame: Option<u32>,
}

#[derive(Parser, Debug)]
struct LoadArgs {
    /// File path (on the service host unless `--upload`).
    path: PathBuf,

    /// Loader name.
    #[arg(long, default_value = "mesh")]
    loader: String,

    /// Loader properties as JSON text.
    #[arg(long)]
    properties: Option<String>,

    /// Send the local file content instead of a remote path.
    #[arg(long, default_value_t = false)]
    upload: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    let client = BlockingInstance::connect(&connector(&cli))?;
    match cli.cmd {
        Command::Version(args) => cmd_version(&client, args),
        Command::Methods => cmd_methods(&client),
        Command::Schema(args) => cmd_schema(&client, args),
        Command::Request(args) => cmd_request(&client, args),
        Command::Scene => cmd_scene(&client),
        Command::Snapshot(args) => cmd_snapshot(&client, args),
        Command::Load(args) => cmd_load(&client, args),
    }?;
    client.disconnect()?;
    Ok(())
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let level = tracing::Level::from_str(level)
        .map_err(|_| anyhow::anyhow!("invalid log level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn connector(cli: &Cli) -> Connector {
    Connector {
        uri: cli.uri.clone(),
        secure: cli.secure,
        max_attempts: (cli.max_attempts > 0).then_some(cli.max_attempts),
        attempt_period: Duration::from_millis(cli.attempt_period_ms),
    }
}

fn parse_json(text: Option<&str>, what: &str) -> anyhow::Result<Value> {
    match text {
        Some(text) => serde_json::from_str(text).with_context(|| format!("parse {what} as JSON")),
        None => Ok(Value::Null),
    }
}

fn cmd_version(client: &BlockingInstance, args: VersionArgs) -> anyhow::Result<()> {
    let version = if args.check {
        client.block_on(brayns::check_version(client.instance()))?
    } else {
        client.block_on(brayns::get_version(client.instance()))?
    };
    println!("{} ({})", version.tag(), version.revision);
    Ok(())
}

fn cmd_methods(client: &BlockingInstance) -> anyhow::Result<()> {
    for method in client.block_on(brayns::entrypoint::get_methods(client.instance()))? {
        println!("{method}");
    }
    Ok(())
}

fn cmd_schema(client: &BlockingInstance, args: SchemaArgs) -> anyhow::Result<()> {
    let entrypoint =
        client.block_on(brayns::entrypoint::get_entrypoint(client.instance(), &args.method))?;
    println!("{}", serde_json::to_string_pretty(&entrypoint)?);
    Ok(())
}

fn cmd_request(client: &BlockingInstance, args: RequestArgs) -> anyhow::Result<()> {
    let params = parse_json(args.params.as_deref(), "--params")?;
    let binary = match &args.binary_in {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?
        }
        None => Vec::new(),
    };
    let mut task = client.task(&args.method, params, binary)?;
    let reply = client.block_on(async move {
        while let Some(progress) = task.next_progress().await {
            eprintln!("[{:>3.0}%] {}", progress.amount * 100.0, progress.operation);
        }
        task.wait_for_reply().await
    })?;
    println!("{}", serde_json::to_string_pretty(&reply.result)?);
    if let Some(out) = args.binary_out {
        std::fs::write(&out, &reply.binary)
            .with_context(|| format!("write '{}'", out.display()))?;
        eprintln!("wrote {} bytes to {}", reply.binary.len(), out.display());
    }
    Ok(())
}

fn cmd_scene(client: &BlockingInstance) -> anyhow::Result<()> {
    let scene = client.block_on(brayns::model::get_scene(client.instance()))?;
    let b = scene.bounds;
    println!(
        "bounds [{}, {}, {}] -> [{}, {}, {}]",
        b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
    );
    for model in &scene.models {
        let hidden = if model.visible { "" } else { " (hidden)" };
        println!("{:>5}  {}{hidden}", model.id, model.model_type);
    }
    Ok(())
}

fn cmd_snapshot(client: &BlockingInstance, args: SnapshotArgs) -> anyhow::Result<()> {
    let resolution = match (args.width, args.height) {
        (Some(width), Some(height)) => Some(Resolution::new(width, height)?),
        _ => None,
    };
    let snapshot = Snapshot {
        resolution,
        frame: args.frame,
        ..Snapshot::default()
    };
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    client.block_on(snapshot.save(client.instance(), &args.out))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_load(client: &BlockingInstance, args: LoadArgs) -> anyhow::Result<()> {
    let loader = GenericLoader {
        name: args.loader,
        properties: match args.properties.as_deref() {
            Some(text) => parse_json(Some(text), "--properties")?,
            None => serde_json::json!({}),
        },
    };
    let models = if args.upload {
        let data = std::fs::read(&args.path)
            .with_context(|| format!("read '{}'", args.path.display()))?;
        let format = args
            .path
            .extension()
            .and_then(|e| e.to_str())
            .context("uploaded file needs an extension")?;
        client.block_on(brayns::model::upload(client.instance(), format, data, &loader))?
    } else {
        client.block_on(brayns::model::load(client.instance(), &args.path, &loader))?
    };
    for model in models {
        println!("{:>5}  {}  ({} loader)", model.id, model.model_type, loader.name());
    }
    Ok(())
}
