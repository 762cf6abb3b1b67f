use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use squiggle_io::{
    DEFAULT_INDICES_FILE, DEFAULT_VERTICES_FILE, ExportMode, ExportOptions, export_mesh,
    load_scene, save_scene,
};
use squiggle_scene::{
    DEFAULT_OBJECT_NAME, Mesh, MeshBuilder, PATH_COLOR_ATTRIBUTE, POSITION_ATTRIBUTE, Scene,
    SceneObject,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "squiggle")]
#[command(about = "Export evaluated mesh attributes to squiggle text files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Export(ExportArgs),
    Inspect(InspectArgs),
    Generate {
        #[command(subcommand)]
        command: GenerateCommand,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Vertex,
    Polygon,
}

impl From<Mode> for ExportMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Vertex => ExportMode::VertexIndexed,
            Mode::Polygon => ExportMode::PolygonIndexed,
        }
    }
}

#[derive(Args)]
struct ExportArgs {
    #[arg(long)]
    scene: PathBuf,
    #[arg(long, default_value = DEFAULT_OBJECT_NAME)]
    object: String,
    #[arg(long, value_enum, default_value_t = Mode::Vertex)]
    mode: Mode,
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_VERTICES_FILE)]
    vertices: PathBuf,
    #[arg(long, default_value = DEFAULT_INDICES_FILE)]
    indices: PathBuf,
    #[arg(long = "position-attr", default_value = POSITION_ATTRIBUTE)]
    position_attribute: String,
    #[arg(long = "color-attr", default_value = PATH_COLOR_ATTRIBUTE)]
    color_attribute: String,
    #[arg(long, default_value_t = 0)]
    channel: usize,
}

#[derive(Args)]
struct InspectArgs {
    #[arg(long)]
    scene: PathBuf,
}

#[derive(Subcommand)]
enum GenerateCommand {
    Triangle(TriangleArgs),
    Grid(GridArgs),
    Squiggle(SquiggleArgs),
}

#[derive(Args)]
struct TriangleArgs {
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct GridArgs {
    #[arg(long, default_value_t = 4)]
    columns: u32,
    #[arg(long, default_value_t = 4)]
    rows: u32,
    #[arg(long, default_value_t = 1.0)]
    size: f32,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct SquiggleArgs {
    #[arg(long, default_value_t = 256)]
    segments: u32,
    #[arg(long, default_value_t = 3.0)]
    turns: f32,
    #[arg(long, default_value_t = 1.0)]
    radius: f32,
    #[arg(long, default_value_t = 0.05)]
    width: f32,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    name: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Export(args) => export(args),
        Command::Inspect(args) => inspect(args),
        Command::Generate {
            command: GenerateCommand::Triangle(args),
        } => write_generated(MeshBuilder::triangle(), args.name, args.out),
        Command::Generate {
            command: GenerateCommand::Grid(args),
        } => {
            let mesh = MeshBuilder::grid(args.columns, args.rows, args.size)
                .context("failed to build grid mesh")?;
            write_generated(mesh, args.name, args.out)
        }
        Command::Generate {
            command: GenerateCommand::Squiggle(args),
        } => {
            let mesh = MeshBuilder::squiggle(args.segments, args.turns, args.radius, args.width)
                .context("failed to build squiggle mesh")?;
            write_generated(mesh, args.name, args.out)
        }
    }
}

fn export(args: ExportArgs) -> Result<()> {
    let scene = load_scene(&args.scene)?;
    let options = ExportOptions {
        object: args.object,
        position_attribute: args.position_attribute,
        color_attribute: args.color_attribute,
        color_channel: args.channel,
        mode: args.mode.into(),
        vertices_path: args.out_dir.join(args.vertices),
        indices_path: args.out_dir.join(args.indices),
    };

    let summary = export_mesh(&scene, &options).context("mesh export failed")?;
    info!(
        path = %options.vertices_path.display(),
        lines = summary.vertex_lines,
        "vertex file written"
    );
    if let Some(lines) = summary.index_lines {
        info!(path = %options.indices_path.display(), lines, "index file written");
    }
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let scene = load_scene(&args.scene)?;
    for object in scene.objects() {
        let mesh = object
            .evaluated()
            .with_context(|| format!("evaluate object {}", object.name))?;
        println!(
            "{}: {} vertices, {} polygons, {} corners, {} modifiers",
            object.name,
            mesh.vertex_count,
            mesh.polygons.len(),
            mesh.loop_count(),
            object.modifiers.len()
        );
        for (name, attribute) in &mesh.attributes {
            println!("  {name}: {} x {}", attribute.kind(), attribute.len());
        }
    }
    Ok(())
}

fn write_generated(mesh: Mesh, name: Option<String>, out: PathBuf) -> Result<()> {
    let name = name.unwrap_or_else(|| DEFAULT_OBJECT_NAME.to_string());
    let scene = Scene::new().with_object(SceneObject::new(name, mesh))?;
    save_scene(&scene, &out).context("scene export failed")?;
    info!(path = %out.display(), "scene written");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
