use std::{
    io::Read as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cellglyph::{
    BoardDoc, CellRenderer, Color, GlyphSet, Point, RasterSurface, RenderSettings, Symbol,
    board_size_px, cell_origin,
    leaderboard::{ApiRequest, MemoryStore, handle},
};

#[derive(Parser, Debug)]
#[command(name = "cellglyph", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a board document as a PNG.
    Board(BoardArgs),
    /// Render every symbol side by side as a PNG.
    Sheet(SheetArgs),
    /// Answer one leaderboard request read from stdin.
    Api(ApiArgs),
}

#[derive(Parser, Debug)]
struct BoardArgs {
    /// Input board JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Glyph set JSON replacing the built-in tables.
    #[arg(long)]
    glyphs: Option<PathBuf>,

    /// Stroke width in pixels (default: $CELLGLYPH_STROKE_WIDTH or 1).
    #[arg(long)]
    stroke_width: Option<f64>,
}

#[derive(Parser, Debug)]
struct SheetArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 2.0)]
    scale: f64,

    /// Stroke color, `rgba(r, g, b, a)` or `#RRGGBB[AA]`.
    #[arg(long, default_value = "rgba(20, 20, 20, 1)")]
    color: Color,

    #[arg(long)]
    glyphs: Option<PathBuf>,

    #[arg(long)]
    stroke_width: Option<f64>,
}

#[derive(Parser, Debug)]
struct ApiArgs {
    /// Store JSON file; created on first write.
    #[arg(long)]
    store: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Board(args) => cmd_board(args),
        Command::Sheet(args) => cmd_sheet(args),
        Command::Api(args) => cmd_api(args),
    }
}

fn load_renderer(glyphs: Option<&Path>) -> anyhow::Result<CellRenderer> {
    let Some(path) = glyphs else {
        return Ok(CellRenderer::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read glyph set '{}'", path.display()))?;
    let set = GlyphSet::from_json(&json)
        .with_context(|| format!("load glyph set '{}'", path.display()))?;
    Ok(CellRenderer::new(set))
}

fn render_settings(stroke_width: Option<f64>) -> anyhow::Result<RenderSettings> {
    let mut settings = RenderSettings::from_env();
    if let Some(w) = stroke_width {
        settings.stroke_width = w;
    }
    settings.validate()?;
    Ok(settings)
}

fn cmd_board(args: BoardArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("open board '{}'", args.in_path.display()))?;
    let doc = BoardDoc::from_json(&json).with_context(|| "parse board JSON")?;

    let renderer = load_renderer(args.glyphs.as_deref())?;
    let settings = render_settings(args.stroke_width)?;

    let frame = cellglyph::render_board(&doc, &renderer, &settings)?;
    frame.save_png(&args.out)?;

    tracing::info!(
        width = frame.width,
        height = frame.height,
        "wrote {}",
        args.out.display()
    );
    Ok(())
}

fn cmd_sheet(args: SheetArgs) -> anyhow::Result<()> {
    if !args.scale.is_finite() || args.scale <= 0.0 {
        anyhow::bail!("--scale must be a positive number, got {}", args.scale);
    }

    let renderer = load_renderer(args.glyphs.as_deref())?;
    let settings = render_settings(args.stroke_width)?;

    // Hidden cell first, then 1..=8 and the mine.
    let symbols = Symbol::all();
    let cols = u32::try_from(symbols.len() + 1)?;
    let (w, h) = board_size_px(cols, 1, args.scale);
    let mut surface = RasterSurface::new(w, h, &settings)?;

    renderer.draw_undiscovered(&mut surface, Point::ORIGIN, args.color, args.scale);
    for (col, symbol) in (1u32..).zip(symbols) {
        renderer.draw_symbol(
            &mut surface,
            cell_origin(col, 0, args.scale),
            symbol,
            args.color,
            args.scale,
        );
    }

    let frame = surface.finish();
    frame.save_png(&args.out)?;
    tracing::info!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_api(args: ApiArgs) -> anyhow::Result<()> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("read request from stdin")?;

    let request: ApiRequest = serde_json::from_str(&body).context("parse request JSON")?;
    let mutating = request.is_mutating();

    let mut store = MemoryStore::load(&args.store)?;
    let response = handle(&mut store, request)?;
    if mutating {
        store.save(&args.store)?;
    }

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
