use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use clipframe::export::encode::{OutputFormat, encode_frame};
use clipframe::{Canvas, ColorDef, Cropper, CropperOpts, ImageInput};

#[derive(Parser, Debug)]
#[command(name = "clipframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop an image and write the encoded crop region.
    Export(ExportArgs),
    /// Write what the viewport shows (image plus mask) as a PNG.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct PlacementArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON options file (`CropperOpts`, camelCase keys). Flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Viewport size, `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size)]
    viewport: Option<(u32, u32)>,

    /// Crop shape: `rect` or `circle`.
    #[arg(long)]
    shape: Option<String>,

    #[arg(long)]
    target_width: Option<f64>,

    #[arg(long)]
    target_height: Option<f64>,

    /// Circle radius.
    #[arg(long)]
    target_r: Option<f64>,

    /// Mask color, e.g. `rgba(0,0,0,.5)` or `#00000080`.
    #[arg(long, value_parser = parse_color)]
    mask_color: Option<ColorDef>,

    /// Zoom by this many pixels per side; repeatable, applied in order before any pan.
    #[arg(long, allow_negative_numbers = true)]
    zoom: Vec<f64>,

    /// Pan by `DX,DY` viewport pixels; repeatable, applied in order.
    #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
    pan: Vec<(f64, f64)>,

    /// Print the final placement as JSON.
    #[arg(long)]
    dump_transform: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    placement: PlacementArgs,

    /// Output MIME type (`image/png`, `image/jpeg`, `image/webp`). Unknown types fall back to PNG.
    #[arg(long)]
    format: Option<String>,

    /// Lossy quality in `[0, 1]`.
    #[arg(long)]
    quality: Option<f64>,

    /// Output file.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    placement: PlacementArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_env("CLIPFRAME_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Ok((w, h))
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{s}'"))?;
    let a = a.trim().parse().map_err(|e| format!("dx: {e}"))?;
    let b = b.trim().parse().map_err(|e| format!("dy: {e}"))?;
    Ok((a, b))
}

fn parse_color(s: &str) -> Result<ColorDef, String> {
    s.parse()
}

fn read_opts(path: &Path) -> anyhow::Result<CropperOpts> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    Ok(CropperOpts::from_json_str(&s)?)
}

fn build_cropper(args: &PlacementArgs) -> anyhow::Result<Cropper> {
    let mut opts = match &args.options {
        Some(path) => read_opts(path)?,
        None => CropperOpts::default(),
    };
    if let Some((w, h)) = args.viewport {
        opts.viewport = Some(Canvas::new(w, h)?);
    }
    if let Some(shape) = &args.shape {
        opts.target_shape = Some(shape.clone());
    }
    opts.target_width = args.target_width.or(opts.target_width);
    opts.target_height = args.target_height.or(opts.target_height);
    opts.target_r = args.target_r.or(opts.target_r);
    if let Some(color) = args.mask_color {
        opts.mask_color = Some(color);
    }

    let mut cropper = Cropper::new(&opts)?;

    let input = ImageInput::from_path(&args.in_path)?;
    if !input.is_allowed() {
        anyhow::bail!(
            "'{}' has unsupported image type '{}'",
            args.in_path.display(),
            input.mime()
        );
    }
    cropper.incoming_image(Some(input));
    cropper.wait_for_decodes();
    if !cropper.is_painting_finished() {
        anyhow::bail!("failed to decode '{}'", args.in_path.display());
    }

    for &delta in &args.zoom {
        cropper.scaling(delta);
    }
    for &(dx, dy) in &args.pan {
        cropper.moving(dx, dy);
    }

    if args.dump_transform {
        println!("{}", serde_json::to_string_pretty(&cropper.transform())?);
    }
    Ok(cropper)
}

fn write_out(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cropper = build_cropper(&args.placement)?;
    let encoded = cropper.export(args.format.as_deref(), args.quality)?;
    write_out(&args.out, &encoded.bytes)?;
    tracing::info!(
        out = %args.out.display(),
        mime = encoded.format.mime(),
        width = encoded.width,
        height = encoded.height,
        "wrote export"
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cropper = build_cropper(&args.placement)?;
    let encoded = encode_frame(&cropper.viewport_frame(), OutputFormat::Png, None)?;
    write_out(&args.out, &encoded.bytes)?;
    tracing::info!(out = %args.out.display(), "wrote preview");
    Ok(())
}
