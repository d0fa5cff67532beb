use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use zoompan::{CameraParams, Frame, MotionClip, PixelFormat, TransformEngine};

#[derive(Parser, Debug)]
#[command(name = "zoompan", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform a still image at one timestamp and write a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence from a still image over a clip duration.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Parameter JSON (camera and optional clip); defaults apply per field.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Presentation timestamp in milliseconds.
    #[arg(long, default_value_t = 0)]
    timestamp_ms: u64,

    /// Output width (defaults to the input width).
    #[arg(long)]
    width: Option<u32>,

    /// Output height (defaults to the input height).
    #[arg(long)]
    height: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Parameter JSON (camera and optional clip).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(long)]
    frames: u32,

    /// Frames per second of the rendered sequence.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output width (defaults to the input width).
    #[arg(long)]
    width: Option<u32>,

    /// Output height (defaults to the input height).
    #[arg(long)]
    height: Option<u32>,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ParamsFile {
    #[serde(default)]
    camera: CameraParams,
    #[serde(default)]
    clip: Option<MotionClip>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn read_params(path: Option<&Path>) -> anyhow::Result<ParamsFile> {
    let Some(path) = path else {
        return Ok(ParamsFile::default());
    };
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let params: ParamsFile = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse params '{}'", path.display()))?;
    Ok(params)
}

fn load_rgba_frame(path: &Path) -> anyhow::Result<Frame> {
    let img = image::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Ok(Frame::from_vec(
        PixelFormat::Rgba,
        w as usize,
        h as usize,
        img.into_raw(),
    )?)
}

fn save_rgba_frame(frame: &Frame, path: &Path) -> anyhow::Result<()> {
    let img = image::RgbaImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.data().to_vec(),
    )
    .context("frame buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

fn build_engine(params: &ParamsFile) -> anyhow::Result<TransformEngine> {
    let engine = match params.clip {
        Some(clip) => TransformEngine::with_clip(params.camera, clip)?,
        None => TransformEngine::new(params.camera)?,
    };
    Ok(engine)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = read_params(args.params.as_deref())?;
    let engine = build_engine(&params)?;
    let src = load_rgba_frame(&args.in_path)?;

    let out_w = args.width.map_or(src.width(), |w| w as usize);
    let out_h = args.height.map_or(src.height(), |h| h as usize);
    let mut dst = Frame::new(PixelFormat::Rgba, out_w, out_h)?;

    engine.transform(
        src.as_ref(),
        &mut dst.as_mut(),
        Duration::from_millis(args.timestamp_ms),
    )?;
    save_rgba_frame(&dst, &args.out)
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frames > 0, "--frames must be positive");
    anyhow::ensure!(args.fps > 0, "--fps must be positive");

    let params = read_params(args.params.as_deref())?;
    let engine = build_engine(&params)?;
    let src = load_rgba_frame(&args.in_path)?;

    let out_w = args.width.map_or(src.width(), |w| w as usize);
    let out_h = args.height.map_or(src.height(), |h| h as usize);
    let mut dst = Frame::new(PixelFormat::Rgba, out_w, out_h)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create '{}'", args.out_dir.display()))?;

    let frame_dur = Duration::from_secs(1) / args.fps;
    for i in 0..args.frames {
        let pts = frame_dur * i;
        engine.transform(src.as_ref(), &mut dst.as_mut(), pts)?;
        let path = args.out_dir.join(format!("frame_{i:05}.png"));
        save_rgba_frame(&dst, &path)?;
    }
    Ok(())
}
