use anyhow::{bail, Context};
use clap::Parser;
use csv2smpl::csv2smpl_core::{
    codec::frame_table::FrameTable,
    common::{
        betas::Betas,
        config::ConversionConfig,
        mapping::{ChannelMapping, EulerOrders},
        metadata::SHAPE_SPACE_DIM,
        types::{EulerOrder, Gender},
    },
    conversions::archive_builder::ArchiveBuilder,
    ConversionError,
};
use csv2smpl::csv2smpl_utils::io::FileType;
use log::{debug, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Converts a CSV of per-frame joint channels (angles in radians) into an AMASS-style SMPL .npz with poses, betas, trans and gender"
)]
struct Args {
    /// Input file. MUST be a csv with one header row and one row per frame.
    #[arg(short, long)]
    input: PathBuf,
    /// Output file. `.npz` is appended if missing.
    #[arg(short, long)]
    output: PathBuf,
    /// Euler order used by every joint without an override
    #[arg(long, default_value = "XYZ", value_parser = parse_euler_order)]
    default_euler_order: EulerOrder,
    /// Per joint Euler order, e.g. `left_knee=ZXY`. Can be repeated.
    #[arg(long = "euler-order", value_name = "JOINT=ORDER")]
    euler_orders: Vec<String>,
    /// Gender label written to the archive: neutral, male or female
    #[arg(long, default_value = "neutral")]
    gender: Gender,
    /// npz holding fitted shape parameters under `betas`
    #[arg(long)]
    betas: Option<PathBuf>,
    /// Number of shape parameters to write
    #[arg(long, default_value_t = SHAPE_SPACE_DIM)]
    num_betas: usize,
    /// Written as `mocap_framerate` when given
    #[arg(long)]
    fps: Option<f64>,
    /// Deflate the npz entries
    #[arg(long)]
    compress: bool,
    /// Fail on angles larger than 2π instead of warning
    #[arg(long)]
    strict_radians: bool,
}

fn parse_euler_order(s: &str) -> Result<EulerOrder, ConversionError> {
    s.parse()
}

fn build_config(args: &Args) -> anyhow::Result<ConversionConfig> {
    let mut euler_orders = EulerOrders::new(args.default_euler_order);
    for spec in &args.euler_orders {
        let (joint, order) = EulerOrders::parse_override(spec)?;
        euler_orders = euler_orders.with_override(joint, order);
    }
    let betas = match &args.betas {
        Some(path) => Betas::new_from_npz(path, args.num_betas).with_context(|| format!("loading betas from {}", path.display()))?,
        None => Betas::new_empty(args.num_betas),
    };
    let mut config = ConversionConfig::new(ChannelMapping::steadyspeed(), euler_orders)
        .with_betas(betas)
        .with_gender(args.gender)
        .strict_radians(args.strict_radians);
    if let Some(fps) = args.fps {
        if !(fps.is_finite() && fps > 0.0) {
            bail!("--fps must be a positive number, got {fps}");
        }
        config = config.with_frame_rate(fps);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let input_path = args.input.as_path();
    if !input_path.exists() {
        return Err(ConversionError::InputNotFound(input_path.to_path_buf()).into());
    }
    if FileType::from_path(input_path) != FileType::Csv {
        warn!("input {} does not have a .csv extension, reading it as csv anyway", input_path.display());
    }

    let config = build_config(&args)?;
    debug!("conversion config: {config:?}");
    debug!("mapped columns: {:?}", config.mapping.referenced_columns());

    println!("- Found csv file at {:?}", input_path);
    let table = FrameTable::from_file(input_path)?;
    let archive = ArchiveBuilder::new(&config)
        .build_from_table(&table)
        .with_context(|| format!("converting {}", input_path.display()))?;
    let written = archive.to_file(&args.output, args.compress)?;
    println!("{}", archive.summary(&written));
    Ok(())
}
