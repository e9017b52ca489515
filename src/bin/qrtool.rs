use clap::{Args, Parser, Subcommand, ValueEnum};
use rounded_qr::{
    ECLevel, EncodeOptions, MaskPattern, ModuleGrid, PathCommand, PathOptions, SvgPathData,
    Version, encode_with, read_grid, replay, synthesize_path,
};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "Rounded QR command line tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the module grid as text
    Grid {
        #[command(flatten)]
        input: EncodeArgs,
    },
    /// Print the rounded outline as commands or SVG path data
    Path {
        #[command(flatten)]
        input: EncodeArgs,
        #[arg(long, default_value_t = 256.0)]
        width: f64,
        #[arg(long, default_value_t = 256.0)]
        height: f64,
        /// Convex corner radius in modules (0 to 0.5)
        #[arg(long)]
        corner_radius: Option<f64>,
        /// Concave corner radius in modules (0 to 0.5)
        #[arg(long)]
        concave_radius: Option<f64>,
        /// Emit SVG path data instead of one command per line
        #[arg(long)]
        svg: bool,
    },
    /// Encode, read the grid back and compare payloads
    Verify {
        #[command(flatten)]
        input: EncodeArgs,
    },
}

#[derive(Args)]
struct EncodeArgs {
    /// Text payload
    text: String,
    #[arg(long, value_enum, default_value_t = Level::M)]
    level: Level,
    /// Smallest version to use (1-40)
    #[arg(long)]
    min_version: Option<u8>,
    /// Largest version to use (1-40)
    #[arg(long)]
    max_version: Option<u8>,
    /// Fixed mask pattern (0-7) instead of the penalty search
    #[arg(long)]
    mask: Option<u8>,
    /// Raise the level while the data still fits
    #[arg(long)]
    boost: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

impl EncodeArgs {
    fn options(&self) -> Result<EncodeOptions, String> {
        let version = |n: Option<u8>, default: Version| match n {
            None => Ok(default),
            Some(n) => Version::new(n).ok_or_else(|| format!("version {n} is outside 1-40")),
        };
        let mut options = EncodeOptions::new(self.level.into())
            .with_version_range(
                version(self.min_version, Version::MIN)?,
                version(self.max_version, Version::MAX)?,
            )
            .with_boost_level(self.boost);
        if let Some(mask) = self.mask {
            if mask > 7 {
                return Err(format!("mask {mask} is outside 0-7"));
            }
            options = options.with_mask(MaskPattern::from_bits(mask));
        }
        Ok(options)
    }

    fn encode(&self) -> Result<ModuleGrid, String> {
        let options = self.options()?;
        encode_with(self.text.as_bytes(), &options).map_err(|err| err.to_string())
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Grid { input } => grid_cmd(&input),
        Command::Path {
            input,
            width,
            height,
            corner_radius,
            concave_radius,
            svg,
        } => {
            let defaults = PathOptions::default();
            let options = PathOptions::new(
                corner_radius.unwrap_or(defaults.corner_radius),
                concave_radius.unwrap_or(defaults.concave_radius),
            );
            path_cmd(&input, width, height, &options, svg)
        }
        Command::Verify { input } => verify_cmd(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn grid_cmd(input: &EncodeArgs) -> Result<(), String> {
    let grid = input.encode()?;
    println!(
        "Version {} ({}x{}), level {} (~{}% recovery), mask {}, {} dark modules",
        grid.version(),
        grid.size(),
        grid.size(),
        grid.ec_level(),
        grid.ec_level().recovery_percent(),
        grid.mask_pattern().bits(),
        grid.dark_count()
    );
    print!("{}", grid);
    Ok(())
}

fn path_cmd(
    input: &EncodeArgs,
    width: f64,
    height: f64,
    options: &PathOptions,
    svg: bool,
) -> Result<(), String> {
    let grid = input.encode()?;
    let commands = synthesize_path(&grid, width, height, options);

    if svg {
        let mut data = SvgPathData::new();
        replay(&commands, &mut data);
        println!("{}", data.as_str());
        return Ok(());
    }

    for command in &commands {
        match command {
            PathCommand::MoveTo(p) => println!("M {:.3} {:.3}", p.x, p.y),
            PathCommand::LineTo(p) => println!("L {:.3} {:.3}", p.x, p.y),
            PathCommand::ArcTo(arc) => println!(
                "A c=({:.3}, {:.3}) r={:.3} {:.4}->{:.4} {}",
                arc.center.x,
                arc.center.y,
                arc.radius,
                arc.start_angle,
                arc.end_angle,
                if arc.clockwise { "cw" } else { "ccw" }
            ),
            PathCommand::Close => println!("Z"),
        }
    }
    let subpaths = commands
        .iter()
        .filter(|c| matches!(c, PathCommand::MoveTo(_)))
        .count();
    println!("{} commands, {} subpaths", commands.len(), subpaths);
    Ok(())
}

fn verify_cmd(input: &EncodeArgs) -> Result<(), String> {
    let start = Instant::now();
    let grid = input.encode()?;
    let encoded_in = start.elapsed();

    let start = Instant::now();
    let decoded = read_grid(grid.matrix()).map_err(|err| err.to_string())?;
    let read_in = start.elapsed();

    println!(
        "Encoded version {} level {} mask {} in {:.2?}; read back in {:.2?}",
        grid.version(),
        grid.ec_level(),
        grid.mask_pattern().bits(),
        encoded_in,
        read_in
    );
    if decoded.data != input.text.as_bytes() {
        return Err(format!("payload mismatch: read {:?}", decoded.text()));
    }
    println!("OK: {:?}", decoded.text());
    Ok(())
}
