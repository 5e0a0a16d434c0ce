use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palette_table::models::DEFAULT_COLORS_FILE;
use palette_table::rendering::default_output_dir;
use palette_table::{verify, PaletteGroups};

#[derive(Parser)]
#[command(name = "gen-img")]
#[command(about = "Generate the 1px 256-color table test fixtures (PNG and lossy JPEG)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Color source file (YAML with :xterm256, :xtermGreyscale and :xterm16 lists)
    #[arg(long, global = true)]
    colors: Option<PathBuf>,

    /// Use the built-in xterm palette instead of reading a color file
    #[arg(long, global = true, conflicts_with = "colors")]
    builtin: bool,

    /// Directory the fixtures are written to (defaults to test/ in the crate root)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write both fixtures (the default)
    Generate,
    /// Check existing fixtures against the color source
    Verify,
    /// Print the built-in xterm palette in color file format
    DumpColors,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palette_table=info,gen_img=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let output_dir = cli.output_dir.clone().unwrap_or_else(default_output_dir);

    match cli.command {
        None | Some(Commands::Generate) => {
            let groups = load_groups(&cli)?;
            let paths = palette_table::generate(&groups, &output_dir)
                .with_context(|| format!("Failed to write fixtures to {}", output_dir.display()))?;
            println!("Wrote {}", paths.png.display());
            println!("Wrote {}", paths.jpeg.display());
        }
        Some(Commands::Verify) => {
            let groups = load_groups(&cli)?;
            let report = verify::check_fixtures(&output_dir, &groups)
                .with_context(|| format!("Fixtures in {} failed", output_dir.display()))?;
            println!("PNG exact pixels:         {}", report.png_exact);
            println!("JPEG pixels equal to PNG: {}", report.jpeg_exact);
            println!("JPEG nearest-color hits:  {}", report.jpeg_nearest_hits);
            println!("JPEG max channel drift:   {}", report.max_jpeg_drift);
        }
        Some(Commands::DumpColors) => {
            print!("{}", PaletteGroups::xterm().to_yaml_string()?);
        }
    }

    Ok(())
}

fn load_groups(cli: &Cli) -> anyhow::Result<PaletteGroups> {
    if cli.builtin {
        tracing::info!("Using built-in xterm palette");
        return Ok(PaletteGroups::xterm());
    }

    let path = cli
        .colors
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COLORS_FILE));
    PaletteGroups::load(&path).with_context(|| format!("Failed to load {}", path.display()))
}
