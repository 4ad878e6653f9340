use anyhow::{Result, anyhow};
use cachebench_viz::batch::{self, BatchOptions, ImageFormat};
use cachebench_viz::presets::{self, ChartPreset};
use cachebench_viz::style::ChartStyle;
use cachebench_viz::{storage, viz};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cbviz",
    version,
    about = "Chart array-sum and matrix benchmark results with CPU cache-boundary annotations"
)]
struct Cli {
    /// JSON file replacing the built-in chart presets.
    #[arg(long, global = true)]
    presets: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every chart whose CSV file exists.
    Render(RenderArgs),
    /// Print landmark annotations, region bands and snapped markers as JSON.
    Annotate(AnnotateArgs),
    /// List the available charts.
    Presets,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Png,
    Svg,
}

impl From<OutFormat> for ImageFormat {
    fn from(f: OutFormat) -> Self {
        match f {
            OutFormat::Png => ImageFormat::Png,
            OutFormat::Svg => ImageFormat::Svg,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Directory containing the benchmark CSV files.
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    /// Directory for the chart images.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Image format.
    #[arg(long, value_enum, default_value_t = OutFormat::Png)]
    format: OutFormat,
    /// Style JSON file (missing fields use defaults).
    #[arg(long)]
    style: Option<PathBuf>,
    /// Only render these charts (repeatable).
    #[arg(long)]
    only: Vec<String>,
}

#[derive(Args, Debug)]
struct AnnotateArgs {
    /// Benchmark CSV file.
    #[arg(long)]
    csv: PathBuf,
    /// Chart preset whose landmarks and regions are applied.
    #[arg(long)]
    preset: String,
    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let all = match &cli.presets {
        Some(path) => presets::load_presets(path)?,
        None => presets::builtin_presets(),
    };
    match cli.cmd {
        Command::Render(args) => cmd_render(args, &all),
        Command::Annotate(args) => cmd_annotate(args, &all),
        Command::Presets => {
            cmd_presets(&all);
            Ok(())
        }
    }
}

fn cmd_render(args: RenderArgs, all: &[ChartPreset]) -> Result<()> {
    let style = match &args.style {
        Some(path) => ChartStyle::load(path)?,
        None => ChartStyle::default(),
    };
    let selected: Vec<ChartPreset> = if args.only.is_empty() {
        all.to_vec()
    } else {
        args.only
            .iter()
            .map(|name| {
                presets::find_preset(all, name)
                    .cloned()
                    .ok_or_else(|| anyhow!("unknown chart `{name}`"))
            })
            .collect::<Result<_>>()?
    };
    let options = BatchOptions {
        input_dir: args.dir,
        output_dir: args.out_dir,
        format: args.format.into(),
    };

    let report = batch::run_batch(&selected, &options, &style)?;
    for path in &report.rendered {
        eprintln!("Wrote {}", path.display());
    }
    for path in &report.missing {
        eprintln!("Missing {}", path.display());
    }
    for f in &report.failed {
        eprintln!("Failed {} ({}): {}", f.preset, f.csv.display(), f.reason);
    }
    eprintln!(
        "{} rendered, {} missing, {} failed",
        report.rendered.len(),
        report.missing.len(),
        report.failed.len()
    );
    if report.is_success() {
        Ok(())
    } else {
        Err(anyhow!("{} chart(s) failed", report.failed.len()))
    }
}

fn cmd_annotate(args: AnnotateArgs, all: &[ChartPreset]) -> Result<()> {
    let preset = presets::find_preset(all, &args.preset)
        .ok_or_else(|| anyhow!("unknown chart `{}`", args.preset))?;
    let table = storage::load_table(&args.csv)?;
    let prepared = viz::prepare_chart(preset, &table)?;
    match &args.out {
        Some(path) => {
            storage::save_json(&prepared, path)?;
            eprintln!("Saved annotations to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&prepared)?),
    }
    Ok(())
}

fn cmd_presets(all: &[ChartPreset]) {
    for p in all {
        let columns: Vec<&str> = p.series.iter().map(|s| s.column.as_str()).collect();
        println!(
            "{:<20} {:<18} {} -> {}",
            p.name,
            p.csv_file,
            p.size_column,
            columns.join(", ")
        );
    }
}
