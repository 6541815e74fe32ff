use std::f64::consts::PI;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};

use wackyplot::plotting::prelude::{DashPattern, LegendPosition};
use wackyplot::{ConversionStatus, FontTable, HelperConfig, PlotHelper, PlotStyle};

#[derive(Parser)]
#[command(name = "wackyplot")]
#[command(
    about = "Consistent scientific figures in 1x1, 2x1 and 2x2 layouts",
    long_about = "Renders demo figures with the wackyplot layout conventions and prints the per-style font size table."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long, global = true)]
    append_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a demo figure in one of the layout styles
    Demo {
        /// Layout style: 1x1, 2x1 or 2x2 (codes 1, 2, 3 are accepted too)
        #[arg(long, default_value = "2x2")]
        style: PlotStyle,
        /// Prefix for output files; `.pdf` and `.eps` are appended
        #[arg(long, required = true)]
        out_prefix: String,
        /// Use the science theme (thin lines, inward ticks, minor ticks)
        #[arg(long)]
        science: bool,
        /// Convert the PDF to EPS with the external converter to keep transparency
        #[arg(long)]
        transparent: bool,
        /// Also write an SVG file
        #[arg(long)]
        svg: bool,
        /// Add an inset axes to the figure
        #[arg(long)]
        inset: bool,
        /// Path to a JSON configuration file (export options, theme)
        #[arg(long)]
        config: Option<String>,
        /// Force overwrite of existing output files
        #[arg(short, long)]
        force: bool,
    },
    /// Print the font size table as JSON
    Sizes {
        /// Only print the sizes of this style
        #[arg(long)]
        style: Option<PlotStyle>,
    },
}

fn check_output_paths(prefix: &str, suffixes: &[&str], force: bool) -> Result<()> {
    let path = Path::new(prefix);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        info!("Creating output directory: {:?}", parent);
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create output directory {:?}", parent))?;
    }

    if !force {
        for suffix in suffixes {
            let p = format!("{}{}", prefix, suffix);
            if Path::new(&p).exists() {
                bail!("Output file {} already exists. Use --force to overwrite.", p);
            }
        }
    }
    Ok(())
}

struct DemoOptions<'a> {
    style: PlotStyle,
    out_prefix: &'a str,
    science: bool,
    transparent: bool,
    svg: bool,
    inset: bool,
    config: Option<&'a str>,
}

fn sample(n: usize, f: impl Fn(f64) -> f64) -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..n).map(|i| 2.0 * PI * i as f64 / (n - 1) as f64).collect();
    let y = x.iter().map(|&v| f(v)).collect();
    (x, y)
}

fn run_demo(opts: &DemoOptions) -> Result<()> {
    let mut config = match opts.config {
        Some(path) => HelperConfig::load(path)?,
        None => HelperConfig::default(),
    };
    config.science |= opts.science;

    let mut helper = PlotHelper::from_config(opts.style, &config);
    let axes = helper.get_fig_axes()?;

    let curves: [(&str, fn(f64) -> f64); 4] = [
        ("sin", f64::sin),
        ("cos", f64::cos),
        ("damped", |t| (-t / 3.0).exp() * (3.0 * t).sin()),
        ("square", |t| (t.sin() + (3.0 * t).sin() / 3.0) * 0.9),
    ];

    for (i, ax) in axes.iter().enumerate() {
        let (name, f) = curves[i % curves.len()];
        let (x, y) = sample(200, f);
        let (xs, ys) = sample(12, f);
        let axes_ref = helper.ax_mut(*ax)?;
        axes_ref.plot(x, y).label(name).build()?;
        axes_ref
            .scatter(xs, ys)
            .size(4.0)
            .alpha(0.6)
            .build()?;
        axes_ref.legend(LegendPosition::TopRight);
        helper.set_ax_title(*ax, &format!("Panel {}", i + 1))?;
    }

    if opts.inset {
        let inset = helper.add_inset()?;
        let (x, y) = sample(50, |t| t.sin() * t.sin());
        helper
            .ax_mut(inset)?
            .plot(x, y)
            .linestyle(DashPattern::Dashed)
            .build()?;
        helper.set_tick_size()?;
    }

    if axes.len() == 1 {
        helper.set_ax_xlabel(axes[0], "Phase (rad)")?;
        helper.set_ax_ylabel(axes[0], "Amplitude")?;
    } else {
        helper.set_tick_middle_invisible()?;
        helper.add_common_xlabel("Phase (rad)")?;
        helper.add_common_ylabel("Amplitude")?;
    }
    helper.add_fig_title(&format!("wackyplot {} demo", opts.style))?;

    if opts.svg {
        helper.save_svg(opts.out_prefix)?;
    }
    if opts.transparent {
        match helper.save_pdf_trans(opts.out_prefix)? {
            ConversionStatus::Converted => {}
            status => warn!("EPS not produced ({:?}); only the PDF is available", status),
        }
    } else {
        helper.save_pdf_eps(opts.out_prefix)?;
    }
    Ok(())
}

fn run_sizes(style: Option<PlotStyle>) -> Result<()> {
    let tables: Vec<FontTable> = match style {
        Some(style) => vec![FontTable::for_style(style)],
        None => PlotStyle::ALL.iter().map(|s| FontTable::for_style(*s)).collect(),
    };
    let json = serde_json::to_string_pretty(&tables).context("Could not serialize font table")?;
    println!("{}", json);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            std::fs::File::options().create(true).append(true).open(path)
        } else {
            std::fs::File::create(path)
        };
        match file {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    }
    log_builder.init();

    let result = match &cli.command {
        Commands::Demo {
            style,
            out_prefix,
            science,
            transparent,
            svg,
            inset,
            config,
            force,
        } => {
            let mut suffixes = vec![".pdf", ".eps"];
            if *svg {
                suffixes.push(".svg");
            }
            check_output_paths(out_prefix, &suffixes, *force).and_then(|_| {
                run_demo(&DemoOptions {
                    style: *style,
                    out_prefix,
                    science: *science,
                    transparent: *transparent,
                    svg: *svg,
                    inset: *inset,
                    config: config.as_deref(),
                })
            })
        }
        Commands::Sizes { style } => run_sizes(*style),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
