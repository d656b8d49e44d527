use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use std::path::PathBuf;
use std::process::ExitCode;

use roundicon::{IconSet, IconSpec, PngCompression, RunMode};

#[derive(Parser)]
#[command(name = "roundicon-cli")]
#[command(
    about = "Crop an image to a circle and write the app icon and favicon set",
    long_about = None
)]
#[command(version)]
struct Args {
    /// Source image (defaults to the icon set's input, app/icon.png)
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Icon set description (JSON) replacing the built-in favicon set
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective icon set as JSON (to PATH, or stdout) and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    dump_config: Option<Option<PathBuf>>,

    /// Generate a single icon at this path instead of the whole set
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Edge length of the single icon (requires --output)
    #[arg(short, long, value_name = "PIXELS", requires = "output")]
    size: Option<u32>,

    /// PNG compression level
    #[arg(long, value_enum)]
    png_compression: Option<PngCompressionArg>,

    /// Generate icons concurrently
    #[arg(long, default_value_t)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long, default_value_t)]
    verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, default_value_t)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PngCompressionArg {
    Fast,
    Default,
    Best,
}

impl From<PngCompressionArg> for PngCompression {
    fn from(arg: PngCompressionArg) -> Self {
        match arg {
            PngCompressionArg::Fast => PngCompression::Fast,
            PngCompressionArg::Default => PngCompression::Default,
            PngCompressionArg::Best => PngCompression::Best,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    setup_logging(args.verbose, args.quiet);

    let set = build_icon_set(&args)?;

    match &args.dump_config {
        Some(Some(path)) => {
            set.save(path)?;
            log::info!("Wrote icon set to {}", path.display());
            return Ok(ExitCode::SUCCESS);
        }
        Some(None) => {
            let json =
                serde_json::to_string_pretty(&set).context("Failed to serialize icon set")?;
            println!("{json}");
            return Ok(ExitCode::SUCCESS);
        }
        None => {}
    }

    if set.icons.is_empty() {
        anyhow::bail!("Icon set has no icons to generate");
    }

    log::info!(
        "Creating {} round icons from {}",
        set.icons.len(),
        set.input.display()
    );

    let mode = if args.parallel {
        RunMode::Parallel
    } else {
        RunMode::Sequential
    };
    let reports = roundicon::generate_all(&set, mode);

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    if failed == 0 {
        log::info!("Done!");
        Ok(ExitCode::SUCCESS)
    } else {
        log::warn!("{failed} of {} icons failed", reports.len());
        Ok(ExitCode::FAILURE)
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stdout)
        .init();
}

fn build_icon_set(args: &Args) -> Result<IconSet> {
    let mut set = match &args.config {
        Some(path) => IconSet::load(path)?,
        None => IconSet::default(),
    };

    if let Some(input) = &args.input {
        set.input = input.clone();
    }

    if let Some(output) = &args.output {
        set.icons = vec![IconSpec {
            size: args.size,
            output: output.clone(),
        }];
    }

    if let Some(compression) = args.png_compression {
        set.compression = compression.into();
    }

    if let Some(spec) = set.icons.iter().find(|spec| spec.size == Some(0)) {
        anyhow::bail!(
            "Icon size must be greater than 0 ({})",
            spec.output.display()
        );
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("roundicon-cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_arguments_is_the_favicon_set() {
        let set = build_icon_set(&parse(&[])).unwrap();
        assert_eq!(set, IconSet::default());
    }

    #[test]
    fn single_icon_overrides_the_set() {
        let set = build_icon_set(&parse(&[
            "--input",
            "logo.jpg",
            "--output",
            "out/logo.png",
            "--size",
            "64",
            "--png-compression",
            "best",
        ]))
        .unwrap();

        assert_eq!(set.input, PathBuf::from("logo.jpg"));
        assert_eq!(set.icons, vec![IconSpec::new(64, "out/logo.png")]);
        assert_eq!(set.compression, PngCompression::Best);
    }

    #[test]
    fn dump_config_path_is_optional() {
        assert_eq!(parse(&[]).dump_config, None);
        assert_eq!(parse(&["--dump-config"]).dump_config, Some(None));
        assert_eq!(
            parse(&["--dump-config", "icons.json"]).dump_config,
            Some(Some(PathBuf::from("icons.json")))
        );
    }

    #[test]
    fn dumped_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icons.json");
        let args = parse(&[
            "--input",
            "logo.png",
            "--png-compression",
            "fast",
            "--dump-config",
            path.to_str().unwrap(),
        ]);

        let set = build_icon_set(&args).unwrap();
        set.save(args.dump_config.clone().flatten().as_deref().unwrap())
            .unwrap();

        let loaded = IconSet::load(&path).unwrap();
        assert_eq!(loaded, set);
        assert_eq!(loaded.input, PathBuf::from("logo.png"));
        assert_eq!(loaded.compression, PngCompression::Fast);
    }

    #[test]
    fn size_requires_output() {
        assert!(Args::try_parse_from(["roundicon-cli", "--size", "32"]).is_err());
    }

    #[test]
    fn zero_size_is_rejected() {
        let args = parse(&["--output", "x.png", "--size", "0"]);
        assert!(build_icon_set(&args).is_err());
    }
}
