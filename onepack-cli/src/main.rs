use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use onepack::config::PackOptions;
use onepack::reporter::{Reporter, TracingReporter};
use tracing::Level;

mod progress;
mod reporter;

use reporter::ConsoleReporter;

#[derive(Parser, Debug)]
#[command(name = "onepack")]
#[command(about = "Pack a mod.json project into a distributable zip", long_about = None)]
#[command(version)]
struct Cli {
    /// Mod directory containing mod.json
    #[arg(default_value = ".")]
    source: PathBuf,

    /// Extra glob patterns relative to the mod directory, comma-separated
    #[arg(short, long, default_value = "")]
    include: String,

    /// Log through tracing instead of the colored console output
    #[arg(short, long)]
    quiet: bool,

    /// Wait for Enter before exiting
    #[arg(long)]
    pause: bool,
}

/// Console output already covers progress; the log only carries problems then
fn log_level(quiet: bool) -> Level {
    if quiet { Level::INFO } else { Level::WARN }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.quiet))
        .with_writer(std::io::stderr)
        .init();

    let options = PackOptions::new(&cli.source).with_include_list(&cli.include);

    let start = Instant::now();
    let result = {
        let reporter: Box<dyn Reporter> = if cli.quiet {
            Box::new(TracingReporter)
        } else {
            Box::new(ConsoleReporter::new())
        };
        onepack::pack(&options, reporter.as_ref())
    };

    let code = match result {
        Ok(summary) => {
            tracing::debug!(
                written = summary.written.len(),
                failed = summary.failed,
                skipped = summary.skipped,
                "pack finished"
            );
            if !cli.quiet {
                println!("{}", progress::done_line(start.elapsed(), summary.archive_size));
            }
            ExitCode::SUCCESS
        }
        // Already reported by the pack run
        Err(_) => ExitCode::FAILURE,
    };

    if cli.pause {
        println!("Press Enter to exit");
        console::Term::stdout().read_line()?;
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["onepack"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("."));
        assert_eq!(cli.include, "");
        assert!(!cli.quiet);
        assert!(!cli.pause);
    }

    #[test]
    fn test_log_level_follows_quiet() {
        assert_eq!(log_level(true), Level::INFO);
        assert_eq!(log_level(false), Level::WARN);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "onepack",
            "-i",
            "textures/*.png,sounds/*.ogg",
            "--pause",
            "-q",
            "mods/demo",
        ])
        .unwrap();
        assert_eq!(cli.source, PathBuf::from("mods/demo"));
        assert_eq!(cli.include, "textures/*.png,sounds/*.ogg");
        assert!(cli.quiet);
        assert!(cli.pause);
    }

    #[test]
    fn test_pack_from_cli_options() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("demo");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(
            source.join("mod.json"),
            r#"{"id": "demo", "version": "0.1", "manifestVersion": 1}"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from(["onepack", "-q", source.to_str().unwrap()]).unwrap();
        let options = PackOptions::new(&cli.source).with_include_list(&cli.include);
        let summary = onepack::pack(&options, &TracingReporter).unwrap();
        assert!(summary.is_complete());
        let written = std::fs::metadata(temp.path().join("demo-0.1.zip")).unwrap().len();
        assert_eq!(summary.archive_size.map(|size| size as u64), Some(written));
    }
}
