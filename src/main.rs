use std::path::PathBuf;
use std::process::ExitCode;
use std::{fs, io};

use clap::Parser;
use proj_esri::{CrsFactory, Point, Proj4rsEngine, ProjError, scale_factor_from_standard_parallel};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Translate an ESRI .prj file into a PROJ definition, and optionally
/// reproject points out of it.
#[derive(Parser, Debug)]
#[command(name = "proj-esri", version, about)]
struct Cli {
    /// ESRI .prj file
    #[arg(required_unless_present = "scale_factor")]
    prj: Option<PathBuf>,

    /// Target PROJ definition for --point
    #[arg(long, requires = "prj")]
    to: Option<String>,

    /// Point in the .prj system, as `x,y`; may be repeated
    #[arg(long = "point", value_parser = parse_point, requires = "to")]
    points: Vec<Point>,

    /// Print the polar stereographic scale factor for this standard parallel (degrees)
    #[arg(long, allow_negative_numbers = true)]
    scale_factor: Option<f64>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("couldn't read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Proj(#[from] ProjError),
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, found `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(Point::new(x, y))
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(lat) = cli.scale_factor {
        println!("{}", scale_factor_from_standard_parallel(lat));
    }

    let Some(path) = cli.prj else {
        return Ok(());
    };
    let esri = fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;

    let factory = CrsFactory::new(Proj4rsEngine);
    let params = factory.esri_parameters(esri.trim())?;
    println!("{params}");

    if let Some(to) = cli.to {
        let source = factory.from_parameters(&params)?;
        let dest = factory.from_definition(&to)?;
        info!(from = %path.display(), %to, count = cli.points.len(), "reprojecting");
        let mut points = cli.points;
        factory.reproject(&mut points, &source, &dest)?;
        for p in points {
            println!("{} {}", p.x, p.y);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("proj-esri: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("1.5, -2").unwrap(), Point::new(1.5, -2.0));
        assert!(parse_point("1.5").is_err());
        assert!(parse_point("a,2").is_err());
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::try_parse_from([
            "proj-esri",
            "utm.prj",
            "--to",
            "+proj=longlat +datum=WGS84",
            "--point",
            "500000,0",
            "--point",
            "400000,10",
        ])
        .unwrap();
        assert_eq!(cli.points.len(), 2);
        assert!(Cli::try_parse_from(["proj-esri", "--point", "1,2"]).is_err());
        assert!(Cli::try_parse_from(["proj-esri", "--scale-factor", "-71"]).is_ok());
    }
}
