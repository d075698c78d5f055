use anyhow::{Context, Result};
use std::{fmt::Display, path::PathBuf};

use gltrace::{generate_from_files, write_generated, GeneratorConfig};
use gltrace_util::{read_generator_config, source_iter, write_generator_config};

use clap::{Parser, ValueEnum};
use log::{error, info};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Verbosity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Generate OpenGL call-tracing stubs from a function list and the GL API header
#[derive(Parser)]
struct Args {
    /// JSON config file. Command-line options override the values it contains
    #[clap(value_parser)]
    config: Option<PathBuf>,

    /// List of functions to wrap, one per line
    #[clap(short, long, value_parser)]
    funcs_list: Option<PathBuf>,

    /// Header containing the API declarations
    #[clap(long, value_parser)]
    header: Option<PathBuf>,

    /// Where to write the trace source. Defaults to stdout
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,

    /// Where to write the API struct fields
    #[clap(short, long, value_parser)]
    api_struct_output: Option<PathBuf>,

    /// Token that starts every declaration line in the header
    #[clap(short, long, value_parser)]
    linkage_marker: Option<String>,

    /// Verbosity of the output
    #[clap(short, long, arg_enum, value_parser)]
    verbosity: Option<Verbosity>,

    /// Write the default config to this path and exit
    #[clap(long, value_parser)]
    write_default_config: Option<PathBuf>,
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verbosity::Trace => {
                write!(f, "trace")
            }
            Verbosity::Debug => {
                write!(f, "debug")
            }
            Verbosity::Info => {
                write!(f, "info")
            }
            Verbosity::Warn => {
                write!(f, "warn")
            }
            Verbosity::Error => {
                write!(f, "error")
            }
        }
    }
}

impl Args {
    /// Load the config file if one was given, then apply the command-line overrides
    fn config(&self) -> Result<GeneratorConfig> {
        let mut config = if let Some(path) = &self.config {
            read_generator_config(path)
                .map_err(|e| anyhow::anyhow!(e))
                .with_context(|| format!("Could not read config \"{}\"", path.display()))?
        } else {
            GeneratorConfig::default()
        };

        if let Some(funcs_list) = &self.funcs_list {
            config.funcs_list = funcs_list.clone();
        }

        if let Some(header) = &self.header {
            config.header = header.clone();
        }

        if let Some(output) = &self.output {
            config.trace_output = Some(output.clone());
        }

        if let Some(api_struct_output) = &self.api_struct_output {
            config.api_struct_output = api_struct_output.clone();
        }

        if let Some(linkage_marker) = &self.linkage_marker {
            config.linkage_marker = linkage_marker.clone();
        }

        Ok(config)
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(path) = &args.write_default_config {
        write_generator_config(path, &GeneratorConfig::default())
            .with_context(|| format!("Could not write config \"{}\"", path.display()))?;
        info!("wrote default config to {}", path.display());
        return Ok(());
    }

    let config = args.config()?;

    // nothing is written unless generation succeeds
    let generated = generate_from_files(&config)?;
    write_generated(&generated, &config)?;

    Ok(())
}

fn main() {
    let args = Args::parse();

    let filter = args
        .verbosity
        .map(|v| v.to_string())
        .unwrap_or_else(|| "warn".to_string());
    gltrace_util::init_log(&filter);

    if let Err(err) = run(args) {
        error!("{err}");
        for e in source_iter(AsRef::<dyn std::error::Error>::as_ref(&err)) {
            error!("  because: {e}");
        }

        std::process::exit(255);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let args = Args::try_parse_from(["gltrace-gen"]).unwrap();
        let config = args.config().unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let args = Args::try_parse_from([
            "gltrace-gen",
            "--funcs-list",
            "lists/core.txt",
            "--header",
            "GL/glcorearb.h",
            "--output",
            "GLAPITrace.h",
            "--linkage-marker",
            "GLAPI_EXT",
            "--verbosity",
            "debug",
        ])
        .unwrap();

        assert!(matches!(args.verbosity, Some(Verbosity::Debug)));

        let config = args.config().unwrap();
        assert_eq!(config.funcs_list, PathBuf::from("lists/core.txt"));
        assert_eq!(config.header, PathBuf::from("GL/glcorearb.h"));
        assert_eq!(config.trace_output, Some(PathBuf::from("GLAPITrace.h")));
        assert_eq!(config.api_struct_output, PathBuf::from("GLAPI.h"));
        assert_eq!(config.linkage_marker, "GLAPI_EXT");
    }

    #[test]
    fn config_file_is_overridden() {
        let path = std::env::temp_dir().join(format!("gltrace-gen-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "header": "a.h", "api_struct_output": "out/GLAPI.h" }"#).unwrap();

        let args = Args::try_parse_from([
            "gltrace-gen".to_string(),
            path.display().to_string(),
            "--header".to_string(),
            "b.h".to_string(),
        ])
        .unwrap();
        let config = args.config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.header, PathBuf::from("b.h"));
        assert_eq!(config.api_struct_output, PathBuf::from("out/GLAPI.h"));
    }

    #[test]
    fn missing_config_is_an_error() {
        let args = Args::try_parse_from(["gltrace-gen", "does/not/exist.json"]).unwrap();
        assert!(args.config().is_err());
    }

    #[test]
    fn verbosity_names() {
        assert_eq!(Verbosity::Trace.to_string(), "trace");
        assert_eq!(Verbosity::Error.to_string(), "error");
    }
}
