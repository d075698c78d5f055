use std::io::Write;
use std::path::PathBuf;

use gltrace_extract::{extract_signatures, load_wrap_set, parse_header};
use gltrace_translate::translate_api;
use gltrace_write::{gen_api_struct, gen_trace_source, write_file};
use tracing::{debug, info, instrument};

pub use gltrace_extract::{function::FunctionSignature, wrap_set::WrapSet, Signatures};
pub use gltrace_translate::{KnownType, TracedApi, TracedFunction};
pub use gltrace_util::GeneratorConfig;
pub use gltrace_write::EmitOptions;

/// Everything that controls a generation run apart from where the inputs and outputs live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Token that starts every declaration line in the header
    pub linkage_marker: String,
    pub emit: EmitOptions,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            linkage_marker: "GLAPI".to_string(),
            emit: EmitOptions::default(),
        }
    }
}

impl From<&GeneratorConfig> for GenerateOptions {
    fn from(config: &GeneratorConfig) -> Self {
        GenerateOptions {
            linkage_marker: config.linkage_marker.clone(),
            emit: EmitOptions {
                stub_prefix: config.stub_prefix.clone(),
                api_type: config.api_type.clone(),
                inject_function: config.inject_function.clone(),
                loader_function: config.loader_function.clone(),
            },
        }
    }
}

/// The two generated artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Preamble, stubs, hook table and loader table
    pub trace_source: String,
    /// One function pointer field per wrapped function
    pub api_struct: String,
}

/// Generate the tracer from the contents of a function list and a header.
///
/// Either both artifacts are produced or neither is.
#[instrument(level = "trace", skip(wrap_list, header))]
pub fn generate(wrap_list: &str, header: &str, options: &GenerateOptions) -> Result<Generated, Error> {
    let wrap_set = WrapSet::parse(wrap_list)?;
    let signatures = extract_signatures(header, &options.linkage_marker, &wrap_set)?;

    generate_parsed(&wrap_set, &signatures, options)
}

/// Read the inputs named in `config` and generate from them
pub fn generate_from_files(config: &GeneratorConfig) -> Result<Generated, Error> {
    let options = GenerateOptions::from(config);

    let wrap_set = load_wrap_set(&config.funcs_list)?;
    let signatures = parse_header(&config.header, &options.linkage_marker, &wrap_set)?;

    generate_parsed(&wrap_set, &signatures, &options)
}

fn generate_parsed(
    wrap_set: &WrapSet,
    signatures: &Signatures,
    options: &GenerateOptions,
) -> Result<Generated, Error> {
    debug!("wrapping {} functions", wrap_set.len());

    let api = translate_api(signatures)?;

    let trace_source = gen_trace_source(&api, wrap_set, &options.emit)?;
    let api_struct = gen_api_struct(wrap_set);

    Ok(Generated {
        trace_source,
        api_struct,
    })
}

/// Write both artifacts to the locations in `config`. The trace source goes to stdout if no file is configured.
///
/// The trace source is written first, so the struct file is left alone if that fails.
pub fn write_generated(generated: &Generated, config: &GeneratorConfig) -> Result<(), Error> {
    if let Some(path) = &config.trace_output {
        write_file(path, &generated.trace_source)?;
    } else {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        lock.write_all(generated.trace_source.as_bytes())
            .and_then(|_| lock.flush())
            .map_err(|source| Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        info!("wrote trace source to stdout");
    }

    write_file(&config.api_struct_output, &generated.api_struct)?;

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error reading the function list or header")]
    Extract(#[from] gltrace_extract::error::Error),
    #[error("Error resolving types")]
    Translate(#[from] gltrace_translate::error::Error),
    #[error("Error generating tracer")]
    Write(#[from] gltrace_write::error::Error),
    #[error("Failed to write \"{}\"", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// The type spelling that could not be resolved, if that is what caused this error
    pub fn unknown_type_name(&self) -> Option<&str> {
        match self {
            Error::Translate(e) => e.unknown_type_name(),
            _ => None,
        }
    }
}
