use std::fmt::Write;
use std::path::Path;

use gltrace_extract::wrap_set::WrapSet;
use gltrace_translate::TracedApi;
use tracing::{info, instrument, warn};

pub mod error;
pub mod gen_api_struct;
pub mod gen_stub;
pub mod gen_tables;

use error::Error;
pub use gen_api_struct::gen_api_struct;
use gen_stub::gen_stub;
use gen_tables::{gen_hook_table, gen_loader_table};

type Result<T, E = Error> = std::result::Result<T, E>;

/// Name of the saved copy of the real API that every stub forwards to
pub const API_HOOK: &str = "apiHook";

/// The error query. It is never hooked since the stubs call it after every forwarded call.
pub const ERROR_QUERY: &str = "glGetError";

/// The statement every stub runs after forwarding its call
pub fn check_error() -> String {
    format!("assert({API_HOOK}.{ERROR_QUERY}() == GL_NO_ERROR);")
}

/// Names given to the generated symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub stub_prefix: String,
    pub api_type: String,
    pub inject_function: String,
    pub loader_function: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            stub_prefix: "GLTracer_".to_string(),
            api_type: "GL4API".to_string(),
            inject_function: "InjectAPITracer4".to_string(),
            loader_function: "GetAPI4".to_string(),
        }
    }
}

/// Generate the tracing source: the preamble, then one stub per function in declaration order, then the hook and
/// loader tables
#[instrument(level = "trace", skip(api, wrap_set))]
pub fn gen_trace_source(api: &TracedApi, wrap_set: &WrapSet, options: &EmitOptions) -> Result<String> {
    for name in wrap_set {
        if !api.contains(name) {
            warn!("{name} is in the function list but was not declared in the header");
        }
    }

    let mut source = gen_preamble(options)?;

    for fun in api.iter() {
        let stub = gen_stub(fun, options).map_err(|e| Error::FailedToGenerateFunction {
            name: fun.name().to_string(),
            source: Box::new(e),
        })?;
        source.push_str(&stub);
    }

    source.push_str(&gen_hook_table(api, options).map_err(|e| Error::FailedToGenerateTable {
        table: "hook",
        source: Box::new(e),
    })?);

    source.push_str(&gen_loader_table(api, options).map_err(|e| Error::FailedToGenerateTable {
        table: "loader",
        source: Box::new(e),
    })?);

    info!("generated {} stubs", api.len());

    Ok(source)
}

fn gen_preamble(options: &EmitOptions) -> Result<String> {
    let mut source = String::new();

    writeln!(&mut source, "#include <string>")?;
    writeln!(&mut source, "#include <inttypes.h>")?;
    writeln!(&mut source)?;
    writeln!(&mut source, "namespace")?;
    writeln!(&mut source, "{{")?;
    writeln!(&mut source, "\t{} {API_HOOK};", options.api_type)?;
    writeln!(&mut source, "}} // namespace")?;
    writeln!(&mut source)?;
    writeln!(&mut source, "using PFNGETGLPROC = void* (const char*);")?;
    writeln!(&mut source)?;
    writeln!(&mut source, "#define E2S( en ) Enum2String( en ).c_str()")?;
    writeln!(&mut source, "extern std::string Enum2String( GLenum e );")?;
    writeln!(&mut source)?;

    Ok(source)
}

/// Write a generated artifact to `path`
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents).map_err(|source| Error::FailedToWriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    info!("wrote {}", path.display());
    Ok(())
}
