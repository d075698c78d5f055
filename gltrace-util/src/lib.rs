use std::{
    ops::Deref,
    path::{Path, PathBuf},
};

use env_logger::fmt::Color;
use log::Level;

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

pub enum Error {
    Any(Box<dyn std::error::Error + 'static>),
    Compare,
}

impl<E> From<E> for Error
where
    E: std::error::Error + 'static,
{
    fn from(e: E) -> Self {
        Error::Any(Box::new(e))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Any(e) => write!(f, "{e:?}"),
            Error::Compare => write!(f, "Comparison failed"),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Run a test body with logging set up, reporting the full error chain if it fails
pub fn run_test<F>(closure: F) -> Result<(), Error>
where
    F: FnOnce() -> Result<(), Error>,
{
    use tracing::error;

    init_log("warn");

    let res = closure();

    res.map_err(|err| {
        error!("{err}");

        if let Error::Any(ref err) = err {
            for e in source_iter(err.deref()) {
                error!("  because: {e}")
            }
        }

        err
    })
}

/// Install the env_logger backend used by the binary and the tests.
///
/// `default_filter` is used unless `RUST_LOG` is set. Calling this more than once is harmless.
pub fn init_log(default_filter: &str) {
    use std::io::Write;

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format(|buf, record| -> Result<(), std::io::Error> {
            let mut level_style = buf.style();
            match record.level() {
                Level::Trace => level_style.set_color(Color::Blue),
                Level::Debug => level_style.set_color(Color::White),
                Level::Info => level_style.set_color(Color::Cyan),
                Level::Warn => level_style.set_color(Color::Yellow),
                Level::Error => level_style.set_color(Color::Red),
            };

            writeln!(
                buf,
                "{} [{}:{}] {}",
                level_style.value(record.level()),
                record.file().unwrap_or(""),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}

/// Line-diff `left` against `right`, printing the diff and failing if they differ
pub fn compare(left: &str, right: &str) -> Result<(), Error> {
    use colored::Colorize;
    let diff = TextDiff::from_lines(left, right);

    let mut same = true;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => {
                same = false;
                print!("{}", format!("-| {change}").color(colored::Color::Red));
            }
            ChangeTag::Insert => {
                same = false;
                print!("{}", format!("+| {change}").color(colored::Color::Green));
            }
            ChangeTag::Equal => {
                print!("{}", format!(" | {change}").color(colored::Color::BrightBlack));
            }
        };
    }

    if same {
        Ok(())
    } else {
        println!();
        Err(Error::Compare)
    }
}

pub fn source_iter(
    error: &(impl std::error::Error + ?Sized),
) -> impl Iterator<Item = &(dyn std::error::Error + 'static)> {
    SourceIter {
        current: error.source(),
    }
}

pub struct SourceIter<'a> {
    current: Option<&'a (dyn std::error::Error + 'static)>,
}

impl<'a> Iterator for SourceIter<'a> {
    type Item = &'a (dyn std::error::Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current;
        self.current = self.current.and_then(std::error::Error::source);
        current
    }
}

#[derive(Debug)]
pub struct Trace(pub backtrace::Backtrace);

impl Trace {
    pub fn new() -> Trace {
        Trace(backtrace::Backtrace::new())
    }
}

impl Default for Trace {
    fn default() -> Self {
        Trace::new()
    }
}

impl std::fmt::Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match std::env::var("RUST_BACKTRACE") {
            Ok(value) if value == "1" => {
                write!(f, "Backtrace:\n{:?}", self.0)
            }
            _ => Ok(()),
        }
    }
}

impl std::error::Error for Trace {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// JSON struct holding the inputs, outputs and naming used by gltrace-gen.
///
/// Every field has a default, so a config file only needs to mention what it changes:
/// {
///     "funcs_list": "funcs_list.txt",       //< list of functions to wrap, last token of each line
///     "header": "glcorearb.h",              //< header containing the GLAPI declarations
///     "trace_output": null,                 //< where to write the stubs and tables, stdout if null
///     "api_struct_output": "GLAPI.h",       //< where to write the function pointer fields
///     "linkage_marker": "GLAPI",            //< token that starts every declaration line
///     "stub_prefix": "GLTracer_",
///     "api_type": "GL4API",
///     "inject_function": "InjectAPITracer4",
///     "loader_function": "GetAPI4"
/// }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub funcs_list: PathBuf,
    pub header: PathBuf,
    pub trace_output: Option<PathBuf>,
    pub api_struct_output: PathBuf,
    pub linkage_marker: String,
    pub stub_prefix: String,
    pub api_type: String,
    pub inject_function: String,
    pub loader_function: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            funcs_list: PathBuf::from("funcs_list.txt"),
            header: PathBuf::from("glcorearb.h"),
            trace_output: None,
            api_struct_output: PathBuf::from("GLAPI.h"),
            linkage_marker: "GLAPI".to_string(),
            stub_prefix: "GLTracer_".to_string(),
            api_type: "GL4API".to_string(),
            inject_function: "InjectAPITracer4".to_string(),
            loader_function: "GetAPI4".to_string(),
        }
    }
}

pub fn write_generator_config(
    path: impl AsRef<Path>,
    config: &GeneratorConfig,
) -> Result<(), std::io::Error> {
    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&config)?)
}

pub fn read_generator_config(
    path: impl AsRef<Path>,
) -> Result<GeneratorConfig, Box<dyn std::error::Error + 'static + Send + Sync>> {
    let s = std::fs::read_to_string(path)?;
    let config = serde_json::from_str::<GeneratorConfig>(&s)?;
    Ok(config)
}
