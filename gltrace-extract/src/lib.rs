use std::path::Path;

use tracing::{debug, info, instrument};

pub mod error;
pub mod function;
pub mod index_map;
pub mod token;
pub mod wrap_set;

use error::Error;
use function::{Declaration, FunctionSignature};
use index_map::UstrIndexMap;
use wrap_set::WrapSet;

type Result<T, E = Error> = std::result::Result<T, E>;

/// The parsed signatures of the wrapped functions, in the order they were declared in the header
pub type Signatures = UstrIndexMap<FunctionSignature>;

/// Read and parse the function list at `path`
pub fn load_wrap_set<P: AsRef<Path>>(path: P) -> Result<WrapSet> {
    let contents = read_input(path.as_ref())?;
    WrapSet::parse(&contents)
}

/// Read `path` and extract the signatures of every wrapped function declared in it
pub fn parse_header<P: AsRef<Path>>(
    path: P,
    linkage_marker: &str,
    wrap_set: &WrapSet,
) -> Result<Signatures> {
    let contents = read_input(path.as_ref())?;
    extract_signatures(&contents, linkage_marker, wrap_set)
}

/// Read a whole input file, attaching the path to any error
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract the signatures of every wrapped function declared in `contents`.
///
/// Declaration lines are the ones whose first token is `linkage_marker`, every other line is ignored. Declarations
/// of functions not in `wrap_set` are only parsed as far as their name.
#[instrument(level = "trace", skip(contents, wrap_set))]
pub fn extract_signatures(
    contents: &str,
    linkage_marker: &str,
    wrap_set: &WrapSet,
) -> Result<Signatures> {
    let mut signatures = Signatures::new();
    let mut num_declarations = 0;

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.split_whitespace().next() != Some(linkage_marker) {
            continue;
        }

        num_declarations += 1;

        let to_error = |source: error::ParseError| Error::FailedToParseDeclaration {
            line: index + 1,
            source: Box::new(source),
        };

        let decl = Declaration::parse_head(line, linkage_marker).map_err(to_error)?;
        if !wrap_set.contains(&decl.name()) {
            continue;
        }

        let signature = decl.finish().map_err(to_error)?;
        debug!("{signature}");

        let name = signature.name();
        if !signatures.insert(name, signature) {
            return Err(Error::DuplicateDeclaration(name));
        }
    }

    info!(
        "found {num_declarations} declarations, {} of them wrapped",
        signatures.len()
    );

    Ok(signatures)
}
