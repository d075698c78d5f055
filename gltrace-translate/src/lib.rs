pub mod error;
pub mod function;
pub mod gltype;

use std::fmt::Debug;

use gltrace_extract::{index_map::UstrIndexMap, Signatures};
use tracing::{debug, instrument};
use ustr::Ustr;

use error::Error;
pub use function::{translate_function, TracedArgument, TracedFunction};
use function::resolve_type;
pub use gltype::{Conversion, KnownType};

type Result<T, E = Error> = std::result::Result<T, E>;

/// Every wrapped function with its types resolved, in the order they were declared
#[derive(Default)]
pub struct TracedApi {
    functions: UstrIndexMap<TracedFunction>,
}

impl Debug for TracedApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for fun in self.functions.iter() {
            writeln!(f, "{fun:?}")?;
        }

        Ok(())
    }
}

impl TracedApi {
    pub fn iter(&self) -> std::slice::Iter<'_, TracedFunction> {
        self.functions.iter()
    }

    pub fn get(&self, name: &str) -> Option<&TracedFunction> {
        self.functions.get(&Ustr::from(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&Ustr::from(name))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// The function names in lexicographic order
    pub fn sorted_names(&self) -> Vec<Ustr> {
        let mut names: Vec<Ustr> = self.functions.iter().map(|f| f.name()).collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        names
    }
}

/// Resolve every parsed signature against the type catalogue.
///
/// Fails on the first type that is not in the catalogue.
#[instrument(level = "trace", skip(signatures))]
pub fn translate_api(signatures: &Signatures) -> Result<TracedApi> {
    let mut functions = UstrIndexMap::new();

    for signature in signatures.iter() {
        let fun = translate_function(signature).map_err(|source| Error::TranslateFunction {
            name: signature.name().to_string(),
            source: Box::new(source),
        })?;

        debug!("{fun:?}");
        functions.insert(fun.name(), fun);
    }

    Ok(TracedApi { functions })
}

/// The `printf` format specifier for a value spelled `type_name`
pub fn format_for(type_name: &str) -> Result<&'static str> {
    Ok(resolve_type(type_name)?.format())
}

/// The expression that renders argument `arg_name` of type `type_name` for the trace `printf`
pub fn converter_for(type_name: &str, arg_name: &str) -> Result<String> {
    Ok(resolve_type(type_name)?.conversion().apply(arg_name))
}
