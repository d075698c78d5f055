use std::fmt::Debug;

use gltrace_extract::function::{Argument, FunctionSignature};
use gltrace_util::Trace;
use tracing::{error, instrument, trace};
use ustr::Ustr;

use crate::error::Error;
use crate::gltype::{closest_spellings, CType, KnownType};
type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone)]
pub struct TracedArgument {
    pub(crate) name: String,
    pub(crate) ty: KnownType,
}

impl TracedArgument {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> KnownType {
        self.ty
    }

    /// The expression passed to `printf` to show this argument's value
    pub fn trace_value(&self) -> String {
        self.ty.conversion().apply(&self.name)
    }
}

impl Debug for TracedArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// A wrapped function whose return and argument types have all been resolved against the catalogue
#[derive(Clone)]
pub struct TracedFunction {
    pub(crate) name: Ustr,
    pub(crate) result: KnownType,
    pub(crate) arguments: Vec<TracedArgument>,
}

impl TracedFunction {
    pub fn name(&self) -> Ustr {
        self.name
    }

    pub fn result(&self) -> KnownType {
        self.result
    }

    pub fn arguments(&self) -> &[TracedArgument] {
        &self.arguments
    }

    pub fn returns_void(&self) -> bool {
        self.result.is_void()
    }
}

impl Debug for TracedFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TracedFunction {}(", self.name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg:?}")?;
        }
        write!(f, ") -> {}", self.result)
    }
}

/// Look `spelling` up in the catalogue, logging the nearest known spellings if it is not there
pub fn resolve_type(spelling: &str) -> Result<KnownType> {
    match CType::from_spelling(spelling) {
        CType::Known(ty) => Ok(ty),
        CType::Unrecognized(name) => {
            error!("Unknown type: \"{name}\"");
            error!("Did you mean one of:");
            for sug in closest_spellings(&name, 3) {
                error!("  \"{sug}\"");
            }

            Err(Error::UnknownType {
                name,
                source: Trace::new(),
            })
        }
    }
}

fn translate_argument(argument: &Argument) -> Result<TracedArgument> {
    let ty = resolve_type(argument.type_name()).map_err(|e| Error::TranslateArgument {
        name: argument.name().to_string(),
        source: Box::new(e),
    })?;

    Ok(TracedArgument {
        name: argument.name().to_string(),
        ty,
    })
}

#[instrument(level = "trace")]
pub fn translate_function(signature: &FunctionSignature) -> Result<TracedFunction> {
    trace!("Translating function {}", signature.name());

    let result = resolve_type(signature.result()).map_err(|e| Error::TranslateResult {
        source: Box::new(e),
    })?;

    let arguments = signature
        .arguments()
        .iter()
        .map(translate_argument)
        .collect::<Result<Vec<_>>>()?;

    Ok(TracedFunction {
        name: signature.name(),
        result,
        arguments,
    })
}
