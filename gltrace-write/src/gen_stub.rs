use std::fmt::Write;

use gltrace_translate::TracedFunction;
use tracing::instrument;

use crate::{check_error, EmitOptions, API_HOOK};

/// Generate the tracing stub for one function.
///
/// The stub prints the call with its argument values, forwards it through the hooked API and checks the error
/// state afterwards.
#[instrument(level = "trace", skip(options))]
pub fn gen_stub(fun: &TracedFunction, options: &EmitOptions) -> Result<String, std::fmt::Error> {
    let mut source = String::new();

    let result = if fun.returns_void() {
        "void"
    } else {
        fun.result().spelling()
    };

    let params = fun
        .arguments()
        .iter()
        .map(|a| format!("{} {}", a.ty(), a.name()))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(
        &mut source,
        "{result} {}{}({params})",
        options.stub_prefix,
        fun.name()
    )?;
    writeln!(&mut source, "{{")?;
    writeln!(&mut source, "\t{}", gen_printf(fun))?;

    let call = gen_call(fun);
    let check = check_error();
    if fun.returns_void() {
        writeln!(&mut source, "\t{call};")?;
        writeln!(&mut source, "\t{check}")?;
    } else {
        writeln!(&mut source, "\t{result} const r = {call};")?;
        writeln!(&mut source, "\t{check}")?;
        writeln!(&mut source, "\treturn r;")?;
    }

    writeln!(&mut source, "}}")?;
    writeln!(&mut source)?;

    Ok(source)
}

/// The `printf` statement announcing the call
fn gen_printf(fun: &TracedFunction) -> String {
    if fun.arguments().is_empty() {
        return format!("printf(\"{}()\\n\");", fun.name());
    }

    let formats = fun
        .arguments()
        .iter()
        .map(|a| a.ty().format())
        .collect::<Vec<_>>()
        .join(", ");

    let values = fun
        .arguments()
        .iter()
        .map(|a| a.trace_value())
        .collect::<Vec<_>>()
        .join(", ");

    format!("printf(\"{}(\" \"{formats})\\n\", {values});", fun.name())
}

/// The forwarding call, which passes the arguments through unconverted
fn gen_call(fun: &TracedFunction) -> String {
    let args = fun
        .arguments()
        .iter()
        .map(|a| a.name())
        .collect::<Vec<_>>()
        .join(", ");

    format!("{API_HOOK}.{}({args})", fun.name())
}
