use std::fmt::Write;

use gltrace_translate::TracedApi;

use crate::{EmitOptions, API_HOOK, ERROR_QUERY};

/// Generate the function that saves the real API into the hook and points every traced entry at its stub.
///
/// The error query is left untouched so the stubs can call it without recursing.
pub fn gen_hook_table(api: &TracedApi, options: &EmitOptions) -> Result<String, std::fmt::Error> {
    let mut source = String::new();

    writeln!(
        &mut source,
        "#define INJECT(S) api->S = &{}##S;",
        options.stub_prefix
    )?;
    writeln!(&mut source)?;
    writeln!(
        &mut source,
        "void {}({}* api)",
        options.inject_function, options.api_type
    )?;
    writeln!(&mut source, "{{")?;
    writeln!(&mut source, "\t{API_HOOK} = *api;")?;

    for name in api.sorted_names() {
        if name.as_str() == ERROR_QUERY {
            continue;
        }
        writeln!(&mut source, "\tINJECT({name});")?;
    }

    writeln!(&mut source, "}}")?;
    writeln!(&mut source)?;

    Ok(source)
}

/// Generate the function that fills every entry of the API struct from a name-based lookup
pub fn gen_loader_table(api: &TracedApi, options: &EmitOptions) -> Result<String, std::fmt::Error> {
    let mut source = String::new();

    writeln!(
        &mut source,
        "#define LOAD_GL_FUNC(func) api->func = ( decltype(api->func) )GetGLProc(#func);"
    )?;
    writeln!(&mut source)?;
    writeln!(
        &mut source,
        "void {}({}* api, PFNGETGLPROC GetGLProc)",
        options.loader_function, options.api_type
    )?;
    writeln!(&mut source, "{{")?;

    for name in api.sorted_names() {
        writeln!(&mut source, "\tLOAD_GL_FUNC({name});")?;
    }

    writeln!(&mut source, "}}")?;
    writeln!(&mut source)?;

    Ok(source)
}
