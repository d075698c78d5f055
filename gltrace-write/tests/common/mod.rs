use gltrace_extract::{extract_signatures, wrap_set::WrapSet};
use gltrace_translate::{translate_api, TracedApi};
use gltrace_util::source_iter;
use tracing::error;

pub(crate) type Error = Box<dyn std::error::Error + 'static + Send + Sync>;

pub(crate) fn run_with_logging<F>(closure: F) -> Result<(), Error>
where
    F: FnOnce() -> Result<(), Error>,
{
    gltrace_util::init_log("warn");
    let res = closure();

    res.map_err(|err| {
        error!("{err}");
        for e in source_iter(err.as_ref()) {
            error!("  because: {e}")
        }

        err
    })
}

/// Parse `header`, keep the functions named in `wrap_list` and resolve their types
pub(crate) fn traced_api(header: &str, wrap_list: &str) -> Result<(WrapSet, TracedApi), Error> {
    let wrap_set = WrapSet::parse(wrap_list)?;
    let signatures = extract_signatures(header, "GLAPI", &wrap_set)?;
    let api = translate_api(&signatures)?;
    Ok((wrap_set, api))
}

pub(crate) fn compare(left: &str, right: &str) -> Result<(), Error> {
    gltrace_util::compare(left, right).map_err(|_| "generated source did not match".into())
}
