use gltrace_extract::{extract_signatures, wrap_set::WrapSet, Signatures};

pub fn init_log() {
    gltrace_util::init_log("warn");
}

/// Parse `header` keeping only the functions named in `wrap_list`
pub fn signatures(header: &str, wrap_list: &str) -> Result<Signatures, gltrace_extract::error::Error> {
    let wrap_set = WrapSet::parse(wrap_list)?;
    extract_signatures(header, "GLAPI", &wrap_set)
}
