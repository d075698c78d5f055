use gltrace_extract::wrap_set::WrapSet;

/// Name of the function pointer type the GL headers declare for `name`
pub fn pointer_type_name(name: &str) -> String {
    format!("PFN{}PROC", name.to_uppercase())
}

/// Generate one struct field per wrapped function, in sorted order.
///
/// Each line is a tab, the pointer type, enough tabs to roughly line the names up in a column, the name and a `;`.
pub fn gen_api_struct(wrap_set: &WrapSet) -> String {
    let mut source = String::new();

    for name in wrap_set {
        let type_name = pointer_type_name(name);
        let num_tabs = 17usize.saturating_sub(type_name.len() / 3).max(1);
        source.push('\t');
        source.push_str(&type_name);
        source.push_str(&"\t".repeat(num_tabs));
        source.push_str(name);
        source.push_str(";\n");
    }

    source
}
