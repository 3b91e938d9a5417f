//! URL template substitution.

use std::collections::HashMap;

/// Substitute the layer-level placeholders of the backend tile proxy
/// template. Each value is percent-encoded and only the first occurrence of
/// each placeholder is replaced; tile placeholders are left for
/// [`expand_placeholders`].
pub fn fill_proxy_template(
    template: &str,
    layer: &str,
    style: &str,
    format: &str,
    matrix_set: &str,
) -> String {
    template
        .replacen("{Layer}", &urlencoding::encode(layer), 1)
        .replacen("{Style}", &urlencoding::encode(style), 1)
        .replacen("{Format}", &urlencoding::encode(format), 1)
        .replacen("{TileMatrixSet}", &urlencoding::encode(matrix_set), 1)
}

/// Replace every `{Name}` in `template` with `values[name.to_lowercase()]`.
/// Unknown placeholders expand to an empty string. An unterminated `{` is
/// copied through.
pub(crate) fn expand_placeholders(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = after[..close].to_lowercase();
                if let Some(value) = values.get(&key) {
                    out.push_str(value);
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
