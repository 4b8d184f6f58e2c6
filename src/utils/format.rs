//! Placeholder interpolation for catalog strings.
//!
//! Catalog strings use `{name}` placeholders. Unknown placeholders are left
//! untouched so a missing parameter shows up in the output instead of
//! silently disappearing. `{{` and `}}` produce literal braces.

use crate::core::message::FormatParams;

pub fn interpolate(template: &str, params: &FormatParams) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        match tail[1..].find('}') {
            Some(end) => {
                let name = &tail[1..=end];
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&tail[..end + 2]),
                }
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
