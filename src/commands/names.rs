use tracing::{info, warn};

use crate::services::LanguageCatalog;

use super::keys;

/// Display name of a language, in that language.
///
/// `+NAME` comes from the language's own bundle, followed by its `+COUNTRY`
/// in parentheses when one is set. Languages without a name get the catalog's
/// "no name" string, and if even that is unavailable the code itself is used,
/// so the result is never empty.
pub fn language_name(catalog: &dyn LanguageCatalog, code: &str) -> String {
    let mut name = match catalog.get_string(code, keys::NAME, false) {
        Ok(name) if !name.is_empty() => name,
        _ => return fallback_name(catalog, code),
    };

    match catalog.get_string(code, keys::COUNTRY, false) {
        Ok(country) if !country.is_empty() => {
            name.push_str(" (");
            name.push_str(&country);
            name.push(')');
        }
        _ => info!(language = %code, "Language does not have country name set"),
    }

    name
}

fn fallback_name(catalog: &dyn LanguageCatalog, code: &str) -> String {
    match catalog.get_string(code, keys::NO_NAME, true) {
        Ok(text) if !text.is_empty() => text,
        Ok(_) => code.to_string(),
        Err(err) => {
            warn!(language = %code, error = %err, "No fallback name available");
            code.to_string()
        }
    }
}
