use tracing::debug;

use crate::core::context::Identity;
use crate::core::message::{FormatParams, Reply};
use crate::services::{LanguageCatalog, LookupError};

use super::names::language_name;
use super::{keys, IntlCommand, IntlError};

pub(super) async fn handle_list(cmd: &IntlCommand, actor: &Identity) -> Result<Reply, IntlError> {
    let catalog = cmd.catalog();
    let user_language = cmd.preferences().user_language(actor).await?;

    let languages = format_language_list(catalog, &user_language)?;
    let title = catalog.get_string(&user_language, keys::LIST_TITLE, true)?;

    debug!(
        language = %user_language,
        count = catalog.loaded_languages().len(),
        "Listing languages"
    );

    Ok(Reply::info(keys::LIST)
        .with_param("languages", languages)
        .with_title(title))
}

/// One line per loaded language, in catalog order, each formatted with the
/// line template of `user_language` and terminated by a newline.
pub fn format_language_list(
    catalog: &dyn LanguageCatalog,
    user_language: &str,
) -> Result<String, LookupError> {
    let mut list = String::new();

    for code in catalog.loaded_languages() {
        let name = language_name(catalog, &code);
        let params = FormatParams::from([("code".to_string(), code), ("name".to_string(), name)]);
        list.push_str(&catalog.get_formatted_string(user_language, keys::LIST_LANGUAGE, &params)?);
        list.push('\n');
    }

    Ok(list)
}
