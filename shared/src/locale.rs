use crate::config::Config;
use regex::RegexBuilder;
use url::{ParseError, Url};

const RELATIVE_BASE: &str = "http://localhost/";

/// Picks the locale whose prefix matches `href`, in configuration order.
///
/// Prefixes are anchored, case-insensitive patterns. A prefix beginning with
/// `/` is tested against the path of the URL, anything else against the
/// whole href. Query and fragment never take part in a path match.
pub fn resolve_locale(config: &Config, href: &str) -> String {
    let path = path_of(href);
    let path = path.as_deref();
    config
        .locales
        .iter()
        .find(|locale| prefix_matches(&locale.prefix, href, path))
        .map(|locale| locale.locale.clone())
        .unwrap_or_else(|| config.default_locale.clone())
}

fn prefix_matches(prefix: &str, href: &str, path: Option<&str>) -> bool {
    let subject = if prefix.starts_with('/') {
        match path {
            Some(path) => path,
            None => return false,
        }
    } else {
        href
    };
    match RegexBuilder::new(&format!("^(?:{})", prefix))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.is_match(subject),
        Err(_) => false,
    }
}

fn path_of(href: &str) -> Option<String> {
    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_BASE).ok()?.join(href).ok()?
        }
        Err(_) => return None,
    };
    Some(url.path().to_owned())
}
