use crate::config::LocaleConfig;

pub const ADMIN_PATH: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Account,
    EditEnterprise(u64),
    NotFound,
}

impl Route {
    /// Maps URL path parts to a page. A leading locale code is ignored.
    pub fn from_path<S: AsRef<str>>(parts: &[S], locales: &[LocaleConfig]) -> Route {
        let mut parts: Vec<&str> = parts
            .iter()
            .map(|part| part.as_ref())
            .filter(|part| !part.is_empty())
            .collect();

        if let Some(first) = parts.first() {
            if locales
                .iter()
                .any(|locale| locale.locale.eq_ignore_ascii_case(first))
            {
                parts.remove(0);
            }
        }

        match parts.as_slice() {
            [] | ["admin"] => Route::Account,
            ["enterprise", id] | ["admin", "enterprise", id] => match id.parse() {
                Ok(id) => Route::EditEnterprise(id),
                Err(_) => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }
}

pub fn enterprise_path(id: u64) -> String {
    format!("/enterprise/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sample;

    fn route(path: &[&str]) -> Route {
        Route::from_path(path, &sample().locales)
    }

    #[test]
    fn account_routes() {
        assert_eq!(route(&[]), Route::Account);
        assert_eq!(route(&["admin"]), Route::Account);
        assert_eq!(route(&["fr", "admin"]), Route::Account);
        assert_eq!(route(&["admin", ""]), Route::Account);
    }

    #[test]
    fn enterprise_routes() {
        assert_eq!(route(&["enterprise", "42"]), Route::EditEnterprise(42));
        assert_eq!(route(&["FR", "admin", "enterprise", "7"]), Route::EditEnterprise(7));
        assert_eq!(route(&["enterprise", "acme"]), Route::NotFound);
    }

    #[test]
    fn everything_else_is_not_found() {
        assert_eq!(route(&["settings"]), Route::NotFound);
        assert_eq!(route(&["de", "admin"]), Route::NotFound);
        assert_eq!(route(&["enterprise"]), Route::NotFound);
    }
}
