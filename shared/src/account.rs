use crate::api::ApiError;
use crate::enterprise::id_from_number_or_string;
use crate::route;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterpriseRef {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl EnterpriseRef {
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("ID: {}", self.id),
        }
    }

    pub fn edit_path(&self) -> String {
        route::enterprise_path(self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Permissions {
    #[serde(rename = "directoryAdmin", default)]
    pub directory_admin: bool,
    #[serde(rename = "authenticatedEnterprises", default)]
    pub authenticated_enterprises: Option<Vec<EnterpriseRef>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionsView<'a> {
    Loading,
    NoPermissions,
    DirectoryAdmin,
    Enterprises(&'a [EnterpriseRef]),
}

/// What the account page has to do after a permissions fetch settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEffect {
    LoggedIn,
    LoggedOut { redirect_to: &'static str },
    /// Console only; the page keeps showing its loading view.
    Log(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountState {
    loaded: bool,
    directory_admin: bool,
    enterprises: Vec<EnterpriseRef>,
}

impl AccountState {
    pub fn begin(&mut self) {
        self.loaded = false;
    }

    pub fn apply(&mut self, result: Result<Permissions, ApiError>) -> AccountEffect {
        match result {
            Ok(permissions) => {
                if permissions.directory_admin {
                    self.directory_admin = true;
                }
                if let Some(enterprises) = permissions.authenticated_enterprises {
                    self.enterprises = enterprises;
                }
                self.loaded = true;
                AccountEffect::LoggedIn
            }
            Err(ApiError::Forbidden) => AccountEffect::LoggedOut {
                redirect_to: route::ADMIN_PATH,
            },
            Err(ApiError::Status { code, .. }) => AccountEffect::Log(format!("Got response {}", code)),
            Err(err) => AccountEffect::Log(err.to_string()),
        }
    }

    pub fn view(&self) -> PermissionsView<'_> {
        if !self.loaded {
            PermissionsView::Loading
        } else if self.directory_admin {
            PermissionsView::DirectoryAdmin
        } else if self.enterprises.is_empty() {
            PermissionsView::NoPermissions
        } else {
            PermissionsView::Enterprises(&self.enterprises)
        }
    }
}
