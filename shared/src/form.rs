//! State of the edit-enterprise form.
//!
//! The browser component only renders what this module decides: which tabs
//! exist, which buttons show, what gets sent and what happens afterwards.

use crate::api::ApiError;
use crate::config::LocaleConfig;
use crate::enterprise::{Enterprise, Field, Status};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Index into the configured locales.
    Locale(usize),
    Settings,
}

/// Locale tabs in configuration order, plus settings for published records.
pub fn tabs(status: Status, locale_count: usize) -> Vec<Tab> {
    let mut tabs: Vec<Tab> = (0..locale_count).map(Tab::Locale).collect();
    match status {
        Status::Published => tabs.push(Tab::Settings),
        Status::Unpublished | Status::Pending => {}
    }
    tabs
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Publish,
    Unpublish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalLabel {
    SubmitForApproval,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormButtons {
    pub status_action: StatusAction,
    pub approval: ApprovalLabel,
}

impl FormButtons {
    pub fn for_status(status: Status) -> Self {
        let status_action = match status {
            Status::Unpublished | Status::Pending => StatusAction::Publish,
            Status::Published => StatusAction::Unpublish,
        };
        let approval = match status {
            Status::Pending => ApprovalLabel::Save,
            Status::Unpublished | Status::Published => ApprovalLabel::SubmitForApproval,
        };
        FormButtons {
            status_action,
            approval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Save,
    SubmitForApproval,
    Publish,
    Unpublish,
    Delete,
}

impl Mutation {
    /// Status segment used in the request path.
    pub fn request_status(self, current: Status) -> Status {
        match self {
            Mutation::SubmitForApproval => Status::Pending,
            Mutation::Unpublish => Status::Published,
            Mutation::Save | Mutation::Publish | Mutation::Delete => current,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationRequest {
    pub mutation: Mutation,
    pub id: u64,
    pub status: Status,
    pub payload: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Failed; the error modal is showing.
    Stay,
    /// Saved in place; the flash banner is showing.
    Saved,
    LeaveForAdmin { refresh: bool },
}

/// Translated strings the form needs when a mutation completes.
pub struct FormText<'a> {
    pub saved: &'a str,
    pub edit_error: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    enterprise: Enterprise,
    selected_tab: usize,
    delete_modal_open: bool,
    error: Option<String>,
    flash: Option<String>,
}

impl EditForm {
    pub fn new(enterprise: Enterprise) -> Self {
        EditForm {
            enterprise,
            selected_tab: 0,
            delete_modal_open: false,
            error: None,
            flash: None,
        }
    }

    pub fn enterprise(&self) -> &Enterprise {
        &self.enterprise
    }

    pub fn status(&self) -> Status {
        self.enterprise.status
    }

    pub fn tabs(&self, locale_count: usize) -> Vec<Tab> {
        tabs(self.status(), locale_count)
    }

    pub fn selected_tab(&self) -> usize {
        self.selected_tab
    }

    pub fn select_tab(&mut self, index: usize, locale_count: usize) {
        if index < self.tabs(locale_count).len() {
            self.selected_tab = index;
        }
    }

    pub fn active_tab(&self, locale_count: usize) -> Option<Tab> {
        self.tabs(locale_count).get(self.selected_tab).copied()
    }

    /// `None` while the settings tab is active.
    pub fn buttons(&self, locale_count: usize) -> Option<FormButtons> {
        match self.active_tab(locale_count) {
            Some(Tab::Settings) => None,
            Some(Tab::Locale(_)) | None => Some(FormButtons::for_status(self.status())),
        }
    }

    pub fn update_field(&mut self, locale: &str, field: Field, value: String) {
        self.enterprise.set_field(locale, field, value);
    }

    pub fn delete_modal_open(&self) -> bool {
        self.delete_modal_open
    }

    pub fn open_delete_modal(&mut self) {
        self.delete_modal_open = true;
    }

    pub fn close_delete_modal(&mut self) {
        self.delete_modal_open = false;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    pub fn clear_flash(&mut self) {
        self.flash = None;
    }

    /// Builds the request for `mutation`. Asking for a delete closes the
    /// confirmation modal before anything is sent.
    pub fn request(
        &mut self,
        mutation: Mutation,
        locales: &[LocaleConfig],
    ) -> Result<MutationRequest, serde_json::Error> {
        let payload = match mutation {
            Mutation::Save | Mutation::SubmitForApproval => {
                Some(self.enterprise.locale_payload(locales)?)
            }
            Mutation::Publish | Mutation::Unpublish => {
                Some(self.enterprise.payload_with_locations(locales)?)
            }
            Mutation::Delete => {
                self.close_delete_modal();
                None
            }
        };

        Ok(MutationRequest {
            mutation,
            id: self.enterprise.id,
            status: mutation.request_status(self.status()),
            payload,
        })
    }

    pub fn complete(
        &mut self,
        mutation: Mutation,
        result: Result<(), ApiError>,
        text: &FormText<'_>,
    ) -> Completion {
        match result {
            Ok(()) => match mutation {
                Mutation::Save => {
                    self.flash = Some(text.saved.to_string());
                    Completion::Saved
                }
                Mutation::SubmitForApproval | Mutation::Publish | Mutation::Unpublish => {
                    Completion::LeaveForAdmin { refresh: false }
                }
                Mutation::Delete => Completion::LeaveForAdmin { refresh: true },
            },
            Err(err) => {
                self.error = Some(match mutation {
                    Mutation::Delete => err.to_string(),
                    Mutation::Save
                    | Mutation::SubmitForApproval
                    | Mutation::Publish
                    | Mutation::Unpublish => format!("{} \"{}\"", text.edit_error, err),
                });
                Completion::Stay
            }
        }
    }
}

/// Which enterprise the edit page asked for, and whether it turned up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPage {
    id: u64,
    waiting: bool,
    missing: bool,
}

/// What to do with a fetched enterprise.
#[derive(Debug, Clone, PartialEq)]
pub enum Arrival {
    /// Answer for an id the page no longer shows.
    Stale,
    /// Start a fresh form on this record.
    Show(Enterprise),
    LoggedOut,
    Missing(ApiError),
}

impl EditPage {
    /// A page waiting for `id`.
    pub fn new(id: u64) -> Self {
        EditPage {
            id,
            waiting: true,
            missing: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn missing(&self) -> bool {
        self.missing
    }

    /// Points the page at `id`. Returns `true` when it has to be fetched.
    pub fn open(&mut self, id: u64) -> bool {
        if self.id == id {
            return false;
        }
        *self = EditPage::new(id);
        true
    }

    pub fn accept(&mut self, requested: u64, result: Result<Enterprise, ApiError>) -> Arrival {
        if requested != self.id || !self.waiting {
            return Arrival::Stale;
        }
        self.waiting = false;
        match result {
            Ok(enterprise) if enterprise.id == requested => Arrival::Show(enterprise),
            Ok(enterprise) => {
                self.missing = true;
                Arrival::Missing(ApiError::Decode(format!(
                    "asked for enterprise {}, got {}",
                    requested, enterprise.id
                )))
            }
            Err(ApiError::Forbidden) => Arrival::LoggedOut,
            Err(err) => {
                self.missing = true;
                Arrival::Missing(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{sample, LocaleConfig};
    use crate::enterprise::LocaleRecord;
    use serde_json::json;

    const TEXT: FormText<'static> = FormText {
        saved: "Saved",
        edit_error: "Could not save",
    };

    fn enterprise(id: u64, status: &str) -> Enterprise {
        Enterprise::from_json(
            json!({
                "id": id,
                "status": status,
                "en": {"name": "Acme"},
                "fr": {"name": "Acmé"},
                "locations": [{"city": "Montreal"}]
            }),
            &sample().locales,
        )
        .unwrap()
    }

    fn locales(count: usize) -> Vec<LocaleConfig> {
        (0..count)
            .map(|i| LocaleConfig {
                locale: format!("l{}", i),
                name: format!("locale {}", i),
                prefix: format!("/l{}", i),
            })
            .collect()
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            code: 422,
            message: "name is required".to_string(),
        }
    }

    #[test]
    fn one_tab_per_locale_plus_settings_when_published() {
        for count in 0..4 {
            assert_eq!(tabs(Status::Unpublished, count).len(), count);
            assert_eq!(tabs(Status::Pending, count).len(), count);
            let published = tabs(Status::Published, count);
            assert_eq!(published.len(), count + 1);
            assert_eq!(published.last(), Some(&Tab::Settings));
        }
    }

    #[test]
    fn button_visibility_follows_status() {
        let unpublished = FormButtons::for_status(Status::Unpublished);
        assert_eq!(unpublished.status_action, StatusAction::Publish);
        assert_eq!(unpublished.approval, ApprovalLabel::SubmitForApproval);

        let pending = FormButtons::for_status(Status::Pending);
        assert_eq!(pending.status_action, StatusAction::Publish);
        assert_eq!(pending.approval, ApprovalLabel::Save);

        let published = FormButtons::for_status(Status::Published);
        assert_eq!(published.status_action, StatusAction::Unpublish);
        assert_eq!(published.approval, ApprovalLabel::SubmitForApproval);
    }

    #[test]
    fn buttons_hidden_on_settings_tab() {
        let mut form = EditForm::new(enterprise(1, "published"));
        assert!(form.buttons(2).is_some());
        form.select_tab(2, 2);
        assert_eq!(form.active_tab(2), Some(Tab::Settings));
        assert_eq!(form.buttons(2), None);
        form.select_tab(1, 2);
        assert!(form.buttons(2).is_some());
    }

    #[test]
    fn cannot_select_missing_tab() {
        let mut form = EditForm::new(enterprise(1, "pending"));
        form.select_tab(2, 2);
        assert_eq!(form.selected_tab(), 0);
    }

    #[test]
    fn editing_one_locale_leaves_others_alone() {
        let mut form = EditForm::new(enterprise(1, "pending"));
        let french = form.enterprise().record("fr").cloned();
        form.update_field("en", Field::Name, "Acme Inc".to_string());
        form.update_field("en", Field::Phone, "555".to_string());
        assert_eq!(form.enterprise().display_name("en"), "Acme Inc");
        assert_eq!(form.enterprise().record("fr").cloned(), french);
    }

    #[test]
    fn save_payload_has_every_configured_locale() {
        for count in 0..4 {
            let locales = locales(count);
            let mut form = EditForm::new(enterprise(1, "unpublished"));
            if count > 0 {
                form.update_field("l0", Field::Name, "edited".to_string());
            }
            let request = form.request(Mutation::Save, &locales).unwrap();
            let payload = request.payload.unwrap();
            assert_eq!(payload.len(), count);
            for locale in &locales {
                assert!(payload.contains_key(&locale.locale));
            }
        }
    }

    #[test]
    fn request_status_and_payload_per_mutation() {
        let locales = sample().locales;
        let mut form = EditForm::new(enterprise(5, "unpublished"));

        let submit = form.request(Mutation::SubmitForApproval, &locales).unwrap();
        assert_eq!(submit.status, Status::Pending);
        assert!(!submit.payload.unwrap().contains_key("locations"));

        let publish = form.request(Mutation::Publish, &locales).unwrap();
        assert_eq!(publish.status, Status::Unpublished);
        assert_eq!(publish.payload.unwrap()["locations"][0]["city"], "Montreal");

        let unpublish = form.request(Mutation::Unpublish, &locales).unwrap();
        assert_eq!(unpublish.status, Status::Published);

        let delete = form.request(Mutation::Delete, &locales).unwrap();
        assert_eq!(delete.id, 5);
        assert_eq!(delete.payload, None);
    }

    #[test]
    fn save_success_flashes_and_stays() {
        let mut form = EditForm::new(enterprise(1, "pending"));
        assert_eq!(
            form.complete(Mutation::Save, Ok(()), &TEXT),
            Completion::Saved
        );
        assert_eq!(form.flash(), Some("Saved"));
        assert_eq!(form.error(), None);
    }

    #[test]
    fn status_transitions_leave_on_success() {
        for mutation in [Mutation::Publish, Mutation::Unpublish, Mutation::SubmitForApproval] {
            let mut form = EditForm::new(enterprise(1, "published"));
            assert_eq!(
                form.complete(mutation, Ok(()), &TEXT),
                Completion::LeaveForAdmin { refresh: false }
            );
        }
    }

    #[test]
    fn failures_show_modal_and_never_leave() {
        for mutation in [
            Mutation::Save,
            Mutation::Publish,
            Mutation::Unpublish,
            Mutation::SubmitForApproval,
        ] {
            let mut form = EditForm::new(enterprise(1, "published"));
            assert_eq!(
                form.complete(mutation, Err(server_error()), &TEXT),
                Completion::Stay
            );
            assert_eq!(form.error(), Some("Could not save \"name is required\""));
            form.clear_error();
            assert_eq!(form.error(), None);
        }
    }

    // The confirmation modal closes before the delete outcome is known.
    #[test]
    fn confirming_delete_closes_modal_on_success() {
        let mut form = EditForm::new(enterprise(1, "published"));
        form.open_delete_modal();
        form.request(Mutation::Delete, &sample().locales).unwrap();
        assert!(!form.delete_modal_open());
        assert_eq!(
            form.complete(Mutation::Delete, Ok(()), &TEXT),
            Completion::LeaveForAdmin { refresh: true }
        );
        assert!(!form.delete_modal_open());
    }

    #[test]
    fn confirming_delete_closes_modal_on_failure() {
        let mut form = EditForm::new(enterprise(1, "published"));
        form.open_delete_modal();
        form.request(Mutation::Delete, &sample().locales).unwrap();
        assert_eq!(
            form.complete(Mutation::Delete, Err(server_error()), &TEXT),
            Completion::Stay
        );
        assert!(!form.delete_modal_open());
        assert_eq!(form.error(), Some("name is required"));
    }

    #[test]
    fn answers_for_another_id_are_dropped() {
        let mut page = EditPage::new(1);
        assert!(page.open(2));
        assert_eq!(page.accept(1, Ok(enterprise(1, "published"))), Arrival::Stale);
        assert_eq!(page.id(), 2);

        assert_eq!(
            page.accept(2, Ok(enterprise(2, "pending"))),
            Arrival::Show(enterprise(2, "pending"))
        );
        // a second answer for the same request is not applied twice
        assert_eq!(page.accept(2, Ok(enterprise(2, "pending"))), Arrival::Stale);
    }

    #[test]
    fn reopening_the_same_id_does_not_refetch() {
        let mut page = EditPage::new(7);
        assert!(!page.open(7));
        assert_eq!(
            page.accept(7, Ok(enterprise(7, "published"))),
            Arrival::Show(enterprise(7, "published"))
        );
    }

    #[test]
    fn failed_fetch_marks_page_missing_until_next_open() {
        let mut page = EditPage::new(1);
        assert!(page.open(2));
        let err = ApiError::Status {
            code: 404,
            message: "not found".to_string(),
        };
        assert_eq!(page.accept(2, Err(err.clone())), Arrival::Missing(err));
        assert!(page.missing());

        assert!(page.open(1));
        assert!(!page.missing());
        assert!(matches!(
            page.accept(1, Ok(enterprise(1, "published"))),
            Arrival::Show(_)
        ));
    }

    #[test]
    fn forbidden_fetch_logs_out() {
        let mut page = EditPage::new(3);
        assert_eq!(page.accept(3, Err(ApiError::Forbidden)), Arrival::LoggedOut);
        assert!(!page.missing());
    }

    #[test]
    fn record_with_another_id_is_missing() {
        let mut page = EditPage::new(3);
        assert!(matches!(
            page.accept(3, Ok(enterprise(4, "published"))),
            Arrival::Missing(ApiError::Decode(_))
        ));
        assert!(page.missing());
    }

    #[test]
    fn returning_to_an_enterprise_starts_a_fresh_form() {
        let mut page = EditPage::new(1);
        let mut form = match page.accept(1, Ok(enterprise(1, "published"))) {
            Arrival::Show(enterprise) => EditForm::new(enterprise),
            other => panic!("unexpected {:?}", other),
        };
        form.select_tab(2, 2);
        form.update_field("en", Field::Name, "draft".to_string());

        assert!(page.open(2));
        page.accept(2, Err(ApiError::Network("offline".to_string())));
        assert!(page.open(1));
        let form = match page.accept(1, Ok(enterprise(1, "pending"))) {
            Arrival::Show(enterprise) => EditForm::new(enterprise),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(form.selected_tab(), 0);
        assert_eq!(form.status(), Status::Pending);
        assert_eq!(
            form.enterprise().record("en"),
            Some(&LocaleRecord {
                name: "Acme".to_string(),
                ..LocaleRecord::default()
            })
        );
    }
}
