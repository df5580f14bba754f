use crate::api::ApiError;
use crate::enterprise::EnterpriseAdmin;

/// Admin list on the settings tab. Loaded the first time the tab shows and
/// again after every add or remove.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminList {
    enterprise_id: Option<u64>,
    admins: Vec<EnterpriseAdmin>,
    loaded: bool,
    in_flight: bool,
    error: Option<String>,
}

impl AdminList {
    /// The settings tab is showing `enterprise_id`. Returns the id to fetch,
    /// or `None` when its list is already loaded or on its way.
    pub fn show(&mut self, enterprise_id: u64) -> Option<u64> {
        if self.enterprise_id == Some(enterprise_id) && (self.loaded || self.in_flight) {
            return None;
        }
        *self = AdminList {
            enterprise_id: Some(enterprise_id),
            ..AdminList::default()
        };
        self.reload()
    }

    /// Fetch again, keeping the current rows until the answer comes.
    pub fn reload(&mut self) -> Option<u64> {
        let id = self.enterprise_id?;
        self.in_flight = true;
        Some(id)
    }

    pub fn fetched(&mut self, result: Result<Vec<EnterpriseAdmin>, ApiError>) {
        self.in_flight = false;
        match result {
            Ok(admins) => {
                self.admins = admins;
                self.loaded = true;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn enterprise_id(&self) -> Option<u64> {
        self.enterprise_id
    }

    pub fn admins(&self) -> &[EnterpriseAdmin] {
        &self.admins
    }

    pub fn loaded(&self) -> bool {
        self.loaded
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> EnterpriseAdmin {
        EnterpriseAdmin {
            id: 4,
            email: "ann@example.org".to_string(),
            name: Some("Ann".to_string()),
        }
    }

    #[test]
    fn second_visit_does_not_refetch() {
        let mut list = AdminList::default();
        assert_eq!(list.show(9), Some(9));
        // tab left and shown again before the answer
        assert_eq!(list.show(9), None);

        list.fetched(Ok(vec![ann()]));
        assert!(list.loaded());
        assert_eq!(list.show(9), None);
        assert_eq!(list.admins(), &[ann()]);
    }

    #[test]
    fn failed_load_is_retried_on_next_visit() {
        let mut list = AdminList::default();
        list.show(9);
        list.fetched(Err(ApiError::Network("offline".to_string())));
        assert!(!list.loaded());
        assert_eq!(list.error(), Some("network error: offline"));

        assert_eq!(list.show(9), Some(9));
        list.fetched(Ok(Vec::new()));
        assert_eq!(list.error(), None);
    }

    #[test]
    fn another_enterprise_starts_over() {
        let mut list = AdminList::default();
        list.show(1);
        list.fetched(Ok(vec![ann()]));

        assert_eq!(list.show(2), Some(2));
        assert!(!list.loaded());
        assert!(list.admins().is_empty());
    }

    #[test]
    fn reload_needs_a_shown_enterprise() {
        let mut list = AdminList::default();
        assert_eq!(list.reload(), None);

        list.show(3);
        list.fetched(Ok(vec![ann()]));
        assert_eq!(list.reload(), Some(3));
        assert_eq!(list.admins(), &[ann()]);
    }
}
