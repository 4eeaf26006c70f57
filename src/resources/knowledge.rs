use crate::model::Knowledge;
use reconcile_framework::validation::require_non_empty;
use reconcile_framework::{known_identity, ManagedResource, ValidationErrors};

/// Knowledge bases have no privacy flag: `access_control` is sent exactly as declared.
impl ManagedResource for Knowledge {
    const KIND: &'static str = "knowledge";

    fn identity(&self) -> Option<&str> {
        known_identity(&self.id)
    }

    fn set_identity(&mut self, id: String) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_non_empty(&mut errors, "name", self.name.as_deref());
        require_non_empty(&mut errors, "description", self.description.as_deref());
        errors.into_result()
    }
}
