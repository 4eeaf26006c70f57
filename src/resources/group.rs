use crate::model::Group;
use reconcile_framework::validation::require_non_empty;
use reconcile_framework::{known_identity, ManagedResource, ValidationErrors};

impl ManagedResource for Group {
    const KIND: &'static str = "group";

    fn identity(&self) -> Option<&str> {
        known_identity(&self.id)
    }

    fn set_identity(&mut self, id: String) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_non_empty(&mut errors, "name", self.name.as_deref());
        for (i, user_id) in self.user_ids.iter().flatten().enumerate() {
            let path = format!("user_ids[{i}]");
            require_non_empty(&mut errors, &path, Some(user_id.as_str()));
        }
        errors.into_result()
    }

    /// Members are a set on the server; sorting keeps repeated plans identical.
    fn resolve(mut self) -> Result<Self, ValidationErrors> {
        if let Some(user_ids) = self.user_ids.as_mut() {
            user_ids.sort();
            user_ids.dedup();
        }
        Ok(self)
    }
}
