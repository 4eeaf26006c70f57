use crate::model::User;
use reconcile_framework::validation::{one_of, require_non_empty};
use reconcile_framework::{known_identity, ManagedResource, ValidationErrors};

pub const ROLES: &[&str] = &["admin", "user", "pending"];
pub const DEFAULT_ROLE: &str = "pending";

impl ManagedResource for User {
    const KIND: &'static str = "user";

    fn identity(&self) -> Option<&str> {
        known_identity(&self.id)
    }

    fn set_identity(&mut self, id: String) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_non_empty(&mut errors, "name", self.name.as_deref());
        require_non_empty(&mut errors, "email", self.email.as_deref());
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.contains('@') {
                errors.push("email", format!("{email:?} is not an email address"));
            }
        }
        one_of(&mut errors, "role", self.role.as_deref(), ROLES);
        errors.into_result()
    }

    fn resolve(mut self) -> Result<Self, ValidationErrors> {
        self.role.get_or_insert_with(|| DEFAULT_ROLE.to_string());
        Ok(self)
    }
}
