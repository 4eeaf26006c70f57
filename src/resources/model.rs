//! Rules for custom models.

use super::resolve_access_control;
use crate::model::{Model, ModelParams};
use reconcile_framework::validation::{one_of, require_non_empty};
use reconcile_framework::{known_identity, ManagedResource, ValidationErrors};

pub const DEFAULT_PROFILE_IMAGE_URL: &str = "/static/favicon.png";
pub const REASONING_EFFORTS: &[&str] = &["low", "medium", "high"];
pub const FUNCTION_CALLING_MODES: &[&str] = &["native"];

impl ManagedResource for Model {
    const KIND: &'static str = "model";

    fn identity(&self) -> Option<&str> {
        known_identity(&self.id)
    }

    fn set_identity(&mut self, id: String) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_non_empty(&mut errors, "id", self.id.as_deref());
        require_non_empty(&mut errors, "base_model_id", self.base_model_id.as_deref());
        require_non_empty(&mut errors, "name", self.name.as_deref());

        if let Some(params) = &self.params {
            one_of(
                &mut errors,
                "params.reasoning_effort",
                params.reasoning_effort.as_deref(),
                REASONING_EFFORTS,
            );
            one_of(
                &mut errors,
                "params.function_calling",
                params.function_calling.as_deref(),
                FUNCTION_CALLING_MODES,
            );
        }

        let tags = self.meta.as_ref().and_then(|meta| meta.tags.as_deref());
        for (i, tag) in tags.unwrap_or_default().iter().enumerate() {
            let path = format!("meta.tags[{i}].name");
            require_non_empty(&mut errors, &path, Some(tag.name.as_str()));
        }

        errors.into_result()
    }

    fn resolve(mut self) -> Result<Self, ValidationErrors> {
        self.access_control = resolve_access_control(self.is_private, self.access_control)?;
        self.params.get_or_insert_with(ModelParams::default);
        if let Some(meta) = self.meta.as_mut() {
            meta.profile_image_url
                .get_or_insert_with(|| DEFAULT_PROFILE_IMAGE_URL.to_string());
        }
        Ok(self)
    }
}
