use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseModel {
    pub id: String,
    pub name: String,
}

/// Selectable models for one credential, as returned by `GET /v1/models`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub base_models: Vec<BaseModel>,
    pub lora_models: HashMap<String, String>,
}

/// One entry of a select control: `(value, label)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl ModelCatalog {
    pub fn has_base_model(&self, id: &str) -> bool {
        self.base_models.iter().any(|model| model.id == id)
    }

    pub fn has_lora(&self, id: &str) -> bool {
        self.lora_models.contains_key(id)
    }

    pub fn first_base_model(&self) -> Option<&BaseModel> {
        self.base_models.first()
    }

    pub fn base_model_options(&self) -> Vec<SelectOption> {
        self.base_models
            .iter()
            .map(|model| SelectOption {
                value: model.id.clone(),
                label: model.name.clone(),
            })
            .collect()
    }

    /// LoRA options ordered by label, then id.
    pub fn lora_options(&self) -> Vec<SelectOption> {
        let mut options: Vec<SelectOption> = self
            .lora_models
            .iter()
            .map(|(id, name)| SelectOption {
                value: id.clone(),
                label: name.clone(),
            })
            .collect();
        options.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.value.cmp(&b.value)));
        options
    }
}
