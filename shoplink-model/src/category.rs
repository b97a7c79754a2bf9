use serde::{Deserialize, Serialize};
use shoplink_types::Identity;

/// A catalog category as exchanged with the host system.
///
/// `parent_category_id` without an endpoint id marks a root category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Identity,
    #[serde(default)]
    pub parent_category_id: Identity,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub i18ns: Vec<CategoryI18n>,
}

impl Category {
    /// Creates an active root category with no identity and no translations.
    pub fn new() -> Self {
        Self {
            is_active: true,
            ..Self::default()
        }
    }

    /// Returns the category with its endpoint id set.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.id.set_endpoint(endpoint);
        self
    }

    /// Returns the category placed under the given parent endpoint id.
    pub fn with_parent(mut self, parent_endpoint: impl Into<String>) -> Self {
        self.parent_category_id.set_endpoint(parent_endpoint);
        self
    }

    /// Returns the category with the given status flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Appends a translation.
    pub fn with_i18n(mut self, i18n: CategoryI18n) -> Self {
        self.i18ns.push(i18n);
        self
    }

    /// Returns the endpoint id, if the category was written before.
    pub fn endpoint_id(&self) -> Option<&str> {
        self.id.endpoint()
    }

    /// Returns the parent's endpoint id, or `None` for a root category.
    pub fn parent_endpoint_id(&self) -> Option<&str> {
        self.parent_category_id.endpoint()
    }

    pub fn is_root(&self) -> bool {
        self.parent_endpoint_id().is_none()
    }

    /// Finds the translation for a language code.
    pub fn i18n(&self, language_iso: &str) -> Option<&CategoryI18n> {
        self.i18ns.iter().find(|i| i.language_iso == language_iso)
    }
}

/// One localized set of category texts.
///
/// `language_iso` is the natural key: within one category it is unique, and
/// writing an existing language overwrites the texts in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryI18n {
    pub language_iso: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
}

impl CategoryI18n {
    /// Creates a translation carrying only a display name.
    pub fn new(language_iso: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            language_iso: language_iso.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_title_tag(mut self, title_tag: impl Into<String>) -> Self {
        self.title_tag = Some(title_tag.into());
        self
    }

    pub fn with_meta_description(mut self, meta_description: impl Into<String>) -> Self {
        self.meta_description = Some(meta_description.into());
        self
    }

    pub fn with_meta_keywords(mut self, meta_keywords: impl Into<String>) -> Self {
        self.meta_keywords = Some(meta_keywords.into());
        self
    }
}
