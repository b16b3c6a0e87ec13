use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::collection::{default_true, OrderedRecord, SqliteQuery};

#[derive(Debug, Clone, Serialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub icon: String,
    #[validate(length(min = 1))]
    pub icon_color: String,
    pub is_active: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyForm {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub icon_color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub icon_color: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

impl OrderedRecord for Specialty {
    const TABLE: &'static str = "specialty";
    const PATH: &'static str = "specialties";
    const LABEL: &'static str = "Specialty";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "icon",
        "icon_color",
        "is_active",
        "sort_order",
    ];

    type Form = SpecialtyForm;
    type Patch = SpecialtyPatch;

    fn from_form(form: SpecialtyForm) -> Self {
        Specialty {
            id: 0,
            title: form.title,
            description: form.description,
            icon: form.icon,
            icon_color: form.icon_color,
            is_active: form.is_active,
            order: form.order,
        }
    }

    fn apply_patch(&mut self, patch: SpecialtyPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(icon_color) = patch.icon_color {
            self.icon_color = icon_color;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.title.as_str())
            .bind(self.description.as_str())
            .bind(self.icon.as_str())
            .bind(self.icon_color.as_str())
            .bind(self.is_active)
            .bind(self.order)
    }

    fn id(&self) -> i64 {
        self.id
    }
}
