use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::collection::{default_true, OrderedRecord, SqliteQuery};

/// A consultation offering shown in the services section.
#[derive(Debug, Clone, Serialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: String,
    pub duration: String,
    pub price: String,
    pub icon: String,
    pub gradient: String,
    pub show_price: bool,
    pub show_duration: bool,
    pub is_active: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub gradient: String,
    #[serde(default = "default_true")]
    pub show_price: bool,
    #[serde(default = "default_true")]
    pub show_duration: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<String>,
    pub icon: Option<String>,
    pub gradient: Option<String>,
    pub show_price: Option<bool>,
    pub show_duration: Option<bool>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

impl OrderedRecord for Service {
    const TABLE: &'static str = "service";
    const PATH: &'static str = "services";
    const LABEL: &'static str = "Service";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "duration",
        "price",
        "icon",
        "gradient",
        "show_price",
        "show_duration",
        "is_active",
        "sort_order",
    ];

    type Form = ServiceForm;
    type Patch = ServicePatch;

    fn from_form(form: ServiceForm) -> Self {
        Service {
            id: 0,
            title: form.title,
            description: form.description,
            duration: form.duration,
            price: form.price,
            icon: form.icon,
            gradient: form.gradient,
            show_price: form.show_price,
            show_duration: form.show_duration,
            is_active: form.is_active,
            order: form.order,
        }
    }

    fn apply_patch(&mut self, patch: ServicePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(gradient) = patch.gradient {
            self.gradient = gradient;
        }
        if let Some(show_price) = patch.show_price {
            self.show_price = show_price;
        }
        if let Some(show_duration) = patch.show_duration {
            self.show_duration = show_duration;
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
            .bind(self.duration.as_str())
            .bind(self.price.as_str())
            .bind(self.icon.as_str())
            .bind(self.gradient.as_str())
            .bind(self.show_price)
            .bind(self.show_duration)
            .bind(self.is_active)
            .bind(self.order)
    }

    fn id(&self) -> i64 {
        self.id
    }
}
