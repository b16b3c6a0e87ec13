use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::collection::{clearable, default_true, nullable, OrderedRecord, SqliteQuery};

#[derive(Debug, Clone, Serialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCarousel {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub image_url: String,
    pub show_text: bool,
    pub is_active: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCarouselForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default = "default_true")]
    pub show_text: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCarouselPatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub image_url: Option<String>,
    pub show_text: Option<bool>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

impl OrderedRecord for PhotoCarousel {
    const TABLE: &'static str = "photo_carousel";
    const PATH: &'static str = "photo-carousel";
    const LABEL: &'static str = "Photo";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "image_url",
        "show_text",
        "is_active",
        "sort_order",
    ];

    type Form = PhotoCarouselForm;
    type Patch = PhotoCarouselPatch;

    fn from_form(form: PhotoCarouselForm) -> Self {
        PhotoCarousel {
            id: 0,
            title: form.title,
            description: clearable(form.description),
            image_url: form.image_url,
            show_text: form.show_text,
            is_active: form.is_active,
            order: form.order,
        }
    }

    fn apply_patch(&mut self, patch: PhotoCarouselPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = clearable(description);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(show_text) = patch.show_text {
            self.show_text = show_text;
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
            .bind(self.description.as_deref())
            .bind(self.image_url.as_str())
            .bind(self.show_text)
            .bind(self.is_active)
            .bind(self.order)
    }

    fn id(&self) -> i64 {
        self.id
    }
}
