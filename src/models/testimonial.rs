use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::collection::{clearable, default_true, nullable, OrderedRecord, SqliteQuery};

#[derive(Debug, Clone, Serialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub service: String,
    #[validate(length(min = 1))]
    pub testimonial: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i64,
    pub photo: Option<String>,
    pub gender: Option<String>,
    pub is_active: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialForm {
    pub name: String,
    #[serde(default)]
    pub service: String,
    pub testimonial: String,
    #[serde(default = "default_rating")]
    pub rating: i64,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPatch {
    pub name: Option<String>,
    pub service: Option<String>,
    pub testimonial: Option<String>,
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub photo: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

fn default_rating() -> i64 {
    5
}

impl OrderedRecord for Testimonial {
    const TABLE: &'static str = "testimonial";
    const PATH: &'static str = "testimonials";
    const LABEL: &'static str = "Testimonial";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "service",
        "testimonial",
        "rating",
        "photo",
        "gender",
        "is_active",
        "sort_order",
    ];

    type Form = TestimonialForm;
    type Patch = TestimonialPatch;

    fn from_form(form: TestimonialForm) -> Self {
        Testimonial {
            id: 0,
            name: form.name,
            service: form.service,
            testimonial: form.testimonial,
            rating: form.rating,
            photo: clearable(form.photo),
            gender: clearable(form.gender),
            is_active: form.is_active,
            order: form.order,
        }
    }

    fn apply_patch(&mut self, patch: TestimonialPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(service) = patch.service {
            self.service = service;
        }
        if let Some(testimonial) = patch.testimonial {
            self.testimonial = testimonial;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(photo) = patch.photo {
            self.photo = clearable(photo);
        }
        if let Some(gender) = patch.gender {
            self.gender = clearable(gender);
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
            .bind(self.name.as_str())
            .bind(self.service.as_str())
            .bind(self.testimonial.as_str())
            .bind(self.rating)
            .bind(self.photo.as_deref())
            .bind(self.gender.as_deref())
            .bind(self.is_active)
            .bind(self.order)
    }

    fn id(&self) -> i64 {
        self.id
    }
}
