use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::collection::{default_true, OrderedRecord, SqliteQuery};

#[derive(Debug, Clone, Serialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub id: i64,
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
    pub is_active: bool,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItemForm {
    pub question: String,
    pub answer: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItemPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

impl OrderedRecord for FaqItem {
    const TABLE: &'static str = "faq_item";
    const PATH: &'static str = "faq";
    const LABEL: &'static str = "FAQ item";
    const COLUMNS: &'static [&'static str] = &["question", "answer", "is_active", "sort_order"];

    type Form = FaqItemForm;
    type Patch = FaqItemPatch;

    fn from_form(form: FaqItemForm) -> Self {
        FaqItem {
            id: 0,
            question: form.question,
            answer: form.answer,
            is_active: form.is_active,
            order: form.order,
        }
    }

    fn apply_patch(&mut self, patch: FaqItemPatch) {
        if let Some(question) = patch.question {
            self.question = question;
        }
        if let Some(answer) = patch.answer {
            self.answer = answer;
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
            .bind(self.question.as_str())
            .bind(self.answer.as_str())
            .bind(self.is_active)
            .bind(self.order)
    }

    fn id(&self) -> i64 {
        self.id
    }
}
