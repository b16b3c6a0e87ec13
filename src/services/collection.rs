use std::marker::PhantomData;

use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::collection::OrderedRecord;
use crate::utils::reorder::{is_permutation, move_item, order_assignments};
use crate::utils::time::current_timestamp_seconds;

/// Storage for one ordered collection kind. Every list read is sorted by
/// `order` ascending, ties broken by id.
pub struct CollectionService<'a, T> {
    db: &'a Database,
    _kind: PhantomData<T>,
}

impl<'a, T: OrderedRecord> CollectionService<'a, T> {
    pub fn new(db: &'a Database) -> Self {
        CollectionService {
            db,
            _kind: PhantomData,
        }
    }

    fn select_sql(filter: &str) -> String {
        format!(
            "SELECT id, {} FROM {} {} ORDER BY sort_order ASC, id ASC",
            T::COLUMNS.join(", "),
            T::TABLE,
            filter
        )
    }

    fn not_found() -> AppError {
        AppError::NotFound(format!("{} not found", T::LABEL))
    }

    pub async fn get_all(&self) -> AppResult<Vec<T>> {
        let records = sqlx::query_as::<_, T>(&Self::select_sql(""))
            .fetch_all(&self.db.pool)
            .await?;

        Ok(records)
    }

    pub async fn get_active(&self) -> AppResult<Vec<T>> {
        let records = sqlx::query_as::<_, T>(&Self::select_sql("WHERE is_active = 1"))
            .fetch_all(&self.db.pool)
            .await?;

        Ok(records)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<T>> {
        let record = sqlx::query_as::<_, T>(&Self::select_sql("WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.db.pool)
            .await?;

        Ok(record)
    }

    pub async fn create(&self, form: T::Form) -> AppResult<T> {
        let record = T::from_form(form);
        record.validate()?;

        let now = current_timestamp_seconds();
        let placeholders = vec!["?"; T::COLUMNS.len() + 2].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}, created_at, updated_at) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders
        );

        let result = record
            .bind_columns(sqlx::query(&sql))
            .bind(now)
            .bind(now)
            .execute(&self.db.pool)
            .await?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or_else(|| {
                AppError::InternalServerError(format!("Failed to create {}", T::LABEL))
            })
    }

    /// Partial update: only the fields present in `patch` change.
    pub async fn update(&self, id: i64, patch: T::Patch) -> AppResult<T> {
        let mut record = self.get_by_id(id).await?.ok_or_else(Self::not_found)?;
        record.apply_patch(patch);
        record.validate()?;

        let assignments = T::COLUMNS
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {}, updated_at = ? WHERE id = ?",
            T::TABLE,
            assignments
        );

        record
            .bind_columns(sqlx::query(&sql))
            .bind(current_timestamp_seconds())
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        self.get_by_id(id).await?.ok_or_else(Self::not_found)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", T::TABLE))
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found());
        }

        Ok(())
    }

    /// Rewrite every `order` from a full id sequence in one transaction.
    /// The sequence must name each record of the collection exactly once.
    pub async fn reorder(&self, ids: &[i64]) -> AppResult<Vec<T>> {
        let mut tx = self.db.pool.begin().await?;

        let existing: Vec<i64> = sqlx::query_scalar(&format!(
            "SELECT id FROM {} ORDER BY sort_order ASC, id ASC",
            T::TABLE
        ))
        .fetch_all(&mut *tx)
        .await?;

        if !is_permutation(&existing, ids) {
            return Err(AppError::BadRequest(format!(
                "ids must list every {} exactly once",
                T::LABEL.to_lowercase()
            )));
        }

        Self::write_orders(&mut tx, ids).await?;
        tx.commit().await?;

        self.get_all().await
    }

    /// Move one record to `position` in the current sequence and renumber
    /// the whole collection. Positions past the end land in the last slot.
    pub async fn move_item(&self, id: i64, position: usize) -> AppResult<Vec<T>> {
        let mut tx = self.db.pool.begin().await?;

        let mut ids: Vec<i64> = sqlx::query_scalar(&format!(
            "SELECT id FROM {} ORDER BY sort_order ASC, id ASC",
            T::TABLE
        ))
        .fetch_all(&mut *tx)
        .await?;

        let from = ids
            .iter()
            .position(|existing| *existing == id)
            .ok_or_else(Self::not_found)?;

        move_item(&mut ids, from, position);

        Self::write_orders(&mut tx, &ids).await?;
        tx.commit().await?;

        self.get_all().await
    }

    async fn write_orders(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        ids: &[i64],
    ) -> AppResult<()> {
        let now = current_timestamp_seconds();
        let sql = format!(
            "UPDATE {} SET sort_order = ?, updated_at = ? WHERE id = ?",
            T::TABLE
        );

        for (id, order) in order_assignments(ids) {
            sqlx::query(&sql)
                .bind(order)
                .bind(now)
                .bind(id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::faq::{FaqItemForm, FaqItemPatch};
    use crate::models::testimonial::TestimonialForm;
    use crate::models::{FaqItem, Testimonial};

    fn faq(question: &str, order: i64) -> FaqItemForm {
        FaqItemForm {
            question: question.to_string(),
            answer: format!("Answer to {}", question),
            is_active: true,
            order,
        }
    }

    fn questions(items: &[FaqItem]) -> Vec<&str> {
        items.iter().map(|item| item.question.as_str()).collect()
    }

    #[actix_web::test]
    async fn test_create_then_get_returns_input() {
        let db = Database::in_memory().await.unwrap();
        let service = CollectionService::<Testimonial>::new(&db);

        let created = service
            .create(TestimonialForm {
                name: "Anna".to_string(),
                service: "Individual therapy".to_string(),
                testimonial: "Very helpful sessions.".to_string(),
                rating: 5,
                photo: None,
                gender: Some("female".to_string()),
                is_active: true,
                order: 3,
            })
            .await
            .unwrap();

        assert!(created.id > 0);
        let fetched = service.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Anna");
        assert_eq!(fetched.service, "Individual therapy");
        assert_eq!(fetched.gender.as_deref(), Some("female"));
        assert_eq!(fetched.photo, None);
        assert_eq!(fetched.order, 3);
        assert!(fetched.is_active);
    }

    #[actix_web::test]
    async fn test_create_rejects_empty_required_fields() {
        let db = Database::in_memory().await.unwrap();
        let service = CollectionService::<FaqItem>::new(&db);

        let result = service.create(faq("", 0)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_lists_sort_by_order_then_id_and_filter_inactive() {
        let db = Database::in_memory().await.unwrap();
        let service = CollectionService::<FaqItem>::new(&db);

        service.create(faq("b", 1)).await.unwrap();
        service.create(faq("a", 0)).await.unwrap();
        service.create(faq("c", 1)).await.unwrap();
        let hidden = service.create(faq("d", 0)).await.unwrap();

        service
            .update(
                hidden.id,
                FaqItemPatch {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(questions(&service.get_all().await.unwrap()), vec!["a", "d", "b", "c"]);
        assert_eq!(questions(&service.get_active().await.unwrap()), vec!["a", "b", "c"]);
    }

    #[actix_web::test]
    async fn test_partial_update_keeps_other_fields() {
        let db = Database::in_memory().await.unwrap();
        let service = CollectionService::<FaqItem>::new(&db);
        let created = service.create(faq("Do you work online?", 0)).await.unwrap();

        let updated = service
            .update(
                created.id,
                FaqItemPatch {
                    answer: Some("Yes, via video call.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.question, "Do you work online?");
        assert_eq!(updated.answer, "Yes, via video call.");
        assert!(updated.is_active);
    }

    #[actix_web::test]
    async fn test_unknown_id_is_not_found() {
        let db = Database::in_memory().await.unwrap();
        let service = CollectionService::<FaqItem>::new(&db);

        assert!(matches!(service.delete(99).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.update(99, FaqItemPatch::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.move_item(99, 0).await, Err(AppError::NotFound(_))));
        assert!(service.get_by_id(99).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_reorder_rewrites_contiguous_orders() {
        let db = Database::in_memory().await.unwrap();
        let service = CollectionService::<FaqItem>::new(&db);

        let a = service.create(faq("a", 10)).await.unwrap();
        let b = service.create(faq("b", 20)).await.unwrap();
        let c = service.create(faq("c", 30)).await.unwrap();

        let items = service.reorder(&[c.id, a.id, b.id]).await.unwrap();
        assert_eq!(questions(&items), vec!["c", "a", "b"]);
        assert_eq!(
            items.iter().map(|item| item.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[actix_web::test]
    async fn test_reorder_rejects_partial_lists_without_changes() {
        let db = Database::in_memory().await.unwrap();
        let service = CollectionService::<FaqItem>::new(&db);

        let a = service.create(faq("a", 0)).await.unwrap();
        let b = service.create(faq("b", 1)).await.unwrap();

        let result = service.reorder(&[b.id]).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = service.reorder(&[b.id, b.id]).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let items = service.get_all().await.unwrap();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![a.id, b.id]);
        assert_eq!(items.iter().map(|i| i.order).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[actix_web::test]
    async fn test_move_item_shifts_neighbours() {
        let db = Database::in_memory().await.unwrap();
        let service = CollectionService::<FaqItem>::new(&db);

        let a = service.create(faq("a", 0)).await.unwrap();
        service.create(faq("b", 1)).await.unwrap();
        service.create(faq("c", 2)).await.unwrap();
        let d = service.create(faq("d", 3)).await.unwrap();

        let items = service.move_item(a.id, 2).await.unwrap();
        assert_eq!(questions(&items), vec!["b", "c", "a", "d"]);

        let items = service.move_item(d.id, 0).await.unwrap();
        assert_eq!(questions(&items), vec!["d", "b", "c", "a"]);

        // Past the end clamps to the last slot
        let items = service.move_item(d.id, 50).await.unwrap();
        assert_eq!(questions(&items), vec!["b", "c", "a", "d"]);
        assert_eq!(
            items.iter().map(|item| item.order).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }
}
