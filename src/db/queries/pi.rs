//! PI document queries

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::bulk::{BulkSink, InsertError};
use crate::types::PiDocument;

/// Insert a PI document with its embedded item collection. The voucher
/// uniqueness constraint and the item/field checks reject per record.
pub async fn insert_pi(pool: &PgPool, document: &PiDocument) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO pis (id, company_id, voucher_no, date, consignee, buyer, status,
            items, total_quantity, total_amount, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
        "#,
    )
    .bind(id)
    .bind(document.company_id)
    .bind(&document.voucher_no)
    .bind(document.date)
    .bind(document.consignee.as_deref())
    .bind(document.buyer.as_deref())
    .bind(document.status.as_str())
    .bind(Json(&document.items))
    .bind(document.total_quantity)
    .bind(document.total_amount)
    .execute(pool)
    .await?;

    Ok(id)
}

#[async_trait]
impl BulkSink<PiDocument> for PgPool {
    fn identifier(&self, record: &PiDocument) -> Option<String> {
        Some(record.voucher_no.clone())
    }

    async fn insert_one(&self, record: &PiDocument) -> Result<(), InsertError> {
        insert_pi(self, record).await?;
        Ok(())
    }
}
