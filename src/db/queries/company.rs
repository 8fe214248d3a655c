//! Company queries

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::bulk::{BulkSink, InsertError};
use crate::services::pi_import::CompanyDirectory;
use crate::types::CompanyRecord;

/// Find a company by exact name
pub async fn find_company_by_name(pool: &PgPool, name: &str) -> Result<Option<Uuid>> {
    let result = sqlx::query_scalar(r#"SELECT id FROM companies WHERE name = $1"#)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

/// Insert a single company. Constraint violations (duplicate GST, format
/// checks, missing required columns) surface as database errors for the
/// bulk gate to classify.
pub async fn insert_company(pool: &PgPool, record: &CompanyRecord) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO companies (id, name, gst_number, apob, city, country, contact, address,
            created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
        "#,
    )
    .bind(id)
    .bind(&record.name)
    .bind(&record.gst_number)
    .bind(record.apob.as_deref())
    .bind(record.city.as_deref())
    .bind(&record.country)
    .bind(record.contact.as_deref())
    .bind(record.address.as_deref())
    .execute(pool)
    .await?;

    Ok(id)
}

#[async_trait]
impl CompanyDirectory for PgPool {
    async fn company_id_by_name(&self, name: &str) -> Result<Option<Uuid>> {
        find_company_by_name(self, name).await
    }
}

#[async_trait]
impl BulkSink<CompanyRecord> for PgPool {
    fn identifier(&self, record: &CompanyRecord) -> Option<String> {
        Some(record.gst_number.clone())
    }

    async fn insert_one(&self, record: &CompanyRecord) -> Result<(), InsertError> {
        insert_company(self, record).await?;
        Ok(())
    }
}
