use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::query::{FilteredSelect, SearchTarget, UpdateSet},
    entities::partner::{PartnerFilter, PartnerInsert, PartnerRow, UpdatePartnerRequest},
    errors::AppError,
    repositories::sqlx_repo::{ensure_affected, SqlxPartnerRepo},
    utils::string_array::stringify_array,
};

pub const PARTNER_SEARCH: &[SearchTarget] = &[
    SearchTarget::Text("name"),
    SearchTarget::Text("description"),
];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn list_partners(&self, filter: &PartnerFilter) -> Result<Vec<PartnerRow>, AppError>;
    async fn create_partner(&self, partner: &PartnerInsert) -> Result<PartnerRow, AppError>;
    async fn get_partner(&self, id: i32) -> Result<PartnerRow, AppError>;
    async fn update_partner(&self, id: i32, partner: &UpdatePartnerRequest) -> Result<PartnerRow, AppError>;
    async fn delete_partner(&self, id: i32) -> Result<(), AppError>;
}

impl SqlxPartnerRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPartnerRepo { pool }
    }
}

#[async_trait]
impl PartnerRepository for SqlxPartnerRepo {
    async fn list_partners(&self, filter: &PartnerFilter) -> Result<Vec<PartnerRow>, AppError> {
        let mut select = FilteredSelect::new("partners");
        select
            .eq("type", filter.partner_type.map(|t| t.as_str()))
            .eq("status", filter.status.map(|s| s.as_str()))
            .search(filter.search.as_deref(), PARTNER_SEARCH)
            .order_by_desc(&["created_at"])
            .paginate(filter.pagination());

        let mut builder = select.into_builder();
        let rows = builder
            .build_query_as::<PartnerRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn create_partner(&self, partner: &PartnerInsert) -> Result<PartnerRow, AppError> {
        let row = sqlx::query_as::<_, PartnerRow>(
            r#"
            INSERT INTO partners (
                name, logo, type, description, website, email, phone, address,
                achievements, collaboration, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&partner.name)
        .bind(&partner.logo)
        .bind(partner.partner_type.as_str())
        .bind(&partner.description)
        .bind(&partner.website)
        .bind(&partner.email)
        .bind(&partner.phone)
        .bind(&partner.address)
        .bind(&partner.achievements)
        .bind(&partner.collaboration)
        .bind(partner.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_partner(&self, id: i32) -> Result<PartnerRow, AppError> {
        let row = sqlx::query_as::<_, PartnerRow>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn update_partner(&self, id: i32, partner: &UpdatePartnerRequest) -> Result<PartnerRow, AppError> {
        let mut update = UpdateSet::new("partners");
        update
            .set("name", partner.name.as_deref().map(|n| n.trim().to_string()))
            .set("logo", partner.logo.clone())
            .set("type", partner.partner_type.map(|t| t.as_str()))
            .set("description", partner.description.clone())
            .set("website", partner.website.clone())
            .set("email", partner.email.as_deref().map(|e| e.trim().to_lowercase()))
            .set("phone", partner.phone.clone())
            .set("address", partner.address.clone())
            .set("achievements", partner.achievements.as_deref().map(stringify_array))
            .set("collaboration", partner.collaboration.as_deref().map(stringify_array))
            .set("status", partner.status.map(|s| s.as_str()));

        let Some(mut builder) = update.finish(id) else {
            return Err(AppError::InvalidInput("No fields to update".into()));
        };

        let row = builder
            .build_query_as::<PartnerRow>()
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn delete_partner(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        ensure_affected(result, "Partner")
    }
}
