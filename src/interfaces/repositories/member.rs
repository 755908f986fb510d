use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::query::{FilteredSelect, SearchTarget},
    entities::member::{Member, MemberFilter, MemberInsert},
    errors::{AppError, DuplicateField},
    repositories::sqlx_repo::SqlxMemberRepo,
};

pub const EMAIL_CONSTRAINT: &str = "members_email_key";
pub const STUDENT_ID_CONSTRAINT: &str = "members_ma_sinh_vien_key";

pub const MEMBER_SEARCH: &[SearchTarget] = &[
    SearchTarget::Text("ho_ten"),
    SearchTarget::Text("ma_sinh_vien"),
    SearchTarget::Text("email"),
    SearchTarget::Text("truong"),
    SearchTarget::Text("khoa"),
];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn list_members(&self, filter: &MemberFilter) -> Result<Vec<Member>, AppError>;
    /// Inserts a registrant. A collision on email or student id comes back as
    /// `AppError::Duplicate` naming the field.
    async fn create_member(&self, member: &MemberInsert) -> Result<Member, AppError>;
}

impl SqlxMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxMemberRepo { pool }
    }
}

/// Identifies which unique constraint rejected the insert.
pub fn duplicate_field(err: &sqlx::Error) -> Option<DuplicateField> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.is_unique_violation() {
        return None;
    }
    match db_err.constraint() {
        Some(EMAIL_CONSTRAINT) => Some(DuplicateField::Email),
        Some(STUDENT_ID_CONSTRAINT) => Some(DuplicateField::StudentId),
        _ => None,
    }
}

fn registration_error(err: sqlx::Error) -> AppError {
    match duplicate_field(&err) {
        Some(field) => AppError::Duplicate(field),
        None => AppError::from(err),
    }
}

#[async_trait]
impl MemberRepository for SqlxMemberRepo {
    async fn list_members(&self, filter: &MemberFilter) -> Result<Vec<Member>, AppError> {
        let mut select = FilteredSelect::new("members");
        select
            .eq("ban", filter.ban.clone().filter(|b| !b.trim().is_empty()))
            .search(filter.search.as_deref(), MEMBER_SEARCH)
            .order_by_desc(&["created_at"])
            .paginate(filter.pagination());

        let mut builder = select.into_builder();
        let members = builder
            .build_query_as::<Member>()
            .fetch_all(&self.pool)
            .await?;

        Ok(members)
    }

    async fn create_member(&self, member: &MemberInsert) -> Result<Member, AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (
                ho_ten, ma_sinh_vien, email, so_dien_thoai, truong, khoa,
                nam_hoc, linh_vuc_quan_tam, ban, ly_do
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&member.ho_ten)
        .bind(&member.ma_sinh_vien)
        .bind(&member.email)
        .bind(&member.so_dien_thoai)
        .bind(&member.truong)
        .bind(&member.khoa)
        .bind(member.nam_hoc)
        .bind(&member.linh_vuc_quan_tam)
        .bind(&member.ban)
        .bind(&member.ly_do)
        .fetch_one(&mut *tx)
        .await
        .map_err(registration_error)?;

        tx.commit().await?;

        Ok(created)
    }
}
