use validator::Validate;

use crate::{
    entities::member::{JoinRequest, Member, MemberFilter, MemberInsert},
    errors::AppError,
    repositories::member::MemberRepository,
};

pub struct RegistrationHandler<R>
where
    R: MemberRepository,
{
    pub member_repo: R,
}

impl<R> RegistrationHandler<R>
where
    R: MemberRepository,
{
    pub fn new(member_repo: R) -> Self {
        RegistrationHandler { member_repo }
    }

    /// Validates and stores a registrant. Uniqueness of email and student id
    /// is enforced by the database, not checked beforehand.
    pub async fn register(&self, request: JoinRequest) -> Result<Member, AppError> {
        let request = request.trimmed();
        request.validate()?;

        let insert = MemberInsert::from(request);
        let member = self.member_repo.create_member(&insert).await?;

        tracing::info!(member_id = member.id, ban = %member.ban, "New member registered");
        Ok(member)
    }

    pub async fn list_members(&self, filter: &MemberFilter) -> Result<Vec<Member>, AppError> {
        self.member_repo.list_members(filter).await
    }
}
