use validator::Validate;

use crate::{
    entities::partner::{NewPartnerRequest, Partner, PartnerFilter, PartnerInsert, UpdatePartnerRequest},
    errors::AppError,
    repositories::partner::PartnerRepository,
    use_cases::or_not_found,
    utils::valid_id::valid_id,
};

pub struct PartnerHandler<R>
where
    R: PartnerRepository,
{
    pub partner_repo: R,
}

impl<R> PartnerHandler<R>
where
    R: PartnerRepository,
{
    pub fn new(partner_repo: R) -> Self {
        PartnerHandler { partner_repo }
    }

    pub async fn list_partners(&self, filter: &PartnerFilter) -> Result<Vec<Partner>, AppError> {
        self.partner_repo
            .list_partners(filter)
            .await?
            .into_iter()
            .map(Partner::try_from)
            .collect()
    }

    pub async fn create_partner(&self, request: NewPartnerRequest) -> Result<Partner, AppError> {
        request.validate()?;

        let row = self.partner_repo.create_partner(&request.into()).await?;
        Partner::try_from(row)
    }

    pub async fn get_partner(&self, id: &str) -> Result<Partner, AppError> {
        let valid_id = valid_id(id)?;
        let row = self.partner_repo
            .get_partner(valid_id)
            .await
            .map_err(or_not_found("Partner"))?;
        Partner::try_from(row)
    }

    pub async fn update_partner(&self, id: &str, request: &UpdatePartnerRequest) -> Result<Partner, AppError> {
        let valid_id = valid_id(id)?;
        request.validate()?;

        if request.is_empty() {
            return Err(AppError::InvalidInput("No fields to update".into()));
        }

        let row = self.partner_repo
            .update_partner(valid_id, request)
            .await
            .map_err(or_not_found("Partner"))?;
        Partner::try_from(row)
    }

    pub async fn delete_partner(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_id(id)?;
        self.partner_repo
            .delete_partner(valid_id)
            .await
            .map_err(or_not_found("Partner"))
    }
}
