use validator::Validate;

use crate::{
    entities::contact::{ContactForm, ContactInsert, ContactReceipt},
    errors::AppError,
    repositories::contact::ContactRepository,
};

pub struct ContactHandler<R>
where
    R: ContactRepository,
{
    pub contact_repo: R,
}

impl<R> ContactHandler<R>
where
    R: ContactRepository,
{
    pub fn new(contact_repo: R) -> Self {
        ContactHandler { contact_repo }
    }

    /// Handles a submission of the contact form
    pub async fn submit(&self, form: ContactForm) -> Result<ContactReceipt, AppError> {
        form.validate()?;

        let saved = self.contact_repo
            .create_contact_message(&ContactInsert::from(form))
            .await?;

        Ok(ContactReceipt {
            id: saved.id,
            message: "Your message has been received.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::contact::ContactMessage, repositories::contact::MockContactRepository};
    use chrono::Utc;

    #[actix_rt::test]
    async fn stores_normalized_message() {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact_message()
            .withf(|msg: &ContactInsert| msg.email == "lan@example.com")
            .times(1)
            .returning(|msg| {
                Ok(ContactMessage {
                    id: 21,
                    name: msg.name.clone(),
                    email: msg.email.clone(),
                    phone: msg.phone.clone(),
                    subject: msg.subject.clone(),
                    message: msg.message.clone(),
                    created_at: Utc::now(),
                })
            });

        let handler = ContactHandler::new(repo);
        let receipt = handler
            .submit(ContactForm {
                name: "Lan".into(),
                email: "Lan@Example.com".into(),
                phone: None,
                subject: Some("Hợp tác".into()),
                message: "Xin chào CLB".into(),
            })
            .await
            .unwrap();

        assert_eq!(receipt.id, 21);
    }
}
