use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 2, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    #[validate(length(max = 150))]
    pub subject: Option<String>,

    #[validate(length(min = 5, max = 2000))]
    pub message: String,
}

impl ContactForm {
    /// Key used to rate-limit submissions from one address.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInsert {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl From<ContactForm> for ContactInsert {
    fn from(form: ContactForm) -> Self {
        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        ContactInsert {
            email: form.normalized_email(),
            name: form.name.trim().to_string(),
            phone: non_blank(form.phone),
            subject: non_blank(form.subject),
            message: form.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub id: i32,
    pub message: String,
}
