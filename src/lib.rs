mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, limiter, utils};

use limiter::rate_limiter::SubmissionLimiter;
use repositories::sqlx_repo::{
    SqlxContactRepo, SqlxEventRepo, SqlxMediaRepo, SqlxMemberRepo, SqlxNewsRepo, SqlxPartnerRepo,
};
use use_cases::{
    contact::ContactHandler, event::EventHandler, media::MediaHandler, news::NewsHandler,
    partner::PartnerHandler, registration::RegistrationHandler,
};

pub type AppEventHandler = EventHandler<SqlxEventRepo>;
pub type AppNewsHandler = NewsHandler<SqlxNewsRepo>;
pub type AppMediaHandler = MediaHandler<SqlxMediaRepo>;
pub type AppPartnerHandler = PartnerHandler<SqlxPartnerRepo>;
pub type AppRegistrationHandler = RegistrationHandler<SqlxMemberRepo>;
pub type AppContactHandler = ContactHandler<SqlxContactRepo>;

pub struct AppState {
    pub event_handler: AppEventHandler,
    pub news_handler: AppNewsHandler,
    pub media_handler: AppMediaHandler,
    pub partner_handler: AppPartnerHandler,
    pub registration_handler: AppRegistrationHandler,
    pub contact_handler: AppContactHandler,
    pub form_limiter: SubmissionLimiter,
    pub trust_proxy: bool,
    pub pool: sqlx::PgPool,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        AppState {
            event_handler: EventHandler::new(SqlxEventRepo::new(pool.clone())),
            news_handler: NewsHandler::new(SqlxNewsRepo::new(pool.clone())),
            media_handler: MediaHandler::new(SqlxMediaRepo::new(pool.clone())),
            partner_handler: PartnerHandler::new(SqlxPartnerRepo::new(pool.clone())),
            registration_handler: RegistrationHandler::new(SqlxMemberRepo::new(pool.clone())),
            contact_handler: ContactHandler::new(SqlxContactRepo::new(pool.clone())),
            form_limiter: SubmissionLimiter::per_hour(config.form_submissions_per_hour),
            trust_proxy: config.trust_proxy,
            pool,
        }
    }
}
