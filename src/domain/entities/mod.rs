pub mod contact;
pub mod event;
pub mod media;
pub mod member;
pub mod news;
pub mod partner;
pub mod response;
pub mod validation;
