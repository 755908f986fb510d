pub mod contact;
pub mod events;
pub mod home;
pub mod json_error;
pub mod media;
pub mod members;
pub mod news;
pub mod partners;
pub mod system;
