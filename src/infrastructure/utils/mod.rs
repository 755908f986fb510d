pub mod get_client_ip;
pub mod html;
pub mod string_array;
pub mod valid_id;
