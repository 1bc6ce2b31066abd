pub mod login;
pub mod logout;
pub mod register;
pub mod update;

pub use login::handle_login;
pub use logout::handle_logout;
pub use register::handle_register;
pub use update::{handle_update_details, handle_update_password};
