pub mod admin;
pub mod book;
pub mod json_error;
pub mod jwt;
pub mod login;
pub mod register;
pub mod server_config;
pub mod update;

pub use self::admin::{BooksCountByUser, DeactivateData, UserSummary};
pub use self::book::{BookData, BookView};
pub use self::json_error::{ErrorResponse, MessageResponse};
pub use self::jwt::{ADMIN_ROLE, JwtClaims};
pub use self::login::{LoginData, TokenResponse};
pub use self::register::{RegistrationData, RegistrationResponse};
pub use self::update::{ChangePasswordData, UpdateDetailsData};
