pub mod books;
pub mod users;

pub use books::{handle_books_by_user, handle_books_count_by_user};
pub use users::{
    handle_deactivate_user, handle_delete_user, handle_logged_in_users, handle_register_admin,
    handle_registered_users,
};
