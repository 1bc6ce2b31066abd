pub mod read;
pub mod write;

pub use read::{
    handle_advanced_search, handle_get_book, handle_list_books, handle_search,
    handle_sort_by_range,
};
pub use write::{handle_create_book, handle_delete_book, handle_update_book};
