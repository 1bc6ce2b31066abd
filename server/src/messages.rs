//! User-facing message texts. Clients match on some of these, keep them stable.

// Registration and account details
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const INVALID_EMAIL: &str = "Invalid email format.";
pub const INVALID_USERNAME: &str =
    "Username must be between 3 and 20 characters and contain only letters and numbers.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 5 characters long.";
pub const PASSWORD_NEEDS_LOWERCASE: &str = "Password must contain at least one lowercase letter.";
pub const PASSWORD_NEEDS_UPPERCASE: &str = "Password must contain at least one uppercase letter.";
pub const PASSWORD_NEEDS_DIGIT: &str = "Password must contain at least one digit.";
pub const PASSWORD_NEEDS_SPECIAL: &str = "Password must contain at least one special character.";
pub const EMAIL_EXISTS: &str = "Email already exists. Existing User? Try signing in.";
pub const USERNAME_EXISTS: &str = "Username already exists. Existing User? Try signing in.";
pub const EMAIL_AND_USERNAME_EXIST: &str = "Email and Username both exist. Try signing in.";
pub const REGISTERED: &str = "User registered successfully.";
pub const ADMIN_REGISTERED: &str = "Admin registered successfully.";
pub const ADMIN_REQUIRED: &str = "Only an admin can register another admin.";
pub const NOTHING_TO_UPDATE: &str = "Provide a username or an email to update.";
pub const DETAILS_UPDATED: &str = "User details updated successfully.";

// Login / logout / password
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const ACCOUNT_DEACTIVATED: &str = "Your account has been deactivated. Contact an admin.";
pub const NOT_LOGGED_IN: &str = "User not logged in.";
pub const IDENTIFIER_REQUIRED: &str = "Username/ Email is required.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";
pub const LOGGED_OUT: &str = "Logged out successfully.";
pub const OLD_PASSWORD_EMPTY: &str = "Old Password cannot be empty";
pub const NEW_PASSWORD_EMPTY: &str = "New Password cannot be empty";
pub const PASSWORD_UNCHANGED: &str = "New password must be different from the old password.";
pub const PASSWORD_UPDATED: &str = "Password updated successfully. Please log in again.";
pub const AUTH_REQUIRED: &str = "Authentication required";
pub const INSUFFICIENT_PRIVILEGES: &str = "Insufficient privileges";

// Admin
pub const USER_NOT_FOUND: &str = "User not found.";
pub const CANNOT_DEACTIVATE_SELF: &str = "Admins cannot deactivate their own account.";
pub const CANNOT_DELETE_SELF: &str = "Admins cannot delete their own account.";
pub const USER_DEACTIVATED: &str = "User deactivated successfully.";
pub const USER_ACTIVATED: &str = "User activated successfully.";
pub const USER_DELETED: &str = "User deleted successfully.";

// Catalog
pub const BOOK_FIELDS_REQUIRED: &str = "Title and Author are required.";
pub const FIELD_TOO_LONG: &str = "Title and Author must be at most 100 characters.";
pub const PRICE_NOT_POSITIVE: &str = "Price should be greater than 0";
pub const ISBN_LENGTH: &str = "ISBN must be between 10 and 13 digits long.";
pub const ISBN_DIGITS: &str = "ISBN must contain only digits.";
pub const INVALID_DISCOUNT: &str = "Discount must be greater than 0 and not more than the price.";
pub const ISBN_EXISTS: &str = "A book with this ISBN already exists.";
pub const ISBN_TAKEN_ON_UPDATE: &str = "This ISBN is already available. Please update with a unique ISBN";
pub const ID_MISMATCH: &str = "The ID in the URL does not match the ID in the body.";
pub const BOOK_NOT_FOUND: &str = "Book not found.";
pub const DELETE_ISBN_INVALID: &str =
    "Invalid ISBN number. It must be a positive numeric value.";
pub const BOOK_DELETED: &str = "Book deleted successfully.";
pub const NO_BOOKS: &str = "No books available in the database.";
pub const NO_RECORDS: &str = "No records found";
pub const KEYWORD_INVALID: &str = "Keyword must contain only letters and numbers.";
pub const PRICE_RANGE_REQUIRED: &str = "minPrice and maxPrice are required";
pub const PRICE_NOT_A_NUMBER: &str = "minPrice and maxPrice must be numbers";
pub const PRICE_NEGATIVE: &str = "Price should have a positive value";
pub const PRICE_RANGE_INVERTED: &str = "maxPrice should be greater than minPrice";
pub const INVALID_ORDER: &str = "Invalid order method";
pub const INVALID_ID: &str = "Invalid id";
