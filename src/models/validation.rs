//! Validation messages the stand shows to users

pub const LOW_AMOUNT: &str = "has to be not less then 0.01";
pub const NO_CATEGORY: &str = "Please choose category";
pub const USERNAME_LENGTH: &str = "should be from 3 to 50 characters";
pub const PASSWORD_LENGTH: &str = "should be from 3 to 12 characters";
pub const DIFFERENT_PASSWORDS: &str = "should be equal";
pub const LOGIN_BAD_CREDENTIALS: &str = "Bad credentials";
pub const PROFILE_NAME_LENGTH: &str = "has to be not longer that 50 symbols";
pub const CATEGORY_DUPLICATE: &str = "Cannot save duplicates";
pub const CATEGORY_LENGTH: &str = "is from 2 to 50 symbols";

pub const PAGE_INDEX_NEGATIVE: &str = "Page index must not be less than zero";
pub const PAGE_SIZE_TOO_SMALL: &str = "Page size must not be less than one";
