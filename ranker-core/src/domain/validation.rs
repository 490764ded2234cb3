use super::work::Category;

/// Validation errors for user input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title can't be blank")]
    MissingTitle,

    #[error("Category can't be blank")]
    MissingCategory,

    #[error("Invalid category '{0}': must be one of album, book, movie")]
    InvalidCategory(String),

    #[error("Title '{title}' has already been taken for {category}")]
    DuplicateTitle { title: String, category: Category },

    #[error("Invalid publication year {0}")]
    InvalidPublicationYear(i32),

    #[error("Invalid username: must be 1-50 characters")]
    InvalidUsername,
}
