pub mod content;
pub mod outline;
pub mod sanitize;
pub mod text;
pub mod validation;

pub use content::{
    BlogLength, BlogStatus, BlogStyle, BlogTone, Choice, ExportFormat, MediaKind, SortField,
    SortOrder,
};
pub use outline::Outline;
pub use validation::{Schema, Validation, validate_form_data};
