pub mod assignments;
pub mod common;
pub mod files;
pub mod grades;
pub mod lesson_plans;
pub mod materials;
pub mod profiles;
pub mod school;
pub mod submissions;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;
