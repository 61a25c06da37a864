pub mod assignments;

pub mod files;

pub mod grades;

pub mod lesson_plans;

pub mod materials;

pub mod profiles;

pub mod submissions;

pub use assignments::configure_assignment_routes;
pub use files::configure_file_routes;
pub use grades::configure_grade_routes;
pub use lesson_plans::configure_lesson_plan_routes;
pub use materials::configure_material_routes;
pub use profiles::configure_profile_routes;
pub use submissions::configure_submission_routes;
