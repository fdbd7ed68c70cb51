//! Repository layer.
//!
//! Each repository is a zero-sized struct providing CRUD methods that accept
//! `&DataStore` as the first argument. Callers are responsible for holding
//! the store's writer lock across a mutation.

pub mod asset_repo;
pub mod attachment_repo;
pub mod department_repo;
pub mod editing_task_repo;
pub mod meal_repo;
pub mod schedule_repo;
pub mod script_repo;
pub mod site_repo;
pub mod storyboard_repo;

pub use asset_repo::AssetRepo;
pub use attachment_repo::AttachmentRepo;
pub use department_repo::DepartmentRepo;
pub use editing_task_repo::EditingTaskRepo;
pub use meal_repo::MealRepo;
pub use schedule_repo::ScheduleRepo;
pub use script_repo::ScriptRepo;
pub use site_repo::SiteRepo;
pub use storyboard_repo::StoryboardRepo;
