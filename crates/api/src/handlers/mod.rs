pub mod assets;
pub mod attachments;
pub mod comparison;
pub mod departments;
pub mod editing_tasks;
pub mod files;
pub mod meals;
pub mod schedules;
pub mod scripts;
pub mod sites;
pub mod storyboards;
