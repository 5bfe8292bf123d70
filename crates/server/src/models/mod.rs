//! Data models and their CRUD operations.

pub mod blog;
pub mod event;
pub mod poetry;
pub mod user;

pub use blog::{Blog, BlogChanges, NewBlog};
pub use event::{Event, EventChanges, NewEvent};
pub use poetry::{NewPoetry, Poetry, PoetryChanges};
pub use user::{UpsertUser, User};
