//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - one statement per method, run through `with_connection`
//! - every value bound as a parameter, never interpolated
//! - transactions for multi-row writes
//! - failures returned as `DbError`, empty results as empty `Vec`s

pub mod images;
pub mod likes;
pub mod locations;
pub mod pantries;
pub mod projection;
pub mod recipes;
pub mod steps;
pub mod users;

pub use images::{Image, ImageRepo};
pub use likes::{LikeRepo, LikedRecipe, RecipeSummary};
pub use locations::{Location, LocationRepo};
pub use pantries::{Pantry, PantryRepo};
pub use projection::JsonRow;
pub use recipes::RecipeRepo;
pub use steps::{Step, StepRepo};
pub use users::UserRepo;
