//! Domain models with validation at construction
//!
//! All request input is validated when creating these types.
//! Invalid input returns ValidationError (400), never reaches SQL.

pub mod columns;
pub mod cooking_time;
pub mod recipe;
pub mod text;
pub mod validation;

pub use columns::{parse_columns, Column, ColumnKind, RecipeColumn, UserColumn};
pub use cooking_time::CookingTime;
pub use recipe::{NewRecipe, RecipeQuery, RecipeUpdate, StepList};
pub use text::{Cuisine, Instruction, RecipeName, UserName};
pub use validation::ValidationError;
