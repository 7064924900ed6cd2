//! Recipe inputs: creation, partial update, step lists and list queries

use super::columns::{parse_columns, RecipeColumn};
use super::{CookingTime, Cuisine, Instruction, RecipeName, ValidationError};

/// Maximum steps accepted in one request
const MAX_STEPS: usize = 100;

/// A validated recipe ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: RecipeName,
    pub cuisine: Cuisine,
    pub cooking_time: CookingTime,
    /// Creator; must reference an existing user (enforced by the store)
    pub user_id: i64,
}

impl NewRecipe {
    pub fn new(
        name: &str,
        cuisine: &str,
        cooking_time: &str,
        user_id: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: RecipeName::new(name)?,
            cuisine: Cuisine::new(cuisine)?,
            cooking_time: CookingTime::parse(cooking_time)?,
            user_id,
        })
    }
}

/// Partial update; at least one field is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeUpdate {
    pub name: Option<RecipeName>,
    pub cuisine: Option<Cuisine>,
    pub cooking_time: Option<CookingTime>,
}

impl RecipeUpdate {
    pub fn new(
        name: Option<&str>,
        cuisine: Option<&str>,
        cooking_time: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let update = Self {
            name: name.map(RecipeName::new).transpose()?,
            cuisine: cuisine.map(Cuisine::new).transpose()?,
            cooking_time: cooking_time.map(CookingTime::parse).transpose()?,
        };

        if update.name.is_none() && update.cuisine.is_none() && update.cooking_time.is_none() {
            return Err(ValidationError::Empty {
                field: "recipe update",
            });
        }
        Ok(update)
    }
}

/// Ordered, non-empty list of step instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepList(Vec<Instruction>);

impl StepList {
    /// # Example
    /// ```
    /// use recipeshare_server::models::StepList;
    ///
    /// let steps = StepList::new(&["Boil water", "Add pasta"]).unwrap();
    /// assert_eq!(steps.len(), 2);
    /// assert!(StepList::new::<&str>(&[]).is_err());
    /// ```
    pub fn new<S: AsRef<str>>(steps: &[S]) -> Result<Self, ValidationError> {
        if steps.is_empty() {
            return Err(ValidationError::Empty { field: "steps" });
        }
        if steps.len() > MAX_STEPS {
            return Err(ValidationError::TooLong {
                field: "steps",
                max: MAX_STEPS,
            });
        }

        steps
            .iter()
            .map(|s| Instruction::new(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.0.iter()
    }
}

/// Recipe list query, built from `/recipes` query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    pub columns: Vec<RecipeColumn>,
    /// Exact cuisine match
    pub cuisine: Option<Cuisine>,
    pub id: Option<i64>,
    /// LEFT JOIN recipe images (one row per image)
    pub include_images: bool,
    /// Keep only image rows without a caption
    pub captionless: bool,
}

impl RecipeQuery {
    /// Build a query from raw parameters.
    ///
    /// `captionless` implies the images join, as does naming an image
    /// column explicitly.
    pub fn from_params(
        columns: Option<&str>,
        cuisine: Option<&str>,
        id: Option<i64>,
        img: bool,
        captionless: bool,
    ) -> Result<Self, ValidationError> {
        let include_images = img || captionless;

        let default: Vec<RecipeColumn> = if include_images {
            [RecipeColumn::DEFAULT, RecipeColumn::IMAGE].concat()
        } else {
            RecipeColumn::DEFAULT.to_vec()
        };
        let columns = parse_columns(columns, &default)?;
        let include_images = include_images || columns.iter().any(RecipeColumn::needs_images);

        let cuisine = cuisine
            .filter(|s| !s.trim().is_empty())
            .map(Cuisine::new)
            .transpose()?;

        Ok(Self {
            columns,
            cuisine,
            id,
            include_images,
            captionless,
        })
    }

    /// All default columns for one recipe.
    pub fn by_id(id: i64) -> Self {
        Self {
            columns: RecipeColumn::DEFAULT.to_vec(),
            cuisine: None,
            id: Some(id),
            include_images: false,
            captionless: false,
        }
    }
}
