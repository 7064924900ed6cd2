//! Allow-listed projections
//!
//! Callers may narrow the columns a list endpoint returns, but only by
//! public field name. Each name maps to a fixed SQL expression; anything
//! outside the list is rejected before a query is built.

use std::str::FromStr;

use super::ValidationError;

/// How a projected column is decoded into JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Text,
}

/// A selectable column with a fixed SQL expression.
pub trait Column: Copy + FromStr<Err = ValidationError> {
    /// Public field name, also used as the SQL alias
    fn name(&self) -> &'static str;

    /// Qualified SQL expression
    fn expr(&self) -> &'static str;

    fn kind(&self) -> ColumnKind;
}

/// Parse a comma-separated column list, or fall back to `default`.
///
/// Blank entries are ignored and duplicates keep their first position.
pub fn parse_columns<C: Column + PartialEq>(
    raw: Option<&str>,
    default: &[C],
) -> Result<Vec<C>, ValidationError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(default.to_vec());
    };

    let mut columns: Vec<C> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let column = name.parse::<C>()?;
        if !columns.contains(&column) {
            columns.push(column);
        }
    }

    if columns.is_empty() {
        return Ok(default.to_vec());
    }
    Ok(columns)
}

/// Recipe list columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeColumn {
    RecipeId,
    RecipeName,
    Cuisine,
    CookingTime,
    UserId,
    CreatedBy,
    CuisineLevel,
    ImageUrl,
    Caption,
}

impl RecipeColumn {
    pub const DEFAULT: &'static [RecipeColumn] = &[
        Self::RecipeId,
        Self::RecipeName,
        Self::Cuisine,
        Self::CookingTime,
        Self::UserId,
        Self::CreatedBy,
        Self::CuisineLevel,
    ];

    pub const IMAGE: &'static [RecipeColumn] = &[Self::ImageUrl, Self::Caption];

    const ALL: &'static [RecipeColumn] = &[
        Self::RecipeId,
        Self::RecipeName,
        Self::Cuisine,
        Self::CookingTime,
        Self::UserId,
        Self::CreatedBy,
        Self::CuisineLevel,
        Self::ImageUrl,
        Self::Caption,
    ];

    /// Whether selecting this column requires the images join
    pub fn needs_images(&self) -> bool {
        matches!(self, Self::ImageUrl | Self::Caption)
    }
}

impl Column for RecipeColumn {
    fn name(&self) -> &'static str {
        match self {
            Self::RecipeId => "RecipeID",
            Self::RecipeName => "RecipeName",
            Self::Cuisine => "Cuisine",
            Self::CookingTime => "CookingTime",
            Self::UserId => "UserID",
            Self::CreatedBy => "CreatedBy",
            Self::CuisineLevel => "CuisineLevel",
            Self::ImageUrl => "ImageURL",
            Self::Caption => "Caption",
        }
    }

    fn expr(&self) -> &'static str {
        match self {
            Self::RecipeId => "r.recipe_id",
            Self::RecipeName => "r.recipe_name",
            Self::Cuisine => "r.cuisine",
            Self::CookingTime => "r.cooking_time::text",
            Self::UserId => "r.user_id",
            Self::CreatedBy => "u.user_name",
            Self::CuisineLevel => "cl.level",
            Self::ImageUrl => "i.url",
            Self::Caption => "i.caption",
        }
    }

    fn kind(&self) -> ColumnKind {
        match self {
            Self::RecipeId | Self::UserId => ColumnKind::Int,
            _ => ColumnKind::Text,
        }
    }
}

impl FromStr for RecipeColumn {
    type Err = ValidationError;

    /// Field names match case-insensitively (`recipename` == `RecipeName`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownColumn {
                value: s.to_owned(),
            })
    }
}

/// User list columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserColumn {
    UserId,
    UserName,
    Points,
    Rank,
}

impl UserColumn {
    pub const DEFAULT: &'static [UserColumn] =
        &[Self::UserId, Self::UserName, Self::Points, Self::Rank];
}

impl Column for UserColumn {
    fn name(&self) -> &'static str {
        match self {
            Self::UserId => "UserID",
            Self::UserName => "UserName",
            Self::Points => "Points",
            Self::Rank => "Rank",
        }
    }

    fn expr(&self) -> &'static str {
        match self {
            Self::UserId => "u.user_id",
            Self::UserName => "u.user_name",
            Self::Points => "u.points",
            Self::Rank => "rk.rank_name",
        }
    }

    fn kind(&self) -> ColumnKind {
        match self {
            Self::UserId | Self::Points => ColumnKind::Int,
            Self::UserName | Self::Rank => ColumnKind::Text,
        }
    }
}

impl FromStr for UserColumn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::UnknownColumn {
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_when_absent_or_blank() {
        let cols = parse_columns(None, RecipeColumn::DEFAULT).unwrap();
        assert_eq!(cols, RecipeColumn::DEFAULT);

        let cols = parse_columns(Some("  "), UserColumn::DEFAULT).unwrap();
        assert_eq!(cols, UserColumn::DEFAULT);
    }

    #[test]
    fn narrows_in_caller_order() {
        let cols = parse_columns(Some("Cuisine, RecipeID"), RecipeColumn::DEFAULT).unwrap();
        assert_eq!(cols, vec![RecipeColumn::Cuisine, RecipeColumn::RecipeId]);
    }

    #[test]
    fn case_insensitive_and_deduplicated() {
        let cols = parse_columns(Some("username,USERNAME,rank"), UserColumn::DEFAULT).unwrap();
        assert_eq!(cols, vec![UserColumn::UserName, UserColumn::Rank]);
    }

    #[test]
    fn rejects_unknown_and_injection() {
        let err = parse_columns(Some("RecipeID,1;DROP TABLE recipes"), RecipeColumn::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownColumn { .. }));

        let err = parse_columns(Some("password"), UserColumn::DEFAULT).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownColumn {
                value: "password".into()
            }
        );
    }

    #[test]
    fn image_columns_need_join() {
        assert!(RecipeColumn::ImageUrl.needs_images());
        assert!(!RecipeColumn::CreatedBy.needs_images());
        assert!(RecipeColumn::DEFAULT.iter().all(|c| !c.needs_images()));
    }

    #[test]
    fn every_name_round_trips() {
        for c in RecipeColumn::ALL {
            assert_eq!(c.name().parse::<RecipeColumn>().unwrap(), *c);
        }
    }
}
