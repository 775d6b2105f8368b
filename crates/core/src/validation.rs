//! Input validation rules shared by registration and recipe endpoints.
//!
//! Each function returns `Err(CoreError::Validation)` with a human-readable
//! message; the API layer maps that to a 400 response.

use std::collections::HashSet;

use crate::constants::{
    MAX_POSITIVE_VALUE, MAX_RECIPE_NAME_LEN, MAX_USER_NAME_LEN, MIN_PASSWORD_LEN,
    MIN_POSITIVE_VALUE,
};
use crate::error::CoreError;
use crate::types::DbId;

/// An ingredient reference within a recipe payload: ingredient id + amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientRef {
    pub id: DbId,
    pub amount: i32,
}

/// Validate the ingredient list of a recipe create/update payload.
///
/// Rules: at least one ingredient, no duplicate ingredient ids, every
/// amount within `[MIN_POSITIVE_VALUE, MAX_POSITIVE_VALUE]`.
pub fn validate_ingredient_list(ingredients: &[IngredientRef]) -> Result<(), CoreError> {
    if ingredients.is_empty() {
        return Err(CoreError::Validation(
            "Recipe must contain at least one ingredient".into(),
        ));
    }

    let unique_ids: HashSet<DbId> = ingredients.iter().map(|i| i.id).collect();
    if unique_ids.len() != ingredients.len() {
        return Err(CoreError::Validation(
            "Ingredients must not repeat within a recipe".into(),
        ));
    }

    for ingredient in ingredients {
        validate_positive_value(ingredient.amount, "Ingredient amount")?;
    }
    Ok(())
}

/// Validate a cooking time or ingredient amount against the shared range.
pub fn validate_positive_value(value: i32, field: &str) -> Result<(), CoreError> {
    if value < MIN_POSITIVE_VALUE {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {MIN_POSITIVE_VALUE}"
        )));
    }
    if value > MAX_POSITIVE_VALUE {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_POSITIVE_VALUE}"
        )));
    }
    Ok(())
}

/// Validate a recipe name: non-empty after trimming, within the length cap.
pub fn validate_recipe_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Recipe name must not be empty".into()));
    }
    if name.len() > MAX_RECIPE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Recipe name must be at most {MAX_RECIPE_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a username: letters, digits, and `@ . + - _`, length-capped.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation("Username must not be empty".into()));
    }
    if username.len() > MAX_USER_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Username must be at most {MAX_USER_NAME_LEN} characters"
        )));
    }
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !valid {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, and @/./+/-/_".into(),
        ));
    }
    Ok(())
}

/// Minimal structural email check; full deliverability is out of scope.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(CoreError::Validation("Invalid email address".into()));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(CoreError::Validation("Invalid email address".into()));
    }
    Ok(())
}

/// Validate that a password meets the minimum length requirement.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}
