//! Genre model and form

use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{escape_in_place, trim_in_place, FormErrors, FormInput};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreInput {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 3, max = 100, message = "must contain between 3 and 100 characters."))]
    pub name: String,
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

impl FormInput for GenreForm {
    type Output = GenreInput;

    const FIELDS: &'static [(&'static str, &'static str)] = &[("name", "Genre name")];

    fn trim(&mut self) {
        trim_in_place(&mut self.name);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.name);
    }

    fn coerce(&self) -> Result<GenreInput, FormErrors> {
        Ok(GenreInput {
            name: self.name.clone(),
        })
    }
}
