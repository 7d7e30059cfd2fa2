//! Author model and form

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::display;
use crate::validation::{
    escape_in_place, parse_optional_date, trim_in_place, validate_name, validate_optional_date,
    FormErrors, FormInput,
};

/// Stored author
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Sanitized values for create and full replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorInput {
    pub fn into_author(self, id: Uuid) -> Author {
        Author {
            id,
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Submitted author form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "must be specified."),
        custom(function = "validate_name")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "must be specified."),
        custom(function = "validate_name")
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = "validate_optional_date"))]
    pub date_of_death: String,
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: display::input_date_or_empty(author.date_of_birth),
            date_of_death: display::input_date_or_empty(author.date_of_death),
        }
    }
}

impl FormInput for AuthorForm {
    type Output = AuthorInput;

    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("first_name", "First name"),
        ("family_name", "Family name"),
        ("date_of_birth", "Date of birth"),
        ("date_of_death", "Date of death"),
    ];

    fn trim(&mut self) {
        trim_in_place(&mut self.first_name);
        trim_in_place(&mut self.family_name);
        trim_in_place(&mut self.date_of_birth);
        trim_in_place(&mut self.date_of_death);
    }

    fn escape(&mut self) {
        escape_in_place(&mut self.first_name);
        escape_in_place(&mut self.family_name);
        escape_in_place(&mut self.date_of_birth);
        escape_in_place(&mut self.date_of_death);
    }

    fn coerce(&self) -> Result<AuthorInput, FormErrors> {
        Ok(AuthorInput {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: parse_optional_date(&self.date_of_birth),
            date_of_death: parse_optional_date(&self.date_of_death),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{sanitize, Sanitized};

    fn form(first: &str, family: &str, born: &str, died: &str) -> AuthorForm {
        AuthorForm {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: born.to_string(),
            date_of_death: died.to_string(),
        }
    }

    #[test]
    fn test_valid_author_is_trimmed_and_coerced() {
        match sanitize(form("  Jane ", "Austen", "1775-12-16", "")) {
            Sanitized::Valid(input) => {
                assert_eq!(input.first_name, "Jane");
                assert_eq!(input.family_name, "Austen");
                assert_eq!(input.date_of_birth, NaiveDate::from_ymd_opt(1775, 12, 16));
                assert_eq!(input.date_of_death, None);
            }
            Sanitized::Invalid { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_whitespace_names_are_required() {
        match sanitize(form("   ", "", "", "")) {
            Sanitized::Invalid { form, errors } => {
                assert_eq!(form.first_name, "");
                let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(
                    messages,
                    vec!["First name must be specified.", "Family name must be specified."]
                );
            }
            Sanitized::Valid(_) => panic!("blank names accepted"),
        }
    }

    #[test]
    fn test_non_alphanumeric_name_is_rejected_and_escaped() {
        match sanitize(form("<b>Jane</b>", "Austen", "", "")) {
            Sanitized::Invalid { form, errors } => {
                assert!(errors.has("first_name"));
                assert_eq!(errors.len(), 1);
                assert_eq!(form.first_name, "&lt;b&gt;Jane&lt;&#x2F;b&gt;");
            }
            Sanitized::Valid(_) => panic!("markup accepted in a name"),
        }
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        match sanitize(form("Jane", "Austen", "not-a-date", "")) {
            Sanitized::Invalid { errors, .. } => {
                assert!(errors.has("date_of_birth"));
                assert!(!errors.has("date_of_death"));
                let message = &errors.iter().next().unwrap().message;
                assert_eq!(message, "Date of birth is not a valid date.");
            }
            Sanitized::Valid(_) => panic!("bad date accepted"),
        }
    }

    #[test]
    fn test_invalid_dates_are_escaped_for_redisplay() {
        match sanitize(form("Jane", "Austen", "\"><script>", "1817/07/18")) {
            Sanitized::Invalid { form, errors } => {
                assert!(errors.has("date_of_birth"));
                assert!(errors.has("date_of_death"));
                assert_eq!(form.date_of_birth, "&quot;&gt;&lt;script&gt;");
                assert_eq!(form.date_of_death, "1817&#x2F;07&#x2F;18");
            }
            Sanitized::Valid(_) => panic!("bad dates accepted"),
        }
    }

    #[test]
    fn test_form_from_author_uses_input_dates() {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            family_name: "Austen".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1775, 12, 16),
            date_of_death: None,
        };
        let form = AuthorForm::from(&author);
        assert_eq!(form.date_of_birth, "1775-12-16");
        assert_eq!(form.date_of_death, "");
    }
}
