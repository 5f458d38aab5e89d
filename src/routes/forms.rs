use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::{
    auth::Role,
    db::dao::NewProduce,
    error::AppError,
    services::{Registration, account_service::normalize_email},
};

pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";
pub const INVALID_ROLE: &str = "Please choose a valid role";
pub const INVALID_QUANTITY: &str = "Quantity must be a positive number";
pub const INVALID_HARVEST_DATE: &str = "Harvest date must be a valid date (YYYY-MM-DD)";

const HARVEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields arrive as form strings so a missing field becomes a validation
/// message instead of an extractor rejection.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: String,
    #[validate(length(max = 20, message = "Contact number must be at most 20 characters"))]
    pub contact_no: Option<String>,
}

impl RegisterForm {
    pub fn into_registration(mut self) -> Result<Registration, AppError> {
        if [&self.name, &self.email, &self.password, &self.role]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(AppError::bad_request(FIELDS_REQUIRED));
        }

        self.email = normalize_email(&self.email);
        self.validate().map_err(|errors| {
            reject(&errors, &["name", "email", "password", "contact_no"])
        })?;

        let role = self
            .role
            .parse::<Role>()
            .map_err(|_| AppError::bad_request(INVALID_ROLE))?;

        Ok(Registration {
            name: self.name.trim().to_string(),
            email: self.email,
            password: self.password,
            role,
            contact_no: self
                .contact_no
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn credentials(&self) -> Result<(String, &str), AppError> {
        let email = normalize_email(&self.email);
        if email.is_empty() || self.password.is_empty() {
            return Err(AppError::bad_request(CREDENTIALS_REQUIRED));
        }
        Ok((email, self.password.as_str()))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProduceForm {
    #[validate(length(max = 100, message = "Crop name must be at most 100 characters"))]
    pub crop_name: String,
    pub quantity: String,
    #[validate(length(max = 50, message = "Quality must be at most 50 characters"))]
    pub quality: String,
    pub harvest_date: String,
}

impl ProduceForm {
    pub fn into_new_produce(self) -> Result<NewProduce, AppError> {
        let crop_name = self.crop_name.trim().to_string();
        let quality = self.quality.trim().to_string();
        let quantity = self.quantity.trim();
        let harvest_date = self.harvest_date.trim();

        if [crop_name.as_str(), quality.as_str(), quantity, harvest_date]
            .iter()
            .any(|value| value.is_empty())
        {
            return Err(AppError::bad_request(FIELDS_REQUIRED));
        }

        self.validate()
            .map_err(|errors| reject(&errors, &["crop_name", "quality"]))?;

        let quantity = quantity
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or_else(|| AppError::bad_request(INVALID_QUANTITY))?;
        let harvest_date = NaiveDate::parse_from_str(harvest_date, HARVEST_DATE_FORMAT)
            .map_err(|_| AppError::bad_request(INVALID_HARVEST_DATE))?;

        Ok(NewProduce {
            crop_name,
            quantity,
            quality,
            harvest_date,
        })
    }
}

fn reject(errors: &ValidationErrors, order: &[&str]) -> AppError {
    AppError::bad_request(
        first_message(errors, order).unwrap_or_else(|| "Invalid form input".to_string()),
    )
}

/// First message in form order so the user sees the topmost problem.
fn first_message(errors: &ValidationErrors, order: &[&str]) -> Option<String> {
    let fields = errors.field_errors();
    order
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|message| message.to_string()))
}
