//! Validation of user-entered trip fields.
//!
//! Front-ends collect everything as text. `TripForm::validate` checks the
//! whole form at once and either produces a `CreateTripRequest` or reports
//! every offending field, so a form can highlight all of them together.
//! `TripClient` never calls this; it sends whatever it is given.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{CreateTripRequest, Trip, DEFAULT_STATUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Destination,
    StartDate,
    EndDate,
    Budget,
    Travelers,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Destination => "destination",
            FormField::StartDate => "start date",
            FormField::EndDate => "end date",
            FormField::Budget => "budget",
            FormField::Travelers => "travelers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    InvalidDate,
    NotANumber,
    Negative,
    NotAnInteger,
    TooFew,
    EndsBeforeStart,
}

impl FieldProblem {
    fn describe(&self) -> &'static str {
        match self {
            FieldProblem::Missing => "is required",
            FieldProblem::InvalidDate => "must be a YYYY-MM-DD date",
            FieldProblem::NotANumber => "must be a number",
            FieldProblem::Negative => "must not be negative",
            FieldProblem::NotAnInteger => "must be a whole number",
            FieldProblem::TooFew => "must be at least 1",
            FieldProblem::EndsBeforeStart => "must not be before the start date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.as_str(), self.problem.describe())
    }
}

/// Every invalid field of a submitted form, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill all required fields")]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_invalid(&self, field: FormField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Raw form input. Every field is the text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripForm {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub travelers: String,
    pub description: String,
}

impl TripForm {
    /// Pre-fill the form for editing an existing trip.
    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            destination: trip.destination.clone(),
            start_date: trip.start_date.clone(),
            end_date: trip.end_date.clone(),
            budget: trip.budget.to_string(),
            travelers: trip.travelers.to_string(),
            description: trip.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<CreateTripRequest, FormErrors> {
        let mut errors = Vec::new();
        let mut reject = |field, problem| errors.push(FieldError { field, problem });

        let destination = self.destination.trim();
        if destination.is_empty() {
            reject(FormField::Destination, FieldProblem::Missing);
        }

        let start = parse_date(&self.start_date);
        if let Err(problem) = start {
            reject(FormField::StartDate, problem);
        }
        let end = parse_date(&self.end_date);
        match (&start, &end) {
            (_, Err(problem)) => reject(FormField::EndDate, *problem),
            (Ok(start), Ok(end)) if end < start => {
                reject(FormField::EndDate, FieldProblem::EndsBeforeStart)
            }
            _ => {}
        }

        let budget = match self.budget.trim() {
            "" => Err(FieldProblem::Missing),
            raw => match raw.parse::<f64>() {
                Ok(value) if !value.is_finite() => Err(FieldProblem::NotANumber),
                Ok(value) if value < 0.0 => Err(FieldProblem::Negative),
                Ok(value) => Ok(value),
                Err(_) => Err(FieldProblem::NotANumber),
            },
        };
        if let Err(problem) = budget {
            reject(FormField::Budget, problem);
        }

        let travelers = match self.travelers.trim() {
            "" => Err(FieldProblem::Missing),
            raw => match raw.parse::<i64>() {
                Ok(value) if value < 1 => Err(FieldProblem::TooFew),
                Ok(value) => Ok(value),
                Err(_) => Err(FieldProblem::NotAnInteger),
            },
        };
        if let Err(problem) = travelers {
            reject(FormField::Travelers, problem);
        }

        match (budget, travelers) {
            (Ok(budget), Ok(travelers)) if errors.is_empty() => {
                let description = self.description.trim();
                Ok(CreateTripRequest {
                    destination: destination.to_string(),
                    start_date: self.start_date.trim().to_string(),
                    end_date: self.end_date.trim().to_string(),
                    budget,
                    travelers,
                    description: (!description.is_empty()).then(|| description.to_string()),
                    status: DEFAULT_STATUS.to_string(),
                })
            }
            _ => Err(FormErrors { errors }),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, FieldProblem> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldProblem::Missing);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FieldProblem::InvalidDate)
}
