//! Request payloads and their validation.
//!
//! Create payloads deserialize into loose `*Input` structs (every field
//! optional so a missing field produces a readable message rather than a
//! serde error) and validate into a strict `New*` value. Patch payloads list
//! exactly the fields an update may touch; unknown keys are rejected at
//! deserialization and absent fields are left unchanged by the store.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Email, Price};

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// User-facing validation failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing email, password, or full name.")]
    MissingSignupFields,
    #[error("Invalid email format.")]
    InvalidEmail,
    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort { min: usize },
    #[error("Full name cannot be empty.")]
    EmptyFullName,
    #[error("Gym name is required.")]
    GymNameRequired,
    #[error("Invalid contact email format.")]
    InvalidContactEmail,
    #[error("Membership name and a valid price are required.")]
    MembershipFieldsRequired,
    #[error("Price must be greater than zero and at most 99999999.99.")]
    InvalidPrice,
    #[error("Duration (days) must be a positive number if provided.")]
    InvalidDuration,
    #[error("Event title and date/time are required.")]
    EventFieldsRequired,
    #[error("Invalid date/time format.")]
    InvalidDateTime,
    #[error("Invalid target status provided: {0}")]
    InvalidStatus(String),
    #[error("No fields to update.")]
    NoFields,
}

/// Trim and drop empty strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trim, keeping empty strings (a patch may clear a text field).
fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned())
}

// =============================================================================
// Accounts
// =============================================================================

/// Body of `POST /api/auth/signup`.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// A signup that passed validation; the password is still plaintext.
#[derive(Clone)]
pub struct Registration {
    pub email: Email,
    pub password: String,
    pub full_name: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .finish()
    }
}

impl SignupRequest {
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the request violates.
    pub fn validate(self) -> Result<Registration, ValidationError> {
        let (Some(email), Some(password), Some(full_name)) = (
            non_blank(self.email),
            self.password.filter(|p| !p.is_empty()),
            non_blank(self.full_name),
        ) else {
            return Err(ValidationError::MissingSignupFields);
        };

        let email = Email::parse(&email).map_err(|_| ValidationError::InvalidEmail)?;

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        Ok(Registration {
            email,
            password,
            full_name,
        })
    }
}

/// Body of `PATCH /api/account/profile`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
}

impl ProfileUpdate {
    /// Returns the trimmed new display name.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyFullName`] when missing or blank.
    pub fn validate(self) -> Result<String, ValidationError> {
        non_blank(self.full_name).ok_or(ValidationError::EmptyFullName)
    }
}

// =============================================================================
// Gyms
// =============================================================================

/// Day keys accepted in a gym's opening hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Opening hours as a mapping from day to a free-form hours string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningHours(pub BTreeMap<Day, String>);

impl OpeningHours {
    /// Trim values and drop days left blank.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self(
            self.0
                .into_iter()
                .filter_map(|(day, hours)| {
                    let hours = hours.trim().to_owned();
                    (!hours.is_empty()).then_some((day, hours))
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trim photo URLs and drop empty entries, keeping order.
#[must_use]
pub fn normalize_photos(photos: Vec<String>) -> Vec<String> {
    photos
        .into_iter()
        .map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
        .collect()
}

fn contact_email(value: Option<String>) -> Result<Option<String>, ValidationError> {
    non_blank(value)
        .map(|email| {
            Email::parse(&email)
                .map(Email::into_inner)
                .map_err(|_| ValidationError::InvalidContactEmail)
        })
        .transpose()
}

/// Like [`contact_email`], but a blank value is kept so a patch can clear it.
fn patch_contact_email(value: Option<String>) -> Result<Option<String>, ValidationError> {
    match trimmed(value) {
        Some(email) if email.is_empty() => Ok(Some(email)),
        other => contact_email(other),
    }
}

/// Body of `POST /api/superadmin/gyms`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GymInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub facilities_description: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub photos: Option<Vec<String>>,
}

/// A validated gym ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGym {
    pub name: String,
    pub address: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub facilities_description: Option<String>,
    /// `None` when no day has hours.
    pub opening_hours: Option<OpeningHours>,
    pub photos: Vec<String>,
}

impl GymInput {
    /// # Errors
    ///
    /// [`ValidationError::GymNameRequired`] or [`ValidationError::InvalidContactEmail`].
    pub fn validate(self) -> Result<NewGym, ValidationError> {
        let name = non_blank(self.name).ok_or(ValidationError::GymNameRequired)?;
        let contact_email = contact_email(self.contact_email)?;

        Ok(NewGym {
            name,
            address: non_blank(self.address),
            contact_phone: non_blank(self.contact_phone),
            contact_email,
            facilities_description: non_blank(self.facilities_description),
            opening_hours: self
                .opening_hours
                .map(OpeningHours::normalized)
                .filter(|hours| !hours.is_empty()),
            photos: normalize_photos(self.photos.unwrap_or_default()),
        })
    }
}

/// Body of `PATCH /api/gym-admin/{gym_id}/profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GymPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub facilities_description: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub photos: Option<Vec<String>>,
}

impl GymPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.contact_phone.is_none()
            && self.contact_email.is_none()
            && self.facilities_description.is_none()
            && self.opening_hours.is_none()
            && self.photos.is_none()
    }

    /// Normalize present fields.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NoFields`] for an empty patch, otherwise the same
    /// rules as [`GymInput::validate`] applied to the fields present.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoFields);
        }

        let name = match self.name {
            Some(name) => Some(non_blank(Some(name)).ok_or(ValidationError::GymNameRequired)?),
            None => None,
        };

        Ok(Self {
            name,
            address: trimmed(self.address),
            contact_phone: trimmed(self.contact_phone),
            contact_email: patch_contact_email(self.contact_email)?,
            facilities_description: trimmed(self.facilities_description),
            opening_hours: self.opening_hours.map(OpeningHours::normalized),
            photos: self.photos.map(normalize_photos),
        })
    }
}

// =============================================================================
// Memberships
// =============================================================================

fn duration_days(value: Option<i32>) -> Result<Option<i32>, ValidationError> {
    match value {
        Some(days) if days <= 0 => Err(ValidationError::InvalidDuration),
        other => Ok(other),
    }
}

/// Body of `POST /api/gym-admin/{gym_id}/memberships`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MembershipInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration: Option<String>,
    pub duration_days: Option<i32>,
}

/// A validated membership plan ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub duration: Option<String>,
    pub duration_days: Option<i32>,
}

impl MembershipInput {
    /// # Errors
    ///
    /// [`ValidationError::MembershipFieldsRequired`] when name or a positive
    /// price is missing, [`ValidationError::InvalidDuration`] for a
    /// non-positive `durationDays`.
    pub fn validate(self) -> Result<NewMembership, ValidationError> {
        let name = non_blank(self.name).ok_or(ValidationError::MembershipFieldsRequired)?;
        let price = self
            .price
            .and_then(|p| Price::new(p).ok())
            .ok_or(ValidationError::MembershipFieldsRequired)?;

        Ok(NewMembership {
            name,
            description: non_blank(self.description),
            price,
            duration: non_blank(self.duration),
            duration_days: duration_days(self.duration_days)?,
        })
    }
}

/// Body of `PATCH /api/gym-admin/{gym_id}/memberships/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MembershipPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub duration: Option<String>,
    pub duration_days: Option<i32>,
}

/// A validated membership patch; the price is known positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub duration: Option<String>,
    pub duration_days: Option<i32>,
}

impl MembershipPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.duration.is_none()
            && self.duration_days.is_none()
    }

    /// # Errors
    ///
    /// [`ValidationError::NoFields`] for an empty patch, otherwise the first
    /// field rule broken.
    pub fn validate(self) -> Result<MembershipChanges, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoFields);
        }

        let name = match self.name {
            Some(name) => Some(
                non_blank(Some(name)).ok_or(ValidationError::MembershipFieldsRequired)?,
            ),
            None => None,
        };
        let price = self
            .price
            .map(|p| Price::new(p).map_err(|_| ValidationError::InvalidPrice))
            .transpose()?;

        Ok(MembershipChanges {
            name,
            description: trimmed(self.description),
            price,
            duration: trimmed(self.duration),
            duration_days: duration_days(self.duration_days)?,
        })
    }
}

// =============================================================================
// Events
// =============================================================================

/// Parse an event timestamp.
///
/// Accepts RFC 3339 (`2025-03-01T18:30:00+01:00`) and the `YYYY-MM-DDTHH:MM`
/// form produced by `datetime-local` inputs, which is read as UTC.
///
/// # Errors
///
/// [`ValidationError::InvalidDateTime`] when neither format matches.
pub fn parse_event_date_time(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidDateTime)
}

/// Body of `POST /api/gym-admin/{gym_id}/events`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date_time: Option<String>,
    pub location_details: Option<String>,
}

/// A validated event ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date_time: DateTime<Utc>,
    pub location_details: Option<String>,
}

impl EventInput {
    /// # Errors
    ///
    /// [`ValidationError::EventFieldsRequired`] or [`ValidationError::InvalidDateTime`].
    pub fn validate(self) -> Result<NewEvent, ValidationError> {
        let (Some(title), Some(when)) = (non_blank(self.title), non_blank(self.event_date_time))
        else {
            return Err(ValidationError::EventFieldsRequired);
        };

        Ok(NewEvent {
            title,
            description: non_blank(self.description),
            event_date_time: parse_event_date_time(&when)?,
            location_details: non_blank(self.location_details),
        })
    }
}

/// Body of `PATCH /api/gym-admin/{gym_id}/events/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date_time: Option<String>,
    pub location_details: Option<String>,
}

/// A validated event patch with the timestamp parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date_time: Option<DateTime<Utc>>,
    pub location_details: Option<String>,
}

impl EventPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.event_date_time.is_none()
            && self.location_details.is_none()
    }

    /// # Errors
    ///
    /// [`ValidationError::NoFields`] for an empty patch; a blank title is
    /// [`ValidationError::EventFieldsRequired`].
    pub fn validate(self) -> Result<EventChanges, ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoFields);
        }

        let title = match self.title {
            Some(title) => {
                Some(non_blank(Some(title)).ok_or(ValidationError::EventFieldsRequired)?)
            }
            None => None,
        };
        let event_date_time = self
            .event_date_time
            .as_deref()
            .map(parse_event_date_time)
            .transpose()?;

        Ok(EventChanges {
            title,
            description: trimmed(self.description),
            event_date_time,
            location_details: trimmed(self.location_details),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn signup(email: &str, password: &str, name: &str) -> SignupRequest {
        SignupRequest {
            email: Some(email.into()),
            password: Some(password.into()),
            full_name: Some(name.into()),
        }
    }

    #[test]
    fn test_signup_valid() {
        let request = signup("a@b.com", "secret1", "  A B ");
        assert!(!format!("{request:?}").contains("secret1"));

        let reg = request.validate().unwrap();
        assert_eq!(reg.email.as_str(), "a@b.com");
        assert_eq!(reg.full_name, "A B");
        assert!(!format!("{reg:?}").contains("secret1"));
    }

    #[test]
    fn test_signup_rejects() {
        assert_eq!(
            SignupRequest::default().validate().unwrap_err(),
            ValidationError::MissingSignupFields
        );
        assert_eq!(
            signup("a@b.com", "secret1", "   ").validate().unwrap_err(),
            ValidationError::MissingSignupFields
        );
        assert_eq!(
            signup("not-an-email", "secret1", "A").validate().unwrap_err(),
            ValidationError::InvalidEmail
        );
        assert_eq!(
            signup("a@b.com", "12345", "A").validate().unwrap_err(),
            ValidationError::PasswordTooShort { min: 6 }
        );
    }

    #[test]
    fn test_profile_update() {
        let update: ProfileUpdate = serde_json::from_str(r#"{"fullName":" New "}"#).unwrap();
        assert_eq!(update.validate().unwrap(), "New");

        let blank: ProfileUpdate = serde_json::from_str(r#"{"fullName":"  "}"#).unwrap();
        assert_eq!(blank.validate(), Err(ValidationError::EmptyFullName));

        assert!(serde_json::from_str::<ProfileUpdate>(r#"{"email":"x@y.z"}"#).is_err());
    }

    #[test]
    fn test_gym_input_normalizes() {
        let input: GymInput = serde_json::from_str(
            r#"{
                "name": " Iron Temple ",
                "contactEmail": "desk@iron.gym",
                "openingHours": {"mon": " 6-22 ", "sun": "  "},
                "photos": [" https://a/1.jpg ", "", "https://a/2.jpg"]
            }"#,
        )
        .unwrap();
        let gym = input.validate().unwrap();

        assert_eq!(gym.name, "Iron Temple");
        assert_eq!(gym.contact_email.as_deref(), Some("desk@iron.gym"));
        let hours = gym.opening_hours.unwrap();
        assert_eq!(hours.0.len(), 1);
        assert_eq!(hours.0.get(&Day::Mon).map(String::as_str), Some("6-22"));
        assert_eq!(gym.photos, vec!["https://a/1.jpg", "https://a/2.jpg"]);
    }

    #[test]
    fn test_gym_input_rejects() {
        let input = GymInput {
            name: Some(" ".into()),
            ..GymInput::default()
        };
        assert_eq!(input.validate(), Err(ValidationError::GymNameRequired));

        let input = GymInput {
            name: Some("Gym".into()),
            contact_email: Some("nope".into()),
            ..GymInput::default()
        };
        assert_eq!(input.validate(), Err(ValidationError::InvalidContactEmail));
    }

    #[test]
    fn test_opening_hours_reject_unknown_day() {
        assert!(serde_json::from_str::<OpeningHours>(r#"{"monday":"9-5"}"#).is_err());
    }

    #[test]
    fn test_gym_patch() {
        assert_eq!(GymPatch::default().validate(), Err(ValidationError::NoFields));
        assert!(serde_json::from_str::<GymPatch>(r#"{"createdBy":1}"#).is_err());

        let patch: GymPatch = serde_json::from_str(r#"{"address":" 1 Main St "}"#).unwrap();
        let patch = patch.validate().unwrap();
        assert_eq!(patch.address.as_deref(), Some("1 Main St"));
        assert!(patch.name.is_none());

        let patch: GymPatch = serde_json::from_str(r#"{"contactEmail":"  "}"#).unwrap();
        assert_eq!(patch.validate().unwrap().contact_email.as_deref(), Some(""));

        let patch: GymPatch = serde_json::from_str(r#"{"contactEmail":"bad"}"#).unwrap();
        assert_eq!(patch.validate(), Err(ValidationError::InvalidContactEmail));

        let patch = GymPatch {
            name: Some(String::new()),
            ..GymPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::GymNameRequired));
    }

    #[test]
    fn test_membership_input() {
        let input: MembershipInput =
            serde_json::from_str(r#"{"name":"Monthly","price":"29.99","durationDays":30}"#)
                .unwrap();
        let plan = input.validate().unwrap();
        assert_eq!(plan.name, "Monthly");
        assert_eq!(plan.price.to_string(), "29.99");
        assert_eq!(plan.duration_days, Some(30));

        let free = MembershipInput {
            name: Some("Free".into()),
            price: Some(Decimal::ZERO),
            ..MembershipInput::default()
        };
        assert_eq!(
            free.validate(),
            Err(ValidationError::MembershipFieldsRequired)
        );

        let bad_duration = MembershipInput {
            name: Some("Odd".into()),
            price: Some(Decimal::ONE),
            duration_days: Some(0),
            ..MembershipInput::default()
        };
        assert_eq!(bad_duration.validate(), Err(ValidationError::InvalidDuration));

        for price in [Decimal::new(4, 3), Decimal::new(1_000_000_000, 0)] {
            let input = MembershipInput {
                name: Some("Edge".into()),
                price: Some(price),
                ..MembershipInput::default()
            };
            assert_eq!(
                input.validate(),
                Err(ValidationError::MembershipFieldsRequired),
                "{price} should be rejected"
            );
        }
    }

    #[test]
    fn test_membership_patch() {
        assert_eq!(
            MembershipPatch::default().validate(),
            Err(ValidationError::NoFields)
        );

        let patch = MembershipPatch {
            price: Some(Decimal::new(-5, 0)),
            ..MembershipPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::InvalidPrice));

        for price in [Decimal::new(4, 3), Decimal::new(1_000_000_000, 0)] {
            let patch = MembershipPatch {
                price: Some(price),
                ..MembershipPatch::default()
            };
            assert_eq!(patch.validate(), Err(ValidationError::InvalidPrice));
        }

        let patch = MembershipPatch {
            duration_days: Some(90),
            ..MembershipPatch::default()
        };
        let changes = patch.validate().unwrap();
        assert_eq!(changes.duration_days, Some(90));
        assert!(changes.price.is_none());
    }

    #[test]
    fn test_event_date_time_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 17, 30, 0).single().unwrap();
        assert_eq!(
            parse_event_date_time("2025-03-01T18:30:00+01:00").unwrap(),
            expected
        );
        assert_eq!(parse_event_date_time("2025-03-01T17:30").unwrap(), expected);
        assert_eq!(
            parse_event_date_time("next tuesday"),
            Err(ValidationError::InvalidDateTime)
        );
    }

    #[test]
    fn test_event_input() {
        let missing = EventInput {
            title: Some("Open day".into()),
            ..EventInput::default()
        };
        assert_eq!(missing.validate(), Err(ValidationError::EventFieldsRequired));

        let event = EventInput {
            title: Some("Open day".into()),
            event_date_time: Some("2025-06-01T10:00:00Z".into()),
            location_details: Some(" ".into()),
            ..EventInput::default()
        }
        .validate()
        .unwrap();
        assert_eq!(event.title, "Open day");
        assert!(event.location_details.is_none());
    }

    #[test]
    fn test_event_patch() {
        assert_eq!(EventPatch::default().validate(), Err(ValidationError::NoFields));

        let patch: EventPatch =
            serde_json::from_str(r#"{"eventDateTime":"2025-06-01T10:00"}"#).unwrap();
        let changes = patch.validate().unwrap();
        assert!(changes.event_date_time.is_some());
        assert!(changes.title.is_none());

        assert!(serde_json::from_str::<EventPatch>(r#"{"gymId":2}"#).is_err());
    }
}
