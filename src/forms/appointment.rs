use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::domain::appointment::{AppointmentStatus, NewAppointment, UpdateAppointment};
use crate::domain::types::ClientId;
use crate::forms::FormError;

#[derive(Debug, Clone, Deserialize, Validate)]
/// Body of an appointment creation request.
pub struct AddAppointmentForm {
    /// Client the appointment is booked for.
    pub client_id: i32,
    /// Scheduled moment, stored as naive UTC.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub time: NaiveDateTime,
    /// Defaults to `scheduled` when omitted.
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of an appointment update. Every omitted field is stored as null.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAppointmentForm {
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub time: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// ISO-8601 timestamp as sent by clients, with or without a UTC offset.
#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl From<Timestamp> for NaiveDateTime {
    fn from(timestamp: Timestamp) -> Self {
        match timestamp {
            Timestamp::Offset(moment) => moment.naive_utc(),
            Timestamp::Naive(moment) => moment,
        }
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    Timestamp::deserialize(deserializer).map(NaiveDateTime::from)
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Timestamp>::deserialize(deserializer)?.map(NaiveDateTime::from))
}

impl TryFrom<AddAppointmentForm> for NewAppointment {
    type Error = FormError;

    fn try_from(form: AddAppointmentForm) -> Result<Self, Self::Error> {
        let client_id = ClientId::new(form.client_id).map_err(|_| FormError::InvalidClientId)?;
        Ok(NewAppointment::new(
            client_id,
            form.time,
            form.status,
            form.notes,
        ))
    }
}

impl From<UpdateAppointmentForm> for UpdateAppointment {
    fn from(form: UpdateAppointmentForm) -> Self {
        UpdateAppointment::new(form.time, form.status, form.notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_defaults_status() {
        let form: AddAppointmentForm =
            serde_json::from_str(r#"{"client_id":3,"time":"2024-01-01T10:30:00"}"#).unwrap();
        assert!(form.validate().is_ok());
        let appointment = NewAppointment::try_from(form).unwrap();
        assert_eq!(appointment.client_id.get(), 3);
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn add_form_rejects_non_positive_client() {
        let form: AddAppointmentForm =
            serde_json::from_str(r#"{"client_id":0,"time":"2024-01-01T10:30:00"}"#).unwrap();
        assert!(matches!(
            NewAppointment::try_from(form),
            Err(FormError::InvalidClientId)
        ));
    }

    #[test]
    fn add_form_rejects_unknown_status() {
        let result = serde_json::from_str::<AddAppointmentForm>(
            r#"{"client_id":3,"time":"2024-01-01T10:30:00","status":"lost"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn add_form_normalizes_offsets_to_utc() {
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        for time in [
            "2024-01-01T10:00:00Z",
            "2024-01-01T12:00:00+02:00",
            "2024-01-01T10:00:00",
        ] {
            let body = format!(r#"{{"client_id":3,"time":"{time}"}}"#);
            let form: AddAppointmentForm = serde_json::from_str(&body).unwrap();
            assert_eq!(form.time, expected, "{time}");
        }
    }

    #[test]
    fn add_form_rejects_garbage_time() {
        let result = serde_json::from_str::<AddAppointmentForm>(
            r#"{"client_id":3,"time":"tomorrow morning"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn update_form_accepts_offset_and_null_time() {
        let form: UpdateAppointmentForm =
            serde_json::from_str(r#"{"time":"2024-01-01T08:15:00-01:00"}"#).unwrap();
        assert_eq!(form.time.map(|t| t.to_string()).as_deref(), Some("2024-01-01 09:15:00"));

        let form: UpdateAppointmentForm = serde_json::from_str(r#"{"time":null}"#).unwrap();
        assert_eq!(form.time, None);
    }

    #[test]
    fn update_form_without_fields_clears_everything() {
        let form: UpdateAppointmentForm = serde_json::from_str(r#"{"status":"confirmed"}"#).unwrap();
        let update = UpdateAppointment::from(form);
        assert_eq!(update.time, None);
        assert_eq!(update.status, Some(AppointmentStatus::Confirmed));
        assert_eq!(update.notes, None);
    }
}
