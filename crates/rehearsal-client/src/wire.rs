//! JSON shapes of the school backend.
//!
//! The backend names fields in Portuguese (`nome`, `pecaRelacionada`, ...) and
//! keys documents by `_id`. These types map them onto the engine model; nothing
//! outside this module sees them.

use chrono::NaiveDate;
use rehearsal_engine::{
    format_time, parse_date, parse_time, EngineError, Participant, Reservation, Room, TimeRange,
    UserId, ValidBooking,
};
use serde::{Deserialize, Serialize};

/// A reference that the backend sends either as a bare id or as a populated
/// document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl IdRef {
    fn into_id(self) -> String {
        match self {
            IdRef::Id(id) | IdRef::Populated { id } => id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocalDto {
    #[serde(rename = "_id")]
    id: String,
    nome: String,
}

impl From<LocalDto> for Room {
    fn from(dto: LocalDto) -> Self {
        Room::new(dto.id, dto.nome)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsuarioDto {
    #[serde(rename = "_id")]
    id: String,
    nome: String,
}

impl From<UsuarioDto> for Participant {
    fn from(dto: UsuarioDto) -> Self {
        Participant::new(dto.id, dto.nome)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnsaioDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    peca_relacionada: String,
    #[serde(default)]
    data: Option<String>,
    horario_inicio: String,
    horario_fim: String,
    local: IdRef,
    #[serde(default)]
    participantes_observacao: Option<String>,
    #[serde(default)]
    participantes: Vec<IdRef>,
}

impl EnsaioDto {
    /// Convert to a reservation. `requested` is the date the list was fetched
    /// for; it stands in when the document carries no usable date. Dates may
    /// arrive as full ISO timestamps, only the `YYYY-MM-DD` prefix is read.
    pub(crate) fn into_reservation(self, requested: NaiveDate) -> Result<Reservation, EngineError> {
        let date = match self.data.as_deref().and_then(|d| d.get(..10)) {
            Some(prefix) => parse_date(prefix)?,
            None => requested,
        };
        let range = TimeRange::new(parse_time(&self.horario_inicio)?, parse_time(&self.horario_fim)?)?;
        let participants = self
            .participantes
            .into_iter()
            .map(|p| UserId::new(p.into_id()))
            .collect();

        let mut reservation = Reservation::new(self.id, self.peca_relacionada, self.local.into_id(), date, range)
            .with_participants(participants);
        reservation.note = self.participantes_observacao.filter(|n| !n.trim().is_empty());
        Ok(reservation)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CriarEnsaioBody<'a> {
    peca_relacionada: &'a str,
    data: String,
    horario_inicio: String,
    horario_fim: String,
    local: &'a str,
    participantes_observacao: &'a str,
    participantes: Vec<&'a str>,
}

impl<'a> From<&'a ValidBooking> for CriarEnsaioBody<'a> {
    fn from(booking: &'a ValidBooking) -> Self {
        Self {
            peca_relacionada: &booking.label,
            data: booking.date.format(rehearsal_engine::clock::DATE_FORMAT).to_string(),
            horario_inicio: format_time(booking.range.start),
            horario_fim: format_time(booking.range.end),
            local: booking.room_id.as_str(),
            participantes_observacao: booking.note.as_deref().unwrap_or(""),
            participantes: booking.participants.iter().map(|p| p.as_str()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CriarLocalBody<'a> {
    pub nome: &'a str,
}

/// Error payload the backend sends with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub erro: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearsal_engine::{validate_booking_request, BookingPolicy, BookingRequest, RoomId};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    #[test]
    fn ensaio_with_populated_room() {
        let json = r#"{
            "_id": "e1",
            "pecaRelacionada": "Hamlet",
            "data": "2026-03-16T00:00:00.000Z",
            "horarioInicio": "14:00",
            "horarioFim": "15:00",
            "local": {"_id": "sala-1", "nome": "Sala 1"},
            "participantes": ["u1", {"_id": "u2", "nome": "Bia"}]
        }"#;
        let dto: EnsaioDto = serde_json::from_str(json).unwrap();
        let r = dto.into_reservation(day()).unwrap();

        assert_eq!(r.room_id, RoomId::new("sala-1"));
        assert_eq!(r.label, "Hamlet");
        assert_eq!(r.date, day());
        assert_eq!(format_time(r.start()), "14:00");
        assert_eq!(r.participants, vec![UserId::new("u1"), UserId::new("u2")]);
        assert_eq!(r.note, None);
    }

    #[test]
    fn ensaio_without_date_uses_requested_day() {
        let json = r#"{"_id":"e2","horarioInicio":"09:00","horarioFim":"10:00","local":"sala-2"}"#;
        let dto: EnsaioDto = serde_json::from_str(json).unwrap();
        let r = dto.into_reservation(day()).unwrap();
        assert_eq!(r.date, day());
        assert_eq!(r.room_id, RoomId::new("sala-2"));
    }

    #[test]
    fn ensaio_with_inverted_times_is_rejected() {
        let json = r#"{"_id":"e3","horarioInicio":"15:00","horarioFim":"14:00","local":"sala-1"}"#;
        let dto: EnsaioDto = serde_json::from_str(json).unwrap();
        assert!(matches!(
            dto.into_reservation(day()),
            Err(EngineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn create_body_uses_backend_field_names() {
        let request = BookingRequest {
            label: "Hamlet".to_string(),
            room_id: Some(RoomId::new("sala-1")),
            date: Some(day()),
            start: Some(parse_time("14:00").unwrap()),
            ..Default::default()
        };
        let booking = validate_booking_request(&request, &BookingPolicy::quick()).unwrap();

        let body = serde_json::to_value(CriarEnsaioBody::from(&booking)).unwrap();
        assert_eq!(body["pecaRelacionada"], "Hamlet");
        assert_eq!(body["data"], "2026-03-16");
        assert_eq!(body["horarioInicio"], "14:00");
        assert_eq!(body["horarioFim"], "15:00");
        assert_eq!(body["local"], "sala-1");
        assert_eq!(body["participantesObservacao"], "");
        assert_eq!(body["participantes"], serde_json::json!([]));
    }
}
