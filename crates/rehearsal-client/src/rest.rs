//! `reqwest` implementation of the backend services.

use async_trait::async_trait;
use chrono::NaiveDate;
use rehearsal_engine::clock::DATE_FORMAT;
use rehearsal_engine::{Participant, Reservation, Room, ValidBooking};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ClientConfig, Session};
use crate::error::{ClientError, Result};
use crate::ports::{BookingQuery, ReservationSubmitter, RoomCatalog, UserDirectory};
use crate::wire::{CriarEnsaioBody, CriarLocalBody, EnsaioDto, ErrorBody, LocalDto, UsuarioDto};

const LIST_ROOMS: &str = "/api/local/listarLocais";
const CREATE_ROOM: &str = "/api/local/criarLocal";
const LIST_RESERVATIONS: &str = "/api/ensaio/listarEnsaios";
const CREATE_RESERVATION: &str = "/api/ensaio/criarEnsaio";
const LIST_USERS: &str = "/api/usuario/listarUsuarios";

/// Talks JSON over HTTP to the school backend with bearer-token auth.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        tracing::debug!("GET {path} {query:?}");
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(session.token())
            .query(query)
            .send()
            .await?;
        Ok(check_status(response).await?.json::<T>().await?)
    }

    async fn post_json<B: Serialize + Sync>(&self, session: &Session, path: &str, body: &B) -> Result<()> {
        tracing::debug!("POST {path}");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(session.token())
            .json(body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Map non-success statuses to [`ClientError`], preferring the backend's own
/// `erro` message.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.erro)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RoomCatalog for RestClient {
    async fn list_rooms(&self, session: &Session) -> Result<Vec<Room>> {
        let rooms: Vec<LocalDto> = self.get_json(session, LIST_ROOMS, &[]).await?;
        Ok(rooms.into_iter().map(Room::from).collect())
    }

    async fn create_room(&self, session: &Session, name: &str) -> Result<()> {
        self.post_json(session, CREATE_ROOM, &CriarLocalBody { nome: name })
            .await
    }
}

#[async_trait]
impl BookingQuery for RestClient {
    async fn list_reservations(&self, session: &Session, date: NaiveDate) -> Result<Vec<Reservation>> {
        let day = date.format(DATE_FORMAT).to_string();
        let docs: Vec<EnsaioDto> = self
            .get_json(session, LIST_RESERVATIONS, &[("data", day.as_str())])
            .await?;

        let mut reservations = Vec::with_capacity(docs.len());
        for doc in docs {
            match doc.into_reservation(date) {
                Ok(reservation) => reservations.push(reservation),
                Err(e) => tracing::warn!("skipping malformed reservation for {day}: {e}"),
            }
        }
        Ok(reservations)
    }
}

#[async_trait]
impl ReservationSubmitter for RestClient {
    async fn create_reservation(&self, session: &Session, booking: &ValidBooking) -> Result<()> {
        self.post_json(session, CREATE_RESERVATION, &CriarEnsaioBody::from(booking))
            .await
    }
}

#[async_trait]
impl UserDirectory for RestClient {
    async fn search_users(&self, session: &Session, name: &str) -> Result<Vec<Participant>> {
        let users: Vec<UsuarioDto> = self.get_json(session, LIST_USERS, &[("nome", name)]).await?;
        Ok(users.into_iter().map(Participant::from).collect())
    }
}
