use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, EventId, RequestId};

/// What happened to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestEventKind {
    Created,
    Approved,
    Rejected,
}

impl RequestEventKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "create",
            Self::Approved => "approve",
            Self::Rejected => "reject",
        }
    }
}

/// Immutable audit record appended to a request's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RequestEventRecord")]
pub struct RequestEvent {
    id: EventId,
    kind: RequestEventKind,
    data: String,
    request_id: RequestId,
}

#[derive(Deserialize)]
struct RequestEventRecord {
    id: EventId,
    kind: RequestEventKind,
    data: String,
    request_id: RequestId,
}

impl TryFrom<RequestEventRecord> for RequestEvent {
    type Error = DomainError;

    fn try_from(record: RequestEventRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.kind, record.data, record.request_id)
    }
}

impl RequestEvent {
    pub fn new(
        id: EventId,
        kind: RequestEventKind,
        data: impl Into<String>,
        request_id: RequestId,
    ) -> Result<Self, DomainError> {
        let data = data.into();
        if data.is_empty() {
            return Err(DomainError::BlankField { field: "data" });
        }

        Ok(Self {
            id: id.require()?,
            kind,
            data,
            request_id: request_id.require()?,
        })
    }

    /// Event with a fresh id and the timestamped message "`<at>: <kind> event added`".
    pub fn record(
        kind: RequestEventKind,
        request_id: RequestId,
        at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let data = format!(
            "{}: {} event added",
            at.format("%Y-%m-%d %H:%M:%S UTC"),
            kind.label()
        );
        Self::new(EventId::generate(), kind, data, request_id)
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn kind(&self) -> RequestEventKind {
        self.kind
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_validates_ids_and_data() {
        assert_eq!(
            RequestEvent::new(EventId::nil(), RequestEventKind::Created, "d", RequestId::generate()),
            Err(DomainError::EmptyIdentifier { field: "event_id" })
        );
        assert_eq!(
            RequestEvent::new(EventId::generate(), RequestEventKind::Approved, "d", RequestId::nil()),
            Err(DomainError::EmptyIdentifier { field: "request_id" })
        );
        assert_eq!(
            RequestEvent::new(EventId::generate(), RequestEventKind::Rejected, "", RequestId::generate()),
            Err(DomainError::BlankField { field: "data" })
        );
    }

    #[test]
    fn record_formats_timestamped_message() {
        let at = Utc
            .with_ymd_and_hms(2025, 5, 17, 14, 30, 5)
            .single()
            .expect("valid instant");
        let request_id = RequestId::generate();

        let event = RequestEvent::record(RequestEventKind::Rejected, request_id, at)
            .expect("valid event");

        assert_eq!(event.data(), "2025-05-17 14:30:05 UTC: reject event added");
        assert_eq!(event.kind(), RequestEventKind::Rejected);
        assert_eq!(event.request_id(), request_id);
        assert!(!event.id().is_nil());
    }

    #[test]
    fn deserialization_rejects_nil_ids_and_empty_data() {
        let event = RequestEvent::record(RequestEventKind::Created, RequestId::generate(), Utc::now())
            .expect("valid event");
        let restored: RequestEvent =
            serde_json::from_value(serde_json::to_value(&event).expect("serializes"))
                .expect("valid event deserializes");
        assert_eq!(restored, event);

        let invalid = serde_json::from_value::<RequestEvent>(serde_json::json!({
            "id": EventId::nil(),
            "kind": "created",
            "data": "",
            "request_id": RequestId::nil(),
        }));
        assert!(invalid.is_err());
    }

    #[test]
    fn kind_serializes_as_snake_case_tag() {
        let event = RequestEvent::record(RequestEventKind::Approved, RequestId::generate(), Utc::now())
            .expect("valid event");
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(json["kind"], "approved");
    }
}
