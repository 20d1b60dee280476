use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Overall processing lifecycle of a claim record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeStatus {
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "DONE")]
    Done,
}

impl std::fmt::Display for DeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeStatus::Ready => write!(f, "READY"),
            DeStatus::Done => write!(f, "DONE"),
        }
    }
}

/// Review lifecycle of the images extracted from a claim.
///
/// `Done` is stored as `OCR_DONE`, the value the upstream OCR pipeline
/// writes into the collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImageStatus {
    #[serde(rename = "OCR_DONE")]
    Done,
    #[serde(rename = "REVIEWED")]
    Reviewed,
    #[serde(rename = "REJECTED")]
    Rejected,
    #[serde(rename = "GARBAGE")]
    Garbage,
}

impl std::fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageStatus::Done => write!(f, "OCR_DONE"),
            ImageStatus::Reviewed => write!(f, "REVIEWED"),
            ImageStatus::Rejected => write!(f, "REJECTED"),
            ImageStatus::Garbage => write!(f, "GARBAGE"),
        }
    }
}

/// Accident case the claim refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct AccidentInfo {
    #[validate(length(min = 1, message = "Accident number is required"))]
    pub accno: String,

    #[validate(length(min = 1, message = "Mortgage reference is required"))]
    pub mrtg: String,

    #[validate(length(min = 1, message = "Order rank is required"))]
    pub ordrank: String,
}

/// Reviewer assignment, absent until a human picks the record up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct AssignInfo {
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub assign_at: DateTime<Utc>,

    #[validate(length(min = 1, message = "Reviewer uuid is required"))]
    pub uuid: String,
}

/// One file linked to a claim.
///
/// Field names on the wire keep the camelCase aliases of the upstream API;
/// downstream consumers of the collection read them as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct AttachmentInfo {
    #[serde(rename = "attachmentType")]
    #[validate(length(min = 1, message = "Attachment type is required"))]
    pub attachment_type: String,

    #[serde(rename = "attachmentName")]
    #[validate(length(min = 1, message = "Attachment name is required"))]
    pub attachment_name: String,

    #[serde(rename = "attachmentCreate")]
    #[validate(length(min = 1, message = "Attachment create date is required"))]
    pub attachment_create: String,

    #[serde(rename = "attachmentLen")]
    #[validate(length(min = 1, message = "Attachment length is required"))]
    pub attachment_len: String,

    #[validate(length(min = 1, message = "Attachment URL is required"))]
    pub attachment: String,

    #[serde(rename = "_class")]
    #[validate(length(min = 1, message = "Attachment class is required"))]
    pub class_type: String,
}

/// A claim-processing log record, stored in the `icd_log` collection.
///
/// `de_status` keeps its historical wire name `status`; the classification
/// tags are stored under `_class` and the integer code under `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Icd {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    #[serde(rename = "_class")]
    pub class_type: String,

    pub accident_info: AccidentInfo,

    pub api_account: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign: Option<AssignInfo>,

    /// Insertion order is first-to-last submission order and is meaningful.
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,

    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub create_at: DateTime<Utc>,

    pub image_status: ImageStatus,

    pub ins_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_logs: Option<Vec<Document>>,

    #[serde(default)]
    pub request_by: String,

    #[serde(default)]
    pub request_id: String,

    #[serde(default)]
    pub brand: String,

    #[serde(rename = "status")]
    pub de_status: DeStatus,

    pub vin_code: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_code: Option<i32>,
}

/// Caller-supplied fields of a new claim record.
///
/// Server-assigned fields (`id`, `create_at`) are filled by [`Icd::new`].
#[derive(Debug, Clone, Validate)]
pub struct NewIcd {
    #[validate(length(min = 1, message = "Class type is required"))]
    pub class_type: String,

    #[validate(nested)]
    pub accident_info: AccidentInfo,

    #[validate(length(min = 1, message = "Api account is required"))]
    pub api_account: String,

    #[validate(nested)]
    pub assign: Option<AssignInfo>,

    #[validate(nested)]
    pub attachments: Vec<AttachmentInfo>,

    pub image_status: ImageStatus,

    #[validate(length(min = 1, message = "Insurance type is required"))]
    pub ins_type: String,

    pub raw_logs: Option<Vec<Document>>,

    pub request_by: String,

    pub request_id: String,

    pub brand: String,

    pub de_status: DeStatus,

    #[validate(length(min = 1, message = "Vin code is required"))]
    pub vin_code: String,

    pub type_code: Option<i32>,
}

impl Icd {
    /// Validate the draft and assign a fresh identifier and creation time.
    ///
    /// Errors carry per-field detail; nothing is persisted here.
    pub fn new(draft: NewIcd) -> Result<Self, ValidationErrors> {
        draft.validate()?;

        Ok(Self {
            id: ObjectId::new(),
            class_type: draft.class_type,
            accident_info: draft.accident_info,
            api_account: draft.api_account,
            assign: draft.assign,
            attachments: draft.attachments,
            create_at: Utc::now(),
            image_status: draft.image_status,
            ins_type: draft.ins_type,
            raw_logs: draft.raw_logs,
            request_by: draft.request_by,
            request_id: draft.request_id,
            brand: draft.brand,
            de_status: draft.de_status,
            vin_code: draft.vin_code,
            type_code: draft.type_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn attachment(name: &str) -> AttachmentInfo {
        AttachmentInfo {
            attachment_type: "PDF".to_string(),
            attachment_name: name.to_string(),
            attachment_create: "2024-02-01".to_string(),
            attachment_len: "11111".to_string(),
            attachment: "https://example.com/a.pdf".to_string(),
            class_type: "IcdAttachment".to_string(),
        }
    }

    fn draft() -> NewIcd {
        NewIcd {
            class_type: "TEST".to_string(),
            accident_info: AccidentInfo {
                accno: "TEST".to_string(),
                mrtg: "001".to_string(),
                ordrank: "002".to_string(),
            },
            api_account: "admin".to_string(),
            assign: None,
            attachments: vec![attachment("a.pdf")],
            image_status: ImageStatus::Done,
            ins_type: "DBINS".to_string(),
            raw_logs: None,
            request_by: "ADMIN".to_string(),
            request_id: String::new(),
            brand: "BMW".to_string(),
            de_status: DeStatus::Ready,
            vin_code: "WAUZZZ8K6DN014133".to_string(),
            type_code: None,
        }
    }

    #[test]
    fn new_fills_generated_defaults() {
        let before = Utc::now();
        let a = Icd::new(draft()).unwrap();
        let b = Icd::new(draft()).unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.create_at >= before);
        assert!(a.create_at <= Utc::now());
    }

    #[test]
    fn new_rejects_empty_required_fields() {
        let mut d = draft();
        d.vin_code = String::new();

        let err = Icd::new(d).unwrap_err();
        assert!(err.field_errors().contains_key("vin_code"));
    }

    #[test]
    fn new_rejects_empty_embedded_fields() {
        let mut d = draft();
        d.accident_info.accno = String::new();
        assert!(Icd::new(d).is_err());

        let mut d = draft();
        d.attachments[0].attachment_name = String::new();
        assert!(Icd::new(d).is_err());
    }

    #[test]
    fn image_status_is_closed() {
        let done = bson::from_bson::<ImageStatus>(bson::Bson::String("OCR_DONE".to_string()));
        assert_eq!(done.unwrap(), ImageStatus::Done);

        // The internal DONE member only exists on the wire as OCR_DONE
        assert!(bson::from_bson::<ImageStatus>(bson::Bson::String("DONE".to_string())).is_err());
        assert!(
            bson::from_bson::<ImageStatus>(bson::Bson::String("SHREDDED".to_string())).is_err()
        );
    }

    #[test]
    fn de_status_is_closed() {
        let ready = bson::from_bson::<DeStatus>(bson::Bson::String("READY".to_string()));
        assert_eq!(ready.unwrap(), DeStatus::Ready);

        assert!(bson::from_bson::<DeStatus>(bson::Bson::String("PENDING".to_string())).is_err());
        assert!(bson::from_bson::<DeStatus>(bson::Bson::String("ready".to_string())).is_err());
    }

    #[test]
    fn stored_document_uses_wire_names() {
        let mut d = draft();
        d.type_code = Some(26001);
        let icd = Icd::new(d).unwrap();

        let doc = bson::to_document(&icd).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(doc.contains_key("_class"));
        assert!(doc.contains_key("status"));
        assert!(!doc.contains_key("de_status"));
        assert_eq!(doc.get_str("image_status").unwrap(), "OCR_DONE");
        assert_eq!(doc.get_i32("type").unwrap(), 26001);

        let att = doc.get_array("attachments").unwrap()[0]
            .as_document()
            .unwrap();
        assert!(att.contains_key("attachmentType"));
        assert!(att.contains_key("attachmentName"));
        assert!(att.contains_key("attachmentCreate"));
        assert!(att.contains_key("attachmentLen"));
        assert!(att.contains_key("_class"));
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let icd = Icd::new(draft()).unwrap();

        let doc = bson::to_document(&icd).unwrap();
        assert!(!doc.contains_key("assign"));
        assert!(!doc.contains_key("raw_logs"));
        assert!(!doc.contains_key("type"));
    }

    #[test]
    fn attachment_order_survives_bson_round_trip() {
        let mut d = draft();
        d.attachments = vec![attachment("first.pdf"), attachment("second.pdf")];
        let icd = Icd::new(d).unwrap();

        let doc = bson::to_document(&icd).unwrap();
        let reloaded: Icd = bson::from_document(doc).unwrap();

        let names: Vec<&str> = reloaded
            .attachments
            .iter()
            .map(|a| a.attachment_name.as_str())
            .collect();
        assert_eq!(names, vec!["first.pdf", "second.pdf"]);
    }
}
