//! Startup demonstration data for the claim log.

use crate::error::AppError;
use crate::models::{AccidentInfo, AttachmentInfo, DeStatus, Icd, ImageStatus, NewIcd};
use crate::services::MongoDb;
use mongodb::bson::oid::ObjectId;

/// Identifier the demonstration update looks for on startup.
pub const REVIEW_TARGET_ID: &str = "661e17f14f1d385e7ceef222";

pub fn sample_record() -> NewIcd {
    NewIcd {
        class_type: "TEST".to_string(),
        accident_info: AccidentInfo {
            accno: "TEST".to_string(),
            mrtg: "001".to_string(),
            ordrank: "002".to_string(),
        },
        api_account: "admin".to_string(),
        assign: None,
        attachments: vec![AttachmentInfo {
            attachment_type: "PDF".to_string(),
            attachment_name: "typing_A_00218719881_202306738855_001_001.pdf".to_string(),
            attachment_create: "2024-02-01".to_string(),
            attachment_len: "11111".to_string(),
            attachment:
                "https://amassdev.blob.core.windows.net/api/icd%2F20240403%2F1712126019381_2066.PDF"
                    .to_string(),
            class_type: "kr.co.amass.api.domain.icd.controller.dto.IcdRequest$IcdAttachment"
                .to_string(),
        }],
        image_status: ImageStatus::Done,
        ins_type: "DBINS".to_string(),
        raw_logs: None,
        request_by: "ADMIN".to_string(),
        request_id: String::new(),
        brand: "BMW".to_string(),
        de_status: DeStatus::Ready,
        vin_code: "WAUZZZ8K6DN014133".to_string(),
        type_code: Some(26001),
    }
}

/// Insert the sample record, then flip the review target to REVIEWED if it
/// exists. A validation failure is logged and skipped; database errors
/// abort startup.
pub async fn run(db: &MongoDb) -> Result<(), AppError> {
    match Icd::new(sample_record()) {
        Ok(icd) => {
            db.insert_icd(&icd).await?;
            tracing::info!(id = %icd.id, vin_code = %icd.vin_code, "Inserted sample claim record");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sample claim record failed validation, skipping insert");
        }
    }

    let id = ObjectId::parse_str(REVIEW_TARGET_ID).map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("Invalid review target id: {}", e))
    })?;

    match db.find_icd(id).await? {
        Some(icd) => {
            db.set_image_status(icd.id, ImageStatus::Reviewed).await?;
            tracing::info!(id = %icd.id, "Marked claim record as {}", ImageStatus::Reviewed);
        }
        None => {
            tracing::debug!(id = %id, "Review target not found, skipping update");
        }
    }

    Ok(())
}
