use crate::{
    entities::{payment, Order, Payment, PaymentStatus},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::{info, instrument};

/// How long an uploaded proof stays valid before the operator must act.
const PROOF_VALIDITY_SECS: i64 = 24 * 60 * 60;

#[derive(Debug)]
pub struct ProofUpload {
    pub transaksi_id: String,
    /// Account holder name on the transfer.
    pub nama: String,
    /// Bank the transfer came from.
    pub dari: String,
    /// Absolute URL of the stored proof image.
    pub url: String,
}

/// Attaches transfer proofs to pending payments.
#[derive(Clone)]
pub struct PaymentService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl PaymentService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Records an uploaded transfer proof: flips the payment to `paid` and
    /// stamps a 24-hour expiry from upload time.
    #[instrument(skip(self, upload), fields(transaksi_id = %upload.transaksi_id))]
    pub async fn attach_proof(&self, upload: ProofUpload) -> Result<(), ServiceError> {
        let order_exists = Order::find_by_id(upload.transaksi_id.as_str())
            .one(&*self.db)
            .await?
            .is_some();
        if !order_exists {
            return Err(ServiceError::NotFound("Transaction not found".to_string()));
        }

        let payment = Payment::find()
            .filter(payment::Column::TransaksiId.eq(upload.transaksi_id.as_str()))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Payment not found".to_string()))?;

        let now = Utc::now();
        let mut active: payment::ActiveModel = payment.into();
        active.status = Set(PaymentStatus::Paid);
        active.url = Set(Some(upload.url));
        active.nama = Set(Some(upload.nama));
        active.dari = Set(Some(upload.dari));
        active.metode = Set(Some("transfer".to_string()));
        active.expired = Set(Some(now.timestamp() + PROOF_VALIDITY_SECS));
        active.updated_at = Set(now);
        active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::PaymentProofUploaded {
                transaksi_id: upload.transaksi_id.clone(),
            })
            .await;

        info!(transaksi_id = %upload.transaksi_id, "payment proof attached");
        Ok(())
    }
}
