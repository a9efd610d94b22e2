use crate::{
    entities::{address, order, user, Address, AddressModel, Order, User},
    errors::ServiceError,
    ids,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

/// Indonesian mobile number: +62 / 62 / 0 prefix followed by an 8x number.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+62|62|0)8[1-9][0-9]{6,9}$").expect("valid phone regex"));

fn validate_gender(value: &str) -> Result<(), validator::ValidationError> {
    if value == "P" || value == "W" {
        Ok(())
    } else {
        Err(validator::ValidationError::new("jenis_kelamin"))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileInput {
    pub nama: Option<String>,
    #[validate(regex(path = "PHONE_RE", message = "Nomor telepon not valid"))]
    pub no_telpon: Option<String>,
    pub tanggal_lahir: Option<String>,
    #[validate(custom = "validate_gender")]
    pub jenis_kelamin: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAddressInput {
    #[validate(length(min = 1))]
    pub nama_penerima: String,
    #[validate(regex(path = "PHONE_RE", message = "Nomor telepon not valid"))]
    pub no_telpon: String,
    pub provinsi: String,
    pub kota: String,
    pub kecamatan: String,
    pub alamat_lengkap: String,
    pub label: String,
    pub kode_pos: String,
    #[serde(default)]
    pub main_address: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAddressInput {
    pub address_id: String,
    pub nama_penerima: Option<String>,
    #[validate(regex(path = "PHONE_RE", message = "Nomor telepon not valid"))]
    pub no_telpon: Option<String>,
    pub provinsi: Option<String>,
    pub kota: Option<String>,
    pub kecamatan: Option<String>,
    pub alamat_lengkap: Option<String>,
    pub label: Option<String>,
    pub kode_pos: Option<String>,
    pub main_address: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub nama: String,
    pub email: String,
    pub total_transaction: u64,
}

#[derive(Debug, Serialize)]
pub struct ProfileDetail {
    pub nama: String,
    pub email: String,
    pub no_telpon: Option<String>,
    pub tanggal_lahir: Option<String>,
    pub jenis_kelamin: Option<String>,
}

/// Per-user profile fields and shipping-address book.
#[derive(Clone)]
pub struct ProfileService {
    db: Arc<DatabaseConnection>,
}

impl ProfileService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: &str) -> Result<ProfileSummary, ServiceError> {
        let user = self.load_user(user_id).await?;
        let total_transaction = Order::find()
            .filter(order::Column::UserId.eq(user_id))
            .count(&*self.db)
            .await?;

        Ok(ProfileSummary {
            nama: user.nama,
            email: user.email,
            total_transaction,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_profile_detail(&self, user_id: &str) -> Result<ProfileDetail, ServiceError> {
        let user = self.load_user(user_id).await?;
        Ok(ProfileDetail {
            nama: user.nama,
            email: user.email,
            no_telpon: user.no_telpon,
            tanggal_lahir: user.tanggal_lahir,
            jenis_kelamin: user.jenis_kelamin,
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update_profile(
        &self,
        input: UpdateProfileInput,
        user_id: &str,
    ) -> Result<ProfileDetail, ServiceError> {
        input.validate()?;
        let user = self.load_user(user_id).await?;

        let mut active: user::ActiveModel = user.into();
        if let Some(nama) = input.nama {
            active.nama = Set(nama);
        }
        if let Some(no_telpon) = input.no_telpon {
            active.no_telpon = Set(Some(no_telpon));
        }
        if let Some(tanggal_lahir) = input.tanggal_lahir {
            active.tanggal_lahir = Set(Some(tanggal_lahir));
        }
        if let Some(jenis_kelamin) = input.jenis_kelamin {
            active.jenis_kelamin = Set(Some(jenis_kelamin));
        }
        active.updated_at = Set(Utc::now());
        let updated = active.update(&*self.db).await?;

        Ok(ProfileDetail {
            nama: updated.nama,
            email: updated.email,
            no_telpon: updated.no_telpon,
            tanggal_lahir: updated.tanggal_lahir,
            jenis_kelamin: updated.jenis_kelamin,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_addresses(&self, user_id: &str) -> Result<Vec<AddressModel>, ServiceError> {
        Ok(Address::find()
            .filter(address::Column::UserId.eq(user_id))
            .order_by_desc(address::Column::MainAddress)
            .order_by_desc(address::Column::CreatedAt)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_address_by_id(
        &self,
        address_id: &str,
        user_id: &str,
    ) -> Result<AddressModel, ServiceError> {
        self.load_address(address_id, user_id).await
    }

    /// Creates an address; when flagged as the main address, the flag is
    /// cleared from the user's other addresses in the same transaction.
    #[instrument(skip(self, input))]
    pub async fn create_address(
        &self,
        input: CreateAddressInput,
        user_id: &str,
    ) -> Result<AddressModel, ServiceError> {
        input.validate()?;

        let now = Utc::now();
        let txn = self.db.begin().await?;

        if input.main_address {
            self.clear_main_address(&txn, user_id).await?;
        }

        let created = address::ActiveModel {
            address_id: Set(ids::row_id()),
            user_id: Set(user_id.to_string()),
            nama_penerima: Set(input.nama_penerima),
            no_telpon: Set(input.no_telpon),
            provinsi: Set(input.provinsi),
            kota: Set(input.kota),
            kecamatan: Set(input.kecamatan),
            alamat_lengkap: Set(input.alamat_lengkap),
            label: Set(input.label),
            kode_pos: Set(input.kode_pos),
            main_address: Set(input.main_address),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(created)
    }

    #[instrument(skip(self, input), fields(address_id = %input.address_id))]
    pub async fn update_address(
        &self,
        input: UpdateAddressInput,
        user_id: &str,
    ) -> Result<AddressModel, ServiceError> {
        input.validate()?;
        let row = self.load_address(&input.address_id, user_id).await?;

        let txn = self.db.begin().await?;

        if input.main_address == Some(true) {
            self.clear_main_address(&txn, user_id).await?;
        }

        let mut active: address::ActiveModel = row.into();
        if let Some(v) = input.nama_penerima {
            active.nama_penerima = Set(v);
        }
        if let Some(v) = input.no_telpon {
            active.no_telpon = Set(v);
        }
        if let Some(v) = input.provinsi {
            active.provinsi = Set(v);
        }
        if let Some(v) = input.kota {
            active.kota = Set(v);
        }
        if let Some(v) = input.kecamatan {
            active.kecamatan = Set(v);
        }
        if let Some(v) = input.alamat_lengkap {
            active.alamat_lengkap = Set(v);
        }
        if let Some(v) = input.label {
            active.label = Set(v);
        }
        if let Some(v) = input.kode_pos {
            active.kode_pos = Set(v);
        }
        if let Some(v) = input.main_address {
            active.main_address = Set(v);
        }
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_address(
        &self,
        address_id: &str,
        user_id: &str,
    ) -> Result<(), ServiceError> {
        let row = self.load_address(address_id, user_id).await?;
        row.delete(&*self.db).await?;
        Ok(())
    }

    async fn clear_main_address<C>(&self, conn: &C, user_id: &str) -> Result<(), ServiceError>
    where
        C: sea_orm::ConnectionTrait,
    {
        Address::update_many()
            .set(address::ActiveModel {
                main_address: Set(false),
                updated_at: Set(Utc::now()),
                ..Default::default()
            })
            .filter(address::Column::UserId.eq(user_id))
            .filter(address::Column::MainAddress.eq(true))
            .exec(conn)
            .await?;
        Ok(())
    }

    async fn load_user(&self, user_id: &str) -> Result<user::Model, ServiceError> {
        User::find_by_id(user_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
    }

    async fn load_address(
        &self,
        address_id: &str,
        user_id: &str,
    ) -> Result<address::Model, ServiceError> {
        Address::find_by_id(address_id)
            .filter(address::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Address not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_validation_accepts_indonesian_formats() {
        for phone in ["081234567890", "+6281234567890", "6281234567890"] {
            assert!(PHONE_RE.is_match(phone), "{phone} should be valid");
        }
        for phone in ["0712345678", "8123", "not-a-phone"] {
            assert!(!PHONE_RE.is_match(phone), "{phone} should be invalid");
        }
    }

    #[test]
    fn gender_accepts_only_p_or_w() {
        assert!(validate_gender("P").is_ok());
        assert!(validate_gender("W").is_ok());
        assert!(validate_gender("X").is_err());
    }
}
