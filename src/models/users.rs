use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persisted user row. Wire format uses camelCase field names and
/// `yyyy-MM-dd` dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Field values written to storage on insert and full update. Required
/// columns are still `Option` here: storage rejects missing values with a
/// constraint violation, mirroring the NOT NULL schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Incoming request payload for create, full update and partial update.
/// Every field is optional; the service decides which absences matter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<UserRequest> for NewUser {
    fn from(request: UserRequest) -> Self {
        Self {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            birth_date: request.birth_date,
            address: request.address,
            phone: request.phone,
        }
    }
}

impl User {
    /// Returns this user's stored fields, used as the base for a partial
    /// update merge.
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            email: Some(self.email.clone()),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            birth_date: Some(self.birth_date),
            address: self.address.clone(),
            phone: self.phone.clone(),
        }
    }
}
