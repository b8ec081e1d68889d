use serde::{Deserialize, Serialize};

/// Роль пользователя в справочнике
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    Supervisor,
    #[default]
    #[serde(other)]
    Normal,
}

impl UserRole {
    pub fn is_admin(self) -> bool {
        self == UserRole::Admin
    }
}

/// User as stored in the application document (field names follow the stored JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "clave")]
    pub password: String,
    #[serde(rename = "zona", default)]
    pub zone: String,
    #[serde(rename = "grupo", default)]
    pub group: String,
    #[serde(rename = "departamento", default)]
    pub department: String,
    #[serde(rename = "rol", default)]
    pub role: UserRole,
    #[serde(rename = "verPVP", default)]
    pub can_see_retail_price: bool,
}

/// User without the password, safe to return from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub zone: String,
    pub group: String,
    pub department: String,
    pub role: UserRole,
    pub can_see_retail_price: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            zone: user.zone.clone(),
            group: user.group.clone(),
            department: user.department.clone(),
            role: user.role,
            can_see_retail_price: user.can_see_retail_price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUserDto {
    pub id: Option<String>, // None -> create
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub can_see_retail_price: bool,
}
