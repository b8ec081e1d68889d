use contracts::domain::common::{new_id, DocumentPatch};
use contracts::system::users::{UpsertUserDto, User, UserInfo, UserRole};

use crate::shared::data::{DocumentStore, StoreError};
use crate::shared::validation::{require, ServiceError};

const EMERGENCY_USERNAME: &str = "admin";
const EMERGENCY_PASSWORD: &str = "admin";

/// Результат успешной проверки учётных данных
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub user: User,
    /// Доступ выдан аварийным входом admin/admin
    pub emergency: bool,
}

/// Временный профиль администратора для аварийного входа
pub fn emergency_admin() -> User {
    User {
        id: "admin-temp".to_string(),
        name: EMERGENCY_USERNAME.to_string(),
        password: String::new(),
        zone: "OFI".to_string(),
        group: "Admin".to_string(),
        department: "Supervisor".to_string(),
        role: UserRole::Admin,
        can_see_retail_price: true,
    }
}

/// Поиск пользователя: имя без учёта регистра и пробелов по краям, пароль точно.
///
/// Аварийный вход admin/admin работает только при `emergency_enabled`
/// и пустом справочнике пользователей.
pub fn find_user(
    users: &[User],
    username: &str,
    password: &str,
    emergency_enabled: bool,
) -> Option<Authenticated> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return None;
    }

    let wanted = username.trim().to_lowercase();
    if let Some(user) = users
        .iter()
        .find(|u| u.name.trim().to_lowercase() == wanted && u.password == password)
    {
        return Some(Authenticated {
            user: user.clone(),
            emergency: false,
        });
    }

    if emergency_enabled
        && users.is_empty()
        && username == EMERGENCY_USERNAME
        && password == EMERGENCY_PASSWORD
    {
        tracing::warn!("Emergency admin login granted (user directory is empty)");
        return Some(Authenticated {
            user: emergency_admin(),
            emergency: true,
        });
    }

    None
}

/// Verify credentials against the stored user directory
pub async fn verify_credentials(
    store: &dyn DocumentStore,
    username: &str,
    password: &str,
    emergency_enabled: bool,
) -> Result<Option<Authenticated>, StoreError> {
    let users = store.read().await?.users;
    Ok(find_user(&users, username, password, emergency_enabled))
}

/// List all users without passwords
pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<UserInfo>, ServiceError> {
    let users = store.read().await?.users;
    Ok(users.iter().map(UserInfo::from).collect())
}

pub fn apply_upsert(mut users: Vec<User>, dto: UpsertUserDto) -> Result<(Vec<User>, User), ServiceError> {
    require(&dto.name, "nombre")?;
    require(&dto.password, "clave")?;

    let user = User {
        id: dto.id.clone().unwrap_or_else(new_id),
        name: dto.name.trim().to_string(),
        password: dto.password,
        zone: dto.zone.trim().to_string(),
        group: dto.group.trim().to_string(),
        department: dto.department.trim().to_string(),
        role: dto.role,
        can_see_retail_price: dto.can_see_retail_price,
    };

    match dto.id {
        Some(id) => {
            let slot = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(ServiceError::NotFound("User", id))?;
            *slot = user.clone();
        }
        None => users.push(user.clone()),
    }
    Ok((users, user))
}

/// Create (dto.id = None) or update user
pub async fn upsert(store: &dyn DocumentStore, dto: UpsertUserDto) -> Result<UserInfo, ServiceError> {
    let (users, user) = apply_upsert(store.read().await?.users, dto)?;
    store
        .merge_update(DocumentPatch {
            users: Some(users),
            ..Default::default()
        })
        .await?;
    tracing::info!("User saved: {} ({:?})", user.name, user.role);
    Ok(UserInfo::from(&user))
}

/// Delete user
pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, ServiceError> {
    let mut users = store.read().await?.users;
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return Ok(false);
    }
    store
        .merge_update(DocumentPatch {
            users: Some(users),
            ..Default::default()
        })
        .await?;
    Ok(true)
}
