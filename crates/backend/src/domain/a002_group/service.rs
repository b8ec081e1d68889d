use contracts::domain::a002_group::{Group, GroupDto};
use contracts::domain::common::{new_id, DocumentPatch};

use crate::shared::data::DocumentStore;
use crate::shared::validation::{require, ServiceError};

pub fn apply_upsert(mut list: Vec<Group>, dto: GroupDto) -> Result<(Vec<Group>, Group), ServiceError> {
    require(&dto.name, "nombre")?;
    let name = dto.name.trim().to_string();

    let item = match dto.id {
        Some(id) => {
            let slot = list
                .iter_mut()
                .find(|g| g.id == id)
                .ok_or(ServiceError::NotFound("Group", id))?;
            slot.name = name;
            slot.clone()
        }
        None => {
            let item = Group { id: new_id(), name };
            list.push(item.clone());
            item
        }
    };

    Ok((list, item))
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Group>, ServiceError> {
    Ok(store.read().await?.groups)
}

pub async fn upsert(store: &dyn DocumentStore, dto: GroupDto) -> Result<Group, ServiceError> {
    let (groups, item) = apply_upsert(store.read().await?.groups, dto)?;
    store
        .merge_update(DocumentPatch {
            groups: Some(groups),
            ..Default::default()
        })
        .await?;
    tracing::info!("Group saved: {}", item.name);
    Ok(item)
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, ServiceError> {
    let mut groups = store.read().await?.groups;
    let before = groups.len();
    groups.retain(|g| g.id != id);
    if groups.len() == before {
        return Ok(false);
    }
    store
        .merge_update(DocumentPatch {
            groups: Some(groups),
            ..Default::default()
        })
        .await?;
    Ok(true)
}
