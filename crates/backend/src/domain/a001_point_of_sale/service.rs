use contracts::domain::a001_point_of_sale::{PointOfSale, PointOfSaleDto};
use contracts::domain::common::{new_id, DocumentPatch};

use crate::shared::data::DocumentStore;
use crate::shared::validation::{require, ServiceError, ValidationError};

/// Вставка или обновление точки продаж в списке.
///
/// `código` и `zona` должны быть уникальны среди остальных точек.
/// Зона хранится в верхнем регистре.
pub fn apply_upsert(
    mut list: Vec<PointOfSale>,
    dto: PointOfSaleDto,
) -> Result<(Vec<PointOfSale>, PointOfSale), ServiceError> {
    require(&dto.code, "código")?;
    require(&dto.zone, "zona")?;
    require(&dto.group, "grupo")?;

    let code = dto.code.trim().to_string();
    let zone = dto.zone.trim().to_uppercase();
    let current_id = dto.id.clone().unwrap_or_default();

    if list.iter().any(|p| p.code == code && p.id != current_id) {
        return Err(ValidationError::DuplicateStoreCode(code).into());
    }
    if list.iter().any(|p| p.zone == zone && p.id != current_id) {
        return Err(ValidationError::DuplicateZone(zone).into());
    }

    let item = PointOfSale {
        id: dto.id.clone().unwrap_or_else(new_id),
        code,
        zone,
        group: dto.group.trim().to_string(),
        address: dto.address.trim().to_string(),
        town: dto.town.trim().to_string(),
    };

    match dto.id {
        Some(id) => {
            let slot = list
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(ServiceError::NotFound("Point of sale", id))?;
            *slot = item.clone();
        }
        None => list.push(item.clone()),
    }

    Ok((list, item))
}

/// Получение списка всех точек продаж
pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<PointOfSale>, ServiceError> {
    Ok(store.read().await?.pos)
}

/// Создание (dto.id = None) или обновление точки продаж
pub async fn upsert(
    store: &dyn DocumentStore,
    dto: PointOfSaleDto,
) -> Result<PointOfSale, ServiceError> {
    let document = store.read().await?;
    let (pos, item) = apply_upsert(document.pos, dto)?;

    store
        .merge_update(DocumentPatch {
            pos: Some(pos),
            ..Default::default()
        })
        .await?;

    tracing::info!("Point of sale saved: {} ({})", item.code, item.zone);
    Ok(item)
}

/// Удаление точки продаж; false если такой не было
pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, ServiceError> {
    let mut pos = store.read().await?.pos;
    let before = pos.len();
    pos.retain(|p| p.id != id);
    if pos.len() == before {
        return Ok(false);
    }

    store
        .merge_update(DocumentPatch {
            pos: Some(pos),
            ..Default::default()
        })
        .await?;
    Ok(true)
}
