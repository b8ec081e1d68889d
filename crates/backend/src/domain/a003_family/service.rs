use contracts::domain::a003_family::Family;
use contracts::domain::common::DocumentPatch;

use crate::shared::data::DocumentStore;
use crate::shared::validation::{require, ServiceError, ValidationError};

/// Числовой порядок кодов; нечисловые коды идут после числовых в исходном порядке
fn sort_by_code(list: &mut [Family]) {
    list.sort_by_key(|f| match f.id.trim().parse::<i64>() {
        Ok(n) => (0, n),
        Err(_) => (1, 0),
    });
}

/// Новое семейство: код задаёт пользователь, повтор кода запрещён
pub fn apply_create(mut list: Vec<Family>, family: Family) -> Result<Vec<Family>, ValidationError> {
    require(&family.id, "código")?;
    require(&family.name, "nombre")?;

    let family = Family {
        id: family.id.trim().to_string(),
        name: family.name.trim().to_string(),
    };
    if list.iter().any(|f| f.id == family.id) {
        return Err(ValidationError::DuplicateFamily(family.id));
    }

    list.push(family);
    sort_by_code(&mut list);
    Ok(list)
}

/// Переименование; код семейства не меняется
pub fn apply_rename(mut list: Vec<Family>, id: &str, name: &str) -> Result<Vec<Family>, ServiceError> {
    require(name, "nombre")?;
    let slot = list
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| ServiceError::NotFound("Family", id.to_string()))?;
    slot.name = name.trim().to_string();
    Ok(list)
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Family>, ServiceError> {
    Ok(store.read().await?.families)
}

pub async fn create(store: &dyn DocumentStore, family: Family) -> Result<(), ServiceError> {
    let id = family.id.clone();
    let families = apply_create(store.read().await?.families, family)?;
    save(store, families).await?;
    tracing::info!("Family created: {}", id.trim());
    Ok(())
}

pub async fn update(store: &dyn DocumentStore, id: &str, name: &str) -> Result<(), ServiceError> {
    let families = apply_rename(store.read().await?.families, id, name)?;
    save(store, families).await
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, ServiceError> {
    let mut families = store.read().await?.families;
    let before = families.len();
    families.retain(|f| f.id != id);
    if families.len() == before {
        return Ok(false);
    }
    save(store, families).await?;
    Ok(true)
}

async fn save(store: &dyn DocumentStore, families: Vec<Family>) -> Result<(), ServiceError> {
    store
        .merge_update(DocumentPatch {
            families: Some(families),
            ..Default::default()
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::MemoryStore;
    use contracts::domain::common::ApplicationDocument;

    fn family(id: &str, name: &str) -> Family {
        Family {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_create_sorts_numerically() {
        let list = vec![family("2", "Bebidas"), family("10", "Lácteos")];
        let list = apply_create(list, family("9", "Conservas")).unwrap();
        let list = apply_create(list, family("varios", "Otros")).unwrap();

        let ids: Vec<&str> = list.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "9", "10", "varios"]);
    }

    #[test]
    fn test_create_rejects_duplicates_and_blanks() {
        let list = vec![family("10", "Lácteos")];
        assert_eq!(
            apply_create(list.clone(), family(" 10 ", "Otra")),
            Err(ValidationError::DuplicateFamily("10".to_string()))
        );
        assert_eq!(
            apply_create(list, family("11", "")),
            Err(ValidationError::Required("nombre"))
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new(ApplicationDocument::default());
        create(&store, family("5", "Frutas")).await.unwrap();

        update(&store, "5", "Frutas y verduras").await.unwrap();
        assert_eq!(list_all(&store).await.unwrap()[0].name, "Frutas y verduras");

        assert!(matches!(
            update(&store, "6", "x").await,
            Err(ServiceError::NotFound(_, _))
        ));

        assert!(delete(&store, "5").await.unwrap());
        assert!(list_all(&store).await.unwrap().is_empty());
    }
}
