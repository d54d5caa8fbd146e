//! Item Repository
//!
//! `sort_order` holds the 1-based rank. Every write that touches it runs in a
//! transaction and leaves the table dense (`1..N`).

use super::{RepoError, RepoResult, begin_write};
use shared::models::{Item, ItemCreate, ItemUpdate, OrderEntry};
use shared::validation::validate_reorder;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

const ITEM_COLUMNS: &str =
    "id, name, description, sort_order, form_fields, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: Option<String>,
    sort_order: i32,
    form_fields: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ItemRow> for Item {
    type Error = RepoError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: row.id,
            name: row.name,
            description: row.description,
            order: row.sort_order,
            form_fields: serde_json::from_str(&row.form_fields)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Item>> {
    let rows = sqlx::query_as::<_, ItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM item ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Item::try_from).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Item>> {
    let row = sqlx::query_as::<_, ItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM item WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(Item::try_from).transpose()
}

/// Insert a new item at the end of the collection (`order = max + 1`)
pub async fn create(pool: &SqlitePool, data: ItemCreate) -> RepoResult<Item> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let form_fields = serde_json::to_string(&data.form_fields)?;

    let mut tx = begin_write(pool).await?;

    let next_order: i32 =
        sqlx::query_scalar("SELECT COALESCE(MAX(sort_order), 0) + 1 FROM item")
            .fetch_one(&mut *tx)
            .await?;

    sqlx::query(
        "INSERT INTO item (id, name, description, sort_order, form_fields, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.description.as_deref())
    .bind(next_order)
    .bind(form_fields)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(id, order = next_order, "Item created");

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create item".into()))
}

/// Partial update; `sort_order` is untouched
pub async fn update(pool: &SqlitePool, id: i64, data: ItemUpdate) -> RepoResult<Item> {
    let now = shared::util::now_millis();
    let form_fields = data
        .form_fields
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let name = data.name.as_deref().map(str::trim);

    let rows = sqlx::query(
        "UPDATE item SET name = COALESCE(?1, name), description = COALESCE(?2, description), form_fields = COALESCE(?3, form_fields), updated_at = ?4 WHERE id = ?5",
    )
    .bind(name)
    .bind(data.description.as_deref())
    .bind(form_fields)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Item {id} not found")))
}

/// Delete an item and close the gap it leaves in the ranking
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = begin_write(pool).await?;

    let rows = sqlx::query("DELETE FROM item WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Item {id} not found")));
    }

    let compacted = compact_orders(&mut *tx).await?;
    tx.commit().await?;

    tracing::debug!(id, compacted, "Item deleted");
    Ok(())
}

/// Replace the whole ranking in one transaction
///
/// `entries` must cover every stored item exactly once with orders `1..N`.
/// Returns the number of rows written.
pub async fn reorder(pool: &SqlitePool, entries: &[OrderEntry]) -> RepoResult<usize> {
    let now = shared::util::now_millis();
    let mut tx = begin_write(pool).await?;

    let stored_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM item")
        .fetch_all(&mut *tx)
        .await?;
    validate_reorder(entries, &stored_ids).map_err(RepoError::Rejected)?;

    for entry in entries {
        sqlx::query("UPDATE item SET sort_order = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(entry.order)
            .bind(now)
            .bind(entry.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(entries.len())
}

/// Renumber `sort_order` to `1..N` following the current ranking.
/// Returns how many rows changed.
async fn compact_orders(conn: &mut SqliteConnection) -> RepoResult<u64> {
    let ranking: Vec<(i64, i32)> =
        sqlx::query_as("SELECT id, sort_order FROM item ORDER BY sort_order, id")
            .fetch_all(&mut *conn)
            .await?;

    let mut changed = 0;
    for (index, (id, current)) in ranking.into_iter().enumerate() {
        let order = index as i32 + 1;
        if current == order {
            continue;
        }
        sqlx::query("UPDATE item SET sort_order = ? WHERE id = ?")
            .bind(order)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        changed += 1;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::ErrorCode;
    use shared::models::{FieldType, FormField};

    async fn pool() -> SqlitePool {
        DbService::new(":memory:").await.unwrap().pool
    }

    fn payload(name: &str) -> ItemCreate {
        ItemCreate {
            name: name.to_string(),
            description: None,
            form_fields: vec![],
        }
    }

    async fn seed(pool: &SqlitePool, names: &[&str]) -> Vec<Item> {
        let mut items = Vec::new();
        for name in names {
            items.push(create(pool, payload(name)).await.unwrap());
        }
        items
    }

    fn orders(items: &[Item]) -> Vec<(String, i32)> {
        items.iter().map(|i| (i.name.clone(), i.order)).collect()
    }

    #[tokio::test]
    async fn test_create_appends_with_next_order() {
        let pool = pool().await;
        let items = seed(&pool, &["a", "b", "c"]).await;
        assert_eq!(
            items.iter().map(|i| i.order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(items.iter().all(|i| i.created_at > 0 && i.created_at == i.updated_at));
    }

    #[tokio::test]
    async fn test_form_fields_survive_storage() {
        let pool = pool().await;
        let mut data = payload("Fontaneria");
        data.form_fields = vec![FormField {
            name: "metros".to_string(),
            label: "Metros".to_string(),
            field_type: FieldType::Number,
            unit: Some("m".to_string()),
            required: true,
            options: None,
        }];
        let created = create(&pool, data.clone()).await.unwrap();
        let loaded = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(loaded.form_fields, data.form_fields);
    }

    #[tokio::test]
    async fn test_update_keeps_order_and_unset_fields() {
        let pool = pool().await;
        seed(&pool, &["a", "b"]).await;
        let mut with_description = payload("c");
        with_description.description = Some("nota".to_string());
        let c = create(&pool, with_description).await.unwrap();

        let updated = update(
            &pool,
            c.id,
            ItemUpdate {
                name: Some("  c2 ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "c2");
        assert_eq!(updated.description.as_deref(), Some("nota"));
        assert_eq!(updated.order, 3);

        let err = update(&pool, -1, ItemUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_compacts_orders() {
        let pool = pool().await;
        let items = seed(&pool, &["a", "b", "c", "d"]).await;
        delete(&pool, items[1].id).await.unwrap();

        let remaining = find_all(&pool).await.unwrap();
        assert_eq!(
            orders(&remaining),
            vec![("a".into(), 1), ("c".into(), 2), ("d".into(), 3)]
        );

        let err = delete(&pool, items[1].id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reorder_rewrites_ranking() {
        let pool = pool().await;
        let items = seed(&pool, &["a", "b", "c"]).await;
        let entries = vec![
            OrderEntry { id: items[1].id, order: 1 },
            OrderEntry { id: items[2].id, order: 2 },
            OrderEntry { id: items[0].id, order: 3 },
        ];
        assert_eq!(reorder(&pool, &entries).await.unwrap(), 3);

        let listed = find_all(&pool).await.unwrap();
        assert_eq!(
            orders(&listed),
            vec![("b".into(), 1), ("c".into(), 2), ("a".into(), 3)]
        );
        assert!(listed.iter().all(|i| i.updated_at >= i.created_at));
    }

    #[tokio::test]
    async fn test_rejected_reorder_leaves_table_untouched() {
        let pool = pool().await;
        let items = seed(&pool, &["a", "b", "c"]).await;
        let partial = vec![
            OrderEntry { id: items[2].id, order: 1 },
            OrderEntry { id: items[0].id, order: 2 },
        ];
        let err = reorder(&pool, &partial).await.unwrap_err();
        let RepoError::Rejected(app) = err else {
            panic!("expected a rejection");
        };
        assert_eq!(app.code, ErrorCode::ReorderIncomplete);

        let listed = find_all(&pool).await.unwrap();
        assert_eq!(
            orders(&listed),
            vec![("a".into(), 1), ("b".into(), 2), ("c".into(), 3)]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().join("store.db");
        let pool = DbService::new(&location.to_string_lossy()).await.unwrap().pool;

        let creates: Vec<_> = (0..40)
            .map(|n| {
                let pool = pool.clone();
                tokio::spawn(async move { create(&pool, payload(&format!("item-{n}"))).await })
            })
            .collect();
        for handle in creates {
            handle.await.unwrap().unwrap();
        }

        let listed = find_all(&pool).await.unwrap();
        assert_eq!(listed.len(), 40);
        assert!(listed.iter().enumerate().all(|(i, item)| item.order == i as i32 + 1));

        // Every writer submits a full permutation; all of them must land
        let reorders: Vec<_> = (0..10)
            .map(|shift| {
                let pool = pool.clone();
                let mut ids: Vec<i64> = listed.iter().map(|i| i.id).collect();
                ids.rotate_left(shift);
                tokio::spawn(async move {
                    let entries: Vec<OrderEntry> = ids
                        .into_iter()
                        .enumerate()
                        .map(|(i, id)| OrderEntry { id, order: i as i32 + 1 })
                        .collect();
                    reorder(&pool, &entries).await
                })
            })
            .collect();
        for handle in reorders {
            assert_eq!(handle.await.unwrap().unwrap(), 40);
        }

        let after = find_all(&pool).await.unwrap();
        assert!(after.iter().enumerate().all(|(i, item)| item.order == i as i32 + 1));
    }
}
