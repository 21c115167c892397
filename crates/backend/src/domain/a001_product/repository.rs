use contracts::domain::a001_product::{Product, ProductDto};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Максимум ключей в одном IN (...) - ниже старого лимита SQLite в 999 параметров
const LOOKUP_CHUNK_SIZE: usize = 900;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sku: String,
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            sku: m.sku,
            name: m.name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Product>> {
    let items = Entity::find()
        .order_by_asc(Column::Sku)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_sku(db: &DatabaseConnection, sku: &str) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(sku.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

/// INSERT ... ON CONFLICT(sku) DO UPDATE SET name
pub async fn upsert(db: &DatabaseConnection, dto: &ProductDto) -> anyhow::Result<()> {
    let active = ActiveModel {
        sku: Set(dto.sku.trim().to_string()),
        name: Set(dto.name.trim().to_string()),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: sea_orm::ActiveValue::NotSet,
    };

    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Sku)
                .update_column(Column::Name)
                .value(Column::UpdatedAt, Expr::current_timestamp())
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Какие из переданных SKU есть в каталоге.
///
/// Один запрос на каждые `LOOKUP_CHUNK_SIZE` ключей, а не на каждую строку.
pub async fn find_existing_skus(
    db: &DatabaseConnection,
    skus: &[String],
) -> Result<HashSet<String>, DbErr> {
    let mut found = HashSet::with_capacity(skus.len());

    for chunk in skus.chunks(LOOKUP_CHUNK_SIZE) {
        let rows: Vec<String> = Entity::find()
            .select_only()
            .column(Column::Sku)
            .filter(Column::Sku.is_in(chunk.iter().cloned()))
            .into_tuple()
            .all(db)
            .await?;
        found.extend(rows);
    }

    Ok(found)
}
