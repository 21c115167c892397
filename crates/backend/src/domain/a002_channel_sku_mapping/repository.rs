use contracts::domain::a002_channel_sku_mapping::{ChannelSkuMapping, MappingRecord, MappingStatus};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_channel_sku_mapping")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub channel_sku: String,
    pub channel_name: String,
    pub master_sku: String,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ChannelSkuMapping {
    fn from(m: Model) -> Self {
        ChannelSkuMapping {
            id: m.id,
            status: MappingStatus::parse(&m.status).unwrap_or_default(),
            channel_sku: m.channel_sku,
            channel_name: m.channel_name,
            master_sku: m.master_sku,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// ActiveModel только с данными записи: id и метки времени генерирует база
fn to_active_model(record: &MappingRecord) -> ActiveModel {
    ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        channel_sku: Set(record.channel_sku.clone()),
        channel_name: Set(record.channel_name.clone()),
        master_sku: Set(record.master_sku.clone()),
        status: Set(record.status.as_str().to_string()),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: sea_orm::ActiveValue::NotSet,
    }
}

/// Upsert пакета одной командой:
/// INSERT ... ON CONFLICT(channel_sku, channel_name) DO UPDATE SET master_sku, status, updated_at
pub async fn upsert_many(db: &DatabaseConnection, records: &[MappingRecord]) -> Result<u64, DbErr> {
    if records.is_empty() {
        return Ok(0);
    }

    Entity::insert_many(records.iter().map(to_active_model))
        .on_conflict(
            OnConflict::columns([Column::ChannelSku, Column::ChannelName])
                .update_columns([Column::MasterSku, Column::Status])
                .value(Column::UpdatedAt, Expr::current_timestamp())
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
}

pub async fn list_all(
    db: &DatabaseConnection,
    channel_name: Option<&str>,
) -> anyhow::Result<Vec<ChannelSkuMapping>> {
    let mut query = Entity::find()
        .order_by_asc(Column::ChannelName)
        .order_by_asc(Column::ChannelSku);
    if let Some(channel_name) = channel_name {
        query = query.filter(Column::ChannelName.eq(channel_name));
    }
    let items = query.all(db).await?.into_iter().map(Into::into).collect();
    Ok(items)
}

#[cfg(test)]
pub async fn get_by_key(
    db: &DatabaseConnection,
    channel_sku: &str,
    channel_name: &str,
) -> anyhow::Result<Option<ChannelSkuMapping>> {
    let result = Entity::find()
        .filter(Column::ChannelSku.eq(channel_sku))
        .filter(Column::ChannelName.eq(channel_name))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Удаление по фильтру: все сопоставления одного канала
pub async fn delete_by_channel(db: &DatabaseConnection, channel_name: &str) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::ChannelName.eq(channel_name))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
