use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::Item;

/// Row of the `items` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Item {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let price = model.price.to_f64().ok_or_else(|| {
            DbErr::Type(format!("price {} of item {} is not representable", model.price, model.id))
        })?;

        Ok(Item {
            id: model.id,
            name: model.name,
            price,
        })
    }
}

pub(crate) fn to_decimal(price: f64) -> Result<Decimal, DbErr> {
    Decimal::from_f64(price).ok_or_else(|| DbErr::Type(format!("price {price} is not a decimal")))
}

impl TryFrom<&Item> for ActiveModel {
    type Error = DbErr;

    fn try_from(item: &Item) -> Result<Self, Self::Error> {
        Ok(ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            price: Set(to_decimal(item.price)?),
        })
    }
}
