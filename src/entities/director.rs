use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "directors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::oscar::Entity")]
    Oscar,
}

impl Related<super::oscar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Oscar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
