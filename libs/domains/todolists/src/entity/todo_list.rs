use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todo_lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::todo_list_task::Entity")]
    TodoListTask,
}

impl Related<super::todo_list_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TodoListTask.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
