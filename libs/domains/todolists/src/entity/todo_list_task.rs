use sea_orm::entity::prelude::*;

/// One membership row; `position` orders the tasks within a list
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todo_list_tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub todo_list_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub position: i32,
    pub task_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::todo_list::Entity",
        from = "Column::TodoListId",
        to = "super::todo_list::Column::Id",
        on_delete = "Cascade"
    )]
    TodoList,
}

impl Related<super::todo_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TodoList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
