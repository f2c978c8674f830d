use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TodoLists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TodoLists::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(TodoLists::Name, 255))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_todo_lists_name")
                    .table(TodoLists::Table)
                    .col(TodoLists::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Ordered membership. Rows go away with their list; tasks are never touched.
        manager
            .create_table(
                Table::create()
                    .table(TodoListTasks::Table)
                    .if_not_exists()
                    .col(big_integer(TodoListTasks::TodoListId))
                    .col(big_integer(TodoListTasks::TaskId))
                    .col(integer(TodoListTasks::Position))
                    .primary_key(
                        Index::create()
                            .col(TodoListTasks::TodoListId)
                            .col(TodoListTasks::Position),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_todo_list_tasks_todo_list_id")
                            .from(TodoListTasks::Table, TodoListTasks::TodoListId)
                            .to(TodoLists::Table, TodoLists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_todo_list_tasks_task_id")
                            .from(TodoListTasks::Table, TodoListTasks::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_todo_list_tasks_task_id")
                    .table(TodoListTasks::Table)
                    .col(TodoListTasks::TaskId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TodoListTasks::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TodoLists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TodoLists {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum TodoListTasks {
    Table,
    TodoListId,
    TaskId,
    Position,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
}
