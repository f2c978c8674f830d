//! Sea-ORM entities for todo lists and their ordered task membership

pub mod todo_list;
pub mod todo_list_task;
