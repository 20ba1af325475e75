//! Diesel schema for task list and task persistence.

diesel::table! {
    /// Task list records.
    task_lists (id) {
        /// Task list identifier.
        id -> Uuid,
        /// Insertion sequence, used for ordering.
        position -> Int8,
        /// Non-blank title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records owned by a task list.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Insertion sequence, used for ordering.
        position -> Int8,
        /// Owning task list.
        task_list_id -> Uuid,
        /// Non-blank title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> task_lists (task_list_id));
diesel::allow_tables_to_appear_in_same_query!(task_lists, tasks);
