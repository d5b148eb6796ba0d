//! Diesel schema for task persistence.

diesel::table! {
    /// Content tasks scoped by owning identity.
    tasks (id) {
        /// Task identifier, generated by the database.
        id -> Uuid,
        /// Owning identity.
        user_id -> Uuid,
        /// Display title.
        #[max_length = 255]
        title -> Varchar,
        /// Target platform.
        #[max_length = 32]
        platform -> Varchar,
        /// Ordered priority tags as a JSON array of strings.
        priority -> Jsonb,
        /// Pipeline stage.
        #[max_length = 32]
        status -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Checklist items as a JSON array.
        checklist -> Jsonb,
        /// Re-engagement flag.
        is_stagnant -> Bool,
        /// Date-only due date.
        due_date -> Nullable<Date>,
        /// Comment counter.
        comments -> Int4,
        /// Attachment counter.
        attachments -> Int4,
        /// Free-form labels as a JSON array of strings.
        tags -> Jsonb,
        /// Assignee avatar URL.
        assignee_avatar -> Nullable<Text>,
        /// Cover image URL.
        image -> Nullable<Text>,
        /// Free-form display date.
        #[sql_name = "date"]
        display_date -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
