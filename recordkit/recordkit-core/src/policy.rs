//! Behavior knobs of the record builder.

/// How free-form `build()` handles several writes to the same field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateEntryPolicy {
    /// One entry per name, at the position of the first write, carrying the
    /// descriptor of the last write.
    #[default]
    LastWins,
    /// Legacy behavior: every write appends an entry to the inferred schema,
    /// so repeated names appear repeatedly.
    KeepAll,
}

/// What a null `DATETIME` write stores on a nullable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullDateTimePolicy {
    /// Nothing is stored; the field reads back as absent.
    #[default]
    Absent,
    /// Legacy behavior: `-1` epoch millis is stored.
    Sentinel,
}

/// Aggregate policy of a [`RecordBuilder`](crate::RecordBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildPolicy {
    pub duplicate_entries: DuplicateEntryPolicy,
    pub null_date_time: NullDateTimePolicy,
}

impl BuildPolicy {
    /// Policy matching records produced by older pipelines.
    pub fn legacy() -> Self {
        Self {
            duplicate_entries: DuplicateEntryPolicy::KeepAll,
            null_date_time: NullDateTimePolicy::Sentinel,
        }
    }
}
