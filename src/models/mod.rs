pub mod event;
pub mod field_set;
pub mod job;
pub mod question_type;
pub mod resource;

pub use event::ViewEvent;
pub use field_set::{FieldFlag, FieldSet};
pub use job::{JobKind, JobPayload, JobResponse, JobState, ProgressStatus, FALLBACK_ERROR_MESSAGE};
pub use question_type::QuestionType;
pub use resource::{FileHandle, ResourceMode, ResourceSelection};
