pub mod archive;
pub mod backend;
pub mod controller;
pub mod paste;
pub mod submit;
pub mod table;
pub mod upload;

pub use archive::ArchiveWriter;
pub use backend::{HttpSplitterClient, SplitterBackend};
pub use controller::SplitterController;
pub use paste::{ParsedPaste, PasteParser};
pub use submit::SubmissionValidator;
pub use table::SplitTable;
pub use upload::{DocumentUpload, UploadCandidate, UploadValidator};
