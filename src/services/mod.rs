pub mod annotation_service;
pub mod article_source;
pub mod prompts;
pub mod response_decoder;
pub mod worksheet_writer;

pub use annotation_service::AnnotationService;
pub use article_source::ArticleSource;
pub use worksheet_writer::WorksheetWriter;
