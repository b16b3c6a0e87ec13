pub mod admin;
pub mod collection;
pub mod site_config;
pub mod site_document;
pub mod upload;

pub use admin::AdminService;
pub use collection::CollectionService;
pub use site_config::SiteConfigService;
pub use site_document::SiteDocumentService;
pub use upload::UploadService;
